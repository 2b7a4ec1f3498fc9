use dual_session_core::config::TransferConfig;
use dual_session_core::contract::{into_response, LambdaResponse, TransferReport};
use dual_session_core::credentials::{DESTINATION_WRITER_SESSION, SOURCE_READER_SESSION};
use dual_session_core::error::{DemoError, ErrorKind};
use dual_session_core::fixture::{Clock, TestObject};
use rand::Rng;
use tracing::{error, info};

use crate::adapters::object_store::ObjectStore;
use crate::adapters::role_session::{ReaderSession, RoleSession, RoleSessionBroker, WriterSession};

const COMPONENT: &str = "dual_session_handler";

/// Collaborators injected at cold start. The ambient store uses the
/// function's own identity and is only used to seed the source bucket.
#[derive(Clone, Copy)]
pub struct DualSessionDependencies<'a> {
    pub ambient_store: &'a dyn ObjectStore,
    pub broker: &'a dyn RoleSessionBroker,
    pub clock: &'a dyn Clock,
}

/// Loads configuration, runs the pipeline and collapses the outcome into the
/// response envelope. Never fails: every error becomes a 500 envelope.
pub fn handle_invocation<R: Rng + ?Sized>(
    lookup: impl Fn(&str) -> Option<String>,
    deps: &DualSessionDependencies<'_>,
    rng: &mut R,
) -> LambdaResponse {
    let outcome = TransferConfig::from_lookup(lookup)
        .and_then(|config| run_dual_session_demo(&config, deps, rng));

    match &outcome {
        Ok(report) => info!(
            component = COMPONENT,
            object_key = %report.object_key,
            "dual session demo completed"
        ),
        Err(failure) => error!(
            component = COMPONENT,
            error_kind = %failure.kind(),
            error = %failure,
            "error in lambda execution"
        ),
    }

    into_response(&outcome)
}

pub fn run_dual_session_demo<R: Rng + ?Sized>(
    config: &TransferConfig,
    deps: &DualSessionDependencies<'_>,
    rng: &mut R,
) -> Result<TransferReport, DemoError> {
    let object = TestObject::generate(deps.clock, rng, config.fixture_size);

    seed_test_object(deps.ambient_store, &config.source_bucket, &object)?;

    let reader = ReaderSession::new(open_role_session(
        deps.broker,
        &config.source_role_arn,
        SOURCE_READER_SESSION,
        ErrorKind::SourceRoleExchange,
    )?);
    let writer = WriterSession::new(open_role_session(
        deps.broker,
        &config.dest_role_arn,
        DESTINATION_WRITER_SESSION,
        ErrorKind::DestinationRoleExchange,
    )?);

    transfer_and_verify(
        &reader,
        &writer,
        &config.source_bucket,
        &config.destination_bucket,
        &object.key,
    )?;

    Ok(TransferReport {
        source_bucket: config.source_bucket.clone(),
        destination_bucket: config.destination_bucket.clone(),
        object_key: object.key,
    })
}

fn seed_test_object(
    store: &dyn ObjectStore,
    bucket: &str,
    object: &TestObject,
) -> Result<(), DemoError> {
    info!(
        component = COMPONENT,
        bucket,
        key = %object.key,
        size = object.body.len(),
        "creating test object in source bucket"
    );

    store
        .put_object(bucket, &object.key, object.body.as_bytes())
        .map_err(|message| stage_failure(ErrorKind::SeedWrite, "error creating test object", message))
}

fn open_role_session(
    broker: &dyn RoleSessionBroker,
    role_arn: &str,
    session_name: &str,
    kind: ErrorKind,
) -> Result<RoleSession, DemoError> {
    info!(component = COMPONENT, role_arn, session_name, "assuming role");

    broker
        .open_session(role_arn, session_name)
        .map_err(|message| {
            let context = match kind {
                ErrorKind::SourceRoleExchange => "error assuming source reader role",
                _ => "error assuming destination writer role",
            };
            stage_failure(kind, context, message)
        })
}

/// Streams the object from the reader session into the writer session, then
/// confirms the destination object exists. A partially written destination
/// object is left in place on failure.
fn transfer_and_verify(
    reader: &ReaderSession,
    writer: &WriterSession,
    source_bucket: &str,
    destination_bucket: &str,
    key: &str,
) -> Result<(), DemoError> {
    info!(
        component = COMPONENT,
        source_bucket,
        destination_bucket,
        key,
        reader_role = reader.session().role_arn(),
        writer_role = writer.session().role_arn(),
        "streaming object from source bucket to destination bucket"
    );

    let stream = reader
        .read_stream(source_bucket, key)
        .map_err(|message| stage_failure(ErrorKind::Read, "error reading source object", message))?;

    writer
        .upload_stream(destination_bucket, key, stream)
        .map_err(|message| {
            stage_failure(ErrorKind::Write, "error streaming object to destination", message)
        })?;

    let metadata = writer
        .head_object(destination_bucket, key)
        .map_err(|message| {
            stage_failure(ErrorKind::Verify, "error verifying destination object", message)
        })?;

    info!(
        component = COMPONENT,
        destination_bucket,
        key,
        content_length = metadata.content_length,
        e_tag = metadata.e_tag.as_deref(),
        "verified object in destination bucket"
    );
    Ok(())
}

fn stage_failure(kind: ErrorKind, context: &str, message: String) -> DemoError {
    error!(
        component = COMPONENT,
        error_kind = %kind,
        error = %message,
        "{context}"
    );
    DemoError::new(kind, message)
}
