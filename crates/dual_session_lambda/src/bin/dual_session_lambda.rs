use std::future::Future;

use aws_config::SdkConfig;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use dual_session_core::contract::LambdaResponse;
use dual_session_core::credentials::TemporaryCredentials;
use dual_session_core::fixture::SystemClock;
use dual_session_lambda::adapters::object_store::{ObjectMetadata, ObjectStore, ObjectStream};
use dual_session_lambda::adapters::role_session::{RoleSession, RoleSessionBroker};
use dual_session_lambda::handlers::dual_session::{handle_invocation, DualSessionDependencies};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

const ASSUMED_ROLE_PROVIDER: &str = "dual-session-assume-role";

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

fn sdk_failure(action: &str, error: impl std::error::Error) -> String {
    format!("failed to {action}: {}", DisplayErrorContext(error))
}

struct S3ObjectStore {
    s3_client: aws_sdk_s3::Client,
}

impl ObjectStore for S3ObjectStore {
    fn put_object(&self, bucket: &str, key: &str, body: &[u8]) -> Result<(), String> {
        let request = self
            .s3_client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(body.to_vec()));

        block_on(request.send())
            .map(|_| ())
            .map_err(|error| sdk_failure("write object to s3", error))
    }

    fn get_object_stream(&self, bucket: &str, key: &str) -> Result<ObjectStream, String> {
        let request = self.s3_client.get_object().bucket(bucket).key(key);
        let output =
            block_on(request.send()).map_err(|error| sdk_failure("read object from s3", error))?;

        Ok(ObjectStream {
            content_length: output.content_length(),
            content_type: output.content_type().map(str::to_string),
            body: output.body,
        })
    }

    fn upload_stream(&self, bucket: &str, key: &str, stream: ObjectStream) -> Result<(), String> {
        // The source length lets the body go out unbuffered.
        let request = self
            .s3_client
            .put_object()
            .bucket(bucket)
            .key(key)
            .set_content_length(stream.content_length)
            .set_content_type(stream.content_type)
            .body(stream.body);

        block_on(request.send())
            .map(|_| ())
            .map_err(|error| sdk_failure("stream object to s3", error))
    }

    fn head_object(&self, bucket: &str, key: &str) -> Result<ObjectMetadata, String> {
        let request = self.s3_client.head_object().bucket(bucket).key(key);
        let output = block_on(request.send())
            .map_err(|error| sdk_failure("head object in s3", error))?;

        Ok(ObjectMetadata {
            content_length: output.content_length(),
            e_tag: output.e_tag().map(str::to_string),
        })
    }
}

struct StsRoleSessionBroker {
    sts_client: aws_sdk_sts::Client,
    shared_config: SdkConfig,
}

impl StsRoleSessionBroker {
    fn exchange_credentials(
        &self,
        role_arn: &str,
        session_name: &str,
    ) -> Result<TemporaryCredentials, String> {
        let request = self
            .sts_client
            .assume_role()
            .role_arn(role_arn)
            .role_session_name(session_name);
        let output = block_on(request.send())
            .map_err(|error| sdk_failure(&format!("assume role {role_arn}"), error))?;

        let credentials = output
            .credentials()
            .ok_or_else(|| format!("assume role response for {role_arn} carried no credentials"))?;

        Ok(TemporaryCredentials::new(
            credentials.access_key_id(),
            credentials.secret_access_key(),
            credentials.session_token(),
        ))
    }
}

impl RoleSessionBroker for StsRoleSessionBroker {
    fn open_session(&self, role_arn: &str, session_name: &str) -> Result<RoleSession, String> {
        let credentials = self.exchange_credentials(role_arn, session_name)?;
        let store = S3ObjectStore {
            s3_client: scoped_s3_client(&self.shared_config, &credentials),
        };
        Ok(RoleSession::new(role_arn, session_name, Box::new(store)))
    }
}

/// Builds an S3 client that signs only with the given credentials, ignoring
/// the ambient provider chain.
fn scoped_s3_client(
    shared_config: &SdkConfig,
    credentials: &TemporaryCredentials,
) -> aws_sdk_s3::Client {
    let provider = Credentials::new(
        credentials.access_key_id(),
        credentials.secret_access_key(),
        Some(credentials.session_token().to_string()),
        None,
        ASSUMED_ROLE_PROVIDER,
    );
    let config = aws_sdk_s3::config::Builder::from(shared_config)
        .credentials_provider(provider)
        .build();
    aws_sdk_s3::Client::from_conf(config)
}

struct RuntimeDependencies {
    ambient_store: S3ObjectStore,
    broker: StsRoleSessionBroker,
}

impl RuntimeDependencies {
    fn from_config(shared_config: SdkConfig) -> Self {
        Self {
            ambient_store: S3ObjectStore {
                s3_client: aws_sdk_s3::Client::new(&shared_config),
            },
            broker: StsRoleSessionBroker {
                sts_client: aws_sdk_sts::Client::new(&shared_config),
                shared_config,
            },
        }
    }
}

async fn handle_request(
    event: LambdaEvent<Value>,
    runtime: &RuntimeDependencies,
) -> Result<LambdaResponse, Error> {
    let (_payload, context) = event.into_parts();
    info!(request_id = %context.request_id, "dual session invocation started");

    let deps = DualSessionDependencies {
        ambient_store: &runtime.ambient_store,
        broker: &runtime.broker,
        clock: &SystemClock,
    };
    Ok(handle_invocation(
        |key| std::env::var(key).ok(),
        &deps,
        &mut rand::thread_rng(),
    ))
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_current_span(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let shared_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let runtime = RuntimeDependencies::from_config(shared_config);

    lambda_runtime::run(service_fn(|event| handle_request(event, &runtime))).await
}
