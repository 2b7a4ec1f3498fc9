use super::object_store::{ObjectMetadata, ObjectStore, ObjectStream};

/// Object store bound to one assumed role.
pub struct RoleSession {
    role_arn: String,
    session_name: String,
    store: Box<dyn ObjectStore>,
}

impl RoleSession {
    pub fn new(
        role_arn: impl Into<String>,
        session_name: impl Into<String>,
        store: Box<dyn ObjectStore>,
    ) -> Self {
        Self {
            role_arn: role_arn.into(),
            session_name: session_name.into(),
            store,
        }
    }

    pub fn role_arn(&self) -> &str {
        &self.role_arn
    }

    pub fn session_name(&self) -> &str {
        &self.session_name
    }
}

impl std::fmt::Debug for RoleSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleSession")
            .field("role_arn", &self.role_arn)
            .field("session_name", &self.session_name)
            .finish_non_exhaustive()
    }
}

/// Exchanges a role identifier for temporary credentials and builds a store
/// bound to them. One call performs exactly one exchange, with no retry.
pub trait RoleSessionBroker {
    fn open_session(&self, role_arn: &str, session_name: &str) -> Result<RoleSession, String>;
}

/// Source-side session: can only read.
#[derive(Debug)]
pub struct ReaderSession(RoleSession);

impl ReaderSession {
    pub fn new(session: RoleSession) -> Self {
        Self(session)
    }

    pub fn session(&self) -> &RoleSession {
        &self.0
    }

    pub fn read_stream(&self, bucket: &str, key: &str) -> Result<ObjectStream, String> {
        self.0.store.get_object_stream(bucket, key)
    }
}

/// Destination-side session: can only upload and check existence.
#[derive(Debug)]
pub struct WriterSession(RoleSession);

impl WriterSession {
    pub fn new(session: RoleSession) -> Self {
        Self(session)
    }

    pub fn session(&self) -> &RoleSession {
        &self.0
    }

    pub fn upload_stream(&self, bucket: &str, key: &str, stream: ObjectStream) -> Result<(), String> {
        self.0.store.upload_stream(bucket, key, stream)
    }

    pub fn head_object(&self, bucket: &str, key: &str) -> Result<ObjectMetadata, String> {
        self.0.store.head_object(bucket, key)
    }
}
