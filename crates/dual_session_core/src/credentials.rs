pub const SOURCE_READER_SESSION: &str = "SourceReaderSession";
pub const DESTINATION_WRITER_SESSION: &str = "DestinationWriterSession";

/// Short-lived credentials issued for one assumed role and session name.
///
/// Expiry is enforced by the provider and not tracked here. `Debug` output
/// never includes the secret key or the session token.
#[derive(Clone, PartialEq, Eq)]
pub struct TemporaryCredentials {
    access_key_id: String,
    secret_access_key: String,
    session_token: String,
}

impl TemporaryCredentials {
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: impl Into<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: session_token.into(),
        }
    }

    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    pub fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }

    pub fn session_token(&self) -> &str {
        &self.session_token
    }
}

impl std::fmt::Debug for TemporaryCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemporaryCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &"** redacted **")
            .finish()
    }
}
