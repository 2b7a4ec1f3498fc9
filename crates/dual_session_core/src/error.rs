use serde::Serialize;
use thiserror::Error;

/// Pipeline stage at which an invocation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Configuration,
    SeedWrite,
    SourceRoleExchange,
    DestinationRoleExchange,
    Read,
    Write,
    Verify,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::SeedWrite => "seed_write",
            Self::SourceRoleExchange => "source_role_exchange",
            Self::DestinationRoleExchange => "destination_role_exchange",
            Self::Read => "read",
            Self::Write => "write",
            Self::Verify => "verify",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DemoError {
    kind: ErrorKind,
    message: String,
}

impl DemoError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
