use crate::error::DemoError;
use crate::fixture::DEFAULT_FIXTURE_SIZE;

pub const SOURCE_BUCKET_VAR: &str = "SOURCE_BUCKET";
pub const DESTINATION_BUCKET_VAR: &str = "DESTINATION_BUCKET";
pub const SOURCE_ROLE_ARN_VAR: &str = "SOURCE_ROLE_ARN";
pub const DEST_ROLE_ARN_VAR: &str = "DEST_ROLE_ARN";
pub const FIXTURE_SIZE_VAR: &str = "FIXTURE_SIZE";

pub const REQUIRED_VARS: [&str; 4] = [
    SOURCE_BUCKET_VAR,
    DESTINATION_BUCKET_VAR,
    SOURCE_ROLE_ARN_VAR,
    DEST_ROLE_ARN_VAR,
];

/// Identifiers for one invocation. Values are taken verbatim; bucket names and
/// role ARNs are only checked by the API calls that use them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferConfig {
    pub source_bucket: String,
    pub destination_bucket: String,
    pub source_role_arn: String,
    pub dest_role_arn: String,
    pub fixture_size: usize,
}

impl TransferConfig {
    pub fn from_env() -> Result<Self, DemoError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DemoError> {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| {
                DemoError::configuration(format!("{key} must be configured"))
            })
        };

        let source_bucket = required(SOURCE_BUCKET_VAR)?;
        let destination_bucket = required(DESTINATION_BUCKET_VAR)?;
        let source_role_arn = required(SOURCE_ROLE_ARN_VAR)?;
        let dest_role_arn = required(DEST_ROLE_ARN_VAR)?;
        let fixture_size = match lookup(FIXTURE_SIZE_VAR) {
            None => DEFAULT_FIXTURE_SIZE,
            Some(raw) => parse_fixture_size(&raw)?,
        };

        Ok(Self {
            source_bucket,
            destination_bucket,
            source_role_arn,
            dest_role_arn,
            fixture_size,
        })
    }
}

fn parse_fixture_size(raw: &str) -> Result<usize, DemoError> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err(DemoError::configuration(format!(
            "{FIXTURE_SIZE_VAR} must be a positive integer"
        ))),
        Ok(value) => Ok(value),
        Err(error) => Err(DemoError::configuration(format!(
            "{FIXTURE_SIZE_VAR} is not a valid size: {error}"
        ))),
    }
}
