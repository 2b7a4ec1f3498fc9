use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::DemoError;

pub const SUCCESS_MESSAGE: &str = "Dual session demo completed successfully";
pub const STATUS_OK: u16 = 200;
pub const STATUS_ERROR: u16 = 500;

/// Envelope returned to the invoking platform. `body` is a JSON string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LambdaResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransferReport {
    pub source_bucket: String,
    pub destination_bucket: String,
    pub object_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuccessBody {
    pub message: String,
    pub source_bucket: String,
    pub destination_bucket: String,
    pub object_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FailureBody {
    pub message: String,
}

pub fn success_response(report: &TransferReport) -> LambdaResponse {
    LambdaResponse {
        status_code: STATUS_OK,
        body: json!({
            "message": SUCCESS_MESSAGE,
            "source_bucket": report.source_bucket,
            "destination_bucket": report.destination_bucket,
            "object_key": report.object_key,
        })
        .to_string(),
    }
}

/// Error kind is dropped here; only the message text reaches the caller.
pub fn failure_response(error: &DemoError) -> LambdaResponse {
    LambdaResponse {
        status_code: STATUS_ERROR,
        body: json!({ "message": format!("Error: {error}") }).to_string(),
    }
}

pub fn into_response(outcome: &Result<TransferReport, DemoError>) -> LambdaResponse {
    match outcome {
        Ok(report) => success_response(report),
        Err(error) => failure_response(error),
    }
}
