use rmcp::ErrorData as McpError;
use rmcp::serde_json::json;

use crate::core::utils::AVAILABLE_RESOURCES;

// Error codes
const ERROR_INVALID_TIMEZONE: &str = "invalid_timezone";
const ERROR_INVALID_TIME_FORMAT: &str = "invalid_time_format";
const ERROR_AMBIGUOUS_TIME: &str = "ambiguous_time";
const ERROR_NONEXISTENT_TIME: &str = "nonexistent_time";
const ERROR_RESOURCE_NOT_FOUND: &str = "resource_not_found";

/// Domain errors raised by the time server
#[derive(Debug, thiserror::Error)]
pub enum TimeServerError {
    #[error("Invalid timezone: {timezone}")]
    InvalidTimezone { timezone: String },
    #[error("Invalid time format: {time}. Expected 24-hour HH:MM")]
    InvalidTimeFormat { time: String },
    #[error("Time {time} is ambiguous in {timezone} (DST fold)")]
    AmbiguousTime { time: String, timezone: String },
    #[error("Time {time} does not exist in {timezone} (DST gap)")]
    NonexistentTime { time: String, timezone: String },
    #[error("Resource not found: {uri}")]
    ResourceNotFound { uri: String },
}

impl From<TimeServerError> for McpError {
    fn from(err: TimeServerError) -> Self {
        match err {
            TimeServerError::InvalidTimezone { timezone } => McpError::invalid_params(
                ERROR_INVALID_TIMEZONE,
                Some(json!({"timezone": timezone})),
            ),
            TimeServerError::InvalidTimeFormat { time } => {
                McpError::invalid_params(ERROR_INVALID_TIME_FORMAT, Some(json!({"time": time})))
            }
            TimeServerError::AmbiguousTime { time, timezone } => McpError::invalid_params(
                ERROR_AMBIGUOUS_TIME,
                Some(json!({"time": time, "timezone": timezone})),
            ),
            TimeServerError::NonexistentTime { time, timezone } => McpError::invalid_params(
                ERROR_NONEXISTENT_TIME,
                Some(json!({"time": time, "timezone": timezone})),
            ),
            TimeServerError::ResourceNotFound { uri } => McpError::resource_not_found(
                ERROR_RESOURCE_NOT_FOUND,
                Some(json!({
                    "uri": uri,
                    "available_resources": AVAILABLE_RESOURCES,
                })),
            ),
        }
    }
}

pub type TimeServerResult<T> = Result<T, TimeServerError>;
pub type McpResult<T> = Result<T, McpError>;
