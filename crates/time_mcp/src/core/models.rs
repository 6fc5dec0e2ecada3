use chrono::DateTime;
use chrono_tz::{OffsetComponents, Tz};
use rmcp::schemars;
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::utils::{DATETIME_FORMAT, DAY_FORMAT};

/// Trim a required string field during deserialization
fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(s.trim().to_string())
}

/// Trim an optional string field; whitespace-only values collapse to absent
fn trimmed_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Snapshot of a moment in a single timezone
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct TimeResult {
    /// IANA timezone name
    pub timezone: String,
    /// ISO 8601 datetime string with UTC offset
    pub datetime: String,
    /// Day of the week
    pub day_of_week: String,
    /// Whether daylight saving time is active
    pub is_dst: bool,
}

impl TimeResult {
    pub(crate) fn new(dt: &DateTime<Tz>, timezone_name: &str) -> Self {
        Self {
            timezone: timezone_name.to_string(),
            datetime: dt.format(DATETIME_FORMAT).to_string(),
            day_of_week: dt.format(DAY_FORMAT).to_string(),
            is_dst: dt.offset().dst_offset().num_seconds() != 0,
        }
    }
}

/// Outcome of converting a wall-clock time between two timezones
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct TimeConversionResult {
    /// The time as seen in the source timezone
    pub source: TimeResult,
    /// The same instant in the target timezone
    pub target: TimeResult,
    /// UTC-offset difference between target and source, in hours
    pub time_difference: String,
}

/// Request to get the current time in a timezone
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetCurrentTimeRequest {
    /// IANA timezone name (e.g. 'America/New_York', 'Europe/London').
    /// Defaults to the server's local timezone when omitted.
    #[serde(default, deserialize_with = "trimmed_opt")]
    pub timezone: Option<String>,
}

/// Request to convert a time between timezones
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ConvertTimeRequest {
    /// Source IANA timezone name; defaults to the server's local timezone
    #[serde(default, deserialize_with = "trimmed_opt")]
    pub source_timezone: Option<String>,
    /// Time to convert in 24-hour format (HH:MM)
    #[serde(deserialize_with = "trimmed")]
    pub time: String,
    /// Target IANA timezone name; defaults to the server's local timezone
    #[serde(default, deserialize_with = "trimmed_opt")]
    pub target_timezone: Option<String>,
}
