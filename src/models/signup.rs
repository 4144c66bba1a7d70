use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_REFERRER, DEFAULT_SCREEN_RESOLUTION, DEFAULT_SOURCE, DEFAULT_TIMEZONE,
    DEFAULT_USER_AGENT,
};

/// Raw signup submission as received on the wire
#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub source: Option<String>,
    #[serde(rename = "userAgent")]
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    #[serde(rename = "screenResolution")]
    pub screen_resolution: Option<String>,
    pub timezone: Option<String>,
}

/// One stored waitlist row
/// Uses a Unix timestamp for compact storage with bincode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupRecord {
    /// When the row was appended (Unix timestamp); never rewritten
    pub created_at: i64,
    /// Normalized (lowercased, trimmed) address
    pub email: String,
    pub source: String,
    pub user_agent: String,
    pub referrer: String,
    pub screen_resolution: String,
    pub timezone: String,
}

impl SignupRecord {
    /// Build the stored row from a submission: normalized email, defaulted
    /// optional fields, caller-stamped creation time. Empty strings count
    /// as absent, the same as missing fields.
    pub fn from_request(request: &SignupRequest, created_at: i64) -> Self {
        Self {
            created_at,
            email: normalize_email(&request.email),
            source: field_or(&request.source, DEFAULT_SOURCE),
            user_agent: field_or(&request.user_agent, DEFAULT_USER_AGENT),
            referrer: field_or(&request.referrer, DEFAULT_REFERRER),
            screen_resolution: field_or(&request.screen_resolution, DEFAULT_SCREEN_RESOLUTION),
            timezone: field_or(&request.timezone, DEFAULT_TIMEZONE),
        }
    }
}

/// Lowercase and trim an address before storage or comparison
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Render a stored Unix timestamp as ISO-8601 with milliseconds, UTC
pub fn iso_timestamp(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .unwrap_or_else(Utc::now)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Human-readable local date, used in the duplicate-signup rejection
pub fn date_string(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .unwrap_or_else(Utc::now)
        .with_timezone(&Local)
        .format("%a %b %d %Y")
        .to_string()
}

fn field_or(value: &Option<String>, fallback: &str) -> String {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}
