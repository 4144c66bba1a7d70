use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

/// Uniform response envelope; every endpoint answers in this shape
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ApiResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(true, message)
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self::new(false, message)
    }

    /// Attach a `data` payload. Serializing our own response types cannot
    /// fail, so a failure is silently dropped rather than surfaced.
    pub fn with_data<T: Serialize>(mut self, data: T) -> Self {
        self.data = serde_json::to_value(data).ok();
        self
    }

    fn new(success: bool, message: impl Into<String>) -> Self {
        Self {
            success,
            message: message.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let response = ApiResponse::ok("done").with_data(serde_json::json!({"n": 1}));
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["message"], "done");
        assert_eq!(value["data"]["n"], 1);
        assert!(value["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_data_omitted_when_absent() {
        let value = serde_json::to_value(ApiResponse::err("nope")).unwrap();
        assert_eq!(value["success"], false);
        assert!(value.get("data").is_none());
    }
}
