use serde::Serialize;
use serde_json::Value;

/// The result of a request sent to LogSnag.
///
/// Successful outcomes carry the parsed response body. Failed outcomes carry an error message and,
/// unless the request never got a response, the HTTP status code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    success: bool,
    data: Option<Value>,
    error_message: Option<String>,
    status_code: Option<u16>,
}

impl Outcome {
    /// A 2xx response, with its parsed body if it had one.
    pub fn success(data: Option<Value>, status_code: u16) -> Self {
        Outcome {
            success: true,
            data,
            error_message: None,
            status_code: Some(status_code),
        }
    }

    /// A non-2xx response.
    pub fn failure(error_message: impl Into<String>, status_code: u16) -> Self {
        Outcome {
            success: false,
            data: None,
            error_message: Some(error_message.into()),
            status_code: Some(status_code),
        }
    }

    /// The request failed before any response was received.
    pub fn transport_failure(error_message: impl Into<String>) -> Self {
        Outcome {
            success: false,
            data: None,
            error_message: Some(error_message.into()),
            status_code: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn is_error(&self) -> bool {
        !self.success
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<Value> {
        self.data
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::Outcome;

    #[test]
    fn success_carries_data_and_status() {
        let outcome = Outcome::success(Some(json!("data")), 200);
        assert!(outcome.is_success());
        assert!(!outcome.is_error());
        assert_eq!(outcome.data(), Some(&json!("data")));
        assert_eq!(outcome.error_message(), None);
        assert_eq!(outcome.status_code(), Some(200));
    }

    #[test]
    fn failure_carries_message_and_status() {
        let outcome = Outcome::failure("error", 400);
        assert!(!outcome.is_success());
        assert!(outcome.is_error());
        assert_eq!(outcome.data(), None);
        assert_eq!(outcome.error_message(), Some("error"));
        assert_eq!(outcome.status_code(), Some(400));
    }

    #[test]
    fn transport_failure_has_no_status() {
        let outcome = Outcome::transport_failure("connection refused");
        assert!(outcome.is_error());
        assert_eq!(outcome.data(), None);
        assert_eq!(outcome.error_message(), Some("connection refused"));
        assert_eq!(outcome.status_code(), None);
    }

    #[test]
    fn serializes_all_fields() {
        let outcome = Outcome::success(None, 204);
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"success": true, "data": null, "error_message": null, "status_code": 204})
        );
    }
}
