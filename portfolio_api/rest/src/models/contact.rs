use portfolio_models::contact::ContactViolation;
use serde::Serialize;

pub const MESSAGE_SENT: &str = "Message sent successfully! I'll get back to you soon.";
pub const MESSAGE_RECEIVED_DEMO: &str =
    "Message received! (Demo mode - email service not configured)";
pub const SEND_FAILED: &str = "Failed to send message. Please try again later.";
pub const INVALID_REQUEST_BODY: &str = "Invalid request body";

#[derive(Debug, Serialize)]
pub struct ApiContactResponse {
    pub success: bool,
    pub message: &'static str,
    /// Cause of the failure, only exposed in development mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ApiContactValidationError {
    pub success: bool,
    pub errors: Vec<ContactViolation>,
}

impl ApiContactResponse {
    pub fn ok(message: &'static str) -> Self {
        Self {
            success: true,
            message,
            error: None,
        }
    }

    pub fn failed(message: &'static str, error: Option<String>) -> Self {
        Self {
            success: false,
            message,
            error,
        }
    }
}

impl From<Vec<ContactViolation>> for ApiContactValidationError {
    fn from(errors: Vec<ContactViolation>) -> Self {
        Self {
            success: false,
            errors,
        }
    }
}
