use http::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::api::ApiResponse;

#[derive(Error, Debug)]
pub enum AppError {
    /// Raised while loading configuration at startup, before any request is
    /// served. It reaches `main`, never a response.
    #[error("{0} is not set")]
    MissingEnv(&'static str),

    #[error("Phone number is required.")]
    MissingPhoneNumber,

    #[error("Failed to send OTP")]
    ProviderRejected(Value),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingPhoneNumber => StatusCode::BAD_REQUEST,
            AppError::ProviderRejected(_) | AppError::Transport(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            // startup-only
            AppError::MissingEnv(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Failure body returned to the caller. A provider rejection carries the
    /// provider's reply verbatim under `error`.
    pub fn into_api_response(self) -> ApiResponse {
        let message = self.to_string();
        match self {
            AppError::ProviderRejected(reply) => ApiResponse::failure(message).with_error(reply),
            _ => ApiResponse::failure(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_phone_number_is_bad_request() {
        let err = AppError::MissingPhoneNumber;
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let body = serde_json::to_value(err.into_api_response()).unwrap();
        assert_eq!(
            body,
            json!({"success": false, "message": "Phone number is required."})
        );
    }

    #[test]
    fn provider_rejection_keeps_reply() {
        let reply = json!({"status": "Failed", "message_id": 42});
        let err = AppError::ProviderRejected(reply.clone());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = serde_json::to_value(err.into_api_response()).unwrap();
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["message"], json!("Failed to send OTP"));
        assert_eq!(body["error"], reply);
        assert!(body.get("otp").is_none());
    }

    #[test]
    fn missing_env_names_the_variable() {
        let err = AppError::MissingEnv("SEMAPHORE_API_KEY");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "SEMAPHORE_API_KEY is not set");
    }
}
