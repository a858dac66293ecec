use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::mail::MailError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Server configuration error: Missing email credentials")]
    MissingMailConfig,

    #[error("Too many requests. Please try again later.")]
    RateLimited,

    #[error("Missing required fields")]
    MissingFields,

    #[error("Failed to send email: {0}")]
    Mail(#[from] MailError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::MissingMailConfig | AppError::Mail { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AppError::MissingFields => StatusCode::BAD_REQUEST,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("{self}");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_each_kind_to_its_status() {
        assert_eq!(
            AppError::MissingFields.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::RateLimited.into_response().status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            AppError::MissingMailConfig.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Mail(MailError::Smtp("connection refused".to_string()))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn user_facing_messages_are_stable() {
        assert_eq!(
            AppError::RateLimited.to_string(),
            "Too many requests. Please try again later."
        );
        assert_eq!(AppError::MissingFields.to_string(), "Missing required fields");
    }

    #[test]
    fn provider_detail_is_attached() {
        let err = AppError::Mail(MailError::Smtp("connection refused".to_string()));

        assert_eq!(
            err.to_string(),
            "Failed to send email: SMTP error: connection refused"
        );
    }
}
