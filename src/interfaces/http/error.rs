use super::dto::ErrorResponse;
use crate::error::PaymentError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

impl PaymentError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PaymentError::Validation(_) => StatusCode::BAD_REQUEST,
            PaymentError::NotFound(_) => StatusCode::NOT_FOUND,
            PaymentError::InvalidStatusTransition { .. } => StatusCode::CONFLICT,
            PaymentError::Serialization(_)
            | PaymentError::GatewayUnavailable(_)
            | PaymentError::GatewayResponseInvalid(_)
            | PaymentError::Storage(_)
            | PaymentError::Notification { .. }
            | PaymentError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            PaymentError::Validation(_) => "VALIDATION_ERROR",
            PaymentError::Serialization(_) => "SERIALIZATION_ERROR",
            PaymentError::GatewayUnavailable(_) => "GATEWAY_UNAVAILABLE",
            PaymentError::GatewayResponseInvalid(_) => "GATEWAY_RESPONSE_INVALID",
            PaymentError::Storage(_) => "STORAGE_ERROR",
            PaymentError::NotFound(_) => "NOT_FOUND",
            PaymentError::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",
            PaymentError::Notification { .. } => "NOTIFICATION_ERROR",
            PaymentError::Config(_) => "CONFIG_ERROR",
        }
    }
}

impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
