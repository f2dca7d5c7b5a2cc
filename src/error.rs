use crate::domain::payment::{OrderId, PaymentStatus};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("invalid payment order: {0}")]
    Validation(String),
    #[error("failed to marshal payment request, error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("failed to call payment broker, error: {0}")]
    GatewayUnavailable(String),
    #[error("failed to decode payment broker response, error: {0}")]
    GatewayResponseInvalid(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("payment order [{0}] not found")]
    NotFound(OrderId),
    #[error("payment status cannot move from {from} to {to}")]
    InvalidStatusTransition {
        from: PaymentStatus,
        to: PaymentStatus,
    },
    #[error("failed to call order api, {message}")]
    Notification {
        status: Option<u16>,
        message: String,
    },
    #[error("configuration error: {0}")]
    Config(String),
}

impl PaymentError {
    pub fn notification_status(status: u16) -> Self {
        Self::Notification {
            status: Some(status),
            message: format!("status [{status}] non-2xx"),
        }
    }
}

/// Failure of an outbound HTTP call before any response was received.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct TransportError(pub String);

pub type Result<T> = std::result::Result<T, PaymentError>;
