use super::dto::{PaymentNotification, PaymentOrderRequest, PaymentQrCodeResponse};
use crate::application::orchestrator::PaymentOrchestrator;
use crate::domain::payment::{OrderId, PaymentOrder};
use crate::error::PaymentError;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use std::sync::Arc;

/// `POST /v1/payment`: issue a QR code for an order.
pub async fn create_payment_order(
    State(orchestrator): State<Arc<PaymentOrchestrator>>,
    payload: Result<Json<PaymentOrderRequest>, JsonRejection>,
) -> Result<Json<PaymentQrCodeResponse>, PaymentError> {
    let Json(request) = payload.map_err(|e| {
        PaymentError::Validation(format!("failed to bind payment order payload: {e}"))
    })?;

    let qrcode = orchestrator
        .create_payment_order(PaymentOrder::from(request))
        .await?;

    Ok(Json(PaymentQrCodeResponse { qrcode }))
}

/// `POST /v1/payment/{id}/notify`: gateway callback confirming a payment.
pub async fn notify_payment(
    State(orchestrator): State<Arc<PaymentOrchestrator>>,
    Path(id): Path<String>,
    payload: Result<Json<PaymentNotification>, JsonRejection>,
) -> Result<StatusCode, PaymentError> {
    let order_id: OrderId = id
        .parse()
        .map_err(|_| PaymentError::Validation(format!("[id] path parameter [{id}] is invalid")))?;

    let Json(notification) = payload.map_err(|e| {
        PaymentError::Validation(format!("failed to bind payment notification payload: {e}"))
    })?;
    let payment_id = notification.payment_id()?;

    orchestrator.confirm_payment(order_id, payment_id).await?;

    Ok(StatusCode::OK)
}
