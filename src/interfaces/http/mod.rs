//! HTTP API for the payment workflow. Uses axum for routing.
//!
//! ## Routes
//!
//! - `POST /v1/payment`: create a payment order, returns `{ "qrcode": ... }`.
//! - `POST /v1/payment/{id}/notify`: gateway notification for order `id`.
//! - `GET /health`: liveness probe.

pub mod dto;
pub mod error;
pub mod payment_controller;

use crate::application::orchestrator::PaymentOrchestrator;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Build the axum `Router` serving the payment API.
pub fn router(orchestrator: Arc<PaymentOrchestrator>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/v1/payment", post(payment_controller::create_payment_order))
        .route(
            "/v1/payment/{id}/notify",
            post(payment_controller::notify_payment),
        )
        .with_state(orchestrator)
}

/// Serve the API on `listener` until `shutdown` resolves.
pub async fn serve<F>(
    listener: TcpListener,
    orchestrator: Arc<PaymentOrchestrator>,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "payment api listening");
    }
    axum::serve(listener, router(orchestrator))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
