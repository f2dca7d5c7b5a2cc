use super::gateway::PaymentQrCode;
use super::payment::{OrderId, PaymentId, PaymentOrder, PaymentStatus};
use crate::error::{Result, TransportError};
use async_trait::async_trait;
use std::sync::Arc;

/// Issues payable QR codes through the payment gateway.
#[async_trait]
pub trait PaymentBroker: Send + Sync {
    async fn generate_payment_qr_code(&self, order: &PaymentOrder) -> Result<PaymentQrCode>;
}

/// System of record for payment orders.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn save_payment_order(&self, order: &PaymentOrder, qr_code: &str) -> Result<()>;
    async fn update_payment_order_status(
        &self,
        order_id: OrderId,
        payment_id: PaymentId,
        status: PaymentStatus,
    ) -> Result<()>;
}

/// Tells the order service that a payment changed state.
#[async_trait]
pub trait OrderNotifier: Send + Sync {
    async fn notify_payment_order(&self, order_id: OrderId, status: PaymentStatus) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

/// Outbound JSON-over-HTTP transport shared by the gateway and order clients.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn post(
        &self,
        url: &str,
        body: Vec<u8>,
    ) -> std::result::Result<HttpResponse, TransportError>;
    async fn put(
        &self,
        url: &str,
        body: Vec<u8>,
    ) -> std::result::Result<HttpResponse, TransportError>;
}

pub type PaymentBrokerBox = Box<dyn PaymentBroker>;
pub type PaymentRepositoryBox = Box<dyn PaymentRepository>;
pub type OrderNotifierBox = Box<dyn OrderNotifier>;
pub type SharedHttpClient = Arc<dyn HttpClient>;
