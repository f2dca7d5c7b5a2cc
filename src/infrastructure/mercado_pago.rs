use crate::config::PaymentBrokerConfig;
use crate::domain::gateway::{PaymentQrCode, PaymentRequest};
use crate::domain::payment::PaymentOrder;
use crate::domain::ports::{PaymentBroker, SharedHttpClient};
use crate::error::{PaymentError, Result};
use async_trait::async_trait;

/// Payment broker talking to the Mercado Pago in-store QR API.
pub struct MercadoPagoBroker {
    http_client: SharedHttpClient,
    config: PaymentBrokerConfig,
}

impl MercadoPagoBroker {
    pub fn new(http_client: SharedHttpClient, config: PaymentBrokerConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    fn create_payment_request(&self, order: &PaymentOrder) -> Result<PaymentRequest> {
        PaymentRequest::from_order(order, &self.config.notification_url, &self.config.sponsor_id)
    }
}

#[async_trait]
impl PaymentBroker for MercadoPagoBroker {
    async fn generate_payment_qr_code(&self, order: &PaymentOrder) -> Result<PaymentQrCode> {
        let request = self.create_payment_request(order)?;
        let body = serde_json::to_vec(&request)?;

        let response = self
            .http_client
            .post(&self.config.url, body)
            .await
            .map_err(|e| PaymentError::GatewayUnavailable(e.to_string()))?;
        tracing::debug!(
            order_id = order.order_id,
            status = response.status,
            "payment broker responded"
        );

        let qr_code: PaymentQrCode = serde_json::from_slice(&response.body)
            .map_err(|e| PaymentError::GatewayResponseInvalid(e.to_string()))?;
        if qr_code.qr_data.is_empty() {
            return Err(PaymentError::GatewayResponseInvalid(format!(
                "empty qr_data (status {})",
                response.status
            )));
        }

        Ok(qr_code)
    }
}
