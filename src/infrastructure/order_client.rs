use crate::domain::payment::{OrderId, PaymentStatus};
use crate::domain::ports::{OrderNotifier, SharedHttpClient};
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct PaymentOrderStatus {
    status: PaymentStatus,
}

/// Order notifier calling the order service's status endpoint.
pub struct HttpOrderNotifier {
    http_client: SharedHttpClient,
    order_api_url: String,
}

impl HttpOrderNotifier {
    pub fn new(http_client: SharedHttpClient, order_api_url: impl Into<String>) -> Self {
        Self {
            http_client,
            order_api_url: order_api_url.into(),
        }
    }

    fn status_url(&self, order_id: OrderId) -> String {
        format!(
            "{}/{}/status",
            self.order_api_url.trim_end_matches('/'),
            order_id
        )
    }
}

#[async_trait]
impl OrderNotifier for HttpOrderNotifier {
    async fn notify_payment_order(&self, order_id: OrderId, status: PaymentStatus) -> Result<()> {
        let body = serde_json::to_vec(&PaymentOrderStatus { status })?;

        let response = self
            .http_client
            .put(&self.status_url(order_id), body)
            .await
            .map_err(|e| PaymentError::Notification {
                status: None,
                message: format!("error: {e}"),
            })?;

        if !response.is_success() {
            return Err(PaymentError::notification_status(response.status));
        }

        Ok(())
    }
}
