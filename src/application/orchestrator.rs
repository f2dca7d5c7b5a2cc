use crate::domain::payment::{OrderId, PaymentId, PaymentOrder, PaymentStatus};
use crate::domain::ports::{OrderNotifierBox, PaymentBrokerBox, PaymentRepositoryBox};
use crate::error::{PaymentError, Result};
use tracing::instrument;

/// Drives a payment order through UNCREATED → PENDING → PAID.
///
/// `PaymentOrchestrator` sequences the gateway, the repository and the order
/// service. None of them share a transaction, so each operation stops at the
/// first failing step and returns that step's error unchanged.
pub struct PaymentOrchestrator {
    broker: PaymentBrokerBox,
    repository: PaymentRepositoryBox,
    notifier: OrderNotifierBox,
}

impl PaymentOrchestrator {
    /// Creates a new `PaymentOrchestrator` instance.
    ///
    /// # Arguments
    ///
    /// * `broker` - Issues QR codes through the payment gateway.
    /// * `repository` - System of record for payment orders.
    /// * `notifier` - Informs the order service of completed payments.
    pub fn new(
        broker: PaymentBrokerBox,
        repository: PaymentRepositoryBox,
        notifier: OrderNotifierBox,
    ) -> Self {
        Self {
            broker,
            repository,
            notifier,
        }
    }

    /// Requests a QR code for `order` and records the order as PENDING.
    ///
    /// Nothing is persisted when the gateway call fails. When the gateway
    /// succeeds but the save fails, the issued QR code is orphaned and the
    /// repository error is returned.
    #[instrument(skip(self, order), fields(order_id = order.order_id))]
    pub async fn create_payment_order(&self, order: PaymentOrder) -> Result<String> {
        order.validate()?;

        let qr_code = self
            .broker
            .generate_payment_qr_code(&order)
            .await
            .inspect_err(|e| {
                tracing::error!(error = %e, "failed to generate payment qrcode");
            })?;

        self.repository
            .save_payment_order(&order, &qr_code.qr_data)
            .await
            .inspect_err(|e| {
                tracing::error!(error = %e, "failed to save payment order");
            })?;

        tracing::info!(store_order_id = %qr_code.store_order_id, "payment order created");
        Ok(qr_code.qr_data)
    }

    /// Marks the order PAID, then tells the order service.
    ///
    /// Safe to re-invoke: the status write converges on PAID and the
    /// notification is attempted again.
    #[instrument(skip(self))]
    pub async fn confirm_payment(&self, order_id: OrderId, payment_id: PaymentId) -> Result<()> {
        if order_id == 0 {
            return Err(PaymentError::Validation("order id is required".to_string()));
        }

        self.repository
            .update_payment_order_status(order_id, payment_id, PaymentStatus::Paid)
            .await
            .inspect_err(|e| {
                tracing::error!(error = %e, "failed to update payment status");
            })?;

        self.notifier
            .notify_payment_order(order_id, PaymentStatus::Paid)
            .await
            .inspect_err(|e| {
                tracing::error!(error = %e, "failed to notify payment order");
            })?;

        tracing::info!("payment confirmed");
        Ok(())
    }
}
