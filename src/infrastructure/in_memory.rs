use crate::domain::payment::{OrderId, PaymentId, PaymentOrder, PaymentRecord, PaymentStatus};
use crate::domain::ports::PaymentRepository;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for payment orders.
///
/// Uses `Arc<RwLock<HashMap<OrderId, PaymentRecord>>>`; clones share the same map.
/// Ideal for tests and local runs where persistence is not required.
#[derive(Default, Clone)]
pub struct InMemoryPaymentRepository {
    records: Arc<RwLock<HashMap<OrderId, PaymentRecord>>>,
}

impl InMemoryPaymentRepository {
    /// Creates a new, empty in-memory payment repository.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, order_id: OrderId) -> Result<Option<PaymentRecord>> {
        let records = self.records.read().await;
        Ok(records.get(&order_id).cloned())
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn save_payment_order(&self, order: &PaymentOrder, qr_code: &str) -> Result<()> {
        let mut records = self.records.write().await;
        if let Some(existing) = records.get(&order.order_id) {
            existing.status.ensure_transition(PaymentStatus::Pending)?;
        }
        records.insert(
            order.order_id,
            PaymentRecord::pending(order.clone(), qr_code),
        );
        Ok(())
    }

    async fn update_payment_order_status(
        &self,
        order_id: OrderId,
        payment_id: PaymentId,
        status: PaymentStatus,
    ) -> Result<()> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(&order_id)
            .ok_or(PaymentError::NotFound(order_id))?;
        record.mark(payment_id, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::tests::sample_order;

    #[tokio::test]
    async fn test_save_creates_pending_record() {
        let repository = InMemoryPaymentRepository::new();
        let order = sample_order();

        repository.save_payment_order(&order, "mp123456").await.unwrap();

        let record = repository.get(123).await.unwrap().unwrap();
        assert_eq!(record.order, order);
        assert_eq!(record.qr_code, "mp123456");
        assert_eq!(record.status, PaymentStatus::Pending);
        assert_eq!(record.payment_id, None);

        assert!(repository.get(124).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_status_records_payment_id() {
        let repository = InMemoryPaymentRepository::new();
        repository
            .save_payment_order(&sample_order(), "mp123456")
            .await
            .unwrap();

        repository
            .update_payment_order_status(123, 111, PaymentStatus::Paid)
            .await
            .unwrap();

        let record = repository.get(123).await.unwrap().unwrap();
        assert_eq!(record.status, PaymentStatus::Paid);
        assert_eq!(record.payment_id, Some(111));
        assert_eq!(record.qr_code, "mp123456");
    }

    #[tokio::test]
    async fn test_update_unknown_order_is_not_found() {
        let repository = InMemoryPaymentRepository::new();
        let err = repository
            .update_payment_order_status(999, 111, PaymentStatus::Paid)
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::NotFound(999)));
        assert!(repository.is_empty().await);
    }

    #[tokio::test]
    async fn test_paid_never_reverts() {
        let repository = InMemoryPaymentRepository::new();
        repository
            .save_payment_order(&sample_order(), "mp123456")
            .await
            .unwrap();
        repository
            .update_payment_order_status(123, 111, PaymentStatus::Paid)
            .await
            .unwrap();

        let err = repository
            .update_payment_order_status(123, 111, PaymentStatus::Pending)
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::InvalidStatusTransition { .. }));

        let record = repository.get(123).await.unwrap().unwrap();
        assert_eq!(record.status, PaymentStatus::Paid);
    }

    #[tokio::test]
    async fn test_resave_pending_overwrites() {
        let repository = InMemoryPaymentRepository::new();
        let order = sample_order();
        repository.save_payment_order(&order, "mp1").await.unwrap();
        repository.save_payment_order(&order, "mp2").await.unwrap();

        let record = repository.get(123).await.unwrap().unwrap();
        assert_eq!(record.qr_code, "mp2");
        assert_eq!(record.status, PaymentStatus::Pending);
        assert_eq!(repository.len().await, 1);
    }

    #[tokio::test]
    async fn test_resave_after_paid_is_rejected() {
        let repository = InMemoryPaymentRepository::new();
        let order = sample_order();
        repository.save_payment_order(&order, "mp1").await.unwrap();
        repository
            .update_payment_order_status(123, 111, PaymentStatus::Paid)
            .await
            .unwrap();

        let err = repository
            .save_payment_order(&order, "mp2")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PaymentError::InvalidStatusTransition {
                from: PaymentStatus::Paid,
                to: PaymentStatus::Pending
            }
        ));

        let record = repository.get(123).await.unwrap().unwrap();
        assert_eq!(record.status, PaymentStatus::Paid);
        assert_eq!(record.qr_code, "mp1");
        assert_eq!(record.payment_id, Some(111));
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let repository = InMemoryPaymentRepository::new();
        let handle = repository.clone();
        repository
            .save_payment_order(&sample_order(), "mp123456")
            .await
            .unwrap();
        assert_eq!(handle.len().await, 1);
    }
}
