#![allow(dead_code)]

use async_trait::async_trait;
use payment_orchestrator::application::orchestrator::PaymentOrchestrator;
use payment_orchestrator::domain::gateway::PaymentQrCode;
use payment_orchestrator::domain::payment::{
    ItemType, LineItem, OrderId, PaymentId, PaymentOrder, PaymentStatus,
};
use payment_orchestrator::domain::ports::{OrderNotifier, PaymentBroker, PaymentRepository};
use payment_orchestrator::error::{PaymentError, Result};
use payment_orchestrator::infrastructure::in_memory::InMemoryPaymentRepository;
use rust_decimal_macros::dec;
use std::sync::{Arc, Mutex};

pub fn sample_order() -> PaymentOrder {
    PaymentOrder {
        order_id: 123,
        customer_id: "111222333444".to_string(),
        items: vec![LineItem {
            quantity: 1,
            unit_price: dec!(9.99),
            category: "Acompanhamento".to_string(),
            sku_id: "333".to_string(),
            name: "Batata frita".to_string(),
            description: "Batata canoa".to_string(),
            item_type: ItemType::Unit,
        }],
        total_amount: dec!(9.99),
    }
}

/// Broker returning a fixed QR code, or failing as unavailable with a message.
#[derive(Clone)]
pub struct FakeBroker {
    outcome: std::result::Result<String, String>,
    pub calls: Arc<Mutex<Vec<OrderId>>>,
}

impl FakeBroker {
    pub fn issuing(qr_code: &str) -> Self {
        Self {
            outcome: Ok(qr_code.to_string()),
            calls: Arc::default(),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            calls: Arc::default(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl PaymentBroker for FakeBroker {
    async fn generate_payment_qr_code(&self, order: &PaymentOrder) -> Result<PaymentQrCode> {
        self.calls.lock().unwrap().push(order.order_id);
        match &self.outcome {
            Ok(qr_code) => Ok(PaymentQrCode {
                qr_data: qr_code.clone(),
                store_order_id: "9876".to_string(),
            }),
            Err(message) => Err(PaymentError::GatewayUnavailable(message.clone())),
        }
    }
}

/// In-memory repository that records calls and can be told to fail.
#[derive(Clone, Default)]
pub struct RecordingRepository {
    pub inner: InMemoryPaymentRepository,
    fail_save: Option<String>,
    fail_update: Option<String>,
    pub saves: Arc<Mutex<Vec<(OrderId, String)>>>,
    pub updates: Arc<Mutex<Vec<(OrderId, PaymentId, PaymentStatus)>>>,
}

impl RecordingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_save(message: &str) -> Self {
        Self {
            fail_save: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn failing_update(message: &str) -> Self {
        Self {
            fail_update: Some(message.to_string()),
            ..Self::default()
        }
    }
}

#[async_trait]
impl PaymentRepository for RecordingRepository {
    async fn save_payment_order(&self, order: &PaymentOrder, qr_code: &str) -> Result<()> {
        self.saves
            .lock()
            .unwrap()
            .push((order.order_id, qr_code.to_string()));
        if let Some(message) = &self.fail_save {
            return Err(PaymentError::Storage(message.clone()));
        }
        self.inner.save_payment_order(order, qr_code).await
    }

    async fn update_payment_order_status(
        &self,
        order_id: OrderId,
        payment_id: PaymentId,
        status: PaymentStatus,
    ) -> Result<()> {
        self.updates
            .lock()
            .unwrap()
            .push((order_id, payment_id, status));
        if let Some(message) = &self.fail_update {
            return Err(PaymentError::Storage(message.clone()));
        }
        self.inner
            .update_payment_order_status(order_id, payment_id, status)
            .await
    }
}

/// Notifier that records calls; fails while `fail_with` is set.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    pub fail_with: Arc<Mutex<Option<String>>>,
    pub calls: Arc<Mutex<Vec<(OrderId, PaymentStatus)>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        let notifier = Self::default();
        notifier.set_failure(Some(message));
        notifier
    }

    pub fn set_failure(&self, message: Option<&str>) {
        *self.fail_with.lock().unwrap() = message.map(str::to_string);
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl OrderNotifier for RecordingNotifier {
    async fn notify_payment_order(&self, order_id: OrderId, status: PaymentStatus) -> Result<()> {
        self.calls.lock().unwrap().push((order_id, status));
        match self.fail_with.lock().unwrap().clone() {
            Some(message) => Err(PaymentError::Notification {
                status: None,
                message,
            }),
            None => Ok(()),
        }
    }
}

pub fn orchestrator(
    broker: &FakeBroker,
    repository: &RecordingRepository,
    notifier: &RecordingNotifier,
) -> PaymentOrchestrator {
    PaymentOrchestrator::new(
        Box::new(broker.clone()),
        Box::new(repository.clone()),
        Box::new(notifier.clone()),
    )
}
