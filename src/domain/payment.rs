use super::gateway::item_total;
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the commercial order, assigned by the order service.
pub type OrderId = u64;
/// Identifier of a completed payment, assigned by the gateway.
pub type PaymentId = u64;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemType {
    Unit,
    Combo,
    CustomCombo,
}

/// Lifecycle of a stored payment order. Moves forward only.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
}

impl PaymentStatus {
    pub fn can_transition_to(self, next: PaymentStatus) -> bool {
        !matches!((self, next), (PaymentStatus::Paid, PaymentStatus::Pending))
    }

    pub fn ensure_transition(self, next: PaymentStatus) -> Result<()> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(PaymentError::InvalidStatusTransition {
                from: self,
                to: next,
            })
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Paid => "PAID",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct LineItem {
    pub quantity: u32,
    pub unit_price: Decimal,
    pub category: String,
    pub sku_id: String,
    pub name: String,
    pub description: String,
    pub item_type: ItemType,
}

/// An order awaiting payment, as handed over by the order service.
///
/// `total_amount` is trusted input: it is not recomputed from the items.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PaymentOrder {
    pub order_id: OrderId,
    pub customer_id: String,
    pub items: Vec<LineItem>,
    pub total_amount: Decimal,
}

impl PaymentOrder {
    /// Checks the order is well formed before anything leaves the process.
    pub fn validate(&self) -> Result<()> {
        if self.order_id == 0 {
            return Err(invalid("order id is required"));
        }
        if self.customer_id.trim().is_empty() {
            return Err(invalid("customer CPF is required"));
        }
        if self.items.is_empty() {
            return Err(invalid("items list is required"));
        }
        if self.total_amount < Decimal::ZERO {
            return Err(invalid("total amount must not be negative"));
        }
        for (index, item) in self.items.iter().enumerate() {
            item.validate()
                .map_err(|reason| invalid(&format!("item {index}: {reason}")))?;
        }
        Ok(())
    }
}

impl LineItem {
    fn validate(&self) -> std::result::Result<(), &'static str> {
        if self.quantity == 0 {
            return Err("quantity must be at least 1");
        }
        if self.unit_price < Decimal::ZERO {
            return Err("product price must not be negative");
        }
        if item_total(self.unit_price, self.quantity).is_none() {
            return Err("line total is out of range");
        }
        if self.name.trim().is_empty() {
            return Err("product name is required");
        }
        if self.sku_id.trim().is_empty() {
            return Err("product skuId is required");
        }
        if self.category.trim().is_empty() {
            return Err("product category is required");
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> PaymentError {
    PaymentError::Validation(reason.to_string())
}

/// The persisted view of a payment order.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PaymentRecord {
    pub order: PaymentOrder,
    pub qr_code: String,
    pub status: PaymentStatus,
    pub payment_id: Option<PaymentId>,
}

impl PaymentRecord {
    pub fn pending(order: PaymentOrder, qr_code: impl Into<String>) -> Self {
        Self {
            order,
            qr_code: qr_code.into(),
            status: PaymentStatus::Pending,
            payment_id: None,
        }
    }

    /// Applies a confirmation to the mutable part of the record.
    pub fn mark(&mut self, payment_id: PaymentId, status: PaymentStatus) -> Result<()> {
        self.status.ensure_transition(status)?;
        self.status = status;
        self.payment_id = Some(payment_id);
        Ok(())
    }
}
