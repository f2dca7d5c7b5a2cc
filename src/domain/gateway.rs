//! Wire shapes of the payment gateway (Mercado Pago in-store QR orders).
//!
//! These are transient projections of a [`PaymentOrder`]: built fresh for
//! every call and never persisted.

use super::payment::{ItemType, LineItem, PaymentOrder};
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct PaymentRequest {
    pub external_reference: String,
    pub title: String,
    pub notification_url: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_amount: Decimal,
    pub items: Vec<PaymentItemRequest>,
    pub sponsor: String,
}

#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct PaymentItemRequest {
    pub sku_number: String,
    pub category: String,
    pub title: String,
    pub description: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub unit_price: Decimal,
    pub quantity: u32,
    pub unit_measure: &'static str,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_amount: Decimal,
}

/// The gateway's answer to a QR order request.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct PaymentQrCode {
    pub qr_data: String,
    #[serde(rename = "in_store_order_id", default)]
    pub store_order_id: String,
}

impl PaymentRequest {
    pub fn from_order(
        order: &PaymentOrder,
        notification_base: &str,
        sponsor_id: &str,
    ) -> Result<Self> {
        let items = order
            .items
            .iter()
            .map(PaymentItemRequest::try_from)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            external_reference: order.order_id.to_string(),
            title: format!(
                "Order {} for the Customer[{}]",
                order.order_id, order.customer_id
            ),
            notification_url: notification_url(notification_base, order.order_id),
            total_amount: order.total_amount,
            items,
            sponsor: sponsor_id.to_string(),
        })
    }
}

impl TryFrom<&LineItem> for PaymentItemRequest {
    type Error = PaymentError;

    fn try_from(item: &LineItem) -> Result<Self> {
        let total_amount = item_total(item.unit_price, item.quantity).ok_or_else(|| {
            PaymentError::Validation(format!("line total of sku {} overflows", item.sku_id))
        })?;

        Ok(Self {
            sku_number: item.sku_id.clone(),
            category: item.category.clone(),
            title: item.name.clone(),
            description: item.description.clone(),
            unit_price: item.unit_price,
            quantity: item.quantity,
            unit_measure: unit_measure(item.item_type),
            total_amount,
        })
    }
}

pub fn notification_url(base: &str, order_id: u64) -> String {
    format!("{}/payment/{}/notify", base.trim_end_matches('/'), order_id)
}

pub fn unit_measure(item_type: ItemType) -> &'static str {
    match item_type {
        ItemType::CustomCombo => "pack",
        ItemType::Unit | ItemType::Combo => "unit",
    }
}

/// Exact line total; a zero quantity yields zero. `None` when the product
/// does not fit in a `Decimal`.
pub fn item_total(unit_price: Decimal, quantity: u32) -> Option<Decimal> {
    unit_price.checked_mul(Decimal::from(quantity))
}
