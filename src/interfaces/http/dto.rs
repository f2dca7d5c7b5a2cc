//! JSON bodies of the payment API.

use crate::domain::payment::{ItemType, LineItem, OrderId, PaymentId, PaymentOrder};
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOrderRequest {
    pub order_id: OrderId,
    #[serde(rename = "customerCPF")]
    pub customer_cpf: String,
    pub items: Vec<PaymentOrderItem>,
    pub total_amount: Decimal,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PaymentOrderItem {
    pub quantity: u32,
    pub product: OrderItemProduct,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemProduct {
    pub name: String,
    pub sku_id: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub price: Decimal,
}

impl From<PaymentOrderRequest> for PaymentOrder {
    fn from(request: PaymentOrderRequest) -> Self {
        Self {
            order_id: request.order_id,
            customer_id: request.customer_cpf,
            items: request
                .items
                .into_iter()
                .map(|item| LineItem {
                    quantity: item.quantity,
                    unit_price: item.product.price,
                    category: item.product.category,
                    sku_id: item.product.sku_id,
                    name: item.product.name,
                    description: item.product.description,
                    item_type: item.product.item_type,
                })
                .collect(),
            total_amount: request.total_amount,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PaymentQrCodeResponse {
    pub qrcode: String,
}

/// Webhook body the gateway posts once a payment settles.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaymentNotification {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub live_mode: bool,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub date_created: Option<String>,
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub api_version: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    pub data: PaymentData,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PaymentData {
    pub id: String,
}

impl PaymentNotification {
    /// The gateway payment id, once the notification is known to be a payment.
    pub fn payment_id(&self) -> Result<PaymentId> {
        if self.kind != "payment" {
            return Err(PaymentError::Validation(format!(
                "notification type [{}] is invalid",
                self.kind
            )));
        }
        self.data.id.parse().map_err(|_| {
            PaymentError::Validation(format!("payment id [{}] is not numeric", self.data.id))
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_order_request_maps_to_domain() {
        let body = r#"{
            "orderId": 123,
            "customerCPF": "111222333444",
            "items": [{
                "quantity": 2,
                "product": {
                    "name": "Combo da casa",
                    "skuId": "777",
                    "category": "Lanche",
                    "type": "CUSTOM_COMBO",
                    "price": 25.5
                }
            }],
            "totalAmount": 51.0
        }"#;
        let request: PaymentOrderRequest = serde_json::from_str(body).unwrap();
        let order = PaymentOrder::from(request);

        assert_eq!(order.order_id, 123);
        assert_eq!(order.customer_id, "111222333444");
        assert_eq!(order.total_amount, dec!(51));
        assert_eq!(order.items[0].unit_price, dec!(25.5));
        assert_eq!(order.items[0].item_type, ItemType::CustomCombo);
        assert_eq!(order.items[0].description, "");
    }

    #[test]
    fn test_notification_payment_id() {
        let body = r#"{
            "id": "12345",
            "liveMode": true,
            "type": "payment",
            "dateCreated": "2024-01-10T10:00:00Z",
            "userId": 44444,
            "apiVersion": "v1",
            "action": "payment.created",
            "data": {"id": "111"}
        }"#;
        let notification: PaymentNotification = serde_json::from_str(body).unwrap();
        assert_eq!(notification.payment_id().unwrap(), 111);
    }

    #[test]
    fn test_notification_rejects_other_types_and_ids() {
        let mut notification: PaymentNotification =
            serde_json::from_str(r#"{"type": "plan", "data": {"id": "111"}}"#).unwrap();
        assert!(matches!(
            notification.payment_id(),
            Err(PaymentError::Validation(_))
        ));

        notification.kind = "payment".to_string();
        notification.data.id = "abc".to_string();
        assert!(matches!(
            notification.payment_id(),
            Err(PaymentError::Validation(_))
        ));
    }
}
