// src/models/order.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Os campos product_* são uma cópia do produto no momento do pedido.
// Alterar ou remover o produto depois não muda pedidos antigos.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub business_id: Uuid,
    pub customer_id: Uuid,
    #[schema(example = "cliente@thrive.app")]
    pub customer_email: String,
    pub product_id: Uuid,
    #[schema(example = "Chicken Biryani")]
    pub product_name: String,
    pub product_image: String,
    #[schema(example = "12.50")]
    pub product_price: Decimal,
    pub fulfilled: bool,
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
    pub fulfilled_at: Option<DateTime<Utc>>,
}

impl Order {
    pub fn is_pending(&self) -> bool {
        !self.fulfilled
    }
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub business_id: Uuid,
    pub customer_id: Uuid,
    pub customer_email: String,
    pub product_id: Uuid,
    pub product_name: String,
    pub product_image: String,
    pub product_price: Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatusFilter {
    #[default]
    Pending,
    Fulfilled,
    All,
}

impl OrderStatusFilter {
    pub fn matches(&self, order: &Order) -> bool {
        match self {
            OrderStatusFilter::Pending => !order.fulfilled,
            OrderStatusFilter::Fulfilled => order.fulfilled,
            OrderStatusFilter::All => true,
        }
    }
}

/// Resultado de um atendimento de pedido.
/// `notified = false` indica que o cliente NÃO recebeu a mensagem de retirada
/// (pedido já atendido antes, ou falha no envio / na gravação).
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentOutcome {
    pub pending: Vec<Order>,
    pub notified: bool,
}
