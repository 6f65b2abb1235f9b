// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

// Cards do topo do painel da empresa
#[derive(Debug, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_orders: usize,
    pub pending_orders: usize,
    pub fulfilled_orders: usize,
    pub fulfilled_revenue: Decimal, // Soma dos pedidos já atendidos
    pub distinct_customers: usize,
    pub review_count: usize,
    pub average_rating: f64,
}

// Produtos mais pedidos (a partir das cópias gravadas nos pedidos)
#[derive(Debug, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TopProductEntry {
    pub product_id: Uuid,
    pub product_name: String,
    pub order_count: usize,
    pub total_revenue: Decimal,
}
