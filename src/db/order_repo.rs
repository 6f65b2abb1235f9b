// src/db/order_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::order::{NewOrder, Order, OrderStatusFilter},
};

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Inserção aditiva: pedidos concorrentes nunca se sobrescrevem.
    async fn append_order(&self, order: NewOrder) -> Result<Order, AppError>;

    async fn list_for_business(
        &self,
        business_id: Uuid,
        filter: OrderStatusFilter,
    ) -> Result<Vec<Order>, AppError>;

    async fn list_for_customer(&self, customer_id: Uuid) -> Result<Vec<Order>, AppError>;

    async fn find_order(&self, business_id: Uuid, order_id: Uuid) -> Result<Option<Order>, AppError>;

    /// Marca o pedido como atendido. Retorna `Some` apenas se ESTA chamada
    /// fez a transição (pedido pendente -> atendido).
    async fn mark_fulfilled(&self, business_id: Uuid, order_id: Uuid) -> Result<Option<Order>, AppError>;
}

#[derive(Clone)]
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn append_order(&self, order: NewOrder) -> Result<Order, AppError> {
        let created = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (
                id, business_id, customer_id, customer_email,
                product_id, product_name, product_image, product_price
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(order.business_id)
        .bind(order.customer_id)
        .bind(&order.customer_email)
        .bind(order.product_id)
        .bind(&order.product_name)
        .bind(&order.product_image)
        .bind(order.product_price)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn list_for_business(
        &self,
        business_id: Uuid,
        filter: OrderStatusFilter,
    ) -> Result<Vec<Order>, AppError> {
        // NULL = sem filtro de status
        let fulfilled = match filter {
            OrderStatusFilter::Pending => Some(false),
            OrderStatusFilter::Fulfilled => Some(true),
            OrderStatusFilter::All => None,
        };

        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT * FROM orders
            WHERE business_id = $1
              AND ($2::boolean IS NULL OR fulfilled = $2)
            ORDER BY created_at ASC
            "#,
        )
        .bind(business_id)
        .bind(fulfilled)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    async fn list_for_customer(&self, customer_id: Uuid) -> Result<Vec<Order>, AppError> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders WHERE customer_id = $1 ORDER BY created_at DESC",
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    async fn find_order(&self, business_id: Uuid, order_id: Uuid) -> Result<Option<Order>, AppError> {
        let order = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders WHERE business_id = $1 AND id = $2",
        )
        .bind(business_id)
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    async fn mark_fulfilled(&self, business_id: Uuid, order_id: Uuid) -> Result<Option<Order>, AppError> {
        // Atualização por elemento: só a linha do pedido, e só se ainda pendente
        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET fulfilled = TRUE, fulfilled_at = NOW()
            WHERE business_id = $1 AND id = $2 AND fulfilled = FALSE
            RETURNING *
            "#,
        )
        .bind(business_id)
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }
}
