// src/services/order_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::OrderRepository,
    models::{
        auth::User,
        order::{FulfillmentOutcome, NewOrder, Order, OrderStatusFilter},
    },
    services::{business_service::BusinessService, messaging_service::MessagingService},
};

/// Pedidos ainda não atendidos, na ordem original.
pub fn pending_orders(orders: &[Order]) -> Vec<Order> {
    orders.iter().filter(|o| o.is_pending()).cloned().collect()
}

/// Mensagem enviada ao cliente quando o pedido fica pronto.
pub fn pickup_message(product_name: &str) -> String {
    format!("Your order for {} is ready for pickup!", product_name)
}

#[derive(Clone)]
pub struct OrderService {
    repo: Arc<dyn OrderRepository>,
    business_service: BusinessService,
    messaging_service: MessagingService,
}

impl OrderService {
    pub fn new(
        repo: Arc<dyn OrderRepository>,
        business_service: BusinessService,
        messaging_service: MessagingService,
    ) -> Self {
        Self { repo, business_service, messaging_service }
    }

    // --- CLIENTE ---

    /// Grava um novo pedido com uma cópia do produto. Não notifica a empresa.
    pub async fn place_order(
        &self,
        customer: &User,
        business_id: Uuid,
        product_id: Uuid,
    ) -> Result<Order, AppError> {
        if customer.is_business() {
            return Err(AppError::CustomerAccountRequired);
        }

        // Empresa e produto precisam existir antes de qualquer escrita
        let business = self.business_service.get_business(business_id).await?;
        let product = self.business_service.find_product(business.id, product_id).await?;

        let order = self
            .repo
            .append_order(NewOrder {
                business_id: business.id,
                customer_id: customer.id,
                customer_email: customer.email.clone(),
                product_id: product.id,
                product_name: product.name,
                product_image: product.image,
                product_price: product.price,
            })
            .await?;

        tracing::info!(
            "🛒 Pedido {} criado: {} -> {} ({})",
            order.id,
            customer.email,
            business.business_name,
            order.product_name
        );
        Ok(order)
    }

    pub async fn list_my_orders(&self, customer: &User) -> Result<Vec<Order>, AppError> {
        self.repo.list_for_customer(customer.id).await
    }

    // --- EMPRESA ---

    pub async fn list_orders(
        &self,
        owner: &User,
        business_id: Uuid,
        filter: OrderStatusFilter,
    ) -> Result<Vec<Order>, AppError> {
        self.business_service.ensure_owner(owner, business_id).await?;
        self.repo.list_for_business(business_id, filter).await
    }

    /// Marca o pedido como atendido e avisa o cliente pelo chat.
    ///
    /// Se a gravação falhar, devolve a lista pendente ORIGINAL (nada muda para
    /// quem chamou). Se só o envio da mensagem falhar, o pedido continua atendido
    /// e `notified` vem `false`. Atender de novo um pedido já atendido não
    /// reenvia a mensagem.
    pub async fn fulfill_order(
        &self,
        owner: &User,
        business_id: Uuid,
        order_id: Uuid,
    ) -> Result<FulfillmentOutcome, AppError> {
        self.business_service.ensure_owner(owner, business_id).await?;

        if self.repo.find_order(business_id, order_id).await?.is_none() {
            return Err(AppError::OrderNotFound);
        }
        let current = self.repo.list_for_business(business_id, OrderStatusFilter::All).await?;
        let pending_before = pending_orders(&current);

        let transitioned = match self.repo.mark_fulfilled(business_id, order_id).await {
            Ok(transitioned) => transitioned,
            Err(e) => {
                tracing::error!("🔥 Falha ao atender o pedido {}: {}", order_id, e);
                return Ok(FulfillmentOutcome { pending: pending_before, notified: false });
            }
        };

        let notified = match transitioned {
            Some(order) => {
                let text = pickup_message(&order.product_name);
                match self
                    .messaging_service
                    .send_message(&owner.email, &order.customer_email, &text)
                    .await
                {
                    Ok(_) => {
                        tracing::info!("✅ Pedido {} atendido, cliente {} avisado", order.id, order.customer_email);
                        true
                    }
                    Err(e) => {
                        // Sem transação entre pedido e conversa: fica registrado no log
                        tracing::error!(
                            "⚠️ Pedido {} atendido, mas a mensagem para {} falhou: {}",
                            order.id,
                            order.customer_email,
                            e
                        );
                        false
                    }
                }
            }
            None => {
                tracing::info!("Pedido {} já estava atendido; nenhuma mensagem enviada", order_id);
                false
            }
        };

        let pending = match self.repo.list_for_business(business_id, OrderStatusFilter::Pending).await {
            Ok(pending) => pending,
            Err(e) => {
                tracing::warn!("Falha ao recarregar pedidos pendentes de {}: {}", business_id, e);
                pending_before.into_iter().filter(|o| o.id != order_id).collect()
            }
        };

        Ok(FulfillmentOutcome { pending, notified })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{new_business, World};
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn order(fulfilled: bool) -> Order {
        Order {
            id: Uuid::new_v4(),
            business_id: Uuid::nil(),
            customer_id: Uuid::nil(),
            customer_email: "c@x.com".into(),
            product_id: Uuid::nil(),
            product_name: "Chai".into(),
            product_image: String::new(),
            product_price: Decimal::new(300, 2),
            fulfilled,
            created_at: Utc::now(),
            fulfilled_at: None,
        }
    }

    #[test]
    fn pending_view_excludes_fulfilled() {
        let orders = vec![order(false), order(true)];
        let pending = pending_orders(&orders);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, orders[0].id);
    }

    #[tokio::test]
    async fn concurrent_orders_are_both_kept() {
        let world = World::new();
        let (owner, business) = world.business("loja@x.com", new_business("Loja", "food")).await;
        let product = world.product(&owner, business.id, "Biryani", 1250).await;
        let ana = world.customer("ana@x.com").await;
        let bia = world.customer("bia@x.com").await;

        let (first, second) = tokio::join!(
            world.order_service.place_order(&ana, business.id, product.id),
            world.order_service.place_order(&bia, business.id, product.id),
        );
        let (first, second) = (first.unwrap(), second.unwrap());

        let orders = world
            .order_service
            .list_orders(&owner, business.id, OrderStatusFilter::All)
            .await
            .unwrap();
        assert_eq!(orders.len(), 2);
        assert!(orders.iter().any(|o| o.id == first.id && o.customer_email == "ana@x.com"));
        assert!(orders.iter().any(|o| o.id == second.id && o.customer_email == "bia@x.com"));
    }

    #[tokio::test]
    async fn ordering_from_a_missing_business_changes_nothing() {
        let world = World::new();
        let (owner, business) = world.business("loja@x.com", new_business("Loja", "food")).await;
        let product = world.product(&owner, business.id, "Biryani", 1250).await;
        let ana = world.customer("ana@x.com").await;

        let err = world
            .order_service
            .place_order(&ana, Uuid::new_v4(), product.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BusinessNotFound));

        let err = world
            .order_service
            .place_order(&ana, business.id, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ProductNotFound));

        assert!(world.order_service.list_my_orders(&ana).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn order_keeps_product_snapshot_after_catalog_changes() {
        let world = World::new();
        let (owner, business) = world.business("loja@x.com", new_business("Loja", "food")).await;
        let product = world.product(&owner, business.id, "Biryani", 1250).await;
        let ana = world.customer("ana@x.com").await;

        world.order_service.place_order(&ana, business.id, product.id).await.unwrap();
        world
            .business_service
            .remove_product(&owner, business.id, product.id)
            .await
            .unwrap();

        let mine = world.order_service.list_my_orders(&ana).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].product_name, "Biryani");
        assert_eq!(mine[0].product_price, Decimal::new(1250, 2));
    }

    #[tokio::test]
    async fn fulfilling_twice_keeps_flag_and_sends_a_single_message() {
        let world = World::new();
        let (owner, business) = world.business("loja@x.com", new_business("Loja", "food")).await;
        let product = world.product(&owner, business.id, "Biryani", 1250).await;
        let ana = world.customer("ana@x.com").await;
        let placed = world.order_service.place_order(&ana, business.id, product.id).await.unwrap();

        let first = world
            .order_service
            .fulfill_order(&owner, business.id, placed.id)
            .await
            .unwrap();
        assert!(first.notified);
        assert!(first.pending.is_empty());

        let second = world
            .order_service
            .fulfill_order(&owner, business.id, placed.id)
            .await
            .unwrap();
        assert!(!second.notified);
        assert!(second.pending.is_empty());

        let all = world
            .order_service
            .list_orders(&owner, business.id, OrderStatusFilter::All)
            .await
            .unwrap();
        assert_eq!(all.len(), 1);
        assert!(all[0].fulfilled);
        assert!(all[0].fulfilled_at.is_some());

        let thread = world
            .messaging_service
            .get_conversation("ana@x.com", "loja@x.com")
            .await
            .unwrap();
        assert_eq!(thread.len(), 1);
        assert_eq!(thread[0].sender, "loja@x.com");
        assert_eq!(thread[0].text, "Your order for Biryani is ready for pickup!");
    }

    #[tokio::test]
    async fn fulfilling_an_unknown_order_is_not_found() {
        let world = World::new();
        let (owner, business) = world.business("loja@x.com", new_business("Loja", "food")).await;

        let err = world
            .order_service
            .fulfill_order(&owner, business.id, Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::OrderNotFound));
    }

    #[tokio::test]
    async fn failed_write_returns_the_original_pending_list() {
        let world = World::with_failing_fulfillment();
        let (owner, business) = world.business("loja@x.com", new_business("Loja", "food")).await;
        let product = world.product(&owner, business.id, "Biryani", 1250).await;
        let ana = world.customer("ana@x.com").await;
        let placed = world.order_service.place_order(&ana, business.id, product.id).await.unwrap();

        let outcome = world
            .order_service
            .fulfill_order(&owner, business.id, placed.id)
            .await
            .unwrap();

        assert!(!outcome.notified);
        assert_eq!(outcome.pending.len(), 1);
        assert_eq!(outcome.pending[0].id, placed.id);
        assert!(!outcome.pending[0].fulfilled);

        let thread = world
            .messaging_service
            .get_conversation("ana@x.com", "loja@x.com")
            .await
            .unwrap();
        assert!(thread.is_empty());
    }

    #[tokio::test]
    async fn failed_pickup_message_keeps_the_order_fulfilled() {
        let world = World::with_failing_messages();
        let (owner, business) = world.business("loja@x.com", new_business("Loja", "food")).await;
        let product = world.product(&owner, business.id, "Biryani", 1250).await;
        let ana = world.customer("ana@x.com").await;
        let placed = world.order_service.place_order(&ana, business.id, product.id).await.unwrap();

        let outcome = world
            .order_service
            .fulfill_order(&owner, business.id, placed.id)
            .await
            .unwrap();
        assert!(!outcome.notified);
        assert!(outcome.pending.is_empty());

        let all = world
            .order_service
            .list_orders(&owner, business.id, OrderStatusFilter::All)
            .await
            .unwrap();
        assert_eq!(all.len(), 1);
        assert!(all[0].fulfilled);

        let thread = world
            .messaging_service
            .get_conversation("ana@x.com", "loja@x.com")
            .await
            .unwrap();
        assert!(thread.is_empty());
    }

    #[tokio::test]
    async fn other_businesses_cannot_fulfill() {
        let world = World::new();
        let (owner, business) = world.business("loja@x.com", new_business("Loja", "food")).await;
        let (other, _) = world.business("outra@x.com", new_business("Outra", "food")).await;
        let product = world.product(&owner, business.id, "Biryani", 1250).await;
        let ana = world.customer("ana@x.com").await;
        let placed = world.order_service.place_order(&ana, business.id, product.id).await.unwrap();

        let err = world
            .order_service
            .fulfill_order(&other, business.id, placed.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotBusinessOwner));
    }
}
