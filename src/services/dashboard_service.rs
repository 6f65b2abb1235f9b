// src/services/dashboard_service.rs

use std::{collections::{HashMap, HashSet}, sync::Arc};

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{OrderRepository, ReviewRepository},
    models::{
        auth::User,
        dashboard::{DashboardSummary, TopProductEntry},
        order::{Order, OrderStatusFilter},
        review::Review,
    },
    services::{business_service::BusinessService, review_service::average_rating},
};

pub const TOP_PRODUCTS_LIMIT: usize = 5;

pub fn summarize(orders: &[Order], reviews: &[Review]) -> DashboardSummary {
    let fulfilled: Vec<&Order> = orders.iter().filter(|o| o.fulfilled).collect();
    let customers: HashSet<Uuid> = orders.iter().map(|o| o.customer_id).collect();

    DashboardSummary {
        total_orders: orders.len(),
        pending_orders: orders.len() - fulfilled.len(),
        fulfilled_orders: fulfilled.len(),
        fulfilled_revenue: fulfilled.iter().map(|o| o.product_price).sum(),
        distinct_customers: customers.len(),
        review_count: reviews.len(),
        average_rating: average_rating(reviews),
    }
}

/// Ranking por número de pedidos; empate decidido pela receita e depois pelo nome.
pub fn rank_products(orders: &[Order], limit: usize) -> Vec<TopProductEntry> {
    let mut by_product: HashMap<Uuid, TopProductEntry> = HashMap::new();
    for order in orders {
        let entry = by_product.entry(order.product_id).or_insert_with(|| TopProductEntry {
            product_id: order.product_id,
            product_name: order.product_name.clone(),
            order_count: 0,
            total_revenue: Decimal::ZERO,
        });
        entry.order_count += 1;
        entry.total_revenue += order.product_price;
    }

    let mut ranking: Vec<TopProductEntry> = by_product.into_values().collect();
    ranking.sort_by(|a, b| {
        b.order_count
            .cmp(&a.order_count)
            .then(b.total_revenue.cmp(&a.total_revenue))
            .then(a.product_name.cmp(&b.product_name))
    });
    ranking.truncate(limit);
    ranking
}

#[derive(Clone)]
pub struct DashboardService {
    orders: Arc<dyn OrderRepository>,
    reviews: Arc<dyn ReviewRepository>,
    business_service: BusinessService,
}

impl DashboardService {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        reviews: Arc<dyn ReviewRepository>,
        business_service: BusinessService,
    ) -> Self {
        Self { orders, reviews, business_service }
    }

    pub async fn get_summary(&self, owner: &User) -> Result<DashboardSummary, AppError> {
        let business = self.business_service.business_of(owner).await?;
        let orders = self.orders.list_for_business(business.id, OrderStatusFilter::All).await?;
        let reviews = self.reviews.list_for_business(business.id).await?;
        Ok(summarize(&orders, &reviews))
    }

    pub async fn get_top_products(&self, owner: &User) -> Result<Vec<TopProductEntry>, AppError> {
        let business = self.business_service.business_of(owner).await?;
        let orders = self.orders.list_for_business(business.id, OrderStatusFilter::All).await?;
        Ok(rank_products(&orders, TOP_PRODUCTS_LIMIT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{new_business, World};

    #[tokio::test]
    async fn summary_counts_orders_revenue_and_reviews() {
        let world = World::new();
        let (owner, business) = world.business("loja@x.com", new_business("Loja", "food")).await;
        let biryani = world.product(&owner, business.id, "Biryani", 1250).await;
        let chai = world.product(&owner, business.id, "Chai", 300).await;
        let ana = world.customer("ana@x.com").await;
        let bia = world.customer("bia@x.com").await;

        let first = world.order_service.place_order(&ana, business.id, biryani.id).await.unwrap();
        world.order_service.place_order(&ana, business.id, chai.id).await.unwrap();
        world.order_service.place_order(&bia, business.id, chai.id).await.unwrap();
        world.order_service.fulfill_order(&owner, business.id, first.id).await.unwrap();
        world
            .review_service
            .submit_review(&bia, business.id, 4, "gostei", None)
            .await
            .unwrap();

        let summary = world.dashboard_service.get_summary(&owner).await.unwrap();
        assert_eq!(summary.total_orders, 3);
        assert_eq!(summary.pending_orders, 2);
        assert_eq!(summary.fulfilled_orders, 1);
        assert_eq!(summary.fulfilled_revenue, Decimal::new(1250, 2));
        assert_eq!(summary.distinct_customers, 2);
        assert_eq!(summary.review_count, 1);
        assert_eq!(summary.average_rating, 4.0);

        let top = world.dashboard_service.get_top_products(&owner).await.unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].product_name, "Chai");
        assert_eq!(top[0].order_count, 2);
        assert_eq!(top[0].total_revenue, Decimal::new(600, 2));
    }

    #[tokio::test]
    async fn empty_business_has_a_zeroed_summary() {
        let world = World::new();
        let (owner, _) = world.business("loja@x.com", new_business("Loja", "food")).await;

        let summary = world.dashboard_service.get_summary(&owner).await.unwrap();
        assert_eq!(summary.total_orders, 0);
        assert_eq!(summary.fulfilled_revenue, Decimal::ZERO);
        assert_eq!(summary.average_rating, 0.0);
        assert!(world.dashboard_service.get_top_products(&owner).await.unwrap().is_empty());
    }
}
