// src/services/test_support.rs

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::{AppState, Config},
    db::{MemoryStore, MessageRepository, OrderRepository, Repositories},
    models::{
        auth::{NewUser, User, UserType},
        business::{Business, NewBusiness, NewProduct, Product},
        message::{ConversationSummary, Message},
        order::{NewOrder, Order, OrderStatusFilter},
    },
    services::{
        business_service::BusinessService, dashboard_service::DashboardService,
        messaging_service::MessagingService, order_service::OrderService,
        post_service::PostService, review_service::ReviewService,
    },
};

pub fn new_business(name: &str, category: &str) -> NewBusiness {
    NewBusiness {
        business_name: name.into(),
        description: String::new(),
        long_description: String::new(),
        location: String::new(),
        phone_number: String::new(),
        establishment_date: None,
        category: category.into(),
        images: vec![],
    }
}

/// Grafo de serviços completo sobre o store em memória.
pub struct World {
    pub repos: Repositories,
    pub business_service: BusinessService,
    pub order_service: OrderService,
    pub messaging_service: MessagingService,
    pub review_service: ReviewService,
    pub post_service: PostService,
    pub dashboard_service: DashboardService,
}

impl World {
    pub fn new() -> Self {
        Self::from_repositories(Repositories::in_memory())
    }

    /// Igual a `new`, mas toda tentativa de marcar pedido como atendido falha.
    pub fn with_failing_fulfillment() -> Self {
        let store = Arc::new(MemoryStore::default());
        let mut repos = Repositories::from_store(store.clone());
        repos.orders = Arc::new(FailingFulfillment { inner: store });
        Self::from_repositories(repos)
    }

    /// Igual a `new`, mas o envio de mensagens falha (o resto do chat funciona).
    pub fn with_failing_messages() -> Self {
        let store = Arc::new(MemoryStore::default());
        let mut repos = Repositories::from_store(store.clone());
        repos.messages = Arc::new(FailingMessages { inner: store });
        Self::from_repositories(repos)
    }

    // Mesmo grafo de serviços que a aplicação monta
    fn from_repositories(repos: Repositories) -> Self {
        let state = AppState::from_repositories(repos.clone(), &Config::for_tests());

        Self {
            repos,
            business_service: state.business_service,
            order_service: state.order_service,
            messaging_service: state.messaging_service,
            review_service: state.review_service,
            post_service: state.post_service,
            dashboard_service: state.dashboard_service,
        }
    }

    pub async fn customer(&self, email: &str) -> User {
        self.repos
            .users
            .create_user(NewUser {
                email: email.into(),
                password_hash: "x".into(),
                user_type: UserType::Customer,
                display_name: None,
            })
            .await
            .unwrap()
    }

    pub async fn business(&self, email: &str, profile: NewBusiness) -> (User, Business) {
        self.repos
            .users
            .create_business_account(
                NewUser {
                    email: email.into(),
                    password_hash: "x".into(),
                    user_type: UserType::Business,
                    display_name: Some(profile.business_name.clone()),
                },
                profile,
            )
            .await
            .unwrap()
    }

    pub async fn product(&self, owner: &User, business_id: Uuid, name: &str, cents: i64) -> Product {
        self.business_service
            .add_product(
                owner,
                business_id,
                NewProduct {
                    name: name.into(),
                    description: String::new(),
                    price: Decimal::new(cents, 2),
                    image: format!("https://img.thrive.app/{}.png", name.to_lowercase()),
                },
            )
            .await
            .unwrap()
    }
}

struct FailingFulfillment {
    inner: Arc<MemoryStore>,
}

#[async_trait]
impl OrderRepository for FailingFulfillment {
    async fn append_order(&self, order: NewOrder) -> Result<Order, AppError> {
        OrderRepository::append_order(&*self.inner, order).await
    }

    async fn list_for_business(
        &self,
        business_id: Uuid,
        filter: OrderStatusFilter,
    ) -> Result<Vec<Order>, AppError> {
        OrderRepository::list_for_business(&*self.inner, business_id, filter).await
    }

    async fn list_for_customer(&self, customer_id: Uuid) -> Result<Vec<Order>, AppError> {
        OrderRepository::list_for_customer(&*self.inner, customer_id).await
    }

    async fn find_order(&self, business_id: Uuid, order_id: Uuid) -> Result<Option<Order>, AppError> {
        OrderRepository::find_order(&*self.inner, business_id, order_id).await
    }

    async fn mark_fulfilled(&self, _business_id: Uuid, order_id: Uuid) -> Result<Option<Order>, AppError> {
        Err(AppError::InternalServerError(anyhow::anyhow!(
            "conexão perdida ao atender {}",
            order_id
        )))
    }
}

struct FailingMessages {
    inner: Arc<MemoryStore>,
}

#[async_trait]
impl MessageRepository for FailingMessages {
    async fn append_message(
        &self,
        conversation_key: &str,
        _participant_a: &str,
        _participant_b: &str,
        _sender: &str,
        _text: &str,
    ) -> Result<Message, AppError> {
        Err(AppError::InternalServerError(anyhow::anyhow!(
            "conexão perdida ao gravar mensagem em {}",
            conversation_key
        )))
    }

    async fn list_messages(&self, conversation_key: &str) -> Result<Vec<Message>, AppError> {
        MessageRepository::list_messages(&*self.inner, conversation_key).await
    }

    async fn list_conversations(&self, email: &str) -> Result<Vec<ConversationSummary>, AppError> {
        MessageRepository::list_conversations(&*self.inner, email).await
    }
}
