// src/db/memory.rs

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        BusinessRepository, MessageRepository, OrderRepository, PostRepository, ReviewRepository,
        UserRepository,
    },
    models::{
        auth::{NewUser, User},
        business::{Business, BusinessPatch, NewBusiness, NewProduct, Product},
        message::{Conversation, ConversationSummary, Message},
        order::{NewOrder, Order, OrderStatusFilter},
        post::{NewPost, Post},
        review::{NewReview, Review},
    },
};

/// Store em memória com as mesmas garantias dos repositórios Postgres:
/// toda escrita acontece sob um único lock, linha a linha.
/// Usado pelos testes e pelo backend `STORE_BACKEND=memory`.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

#[derive(Default)]
struct MemoryState {
    users: HashMap<Uuid, User>,
    businesses: HashMap<Uuid, Business>,
    products: Vec<Product>,
    orders: Vec<Order>,
    reviews: Vec<Review>,
    conversations: HashMap<String, Conversation>,
    messages: Vec<Message>,
    posts: Vec<Post>,
}

impl MemoryState {
    fn insert_user(&mut self, user: NewUser) -> Result<User, AppError> {
        if self.users.values().any(|u| u.email == user.email) {
            return Err(AppError::EmailAlreadyExists);
        }
        let created = User {
            id: Uuid::new_v4(),
            email: user.email,
            password_hash: user.password_hash,
            user_type: user.user_type,
            display_name: user.display_name,
            business_id: None,
            created_at: Utc::now(),
        };
        self.users.insert(created.id, created.clone());
        Ok(created)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User, AppError> {
        self.state.write().await.insert_user(user)
    }

    async fn create_business_account(
        &self,
        user: NewUser,
        business: NewBusiness,
    ) -> Result<(User, Business), AppError> {
        let mut state = self.state.write().await;
        let mut owner = state.insert_user(user)?;

        let now = Utc::now();
        let created = Business {
            id: Uuid::new_v4(),
            owner_id: owner.id,
            business_name: business.business_name,
            description: business.description,
            long_description: business.long_description,
            location: business.location,
            phone_number: business.phone_number,
            establishment_date: business.establishment_date,
            category: business.category,
            images: business.images,
            version: 1,
            created_at: now,
            updated_at: now,
        };

        owner.business_id = Some(created.id);
        state.users.insert(owner.id, owner.clone());
        state.businesses.insert(created.id, created.clone());
        Ok((owner, created))
    }
}

#[async_trait]
impl BusinessRepository for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Business>, AppError> {
        let state = self.state.read().await;
        let mut businesses: Vec<Business> = state.businesses.values().cloned().collect();
        businesses.sort_by(|a, b| a.business_name.cmp(&b.business_name));
        Ok(businesses)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Business>, AppError> {
        Ok(self.state.read().await.businesses.get(&id).cloned())
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Option<Business>, AppError> {
        let state = self.state.read().await;
        Ok(state
            .businesses
            .values()
            .find(|b| b.owner_id == owner_id)
            .cloned())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        expected_version: i32,
        patch: BusinessPatch,
    ) -> Result<Business, AppError> {
        let mut state = self.state.write().await;
        let business = state
            .businesses
            .get_mut(&id)
            .ok_or(AppError::BusinessNotFound)?;

        if business.version != expected_version {
            return Err(AppError::StaleBusinessVersion {
                expected: expected_version,
                current: business.version,
            });
        }

        if let Some(v) = patch.business_name {
            business.business_name = v;
        }
        if let Some(v) = patch.description {
            business.description = v;
        }
        if let Some(v) = patch.long_description {
            business.long_description = v;
        }
        if let Some(v) = patch.location {
            business.location = v;
        }
        if let Some(v) = patch.phone_number {
            business.phone_number = v;
        }
        if let Some(v) = patch.establishment_date {
            business.establishment_date = Some(v);
        }
        if let Some(v) = patch.category {
            business.category = v;
        }
        if let Some(v) = patch.images {
            business.images = v;
        }
        business.version += 1;
        business.updated_at = Utc::now();

        Ok(business.clone())
    }

    async fn list_products(&self, business_id: Uuid) -> Result<Vec<Product>, AppError> {
        let state = self.state.read().await;
        Ok(state
            .products
            .iter()
            .filter(|p| p.business_id == business_id)
            .cloned()
            .collect())
    }

    async fn find_product(
        &self,
        business_id: Uuid,
        product_id: Uuid,
    ) -> Result<Option<Product>, AppError> {
        let state = self.state.read().await;
        Ok(state
            .products
            .iter()
            .find(|p| p.business_id == business_id && p.id == product_id)
            .cloned())
    }

    async fn add_product(&self, business_id: Uuid, product: NewProduct) -> Result<Product, AppError> {
        let mut state = self.state.write().await;
        if !state.businesses.contains_key(&business_id) {
            return Err(AppError::BusinessNotFound);
        }
        let created = Product {
            id: Uuid::new_v4(),
            business_id,
            name: product.name,
            description: product.description,
            price: product.price,
            image: product.image,
            created_at: Utc::now(),
        };
        state.products.push(created.clone());
        Ok(created)
    }

    async fn remove_product(&self, business_id: Uuid, product_id: Uuid) -> Result<bool, AppError> {
        let mut state = self.state.write().await;
        let before = state.products.len();
        state
            .products
            .retain(|p| !(p.business_id == business_id && p.id == product_id));
        Ok(state.products.len() < before)
    }
}

#[async_trait]
impl OrderRepository for MemoryStore {
    async fn append_order(&self, order: NewOrder) -> Result<Order, AppError> {
        let mut state = self.state.write().await;
        if !state.businesses.contains_key(&order.business_id) {
            return Err(AppError::BusinessNotFound);
        }
        let created = Order {
            id: Uuid::new_v4(),
            business_id: order.business_id,
            customer_id: order.customer_id,
            customer_email: order.customer_email,
            product_id: order.product_id,
            product_name: order.product_name,
            product_image: order.product_image,
            product_price: order.product_price,
            fulfilled: false,
            created_at: Utc::now(),
            fulfilled_at: None,
        };
        state.orders.push(created.clone());
        Ok(created)
    }

    async fn list_for_business(
        &self,
        business_id: Uuid,
        filter: OrderStatusFilter,
    ) -> Result<Vec<Order>, AppError> {
        let state = self.state.read().await;
        Ok(state
            .orders
            .iter()
            .filter(|o| o.business_id == business_id && filter.matches(o))
            .cloned()
            .collect())
    }

    async fn list_for_customer(&self, customer_id: Uuid) -> Result<Vec<Order>, AppError> {
        let state = self.state.read().await;
        Ok(state
            .orders
            .iter()
            .rev()
            .filter(|o| o.customer_id == customer_id)
            .cloned()
            .collect())
    }

    async fn find_order(&self, business_id: Uuid, order_id: Uuid) -> Result<Option<Order>, AppError> {
        let state = self.state.read().await;
        Ok(state
            .orders
            .iter()
            .find(|o| o.business_id == business_id && o.id == order_id)
            .cloned())
    }

    async fn mark_fulfilled(&self, business_id: Uuid, order_id: Uuid) -> Result<Option<Order>, AppError> {
        let mut state = self.state.write().await;
        let order = state
            .orders
            .iter_mut()
            .find(|o| o.business_id == business_id && o.id == order_id && !o.fulfilled);

        Ok(order.map(|o| {
            o.fulfilled = true;
            o.fulfilled_at = Some(Utc::now());
            o.clone()
        }))
    }
}

#[async_trait]
impl ReviewRepository for MemoryStore {
    async fn append_review(&self, review: NewReview) -> Result<Review, AppError> {
        let mut state = self.state.write().await;
        if !state.businesses.contains_key(&review.business_id) {
            return Err(AppError::BusinessNotFound);
        }
        let created = Review {
            id: Uuid::new_v4(),
            business_id: review.business_id,
            author_id: review.author_id,
            username: review.username,
            rating: review.rating,
            review: review.review,
            created_at: Utc::now(),
        };
        state.reviews.push(created.clone());
        Ok(created)
    }

    async fn list_for_business(&self, business_id: Uuid) -> Result<Vec<Review>, AppError> {
        let state = self.state.read().await;
        Ok(state
            .reviews
            .iter()
            .filter(|r| r.business_id == business_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl MessageRepository for MemoryStore {
    async fn append_message(
        &self,
        conversation_key: &str,
        participant_a: &str,
        participant_b: &str,
        sender: &str,
        text: &str,
    ) -> Result<Message, AppError> {
        let mut state = self.state.write().await;
        let now = Utc::now();

        state
            .conversations
            .entry(conversation_key.to_string())
            .and_modify(|c| c.updated_at = now)
            .or_insert_with(|| Conversation {
                conversation_key: conversation_key.to_string(),
                participant_a: participant_a.to_string(),
                participant_b: participant_b.to_string(),
                created_at: now,
                updated_at: now,
            });

        let message = Message {
            id: Uuid::new_v4(),
            conversation_key: conversation_key.to_string(),
            sender: sender.to_string(),
            text: text.to_string(),
            sent_at: now,
        };
        state.messages.push(message.clone());
        Ok(message)
    }

    async fn list_messages(&self, conversation_key: &str) -> Result<Vec<Message>, AppError> {
        let state = self.state.read().await;
        Ok(state
            .messages
            .iter()
            .filter(|m| m.conversation_key == conversation_key)
            .cloned()
            .collect())
    }

    async fn list_conversations(&self, email: &str) -> Result<Vec<ConversationSummary>, AppError> {
        let state = self.state.read().await;
        let mut summaries: Vec<ConversationSummary> = state
            .conversations
            .values()
            .filter(|c| c.participant_a == email || c.participant_b == email)
            .map(|c| ConversationSummary {
                conversation_key: c.conversation_key.clone(),
                with_email: c.counterpart(email).to_string(),
                last_message: state
                    .messages
                    .iter()
                    .rev()
                    .find(|m| m.conversation_key == c.conversation_key)
                    .cloned(),
                updated_at: c.updated_at,
            })
            .collect();

        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(summaries)
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn create_post(&self, post: NewPost) -> Result<Post, AppError> {
        let mut state = self.state.write().await;
        let created = Post {
            id: Uuid::new_v4(),
            business_id: post.business_id,
            title: post.title,
            content: post.content,
            company_name: post.company_name,
            company_email: post.company_email,
            color: post.color,
            created_at: Utc::now(),
        };
        state.posts.push(created.clone());
        Ok(created)
    }

    async fn list_by_company_email(&self, email: &str) -> Result<Vec<Post>, AppError> {
        let state = self.state.read().await;
        Ok(state
            .posts
            .iter()
            .rev()
            .filter(|p| p.company_email == email)
            .cloned()
            .collect())
    }

    async fn list_by_business(&self, business_id: Uuid) -> Result<Vec<Post>, AppError> {
        let state = self.state.read().await;
        Ok(state
            .posts
            .iter()
            .rev()
            .filter(|p| p.business_id == business_id)
            .cloned()
            .collect())
    }
}
