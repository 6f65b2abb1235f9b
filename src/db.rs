// src/db.rs

use std::sync::Arc;

use sqlx::PgPool;

pub mod business_repo;
pub mod memory;
pub mod message_repo;
pub mod order_repo;
pub mod post_repo;
pub mod review_repo;
pub mod user_repo;

pub use business_repo::{BusinessRepository, PgBusinessRepository};
pub use memory::MemoryStore;
pub use message_repo::{MessageRepository, PgMessageRepository};
pub use order_repo::{OrderRepository, PgOrderRepository};
pub use post_repo::{PgPostRepository, PostRepository};
pub use review_repo::{PgReviewRepository, ReviewRepository};
pub use user_repo::{PgUserRepository, UserRepository};

/// Conjunto de repositórios usado para montar os serviços.
/// Cada campo é um trait object, então o mesmo grafo de serviços
/// roda sobre Postgres ou sobre o store em memória.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub businesses: Arc<dyn BusinessRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub posts: Arc<dyn PostRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            businesses: Arc::new(PgBusinessRepository::new(pool.clone())),
            orders: Arc::new(PgOrderRepository::new(pool.clone())),
            reviews: Arc::new(PgReviewRepository::new(pool.clone())),
            messages: Arc::new(PgMessageRepository::new(pool.clone())),
            posts: Arc::new(PgPostRepository::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(MemoryStore::default()))
    }

    pub fn from_store(store: Arc<MemoryStore>) -> Self {
        Self {
            users: store.clone(),
            businesses: store.clone(),
            orders: store.clone(),
            reviews: store.clone(),
            messages: store.clone(),
            posts: store,
        }
    }
}
