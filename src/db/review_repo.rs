// src/db/review_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::review::{NewReview, Review},
};

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn append_review(&self, review: NewReview) -> Result<Review, AppError>;

    async fn list_for_business(&self, business_id: Uuid) -> Result<Vec<Review>, AppError>;
}

#[derive(Clone)]
pub struct PgReviewRepository {
    pool: PgPool,
}

impl PgReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    async fn append_review(&self, review: NewReview) -> Result<Review, AppError> {
        let created = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (id, business_id, author_id, username, rating, review)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(review.business_id)
        .bind(review.author_id)
        .bind(&review.username)
        .bind(review.rating)
        .bind(&review.review)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn list_for_business(&self, business_id: Uuid) -> Result<Vec<Review>, AppError> {
        let reviews = sqlx::query_as::<_, Review>(
            "SELECT * FROM reviews WHERE business_id = $1 ORDER BY created_at ASC",
        )
        .bind(business_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }
}
