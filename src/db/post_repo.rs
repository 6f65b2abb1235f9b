// src/db/post_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::post::{NewPost, Post},
};

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create_post(&self, post: NewPost) -> Result<Post, AppError>;

    async fn list_by_company_email(&self, email: &str) -> Result<Vec<Post>, AppError>;

    async fn list_by_business(&self, business_id: Uuid) -> Result<Vec<Post>, AppError>;
}

#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn create_post(&self, post: NewPost) -> Result<Post, AppError> {
        let created = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (id, business_id, title, content, company_name, company_email, color)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(post.business_id)
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.company_name)
        .bind(&post.company_email)
        .bind(&post.color)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn list_by_company_email(&self, email: &str) -> Result<Vec<Post>, AppError> {
        let posts = sqlx::query_as::<_, Post>(
            "SELECT * FROM posts WHERE company_email = $1 ORDER BY created_at DESC",
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn list_by_business(&self, business_id: Uuid) -> Result<Vec<Post>, AppError> {
        let posts = sqlx::query_as::<_, Post>(
            "SELECT * FROM posts WHERE business_id = $1 ORDER BY created_at DESC",
        )
        .bind(business_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }
}
