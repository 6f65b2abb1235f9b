// src/models/post.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub business_id: Uuid,
    #[schema(example = "Weekend special")]
    pub title: String,
    pub content: String,
    #[schema(example = "Spice Hub")]
    pub company_name: String,
    #[schema(example = "contato@spicehub.com")]
    pub company_email: String,
    #[schema(example = "#FFB347")]
    pub color: String,
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub business_id: Uuid,
    pub title: String,
    pub content: String,
    pub company_name: String,
    pub company_email: String,
    pub color: String,
}
