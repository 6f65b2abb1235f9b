// src/models/review.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Uuid,
    pub business_id: Uuid,
    pub author_id: Uuid,
    #[schema(example = "maria")]
    pub username: String,
    #[schema(example = 5)]
    pub rating: i16,
    #[schema(example = "Best biryani in town")]
    pub review: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewReview {
    pub business_id: Uuid,
    pub author_id: Uuid,
    pub username: String,
    pub rating: i16,
    pub review: String,
}
