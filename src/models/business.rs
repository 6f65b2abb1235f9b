// src/models/business.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::review::Review;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    pub id: Uuid,
    pub owner_id: Uuid,
    #[schema(example = "Spice Hub")]
    pub business_name: String,
    pub description: String,
    pub long_description: String,
    pub location: String,
    pub phone_number: String,
    pub establishment_date: Option<NaiveDate>,
    #[schema(example = "food")]
    pub category: String,
    pub images: Vec<String>,
    // Incrementada a cada edição do perfil (controle otimista de concorrência)
    #[schema(example = 1)]
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub business_id: Uuid,
    #[schema(example = "Chicken Biryani")]
    pub name: String,
    pub description: String,
    #[schema(example = "12.50")]
    pub price: Decimal,
    pub image: String,
    pub created_at: DateTime<Utc>,
}

// Perfil inicial, gravado junto com a conta da empresa
#[derive(Debug, Clone)]
pub struct NewBusiness {
    pub business_name: String,
    pub description: String,
    pub long_description: String,
    pub location: String,
    pub phone_number: String,
    pub establishment_date: Option<NaiveDate>,
    pub category: String,
    pub images: Vec<String>,
}

// Campos ausentes (None) não são alterados
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BusinessPatch {
    #[validate(length(min = 1, message = "O nome da empresa é obrigatório."))]
    pub business_name: Option<String>,
    pub description: Option<String>,
    pub long_description: Option<String>,
    pub location: Option<String>,
    pub phone_number: Option<String>,
    pub establishment_date: Option<NaiveDate>,
    #[validate(length(min = 1, message = "A categoria é obrigatória."))]
    pub category: Option<String>,
    pub images: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image: String,
}

/// Página pública da empresa: perfil, catálogo e avaliações.
/// A média é recalculada a cada leitura, nunca armazenada.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BusinessPage {
    #[serde(flatten)]
    pub business: Business,
    pub products: Vec<Product>,
    pub reviews: Vec<Review>,
    #[schema(example = 4.0)]
    pub average_rating: f64,
    pub review_count: usize,
}
