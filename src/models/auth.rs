// src/models/auth.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Papel da conta. Definido no cadastro e nunca alterado depois.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    Customer,
    Business,
}

// Representa um usuário vindo do banco de dados.
// `business_id` vem do LEFT JOIN com businesses (owner_id), nunca é gravado em users.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    #[schema(example = "cliente@thrive.app")]
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password_hash: String,

    pub user_type: UserType,
    pub display_name: Option<String>,
    pub business_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_business(&self) -> bool {
        self.user_type == UserType::Business
    }
}

// Dados necessários para gravar um usuário (senha já com hash)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub user_type: UserType,
    pub display_name: Option<String>,
}

// Cadastro de cliente
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCustomerPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "cliente@thrive.app")]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
    #[validate(length(min = 1, max = 80, message = "O nome deve ter entre 1 e 80 caracteres."))]
    pub display_name: Option<String>,
}

// Cadastro de empresa: conta + perfil inicial, criados juntos
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBusinessPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "contato@spicehub.com")]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,

    #[validate(length(min = 1, message = "O nome da empresa é obrigatório."))]
    #[schema(example = "Spice Hub")]
    pub business_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub long_description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub phone_number: String,
    pub establishment_date: Option<NaiveDate>,
    #[validate(length(min = 1, message = "A categoria é obrigatória."))]
    #[schema(example = "food")]
    pub category: String,
    #[serde(default)]
    pub images: Vec<String>,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user_type: UserType,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do usuário)
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}
