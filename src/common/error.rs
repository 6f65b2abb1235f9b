// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::{common::i18n::I18nStore, middleware::i18n::Locale};

// Erro de domínio. Os serviços e repositórios só conhecem este tipo;
// a tradução para HTTP acontece em `to_api_error`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Empresa não encontrada")]
    BusinessNotFound,

    #[error("Produto não encontrado")]
    ProductNotFound,

    #[error("Pedido não encontrado")]
    OrderNotFound,

    #[error("Ação exclusiva de contas empresariais")]
    BusinessAccountRequired,

    #[error("Ação exclusiva de contas de cliente")]
    CustomerAccountRequired,

    #[error("Usuário não é dono da empresa")]
    NotBusinessOwner,

    #[error("Nota inválida: {0}")]
    InvalidRating(i16),

    #[error("Avaliação vazia")]
    EmptyReview,

    #[error("Mensagem vazia")]
    EmptyMessage,

    #[error("Post sem título ou conteúdo")]
    EmptyPost,

    #[error("Conversa consigo mesmo")]
    SelfConversation,

    #[error("Versão desatualizada (esperada {expected}, atual {current})")]
    StaleBusinessVersion { expected: i32, current: i32 },

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// Status HTTP + chave do catálogo de mensagens.
    fn status_and_key(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::ValidationError(_) => (StatusCode::BAD_REQUEST, "validation_failed"),
            AppError::EmailAlreadyExists => (StatusCode::CONFLICT, "email_already_exists"),
            AppError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "invalid_credentials"),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token"),
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "user_not_found"),
            AppError::BusinessNotFound => (StatusCode::NOT_FOUND, "business_not_found"),
            AppError::ProductNotFound => (StatusCode::NOT_FOUND, "product_not_found"),
            AppError::OrderNotFound => (StatusCode::NOT_FOUND, "order_not_found"),
            AppError::BusinessAccountRequired => (StatusCode::FORBIDDEN, "business_account_required"),
            AppError::CustomerAccountRequired => (StatusCode::FORBIDDEN, "customer_account_required"),
            AppError::NotBusinessOwner => (StatusCode::FORBIDDEN, "not_business_owner"),
            AppError::InvalidRating(_) => (StatusCode::BAD_REQUEST, "invalid_rating"),
            AppError::EmptyReview => (StatusCode::BAD_REQUEST, "empty_review"),
            AppError::EmptyMessage => (StatusCode::BAD_REQUEST, "empty_message"),
            AppError::EmptyPost => (StatusCode::BAD_REQUEST, "empty_post"),
            AppError::SelfConversation => (StatusCode::BAD_REQUEST, "self_conversation"),
            AppError::StaleBusinessVersion { .. } => (StatusCode::CONFLICT, "stale_business_version"),
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }

    pub fn to_api_error(&self, locale: &Locale, i18n: &I18nStore) -> ApiError {
        let (status, key) = self.status_and_key();

        // Nunca vazamos detalhes de erros 5xx; apenas logamos.
        if status.is_server_error() {
            tracing::error!("🔥 Erro Interno do Servidor: {}", self);
        }

        let args: Vec<(&str, String)> = match self {
            AppError::InvalidRating(rating) => vec![("rating", rating.to_string())],
            AppError::StaleBusinessVersion { expected, current } => vec![
                ("expected", expected.to_string()),
                ("current", current.to_string()),
            ],
            _ => vec![],
        };

        let details = match self {
            AppError::ValidationError(errors) => Some(validation_details(errors)),
            _ => None,
        };

        ApiError {
            status,
            error: i18n.translate(&locale.0, key, &args),
            details,
        }
    }
}

// Retorna todos os detalhes da validação: { campo: [mensagens] }
fn validation_details(errors: &validator::ValidationErrors) -> Value {
    let mut details = serde_json::Map::new();
    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<Value> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .map(Value::String)
            .collect();
        details.insert(field.to_string(), Value::Array(messages));
    }
    Value::Object(details)
}

/// Erro já traduzido, pronto para virar resposta HTTP.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_version_maps_to_conflict_with_versions_in_message() {
        let err = AppError::StaleBusinessVersion { expected: 2, current: 3 };
        let api = err.to_api_error(&Locale("en".into()), &I18nStore::new());
        assert_eq!(api.status, StatusCode::CONFLICT);
        assert!(api.error.contains("expected version 2, current 3"));
    }

    #[test]
    fn database_errors_hide_their_cause() {
        let err = AppError::DatabaseError(sqlx::Error::RowNotFound);
        let api = err.to_api_error(&Locale("pt".into()), &I18nStore::new());
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.error, "Ocorreu um erro inesperado.");
    }
}
