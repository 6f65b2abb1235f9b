// src/handlers/messages.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::message::{ConversationSummary, Message},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendMessagePayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "loja@spicehub.com")]
    pub recipient: String,

    #[schema(example = "Vocês abrem no domingo?")]
    pub text: String,
}

// POST /api/messages
#[utoipa::path(
    post,
    path = "/api/messages",
    tag = "Messages",
    request_body = SendMessagePayload,
    responses(
        (status = 201, description = "Mensagem enviada", body = Message),
        (status = 400, description = "Texto vazio ou conversa consigo mesmo"),
        (status = 404, description = "Destinatário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn send_message(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(sender): AuthenticatedUser,
    Json(payload): Json<SendMessagePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let message = app_state
        .messaging_service
        .send_message(&sender.email, &payload.recipient, &payload.text)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(message)))
}

// GET /api/messages
#[utoipa::path(
    get,
    path = "/api/messages",
    tag = "Messages",
    responses(
        (status = 200, description = "Conversas do usuário, mais recentes primeiro", body = Vec<ConversationSummary>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_conversations(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let conversations = app_state
        .messaging_service
        .list_conversations(&user.email)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(conversations))
}

// GET /api/messages/{email}
#[utoipa::path(
    get,
    path = "/api/messages/{email}",
    tag = "Messages",
    params(("email" = String, Path, description = "E-mail do outro participante")),
    responses(
        (status = 200, description = "Mensagens em ordem de envio", body = Vec<Message>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_conversation(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(other): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let messages = app_state
        .messaging_service
        .get_conversation(&user.email, &other)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(messages))
}
