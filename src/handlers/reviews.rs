// src/handlers/reviews.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::review::Review,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReviewPayload {
    /// 1 a 5 estrelas
    #[schema(example = 5)]
    pub rating: i16,

    #[schema(example = "Melhor biryani da cidade!")]
    pub review: String,

    /// Nome exibido; se ausente, usa o nome da conta ou o prefixo do e-mail
    pub username: Option<String>,
}

// POST /api/businesses/{business_id}/reviews
#[utoipa::path(
    post,
    path = "/api/businesses/{business_id}/reviews",
    tag = "Reviews",
    request_body = SubmitReviewPayload,
    params(("business_id" = Uuid, Path, description = "ID da Empresa")),
    responses(
        (status = 201, description = "Avaliação registrada", body = Review),
        (status = 400, description = "Nota fora de 1..5 ou texto vazio"),
        (status = 404, description = "Empresa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn submit_review(
    State(app_state): State<AppState>,
    locale: Locale,
    AuthenticatedUser(author): AuthenticatedUser,
    Path(business_id): Path<Uuid>,
    Json(payload): Json<SubmitReviewPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let review = app_state
        .review_service
        .submit_review(
            &author,
            business_id,
            payload.rating,
            &payload.review,
            payload.username.as_deref(),
        )
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(review)))
}

// GET /api/businesses/{business_id}/reviews
#[utoipa::path(
    get,
    path = "/api/businesses/{business_id}/reviews",
    tag = "Reviews",
    params(("business_id" = Uuid, Path, description = "ID da Empresa")),
    responses(
        (status = 200, description = "Avaliações na ordem de envio", body = Vec<Review>),
        (status = 404, description = "Empresa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_reviews(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(business_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let reviews = app_state
        .review_service
        .list_reviews(business_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(reviews))
}
