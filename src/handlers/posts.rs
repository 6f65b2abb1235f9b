// src/handlers/posts.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        i18n::Locale,
        roles::{BusinessAccount, RequireRole},
    },
    models::post::Post,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Promoção de inverno")]
    pub title: String,

    #[validate(length(min = 1, message = "required"))]
    pub content: String,

    /// Cor de fundo do card (padrão #FFFFFF)
    #[schema(example = "#FFE4C4")]
    pub color: Option<String>,
}

// POST /api/posts
#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "Posts",
    request_body = CreatePostPayload,
    responses(
        (status = 201, description = "Post publicado", body = Post),
        (status = 403, description = "Apenas empresas publicam")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_post(
    State(app_state): State<AppState>,
    locale: Locale,
    RequireRole(owner, _): BusinessAccount,
    Json(payload): Json<CreatePostPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let post = app_state
        .post_service
        .create_post(&owner, &payload.title, &payload.content, payload.color.as_deref())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(post)))
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PostQuery {
    pub company_email: String,
}

// GET /api/posts?companyEmail=
#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "Posts",
    params(PostQuery),
    responses(
        (status = 200, description = "Posts publicados pela empresa", body = Vec<Post>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_posts(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(params): Query<PostQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let posts = app_state
        .post_service
        .list_by_company_email(&params.company_email)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(posts))
}
