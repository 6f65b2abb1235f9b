// src/handlers/businesses.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{
        i18n::Locale,
        roles::{BusinessAccount, RequireRole},
    },
    models::{
        business::{Business, BusinessPage, BusinessPatch, NewProduct, Product},
        post::Post,
    },
};

// =============================================================================
//  1. DIRETÓRIO
// =============================================================================

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    /// Trecho do nome (sem diferenciar maiúsculas)
    pub query: Option<String>,
    /// Categoria exata
    pub category: Option<String>,
}

// GET /api/businesses
#[utoipa::path(
    get,
    path = "/api/businesses",
    tag = "Directory",
    params(SearchQuery),
    responses(
        (status = 200, description = "Empresas que casam com o filtro", body = Vec<Business>)
    ),
    security(("api_jwt" = []))
)]
pub async fn search_businesses(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(params): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let businesses = app_state
        .business_service
        .search(params.query.as_deref(), params.category.as_deref())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(businesses))
}

// GET /api/businesses/categories
#[utoipa::path(
    get,
    path = "/api/businesses/categories",
    tag = "Directory",
    responses(
        (status = 200, description = "Categorias distintas, em ordem alfabética", body = Vec<String>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_categories(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let categories = app_state
        .business_service
        .list_categories()
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(categories))
}

// GET /api/businesses/{business_id}
#[utoipa::path(
    get,
    path = "/api/businesses/{business_id}",
    tag = "Directory",
    params(("business_id" = Uuid, Path, description = "ID da Empresa")),
    responses(
        (status = 200, description = "Perfil, produtos e avaliações", body = BusinessPage),
        (status = 404, description = "Empresa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_business_page(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(business_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let page = app_state
        .business_service
        .get_business_page(business_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(page))
}

// GET /api/businesses/{business_id}/posts
#[utoipa::path(
    get,
    path = "/api/businesses/{business_id}/posts",
    tag = "Posts",
    params(("business_id" = Uuid, Path, description = "ID da Empresa")),
    responses(
        (status = 200, description = "Posts da empresa, mais recentes primeiro", body = Vec<Post>),
        (status = 404, description = "Empresa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_business_posts(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(business_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let posts = app_state
        .post_service
        .list_for_business(business_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(posts))
}

// =============================================================================
//  2. EDIÇÃO (DONO)
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBusinessPayload {
    /// Versão lida pelo cliente antes de editar
    #[validate(range(min = 1, message = "required"))]
    #[schema(example = 1)]
    pub expected_version: i32,

    #[serde(flatten)]
    pub patch: BusinessPatch,
}

// PATCH /api/businesses/{business_id}
#[utoipa::path(
    patch,
    path = "/api/businesses/{business_id}",
    tag = "Directory",
    request_body = UpdateBusinessPayload,
    params(("business_id" = Uuid, Path, description = "ID da Empresa")),
    responses(
        (status = 200, description = "Perfil atualizado", body = Business),
        (status = 403, description = "Não é o dono"),
        (status = 409, description = "Versão desatualizada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_business(
    State(app_state): State<AppState>,
    locale: Locale,
    RequireRole(owner, _): BusinessAccount,
    Path(business_id): Path<Uuid>,
    Json(payload): Json<UpdateBusinessPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let business = app_state
        .business_service
        .update_business(&owner, business_id, payload.expected_version, payload.patch)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(business))
}

fn non_negative_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() {
        return Err(ValidationError::new("non_negative").with_message("O preço não pode ser negativo.".into()));
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Chicken Biryani")]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[validate(custom(function = "non_negative_price"))]
    #[schema(value_type = f64, example = 12.5)]
    pub price: Decimal,

    #[serde(default)]
    #[schema(example = "https://img.thrive.app/biryani.png")]
    pub image: String,
}

// POST /api/businesses/{business_id}/products
#[utoipa::path(
    post,
    path = "/api/businesses/{business_id}/products",
    tag = "Directory",
    request_body = CreateProductPayload,
    params(("business_id" = Uuid, Path, description = "ID da Empresa")),
    responses(
        (status = 201, description = "Produto adicionado ao catálogo", body = Product),
        (status = 403, description = "Não é o dono")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_product(
    State(app_state): State<AppState>,
    locale: Locale,
    RequireRole(owner, _): BusinessAccount,
    Path(business_id): Path<Uuid>,
    Json(payload): Json<CreateProductPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let product = app_state
        .business_service
        .add_product(
            &owner,
            business_id,
            NewProduct {
                name: payload.name.trim().to_string(),
                description: payload.description,
                price: payload.price,
                image: payload.image,
            },
        )
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(product)))
}

// DELETE /api/businesses/{business_id}/products/{product_id}
#[utoipa::path(
    delete,
    path = "/api/businesses/{business_id}/products/{product_id}",
    tag = "Directory",
    params(
        ("business_id" = Uuid, Path, description = "ID da Empresa"),
        ("product_id" = Uuid, Path, description = "ID do Produto")
    ),
    responses(
        (status = 204, description = "Produto removido"),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn remove_product(
    State(app_state): State<AppState>,
    locale: Locale,
    RequireRole(owner, _): BusinessAccount,
    Path((business_id, product_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .business_service
        .remove_product(&owner, business_id, product_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
