// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::{
        auth::{AuthResponse, LoginUserPayload, RegisterBusinessPayload, RegisterCustomerPayload, User},
        business::NewBusiness,
    },
};

// POST /api/auth/register/customer
#[utoipa::path(
    post,
    path = "/api/auth/register/customer",
    tag = "Auth",
    request_body = RegisterCustomerPayload,
    responses(
        (status = 201, description = "Cliente cadastrado", body = AuthResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "E-mail já em uso")
    )
)]
pub async fn register_customer(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<RegisterCustomerPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let response = app_state
        .auth_service
        .register_customer(&payload.email, &payload.password, payload.display_name)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(response)))
}

// POST /api/auth/register/business
#[utoipa::path(
    post,
    path = "/api/auth/register/business",
    tag = "Auth",
    request_body = RegisterBusinessPayload,
    responses(
        (status = 201, description = "Conta e perfil da empresa criados", body = AuthResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "E-mail já em uso")
    )
)]
pub async fn register_business(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<RegisterBusinessPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let profile = NewBusiness {
        business_name: payload.business_name.trim().to_string(),
        description: payload.description,
        long_description: payload.long_description,
        location: payload.location,
        phone_number: payload.phone_number,
        establishment_date: payload.establishment_date,
        category: payload.category.trim().to_string(),
        images: payload.images,
    };

    let response = app_state
        .auth_service
        .register_business(&payload.email, &payload.password, profile)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(response)))
}

// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginUserPayload,
    responses(
        (status = 200, description = "Login efetuado", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<LoginUserPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let response = app_state
        .auth_service
        .login_user(&payload.email, &payload.password)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(response))
}

// GET /api/users/me
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "Usuário logado", body = User),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(AuthenticatedUser(user): AuthenticatedUser) -> Json<User> {
    Json(user)
}
