// src/handlers/dashboard.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{
        i18n::Locale,
        roles::{BusinessAccount, RequireRole},
    },
    models::dashboard::{DashboardSummary, TopProductEntry},
};

// GET /api/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Indicadores de pedidos e avaliações da empresa", body = DashboardSummary),
        (status = 401, description = "Não autorizado"),
        (status = 403, description = "Apenas contas empresariais")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    locale: Locale,
    RequireRole(owner, _): BusinessAccount,
) -> Result<impl IntoResponse, ApiError> {
    let summary = app_state
        .dashboard_service
        .get_summary(&owner)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(summary)))
}

// GET /api/dashboard/top-products
#[utoipa::path(
    get,
    path = "/api/dashboard/top-products",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Top 5 produtos mais pedidos", body = Vec<TopProductEntry>)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_top_products(
    State(app_state): State<AppState>,
    locale: Locale,
    RequireRole(owner, _): BusinessAccount,
) -> Result<impl IntoResponse, ApiError> {
    let products = app_state
        .dashboard_service
        .get_top_products(&owner)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(products)))
}
