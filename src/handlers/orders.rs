// src/handlers/orders.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{
        i18n::Locale,
        roles::{BusinessAccount, CustomerAccount, RequireRole},
    },
    models::order::{FulfillmentOutcome, Order, OrderStatusFilter},
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderPayload {
    pub product_id: Uuid,
}

// POST /api/businesses/{business_id}/orders
#[utoipa::path(
    post,
    path = "/api/businesses/{business_id}/orders",
    tag = "Orders",
    request_body = PlaceOrderPayload,
    params(("business_id" = Uuid, Path, description = "ID da Empresa")),
    responses(
        (status = 201, description = "Pedido registrado", body = Order),
        (status = 403, description = "Apenas clientes fazem pedidos"),
        (status = 404, description = "Empresa ou produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn place_order(
    State(app_state): State<AppState>,
    locale: Locale,
    RequireRole(customer, _): CustomerAccount,
    Path(business_id): Path<Uuid>,
    Json(payload): Json<PlaceOrderPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let order = app_state
        .order_service
        .place_order(&customer, business_id, payload.product_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(order)))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct OrderStatusQuery {
    /// pending (padrão), fulfilled ou all
    pub status: Option<OrderStatusFilter>,
}

// GET /api/businesses/{business_id}/orders
#[utoipa::path(
    get,
    path = "/api/businesses/{business_id}/orders",
    tag = "Orders",
    params(
        ("business_id" = Uuid, Path, description = "ID da Empresa"),
        OrderStatusQuery
    ),
    responses(
        (status = 200, description = "Pedidos da empresa, do mais antigo ao mais novo", body = Vec<Order>),
        (status = 403, description = "Não é o dono")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_business_orders(
    State(app_state): State<AppState>,
    locale: Locale,
    RequireRole(owner, _): BusinessAccount,
    Path(business_id): Path<Uuid>,
    Query(params): Query<OrderStatusQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let orders = app_state
        .order_service
        .list_orders(&owner, business_id, params.status.unwrap_or_default())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(orders))
}

// POST /api/businesses/{business_id}/orders/{order_id}/fulfill
#[utoipa::path(
    post,
    path = "/api/businesses/{business_id}/orders/{order_id}/fulfill",
    tag = "Orders",
    params(
        ("business_id" = Uuid, Path, description = "ID da Empresa"),
        ("order_id" = Uuid, Path, description = "ID do Pedido")
    ),
    responses(
        (status = 200, description = "Pedidos pendentes após a operação", body = FulfillmentOutcome),
        (status = 404, description = "Pedido não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn fulfill_order(
    State(app_state): State<AppState>,
    locale: Locale,
    RequireRole(owner, _): BusinessAccount,
    Path((business_id, order_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = app_state
        .order_service
        .fulfill_order(&owner, business_id, order_id)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(outcome))
}

// GET /api/orders/mine
#[utoipa::path(
    get,
    path = "/api/orders/mine",
    tag = "Orders",
    responses(
        (status = 200, description = "Pedidos do cliente, mais recentes primeiro", body = Vec<Order>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_my_orders(
    State(app_state): State<AppState>,
    locale: Locale,
    RequireRole(customer, _): CustomerAccount,
) -> Result<impl IntoResponse, ApiError> {
    let orders = app_state
        .order_service
        .list_my_orders(&customer)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(orders))
}
