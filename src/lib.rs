//src/lib.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post},
    Json, Router,
};
use utoipa::OpenApi;

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;
use crate::middleware::auth::auth_guard;

/// Monta o router completo. Tudo fora de `/api/auth`, health e docs exige Bearer token.
pub fn build_router(app_state: AppState) -> Router {
    // Define as rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register/customer", post(handlers::auth::register_customer))
        .route("/register/business", post(handlers::auth::register_business))
        .route("/login", post(handlers::auth::login));

    let user_routes = Router::new().route("/me", get(handlers::auth::get_me));

    let business_routes = Router::new()
        .route("/", get(handlers::businesses::search_businesses))
        .route("/categories", get(handlers::businesses::list_categories))
        .route(
            "/{business_id}",
            get(handlers::businesses::get_business_page).patch(handlers::businesses::update_business),
        )
        .route("/{business_id}/products", post(handlers::businesses::add_product))
        .route(
            "/{business_id}/products/{product_id}",
            delete(handlers::businesses::remove_product),
        )
        .route(
            "/{business_id}/orders",
            post(handlers::orders::place_order).get(handlers::orders::list_business_orders),
        )
        .route(
            "/{business_id}/orders/{order_id}/fulfill",
            post(handlers::orders::fulfill_order),
        )
        .route(
            "/{business_id}/reviews",
            post(handlers::reviews::submit_review).get(handlers::reviews::list_reviews),
        )
        .route("/{business_id}/posts", get(handlers::businesses::list_business_posts));

    let order_routes = Router::new().route("/mine", get(handlers::orders::list_my_orders));

    let message_routes = Router::new()
        .route(
            "/",
            post(handlers::messages::send_message).get(handlers::messages::list_conversations),
        )
        .route("/{email}", get(handlers::messages::get_conversation));

    let post_routes = Router::new().route(
        "/",
        post(handlers::posts::create_post).get(handlers::posts::list_posts),
    );

    let dashboard_routes = Router::new()
        .route("/summary", get(handlers::dashboard::get_summary))
        .route("/top-products", get(handlers::dashboard::get_top_products));

    // Tudo que exige login passa pelo mesmo guard
    let protected = Router::new()
        .nest("/users", user_routes)
        .nest("/businesses", business_routes)
        .nest("/orders", order_routes)
        .nest("/messages", message_routes)
        .nest("/posts", post_routes)
        .nest("/dashboard", dashboard_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .nest("/api/auth", auth_routes)
        .nest("/api", protected)
        .with_state(app_state)
}
