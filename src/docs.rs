// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register_customer,
        handlers::auth::register_business,
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,

        // --- Directory ---
        handlers::businesses::search_businesses,
        handlers::businesses::list_categories,
        handlers::businesses::get_business_page,
        handlers::businesses::update_business,
        handlers::businesses::add_product,
        handlers::businesses::remove_product,

        // --- Orders ---
        handlers::orders::place_order,
        handlers::orders::list_business_orders,
        handlers::orders::fulfill_order,
        handlers::orders::list_my_orders,

        // --- Reviews ---
        handlers::reviews::submit_review,
        handlers::reviews::list_reviews,

        // --- Messages ---
        handlers::messages::send_message,
        handlers::messages::list_conversations,
        handlers::messages::get_conversation,

        // --- Posts ---
        handlers::posts::create_post,
        handlers::posts::list_posts,
        handlers::businesses::list_business_posts,

        // --- Dashboard ---
        handlers::dashboard::get_summary,
        handlers::dashboard::get_top_products,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserType,
            models::auth::User,
            models::auth::RegisterCustomerPayload,
            models::auth::RegisterBusinessPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Directory ---
            models::business::Business,
            models::business::Product,
            models::business::BusinessPatch,
            models::business::BusinessPage,
            handlers::businesses::UpdateBusinessPayload,
            handlers::businesses::CreateProductPayload,

            // --- Orders ---
            models::order::Order,
            models::order::OrderStatusFilter,
            models::order::FulfillmentOutcome,
            handlers::orders::PlaceOrderPayload,

            // --- Reviews ---
            models::review::Review,
            handlers::reviews::SubmitReviewPayload,

            // --- Messages ---
            models::message::Message,
            models::message::ConversationSummary,
            handlers::messages::SendMessagePayload,

            // --- Posts ---
            models::post::Post,
            handlers::posts::CreatePostPayload,

            // --- Dashboard ---
            models::dashboard::DashboardSummary,
            models::dashboard::TopProductEntry,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Dados do Usuário e Perfil"),
        (name = "Directory", description = "Busca de Empresas, Perfil e Catálogo"),
        (name = "Orders", description = "Pedidos de Clientes e Atendimento"),
        (name = "Reviews", description = "Avaliações de Empresas"),
        (name = "Messages", description = "Conversas entre Usuários"),
        (name = "Posts", description = "Anúncios das Empresas"),
        (name = "Dashboard", description = "Indicadores da Empresa")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
