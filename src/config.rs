// src/config.rs

use std::{env, str::FromStr, time::Duration};

use anyhow::{anyhow, Context};
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    common::i18n::I18nStore,
    db::Repositories,
    services::{
        auth::AuthService, business_service::BusinessService, dashboard_service::DashboardService,
        messaging_service::MessagingService, order_service::OrderService, post_service::PostService,
        review_service::ReviewService,
    },
};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 7;

/// Onde os dados ficam guardados.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(anyhow!("STORE_BACKEND desconhecido: '{}' (use postgres ou memory)", other)),
        }
    }
}

/// Configuração lida do ambiente (e do `.env`, se existir).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub store_backend: StoreBackend,
    pub db_max_connections: u32,
    pub bcrypt_cost: u32,
    pub token_ttl_days: i64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let store_backend = match env::var("STORE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => StoreBackend::Postgres,
        };

        let database_url = env::var("DATABASE_URL").ok();
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            return Err(anyhow!("DATABASE_URL deve ser definida quando STORE_BACKEND=postgres"));
        }

        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        Ok(Self {
            database_url,
            jwt_secret,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            store_backend,
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            bcrypt_cost: parse_var("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            token_ttl_days: parse_var("TOKEN_TTL_DAYS", DEFAULT_TOKEN_TTL_DAYS)?,
        })
    }

    /// Configuração para testes: store em memória e bcrypt barato.
    pub fn for_tests() -> Self {
        Self {
            database_url: None,
            jwt_secret: "segredo-de-teste".into(),
            bind_addr: DEFAULT_BIND_ADDR.into(),
            store_backend: StoreBackend::Memory,
            db_max_connections: DEFAULT_MAX_CONNECTIONS,
            bcrypt_cost: 4,
            token_ttl_days: 1,
        }
    }
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{} inválido ('{}'): {}", name, raw, e)),
        Err(_) => Ok(default),
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: Option<PgPool>,
    pub i18n_store: I18nStore,
    pub auth_service: AuthService,
    pub business_service: BusinessService,
    pub order_service: OrderService,
    pub messaging_service: MessagingService,
    pub review_service: ReviewService,
    pub post_service: PostService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        match config.store_backend {
            StoreBackend::Memory => {
                tracing::warn!("⚠️ Usando o store em memória: os dados somem ao reiniciar");
                Ok(Self::in_memory(config))
            }
            StoreBackend::Postgres => {
                let database_url = config
                    .database_url
                    .as_deref()
                    .ok_or_else(|| anyhow!("DATABASE_URL deve ser definida"))?;

                // Conecta ao banco de dados, usando '?' para propagar erros
                let db_pool = PgPoolOptions::new()
                    .max_connections(config.db_max_connections)
                    .acquire_timeout(Duration::from_secs(3))
                    .connect(database_url)
                    .await?;

                tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

                let mut state = Self::from_repositories(Repositories::postgres(db_pool.clone()), config);
                state.db_pool = Some(db_pool);
                Ok(state)
            }
        }
    }

    pub fn in_memory(config: &Config) -> Self {
        Self::from_repositories(Repositories::in_memory(), config)
    }

    // --- Monta o grafo de dependências ---
    pub fn from_repositories(repos: Repositories, config: &Config) -> Self {
        let auth_service = AuthService::new(
            repos.users.clone(),
            config.jwt_secret.clone(),
            config.bcrypt_cost,
            chrono::Duration::days(config.token_ttl_days),
        );
        let business_service = BusinessService::new(repos.businesses.clone(), repos.reviews.clone());
        let messaging_service = MessagingService::new(repos.messages.clone(), repos.users.clone());
        let order_service = OrderService::new(
            repos.orders.clone(),
            business_service.clone(),
            messaging_service.clone(),
        );
        let review_service = ReviewService::new(repos.reviews.clone(), repos.businesses.clone());
        let post_service = PostService::new(repos.posts.clone(), business_service.clone());
        let dashboard_service = DashboardService::new(
            repos.orders.clone(),
            repos.reviews.clone(),
            business_service.clone(),
        );

        Self {
            db_pool: None,
            i18n_store: I18nStore::new(),
            auth_service,
            business_service,
            order_service,
            messaging_service,
            review_service,
            post_service,
            dashboard_service,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_backend_parses_case_insensitively() {
        assert_eq!("Memory".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert_eq!(" postgres ".parse::<StoreBackend>().unwrap(), StoreBackend::Postgres);
        assert!("redis".parse::<StoreBackend>().is_err());
    }
}
