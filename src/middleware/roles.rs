// src/middleware/roles.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::marker::PhantomData;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::auth::{User, UserType},
};

/// O papel exigido por uma rota.
pub trait RoleDef: Send + Sync + 'static {
    fn user_type() -> UserType;
    fn denied() -> AppError;
}

/// Guardião: só deixa passar contas do papel `T`.
pub struct RequireRole<T>(pub User, pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleDef,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthenticatedUser(user) = AuthenticatedUser::from_request_parts(parts, state).await?;

        if user.user_type != T::user_type() {
            let app_state = AppState::from_ref(state);
            let locale = Locale::from_headers(&parts.headers);
            tracing::warn!("⛔ {} tentou uma ação de {:?}", user.email, T::user_type());
            return Err(T::denied().to_api_error(&locale, &app_state.i18n_store));
        }

        Ok(RequireRole(user, PhantomData))
    }
}

// ---
// PAPÉIS
// ---

pub struct BusinessRole;
impl RoleDef for BusinessRole {
    fn user_type() -> UserType { UserType::Business }
    fn denied() -> AppError { AppError::BusinessAccountRequired }
}

pub struct CustomerRole;
impl RoleDef for CustomerRole {
    fn user_type() -> UserType { UserType::Customer }
    fn denied() -> AppError { AppError::CustomerAccountRequired }
}

pub type BusinessAccount = RequireRole<BusinessRole>;
pub type CustomerAccount = RequireRole<CustomerRole>;
