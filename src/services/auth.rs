// src/services/auth.rs

use std::sync::Arc;

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::{
        auth::{AuthResponse, Claims, NewUser, User, UserType},
        business::NewBusiness,
    },
};

/// E-mails são comparados sempre em minúsculas e sem espaços nas pontas.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[derive(Clone)]
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    jwt_secret: String,
    bcrypt_cost: u32,
    token_ttl: chrono::Duration,
}

impl AuthService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        jwt_secret: String,
        bcrypt_cost: u32,
        token_ttl: chrono::Duration,
    ) -> Self {
        Self { user_repo, jwt_secret, bcrypt_cost, token_ttl }
    }

    pub async fn register_customer(
        &self,
        email: &str,
        password: &str,
        display_name: Option<String>,
    ) -> Result<AuthResponse, AppError> {
        let new_user = NewUser {
            email: normalize_email(email),
            password_hash: self.hash_password(password).await?,
            user_type: UserType::Customer,
            display_name,
        };

        let user = self.user_repo.create_user(new_user).await?;
        tracing::info!("👤 Cliente cadastrado: {}", user.email);

        self.auth_response(&user)
    }

    /// Conta + perfil da empresa, numa única operação atômica do repositório.
    pub async fn register_business(
        &self,
        email: &str,
        password: &str,
        business: NewBusiness,
    ) -> Result<AuthResponse, AppError> {
        let new_user = NewUser {
            email: normalize_email(email),
            password_hash: self.hash_password(password).await?,
            user_type: UserType::Business,
            display_name: Some(business.business_name.clone()),
        };

        let (user, created) = self
            .user_repo
            .create_business_account(new_user, business)
            .await?;
        tracing::info!("🏪 Empresa cadastrada: {} ({})", created.business_name, created.id);

        self.auth_response(&user)
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<AuthResponse, AppError> {
        let user = self
            .user_repo
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            tracing::warn!("🔒 Tentativa de login inválida para {}", user.email);
            return Err(AppError::InvalidCredentials);
        }

        self.auth_response(&user)
    }

    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        self.user_repo
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    async fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let password_clone = password.to_owned();
        let cost = self.bcrypt_cost;
        let hashed = tokio::task::spawn_blocking(move || hash(&password_clone, cost))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
        Ok(hashed)
    }

    fn auth_response(&self, user: &User) -> Result<AuthResponse, AppError> {
        Ok(AuthResponse {
            token: self.create_token(user.id)?,
            user_type: user.user_type,
        })
    }

    fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + self.token_ttl;

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Repositories;

    fn service() -> AuthService {
        let repos = Repositories::in_memory();
        AuthService::new(repos.users, "segredo-de-teste".into(), 4, chrono::Duration::days(1))
    }

    #[tokio::test]
    async fn register_then_login_with_normalized_email() {
        let auth = service();
        auth.register_customer("  Maria@Example.com ", "senha123", None)
            .await
            .unwrap();

        let response = auth.login_user("maria@example.com", "senha123").await.unwrap();
        assert_eq!(response.user_type, UserType::Customer);

        let user = auth.validate_token(&response.token).await.unwrap();
        assert_eq!(user.email, "maria@example.com");
        assert!(user.business_id.is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let auth = service();
        auth.register_customer("a@b.com", "senha123", None).await.unwrap();

        let err = auth.register_customer("A@B.com", "outra123", None).await.unwrap_err();
        assert!(matches!(err, AppError::EmailAlreadyExists));
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let auth = service();
        auth.register_customer("a@b.com", "senha123", None).await.unwrap();

        let err = auth.login_user("a@b.com", "errada99").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn business_registration_links_the_business() {
        let auth = service();
        let response = auth
            .register_business(
                "loja@spice.com",
                "senha123",
                NewBusiness {
                    business_name: "Spice Hub".into(),
                    description: String::new(),
                    long_description: String::new(),
                    location: String::new(),
                    phone_number: String::new(),
                    establishment_date: None,
                    category: "food".into(),
                    images: vec![],
                },
            )
            .await
            .unwrap();

        let user = auth.validate_token(&response.token).await.unwrap();
        assert_eq!(user.user_type, UserType::Business);
        assert!(user.business_id.is_some());
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let err = service().validate_token("nao-e-um-jwt").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }
}
