// src/db/user_repo.rs

use async_trait::async_trait;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        auth::{NewUser, User},
        business::{Business, NewBusiness},
    },
};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    async fn create_user(&self, user: NewUser) -> Result<User, AppError>;

    /// Cria a conta e o perfil da empresa atomicamente.
    async fn create_business_account(
        &self,
        user: NewUser,
        business: NewBusiness,
    ) -> Result<(User, Business), AppError>;
}

// O repositório de usuários, responsável por todas as interações com a tabela 'users'
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

const USER_COLUMNS: &str = r#"
    u.id, u.email, u.password_hash, u.user_type, u.display_name,
    b.id AS business_id, u.created_at
"#;

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_user<'e, E>(&self, executor: E, user: &NewUser) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, password_hash, user_type, display_name)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, email, password_hash, user_type, display_name,
                      NULL::uuid AS business_id, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.user_type)
        .bind(&user.display_name)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            // Converte erro de violação de chave única em um erro mais amigável
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::EmailAlreadyExists;
                }
            }
            e.into()
        })
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users u LEFT JOIN businesses b ON b.owner_id = u.id WHERE u.email = $1"
        );
        let maybe_user = sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users u LEFT JOIN businesses b ON b.owner_id = u.id WHERE u.id = $1"
        );
        let maybe_user = sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_user)
    }

    async fn create_user(&self, user: NewUser) -> Result<User, AppError> {
        self.insert_user(&self.pool, &user).await
    }

    async fn create_business_account(
        &self,
        user: NewUser,
        business: NewBusiness,
    ) -> Result<(User, Business), AppError> {
        // --- INÍCIO DA TRANSAÇÃO ---
        let mut tx = self.pool.begin().await?;

        let mut owner = self.insert_user(&mut *tx, &user).await?;

        // Se falhar aqui, o usuário criado acima é desfeito (rollback no drop)
        let created = sqlx::query_as::<_, Business>(
            r#"
            INSERT INTO businesses (
                id, owner_id, business_name, description, long_description,
                location, phone_number, establishment_date, category, images
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner.id)
        .bind(&business.business_name)
        .bind(&business.description)
        .bind(&business.long_description)
        .bind(&business.location)
        .bind(&business.phone_number)
        .bind(business.establishment_date)
        .bind(&business.category)
        .bind(&business.images)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        // --- FIM DA TRANSAÇÃO ---

        owner.business_id = Some(created.id);
        Ok((owner, created))
    }
}
