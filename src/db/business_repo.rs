// src/db/business_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::business::{Business, BusinessPatch, NewProduct, Product},
};

#[async_trait]
pub trait BusinessRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Business>, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Business>, AppError>;

    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Option<Business>, AppError>;

    /// Aplica o patch somente se a versão gravada for `expected_version`.
    async fn update_profile(
        &self,
        id: Uuid,
        expected_version: i32,
        patch: BusinessPatch,
    ) -> Result<Business, AppError>;

    async fn list_products(&self, business_id: Uuid) -> Result<Vec<Product>, AppError>;

    async fn find_product(
        &self,
        business_id: Uuid,
        product_id: Uuid,
    ) -> Result<Option<Product>, AppError>;

    async fn add_product(&self, business_id: Uuid, product: NewProduct) -> Result<Product, AppError>;

    /// Retorna `false` se o produto não existia nessa empresa.
    async fn remove_product(&self, business_id: Uuid, product_id: Uuid) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct PgBusinessRepository {
    pool: PgPool,
}

impl PgBusinessRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BusinessRepository for PgBusinessRepository {
    async fn list_all(&self) -> Result<Vec<Business>, AppError> {
        let businesses = sqlx::query_as::<_, Business>(
            "SELECT * FROM businesses ORDER BY business_name ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(businesses)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Business>, AppError> {
        let business = sqlx::query_as::<_, Business>("SELECT * FROM businesses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(business)
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Option<Business>, AppError> {
        let business =
            sqlx::query_as::<_, Business>("SELECT * FROM businesses WHERE owner_id = $1")
                .bind(owner_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(business)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        expected_version: i32,
        patch: BusinessPatch,
    ) -> Result<Business, AppError> {
        // COALESCE mantém o valor atual quando o campo não veio no patch.
        // O WHERE na versão rejeita edições feitas sobre uma cópia antiga.
        let updated = sqlx::query_as::<_, Business>(
            r#"
            UPDATE businesses SET
                business_name      = COALESCE($3, business_name),
                description        = COALESCE($4, description),
                long_description   = COALESCE($5, long_description),
                location           = COALESCE($6, location),
                phone_number       = COALESCE($7, phone_number),
                establishment_date = COALESCE($8, establishment_date),
                category           = COALESCE($9, category),
                images             = COALESCE($10, images),
                version            = version + 1,
                updated_at         = NOW()
            WHERE id = $1 AND version = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(expected_version)
        .bind(patch.business_name)
        .bind(patch.description)
        .bind(patch.long_description)
        .bind(patch.location)
        .bind(patch.phone_number)
        .bind(patch.establishment_date)
        .bind(patch.category)
        .bind(patch.images)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(business) => Ok(business),
            None => match self.find_by_id(id).await? {
                Some(current) => Err(AppError::StaleBusinessVersion {
                    expected: expected_version,
                    current: current.version,
                }),
                None => Err(AppError::BusinessNotFound),
            },
        }
    }

    async fn list_products(&self, business_id: Uuid) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE business_id = $1 ORDER BY created_at ASC",
        )
        .bind(business_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn find_product(
        &self,
        business_id: Uuid,
        product_id: Uuid,
    ) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE business_id = $1 AND id = $2",
        )
        .bind(business_id)
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn add_product(&self, business_id: Uuid, product: NewProduct) -> Result<Product, AppError> {
        let created = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (id, business_id, name, description, price, image)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(business_id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.image)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn remove_product(&self, business_id: Uuid, product_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM products WHERE business_id = $1 AND id = $2")
            .bind(business_id)
            .bind(product_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
