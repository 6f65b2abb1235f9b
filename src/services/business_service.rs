// src/services/business_service.rs

use std::{collections::BTreeSet, sync::Arc};

use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::{BusinessRepository, ReviewRepository},
    models::{
        auth::User,
        business::{Business, BusinessPage, BusinessPatch, NewProduct, Product},
    },
    services::review_service::average_rating,
};

/// Filtro da tela de busca: nome contém `query` literalmente (sem diferenciar
/// maiúsculas) E, se houver, categoria exatamente igual. Query vazia casa com tudo.
pub fn filter_businesses<'a>(
    businesses: &'a [Business],
    query: &str,
    category: Option<&str>,
) -> Vec<&'a Business> {
    let needle = query.to_lowercase();

    businesses
        .iter()
        .filter(|b| needle.is_empty() || b.business_name.to_lowercase().contains(&needle))
        .filter(|b| category.is_none_or(|c| b.category == c))
        .collect()
}

#[derive(Clone)]
pub struct BusinessService {
    repo: Arc<dyn BusinessRepository>,
    reviews: Arc<dyn ReviewRepository>,
}

impl BusinessService {
    pub fn new(repo: Arc<dyn BusinessRepository>, reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { repo, reviews }
    }

    // =========================================================================
    //  BUSCA / DIRETÓRIO
    // =========================================================================

    /// Carrega o diretório inteiro e filtra em memória.
    pub async fn search(
        &self,
        query: Option<&str>,
        category: Option<&str>,
    ) -> Result<Vec<Business>, AppError> {
        let all = self.repo.list_all().await?;
        let category = category.map(str::trim).filter(|c| !c.is_empty());

        Ok(filter_businesses(&all, query.unwrap_or(""), category)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn list_categories(&self) -> Result<Vec<String>, AppError> {
        let all = self.repo.list_all().await?;
        let categories: BTreeSet<String> = all.into_iter().map(|b| b.category).collect();
        Ok(categories.into_iter().collect())
    }

    pub async fn get_business(&self, business_id: Uuid) -> Result<Business, AppError> {
        self.repo
            .find_by_id(business_id)
            .await?
            .ok_or(AppError::BusinessNotFound)
    }

    /// Perfil + catálogo + avaliações, com a média recalculada agora.
    pub async fn get_business_page(&self, business_id: Uuid) -> Result<BusinessPage, AppError> {
        let business = self.get_business(business_id).await?;
        let products = self.repo.list_products(business_id).await?;
        let reviews = self.reviews.list_for_business(business_id).await?;

        Ok(BusinessPage {
            average_rating: average_rating(&reviews),
            review_count: reviews.len(),
            business,
            products,
            reviews,
        })
    }

    // =========================================================================
    //  POSSE
    // =========================================================================

    /// A empresa da conta logada.
    pub async fn business_of(&self, user: &User) -> Result<Business, AppError> {
        if !user.is_business() {
            return Err(AppError::BusinessAccountRequired);
        }
        self.repo
            .find_by_owner(user.id)
            .await?
            .ok_or(AppError::BusinessNotFound)
    }

    /// Garante que `user` é o dono de `business_id`.
    pub async fn ensure_owner(&self, user: &User, business_id: Uuid) -> Result<Business, AppError> {
        if !user.is_business() {
            return Err(AppError::BusinessAccountRequired);
        }
        let business = self.get_business(business_id).await?;
        if business.owner_id != user.id {
            return Err(AppError::NotBusinessOwner);
        }
        Ok(business)
    }

    // =========================================================================
    //  EDIÇÃO (DONO)
    // =========================================================================

    pub async fn update_business(
        &self,
        user: &User,
        business_id: Uuid,
        expected_version: i32,
        mut patch: BusinessPatch,
    ) -> Result<Business, AppError> {
        // Nome e categoria nunca ficam em branco
        patch.business_name = patch.business_name.map(|v| v.trim().to_string());
        patch.category = patch.category.map(|v| v.trim().to_string());
        patch.validate()?;

        self.ensure_owner(user, business_id).await?;
        let updated = self
            .repo
            .update_profile(business_id, expected_version, patch)
            .await?;

        tracing::info!("✏️ Perfil da empresa {} atualizado (versão {})", updated.id, updated.version);
        Ok(updated)
    }

    pub async fn add_product(
        &self,
        user: &User,
        business_id: Uuid,
        product: NewProduct,
    ) -> Result<Product, AppError> {
        self.ensure_owner(user, business_id).await?;
        self.repo.add_product(business_id, product).await
    }

    pub async fn remove_product(
        &self,
        user: &User,
        business_id: Uuid,
        product_id: Uuid,
    ) -> Result<(), AppError> {
        self.ensure_owner(user, business_id).await?;
        if !self.repo.remove_product(business_id, product_id).await? {
            return Err(AppError::ProductNotFound);
        }
        Ok(())
    }

    pub async fn find_product(&self, business_id: Uuid, product_id: Uuid) -> Result<Product, AppError> {
        self.repo
            .find_product(business_id, product_id)
            .await?
            .ok_or(AppError::ProductNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{new_business, World};
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn listing(name: &str, category: &str) -> Business {
        let now = Utc::now();
        Business {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            business_name: name.into(),
            description: String::new(),
            long_description: String::new(),
            location: String::new(),
            phone_number: String::new(),
            establishment_date: None,
            category: category.into(),
            images: vec![],
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn search_filters_compose_with_and() {
        let directory = vec![listing("Spice Hub", "food"), listing("Tech Shop", "technology")];

        let by_text = filter_businesses(&directory, "spice", None);
        assert_eq!(by_text.len(), 1);
        assert_eq!(by_text[0].business_name, "Spice Hub");

        let by_category = filter_businesses(&directory, "", Some("technology"));
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].business_name, "Tech Shop");

        assert!(filter_businesses(&directory, "shop", Some("food")).is_empty());
    }

    #[test]
    fn empty_query_without_category_returns_everything() {
        let directory = vec![listing("Spice Hub", "food"), listing("Tech Shop", "technology")];
        assert_eq!(filter_businesses(&directory, "", None).len(), 2);
    }

    #[test]
    fn query_is_matched_as_a_literal_substring() {
        let directory = vec![listing("Spice Hub", "food")];
        assert_eq!(filter_businesses(&directory, "HUB", None).len(), 1);
        assert!(filter_businesses(&directory, "hub ", None).is_empty());
    }

    #[tokio::test]
    async fn stale_version_is_rejected() {
        let world = World::new();
        let (owner, business) = world.business("loja@spice.com", new_business("Spice Hub", "food")).await;

        let patch = BusinessPatch { location: Some("Rua A, 10".into()), ..Default::default() };
        let updated = world
            .business_service
            .update_business(&owner, business.id, 1, patch.clone())
            .await
            .unwrap();
        assert_eq!(updated.version, 2);
        assert_eq!(updated.location, "Rua A, 10");

        // Segunda edição feita sobre a versão 1: conflito
        let err = world
            .business_service
            .update_business(&owner, business.id, 1, patch)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::StaleBusinessVersion { expected: 1, current: 2 }));
    }

    #[tokio::test]
    async fn blank_name_or_category_is_rejected_and_nothing_changes() {
        let world = World::new();
        let (owner, business) = world.business("loja@spice.com", new_business("Spice Hub", "food")).await;

        let patch = BusinessPatch {
            business_name: Some("".into()),
            category: Some("   ".into()),
            ..Default::default()
        };
        let err = world
            .business_service
            .update_business(&owner, business.id, 1, patch)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        let page = world.business_service.get_business_page(business.id).await.unwrap();
        assert_eq!(page.business.business_name, "Spice Hub");
        assert_eq!(page.business.version, 1);
        let food = world.business_service.search(None, Some("food")).await.unwrap();
        assert_eq!(food.len(), 1);
    }

    #[tokio::test]
    async fn only_the_owner_manages_products() {
        let world = World::new();
        let (owner, business) = world.business("loja@spice.com", new_business("Spice Hub", "food")).await;
        let (intruder, _) = world.business("outra@loja.com", new_business("Outra", "food")).await;
        let customer = world.customer("cliente@x.com").await;

        let product = NewProduct {
            name: "Samosa".into(),
            description: String::new(),
            price: Decimal::new(450, 2),
            image: String::new(),
        };

        let err = world
            .business_service
            .add_product(&intruder, business.id, product.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotBusinessOwner));

        let err = world
            .business_service
            .add_product(&customer, business.id, product.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BusinessAccountRequired));

        let created = world
            .business_service
            .add_product(&owner, business.id, product)
            .await
            .unwrap();
        world
            .business_service
            .remove_product(&owner, business.id, created.id)
            .await
            .unwrap();

        let err = world
            .business_service
            .remove_product(&owner, business.id, created.id)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ProductNotFound));
    }

    #[tokio::test]
    async fn categories_are_distinct_and_sorted() {
        let world = World::new();
        world.business("a@x.com", new_business("A", "technology")).await;
        world.business("b@x.com", new_business("B", "food")).await;
        world.business("c@x.com", new_business("C", "food")).await;

        let categories = world.business_service.list_categories().await.unwrap();
        assert_eq!(categories, vec!["food".to_string(), "technology".to_string()]);
    }
}
