// src/services/post_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::PostRepository,
    models::{
        auth::User,
        post::{NewPost, Post},
    },
    services::{auth::normalize_email, business_service::BusinessService},
};

pub const DEFAULT_POST_COLOR: &str = "#FFFFFF";

#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
    business_service: BusinessService,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>, business_service: BusinessService) -> Self {
        Self { repo, business_service }
    }

    /// Nome e e-mail da empresa vêm da conta logada, não do payload.
    pub async fn create_post(
        &self,
        owner: &User,
        title: &str,
        content: &str,
        color: Option<&str>,
    ) -> Result<Post, AppError> {
        let business = self.business_service.business_of(owner).await?;

        let (title, content) = (title.trim(), content.trim());
        if title.is_empty() || content.is_empty() {
            return Err(AppError::EmptyPost);
        }

        let post = self
            .repo
            .create_post(NewPost {
                business_id: business.id,
                title: title.to_string(),
                content: content.to_string(),
                company_name: business.business_name,
                company_email: owner.email.clone(),
                color: color.unwrap_or(DEFAULT_POST_COLOR).to_string(),
            })
            .await?;

        tracing::info!("📣 Post {} publicado por {}", post.id, post.company_email);
        Ok(post)
    }

    pub async fn list_by_company_email(&self, email: &str) -> Result<Vec<Post>, AppError> {
        self.repo.list_by_company_email(&normalize_email(email)).await
    }

    pub async fn list_for_business(&self, business_id: Uuid) -> Result<Vec<Post>, AppError> {
        // 404 para empresa inexistente, em vez de lista vazia
        self.business_service.get_business(business_id).await?;
        self.repo.list_by_business(business_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{new_business, World};

    #[tokio::test]
    async fn posts_are_found_by_email_and_by_business() {
        let world = World::new();
        let (owner, business) = world.business("loja@x.com", new_business("Spice Hub", "food")).await;

        world.post_service.create_post(&owner, "Promo", "2 por 1", None).await.unwrap();
        world
            .post_service
            .create_post(&owner, "Novidade", "Cardápio novo", Some("#FFB347"))
            .await
            .unwrap();

        let by_email = world.post_service.list_by_company_email("LOJA@x.com").await.unwrap();
        assert_eq!(by_email.len(), 2);
        assert_eq!(by_email[0].title, "Novidade"); // mais recente primeiro
        assert_eq!(by_email[0].color, "#FFB347");
        assert_eq!(by_email[1].color, DEFAULT_POST_COLOR);
        assert_eq!(by_email[1].company_name, "Spice Hub");

        let by_business = world.post_service.list_for_business(business.id).await.unwrap();
        assert_eq!(by_business.len(), 2);
    }

    #[tokio::test]
    async fn whitespace_only_title_or_content_is_rejected() {
        let world = World::new();
        let (owner, business) = world.business("loja@x.com", new_business("Spice Hub", "food")).await;

        let err = world
            .post_service
            .create_post(&owner, "   ", "  ", None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EmptyPost));

        let err = world
            .post_service
            .create_post(&owner, "Promo", "\n\t", None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EmptyPost));

        assert!(world.post_service.list_for_business(business.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn customers_cannot_post() {
        let world = World::new();
        let customer = world.customer("ana@x.com").await;

        let err = world
            .post_service
            .create_post(&customer, "Oi", "tudo bem?", None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BusinessAccountRequired));
    }
}
