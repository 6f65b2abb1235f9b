// src/services/review_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BusinessRepository, ReviewRepository},
    models::{
        auth::User,
        review::{NewReview, Review},
    },
};

/// Média aritmética das notas. Sem avaliações, 0.0.
pub fn average_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let sum: i64 = reviews.iter().map(|r| i64::from(r.rating)).sum();
    sum as f64 / reviews.len() as f64
}

/// Parte do e-mail antes do `@`.
pub fn default_username(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

#[derive(Clone)]
pub struct ReviewService {
    repo: Arc<dyn ReviewRepository>,
    businesses: Arc<dyn BusinessRepository>,
}

impl ReviewService {
    pub fn new(repo: Arc<dyn ReviewRepository>, businesses: Arc<dyn BusinessRepository>) -> Self {
        Self { repo, businesses }
    }

    pub async fn submit_review(
        &self,
        author: &User,
        business_id: Uuid,
        rating: i16,
        text: &str,
        username: Option<&str>,
    ) -> Result<Review, AppError> {
        if author.is_business() {
            return Err(AppError::CustomerAccountRequired);
        }
        // Nota 0 significa "não escolheu estrelas"
        if !(1..=5).contains(&rating) {
            return Err(AppError::InvalidRating(rating));
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::EmptyReview);
        }

        if self.businesses.find_by_id(business_id).await?.is_none() {
            return Err(AppError::BusinessNotFound);
        }

        let username = username
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_string)
            .or_else(|| author.display_name.clone())
            .unwrap_or_else(|| default_username(&author.email));

        self.repo
            .append_review(NewReview {
                business_id,
                author_id: author.id,
                username,
                rating,
                review: text.to_string(),
            })
            .await
    }

    pub async fn list_reviews(&self, business_id: Uuid) -> Result<Vec<Review>, AppError> {
        if self.businesses.find_by_id(business_id).await?.is_none() {
            return Err(AppError::BusinessNotFound);
        }
        self.repo.list_for_business(business_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{new_business, World};
    use chrono::Utc;

    fn rated(rating: i16) -> Review {
        Review {
            id: Uuid::new_v4(),
            business_id: Uuid::nil(),
            author_id: Uuid::nil(),
            username: "x".into(),
            rating,
            review: "ok".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn average_of_five_three_four_is_four() {
        let reviews = vec![rated(5), rated(3), rated(4)];
        assert_eq!(average_rating(&reviews), 4.0);
    }

    #[test]
    fn average_of_nothing_is_zero() {
        assert_eq!(average_rating(&[]), 0.0);
    }

    #[test]
    fn username_defaults_to_email_prefix() {
        assert_eq!(default_username("maria.silva@example.com"), "maria.silva");
    }

    #[tokio::test]
    async fn zero_rating_and_blank_text_do_not_mutate() {
        let world = World::new();
        let (_, business) = world.business("loja@x.com", new_business("Loja", "food")).await;
        let customer = world.customer("cliente@x.com").await;

        let err = world
            .review_service
            .submit_review(&customer, business.id, 0, "ótimo", None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidRating(0)));

        let err = world
            .review_service
            .submit_review(&customer, business.id, 4, "   ", None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EmptyReview));

        let reviews = world.review_service.list_reviews(business.id).await.unwrap();
        assert!(reviews.is_empty());
    }

    #[tokio::test]
    async fn submitted_reviews_feed_the_business_page_average() {
        let world = World::new();
        let (_, business) = world.business("loja@x.com", new_business("Loja", "food")).await;
        let customer = world.customer("joana@x.com").await;

        for (rating, text) in [(5, "excelente"), (3, "ok"), (4, "bom")] {
            world
                .review_service
                .submit_review(&customer, business.id, rating, text, None)
                .await
                .unwrap();
        }

        let page = world.business_service.get_business_page(business.id).await.unwrap();
        assert_eq!(page.review_count, 3);
        assert_eq!(page.average_rating, 4.0);
        assert_eq!(page.reviews[0].username, "joana");
    }

    #[tokio::test]
    async fn reviewing_a_missing_business_is_not_found() {
        let world = World::new();
        let customer = world.customer("cliente@x.com").await;

        let err = world
            .review_service
            .submit_review(&customer, Uuid::new_v4(), 5, "top", None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BusinessNotFound));
    }
}
