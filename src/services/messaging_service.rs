// src/services/messaging_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::{MessageRepository, UserRepository},
    models::message::{ConversationSummary, Message},
    services::auth::normalize_email,
};

/// Chave da conversa: os dois e-mails em ordem lexicográfica, unidos por `&`.
/// Simétrica: `conversation_key(a, b) == conversation_key(b, a)`.
pub fn conversation_key(a: &str, b: &str) -> String {
    let (first, second) = ordered(a, b);
    format!("{}&{}", first, second)
}

fn ordered<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b { (a, b) } else { (b, a) }
}

#[derive(Clone)]
pub struct MessagingService {
    repo: Arc<dyn MessageRepository>,
    users: Arc<dyn UserRepository>,
}

impl MessagingService {
    pub fn new(repo: Arc<dyn MessageRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { repo, users }
    }

    pub async fn send_message(
        &self,
        sender: &str,
        recipient: &str,
        text: &str,
    ) -> Result<Message, AppError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::EmptyMessage);
        }

        let sender = normalize_email(sender);
        let recipient = normalize_email(recipient);
        if sender == recipient {
            return Err(AppError::SelfConversation);
        }

        if self.users.find_by_email(&recipient).await?.is_none() {
            return Err(AppError::UserNotFound);
        }

        let key = conversation_key(&sender, &recipient);
        let (participant_a, participant_b) = ordered(&sender, &recipient);

        self.repo
            .append_message(&key, participant_a, participant_b, &sender, text)
            .await
    }

    pub async fn list_conversations(&self, email: &str) -> Result<Vec<ConversationSummary>, AppError> {
        self.repo.list_conversations(&normalize_email(email)).await
    }

    /// Mensagens entre `email` e `other` em ordem de envio (vazio se ainda não conversaram).
    pub async fn get_conversation(&self, email: &str, other: &str) -> Result<Vec<Message>, AppError> {
        let key = conversation_key(&normalize_email(email), &normalize_email(other));
        self.repo.list_messages(&key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::World;

    #[test]
    fn conversation_key_is_symmetric() {
        assert_eq!(
            conversation_key("x@a.com", "y@b.com"),
            conversation_key("y@b.com", "x@a.com")
        );
        assert_eq!(conversation_key("y@b.com", "x@a.com"), "x@a.com&y@b.com");
    }

    #[tokio::test]
    async fn first_message_creates_the_conversation_and_later_ones_append() {
        let world = World::new();
        world.customer("ana@x.com").await;
        world.customer("bia@x.com").await;
        let messaging = &world.messaging_service;

        messaging.send_message("ana@x.com", "bia@x.com", "oi!").await.unwrap();
        messaging.send_message("bia@x.com", "ana@x.com", "olá").await.unwrap();

        let thread = messaging.get_conversation("bia@x.com", "ana@x.com").await.unwrap();
        let lines: Vec<(&str, &str)> = thread
            .iter()
            .map(|m| (m.sender.as_str(), m.text.as_str()))
            .collect();
        assert_eq!(lines, vec![("ana@x.com", "oi!"), ("bia@x.com", "olá")]);

        let ana = messaging.list_conversations("ana@x.com").await.unwrap();
        assert_eq!(ana.len(), 1);
        assert_eq!(ana[0].with_email, "bia@x.com");
        assert_eq!(ana[0].last_message.as_ref().map(|m| m.text.as_str()), Some("olá"));
    }

    #[tokio::test]
    async fn conversations_are_listed_only_for_participants() {
        let world = World::new();
        for email in ["ana@x.com", "bia@x.com", "caio@x.com"] {
            world.customer(email).await;
        }
        world
            .messaging_service
            .send_message("ana@x.com", "bia@x.com", "oi")
            .await
            .unwrap();

        let caio = world.messaging_service.list_conversations("caio@x.com").await.unwrap();
        assert!(caio.is_empty());
    }

    #[tokio::test]
    async fn rejects_blank_text_self_messages_and_unknown_recipients() {
        let world = World::new();
        world.customer("ana@x.com").await;
        let messaging = &world.messaging_service;

        let err = messaging.send_message("ana@x.com", "ana@x.com", "oi").await.unwrap_err();
        assert!(matches!(err, AppError::SelfConversation));

        let err = messaging.send_message("ana@x.com", "ninguem@x.com", "   ").await.unwrap_err();
        assert!(matches!(err, AppError::EmptyMessage));

        let err = messaging.send_message("ana@x.com", "ninguem@x.com", "oi").await.unwrap_err();
        assert!(matches!(err, AppError::UserNotFound));
    }
}
