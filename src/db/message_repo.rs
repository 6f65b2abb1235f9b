// src/db/message_repo.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::message::{ConversationSummary, Message},
};

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Cria a conversa se ainda não existir e anexa a mensagem.
    /// `participant_a`/`participant_b` chegam já ordenados.
    async fn append_message(
        &self,
        conversation_key: &str,
        participant_a: &str,
        participant_b: &str,
        sender: &str,
        text: &str,
    ) -> Result<Message, AppError>;

    /// Mensagens em ordem de envio.
    async fn list_messages(&self, conversation_key: &str) -> Result<Vec<Message>, AppError>;

    /// Conversas de que `email` participa, mais recentes primeiro.
    async fn list_conversations(&self, email: &str) -> Result<Vec<ConversationSummary>, AppError>;
}

#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Linha "achatada" da listagem: conversa + última mensagem (LATERAL JOIN)
#[derive(FromRow)]
struct ConversationRow {
    conversation_key: String,
    participant_a: String,
    participant_b: String,
    updated_at: DateTime<Utc>,
    last_id: Option<Uuid>,
    last_sender: Option<String>,
    last_text: Option<String>,
    last_sent_at: Option<DateTime<Utc>>,
}

impl ConversationRow {
    fn into_summary(self, email: &str) -> ConversationSummary {
        let with_email = if self.participant_a == email {
            self.participant_b
        } else {
            self.participant_a
        };

        let last_message = match (self.last_id, self.last_sender, self.last_text, self.last_sent_at) {
            (Some(id), Some(sender), Some(text), Some(sent_at)) => Some(Message {
                id,
                conversation_key: self.conversation_key.clone(),
                sender,
                text,
                sent_at,
            }),
            _ => None,
        };

        ConversationSummary {
            conversation_key: self.conversation_key,
            with_email,
            last_message,
            updated_at: self.updated_at,
        }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    async fn append_message(
        &self,
        conversation_key: &str,
        participant_a: &str,
        participant_b: &str,
        sender: &str,
        text: &str,
    ) -> Result<Message, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO conversations (conversation_key, participant_a, participant_b)
            VALUES ($1, $2, $3)
            ON CONFLICT (conversation_key) DO UPDATE SET updated_at = NOW()
            "#,
        )
        .bind(conversation_key)
        .bind(participant_a)
        .bind(participant_b)
        .execute(&mut *tx)
        .await?;

        // Uma linha por mensagem: envios simultâneos dos dois lados não se perdem
        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (id, conversation_key, sender, text)
            VALUES ($1, $2, $3, $4)
            RETURNING id, conversation_key, sender, text, sent_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(conversation_key)
        .bind(sender)
        .bind(text)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(message)
    }

    async fn list_messages(&self, conversation_key: &str) -> Result<Vec<Message>, AppError> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT id, conversation_key, sender, text, sent_at
            FROM messages
            WHERE conversation_key = $1
            ORDER BY sent_at ASC, seq ASC
            "#,
        )
        .bind(conversation_key)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    async fn list_conversations(&self, email: &str) -> Result<Vec<ConversationSummary>, AppError> {
        let rows = sqlx::query_as::<_, ConversationRow>(
            r#"
            SELECT
                c.conversation_key, c.participant_a, c.participant_b, c.updated_at,
                m.id AS last_id, m.sender AS last_sender,
                m.text AS last_text, m.sent_at AS last_sent_at
            FROM conversations c
            LEFT JOIN LATERAL (
                SELECT id, sender, text, sent_at
                FROM messages
                WHERE conversation_key = c.conversation_key
                ORDER BY sent_at DESC, seq DESC
                LIMIT 1
            ) m ON TRUE
            WHERE c.participant_a = $1 OR c.participant_b = $1
            ORDER BY c.updated_at DESC
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|row| row.into_summary(email)).collect())
    }
}
