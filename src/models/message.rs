// src/models/message.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Mensagem com remetente explícito (nada de inferir pelo nome da chave)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    #[schema(example = "a@thrive.app&b@thrive.app")]
    pub conversation_key: String,
    #[schema(example = "a@thrive.app")]
    pub sender: String,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub conversation_key: String,
    pub participant_a: String,
    pub participant_b: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// O outro participante, do ponto de vista de `email`.
    pub fn counterpart(&self, email: &str) -> &str {
        if self.participant_a == email {
            &self.participant_b
        } else {
            &self.participant_a
        }
    }
}

// Item da lista de conversas (tela de DMs)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub conversation_key: String,
    pub with_email: String,
    pub last_message: Option<Message>,
    pub updated_at: DateTime<Utc>,
}
