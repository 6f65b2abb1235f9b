// src/common/i18n.rs

use std::{collections::HashMap, sync::Arc};

// Idioma usado quando o cliente pede algo que não temos
pub const DEFAULT_LANG: &str = "en";

type Catalog = HashMap<&'static str, &'static str>;

/// Catálogo de mensagens por idioma. As chaves são os códigos de erro do `AppError`.
/// Placeholders no formato `{nome}` são substituídos em `translate`.
#[derive(Clone)]
pub struct I18nStore {
    catalogs: Arc<HashMap<&'static str, Catalog>>,
}

impl I18nStore {
    pub fn new() -> Self {
        let mut catalogs = HashMap::new();
        catalogs.insert("en", english());
        catalogs.insert("pt", portuguese());
        Self { catalogs: Arc::new(catalogs) }
    }

    pub fn translate(&self, lang: &str, key: &str, args: &[(&str, String)]) -> String {
        let template = self
            .catalogs
            .get(lang)
            .and_then(|catalog| catalog.get(key))
            .or_else(|| self.catalogs.get(DEFAULT_LANG).and_then(|c| c.get(key)))
            .copied()
            .unwrap_or(key);

        args.iter().fold(template.to_string(), |msg, (name, value)| {
            msg.replace(&format!("{{{}}}", name), value)
        })
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}

fn english() -> Catalog {
    HashMap::from([
        ("validation_failed", "One or more fields are invalid."),
        ("email_already_exists", "This email is already in use."),
        ("invalid_credentials", "Invalid email or password."),
        ("invalid_token", "Authentication token is invalid or missing."),
        ("user_not_found", "User not found."),
        ("business_not_found", "Business not found."),
        ("product_not_found", "Product not found."),
        ("order_not_found", "Order not found."),
        ("business_account_required", "Only business accounts can perform this action."),
        ("customer_account_required", "Only customer accounts can perform this action."),
        ("not_business_owner", "You do not own this business."),
        ("invalid_rating", "Rating must be between 1 and 5 (got {rating})."),
        ("empty_review", "Please write a review before submitting."),
        ("empty_message", "Message text cannot be empty."),
        ("empty_post", "A post needs both a title and content."),
        ("self_conversation", "You cannot send a message to yourself."),
        (
            "stale_business_version",
            "This business was modified by someone else (expected version {expected}, current {current}). Reload and try again.",
        ),
        ("internal_error", "An unexpected error occurred."),
    ])
}

fn portuguese() -> Catalog {
    HashMap::from([
        ("validation_failed", "Um ou mais campos são inválidos."),
        ("email_already_exists", "Este e-mail já está em uso."),
        ("invalid_credentials", "E-mail ou senha inválidos."),
        ("invalid_token", "Token de autenticação inválido ou ausente."),
        ("user_not_found", "Usuário não encontrado."),
        ("business_not_found", "Empresa não encontrada."),
        ("product_not_found", "Produto não encontrado."),
        ("order_not_found", "Pedido não encontrado."),
        ("business_account_required", "Apenas contas empresariais podem realizar esta ação."),
        ("customer_account_required", "Apenas contas de cliente podem realizar esta ação."),
        ("not_business_owner", "Você não é o dono desta empresa."),
        ("invalid_rating", "A nota deve estar entre 1 e 5 (recebido {rating})."),
        ("empty_review", "Escreva uma avaliação antes de enviar."),
        ("empty_message", "A mensagem não pode estar vazia."),
        ("empty_post", "O post precisa de título e conteúdo."),
        ("self_conversation", "Você não pode enviar mensagens para si mesmo."),
        (
            "stale_business_version",
            "Esta empresa foi alterada por outra pessoa (versão esperada {expected}, atual {current}). Recarregue e tente novamente.",
        ),
        ("internal_error", "Ocorreu um erro inesperado."),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_english_for_unknown_locale() {
        let store = I18nStore::new();
        assert_eq!(
            store.translate("de", "order_not_found", &[]),
            "Order not found."
        );
    }

    #[test]
    fn fills_placeholders() {
        let store = I18nStore::new();
        let msg = store.translate("pt", "invalid_rating", &[("rating", "0".to_string())]);
        assert_eq!(msg, "A nota deve estar entre 1 e 5 (recebido 0).");
    }
}
