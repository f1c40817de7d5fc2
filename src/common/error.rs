// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::common::i18n::{I18nStore, Lang, MessageKey};
use crate::middleware::i18n::Locale;

// Erro interno da aplicação, com `thiserror` para melhor ergonomia.
// As variantes seguem as categorias do tratamento de erros: validação,
// não-encontrado, conflito, autenticação, transitório e inesperado.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Seleção incompatível: {0}")]
    IncompatibleSelection(String),

    #[error("Upload inválido")]
    InvalidUpload,

    #[error("Concessionária não encontrada")]
    DealerNotFound,

    #[error("Orçamento não encontrado")]
    QuoteNotFound,

    #[error("Pedido não encontrado")]
    OrderNotFound,

    #[error("Solicitação de assistência não encontrada")]
    ServiceRequestNotFound,

    #[error("Item de catálogo não encontrado: {0}")]
    CatalogItemNotFound(String),

    #[error("Orçamento não está pendente")]
    QuoteNotPending,

    #[error("Orçamento expirado")]
    QuoteExpired,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Acesso negado")]
    Forbidden,

    // Leituras em lote que esgotaram as tentativas (erro transitório do banco)
    #[error("Tabela '{0}' indisponível após novas tentativas")]
    UpstreamUnavailable(&'static str),

    #[error("Envio de e-mail não configurado")]
    MailNotConfigured,

    #[error("Falha no envio de e-mail: {0}")]
    MailError(String),

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    fn status_and_key(&self) -> (StatusCode, MessageKey) {
        match self {
            AppError::ValidationError(_) => (StatusCode::BAD_REQUEST, MessageKey::ValidationFailed),
            AppError::IncompatibleSelection(_) => {
                (StatusCode::BAD_REQUEST, MessageKey::IncompatibleSelection)
            }
            AppError::InvalidUpload => (StatusCode::BAD_REQUEST, MessageKey::InvalidUpload),
            AppError::DealerNotFound => (StatusCode::NOT_FOUND, MessageKey::DealerNotFound),
            AppError::QuoteNotFound => (StatusCode::NOT_FOUND, MessageKey::QuoteNotFound),
            AppError::OrderNotFound => (StatusCode::NOT_FOUND, MessageKey::OrderNotFound),
            AppError::ServiceRequestNotFound => {
                (StatusCode::NOT_FOUND, MessageKey::ServiceRequestNotFound)
            }
            AppError::CatalogItemNotFound(_) => {
                (StatusCode::NOT_FOUND, MessageKey::CatalogItemNotFound)
            }
            AppError::QuoteNotPending => (StatusCode::CONFLICT, MessageKey::QuoteNotPending),
            AppError::QuoteExpired => (StatusCode::CONFLICT, MessageKey::QuoteExpired),
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, MessageKey::InvalidCredentials)
            }
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, MessageKey::InvalidToken),
            AppError::Forbidden => (StatusCode::FORBIDDEN, MessageKey::Forbidden),
            AppError::UpstreamUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, MessageKey::UpstreamUnavailable)
            }
            AppError::MailNotConfigured => {
                (StatusCode::SERVICE_UNAVAILABLE, MessageKey::MailNotConfigured)
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, MessageKey::Unexpected),
        }
    }

    /// Converte o erro interno em uma resposta HTTP localizada.
    pub fn to_api_error(self, locale: &Locale, store: &I18nStore) -> ApiError {
        let (status, key) = self.status_and_key();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Erro interno do servidor: {}", self);
        }

        let base = store.translate(key, locale.0).to_string();

        match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                ApiError {
                    status,
                    message: base,
                    details: Some(json!(details)),
                }
            }
            AppError::IncompatibleSelection(item) | AppError::CatalogItemNotFound(item) => {
                ApiError {
                    status,
                    message: format!("{}: {}", base, item),
                    details: None,
                }
            }
            _ => ApiError {
                status,
                message: base,
                details: None,
            },
        }
    }

    /// Para contextos sem `Locale` (guards de rota e afins).
    pub fn to_api_error_default(self, store: &I18nStore) -> ApiError {
        self.to_api_error(&Locale(Lang::En), store)
    }
}

// Erro já localizado, pronto para virar resposta HTTP.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => Json(json!({
                "success": false,
                "error": self.message,
                "details": details,
            })),
            None => Json(json!({
                "success": false,
                "error": self.message,
            })),
        };
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let store = I18nStore::new();
        let api = AppError::QuoteNotFound.to_api_error(&Locale(Lang::En), &store);
        assert_eq!(api.status, StatusCode::NOT_FOUND);
        assert_eq!(api.message, "Quote not found.");
    }

    #[test]
    fn validation_error_lists_missing_fields() {
        use validator::Validate;

        #[derive(Validate)]
        struct Probe {
            #[validate(length(min = 1, message = "required"))]
            customer_name: String,
            #[validate(length(min = 1, message = "required"))]
            boat_model: String,
        }

        let errors = Probe {
            customer_name: String::new(),
            boat_model: String::new(),
        }
        .validate()
        .unwrap_err();

        let store = I18nStore::new();
        let api = AppError::ValidationError(errors).to_api_error(&Locale(Lang::Pt), &store);
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        let details = api.details.expect("detalhes da validação");
        assert_eq!(details["customer_name"][0], "required");
        assert_eq!(details["boat_model"][0], "required");
    }

    #[test]
    fn transient_exhaustion_is_503() {
        let store = I18nStore::new();
        let api = AppError::UpstreamUnavailable("orders").to_api_error(&Locale(Lang::En), &store);
        assert_eq!(api.status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
