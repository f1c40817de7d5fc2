// src/common/i18n.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Idiomas suportados pelo portal (os mesmos do front original).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    En,
    Pt,
    Es,
}

impl Lang {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "en" => Some(Lang::En),
            "pt" => Some(Lang::Pt),
            "es" => Some(Lang::Es),
            _ => None,
        }
    }
}

/// Conjunto fechado de chaves de mensagem voltadas ao usuário.
/// Nada de lookup por string solta: toda mensagem passa por aqui.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    ValidationFailed,
    IncompatibleSelection,
    InvalidUpload,
    DealerNotFound,
    QuoteNotFound,
    OrderNotFound,
    ServiceRequestNotFound,
    CatalogItemNotFound,
    QuoteNotPending,
    QuoteExpired,
    InvalidCredentials,
    InvalidToken,
    Forbidden,
    UpstreamUnavailable,
    MailNotConfigured,
    Unexpected,
}

impl MessageKey {
    /// Nome canônico da chave; é o fallback quando o catálogo não cobre a
    /// combinação (chave, idioma).
    pub fn canonical_name(&self) -> &'static str {
        match self {
            MessageKey::ValidationFailed => "validation_failed",
            MessageKey::IncompatibleSelection => "incompatible_selection",
            MessageKey::InvalidUpload => "invalid_upload",
            MessageKey::DealerNotFound => "dealer_not_found",
            MessageKey::QuoteNotFound => "quote_not_found",
            MessageKey::OrderNotFound => "order_not_found",
            MessageKey::ServiceRequestNotFound => "service_request_not_found",
            MessageKey::CatalogItemNotFound => "catalog_item_not_found",
            MessageKey::QuoteNotPending => "quote_not_pending",
            MessageKey::QuoteExpired => "quote_expired",
            MessageKey::InvalidCredentials => "invalid_credentials",
            MessageKey::InvalidToken => "invalid_token",
            MessageKey::Forbidden => "forbidden",
            MessageKey::UpstreamUnavailable => "upstream_unavailable",
            MessageKey::MailNotConfigured => "mail_not_configured",
            MessageKey::Unexpected => "unexpected_error",
        }
    }
}

/// Catálogo de traduções montado uma única vez no estado da aplicação.
#[derive(Clone)]
pub struct I18nStore {
    catalog: HashMap<(Lang, MessageKey), &'static str>,
}

impl I18nStore {
    pub fn new() -> Self {
        let mut catalog = HashMap::new();

        let entries: &[(MessageKey, &str, &str, &str)] = &[
            (
                MessageKey::ValidationFailed,
                "One or more fields are invalid.",
                "Um ou mais campos são inválidos.",
                "Uno o más campos no son válidos.",
            ),
            (
                MessageKey::IncompatibleSelection,
                "The selected item is not compatible with the chosen boat model",
                "O item selecionado não é compatível com o modelo de barco escolhido",
                "El artículo seleccionado no es compatible con el modelo de barco elegido",
            ),
            (
                MessageKey::InvalidUpload,
                "No filename or file body provided.",
                "Nome de arquivo ou conteúdo ausente.",
                "Falta el nombre o el contenido del archivo.",
            ),
            (
                MessageKey::DealerNotFound,
                "Dealer not found.",
                "Concessionária não encontrada.",
                "Concesionario no encontrado.",
            ),
            (
                MessageKey::QuoteNotFound,
                "Quote not found.",
                "Orçamento não encontrado.",
                "Cotización no encontrada.",
            ),
            (
                MessageKey::OrderNotFound,
                "Order not found.",
                "Pedido não encontrado.",
                "Pedido no encontrado.",
            ),
            (
                MessageKey::ServiceRequestNotFound,
                "Service request not found.",
                "Solicitação de assistência não encontrada.",
                "Solicitud de servicio no encontrada.",
            ),
            (
                MessageKey::CatalogItemNotFound,
                "Catalog item not found",
                "Item de catálogo não encontrado",
                "Artículo de catálogo no encontrado",
            ),
            (
                MessageKey::QuoteNotPending,
                "Only pending quotes can change status.",
                "Apenas orçamentos pendentes podem mudar de status.",
                "Solo las cotizaciones pendientes pueden cambiar de estado.",
            ),
            (
                MessageKey::QuoteExpired,
                "This quote has expired.",
                "Este orçamento expirou.",
                "Esta cotización ha expirado.",
            ),
            (
                MessageKey::InvalidCredentials,
                "Invalid e-mail or password.",
                "E-mail ou senha inválidos.",
                "Correo o contraseña inválidos.",
            ),
            (
                MessageKey::InvalidToken,
                "Missing or invalid authentication token.",
                "Token de autenticação inválido ou ausente.",
                "Token de autenticación inválido o ausente.",
            ),
            (
                MessageKey::Forbidden,
                "You do not have access to this resource.",
                "Você não tem acesso a este recurso.",
                "No tiene acceso a este recurso.",
            ),
            (
                MessageKey::UpstreamUnavailable,
                "The database is temporarily unavailable. Try again shortly.",
                "O banco de dados está temporariamente indisponível. Tente novamente em instantes.",
                "La base de datos no está disponible temporalmente. Inténtelo de nuevo en breve.",
            ),
            (
                MessageKey::MailNotConfigured,
                "E-mail dispatch is not configured.",
                "O envio de e-mail não está configurado.",
                "El envío de correo no está configurado.",
            ),
            (
                MessageKey::Unexpected,
                "An unexpected error occurred.",
                "Ocorreu um erro inesperado.",
                "Ocurrió un error inesperado.",
            ),
        ];

        for (key, en, pt, es) in entries {
            catalog.insert((Lang::En, *key), *en);
            catalog.insert((Lang::Pt, *key), *pt);
            catalog.insert((Lang::Es, *key), *es);
        }

        Self { catalog }
    }

    /// Resolve uma chave no idioma pedido. Fallback: inglês, depois o nome
    /// canônico da própria chave.
    pub fn translate(&self, key: MessageKey, lang: Lang) -> &'static str {
        self.catalog
            .get(&(lang, key))
            .or_else(|| self.catalog.get(&(Lang::En, key)))
            .copied()
            .unwrap_or_else(|| key.canonical_name())
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_known_keys_per_language() {
        let store = I18nStore::new();
        assert_eq!(
            store.translate(MessageKey::QuoteNotFound, Lang::Pt),
            "Orçamento não encontrado."
        );
        assert_eq!(
            store.translate(MessageKey::QuoteNotFound, Lang::En),
            "Quote not found."
        );
        assert_eq!(
            store.translate(MessageKey::QuoteNotFound, Lang::Es),
            "Cotización no encontrada."
        );
    }

    #[test]
    fn unknown_combination_falls_back_to_canonical_name() {
        let mut store = I18nStore::new();
        // Simula um catálogo sem cobertura para a chave.
        store.catalog.retain(|(_, key), _| *key != MessageKey::Forbidden);
        assert_eq!(store.translate(MessageKey::Forbidden, Lang::Pt), "forbidden");
    }

    #[test]
    fn lang_tag_parsing() {
        assert_eq!(Lang::from_tag("pt"), Some(Lang::Pt));
        assert_eq!(Lang::from_tag("de"), None);
    }
}
