// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use crate::common::i18n::Lang;

// Extrator de idioma: lê o Accept-Language e resolve para um `Lang` tipado.
// Nenhum estado global; o idioma viaja com a requisição.
pub struct Locale(pub Lang);

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let lang = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|header_value| header_value.to_str().ok())
            .and_then(|header_str| {
                accept_language::parse(header_str)
                    .iter()
                    .find_map(|tag_string| {
                        // "pt-BR" -> "pt"; "en" -> "en"
                        let primary = tag_string.split('-').next().unwrap_or(tag_string);
                        Lang::from_tag(primary)
                    })
            })
            .unwrap_or(Lang::En);

        Ok(Locale(lang))
    }
}
