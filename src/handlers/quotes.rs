// src/handlers/quotes.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    common::{
        error::{ApiError, AppError},
        response,
    },
    config::AppState,
    middleware::{auth::CurrentDealer, i18n::Locale},
    models::quotes::{AcceptedQuote, CreateQuotePayload, Quote},
};

// POST /api/dealer/quotes
#[utoipa::path(
    post,
    path = "/api/dealer/quotes",
    tag = "Quotes",
    request_body = CreateQuotePayload,
    responses(
        (status = 201, description = "Orçamento criado", body = Quote),
        (status = 400, description = "Campos obrigatórios ausentes ou seleção incompatível"),
        (status = 404, description = "Item de catálogo inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_quote(
    State(app_state): State<AppState>,
    locale: Locale,
    dealer: CurrentDealer,
    Json(payload): Json<CreateQuotePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let quote = app_state
        .quote_service
        .create(&dealer.0, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(response::created(quote))
}

// GET /api/dealer/quotes
#[utoipa::path(
    get,
    path = "/api/dealer/quotes",
    tag = "Quotes",
    responses(
        (status = 200, description = "Orçamentos da concessionária", body = Vec<Quote>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_quotes(
    State(app_state): State<AppState>,
    locale: Locale,
    dealer: CurrentDealer,
) -> Result<impl IntoResponse, ApiError> {
    let quotes = app_state
        .quote_service
        .list_for_dealer(dealer.0.id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(response::ok(quotes))
}

// POST /api/dealer/quotes/{quote_id}/accept
#[utoipa::path(
    post,
    path = "/api/dealer/quotes/{quote_id}/accept",
    tag = "Quotes",
    params(
        ("quote_id" = String, Path, description = "Identificador exibível (QUO-...)")
    ),
    responses(
        (status = 200, description = "Orçamento aceito e pedido criado", body = AcceptedQuote),
        (status = 404, description = "Orçamento não encontrado; nenhum pedido é criado"),
        (status = 409, description = "Orçamento não-pendente ou expirado")
    ),
    security(("api_jwt" = []))
)]
pub async fn accept_quote(
    State(app_state): State<AppState>,
    locale: Locale,
    _dealer: CurrentDealer,
    Path(quote_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let accepted = app_state
        .quote_service
        .accept(&quote_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(response::ok(accepted))
}

// POST /api/dealer/quotes/{quote_id}/reject
#[utoipa::path(
    post,
    path = "/api/dealer/quotes/{quote_id}/reject",
    tag = "Quotes",
    params(
        ("quote_id" = String, Path, description = "Identificador exibível (QUO-...)")
    ),
    responses(
        (status = 200, description = "Orçamento rejeitado"),
        (status = 404, description = "Orçamento não encontrado"),
        (status = 409, description = "Orçamento não está pendente")
    ),
    security(("api_jwt" = []))
)]
pub async fn reject_quote(
    State(app_state): State<AppState>,
    locale: Locale,
    _dealer: CurrentDealer,
    Path(quote_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .quote_service
        .reject(&quote_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(response::ok(serde_json::json!({ "quoteId": quote_id, "status": "rejected" })))
}
