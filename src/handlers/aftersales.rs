// src/handlers/aftersales.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    common::{
        error::{ApiError, AppError},
        response,
    },
    config::AppState,
    middleware::{
        auth::{AuthSession, CurrentDealer},
        i18n::Locale,
    },
    models::{
        aftersales::{
            CreateServiceMessagePayload, CreateServiceRequestPayload, SenderType, ServiceMessage,
            ServiceRequest, UpdateRequestStatusPayload,
        },
        auth::Role,
    },
};

// Nome exibido nas mensagens enviadas pelo back office.
const ADMIN_SENDER_NAME: &str = "Administrator";

// =============================================================================
//  ÁREA 1: SOLICITAÇÕES (CONCESSIONÁRIA)
// =============================================================================

// POST /api/dealer/service-requests
#[utoipa::path(
    post,
    path = "/api/dealer/service-requests",
    tag = "Aftersales",
    request_body = CreateServiceRequestPayload,
    responses(
        (status = 201, description = "Solicitação criada/atualizada", body = ServiceRequest),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_service_request(
    State(app_state): State<AppState>,
    locale: Locale,
    dealer: CurrentDealer,
    Json(payload): Json<CreateServiceRequestPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let request = app_state
        .aftersales_service
        .submit(&dealer.0, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(response::created(request))
}

// GET /api/dealer/service-requests
#[utoipa::path(
    get,
    path = "/api/dealer/service-requests",
    tag = "Aftersales",
    responses(
        (status = 200, description = "Solicitações da concessionária", body = Vec<ServiceRequest>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_service_requests(
    State(app_state): State<AppState>,
    locale: Locale,
    dealer: CurrentDealer,
) -> Result<impl IntoResponse, ApiError> {
    let requests = app_state
        .aftersales_service
        .list_for_dealer(dealer.0.id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(response::ok(requests))
}

// =============================================================================
//  ÁREA 2: SOLICITAÇÕES (BACK OFFICE)
// =============================================================================

// PUT /api/admin/service-requests/{request_id}/status
#[utoipa::path(
    put,
    path = "/api/admin/service-requests/{request_id}/status",
    tag = "Aftersales",
    request_body = UpdateRequestStatusPayload,
    params(
        ("request_id" = String, Path, description = "Identificador exibível (SR-...)")
    ),
    responses(
        (status = 200, description = "Status atualizado"),
        (status = 404, description = "Solicitação não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_request_status(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(request_id): Path<String>,
    Json(payload): Json<UpdateRequestStatusPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    app_state
        .aftersales_service
        .update_status(&request_id, &payload.status)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(response::ok(serde_json::json!({ "requestId": request_id })))
}

// DELETE /api/admin/service-requests/{request_id}
#[utoipa::path(
    delete,
    path = "/api/admin/service-requests/{request_id}",
    tag = "Aftersales",
    params(
        ("request_id" = String, Path, description = "Identificador exibível (SR-...)")
    ),
    responses(
        (status = 200, description = "Solicitação removida"),
        (status = 404, description = "Solicitação não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_service_request(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(request_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .aftersales_service
        .delete(&request_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(response::ok(serde_json::json!({ "deleted": request_id })))
}

// =============================================================================
//  ÁREA 3: MENSAGENS (ADMIN <-> CONCESSIONÁRIA)
// =============================================================================

// O remetente vem da sessão, nunca do corpo da requisição.
fn sender_from_session(session: &AuthSession) -> (SenderType, String) {
    match session.role {
        Role::Admin => (SenderType::Admin, ADMIN_SENDER_NAME.to_string()),
        Role::Dealer => (
            SenderType::Dealer,
            session
                .dealer
                .as_ref()
                .map(|dealer| dealer.name.clone())
                .unwrap_or_else(|| "Dealer".to_string()),
        ),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagesQuery {
    pub service_request_id: String,
}

// GET /api/service-messages?serviceRequestId=SR-...
#[utoipa::path(
    get,
    path = "/api/service-messages",
    tag = "Aftersales",
    params(
        ("serviceRequestId" = String, Query, description = "Identificador da solicitação")
    ),
    responses(
        (status = 200, description = "Histórico de mensagens", body = Vec<ServiceMessage>),
        (status = 404, description = "Solicitação não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_messages(
    State(app_state): State<AppState>,
    locale: Locale,
    _session: AuthSession,
    Query(query): Query<MessagesQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let messages = app_state
        .aftersales_service
        .list_messages(&query.service_request_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(response::ok(messages))
}

// POST /api/service-messages
#[utoipa::path(
    post,
    path = "/api/service-messages",
    tag = "Aftersales",
    request_body = CreateServiceMessagePayload,
    responses(
        (status = 201, description = "Mensagem registrada", body = ServiceMessage),
        (status = 404, description = "Solicitação não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn post_message(
    State(app_state): State<AppState>,
    locale: Locale,
    session: AuthSession,
    Json(payload): Json<CreateServiceMessagePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let (sender_type, sender_name) = sender_from_session(&session);

    let message = app_state
        .aftersales_service
        .post_message(
            &payload.service_request_id,
            sender_type,
            &sender_name,
            payload.message.trim(),
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(response::created(message))
}

// PUT /api/service-messages/{request_id}/read
#[utoipa::path(
    put,
    path = "/api/service-messages/{request_id}/read",
    tag = "Aftersales",
    params(
        ("request_id" = String, Path, description = "Identificador da solicitação")
    ),
    responses(
        (status = 200, description = "Mensagens da outra ponta marcadas como lidas"),
        (status = 404, description = "Solicitação não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn mark_messages_read(
    State(app_state): State<AppState>,
    locale: Locale,
    session: AuthSession,
    Path(request_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let (reader, _) = sender_from_session(&session);

    let marked = app_state
        .aftersales_service
        .mark_read(&request_id, reader)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(response::ok(serde_json::json!({ "markedRead": marked })))
}
