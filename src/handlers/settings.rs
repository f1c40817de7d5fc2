// src/handlers/settings.rs

use axum::{Json, extract::State, response::IntoResponse};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::{
        error::{ApiError, AppError},
        response,
    },
    config::AppState,
    db::settings_repo::NOTIFICATION_EMAIL_KEY,
    middleware::i18n::Locale,
    models::settings::{ChangePasswordPayload, NotificationEmailPayload, NotificationEmailResponse},
};

// PUT /api/admin/settings/password
#[utoipa::path(
    put,
    path = "/api/admin/settings/password",
    tag = "Settings",
    request_body = ChangePasswordPayload,
    responses(
        (status = 200, description = "Senha do administrador trocada"),
        (status = 401, description = "Senha atual incorreta")
    ),
    security(("api_jwt" = []))
)]
pub async fn change_admin_password(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<ChangePasswordPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    app_state
        .auth_service
        .change_admin_password(&payload.current_password, &payload.new_password)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(response::ok(serde_json::json!({ "changed": true })))
}

// GET /api/admin/settings/notification-email
#[utoipa::path(
    get,
    path = "/api/admin/settings/notification-email",
    tag = "Settings",
    responses(
        (status = 200, description = "E-mail de notificação configurado", body = NotificationEmailResponse)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_notification_email(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let email = app_state
        .settings_repo
        .notification_email()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(response::ok(NotificationEmailResponse { email }))
}

// PUT /api/admin/settings/notification-email
#[utoipa::path(
    put,
    path = "/api/admin/settings/notification-email",
    tag = "Settings",
    request_body = NotificationEmailPayload,
    responses(
        (status = 200, description = "E-mail de notificação atualizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_notification_email(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<NotificationEmailPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    app_state
        .settings_repo
        .upsert(NOTIFICATION_EMAIL_KEY, &payload.email)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(response::ok(serde_json::json!({ "email": payload.email })))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Atualização do pedido ORD-20260808-4821")]
    pub subject: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "O pedido entrou em produção.")]
    pub body: String,
}

// POST /api/admin/notifications
#[utoipa::path(
    post,
    path = "/api/admin/notifications",
    tag = "Settings",
    request_body = SendNotificationPayload,
    responses(
        (status = 200, description = "E-mail enviado"),
        (status = 503, description = "Envio de e-mail não configurado")
    ),
    security(("api_jwt" = []))
)]
pub async fn send_notification(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<SendNotificationPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    app_state
        .notification_service
        .send(&payload.subject, &payload.body)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(response::ok(serde_json::json!({ "sent": true })))
}
