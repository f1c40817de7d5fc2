// src/handlers/auth.rs

use axum::{Json, extract::State, response::IntoResponse};
use validator::Validate;

use crate::{
    common::{
        error::{ApiError, AppError},
        response,
    },
    config::AppState,
    middleware::i18n::Locale,
    models::auth::{AdminLoginPayload, AuthResponse, DealerLoginPayload, Role},
};

// POST /api/auth/dealer-login
#[utoipa::path(
    post,
    path = "/api/auth/dealer-login",
    tag = "Auth",
    request_body = DealerLoginPayload,
    responses(
        (status = 200, description = "Login da concessionária", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn dealer_login(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<DealerLoginPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let (token, dealer) = app_state
        .auth_service
        .dealer_login(&payload.email, &payload.password)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(response::ok(AuthResponse {
        token,
        role: Role::Dealer,
        dealer: Some(dealer),
    }))
}

// POST /api/auth/admin-login
#[utoipa::path(
    post,
    path = "/api/auth/admin-login",
    tag = "Auth",
    request_body = AdminLoginPayload,
    responses(
        (status = 200, description = "Login do administrador", body = AuthResponse),
        (status = 401, description = "Senha inválida")
    )
)]
pub async fn admin_login(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<AdminLoginPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let token = app_state
        .auth_service
        .admin_login(&payload.password)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(response::ok(AuthResponse {
        token,
        role: Role::Admin,
        dealer: None,
    }))
}
