// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::auth::{Dealer, Role},
};

// Sessão autenticada, inserida nas extensions da requisição pelos guards.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub role: Role,
    pub dealer: Option<Dealer>,
}

async fn build_session(
    app_state: &AppState,
    headers: &HeaderMap,
) -> Result<AuthSession, AppError> {
    let auth_header = headers
        .get("Authorization")
        .and_then(|value| value.to_str().ok());

    let Some(token) = auth_header.and_then(|header| header.strip_prefix("Bearer ")) else {
        return Err(AppError::InvalidToken);
    };

    let claims = app_state.auth_service.validate_token(token)?;

    match claims.role {
        Role::Admin => Ok(AuthSession {
            role: Role::Admin,
            dealer: None,
        }),
        Role::Dealer => {
            let dealer_id = claims
                .sub
                .parse::<uuid::Uuid>()
                .map_err(|_| AppError::InvalidToken)?;
            let dealer = app_state
                .dealer_repo
                .find_by_id(dealer_id)
                .await?
                .ok_or(AppError::DealerNotFound)?;
            Ok(AuthSession {
                role: Role::Dealer,
                dealer: Some(dealer),
            })
        }
    }
}

/// Aceita qualquer sessão válida (admin ou concessionária).
pub async fn auth_guard(
    State(app_state): State<AppState>,
    locale: Locale,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session = build_session(&app_state, &request)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}

/// Exige sessão de administrador.
pub async fn admin_guard(
    State(app_state): State<AppState>,
    locale: Locale,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session = build_session(&app_state, &request)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    if session.role != Role::Admin {
        return Err(AppError::Forbidden.to_api_error(&locale, &app_state.i18n_store));
    }

    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}

/// Exige sessão de concessionária.
pub async fn dealer_guard(
    State(app_state): State<AppState>,
    locale: Locale,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session = build_session(&app_state, &request)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    if session.role != Role::Dealer {
        return Err(AppError::Forbidden.to_api_error(&locale, &app_state.i18n_store));
    }

    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}

impl FromRequestParts<AppState> for AuthSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthSession>()
            .cloned()
            .ok_or_else(|| AppError::InvalidToken.to_api_error_default(&state.i18n_store))
    }
}

// Extrator da concessionária autenticada, para os handlers do dealer.
pub struct CurrentDealer(pub Dealer);

impl FromRequestParts<AppState> for CurrentDealer {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthSession>()
            .and_then(|session| session.dealer.clone())
            .map(CurrentDealer)
            .ok_or_else(|| AppError::Forbidden.to_api_error_default(&state.i18n_store))
    }
}
