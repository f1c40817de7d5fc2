// src/handlers/catalog.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::{ApiError, AppError},
        response,
    },
    config::AppState,
    middleware::{auth::CurrentDealer, i18n::Locale},
    models::{
        auth::DealerInput,
        catalog::{CatalogItemInput, DealerConfig, DealerPricingInput, ItemType},
    },
    services::catalog_service::AdminData,
};

// =============================================================================
//  ÁREA 1: CONFIGURAÇÃO DA CONCESSIONÁRIA
// =============================================================================

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealerConfigQuery {
    // Com um modelo selecionado, motores e cascos voltam já filtrados.
    pub boat_model: Option<String>,
}

// GET /api/dealer/config?boatModel=...
#[utoipa::path(
    get,
    path = "/api/dealer/config",
    tag = "Catalog",
    params(
        ("boatModel" = Option<String>, Query, description = "Filtra motores e cascos compatíveis com o modelo")
    ),
    responses(
        (status = 200, description = "Catálogo com preços efetivos da concessionária", body = DealerConfig)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_dealer_config(
    State(app_state): State<AppState>,
    locale: Locale,
    dealer: CurrentDealer,
    axum::extract::Query(query): axum::extract::Query<DealerConfigQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let config = app_state
        .pricing_service
        .dealer_config(Some(dealer.0.id), query.boat_model.as_deref())
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(response::ok(config))
}

// PUT /api/dealer/pricing
#[utoipa::path(
    put,
    path = "/api/dealer/pricing",
    tag = "Catalog",
    request_body = Vec<DealerPricingInput>,
    responses(
        (status = 200, description = "Sobreposições de preço gravadas")
    ),
    security(("api_jwt" = []))
)]
pub async fn save_dealer_pricing(
    State(app_state): State<AppState>,
    locale: Locale,
    dealer: CurrentDealer,
    Json(payload): Json<Vec<DealerPricingInput>>,
) -> Result<impl IntoResponse, ApiError> {
    let saved = app_state
        .catalog_service
        .save_dealer_pricing(dealer.0.id, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(response::ok(saved))
}

// =============================================================================
//  ÁREA 2: BACK OFFICE (CATÁLOGO E CONCESSIONÁRIAS)
// =============================================================================

// GET /api/admin/data
#[utoipa::path(
    get,
    path = "/api/admin/data",
    tag = "Admin",
    responses(
        (status = 200, description = "Fotografia completa do back office", body = AdminData),
        (status = 503, description = "Banco indisponível após novas tentativas")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_admin_data(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let data = app_state
        .catalog_service
        .admin_data()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(response::ok(data))
}

// PUT /api/admin/catalog/{kind}
#[utoipa::path(
    put,
    path = "/api/admin/catalog/{kind}",
    tag = "Admin",
    request_body = Vec<CatalogItemInput>,
    params(
        ("kind" = ItemType, Path, description = "Tabela de catálogo alvo")
    ),
    responses(
        (status = 200, description = "Tabela atualizada após o salvamento em lote")
    ),
    security(("api_jwt" = []))
)]
pub async fn save_catalog(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(kind): Path<ItemType>,
    Json(payload): Json<Vec<CatalogItemInput>>,
) -> Result<impl IntoResponse, ApiError> {
    for item in &payload {
        item.validate().map_err(|e| {
            AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store)
        })?;
    }

    let items = app_state
        .catalog_service
        .save_catalog(kind, &payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(response::ok(items))
}

// DELETE /api/admin/catalog/{kind}/{id}
#[utoipa::path(
    delete,
    path = "/api/admin/catalog/{kind}/{id}",
    tag = "Admin",
    params(
        ("kind" = ItemType, Path, description = "Tabela de catálogo alvo"),
        ("id" = i32, Path, description = "ID do item")
    ),
    responses(
        (status = 200, description = "Item removido"),
        (status = 404, description = "Item não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_catalog_item(
    State(app_state): State<AppState>,
    locale: Locale,
    Path((kind, id)): Path<(ItemType, i32)>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .catalog_service
        .delete_item(kind, id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(response::ok(serde_json::json!({ "deleted": id })))
}

// PUT /api/admin/dealers
#[utoipa::path(
    put,
    path = "/api/admin/dealers",
    tag = "Admin",
    request_body = Vec<DealerInput>,
    responses(
        (status = 200, description = "Concessionárias salvas/atualizadas (upsert por e-mail)")
    ),
    security(("api_jwt" = []))
)]
pub async fn save_dealers(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<Vec<DealerInput>>,
) -> Result<impl IntoResponse, ApiError> {
    for dealer in &payload {
        dealer.validate().map_err(|e| {
            AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store)
        })?;
    }

    let dealers = app_state
        .catalog_service
        .save_dealers(payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(response::ok(dealers))
}

// DELETE /api/admin/dealers/{id}
#[utoipa::path(
    delete,
    path = "/api/admin/dealers/{id}",
    tag = "Admin",
    params(
        ("id" = Uuid, Path, description = "ID da concessionária")
    ),
    responses(
        (status = 200, description = "Concessionária removida"),
        (status = 404, description = "Concessionária não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_dealer(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .catalog_service
        .delete_dealer(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(response::ok(serde_json::json!({ "deleted": id })))
}
