// src/handlers/orders.rs

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::{
        error::{ApiError, AppError},
        response,
    },
    config::AppState,
    middleware::{auth::CurrentDealer, i18n::Locale},
    models::orders::{CreateOrderPayload, Order, OrderStatus, OrderStatusUpdate},
};

// =============================================================================
//  ÁREA 1: CONCESSIONÁRIA
// =============================================================================

// POST /api/dealer/orders
#[utoipa::path(
    post,
    path = "/api/dealer/orders",
    tag = "Orders",
    request_body = CreateOrderPayload,
    responses(
        (status = 201, description = "Pedido criado", body = Order),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Item de catálogo inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    locale: Locale,
    dealer: CurrentDealer,
    Json(payload): Json<CreateOrderPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let order = app_state
        .order_service
        .create_direct(&dealer.0, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(response::created(order))
}

// GET /api/dealer/orders
#[utoipa::path(
    get,
    path = "/api/dealer/orders",
    tag = "Orders",
    responses(
        (status = 200, description = "Pedidos da concessionária", body = Vec<Order>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_orders(
    State(app_state): State<AppState>,
    locale: Locale,
    dealer: CurrentDealer,
) -> Result<impl IntoResponse, ApiError> {
    let orders = app_state
        .order_service
        .list_for_dealer(dealer.0.id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(response::ok(orders))
}

// =============================================================================
//  ÁREA 2: BACK OFFICE
// =============================================================================

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusPayload {
    #[schema(example = "production")]
    pub status: OrderStatus,
}

// PUT /api/admin/orders/{order_id}/status
#[utoipa::path(
    put,
    path = "/api/admin/orders/{order_id}/status",
    tag = "Orders",
    request_body = UpdateOrderStatusPayload,
    params(
        ("order_id" = String, Path, description = "Identificador exibível (ORD-...)")
    ),
    responses(
        (status = 200, description = "Status atualizado"),
        (status = 404, description = "Pedido não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_order_status(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(order_id): Path<String>,
    Json(payload): Json<UpdateOrderStatusPayload>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .order_service
        .update_status(&order_id, payload.status)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(response::ok(
        serde_json::json!({ "orderId": order_id, "status": payload.status }),
    ))
}

// PUT /api/admin/orders/status
#[utoipa::path(
    put,
    path = "/api/admin/orders/status",
    tag = "Orders",
    request_body = Vec<OrderStatusUpdate>,
    responses(
        (status = 200, description = "Status dos pedidos atualizados em lote")
    ),
    security(("api_jwt" = []))
)]
pub async fn bulk_update_order_status(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<Vec<OrderStatusUpdate>>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = app_state
        .order_service
        .bulk_update_status(&payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(response::ok(serde_json::json!({ "updated": updated })))
}
