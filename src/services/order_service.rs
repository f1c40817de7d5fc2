// src/services/order_service.rs

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::{error::AppError, ids},
    db::OrderRepository,
    models::{
        auth::Dealer,
        orders::{
            CreateOrderPayload, DEFAULT_PAYMENT_METHOD, NewOrder, Order, OrderStatus,
            OrderStatusUpdate,
        },
    },
    services::{notification_service::NotificationService, pricing_service::PricingService},
};

#[derive(Clone)]
pub struct OrderService {
    order_repo: OrderRepository,
    pricing: PricingService,
    notifications: NotificationService,
}

impl OrderService {
    pub fn new(
        order_repo: OrderRepository,
        pricing: PricingService,
        notifications: NotificationService,
    ) -> Self {
        Self {
            order_repo,
            pricing,
            notifications,
        }
    }

    /// Pedido direto, sem passar por orçamento. Mesma validação e mesmo
    /// cálculo de totais no servidor.
    pub async fn create_direct(
        &self,
        dealer: &Dealer,
        payload: CreateOrderPayload,
    ) -> Result<Order, AppError> {
        let config = self.pricing.dealer_config(Some(dealer.id), None).await?;
        let resolved = crate::services::pricing_service::resolve_configuration(
            &config,
            &payload.boat_model,
            &payload.engine_package,
            &payload.hull_color,
            &payload.additional_options,
        )?;

        let now = Utc::now();
        let order = NewOrder {
            order_id: ids::generate_order_id(now),
            dealer_id: dealer.id,
            customer_name: payload.customer_name,
            customer_email: payload.customer_email,
            customer_phone: payload.customer_phone,
            customer_address: payload.customer_address,
            customer_city: payload.customer_city,
            customer_state: payload.customer_state,
            customer_zip: payload.customer_zip,
            customer_country: payload.customer_country,
            boat_model: payload.boat_model,
            engine_package: payload.engine_package,
            hull_color: payload.hull_color,
            additional_options: resolved.selection.additional_options,
            payment_method: payload
                .payment_method
                .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string()),
            deposit_amount: payload.deposit_amount,
            additional_notes: payload.additional_notes,
            total_usd: resolved.totals.total_usd,
            total_brl: resolved.totals.total_brl,
            status: OrderStatus::Pending,
        };

        let saved = self.order_repo.insert(&order).await?;
        tracing::info!(
            "Pedido {} criado para a concessionária {}",
            saved.order_id,
            dealer.name
        );

        self.notifications
            .send_best_effort(
                &format!("Novo pedido {}", saved.order_id),
                &format!(
                    "Pedido {} criado por {} para {} ({} / {}).",
                    saved.order_id,
                    dealer.name,
                    saved.customer_name,
                    saved.boat_model,
                    saved.engine_package
                ),
            )
            .await;

        Ok(saved)
    }

    pub async fn list_for_dealer(&self, dealer_id: Uuid) -> Result<Vec<Order>, AppError> {
        self.order_repo.list_by_dealer(dealer_id).await
    }

    /// Troca direta de status; não há grafo de transições: qualquer status
    /// é alcançável a partir de qualquer outro.
    pub async fn update_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<(), AppError> {
        self.order_repo.update_status(order_id, status).await
    }

    /// Salvamento em lote: pedidos inexistentes são registrados em log e
    /// pulados, os demais seguem.
    pub async fn bulk_update_status(
        &self,
        updates: &[OrderStatusUpdate],
    ) -> Result<u64, AppError> {
        let mut updated = 0u64;
        for update in updates {
            match self
                .order_repo
                .update_status(&update.order_id, update.status)
                .await
            {
                Ok(()) => updated += 1,
                Err(AppError::OrderNotFound) => {
                    tracing::warn!("Pedido {} não encontrado no salvamento em lote", update.order_id);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(updated)
    }
}
