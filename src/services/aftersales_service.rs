// src/services/aftersales_service.rs

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::{error::AppError, ids},
    db::AftersalesRepository,
    models::{
        aftersales::{
            CreateServiceRequestPayload, NewServiceRequest, SenderType, ServiceMessage,
            ServiceRequest,
        },
        auth::Dealer,
    },
    services::notification_service::NotificationService,
};

// Status assumido quando a solicitação chega sem um.
const DEFAULT_REQUEST_STATUS: &str = "open";

#[derive(Clone)]
pub struct AftersalesService {
    repo: AftersalesRepository,
    notifications: NotificationService,
}

impl AftersalesService {
    pub fn new(repo: AftersalesRepository, notifications: NotificationService) -> Self {
        Self {
            repo,
            notifications,
        }
    }

    /// Cria ou atualiza (reenvio com o mesmo request_id) uma solicitação.
    pub async fn submit(
        &self,
        dealer: &Dealer,
        payload: CreateServiceRequestPayload,
    ) -> Result<ServiceRequest, AppError> {
        let request_id = payload
            .request_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| ids::generate_service_request_id(Utc::now()));

        let request = NewServiceRequest {
            request_id,
            dealer_id: dealer.id,
            customer_name: payload.customer_name,
            customer_email: payload.customer_email,
            customer_phone: payload.customer_phone,
            customer_address: payload.customer_address,
            boat_model: payload.boat_model,
            hull_id: payload.hull_id,
            purchase_date: payload.purchase_date,
            engine_hours: payload.engine_hours,
            request_type: payload.request_type,
            issues: payload.issues,
            status: normalize_status(payload.status),
        };

        let saved = self.repo.upsert_request(&request).await?;
        tracing::info!(
            "Solicitação {} registrada pela concessionária {}",
            saved.request_id,
            dealer.name
        );

        self.notifications
            .send_best_effort(
                &format!("Nova solicitação de assistência {}", saved.request_id),
                &format!(
                    "{} abriu a solicitação {} para o barco {} (casco {}), {} problema(s) relatado(s).",
                    dealer.name,
                    saved.request_id,
                    saved.boat_model,
                    saved.hull_id,
                    saved.issues().len()
                ),
            )
            .await;

        Ok(saved)
    }

    pub async fn list_for_dealer(&self, dealer_id: Uuid) -> Result<Vec<ServiceRequest>, AppError> {
        self.repo.list_by_dealer(dealer_id).await
    }

    pub async fn update_status(&self, request_id: &str, status: &str) -> Result<(), AppError> {
        self.repo
            .update_status(request_id, &normalize_status(Some(status.to_string())))
            .await
    }

    pub async fn delete(&self, request_id: &str) -> Result<(), AppError> {
        self.repo.delete(request_id).await
    }

    // --- Histórico de mensagens ---

    pub async fn list_messages(
        &self,
        service_request_id: &str,
    ) -> Result<Vec<ServiceMessage>, AppError> {
        self.ensure_request_exists(service_request_id).await?;
        self.repo.list_messages(service_request_id).await
    }

    pub async fn post_message(
        &self,
        service_request_id: &str,
        sender_type: SenderType,
        sender_name: &str,
        message: &str,
    ) -> Result<ServiceMessage, AppError> {
        self.ensure_request_exists(service_request_id).await?;
        self.repo
            .insert_message(service_request_id, sender_type, sender_name, message)
            .await
    }

    /// Marca como lidas as mensagens da outra ponta do diálogo.
    pub async fn mark_read(
        &self,
        service_request_id: &str,
        reader: SenderType,
    ) -> Result<u64, AppError> {
        self.ensure_request_exists(service_request_id).await?;
        self.repo
            .mark_messages_read(service_request_id, reader)
            .await
    }

    async fn ensure_request_exists(&self, request_id: &str) -> Result<(), AppError> {
        self.repo
            .find_by_request_id(request_id)
            .await?
            .map(|_| ())
            .ok_or(AppError::ServiceRequestNotFound)
    }
}

/// Normalização explícita do status: minúsculas, e `open` quando ausente
/// ou em branco.
fn normalize_status(status: Option<String>) -> String {
    match status {
        Some(raw) if !raw.trim().is_empty() => raw.trim().to_lowercase(),
        _ => DEFAULT_REQUEST_STATUS.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_lowercased() {
        assert_eq!(normalize_status(Some("In_Progress".to_string())), "in_progress");
        assert_eq!(normalize_status(Some("OPEN".to_string())), "open");
    }

    #[test]
    fn missing_or_blank_status_defaults_to_open() {
        assert_eq!(normalize_status(None), "open");
        assert_eq!(normalize_status(Some("  ".to_string())), "open");
    }
}
