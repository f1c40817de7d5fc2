// src/db/aftersales_repo.rs

use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::aftersales::{NewServiceRequest, SenderType, ServiceMessage, ServiceRequest},
};

// Repositório das solicitações de assistência e do histórico de mensagens.
#[derive(Clone)]
pub struct AftersalesRepository {
    pool: PgPool,
}

impl AftersalesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Upsert chaveado pelo request_id: reenvio da mesma solicitação
    /// atualiza o registro em vez de duplicá-lo.
    pub async fn upsert_request(
        &self,
        request: &NewServiceRequest,
    ) -> Result<ServiceRequest, AppError> {
        let saved = sqlx::query_as::<_, ServiceRequest>(
            "INSERT INTO service_requests ( \
                request_id, dealer_id, customer_name, customer_email, customer_phone, \
                customer_address, boat_model, hull_id, purchase_date, engine_hours, \
                request_type, issues, status \
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             ON CONFLICT (request_id) DO UPDATE SET \
                customer_name = EXCLUDED.customer_name, \
                customer_email = EXCLUDED.customer_email, \
                customer_phone = EXCLUDED.customer_phone, \
                customer_address = EXCLUDED.customer_address, \
                boat_model = EXCLUDED.boat_model, \
                hull_id = EXCLUDED.hull_id, \
                purchase_date = EXCLUDED.purchase_date, \
                engine_hours = EXCLUDED.engine_hours, \
                request_type = EXCLUDED.request_type, \
                issues = EXCLUDED.issues, \
                status = EXCLUDED.status \
             RETURNING *",
        )
        .bind(&request.request_id)
        .bind(request.dealer_id)
        .bind(&request.customer_name)
        .bind(&request.customer_email)
        .bind(&request.customer_phone)
        .bind(&request.customer_address)
        .bind(&request.boat_model)
        .bind(&request.hull_id)
        .bind(request.purchase_date)
        .bind(&request.engine_hours)
        .bind(&request.request_type)
        .bind(Json(&request.issues))
        .bind(&request.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    pub async fn fetch_all_raw(&self) -> Result<Vec<ServiceRequest>, sqlx::Error> {
        sqlx::query_as::<_, ServiceRequest>(
            "SELECT * FROM service_requests ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
    }

    pub async fn list_by_dealer(&self, dealer_id: Uuid) -> Result<Vec<ServiceRequest>, AppError> {
        let requests = sqlx::query_as::<_, ServiceRequest>(
            "SELECT * FROM service_requests WHERE dealer_id = $1 ORDER BY created_at DESC",
        )
        .bind(dealer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(requests)
    }

    pub async fn find_by_request_id(
        &self,
        request_id: &str,
    ) -> Result<Option<ServiceRequest>, AppError> {
        let request = sqlx::query_as::<_, ServiceRequest>(
            "SELECT * FROM service_requests WHERE request_id = $1",
        )
        .bind(request_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(request)
    }

    pub async fn update_status(&self, request_id: &str, status: &str) -> Result<(), AppError> {
        let result =
            sqlx::query("UPDATE service_requests SET status = $2 WHERE request_id = $1")
                .bind(request_id)
                .bind(status)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::ServiceRequestNotFound);
        }
        Ok(())
    }

    pub async fn delete(&self, request_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM service_requests WHERE request_id = $1")
            .bind(request_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::ServiceRequestNotFound);
        }
        Ok(())
    }

    // --- Mensagens ---

    pub async fn list_messages(
        &self,
        service_request_id: &str,
    ) -> Result<Vec<ServiceMessage>, AppError> {
        let messages = sqlx::query_as::<_, ServiceMessage>(
            "SELECT * FROM service_messages WHERE service_request_id = $1 ORDER BY created_at ASC",
        )
        .bind(service_request_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(messages)
    }

    pub async fn insert_message(
        &self,
        service_request_id: &str,
        sender_type: SenderType,
        sender_name: &str,
        message: &str,
    ) -> Result<ServiceMessage, AppError> {
        let saved = sqlx::query_as::<_, ServiceMessage>(
            "INSERT INTO service_messages (service_request_id, sender_type, sender_name, message) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(service_request_id)
        .bind(sender_type)
        .bind(sender_name)
        .bind(message)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    /// Marca como lidas as mensagens da outra ponta do diálogo.
    pub async fn mark_messages_read(
        &self,
        service_request_id: &str,
        reader: SenderType,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE service_messages SET read_at = NOW() \
             WHERE service_request_id = $1 AND sender_type <> $2 AND read_at IS NULL",
        )
        .bind(service_request_id)
        .bind(reader)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
