// src/models/aftersales.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "sender_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SenderType {
    Admin,
    Dealer,
}

// --- Structs ---

// Um problema relatado na solicitação: descrição + foto opcional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceIssue {
    #[schema(example = "Gelcoat trincado na popa")]
    pub description: String,

    #[schema(example = "/uploads/casco-1234.jpg")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub id: i32,

    #[schema(example = "SR-20260808-4821")]
    pub request_id: String,

    pub dealer_id: Uuid,

    #[schema(example = "Maria da Silva")]
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: Option<String>,

    #[schema(example = "Drakkar 240 CC")]
    pub boat_model: String,

    #[schema(example = "BR-DKK24017J626")]
    pub hull_id: String,

    #[schema(value_type = String, format = Date, example = "2025-11-20")]
    pub purchase_date: NaiveDate,

    #[schema(example = "120")]
    pub engine_hours: Option<String>,

    #[schema(example = "warranty")]
    pub request_type: String,

    #[schema(value_type = Vec<ServiceIssue>)]
    pub issues: Json<Vec<ServiceIssue>>,

    #[schema(example = "open")]
    pub status: String,

    pub created_at: DateTime<Utc>,
}

impl ServiceRequest {
    /// Leitura dos problemas relatados; nunca altera o registro.
    pub fn issues(&self) -> &[ServiceIssue] {
        &self.issues.0
    }
}

// Dados enviados pela concessionária. Com request_id presente, o reenvio
// atualiza a solicitação existente.
#[derive(Debug, Deserialize, validator::Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRequestPayload {
    #[schema(example = "SR-20260808-4821")]
    pub request_id: Option<String>,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Maria da Silva")]
    pub customer_name: String,

    #[validate(length(min = 1, message = "required"), email(message = "invalid_email"))]
    #[schema(example = "maria@email.com")]
    pub customer_email: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "+55 11 99999-0000")]
    pub customer_phone: String,

    pub customer_address: Option<String>,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Drakkar 240 CC")]
    pub boat_model: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "BR-DKK24017J626")]
    pub hull_id: String,

    #[schema(value_type = String, format = Date, example = "2025-11-20")]
    pub purchase_date: NaiveDate,

    #[schema(example = "120")]
    pub engine_hours: Option<String>,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "warranty")]
    pub request_type: String,

    #[serde(default)]
    pub issues: Vec<ServiceIssue>,

    #[schema(example = "open")]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, validator::Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceMessagePayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "SR-20260808-4821")]
    pub service_request_id: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Peça enviada, previsão de chegada em 5 dias úteis.")]
    pub message: String,
}

#[derive(Debug, Deserialize, validator::Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequestStatusPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "in_progress")]
    pub status: String,
}

// Solicitação pronta para upsert (chaveada pelo request_id).
#[derive(Debug, Clone)]
pub struct NewServiceRequest {
    pub request_id: String,
    pub dealer_id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: Option<String>,
    pub boat_model: String,
    pub hull_id: String,
    pub purchase_date: NaiveDate,
    pub engine_hours: Option<String>,
    pub request_type: String,
    pub issues: Vec<ServiceIssue>,
    pub status: String,
}

// Mensagem do histórico entre administrador e concessionária.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceMessage {
    pub id: i32,

    #[schema(example = "SR-20260808-4821")]
    pub service_request_id: String,

    pub sender_type: SenderType,

    #[schema(example = "Administrator")]
    pub sender_name: String,

    #[schema(example = "Peça enviada, previsão de chegada em 5 dias úteis.")]
    pub message: String,

    pub created_at: DateTime<Utc>,

    pub read_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewing_issues_does_not_mutate_the_request() {
        let issues = vec![
            ServiceIssue {
                description: "Gelcoat trincado na popa".to_string(),
                image_url: Some("/uploads/casco-1.jpg".to_string()),
            },
            ServiceIssue {
                description: "Bomba de porão intermitente".to_string(),
                image_url: None,
            },
        ];
        let request = ServiceRequest {
            id: 1,
            request_id: "SR-20260808-0001".to_string(),
            dealer_id: Uuid::new_v4(),
            customer_name: "Maria".to_string(),
            customer_email: "maria@email.com".to_string(),
            customer_phone: "+55 11 99999-0000".to_string(),
            customer_address: None,
            boat_model: "Drakkar 240 CC".to_string(),
            hull_id: "BR-DKK24017J626".to_string(),
            purchase_date: NaiveDate::from_ymd_opt(2025, 11, 20).unwrap(),
            engine_hours: Some("120".to_string()),
            request_type: "warranty".to_string(),
            issues: Json(issues.clone()),
            status: "open".to_string(),
            created_at: Utc::now(),
        };

        let before = serde_json::to_value(&request).unwrap();
        let viewed = request.issues();
        assert_eq!(viewed, issues.as_slice());
        // Uma segunda leitura vê exatamente o mesmo conteúdo.
        assert_eq!(request.issues(), issues.as_slice());
        assert_eq!(serde_json::to_value(&request).unwrap(), before);
    }
}
