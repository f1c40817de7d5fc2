// src/models/quotes.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums ---

// Ciclo de vida do orçamento: pending -> accepted | rejected | expired.
// Os três últimos são terminais.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "quote_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    Pending,
    Accepted,
    Rejected,
    Expired,
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: i32,

    #[schema(example = "QUO-20260808-4821")]
    pub quote_id: String,

    pub dealer_id: Uuid,

    #[schema(example = "Maria da Silva")]
    pub customer_name: String,
    #[schema(example = "maria@email.com")]
    pub customer_email: String,
    #[schema(example = "+55 11 99999-0000")]
    pub customer_phone: String,
    pub customer_address: Option<String>,
    pub customer_city: Option<String>,
    pub customer_state: Option<String>,
    pub customer_zip: Option<String>,
    pub customer_country: Option<String>,

    #[schema(example = "Drakkar 240 CC")]
    pub boat_model: String,
    #[schema(example = "Mercury 300HP V8")]
    pub engine_package: String,
    #[schema(example = "Navy Blue")]
    pub hull_color: String,
    #[schema(example = json!(["Teak Flooring", "LED Package"]))]
    pub additional_options: Vec<String>,

    pub payment_method: Option<String>,
    #[schema(example = "10000.00")]
    pub deposit_amount: Decimal,
    pub additional_notes: Option<String>,

    #[schema(example = "127000.00")]
    pub total_usd: Decimal,
    #[schema(example = "660400.00")]
    pub total_brl: Decimal,

    pub status: QuoteStatus,

    #[schema(value_type = Option<String>, format = Date, example = "2026-09-07")]
    pub valid_until: Option<NaiveDate>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Dados enviados pela concessionária para gerar um orçamento.
#[derive(Debug, Deserialize, validator::Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuotePayload {
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
    pub customer_city: Option<String>,
    pub customer_state: Option<String>,
    pub customer_zip: Option<String>,
    pub customer_country: Option<String>,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Drakkar 240 CC")]
    pub boat_model: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Mercury 300HP V8")]
    pub engine_package: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Navy Blue")]
    pub hull_color: String,

    #[serde(default)]
    #[schema(example = json!(["Teak Flooring", "LED Package"]))]
    pub additional_options: Vec<String>,

    pub payment_method: Option<String>,

    #[serde(default)]
    #[schema(example = "10000.00")]
    pub deposit_amount: Decimal,

    pub additional_notes: Option<String>,

    // Janela de validade em dias; ausente usa o padrão configurado.
    #[schema(example = 30)]
    pub valid_days: Option<i64>,
}

// Resultado do aceite: orçamento aceito + pedido recém-criado.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AcceptedQuote {
    pub quote: Quote,
    pub order: crate::models::orders::Order,
}

// Orçamento pronto para inserção (ainda sem id/timestamps do banco).
#[derive(Debug, Clone)]
pub struct NewQuote {
    pub quote_id: String,
    pub dealer_id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: Option<String>,
    pub customer_city: Option<String>,
    pub customer_state: Option<String>,
    pub customer_zip: Option<String>,
    pub customer_country: Option<String>,
    pub boat_model: String,
    pub engine_package: String,
    pub hull_color: String,
    pub additional_options: Vec<String>,
    pub payment_method: Option<String>,
    pub deposit_amount: Decimal,
    pub additional_notes: Option<String>,
    pub total_usd: Decimal,
    pub total_brl: Decimal,
    pub valid_until: NaiveDate,
}
