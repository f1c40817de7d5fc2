// src/models/orders.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::quotes::Quote;

// --- Enums ---

// Estágios do pedido. A progressão é apenas convencional: o administrador
// pode colocar qualquer status a partir de qualquer outro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "order_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Production,
    Finishing,
    Assembly,
    FinalInspection,
    Shipped,
    Delivered,
    Sold,
    Canceled,
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i32,

    #[schema(example = "ORD-20260808-4821")]
    pub order_id: String,

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
    #[schema(example = json!(["Teak Flooring"]))]
    pub additional_options: Vec<String>,

    #[schema(example = "cash")]
    pub payment_method: String,
    #[schema(example = "10000.00")]
    pub deposit_amount: Decimal,
    pub additional_notes: Option<String>,

    #[schema(example = "127000.00")]
    pub total_usd: Decimal,
    #[schema(example = "660400.00")]
    pub total_brl: Decimal,

    pub status: OrderStatus,

    pub created_at: DateTime<Utc>,
}

// Dados enviados pela concessionária para registrar um pedido direto.
#[derive(Debug, Deserialize, validator::Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderPayload {
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
    #[schema(example = json!(["Teak Flooring"]))]
    pub additional_options: Vec<String>,

    pub payment_method: Option<String>,

    #[serde(default)]
    #[schema(example = "10000.00")]
    pub deposit_amount: Decimal,

    pub additional_notes: Option<String>,
}

// Atualização de status em lote: pares (order_id, status).
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusUpdate {
    #[schema(example = "ORD-20260808-4821")]
    pub order_id: String,
    pub status: OrderStatus,
}

// Pedido pronto para inserção.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub order_id: String,
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
    pub payment_method: String,
    pub deposit_amount: Decimal,
    pub additional_notes: Option<String>,
    pub total_usd: Decimal,
    pub total_brl: Decimal,
    pub status: OrderStatus,
}

// Forma de pagamento assumida quando o orçamento não traz uma.
pub const DEFAULT_PAYMENT_METHOD: &str = "cash";

impl NewOrder {
    /// Clona a configuração de um orçamento aceito em um novo pedido.
    /// O pedido nasce `pending`, com um identificador próprio.
    pub fn from_accepted_quote(quote: &Quote, order_id: String) -> Self {
        Self {
            order_id,
            dealer_id: quote.dealer_id,
            customer_name: quote.customer_name.clone(),
            customer_email: quote.customer_email.clone(),
            customer_phone: quote.customer_phone.clone(),
            customer_address: quote.customer_address.clone(),
            customer_city: quote.customer_city.clone(),
            customer_state: quote.customer_state.clone(),
            customer_zip: quote.customer_zip.clone(),
            customer_country: quote.customer_country.clone(),
            boat_model: quote.boat_model.clone(),
            engine_package: quote.engine_package.clone(),
            hull_color: quote.hull_color.clone(),
            additional_options: quote.additional_options.clone(),
            payment_method: quote
                .payment_method
                .clone()
                .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string()),
            deposit_amount: quote.deposit_amount,
            additional_notes: quote.additional_notes.clone(),
            total_usd: quote.total_usd,
            total_brl: quote.total_brl,
            status: OrderStatus::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quotes::QuoteStatus;
    use chrono::NaiveDate;

    fn sample_quote() -> Quote {
        Quote {
            id: 1,
            quote_id: "QUO-20260808-1234".to_string(),
            dealer_id: Uuid::new_v4(),
            customer_name: "Maria da Silva".to_string(),
            customer_email: "maria@email.com".to_string(),
            customer_phone: "+55 11 99999-0000".to_string(),
            customer_address: Some("Av. Atlântica, 1000".to_string()),
            customer_city: Some("Santos".to_string()),
            customer_state: Some("SP".to_string()),
            customer_zip: None,
            customer_country: Some("BR".to_string()),
            boat_model: "Drakkar 240 CC".to_string(),
            engine_package: "Mercury 300HP V8".to_string(),
            hull_color: "Navy Blue".to_string(),
            additional_options: vec!["Teak Flooring".to_string()],
            payment_method: None,
            deposit_amount: Decimal::from(10_000),
            additional_notes: None,
            total_usd: Decimal::from(127_000),
            total_brl: Decimal::from(660_400),
            status: QuoteStatus::Pending,
            valid_until: NaiveDate::from_ymd_opt(2026, 9, 7),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn order_clones_quote_configuration_with_pending_status() {
        let quote = sample_quote();
        let order = NewOrder::from_accepted_quote(&quote, "ORD-20260808-9999".to_string());

        assert_eq!(order.order_id, "ORD-20260808-9999");
        assert_eq!(order.dealer_id, quote.dealer_id);
        assert_eq!(order.boat_model, quote.boat_model);
        assert_eq!(order.engine_package, quote.engine_package);
        assert_eq!(order.hull_color, quote.hull_color);
        assert_eq!(order.additional_options, quote.additional_options);
        assert_eq!(order.total_usd, quote.total_usd);
        assert_eq!(order.total_brl, quote.total_brl);
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn missing_payment_method_defaults_to_cash() {
        let quote = sample_quote();
        let order = NewOrder::from_accepted_quote(&quote, "ORD-1".to_string());
        assert_eq!(order.payment_method, DEFAULT_PAYMENT_METHOD);

        let mut with_method = sample_quote();
        with_method.payment_method = Some("financing".to_string());
        let order = NewOrder::from_accepted_quote(&with_method, "ORD-2".to_string());
        assert_eq!(order.payment_method, "financing");
    }

    #[test]
    fn order_status_serializes_snake_case() {
        let json = serde_json::to_string(&OrderStatus::FinalInspection).unwrap();
        assert_eq!(json, "\"final_inspection\"");
        let parsed: OrderStatus = serde_json::from_str("\"canceled\"").unwrap();
        assert_eq!(parsed, OrderStatus::Canceled);
    }
}
