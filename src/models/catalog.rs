// src/models/catalog.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums (Mapeando o Postgres) ---

// Tipo do item de catálogo. Também identifica a tabela alvo nas operações
// administrativas e a linha de dealer_pricing correspondente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "price_item_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    BoatModel,
    EnginePackage,
    HullColor,
    AdditionalOption,
}

impl ItemType {
    pub fn table(&self) -> &'static str {
        match self {
            ItemType::BoatModel => "boat_models",
            ItemType::EnginePackage => "engine_packages",
            ItemType::HullColor => "hull_colors",
            ItemType::AdditionalOption => "additional_options",
        }
    }

    /// Apenas motores e cores de casco carregam lista de compatibilidade.
    pub fn has_compatibility(&self) -> bool {
        matches!(self, ItemType::EnginePackage | ItemType::HullColor)
    }
}

// --- Structs ---

// Linha de catálogo com preço de custo. Os quatro tipos compartilham o
// mesmo formato; compatible_models fica NULL para modelos e opcionais.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    #[schema(example = 1)]
    pub id: i32,

    #[schema(example = "Drakkar 240 CC")]
    pub name: String,

    #[schema(example = "Drakkar 240 CC")]
    pub name_pt: String,

    #[schema(example = "100000.00")]
    pub usd: Decimal,

    #[schema(example = "520000.00")]
    pub brl: Decimal,

    #[schema(example = json!(["Drakkar 240 CC"]))]
    pub compatible_models: Option<Vec<String>>,

    pub created_at: Option<DateTime<Utc>>,
}

// Sobreposição de preço configurada pela concessionária.
// Os campos de venda são opcionais: ausência cai no preço de custo.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DealerPricing {
    pub id: i32,

    #[schema(ignore)]
    pub dealer_id: Uuid,

    pub item_type: ItemType,

    #[schema(example = 1)]
    pub item_id: i32,

    #[schema(example = "125000.00")]
    pub sale_price_usd: Option<Decimal>,

    #[schema(example = "650000.00")]
    pub sale_price_brl: Option<Decimal>,

    #[schema(example = "15.00")]
    pub margin_percentage: Option<Decimal>,
}

// Item de catálogo depois da resolução de preços: `usd`/`brl` passam a ser
// preços de venda efetivos; os de custo ficam preservados ao lado.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PricedItem {
    pub id: i32,
    pub name: String,
    pub name_pt: String,

    #[schema(example = "125000.00")]
    pub usd: Decimal,
    #[schema(example = "650000.00")]
    pub brl: Decimal,

    #[schema(example = "100000.00")]
    pub cost_usd: Decimal,
    #[schema(example = "520000.00")]
    pub cost_brl: Decimal,

    pub compatible_models: Option<Vec<String>>,

    #[schema(example = true)]
    pub dealer_configured: bool,

    #[schema(example = "15.00")]
    pub margin_percentage: Decimal,
}

// Catálogo completo já com a sobreposição da concessionária aplicada.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DealerConfig {
    pub boat_models: Vec<PricedItem>,
    pub engine_packages: Vec<PricedItem>,
    pub hull_colors: Vec<PricedItem>,
    pub additional_options: Vec<PricedItem>,
}

// --- Entradas de gravação ---

// Linha enviada no salvamento em lote: sem id insere, com id atualiza.
#[derive(Debug, Clone, Deserialize, validator::Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItemInput {
    pub id: Option<i32>,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Drakkar 240 CC")]
    pub name: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Drakkar 240 CC")]
    pub name_pt: String,

    #[serde(default)]
    #[schema(example = "100000.00")]
    pub usd: Decimal,

    #[serde(default)]
    #[schema(example = "520000.00")]
    pub brl: Decimal,

    pub compatible_models: Option<Vec<String>>,
}

// Sobreposição de preço enviada pela concessionária.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DealerPricingInput {
    pub item_type: ItemType,

    #[schema(example = 1)]
    pub item_id: i32,

    pub sale_price_usd: Option<Decimal>,
    pub sale_price_brl: Option<Decimal>,
    pub margin_percentage: Option<Decimal>,
}
