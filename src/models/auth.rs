// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Papéis aceitos no portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Dealer,
}

// Representa uma concessionária vinda do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dealer {
    pub id: Uuid,

    #[schema(example = "Marina Norte Náutica")]
    pub name: String,

    #[schema(example = "contato@marinanorte.com.br")]
    pub email: String,

    #[serde(skip_serializing)] // nunca expor o hash
    #[schema(ignore)]
    pub password_hash: String,

    #[schema(example = "BR")]
    pub country: String,

    pub created_at: DateTime<Utc>,
}

// Dados para login da concessionária
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DealerLoginPayload {
    #[validate(email(message = "invalid_email"))]
    #[schema(example = "contato@marinanorte.com.br")]
    pub email: String,

    #[validate(length(min = 1, message = "required"))]
    pub password: String,
}

// Dados para login do administrador
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminLoginPayload {
    #[validate(length(min = 1, message = "required"))]
    pub password: String,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub role: Role,
    pub dealer: Option<Dealer>,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // UUID da concessionária, ou "admin"
    pub role: Role,
    pub exp: usize, // Expiration time
    pub iat: usize, // Issued At
}

fn default_country() -> String {
    "BR".to_string()
}

// Linha do salvamento em lote de concessionárias (upsert por e-mail).
// A senha só é alterada quando enviada.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DealerInput {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Marina Norte Náutica")]
    pub name: String,

    #[validate(email(message = "invalid_email"))]
    #[schema(example = "contato@marinanorte.com.br")]
    pub email: String,

    #[validate(length(min = 6, message = "min_6_chars"))]
    pub password: Option<String>,

    #[serde(default = "default_country")]
    #[schema(example = "BR")]
    pub country: String,
}
