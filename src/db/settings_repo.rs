// src/db/settings_repo.rs

use sqlx::PgPool;

use crate::common::error::AppError;

// Chaves conhecidas da tabela admin_settings.
pub const ADMIN_PASSWORD_KEY: &str = "admin_password";
pub const NOTIFICATION_EMAIL_KEY: &str = "notification_email";

// Senha assumida quando a linha admin_password não existe no banco.
pub const DEFAULT_ADMIN_PASSWORD: &str = "drakkar";

#[derive(Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let value: Option<(String,)> =
            sqlx::query_as("SELECT value FROM admin_settings WHERE key = $1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
        Ok(value.map(|(v,)| v))
    }

    pub async fn upsert(&self, key: &str, value: &str) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO admin_settings (key, value) VALUES ($1, $2) \
             ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Senha do administrador com fallback explícito para o padrão.
    pub async fn admin_password(&self) -> Result<String, AppError> {
        let stored = self.get(ADMIN_PASSWORD_KEY).await?;
        if stored.is_none() {
            tracing::warn!("Senha do admin não encontrada no banco. Usando padrão.");
        }
        Ok(stored.unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string()))
    }

    pub async fn notification_email(&self) -> Result<Option<String>, AppError> {
        self.get(NOTIFICATION_EMAIL_KEY).await
    }
}
