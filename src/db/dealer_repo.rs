// src/db/dealer_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::auth::Dealer};

// Repositório de concessionárias, responsável pela tabela 'dealers'
#[derive(Clone)]
pub struct DealerRepository {
    pool: PgPool,
}

impl DealerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn fetch_all_raw(&self) -> Result<Vec<Dealer>, sqlx::Error> {
        sqlx::query_as::<_, Dealer>("SELECT * FROM dealers ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Dealer>, AppError> {
        let dealer = sqlx::query_as::<_, Dealer>("SELECT * FROM dealers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(dealer)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Dealer>, AppError> {
        let dealer =
            sqlx::query_as::<_, Dealer>("SELECT * FROM dealers WHERE LOWER(email) = LOWER($1)")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
        Ok(dealer)
    }

    /// Upsert por e-mail. A senha só muda quando um novo hash é enviado;
    /// concessionária nova sem senha entra com hash vazio (login bloqueado
    /// até o administrador definir uma).
    pub async fn upsert(
        &self,
        name: &str,
        email: &str,
        password_hash: Option<&str>,
        country: &str,
    ) -> Result<Dealer, AppError> {
        let dealer = sqlx::query_as::<_, Dealer>(
            "INSERT INTO dealers (name, email, password_hash, country) \
             VALUES ($1, $2, COALESCE($3, ''), $4) \
             ON CONFLICT (email) DO UPDATE SET \
             name = EXCLUDED.name, \
             country = EXCLUDED.country, \
             password_hash = CASE WHEN $3 IS NULL THEN dealers.password_hash \
                                  ELSE EXCLUDED.password_hash END \
             RETURNING *",
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(country)
        .fetch_one(&self.pool)
        .await?;

        Ok(dealer)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM dealers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::DealerNotFound);
        }
        Ok(())
    }
}
