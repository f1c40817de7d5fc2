// src/db/quote_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::quotes::{NewQuote, Quote, QuoteStatus},
};

#[derive(Clone)]
pub struct QuoteRepository {
    pool: PgPool,
}

impl QuoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, quote: &NewQuote) -> Result<Quote, AppError> {
        let saved = sqlx::query_as::<_, Quote>(
            "INSERT INTO quotes ( \
                quote_id, dealer_id, \
                customer_name, customer_email, customer_phone, customer_address, \
                customer_city, customer_state, customer_zip, customer_country, \
                boat_model, engine_package, hull_color, additional_options, \
                payment_method, deposit_amount, additional_notes, \
                total_usd, total_brl, valid_until \
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, \
                       $11, $12, $13, $14, $15, $16, $17, $18, $19, $20) \
             RETURNING *",
        )
        .bind(&quote.quote_id)
        .bind(quote.dealer_id)
        .bind(&quote.customer_name)
        .bind(&quote.customer_email)
        .bind(&quote.customer_phone)
        .bind(&quote.customer_address)
        .bind(&quote.customer_city)
        .bind(&quote.customer_state)
        .bind(&quote.customer_zip)
        .bind(&quote.customer_country)
        .bind(&quote.boat_model)
        .bind(&quote.engine_package)
        .bind(&quote.hull_color)
        .bind(&quote.additional_options)
        .bind(&quote.payment_method)
        .bind(quote.deposit_amount)
        .bind(&quote.additional_notes)
        .bind(quote.total_usd)
        .bind(quote.total_brl)
        .bind(quote.valid_until)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    pub async fn list_by_dealer(&self, dealer_id: Uuid) -> Result<Vec<Quote>, AppError> {
        let quotes = sqlx::query_as::<_, Quote>(
            "SELECT * FROM quotes WHERE dealer_id = $1 ORDER BY created_at DESC",
        )
        .bind(dealer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(quotes)
    }

    pub async fn find_by_quote_id(&self, quote_id: &str) -> Result<Option<Quote>, AppError> {
        let quote = sqlx::query_as::<_, Quote>("SELECT * FROM quotes WHERE quote_id = $1")
            .bind(quote_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(quote)
    }

    pub async fn update_status(
        &self,
        quote_id: &str,
        status: QuoteStatus,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE quotes SET status = $2, updated_at = NOW() WHERE quote_id = $1",
        )
        .bind(quote_id)
        .bind(status)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::QuoteNotFound);
        }
        Ok(())
    }
}
