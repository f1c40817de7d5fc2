// src/db/catalog_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::catalog::{CatalogItem, CatalogItemInput, DealerPricing, DealerPricingInput, ItemType},
};

// Repositório das quatro tabelas de catálogo e da sobreposição de preços.
// As tabelas compartilham o mesmo formato de linha; o `ItemType` escolhe a
// tabela alvo.
#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Leitura crua, com `sqlx::Error`, para compor com o reintento das
    /// leituras em lote.
    pub async fn fetch_all_raw(&self, kind: ItemType) -> Result<Vec<CatalogItem>, sqlx::Error> {
        // Ordena por ID ascendente para manter uma ordem estável na UI
        let sql = if kind.has_compatibility() {
            format!(
                "SELECT id, name, name_pt, usd, brl, compatible_models, created_at \
                 FROM {} ORDER BY id ASC",
                kind.table()
            )
        } else {
            format!(
                "SELECT id, name, name_pt, usd, brl, NULL::TEXT[] AS compatible_models, created_at \
                 FROM {} ORDER BY id ASC",
                kind.table()
            )
        };

        sqlx::query_as::<_, CatalogItem>(&sql).fetch_all(&self.pool).await
    }

    pub async fn list(&self, kind: ItemType) -> Result<Vec<CatalogItem>, AppError> {
        Ok(self.fetch_all_raw(kind).await?)
    }

    /// Salvamento em lote: linhas sem id são inseridas, com id atualizadas.
    pub async fn bulk_save(
        &self,
        kind: ItemType,
        items: &[CatalogItemInput],
    ) -> Result<(), AppError> {
        for item in items {
            match item.id {
                None => self.insert(kind, item).await?,
                Some(id) => self.update(kind, id, item).await?,
            }
        }
        Ok(())
    }

    async fn insert(&self, kind: ItemType, item: &CatalogItemInput) -> Result<(), AppError> {
        if kind.has_compatibility() {
            let compatible = item.compatible_models.clone().unwrap_or_default();
            sqlx::query(&format!(
                "INSERT INTO {} (name, name_pt, usd, brl, compatible_models) \
                 VALUES ($1, $2, $3, $4, $5)",
                kind.table()
            ))
            .bind(&item.name)
            .bind(&item.name_pt)
            .bind(item.usd)
            .bind(item.brl)
            .bind(&compatible)
            .execute(&self.pool)
            .await?;
        } else {
            sqlx::query(&format!(
                "INSERT INTO {} (name, name_pt, usd, brl) VALUES ($1, $2, $3, $4)",
                kind.table()
            ))
            .bind(&item.name)
            .bind(&item.name_pt)
            .bind(item.usd)
            .bind(item.brl)
            .execute(&self.pool)
            .await?;
        }
        Ok(())
    }

    async fn update(
        &self,
        kind: ItemType,
        id: i32,
        item: &CatalogItemInput,
    ) -> Result<(), AppError> {
        let result = if kind.has_compatibility() {
            let compatible = item.compatible_models.clone().unwrap_or_default();
            sqlx::query(&format!(
                "UPDATE {} SET name = $2, name_pt = $3, usd = $4, brl = $5, \
                 compatible_models = $6 WHERE id = $1",
                kind.table()
            ))
            .bind(id)
            .bind(&item.name)
            .bind(&item.name_pt)
            .bind(item.usd)
            .bind(item.brl)
            .bind(&compatible)
            .execute(&self.pool)
            .await?
        } else {
            sqlx::query(&format!(
                "UPDATE {} SET name = $2, name_pt = $3, usd = $4, brl = $5 WHERE id = $1",
                kind.table()
            ))
            .bind(id)
            .bind(&item.name)
            .bind(&item.name_pt)
            .bind(item.usd)
            .bind(item.brl)
            .execute(&self.pool)
            .await?
        };

        if result.rows_affected() == 0 {
            return Err(AppError::CatalogItemNotFound(format!(
                "{} #{}",
                kind.table(),
                id
            )));
        }
        Ok(())
    }

    pub async fn delete(&self, kind: ItemType, id: i32) -> Result<(), AppError> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", kind.table()))
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::CatalogItemNotFound(format!(
                "{} #{}",
                kind.table(),
                id
            )));
        }
        Ok(())
    }

    // --- Sobreposição de preços por concessionária ---

    pub async fn pricing_for_dealer(
        &self,
        dealer_id: Uuid,
    ) -> Result<Vec<DealerPricing>, AppError> {
        let rows = sqlx::query_as::<_, DealerPricing>(
            "SELECT id, dealer_id, item_type, item_id, sale_price_usd, sale_price_brl, \
             margin_percentage FROM dealer_pricing WHERE dealer_id = $1",
        )
        .bind(dealer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn upsert_pricing(
        &self,
        dealer_id: Uuid,
        entries: &[DealerPricingInput],
    ) -> Result<Vec<DealerPricing>, AppError> {
        let mut saved = Vec::with_capacity(entries.len());
        for entry in entries {
            let row = sqlx::query_as::<_, DealerPricing>(
                "INSERT INTO dealer_pricing \
                 (dealer_id, item_type, item_id, sale_price_usd, sale_price_brl, margin_percentage) \
                 VALUES ($1, $2, $3, $4, $5, $6) \
                 ON CONFLICT (dealer_id, item_type, item_id) DO UPDATE SET \
                 sale_price_usd = EXCLUDED.sale_price_usd, \
                 sale_price_brl = EXCLUDED.sale_price_brl, \
                 margin_percentage = EXCLUDED.margin_percentage \
                 RETURNING id, dealer_id, item_type, item_id, sale_price_usd, sale_price_brl, \
                 margin_percentage",
            )
            .bind(dealer_id)
            .bind(entry.item_type)
            .bind(entry.item_id)
            .bind(entry.sale_price_usd)
            .bind(entry.sale_price_brl)
            .bind(entry.margin_percentage)
            .fetch_one(&self.pool)
            .await?;
            saved.push(row);
        }
        Ok(saved)
    }
}
