// src/db/order_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::orders::{NewOrder, Order, OrderStatus},
};

#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, order: &NewOrder) -> Result<Order, AppError> {
        let saved = sqlx::query_as::<_, Order>(
            "INSERT INTO orders ( \
                order_id, dealer_id, \
                customer_name, customer_email, customer_phone, customer_address, \
                customer_city, customer_state, customer_zip, customer_country, \
                boat_model, engine_package, hull_color, additional_options, \
                payment_method, deposit_amount, additional_notes, \
                total_usd, total_brl, status \
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, \
                       $11, $12, $13, $14, $15, $16, $17, $18, $19, $20) \
             RETURNING *",
        )
        .bind(&order.order_id)
        .bind(order.dealer_id)
        .bind(&order.customer_name)
        .bind(&order.customer_email)
        .bind(&order.customer_phone)
        .bind(&order.customer_address)
        .bind(&order.customer_city)
        .bind(&order.customer_state)
        .bind(&order.customer_zip)
        .bind(&order.customer_country)
        .bind(&order.boat_model)
        .bind(&order.engine_package)
        .bind(&order.hull_color)
        .bind(&order.additional_options)
        .bind(&order.payment_method)
        .bind(order.deposit_amount)
        .bind(&order.additional_notes)
        .bind(order.total_usd)
        .bind(order.total_brl)
        .bind(order.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    pub async fn fetch_all_raw(&self) -> Result<Vec<Order>, sqlx::Error> {
        sqlx::query_as::<_, Order>("SELECT * FROM orders ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn list_by_dealer(&self, dealer_id: Uuid) -> Result<Vec<Order>, AppError> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders WHERE dealer_id = $1 ORDER BY created_at DESC",
        )
        .bind(dealer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(orders)
    }

    pub async fn update_status(
        &self,
        order_id: &str,
        status: OrderStatus,
    ) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE orders SET status = $2 WHERE order_id = $1")
            .bind(order_id)
            .bind(status)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::OrderNotFound);
        }
        Ok(())
    }
}
