// src/services/quote_service.rs

use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    common::{error::AppError, ids},
    db::{OrderRepository, QuoteRepository},
    models::{
        auth::Dealer,
        orders::NewOrder,
        quotes::{AcceptedQuote, CreateQuotePayload, NewQuote, Quote, QuoteStatus},
    },
    services::{notification_service::NotificationService, pricing_service::PricingService},
};

#[derive(Clone)]
pub struct QuoteService {
    quote_repo: QuoteRepository,
    order_repo: OrderRepository,
    pricing: PricingService,
    notifications: NotificationService,
    validity_days: i64,
}

impl QuoteService {
    pub fn new(
        quote_repo: QuoteRepository,
        order_repo: OrderRepository,
        pricing: PricingService,
        notifications: NotificationService,
        validity_days: i64,
    ) -> Self {
        Self {
            quote_repo,
            order_repo,
            pricing,
            notifications,
            validity_days,
        }
    }

    /// Gera um orçamento: resolve a configuração contra o catálogo já
    /// precificado para a concessionária, calcula os totais no servidor e
    /// persiste com status pendente.
    pub async fn create(
        &self,
        dealer: &Dealer,
        payload: CreateQuotePayload,
    ) -> Result<Quote, AppError> {
        let config = self.pricing.dealer_config(Some(dealer.id), None).await?;
        let resolved = crate::services::pricing_service::resolve_configuration(
            &config,
            &payload.boat_model,
            &payload.engine_package,
            &payload.hull_color,
            &payload.additional_options,
        )?;

        let now = Utc::now();
        let valid_until = compute_valid_until(
            now.date_naive(),
            payload.valid_days,
            self.validity_days,
        );

        let quote = NewQuote {
            quote_id: ids::generate_quote_id(now),
            dealer_id: dealer.id,
            customer_name: payload.customer_name,
            customer_email: payload.customer_email,
            customer_phone: payload.customer_phone,
            customer_address: payload.customer_address,
            customer_city: payload.customer_city,
            customer_state: payload.customer_state,
            customer_zip: payload.customer_zip,
            customer_country: payload.customer_country,
            boat_model: payload.boat_model,
            engine_package: payload.engine_package,
            hull_color: payload.hull_color,
            additional_options: resolved.selection.additional_options,
            payment_method: payload.payment_method,
            deposit_amount: payload.deposit_amount,
            additional_notes: payload.additional_notes,
            total_usd: resolved.totals.total_usd,
            total_brl: resolved.totals.total_brl,
            valid_until,
        };

        let saved = self.quote_repo.insert(&quote).await?;
        tracing::info!(
            "Orçamento {} criado para a concessionária {}",
            saved.quote_id,
            dealer.name
        );
        Ok(saved)
    }

    /// Aceita um orçamento pendente e o clona em um pedido.
    ///
    /// São duas gravações independentes, sem transação: se a criação do
    /// pedido falhar depois do aceite, fica um orçamento aceito sem pedido,
    /// e o retry esbarra no guard de status. Reconciliação é manual.
    pub async fn accept(&self, quote_id: &str) -> Result<AcceptedQuote, AppError> {
        let quote = self
            .quote_repo
            .find_by_quote_id(quote_id)
            .await?
            .ok_or(AppError::QuoteNotFound)?;

        ensure_pending(&quote)?;

        let now = Utc::now();
        if quote.valid_until.is_some_and(|date| date < now.date_naive()) {
            self.quote_repo
                .update_status(&quote.quote_id, QuoteStatus::Expired)
                .await?;
            return Err(AppError::QuoteExpired);
        }

        self.quote_repo
            .update_status(&quote.quote_id, QuoteStatus::Accepted)
            .await?;

        let new_order = NewOrder::from_accepted_quote(&quote, ids::generate_order_id(now));
        let order = self.order_repo.insert(&new_order).await?;

        tracing::info!(
            "Orçamento {} aceito; pedido {} criado",
            quote.quote_id,
            order.order_id
        );

        self.notifications
            .send_best_effort(
                &format!("Novo pedido {}", order.order_id),
                &format!(
                    "O orçamento {} foi aceito. Pedido {} criado para {} ({} / {}).",
                    quote.quote_id,
                    order.order_id,
                    order.customer_name,
                    order.boat_model,
                    order.engine_package
                ),
            )
            .await;

        let mut accepted = quote;
        accepted.status = QuoteStatus::Accepted;
        Ok(AcceptedQuote {
            quote: accepted,
            order,
        })
    }

    /// Rejeição pela concessionária: pendente -> rejeitado (terminal).
    pub async fn reject(&self, quote_id: &str) -> Result<(), AppError> {
        let quote = self
            .quote_repo
            .find_by_quote_id(quote_id)
            .await?
            .ok_or(AppError::QuoteNotFound)?;

        ensure_pending(&quote)?;

        self.quote_repo
            .update_status(&quote.quote_id, QuoteStatus::Rejected)
            .await
    }

    pub async fn list_for_dealer(&self, dealer_id: Uuid) -> Result<Vec<Quote>, AppError> {
        self.quote_repo.list_by_dealer(dealer_id).await
    }
}

// Apenas orçamentos pendentes transitam; os demais status são terminais.
fn ensure_pending(quote: &Quote) -> Result<(), AppError> {
    match quote.status {
        QuoteStatus::Pending => Ok(()),
        _ => Err(AppError::QuoteNotPending),
    }
}

fn compute_valid_until(today: NaiveDate, requested_days: Option<i64>, default_days: i64) -> NaiveDate {
    let days = requested_days.filter(|d| *d > 0).unwrap_or(default_days);
    today + Duration::days(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_until_uses_the_requested_window() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 8).unwrap();
        let date = compute_valid_until(today, Some(15), 30);
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 8, 23).unwrap());
    }

    #[test]
    fn valid_until_defaults_to_the_configured_window() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 8).unwrap();
        let date = compute_valid_until(today, None, 30);
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 9, 7).unwrap());

        // Janela não-positiva também cai no padrão
        let date = compute_valid_until(today, Some(0), 30);
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 9, 7).unwrap());
    }

    #[test]
    fn only_pending_quotes_can_transition() {
        use crate::models::quotes::QuoteStatus;
        use rust_decimal::Decimal;

        let mut quote = Quote {
            id: 1,
            quote_id: "QUO-20260808-0001".to_string(),
            dealer_id: Uuid::new_v4(),
            customer_name: "Maria".to_string(),
            customer_email: "maria@email.com".to_string(),
            customer_phone: "+55 11 99999-0000".to_string(),
            customer_address: None,
            customer_city: None,
            customer_state: None,
            customer_zip: None,
            customer_country: None,
            boat_model: "Drakkar 240 CC".to_string(),
            engine_package: "Mercury 300HP V8".to_string(),
            hull_color: "Navy Blue".to_string(),
            additional_options: vec![],
            payment_method: None,
            deposit_amount: Decimal::ZERO,
            additional_notes: None,
            total_usd: Decimal::from(127_000),
            total_brl: Decimal::from(660_400),
            status: QuoteStatus::Pending,
            valid_until: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        assert!(ensure_pending(&quote).is_ok());

        for terminal in [
            QuoteStatus::Accepted,
            QuoteStatus::Rejected,
            QuoteStatus::Expired,
        ] {
            quote.status = terminal;
            assert!(matches!(
                ensure_pending(&quote),
                Err(AppError::QuoteNotPending)
            ));
        }
    }
}
