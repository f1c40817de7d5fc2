// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    common::i18n::I18nStore,
    db::{
        AftersalesRepository, CatalogRepository, DealerRepository, OrderRepository,
        QuoteRepository, SettingsRepository,
    },
    services::{
        aftersales_service::AftersalesService, auth::AuthService, catalog_service::CatalogService,
        notification_service::NotificationService, order_service::OrderService,
        pricing_service::PricingService, quote_service::QuoteService,
    },
};

// Janela de validade dos orçamentos quando nem o payload nem o ambiente
// definem outra.
pub const DEFAULT_QUOTE_VALIDITY_DAYS: i64 = 30;

const DEFAULT_UPLOAD_DIR: &str = "./uploads";

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub i18n_store: I18nStore,
    pub upload_dir: String,
    pub settings_repo: SettingsRepository,
    pub dealer_repo: DealerRepository,
    pub auth_service: AuthService,
    pub pricing_service: PricingService,
    pub catalog_service: CatalogService,
    pub quote_service: QuoteService,
    pub order_service: OrderService,
    pub aftersales_service: AftersalesService,
    pub notification_service: NotificationService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        let validity_days = env::var("QUOTE_VALIDITY_DAYS")
            .ok()
            .and_then(|value| value.parse::<i64>().ok())
            .filter(|days| *days > 0)
            .unwrap_or(DEFAULT_QUOTE_VALIDITY_DAYS);

        let upload_dir =
            env::var("UPLOAD_DIR").unwrap_or_else(|_| DEFAULT_UPLOAD_DIR.to_string());

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let catalog_repo = CatalogRepository::new(db_pool.clone());
        let dealer_repo = DealerRepository::new(db_pool.clone());
        let quote_repo = QuoteRepository::new(db_pool.clone());
        let order_repo = OrderRepository::new(db_pool.clone());
        let aftersales_repo = AftersalesRepository::new(db_pool.clone());
        let settings_repo = SettingsRepository::new(db_pool.clone());

        let auth_service = AuthService::new(
            dealer_repo.clone(),
            settings_repo.clone(),
            jwt_secret.clone(),
        );

        let notification_service = NotificationService::new(
            settings_repo.clone(),
            env::var("SMTP_HOST").ok(),
            env::var("SMTP_USERNAME").ok(),
            env::var("SMTP_PASSWORD").ok(),
            env::var("SMTP_FROM").ok(),
        )?;

        let pricing_service = PricingService::new(catalog_repo.clone());

        let catalog_service = CatalogService::new(
            catalog_repo.clone(),
            dealer_repo.clone(),
            order_repo.clone(),
            aftersales_repo.clone(),
            auth_service.clone(),
        );

        let quote_service = QuoteService::new(
            quote_repo.clone(),
            order_repo.clone(),
            pricing_service.clone(),
            notification_service.clone(),
            validity_days,
        );

        let order_service = OrderService::new(
            order_repo.clone(),
            pricing_service.clone(),
            notification_service.clone(),
        );

        let aftersales_service =
            AftersalesService::new(aftersales_repo.clone(), notification_service.clone());

        Ok(Self {
            db_pool,
            i18n_store: I18nStore::new(),
            upload_dir,
            settings_repo,
            dealer_repo,
            auth_service,
            pricing_service,
            catalog_service,
            quote_service,
            order_service,
            aftersales_service,
            notification_service,
        })
    }
}
