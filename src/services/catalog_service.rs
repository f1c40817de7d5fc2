// src/services/catalog_service.rs

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::{db_utils::with_read_retry, error::AppError},
    db::{AftersalesRepository, CatalogRepository, DealerRepository, OrderRepository},
    models::{
        aftersales::ServiceRequest,
        auth::{Dealer, DealerInput},
        catalog::{CatalogItem, CatalogItemInput, DealerPricing, DealerPricingInput, ItemType},
        orders::Order,
    },
    services::auth::AuthService,
};

// Fotografia completa do back office: catálogo, concessionárias, pedidos e
// solicitações, em uma única resposta.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminData {
    pub engine_packages: Vec<CatalogItem>,
    pub hull_colors: Vec<CatalogItem>,
    pub additional_options: Vec<CatalogItem>,
    pub boat_models: Vec<CatalogItem>,
    pub dealers: Vec<Dealer>,
    pub orders: Vec<Order>,
    pub service_requests: Vec<ServiceRequest>,
}

#[derive(Clone)]
pub struct CatalogService {
    catalog_repo: CatalogRepository,
    dealer_repo: DealerRepository,
    order_repo: OrderRepository,
    aftersales_repo: AftersalesRepository,
    auth_service: AuthService,
}

impl CatalogService {
    pub fn new(
        catalog_repo: CatalogRepository,
        dealer_repo: DealerRepository,
        order_repo: OrderRepository,
        aftersales_repo: AftersalesRepository,
        auth_service: AuthService,
    ) -> Self {
        Self {
            catalog_repo,
            dealer_repo,
            order_repo,
            aftersales_repo,
            auth_service,
        }
    }

    /// Busca sequencial com reintento por tabela (falhas transitórias do
    /// banco não derrubam o back office inteiro de primeira).
    pub async fn admin_data(&self) -> Result<AdminData, AppError> {
        let engine_packages = with_read_retry("engine_packages", || {
            self.catalog_repo.fetch_all_raw(ItemType::EnginePackage)
        })
        .await?;
        let hull_colors = with_read_retry("hull_colors", || {
            self.catalog_repo.fetch_all_raw(ItemType::HullColor)
        })
        .await?;
        let additional_options = with_read_retry("additional_options", || {
            self.catalog_repo.fetch_all_raw(ItemType::AdditionalOption)
        })
        .await?;
        let boat_models = with_read_retry("boat_models", || {
            self.catalog_repo.fetch_all_raw(ItemType::BoatModel)
        })
        .await?;
        let dealers = with_read_retry("dealers", || self.dealer_repo.fetch_all_raw()).await?;
        let orders = with_read_retry("orders", || self.order_repo.fetch_all_raw()).await?;
        let service_requests =
            with_read_retry("service_requests", || self.aftersales_repo.fetch_all_raw()).await?;

        Ok(AdminData {
            engine_packages,
            hull_colors,
            additional_options,
            boat_models,
            dealers,
            orders,
            service_requests,
        })
    }

    /// Salva o lote e devolve a tabela atualizada (a UI re-renderiza a
    /// partir dela).
    pub async fn save_catalog(
        &self,
        kind: ItemType,
        items: &[CatalogItemInput],
    ) -> Result<Vec<CatalogItem>, AppError> {
        self.catalog_repo.bulk_save(kind, items).await?;
        self.catalog_repo.list(kind).await
    }

    pub async fn delete_item(&self, kind: ItemType, id: i32) -> Result<(), AppError> {
        self.catalog_repo.delete(kind, id).await
    }

    /// Upsert por e-mail, com deduplicação (último vence, como na planilha
    /// da UI) e hash de senha quando enviada.
    pub async fn save_dealers(&self, inputs: Vec<DealerInput>) -> Result<Vec<Dealer>, AppError> {
        let mut unique_by_email: Vec<DealerInput> = Vec::with_capacity(inputs.len());
        for input in inputs {
            let email_key = input.email.trim().to_lowercase();
            unique_by_email.retain(|existing| existing.email.trim().to_lowercase() != email_key);
            unique_by_email.push(input);
        }

        let mut saved = Vec::with_capacity(unique_by_email.len());
        for input in unique_by_email {
            let password_hash = match input.password {
                Some(password) => Some(self.auth_service.hash_password(password).await?),
                None => None,
            };
            let dealer = self
                .dealer_repo
                .upsert(
                    &input.name,
                    input.email.trim(),
                    password_hash.as_deref(),
                    &input.country,
                )
                .await?;
            saved.push(dealer);
        }
        Ok(saved)
    }

    pub async fn delete_dealer(&self, id: Uuid) -> Result<(), AppError> {
        self.dealer_repo.delete(id).await
    }

    pub async fn save_dealer_pricing(
        &self,
        dealer_id: Uuid,
        entries: &[DealerPricingInput],
    ) -> Result<Vec<DealerPricing>, AppError> {
        self.catalog_repo.upsert_pricing(dealer_id, entries).await
    }
}
