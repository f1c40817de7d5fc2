// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::dealer_login,
        handlers::auth::admin_login,

        // --- Catalog / Dealer config ---
        handlers::catalog::get_dealer_config,
        handlers::catalog::save_dealer_pricing,
        handlers::catalog::get_admin_data,
        handlers::catalog::save_catalog,
        handlers::catalog::delete_catalog_item,
        handlers::catalog::save_dealers,
        handlers::catalog::delete_dealer,

        // --- Quotes ---
        handlers::quotes::create_quote,
        handlers::quotes::list_quotes,
        handlers::quotes::accept_quote,
        handlers::quotes::reject_quote,

        // --- Orders ---
        handlers::orders::create_order,
        handlers::orders::list_orders,
        handlers::orders::update_order_status,
        handlers::orders::bulk_update_order_status,

        // --- Aftersales ---
        handlers::aftersales::create_service_request,
        handlers::aftersales::list_service_requests,
        handlers::aftersales::update_request_status,
        handlers::aftersales::delete_service_request,
        handlers::aftersales::list_messages,
        handlers::aftersales::post_message,
        handlers::aftersales::mark_messages_read,

        // --- Settings ---
        handlers::settings::change_admin_password,
        handlers::settings::get_notification_email,
        handlers::settings::update_notification_email,
        handlers::settings::send_notification,

        // --- Uploads ---
        handlers::uploads::upload_image,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::Dealer,
            models::auth::DealerLoginPayload,
            models::auth::AdminLoginPayload,
            models::auth::AuthResponse,
            models::auth::DealerInput,

            // --- Catalog ---
            models::catalog::ItemType,
            models::catalog::CatalogItem,
            models::catalog::CatalogItemInput,
            models::catalog::DealerPricing,
            models::catalog::DealerPricingInput,
            models::catalog::PricedItem,
            models::catalog::DealerConfig,

            // --- Quotes ---
            models::quotes::QuoteStatus,
            models::quotes::Quote,
            models::quotes::CreateQuotePayload,
            models::quotes::AcceptedQuote,

            // --- Orders ---
            models::orders::OrderStatus,
            models::orders::Order,
            models::orders::CreateOrderPayload,
            models::orders::OrderStatusUpdate,
            handlers::orders::UpdateOrderStatusPayload,

            // --- Aftersales ---
            models::aftersales::SenderType,
            models::aftersales::ServiceIssue,
            models::aftersales::ServiceRequest,
            models::aftersales::ServiceMessage,
            models::aftersales::CreateServiceRequestPayload,
            models::aftersales::CreateServiceMessagePayload,
            models::aftersales::UpdateRequestStatusPayload,

            // --- Settings ---
            models::settings::ChangePasswordPayload,
            models::settings::NotificationEmailPayload,
            models::settings::NotificationEmailResponse,
            handlers::settings::SendNotificationPayload,

            // --- Pricing ---
            services::pricing_service::CurrencyPair,
            services::pricing_service::TotalsBreakdown,
            services::pricing_service::QuoteTotals,
            services::catalog_service::AdminData,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação do administrador e das concessionárias"),
        (name = "Catalog", description = "Catálogo e preços por concessionária"),
        (name = "Admin", description = "Back office: catálogo, concessionárias e fotografia geral"),
        (name = "Quotes", description = "Orçamentos: geração, aceite e rejeição"),
        (name = "Orders", description = "Pedidos e acompanhamento de status"),
        (name = "Aftersales", description = "Assistência pós-venda e mensagens"),
        (name = "Settings", description = "Configurações do administrador e notificações"),
        (name = "Uploads", description = "Upload de imagens")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
