//src/main.rs

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::{admin_guard, auth_guard, dealer_guard};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas públicas de autenticação
    let auth_routes = Router::new()
        .route("/dealer-login", post(handlers::auth::dealer_login))
        .route("/admin-login", post(handlers::auth::admin_login));

    // Rotas da concessionária (portal do dealer)
    let dealer_routes = Router::new()
        .route("/config", get(handlers::catalog::get_dealer_config))
        .route("/pricing", put(handlers::catalog::save_dealer_pricing))
        .route(
            "/quotes",
            post(handlers::quotes::create_quote).get(handlers::quotes::list_quotes),
        )
        .route(
            "/quotes/{quote_id}/accept",
            post(handlers::quotes::accept_quote),
        )
        .route(
            "/quotes/{quote_id}/reject",
            post(handlers::quotes::reject_quote),
        )
        .route(
            "/orders",
            post(handlers::orders::create_order).get(handlers::orders::list_orders),
        )
        .route(
            "/service-requests",
            post(handlers::aftersales::create_service_request)
                .get(handlers::aftersales::list_service_requests),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            dealer_guard,
        ));

    // Rotas do back office
    let admin_routes = Router::new()
        .route("/data", get(handlers::catalog::get_admin_data))
        .route("/catalog/{kind}", put(handlers::catalog::save_catalog))
        .route(
            "/catalog/{kind}/{id}",
            axum::routing::delete(handlers::catalog::delete_catalog_item),
        )
        .route("/dealers", put(handlers::catalog::save_dealers))
        .route(
            "/dealers/{id}",
            axum::routing::delete(handlers::catalog::delete_dealer),
        )
        .route(
            "/orders/status",
            put(handlers::orders::bulk_update_order_status),
        )
        .route(
            "/orders/{order_id}/status",
            put(handlers::orders::update_order_status),
        )
        .route(
            "/service-requests/{request_id}/status",
            put(handlers::aftersales::update_request_status),
        )
        .route(
            "/service-requests/{request_id}",
            axum::routing::delete(handlers::aftersales::delete_service_request),
        )
        .route(
            "/settings/password",
            put(handlers::settings::change_admin_password),
        )
        .route(
            "/settings/notification-email",
            get(handlers::settings::get_notification_email)
                .put(handlers::settings::update_notification_email),
        )
        .route("/notifications", post(handlers::settings::send_notification))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            admin_guard,
        ));

    // Mensagens: as duas pontas do diálogo usam as mesmas rotas
    let message_routes = Router::new()
        .route(
            "/",
            get(handlers::aftersales::list_messages).post(handlers::aftersales::post_message),
        )
        .route(
            "/{request_id}/read",
            put(handlers::aftersales::mark_messages_read),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let upload_routes = Router::new()
        .route("/", post(handlers::uploads::upload_image))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/dealer", dealer_routes)
        .nest("/api/admin", admin_routes)
        .nest("/api/service-messages", message_routes)
        .nest("/api/uploads", upload_routes)
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
