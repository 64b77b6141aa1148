//! HTTP gateway
//!
//! Route table, shared state, response envelope and error mapping.
//! Product routes are wrapped in the JWT gate; auth and health are public.

pub mod error;
pub mod health;
pub mod openapi;
pub mod state;
pub mod types;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::catalog::handlers as catalog;
use crate::config::GatewayConfig;
use crate::user_auth::{handlers as auth, jwt_auth_middleware};
use state::AppState;

/// Default request body cap when none is configured
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Build the full application router
pub fn build_router(state: Arc<AppState>, body_limit_bytes: usize) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    // Every product route passes the gate before any handler or store runs
    let product_routes = Router::new()
        .route(
            "/",
            get(catalog::list_products).post(catalog::create_product),
        )
        .route(
            "/{id}",
            put(catalog::update_product).delete(catalog::delete_product),
        )
        .layer(from_fn_with_state(state.clone(), jwt_auth_middleware));

    Router::new()
        .route("/api/v1/health", get(health::health_check))
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/products", product_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
        .layer(RequestBodyLimitLayer::new(body_limit_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Start HTTP Gateway server; returns after a graceful shutdown
pub async fn run_server(config: &GatewayConfig, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = build_router(state, config.body_limit_bytes);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {addr}: {e}"))?;

    tracing::info!(%addr, "Gateway listening");
    tracing::info!("API docs: http://{}/docs", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
