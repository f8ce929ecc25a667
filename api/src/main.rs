//! Shop API Server
//!
//! Read-only order endpoints serving the same data through side-by-side
//! retrieval strategies: naive lazy loading, JOIN fetches and flat projections.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{http::Method, routing::get, Json, Router};
use sea_orm::{ConnectOptions, Database};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::PostgresOrderRepository;
use app::OrderQueryService;
use config::Config;
use domain::ports::OrderRepository;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub order_query_service: Arc<OrderQueryService<dyn OrderRepository>>,
}

impl AppState {
    pub fn new(orders: Arc<dyn OrderRepository>) -> Self {
        Self {
            order_query_service: Arc::new(OrderQueryService::new(orders)),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the router with every versioned order endpoint side by side
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Orders with line items
        .route("/api/v1/orders", get(handlers::orders_v1))
        .route("/api/v2/orders", get(handlers::orders_v2))
        .route("/api/v3/orders", get(handlers::orders_v3))
        .route("/api/v3.1/orders", get(handlers::orders_v3_page))
        // Orders without line items
        .route("/api/v1/simple-orders", get(handlers::simple_orders_v1))
        .route("/api/v2/simple-orders", get(handlers::simple_orders_v2))
        .route("/api/v3/simple-orders", get(handlers::simple_orders_v3))
        .route("/api/v4/simple-orders", get(handlers::simple_orders_v4))
        // Middleware
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods([Method::GET])
                    .allow_headers(Any),
            ),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,shop_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Shop API...");

    // Load configuration
    let config = Config::from_env()?;

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .max_connections(config.db_max_connections)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .context("Failed to connect to database")?;
    tracing::info!(
        max_connections = config.db_max_connections,
        "Database connected"
    );

    if config.seed_demo_data {
        adapters::create_schema(&db)
            .await
            .context("Failed to create schema")?;
        let inserted = adapters::seed_demo_data(&db)
            .await
            .context("Failed to insert demo data")?;
        tracing::info!(inserted, "Demo data ready");
    }

    // Create adapters and app state
    let order_repo: Arc<dyn OrderRepository> = Arc::new(PostgresOrderRepository::new(db));
    let app = build_router(AppState::new(order_repo));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
