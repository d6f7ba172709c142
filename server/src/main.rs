//! PhishGuard Backend Server
//!
//! HTTP service wrapping the detection core.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     PHISHGUARD BACKEND                      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌───────────┐  ┌─────────────────────────┐  │
//! │  │  API      │  │  Auth     │  │  Detection Engine       │  │
//! │  │  Gateway  │  │  Service  │  │  (phishguard-core,      │  │
//! │  │  (Axum)   │  │  (JWT)    │  │   loaded at startup)    │  │
//! │  └─────┬─────┘  └─────┬─────┘  └────────────┬────────────┘  │
//! │        └──────────────┼─────────────────────┘               │
//! │                       ▼                                     │
//! │                ┌─────────────┐                              │
//! │                │ PostgreSQL  │                              │
//! │                └─────────────┘                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both classifier artifacts are loaded before the listener binds; a
//! missing or corrupt artifact aborts startup.

mod config;
mod db;
mod error;
mod handlers;
mod middleware;
mod models;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use phishguard_core::DetectionEngine;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "phishguard_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("PhishGuard server starting...");
    if config.is_production() && config.jwt_secret.contains("change-in-production") {
        tracing::warn!("Default JWT secret in production - set JWT_SECRET");
    }

    // Classifier artifacts first: no models, no service
    let engine = DetectionEngine::load(&config.engine_config())
        .context("failed to load detection models - refusing to start")?;
    tracing::info!("Detection models loaded: {:?}", engine.status());

    // Initialize database pool
    let pool = db::create_pool(&config.database_url)
        .await
        .context("failed to create database pool")?;

    tracing::info!("Running database migrations...");
    db::run_migrations(&pool)
        .await
        .context("failed to run migrations")?;

    // Build application state
    let state = AppState {
        pool,
        config: config.clone(),
        engine: Arc::new(engine),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind listener")?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: sqlx::PgPool,
    pub config: config::Config,
    pub engine: Arc<DetectionEngine>,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/auth/signup", post(handlers::auth::signup))
        .route("/api/auth/login", post(handlers::auth::login));

    // User routes (JWT auth)
    let user_routes = Router::new()
        .route("/api/auth/me", get(handlers::auth::me))
        .route("/api/auth/profile", put(handlers::auth::update_profile))
        // Scanning
        .route("/api/analyze/url", post(handlers::analyze::analyze_url))
        .route("/api/analyze/email", post(handlers::analyze::analyze_email))
        // Scan history
        .route("/api/history", get(handlers::history::list))
        .route("/api/history/stats", get(handlers::history::stats))
        .route("/api/history/:id", delete(handlers::history::delete))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_user_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(user_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
