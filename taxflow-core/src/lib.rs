//! TaxFlow core: invoice business logic for Italian freelancers in the
//! regime forfettario, and the HTTP service exposing it.
//!
//! - `billing`: VAT amounts, dashboard statistics, status folding, listing.
//! - `einvoice`: electronic invoice validation and payload construction.
//! - `models`: invoice, client and upstream record types.

pub mod auth;
pub mod billing;
pub mod config;
pub mod einvoice;
pub mod error;
pub mod models;

use std::sync::Arc;

use axum::{
    http::{header, Method},
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;

/// Application state shared by the router.
///
/// Holds the configuration loaded at startup. It is passed explicitly to
/// the middleware that needs it; nothing reads configuration from globals.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration, including the JWT secret
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

/// Health check endpoint.
///
/// Returns a simple JSON response indicating the server is running.
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "taxflow-core",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Creates the application router.
///
/// Sets up the public health check and the invoice routes under `/api`,
/// which all require a bearer token. Tracing and CORS apply to every route.
///
/// # Arguments
///
/// * `state` - The application state holding the configuration
///
/// # Returns
///
/// Returns a configured Axum Router.
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/fatture/validate", post(einvoice::validate_handler))
        .route("/fatture/build", post(einvoice::build_handler))
        .route("/fatture/stats", post(billing::handlers::stats_handler))
        .route("/fatture/list", post(billing::handlers::list_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::jwt_middleware,
        ));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
