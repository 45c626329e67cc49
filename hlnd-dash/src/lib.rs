//! hlnd-dash library - Hyperlocal news dashboard service
//!
//! Read-only JSON API over an article dataset loaded once at startup.

use axum::Router;
use chrono::{DateTime, Utc};
use hlnd_common::config::DashboardSettings;
use hlnd_common::RecordStore;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod api;
pub mod error;
pub mod pagination;
pub mod request;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded dataset; never mutated after startup
    pub store: Arc<RecordStore>,
    pub settings: DashboardSettings,
    /// When the dataset finished loading
    pub loaded_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(store: RecordStore, settings: DashboardSettings) -> Self {
        Self {
            store: Arc::new(store),
            settings,
            loaded_at: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let queries = Router::new()
        .route("/api/dashboard", post(api::get_dashboard))
        .route("/api/articles", post(api::list_articles))
        .route("/api/entities/:category", post(api::get_entity_table))
        .route("/api/map", post(api::get_map_points))
        .route("/api/reader/article", post(api::get_reader_article));

    let controls = Router::new()
        .route("/api/facets", get(api::get_facets))
        .route("/api/bounds", get(api::get_bounds))
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes());

    Router::new()
        .merge(queries)
        .merge(controls)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
