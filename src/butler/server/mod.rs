// SPDX-License-Identifier: MIT

//! Browser UI and JSON API over the two phases

mod handlers;
mod page;

pub use handlers::{
    gear_rows, prepare_hiking, review_hiking, PrepareRequest, PrepareResponse, ReviewRequest,
    ReviewResponse, GEAR_COLUMNS,
};

use crate::adk::error::Result;
use crate::butler::config::WorkflowSettings;
use crate::butler::workflow::{build_preparation_workflow, build_review_workflow, CompiledGraph};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Compiled phases shared by every request
#[derive(Clone)]
pub struct AppState {
    pub preparation: Arc<CompiledGraph>,
    pub review: Arc<CompiledGraph>,
}

impl AppState {
    /// Compile both phases once with default settings
    pub async fn new() -> Result<Self> {
        Self::from_settings(&WorkflowSettings::default()).await
    }

    pub async fn from_settings(settings: &WorkflowSettings) -> Result<Self> {
        Ok(Self::from_graphs(
            build_preparation_workflow(settings).await?,
            build_review_workflow(settings).await?,
        ))
    }

    pub fn from_graphs(preparation: CompiledGraph, review: CompiledGraph) -> Self {
        Self {
            preparation: Arc::new(preparation),
            review: Arc::new(review),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/health", get(handlers::health_check))
        .route("/api/phases", get(handlers::list_phases))
        .route("/api/prepare", post(handlers::prepare))
        .route("/api/review", post(handlers::review))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(state: AppState, host: &str, port: u16) -> Result<()> {
    let app = router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
