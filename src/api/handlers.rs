//! API Request Handlers
//!
//! HTTP request handlers for all API endpoints.

use axum::{extract::State, Json};
use std::sync::Arc;
use tracing::{debug, error};

use crate::api::models::*;
use crate::error::Result;
use crate::resource::{Document, ResourceKind};
use crate::storage::DocumentStore;

/// Application state shared across handlers
pub struct AppState {
    /// Backing document store
    pub store: Arc<dyn DocumentStore>,
}

impl AppState {
    /// Create new application state
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

/// Shared lookup behind every list route
async fn list_resource(state: &AppState, kind: ResourceKind) -> Result<Json<Vec<Document>>> {
    match state.store.list(kind).await {
        Ok(documents) => {
            debug!("Serving {} {}", documents.len(), kind);
            Ok(Json(documents))
        }
        Err(e) => {
            error!("Error fetching {}: {}", kind, e);
            Err(e)
        }
    }
}

/// Handler for GET /api/users
pub async fn handle_list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Document>>> {
    list_resource(&state, ResourceKind::Users).await
}

/// Handler for GET /api/customers
pub async fn handle_list_customers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Document>>> {
    list_resource(&state, ResourceKind::Customers).await
}

/// Handler for GET /api/jobs
pub async fn handle_list_jobs(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Document>>> {
    list_resource(&state, ResourceKind::Jobs).await
}

/// Handler for GET /api/pipelines
pub async fn handle_list_pipelines(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Document>>> {
    list_resource(&state, ResourceKind::Pipelines).await
}

/// Handler for GET /
pub async fn handle_root() -> Json<ServiceInfo> {
    Json(ServiceInfo::current())
}

/// Handler for GET /health
pub async fn handle_health() -> &'static str {
    "OK"
}
