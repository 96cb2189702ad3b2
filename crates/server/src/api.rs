//! Suggestion API endpoints.
//!
//! The empty-vs-not-found policy lives here, not in the core: the index
//! returns an empty list for unknown products and for products with no
//! co-purchases alike, and this shell maps both to 404.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use basketry_core::{ApplicationError, IndexStats, InterfaceError, ProductRef, TripleFrequency};
use basketry_loader::DatasetSource;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::state::IndexHandle;

#[derive(Clone)]
pub struct ApiState {
    pub index: IndexHandle,
    pub dataset_source: Arc<dyn DatasetSource>,
    /// Cap on returned suggestions; 0 means unlimited.
    pub max_results: usize,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/api/suggestions", post(suggestions))
        .route("/api/triples", get(triples))
        .route("/api/stats", get(stats))
        .route("/api/reload", post(reload))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct SuggestionRequest {
    pub product_name: String,
}

#[derive(Debug, Serialize)]
pub struct SuggestionItem {
    pub cross_sell_products: String,
    pub frequency: u64,
}

#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    pub product: String,
    pub suggestions: Vec<SuggestionItem>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: &'static str,
    pub message: String,
    pub correlation_id: String,
}

pub async fn suggestions(
    State(state): State<ApiState>,
    Json(request): Json<SuggestionRequest>,
) -> Result<Json<SuggestionResponse>, (StatusCode, Json<ApiError>)> {
    let correlation_id = Uuid::new_v4().to_string();
    let product_name = request.product_name.trim();

    if product_name.is_empty() {
        warn!(
            event_name = "api.suggestions.bad_request",
            correlation_id = %correlation_id,
            "suggestion request with empty product name"
        );
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError {
                error: "invalid_request",
                message: "product_name must not be empty".to_string(),
                correlation_id,
            }),
        ));
    }

    let index = state.index.current();
    let mut entries = index.suggest(product_name);
    if state.max_results > 0 {
        entries.truncate(state.max_results);
    }

    if entries.is_empty() {
        info!(
            event_name = "api.suggestions.empty",
            correlation_id = %correlation_id,
            product_name = %product_name,
            "no cross-sell suggestions found"
        );
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiError {
                error: "no_suggestions",
                message: format!("no cross-selling suggestions found for `{product_name}`"),
                correlation_id,
            }),
        ));
    }

    info!(
        event_name = "api.suggestions.served",
        correlation_id = %correlation_id,
        product_name = %product_name,
        suggestion_count = entries.len(),
        "cross-sell suggestions served"
    );

    Ok(Json(SuggestionResponse {
        product: product_name.to_string(),
        suggestions: entries
            .into_iter()
            .map(|entry| SuggestionItem {
                cross_sell_products: entry.product,
                frequency: entry.score,
            })
            .collect(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct TripleQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct TripleView {
    pub products: Vec<ProductRef>,
    pub frequency: u64,
}

#[derive(Debug, Serialize)]
pub struct TripleListing {
    pub total: usize,
    pub triples: Vec<TripleView>,
}

pub async fn triples(
    State(state): State<ApiState>,
    Query(query): Query<TripleQuery>,
) -> Json<TripleListing> {
    let index = state.index.current();
    let all = index.all_triples();

    let shown = match query.limit {
        Some(limit) => &all[..limit.min(all.len())],
        None => all,
    };

    Json(TripleListing {
        total: all.len(),
        triples: shown.iter().map(triple_view).collect(),
    })
}

fn triple_view(frequency: &TripleFrequency) -> TripleView {
    TripleView { products: frequency.triple.products().to_vec(), frequency: frequency.count }
}

pub async fn stats(State(state): State<ApiState>) -> Json<IndexStats> {
    Json(state.index.current().stats())
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub status: &'static str,
    pub stats: IndexStats,
}

/// Re-fetches the dataset and rebuilds the index.
///
/// The new index is built completely before it replaces the old one; on any
/// failure the previous index stays live.
pub async fn reload(
    State(state): State<ApiState>,
) -> Result<Json<ReloadResponse>, (StatusCode, Json<ApiError>)> {
    let correlation_id = Uuid::new_v4().to_string();

    let line_items = match state.dataset_source.load().await {
        Ok(line_items) => line_items,
        Err(load_error) => {
            error!(
                event_name = "api.reload.failed",
                correlation_id = %correlation_id,
                dataset_source = %state.dataset_source.describe(),
                error = %load_error,
                "dataset reload failed; previous index stays live"
            );
            let interface =
                ApplicationError::from(load_error).into_interface(correlation_id.clone());
            return Err((
                interface_status(&interface),
                Json(ApiError {
                    error: "reload_failed",
                    message: interface.user_message().to_string(),
                    correlation_id,
                }),
            ));
        }
    };

    let index = basketry_core::CoOccurrenceIndex::build(&line_items);
    let stats = index.stats();
    state.index.swap(index);

    info!(
        event_name = "api.reload.completed",
        correlation_id = %correlation_id,
        line_items = stats.line_items,
        distinct_triples = stats.distinct_triples,
        "index rebuilt and swapped"
    );

    Ok(Json(ReloadResponse { status: "reloaded", stats }))
}

fn interface_status(error: &InterfaceError) -> StatusCode {
    match error {
        InterfaceError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        InterfaceError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        InterfaceError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
