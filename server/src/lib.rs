use axum::{extract::{Query, State}, http::StatusCode, routing::get, Json, Router};
use engine::{boolean_query, tfidf_scores, InvertedIndex, Strategy};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

const MAX_K: usize = 100;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_strategy")]
    pub strategy: Strategy,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_strategy() -> Strategy { Strategy::Tfidf }
fn default_k() -> usize { 10 }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub strategy: Strategy,
    pub took_s: f64,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub id: String,
    /// Only set for tfidf; boolean matches are unranked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub num_docs: u32,
    pub num_terms: usize,
}

/// The index is immutable once built, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub index: Arc<InvertedIndex>,
}

pub fn build_app(index: Arc<InvertedIndex>) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/stats", get(stats_handler))
        .with_state(AppState { index })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, Json<serde_json::Value>)> {
    let start = std::time::Instant::now();
    let k = params.k.min(MAX_K);
    let results: Vec<SearchHit> = match params.strategy {
        Strategy::Tfidf => tfidf_scores(&state.index, &params.q, k)
            .into_iter()
            .map(|(id, score)| SearchHit { id: id.to_string(), score: Some(score) })
            .collect(),
        Strategy::Boolean => boolean_query(&state.index, &params.q, k)
            .map_err(|e| (StatusCode::BAD_REQUEST, Json(serde_json::json!({ "error": e.to_string() }))))?
            .into_iter()
            .map(|id| SearchHit { id: id.to_string(), score: None })
            .collect(),
    };
    let took_s = start.elapsed().as_secs_f64();
    tracing::debug!(query = %params.q, strategy = %params.strategy, hits = results.len(), took_s, "search");
    Ok(Json(SearchResponse { query: params.q, strategy: params.strategy, took_s, results }))
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse { num_docs: state.index.num_docs(), num_terms: state.index.num_terms() })
}
