//! Read-only JSON surface over the dataset (`kpidex serve`).
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /health` | `ok` |
//! | `GET /api/suggest?q=` | labels from [`kpidex_core::suggest`] |
//! | `GET /search?query=` | grouped results; `400` without `query` |
//! | `GET /api/categories` | domain groups with industry slugs |
//! | `GET /{slug}` | the industry document; `404` for unknown slugs |

use crate::report;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use kpidex_core::Dataset;
use serde::Deserialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

type SharedDataset = Arc<Dataset>;

#[derive(Debug, Deserialize)]
pub struct SuggestParams {
    #[serde(default)]
    q: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    query: Option<String>,
}

/// Build the router. Handlers only read the dataset.
pub fn router(dataset: SharedDataset) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/suggest", get(suggest_handler))
        .route("/api/categories", get(categories_handler))
        .route("/search", get(search_handler))
        .route("/{slug}", get(industry_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(dataset)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(dataset: SharedDataset, addr: &str) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "kpidex http surface listening");
    axum::serve(listener, router(dataset)).await?;
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

async fn suggest_handler(
    State(dataset): State<SharedDataset>,
    Query(params): Query<SuggestParams>,
) -> Response {
    Json(kpidex_core::suggest(&params.q, &dataset)).into_response()
}

async fn search_handler(
    State(dataset): State<SharedDataset>,
    Query(params): Query<SearchParams>,
) -> Response {
    let Some(query) = params.query else {
        return (StatusCode::BAD_REQUEST, "missing `query` parameter").into_response();
    };
    let results = kpidex_core::search(&query, &dataset);
    tracing::debug!(%query, industries = results.len(), "search request");
    Json(results).into_response()
}

async fn categories_handler(State(dataset): State<SharedDataset>) -> Response {
    Json(report::categories(&dataset)).into_response()
}

async fn industry_handler(
    State(dataset): State<SharedDataset>,
    Path(slug): Path<String>,
) -> Response {
    match dataset.industry_by_slug(&slug) {
        Some(industry) => Json(industry).into_response(),
        None => (StatusCode::NOT_FOUND, format!("no industry page at /{slug}")).into_response(),
    }
}
