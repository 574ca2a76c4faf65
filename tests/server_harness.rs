#![allow(unused)]
//! HTTP surface harness.
//!
//! Drives the axum router in-process with `tower::ServiceExt::oneshot`; no
//! socket is bound.
//!
//! # What this covers
//!
//! - every route's status code and JSON shape
//! - `400` for `/search` without `query`, `404` for unknown industry slugs
//! - whitespace queries reach the search engine untouched

mod common;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use common::*;
use http_body_util::BodyExt;
use kpidex::server::router;
use kpidex_core::Dataset;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app(ds: Dataset) -> Router {
    router(Arc::new(ds))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn health_is_ok() {
    let (status, body) = get(app(banking()), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");
}

#[tokio::test]
async fn suggest_route_returns_labels() {
    let (status, body) = get_json(app(banking()), "/api/suggest?q=interest").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["Net Interest Margin"]));
}

#[tokio::test]
async fn suggest_without_query_is_empty() {
    let (status, body) = get_json(app(banking()), "/api/suggest").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn search_route_groups_by_industry() {
    let (status, body) = get_json(app(banking()), "/search?query=net%20interest").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["industry"], "Banking");
    assert_eq!(body[0]["matchedKPIs"][0]["kpi"], "Net Interest Margin");
    assert_eq!(body[0]["matchedKPIs"][0]["subdepartment"], "Retail");
    assert_eq!(body[0]["matchedUseCases"], json!([]));
}

#[tokio::test]
async fn search_without_query_is_bad_request() {
    let (status, _) = get(app(banking()), "/search").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_with_blank_query_is_empty() {
    let (status, body) = get_json(app(banking()), "/search?query=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn search_with_space_query_matches_literally() {
    let (status, body) = get_json(app(banking()), "/search?query=%20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["industry"], "Banking");
    assert_eq!(body[0]["matchedKPIs"][0]["kpi"], "Net Interest Margin");
}

#[tokio::test]
async fn categories_merge_domains_and_carry_slugs() {
    let ds = Dataset::from_json_str(DUPLICATE_DOMAINS_JSON).unwrap();
    let (status, body) = get_json(app(ds), "/api/categories").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            {"domain": "Finance", "industries": [
                {"name": "Banking", "slug": "banking"},
                {"name": "Capital Markets", "slug": "capital-markets"}
            ]},
            {"domain": "Healthcare", "industries": [
                {"name": "Hospitals", "slug": "hospitals"}
            ]}
        ])
    );
}

#[tokio::test]
async fn industry_page_by_slug() {
    let ds = Dataset::from_json_str(DUPLICATE_DOMAINS_JSON).unwrap();
    let (status, body) = get_json(app(ds), "/capital-markets").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["industry"], "Capital Markets");
}

#[tokio::test]
async fn unknown_slug_is_not_found() {
    let (status, _) = get(app(banking()), "/no-such-industry").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
