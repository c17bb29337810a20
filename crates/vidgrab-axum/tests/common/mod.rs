//! Shared fixtures for router tests.

#![allow(dead_code)]

pub mod tool;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, header};
use axum::response::Response;
use http_body_util::BodyExt;
use std::path::Path;
use std::sync::Arc;

use vidgrab_axum::{AxumContext, CorsConfig, create_router};
use vidgrab_core::ScratchDir;

use tool::FakeTool;

/// Router over `tool` with its scratch root at `scratch`.
pub fn router(tool: FakeTool, scratch: &Path) -> Router {
    let ctx = AxumContext::new(Arc::new(tool), ScratchDir::new(scratch));
    create_router(ctx, &CorsConfig::AllowAll)
}

pub fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Assert the response body is valid JSON and return the parsed value.
pub async fn parse_json(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap_or_else(|e| panic!("Expected valid JSON body: {e}"))
}

/// Number of entries directly under `dir`.
pub fn entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).map_or(0, Iterator::count)
}
