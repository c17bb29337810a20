//! # vidgrab-axum
//!
//! HTTP adapter for vidgrab. [`bootstrap`] is the composition root: it
//! wires the yt-dlp adapter into the core services. [`routes`] exposes
//! them under `/api`.
//!
//! | route | handler |
//! |---|---|
//! | `GET /health` | liveness |
//! | `POST /api/video-info` | [`handlers::info::video_info`] |
//! | `POST /api/download` | [`handlers::download::download`] |
//! | `GET /api/tool` | [`handlers::tool::status`] |

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Dev-dependencies used only by the integration tests
#[cfg(test)]
use async_trait as _;
#[cfg(test)]
use http_body_util as _;
#[cfg(test)]
use serde_json as _;
#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use tower as _;

pub mod attachment;
pub mod bootstrap;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

// Re-export primary types
pub use bootstrap::{AxumContext, CorsConfig, ServerConfig, bootstrap, start_server};
pub use error::HttpError;
pub use routes::{create_router, create_spa_router};
pub use state::AppState;
