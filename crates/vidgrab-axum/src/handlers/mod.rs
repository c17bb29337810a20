//! HTTP handlers. Each one validates its body and delegates to a core
//! service held in [`crate::state::AppState`].

pub mod download;
pub mod info;
pub mod tool;
