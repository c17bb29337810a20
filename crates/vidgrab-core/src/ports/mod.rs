//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.

pub mod media_tool;

pub use media_tool::{DownloadOutput, MediaToolPort, ToolError};

#[cfg(test)]
pub use media_tool::MockMediaToolPort;
