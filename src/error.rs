//! Engine error types
//!
//! Only configuration and request validation surface as errors. A position
//! without legal moves is a normal reply (no move, caller treats it as a
//! draw), a deadline is a normal reply carrying the last completed depth,
//! and worker faults are absorbed inside the orchestrator.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The configuration block cannot be searched
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The request disagrees with its own configuration
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
