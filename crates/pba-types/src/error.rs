//! Error types for the pba engine.
//!
//! Only recoverable conditions are represented here. Contract violations
//! inside the engine (looking up a block that is not in the sparsity
//! pattern, element tables referencing missing vertices) panic instead.

use thiserror::Error;

/// Unified error type for the pba engine.
#[derive(Debug, Error)]
pub enum PbaError {
    /// Mesh or element table is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Sparsity pattern arrays are inconsistent.
    #[error("Invalid sparsity pattern: {0}")]
    InvalidPattern(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A per-vertex buffer does not match the vertex count.
    #[error("Dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, PbaError>`.
pub type PbaResult<T> = Result<T, PbaError>;
