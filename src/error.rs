//! Error types shared by the matrix engine and the network core.

use thiserror::Error;

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, NetworkError>;

/// Failures raised by [`Matrix`](crate::Matrix) operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    /// Operand dimensions are incompatible with the operation.
    #[error("shape mismatch in {op}: {left:?} vs {right:?}")]
    ShapeMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    /// A row does not have the declared number of columns.
    #[error("row {row} has {actual} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// Errors surfaced by the network core, persistence and training loop.
#[derive(Error, Debug)]
pub enum NetworkError {
    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Input vector has the wrong length
    #[error("input has {actual} values, network expects {expected}")]
    InputSize { expected: usize, actual: usize },

    /// Target vector has the wrong length
    #[error("target has {actual} values, network produces {expected}")]
    TargetSize { expected: usize, actual: usize },

    #[error("matrix error: {0}")]
    Shape(#[from] MatrixError),

    /// Malformed, truncated or unknown-tag model data
    #[error("failed to decode model: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unsupported model format version {0}")]
    UnsupportedVersion(u32),

    /// Decoded model violates the layer-size invariants
    #[error("corrupt model: {0}")]
    Corrupt(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("training set is empty")]
    EmptyDataset,
}

impl NetworkError {
    /// True when the error came from reading a stored model, meaning the caller
    /// may discard the file and construct a fresh network instead.
    pub fn is_recoverable_decode(&self) -> bool {
        matches!(
            self,
            NetworkError::Serialization(_)
                | NetworkError::UnsupportedVersion(_)
                | NetworkError::Corrupt(_)
        )
    }
}

/// Returned when a gate name is not one of and, or, nand, nor, xor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown gate '{0}', expected one of and, or, nand, nor, xor")]
pub struct ParseGateError(pub String);
