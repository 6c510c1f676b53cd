//! Error types for poolkit-list

use poolkit_memory::MemoryError;
use thiserror::Error;

use crate::node::NodeHandle;

/// List operation errors
///
/// Every failure leaves the list and the pool unchanged.
#[must_use = "errors should be handled"]
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ListError {
    /// The underlying pool refused the operation
    #[error(transparent)]
    Memory(#[from] MemoryError),

    /// An operation that needs an anchor node was given none
    #[error("No anchor node given")]
    MissingNode,

    /// No node holds the value
    #[error("Value {value} not found in list")]
    NotFound { value: u16 },

    /// The handle does not belong to this list
    #[error("Node {node} is not reachable from the list head")]
    Unreachable { node: NodeHandle },

    /// Node bytes in the pool are inconsistent
    #[error("Node {node} is corrupted")]
    Corrupted { node: NodeHandle },
}

impl ListError {
    /// Get error code for categorization
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Memory(error) => error.code(),
            Self::MissingNode => "LIST:HANDLE:MISSING",
            Self::NotFound { .. } => "LIST:VALUE:NOT_FOUND",
            Self::Unreachable { .. } => "LIST:HANDLE:UNREACHABLE",
            Self::Corrupted { .. } => "LIST:SYSTEM:CORRUPTION",
        }
    }
}

/// Result type for list operations
pub type ListResult<T> = Result<T, ListError>;
