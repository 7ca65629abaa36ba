//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Error type returned by a dependency lookup.
pub type LookupError = Box<dyn std::error::Error + Send + Sync>;

/// Domain errors represent failures of tree construction.
/// A failed build never yields a partial tree.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("dependency lookup failed for {entity} at depth {depth}")]
    Lookup {
        entity: String,
        depth: usize,
        #[source]
        source: LookupError,
    },

    #[error("cycle detected in dependency chain: {entity} at depth {depth}")]
    CycleDetected { entity: String, depth: usize },

    #[error("maximum depth {max_depth} exceeded at: {entity}")]
    DepthExceeded { entity: String, max_depth: usize },

    #[error("internal tree operation failed: {0}")]
    Internal(String),
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, DomainError>;
