//! Error types for the meniscus engine.
//!
//! All crates above `meniscus-math` return `MeniscusResult<T>` from
//! fallible operations. Every variant is fatal for the current run:
//! nothing in the engine retries or rolls back.

use thiserror::Error;

/// Unified error type for the meniscus engine.
#[derive(Debug, Error)]
pub enum MeniscusError {
    /// Mesh data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// A cell has zero, negative or non-finite measure (self-intersection
    /// or inversion of the interface).
    #[error("Degenerate element {cell}: measure {measure:.3e}")]
    DegenerateElement {
        cell: usize,
        measure: f64,
    },

    /// Two collaborating objects disagree on a size.
    #[error("Dimension mismatch in {context}: expected {expected}, found {found}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        found: usize,
    },

    /// Configuration value is invalid or inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An operation was called in a state where it is not allowed
    /// (e.g. applying an operator before assembling it).
    #[error("Precondition violated: {0}")]
    Precondition(String),

    /// The linear solver could not factorize or solve the system.
    #[error("Linear solver failed: {0}")]
    SolverFailure(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// An input file could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Convenience alias for `Result<T, MeniscusError>`.
pub type MeniscusResult<T> = Result<T, MeniscusError>;
