//! Error types for Seglog
//!
//! Provides a unified error type for all recoverable operations.
//!
//! Lookup misses are not errors (they return `None`), and broken ordering
//! invariants in the segment set are not errors either: they panic.

use thiserror::Error;

use crate::model::Offset;

/// Result type alias using SeglogError
pub type Result<T> = std::result::Result<T, SeglogError>;

/// Unified error type for Seglog operations
#[derive(Debug, Error)]
pub enum SeglogError {
    // -------------------------------------------------------------------------
    // Segment Errors
    // -------------------------------------------------------------------------
    #[error("Offset out of order: expected {expected}, got {got}")]
    OffsetOutOfOrder { expected: Offset, got: Offset },

    #[error("Invalid segment descriptor: {0}")]
    InvalidSegment(String),

    // -------------------------------------------------------------------------
    // Partition Errors
    // -------------------------------------------------------------------------
    #[error("Partition error: {0}")]
    Partition(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
