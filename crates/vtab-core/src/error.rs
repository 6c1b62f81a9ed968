#![forbid(unsafe_code)]

//! Error types for the windowing engine.
//!
//! Only argument validation surfaces as an error. Reaching an edge of the
//! row collection is reported through `bool` returns on the range
//! primitives, and a missing collaborator (no surface attached yet) turns
//! the operation into a no-op.

use std::fmt;

/// Errors raised by scroll-position APIs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollError {
    /// A position ratio outside the closed interval `[0, 1]` (or NaN).
    InvalidPositionRatio(f64),
}

impl fmt::Display for ScrollError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPositionRatio(ratio) => {
                write!(f, "invalid position ratio {ratio}: must be between 0 and 1")
            }
        }
    }
}

impl std::error::Error for ScrollError {}

/// Result alias for scroll-position APIs.
pub type Result<T> = std::result::Result<T, ScrollError>;
