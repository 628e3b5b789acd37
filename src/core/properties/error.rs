//! Extraction Error Types
//!
//! Failures surfaced by the extraction engine. Each kind maps to one entry
//! of the failure taxonomy the service layer reports to callers.

use std::fmt;

use thiserror::Error;

/// Which end of a documented range failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Lower,
    Upper,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lower => f.write_str("lower"),
            Self::Upper => f.write_str("upper"),
        }
    }
}

/// A numeric range could not be turned into two integers.
#[derive(Debug, Error)]
pub enum RangeError {
    /// A literal bound did not parse as an integer.
    #[error("{bound} limit malformed: {text:?}")]
    Malformed { bound: Bound, text: String },

    /// The arithmetic service could not be reached or answered with an error status.
    #[error("upper limit expression {expr:?} failed to evaluate: {reason}")]
    EvaluatorUnreachable { expr: String, reason: String },

    /// The arithmetic service answered with something that is not a number.
    #[error("upper limit expression {expr:?} evaluated to unparsable output {output:?}")]
    EvaluatorOutput { expr: String, output: String },
}

/// Errors raised while fetching and extracting the documentation table.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The wiki page (English or localized) could not be fetched.
    #[error("source unreachable: {url}: {reason}")]
    SourceUnreachable { url: String, reason: String },

    /// The document no longer has the shape the extractor expects.
    #[error("structural drift: {0}")]
    StructuralDrift(String),

    /// More than one localized table matched and strict selection is on.
    #[error("ambiguous table: {candidates} tables match the documentation table shape")]
    AmbiguousTable { candidates: usize },

    #[error(transparent)]
    Range(#[from] RangeError),
}

impl ExtractError {
    pub fn drift(message: impl Into<String>) -> Self {
        Self::StructuralDrift(message.into())
    }

    /// Returns true if the document shape is at fault rather than the network.
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::StructuralDrift(_) | Self::AmbiguousTable { .. })
    }
}

/// Result type alias for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;
