//! Unified error types for keyed-diff.
//!
//! Diffing itself is a total function and never fails; errors arise only
//! from the replay verification surface and from applying a diff to input
//! that has drifted from the old snapshot it was computed against.

use thiserror::Error;

/// Main error type for keyed-diff operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum KeyedDiffError {
    /// Replaying an edit script did not reproduce the expected sequence
    #[error("Replay verification failed: {context}")]
    Replay {
        context: String,
        #[source]
        source: ReplayErrorKind,
    },

    /// The input handed to a transform or verification does not match the
    /// old snapshot the diff was computed against
    #[error("Stale diff input: {context}")]
    StaleInput {
        context: String,
        #[source]
        source: StaleInputKind,
    },
}

/// Specific replay verification failure kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReplayErrorKind {
    #[error("replay produced {actual} elements, target sequence has {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("replayed element at index {index} does not equal the target element")]
    ElementMismatch { index: usize },
}

/// Specific stale-input kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StaleInputKind {
    #[error("input has {actual} elements, diff was computed against {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error(
        "section {section_index} holds {actual} items, diff recorded {expected} at that index"
    )]
    SectionItemCount {
        section_index: usize,
        expected: usize,
        actual: usize,
    },
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for keyed-diff operations
pub type Result<T> = std::result::Result<T, KeyedDiffError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl KeyedDiffError {
    /// Create a replay verification error with context
    pub fn replay(context: impl Into<String>, source: ReplayErrorKind) -> Self {
        Self::Replay {
            context: context.into(),
            source,
        }
    }

    /// Create a stale-input error with context
    pub fn stale_input(context: impl Into<String>, source: StaleInputKind) -> Self {
        Self::StaleInput {
            context: context.into(),
            source,
        }
    }

    /// Create a stale-input error for a plain length mismatch
    pub fn stale_length(context: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::stale_input(context, StaleInputKind::LengthMismatch { expected, actual })
    }
}
