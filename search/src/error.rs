//! Typed search errors.
//!
//! `SearchError` represents pre-flight and artifact failures only. Runtime
//! terminations (goal reached, exhaustion, depth ceiling, cancellation) are
//! ordinary outcomes expressed via [`crate::engine::Termination`].

use wayfinder_kernel::proof::canon::CanonError;

/// Typed failure for policy validation and artifact serialization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// A policy field is outside its accepted range.
    #[error("invalid search policy: {detail}")]
    InvalidPolicy { detail: String },
    /// A tree artifact could not be canonicalized.
    #[error(transparent)]
    Canon(#[from] CanonError),
}
