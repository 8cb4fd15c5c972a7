//! Error types for fog geometry operations.

use thiserror::Error;

/// Errors that can occur during polygon boolean operations.
///
/// These are per-shape failures: the session layer leaves the offending
/// shape unmodified and keeps processing its siblings, so a malformed
/// polygon never aborts a commit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// The clip traversal failed to close a result ring within its step
    /// budget, usually caused by a self-intersecting input polygon.
    #[error("clip traversal failed to close a ring after {steps} steps")]
    TraversalStalled {
        /// Number of traversal steps taken before giving up.
        steps: usize,
    },
}
