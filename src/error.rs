//! Error types for dropkit
//!
//! Runtime positioning failures are deliberately NOT errors: a missing
//! target or container at placement time is a silent no-op that retries on
//! the next trigger, and an unparseable metric is returned unchanged. The
//! types here cover the cases where the caller handed the engine
//! structurally invalid input:
//! - Element-tree misuse (unknown ids, circular attachment)
//! - Contradictory alignment specifications
//!
//! All errors use the `thiserror` crate for minimal boilerplate and proper
//! error trait implementations.

use thiserror::Error;

/// Result type alias for dropkit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for dropkit.
///
/// Each variant wraps a more specific error type for that subsystem.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
  /// Element-tree structural error
  #[error("dom error: {0}")]
  Dom(#[from] DomError),

  /// Invalid alignment specification
  #[error("align error: {0}")]
  Align(#[from] AlignError),
}

/// Structural errors from the element arena.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
  /// An element id did not resolve to a live node.
  #[error("unknown element id {0}")]
  UnknownElement(usize),

  /// Attaching a node under itself or one of its descendants.
  #[error("element {0} cannot be attached under its own subtree")]
  CircularAttachment(usize),

  /// Attaching a node that already has a parent.
  #[error("element {0} is already attached")]
  AlreadyAttached(usize),
}

/// Errors from validating an alignment specification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlignError {
  /// Both `top` and `bottom` were set; at most one vertical constraint is
  /// allowed per axis.
  #[error("conflicting vertical alignment: both top and bottom set")]
  ConflictingVertical,

  /// Both `left` and `right` were set.
  #[error("conflicting horizontal alignment: both left and right set")]
  ConflictingHorizontal,
}
