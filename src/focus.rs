//! Focus restriction for drop containers
//!
//! Two small policies, both optional per overlay:
//!
//! - **restrict**: on mount, if focus is not already inside the overlay,
//!   move it onto the container so keyboard interaction starts there.
//! - **trap**: while the overlay is open, keyboard navigation that would
//!   carry focus outside the overlay is pulled back to the container.
//!
//! Escape interception is not handled here; the stack dispatches key-down
//! events to overlays in capture order (innermost first) and stops
//! propagation at the first overlay that consumes the key.

use crate::dom::{ElementId, ElementTree};

/// Per-overlay focus behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct FocusPolicy {
  /// Move focus into the overlay on mount.
  pub restrict: bool,
  /// Keep focus inside the overlay while it is open.
  pub trap: bool,
}

/// Applies the mount-time restriction: focuses `container` unless the
/// currently focused element already lives in its subtree.
pub fn restrict_focus(tree: &mut ElementTree, container: ElementId) {
  let already_inside = tree
    .focused()
    .is_some_and(|focused| tree.contains(container, focused));
  if !already_inside {
    tree.set_focus(container);
  }
}

/// Re-applies containment after a focus-moving key: if focus escaped the
/// overlay subtree, pull it back onto the container.
pub fn contain_focus(tree: &mut ElementTree, container: ElementId) {
  restrict_focus(tree, container);
}
