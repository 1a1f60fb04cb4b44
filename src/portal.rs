//! Portal identity and outside-click adjudication
//!
//! Every mounted drop gets a portal id, stamped on its container as the
//! `data-g-portal-id` attribute — the one bit-exact wire contract in the
//! system: membership of a pointer event in some overlay is decided purely
//! from the element tree. Nesting is expressed as a [`PortalChain`]: the
//! chain a drop hands to its children is its own inherited chain plus its
//! own id, so chain length equals nesting depth.
//!
//! Dismissal rule for a pointer-down, given the overlay's own id, the
//! portal id found above the event target (if any) and that portal's
//! chain:
//! - inside the drop target: keep open, no matter what else the event
//!   landed on (a menu-style control rendered inside its own overlay is
//!   both at once);
//! - outside any overlay: dismiss;
//! - on an overlay whose chain contains this overlay's id (itself or a
//!   nested descendant): dismiss;
//! - anywhere else (an unrelated sibling overlay): keep open.

use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;

use crate::dom::{ElementId, ElementTree};

/// Attribute carrying an overlay's portal id on its container element.
pub const PORTAL_ID_ATTRIBUTE: &str = "data-g-portal-id";

static NEXT_PORTAL_ID: AtomicUsize = AtomicUsize::new(1);

/// Integer identity of one mounted overlay in a nesting chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PortalId(usize);

impl PortalId {
  /// The raw integer, as written to the portal attribute.
  pub fn value(self) -> usize {
    self.0
  }
}

impl std::fmt::Display for PortalId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    self.0.fmt(f)
  }
}

/// Allocates the next portal id. Ids are unique per mount and
/// monotonically increasing for the lifetime of the process.
pub fn next_portal_id() -> PortalId {
  PortalId(NEXT_PORTAL_ID.fetch_add(1, Ordering::Relaxed))
}

/// An overlay's nesting chain: ancestor overlay ids in order, ending with
/// the overlay's own id. Chains are passed explicitly from parent to
/// child; a child only ever appends to its inherited copy.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PortalChain(Vec<PortalId>);

impl PortalChain {
  /// The empty chain of a top-level overlay's parent context.
  pub fn root() -> Self {
    Self(Vec::new())
  }

  /// The chain a child overlay with `id` inherits from this context.
  pub fn child(&self, id: PortalId) -> Self {
    let mut ids = self.0.clone();
    ids.push(id);
    Self(ids)
  }

  /// This chain's own overlay id (the last entry), if non-empty.
  pub fn own(&self) -> Option<PortalId> {
    self.0.last().copied()
  }

  /// Nesting depth.
  pub fn depth(&self) -> usize {
    self.0.len()
  }

  /// Returns true if `id` appears anywhere in the chain.
  pub fn contains(&self, id: PortalId) -> bool {
    self.0.contains(&id)
  }
}

/// Finds the portal id governing `target`: the nearest element at or above
/// it carrying the portal attribute. Composed events walk the composed
/// path across shadow boundaries; non-composed events walk plain ancestry,
/// which stops at a shadow root.
pub fn portal_id_at(tree: &ElementTree, target: ElementId, composed: bool) -> Option<PortalId> {
  let path = if composed {
    tree.composed_path(target)
  } else {
    let mut path = vec![target];
    path.extend(tree.ancestors(target));
    path
  };
  path.into_iter().find_map(|node| {
    tree
      .attribute(node, PORTAL_ID_ATTRIBUTE)
      .and_then(|value| value.parse::<usize>().ok())
      .map(PortalId)
  })
}

/// Decides whether a pointer-down should invoke an overlay's outside-click
/// handler.
///
/// `own` is the overlay's portal id, `inside_drop_target` whether the
/// event landed inside the anchor that opened it, and `clicked_chain` the
/// chain of the overlay the event landed on, if any. The drop target
/// always wins: an event inside it never dismisses, even when it also
/// sits inside an overlay in this overlay's own chain.
pub fn should_dismiss(
  own: PortalId,
  inside_drop_target: bool,
  clicked_chain: Option<&PortalChain>,
) -> bool {
  if inside_drop_target {
    return false;
  }
  match clicked_chain {
    None => true,
    Some(chain) => chain.contains(own),
  }
}
