//! Alignment resolution for drop containers
//!
//! [`compute_geometry`] is the pure core of the engine: given the target
//! (anchor) rect, the container's measured rect, the viewport size and an
//! alignment specification, it produces the inline geometry to apply. It
//! never touches the element tree, which keeps the responsive-flip policy
//! unit-testable without any document machinery.
//!
//! # Coordinate conventions
//!
//! Output values are viewport coordinates. `top` is the Y of the
//! container's top edge; `bottom` is the Y of the container's bottom edge
//! (the caller anchors whichever one is set and lets content grow toward
//! the other). Exactly one of the two is set unless the container is
//! vertically centered, which sets `top`.
//!
//! # Responsive flipping
//!
//! When `responsive` is true and the requested vertical side lacks room
//! while the opposite side has it, the placement flips. The flip ladder is
//! evaluated in a fixed precedence order, first match wins, and is stable:
//! re-resolving with the flipped result as the new container measurement
//! does not flip back.

use serde::Serialize;

use crate::error::AlignError;
use crate::geometry::{Point, Rect, Size};

/// Vertical edge token: which edge of the target a vertical container edge
/// maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VEdge {
  Top,
  Bottom,
}

/// Horizontal edge token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HEdge {
  Left,
  Right,
}

/// Edge-to-edge alignment specification.
///
/// `top: Some(VEdge::Bottom)` reads "the container's top edge sits at the
/// target's bottom edge" (the drop opens below the anchor). At most one of
/// `top`/`bottom` and one of `left`/`right` may be set; leaving both of an
/// axis unset centers the container on that axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlignSpec {
  pub top: Option<VEdge>,
  pub bottom: Option<VEdge>,
  pub left: Option<HEdge>,
  pub right: Option<HEdge>,
}

impl Default for AlignSpec {
  /// The conventional drop alignment: below the anchor, left edges flush.
  fn default() -> Self {
    Self::below()
  }
}

impl AlignSpec {
  /// Container below the target, left edges aligned.
  pub const fn below() -> Self {
    Self {
      top: Some(VEdge::Bottom),
      bottom: None,
      left: Some(HEdge::Left),
      right: None,
    }
  }

  /// Container above the target, left edges aligned.
  pub const fn above() -> Self {
    Self {
      top: None,
      bottom: Some(VEdge::Top),
      left: Some(HEdge::Left),
      right: None,
    }
  }

  /// Centered on the target on both axes.
  pub const fn center() -> Self {
    Self {
      top: None,
      bottom: None,
      left: None,
      right: None,
    }
  }

  /// Checks the per-axis invariant: at most one vertical and one
  /// horizontal token.
  pub fn validate(&self) -> Result<(), AlignError> {
    if self.top.is_some() && self.bottom.is_some() {
      return Err(AlignError::ConflictingVertical);
    }
    if self.left.is_some() && self.right.is_some() {
      return Err(AlignError::ConflictingHorizontal);
    }
    Ok(())
  }
}

/// Policy controlling how the container's width relates to the target's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stretch {
  /// Don't stretch; keep the container's own width (viewport-clipped).
  None,
  /// At least as wide as the target (the default).
  #[default]
  Width,
  /// Exactly as wide as the narrower of target and container.
  Align,
}

/// Computed inline geometry for a drop container.
///
/// Transient output: recomputed from scratch on every trigger and written
/// onto the container's inline style. Serializable for debug snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Geometry {
  /// X of the container's left edge.
  pub left: f32,
  /// Y of the container's top edge, when top-anchored or centered.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub top: Option<f32>,
  /// Y of the container's bottom edge, when bottom-anchored.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub bottom: Option<f32>,
  /// Container width.
  pub width: f32,
  /// Cap on the container's height, when the anchored side constrains it.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub max_height: Option<f32>,
}

impl Geometry {
  /// Re-expresses viewport-relative geometry relative to a containing
  /// block, using the block's border-box rect and its own scroll offsets.
  pub fn relative_to(mut self, block: Rect, block_scroll: Point) -> Self {
    self.left = self.left - block.left() + block_scroll.x;
    if let Some(top) = self.top {
      self.top = Some(top - block.top() + block_scroll.y);
    }
    if let Some(bottom) = self.bottom {
      self.bottom = Some(bottom - block.top() + block_scroll.y);
    }
    self
  }
}

/// Computes drop geometry for a target/container pair.
///
/// `target` and `container` are measured border-box rects, `viewport` the
/// window size. The result honors `align` subject to the width policy in
/// `stretch`, horizontal viewport clamping, and (when `responsive`) the
/// vertical flip ladder.
pub fn compute_geometry(
  target: Rect,
  container: Rect,
  viewport: Size,
  align: &AlignSpec,
  stretch: Stretch,
  responsive: bool,
) -> Geometry {
  let width = match stretch {
    Stretch::Align => target.width.min(container.width),
    Stretch::Width => target.width.max(container.width),
    Stretch::None => container.width,
  }
  .min(viewport.width);

  let mut left = match (align.left, align.right) {
    (Some(HEdge::Left), _) => target.left(),
    (Some(HEdge::Right), _) => target.right(),
    (None, Some(HEdge::Left)) => target.left() - width,
    (None, Some(HEdge::Right)) => target.right() - width,
    (None, None) => target.center_x() - width / 2.0,
  };
  // Shift back inside the viewport, right edge first so a full-width
  // container settles at zero.
  if left + width > viewport.width {
    left = viewport.width - width;
  }
  if left < 0.0 {
    left = 0.0;
  }

  let (top, bottom, max_height) =
    resolve_vertical(target, container.height, viewport.height, align, responsive);

  Geometry {
    left,
    top,
    bottom,
    width,
    max_height,
  }
}

/// The vertical flip ladder. First match wins; order is load-bearing.
fn resolve_vertical(
  target: Rect,
  container_height: f32,
  viewport_height: f32,
  align: &AlignSpec,
  responsive: bool,
) -> (Option<f32>, Option<f32>, Option<f32>) {
  let fits_above_target_top = target.top() - container_height > 0.0;
  let fits_above_target_bottom = target.bottom() - container_height > 0.0;
  let fits_below_target_bottom = target.bottom() + container_height < viewport_height;
  let fits_below_target_top = target.top() + container_height < viewport_height;

  if responsive {
    // 1. Requested above (container bottom at target top) but no room
    //    above, and it fits below: open below instead.
    if align.bottom == Some(VEdge::Top) && !fits_above_target_top && fits_below_target_bottom {
      return (
        Some(target.bottom()),
        None,
        Some(viewport_height - target.bottom()),
      );
    }
    // 2. Requested below (container top at target bottom) but no room
    //    below, and it fits above: open above instead.
    if align.top == Some(VEdge::Bottom) && !fits_below_target_bottom && fits_above_target_top {
      return (None, Some(target.top()), Some(target.top()));
    }
    // 3. The bottom-aligned variants of the same two flips.
    if align.top == Some(VEdge::Top) && !fits_below_target_top && fits_above_target_bottom {
      return (None, Some(target.bottom()), Some(target.bottom()));
    }
    if align.bottom == Some(VEdge::Bottom) && !fits_above_target_bottom && fits_below_target_top {
      return (
        Some(target.top()),
        None,
        Some(viewport_height - target.top()),
      );
    }
  }

  // 4. No flip: honor the literal token, capping max-height to the
  //    remaining viewport space in the anchored direction.
  match (align.top, align.bottom) {
    (Some(VEdge::Top), _) => (
      Some(target.top()),
      None,
      Some(viewport_height - target.top()),
    ),
    (Some(VEdge::Bottom), _) => (
      Some(target.bottom()),
      None,
      Some(viewport_height - target.bottom()),
    ),
    (None, Some(VEdge::Top)) => (None, Some(target.top()), Some(target.top())),
    (None, Some(VEdge::Bottom)) => (None, Some(target.bottom()), Some(target.bottom())),
    // 5. Neither token: center vertically, no cap.
    (None, None) => (
      Some(target.center_y() - container_height / 2.0),
      None,
      None,
    ),
  }
}
