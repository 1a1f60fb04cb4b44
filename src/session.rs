//! Placement session: the positioning controller
//!
//! A [`PlacementSession`] owns the lifecycle of one positioned container:
//!
//! ```text
//! Unmounted --start()--> Placed --recompute(Scroll|Resize)--> Placed
//!                          |
//!                        stop()
//!                          v
//!                      Unmounted
//! ```
//!
//! `start` attaches a scroll listener to every scrollable ancestor of the
//! target plus one window resize listener, then runs the initial placement.
//! Scroll triggers re-place with a fresh `max_height`; resize triggers
//! first re-attach the scroll listeners (the target's scrollable ancestry
//! may have changed) and re-place with `max_height` preserved, so a panel
//! scrolled internally keeps its scroll position. `stop` detaches
//! everything; a stopped session leaves no listeners behind.
//!
//! A placement pass with a dead target or container id is a silent no-op
//! that retries on the next trigger.

use log::{debug, trace};
use serde::Serialize;

use crate::align::{compute_geometry, AlignSpec, Geometry, Stretch};
use crate::containing::{containing_block, scroll_parents};
use crate::dom::{ElementId, ElementTree};
use crate::events::{EventHub, ListenerId};

/// What caused a placement pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
  Mount,
  Resize,
  Scroll,
}

impl Trigger {
  /// Resize passes keep the previous `max_height` through the style clear.
  fn preserves_height(self) -> bool {
    matches!(self, Self::Resize)
  }
}

/// Which vertical edge ended up anchoring the container, reported through
/// the `on_align` callback after each placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignedEdge {
  Top,
  Bottom,
}

/// Serializable view of a session's last placement, for debug inspection.
#[derive(Debug, Clone, Serialize)]
pub struct PlacementSnapshot {
  pub trigger: Trigger,
  pub geometry: Geometry,
  pub edge: AlignedEdge,
  pub scroll_listeners: usize,
}

/// Positioning controller for one target/container pair.
#[derive(Debug)]
pub struct PlacementSession {
  target: ElementId,
  container: ElementId,
  align: AlignSpec,
  stretch: Stretch,
  responsive: bool,
  check_containing_block: bool,
  max_height_cap: Option<f32>,
  scroll_listeners: Vec<(ElementId, ListenerId)>,
  resize_listener: Option<ListenerId>,
  last: Option<PlacementSnapshot>,
}

impl PlacementSession {
  /// Creates an unstarted session.
  pub fn new(
    target: ElementId,
    container: ElementId,
    align: AlignSpec,
    stretch: Stretch,
    responsive: bool,
    check_containing_block: bool,
  ) -> Self {
    Self {
      target,
      container,
      align,
      stretch,
      responsive,
      check_containing_block,
      max_height_cap: None,
      scroll_listeners: Vec::new(),
      resize_listener: None,
      last: None,
    }
  }

  /// Caps every computed `max_height` at `cap` pixels, including passes
  /// that would otherwise leave the height unconstrained (vertical
  /// centering). Themes feed their height constraint in here.
  pub fn with_max_height(mut self, cap: Option<f32>) -> Self {
    self.max_height_cap = cap;
    self
  }

  /// The anchor element.
  pub fn target(&self) -> ElementId {
    self.target
  }

  /// The positioned container element.
  pub fn container(&self) -> ElementId {
    self.container
  }

  /// Attaches listeners and runs the initial placement. Listeners are
  /// fully attached before the first placement of a generation, so no
  /// trigger between the two can be missed. Restarting an already-started
  /// session re-attaches from scratch.
  pub fn start(&mut self, tree: &mut ElementTree, hub: &mut EventHub) -> Option<AlignedEdge> {
    self.detach(hub);
    self.attach_scroll_listeners(tree, hub);
    self.resize_listener = Some(hub.add_resize());
    debug!(
      "placement session start: target={} container={} scroll_listeners={}",
      self.target.index(),
      self.container.index(),
      self.scroll_listeners.len()
    );
    self.place(tree, Trigger::Mount)
  }

  /// Detaches every listener this session registered.
  pub fn stop(&mut self, hub: &mut EventHub) {
    debug!(
      "placement session stop: container={}",
      self.container.index()
    );
    self.detach(hub);
  }

  /// Re-places the container for the given trigger. Resize triggers also
  /// refresh the scroll-listener set.
  pub fn recompute(
    &mut self,
    tree: &mut ElementTree,
    hub: &mut EventHub,
    trigger: Trigger,
  ) -> Option<AlignedEdge> {
    if trigger == Trigger::Resize {
      self.detach_scroll_listeners(hub);
      self.attach_scroll_listeners(tree, hub);
    }
    self.place(tree, trigger)
  }

  /// Returns true if this session has a scroll listener on `element`.
  pub fn listens_to_scroll_of(&self, element: ElementId) -> bool {
    self
      .scroll_listeners
      .iter()
      .any(|&(listened, _)| listened == element)
  }

  /// The last placement, if one has happened.
  pub fn snapshot(&self) -> Option<&PlacementSnapshot> {
    self.last.as_ref()
  }

  fn attach_scroll_listeners(&mut self, tree: &ElementTree, hub: &mut EventHub) {
    for parent in scroll_parents(tree, self.target) {
      let id = hub.add_scroll(parent);
      self.scroll_listeners.push((parent, id));
    }
  }

  fn detach_scroll_listeners(&mut self, hub: &mut EventHub) {
    for (element, id) in self.scroll_listeners.drain(..) {
      hub.remove_scroll(element, id);
    }
  }

  fn detach(&mut self, hub: &mut EventHub) {
    self.detach_scroll_listeners(hub);
    if let Some(id) = self.resize_listener.take() {
      hub.remove_resize(id);
    }
  }

  /// One placement pass: clear inline styles, measure, resolve, apply.
  fn place(&mut self, tree: &mut ElementTree, trigger: Trigger) -> Option<AlignedEdge> {
    let target_rect = tree.rect(self.target)?;
    tree
      .inline_mut(self.container)?
      .clear(trigger.preserves_height());
    let container_rect = tree.measured_rect(self.container)?;
    let viewport = tree.viewport();

    let mut geometry = compute_geometry(
      target_rect,
      container_rect,
      viewport,
      &self.align,
      self.stretch,
      self.responsive,
    );
    if let Some(cap) = self.max_height_cap {
      geometry.max_height = Some(geometry.max_height.map_or(cap, |mh| mh.min(cap)));
    }
    if self.check_containing_block {
      if let Some(block) = containing_block(tree, self.container) {
        if let Some(block_rect) = tree.rect(block) {
          geometry = geometry.relative_to(block_rect, tree.scroll_offset(block));
        }
      }
    }

    let inline = tree.inline_mut(self.container)?;
    inline.left = Some(geometry.left);
    inline.top = geometry.top;
    inline.bottom = geometry.bottom;
    inline.width = Some(geometry.width);
    inline.max_height = geometry.max_height;

    // The reported edge is whichever style ended up anchoring the panel.
    let edge = if inline.top.is_some() {
      AlignedEdge::Top
    } else {
      AlignedEdge::Bottom
    };
    trace!(
      "placed container={} trigger={:?} edge={:?} left={} width={}",
      self.container.index(),
      trigger,
      edge,
      geometry.left,
      geometry.width
    );
    self.last = Some(PlacementSnapshot {
      trigger,
      geometry,
      edge,
      scroll_listeners: self.scroll_listeners.len(),
    });
    Some(edge)
  }
}
