//! Drop overlay orchestration
//!
//! [`DropStack`] owns the element tree, the listener ledger and every
//! mounted overlay, and routes host events to them. One mounted
//! [`DropOverlay`] bundles the pieces specified elsewhere: a
//! [`PlacementSession`] for geometry, a portal identity for outside-click
//! adjudication, a [`FocusPolicy`] and the consumer callbacks.
//!
//! Event routing (all synchronous, in [`DropStack::dispatch`]):
//! - `Scroll`: re-places every overlay listening to that scroll container,
//!   with a fresh `max_height`.
//! - `Resize`: re-places every overlay with height preserved, after
//!   refreshing its scroll listeners.
//! - `PointerDown`: resolves the clicked portal id once, then asks each
//!   overlay's dismissal rule whether to invoke `on_click_outside`.
//! - `KeyDown(Escape)`: capture order, innermost overlay first; the first
//!   overlay with an `on_esc` handler consumes the key and stops
//!   propagation, so ancestor overlays never see it.

use log::debug;
use rustc_hash::FxHashMap;

use crate::align::{AlignSpec, Stretch};
use crate::dom::{ElementId, ElementTree};
use crate::error::Result;
use crate::events::{Event, EventHub, Key, ListenerId};
use crate::focus::{contain_focus, restrict_focus, FocusPolicy};
use crate::portal::{
  next_portal_id, portal_id_at, should_dismiss, PortalChain, PortalId, PORTAL_ID_ATTRIBUTE,
};
use crate::session::{AlignedEdge, PlacementSession, PlacementSnapshot, Trigger};
use crate::theme::{DropPresentation, DropTheme};

/// Handle to a mounted overlay within a [`DropStack`].
pub type DropId = usize;

/// Per-drop behavior options.
#[derive(Debug, Clone)]
pub struct DropOptions {
  pub align: AlignSpec,
  pub stretch: Stretch,
  /// Flip vertical placement when the requested side lacks room.
  pub responsive: bool,
  /// Move focus into the overlay on mount.
  pub restrict_focus: bool,
  /// Keep focus inside the overlay while open.
  pub trap_focus: bool,
  /// Express applied geometry relative to the nearest CSS containing
  /// block instead of the viewport (backward-compatibility flag).
  pub check_containing_block: bool,
  /// Skip theme decoration entirely.
  pub plain: bool,
  pub elevation: Option<String>,
  pub background: Option<String>,
  pub overflow: Option<String>,
}

impl Default for DropOptions {
  fn default() -> Self {
    Self {
      align: AlignSpec::default(),
      stretch: Stretch::default(),
      responsive: true,
      restrict_focus: false,
      trap_focus: false,
      check_containing_block: false,
      plain: false,
      elevation: None,
      background: None,
      overflow: None,
    }
  }
}

/// Consumer callbacks. All are optional; the pointer-down and key-down
/// document listeners are only attached when the corresponding handler is
/// present.
#[derive(Default)]
pub struct DropCallbacks {
  /// Invoked with the anchoring edge after every placement.
  pub on_align: Option<Box<dyn FnMut(AlignedEdge)>>,
  /// Invoked when a pointer-down should dismiss the overlay.
  pub on_click_outside: Option<Box<dyn FnMut(&Event)>>,
  /// Invoked when this overlay consumes an escape press.
  pub on_esc: Option<Box<dyn FnMut()>>,
}

struct DropOverlay {
  portal_id: PortalId,
  chain: PortalChain,
  session: PlacementSession,
  callbacks: DropCallbacks,
  policy: FocusPolicy,
  presentation: DropPresentation,
  pointer_listener: Option<ListenerId>,
  key_listener: Option<ListenerId>,
}

/// Owner of the element tree and every mounted overlay.
pub struct DropStack {
  tree: ElementTree,
  hub: EventHub,
  theme: DropTheme,
  overlays: Vec<Option<DropOverlay>>,
  mount_order: Vec<DropId>,
}

impl DropStack {
  /// Creates a stack over a tree, with default theming.
  pub fn new(tree: ElementTree) -> Self {
    Self::with_theme(tree, DropTheme::default())
  }

  /// Creates a stack with an explicit theme.
  pub fn with_theme(tree: ElementTree, theme: DropTheme) -> Self {
    Self {
      tree,
      hub: EventHub::new(),
      theme,
      overlays: Vec::new(),
      mount_order: Vec::new(),
    }
  }

  /// The element tree.
  pub fn tree(&self) -> &ElementTree {
    &self.tree
  }

  /// Mutable access to the element tree, for hosts updating rects and
  /// scroll offsets between dispatches.
  pub fn tree_mut(&mut self) -> &mut ElementTree {
    &mut self.tree
  }

  /// The listener ledger, for asserting attach/detach balance.
  pub fn hub(&self) -> &EventHub {
    &self.hub
  }

  /// Mounts an overlay positioning `container` against `drop_target`.
  /// `parent_chain` is the portal context inherited from the overlay (if
  /// any) this one is nested under; pass [`PortalChain::root`] for a
  /// top-level drop.
  pub fn mount(
    &mut self,
    drop_target: ElementId,
    container: ElementId,
    parent_chain: PortalChain,
    options: DropOptions,
    callbacks: DropCallbacks,
  ) -> Result<DropId> {
    options.align.validate()?;

    let portal_id = next_portal_id();
    let chain = parent_chain.child(portal_id);
    self
      .tree
      .set_attribute(container, PORTAL_ID_ATTRIBUTE, portal_id.to_string());

    let presentation = DropPresentation::resolve(
      &self.theme,
      options.plain,
      options.elevation.as_deref(),
      options.background.as_deref(),
      options.overflow.as_deref(),
    );

    let mut session = PlacementSession::new(
      drop_target,
      container,
      options.align,
      options.stretch,
      options.responsive,
      options.check_containing_block,
    )
    .with_max_height(presentation.max_height);
    let mut callbacks = callbacks;
    // Listeners attach before the initial placement inside start().
    let edge = session.start(&mut self.tree, &mut self.hub);
    if let (Some(edge), Some(on_align)) = (edge, callbacks.on_align.as_mut()) {
      on_align(edge);
    }

    let policy = FocusPolicy {
      restrict: options.restrict_focus,
      trap: options.trap_focus,
    };
    if policy.restrict {
      restrict_focus(&mut self.tree, container);
    }

    let pointer_listener = callbacks
      .on_click_outside
      .is_some()
      .then(|| self.hub.add_pointer_down());
    let key_listener = (callbacks.on_esc.is_some() || policy.trap)
      .then(|| self.hub.add_key_down());

    let id = self.overlays.len();
    self.overlays.push(Some(DropOverlay {
      portal_id,
      chain,
      session,
      callbacks,
      policy,
      presentation,
      pointer_listener,
      key_listener,
    }));
    self.mount_order.push(id);
    debug!(
      "drop mounted: id={id} portal={portal_id} depth={}",
      self.chain(id).map_or(0, PortalChain::depth)
    );
    Ok(id)
  }

  /// Unmounts an overlay, detaching every listener it registered. Unknown
  /// or already-unmounted ids are ignored.
  pub fn unmount(&mut self, id: DropId) {
    let Some(slot) = self.overlays.get_mut(id) else {
      return;
    };
    let Some(mut overlay) = slot.take() else {
      return;
    };
    overlay.session.stop(&mut self.hub);
    if let Some(listener) = overlay.pointer_listener {
      self.hub.remove_pointer_down(listener);
    }
    if let Some(listener) = overlay.key_listener {
      self.hub.remove_key_down(listener);
    }
    self
      .tree
      .remove_attribute(overlay.session.container(), PORTAL_ID_ATTRIBUTE);
    self.mount_order.retain(|&entry| entry != id);
    debug!("drop unmounted: id={id} portal={}", overlay.portal_id);
  }

  /// Returns true if the overlay is still mounted.
  pub fn is_mounted(&self, id: DropId) -> bool {
    self.overlays.get(id).is_some_and(Option::is_some)
  }

  /// The overlay's portal id.
  pub fn portal_id(&self, id: DropId) -> Option<PortalId> {
    self.overlay(id).map(|overlay| overlay.portal_id)
  }

  /// The overlay's full chain (ancestors plus its own id) — the context
  /// value to hand to drops nested under this one.
  pub fn chain(&self, id: DropId) -> Option<&PortalChain> {
    self.overlay(id).map(|overlay| &overlay.chain)
  }

  /// The overlay's resolved presentation.
  pub fn presentation(&self, id: DropId) -> Option<&DropPresentation> {
    self.overlay(id).map(|overlay| &overlay.presentation)
  }

  /// The overlay's last placement.
  pub fn snapshot(&self, id: DropId) -> Option<&PlacementSnapshot> {
    self.overlay(id).and_then(|overlay| overlay.session.snapshot())
  }

  fn overlay(&self, id: DropId) -> Option<&DropOverlay> {
    self.overlays.get(id).and_then(Option::as_ref)
  }

  /// Feeds one host event through the stack.
  pub fn dispatch(&mut self, event: Event) {
    match event {
      Event::Scroll { element } => self.on_scroll(element),
      Event::Resize => self.on_resize(),
      Event::PointerDown { target, composed } => self.on_pointer_down(event, target, composed),
      Event::KeyDown { key } => self.on_key_down(key),
    }
  }

  fn on_scroll(&mut self, element: ElementId) {
    for id in self.mount_order.clone() {
      let Some(overlay) = self.overlays[id].as_mut() else {
        continue;
      };
      if !overlay.session.listens_to_scroll_of(element) {
        continue;
      }
      let edge = overlay
        .session
        .recompute(&mut self.tree, &mut self.hub, Trigger::Scroll);
      if let (Some(edge), Some(on_align)) = (edge, overlay.callbacks.on_align.as_mut()) {
        on_align(edge);
      }
    }
  }

  fn on_resize(&mut self) {
    for id in self.mount_order.clone() {
      let Some(overlay) = self.overlays[id].as_mut() else {
        continue;
      };
      let edge = overlay
        .session
        .recompute(&mut self.tree, &mut self.hub, Trigger::Resize);
      if let (Some(edge), Some(on_align)) = (edge, overlay.callbacks.on_align.as_mut()) {
        on_align(edge);
      }
    }
  }

  fn on_pointer_down(&mut self, event: Event, target: ElementId, composed: bool) {
    let clicked = portal_id_at(&self.tree, target, composed);
    // A tagged ancestor whose overlay is no longer mounted is treated as
    // unrelated: attribute without registry entry never dismisses.
    let chains: FxHashMap<PortalId, PortalChain> = self
      .mount_order
      .iter()
      .filter_map(|&id| self.overlay(id))
      .map(|overlay| (overlay.portal_id, overlay.chain.clone()))
      .collect();
    let clicked_chain = clicked.and_then(|portal| chains.get(&portal));
    if clicked.is_some() && clicked_chain.is_none() {
      return;
    }
    let clicked_chain = clicked_chain.cloned();

    for id in self.mount_order.clone() {
      let Some(overlay) = self.overlays[id].as_mut() else {
        continue;
      };
      let Some(on_click_outside) = overlay.callbacks.on_click_outside.as_mut() else {
        continue;
      };
      let inside_target = self.tree.contains(overlay.session.target(), target);
      if should_dismiss(overlay.portal_id, inside_target, clicked_chain.as_ref()) {
        on_click_outside(&event);
      }
    }
  }

  fn on_key_down(&mut self, key: Key) {
    // Capture-phase order: deepest chain first, later mount breaking ties,
    // so a nested overlay always sees the key before its ancestors.
    let mut order: Vec<(usize, usize, DropId)> = self
      .mount_order
      .iter()
      .enumerate()
      .filter_map(|(position, &id)| {
        self
          .overlay(id)
          .map(|overlay| (overlay.chain.depth(), position, id))
      })
      .collect();
    order.sort_by(|a, b| b.cmp(a));

    match key {
      Key::Escape => {
        for (_, _, id) in order {
          let Some(overlay) = self.overlays[id].as_mut() else {
            continue;
          };
          if let Some(on_esc) = overlay.callbacks.on_esc.as_mut() {
            // Propagation stops here; ancestor overlays never react.
            on_esc();
            return;
          }
        }
      }
      Key::Tab | Key::Other => {
        for (_, _, id) in order {
          let Some(overlay) = self.overlays[id].as_ref() else {
            continue;
          };
          if overlay.policy.trap {
            let container = overlay.session.container();
            contain_focus(&mut self.tree, container);
            return;
          }
        }
      }
    }
  }
}
