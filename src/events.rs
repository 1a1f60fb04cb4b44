//! Synchronous event plumbing
//!
//! The engine is event-loop driven: hosts feed scroll, resize,
//! pointer-down and key-down events into the [`DropStack`](crate::DropStack)
//! and all work happens synchronously inside that dispatch. [`EventHub`] is
//! the listener ledger backing it: every listener an overlay attaches is
//! registered here with a [`ListenerId`] and removed on teardown, so "no
//! dangling listeners after unmount" is a checkable property rather than a
//! convention.

use rustc_hash::FxHashMap;

use crate::dom::ElementId;

/// Identifier for a registered listener.
pub type ListenerId = usize;

/// Keys the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
  Escape,
  Tab,
  /// Any key the engine does not inspect further.
  Other,
}

/// A host event fed into [`DropStack::dispatch`](crate::DropStack::dispatch).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
  /// A scroll container (or the document root, for window scrolling)
  /// scrolled.
  Scroll { element: ElementId },
  /// The window resized. The host should update the tree's viewport and
  /// any affected rects before dispatching.
  Resize,
  /// A pointer went down on `target`. `composed` marks events that crossed
  /// a shadow boundary and carry a composed path.
  PointerDown { target: ElementId, composed: bool },
  /// A key went down at the document level.
  KeyDown { key: Key },
}

/// Registry of live listeners.
///
/// The hub does not hold callbacks; routing stays with the stack, which
/// knows which overlay owns which listener. The hub's job is deterministic
/// attach/detach accounting.
#[derive(Debug, Default)]
pub struct EventHub {
  next: ListenerId,
  scroll: FxHashMap<ElementId, Vec<ListenerId>>,
  resize: Vec<ListenerId>,
  pointer_down: Vec<ListenerId>,
  key_down: Vec<ListenerId>,
}

impl EventHub {
  pub fn new() -> Self {
    Self::default()
  }

  fn allocate(&mut self) -> ListenerId {
    let id = self.next;
    self.next += 1;
    id
  }

  /// Registers a scroll listener on an element.
  pub fn add_scroll(&mut self, element: ElementId) -> ListenerId {
    let id = self.allocate();
    self.scroll.entry(element).or_default().push(id);
    id
  }

  /// Removes a scroll listener.
  pub fn remove_scroll(&mut self, element: ElementId, id: ListenerId) {
    if let Some(ids) = self.scroll.get_mut(&element) {
      ids.retain(|&entry| entry != id);
      if ids.is_empty() {
        self.scroll.remove(&element);
      }
    }
  }

  /// Registers a window resize listener.
  pub fn add_resize(&mut self) -> ListenerId {
    let id = self.allocate();
    self.resize.push(id);
    id
  }

  /// Removes a resize listener.
  pub fn remove_resize(&mut self, id: ListenerId) {
    self.resize.retain(|&entry| entry != id);
  }

  /// Registers a document pointer-down listener.
  pub fn add_pointer_down(&mut self) -> ListenerId {
    let id = self.allocate();
    self.pointer_down.push(id);
    id
  }

  /// Removes a pointer-down listener.
  pub fn remove_pointer_down(&mut self, id: ListenerId) {
    self.pointer_down.retain(|&entry| entry != id);
  }

  /// Registers a document-level capture-phase key-down listener.
  pub fn add_key_down(&mut self) -> ListenerId {
    let id = self.allocate();
    self.key_down.push(id);
    id
  }

  /// Removes a key-down listener.
  pub fn remove_key_down(&mut self, id: ListenerId) {
    self.key_down.retain(|&entry| entry != id);
  }

  /// Number of scroll listeners attached to an element.
  pub fn scroll_listener_count(&self, element: ElementId) -> usize {
    self.scroll.get(&element).map_or(0, Vec::len)
  }

  /// Total number of live listeners of any kind.
  pub fn listener_count(&self) -> usize {
    self.scroll.values().map(Vec::len).sum::<usize>()
      + self.resize.len()
      + self.pointer_down.len()
      + self.key_down.len()
  }
}
