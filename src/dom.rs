//! Element arena standing in for the document tree
//!
//! The positioning engine is DOM-free: callers describe the relevant slice
//! of their document as a tree of elements with border-box rectangles, a
//! small computed-style subset, scroll offsets and string attributes. The
//! engine reads target geometry from this tree and writes the container's
//! inline positioning styles back into it.
//!
//! # Ownership
//!
//! Nodes live in an arena and are addressed by [`ElementId`]. Structural
//! mutation (`append_child`) validates its inputs and returns
//! [`DomError`](crate::error::DomError) on misuse; read paths return
//! `Option` and per-node setters silently ignore unknown ids, matching the
//! engine's no-op failure policy.
//!
//! # Shadow roots
//!
//! A node can be flagged as a shadow root. Plain ancestry walks
//! ([`ElementTree::ancestors`]) stop when they would cross out of a shadow
//! root; the composed path ([`ElementTree::composed_path`]) crosses the
//! boundary the way a composed DOM event would.

use rustc_hash::FxHashMap;

use crate::error::DomError;
use crate::geometry::{Point, Rect, Size};

/// Handle to an element in an [`ElementTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) usize);

impl ElementId {
  /// The raw arena index.
  pub fn index(self) -> usize {
    self.0
  }
}

/// CSS `position` values the engine distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CssPosition {
  #[default]
  Static,
  Relative,
  Absolute,
  Fixed,
  Sticky,
}

impl CssPosition {
  /// Returns true for any non-static position, i.e. the element is an
  /// offset parent for its descendants.
  pub fn is_positioned(self) -> bool {
    !matches!(self, Self::Static)
  }
}

/// CSS `overflow` values the engine distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
  #[default]
  Visible,
  Hidden,
  Scroll,
  Auto,
}

impl Overflow {
  /// Returns true if this overflow value makes the element a scroll
  /// container (`scroll` or `auto`).
  pub fn is_scrollable(self) -> bool {
    matches!(self, Self::Scroll | Self::Auto)
  }
}

/// The computed-style subset the positioning engine reads.
///
/// Everything else about an element's style is irrelevant to placement and
/// deliberately absent.
#[derive(Debug, Clone, Default)]
pub struct ElementStyle {
  pub position: CssPosition,
  /// Non-default `transform`.
  pub transform: bool,
  /// Non-default `perspective`.
  pub perspective: bool,
  /// Non-default `backdrop-filter`.
  pub backdrop_filter: bool,
  /// `contain: paint` (or a shorthand implying it).
  pub contain_paint: bool,
  /// `will-change` property names, lowercased.
  pub will_change: Vec<String>,
  pub overflow_x: Overflow,
  pub overflow_y: Overflow,
}

impl ElementStyle {
  /// Returns true if this style establishes a CSS containing block for
  /// fixed/absolute descendants: a non-default transform, perspective or
  /// backdrop-filter, `contain: paint`, or a `will-change` naming one of
  /// those properties.
  pub fn establishes_containing_block(&self) -> bool {
    self.transform
      || self.perspective
      || self.backdrop_filter
      || self.contain_paint
      || self
        .will_change
        .iter()
        .any(|name| matches!(name.as_str(), "transform" | "perspective" | "filter"))
  }

  /// Returns true if either axis makes the element a scroll container.
  pub fn is_scroll_container(&self) -> bool {
    self.overflow_x.is_scrollable() || self.overflow_y.is_scrollable()
  }
}

/// Inline positioning styles written onto the drop container.
///
/// `left`, `top` and `width` are viewport coordinates in CSS pixels.
/// `bottom` is the Y coordinate of the container's bottom edge (not the CSS
/// `bottom` offset). `None` means the property is unset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InlineStyle {
  pub left: Option<f32>,
  pub top: Option<f32>,
  pub bottom: Option<f32>,
  pub width: Option<f32>,
  pub max_height: Option<f32>,
}

impl InlineStyle {
  /// Clears positioning properties ahead of a fresh measurement.
  /// `preserve_max_height` keeps `max_height` in place so a panel scrolled
  /// internally does not lose its scroll position across a reflow.
  pub fn clear(&mut self, preserve_max_height: bool) {
    self.left = None;
    self.top = None;
    self.bottom = None;
    self.width = None;
    if !preserve_max_height {
      self.max_height = None;
    }
  }
}

#[derive(Debug, Clone, Default)]
struct Element {
  parent: Option<ElementId>,
  children: Vec<ElementId>,
  rect: Rect,
  scroll: Point,
  style: ElementStyle,
  inline: InlineStyle,
  attributes: FxHashMap<String, String>,
  shadow_root: bool,
}

/// Arena of elements plus document-wide state (viewport size, focus).
///
/// The root element represents the document (`html`/`body` collapsed into
/// one node); its rect is the viewport.
#[derive(Debug, Default)]
pub struct ElementTree {
  nodes: Vec<Element>,
  focused: Option<ElementId>,
}

impl ElementTree {
  /// Creates a tree whose root rect spans the given viewport.
  pub fn new(viewport: Size) -> Self {
    let root = Element {
      rect: Rect::from_origin_size(Point::ZERO, viewport),
      ..Element::default()
    };
    Self {
      nodes: vec![root],
      focused: None,
    }
  }

  /// The document root.
  pub fn root(&self) -> ElementId {
    ElementId(0)
  }

  /// The viewport size (the root element's rect).
  pub fn viewport(&self) -> Size {
    self.nodes[0].rect.size()
  }

  /// Resizes the viewport (the root element's rect).
  pub fn set_viewport(&mut self, viewport: Size) {
    self.nodes[0].rect = Rect::from_origin_size(Point::ZERO, viewport);
  }

  /// Creates a detached element; attach it with [`Self::append_child`].
  pub fn create_element(&mut self) -> ElementId {
    let id = ElementId(self.nodes.len());
    self.nodes.push(Element::default());
    id
  }

  /// Attaches `child` under `parent`.
  pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<(), DomError> {
    if parent.0 >= self.nodes.len() {
      return Err(DomError::UnknownElement(parent.0));
    }
    if child.0 >= self.nodes.len() {
      return Err(DomError::UnknownElement(child.0));
    }
    if child == self.root() {
      return Err(DomError::CircularAttachment(child.0));
    }
    if self.nodes[child.0].parent.is_some() {
      return Err(DomError::AlreadyAttached(child.0));
    }
    // Walking up from the parent must not reach the child.
    let mut cursor = Some(parent);
    while let Some(node) = cursor {
      if node == child {
        return Err(DomError::CircularAttachment(child.0));
      }
      cursor = self.nodes[node.0].parent;
    }
    self.nodes[child.0].parent = Some(parent);
    self.nodes[parent.0].children.push(child);
    Ok(())
  }

  fn get(&self, id: ElementId) -> Option<&Element> {
    self.nodes.get(id.0)
  }

  fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
    self.nodes.get_mut(id.0)
  }

  /// The element's border-box rect, if the id is live.
  pub fn rect(&self, id: ElementId) -> Option<Rect> {
    self.get(id).map(|node| node.rect)
  }

  /// Sets the element's border-box rect. Unknown ids are ignored.
  pub fn set_rect(&mut self, id: ElementId, rect: Rect) {
    if let Some(node) = self.get_mut(id) {
      node.rect = rect;
    }
  }

  /// The element's rect with inline positioning applied: an inline `width`
  /// overrides the measured width and `max_height` caps the measured
  /// height. This is what a re-measure after a placement pass observes.
  pub fn measured_rect(&self, id: ElementId) -> Option<Rect> {
    let node = self.get(id)?;
    let mut rect = node.rect;
    if let Some(width) = node.inline.width {
      rect.width = width;
    }
    if let Some(max_height) = node.inline.max_height {
      rect.height = rect.height.min(max_height);
    }
    Some(rect)
  }

  /// The element's scroll offset.
  pub fn scroll_offset(&self, id: ElementId) -> Point {
    self.get(id).map(|node| node.scroll).unwrap_or(Point::ZERO)
  }

  /// Sets the element's scroll offset. Unknown ids are ignored.
  pub fn set_scroll_offset(&mut self, id: ElementId, offset: Point) {
    if let Some(node) = self.get_mut(id) {
      node.scroll = offset;
    }
  }

  /// Immutable style access.
  pub fn style(&self, id: ElementId) -> Option<&ElementStyle> {
    self.get(id).map(|node| &node.style)
  }

  /// Mutable style access.
  pub fn style_mut(&mut self, id: ElementId) -> Option<&mut ElementStyle> {
    self.get_mut(id).map(|node| &mut node.style)
  }

  /// The container's inline positioning styles.
  pub fn inline(&self, id: ElementId) -> Option<&InlineStyle> {
    self.get(id).map(|node| &node.inline)
  }

  /// Mutable inline-style access.
  pub fn inline_mut(&mut self, id: ElementId) -> Option<&mut InlineStyle> {
    self.get_mut(id).map(|node| &mut node.inline)
  }

  /// Sets a string attribute. Unknown ids are ignored.
  pub fn set_attribute(&mut self, id: ElementId, name: &str, value: impl Into<String>) {
    if let Some(node) = self.get_mut(id) {
      node.attributes.insert(name.to_owned(), value.into());
    }
  }

  /// Reads a string attribute.
  pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
    self.get(id)?.attributes.get(name).map(String::as_str)
  }

  /// Removes a string attribute.
  pub fn remove_attribute(&mut self, id: ElementId, name: &str) {
    if let Some(node) = self.get_mut(id) {
      node.attributes.remove(name);
    }
  }

  /// Marks the element as a shadow root.
  pub fn set_shadow_root(&mut self, id: ElementId, shadow_root: bool) {
    if let Some(node) = self.get_mut(id) {
      node.shadow_root = shadow_root;
    }
  }

  /// Returns true if the element is a shadow root.
  pub fn is_shadow_root(&self, id: ElementId) -> bool {
    self.get(id).is_some_and(|node| node.shadow_root)
  }

  /// The element's parent, if attached.
  pub fn parent(&self, id: ElementId) -> Option<ElementId> {
    self.get(id)?.parent
  }

  /// Plain ancestry from `id`'s parent to the root, stopping at the first
  /// shadow-root boundary (the shadow root itself is yielded, nothing
  /// above it).
  pub fn ancestors(&self, id: ElementId) -> Vec<ElementId> {
    let mut chain = Vec::new();
    let mut cursor = self.parent(id);
    while let Some(node) = cursor {
      chain.push(node);
      if self.is_shadow_root(node) {
        break;
      }
      cursor = self.parent(node);
    }
    chain
  }

  /// The composed path from `id` (inclusive) to the root, crossing
  /// shadow-root boundaries the way a composed DOM event would.
  pub fn composed_path(&self, id: ElementId) -> Vec<ElementId> {
    let mut path = Vec::new();
    let mut cursor = Some(id);
    while let Some(node) = cursor {
      if self.get(node).is_none() {
        break;
      }
      path.push(node);
      cursor = self.parent(node);
    }
    path
  }

  /// Returns true if `descendant` is `ancestor` or inside its subtree.
  pub fn contains(&self, ancestor: ElementId, descendant: ElementId) -> bool {
    let mut cursor = Some(descendant);
    while let Some(node) = cursor {
      if node == ancestor {
        return true;
      }
      cursor = self.parent(node);
    }
    false
  }

  /// The currently focused element.
  pub fn focused(&self) -> Option<ElementId> {
    self.focused
  }

  /// Moves focus to the element. Unknown ids clear focus.
  pub fn set_focus(&mut self, id: ElementId) {
    self.focused = if self.get(id).is_some() { Some(id) } else { None };
  }

  /// Clears focus.
  pub fn clear_focus(&mut self) {
    self.focused = None;
  }
}
