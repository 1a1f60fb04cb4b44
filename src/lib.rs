//! dropkit — floating-panel positioning engine
//!
//! Computes and continuously maintains the position of a floating panel
//! (a "drop") relative to an anchor element: viewport clamping, responsive
//! vertical flipping, scroll-ancestor tracking, nested overlay stacking via
//! portal ids, and focus/escape handling.
//!
//! The engine is DOM-free. Hosts mirror the relevant part of their
//! document into an [`ElementTree`], mount drops on a [`DropStack`], and
//! feed scroll/resize/pointer/key events through
//! [`DropStack::dispatch`]; the engine writes computed geometry back as
//! the container's [`InlineStyle`].
//!
//! The pure core is [`compute_geometry`]: alignment resolution with the
//! responsive-flip ladder, usable on bare rectangles without any tree.
//!
//! # Example
//!
//! ```
//! use dropkit::{
//!   AlignSpec, DropCallbacks, DropOptions, ElementTree, DropStack, Rect, Size,
//!   PortalChain,
//! };
//!
//! let mut tree = ElementTree::new(Size::new(800.0, 600.0));
//! let anchor = tree.create_element();
//! let root = tree.root();
//! tree.append_child(root, anchor).unwrap();
//! tree.set_rect(anchor, Rect::from_xywh(100.0, 100.0, 80.0, 40.0));
//! let panel = tree.create_element();
//! tree.append_child(root, panel).unwrap();
//! tree.set_rect(panel, Rect::from_xywh(0.0, 0.0, 160.0, 200.0));
//!
//! let mut stack = DropStack::new(tree);
//! let drop = stack
//!   .mount(
//!     anchor,
//!     panel,
//!     PortalChain::root(),
//!     DropOptions { align: AlignSpec::below(), ..DropOptions::default() },
//!     DropCallbacks::default(),
//!   )
//!   .unwrap();
//!
//! let inline = stack.tree().inline(panel).unwrap();
//! assert_eq!(inline.top, Some(140.0));
//! assert_eq!(inline.left, Some(100.0));
//! # stack.unmount(drop);
//! ```

pub mod align;
pub mod containing;
pub mod dom;
pub mod drop;
pub mod error;
pub mod events;
pub mod focus;
pub mod geometry;
pub mod metric;
pub mod portal;
pub mod session;
pub mod theme;

pub use align::{compute_geometry, AlignSpec, Geometry, HEdge, Stretch, VEdge};
pub use containing::{containing_block, scroll_parents};
pub use dom::{CssPosition, ElementId, ElementStyle, ElementTree, InlineStyle, Overflow};
pub use drop::{DropCallbacks, DropId, DropOptions, DropStack};
pub use error::{AlignError, DomError, Error, Result};
pub use events::{Event, EventHub, Key, ListenerId};
pub use focus::FocusPolicy;
pub use geometry::{Point, Rect, Size};
pub use metric::{parse_metric, Metric};
pub use portal::{PortalChain, PortalId, PORTAL_ID_ATTRIBUTE};
pub use session::{AlignedEdge, PlacementSession, PlacementSnapshot, Trigger};
pub use theme::{DropPresentation, DropTheme};
