//! Full lifecycle of a mounted drop: listener accounting, scroll and
//! resize re-placement, and teardown guarantees.

use std::cell::RefCell;
use std::rc::Rc;

use dropkit::{
  AlignSpec, AlignedEdge, DropCallbacks, DropOptions, DropStack, DropTheme, ElementId,
  ElementTree, Event, Overflow, PortalChain, Rect, Size, VEdge,
};

fn scrollable_fixture() -> (ElementTree, ElementId, ElementId, ElementId) {
  let mut tree = ElementTree::new(Size::new(800.0, 600.0));
  let scroller = tree.create_element();
  tree.append_child(tree.root(), scroller).unwrap();
  tree.style_mut(scroller).unwrap().overflow_y = Overflow::Auto;
  tree.set_rect(scroller, Rect::from_xywh(0.0, 0.0, 800.0, 600.0));
  let anchor = tree.create_element();
  tree.append_child(scroller, anchor).unwrap();
  tree.set_rect(anchor, Rect::from_xywh(100.0, 100.0, 80.0, 40.0));
  let panel = tree.create_element();
  tree.append_child(tree.root(), panel).unwrap();
  tree.set_rect(panel, Rect::from_xywh(0.0, 0.0, 160.0, 200.0));
  (tree, scroller, anchor, panel)
}

#[test]
fn mount_places_and_attaches_listeners() {
  let (tree, scroller, anchor, panel) = scrollable_fixture();
  let mut stack = DropStack::new(tree);
  let drop = stack
    .mount(
      anchor,
      panel,
      PortalChain::root(),
      DropOptions::default(),
      DropCallbacks::default(),
    )
    .unwrap();

  assert!(stack.is_mounted(drop));
  // One scroll listener on the scroller, one on the root, one resize.
  assert_eq!(stack.hub().scroll_listener_count(scroller), 1);
  assert_eq!(stack.hub().scroll_listener_count(stack.tree().root()), 1);
  assert_eq!(stack.hub().listener_count(), 3);

  let inline = stack.tree().inline(panel).unwrap();
  assert_eq!(inline.top, Some(140.0));
  assert_eq!(inline.left, Some(100.0));
  assert_eq!(inline.width, Some(160.0));
}

#[test]
fn scroll_of_an_ancestor_replaces_the_panel() {
  let (tree, scroller, anchor, panel) = scrollable_fixture();
  let mut stack = DropStack::new(tree);
  stack
    .mount(
      anchor,
      panel,
      PortalChain::root(),
      DropOptions::default(),
      DropCallbacks::default(),
    )
    .unwrap();

  // The anchor moved up while its ancestor scrolled.
  stack
    .tree_mut()
    .set_rect(anchor, Rect::from_xywh(100.0, 40.0, 80.0, 40.0));
  stack.dispatch(Event::Scroll { element: scroller });
  assert_eq!(stack.tree().inline(panel).unwrap().top, Some(80.0));
}

#[test]
fn scroll_of_an_unrelated_element_is_ignored() {
  let (tree, _, anchor, panel) = scrollable_fixture();
  let mut stack = DropStack::new(tree);
  stack
    .mount(
      anchor,
      panel,
      PortalChain::root(),
      DropOptions::default(),
      DropCallbacks::default(),
    )
    .unwrap();

  let unrelated = stack.tree_mut().create_element();
  let root = stack.tree().root();
  stack.tree_mut().append_child(root, unrelated).unwrap();
  stack
    .tree_mut()
    .set_rect(anchor, Rect::from_xywh(100.0, 40.0, 80.0, 40.0));
  stack.dispatch(Event::Scroll { element: unrelated });
  // Placement still reflects the mount-time anchor position.
  assert_eq!(stack.tree().inline(panel).unwrap().top, Some(140.0));
}

#[test]
fn on_align_reports_the_anchoring_edge() {
  let (tree, _, anchor, panel) = scrollable_fixture();
  let edges: Rc<RefCell<Vec<AlignedEdge>>> = Rc::default();
  let sink = Rc::clone(&edges);

  let mut stack = DropStack::new(tree);
  stack
    .mount(
      anchor,
      panel,
      PortalChain::root(),
      DropOptions::default(),
      DropCallbacks {
        on_align: Some(Box::new(move |edge| sink.borrow_mut().push(edge))),
        ..DropCallbacks::default()
      },
    )
    .unwrap();
  assert_eq!(edges.borrow().as_slice(), &[AlignedEdge::Top]);

  // Move the anchor to the bottom of the viewport; the next pass flips
  // above and reports a bottom anchoring.
  stack
    .tree_mut()
    .set_rect(anchor, Rect::from_xywh(100.0, 520.0, 80.0, 40.0));
  stack.dispatch(Event::Resize);
  assert_eq!(
    edges.borrow().as_slice(),
    &[AlignedEdge::Top, AlignedEdge::Bottom]
  );
}

#[test]
fn unmount_detaches_everything_and_silences_events() {
  let (tree, scroller, anchor, panel) = scrollable_fixture();
  let mut stack = DropStack::new(tree);
  let drop = stack
    .mount(
      anchor,
      panel,
      PortalChain::root(),
      DropOptions::default(),
      DropCallbacks {
        on_click_outside: Some(Box::new(|_| {})),
        on_esc: Some(Box::new(|| {})),
        ..DropCallbacks::default()
      },
    )
    .unwrap();
  assert!(stack.hub().listener_count() > 0);

  stack.unmount(drop);
  assert!(!stack.is_mounted(drop));
  assert_eq!(stack.hub().listener_count(), 0);

  // Events after unmount have no effect on the detached container.
  let before = *stack.tree().inline(panel).unwrap();
  stack
    .tree_mut()
    .set_rect(anchor, Rect::from_xywh(300.0, 300.0, 80.0, 40.0));
  stack.dispatch(Event::Resize);
  stack.dispatch(Event::Scroll { element: scroller });
  assert_eq!(*stack.tree().inline(panel).unwrap(), before);

  // Unmounting twice is harmless.
  stack.unmount(drop);
}

#[test]
fn conflicting_alignment_is_rejected_at_mount() {
  let (tree, _, anchor, panel) = scrollable_fixture();
  let mut stack = DropStack::new(tree);
  let options = DropOptions {
    align: AlignSpec {
      top: Some(VEdge::Top),
      bottom: Some(VEdge::Top),
      left: None,
      right: None,
    },
    ..DropOptions::default()
  };
  let result = stack.mount(
    anchor,
    panel,
    PortalChain::root(),
    options,
    DropCallbacks::default(),
  );
  assert!(result.is_err());
  assert_eq!(stack.hub().listener_count(), 0);
}

#[test]
fn theme_max_height_caps_every_placement() {
  let (tree, _, anchor, panel) = scrollable_fixture();
  let theme = DropTheme {
    max_height: "300px".to_owned(),
    ..DropTheme::default()
  };
  let mut stack = DropStack::with_theme(tree, theme);
  stack
    .mount(
      anchor,
      panel,
      PortalChain::root(),
      DropOptions::default(),
      DropCallbacks::default(),
    )
    .unwrap();
  // The space below the anchor would allow 460; the theme caps it.
  assert_eq!(stack.tree().inline(panel).unwrap().max_height, Some(300.0));

  stack.dispatch(Event::Resize);
  assert_eq!(stack.tree().inline(panel).unwrap().max_height, Some(300.0));
}

#[test]
fn placement_snapshot_serializes_for_inspection() {
  let (tree, _, anchor, panel) = scrollable_fixture();
  let mut stack = DropStack::new(tree);
  let drop = stack
    .mount(
      anchor,
      panel,
      PortalChain::root(),
      DropOptions::default(),
      DropCallbacks::default(),
    )
    .unwrap();

  let snapshot = stack.snapshot(drop).unwrap();
  let json = serde_json::to_value(snapshot).unwrap();
  assert_eq!(json["trigger"], "mount");
  assert_eq!(json["edge"], "top");
  assert_eq!(json["geometry"]["left"], 100.0);
  assert!(json["geometry"].get("bottom").is_none());
}
