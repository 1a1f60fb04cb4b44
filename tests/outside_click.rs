//! Outside-click dismissal across nested and sibling overlays.
//!
//! The nesting matrix: overlay 1 (chain [1]) opens child overlay 2
//! (chain [1, 2]); an unrelated overlay 3 (chain [3]) is also open.
//! A pointer-down on overlay 2 must dismiss overlay 1 (2 is in 1's
//! descendant awareness) but an unrelated overlay 3 must dismiss neither.

use std::cell::RefCell;
use std::rc::Rc;

use dropkit::{
  DropCallbacks, DropId, DropOptions, DropStack, ElementId, ElementTree, Event,
  PORTAL_ID_ATTRIBUTE, PortalChain, Rect, Size,
};

struct Fixture {
  stack: DropStack,
  outside: ElementId,
  anchors: Vec<ElementId>,
  panel_content: Vec<ElementId>,
  drops: Vec<DropId>,
  dismissed: Rc<RefCell<Vec<usize>>>,
}

/// Mounts three overlays: 0 and 2 top-level, 1 nested under 0. Each panel
/// holds one content element a pointer can land on.
fn fixture() -> Fixture {
  let mut tree = ElementTree::new(Size::new(1000.0, 800.0));
  let root = tree.root();
  let outside = tree.create_element();
  tree.append_child(root, outside).unwrap();

  let mut anchors = Vec::new();
  let mut panels = Vec::new();
  let mut panel_content = Vec::new();
  for i in 0..3 {
    let anchor = tree.create_element();
    tree.append_child(root, anchor).unwrap();
    tree.set_rect(anchor, Rect::from_xywh(100.0 * (i as f32 + 1.0), 100.0, 60.0, 30.0));
    anchors.push(anchor);
    let panel = tree.create_element();
    tree.append_child(root, panel).unwrap();
    tree.set_rect(panel, Rect::from_xywh(0.0, 0.0, 120.0, 80.0));
    let content = tree.create_element();
    tree.append_child(panel, content).unwrap();
    panels.push(panel);
    panel_content.push(content);
  }

  let mut stack = DropStack::new(tree);
  let dismissed: Rc<RefCell<Vec<usize>>> = Rc::default();
  let mut drops = Vec::new();
  for i in [0usize, 2] {
    let sink = Rc::clone(&dismissed);
    let drop = stack
      .mount(
        anchors[i],
        panels[i],
        PortalChain::root(),
        DropOptions::default(),
        DropCallbacks {
          on_click_outside: Some(Box::new(move |_| sink.borrow_mut().push(i))),
          ..DropCallbacks::default()
        },
      )
      .unwrap();
    drops.push(drop);
  }
  // Overlay 1 nests under overlay 0: it inherits overlay 0's chain.
  let parent_chain = stack.chain(drops[0]).unwrap().clone();
  let sink = Rc::clone(&dismissed);
  let nested = stack
    .mount(
      anchors[1],
      panels[1],
      parent_chain,
      DropOptions::default(),
      DropCallbacks {
        on_click_outside: Some(Box::new(move |_| sink.borrow_mut().push(1))),
        ..DropCallbacks::default()
      },
    )
    .unwrap();
  drops.insert(1, nested);

  Fixture {
    stack,
    outside,
    anchors,
    panel_content,
    drops,
    dismissed,
  }
}

#[test]
fn chains_grow_with_nesting() {
  let fx = fixture();
  assert_eq!(fx.stack.chain(fx.drops[0]).unwrap().depth(), 1);
  assert_eq!(fx.stack.chain(fx.drops[1]).unwrap().depth(), 2);
  assert_eq!(fx.stack.chain(fx.drops[2]).unwrap().depth(), 1);
  let parent = fx.stack.portal_id(fx.drops[0]).unwrap();
  assert!(fx.stack.chain(fx.drops[1]).unwrap().contains(parent));
}

#[test]
fn portal_attribute_is_stamped_on_containers() {
  let fx = fixture();
  let panel = fx.stack.tree().parent(fx.panel_content[0]).unwrap();
  let id = fx.stack.portal_id(fx.drops[0]).unwrap();
  assert_eq!(
    fx.stack.tree().attribute(panel, PORTAL_ID_ATTRIBUTE),
    Some(id.to_string().as_str())
  );
}

#[test]
fn click_outside_everything_dismisses_all() {
  let mut fx = fixture();
  fx.stack.dispatch(Event::PointerDown {
    target: fx.outside,
    composed: false,
  });
  let mut seen = fx.dismissed.borrow().clone();
  seen.sort_unstable();
  assert_eq!(seen, vec![0, 1, 2]);
}

#[test]
fn click_on_nested_child_dismisses_the_parent_not_the_sibling() {
  let mut fx = fixture();
  fx.stack.dispatch(Event::PointerDown {
    target: fx.panel_content[1],
    composed: false,
  });
  let mut seen = fx.dismissed.borrow().clone();
  seen.sort_unstable();
  // Overlay 0 (parent of the clicked child) and overlay 1 itself fire;
  // the unrelated overlay 2 does not.
  assert_eq!(seen, vec![0, 1]);
}

#[test]
fn click_on_unrelated_sibling_dismisses_only_itself() {
  let mut fx = fixture();
  fx.stack.dispatch(Event::PointerDown {
    target: fx.panel_content[2],
    composed: false,
  });
  assert_eq!(*fx.dismissed.borrow(), vec![2]);
}

#[test]
fn click_on_the_drop_target_keeps_its_overlay_open() {
  let mut fx = fixture();
  fx.stack.dispatch(Event::PointerDown {
    target: fx.anchors[2],
    composed: false,
  });
  let mut seen = fx.dismissed.borrow().clone();
  seen.sort_unstable();
  // Overlays 0 and 1 see a click outside both their targets and any
  // overlay they know; overlay 2's own anchor keeps it open.
  assert_eq!(seen, vec![0, 1]);
}

#[test]
fn stale_portal_attribute_never_dismisses() {
  let mut fx = fixture();
  // Unmount overlay 2 but leave a stale attribute behind.
  let panel2 = fx.stack.tree().parent(fx.panel_content[2]).unwrap();
  fx.stack.unmount(fx.drops[2]);
  fx.stack
    .tree_mut()
    .set_attribute(panel2, PORTAL_ID_ATTRIBUTE, "9999");
  fx.stack.dispatch(Event::PointerDown {
    target: fx.panel_content[2],
    composed: false,
  });
  assert!(fx.dismissed.borrow().is_empty());
}

#[test]
fn click_on_a_target_inside_its_own_overlay_keeps_it_open() {
  // Menu-style drop: the control that opened it is re-rendered inside the
  // panel, so a pointer-down on it lands inside both the drop target and
  // the overlay. It must not dismiss.
  let mut tree = ElementTree::new(Size::new(800.0, 600.0));
  let root = tree.root();
  let panel = tree.create_element();
  tree.append_child(root, panel).unwrap();
  tree.set_rect(panel, Rect::from_xywh(0.0, 0.0, 120.0, 200.0));
  let anchor = tree.create_element();
  tree.append_child(panel, anchor).unwrap();
  tree.set_rect(anchor, Rect::from_xywh(100.0, 100.0, 60.0, 30.0));

  let mut stack = DropStack::new(tree);
  let dismissed: Rc<RefCell<Vec<usize>>> = Rc::default();
  let sink = Rc::clone(&dismissed);
  stack
    .mount(
      anchor,
      panel,
      PortalChain::root(),
      DropOptions::default(),
      DropCallbacks {
        on_click_outside: Some(Box::new(move |_| sink.borrow_mut().push(0))),
        ..DropCallbacks::default()
      },
    )
    .unwrap();

  stack.dispatch(Event::PointerDown {
    target: anchor,
    composed: false,
  });
  assert!(dismissed.borrow().is_empty());
}

#[test]
fn listener_is_only_attached_when_a_handler_exists() {
  let mut tree = ElementTree::new(Size::new(800.0, 600.0));
  let anchor = tree.create_element();
  let root = tree.root();
  tree.append_child(root, anchor).unwrap();
  tree.set_rect(anchor, Rect::from_xywh(100.0, 100.0, 60.0, 30.0));
  let panel = tree.create_element();
  tree.append_child(root, panel).unwrap();
  tree.set_rect(panel, Rect::from_xywh(0.0, 0.0, 120.0, 80.0));

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
  // Scroll + resize listeners only; no pointer-down, no key-down.
  assert_eq!(stack.hub().listener_count(), 2);
}
