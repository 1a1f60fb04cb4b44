//! Containing-block and scroll-parent resolution
//!
//! Two ancestor walks feed the positioning controller:
//!
//! - [`containing_block`] finds the nearest ancestor whose style establishes
//!   a CSS containing block for fixed/absolute descendants (transform,
//!   perspective, backdrop-filter, `contain: paint`, or a `will-change`
//!   implying one). When such an ancestor exists, viewport-relative
//!   geometry must be re-expressed relative to it.
//! - [`scroll_parents`] collects the ancestors that can scroll the target
//!   out from under the drop, so the controller knows where to listen.
//!
//! Both are pure reads over the element tree.

use crate::dom::{ElementId, ElementTree};

/// One step of the containing-block walk: the nearest positioned ancestor
/// (the offset parent) when one exists below the root, otherwise the plain
/// parent. Fixed-position elements are not special-cased; see DESIGN.md.
fn offset_parent_or_parent(tree: &ElementTree, element: ElementId) -> Option<ElementId> {
  let mut cursor = tree.parent(element);
  while let Some(node) = cursor {
    if node == tree.root() {
      break;
    }
    if tree.style(node).is_some_and(|style| style.position.is_positioned()) {
      return Some(node);
    }
    cursor = tree.parent(node);
  }
  tree.parent(element)
}

/// Finds the nearest ancestor of `element` establishing a CSS containing
/// block, walking "offset parent or parent node" until the document root.
/// Returns `None` when no ancestor establishes one (geometry stays
/// viewport-relative).
pub fn containing_block(tree: &ElementTree, element: ElementId) -> Option<ElementId> {
  let mut cursor = offset_parent_or_parent(tree, element);
  while let Some(node) = cursor {
    if node == tree.root() {
      return None;
    }
    if tree
      .style(node)
      .is_some_and(|style| style.establishes_containing_block())
    {
      return Some(node);
    }
    cursor = offset_parent_or_parent(tree, node);
  }
  None
}

/// Collects the scrollable ancestors of `target`, innermost first, always
/// ending with the document root (window scrolling). Used to attach one
/// scroll listener per entry; an element with no scrollable ancestors still
/// yields the root.
pub fn scroll_parents(tree: &ElementTree, target: ElementId) -> Vec<ElementId> {
  let mut parents = Vec::new();
  let mut cursor = tree.parent(target);
  while let Some(node) = cursor {
    if node == tree.root() {
      break;
    }
    if tree.style(node).is_some_and(|style| style.is_scroll_container()) {
      parents.push(node);
    }
    cursor = tree.parent(node);
  }
  parents.push(tree.root());
  parents
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::dom::{CssPosition, Overflow};
  use crate::geometry::Size;

  fn chain(tree: &mut ElementTree, depth: usize) -> Vec<ElementId> {
    let mut parent = tree.root();
    let mut ids = Vec::new();
    for _ in 0..depth {
      let node = tree.create_element();
      tree.append_child(parent, node).unwrap();
      ids.push(node);
      parent = node;
    }
    ids
  }

  #[test]
  fn no_containing_block_without_establishing_ancestor() {
    let mut tree = ElementTree::new(Size::new(800.0, 600.0));
    let ids = chain(&mut tree, 3);
    assert_eq!(containing_block(&tree, ids[2]), None);
  }

  #[test]
  fn transform_ancestor_establishes_containing_block() {
    let mut tree = ElementTree::new(Size::new(800.0, 600.0));
    let ids = chain(&mut tree, 3);
    tree.style_mut(ids[0]).unwrap().transform = true;
    assert_eq!(containing_block(&tree, ids[2]), Some(ids[0]));
  }

  #[test]
  fn nearest_establishing_ancestor_wins() {
    let mut tree = ElementTree::new(Size::new(800.0, 600.0));
    let ids = chain(&mut tree, 4);
    tree.style_mut(ids[0]).unwrap().transform = true;
    tree.style_mut(ids[2]).unwrap().will_change = vec!["transform".to_string()];
    assert_eq!(containing_block(&tree, ids[3]), Some(ids[2]));
  }

  #[test]
  fn positioned_ancestor_shortcuts_the_walk() {
    // The walk steps to the offset parent, skipping a transformed but
    // non-positioned ancestor between the element and it.
    let mut tree = ElementTree::new(Size::new(800.0, 600.0));
    let ids = chain(&mut tree, 3);
    tree.style_mut(ids[0]).unwrap().position = CssPosition::Relative;
    tree.style_mut(ids[0]).unwrap().perspective = true;
    tree.style_mut(ids[1]).unwrap().transform = true;
    assert_eq!(containing_block(&tree, ids[2]), Some(ids[0]));
  }

  #[test]
  fn will_change_contents_is_not_a_containing_block() {
    let mut tree = ElementTree::new(Size::new(800.0, 600.0));
    let ids = chain(&mut tree, 2);
    tree.style_mut(ids[0]).unwrap().will_change = vec!["contents".to_string()];
    assert_eq!(containing_block(&tree, ids[1]), None);
  }

  #[test]
  fn scroll_parents_innermost_first_root_last() {
    let mut tree = ElementTree::new(Size::new(800.0, 600.0));
    let ids = chain(&mut tree, 4);
    tree.style_mut(ids[0]).unwrap().overflow_y = Overflow::Auto;
    tree.style_mut(ids[2]).unwrap().overflow_x = Overflow::Scroll;
    assert_eq!(
      scroll_parents(&tree, ids[3]),
      vec![ids[2], ids[0], tree.root()]
    );
  }

  #[test]
  fn scroll_parents_of_top_level_target_is_just_the_root() {
    let mut tree = ElementTree::new(Size::new(800.0, 600.0));
    let ids = chain(&mut tree, 1);
    assert_eq!(scroll_parents(&tree, ids[0]), vec![tree.root()]);
  }
}
