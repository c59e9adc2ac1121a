use core::ptr::NonNull;

use crate::{
  node::{
    Color,
    Key,
    Node,
  },
  tree::RbTree,
};

/// One node surfaced by [`RbTree::walk`].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Visit {
  pub key: Key,
  pub color: Color,
  pub depth: usize,
}

impl RbTree {
  /// Read-only traversal in display order: right subtree, node, left
  /// subtree. Printing one line per visit indented by `depth` renders the
  /// tree rotated a quarter turn counterclockwise.
  pub fn walk<F>(&self, mut visit: F)
  where
    F: FnMut(Visit),
  {
    if let Some(root) = self.root {
      unsafe { Self::walk_node(root, 0, &mut visit) };
    }
  }

  unsafe fn walk_node<F>(node: NonNull<Node>, depth: usize, visit: &mut F)
  where
    F: FnMut(Visit),
  {
    let node_ref = unsafe { node.as_ref() };
    if let Some(right) = node_ref.right {
      unsafe { Self::walk_node(right, depth + 1, visit) };
    }
    visit(Visit {
      key: node_ref.key,
      color: node_ref.color,
      depth,
    });
    if let Some(left) = node_ref.left {
      unsafe { Self::walk_node(left, depth + 1, visit) };
    }
  }
}
