use core::ptr::NonNull;

use getset::CopyGetters;

use crate::{
  node::{
    Color,
    Key,
    Node,
  },
  tree::RbTree,
};

/// First structural defect found by [`RbTree::check`], with the key nearest
/// to it.
#[derive(Debug, PartialEq, Eq)]
pub enum CheckError {
  RedRoot,
  RedRedEdge { parent: Key, child: Key },
  BlackHeightSplit { at: Key },
  OrderViolation { at: Key },
  ParentLinkBroken { at: Key },
  LenMismatch { stored: usize, counted: usize },
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, CopyGetters)]
pub struct TreeStats {
  #[getset(get_copy = "pub")]
  nodes: usize,
  #[getset(get_copy = "pub")]
  height: usize,
  #[getset(get_copy = "pub")]
  black_height: usize,
}

impl RbTree {
  /// Full structural audit: key ordering, parent back-links, root and
  /// red-red coloring, and a uniform black count on every root-to-leaf
  /// path. Nil children count as black.
  pub fn check(&self) -> Result<TreeStats, CheckError> {
    let Some(root) = self.root else {
      return match self.len() {
        0 => Ok(TreeStats::default()),
        stored => Err(CheckError::LenMismatch { stored, counted: 0 }),
      };
    };

    {
      let root_ref = unsafe { root.as_ref() };
      if root_ref.color == Color::Red {
        return Err(CheckError::RedRoot);
      }
      if root_ref.parent.is_some() {
        return Err(CheckError::ParentLinkBroken { at: root_ref.key });
      }
    }

    let (nodes, height, black_height) = Self::check_node(root, None, None)?;
    if nodes != self.len() {
      return Err(CheckError::LenMismatch {
        stored: self.len(),
        counted: nodes,
      });
    }

    Ok(TreeStats {
      nodes,
      height,
      black_height,
    })
  }

  /// Returns `(nodes, height, black_height)` for the subtree at `node`.
  fn check_node(
    node: NonNull<Node>,
    lower: Option<Key>,
    upper: Option<Key>,
  ) -> Result<(usize, usize, usize), CheckError> {
    let node_ref = unsafe { node.as_ref() };
    let key = node_ref.key;

    if lower.is_some_and(|bound| key <= bound) || upper.is_some_and(|bound| key >= bound) {
      return Err(CheckError::OrderViolation { at: key });
    }

    for child in [node_ref.left, node_ref.right].into_iter().flatten() {
      let child_ref = unsafe { child.as_ref() };
      if child_ref.parent != Some(node) {
        return Err(CheckError::ParentLinkBroken { at: child_ref.key });
      }
      if node_ref.color == Color::Red && child_ref.color == Color::Red {
        return Err(CheckError::RedRedEdge {
          parent: key,
          child: child_ref.key,
        });
      }
    }

    let (left_nodes, left_height, left_black) = match node_ref.left {
      Some(left) => Self::check_node(left, lower, Some(key))?,
      None => (0, 0, 0),
    };
    let (right_nodes, right_height, right_black) = match node_ref.right {
      Some(right) => Self::check_node(right, Some(key), upper)?,
      None => (0, 0, 0),
    };

    if left_black != right_black {
      return Err(CheckError::BlackHeightSplit { at: key });
    }

    let own_black = (node_ref.color == Color::Black) as usize;
    Ok((
      left_nodes + right_nodes + 1,
      1 + left_height.max(right_height),
      left_black + own_black,
    ))
  }
}
