use core::{
  alloc::Layout,
  ptr::{
    NonNull,
    drop_in_place,
  },
};

use alloc::alloc::{
  alloc,
  dealloc,
};

use getset::CopyGetters;

use crate::{
  RbError,
  RbResult,
};

/// Key type stored in the tree. Ordering of keys is ordering of nodes.
pub type Key = i64;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum Color {
  #[default]
  Red,
  Black,
}

/// Color of an optional link. Absent children count as black.
#[inline(always)]
pub(crate) fn color_of(link: Option<NonNull<Node>>) -> Color {
  link.map_or(Color::Black, |node| unsafe { node.as_ref() }.color)
}

#[derive(Debug, CopyGetters)]
pub struct Node {
  #[getset(get_copy = "pub")]
  pub(crate) key: Key,
  #[getset(get_copy = "pub")]
  pub(crate) color: Color,
  #[getset(get_copy = "pub")]
  pub(crate) parent: Option<NonNull<Node>>,
  #[getset(get_copy = "pub")]
  pub(crate) left: Option<NonNull<Node>>,
  #[getset(get_copy = "pub")]
  pub(crate) right: Option<NonNull<Node>>,
}

impl Node {
  const SELF_LAYOUT: Layout = Layout::new::<Self>();

  /// Allocates a detached red node. Placement and recoloring are the
  /// caller's job.
  pub(crate) fn create(key: Key) -> RbResult<NonNull<Self>> {
    // SAFETY: `Node` is not zero sized, so the layout is valid for `alloc`.
    let raw = unsafe { alloc(Self::SELF_LAYOUT) } as *mut Self;
    let Some(node) = NonNull::new(raw) else {
      return Err(RbError::OutOfMemory);
    };

    unsafe {
      node.as_ptr().write(Self {
        key,
        color: Color::default(),
        parent: None,
        left: None,
        right: None,
      });
    }

    Ok(node)
  }

  /// Returns a node's memory to the allocator.
  ///
  /// # Safety
  ///
  /// `node` must come from [`Node::create`], must no longer be linked from
  /// any live node, and must not be touched afterwards.
  pub(crate) unsafe fn release(node: NonNull<Self>) {
    unsafe {
      drop_in_place(node.as_ptr());
      dealloc(node.as_ptr() as *mut u8, Self::SELF_LAYOUT);
    }
  }

  /// True when this node hangs off its parent's left slot. The root is
  /// nobody's child.
  pub(crate) fn is_left_child(&self) -> bool {
    match self.parent {
      Some(parent) => unsafe { parent.as_ref() }.left == Some(NonNull::from(self)),
      None => false,
    }
  }
}
