use spin::Mutex;

use crate::{
  RbResult,
  check::{
    CheckError,
    TreeStats,
  },
  node::Key,
  tree::RbTree,
  walk::Visit,
};

/// Coarse-grained concurrent front for [`RbTree`]. One exclusive lock spans
/// each whole operation; rotations rewrite entire pointer neighborhoods, so
/// nothing finer is sound.
pub struct SharedTree {
  inner: Mutex<RbTree>,
}

impl SharedTree {
  pub const fn new() -> Self {
    Self {
      inner: Mutex::new(RbTree::new()),
    }
  }

  pub fn insert(&self, key: Key) -> RbResult<()> {
    self.inner.lock().insert(key)
  }

  pub fn contains(&self, key: Key) -> bool {
    self.inner.lock().contains(key)
  }

  pub fn remove(&self, key: Key) -> RbResult<()> {
    self.inner.lock().remove(key)
  }

  pub fn clear(&self) {
    self.inner.lock().clear();
  }

  pub fn len(&self) -> usize {
    self.inner.lock().len()
  }

  pub fn is_empty(&self) -> bool {
    self.inner.lock().is_empty()
  }

  /// Snapshot traversal under the lock; the callback must not call back
  /// into this tree.
  pub fn walk<F>(&self, visit: F)
  where
    F: FnMut(Visit),
  {
    self.inner.lock().walk(visit);
  }

  pub fn check(&self) -> Result<TreeStats, CheckError> {
    self.inner.lock().check()
  }
}

impl Default for SharedTree {
  fn default() -> Self {
    Self::new()
  }
}
