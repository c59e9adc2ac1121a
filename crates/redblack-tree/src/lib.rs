#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod check;
pub mod node;
pub mod sync;
pub mod tree;
pub mod walk;

#[derive(Debug, PartialEq, Eq)]
pub enum RbError {
  Duplicate,
  NotFound,
  OutOfMemory,
}

pub type RbResult<T> = Result<T, RbError>;

pub mod prelude {
  pub use super::{
    RbError,
    RbResult,
    check::{
      CheckError,
      TreeStats,
    },
    node::{
      Color,
      Key,
      Node,
    },
    sync::SharedTree,
    tree::RbTree,
    walk::Visit,
  };
}

#[cfg(test)]
mod tests;
