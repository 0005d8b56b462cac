//! An ordered map implemented using a self-adjusting splay tree.
//!
//! Every insertion, splaying lookup and removal rotates the touched entry to the root of the tree,
//! so recently and frequently accessed keys are cheap to access again. Nodes live in a typed arena
//! and are linked by stable handles.

pub mod arena;
mod entry;
mod error;
pub mod splay_tree;

pub use crate::error::{Error, Result};
pub use crate::splay_tree::SplayMap;
