//! Explorer Tree Library
//!
//! The state model behind a file/folder explorer: a canonically ordered,
//! parent-linked forest that is rebuilt from scratch on every structural edit.
//!
//! # Core Concepts
//!
//! - **Shape**: an unlinked description of a tree (label + optional children)
//! - **Snapshot**: an immutable, sorted, parent-linked forest
//! - **TreeState**: owns the published snapshot and the single `replace` entry point
//! - **Edit**: create / rename / delete, each producing a new forest of shapes
//!
//! # Example
//!
//! ```
//! use explorer_tree::prelude::*;
//!
//! let mut state = TreeState::new(vec![Shape::container(
//!     "scripts",
//!     [Shape::leaf("foo.js")],
//! )]);
//!
//! state.apply(Edit::create("scripts", "bar.js", NodeKind::Leaf));
//!
//! let snapshot = state.snapshot();
//! for id in snapshot.walk(TraversalOrder::PreOrder) {
//!     let depth = snapshot.depth(id);
//!     println!("{:indent$}{}", "", snapshot.label(id).unwrap_or(""), indent = depth * 2);
//! }
//! ```

pub mod edit;
pub mod state;
pub mod tree;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::edit::Edit;
    pub use crate::state::TreeState;
    pub use crate::tree::prelude::*;
}
