//! Core tree data model for the explorer
//!
//! Proposed shapes describe a forest without parent links; snapshots are the
//! linked, canonically ordered forests built from them.

mod node;
pub mod order;
mod shape;
mod snapshot;
mod traits;

pub use node::{Generation, Node, NodeId, NodeKind, ParseKindError};
pub use shape::Shape;
pub use snapshot::{InvariantViolation, NodeRef, Snapshot, PATH_SEPARATOR};
pub use traits::{TraversalOrder, Tree, TreeTraversal, TreeWalker};

/// Re-export common types for convenience
pub mod prelude {
    pub use super::{
        Generation, Node, NodeId, NodeKind, NodeRef, Shape, Snapshot, TraversalOrder, Tree,
        TreeTraversal,
    };
}
