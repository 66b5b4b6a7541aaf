//! Structural edits: create, rename, delete
//!
//! Every edit reads a published snapshot and returns a brand-new forest of
//! proposed shapes. Nodes off the path to the target are copied unchanged;
//! nodes on that path are rebuilt so the change can happen at depth. A target
//! that cannot be resolved turns the edit into a plain copy of the input.

use crate::tree::{NodeId, NodeKind, Shape, Snapshot, Tree, TreeTraversal};
use log::{debug, trace};
use std::fmt;

/// A structural edit, ready to be handed to [`TreeState::replace`](crate::state::TreeState::replace)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    /// Append a new child to the container at `parent`
    Create {
        parent: String,
        label: String,
        kind: NodeKind,
    },
    /// Change the label of one node, keeping its subtree
    Rename { target: NodeId, label: String },
    /// Remove one node together with its subtree
    Delete { target: NodeId },
}

impl Edit {
    pub fn create(parent: impl Into<String>, label: impl Into<String>, kind: NodeKind) -> Self {
        Edit::Create {
            parent: parent.into(),
            label: label.into(),
            kind,
        }
    }

    pub fn rename(target: NodeId, label: impl Into<String>) -> Self {
        Edit::Rename {
            target,
            label: label.into(),
        }
    }

    pub fn delete(target: NodeId) -> Self {
        Edit::Delete { target }
    }

    /// Produce the edited forest
    pub fn apply(&self, snapshot: &Snapshot) -> Vec<Shape> {
        match self {
            Edit::Create {
                parent,
                label,
                kind,
            } => create(snapshot, parent, label, *kind),
            Edit::Rename { target, label } => rename(snapshot, *target, label),
            Edit::Delete { target } => delete(snapshot, *target),
        }
    }

    /// Turn the edit into a transform for `TreeState::replace`
    pub fn into_transform(self) -> impl FnOnce(&Snapshot) -> anyhow::Result<Vec<Shape>> {
        move |snapshot: &Snapshot| Ok(self.apply(snapshot))
    }
}

impl fmt::Display for Edit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edit::Create {
                parent,
                label,
                kind,
            } => write!(f, "create {} `{}` in `{}`", kind, label, parent),
            Edit::Rename { target, label } => write!(f, "rename {} to `{}`", target, label),
            Edit::Delete { target } => write!(f, "delete {}", target),
        }
    }
}

/// Append a new `kind` child labelled `label` to the container at `parent_path`
///
/// The container is resolved by full path with first-match semantics. A path
/// that does not exist, or that names a leaf, leaves the forest unchanged.
pub fn create(snapshot: &Snapshot, parent_path: &str, label: &str, kind: NodeKind) -> Vec<Shape> {
    let Some(target) = snapshot.find_by_path(parent_path) else {
        debug!("create: no node at `{}`, nothing to do", parent_path);
        return snapshot.to_shapes();
    };
    if !snapshot.is_container(target) {
        debug!("create: `{}` is not a directory, nothing to do", parent_path);
        return snapshot.to_shapes();
    }

    rebuild(snapshot, target, Rewrite::Append(Shape::new(label, kind)))
}

/// Give the node `target` a new label; its descendants keep theirs
///
/// The label is taken as-is. An id that does not resolve in `snapshot`
/// leaves the forest unchanged.
pub fn rename(snapshot: &Snapshot, target: NodeId, label: &str) -> Vec<Shape> {
    if !snapshot.contains(target) {
        debug!("rename: {} is not part of generation {}", target, snapshot.generation());
        return snapshot.to_shapes();
    }

    rebuild(snapshot, target, Rewrite::Relabel(label.to_string()))
}

/// Remove the node `target` and its subtree
///
/// An id that does not resolve in `snapshot` leaves the forest unchanged.
pub fn delete(snapshot: &Snapshot, target: NodeId) -> Vec<Shape> {
    if !snapshot.contains(target) {
        debug!("delete: {} is not part of generation {}", target, snapshot.generation());
        return snapshot.to_shapes();
    }

    rebuild(snapshot, target, Rewrite::Remove)
}

/// What happens to the target node while rebuilding
enum Rewrite {
    Append(Shape),
    Relabel(String),
    Remove,
}

fn rebuild(snapshot: &Snapshot, target: NodeId, rewrite: Rewrite) -> Vec<Shape> {
    // Ancestors of the target, root first
    let mut spine = snapshot.ancestors(target);
    spine.reverse();
    trace!(
        "rebuilding along `{}` ({} levels)",
        snapshot.full_path(target),
        spine.len()
    );

    let mut rewrite = Some(rewrite);
    rebuild_level(snapshot, snapshot.root_ids(), &spine, target, &mut rewrite)
}

fn rebuild_level(
    snapshot: &Snapshot,
    siblings: &[NodeId],
    spine: &[NodeId],
    target: NodeId,
    rewrite: &mut Option<Rewrite>,
) -> Vec<Shape> {
    let mut shapes = Vec::with_capacity(siblings.len() + 1);

    for &id in siblings {
        let Some(node) = snapshot.node(id) else {
            continue;
        };

        if spine.first() == Some(&id) {
            let children = node.children().unwrap_or_default();
            shapes.push(Shape {
                label: node.label.clone(),
                children: Some(rebuild_level(snapshot, children, &spine[1..], target, rewrite)),
            });
        } else if id == target {
            if let Some(shape) = rewrite_target(snapshot, id, rewrite.take()) {
                shapes.push(shape);
            }
        } else if let Some(shape) = snapshot.to_shape(id) {
            shapes.push(shape);
        }
    }

    shapes
}

fn rewrite_target(snapshot: &Snapshot, id: NodeId, rewrite: Option<Rewrite>) -> Option<Shape> {
    let mut shape = snapshot.to_shape(id)?;
    match rewrite {
        Some(Rewrite::Remove) => return None,
        Some(Rewrite::Relabel(label)) => shape.label = label,
        Some(Rewrite::Append(child)) => {
            if let Some(children) = shape.children.as_mut() {
                children.push(child);
            }
        }
        None => {}
    }
    Some(shape)
}
