//! Proposed shapes: unlinked tree descriptions

use crate::tree::NodeKind;

/// An unlinked description of a (sub)tree
///
/// Shapes are what edit operations produce and what [`TreeState`](crate::state::TreeState)
/// turns into linked snapshots. They carry no parent link, so callers have no
/// way of fabricating inconsistent linkage.
///
/// `children == None` marks a leaf (file); `Some(..)`, even when empty, marks a
/// container (directory).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shape {
    /// Display name of the node
    pub label: String,
    /// Child shapes, absent for leaves
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub children: Option<Vec<Shape>>,
}

impl Shape {
    /// Create an empty shape of the given kind
    pub fn new(label: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            label: label.into(),
            children: match kind {
                NodeKind::Container => Some(Vec::new()),
                NodeKind::Leaf => None,
            },
        }
    }

    /// Create a leaf shape (a file)
    pub fn leaf(label: impl Into<String>) -> Self {
        Self::new(label, NodeKind::Leaf)
    }

    /// Create a container shape (a directory) with the given children
    pub fn container(label: impl Into<String>, children: impl IntoIterator<Item = Shape>) -> Self {
        Self {
            label: label.into(),
            children: Some(children.into_iter().collect()),
        }
    }

    /// Append a child, turning a leaf into a container if needed
    #[must_use]
    pub fn child(mut self, shape: Shape) -> Self {
        self.children.get_or_insert_with(Vec::new).push(shape);
        self
    }

    /// The kind implied by the presence of children
    pub fn kind(&self) -> NodeKind {
        if self.children.is_some() {
            NodeKind::Container
        } else {
            NodeKind::Leaf
        }
    }

    /// Returns true if this shape describes a container
    pub fn is_container(&self) -> bool {
        self.children.is_some()
    }

    /// Returns true if this shape describes a leaf
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Number of shapes in this subtree, including itself
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children
            .iter()
            .flatten()
            .map(Shape::subtree_len)
            .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert!(Shape::leaf("a.txt").is_leaf());
        assert_eq!(Shape::leaf("a.txt").kind(), NodeKind::Leaf);

        let empty = Shape::new("dir", NodeKind::Container);
        assert!(empty.is_container());
        assert_eq!(empty.children, Some(Vec::<Shape>::new()));
        assert_eq!(Shape::container("dir", Vec::<Shape>::new()), empty);
    }

    #[test]
    fn test_child_builder() {
        let shape = Shape::leaf("src")
            .child(Shape::leaf("main.rs"))
            .child(Shape::leaf("lib.rs"));

        assert!(shape.is_container());
        assert_eq!(shape.subtree_len(), 3);
    }
}
