//! Nodes, ids and generations

use derive_more::{Display, From};
use std::fmt;
use std::str::FromStr;

/// Monotonic stamp identifying one published snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Display, From)]
pub struct Generation(pub u64);

impl Generation {
    /// The generation produced by initialization
    pub const INITIAL: Generation = Generation(0);

    /// The generation that follows this one
    pub const fn next(self) -> Self {
        Generation(self.0 + 1)
    }

    /// Get the inner counter value
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Identifier for a node within one snapshot
///
/// Internally an index into the snapshot's arena, stamped with the generation
/// of the snapshot that allocated it. An id never resolves in any other
/// generation, so a reference kept across an edit simply stops matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    generation: Generation,
    index: usize,
}

impl NodeId {
    /// Create a new NodeId from a generation and an arena index
    pub const fn new(generation: Generation, index: usize) -> Self {
        NodeId { generation, index }
    }

    /// The generation of the snapshot this id belongs to
    pub const fn generation(self) -> Generation {
        self.generation
    }

    /// Get the arena index
    pub const fn index(self) -> usize {
        self.index
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}:{})", self.generation, self.index)
    }
}

/// Whether a node is a directory or a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// A container node - can have children (a directory)
    #[display(fmt = "directory")]
    #[cfg_attr(feature = "serde", serde(rename = "directory", alias = "container"))]
    Container,
    /// A leaf node - cannot have children (a file)
    #[display(fmt = "file")]
    #[cfg_attr(feature = "serde", serde(rename = "file", alias = "leaf"))]
    Leaf,
}

impl NodeKind {
    /// Returns true if this is a container node
    pub const fn is_container(self) -> bool {
        matches!(self, NodeKind::Container)
    }

    /// Returns true if this is a leaf node
    pub const fn is_leaf(self) -> bool {
        matches!(self, NodeKind::Leaf)
    }
}

/// Returned when a kind tag is neither `file` nor `directory`
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display(fmt = "unknown node kind `{}`", _0)]
pub struct ParseKindError(pub String);

impl std::error::Error for ParseKindError {}

impl FromStr for NodeKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "directory" | "container" => Ok(NodeKind::Container),
            "file" | "leaf" => Ok(NodeKind::Leaf),
            other => Err(ParseKindError(other.to_string())),
        }
    }
}

/// A single linked node inside a [`Snapshot`](super::Snapshot)
///
/// The parent link is a lookup-only back reference into the same arena; nodes
/// own nothing but their label and the list of child ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// The node's label (not full path)
    pub label: String,
    /// Whether this is a container or leaf node
    pub kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(label: String, kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            label,
            kind,
            parent,
            children: Vec::new(),
        }
    }

    /// The enclosing node, or `None` for a root
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child ids in canonical order; `None` for leaves
    pub fn children(&self) -> Option<&[NodeId]> {
        match self.kind {
            NodeKind::Container => Some(&self.children),
            NodeKind::Leaf => None,
        }
    }

    /// Returns true if this is a container node
    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    /// Returns true if this is a leaf node
    pub fn is_leaf(&self) -> bool {
        self.kind.is_leaf()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.kind)
    }
}
