//! Linked, canonically ordered forests

use crate::tree::{order, Generation, Node, NodeId, NodeKind, Shape, Tree};
use derive_more::Display;
use std::fmt;

/// Separator used when joining labels into a full path
pub const PATH_SEPARATOR: char = '/';

/// An immutable, parent-linked forest
///
/// Nodes live in an arena owned by the snapshot. Children are owned top-down
/// through the arena; the parent link of each node is a plain id used for
/// lookups only. Every id handed out by a snapshot carries its generation, so
/// ids from an older snapshot never resolve against a newer one.
///
/// Snapshots are built by [`Snapshot::link`] and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    generation: Generation,
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl Snapshot {
    /// Sort a proposed forest canonically and link it into a snapshot
    ///
    /// Parent links are attached top-down while the arena is filled; callers
    /// only ever supply unlinked shapes.
    pub fn link(generation: Generation, mut shapes: Vec<Shape>) -> Self {
        order::sort_recursive(&mut shapes);

        let capacity = shapes.iter().map(Shape::subtree_len).sum();
        let mut snapshot = Self {
            generation,
            nodes: Vec::with_capacity(capacity),
            roots: Vec::with_capacity(shapes.len()),
        };

        for shape in shapes {
            let id = snapshot.attach(shape, None);
            snapshot.roots.push(id);
        }

        debug_assert!(
            snapshot.verify().is_ok(),
            "freshly linked snapshot violates its invariants: {:?}",
            snapshot.verify()
        );
        snapshot
    }

    /// An empty forest
    pub fn empty(generation: Generation) -> Self {
        Self {
            generation,
            nodes: Vec::new(),
            roots: Vec::new(),
        }
    }

    fn attach(&mut self, shape: Shape, parent: Option<NodeId>) -> NodeId {
        let id = NodeId::new(self.generation, self.nodes.len());
        let kind = shape.kind();
        self.nodes.push(Node::new(shape.label, kind, parent));

        if let Some(children) = shape.children {
            let child_ids: Vec<NodeId> = children
                .into_iter()
                .map(|child| self.attach(child, Some(id)))
                .collect();
            self.nodes[id.index()].children = child_ids;
        }

        id
    }

    /// The generation this snapshot was published as
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Root ids in canonical order
    pub fn root_ids(&self) -> &[NodeId] {
        &self.roots
    }

    /// Number of nodes in the forest
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the forest has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node; ids from other generations never resolve
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        if id.generation() != self.generation {
            return None;
        }
        self.nodes.get(id.index())
    }

    /// Returns true if `id` belongs to this snapshot
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Borrowed handle for reading a node and navigating from it
    pub fn node_ref(&self, id: NodeId) -> Option<NodeRef<'_>> {
        let node = self.node(id)?;
        Some(NodeRef {
            snapshot: self,
            id,
            node,
        })
    }

    /// Borrowed handles for the roots, in canonical order
    pub fn root_refs(&self) -> impl Iterator<Item = NodeRef<'_>> + '_ {
        self.roots.iter().filter_map(move |&id| self.node_ref(id))
    }

    /// Copy a subtree back into an unlinked shape
    pub fn to_shape(&self, id: NodeId) -> Option<Shape> {
        let node = self.node(id)?;
        Some(Shape {
            label: node.label.clone(),
            children: node
                .children()
                .map(|ids| ids.iter().filter_map(|&child| self.to_shape(child)).collect()),
        })
    }

    /// Copy the whole forest back into unlinked shapes
    pub fn to_shapes(&self) -> Vec<Shape> {
        self.roots
            .iter()
            .filter_map(|&id| self.to_shape(id))
            .collect()
    }

    /// Check ordering, parent consistency and generation stamping
    ///
    /// Returns the first violation found, walking top-down from the roots.
    pub fn verify(&self) -> Result<(), InvariantViolation> {
        let mut visited = 0usize;
        let mut stack: Vec<(Option<NodeId>, &[NodeId])> = vec![(None, self.roots.as_slice())];

        while let Some((parent, siblings)) = stack.pop() {
            let scope = || match parent {
                Some(id) => self.full_path(id),
                None => String::new(),
            };

            let mut pairs = Vec::with_capacity(siblings.len());
            for &id in siblings {
                let node = self
                    .node(id)
                    .ok_or(InvariantViolation::ForeignId { id, generation: self.generation })?;
                if node.parent != parent {
                    return Err(InvariantViolation::ParentMismatch {
                        path: self.full_path(id),
                        parent: scope(),
                    });
                }
                if node.is_leaf() && !node.children.is_empty() {
                    return Err(InvariantViolation::LeafWithChildren {
                        path: self.full_path(id),
                    });
                }
                pairs.push((node.kind, node.label.as_str()));
                visited += 1;
                stack.push((Some(id), node.children.as_slice()));
            }

            if !order::is_sorted(pairs.iter().copied()) {
                return Err(InvariantViolation::OutOfOrder { parent: scope() });
            }
        }

        if visited != self.nodes.len() {
            return Err(InvariantViolation::Unreachable {
                reachable: visited,
                total: self.nodes.len(),
            });
        }

        Ok(())
    }
}

impl Tree for Snapshot {
    fn roots(&self) -> Box<dyn Iterator<Item = NodeId> + '_> {
        Box::new(self.roots.iter().copied())
    }

    fn get(&self, id: NodeId) -> Option<&Node> {
        self.node(id)
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    fn children(&self, id: NodeId) -> Box<dyn Iterator<Item = NodeId> + '_> {
        match self.node(id) {
            Some(node) => Box::new(node.children.iter().copied()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// A broken snapshot invariant, as reported by [`Snapshot::verify`]
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum InvariantViolation {
    #[display(fmt = "{} does not belong to generation {}", id, generation)]
    ForeignId { id: NodeId, generation: Generation },
    #[display(fmt = "`{}` does not link back to its parent `{}`", path, parent)]
    ParentMismatch { path: String, parent: String },
    #[display(fmt = "leaf `{}` has children", path)]
    LeafWithChildren { path: String },
    #[display(fmt = "children of `{}` are not in canonical order", parent)]
    OutOfOrder { parent: String },
    #[display(fmt = "only {} of {} nodes are reachable from the roots", reachable, total)]
    Unreachable { reachable: usize, total: usize },
}

impl std::error::Error for InvariantViolation {}

/// A borrowed view of one node together with the snapshot it lives in
///
/// This is the read API rendering layers work with: label, children and
/// parent lookup, all resolved against the same snapshot.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    snapshot: &'a Snapshot,
    id: NodeId,
    node: &'a Node,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn snapshot(&self) -> &'a Snapshot {
        self.snapshot
    }

    pub fn node(&self) -> &'a Node {
        self.node
    }

    pub fn label(&self) -> &'a str {
        &self.node.label
    }

    pub fn kind(&self) -> NodeKind {
        self.node.kind
    }

    pub fn is_leaf(&self) -> bool {
        self.node.is_leaf()
    }

    pub fn is_container(&self) -> bool {
        self.node.is_container()
    }

    /// The enclosing node, `None` at a root
    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.snapshot.node_ref(self.node.parent?)
    }

    /// Children in canonical order; `None` for leaves
    pub fn children(&self) -> Option<impl Iterator<Item = NodeRef<'a>> + 'a> {
        let snapshot = self.snapshot;
        self.node
            .children()
            .map(move |ids| ids.iter().filter_map(move |&id| snapshot.node_ref(id)))
    }

    /// Labels from the root down to this node, joined with `/`
    pub fn full_path(&self) -> String {
        self.snapshot.full_path(self.id)
    }

    pub fn depth(&self) -> usize {
        self.snapshot.depth(self.id)
    }

    /// Copy this subtree into an unlinked shape
    pub fn to_shape(&self) -> Shape {
        Shape {
            label: self.node.label.clone(),
            children: self.children().map(|children| {
                children.map(|child| child.to_shape()).collect()
            }),
        }
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && std::ptr::eq(self.snapshot, other.snapshot)
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("label", &self.node.label)
            .field("kind", &self.node.kind)
            .finish()
    }
}

impl fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_path())
    }
}
