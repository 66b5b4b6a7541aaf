//! Read-only navigation over linked forests

use crate::tree::{Node, NodeId, NodeKind, PATH_SEPARATOR};
use std::collections::{HashSet, VecDeque};

/// A read-only, parent-linked forest
///
/// Implementors answer five lookups; paths, depths and ancestry are derived
/// from them. Every lookup tolerates ids that do not resolve.
///
/// # Example
///
/// ```
/// use explorer_tree::prelude::*;
///
/// fn outline<T: Tree + TreeTraversal>(tree: &T) -> Vec<String> {
///     tree.walk(TraversalOrder::PreOrder)
///         .map(|id| format!("{}{}", "  ".repeat(tree.depth(id)), tree.label(id).unwrap_or("")))
///         .collect()
/// }
///
/// let snapshot = Snapshot::link(Generation::INITIAL, vec![Shape::container("a", [Shape::leaf("b")])]);
/// assert_eq!(outline(&snapshot), vec!["a", "  b"]);
/// ```
pub trait Tree {
    /// Iterate over the root node IDs, in order
    fn roots(&self) -> Box<dyn Iterator<Item = NodeId> + '_>;

    /// Get a node by its ID
    ///
    /// Returns `None` if the ID is invalid.
    fn get(&self, id: NodeId) -> Option<&Node>;

    /// The enclosing node
    ///
    /// Returns `None` for root nodes.
    fn parent(&self, id: NodeId) -> Option<NodeId>;

    /// Child ids in canonical order
    ///
    /// Returns an empty iterator for leaf nodes or invalid IDs.
    fn children(&self, id: NodeId) -> Box<dyn Iterator<Item = NodeId> + '_>;

    /// Number of nodes in the forest
    fn node_count(&self) -> usize;

    /// Returns true if `id` names a file
    ///
    /// Returns false for invalid IDs.
    fn is_leaf(&self, id: NodeId) -> bool {
        self.get(id)
            .map(|n| n.kind == NodeKind::Leaf)
            .unwrap_or(false)
    }

    /// Returns true if `id` names a directory
    ///
    /// Returns false for invalid IDs.
    fn is_container(&self, id: NodeId) -> bool {
        self.get(id)
            .map(|n| n.kind == NodeKind::Container)
            .unwrap_or(false)
    }

    /// Get the label of a node
    ///
    /// Returns `None` if the ID is invalid.
    fn label(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(|n| n.label.as_str())
    }

    /// Get the full path from root to this node, labels joined with `/`
    ///
    /// Returns an empty string if the ID is invalid. The walk stops at the
    /// first parent that does not resolve and never takes more steps than
    /// there are nodes.
    fn full_path(&self, id: NodeId) -> String {
        let mut labels = Vec::new();
        let mut current = Some(id);

        while let Some(node_id) = current {
            if labels.len() > self.node_count() {
                break;
            }
            match self.label(node_id) {
                Some(label) => labels.push(label),
                None => break,
            }
            current = self.parent(node_id);
        }

        labels.reverse();
        let separator = PATH_SEPARATOR.to_string();
        labels.join(separator.as_str())
    }

    /// Number of ancestors; roots sit at depth 0
    ///
    /// Returns 0 for invalid IDs.
    fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).len()
    }

    /// Number of direct children
    ///
    /// Returns 0 for leaf nodes or invalid IDs.
    fn child_count(&self, id: NodeId) -> usize {
        self.children(id).count()
    }

    /// Ancestor ids, nearest first
    ///
    /// Returns an empty vector for roots or invalid IDs.
    fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut ancestors = Vec::new();
        let mut current = self.parent(id);
        while let Some(parent_id) = current {
            if ancestors.len() >= self.node_count() {
                break;
            }
            ancestors.push(parent_id);
            current = self.parent(parent_id);
        }
        ancestors
    }

    /// Returns true if `ancestor` lies on the way from a root down to `descendant`
    fn is_ancestor_of(&self, ancestor: NodeId, descendant: NodeId) -> bool {
        self.ancestors(descendant).contains(&ancestor)
    }
}

/// Order in which a walk visits nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalOrder {
    /// Parents before their children
    PreOrder,
    /// Children before their parent
    PostOrder,
    /// Level by level, roots first
    BreadthFirst,
}

/// Walks and lookups built on [`Tree`]
///
/// Implemented for every `Tree`.
pub trait TreeTraversal: Tree {
    /// Walk the whole forest, root by root, in the specified order
    fn walk(&self, order: TraversalOrder) -> TreeWalker<'_, Self>
    where
        Self: Sized,
    {
        TreeWalker::new(self, self.roots().collect(), order)
    }

    /// Walk the subtree starting at a specific node
    fn walk_from(&self, start: NodeId, order: TraversalOrder) -> TreeWalker<'_, Self>
    where
        Self: Sized,
    {
        TreeWalker::new(self, vec![start], order)
    }

    /// Every file, in pre-order
    fn leaves(&self) -> Vec<NodeId>
    where
        Self: Sized,
    {
        self.walk(TraversalOrder::PreOrder)
            .filter(|&id| self.is_leaf(id))
            .collect()
    }

    /// Every directory, in pre-order
    fn containers(&self) -> Vec<NodeId>
    where
        Self: Sized,
    {
        self.walk(TraversalOrder::PreOrder)
            .filter(|&id| self.is_container(id))
            .collect()
    }

    /// Nodes accepted by `predicate`, in pre-order
    fn find<F>(&self, predicate: F) -> Vec<NodeId>
    where
        F: Fn(&Node) -> bool,
        Self: Sized,
    {
        self.walk(TraversalOrder::PreOrder)
            .filter(|&id| self.get(id).map(&predicate).unwrap_or(false))
            .collect()
    }

    /// Find a node by its full path
    ///
    /// Siblings sharing a label make a path ambiguous; the first match in
    /// pre-order wins. Returns `None` if the path doesn't exist.
    fn find_by_path(&self, path: &str) -> Option<NodeId> {
        self.find_all_by_path(path).into_iter().next()
    }

    /// Find every node whose full path equals `path`, in pre-order
    ///
    /// More than one result means the path is ambiguous. The empty path names
    /// nothing, even when a root is labelled `""`.
    fn find_all_by_path(&self, path: &str) -> Vec<NodeId> {
        let mut matches: Vec<NodeId> = Vec::new();
        if path.is_empty() {
            return matches;
        }
        for (depth, segment) in path.split(PATH_SEPARATOR).enumerate() {
            let candidates: Vec<NodeId> = if depth == 0 {
                self.roots().collect()
            } else {
                matches.iter().flat_map(|&id| self.children(id)).collect()
            };
            matches = candidates
                .into_iter()
                .filter(|&id| self.label(id) == Some(segment))
                .collect();
            if matches.is_empty() {
                break;
            }
        }
        matches
    }

    /// Find a node by label (first match only)
    fn find_by_label(&self, label: &str) -> Option<NodeId>
    where
        Self: Sized,
    {
        self.walk(TraversalOrder::PreOrder)
            .find(|&id| self.label(id) == Some(label))
    }

    /// Find all nodes with a given label
    fn find_all_by_label(&self, label: &str) -> Vec<NodeId>
    where
        Self: Sized,
    {
        self.walk(TraversalOrder::PreOrder)
            .filter(|&id| self.label(id) == Some(label))
            .collect()
    }
}

impl<T: Tree> TreeTraversal for T {}

/// Iterator behind [`TreeTraversal::walk`]
pub struct TreeWalker<'a, T: Tree + ?Sized> {
    tree: &'a T,
    order: TraversalOrder,
    pending: VecDeque<NodeId>,
    visited: HashSet<NodeId>,
}

impl<'a, T: Tree + ?Sized> TreeWalker<'a, T> {
    /// Create a new tree walker starting from the given nodes
    pub fn new(tree: &'a T, starts: Vec<NodeId>, order: TraversalOrder) -> Self {
        let mut pending: VecDeque<NodeId> = starts.into();

        // Depth-first orders pop from the back
        if !matches!(order, TraversalOrder::BreadthFirst) {
            pending.make_contiguous().reverse();
        }

        Self {
            tree,
            order,
            pending,
            visited: HashSet::new(),
        }
    }
}

impl<'a, T: Tree + ?Sized> Iterator for TreeWalker<'a, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        match self.order {
            TraversalOrder::PreOrder => self.next_preorder(),
            TraversalOrder::PostOrder => self.next_postorder(),
            TraversalOrder::BreadthFirst => self.next_breadthfirst(),
        }
    }
}

impl<'a, T: Tree + ?Sized> TreeWalker<'a, T> {
    fn next_preorder(&mut self) -> Option<NodeId> {
        let current = self.pending.pop_back()?;

        // Reversed so the first child pops next
        let children: Vec<_> = self.tree.children(current).collect();
        self.pending.extend(children.into_iter().rev());

        Some(current)
    }

    fn next_postorder(&mut self) -> Option<NodeId> {
        while let Some(&current) = self.pending.back() {
            if self.visited.contains(&current) {
                self.pending.pop_back();
                return Some(current);
            }

            self.visited.insert(current);

            let children: Vec<_> = self.tree.children(current).collect();
            self.pending.extend(children.into_iter().rev());
        }
        None
    }

    fn next_breadthfirst(&mut self) -> Option<NodeId> {
        let current = self.pending.pop_front()?;
        self.pending.extend(self.tree.children(current));
        Some(current)
    }
}
