//! Flattening the visible forest into rows
//!
//! A row is everything a list view needs to draw one line: its position in
//! the hierarchy and the interaction flags that affect styling.

use crate::state::ExplorerState;
use explorer_tree::tree::{NodeId, NodeKind, NodeRef, PATH_SEPARATOR};

/// One visible line of the explorer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Node(NodeRow),
    Draft(DraftRow),
}

impl Row {
    pub fn depth(&self) -> usize {
        match self {
            Row::Node(row) => row.depth,
            Row::Draft(row) => row.depth,
        }
    }

    pub fn indent(&self) -> usize {
        match self {
            Row::Node(row) => row.indent,
            Row::Draft(row) => row.indent,
        }
    }

    pub fn as_node(&self) -> Option<&NodeRow> {
        match self {
            Row::Node(row) => Some(row),
            Row::Draft(_) => None,
        }
    }
}

/// A row showing an existing node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRow {
    pub id: NodeId,
    /// Stable list key, unique among siblings unless labels repeat
    pub key: String,
    pub path: String,
    pub label: String,
    pub kind: NodeKind,
    pub depth: usize,
    /// Leading padding in pixels
    pub indent: usize,
    /// Expansion state; `None` for leaves
    pub open: Option<bool>,
    pub selected: bool,
    pub focused: bool,
    /// Draw the focus outline
    pub outlined: bool,
    /// The label is being edited in place
    pub editing: bool,
}

/// The inline input for a node being created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftRow {
    pub parent: String,
    pub kind: NodeKind,
    pub depth: usize,
    pub indent: usize,
}

/// List key for a node: kind prefix plus label
pub fn row_key(kind: NodeKind, label: &str) -> String {
    let prefix = if kind.is_container() { 'd' } else { 'f' };
    format!("{}-{}", prefix, label)
}

pub(crate) fn build(state: &ExplorerState) -> Vec<Row> {
    let snapshot = state.snapshot();
    let mut builder = RowBuilder {
        state,
        draft: state.draft_target(),
        editing: state.editing_target(),
        rows: Vec::with_capacity(snapshot.len()),
    };

    for root in snapshot.root_refs() {
        builder.push(root, "", 0);
    }
    builder.rows
}

struct RowBuilder<'a> {
    state: &'a ExplorerState,
    draft: Option<(NodeId, NodeKind)>,
    editing: Option<NodeId>,
    rows: Vec<Row>,
}

impl RowBuilder<'_> {
    fn push(&mut self, node: NodeRef<'_>, parent_path: &str, depth: usize) {
        let path = if depth == 0 {
            node.label().to_string()
        } else {
            format!("{}{}{}", parent_path, PATH_SEPARATOR, node.label())
        };

        let open = node.is_container().then(|| self.state.is_open(&path));
        // A row being edited drops its selection and outline styling
        let editing = self.editing == Some(node.id());
        let selected = !editing && self.state.selection() == Some(path.as_str());
        let focused = self.state.focused() == Some(path.as_str());
        let outlined =
            focused && !editing && (self.state.is_active() || self.state.is_menu_open());

        self.rows.push(Row::Node(NodeRow {
            id: node.id(),
            key: row_key(node.kind(), node.label()),
            path: path.clone(),
            label: node.label().to_string(),
            kind: node.kind(),
            depth,
            indent: self.indent(depth),
            open,
            selected,
            focused,
            outlined,
            editing,
        }));

        let Some(children) = node.children() else {
            return;
        };
        if open != Some(true) {
            return;
        }

        let draft = self
            .draft
            .filter(|(parent, _)| *parent == node.id())
            .map(|(_, kind)| kind);

        // New folders appear above the child folders, new files between
        // folders and files.
        if draft == Some(NodeKind::Container) {
            self.push_draft(&path, NodeKind::Container, depth + 1);
        }
        let (dirs, files): (Vec<_>, Vec<_>) = children.partition(|child| child.is_container());
        for child in dirs {
            self.push(child, &path, depth + 1);
        }
        if draft == Some(NodeKind::Leaf) {
            self.push_draft(&path, NodeKind::Leaf, depth + 1);
        }
        for child in files {
            self.push(child, &path, depth + 1);
        }
    }

    fn push_draft(&mut self, parent: &str, kind: NodeKind, depth: usize) {
        self.rows.push(Row::Draft(DraftRow {
            parent: parent.to_string(),
            kind,
            depth,
            indent: self.indent(depth),
        }));
    }

    fn indent(&self, depth: usize) -> usize {
        depth * self.state.config().indent_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_key() {
        assert_eq!(row_key(NodeKind::Container, "scripts"), "d-scripts");
        assert_eq!(row_key(NodeKind::Leaf, "foo.js"), "f-foo.js");
    }
}
