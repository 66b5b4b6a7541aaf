//! Plain-text rendering of explorer rows
//!
//! Two spaces per depth level, then an icon: `▾` open container, `▸` closed
//! container, `·` file, `+` draft. Interaction flags follow in brackets.

use crate::rows::{NodeRow, Row};

/// Render rows as an indented outline, one line per row
pub fn render(rows: &[Row]) -> String {
    rows.iter().map(render_row).collect::<Vec<_>>().join("\n")
}

fn render_row(row: &Row) -> String {
    let indent = "  ".repeat(row.depth());
    match row {
        Row::Node(node) => {
            let icon = match node.open {
                Some(true) => '▾',
                Some(false) => '▸',
                None => '·',
            };
            let mut line = format!("{}{} {}", indent, icon, node.label);
            let flags = flags(node);
            if !flags.is_empty() {
                line.push_str(&format!(" [{}]", flags.join(", ")));
            }
            line
        }
        Row::Draft(draft) => format!("{}+ <new {}>", indent, draft.kind),
    }
}

fn flags(node: &NodeRow) -> Vec<&'static str> {
    [
        (node.selected, "selected"),
        (node.outlined, "outlined"),
        (node.editing, "editing"),
    ]
    .into_iter()
    .filter_map(|(on, flag)| on.then_some(flag))
    .collect()
}
