//! Canonical sibling ordering
//!
//! Containers sort before leaves; within a kind, labels sort ascending.

use crate::tree::{NodeKind, Shape};
use std::cmp::Ordering;

/// Compare two siblings by `(kind, label)`, containers first
pub fn compare(a_kind: NodeKind, a_label: &str, b_kind: NodeKind, b_label: &str) -> Ordering {
    match (a_kind, b_kind) {
        (NodeKind::Container, NodeKind::Leaf) => Ordering::Less,
        (NodeKind::Leaf, NodeKind::Container) => Ordering::Greater,
        _ => a_label.cmp(b_label),
    }
}

/// Compare two shapes in canonical order
pub fn compare_shapes(a: &Shape, b: &Shape) -> Ordering {
    compare(a.kind(), &a.label, b.kind(), &b.label)
}

/// Sort one sibling sequence in place
///
/// The sort is stable, so siblings that share kind and label keep their
/// relative order.
pub fn sort_siblings(items: &mut [Shape]) {
    items.sort_by(compare_shapes);
}

/// Sort every sibling sequence of a forest in place, top-down
pub fn sort_recursive(items: &mut [Shape]) {
    sort_siblings(items);
    for item in items.iter_mut() {
        if let Some(children) = item.children.as_mut() {
            sort_recursive(children);
        }
    }
}

/// Returns true if the sequence is already in canonical order
pub fn is_sorted<'a>(items: impl IntoIterator<Item = (NodeKind, &'a str)>) -> bool {
    let mut previous: Option<(NodeKind, &str)> = None;
    for (kind, label) in items {
        if let Some((prev_kind, prev_label)) = previous {
            if compare(prev_kind, prev_label, kind, label) == Ordering::Greater {
                return false;
            }
        }
        previous = Some((kind, label));
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[Shape]) -> Vec<&str> {
        items.iter().map(|s| s.label.as_str()).collect()
    }

    #[test]
    fn test_containers_before_leaves() {
        let mut items = vec![
            Shape::leaf("foo.js"),
            Shape::leaf("bar.js"),
            Shape::container("baz", [Shape::leaf("qux.js")]),
            Shape::leaf(".gitignore"),
        ];
        sort_siblings(&mut items);
        assert_eq!(labels(&items), vec!["baz", ".gitignore", "bar.js", "foo.js"]);
    }

    #[test]
    fn test_empty_container_still_sorts_first() {
        let mut items = vec![Shape::leaf("a"), Shape::new("z", NodeKind::Container)];
        sort_siblings(&mut items);
        assert_eq!(labels(&items), vec!["z", "a"]);
    }

    #[test]
    fn test_uppercase_sorts_before_lowercase() {
        let mut items = vec![Shape::leaf("b"), Shape::leaf("B"), Shape::leaf("a")];
        sort_siblings(&mut items);
        assert_eq!(labels(&items), vec!["B", "a", "b"]);
    }

    #[test]
    fn test_sort_recursive() {
        let mut items = vec![Shape::container(
            "scripts",
            [
                Shape::leaf("foo.js"),
                Shape::container("baz", [Shape::leaf("qux.js"), Shape::leaf("quux.js")]),
            ],
        )];
        sort_recursive(&mut items);

        let scripts = items[0].children.as_deref().unwrap_or_default();
        assert_eq!(labels(scripts), vec!["baz", "foo.js"]);
        let baz = scripts[0].children.as_deref().unwrap_or_default();
        assert_eq!(labels(baz), vec!["quux.js", "qux.js"]);
    }

    #[test]
    fn test_is_sorted() {
        assert!(is_sorted(std::iter::empty()));
        assert!(is_sorted([
            (NodeKind::Container, "b"),
            (NodeKind::Leaf, "a"),
            (NodeKind::Leaf, "a"),
        ]));
        assert!(!is_sorted([(NodeKind::Leaf, "a"), (NodeKind::Container, "b")]));
        assert!(!is_sorted([(NodeKind::Leaf, "b"), (NodeKind::Leaf, "a")]));
    }
}
