//! Property-based invariant tests for linked forests and structural edits.
//!
//! 1. Every sibling sequence of a linked forest is in canonical order.
//! 2. Parent links and child lists agree in both directions.
//! 3. Without duplicate sibling labels, every full path resolves back to its node.
//! 4. Relinking an unlinked copy is idempotent.
//! 5. Random edit sequences preserve 1-2, bump the generation and change the
//!    node count by exactly the edited amount.

use explorer_tree::prelude::*;
use explorer_tree::tree::order;
use proptest::prelude::*;
use std::collections::HashSet;

// ── Strategies ──────────────────────────────────────────────────────────

fn label() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-c]{1,2}",
        "[a-c]{1,2}\\.js",
        "[A-C]",
        Just(".gitignore".to_string()),
    ]
}

fn shape() -> impl Strategy<Value = Shape> {
    let leaf = label().prop_map(|label| Shape::leaf(label));
    leaf.prop_recursive(4, 48, 6, |inner| {
        (label(), prop::collection::vec(inner, 0..6))
            .prop_map(|(label, children)| Shape::container(label, children))
    })
}

fn forest() -> impl Strategy<Value = Vec<Shape>> {
    prop::collection::vec(shape(), 0..5)
}

#[derive(Debug, Clone)]
enum Op {
    Create { parent: usize, label: String, container: bool },
    Rename { target: usize, label: String },
    Delete { target: usize },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<usize>(), label(), any::<bool>()).prop_map(|(parent, label, container)| {
            Op::Create { parent, label, container }
        }),
        (any::<usize>(), label()).prop_map(|(target, label)| Op::Rename { target, label }),
        any::<usize>().prop_map(|target| Op::Delete { target }),
    ]
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn assert_linked(snapshot: &Snapshot) -> Result<(), TestCaseError> {
    prop_assert_eq!(snapshot.verify(), Ok(()));

    let roots = snapshot
        .root_ids()
        .iter()
        .filter_map(|&id| snapshot.get(id).map(|n| (n.kind, n.label.as_str())));
    prop_assert!(order::is_sorted(roots));

    for id in snapshot.walk(TraversalOrder::PreOrder) {
        let children = snapshot
            .children(id)
            .filter_map(|c| snapshot.get(c).map(|n| (n.kind, n.label.as_str())));
        prop_assert!(order::is_sorted(children), "children of `{}`", snapshot.full_path(id));

        for child in snapshot.children(id) {
            prop_assert_eq!(snapshot.parent(child), Some(id));
        }
        match snapshot.parent(id) {
            Some(parent) => prop_assert!(snapshot.children(parent).any(|c| c == id)),
            None => prop_assert!(snapshot.root_ids().contains(&id)),
        }
    }
    Ok(())
}

/// Keep the first of every group of same-labelled siblings
fn dedupe(shapes: Vec<Shape>) -> Vec<Shape> {
    let mut seen = HashSet::new();
    shapes
        .into_iter()
        .filter(|shape| seen.insert(shape.label.clone()))
        .map(|shape| Shape {
            children: shape.children.map(dedupe),
            label: shape.label,
        })
        .collect()
}

fn pick<T: Copy>(items: &[T], index: usize) -> Option<T> {
    if items.is_empty() {
        None
    } else {
        Some(items[index % items.len()])
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1-2. Linked forests are ordered and consistently linked
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn linked_forests_hold_invariants(shapes in forest()) {
        let expected_len: usize = shapes.iter().map(Shape::subtree_len).sum();
        let state = TreeState::new(shapes);
        let snapshot = state.snapshot();

        prop_assert_eq!(snapshot.len(), expected_len);
        assert_linked(snapshot)?;
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Path round-trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn full_paths_resolve_back(shapes in forest()) {
        let state = TreeState::new(dedupe(shapes));
        let snapshot = state.snapshot();

        for id in snapshot.walk(TraversalOrder::PreOrder) {
            let path = snapshot.full_path(id);
            prop_assert_eq!(snapshot.find_by_path(&path), Some(id), "path `{}`", path);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Relinking is idempotent
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn relinking_is_idempotent(shapes in forest()) {
        let first = Snapshot::link(Generation::INITIAL, shapes);
        let second = Snapshot::link(Generation(1), first.to_shapes());
        prop_assert_eq!(first.to_shapes(), second.to_shapes());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Edit sequences
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn edits_preserve_invariants(shapes in forest(), ops in prop::collection::vec(op(), 1..12)) {
        let mut state = TreeState::new(shapes);

        for (step, op) in ops.into_iter().enumerate() {
            let before = state.snapshot().clone();
            let nodes: Vec<NodeId> = before.walk(TraversalOrder::PreOrder).collect();

            let (edit, expected_len) = match op {
                Op::Create { parent, label, container } => {
                    let kind = if container { NodeKind::Container } else { NodeKind::Leaf };
                    match pick(&before.containers(), parent) {
                        // First match decides where a duplicate path lands
                        Some(id) => {
                            let path = before.full_path(id);
                            let lands = before
                                .find_by_path(&path)
                                .map(|first| before.is_container(first))
                                .unwrap_or(false);
                            let len = before.len() + usize::from(lands);
                            (Edit::create(path, label, kind), len)
                        }
                        None => (Edit::create("missing", label, kind), before.len()),
                    }
                }
                Op::Rename { target, label } => match pick(&nodes, target) {
                    Some(id) => (Edit::rename(id, label), before.len()),
                    None => continue,
                },
                Op::Delete { target } => match pick(&nodes, target) {
                    Some(id) => {
                        let removed = before.walk_from(id, TraversalOrder::PreOrder).count();
                        (Edit::delete(id), before.len() - removed)
                    }
                    None => continue,
                },
            };

            let after = state.apply(edit);

            prop_assert_eq!(after.generation(), before.generation().next(), "step {}", step);
            prop_assert_eq!(after.len(), expected_len, "step {}", step);
            for &id in &nodes {
                prop_assert!(!after.contains(id));
            }
            assert_linked(&after)?;
        }
    }
}
