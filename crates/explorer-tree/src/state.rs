//! The tree state container
//!
//! `TreeState` owns the published snapshot and is the only place new
//! snapshots come from. Every mutation goes through [`TreeState::replace`]:
//! the transform proposes a forest, the container sorts and links it, and the
//! result is published as a whole or not at all.

use crate::edit::Edit;
use crate::tree::{Generation, Shape, Snapshot};
use anyhow::{Context, Result};
use log::{debug, warn};
use std::sync::Arc;

/// Owner of the current tree snapshot
#[derive(Debug, Clone)]
pub struct TreeState {
    snapshot: Arc<Snapshot>,
}

impl TreeState {
    /// Sort and link the initial forest and publish it as the first generation
    pub fn new(shapes: impl IntoIterator<Item = Shape>) -> Self {
        let snapshot = Snapshot::link(Generation::INITIAL, shapes.into_iter().collect());
        debug!(
            "initialized tree with {} roots ({} nodes)",
            snapshot.root_ids().len(),
            snapshot.len()
        );
        Self {
            snapshot: Arc::new(snapshot),
        }
    }

    /// The currently published snapshot
    ///
    /// Clone the `Arc` to keep a generation around after later edits.
    pub fn snapshot(&self) -> &Arc<Snapshot> {
        &self.snapshot
    }

    /// Generation of the currently published snapshot
    pub fn generation(&self) -> Generation {
        self.snapshot.generation()
    }

    /// Run `transform` against the current snapshot and publish its result
    ///
    /// The proposed forest is sorted canonically and parent links are
    /// attached before publishing. If the transform fails, the error is
    /// returned and the current snapshot stays published.
    pub fn replace<F>(&mut self, transform: F) -> Result<Arc<Snapshot>>
    where
        F: FnOnce(&Snapshot) -> Result<Vec<Shape>>,
    {
        let current = self.snapshot.generation();
        let shapes = match transform(self.snapshot.as_ref()) {
            Ok(shapes) => shapes,
            Err(e) => {
                warn!("transform failed on generation {}: {:#}", current, e);
                return Err(e)
                    .with_context(|| format!("Failed to transform tree generation {}", current));
            }
        };

        Ok(self.publish(shapes))
    }

    /// Apply a structural edit
    ///
    /// Edits never fail; one whose target cannot be resolved still publishes
    /// a new generation with the same content.
    pub fn apply(&mut self, edit: Edit) -> Arc<Snapshot> {
        debug!("applying {}", edit);
        let shapes = edit.apply(&self.snapshot);
        self.publish(shapes)
    }

    /// Link `shapes` as the next generation and make it current
    fn publish(&mut self, shapes: Vec<Shape>) -> Arc<Snapshot> {
        let next = Snapshot::link(self.generation().next(), shapes);
        debug!(
            "published generation {} ({} roots, {} nodes)",
            next.generation(),
            next.root_ids().len(),
            next.len()
        );

        self.snapshot = Arc::new(next);
        Arc::clone(&self.snapshot)
    }
}

impl Default for TreeState {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl FromIterator<Shape> for TreeState {
    fn from_iter<I: IntoIterator<Item = Shape>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{NodeKind, Tree, TreeTraversal};
    use anyhow::bail;

    fn state() -> TreeState {
        TreeState::new(vec![Shape::container(
            "scripts",
            [Shape::leaf("foo.js"), Shape::container("baz", [Shape::leaf("qux.js")])],
        )])
    }

    #[test]
    fn test_initialize_publishes_generation_zero() {
        let state = state();
        assert_eq!(state.generation(), Generation::INITIAL);
        assert!(state.snapshot().verify().is_ok());
    }

    #[test]
    fn test_replace_sorts_and_links() {
        let mut state = state();
        let snapshot = state
            .replace(|_| {
                Ok(vec![
                    Shape::leaf("z.txt"),
                    Shape::leaf("a.txt"),
                    Shape::container("m", [Shape::leaf("y"), Shape::leaf("x")]),
                ])
            })
            .expect("transform succeeds");

        assert_eq!(snapshot.generation(), Generation(1));
        let roots: Vec<_> = snapshot.root_refs().map(|n| n.label()).collect();
        assert_eq!(roots, vec!["m", "a.txt", "z.txt"]);
        assert_eq!(snapshot.full_path(snapshot.find_by_path("m/x").unwrap()), "m/x");
        assert!(snapshot.verify().is_ok());
    }

    #[test]
    fn test_failed_transform_keeps_previous_snapshot() {
        let mut state = state();
        let before = Arc::clone(state.snapshot());

        let err = state
            .replace(|_| bail!("disk on fire"))
            .expect_err("transform fails");

        assert!(format!("{:#}", err).contains("disk on fire"));
        assert!(Arc::ptr_eq(state.snapshot(), &before));
        assert_eq!(state.generation(), Generation::INITIAL);
    }

    #[test]
    fn test_old_snapshots_stay_readable() {
        let mut state = state();
        let before = Arc::clone(state.snapshot());
        let foo = before.find_by_path("scripts/foo.js").unwrap();

        state.apply(Edit::delete(foo));

        assert_eq!(before.label(foo), Some("foo.js"));
        assert!(state.snapshot().find_by_path("scripts/foo.js").is_none());
        assert!(!state.snapshot().contains(foo));
    }

    #[test]
    fn test_apply_bumps_generation_even_for_noops() {
        let mut state = state();
        let before = state.snapshot().to_shapes();
        let snapshot = state.apply(Edit::create("nowhere", "x", NodeKind::Leaf));

        assert_eq!(snapshot.generation(), Generation(1));
        assert_eq!(snapshot.to_shapes(), before);
    }

    #[test]
    fn test_apply_and_replace_publish_alike() {
        let mut applied = state();
        let mut replaced = state();
        let edit = Edit::create("scripts/baz", "new.js", NodeKind::Leaf);

        let via_apply = applied.apply(edit.clone());
        let via_replace = replaced.replace(edit.into_transform()).unwrap();

        assert_eq!(via_apply.generation(), via_replace.generation());
        assert_eq!(via_apply.to_shapes(), via_replace.to_shapes());
        assert!(via_apply.verify().is_ok());
        assert!(Arc::ptr_eq(applied.snapshot(), &via_apply));
    }

    #[test]
    fn test_edit_transform_through_replace() {
        let mut state = state();
        let snapshot = state
            .replace(Edit::create("scripts", "bar.js", NodeKind::Leaf).into_transform())
            .unwrap();
        assert!(snapshot.find_by_path("scripts/bar.js").is_some());
    }
}
