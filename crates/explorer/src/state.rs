//! Interaction state layered over the tree
//!
//! `ExplorerState` owns the [`TreeState`] together with everything a view
//! needs beyond the forest itself: which containers are collapsed, the
//! selected and focused paths, whether the list is active, and at most one
//! in-flight interaction (a create draft, a rename, or a delete/run dialog).
//!
//! Interactions are started by menu actions or shortcuts and finished by a
//! `commit_*`/`confirm_*` call or [`ExplorerState::cancel`]. Cancelling never
//! touches the tree.

use crate::config::ExplorerConfig;
use crate::input::accept_label;
use crate::menu::{ContextMenu, MenuAction};
use crate::outline;
use crate::rows::{self, Row};
use crate::run::{parse_delay, RunRequest};
use anyhow::Result;
use derive_more::Display;
use explorer_tree::prelude::*;
use explorer_tree::tree::PATH_SEPARATOR;
use log::{debug, info, trace};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

/// The interaction currently waiting for user input
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Pending {
    /// An inline draft row for a new child of `parent`
    #[display(fmt = "create {} in `{}`", kind, parent)]
    Create { parent: String, kind: NodeKind },
    /// The label of `target` is being edited in place
    #[display(fmt = "rename {}", target)]
    Rename { target: NodeId },
    /// The delete confirmation for `target` is open
    #[display(fmt = "delete {}", target)]
    Delete { target: NodeId },
    /// The run dialog for `target` is open
    #[display(fmt = "run {}", target)]
    Run { target: NodeId },
}

/// Explorer state: the tree plus transient interaction state
#[derive(Debug, Clone)]
pub struct ExplorerState {
    tree: TreeState,
    config: ExplorerConfig,
    /// Container paths whose expansion differs from `open_by_default`
    toggled: HashSet<String>,
    selection: Option<String>,
    focus: Option<String>,
    active: bool,
    menu_open: bool,
    pending: Option<Pending>,
}

impl ExplorerState {
    pub fn new(tree: TreeState, config: ExplorerConfig) -> Self {
        Self {
            tree,
            config,
            toggled: HashSet::new(),
            selection: None,
            focus: None,
            active: true,
            menu_open: false,
            pending: None,
        }
    }

    pub fn tree(&self) -> &TreeState {
        &self.tree
    }

    /// The currently published snapshot
    pub fn snapshot(&self) -> &Arc<Snapshot> {
        self.tree.snapshot()
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn focused(&self) -> Option<&str> {
        self.focus.as_deref()
    }

    /// False while a context menu is open
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn pending(&self) -> Option<&Pending> {
        self.pending.as_ref()
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn resolve(&self, path: &str) -> Option<NodeRef<'_>> {
        let snapshot = self.tree.snapshot();
        snapshot.node_ref(snapshot.find_by_path(path)?)
    }

    // Expansion

    pub fn is_open(&self, path: &str) -> bool {
        self.toggled.contains(path) != self.config.open_by_default
    }

    pub fn set_open(&mut self, path: &str, open: bool) {
        if open == self.config.open_by_default {
            self.toggled.remove(path);
        } else {
            self.toggled.insert(path.to_string());
        }
    }

    pub fn toggle(&mut self, path: &str) {
        let open = !self.is_open(path);
        trace!("{} `{}`", if open { "expanding" } else { "collapsing" }, path);
        self.set_open(path, open);
    }

    // Selection and focus

    /// Click on a row: toggle containers, then select and focus the node
    ///
    /// Returns false if nothing lives at `path`.
    pub fn select(&mut self, path: &str) -> bool {
        let Some(is_container) = self.resolve(path).map(|node| node.is_container()) else {
            debug!("select: no node at `{}`", path);
            return false;
        };

        if is_container {
            self.toggle(path);
        }
        self.selection = Some(path.to_string());
        self.focus(path);
        true
    }

    /// Move focus; a rename of another node ends without committing
    pub fn focus(&mut self, path: &str) {
        if let Some(Pending::Rename { target }) = &self.pending {
            if self.tree.snapshot().full_path(*target) != path {
                trace!("focus moved to `{}`, ending rename", path);
                self.pending = None;
            }
        }
        self.focus = Some(path.to_string());
    }

    // Context menu

    /// Open the context menu on `path`
    ///
    /// The node gains focus and the list turns inactive until
    /// [`close_menu`](Self::close_menu) or [`invoke`](Self::invoke).
    pub fn open_menu(&mut self, path: &str) -> Option<ContextMenu> {
        let menu = ContextMenu::for_node(self.resolve(path)?, &self.config);
        self.focus(path);
        self.active = false;
        self.menu_open = true;
        trace!("menu opened on `{}`", path);
        Some(menu)
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
        self.active = true;
    }

    /// Run a context menu action on `path`
    ///
    /// Closes the menu and starts the matching interaction. Returns false
    /// if the path does not resolve or the action does not apply to it.
    pub fn invoke(&mut self, action: MenuAction, path: &str) -> bool {
        self.close_menu();

        let Some((id, kind)) = self.resolve(path).map(|node| (node.id(), node.kind())) else {
            debug!("invoke {}: no node at `{}`", action, path);
            return false;
        };

        let pending = match action {
            MenuAction::NewFile | MenuAction::NewFolder => {
                if !kind.is_container() {
                    return false;
                }
                self.set_open(path, true);
                let kind = if action == MenuAction::NewFolder {
                    NodeKind::Container
                } else {
                    NodeKind::Leaf
                };
                Pending::Create {
                    parent: path.to_string(),
                    kind,
                }
            }
            MenuAction::Rename => {
                self.focus(path);
                Pending::Rename { target: id }
            }
            MenuAction::Delete => Pending::Delete { target: id },
            MenuAction::Run => {
                if !kind.is_leaf() {
                    return false;
                }
                Pending::Run { target: id }
            }
        };

        self.begin(pending);
        true
    }

    // Shortcuts

    /// Rename shortcut: start editing the focused node
    pub fn begin_rename_focused(&mut self) -> bool {
        if self.menu_open {
            return false;
        }
        let Some(id) = self
            .focus
            .as_deref()
            .and_then(|path| self.resolve(path))
            .map(|node| node.id())
        else {
            return false;
        };

        self.begin(Pending::Rename { target: id });
        true
    }

    /// Delete shortcut: ask to delete the selected node
    ///
    /// Ignored while a menu is open or a label is being edited.
    pub fn request_delete_selected(&mut self) -> bool {
        if self.menu_open || matches!(self.pending, Some(Pending::Rename { .. })) {
            return false;
        }
        let Some(id) = self
            .selection
            .as_deref()
            .and_then(|path| self.resolve(path))
            .map(|node| node.id())
        else {
            return false;
        };

        self.begin(Pending::Delete { target: id });
        true
    }

    fn begin(&mut self, pending: Pending) {
        trace!("starting {}", pending);
        self.pending = Some(pending);
    }

    fn take_pending(&mut self, wanted: impl Fn(&Pending) -> bool) -> Option<Pending> {
        match self.pending.take() {
            Some(pending) if wanted(&pending) => Some(pending),
            other => {
                self.pending = other;
                None
            }
        }
    }

    // Finishing interactions

    /// Finish a create draft with the submitted label
    ///
    /// Blank input cancels. Returns the published snapshot if an edit ran.
    pub fn commit_create(&mut self, input: &str) -> Option<Arc<Snapshot>> {
        let Some(Pending::Create { parent, kind }) =
            self.take_pending(|p| matches!(p, Pending::Create { .. }))
        else {
            debug!("commit_create: no create in progress");
            return None;
        };

        let Some(label) = accept_label(input) else {
            trace!("create in `{}` cancelled", parent);
            return None;
        };
        Some(self.apply(Edit::create(parent, label, kind)))
    }

    /// Finish a rename with the submitted label
    ///
    /// Blank input or an unchanged label cancels.
    pub fn commit_rename(&mut self, input: &str) -> Option<Arc<Snapshot>> {
        let Some(Pending::Rename { target }) =
            self.take_pending(|p| matches!(p, Pending::Rename { .. }))
        else {
            debug!("commit_rename: no rename in progress");
            return None;
        };

        let Some(current) = self.tree.snapshot().label(target) else {
            debug!("commit_rename: {} is stale", target);
            return None;
        };
        match accept_label(input) {
            Some(label) if label != current => Some(self.apply(Edit::rename(target, label))),
            _ => {
                trace!("rename of {} cancelled", target);
                None
            }
        }
    }

    /// Confirm the open delete dialog
    pub fn confirm_delete(&mut self) -> Option<Arc<Snapshot>> {
        let Some(Pending::Delete { target }) =
            self.take_pending(|p| matches!(p, Pending::Delete { .. }))
        else {
            debug!("confirm_delete: no delete in progress");
            return None;
        };

        Some(self.apply(Edit::delete(target)))
    }

    /// Confirm the open run dialog with the submitted delay
    ///
    /// Produces the request for the host to execute; the tree is unchanged.
    pub fn confirm_run(&mut self, delay_input: &str) -> Option<RunRequest> {
        let Some(Pending::Run { target }) =
            self.take_pending(|p| matches!(p, Pending::Run { .. }))
        else {
            debug!("confirm_run: no run in progress");
            return None;
        };

        let node = self.tree.snapshot().node_ref(target)?;
        let request = RunRequest {
            target,
            path: node.full_path(),
            label: node.label().to_string(),
            delay: Duration::from_millis(parse_delay(delay_input)),
        };
        info!("{}", request);
        Some(request)
    }

    /// Drop the in-flight interaction without touching the tree
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            trace!("cancelled {}", pending);
        }
    }

    // Publishing

    /// Apply a structural edit and carry path-based state along
    ///
    /// Renaming moves selection, focus and expansion state to the new path;
    /// deleting drops whatever was at or under the removed path.
    pub fn apply(&mut self, edit: Edit) -> Arc<Snapshot> {
        let previous = Arc::clone(self.tree.snapshot());
        let change = PathChange::of(&edit, &previous);
        let snapshot = self.tree.apply(edit);
        self.remap_paths(&change);
        self.prune(&previous, &change);
        snapshot
    }

    /// Publish an arbitrary transform of the current snapshot
    ///
    /// Path-based state that no longer resolves is pruned afterwards. An
    /// in-flight interaction follows its node by path into the new snapshot.
    pub fn replace<F>(&mut self, transform: F) -> Result<Arc<Snapshot>>
    where
        F: FnOnce(&Snapshot) -> Result<Vec<Shape>>,
    {
        let previous = Arc::clone(self.tree.snapshot());
        let snapshot = self.tree.replace(transform)?;
        self.prune(&previous, &PathChange::None);
        Ok(snapshot)
    }

    fn remap_paths(&mut self, change: &PathChange) {
        if matches!(change, PathChange::None) {
            return;
        }
        self.toggle    /// Drop state that refers to nodes the current snapshot no longer has
    ///
    /// Node ids do not survive a publish, so a pending target is looked up
    /// again by the path it had in `previous`, moved by `change`.
    fn prune(&mut self, previous: &Snapshot, change: &PathChange) {
        let snapshot = Arc::clone(self.tree.snapshot());
        let is_container = |path: &str| {
            snapshot
                .find_by_path(path)
                .map(|id| snapshot.is_container(id))
                .unwrap_or(false)
        };

        self.toggled.retain(|path| is_container(path));
        self.selection = self
            .selection
            .take()
            .filter(|path| snapshot.find_by_path(path).is_some());
        self.focus = self
            .focus
            .take()
            .filter(|path| snapshot.find_by_path(path).is_some());

        let keep = match self.pending.as_mut() {
            Some(Pending::Create { parent, .. }) => match change.apply(parent) {
                Some(moved) if is_container(&moved) => {
                    *parent = moved;
                    true
                }
                _ => false,
            },
            Some(
                Pending::Rename { target } | Pending::Delete { target } | Pending::Run { target },
            ) => {
                let resolved = if snapshot.contains(*target) {
                    Some(*target)
                } else {
                    previous
                        .node_ref(*target)
                        .and_then(|node| change.apply(&node.full_path()))
                        .and_then(|path| snapshot.find_by_path(&path))
                };
                match resolved {
                    Some(id) => {
                        *target = id;
                        true
                    }
                    None => false,
                }
            }
            None => true,
        };
        if !keep {
            self.cancel();
        }
    }

  Pending::Rename { target } | Pending::Delete { target } | Pending::Run { target },
            ) => snapshot.contains(*target),
            None => true,
        };
        if !keep {
            self.cancel();
        }
    }

    // Views

    /// The visible rows, top to bottom
    pub fn rows(&self) -> Vec<Row> {
        rows::build(self)
    }

    /// The visible rows as an indented text outline
    pub fn outline(&self) -> String {
        outline::render(&self.rows())
    }

    /// Container and kind of the create draft, if one is open
    pub(crate) fn draft_target(&self) -> Option<(NodeId, NodeKind)> {
        match &self.pending {
            Some(Pending::Create { parent, kind }) => {
                Some((self.tree.snapshot().find_by_path(parent)?, *kind))
            }
            _ => None,
        }
    }

    /// Node whose label is being edited, if any
    pub(crate) fn editing_target(&self) -> Option<NodeId> {
        match &self.pending {
            Some(Pending::Rename { target }) => Some(*target),
            _ => None,
        }
    }
}

impl Default for ExplorerState {
    fn default() -> Self {
        Self::new(TreeState::default(), ExplorerConfig::default())
    }
}

/// How an edit moves the paths explorer state refers to
#[derive(Debug)]
enum PathChange {
    None,
    Moved { from: String, to: String },
    Removed(String),
}

impl PathChange {
    fn of(edit: &Edit, snapshot: &Snapshot) -> Self {
        match edit {
            Edit::Create { .. } => PathChange::None,
            Edit::Rename { target, label } => match snapshot.node_ref(*target) {
                Some(node) => {
                    let to = match node.parent() {
                        Some(parent) => {
                            format!("{}{}{}", parent.full_path(), PATH_SEPARATOR, label)
                        }
                        None => label.clone(),
                    };
                    PathChange::Moved {
                        from: node.full_path(),
                        to,
                    }
                }
                None => PathChange::None,
            },
            Edit::Delete { target } => match snapshot.node_ref(*target) {
                Some(node) => PathChange::Removed(node.full_path()),
                None => PathChange::None,
            },
        }
    }

    /// Where `path` ends up after the edit; `None` if it is gone
    fn apply(&self, path: &str) -> Option<String> {
        match self {
            PathChange::None => Some(path.to_string()),
            PathChange::Moved { from, to } => match strip_base(path, from) {
                Some(rest) => Some(format!("{}{}", to, rest)),
                None => Some(path.to_string()),
            },
            PathChange::Removed(base) => match strip_base(path, base) {
                Some(_) => None,
                None => Some(path.to_string()),
            },
        }
    }
}

/// The remainder of `path` if it is `base` itself or lies under it
fn strip_base<'a>(path: &'a str, base: &str) -> Option<&'a str> {
    let rest = path.strip_prefix(base)?;
    if rest.is_empty() || rest.starts_with(PATH_SEPARATOR) {
        Some(rest)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Platform;
    use pretty_assertions::assert_eq;

    fn explorer() -> ExplorerState {
        let tree = TreeState::new(vec![Shape::container(
            "scripts",
            [
                Shape::leaf("foo.js"),
                Shape::container("baz", [Shape::leaf("qux.js")]),
                Shape::leaf("notes.txt"),
            ],
        )]);
        ExplorerState::new(tree, ExplorerConfig::new().platform(Platform::Linux))
    }

    #[test]
    fn test_strip_base_is_segment_aware() {
        assert_eq!(strip_base("scripts/baz", "scripts/baz"), Some(""));
        assert_eq!(strip_base("scripts/baz/qux.js", "scripts/baz"), Some("/qux.js"));
        assert_eq!(strip_base("scripts/bazaar", "scripts/baz"), None);
        assert_eq!(strip_base("scripts", "scripts/baz"), None);
    }

    #[test]
    fn test_select_toggles_containers() {
        let mut state = explorer();
        assert!(state.is_open("scripts/baz"));

        assert!(state.select("scripts/baz"));
        assert!(!state.is_open("scripts/baz"));
        assert_eq!(state.selection(), Some("scripts/baz"));
        assert_eq!(state.focused(), Some("scripts/baz"));

        assert!(state.select("scripts/baz"));
        assert!(state.is_open("scripts/baz"));
    }

    #[test]
    fn test_select_leaf_does_not_toggle() {
        let mut state = explorer();
        assert!(state.select("scripts/foo.js"));
        assert!(state.toggled.is_empty());
        assert!(!state.select("scripts/missing.js"));
        assert_eq!(state.selection(), Some("scripts/foo.js"));
    }

    #[test]
    fn test_closed_by_default() {
        let tree = TreeState::new(vec![Shape::container("a", [Shape::leaf("b")])]);
        let mut state = ExplorerState::new(tree, ExplorerConfig::new().open_by_default(false));
        assert!(!state.is_open("a"));
        state.toggle("a");
        assert!(state.is_open("a"));
        assert!(state.toggled.contains("a"));
    }

    #[test]
    fn test_menu_deactivates_list() {
        let mut state = explorer();
        let menu = state.open_menu("scripts").expect("menu opens");
        assert_eq!(menu.path, "scripts");
        assert!(!state.is_active());
        assert_eq!(state.focused(), Some("scripts"));

        state.close_menu();
        assert!(state.is_active());
        assert!(state.open_menu("nowhere").is_none());
    }

    #[test]
    fn test_new_file_opens_collapsed_parent() {
        let mut state = explorer();
        state.toggle("scripts/baz");

        assert!(state.invoke(MenuAction::NewFile, "scripts/baz"));
        assert!(state.is_open("scripts/baz"));
        assert_eq!(
            state.pending(),
            Some(&Pending::Create {
                parent: "scripts/baz".to_string(),
                kind: NodeKind::Leaf
            })
        );
    }

    #[test]
    fn test_invalid_actions_are_rejected() {
        let mut state = explorer();
        assert!(!state.invoke(MenuAction::NewFolder, "scripts/foo.js"));
        assert!(!state.invoke(MenuAction::Run, "scripts"));
        assert!(!state.invoke(MenuAction::Delete, "nowhere"));
        assert_eq!(state.pending(), None);
    }

    #[test]
    fn test_commit_create() {
        let mut state = explorer();
        state.invoke(MenuAction::NewFolder, "scripts");

        let snapshot = state.commit_create("  lib ").expect("edit runs");
        assert!(snapshot.find_by_path("scripts/lib").is_some());
        assert_eq!(state.pending(), None);
    }

    #[test]
    fn test_blank_create_cancels() {
        let mut state = explorer();
        state.invoke(MenuAction::NewFile, "scripts");
        let generation = state.tree().generation();

        assert!(state.commit_create("   ").is_none());
        assert_eq!(state.tree().generation(), generation);
        assert_eq!(state.pending(), None);
    }

    #[test]
    fn test_commit_without_matching_pending_keeps_it() {
        let mut state = explorer();
        state.invoke(MenuAction::Delete, "scripts/foo.js");

        assert!(state.commit_create("x").is_none());
        assert!(state.commit_rename("x").is_none());
        assert!(matches!(state.pending(), Some(Pending::Delete { .. })));
    }

    #[test]
    fn test_rename_moves_path_state() {
        let mut state = explorer();
        state.select("scripts/baz/qux.js");
        state.toggle("scripts/baz");
        state.invoke(MenuAction::Rename, "scripts/baz");

        state.commit_rename("lib").expect("edit runs");

        assert!(!state.is_open("scripts/lib"));
        assert_eq!(state.selection(), Some("scripts/lib/qux.js"));
        assert_eq!(state.focused(), Some("scripts/lib"));
        assert!(state.toggled.contains("scripts/lib"));
    }

    #[test]
    fn test_unchanged_rename_cancels() {
        let mut state = explorer();
        state.invoke(MenuAction::Rename, "scripts/foo.js");
        let generation = state.tree().generation();

        assert!(state.commit_rename(" foo.js ").is_none());
        assert_eq!(state.tree().generation(), generation);
    }

    #[test]
    fn test_focus_change_ends_rename() {
        let mut state = explorer();
        state.invoke(MenuAction::Rename, "scripts/foo.js");
        state.focus("scripts/foo.js");
        assert!(matches!(state.pending(), Some(Pending::Rename { .. })));

        state.select("scripts/notes.txt");
        assert_eq!(state.pending(), None);
    }

    #[test]
    fn test_rename_shortcut() {
        let mut state = explorer();
        assert!(!state.begin_rename_focused());

        state.select("scripts/foo.js");
        assert!(state.begin_rename_focused());
        assert_eq!(state.editing_target(), state.snapshot().find_by_path("scripts/foo.js"));
    }

    #[test]
    fn test_delete_shortcut_respects_menu_and_rename() {
        let mut state = explorer();
        state.select("scripts/foo.js");
        state.open_menu("scripts/foo.js");
        assert!(!state.request_delete_selected());

        state.close_menu();
        state.begin_rename_focused();
        assert!(!state.request_delete_selected());

        state.cancel();
        assert!(state.request_delete_selected());
    }

    #[test]
    fn test_confirm_delete_drops_paths_under_removed_node() {
        let mut state = explorer();
        state.select("scripts/baz/qux.js");
        state.toggle("scripts/baz");
        state.invoke(MenuAction::Delete, "scripts/baz");

        let snapshot = state.confirm_delete().expect("edit runs");

        assert!(snapshot.find_by_path("scripts/baz").is_none());
        assert_eq!(state.selection(), None);
        assert_eq!(state.focused(), None);
        assert!(state.toggled.is_empty());
    }

    #[test]
    fn test_confirm_run() {
        let mut state = explorer();
        state.invoke(MenuAction::Run, "scripts/foo.js");

        let request = state.confirm_run("-20").expect("run requested");
        assert_eq!(request.path, "scripts/foo.js");
        assert_eq!(request.delay, Duration::ZERO);
        assert_eq!(state.pending(), None);
        assert_eq!(state.tree().generation(), Generation::INITIAL);
    }

    #[test]
    fn test_replace_prunes_stale_state() {
        let mut state = explorer();
        state.select("scripts/notes.txt");
        state.toggle("scripts/baz");
        state.invoke(MenuAction::Run, "scripts/baz/qux.js");

        state
            .replace(|_| Ok(vec![Shape::container("scripts", [Shape::leaf("foo.js")])]))
            .expect("transform succeeds");

        assert_eq!(state.selection(), None);
        assert!(state.toggled.is_empty());
        assert_eq!(state.pending(), None);
    }

    #[test]
    fn test_replace_keeps_pending_target() {
        let mut state = explorer();
        state.invoke(MenuAction::Run, "scripts/foo.js");

        let snapshot = state
            .replace(|_| Ok(vec![Shape::container("scripts", [Shape::leaf("foo.js")])]))
            .expect("transform succeeds");

        assert_eq!(
            state.pending(),
            Some(&Pending::Run {
                target: snapshot.find_by_path("scripts/foo.js").expect("still there")
            })
        );
        let request = state.confirm_run("250").expect("run requested");
        assert_eq!(request.path, "scripts/foo.js");
    }

    #[test]
    fn test_rename_survives_unrelated_replace() {
        let mut state = explorer();
        state.invoke(MenuAction::Rename, "scripts/foo.js");

        state
            .replace(|snapshot| {
                let mut shapes = snapshot.to_shapes();
                shapes.push(Shape::container("docs", [Shape::leaf("guide.md")]));
                Ok(shapes)
            })
            .expect("transform succeeds");

        assert_eq!(
            state.editing_target(),
            state.snapshot().find_by_path("scripts/foo.js")
        );
        let snapshot = state.commit_rename("main.js").expect("edit runs");
        assert!(snapshot.find_by_path("scripts/main.js").is_some());
        assert!(snapshot.find_by_path("docs/guide.md").is_some());
    }

    #[test]
    fn test_pending_follows_edits() {
        let mut state = explorer();
        state.invoke(MenuAction::Delete, "scripts/baz/qux.js");
        let baz = state.snapshot().find_by_path("scripts/baz").expect("exists");

        state.apply(Edit::Rename {
            target: baz,
            label: "lib".to_string(),
        });
        let qux = state.snapshot().find_by_path("scripts/lib/qux.js");
        assert!(qux.is_some());
        assert_eq!(state.pending(), Some(&Pending::Delete { target: qux.unwrap() }));

        state.invoke(MenuAction::NewFile, "scripts/lib");
        let lib = state.snapshot().find_by_path("scripts/lib").expect("exists");
        state.apply(Edit::Rename {
            target: lib,
            label: "src".to_string(),
        });
        assert_eq!(
            state.pending(),
            Some(&Pending::Create {
                parent: "scripts/src".to_string(),
                kind: NodeKind::Leaf
            })
        );

        let src = state.snapshot().find_by_path("scripts/src").expect("exists");
        state.apply(Edit::Delete { target: src });
        assert_eq!(state.pending(), None);
    }

    #[test]
    fn test_editing_row_is_not_selected() {
        let mut state = explorer();
        state.select("scripts/foo.js");
        assert!(state.begin_rename_focused());

        let rows = state.rows();
        let foo = rows
            .iter()
            .filter_map(Row::as_node)
            .find(|row| row.path == "scripts/foo.js")
            .expect("row is visible");
        assert!(foo.editing);
        assert!(!foo.selected);
        assert!(!foo.outlined);
        assert_eq!(state.selection(), Some("scripts/foo.js"));
    }

    #[test]
    fn test_failed_replace_keeps_state() {
        let mut state = explorer();
        state.select("scripts/notes.txt");

        let result = state.replace(|_| anyhow::bail!("no access"));

        assert!(result.is_err());
        assert_eq!(state.selection(), Some("scripts/notes.txt"));
        assert_eq!(state.tree().generation(), Generation::INITIAL);
    }
}
