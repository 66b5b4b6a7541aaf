//! Context menu contents for explorer rows

use crate::config::ExplorerConfig;
use derive_more::Display;
use explorer_tree::tree::{NodeId, NodeRef};
use std::fmt;

/// An action offered by the context menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum MenuAction {
    #[display(fmt = "New File...")]
    NewFile,
    #[display(fmt = "New Folder...")]
    NewFolder,
    #[display(fmt = "Run")]
    Run,
    #[display(fmt = "Rename...")]
    Rename,
    #[display(fmt = "Delete Permanently")]
    Delete,
}

/// One line of a context menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Item {
        action: MenuAction,
        shortcut: Option<&'static str>,
    },
    Separator,
}

impl MenuEntry {
    fn item(action: MenuAction) -> Self {
        MenuEntry::Item {
            action,
            shortcut: None,
        }
    }

    fn with_shortcut(action: MenuAction, shortcut: &'static str) -> Self {
        MenuEntry::Item {
            action,
            shortcut: Some(shortcut),
        }
    }

    pub fn action(&self) -> Option<MenuAction> {
        match self {
            MenuEntry::Item { action, .. } => Some(*action),
            MenuEntry::Separator => None,
        }
    }
}

impl fmt::Display for MenuEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuEntry::Item {
                action,
                shortcut: Some(shortcut),
            } => write!(f, "{}\t{}", action, shortcut),
            MenuEntry::Item { action, .. } => write!(f, "{}", action),
            MenuEntry::Separator => f.write_str("---"),
        }
    }
}

/// The context menu opened on one node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextMenu {
    pub target: NodeId,
    pub path: String,
    pub entries: Vec<MenuEntry>,
}

impl ContextMenu {
    /// Build the menu for `node`
    ///
    /// Containers offer creation, runnable leaves offer run, and every node
    /// offers rename and delete with the platform's shortcut hints.
    pub fn for_node(node: NodeRef<'_>, config: &ExplorerConfig) -> Self {
        let mut entries = Vec::with_capacity(6);

        if node.is_container() {
            entries.push(MenuEntry::item(MenuAction::NewFile));
            entries.push(MenuEntry::item(MenuAction::NewFolder));
            entries.push(MenuEntry::Separator);
        } else if config.is_runnable(node.label()) {
            entries.push(MenuEntry::item(MenuAction::Run));
            entries.push(MenuEntry::Separator);
        }

        entries.push(MenuEntry::with_shortcut(
            MenuAction::Rename,
            config.rename_shortcut(),
        ));
        entries.push(MenuEntry::with_shortcut(
            MenuAction::Delete,
            config.delete_shortcut(),
        ));

        Self {
            target: node.id(),
            path: node.full_path(),
            entries,
        }
    }

    /// Actions in menu order, separators skipped
    pub fn actions(&self) -> impl Iterator<Item = MenuAction> + '_ {
        self.entries.iter().filter_map(MenuEntry::action)
    }

    pub fn offers(&self, action: MenuAction) -> bool {
        self.actions().any(|a| a == action)
    }
}
