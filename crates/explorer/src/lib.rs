//! Explorer
//!
//! The interaction layer of a file/folder explorer, built on
//! [`explorer_tree`]. It tracks what a list view needs besides the forest:
//! expansion, selection and focus, context menus, and the inline create and
//! rename inputs. It renders nothing itself; [`rows`] and [`outline`] expose
//! the visible state for a view to draw.
//!
//! # Example
//!
//! ```
//! use explorer::prelude::*;
//!
//! let tree = TreeState::new(vec![Shape::container("scripts", [Shape::leaf("foo.js")])]);
//! let mut explorer = ExplorerState::new(tree, ExplorerConfig::default());
//!
//! explorer.invoke(MenuAction::NewFile, "scripts");
//! explorer.commit_create("bar.js");
//!
//! assert_eq!(explorer.outline(), "▾ scripts\n  · bar.js\n  · foo.js");
//! ```

pub mod config;
pub mod input;
pub mod menu;
pub mod outline;
pub mod rows;
pub mod run;
pub mod state;

pub use config::{ExplorerConfig, Platform};
pub use menu::{ContextMenu, MenuAction, MenuEntry};
pub use rows::{DraftRow, NodeRow, Row};
pub use run::RunRequest;
pub use state::{ExplorerState, Pending};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        ContextMenu, ExplorerConfig, ExplorerState, MenuAction, Pending, Platform, Row,
        RunRequest,
    };
    pub use explorer_tree::prelude::*;
}
