//! Configuration options for the explorer.
//!
//! `ExplorerConfig` controls layout (indentation), which leaves offer the
//! run action, whether containers start expanded, and which platform the
//! shortcut hints are written for.

use derive_more::Display;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration options for an explorer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExplorerConfig {
    /// Platform the shortcut hints are shown for.
    pub platform: Platform,

    /// Horizontal indentation per depth level, in pixels.
    pub indent_width: usize,

    /// Label suffix that marks a leaf as runnable.
    pub runnable_extension: String,

    /// Whether containers start expanded.
    pub open_by_default: bool,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            platform: Platform::current(),
            indent_width: 8,
            runnable_extension: ".js".to_string(),
            open_by_default: true,
        }
    }
}

impl ExplorerConfig {
    /// Create new explorer options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the platform used for shortcut hints.
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Set the indentation per depth level.
    pub fn indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Set the suffix that marks runnable leaves.
    pub fn runnable_extension(mut self, extension: impl Into<String>) -> Self {
        self.runnable_extension = extension.into();
        self
    }

    /// Start containers expanded or collapsed.
    pub fn open_by_default(mut self, open: bool) -> Self {
        self.open_by_default = open;
        self
    }

    /// Returns true if a leaf with this label offers the run action.
    pub fn is_runnable(&self, label: &str) -> bool {
        label.ends_with(self.runnable_extension.as_str())
    }

    /// Shortcut hint for starting a rename.
    pub fn rename_shortcut(&self) -> &'static str {
        if self.platform.has_cmd_key() {
            "↵"
        } else {
            "F2"
        }
    }

    /// Shortcut hint for deleting the selection.
    pub fn delete_shortcut(&self) -> &'static str {
        if self.platform.has_cmd_key() {
            "⌘⌫"
        } else {
            "Delete"
        }
    }
}

/// Host operating system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Platform {
    #[display(fmt = "linux")]
    Linux,
    #[display(fmt = "windows")]
    Windows,
    #[display(fmt = "macos")]
    MacOs,
    #[display(fmt = "ios")]
    Ios,
    #[display(fmt = "android")]
    Android,
}

impl Platform {
    /// The platform this binary was compiled for.
    ///
    /// Anything unrecognised is treated as Linux.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "ios") {
            Self::Ios
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "android") {
            Self::Android
        } else {
            Self::Linux
        }
    }

    /// Returns true if the platform has a Command key.
    pub fn has_cmd_key(&self) -> bool {
        matches!(self, Self::MacOs | Self::Ios)
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}
