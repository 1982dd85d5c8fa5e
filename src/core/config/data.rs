use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::constants::{DEFAULT_BASE_URL, DEFAULT_MODEL};

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Model id sent with every chat request
    pub default_model: Option<String>,
    /// OpenAI-compatible API root, e.g. "https://api.groq.com/openai/v1"
    pub base_url: Option<String>,
    /// UI theme name ("dark", "light", "monochrome")
    pub theme: Option<String>,
    /// Render assistant replies through the line markup transform
    pub markdown: Option<bool>,
    /// Syntax highlight fenced code blocks
    pub syntax: Option<bool>,
    /// Group consecutive list items into one list
    pub group_lists: Option<bool>,
    /// tracing filter directives, e.g. "warn,resdeck::utils::clipboard=off"
    pub log_filter: Option<String>,
    /// Where resources are stored; defaults to the platform data dir
    pub resources_file: Option<PathBuf>,
}

impl Config {
    pub fn model(&self) -> &str {
        self.default_model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn markdown_enabled(&self) -> bool {
        self.markdown.unwrap_or(true)
    }

    pub fn syntax_enabled(&self) -> bool {
        self.syntax.unwrap_or(true)
    }

    pub fn group_lists_enabled(&self) -> bool {
        self.group_lists.unwrap_or(false)
    }
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
///
/// # Examples
/// - Unix: `/home/user/.config/resdeck/config.toml` → `~/.config/resdeck/config.toml`
/// - macOS: `/Users/user/Library/Application Support/...` → `~/Library/Application Support/...`
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
