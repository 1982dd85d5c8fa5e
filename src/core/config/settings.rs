//! `set` / `unset` key handling for the CLI.

use std::path::PathBuf;

use crate::core::config::data::Config;
use crate::ui::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    DefaultModel,
    BaseUrl,
    Theme,
    Markdown,
    Syntax,
    GroupLists,
    LogFilter,
    ResourcesFile,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 8] = [
        ConfigKey::DefaultModel,
        ConfigKey::BaseUrl,
        ConfigKey::Theme,
        ConfigKey::Markdown,
        ConfigKey::Syntax,
        ConfigKey::GroupLists,
        ConfigKey::LogFilter,
        ConfigKey::ResourcesFile,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::DefaultModel => "default-model",
            ConfigKey::BaseUrl => "base-url",
            ConfigKey::Theme => "theme",
            ConfigKey::Markdown => "markdown",
            ConfigKey::Syntax => "syntax",
            ConfigKey::GroupLists => "group-lists",
            ConfigKey::LogFilter => "log-filter",
            ConfigKey::ResourcesFile => "resources-file",
        }
    }

    pub fn parse(key: &str) -> Result<Self, String> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == key)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|k| k.as_str()).collect();
                format!("Unknown config key: {key} (known: {})", known.join(", "))
            })
    }
}

fn parse_toggle(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        other => Err(format!("Expected on/off, got: {other}")),
    }
}

impl Config {
    pub fn set_value(&mut self, key: ConfigKey, value: &str) -> Result<(), String> {
        let value = value.trim();
        if value.is_empty() {
            return Err(format!("{} needs a value", key.as_str()));
        }
        match key {
            ConfigKey::DefaultModel => self.default_model = Some(value.to_string()),
            ConfigKey::BaseUrl => self.base_url = Some(value.to_string()),
            ConfigKey::Theme => {
                let name = value.to_ascii_lowercase();
                if !Theme::NAMES.contains(&name.as_str()) {
                    return Err(format!(
                        "Unknown theme: {value} (known: {})",
                        Theme::NAMES.join(", ")
                    ));
                }
                self.theme = Some(name);
            }
            ConfigKey::Markdown => self.markdown = Some(parse_toggle(value)?),
            ConfigKey::Syntax => self.syntax = Some(parse_toggle(value)?),
            ConfigKey::GroupLists => self.group_lists = Some(parse_toggle(value)?),
            ConfigKey::LogFilter => {
                tracing_subscriber::EnvFilter::try_new(value)
                    .map_err(|err| format!("Invalid log filter: {err}"))?;
                self.log_filter = Some(value.to_string());
            }
            ConfigKey::ResourcesFile => self.resources_file = Some(PathBuf::from(value)),
        }
        Ok(())
    }

    pub fn unset_value(&mut self, key: ConfigKey) {
        match key {
            ConfigKey::DefaultModel => self.default_model = None,
            ConfigKey::BaseUrl => self.base_url = None,
            ConfigKey::Theme => self.theme = None,
            ConfigKey::Markdown => self.markdown = None,
            ConfigKey::Syntax => self.syntax = None,
            ConfigKey::GroupLists => self.group_lists = None,
            ConfigKey::LogFilter => self.log_filter = None,
            ConfigKey::ResourcesFile => self.resources_file = None,
        }
    }
}
