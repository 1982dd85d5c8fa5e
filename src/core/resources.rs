//! Saved resources: the in-memory list, search filtering, and file storage.

use std::error::Error as StdError;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::core::config::data::path_display;

pub const KNOWN_CATEGORIES: [&str; 4] = ["Documentation", "Tools", "Libraries", "Articles"];
pub const UNCATEGORIZED: &str = "Uncategorized";

fn default_title() -> String {
    "Untitled".to_string()
}

fn default_url() -> String {
    "#".to_string()
}

fn default_category() -> String {
    UNCATEGORIZED.to_string()
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "today")]
    pub date_added: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug)]
pub enum ResourceError {
    MissingTitle,
    NotFound(String),
    Io { path: PathBuf, source: std::io::Error },
    Json { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::MissingTitle => f.write_str("A resource needs a title."),
            ResourceError::NotFound(id) => write!(f, "No resource with id {id}"),
            ResourceError::Io { path, source } => {
                write!(f, "Failed to access {}: {}", path_display(path), source)
            }
            ResourceError::Json { path, source } => {
                write!(f, "Failed to parse {}: {}", path_display(path), source)
            }
        }
    }
}

impl StdError for ResourceError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ResourceError::Io { source, .. } => Some(source),
            ResourceError::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Split a comma separated tag field, dropping blanks.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// User input for a new resource, before an id is assigned.
#[derive(Debug, Clone, Default)]
pub struct ResourceDraft {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub url: Option<String>,
    pub category: Option<String>,
}

impl ResourceDraft {
    pub fn validate(&self) -> Result<(), ResourceError> {
        if self.title.trim().is_empty() {
            return Err(ResourceError::MissingTitle);
        }
        Ok(())
    }

    fn into_resource(self, id: String, date_added: NaiveDate) -> Resource {
        Resource {
            id,
            title: self.title.trim().to_string(),
            url: self
                .url
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(default_url),
            description: self.description,
            tags: self.tags,
            category: self
                .category
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(default_category),
            date_added,
            email: None,
        }
    }
}

/// Field-by-field edits; `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct ResourcePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub url: Option<String>,
    pub category: Option<String>,
}

impl ResourcePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.tags.is_none()
            && self.url.is_none()
            && self.category.is_none()
    }

    pub fn applied_to(self, resource: &Resource) -> Result<Resource, ResourceError> {
        let mut updated = resource.clone();
        if let Some(title) = self.title {
            if title.trim().is_empty() {
                return Err(ResourceError::MissingTitle);
            }
            updated.title = title.trim().to_string();
        }
        if let Some(description) = self.description {
            updated.description = description;
        }
        if let Some(tags) = self.tags {
            updated.tags = tags;
        }
        if let Some(url) = self.url {
            updated.url = url;
        }
        if let Some(category) = self.category {
            updated.category = category;
        }
        Ok(updated)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn parse(value: &str) -> Self {
        if value.trim().is_empty() || value.trim().eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.trim().to_string())
        }
    }

    fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResourceFilter {
    pub search: String,
    pub category: CategoryFilter,
}

impl ResourceFilter {
    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.category != CategoryFilter::All
    }

    pub fn matches(&self, resource: &Resource) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = resource.title.to_lowercase().contains(&needle)
            || resource.description.to_lowercase().contains(&needle)
            || resource
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&needle));
        matches_search && self.category.matches(&resource.category)
    }
}

/// Resources in display order, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceList {
    items: Vec<Resource>,
}

impl ResourceList {
    pub fn new(items: Vec<Resource>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Resource] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Resource> {
        self.items.iter().find(|r| r.id == id)
    }

    pub fn filtered(&self, filter: &ResourceFilter) -> Vec<&Resource> {
        self.items.iter().filter(|r| filter.matches(r)).collect()
    }

    /// Millisecond timestamp ids, bumped until unique within the list.
    fn next_id(&self) -> String {
        let mut candidate = Local::now().timestamp_millis();
        while self.find(&candidate.to_string()).is_some() {
            candidate += 1;
        }
        candidate.to_string()
    }

    /// Validate `draft`, assign an id and put it at the front.
    pub fn insert_new(&mut self, draft: ResourceDraft) -> Result<&Resource, ResourceError> {
        draft.validate()?;
        let id = self.next_id();
        self.items.insert(0, draft.into_resource(id, today()));
        Ok(&self.items[0])
    }

    /// Replace the resource with the same id, keeping its position.
    pub fn apply_update(&mut self, updated: Resource) -> Result<(), ResourceError> {
        let slot = self
            .items
            .iter_mut()
            .find(|r| r.id == updated.id)
            .ok_or_else(|| ResourceError::NotFound(updated.id.clone()))?;
        *slot = updated;
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Result<Resource, ResourceError> {
        let index = self
            .items
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| ResourceError::NotFound(id.to_string()))?;
        Ok(self.items.remove(index))
    }
}

/// JSON file holding the resource list. Every save rewrites the whole file.
pub struct ResourceStore {
    path: PathBuf,
}

impl ResourceStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "resdeck", "resdeck")
            .map(|dirs| dirs.data_dir().join("resources.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<ResourceList, ResourceError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no resource file yet");
            return Ok(ResourceList::default());
        }
        let contents = fs::read_to_string(&self.path).map_err(|source| ResourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ResourceError::Json {
            path: self.path.clone(),
            source,
        })
    }

    pub fn save(&self, list: &ResourceList) -> Result<(), ResourceError> {
        let io_err = |source| ResourceError::Io {
            path: self.path.clone(),
            source,
        };
        let parent = self
            .path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty());
        if let Some(dir) = parent {
            fs::create_dir_all(dir).map_err(io_err)?;
        }

        let contents = serde_json::to_string_pretty(list).map_err(|source| ResourceError::Json {
            path: self.path.clone(),
            source,
        })?;
        let mut temp_file = match parent {
            Some(dir) => NamedTempFile::new_in(dir),
            None => NamedTempFile::new(),
        }
        .map_err(io_err)?;
        temp_file.write_all(contents.as_bytes()).map_err(io_err)?;
        temp_file.as_file_mut().sync_all().map_err(io_err)?;
        temp_file
            .persist(&self.path)
            .map_err(|err| io_err(err.error))?;
        debug!(path = %self.path.display(), count = list.len(), "saved resources");
        Ok(())
    }
}
