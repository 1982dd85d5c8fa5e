//! `resources` subcommands over the local JSON store.

use std::error::Error;
use std::io;

use crate::cli::{terminal_width, OutputSettings, ResourceCommands, ResourceFields};
use crate::core::config::Config;
use crate::core::resources::{
    parse_tags, CategoryFilter, Resource, ResourceDraft, ResourceError, ResourceFilter,
    ResourceList, ResourcePatch, ResourceStore, KNOWN_CATEGORIES,
};
use crate::ui::ansi::write_lines;
use crate::ui::resource_view::{
    empty_state_lines, grid_lines, list_lines, preview_lines, ViewMode,
};

const FALLBACK_WIDTH: usize = 80;

fn open_store(config: &Config) -> Result<ResourceStore, Box<dyn Error>> {
    let path = match &config.resources_file {
        Some(path) => path.clone(),
        None => ResourceStore::default_path().ok_or("No data directory available")?,
    };
    Ok(ResourceStore::new(path))
}

pub(crate) fn draft_from_fields(fields: ResourceFields) -> ResourceDraft {
    ResourceDraft {
        title: fields.title.unwrap_or_default(),
        description: fields.description.unwrap_or_default(),
        tags: fields.tags.as_deref().map(parse_tags).unwrap_or_default(),
        url: fields.url,
        category: fields.category,
    }
}

pub(crate) fn patch_from_fields(fields: ResourceFields) -> ResourcePatch {
    ResourcePatch {
        title: fields.title,
        description: fields.description,
        tags: fields.tags.as_deref().map(parse_tags),
        url: fields.url,
        category: fields.category,
    }
}

/// Insert `draft` and persist the list. Nothing is reported as added
/// unless the save succeeded.
pub(crate) fn add_and_save(
    store: &ResourceStore,
    list: &mut ResourceList,
    draft: ResourceDraft,
) -> Result<Resource, ResourceError> {
    let added = list.insert_new(draft)?.clone();
    store.save(list)?;
    Ok(added)
}

fn warn_unknown_category(category: Option<&str>) {
    if let Some(category) = category {
        if !KNOWN_CATEGORIES.contains(&category) {
            eprintln!(
                "⚠️  \"{category}\" is not one of: {}",
                KNOWN_CATEGORIES.join(", ")
            );
        }
    }
}

pub fn run_resources(
    config: &Config,
    command: ResourceCommands,
    output: &OutputSettings,
) -> Result<(), Box<dyn Error>> {
    let store = open_store(config)?;
    let mut list = store.load()?;
    let theme = &output.theme;

    match command {
        ResourceCommands::List {
            search,
            category,
            view,
        } => {
            let filter = ResourceFilter {
                search: search.unwrap_or_default(),
                category: category
                    .as_deref()
                    .map(CategoryFilter::parse)
                    .unwrap_or_default(),
            };
            let matches = list.filtered(&filter);
            let lines = if matches.is_empty() {
                empty_state_lines(filter.is_active(), theme)
            } else {
                match view {
                    ViewMode::List => list_lines(&matches, theme),
                    ViewMode::Grid => {
                        grid_lines(&matches, theme, terminal_width().unwrap_or(FALLBACK_WIDTH))
                    }
                }
            };
            write_lines(&mut io::stdout().lock(), &lines, output.color)?;
        }
        ResourceCommands::Add { fields } => {
            warn_unknown_category(fields.category.as_deref());
            let added = add_and_save(&store, &mut list, draft_from_fields(fields))?;
            println!("✅ Added resource {}: {}", added.id, added.title);
        }
        ResourceCommands::Edit { id, fields } => {
            let patch = patch_from_fields(fields);
            if patch.is_empty() {
                return Err("Nothing to change; pass at least one field flag".into());
            }
            warn_unknown_category(patch.category.as_deref());
            let current = list.find(&id).ok_or(ResourceError::NotFound(id.clone()))?;
            let updated = patch.applied_to(current)?;
            list.apply_update(updated)?;
            store.save(&list)?;
            println!("✅ Updated resource {id}");
        }
        ResourceCommands::Show { id } => {
            let resource = list.find(&id).ok_or(ResourceError::NotFound(id.clone()))?;
            write_lines(
                &mut io::stdout().lock(),
                &preview_lines(resource, theme),
                output.color,
            )?;
        }
        ResourceCommands::Delete { id } => {
            let removed = list.remove(&id)?;
            store.save(&list)?;
            println!("✅ Deleted resource {}: {}", removed.id, removed.title);
        }
    }
    Ok(())
}
