use super::*;
use crate::cli::chat::{parse_command, ChatCommand};
use crate::cli::resources::{add_and_save, draft_from_fields, patch_from_fields};
use crate::core::resources::{ResourceDraft, ResourceError, ResourceList, ResourceStore};
use tempfile::TempDir;

mod test_helpers {
    use super::*;

    pub(super) fn parse_args(argv: &[&str]) -> Args {
        Args::try_parse_from(argv)
            .unwrap_or_else(|err| panic!("argv={argv:?} should parse successfully: {err}"))
    }
}

use test_helpers::parse_args;

#[test]
fn no_subcommand_means_chat() {
    let args = parse_args(&["resdeck"]);
    assert!(args.command.is_none());
    assert!(args.model.is_none());
    assert!(!args.no_color);
    assert!(!args.group_lists);
}

#[test]
fn global_flags_work_after_subcommand() {
    let args = parse_args(&["resdeck", "say", "--no-color", "-m", "mixtral", "hi"]);
    assert!(args.no_color);
    assert_eq!(args.model.as_deref(), Some("mixtral"));
    match args.command {
        Some(Commands::Say { prompt }) => assert_eq!(prompt, vec!["hi"]),
        _ => panic!("expected say"),
    }
}

#[test]
fn say_collects_all_words() {
    let args = parse_args(&["resdeck", "say", "how", "do", "I", "sort", "-r"]);
    match args.command {
        Some(Commands::Say { prompt }) => {
            assert_eq!(prompt.join(" "), "how do I sort -r");
        }
        _ => panic!("expected say"),
    }
}

#[test]
fn render_accepts_file_and_segments_flag() {
    let args = parse_args(&["resdeck", "render", "reply.md", "--segments"]);
    match args.command {
        Some(Commands::Render { file, segments }) => {
            assert_eq!(file.as_deref(), Some(std::path::Path::new("reply.md")));
            assert!(segments);
        }
        _ => panic!("expected render"),
    }

    let args = parse_args(&["resdeck", "render"]);
    assert!(matches!(
        args.command,
        Some(Commands::Render {
            file: None,
            segments: false
        })
    ));
}

#[test]
fn resources_list_defaults_to_grid() {
    let args = parse_args(&["resdeck", "resources", "list"]);
    match args.command {
        Some(Commands::Resources {
            command:
                ResourceCommands::List {
                    search,
                    category,
                    view,
                },
        }) => {
            assert!(search.is_none());
            assert!(category.is_none());
            assert_eq!(view, ViewMode::Grid);
        }
        _ => panic!("expected resources list"),
    }
}

#[test]
fn resources_list_filters_parse() {
    let args = parse_args(&[
        "resdeck", "resources", "list", "-s", "tokio", "-c", "Libraries", "--view", "list",
    ]);
    match args.command {
        Some(Commands::Resources {
            command:
                ResourceCommands::List {
                    search,
                    category,
                    view,
                },
        }) => {
            assert_eq!(search.as_deref(), Some("tokio"));
            assert_eq!(category.as_deref(), Some("Libraries"));
            assert_eq!(view, ViewMode::List);
        }
        _ => panic!("expected resources list"),
    }
}

#[test]
fn resources_add_builds_draft() {
    let args = parse_args(&[
        "resdeck",
        "resources",
        "add",
        "--title",
        "Tokio docs",
        "--tags",
        "async, rust,,",
        "--category",
        "Documentation",
    ]);
    let fields = match args.command {
        Some(Commands::Resources {
            command: ResourceCommands::Add { fields },
        }) => fields,
        _ => panic!("expected resources add"),
    };
    let draft = draft_from_fields(fields);
    assert_eq!(draft.title, "Tokio docs");
    assert_eq!(draft.tags, vec!["async", "rust"]);
    assert_eq!(draft.category.as_deref(), Some("Documentation"));
    assert!(draft.url.is_none());
    assert!(draft.description.is_empty());
}

#[test]
fn resources_edit_builds_patch_of_given_fields() {
    let args = parse_args(&["resdeck", "resources", "edit", "42", "--url", "https://tokio.rs"]);
    let (id, fields) = match args.command {
        Some(Commands::Resources {
            command: ResourceCommands::Edit { id, fields },
        }) => (id, fields),
        _ => panic!("expected resources edit"),
    };
    assert_eq!(id, "42");
    let patch = patch_from_fields(fields);
    assert_eq!(patch.url.as_deref(), Some("https://tokio.rs"));
    assert!(patch.title.is_none());
    assert!(patch.tags.is_none());
    assert!(!patch.is_empty());

    assert!(patch_from_fields(ResourceFields::default()).is_empty());
}

#[test]
fn set_joins_multi_word_values() {
    let args = parse_args(&["resdeck", "set", "log-filter", "warn,resdeck=debug"]);
    match args.command {
        Some(Commands::Set { key, value }) => {
            assert_eq!(key.as_deref(), Some("log-filter"));
            assert_eq!(value, vec!["warn,resdeck=debug"]);
        }
        _ => panic!("expected set"),
    }

    let args = parse_args(&["resdeck", "set"]);
    assert!(matches!(
        args.command,
        Some(Commands::Set { key: None, .. })
    ));
}

#[test]
fn unknown_subcommand_is_rejected() {
    assert!(Args::try_parse_from(["resdeck", "bogus"]).is_err());
    assert!(Args::try_parse_from(["resdeck", "resources", "list", "--view", "cards"]).is_err());
}

#[test]
fn chat_commands_parse() {
    assert_eq!(parse_command("/quit"), Some(ChatCommand::Quit));
    assert_eq!(parse_command("  /help "), Some(ChatCommand::Help));
    assert_eq!(parse_command("/copy 2"), Some(ChatCommand::Copy(2)));
    assert_eq!(
        parse_command("/copy 0"),
        Some(ChatCommand::Unknown("Usage: /copy <n>".into()))
    );
    assert_eq!(
        parse_command("/dance"),
        Some(ChatCommand::Unknown("Unknown command: /dance".into()))
    );
    assert_eq!(parse_command("how do I sort?"), None);
}

#[test]
fn add_persists_before_reporting() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let store = ResourceStore::new(temp_dir.path().join("resources.json"));
    let mut list = ResourceList::default();
    let draft = ResourceDraft {
        title: "Tokio docs".into(),
        ..Default::default()
    };

    let added = add_and_save(&store, &mut list, draft).expect("add should succeed");
    let reloaded = store.load().expect("load");
    assert_eq!(reloaded.find(&added.id).map(|r| r.title.as_str()), Some("Tokio docs"));
}

#[test]
fn add_fails_when_store_cannot_be_written() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let blocker = temp_dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();
    let store = ResourceStore::new(blocker.join("resources.json"));
    let mut list = ResourceList::default();
    let draft = ResourceDraft {
        title: "Never saved".into(),
        ..Default::default()
    };

    let result = add_and_save(&store, &mut list, draft);
    assert!(matches!(result, Err(ResourceError::Io { .. })), "{result:?}");
}
