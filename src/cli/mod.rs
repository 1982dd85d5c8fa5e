//! Command-line interface parsing and handling
//!
//! This module parses arguments and dispatches to the chat, render,
//! resource and settings commands.

pub mod chat;
pub mod render;
pub mod resources;
pub mod say;

use std::error::Error;
use std::io::IsTerminal;
use std::sync::LazyLock;

use clap::{Args as ClapArgs, Parser, Subcommand};
use ratatui::crossterm::terminal;

use crate::core::config::settings::ConfigKey;
use crate::core::config::Config;
use crate::ui::render::RenderConfig;
use crate::ui::resource_view::ViewMode;
use crate::ui::theme::Theme;
use crate::utils::logging::init_logging;

static LONG_VERSION: LazyLock<String> = LazyLock::new(|| {
    format!(
        "{}\ncommit: {} ({})\nbuilt: {}\nrustc: {}",
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE"),
        env!("VERGEN_GIT_SHA"),
        env!("VERGEN_BUILD_DATE"),
        env!("VERGEN_RUSTC_SEMVER"),
    )
});

#[derive(Parser)]
#[command(name = "resdeck")]
#[command(version, long_version = LONG_VERSION.as_str())]
#[command(about = "A terminal coding assistant and resource library")]
#[command(
    long_about = "resdeck sends your questions to an OpenAI-compatible chat API and renders \
the replies in the terminal, with headings, lists, bold text and highlighted code blocks. \
It also keeps a small local library of links and notes.\n\n\
Environment Variables:\n\
  GROQ_API_KEY      API key for the chat endpoint\n\
  OPENAI_API_KEY    Used when GROQ_API_KEY is not set\n\
  RUST_LOG          Diagnostic log filter (overrides log-filter)\n\
  NO_COLOR          Disable colored output\n\n\
Chat commands:\n\
  /copy <n>         Copy code block n of the last reply\n\
  /help             Show the chat commands\n\
  /quit             Leave the chat\n\
  Ctrl+C            Cancel a pending reply, or quit at the prompt"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Model to use for chat
    #[arg(short = 'm', long, global = true, value_name = "MODEL")]
    pub model: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Render consecutive list items as one grouped list
    #[arg(long, global = true)]
    pub group_lists: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat (default)
    Chat,
    /// Send one prompt and print the rendered reply
    Say {
        /// Prompt text; multiple words are joined with spaces
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        prompt: Vec<String>,
    },
    /// Render assistant-style text from a file or stdin
    Render {
        /// File to read; stdin when omitted
        file: Option<std::path::PathBuf>,
        /// Print the text/code segments as JSON instead
        #[arg(long)]
        segments: bool,
    },
    /// Manage the resource library
    Resources {
        #[command(subcommand)]
        command: ResourceCommands,
    },
    /// Set configuration values
    Set {
        /// Configuration key to set
        key: Option<String>,
        /// Value to set; multiple words are joined with spaces
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

#[derive(Subcommand)]
pub enum ResourceCommands {
    /// List resources, optionally filtered
    List {
        /// Case-insensitive search over title, description and tags
        #[arg(short = 's', long)]
        search: Option<String>,
        /// Only show this category ("all" shows everything)
        #[arg(short = 'c', long)]
        category: Option<String>,
        #[arg(long, value_enum, default_value_t = ViewMode::Grid)]
        view: ViewMode,
    },
    /// Add a resource
    Add {
        #[command(flatten)]
        fields: ResourceFields,
    },
    /// Change fields of an existing resource
    Edit {
        id: String,
        #[command(flatten)]
        fields: ResourceFields,
    },
    /// Show one resource in detail
    Show { id: String },
    /// Delete a resource
    Delete { id: String },
}

#[derive(ClapArgs, Debug, Default)]
pub struct ResourceFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Comma separated tags
    #[arg(long)]
    pub tags: Option<String>,
    #[arg(long)]
    pub url: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
}

/// How replies are rendered and written for this invocation.
pub struct OutputSettings {
    pub theme: Theme,
    pub render: RenderConfig,
    pub color: bool,
}

impl OutputSettings {
    fn resolve(config: &Config, args: &Args) -> Self {
        let color =
            !args.no_color && std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal();
        let theme = if color {
            config
                .theme
                .as_deref()
                .map(Theme::from_name)
                .unwrap_or_else(Theme::dark_default)
        } else {
            Theme::monochrome()
        };
        Self {
            theme,
            render: RenderConfig {
                markdown: config.markdown_enabled(),
                syntax: color && config.syntax_enabled(),
                group_lists: args.group_lists || config.group_lists_enabled(),
                width: terminal_width(),
            },
            color,
        }
    }
}

pub(crate) fn terminal_width() -> Option<usize> {
    terminal::size().ok().map(|(w, _)| w as usize)
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let config = Config::load()?;
    init_logging(config.log_filter.as_deref());

    let output = OutputSettings::resolve(&config, &args);
    let model = args
        .model
        .clone()
        .unwrap_or_else(|| config.model().to_string());

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Chat => chat::run_chat(&config, model, &output).await,
        Commands::Say { prompt } => say::run_say(&config, model, prompt, &output).await,
        Commands::Render { file, segments } => {
            render::run_render(file.as_deref(), segments, &output)
        }
        Commands::Resources { command } => resources::run_resources(&config, command, &output),
        Commands::Set { key, value } => run_set(config, key, value),
        Commands::Unset { key } => run_unset(config, &key),
    }
}

fn run_set(mut config: Config, key: Option<String>, value: Vec<String>) -> Result<(), Box<dyn Error>> {
    let Some(key) = key else {
        config.print_all();
        return Ok(());
    };
    if value.is_empty() {
        config.print_all();
        return Ok(());
    }
    let key = ConfigKey::parse(&key)?;
    let value = value.join(" ");
    config.set_value(key, &value)?;
    config.save()?;
    println!("✅ Set {} to: {value}", key.as_str());
    Ok(())
}

fn run_unset(mut config: Config, key: &str) -> Result<(), Box<dyn Error>> {
    let key = ConfigKey::parse(key)?;
    config.unset_value(key);
    config.save()?;
    println!("✅ Unset {}", key.as_str());
    Ok(())
}

#[cfg(test)]
mod tests;
