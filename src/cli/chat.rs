//! Line-based interactive chat.

use std::error::Error;
use std::io::{self, Write};

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::cli::OutputSettings;
use crate::core::chat::{api_key_from_env, ChatClient};
use crate::core::config::Config;
use crate::core::conversation::{Conversation, SubmitError};
use crate::core::message::Message;
use crate::ui::ansi::write_lines;
use crate::ui::render::{render_error, render_message, CodeBlock};
use crate::utils::clipboard::copy_to_clipboard;

const HELP: &str = "Commands:
  /copy <n>   Copy code block n of the last reply
  /help       Show this help
  /quit       Leave the chat
Ctrl+C cancels a pending reply; at the prompt it quits.";

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ChatCommand {
    Quit,
    Help,
    Copy(usize),
    Unknown(String),
}

/// Parse a `/`-prefixed line. Anything else is a prompt.
pub(crate) fn parse_command(line: &str) -> Option<ChatCommand> {
    let rest = line.trim().strip_prefix('/')?;
    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or("");
    let command = match name {
        "quit" | "exit" => ChatCommand::Quit,
        "help" => ChatCommand::Help,
        "copy" => match parts.next().and_then(|n| n.parse::<usize>().ok()) {
            Some(n) if n > 0 => ChatCommand::Copy(n),
            _ => ChatCommand::Unknown("Usage: /copy <n>".to_string()),
        },
        other => ChatCommand::Unknown(format!("Unknown command: /{other}")),
    };
    Some(command)
}

struct ChatView<'a> {
    output: &'a OutputSettings,
    code_blocks: Vec<CodeBlock>,
}

impl ChatView<'_> {
    fn show_message(&mut self, message: &Message) -> io::Result<()> {
        let rendered = render_message(message, &self.output.theme, &self.output.render);
        if message.role.is_assistant() {
            self.code_blocks = rendered.code_blocks;
        }
        write_lines(&mut io::stdout().lock(), &rendered.lines, self.output.color)?;
        println!();
        Ok(())
    }

    fn show_error(&self, message: &str) -> io::Result<()> {
        let line = render_error(message, &self.output.theme);
        write_lines(&mut io::stdout().lock(), &[line], self.output.color)
    }

    fn copy(&self, n: usize) -> io::Result<()> {
        match self.code_blocks.get(n - 1) {
            Some(block) => match copy_to_clipboard(&block.code) {
                Ok(()) => println!("✅ Copied {} block {n}", block.language),
                Err(err) => self.show_error(&err)?,
            },
            None => self.show_error(&format!("No code block {n} in the last reply"))?,
        }
        Ok(())
    }
}

fn prompt() -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "> ")?;
    stdout.flush()
}

pub async fn run_chat(
    config: &Config,
    model: String,
    output: &OutputSettings,
) -> Result<(), Box<dyn Error>> {
    let client = ChatClient::new(config.base_url(), api_key_from_env()?, model);
    info!(model = client.model(), base_url = config.base_url(), "starting chat");

    let mut conversation = Conversation::new();
    let mut view = ChatView {
        output,
        code_blocks: Vec::new(),
    };
    for message in conversation.messages() {
        view.show_message(message)?;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt()?;
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            println!();
            break;
        };

        match parse_command(&line) {
            Some(ChatCommand::Quit) => break,
            Some(ChatCommand::Help) => println!("{HELP}"),
            Some(ChatCommand::Copy(n)) => view.copy(n)?,
            Some(ChatCommand::Unknown(message)) => view.show_error(&message)?,
            None => {
                let pending = match conversation.begin_submit(&line) {
                    Ok(pending) => pending,
                    Err(SubmitError::Empty) => continue,
                    Err(err) => {
                        view.show_error(&err.to_string())?;
                        continue;
                    }
                };

                let token = pending.cancel_token();
                let watcher = tokio::spawn({
                    let token = token.clone();
                    async move {
                        if tokio::signal::ctrl_c().await.is_ok() {
                            debug!("ctrl+c during request");
                            token.cancel();
                        }
                    }
                });
                let result = client.complete(pending.api_messages, &token).await;
                watcher.abort();

                conversation.finish_submit(result);
                match conversation.last_error() {
                    Some(err) => view.show_error(err)?,
                    None => {
                        if let Some(reply) = conversation.last_assistant() {
                            view.show_message(reply)?;
                        }
                    }
                }
            }
        }
    }
    Ok(())
}
