//! One-shot "say" command

use std::error::Error;
use std::io;

use tracing::debug;

use crate::cli::OutputSettings;
use crate::core::chat::{api_key_from_env, ChatClient, ChatError};
use crate::core::config::Config;
use crate::core::conversation::Conversation;
use crate::ui::ansi::write_lines;
use crate::ui::render::render_message;

pub async fn run_say(
    config: &Config,
    model: String,
    prompt: Vec<String>,
    output: &OutputSettings,
) -> Result<(), Box<dyn Error>> {
    let prompt = prompt.join(" ");
    if prompt.trim().is_empty() {
        return Err("Usage: resdeck say <prompt>".into());
    }

    let client = ChatClient::new(config.base_url(), api_key_from_env()?, model);
    let mut conversation = Conversation::new();
    let pending = conversation.begin_submit(&prompt)?;
    let token = pending.cancel_token();

    let result = tokio::select! {
        result = client.complete(pending.api_messages, &token) => result,
        _ = tokio::signal::ctrl_c() => {
            debug!("ctrl+c during say");
            token.cancel();
            Err(ChatError::Cancelled)
        }
    };
    let reply = result?;

    let rendered = render_message(&reply, &output.theme, &output.render);
    write_lines(&mut io::stdout().lock(), &rendered.lines, output.color)?;
    Ok(())
}
