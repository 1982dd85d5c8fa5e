//! Offline rendering of assistant-style text.

use std::error::Error;
use std::io::{self, Read};
use std::path::Path;

use crate::cli::OutputSettings;
use crate::core::message::Message;
use crate::core::segment::segment_response;
use crate::ui::ansi::write_lines;
use crate::ui::render::render_message;

pub fn run_render(
    file: Option<&Path>,
    segments: bool,
    output: &OutputSettings,
) -> Result<(), Box<dyn Error>> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|err| format!("Failed to read {}: {err}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    if segments {
        println!("{}", serde_json::to_string_pretty(&segment_response(&text))?);
        return Ok(());
    }

    let rendered = render_message(&Message::assistant(text), &output.theme, &output.render);
    write_lines(&mut io::stdout().lock(), &rendered.lines, output.color)?;
    Ok(())
}
