//! Copying code blocks to the system clipboard through platform tools.

use std::io::Write;
use std::process::{Command, Stdio};

use tracing::debug;

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const UNIX_TOOLS: [(&str, &[&str]); 3] = [
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

pub fn copy_to_clipboard(text: &str) -> Result<(), String> {
    #[cfg(target_os = "macos")]
    {
        pipe_into("pbcopy", &[], text)
    }
    #[cfg(target_os = "windows")]
    {
        pipe_into("cmd", &["/C", "clip"], text)
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        for (cmd, args) in UNIX_TOOLS {
            match pipe_into(cmd, args, text) {
                Ok(()) => return Ok(()),
                Err(err) => debug!(%cmd, %err, "clipboard tool unusable"),
            }
        }
        Err("No clipboard command found (install wl-copy, xclip, or xsel)".to_string())
    }
}

fn pipe_into(cmd: &str, args: &[&str], input: &str) -> Result<(), String> {
    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|_| format!("Clipboard command `{cmd}` not available"))?;

    let written = match child.stdin.take() {
        // stdin is dropped at the end of this arm so the tool sees EOF.
        Some(mut stdin) => stdin.write_all(input.as_bytes()),
        None => Ok(()),
    };
    let status = child.wait();
    if let Err(err) = written {
        return Err(format!("Clipboard command `{cmd}` rejected input: {err}"));
    }
    match status {
        Ok(status) if status.success() => {
            debug!(%cmd, bytes = input.len(), "copied to clipboard");
            Ok(())
        }
        _ => Err(format!("Clipboard command `{cmd}` failed")),
    }
}
