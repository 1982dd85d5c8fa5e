//! Resdeck is a terminal resource deck with an AI copilot.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the domain: chat messages and the append-only
//!   conversation, reply segmentation, the resource list, and configuration.
//! - [`ui`] turns messages into styled terminal lines: the per-line markup
//!   transform, themes, and the ANSI writer used by the CLI.
//! - [`api`] defines the chat-completion payloads exchanged with the remote
//!   model.
//! - [`utils`] collects small adapters (clipboard, syntax highlighting, URL
//!   handling, logging setup).
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
