//! Presentation layer.
//!
//! Everything here turns domain values into styled [`ratatui::text::Line`]s
//! and writes them to the terminal:
//! - [`markup`]: the line markup transform for assistant text.
//! - [`render`]: chat messages, code block headers and inline errors.
//! - [`resource_view`]: list, grid and preview layouts for resources.
//! - [`theme`]: color and style policy.
//! - [`ansi`]: writing styled lines to a plain stream.
//!
//! [`crate::core`] owns the data; this layer never mutates it.

pub mod ansi;
pub mod markup;
pub mod render;
pub mod resource_view;
pub mod theme;
