//! Turns chat messages into styled terminal lines.
//!
//! Assistant replies are segmented into text and code first. Text segments
//! go through the line markup transform; code segments get a language
//! header and syntax highlighting.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::constants::DEFAULT_RULE_WIDTH;
use crate::core::message::Message;
use crate::core::segment::{segment_response, Segment};
use crate::ui::markup::{group_list_items, transform_text, InlineRun, MarkupBlock, MarkupLine};
use crate::ui::theme::Theme;
use crate::utils::syntax::highlight_code_block;

const LIST_INDENT: &str = "  ";
const LIST_MARKER: &str = "• ";

#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    /// Apply the markup transform; otherwise assistant text is verbatim.
    pub markdown: bool,
    pub syntax: bool,
    /// Group consecutive list items into one list with surrounding spacing.
    pub group_lists: bool,
    pub width: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            markdown: true,
            syntax: true,
            group_lists: false,
            width: None,
        }
    }
}

/// Raw code of one block, kept for copying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub language: String,
    pub code: String,
}

#[derive(Debug, Default)]
pub struct RenderedMessage {
    pub lines: Vec<Line<'static>>,
    pub code_blocks: Vec<CodeBlock>,
}

pub fn render_message(message: &Message, theme: &Theme, config: &RenderConfig) -> RenderedMessage {
    if message.role.is_user() {
        return RenderedMessage {
            lines: render_user(&message.content, theme),
            code_blocks: Vec::new(),
        };
    }
    if !config.markdown {
        return RenderedMessage {
            lines: message
                .content
                .split('\n')
                .map(|l| Line::from(Span::styled(l.to_string(), theme.assistant_text_style)))
                .collect(),
            code_blocks: Vec::new(),
        };
    }

    let mut rendered = RenderedMessage::default();
    for segment in segment_response(&message.content) {
        match segment {
            Segment::Text { content } => render_text(&content, theme, config, &mut rendered.lines),
            Segment::Code { content, language } => {
                let number = rendered.code_blocks.len() + 1;
                render_code(&content, &language, number, theme, config, &mut rendered.lines);
                rendered.code_blocks.push(CodeBlock {
                    language,
                    code: content,
                });
            }
        }
    }
    rendered
}

/// The inline error shown under the conversation.
pub fn render_error(message: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled("Error: ", theme.error_style.add_modifier(Modifier::BOLD)),
        Span::styled(message.to_string(), theme.error_style),
    ])
}

fn render_user(content: &str, theme: &Theme) -> Vec<Line<'static>> {
    content
        .split('\n')
        .enumerate()
        .map(|(i, line)| {
            let prefix = if i == 0 { "You: " } else { "     " };
            Line::from(vec![
                Span::styled(prefix, theme.user_prefix_style),
                Span::styled(line.to_string(), theme.user_text_style),
            ])
        })
        .collect()
}

fn runs_to_spans(runs: &[InlineRun], base: Style) -> Vec<Span<'static>> {
    runs.iter()
        .map(|run| match run {
            InlineRun::Plain(text) => Span::styled(text.clone(), base),
            InlineRun::Bold(text) => Span::styled(text.clone(), base.add_modifier(Modifier::BOLD)),
        })
        .collect()
}

fn list_item_line(runs: &[InlineRun], theme: &Theme) -> Line<'static> {
    let mut spans = vec![
        Span::raw(LIST_INDENT),
        Span::styled(LIST_MARKER, theme.list_marker_style),
    ];
    spans.extend(runs_to_spans(runs, theme.assistant_text_style));
    Line::from(spans)
}

fn markup_line(line: &MarkupLine, theme: &Theme, config: &RenderConfig) -> Line<'static> {
    match line {
        MarkupLine::Heading { level, runs } => {
            Line::from(runs_to_spans(runs, theme.heading_style(*level)))
        }
        MarkupLine::ListItem { runs } => list_item_line(runs, theme),
        MarkupLine::Rule => Line::from(Span::styled(
            "─".repeat(config.width.unwrap_or(DEFAULT_RULE_WIDTH)),
            theme.rule_style,
        )),
        MarkupLine::Paragraph { runs } => {
            Line::from(runs_to_spans(runs, theme.assistant_text_style))
        }
    }
}

fn render_text(content: &str, theme: &Theme, config: &RenderConfig, out: &mut Vec<Line<'static>>) {
    let lines = transform_text(content);
    if !config.group_lists {
        out.extend(lines.iter().map(|line| markup_line(line, theme, config)));
        return;
    }

    for block in group_list_items(lines) {
        match block {
            MarkupBlock::Line(line) => out.push(markup_line(&line, theme, config)),
            MarkupBlock::List(items) => {
                if out.last().is_some_and(|l| l.width() > 0) {
                    out.push(Line::default());
                }
                out.extend(items.iter().map(|runs| list_item_line(runs, theme)));
                out.push(Line::default());
            }
        }
    }
}

fn render_code(
    code: &str,
    language: &str,
    number: usize,
    theme: &Theme,
    config: &RenderConfig,
    out: &mut Vec<Line<'static>>,
) {
    out.push(Line::from(vec![
        Span::styled(format!(" {} ", language.to_lowercase()), theme.code_header_style),
        Span::styled(format!("  /copy {number}"), theme.info_style),
    ]));

    let highlighted = if config.syntax && !code.is_empty() {
        highlight_code_block(language, code, theme)
    } else {
        None
    };
    match highlighted {
        Some(lines) => out.extend(lines),
        None => out.extend(code.split('\n').map(|line| {
            Line::from(Span::styled(
                line.replace('\t', "    "),
                theme.code_line_style(),
            ))
        })),
    }
}

#[cfg(test)]
mod tests;
