//! List, grid and preview layouts for saved resources.

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::resources::Resource;
use crate::ui::theme::Theme;

const CARD_WIDTH: usize = 34;
const CARD_GAP: usize = 3;
const MAX_GRID_COLUMNS: usize = 3;
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

/// Cut `text` to at most `width` columns, marking the cut with `…`.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

fn pad_to_width(text: String, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

fn tag_text(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| format!("#{tag}"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn empty_state_lines(filter_active: bool, theme: &Theme) -> Vec<Line<'static>> {
    let hint = if filter_active {
        "Try adjusting your search or filters"
    } else {
        "Start by adding your first resource"
    };
    vec![
        Line::from(Span::styled("No resources found", theme.resource_title_style)),
        Line::from(Span::styled(hint, theme.meta_style)),
    ]
}

pub fn list_lines(resources: &[&Resource], theme: &Theme) -> Vec<Line<'static>> {
    resources
        .iter()
        .map(|resource| {
            let mut spans = vec![
                Span::styled(format!("[{}] ", resource.id), theme.meta_style),
                Span::styled(resource.title.clone(), theme.resource_title_style),
                Span::styled(format!("  {}", resource.category), theme.meta_style),
            ];
            if !resource.tags.is_empty() {
                spans.push(Span::styled(
                    format!("  {}", tag_text(&resource.tags)),
                    theme.tag_style,
                ));
            }
            spans.push(Span::styled(
                format!("  {}", resource.date_added.format(DATE_FORMAT)),
                theme.meta_style,
            ));
            Line::from(spans)
        })
        .collect()
}

fn card_rows(resource: &Resource, theme: &Theme) -> Vec<(String, Style)> {
    let inner = CARD_WIDTH;
    let description = resource.description.split('\n').next().unwrap_or("");
    vec![
        (
            truncate_to_width(&format!("{}  [{}]", resource.category, resource.id), inner),
            theme.meta_style,
        ),
        (truncate_to_width(&resource.title, inner), theme.resource_title_style),
        (truncate_to_width(description, inner), theme.assistant_text_style),
        (truncate_to_width(&tag_text(&resource.tags), inner), theme.tag_style),
        (
            resource.date_added.format(DATE_FORMAT).to_string(),
            theme.meta_style,
        ),
    ]
}

/// Cards laid out side by side, as many columns as `width` allows.
pub fn grid_lines(resources: &[&Resource], theme: &Theme, width: usize) -> Vec<Line<'static>> {
    let columns = ((width + CARD_GAP) / (CARD_WIDTH + CARD_GAP)).clamp(1, MAX_GRID_COLUMNS);
    let mut lines = Vec::new();

    for (row_index, chunk) in resources.chunks(columns).enumerate() {
        if row_index > 0 {
            lines.push(Line::default());
        }
        let cards: Vec<Vec<(String, Style)>> =
            chunk.iter().map(|r| card_rows(r, theme)).collect();
        let height = cards.iter().map(Vec::len).max().unwrap_or(0);
        for row in 0..height {
            let mut spans = Vec::new();
            for (col, card) in cards.iter().enumerate() {
                if col > 0 {
                    spans.push(Span::raw(" ".repeat(CARD_GAP)));
                }
                let (text, style) = card
                    .get(row)
                    .cloned()
                    .unwrap_or_else(|| (String::new(), Style::default()));
                let last = col + 1 == cards.len();
                let text = if last { text } else { pad_to_width(text, CARD_WIDTH) };
                spans.push(Span::styled(text, style));
            }
            lines.push(Line::from(spans));
        }
    }
    lines
}

/// Detail view: title, description as a code block, tags, category, date.
pub fn preview_lines(resource: &Resource, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(resource.title.clone(), theme.heading_style(1))),
        Line::default(),
    ];
    lines.extend(resource.description.split('\n').map(|line| {
        Line::from(Span::styled(
            format!(" {} ", line.replace('\t', "    ")),
            theme.code_line_style(),
        ))
    }));
    lines.push(Line::default());
    if !resource.tags.is_empty() {
        lines.push(Line::from(Span::styled(
            tag_text(&resource.tags),
            theme.tag_style,
        )));
        lines.push(Line::default());
    }
    let field = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label}: "), theme.resource_title_style),
            Span::styled(value, theme.assistant_text_style),
        ])
    };
    lines.push(field("Category", resource.category.clone()));
    lines.push(field(
        "Date Added",
        resource.date_added.format(DATE_FORMAT).to_string(),
    ));
    lines.push(field("URL", resource.url.clone()));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn resource(id: &str, title: &str) -> Resource {
        Resource {
            id: id.into(),
            title: title.into(),
            url: "https://docs.rs".into(),
            description: "Docs for crates\nsecond line".into(),
            tags: vec!["rust".into(), "docs".into()],
            category: "Documentation".into(),
            date_added: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            email: None,
        }
    }

    fn texts(lines: &[Line<'static>]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
        assert_eq!(truncate_to_width("日本語テキスト", 5), "日本…");
    }

    #[test]
    fn list_line_shows_id_title_tags_and_date() {
        let r = resource("7", "docs.rs");
        let lines = list_lines(&[&r], &Theme::monochrome());
        assert_eq!(
            texts(&lines),
            vec!["[7] docs.rs  Documentation  #rust #docs  2024-01-02"]
        );
    }

    #[test]
    fn grid_uses_columns_that_fit() {
        let a = resource("1", "first");
        let b = resource("2", "second");
        let c = resource("3", "third");
        let theme = Theme::monochrome();

        let narrow = grid_lines(&[&a, &b, &c], &theme, 40);
        // One column: three cards of five rows plus two separators.
        assert_eq!(narrow.len(), 17);

        let wide = grid_lines(&[&a, &b, &c], &theme, 120);
        assert_eq!(wide.len(), 5);
        let title_row = wide[1].to_string();
        assert!(title_row.starts_with("first"));
        assert!(title_row.contains("second"));
        assert!(title_row.contains("third"));
    }

    #[test]
    fn preview_shows_description_block_and_fields() {
        let r = resource("1", "docs.rs");
        let lines = texts(&preview_lines(&r, &Theme::monochrome()));
        assert_eq!(lines[0], "docs.rs");
        assert_eq!(lines[2], " Docs for crates ");
        assert_eq!(lines[3], " second line ");
        assert!(lines.contains(&"#rust #docs".to_string()));
        assert!(lines.contains(&"Category: Documentation".to_string()));
        assert!(lines.contains(&"Date Added: 2024-01-02".to_string()));
    }

    #[test]
    fn empty_state_hint_depends_on_filter() {
        let theme = Theme::monochrome();
        assert_eq!(
            empty_state_lines(true, &theme)[1].to_string(),
            "Try adjusting your search or filters"
        );
        assert_eq!(
            empty_state_lines(false, &theme)[1].to_string(),
            "Start by adding your first resource"
        );
    }
}
