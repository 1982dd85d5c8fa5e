use crate::ui::theme::Theme;
use ratatui::style::{Color as TuiColor, Style};
use ratatui::text::{Line, Span};
use std::sync::OnceLock;
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();

fn is_dark_background(c: &TuiColor) -> bool {
    match c {
        TuiColor::Rgb(r, g, b) => {
            let br = 0.2126 * (*r as f32) + 0.7152 * (*g as f32) + 0.0722 * (*b as f32);
            br < 128.0
        }
        TuiColor::White => false,
        _ => true,
    }
}

fn normalize_lang_hint(s: &str) -> String {
    let t = s.trim().to_ascii_lowercase();
    match t.as_str() {
        "py" | "python" => "python".into(),
        "bash" | "sh" | "zsh" | "shell" => "bash".into(),
        "js" | "javascript" | "jsx" => "javascript".into(),
        "ts" | "tsx" | "typescript" => "typescript".into(),
        "yaml" | "yml" => "yaml".into(),
        "rust" | "rs" => "rust".into(),
        "c" | "h" => "c".into(),
        "cpp" | "cc" | "cxx" | "hpp" | "hxx" => "cpp".into(),
        "kotlin" | "kt" => "kotlin".into(),
        other => other.into(),
    }
}

pub(crate) fn pick_syntect_theme_name(theme: &Theme) -> &'static str {
    if is_dark_background(&theme.background_color) {
        "base16-ocean.dark"
    } else {
        "InspiredGitHub"
    }
}

/// Highlight `code` as `lang_hint`, one ratatui line per source line.
///
/// Returns `None` when the language is unknown to syntect or highlighting
/// fails, so callers can fall back to plain code styling.
pub fn highlight_code_block(
    lang_hint: &str,
    code: &str,
    theme: &Theme,
) -> Option<Vec<Line<'static>>> {
    let ps = SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines);
    let ts = THEME_SET.get_or_init(ThemeSet::load_defaults);

    let syntax = ps.find_syntax_by_token(&normalize_lang_hint(lang_hint))?;
    let syn_theme = ts
        .themes
        .get(pick_syntect_theme_name(theme))
        .or_else(|| ts.themes.get("base16-ocean.dark"))?;

    let mut h = HighlightLines::new(syntax, syn_theme);
    let mut out: Vec<Line<'static>> = Vec::new();
    for line in LinesWithEndings::from(code) {
        let ranges = h.highlight_line(line, ps).ok()?;
        let spans: Vec<Span<'static>> = ranges
            .into_iter()
            .map(|(style, text)| {
                let fg = style.foreground;
                let mut st = Style::default().fg(TuiColor::Rgb(fg.r, fg.g, fg.b));
                if let Some(bg) = theme.codeblock_bg {
                    st = st.bg(bg);
                }
                Span::styled(text.trim_end_matches('\n').to_string(), st)
            })
            .collect();
        out.push(Line::from(spans));
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lang_hint_maps_common_aliases() {
        assert_eq!(normalize_lang_hint("py"), "python");
        assert_eq!(normalize_lang_hint("JS"), "javascript");
        assert_eq!(normalize_lang_hint("TsX"), "typescript");
        assert_eq!(normalize_lang_hint("yml"), "yaml");
        assert_eq!(normalize_lang_hint("hpp"), "cpp");
        assert_eq!(normalize_lang_hint("rs"), "rust");
    }

    #[test]
    fn dark_background_heuristic_basic() {
        assert!(is_dark_background(&TuiColor::Black));
        assert!(!is_dark_background(&TuiColor::White));
        assert!(is_dark_background(&TuiColor::Rgb(10, 10, 10)));
        assert!(!is_dark_background(&TuiColor::Rgb(240, 240, 240)));
    }

    #[test]
    fn theme_selection_matches_brightness() {
        assert_eq!(
            pick_syntect_theme_name(&Theme::dark_default()),
            "base16-ocean.dark"
        );
        assert_eq!(pick_syntect_theme_name(&Theme::light()), "InspiredGitHub");
    }

    #[test]
    fn highlights_known_language_line_by_line() {
        let lines = highlight_code_block("rust", "fn main() {}\nlet x = 1;", &Theme::dark_default())
            .expect("rust is a default syntax");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].to_string(), "fn main() {}");
        assert_eq!(lines[1].to_string(), "let x = 1;");
        assert!(lines[0].spans.iter().all(|s| s.style.fg.is_some()));
    }

    #[test]
    fn unknown_language_is_none() {
        assert!(highlight_code_block("klingon", "qapla'", &Theme::dark_default()).is_none());
    }
}
