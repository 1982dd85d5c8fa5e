use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    // Used to pick a matching syntect theme
    pub background_color: Color,
    // Chat message styles
    pub user_prefix_style: Style,
    pub user_text_style: Style,
    pub assistant_text_style: Style,
    pub error_style: Style,
    pub info_style: Style,

    // Reply markup, heading styles indexed by level - 1
    pub heading_styles: [Style; 3],
    pub list_marker_style: Style,
    pub rule_style: Style,

    // Code blocks
    pub code_header_style: Style,
    pub code_text_style: Style,
    pub codeblock_bg: Option<Color>,

    // Resource views
    pub resource_title_style: Style,
    pub tag_style: Style,
    pub meta_style: Style,
}

impl Theme {
    pub const NAMES: [&'static str; 3] = ["dark", "light", "monochrome"];

    pub fn dark_default() -> Self {
        Theme {
            background_color: Color::Black,
            user_prefix_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Cyan),
            assistant_text_style: Style::default().fg(Color::White),
            error_style: Style::default().fg(Color::LightRed),
            info_style: Style::default().fg(Color::DarkGray),

            heading_styles: [
                Style::default()
                    .fg(Color::LightMagenta)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                Style::default()
                    .fg(Color::LightMagenta)
                    .add_modifier(Modifier::BOLD),
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            ],
            list_marker_style: Style::default().fg(Color::LightBlue),
            rule_style: Style::default().fg(Color::DarkGray),

            code_header_style: Style::default()
                .fg(Color::Gray)
                .bg(Color::Rgb(45, 47, 59)),
            code_text_style: Style::default().fg(Color::Gray),
            codeblock_bg: Some(Color::Rgb(30, 30, 30)),

            resource_title_style: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            tag_style: Style::default().fg(Color::LightBlue),
            meta_style: Style::default().fg(Color::DarkGray),
        }
    }

    pub fn light() -> Self {
        Theme {
            background_color: Color::White,
            user_prefix_style: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Blue),
            assistant_text_style: Style::default().fg(Color::Black),
            error_style: Style::default().fg(Color::Red),
            info_style: Style::default().fg(Color::Gray),

            heading_styles: [
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
                Style::default().fg(Color::Black).add_modifier(Modifier::BOLD),
            ],
            list_marker_style: Style::default().fg(Color::Blue),
            rule_style: Style::default().fg(Color::Gray),

            code_header_style: Style::default()
                .fg(Color::DarkGray)
                .bg(Color::Rgb(220, 222, 230)),
            code_text_style: Style::default().fg(Color::Black),
            codeblock_bg: Some(Color::Rgb(240, 240, 240)),

            resource_title_style: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            tag_style: Style::default().fg(Color::Blue),
            meta_style: Style::default().fg(Color::DarkGray),
        }
    }

    /// Modifiers only, for pipes and terminals without colour.
    pub fn monochrome() -> Self {
        let plain = Style::default();
        let bold = Style::default().add_modifier(Modifier::BOLD);
        Theme {
            background_color: Color::Reset,
            user_prefix_style: bold,
            user_text_style: plain,
            assistant_text_style: plain,
            error_style: bold,
            info_style: plain,

            heading_styles: [
                bold.add_modifier(Modifier::UNDERLINED),
                bold,
                bold,
            ],
            list_marker_style: plain,
            rule_style: plain,

            code_header_style: Style::default().add_modifier(Modifier::REVERSED),
            code_text_style: plain,
            codeblock_bg: None,

            resource_title_style: bold,
            tag_style: plain,
            meta_style: plain,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "dark" | "default" => Self::dark_default(),
            "light" => Self::light(),
            "monochrome" | "mono" => Self::monochrome(),
            // Fallback
            _ => Self::dark_default(),
        }
    }

    /// Style for a heading of `level` (clamped to 1..=3).
    pub fn heading_style(&self, level: u8) -> Style {
        let index = usize::from(level.clamp(1, 3)) - 1;
        self.heading_styles[index]
    }

    pub fn code_line_style(&self) -> Style {
        match self.codeblock_bg {
            Some(bg) => self.code_text_style.bg(bg),
            None => self.code_text_style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_falls_back_to_dark() {
        assert_eq!(
            Theme::from_name("nope").background_color,
            Theme::dark_default().background_color
        );
        assert_eq!(Theme::from_name("LIGHT").background_color, Color::White);
    }

    #[test]
    fn heading_weight_decreases_with_level() {
        let theme = Theme::dark_default();
        let h1 = theme.heading_style(1);
        let h3 = theme.heading_style(3);
        assert!(h1.add_modifier.contains(Modifier::UNDERLINED));
        assert!(!h3.add_modifier.contains(Modifier::UNDERLINED));
        assert_eq!(theme.heading_style(9), h3);
    }

    #[test]
    fn monochrome_has_no_colours() {
        let theme = Theme::monochrome();
        assert_eq!(theme.code_line_style().bg, None);
        assert_eq!(theme.assistant_text_style.fg, None);
    }
}
