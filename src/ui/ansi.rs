//! Writes styled ratatui lines to a plain terminal stream.

use std::borrow::Cow;
use std::io::{self, Write};

use ratatui::crossterm::queue;
use ratatui::crossterm::style::{
    Attribute, Color as CColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;

fn to_crossterm(color: Color) -> CColor {
    match color {
        Color::Reset => CColor::Reset,
        Color::Black => CColor::Black,
        Color::Red => CColor::DarkRed,
        Color::Green => CColor::DarkGreen,
        Color::Yellow => CColor::DarkYellow,
        Color::Blue => CColor::DarkBlue,
        Color::Magenta => CColor::DarkMagenta,
        Color::Cyan => CColor::DarkCyan,
        Color::Gray => CColor::Grey,
        Color::DarkGray => CColor::DarkGrey,
        Color::LightRed => CColor::Red,
        Color::LightGreen => CColor::Green,
        Color::LightYellow => CColor::Yellow,
        Color::LightBlue => CColor::Blue,
        Color::LightMagenta => CColor::Magenta,
        Color::LightCyan => CColor::Cyan,
        Color::White => CColor::White,
        Color::Rgb(r, g, b) => CColor::Rgb { r, g, b },
        Color::Indexed(i) => CColor::AnsiValue(i),
    }
}

const MODIFIER_ATTRIBUTES: [(Modifier, Attribute); 5] = [
    (Modifier::BOLD, Attribute::Bold),
    (Modifier::DIM, Attribute::Dim),
    (Modifier::ITALIC, Attribute::Italic),
    (Modifier::UNDERLINED, Attribute::Underlined),
    (Modifier::REVERSED, Attribute::Reverse),
];

fn write_styled<W: Write>(out: &mut W, text: &str, style: Style) -> io::Result<()> {
    let mut styled = false;
    if let Some(fg) = style.fg {
        queue!(out, SetForegroundColor(to_crossterm(fg)))?;
        styled = true;
    }
    if let Some(bg) = style.bg {
        queue!(out, SetBackgroundColor(to_crossterm(bg)))?;
        styled = true;
    }
    for (modifier, attribute) in MODIFIER_ATTRIBUTES {
        if style.add_modifier.contains(modifier) {
            queue!(out, SetAttribute(attribute))?;
            styled = true;
        }
    }
    queue!(out, Print(text))?;
    if styled {
        queue!(out, SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}

/// Drop every control character except tab, so reply text cannot carry
/// escape sequences to the terminal.
pub fn strip_controls(text: &str) -> Cow<'_, str> {
    if text.chars().any(|c| c.is_control() && c != '\t') {
        Cow::Owned(text.chars().filter(|&c| !c.is_control() || c == '\t').collect())
    } else {
        Cow::Borrowed(text)
    }
}

/// Write `lines` followed by newlines. With `color` off only the text is
/// written. Span text is passed through [`strip_controls`].
pub fn write_lines<W: Write>(out: &mut W, lines: &[Line<'_>], color: bool) -> io::Result<()> {
    for line in lines {
        for span in &line.spans {
            let text = strip_controls(&span.content);
            if color {
                write_styled(out, &text, line.style.patch(span.style))?;
            } else {
                out.write_all(text.as_bytes())?;
            }
        }
        out.write_all(b"\n")?;
    }
    out.flush()
}
