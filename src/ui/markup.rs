//! Line-oriented markup for the text parts of a reply.
//!
//! Each line is classified on its own: no construct spans lines. Inline
//! emphasis is limited to `**bold**`, parsed into runs so rendering never
//! interprets message text as markup.

const BOLD_DELIMITER: &str = "**";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineRun {
    Plain(String),
    Bold(String),
}

impl InlineRun {
    pub fn text(&self) -> &str {
        match self {
            InlineRun::Plain(text) | InlineRun::Bold(text) => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupLine {
    /// Level 1 is the most prominent.
    Heading { level: u8, runs: Vec<InlineRun> },
    ListItem { runs: Vec<InlineRun> },
    Rule,
    Paragraph { runs: Vec<InlineRun> },
}

impl MarkupLine {
    pub fn runs(&self) -> &[InlineRun] {
        match self {
            MarkupLine::Heading { runs, .. }
            | MarkupLine::ListItem { runs }
            | MarkupLine::Paragraph { runs } => runs,
            MarkupLine::Rule => &[],
        }
    }

    /// Visible text with emphasis delimiters removed.
    pub fn plain_text(&self) -> String {
        self.runs().iter().map(InlineRun::text).collect()
    }
}

/// Output of the opt-in list grouping pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupBlock {
    Line(MarkupLine),
    /// Consecutive list items, one entry per item.
    List(Vec<Vec<InlineRun>>),
}

/// Split `text` into plain and bold runs.
///
/// A `**` opens a bold run that ends at the next `**`; the bold text may be
/// empty. An opening with no partner is kept literally, as is everything
/// after it.
pub fn parse_inline(text: &str) -> Vec<InlineRun> {
    let mut runs = Vec::new();
    let mut plain_start = 0;
    let mut cursor = 0;

    while let Some(offset) = text[cursor..].find(BOLD_DELIMITER) {
        let open = cursor + offset;
        let inner_start = open + BOLD_DELIMITER.len();
        let Some(close_offset) = text[inner_start..].find(BOLD_DELIMITER) else {
            break;
        };
        let close = inner_start + close_offset;

        if open > plain_start {
            runs.push(InlineRun::Plain(text[plain_start..open].to_string()));
        }
        runs.push(InlineRun::Bold(text[inner_start..close].to_string()));
        cursor = close + BOLD_DELIMITER.len();
        plain_start = cursor;
    }

    if plain_start < text.len() {
        runs.push(InlineRun::Plain(text[plain_start..].to_string()));
    }
    runs
}

/// Classify one line. First matching prefix wins.
pub fn classify_line(line: &str) -> MarkupLine {
    if let Some(rest) = line.strip_prefix("### ") {
        return MarkupLine::Heading {
            level: 3,
            runs: parse_inline(rest),
        };
    }
    if let Some(rest) = line.strip_prefix("## ") {
        return MarkupLine::Heading {
            level: 2,
            runs: parse_inline(rest),
        };
    }
    if let Some(rest) = line.strip_prefix("# ") {
        return MarkupLine::Heading {
            level: 1,
            runs: parse_inline(rest),
        };
    }
    if let Some(rest) = line
        .strip_prefix("* ")
        .or_else(|| line.strip_prefix("- "))
    {
        return MarkupLine::ListItem {
            runs: parse_inline(rest),
        };
    }
    if line == "---" || line == "===" {
        return MarkupLine::Rule;
    }
    MarkupLine::Paragraph {
        runs: parse_inline(line),
    }
}

/// Transform every `\n`-separated line of a text segment, empty ones included.
pub fn transform_text(content: &str) -> Vec<MarkupLine> {
    content.split('\n').map(classify_line).collect()
}

/// Merge runs of consecutive list items into single list blocks.
pub fn group_list_items(lines: Vec<MarkupLine>) -> Vec<MarkupBlock> {
    let mut blocks: Vec<MarkupBlock> = Vec::new();
    for line in lines {
        match line {
            MarkupLine::ListItem { runs } => match blocks.last_mut() {
                Some(MarkupBlock::List(items)) => items.push(runs),
                _ => blocks.push(MarkupBlock::List(vec![runs])),
            },
            other => blocks.push(MarkupBlock::Line(other)),
        }
    }
    blocks
}
