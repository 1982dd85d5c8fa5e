//! Splits an assistant reply into text and fenced-code segments.
//!
//! A fence opens with three backticks, an optional identifier made of word
//! characters, and a newline. The body runs up to the first following
//! triple backtick. Openings without a closing fence are left as text.

use serde::Serialize;

use crate::core::constants::DEFAULT_CODE_LANGUAGE;

const FENCE: &str = "```";

/// One contiguous, typed unit of a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Segment {
    Text { content: String },
    Code { content: String, language: String },
}

impl Segment {
    pub fn text(content: impl Into<String>) -> Self {
        Segment::Text {
            content: content.into(),
        }
    }

    pub fn code(content: impl Into<String>, language: impl Into<String>) -> Self {
        Segment::Code {
            content: content.into(),
            language: language.into(),
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Segment::Text { content } | Segment::Code { content, .. } => content,
        }
    }

    pub fn language(&self) -> Option<&str> {
        match self {
            Segment::Code { language, .. } => Some(language),
            Segment::Text { .. } => None,
        }
    }

    pub fn is_code(&self) -> bool {
        matches!(self, Segment::Code { .. })
    }
}

/// A matched fence, as byte offsets into the scanned text.
#[derive(Debug, PartialEq, Eq)]
struct Fence {
    language: Option<(usize, usize)>,
    body: (usize, usize),
    end: usize,
}

#[derive(Debug, PartialEq, Eq)]
enum FenceMiss {
    /// The backticks are not followed by `identifier?\n`.
    NotOpening,
    /// A valid opening with no closing fence anywhere after it.
    Unterminated,
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn match_fence(text: &str, open: usize) -> Result<Fence, FenceMiss> {
    let bytes = text.as_bytes();
    let ident_start = open + FENCE.len();
    let mut ident_end = ident_start;
    while ident_end < bytes.len() && is_word_byte(bytes[ident_end]) {
        ident_end += 1;
    }
    if bytes.get(ident_end) != Some(&b'\n') {
        return Err(FenceMiss::NotOpening);
    }

    let body_start = ident_end + 1;
    let close = text[body_start..]
        .find(FENCE)
        .map(|offset| body_start + offset)
        .ok_or(FenceMiss::Unterminated)?;

    Ok(Fence {
        language: (ident_end > ident_start).then_some((ident_start, ident_end)),
        body: (body_start, close),
        end: close + FENCE.len(),
    })
}

/// Segment `text` into an ordered list of text and code segments.
///
/// Segments never overlap and appear in input order. Text outside fences is
/// kept verbatim; a code body loses exactly one trailing newline.
pub fn segment_response(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut emitted = 0;
    let mut cursor = 0;

    while let Some(offset) = text[cursor..].find(FENCE) {
        let open = cursor + offset;
        match match_fence(text, open) {
            Ok(fence) => {
                if open > emitted {
                    segments.push(Segment::text(&text[emitted..open]));
                }
                let (body_start, body_end) = fence.body;
                let body = &text[body_start..body_end];
                let body = body.strip_suffix('\n').unwrap_or(body);
                let language = fence
                    .language
                    .map(|(start, end)| &text[start..end])
                    .unwrap_or(DEFAULT_CODE_LANGUAGE);
                segments.push(Segment::code(body, language));
                emitted = fence.end;
                cursor = fence.end;
            }
            Err(FenceMiss::NotOpening) => cursor = open + 1,
            // Any later opening starts past this one's newline, so its
            // closing search would cover a subset of the same tail.
            Err(FenceMiss::Unterminated) => break,
        }
    }

    if emitted < text.len() {
        segments.push(Segment::text(&text[emitted..]));
    }
    segments
}

/// Rebuild reply text from segments, restoring fences and the stripped
/// trailing newline of each code body.
pub fn reassemble(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Text { content } => out.push_str(content),
            Segment::Code { content, language } => {
                out.push_str(FENCE);
                out.push_str(language);
                out.push('\n');
                out.push_str(content);
                out.push('\n');
                out.push_str(FENCE);
            }
        }
    }
    out
}
