use super::*;

fn line_texts(lines: &[Line<'static>]) -> Vec<String> {
    lines.iter().map(|line| line.to_string()).collect()
}

fn plain_config() -> RenderConfig {
    RenderConfig {
        syntax: false,
        width: Some(10),
        ..Default::default()
    }
}

#[test]
fn user_messages_render_verbatim() {
    let rendered = render_message(
        &Message::user("# not a heading\n**raw**"),
        &Theme::dark_default(),
        &plain_config(),
    );
    assert_eq!(
        line_texts(&rendered.lines),
        vec!["You: # not a heading", "     **raw**"]
    );
    assert!(rendered.code_blocks.is_empty());
}

#[test]
fn assistant_text_and_code_render_in_order() {
    let reply = Message::assistant("# Sorting\nUse **sort**:\n```js\narr.sort();\n```\n- done");
    let rendered = render_message(&reply, &Theme::dark_default(), &plain_config());

    assert_eq!(
        line_texts(&rendered.lines),
        vec![
            "Sorting",
            "Use sort:",
            "",
            " js   /copy 1",
            "arr.sort();",
            "",
            "  • done",
        ]
    );
    assert_eq!(
        rendered.code_blocks,
        vec![CodeBlock {
            language: "js".into(),
            code: "arr.sort();".into(),
        }]
    );
}

#[test]
fn bold_runs_carry_the_bold_modifier() {
    let theme = Theme::dark_default();
    let rendered = render_message(&Message::assistant("a **b** c"), &theme, &plain_config());
    let spans = &rendered.lines[0].spans;
    assert_eq!(spans.len(), 3);
    assert!(!spans[0].style.add_modifier.contains(Modifier::BOLD));
    assert!(spans[1].style.add_modifier.contains(Modifier::BOLD));
    assert_eq!(spans[1].content, "b");
}

#[test]
fn headings_use_level_styles() {
    let theme = Theme::dark_default();
    let rendered = render_message(
        &Message::assistant("# one\n## two\n### three"),
        &theme,
        &plain_config(),
    );
    for (index, line) in rendered.lines.iter().enumerate() {
        let level = index as u8 + 1;
        assert_eq!(line.spans[0].style, theme.heading_style(level));
    }
}

#[test]
fn rule_spans_configured_width() {
    let rendered = render_message(
        &Message::assistant("---"),
        &Theme::dark_default(),
        &plain_config(),
    );
    assert_eq!(line_texts(&rendered.lines), vec!["─".repeat(10)]);
}

#[test]
fn default_language_header_is_javascript() {
    let rendered = render_message(
        &Message::assistant("```\nconsole.log(1)\n```"),
        &Theme::dark_default(),
        &plain_config(),
    );
    assert_eq!(rendered.lines[0].to_string(), " javascript   /copy 1");
    assert_eq!(rendered.code_blocks[0].language, "javascript");
}

#[test]
fn language_header_is_lowercased_but_block_keeps_tag() {
    let rendered = render_message(
        &Message::assistant("```Python\nx = 1\n```"),
        &Theme::dark_default(),
        &plain_config(),
    );
    assert_eq!(rendered.lines[0].to_string(), " python   /copy 1");
    assert_eq!(rendered.code_blocks[0].language, "Python");
}

#[test]
fn code_blocks_are_numbered_per_message() {
    let rendered = render_message(
        &Message::assistant("```sh\nls\n```\nand\n```sh\npwd\n```"),
        &Theme::dark_default(),
        &plain_config(),
    );
    let headers: Vec<String> = line_texts(&rendered.lines)
        .into_iter()
        .filter(|l| l.contains("/copy"))
        .collect();
    assert_eq!(headers, vec![" sh   /copy 1", " sh   /copy 2"]);
    assert_eq!(rendered.code_blocks[1].code, "pwd");
}

#[test]
fn syntax_highlighting_keeps_code_text() {
    let config = RenderConfig {
        syntax: true,
        ..plain_config()
    };
    let rendered = render_message(
        &Message::assistant("```rust\nfn main() {}\n```"),
        &Theme::dark_default(),
        &config,
    );
    assert_eq!(rendered.lines[1].to_string(), "fn main() {}");
    assert!(rendered.lines[1].spans.len() > 1);
}

#[test]
fn markdown_off_shows_reply_verbatim() {
    let config = RenderConfig {
        markdown: false,
        ..plain_config()
    };
    let rendered = render_message(
        &Message::assistant("# hi\n```js\nx\n```"),
        &Theme::dark_default(),
        &config,
    );
    assert_eq!(
        line_texts(&rendered.lines),
        vec!["# hi", "```js", "x", "```"]
    );
    assert!(rendered.code_blocks.is_empty());
}

#[test]
fn list_items_stay_independent_by_default() {
    let rendered = render_message(
        &Message::assistant("intro\n- a\n- b\nafter"),
        &Theme::dark_default(),
        &plain_config(),
    );
    assert_eq!(
        line_texts(&rendered.lines),
        vec!["intro", "  • a", "  • b", "after"]
    );
}

#[test]
fn grouped_lists_get_block_spacing() {
    let config = RenderConfig {
        group_lists: true,
        ..plain_config()
    };
    let rendered = render_message(
        &Message::assistant("intro\n- a\n- b\nafter"),
        &Theme::dark_default(),
        &config,
    );
    assert_eq!(
        line_texts(&rendered.lines),
        vec!["intro", "", "  • a", "  • b", "", "after"]
    );
}

#[test]
fn markup_in_reply_is_never_interpreted() {
    let rendered = render_message(
        &Message::assistant("<img src=x onerror=alert(1)> **<b>hi</b>**"),
        &Theme::dark_default(),
        &plain_config(),
    );
    assert_eq!(
        rendered.lines[0].to_string(),
        "<img src=x onerror=alert(1)> <b>hi</b>"
    );
}

#[test]
fn error_line_has_prefix() {
    let line = render_error("Invalid API key", &Theme::dark_default());
    assert_eq!(line.to_string(), "Error: Invalid API key");
}

fn written_plain(lines: &[Line<'static>]) -> String {
    let mut buf = Vec::new();
    crate::ui::ansi::write_lines(&mut buf, lines, false).unwrap();
    String::from_utf8(buf).unwrap()
}

fn assert_no_controls(out: &str) {
    assert!(
        !out.chars().any(|c| c.is_control() && c != '\n' && c != '\t'),
        "control characters reached output: {out:?}"
    );
}

#[test]
fn escape_sequences_in_reply_never_reach_the_terminal() {
    let theme = Theme::dark_default();
    let reply = Message::assistant(
        "hi \x1b]0;pwned\x07\x1b[2J **x\x1b[31m**\n```sh\nls\x1b[2J\tdir\n```",
    );

    let plain = render_message(&reply, &theme, &plain_config());
    let out = written_plain(&plain.lines);
    assert_no_controls(&out);
    assert!(out.starts_with("hi ]0;pwned[2J x[31m\n"), "{out:?}");
    assert!(out.contains("ls[2J    dir"), "{out:?}");

    let highlighted = RenderConfig {
        syntax: true,
        ..plain_config()
    };
    assert_no_controls(&written_plain(
        &render_message(&reply, &theme, &highlighted).lines,
    ));

    let verbatim = RenderConfig {
        markdown: false,
        ..plain_config()
    };
    assert_no_controls(&written_plain(
        &render_message(&reply, &theme, &verbatim).lines,
    ));
}

#[test]
fn escape_sequences_in_user_text_and_errors_are_stripped() {
    let theme = Theme::dark_default();
    let user = render_message(&Message::user("a\x1b[2Jb"), &theme, &plain_config());
    assert_eq!(written_plain(&user.lines), "You: a[2Jb\n");

    let error = render_error("bad\x1b]0;t\x07key", &theme);
    assert_eq!(written_plain(&[error]), "Error: bad]0;tkey\n");
}
