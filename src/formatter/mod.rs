//! Response formatting
//!
//! Converts the lightweight markup emitted by the models into an HTML
//! fragment the frontend renders directly. The input is processed once,
//! line by line, with the open section tracked as explicit state:
//!
//! - `**N. Title**` at the start of a line opens an `ai-section` (closing the
//!   previous one) with an icon keyed by `N`
//! - remaining `**bold**` spans become `ai-bold`
//! - `-`/`•` lines become `ai-bullet` divs
//! - `` `code` `` spans become `ai-code`
//! - `a op b = c` becomes an `ai-formula` span
//! - blank-line runs become `<br><br>`, single newlines `<br>`
//! - heading markers, quote markers, fences and rules are dropped
//!
//! Model text is HTML-escaped before it is wrapped.

use std::sync::LazyLock;

use regex::Regex;

static FORMULA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+\s*[+\-*/×÷]\s*\d+\s*=\s*\d+").expect("formula pattern is valid")
});

/// Icon shown next to a numbered section header
pub fn section_icon(number: &str) -> &'static str {
    match number {
        "1" => "🔍",
        "2" => "✅",
        "3" => "📐",
        "4" => "📝",
        "5" => "💡",
        "6" => "📖",
        "7" => "🚀",
        _ => "📌",
    }
}

/// Format a raw model response as an HTML fragment
///
/// Text without markup comes back unchanged except that `&`, `<` and `>`
/// are escaped, so `Tom & Jerry` becomes `Tom &amp; Jerry`.
pub fn format_response(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + raw.len() / 2);
    let mut section_open = false;
    // Whether the current section (or the preamble) already emitted content
    let mut has_content = false;
    let mut pending_blank = false;

    for raw_line in raw.lines() {
        let line = clean_line(raw_line);

        if is_fence_or_rule(line) {
            continue;
        }

        if line.is_empty() {
            pending_blank = has_content;
            continue;
        }

        if let Some(header) = parse_section_header(line) {
            if section_open {
                out.push_str("</div></div>");
            }
            section_open = true;
            push_section_open(&mut out, header.number, header.title);

            has_content = false;
            pending_blank = false;

            let rest = header.rest.trim();
            if !rest.is_empty() {
                out.push_str(&render_inline(rest));
                has_content = true;
            }
            continue;
        }

        if has_content {
            out.push_str(if pending_blank { "<br><br>" } else { "<br>" });
        }
        pending_blank = false;

        match bullet_item(line) {
            Some(item) => {
                out.push_str(r#"<div class="ai-bullet">"#);
                out.push_str(&render_inline(item));
                out.push_str("</div>");
            }
            None => out.push_str(&render_inline(line)),
        }
        has_content = true;
    }

    if section_open {
        out.push_str("</div></div>");
    }

    out
}

struct SectionHeader<'a> {
    number: &'a str,
    title: &'a str,
    rest: &'a str,
}

fn push_section_open(out: &mut String, number: &str, title: &str) {
    out.push_str(r#"<div class="ai-section"><div class="ai-heading"><span class="ai-icon">"#);
    out.push_str(section_icon(number));
    out.push_str(r#"</span><span class="ai-number">"#);
    out.push_str(number);
    out.push_str(r#"</span><span class="ai-title">"#);
    out.push_str(&html_escape::encode_text(title));
    out.push_str(r#"</span></div><div class="ai-body">"#);
}

/// Drop quote/heading markers and indentation at the start, heading runs at the end
fn clean_line(line: &str) -> &str {
    let line = line.trim_start_matches(|c: char| c == '#' || c == '>' || c.is_whitespace());
    let line = line.trim_end();
    let without_hashes = line.trim_end_matches('#');
    if without_hashes.len() != line.len() {
        without_hashes.trim_end()
    } else {
        line
    }
}

fn is_fence_or_rule(line: &str) -> bool {
    line.starts_with("```") || (line.len() >= 3 && line.chars().all(|c| c == '-'))
}

/// `**12. Title**rest` → number, title, rest
fn parse_section_header(line: &str) -> Option<SectionHeader<'_>> {
    let body = line.strip_prefix("**")?;
    let digits_end = body
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)?;
    if digits_end == 0 {
        return None;
    }
    let number = &body[..digits_end];
    let after_number = body[digits_end..].strip_prefix('.')?;
    let close = after_number.find('*')?;
    if !after_number[close..].starts_with("**") {
        return None;
    }
    let title = after_number[..close].trim();
    if title.is_empty() {
        return None;
    }
    Some(SectionHeader {
        number,
        title,
        rest: &after_number[close + 2..],
    })
}

fn bullet_item(line: &str) -> Option<&str> {
    let rest = line
        .strip_prefix('-')
        .or_else(|| line.strip_prefix('•'))?;
    if rest.starts_with(char::is_whitespace) {
        let item = rest.trim_start();
        (!item.is_empty()).then_some(item)
    } else {
        None
    }
}

/// Render bold, code and formulas within one line
fn render_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut plain = String::new();
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        if let Some(after) = rest.strip_prefix("**") {
            if let Some(end) = after.find("**") {
                let inner = &after[..end];
                if !inner.is_empty() && !inner.contains('*') {
                    flush_plain(&mut out, &mut plain);
                    out.push_str(r#"<strong class="ai-bold">"#);
                    out.push_str(&render_plain(inner));
                    out.push_str("</strong>");
                    rest = &after[end + 2..];
                    continue;
                }
            }
            plain.push_str("**");
            rest = after;
            continue;
        }

        if c == '`' {
            let ticks = rest.chars().take_while(|&t| t == '`').count();
            if ticks > 1 {
                // inline fence markers carry no content
                rest = &rest[ticks..];
                continue;
            }
            let after = &rest[1..];
            match after.find('`') {
                Some(end) if end > 0 => {
                    flush_plain(&mut out, &mut plain);
                    out.push_str(r#"<code class="ai-code">"#);
                    out.push_str(&html_escape::encode_text(&after[..end]));
                    out.push_str("</code>");
                    rest = &after[end + 1..];
                }
                _ => rest = after,
            }
            continue;
        }

        if let Some(after) = rest.strip_prefix("##") {
            rest = after;
            continue;
        }

        if let Some(after) = rest.strip_prefix("---") {
            rest = after;
            continue;
        }

        plain.push(c);
        rest = &rest[c.len_utf8()..];
    }

    flush_plain(&mut out, &mut plain);
    out
}

fn flush_plain(out: &mut String, plain: &mut String) {
    if !plain.is_empty() {
        out.push_str(&render_plain(plain));
        plain.clear();
    }
}

/// Escape text, wrapping arithmetic equalities
fn render_plain(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in FORMULA.find_iter(text) {
        out.push_str(&html_escape::encode_text(&text[last..m.start()]));
        out.push_str(r#"<span class="ai-formula">"#);
        out.push_str(&html_escape::encode_text(m.as_str()));
        out.push_str("</span>");
        last = m.end();
    }
    out.push_str(&html_escape::encode_text(&text[last..]));
    out
}
