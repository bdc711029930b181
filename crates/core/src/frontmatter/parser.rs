//! Frontmatter parsing from markdown documents.

use super::types::{Entry, FieldValue, Frontmatter, ListStyle, ParsedDocument};

/// Parse frontmatter from markdown content.
///
/// Frontmatter is delimited by `---` lines at the very start of the document:
/// ```markdown
/// ---
/// key: value
/// ---
/// # Document content
/// ```
///
/// A block that is opened but never closed is not frontmatter; the whole
/// text is returned as body. One blank line right after the closing
/// delimiter is treated as a separator and is not part of the body.
pub fn parse(content: &str) -> ParsedDocument {
    let mut lines = content.split_inclusive('\n');

    let mut offset = match lines.next() {
        Some(opening) if is_delimiter(opening) => opening.len(),
        _ => return ParsedDocument::without_frontmatter(content),
    };
    let mut block = Vec::new();

    for line in lines {
        offset += line.len();
        if is_delimiter(line) {
            let body = strip_separator(&content[offset..]);
            return ParsedDocument {
                frontmatter: Some(parse_block(&block)),
                body: body.to_string(),
            };
        }
        block.push(trim_newline(line));
    }

    // No closing ---, treat as no frontmatter
    ParsedDocument::without_frontmatter(content)
}

fn is_delimiter(line: &str) -> bool {
    trim_newline(line).trim_end() == "---"
}

fn trim_newline(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

fn strip_separator(rest: &str) -> &str {
    rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n')).unwrap_or(rest)
}

/// Parse the lines between the delimiters into ordered entries.
fn parse_block(lines: &[&str]) -> Frontmatter {
    let mut fm = Frontmatter::default();
    let mut i = 0;

    while i < lines.len() {
        let Some((key, rest)) = split_entry(lines[i]) else {
            let trivia = lines[i].to_string();
            match fm.entries.last_mut() {
                Some(entry) => entry.trailing.push(trivia),
                None => fm.leading.push(trivia),
            }
            i += 1;
            continue;
        };
        i += 1;

        let start = i;
        while i < lines.len() && is_continuation(lines[i]) {
            i += 1;
        }

        // Comments and blank lines at the end belong between entries, not to the value.
        let mut value_end = i;
        while value_end > start && is_trivia(lines[value_end - 1]) {
            value_end -= 1;
        }

        fm.entries.push(Entry {
            key: key.to_string(),
            value: parse_value(rest, &lines[start..value_end]),
            trailing: lines[value_end..i].iter().map(|l| (*l).to_string()).collect(),
        });
    }

    fm
}

/// Split a top-level `key: rest` line. Keys start at column zero.
fn split_entry(line: &str) -> Option<(&str, &str)> {
    let first = line.chars().next()?;
    if first.is_whitespace() || matches!(first, '#' | '-' | '[' | '{') {
        return None;
    }

    let key_end = if first == '"' || first == '\'' {
        let close = line[1..].find(first)? + 1;
        let after = line[close + 1..].trim_start();
        if !after.starts_with(':') {
            return None;
        }
        line.len() - after.len()
    } else {
        line.char_indices().find_map(|(idx, ch)| {
            let next = line[idx + ch.len_utf8()..].chars().next();
            (ch == ':' && next.is_none_or(char::is_whitespace)).then_some(idx)
        })?
    };

    let key = line[..key_end].trim_end();
    if key.is_empty() {
        return None;
    }
    let rest = line[key_end + 1..].trim();
    Some((key, rest))
}

fn is_continuation(line: &str) -> bool {
    line.trim().is_empty()
        || line.starts_with([' ', '\t'])
        || line == "-"
        || line.starts_with("- ")
}

fn is_trivia(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

fn parse_value(rest: &str, continuation: &[&str]) -> FieldValue {
    if continuation.is_empty() {
        if rest.starts_with('[')
            && rest.ends_with(']')
            && let Some(items) = split_flow_list(&rest[1..rest.len() - 1])
        {
            return FieldValue::List { items, style: ListStyle::Inline };
        }
        return FieldValue::Scalar(rest.to_string());
    }

    if rest.is_empty()
        && let Some((items, indent)) = block_list(continuation)
    {
        return FieldValue::List { items, style: ListStyle::Block { indent } };
    }

    FieldValue::Block {
        header: rest.to_string(),
        lines: continuation.iter().map(|l| (*l).to_string()).collect(),
    }
}

/// Read `- item` lines that share one indentation and hold single-line scalars.
fn block_list(lines: &[&str]) -> Option<(Vec<String>, usize)> {
    let indent = lines[0].len() - lines[0].trim_start_matches(' ').len();
    let mut items = Vec::with_capacity(lines.len());

    for line in lines {
        let (pad, item) = line.split_at(line.len() - line.trim_start_matches(' ').len());
        if pad.len() != indent {
            return None;
        }
        let raw = if item == "-" { "" } else { item.strip_prefix("- ")?.trim() };
        if raw.starts_with(['[', '{', '|', '>']) || raw.starts_with("- ") {
            return None;
        }
        // `- key: value` is a mapping item
        if split_entry(raw).is_some() {
            return None;
        }
        items.push(raw.to_string());
    }

    Some((items, indent))
}

/// Split the inside of `[...]` into raw items. Nested collections are not
/// read as a list.
fn split_flow_list(inner: &str) -> Option<Vec<String>> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for ch in inner.chars() {
        match quote {
            Some(q) => {
                current.push(ch);
                if escaped {
                    escaped = false;
                } else if ch == '\\' && q == '"' {
                    escaped = true;
                } else if ch == q {
                    quote = None;
                }
            }
            None => match ch {
                '"' | '\'' => {
                    quote = Some(ch);
                    current.push(ch);
                }
                '[' | ']' | '{' | '}' => return None,
                ',' => {
                    items.push(current.trim().to_string());
                    current.clear();
                }
                _ => current.push(ch),
            },
        }
    }

    if quote.is_some() {
        return None;
    }

    // A trailing comma leaves an empty tail, which YAML allows
    let last = current.trim();
    if !last.is_empty() {
        items.push(last.to_string());
    }

    if items.iter().any(String::is_empty) {
        return None;
    }
    Some(items)
}
