//! Frontmatter serialization back to markdown.

use std::fmt::Write;

use super::types::{Entry, FieldValue, Frontmatter, ListStyle, ParsedDocument};

/// Serialize a parsed document back to markdown string.
///
/// The frontmatter block is followed by one blank line and the body. A
/// document without frontmatter is just its body.
pub fn serialize(doc: &ParsedDocument) -> String {
    match &doc.frontmatter {
        Some(fm) => format!("---\n{}---\n\n{}", frontmatter_to_yaml(fm), doc.body),
        None => doc.body.clone(),
    }
}

/// Render frontmatter lines (without delimiters), one trailing newline each.
pub fn frontmatter_to_yaml(fm: &Frontmatter) -> String {
    let mut out = String::new();
    for line in &fm.leading {
        push_line(&mut out, line);
    }
    for entry in &fm.entries {
        write_entry(&mut out, entry);
    }
    out
}

fn write_entry(out: &mut String, entry: &Entry) {
    let key = &entry.key;
    match &entry.value {
        FieldValue::Scalar(raw) => write_keyed(out, key, raw),
        FieldValue::List { items, style: ListStyle::Inline } => {
            let _ = writeln!(out, "{key}: [{}]", items.join(", "));
        }
        FieldValue::List { items, style: ListStyle::Block { indent } } => {
            let _ = writeln!(out, "{key}:");
            let pad = " ".repeat(*indent);
            for item in items {
                if item.is_empty() {
                    let _ = writeln!(out, "{pad}-");
                } else {
                    let _ = writeln!(out, "{pad}- {item}");
                }
            }
        }
        FieldValue::Block { header, lines } => {
            write_keyed(out, key, header);
            for line in lines {
                push_line(out, line);
            }
        }
    }
    for line in &entry.trailing {
        push_line(out, line);
    }
}

fn write_keyed(out: &mut String, key: &str, value: &str) {
    if value.is_empty() {
        let _ = writeln!(out, "{key}:");
    } else {
        let _ = writeln!(out, "{key}: {value}");
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}
