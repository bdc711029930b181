//! YAML scalar quoting for values written into frontmatter.

use std::borrow::Cow;

/// Words YAML 1.1 readers turn into booleans or null.
const RESERVED_WORDS: &[&str] =
    &["true", "false", "yes", "no", "on", "off", "y", "n", "null", "~"];

/// Decode raw scalar text into the string it represents.
///
/// Quoted scalars are unescaped; plain scalars lose any trailing ` # comment`.
pub fn decode(raw: &str) -> Cow<'_, str> {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') || trimmed.starts_with('\'') {
        return match serde_yaml::from_str::<String>(trimmed) {
            Ok(text) => Cow::Owned(text),
            Err(_) => Cow::Borrowed(trimmed),
        };
    }
    match trimmed.find(" #") {
        Some(pos) => Cow::Borrowed(trimmed[..pos].trim_end()),
        None => Cow::Borrowed(trimmed),
    }
}

/// Whether raw scalar text means null.
pub fn is_null(raw: &str) -> bool {
    matches!(raw.trim(), "" | "~" | "null" | "Null" | "NULL")
}

/// Encode text as a block-context scalar, quoting only when plain style
/// would be read back differently.
pub fn encode(text: &str) -> String {
    if needs_quotes(text) { quote(text) } else { text.to_string() }
}

/// Encode text as an item inside an inline `[a, b]` list.
pub fn encode_flow_item(text: &str) -> String {
    if needs_quotes(text) || text.contains([',', '[', ']', '{', '}']) {
        quote(text)
    } else {
        text.to_string()
    }
}

fn needs_quotes(text: &str) -> bool {
    if text.is_empty() || text != text.trim() {
        return true;
    }
    if text.chars().any(char::is_control) {
        return true;
    }

    let mut chars = text.chars();
    let first = chars.next().unwrap_or(' ');
    let second = chars.next();
    match first {
        '#' | '&' | '*' | '!' | '|' | '>' | '\'' | '"' | '%' | '@' | '`' | '[' | ']'
        | '{' | '}' | ',' => return true,
        '-' | '?' | ':' if second.is_none_or(char::is_whitespace) => return true,
        _ => {}
    }

    if text.contains(": ") || text.contains(" #") || text.ends_with(':') {
        return true;
    }

    let lower = text.to_ascii_lowercase();
    if RESERVED_WORDS.contains(&lower.as_str()) || text.parse::<f64>().is_ok() {
        return true;
    }

    if !reads_back_as_string(text) || looks_like_timestamp(text) {
        return true;
    }

    // YAML 1.1 readers also accept `1_000` and `0o17` as numbers
    let digits = text.replace('_', "");
    let unsigned = digits.trim_start_matches(['+', '-']);
    (digits != text && !reads_back_as_string(&digits))
        || ["0x", "0o", "0b"].iter().any(|prefix| {
            unsigned.strip_prefix(prefix).is_some_and(|rest| {
                !rest.is_empty() && rest.chars().all(|c| c.is_ascii_hexdigit())
            })
        })
}

/// Whether a YAML reader turns the plain scalar into this exact string.
fn reads_back_as_string(text: &str) -> bool {
    matches!(
        serde_yaml::from_str::<serde_yaml::Value>(text),
        Ok(serde_yaml::Value::String(s)) if s == text
    )
}

/// `2024-01-15` or `2024-01-15T10:00:00Z`, which YAML 1.1 readers load as dates.
fn looks_like_timestamp(text: &str) -> bool {
    let mut parts = text.splitn(3, '-');
    let (Some(year), Some(month), Some(rest)) = (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    let day_len = rest.chars().take_while(char::is_ascii_digit).count();
    let after_day = &rest[day_len..];

    year.len() == 4
        && year.chars().all(|c| c.is_ascii_digit())
        && (1..=2).contains(&month.len())
        && month.chars().all(|c| c.is_ascii_digit())
        && (1..=2).contains(&day_len)
        && (after_day.is_empty() || after_day.starts_with(['T', 't', ' ', '\t']))
}

/// Double-quote text with YAML escapes.
fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\x{:02x}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("A short page.", "A short page.")]
    #[case("Docs: getting started", "\"Docs: getting started\"")]
    #[case("yes", "\"yes\"")]
    #[case("42", "\"42\"")]
    #[case("- dash", "\"- dash\"")]
    #[case("-flag", "-flag")]
    #[case("say \"hi\"", "say \"hi\"")]
    #[case("\"quoted\" start", "\"\\\"quoted\\\" start\"")]
    #[case("", "\"\"")]
    #[case(" padded", "\" padded\"")]
    fn encode_quotes_only_when_needed(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(encode(input), expected);
    }

    #[rstest]
    #[case("rust", "rust")]
    #[case("front matter", "front matter")]
    #[case("a, b", "\"a, b\"")]
    #[case("[x]", "\"[x]\"")]
    #[case("C++", "C++")]
    fn flow_items_quote_flow_indicators(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(encode_flow_item(input), expected);
    }

    #[rstest]
    #[case("plain value", "plain value")]
    #[case("plain # trailing comment", "plain")]
    #[case("\"double \\\"quoted\\\"\"", "double \"quoted\"")]
    #[case("'it''s'", "it's")]
    #[case("  spaced  ", "spaced")]
    fn decode_handles_quoting(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(decode(raw), expected);
    }

    #[rstest]
    #[case("2024-01-15")]
    #[case("2024-1-5")]
    #[case("2024-01-15T10:00:00Z")]
    #[case("0x1F")]
    #[case("0o17")]
    #[case("1_000")]
    #[case("+.inf")]
    #[case(".NaN")]
    #[case("1e3")]
    fn typed_plain_scalars_are_quoted(#[case] input: &str) {
        assert!(encode(input).starts_with('"'), "{input} left plain");
        assert!(encode_flow_item(input).starts_with('"'), "{input} left plain in list");
    }

    #[rstest]
    #[case("Docs: intro")]
    #[case("true")]
    #[case("#hash")]
    #[case("tab\there")]
    #[case("plain")]
    #[case("2024-01-15")]
    #[case("0x1F")]
    #[case("1_000")]
    #[case("+.inf")]
    #[case("version 2.0")]
    #[case("2024-01-15 release notes")]
    #[case("café")]
    fn encoded_values_decode_back(#[case] text: &str) {
        let encoded = encode(text);
        assert_eq!(decode(&encoded), text);
        assert_eq!(
            serde_yaml::from_str::<serde_yaml::Value>(&encoded).unwrap(),
            serde_yaml::Value::String(text.to_string())
        );

        let flow = format!("[{}]", encode_flow_item(text));
        assert_eq!(
            serde_yaml::from_str::<Vec<serde_yaml::Value>>(&flow).unwrap(),
            [serde_yaml::Value::String(text.to_string())]
        );
    }

    #[rstest]
    #[case("2024-01-15 release notes", true)]
    #[case("2024-01-15", true)]
    #[case("2024-01", false)]
    #[case("v2024-01-15", false)]
    #[case("12-01-15", false)]
    fn timestamp_shapes(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(looks_like_timestamp(input), expected);
    }

    #[test]
    fn null_forms_are_recognized() {
        assert!(is_null(""));
        assert!(is_null("~"));
        assert!(is_null(" null "));
        assert!(!is_null("nothing"));
    }
}
