//! Prompt construction and model output parsing.

use super::{GenerationError, Generated};

/// Build the instruction prompt for one markdown body.
pub fn build(body: &str) -> String {
    format!(
        "Analyze the following Markdown formatted page content and generate a concise, \
SEO-friendly description and a list of relevant keywords.

**Markdown Content:**
```markdown
{body}
```

**Instructions:**
1.  **Description:** Create a single sentence description (ideally under 160 characters).
2.  **Keywords:** Provide a comma-separated list of 5 to 10 relevant keywords.

**Output Format:**
Return ONLY the description and keywords in the following format, with each key on a new line:
description: [Your generated description]
keywords: [keyword1, keyword2, keyword3]
"
    )
}

/// Extract description and keywords from the model's reply.
///
/// Looks for `description:` and `keywords:` lines (any case). Keywords may
/// be bracketed; each item is trimmed of whitespace and quotes.
pub fn parse_response(text: &str) -> Result<Generated, GenerationError> {
    let mut description = None;
    let mut keywords = None;

    for line in text.lines().map(str::trim) {
        if description.is_none()
            && let Some(value) = strip_label(line, "description:")
        {
            description = Some(value);
        } else if keywords.is_none()
            && let Some(value) = strip_label(line, "keywords:")
        {
            keywords = Some(value);
        }
    }

    let description = description
        .filter(|d| !d.is_empty())
        .ok_or_else(|| GenerationError::Malformed("missing description".to_string()))?;

    let keywords = keywords.map(split_keywords).unwrap_or_default();
    if keywords.is_empty() {
        return Err(GenerationError::Malformed("missing keywords".to_string()));
    }

    Ok(Generated { description: description.to_string(), keywords })
}

fn strip_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let head = line.get(..label.len())?;
    head.eq_ignore_ascii_case(label).then(|| line[label.len()..].trim())
}

fn split_keywords(raw: &str) -> Vec<String> {
    let inner = raw
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(raw);

    inner
        .split(',')
        .map(|k| k.trim().trim_matches(['"', '\'']).trim())
        .filter(|k| !k.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
