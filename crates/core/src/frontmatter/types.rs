//! Frontmatter types and data structures.

use std::borrow::Cow;

use super::scalar;

/// Layout of a list value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    /// `key: [a, b]`
    Inline,
    /// `key:` followed by `- a` lines, indented by `indent` spaces.
    Block { indent: usize },
}

/// A frontmatter value.
///
/// Scalars and list items hold raw YAML text exactly as written so untouched
/// values serialize back byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Single-line scalar.
    Scalar(String),
    /// Sequence of scalar items.
    List { items: Vec<String>, style: ListStyle },
    /// Nested content that is carried through verbatim: nested mappings,
    /// `|`/`>` block scalars, multi-line plain scalars.
    Block { header: String, lines: Vec<String> },
}

impl FieldValue {
    /// Build a scalar from plain text, quoting it when needed.
    pub fn text(text: &str) -> Self {
        Self::Scalar(scalar::encode(text))
    }

    /// Build an inline list from plain text items.
    pub fn inline_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::List {
            items: items.into_iter().map(|s| scalar::encode_flow_item(s.as_ref())).collect(),
            style: ListStyle::Inline,
        }
    }

    /// Decoded text of a scalar. `None` for lists and nested blocks.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::Scalar(raw) => Some(scalar::decode(raw)),
            _ => None,
        }
    }

    /// Decoded items of a list. `None` for scalars and nested blocks.
    pub fn as_list(&self) -> Option<Vec<Cow<'_, str>>> {
        match self {
            Self::List { items, .. } => {
                Some(items.iter().map(|item| scalar::decode(item)).collect())
            }
            _ => None,
        }
    }

    /// Whether the value carries no content (empty, null, `[]`).
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Scalar(raw) => scalar::is_null(raw) || scalar::decode(raw).trim().is_empty(),
            Self::List { items, .. } => items.is_empty(),
            Self::Block { lines, .. } => lines.iter().all(|line| line.trim().is_empty()),
        }
    }
}

/// One `key: value` entry plus the comment/blank lines that follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Key as written (bare or quoted).
    pub key: String,
    pub value: FieldValue,
    /// Comment and blank lines between this entry and the next one.
    pub trailing: Vec<String>,
}

impl Entry {
    pub fn new(key: impl Into<String>, value: FieldValue) -> Self {
        Self { key: key.into(), value, trailing: Vec::new() }
    }

    /// Decoded key name.
    pub fn name(&self) -> Cow<'_, str> {
        scalar::decode(&self.key)
    }
}

/// Ordered frontmatter mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    /// Comment and blank lines before the first key.
    pub leading: Vec<String>,
    /// Entries in file order.
    pub entries: Vec<Entry>,
}

impl Frontmatter {
    /// Look up a value by key name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries.iter().find(|e| e.name() == name).map(|e| &e.value)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Key names in file order.
    pub fn keys(&self) -> impl Iterator<Item = Cow<'_, str>> {
        self.entries.iter().map(Entry::name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Set `name` to `value`.
    ///
    /// An existing key keeps its position (later duplicates are dropped);
    /// a new key is appended at the end.
    pub fn upsert(&mut self, name: &str, value: FieldValue) {
        let Some(pos) = self.entries.iter().position(|e| e.name() == name) else {
            self.entries.push(Entry::new(name, value));
            return;
        };

        self.entries[pos].value = value;

        let mut index = 0;
        self.entries.retain(|e| {
            let keep = index <= pos || e.name() != name;
            index += 1;
            keep
        });
    }
}

/// Result of splitting frontmatter from markdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    /// Parsed frontmatter (if present).
    pub frontmatter: Option<Frontmatter>,
    /// The markdown body (everything after frontmatter).
    pub body: String,
}

impl ParsedDocument {
    /// A document with no frontmatter block.
    pub fn without_frontmatter(body: impl Into<String>) -> Self {
        Self { frontmatter: None, body: body.into() }
    }
}
