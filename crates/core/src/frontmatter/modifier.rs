//! Frontmatter modification: writing generated description and keywords.

use super::types::{FieldValue, Frontmatter, ParsedDocument};

/// Key holding the page description.
pub const DESCRIPTION_KEY: &str = "description";
/// Key holding the page keywords.
pub const KEYWORDS_KEY: &str = "keywords";

/// Set `description` and `keywords` on a document.
///
/// Existing keys are overwritten in place and every other entry is left as
/// it was. Missing keys are appended, description first. A document without
/// frontmatter gets a new block holding just these two keys.
pub fn apply_generated<S: AsRef<str>>(
    mut doc: ParsedDocument,
    description: &str,
    keywords: &[S],
) -> ParsedDocument {
    let fm = doc.frontmatter.get_or_insert_with(Frontmatter::default);
    fm.upsert(DESCRIPTION_KEY, FieldValue::text(description));
    fm.upsert(KEYWORDS_KEY, FieldValue::inline_list(keywords));
    doc
}

/// Whether the document already has a non-empty description.
pub fn has_description(doc: &ParsedDocument) -> bool {
    doc.frontmatter
        .as_ref()
        .and_then(|fm| fm.get(DESCRIPTION_KEY))
        .is_some_and(|value| !value.is_empty())
}
