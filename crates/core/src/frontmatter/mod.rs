//! Frontmatter parsing, modification, and serialization.
//!
//! This module provides functionality to:
//! - Parse the leading `---` block of a markdown document into ordered entries
//! - Overwrite the generated `description` and `keywords` fields in place
//! - Serialize documents back to markdown, leaving untouched entries as written

pub mod modifier;
pub mod parser;
pub mod scalar;
pub mod serializer;
pub mod types;

pub use modifier::{DESCRIPTION_KEY, KEYWORDS_KEY, apply_generated, has_description};
pub use parser::parse;
pub use serializer::{frontmatter_to_yaml, serialize};
pub use types::{Entry, FieldValue, Frontmatter, ListStyle, ParsedDocument};
