//! Generate `description` and `keywords` front matter for Markdown docs.
//!
//! ```no_run
//! use docmeta_core::annotate::{AnnotateOptions, Annotator};
//! use docmeta_core::config::{ConfigLoader, LoadOptions};
//! use docmeta_core::generate::GeminiClient;
//!
//! let config = ConfigLoader::load(LoadOptions::default()).unwrap();
//! let client = GeminiClient::new(&config.generation).unwrap();
//! let annotator = Annotator::new(client, AnnotateOptions::default());
//! annotator.process_file("docs/intro.md".as_ref()).unwrap();
//! ```

pub mod annotate;
pub mod config;
pub mod frontmatter;
pub mod generate;
