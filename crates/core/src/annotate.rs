//! Per-file annotation: read, generate, merge, write.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::frontmatter::{self, ParsedDocument};
use crate::generate::{GenerationError, Generator};

/// Errors for a single file. None of them stop the run.
#[derive(Debug, Error)]
pub enum AnnotateError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to generate front matter for {}: {source}", path.display())]
    Generate {
        path: PathBuf,
        #[source]
        source: GenerationError,
    },
}

impl AnnotateError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Write { path, .. } | Self::Generate { path, .. } => {
                path
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AnnotateOptions {
    /// Skip files whose frontmatter already has a non-empty description.
    pub ignore_existing: bool,
    /// Render the result without writing the file.
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Left alone because it already has a description.
    Skipped,
    /// A new frontmatter block was added.
    Created,
    /// Existing frontmatter was updated.
    Updated,
}

#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: Outcome,
    /// Rendered frontmatter block, set on dry runs.
    pub preview: Option<String>,
}

/// Counts for a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    fn record(&mut self, result: &Result<FileReport, AnnotateError>) {
        match result {
            Ok(report) => match report.outcome {
                Outcome::Skipped => self.skipped += 1,
                Outcome::Created => self.created += 1,
                Outcome::Updated => self.updated += 1,
            },
            Err(_) => self.failed += 1,
        }
    }
}

/// Runs the read, generate, merge, write sequence per file.
pub struct Annotator<G> {
    generator: G,
    options: AnnotateOptions,
}

impl<G: Generator> Annotator<G> {
    pub fn new(generator: G, options: AnnotateOptions) -> Self {
        Self { generator, options }
    }

    /// Process files in order. Each result is passed to `on_result` as soon
    /// as it is known; a failing file never stops the ones after it.
    pub fn run<P, F>(&self, paths: &[P], mut on_result: F) -> RunSummary
    where
        P: AsRef<Path>,
        F: FnMut(&Result<FileReport, AnnotateError>),
    {
        let mut summary = RunSummary::default();
        for path in paths {
            let result = self.process_file(path.as_ref());
            if let Err(e) = &result {
                warn!(path = %e.path().display(), error = %e, "file failed");
            }
            summary.record(&result);
            on_result(&result);
        }
        summary
    }

    /// Annotate one file. On error the file is left as it was, unless the
    /// write itself fails part way.
    pub fn process_file(&self, path: &Path) -> Result<FileReport, AnnotateError> {
        let content = fs::read_to_string(path)
            .map_err(|source| AnnotateError::Read { path: path.to_path_buf(), source })?;

        let doc = frontmatter::parse(&content);

        if self.options.ignore_existing && frontmatter::has_description(&doc) {
            info!(path = %path.display(), "already has a description, skipping");
            return Ok(FileReport {
                path: path.to_path_buf(),
                outcome: Outcome::Skipped,
                preview: None,
            });
        }

        let outcome =
            if doc.frontmatter.is_some() { Outcome::Updated } else { Outcome::Created };
        debug!(path = %path.display(), ?outcome, "generating front matter");

        let generated = self
            .generator
            .generate(&doc.body)
            .map_err(|source| AnnotateError::Generate { path: path.to_path_buf(), source })?;

        let updated =
            frontmatter::apply_generated(doc, &generated.description, &generated.keywords);

        if self.options.dry_run {
            return Ok(FileReport {
                path: path.to_path_buf(),
                outcome,
                preview: Some(render_block(&updated)),
            });
        }

        fs::write(path, frontmatter::serialize(&updated))
            .map_err(|source| AnnotateError::Write { path: path.to_path_buf(), source })?;

        info!(path = %path.display(), ?outcome, "front matter written");
        Ok(FileReport { path: path.to_path_buf(), outcome, preview: None })
    }
}

fn render_block(doc: &ParsedDocument) -> String {
    let yaml = doc.frontmatter.as_ref().map(frontmatter::frontmatter_to_yaml).unwrap_or_default();
    format!("---\n{yaml}---\n")
}
