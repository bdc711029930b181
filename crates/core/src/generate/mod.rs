//! Description and keyword generation.
//!
//! The [`Generator`] trait is the seam between the annotation pipeline and
//! the language model. [`GeminiClient`] talks to the Gemini REST API.

pub mod gemini;
pub mod prompt;

use thiserror::Error;

pub use gemini::GeminiClient;

/// Description and keywords produced for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub description: String,
    pub keywords: Vec<String>,
}

/// Errors from a generation round trip.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to generation API failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("generation API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("{}", unknown_model_message(.model, .available))]
    UnknownModel { model: String, available: Vec<String> },

    #[error("generation API returned no text")]
    EmptyResponse,

    #[error("could not read model output: {0}")]
    Malformed(String),
}

fn unknown_model_message(model: &str, available: &[String]) -> String {
    if available.is_empty() {
        return format!("model '{model}' was not found");
    }
    format!("model '{model}' was not found; available models: {}", available.join(", "))
}

/// Produces a description and keywords for a markdown body.
pub trait Generator {
    fn generate(&self, body: &str) -> Result<Generated, GenerationError>;
}

impl<G: Generator + ?Sized> Generator for &G {
    fn generate(&self, body: &str) -> Result<Generated, GenerationError> {
        (**self).generate(body)
    }
}

impl<G: Generator + ?Sized> Generator for Box<G> {
    fn generate(&self, body: &str) -> Result<Generated, GenerationError> {
        (**self).generate(body)
    }
}
