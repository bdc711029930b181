//! Gemini REST API client.

use std::collections::HashSet;

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use super::{GenerationError, Generated, Generator, prompt};
use crate::config::{ApiKey, GenerationConfig};

const API_KEY_HEADER: &str = "x-goog-api-key";
const API_VERSION: &str = "v1beta";
const GENERATE_METHOD: &str = "generateContent";
const MAX_MODEL_PAGES: usize = 50;

/// Blocking client for `models.generateContent`.
#[derive(Debug)]
pub struct GeminiClient {
    http: Client,
    endpoint: Url,
    model: String,
    api_key: ApiKey,
}

impl GeminiClient {
    /// Construct a client from resolved configuration.
    pub fn new(config: &GenerationConfig) -> Result<Self, GenerationError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(GenerationError::Client)?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            model: qualified_model(&config.model),
            api_key: config.api_key.clone(),
        })
    }

    /// Fully qualified model name, e.g. `models/gemini-2.5-flash-lite`.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Bare names of the models that support content generation, sorted.
    pub fn list_models(&self) -> Result<Vec<String>, GenerationError> {
        let mut names = Vec::new();
        let mut page_token: Option<String> = None;
        let mut seen_tokens = HashSet::new();

        for _ in 0..MAX_MODEL_PAGES {
            let mut request = self
                .http
                .get(self.url("models"))
                .header(API_KEY_HEADER, self.api_key.expose())
                .query(&[("pageSize", "1000")]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let response = request.send()?;
            let page: ListModelsResponse = check_status(response)?.json()?;

            names.extend(
                page.models
                    .into_iter()
                    .filter(|m| m.supported_generation_methods.iter().any(|g| g == GENERATE_METHOD))
                    .map(|m| bare_model(&m.name).to_string()),
            );

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) if seen_tokens.insert(token.clone()) => page_token = Some(token),
                Some(token) => {
                    warn!(token = %token, "model listing repeated a page token, stopping");
                    break;
                }
                None => break,
            }
        }

        names.sort();
        Ok(names)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{API_VERSION}/{path}", self.endpoint.as_str().trim_end_matches('/'))
    }

    fn request_text(&self, prompt: &str) -> Result<String, GenerationError> {
        let body = GenerateContentRequest {
            contents: vec![Content { role: "user", parts: vec![Part { text: prompt }] }],
        };

        let response = self
            .http
            .post(self.url(&format!("{}:{GENERATE_METHOD}", self.model)))
            .header(API_KEY_HEADER, self.api_key.expose())
            .json(&body)
            .send()?;

        if !response.status().is_success() {
            let failure = ApiFailure::read(response);
            if !failure.is_missing_resource() {
                return Err(failure.into());
            }
            let available = self.list_models().unwrap_or_else(|err| {
                warn!(error = %err, "could not list available models");
                Vec::new()
            });
            return Err(GenerationError::UnknownModel {
                model: bare_model(&self.model).to_string(),
                available,
            });
        }

        let payload: GenerateContentResponse = response.json()?;
        payload.text().ok_or(GenerationError::EmptyResponse)
    }
}

impl Generator for GeminiClient {
    fn generate(&self, body: &str) -> Result<Generated, GenerationError> {
        debug!(model = %self.model, bytes = body.len(), "requesting description and keywords");
        let text = self.request_text(&prompt::build(body))?;
        debug!(response = %text, "model replied");
        prompt::parse_response(&text)
    }
}

/// Prefix bare model identifiers with `models/`.
fn qualified_model(name: &str) -> String {
    if name.contains('/') { name.to_string() } else { format!("models/{name}") }
}

fn bare_model(name: &str) -> &str {
    name.strip_prefix("models/").unwrap_or(name)
}

/// Turn a non-success response into an API error carrying the server message.
fn check_status(response: Response) -> Result<Response, GenerationError> {
    if response.status().is_success() {
        return Ok(response);
    }
    Err(ApiFailure::read(response).into())
}

/// A non-success reply, read from the `{"error": {...}}` envelope when present.
#[derive(Debug)]
struct ApiFailure {
    code: StatusCode,
    status: Option<String>,
    message: String,
}

impl ApiFailure {
    fn read(response: Response) -> Self {
        let code = response.status();
        let raw = response.text().unwrap_or_default();
        let body = serde_json::from_str::<ApiErrorEnvelope>(&raw).ok().map(|e| e.error);
        let status = body.as_ref().and_then(|b| b.status.clone());

        let message = body
            .map(|b| b.message)
            .filter(|m| !m.is_empty())
            .or_else(|| (!raw.trim().is_empty()).then(|| raw.trim().to_string()))
            .unwrap_or_else(|| code.canonical_reason().unwrap_or("unknown error").to_string());

        Self { code, status, message }
    }

    /// A 404 from the API itself, as opposed to a wrong endpoint path.
    fn is_missing_resource(&self) -> bool {
        self.code == StatusCode::NOT_FOUND && self.status.as_deref() == Some("NOT_FOUND")
    }
}

impl From<ApiFailure> for GenerationError {
    fn from(failure: ApiFailure) -> Self {
        GenerationError::Api { status: failure.code.as_u16(), message: failure.message }
    }
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, all parts joined.
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelInfo {
    name: String,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

#[derive(Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
    status: Option<String>,
}
