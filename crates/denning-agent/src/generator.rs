//! Answer synthesis through the Hugging Face Inference API.

use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use denning_core::config::GenerationSettings;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("request to the generation service failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("generation service answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed generation response: {0}")]
    MalformedResponse(String),
}

impl GenerationError {
    /// The service could not be reached or refused the request.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Status { .. })
    }
}

/// Produces an answer for a fully rendered prompt, without the prompt echo.
pub trait Generator: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

#[derive(Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
}

#[derive(Serialize)]
struct GenerationParameters {
    max_new_tokens: u32,
}

pub struct HuggingFaceClient {
    api_url: String,
    api_key: String,
    max_new_tokens: u32,
    client: reqwest::blocking::Client,
}

impl HuggingFaceClient {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>, settings: &GenerationSettings) -> Result<Self, GenerationError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("denning/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self { api_url: api_url.into(), api_key: api_key.into(), max_new_tokens: settings.max_new_tokens, client })
    }
}

impl Generator for HuggingFaceClient {
    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = GenerationRequest { inputs: prompt, parameters: GenerationParameters { max_new_tokens: self.max_new_tokens } };
        let response = self.client.post(&self.api_url).bearer_auth(&self.api_key).json(&request).send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(GenerationError::Status { status: status.as_u16(), body: body.chars().take(200).collect() });
        }
        let generated = parse_generation_response(&body)?;
        debug!(prompt_len = prompt.len(), generated_len = generated.len(), "Received generation");
        Ok(strip_prompt_echo(&generated, prompt))
    }
}

/// Pull `generated_text` out of `[{"generated_text": "..."}, ...]`.
///
/// A first element without the field counts as empty text.
pub fn parse_generation_response(body: &str) -> Result<String, GenerationError> {
    let value: Value = serde_json::from_str(body).map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;
    let first = match &value {
        Value::Array(items) => items
            .first()
            .ok_or_else(|| GenerationError::MalformedResponse("empty result list".to_string()))?,
        _ => return Err(GenerationError::MalformedResponse("expected a JSON array".to_string())),
    };
    let Value::Object(fields) = first else {
        return Err(GenerationError::MalformedResponse("expected an object in the result list".to_string()));
    };
    match fields.get("generated_text") {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(_) => Err(GenerationError::MalformedResponse("generated_text is not a string".to_string())),
    }
}

/// The service repeats the prompt before the answer; drop every copy of it.
///
/// Copies are removed before trimming, and copies whose surrounding
/// whitespace was lost are matched on the trimmed prompt.
pub fn strip_prompt_echo(generated: &str, prompt: &str) -> String {
    let core = prompt.trim();
    if core.is_empty() {
        return generated.trim().to_string();
    }
    generated.replace(prompt, "").replace(core, "").trim().to_string()
}
