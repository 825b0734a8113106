// Remote Backend Service
// Gemini generateContent client used for remote rewrites

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::env;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

use super::config_store::{ConfigStore, RemoteConfig};

const GEMINI_DEFAULT_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(80);

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },
    #[error("Missing content in response")]
    MissingContent,
    #[error("JSON parse error: {0}")]
    JsonError(String),
    #[error("API key not configured")]
    MissingApiKey,
}

/// Model and sampling parameters for one remote rewrite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSettings {
    pub model: String,
    pub temperature_cap: f64,
    pub top_p: f64,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self::from(&RemoteConfig::default())
    }
}

impl From<&RemoteConfig> for GenerationSettings {
    fn from(remote: &RemoteConfig) -> Self {
        Self {
            model: remote.model.clone(),
            temperature_cap: remote.temperature_cap,
            top_p: remote.top_p,
            top_k: remote.top_k,
            max_output_tokens: remote.max_output_tokens,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    top_p: f64,
    top_k: u32,
    max_output_tokens: u32,
}

impl GenerateRequest {
    fn new(prompt: &str, temperature: f64, settings: &GenerationSettings) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature,
                top_p: settings.top_p,
                top_k: settings.top_k,
                max_output_tokens: settings.max_output_tokens,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    pub content: String,
    pub latency_ms: i64,
}

pub struct ProviderClient {
    client: Client,
    base_url: String,
}

impl Default for ProviderClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: default_base_url(),
        }
    }

    pub fn with_proxy(proxy_url: &str) -> Result<Self, ProviderError> {
        let proxy = reqwest::Proxy::all(proxy_url)?;
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .proxy(proxy)
            .build()?;

        Ok(Self {
            client,
            base_url: default_base_url(),
        })
    }

    /// Point the client at a different models endpoint (tests, self-hosted gateways).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, model: &str) -> String {
        format!("{}/{}:generateContent", self.base_url, model)
    }

    /// One `generateContent` call. No retries.
    pub async fn generate_content(
        &self,
        api_key: &str,
        prompt: &str,
        temperature: f64,
        settings: &GenerationSettings,
    ) -> Result<GenerationResult, ProviderError> {
        if api_key.trim().is_empty() {
            return Err(ProviderError::MissingApiKey);
        }

        let request = GenerateRequest::new(prompt, temperature, settings);
        let url = self.endpoint(&settings.model);
        debug!(model = %settings.model, temperature, prompt_chars = prompt.len(), "remote.request");

        let start = Instant::now();

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let latency_ms = start.elapsed().as_millis() as i64;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let data: Value = response
            .json()
            .await
            .map_err(|e| ProviderError::JsonError(e.to_string()))?;

        let content = extract_candidate_text(&data).ok_or(ProviderError::MissingContent)?;
        info!(model = %settings.model, latency_ms, "remote.response");

        Ok(GenerationResult { content, latency_ms })
    }
}

fn default_base_url() -> String {
    env::var("GEMINI_API_URL")
        .ok()
        .map(|u| u.trim().trim_end_matches('/').to_string())
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| GEMINI_DEFAULT_URL.to_string())
}

/// `candidates[0].content.parts[0].text`, when present and non-empty.
pub fn extract_candidate_text(data: &Value) -> Option<String> {
    data["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.to_string())
}

/// Get API key from environment or config file
pub fn get_api_key(name: &str) -> Option<String> {
    let env_keys: &[&str] = match name {
        "gemini" => &["GEMINI_API_KEY", "HUMANIZER_GEMINI_API_KEY"],
        "google" => &["GOOGLE_API_KEY", "HUMANIZER_GOOGLE_API_KEY"],
        _ => &[],
    };

    for key in env_keys {
        if let Ok(val) = env::var(key) {
            let v = val.trim();
            if !v.is_empty() {
                return Some(v.to_string());
            }
        }
    }

    ConfigStore::open_default().and_then(|store| store.get_api_key(name).ok().flatten())
}

/// Key for the Gemini backend under either of its names.
pub fn gemini_api_key() -> Option<String> {
    get_api_key("gemini").or_else(|| get_api_key("google"))
}
