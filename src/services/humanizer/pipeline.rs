// Humanize Pipeline
// Tokenize -> transform -> assemble -> disguise, with an optional remote rewrite in front.

use std::time::Instant;
use tracing::{debug, info, warn};

use super::anti_detection::AntiDetection;
use super::assembler::DocumentAssembler;
use super::error::HumanizeError;
use super::profile::{HumanizeLevel, TransformProfile};
use super::random::RandomSource;
use super::sentence_transformer::SentenceTransformer;
use super::tokenizer::sentence_split;
use crate::models::Backend;
use crate::services::config_store::{AppConfig, ConfigStore};
use crate::services::prompts::{build_prompt, temperature_for};
use crate::services::providers::{gemini_api_key, GenerationSettings, ProviderClient, ProviderError};
use crate::services::text_processor::{count_words, split_paragraphs};

/// Run the local pipeline with the given randomness.
///
/// Paragraphs are rewritten one at a time and rejoined with a blank line. Whitespace-only
/// input comes back unchanged.
pub fn humanize_with_rng<R: RandomSource>(text: &str, level: HumanizeLevel, rng: &mut R) -> String {
    if text.trim().is_empty() {
        return text.to_string();
    }

    let profile = TransformProfile::for_level(level);
    let mut rewritten = Vec::new();

    for paragraph in split_paragraphs(text) {
        let sentences = sentence_split(paragraph);
        if sentences.is_empty() {
            continue;
        }

        let transformed = SentenceTransformer::new(&profile, rng).transform_all(sentences);
        let assembled = DocumentAssembler::new(&profile, rng).assemble(transformed);
        if !assembled.trim().is_empty() {
            rewritten.push(assembled);
        }
    }

    let joined = rewritten.join("\n\n");
    let out = AntiDetection::new(&profile, rng).apply(&joined);
    if out.trim().is_empty() {
        debug!(level = level.get(), "pipeline produced nothing; returning input");
        return text.to_string();
    }
    out
}

/// Local pipeline on the thread RNG.
pub fn humanize_local(text: &str, level: HumanizeLevel) -> String {
    let start = Instant::now();
    let out = humanize_with_rng(text, level, &mut rand::rng());
    info!(
        level = level.get(),
        input_words = count_words(text),
        output_words = count_words(&out),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "humanize.local"
    );
    out
}

/// Validate `level` and run the local pipeline.
pub fn humanize(text: &str, level: i64) -> Result<String, HumanizeError> {
    let level = HumanizeLevel::new(level)?;
    Ok(humanize_local(text, level))
}

/// Entry point that can try the remote backend before falling back to local rules.
pub struct Humanizer {
    client: ProviderClient,
    api_key: Option<String>,
    settings: GenerationSettings,
}

impl Humanizer {
    pub fn new(client: ProviderClient, api_key: Option<String>, settings: GenerationSettings) -> Self {
        Self {
            client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            settings,
        }
    }

    /// No key, so every call stays local.
    pub fn local_only() -> Self {
        Self::new(ProviderClient::new(), None, GenerationSettings::default())
    }

    /// Build from the config file and environment.
    ///
    /// A missing or unreadable config falls back to defaults; `GEMINI_API_URL` wins over
    /// the configured base URL.
    pub fn from_config(store: Option<&ConfigStore>) -> Self {
        let config = match store.map(ConfigStore::load) {
            Some(Ok(config)) => config,
            Some(Err(e)) => {
                warn!(error = %e, "config.load_failed; using defaults");
                AppConfig::default()
            }
            None => AppConfig::default(),
        };

        let mut client = match config.proxy.as_ref().and_then(|p| p.active_url()) {
            Some(proxy) => ProviderClient::with_proxy(proxy).unwrap_or_else(|e| {
                warn!(error = %e, proxy, "proxy.rejected; connecting directly");
                ProviderClient::new()
            }),
            None => ProviderClient::new(),
        };

        if std::env::var_os("GEMINI_API_URL").is_none() {
            if let Some(url) = config.remote.base_url.as_deref().filter(|u| !u.trim().is_empty()) {
                client = client.with_base_url(url);
            }
        }

        Self::new(client, gemini_api_key(), GenerationSettings::from(&config.remote))
    }

    pub fn with_client(mut self, client: ProviderClient) -> Self {
        self.client = client;
        self
    }

    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string()).filter(|k| !k.trim().is_empty());
        self
    }

    pub fn has_remote(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Humanize `text`. Remote failures are logged and the local pipeline runs instead.
    pub async fn humanize(&self, text: &str, level: HumanizeLevel, use_remote: bool) -> String {
        self.humanize_reporting(text, level, use_remote).await.0
    }

    /// Like [`Humanizer::humanize`], also reporting which backend produced the text.
    pub async fn humanize_reporting(&self, text: &str, level: HumanizeLevel, use_remote: bool) -> (String, Backend) {
        if text.trim().is_empty() {
            return (text.to_string(), Backend::Local);
        }

        if use_remote {
            match self.try_remote(text, level).await {
                Ok(out) => return (out, Backend::Remote),
                Err(e) => warn!(error = %e, level = level.get(), "remote.fallback"),
            }
        }

        (humanize_local(text, level), Backend::Local)
    }

    /// A single remote attempt.
    pub async fn try_remote(&self, text: &str, level: HumanizeLevel) -> Result<String, HumanizeError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::MissingApiKey)?;
        let prompt = build_prompt(text, level);
        let temperature = temperature_for(level, self.settings.temperature_cap);

        let result = self
            .client
            .generate_content(api_key, &prompt, temperature, &self.settings)
            .await?;
        Ok(result.content)
    }
}
