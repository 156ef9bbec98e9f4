//! Configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars,
//! or a single explicit file + `APP_*` env vars. Nested keys in the
//! environment use a double underscore, e.g. `APP_CHUNKING__OVERLAP=50`.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::chunker::ChunkingConfig;
use crate::error::{Error, Result};
use crate::retriever::DEFAULT_RETRIEVAL_RESULTS;

/// Environment variable holding the Hugging Face API token.
pub const API_KEY_ENV: &str = "HUGGINGFACE_API_KEY";

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(app_env());
        Ok(Self { figment })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::InvalidConfig(format!("config file not found: {}", path.display())));
        }
        let figment = Figment::new().merge(Toml::file(path)).merge(app_env());
        Ok(Self { figment })
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("Failed to get '{}': {}", key, e)))
    }

    /// Extract and validate the typed settings.
    pub fn settings(&self) -> Result<Settings> {
        let settings: Settings = self
            .figment
            .extract()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }
}

fn app_env() -> Env {
    Env::prefixed("APP_").split("__")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub huggingface_api_url: String,
    #[serde(default)]
    pub prompt_template: String,
    #[serde(default = "default_retrieval_results")]
    pub retrieval_results: usize,
    #[serde(default = "default_vector_db_path")]
    pub vector_db_path: String,
    #[serde(default = "default_collection_name")]
    pub collection_name: String,
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub generation: GenerationSettings,
    #[serde(default)]
    pub embedding: EmbeddingSettings,
    #[serde(default)]
    pub ingest: IngestSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub max_new_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self { max_new_tokens: 512, timeout_secs: 60 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmbeddingBackend {
    BgeM3,
    Hashing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    pub backend: EmbeddingBackend,
    pub model_dir: Option<String>,
    pub dimension: usize,
    pub max_len: usize,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self { backend: EmbeddingBackend::BgeM3, model_dir: None, dimension: 1024, max_len: 256 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestSettings {
    pub content_selector: String,
    pub fetch_timeout_secs: u64,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self { content_selector: "div#content".to_string(), fetch_timeout_secs: 15 }
    }
}

fn default_retrieval_results() -> usize {
    DEFAULT_RETRIEVAL_RESULTS
}

fn default_vector_db_path() -> String {
    "./database/vector_db".to_string()
}

fn default_collection_name() -> String {
    "uk_law_collection".to_string()
}

impl Settings {
    /// Settings with every optional field at its default.
    pub fn new(huggingface_api_url: impl Into<String>, prompt_template: impl Into<String>) -> Self {
        Self {
            huggingface_api_url: huggingface_api_url.into(),
            prompt_template: prompt_template.into(),
            retrieval_results: default_retrieval_results(),
            vector_db_path: default_vector_db_path(),
            collection_name: default_collection_name(),
            chunking: ChunkingConfig::default(),
            generation: GenerationSettings::default(),
            embedding: EmbeddingSettings::default(),
            ingest: IngestSettings::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.huggingface_api_url.trim().is_empty() {
            return Err(Error::InvalidConfig("huggingface_api_url is empty".to_string()));
        }
        if self.retrieval_results == 0 {
            return Err(Error::InvalidConfig("retrieval_results must be at least 1".to_string()));
        }
        if self.collection_name.trim().is_empty() {
            return Err(Error::InvalidConfig("collection_name is empty".to_string()));
        }
        if self.embedding.dimension == 0 {
            return Err(Error::InvalidConfig("embedding.dimension must be at least 1".to_string()));
        }
        self.chunking.validate()
    }

    pub fn vector_db_dir(&self) -> PathBuf {
        expand_path(&self.vector_db_path)
    }
}

/// Read the API token from the process environment.
pub fn api_key_from_env() -> Result<String> {
    match env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(Error::MissingCredential(API_KEY_ENV.to_string())),
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
