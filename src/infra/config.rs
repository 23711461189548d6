// src/infra/config.rs — Configuration loading (TOML)

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::infra::paths;

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub classifier: ClassifierConfig,

    #[serde(default)]
    pub voice: VoiceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub id: String,
    pub base_url: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            id: "gemini-2.5-flash".into(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Refuse non-financial prompts without calling the model.
    #[serde(default = "default_true")]
    pub gate: bool,
    /// Roots added on top of the built-in list. Matched the same way.
    #[serde(default)]
    pub extra_keywords: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            gate: true,
            extra_keywords: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceConfig {
    #[serde(default)]
    pub tts_enabled: bool,
    #[serde(default = "default_lang")]
    pub lang: String,
    #[serde(default = "default_one")]
    pub rate: f32,
    #[serde(default = "default_one")]
    pub pitch: f32,
    /// Command that records one utterance and prints its transcript.
    pub recognizer_command: Option<String>,
    /// Command that reads its last argument aloud.
    pub synthesizer_command: Option<String>,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            tts_enabled: false,
            lang: default_lang(),
            rate: 1.0,
            pitch: 1.0,
            recognizer_command: None,
            synthesizer_command: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_lang() -> String {
    "en-US".into()
}

fn default_one() -> f32 {
    1.0
}

impl Config {
    /// Load config from file, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        match paths::config_file_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }
}

/// Read the API key from the environment. Blank values count as missing.
pub fn api_key_from_env() -> Option<String> {
    std::env::var(API_KEY_ENV)
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
}
