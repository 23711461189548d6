// src/provider/mod.rs — Model provider layer

pub mod google;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::infra::config::{self, Config};
use crate::infra::errors::FinGptError;

/// Build the configured provider, or `None` when no API key is set.
pub fn resolve(config: &Config) -> Option<Arc<dyn ModelProvider>> {
    let Some(key) = config::api_key_from_env() else {
        tracing::info!("{} not set; model calls are disabled", config::API_KEY_ENV);
        return None;
    };
    Some(Arc::new(google::GoogleProvider::with_base_url(
        key,
        config.model.base_url.clone(),
    )))
}

/// Core trait that model providers implement.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn models(&self) -> Vec<ModelInfo>;

    /// One request, one reply. No retries.
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, FinGptError>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
    pub context_window: u32,
    pub max_output_tokens: u32,
}

/// Outbound payload: a fixed model id and a single prompt string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub model: String,
    pub contents: String,
}

impl GenerateRequest {
    pub fn new(model: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            contents: contents.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentPart {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl TokenUsage {
    pub fn total(&self) -> u32 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

/// A model reply in either of the two shapes the service may return:
/// a list of content parts, or a flat `text` field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateResponse {
    pub contents: Vec<ContentPart>,
    pub text: Option<String>,
    pub usage: TokenUsage,
}

impl GenerateResponse {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Normalise a raw JSON body.
    ///
    /// In the `contents` shape only the first item counts. The REST shape
    /// keeps every part of `candidates[0].content.parts`. Anything else
    /// yields an empty list.
    pub fn from_json(value: &serde_json::Value) -> Self {
        let items: Vec<&serde_json::Value> = match value["contents"].as_array() {
            Some(list) => list.iter().take(1).collect(),
            None => value["candidates"][0]["content"]["parts"]
                .as_array()
                .map(|parts| parts.iter().collect())
                .unwrap_or_default(),
        };

        let contents = items
            .into_iter()
            .map(|item| ContentPart {
                text: item["text"].as_str().map(str::to_string),
            })
            .collect();

        let usage = TokenUsage {
            input_tokens: token_count(&value["usageMetadata"]["promptTokenCount"]),
            output_tokens: token_count(&value["usageMetadata"]["candidatesTokenCount"]),
        };

        Self {
            contents,
            text: value["text"].as_str().map(str::to_string),
            usage,
        }
    }

    /// Reply text, preferring the list shape over the flat field.
    /// Returns `None` when neither carries any text.
    pub fn reply_text(&self) -> Option<String> {
        let joined: String = self
            .contents
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if !joined.is_empty() {
            return Some(joined);
        }
        self.text.clone().filter(|t| !t.is_empty())
    }
}

/// Missing counts are zero; counts past `u32::MAX` saturate.
fn token_count(value: &serde_json::Value) -> u32 {
    value
        .as_u64()
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
        .unwrap_or(0)
}
