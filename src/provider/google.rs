// src/provider/google.rs — Google Generative AI (Gemini) provider

use async_trait::async_trait;

use super::{GenerateRequest, GenerateResponse, ModelInfo, ModelProvider};
use crate::infra::errors::FinGptError;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

pub struct GoogleProvider {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl GoogleProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the Gemini request body. The prompt goes out as one user turn.
    fn build_request_body(&self, request: &GenerateRequest) -> serde_json::Value {
        serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.contents }],
            }],
        })
    }

    fn provider_error(message: String, retriable: bool) -> FinGptError {
        FinGptError::Provider {
            provider: "google".into(),
            message,
            retriable,
        }
    }
}

#[async_trait]
impl ModelProvider for GoogleProvider {
    fn id(&self) -> &str {
        "google"
    }

    fn name(&self) -> &str {
        "Google"
    }

    fn models(&self) -> Vec<ModelInfo> {
        vec![
            ModelInfo {
                id: "gemini-2.5-flash".into(),
                name: "Gemini 2.5 Flash".into(),
                context_window: 1_048_576,
                max_output_tokens: 65_536,
            },
            ModelInfo {
                id: "gemini-2.5-pro".into(),
                name: "Gemini 2.5 Pro".into(),
                context_window: 1_048_576,
                max_output_tokens: 65_536,
            },
            ModelInfo {
                id: "gemini-2.0-flash".into(),
                name: "Gemini 2.0 Flash".into(),
                context_window: 1_048_576,
                max_output_tokens: 8_192,
            },
        ]
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, FinGptError> {
        let body = self.build_request_body(&request);

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url(),
            request.model,
            self.api_key,
        );

        tracing::debug!(model = %request.model, "sending generateContent request");

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| Self::provider_error(e.to_string(), e.is_timeout() || e.is_connect()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FinGptError::RateLimited {
                provider: "google".into(),
                retry_after_ms: 5000,
            });
        }

        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(Self::provider_error(
                format!("HTTP {}: {}", status, error_body),
                status.is_server_error(),
            ));
        }

        let resp: serde_json::Value = response
            .json()
            .await
            .map_err(|e| Self::provider_error(format!("Failed to parse response: {}", e), false))?;

        Ok(GenerateResponse::from_json(&resp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let provider = GoogleProvider::new("key".into());
        let body = provider.build_request_body(&GenerateRequest::new("gemini-2.5-flash", "Hi"));
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Hi");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let provider = GoogleProvider::with_base_url("key".into(), "http://localhost:1234/v1beta/");
        assert_eq!(provider.base_url(), "http://localhost:1234/v1beta");
    }

    #[test]
    fn test_default_model_listed() {
        let provider = GoogleProvider::new("key".into());
        assert_eq!(provider.id(), "google");
        assert!(provider.models().iter().any(|m| m.id == "gemini-2.5-flash"));
    }
}
