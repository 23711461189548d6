// src/core/dispatcher.rs — Query dispatcher
//
// classify -> request -> parse, then feed the store. One model call per
// submission. `submit` borrows the dispatcher mutably, so submissions are
// strictly sequential.

use std::sync::Arc;

use super::classifier::TopicClassifier;
use super::prompt::{parse_reply, ParsedReply, PromptBuilder};
use super::store::ConversationStore;
use super::types::{Message, Screen};
use crate::infra::config::Config;
use crate::infra::errors::FinGptError;
use crate::provider::{GenerateRequest, ModelProvider};
use crate::voice::synthesis::Speaker;

pub const REFUSAL_TEXT: &str =
    "I can only help with finance, banking and marketing questions. Please ask something in those areas.";
pub const ERROR_TEXT: &str = "Error fetching response";
pub const NO_RESPONSE_TEXT: &str = "Sorry, no response from API";
pub const NOT_CONFIGURED_TEXT: &str =
    "API key not configured. Set GOOGLE_API_KEY to enable responses.";

#[derive(Debug, Clone)]
pub struct DispatcherOptions {
    pub model: String,
    /// Refuse non-financial prompts locally.
    pub gate: bool,
    pub tts_enabled: bool,
}

impl From<&Config> for DispatcherOptions {
    fn from(config: &Config) -> Self {
        Self {
            model: config.model.id.clone(),
            gate: config.classifier.gate,
            tts_enabled: config.voice.tts_enabled,
        }
    }
}

/// How a submission ended. Each variant carries the appended assistant message.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Answered(Message),
    Refused(Message),
    NotConfigured(Message),
    Failed(Message),
}

impl Submission {
    pub fn message(&self) -> &Message {
        match self {
            Submission::Answered(m)
            | Submission::Refused(m)
            | Submission::NotConfigured(m)
            | Submission::Failed(m) => m,
        }
    }
}

pub struct QueryDispatcher {
    store: ConversationStore,
    provider: Option<Arc<dyn ModelProvider>>,
    classifier: TopicClassifier,
    prompts: PromptBuilder,
    speaker: Option<Speaker>,
    options: DispatcherOptions,
}

impl QueryDispatcher {
    /// `provider` is `None` when no API key is available; submissions then
    /// get the not-configured reply instead of a model call.
    pub fn new(
        provider: Option<Arc<dyn ModelProvider>>,
        classifier: TopicClassifier,
        options: DispatcherOptions,
    ) -> Result<Self, FinGptError> {
        Ok(Self {
            store: ConversationStore::new(),
            provider,
            classifier,
            prompts: PromptBuilder::new()?,
            speaker: None,
            options,
        })
    }

    pub fn from_config(
        config: &Config,
        provider: Option<Arc<dyn ModelProvider>>,
    ) -> Result<Self, FinGptError> {
        let classifier = TopicClassifier::with_extra_keywords(&config.classifier.extra_keywords);
        Self::new(provider, classifier, DispatcherOptions::from(config))
    }

    pub fn with_speaker(mut self, speaker: Speaker) -> Self {
        self.speaker = Some(speaker);
        self
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ConversationStore {
        &mut self.store
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    pub fn model(&self) -> &str {
        &self.options.model
    }

    pub fn set_model(&mut self, model: impl Into<String>) {
        self.options.model = model.into();
    }

    pub fn provider(&self) -> Option<&Arc<dyn ModelProvider>> {
        self.provider.as_ref()
    }

    pub fn gating(&self) -> bool {
        self.options.gate
    }

    pub fn tts_enabled(&self) -> bool {
        self.options.tts_enabled
    }

    /// Flip speech output, returning the new setting.
    pub fn toggle_tts(&mut self) -> bool {
        self.options.tts_enabled = !self.options.tts_enabled;
        self.options.tts_enabled
    }

    /// Submit whatever is in the draft.
    pub async fn submit_draft(&mut self) -> Result<Submission, FinGptError> {
        let draft = self.store.draft().to_string();
        self.submit(&draft).await
    }

    pub async fn submit(&mut self, prompt: &str) -> Result<Submission, FinGptError> {
        if prompt.trim().is_empty() {
            return Err(FinGptError::EmptyPrompt);
        }

        if self.store.is_session_empty() {
            self.store.begin_session(prompt);
        }
        self.store.append_and_mirror(Message::user(prompt))?;
        self.store.clear_draft();
        self.store.show(Screen::Conversation);

        let financial = self.classifier.is_financial(prompt);
        tracing::debug!(financial, gate = self.options.gate, "classified prompt");

        if self.options.gate && !financial {
            return self.finish(Submission::Refused(Message::ai(REFUSAL_TEXT)));
        }

        let Some(provider) = self.provider.clone() else {
            return self.finish(Submission::NotConfigured(Message::ai(NOT_CONFIGURED_TEXT)));
        };

        match self.fetch(provider.as_ref(), prompt, financial).await {
            Ok(parsed) => {
                let submission =
                    self.finish(Submission::Answered(Message::ai_with_source(
                        parsed.answer.clone(),
                        parsed.source,
                    )))?;
                if self.options.tts_enabled {
                    if let Some(ref speaker) = self.speaker {
                        speaker.speak(&parsed.answer).await;
                    }
                }
                Ok(submission)
            }
            Err(e) => {
                tracing::error!(retriable = e.is_retriable(), "AI API Error: {}", e);
                self.finish(Submission::Failed(Message::ai(ERROR_TEXT)))
            }
        }
    }

    async fn fetch(
        &self,
        provider: &dyn ModelProvider,
        prompt: &str,
        financial: bool,
    ) -> Result<ParsedReply, FinGptError> {
        let contents = self.prompts.build(prompt, financial)?;
        let request = GenerateRequest::new(self.options.model.clone(), contents);
        let response = provider.generate(request).await?;

        tracing::debug!(tokens = response.usage.total(), "model replied");

        let reply = response
            .reply_text()
            .unwrap_or_else(|| NO_RESPONSE_TEXT.to_string());
        Ok(parse_reply(&reply, financial))
    }

    fn finish(&mut self, submission: Submission) -> Result<Submission, FinGptError> {
        self.store.append_and_mirror(submission.message().clone())?;
        Ok(submission)
    }
}
