// src/voice/recognition.rs — Voice input adapter

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use super::{split_command, Capability};
use crate::infra::errors::FinGptError;

#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionOptions {
    pub lang: String,
    pub interim_results: bool,
    pub max_alternatives: u32,
}

impl Default for RecognitionOptions {
    fn default() -> Self {
        Self {
            lang: "en-US".into(),
            interim_results: false,
            max_alternatives: 1,
        }
    }
}

/// What a single-shot recognition produced.
#[derive(Debug, Clone, PartialEq)]
pub enum RecognitionEvent {
    Result(String),
    /// Ended without a transcript.
    End,
}

#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    fn capability(&self) -> Capability;

    async fn recognize(&self, options: &RecognitionOptions)
        -> Result<RecognitionEvent, FinGptError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListenOutcome {
    /// A transcript was delivered to the callback.
    Heard,
    NoResult,
    Failed,
    Unsupported,
    AlreadyListening,
}

/// Runs one recognition at a time and hands the transcript to a callback.
pub struct VoiceInput {
    recognizer: Arc<dyn SpeechRecognizer>,
    capability: Capability,
    options: RecognitionOptions,
    listening: Arc<AtomicBool>,
}

impl VoiceInput {
    pub fn new(recognizer: Arc<dyn SpeechRecognizer>, options: RecognitionOptions) -> Self {
        let capability = recognizer.capability();
        Self {
            recognizer,
            capability,
            options,
            listening: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    pub fn is_listening(&self) -> bool {
        self.listening.load(Ordering::SeqCst)
    }

    pub async fn start_listening<F>(&self, on_result: F) -> ListenOutcome
    where
        F: FnOnce(String),
    {
        if !self.capability.is_available() {
            return ListenOutcome::Unsupported;
        }
        if self
            .listening
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return ListenOutcome::AlreadyListening;
        }

        let event = self.recognizer.recognize(&self.options).await;
        self.listening.store(false, Ordering::SeqCst);

        match event {
            Ok(RecognitionEvent::Result(transcript)) => {
                on_result(transcript);
                ListenOutcome::Heard
            }
            Ok(RecognitionEvent::End) => ListenOutcome::NoResult,
            Err(e) => {
                tracing::warn!("Speech recognition error: {}", e);
                ListenOutcome::Failed
            }
        }
    }
}

/// Recognizer backed by an external command that prints one transcript.
pub struct CommandRecognizer {
    command: Option<(String, Vec<String>)>,
}

impl CommandRecognizer {
    pub fn new(command: Option<&str>) -> Self {
        Self {
            command: command.and_then(split_command),
        }
    }
}

#[async_trait]
impl SpeechRecognizer for CommandRecognizer {
    fn capability(&self) -> Capability {
        match &self.command {
            Some((program, _)) => Capability::from(which::which(program).is_ok()),
            None => Capability::Unavailable,
        }
    }

    async fn recognize(
        &self,
        options: &RecognitionOptions,
    ) -> Result<RecognitionEvent, FinGptError> {
        let (program, args) = self.command.as_ref().ok_or(FinGptError::Unsupported {
            capability: "Speech recognition".into(),
        })?;

        let output = tokio::process::Command::new(program)
            .args(args)
            .env("FINGPT_SPEECH_LANG", &options.lang)
            .env("FINGPT_SPEECH_INTERIM", options.interim_results.to_string())
            .env(
                "FINGPT_SPEECH_MAX_ALTERNATIVES",
                options.max_alternatives.to_string(),
            )
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(FinGptError::Voice(format!(
                "{} exited with {}: {}",
                program,
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let transcript = stdout.lines().next().unwrap_or("").trim();
        if transcript.is_empty() {
            Ok(RecognitionEvent::End)
        } else {
            Ok(RecognitionEvent::Result(transcript.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = RecognitionOptions::default();
        assert_eq!(opts.lang, "en-US");
        assert!(!opts.interim_results);
        assert_eq!(opts.max_alternatives, 1);
    }

    #[test]
    fn test_unconfigured_command_is_unavailable() {
        let recognizer = CommandRecognizer::new(None);
        assert_eq!(recognizer.capability(), Capability::Unavailable);
    }

    #[test]
    fn test_missing_program_is_unavailable() {
        let recognizer = CommandRecognizer::new(Some("definitely-not-a-real-stt-binary --once"));
        assert_eq!(recognizer.capability(), Capability::Unavailable);
    }
}
