// src/voice/synthesis.rs — Text-to-speech output

use std::sync::Arc;

use async_trait::async_trait;

use super::{split_command, Capability};
use crate::infra::errors::FinGptError;

/// Engines probed on PATH when no command is configured, in order.
const KNOWN_ENGINES: &[&str] = &["spd-say", "espeak-ng", "espeak", "say"];

#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub lang: String,
    pub rate: f32,
    pub pitch: f32,
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    fn capability(&self) -> Capability;

    /// Start speaking. Overlapping utterances are left to the engine.
    async fn speak(&self, utterance: &Utterance) -> Result<(), FinGptError>;
}

/// Reads answers aloud with fixed voice settings.
pub struct Speaker {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    capability: Capability,
    lang: String,
    rate: f32,
    pitch: f32,
}

impl Speaker {
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>, lang: &str, rate: f32, pitch: f32) -> Self {
        let capability = synthesizer.capability();
        Self {
            synthesizer,
            capability,
            lang: lang.to_string(),
            rate,
            pitch,
        }
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    /// Speak `text`. Returns whether playback was started; failures are only logged.
    pub async fn speak(&self, text: &str) -> bool {
        if !self.capability.is_available() {
            tracing::warn!("Text-to-speech not supported on this system.");
            return false;
        }
        let utterance = Utterance {
            text: text.to_string(),
            lang: self.lang.clone(),
            rate: self.rate,
            pitch: self.pitch,
        };
        match self.synthesizer.speak(&utterance).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Text-to-speech failed: {}", e);
                false
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Engine {
    SpdSay,
    Espeak(String),
    Say,
    Custom(String, Vec<String>),
}

impl Engine {
    fn from_program(program: &str, args: Vec<String>) -> Self {
        match program {
            "spd-say" if args.is_empty() => Engine::SpdSay,
            "espeak" | "espeak-ng" if args.is_empty() => Engine::Espeak(program.to_string()),
            "say" if args.is_empty() => Engine::Say,
            _ => Engine::Custom(program.to_string(), args),
        }
    }

    fn program(&self) -> &str {
        match self {
            Engine::SpdSay => "spd-say",
            Engine::Espeak(program) | Engine::Custom(program, _) => program.as_str(),
            Engine::Say => "say",
        }
    }

    fn args(&self, utterance: &Utterance) -> Vec<String> {
        let mut args = match self {
            // spd-say takes rate and pitch in -100..=100, 0 being the default.
            Engine::SpdSay => vec![
                "-l".into(),
                utterance.lang.clone(),
                "-r".into(),
                scale_percent(utterance.rate).to_string(),
                "-p".into(),
                scale_percent(utterance.pitch).to_string(),
            ],
            // espeak: words per minute (175 default) and pitch 0..=99 (50 default).
            Engine::Espeak(_) => vec![
                "-v".into(),
                utterance.lang.to_lowercase(),
                "-s".into(),
                ((175.0 * utterance.rate).round() as i32).to_string(),
                "-p".into(),
                ((50.0 * utterance.pitch).round().clamp(0.0, 99.0) as i32).to_string(),
            ],
            Engine::Say => Vec::new(),
            Engine::Custom(_, args) => args.clone(),
        };
        args.push(utterance.text.clone());
        args
    }
}

fn scale_percent(factor: f32) -> i32 {
    ((factor - 1.0) * 100.0).round().clamp(-100.0, 100.0) as i32
}

/// Synthesizer that shells out to a local TTS program.
pub struct CommandSynthesizer {
    engine: Option<Engine>,
}

impl CommandSynthesizer {
    /// Use `configured` if given, otherwise the first known engine on PATH.
    pub fn detect(configured: Option<&str>) -> Self {
        let engine = match configured.and_then(split_command) {
            Some((program, args)) => which::which(&program)
                .ok()
                .map(|_| Engine::from_program(&program, args)),
            None => KNOWN_ENGINES
                .iter()
                .find(|bin| which::which(bin).is_ok())
                .map(|bin| Engine::from_program(bin, Vec::new())),
        };
        if let Some(ref e) = engine {
            tracing::debug!(program = e.program(), "text-to-speech engine found");
        }
        Self { engine }
    }
}

#[async_trait]
impl SpeechSynthesizer for CommandSynthesizer {
    fn capability(&self) -> Capability {
        Capability::from(self.engine.is_some())
    }

    async fn speak(&self, utterance: &Utterance) -> Result<(), FinGptError> {
        let engine = self.engine.as_ref().ok_or(FinGptError::Unsupported {
            capability: "Text-to-speech".into(),
        })?;
        // Not awaited: playback runs alongside the REPL.
        tokio::process::Command::new(engine.program())
            .args(engine.args(utterance))
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .spawn()?;
        Ok(())
    }
}
