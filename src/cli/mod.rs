// src/cli/mod.rs — CLI definition (clap derive)

pub mod ask;
pub mod chat;
pub mod render;

use clap::{Parser, Subcommand};

use crate::infra::config::Config;

#[derive(Parser)]
#[command(name = "fingpt", about = "Finance assistant for the terminal", version)]
pub struct Cli {
    /// Question to ask once (starts the chat REPL when omitted)
    #[arg(trailing_var_arg = true)]
    pub question: Vec<String>,

    /// Gemini model id
    #[arg(short, long)]
    pub model: Option<String>,

    /// Read answers aloud
    #[arg(long)]
    pub tts: bool,

    /// Send non-financial questions to the model instead of refusing them
    #[arg(long)]
    pub no_gate: bool,

    /// Config file path
    #[arg(long)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive chat session
    Chat,
    /// List the models the provider offers
    Models,
}

impl Cli {
    /// Flags take precedence over config.toml.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(ref model) = self.model {
            config.model.id = model.clone();
        }
        if self.tts {
            config.voice.tts_enabled = true;
        }
        if self.no_gate {
            config.classifier.gate = false;
        }
    }

    pub fn question_text(&self) -> Option<String> {
        let joined = self.question.join(" ");
        let trimmed = joined.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_joined() {
        let cli = Cli::parse_from(["fingpt", "what", "is", "roi?"]);
        assert_eq!(cli.question_text().as_deref(), Some("what is roi?"));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_no_question_means_chat() {
        let cli = Cli::parse_from(["fingpt"]);
        assert!(cli.question_text().is_none());
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from(["fingpt", "--tts", "--no-gate", "-m", "gemini-2.5-pro", "chat"]);
        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert!(config.voice.tts_enabled);
        assert!(!config.classifier.gate);
        assert_eq!(config.model.id, "gemini-2.5-pro");
        assert!(matches!(cli.command, Some(Commands::Chat)));
    }

    #[test]
    fn test_defaults_leave_config_alone() {
        let cli = Cli::parse_from(["fingpt", "models"]);
        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert!(config.classifier.gate);
        assert!(!config.voice.tts_enabled);
        assert!(matches!(cli.command, Some(Commands::Models)));
    }
}
