// src/main.rs — FinGPT entry point

use std::sync::Arc;

use clap::Parser;

use fingpt::cli::{Cli, Commands};
use fingpt::core::dispatcher::QueryDispatcher;
use fingpt::infra::config::Config;
use fingpt::infra::logger;
use fingpt::provider::google::GoogleProvider;
use fingpt::provider::{self, ModelProvider};
use fingpt::voice::recognition::{CommandRecognizer, RecognitionOptions, VoiceInput};
use fingpt::voice::synthesis::{CommandSynthesizer, Speaker};

#[tokio::main]
async fn main() {
    // Initialize logging (respects RUST_LOG / FINGPT_LOG)
    logger::init_logging("warn");

    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load config (falls back to defaults if no config.toml)
    let mut config = if let Some(ref path) = cli.config {
        Config::load_from(std::path::Path::new(path))?
    } else {
        Config::load()?
    };
    cli.apply_overrides(&mut config);

    if let Some(Commands::Models) = cli.command {
        return list_models(&config);
    }

    let provider = provider::resolve(&config);
    let dispatcher = build_dispatcher(&config, provider)?;

    match (&cli.command, cli.question_text()) {
        (None, Some(question)) => fingpt::cli::ask::run_ask(dispatcher, &question).await,
        _ => {
            let recognizer = Arc::new(CommandRecognizer::new(
                config.voice.recognizer_command.as_deref(),
            ));
            let options = RecognitionOptions {
                lang: config.voice.lang.clone(),
                ..Default::default()
            };
            let voice = VoiceInput::new(recognizer, options);
            fingpt::cli::chat::run_chat(dispatcher, voice).await
        }
    }
}

/// Capabilities are probed once here and injected.
fn build_dispatcher(
    config: &Config,
    provider: Option<Arc<dyn ModelProvider>>,
) -> anyhow::Result<QueryDispatcher> {
    let synthesizer = Arc::new(CommandSynthesizer::detect(
        config.voice.synthesizer_command.as_deref(),
    ));
    let speaker = Speaker::new(
        synthesizer,
        &config.voice.lang,
        config.voice.rate,
        config.voice.pitch,
    );
    if config.voice.tts_enabled && !speaker.capability().is_available() {
        tracing::warn!("Text-to-speech not supported on this system.");
    }
    Ok(QueryDispatcher::from_config(config, provider)?.with_speaker(speaker))
}

fn list_models(config: &Config) -> anyhow::Result<()> {
    let provider = GoogleProvider::new(String::new());
    println!("{} models:", provider.name());
    for m in provider.models() {
        let marker = if m.id == config.model.id { " *" } else { "" };
        println!(
            "  {}/{} ({}, {} ctx){}",
            provider.id(),
            m.id,
            m.name,
            m.context_window,
            marker
        );
    }
    Ok(())
}
