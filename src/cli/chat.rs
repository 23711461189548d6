// src/cli/chat.rs — Interactive REPL

use crate::core::dispatcher::QueryDispatcher;
use crate::core::types::Screen;
use crate::infra::errors::FinGptError;
use crate::voice::recognition::{ListenOutcome, VoiceInput};

use super::render;

/// Run the interactive chat REPL.
pub async fn run_chat(
    mut dispatcher: QueryDispatcher,
    voice: VoiceInput,
) -> anyhow::Result<()> {
    eprintln!(
        "fingpt v{} | google/{} | gate: {} | voice: {}",
        env!("CARGO_PKG_VERSION"),
        dispatcher.model(),
        if dispatcher.gating() { "on" } else { "off" },
        if dispatcher.tts_enabled() { "on" } else { "off" },
    );
    if !dispatcher.is_configured() {
        render::print_notice("GOOGLE_API_KEY is not set; responses are disabled.");
    }
    render::print_landing();
    render::print_disclaimer();
    eprintln!("Type a question, or /help for commands.\n");

    while let Some(input) = read_input() {
        let trimmed = input.trim();

        // Handle quit
        if trimmed == "quit" || trimmed == "exit" || trimmed == "/quit" {
            break;
        }

        // Handle slash commands
        if trimmed.starts_with('/') {
            handle_slash_command(trimmed, &mut dispatcher, &voice).await;
            continue;
        }

        // Plain Enter sends the draft (filled by /speak)
        let result = if trimmed.is_empty() {
            if !dispatcher.store().draft().is_empty() {
                eprintln!("FinGPT is thinking...");
            }
            dispatcher.submit_draft().await
        } else {
            eprintln!("FinGPT is thinking...");
            dispatcher.submit(trimmed).await
        };

        match result {
            Ok(submission) => render::print_message(submission.message()),
            Err(FinGptError::EmptyPrompt) => render::print_notice("Please enter a prompt"),
            Err(e) => eprintln!("[error] {}", e),
        }
    }

    eprintln!(
        "\nSession total: {} conversation(s)",
        dispatcher.store().history().len()
    );
    Ok(())
}

fn read_input() -> Option<String> {
    use std::io::{self, BufRead, Write};

    print!("> ");
    io::stdout().flush().ok();

    let stdin = io::stdin();
    let mut line = String::new();
    match stdin.lock().read_line(&mut line) {
        Ok(0) => None, // EOF
        Ok(_) => Some(line),
        Err(_) => None,
    }
}

async fn handle_slash_command(input: &str, dispatcher: &mut QueryDispatcher, voice: &VoiceInput) {
    let parts: Vec<&str> = input.splitn(2, ' ').collect();
    let cmd = parts[0];
    let arg = parts.get(1).map(|s| s.trim()).unwrap_or("");

    match cmd {
        "/new" => {
            dispatcher.store_mut().new_chat();
            render::print_landing();
        }

        "/history" => {
            let store = dispatcher.store();
            render::print_history(store.history(), store.active_index());
            if !store.history().is_empty() {
                eprintln!("  Usage: /open <n>");
            }
        }

        "/open" => {
            let index = if arg.is_empty() {
                pick_session(dispatcher)
            } else {
                match arg.parse::<usize>() {
                    Ok(n) if n > 0 => Some(n - 1),
                    _ => {
                        eprintln!("  Invalid session number: {}", arg);
                        None
                    }
                }
            };
            if let Some(index) = index {
                match dispatcher.store_mut().select(index) {
                    Ok(()) => render::print_session(dispatcher.store().current_session()),
                    Err(e) => eprintln!("  {}", e),
                }
            }
        }

        "/card" => match arg.parse::<usize>() {
            Ok(n) if (1..=render::CARDS.len()).contains(&n) => {
                dispatcher.store_mut().show(Screen::Conversation);
                eprintln!("  {}", render::CARDS[n - 1]);
                render::print_session(dispatcher.store().current_session());
            }
            _ => eprintln!("  Usage: /card <1-{}>", render::CARDS.len()),
        },

        "/speak" => {
            if voice.capability().is_available() {
                eprintln!("  Listening...");
            }
            let store = dispatcher.store_mut();
            let outcome = voice
                .start_listening(|transcript| store.set_draft(transcript))
                .await;
            match outcome {
                ListenOutcome::Heard => {
                    eprintln!("  Heard: {}", dispatcher.store().draft());
                    eprintln!("  Press Enter to send it, or type a new question.");
                }
                ListenOutcome::NoResult => eprintln!("  Nothing heard."),
                ListenOutcome::Failed => eprintln!("  Speech recognition failed."),
                ListenOutcome::Unsupported => {
                    render::print_notice("Speech recognition not supported on this system.")
                }
                ListenOutcome::AlreadyListening => {}
            }
        }

        "/tts" => {
            let on = dispatcher.toggle_tts();
            eprintln!("  Voice {}", if on { "on" } else { "off" });
        }

        "/model" => {
            if arg.is_empty() {
                eprintln!("  Current model: {}", dispatcher.model());
                if let Some(provider) = dispatcher.provider() {
                    for m in provider.models() {
                        let marker = if m.id == dispatcher.model() { " *" } else { "" };
                        eprintln!("    {}{}", m.id, marker);
                    }
                }
                eprintln!("  Usage: /model <model>");
            } else {
                dispatcher.set_model(arg);
                eprintln!("  Model switched to {}", arg);
            }
        }

        "/status" => {
            let store = dispatcher.store();
            eprintln!("  Model: google/{}", dispatcher.model());
            eprintln!(
                "  API key: {}",
                if dispatcher.is_configured() { "set" } else { "missing" }
            );
            eprintln!(
                "  Topic gate: {} | Voice out: {} | Voice in: {}",
                if dispatcher.gating() { "on" } else { "off" },
                if dispatcher.tts_enabled() { "on" } else { "off" },
                if voice.capability().is_available() { "available" } else { "unavailable" },
            );
            eprintln!(
                "  Conversations: {} | Messages in view: {}",
                store.history().len(),
                store.current_session().len()
            );
        }

        "/help" => {
            eprintln!("Slash commands:");
            eprintln!("  /new               Start a new chat");
            eprintln!("  /history           List conversations");
            eprintln!("  /open [n]          Reopen a conversation");
            eprintln!("  /card <n>          Open a topic card");
            eprintln!("  /speak             Dictate a question (Enter sends it)");
            eprintln!("  /tts               Toggle reading answers aloud");
            eprintln!("  /model [model]     Show or switch the model");
            eprintln!("  /status            Show session status & settings");
            eprintln!("  /help              Show this help");
            eprintln!("  /quit, quit, exit  End session");
        }

        _ => {
            eprintln!("Unknown command: {}. Type /help for commands.", cmd);
        }
    }
}

/// Interactive picker over history. `None` when empty or cancelled.
fn pick_session(dispatcher: &QueryDispatcher) -> Option<usize> {
    let history = dispatcher.store().history();
    if history.is_empty() {
        eprintln!("  No conversation yet");
        return None;
    }
    let labels = render::history_lines(history, dispatcher.store().active_index());
    inquire::Select::new("Open conversation:", labels.clone())
        .prompt()
        .ok()
        .and_then(|choice| labels.iter().position(|l| *l == choice))
}
