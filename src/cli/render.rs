// src/cli/render.rs — Terminal rendering of screens and messages
//
// Formatting functions return plain strings; the print_* wrappers add colour.

use crossterm::style::Stylize;
use pulldown_cmark::{Event, Parser, Tag, TagEnd};

use crate::core::types::{Message, Role, Session};

pub const DISCLAIMER: &str = "This chatbot may make mistakes. Please cross-check important information before making financial decisions.";

/// Topic cards on the landing screen.
pub const CARDS: &[&str] = &[
    "Money Management",
    "Insights and Investments",
    "Banking Services",
    "Learn about Risks and Fraud",
];

pub fn role_label(role: Role) -> &'static str {
    match role {
        Role::User => "User",
        Role::Ai => "FinGPT",
    }
}

/// Flatten markdown into readable terminal text.
pub fn render_markdown(text: &str) -> String {
    let mut out = String::new();
    let mut lists: Vec<Option<u64>> = Vec::new();
    let mut link: Option<String> = None;

    for event in Parser::new(text) {
        match event {
            Event::Start(Tag::List(start)) => {
                ensure_newline(&mut out);
                lists.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                lists.pop();
                if lists.is_empty() {
                    out.push('\n');
                }
            }
            Event::Start(Tag::Item) => {
                ensure_newline(&mut out);
                out.push_str(&"  ".repeat(lists.len().saturating_sub(1)));
                match lists.last_mut() {
                    Some(Some(n)) => {
                        out.push_str(&format!("{}. ", n));
                        *n += 1;
                    }
                    _ => out.push_str("- "),
                }
            }
            Event::End(TagEnd::Item) => ensure_newline(&mut out),
            Event::End(TagEnd::Paragraph) => {
                ensure_newline(&mut out);
                if lists.is_empty() {
                    out.push('\n');
                }
            }
            Event::End(TagEnd::Heading(_)) | Event::End(TagEnd::CodeBlock) => {
                ensure_newline(&mut out);
                out.push('\n');
            }
            Event::Start(Tag::Link { dest_url, .. }) => link = Some(dest_url.to_string()),
            Event::End(TagEnd::Link) => {
                if let Some(url) = link.take() {
                    if !out.ends_with(url.as_str()) {
                        out.push_str(&format!(" ({})", url));
                    }
                }
            }
            Event::Text(t) | Event::Code(t) => out.push_str(&t),
            Event::SoftBreak | Event::HardBreak => out.push('\n'),
            Event::Rule => out.push_str("---\n\n"),
            _ => {}
        }
    }

    out.trim_end().to_string()
}

fn ensure_newline(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

/// Message text as shown under its label. Assistant replies are markdown.
pub fn message_body(message: &Message) -> String {
    match message.role {
        Role::User => message.content.clone(),
        Role::Ai => render_markdown(&message.content),
    }
}

/// Sidebar entries, one per session, in history order.
pub fn history_lines(history: &[Session], active: Option<usize>) -> Vec<String> {
    history
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let marker = if active == Some(i) { " *" } else { "" };
            format!("{:>2}. {}...{}", i + 1, s.first_line, marker)
        })
        .collect()
}

pub fn print_message(message: &Message) {
    let label = role_label(message.role);
    match message.role {
        Role::User => println!("{}", label.grey()),
        Role::Ai => println!("{}", label.blue().bold()),
    }
    println!("{}", message_body(message));
    if let Some(ref source) = message.source {
        println!("{}", format!("Source: {}", source).blue());
    }
    println!();
}

pub fn print_session(messages: &[Message]) {
    if messages.is_empty() {
        println!("No messages yet");
        return;
    }
    for message in messages {
        print_message(message);
    }
}

pub fn print_landing() {
    println!("\n  {}{}\n", "Fin".bold(), "GPT".blue().bold());
    for (i, card) in CARDS.iter().enumerate() {
        println!("  [{}] {}", i + 1, card);
    }
    println!();
}

pub fn print_history(history: &[Session], active: Option<usize>) {
    eprintln!("{}", "History".bold());
    if history.is_empty() {
        eprintln!("  No conversation yet");
        return;
    }
    for (line, session) in history_lines(history, active).iter().zip(history) {
        eprintln!("  {}  {}", line, session.started_at.format("%H:%M").to_string().grey());
    }
}

pub fn print_disclaimer() {
    eprintln!("{}", DISCLAIMER.grey());
}

pub fn print_notice(text: &str) {
    eprintln!("{}", text.yellow());
}
