// src/core/types.rs — Conversation data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::util::first_chars;

/// Maximum length, in characters, of a session label.
pub const FIRST_LINE_LEN: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Ai,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            source: None,
        }
    }

    pub fn ai(content: impl Into<String>) -> Self {
        Self {
            role: Role::Ai,
            content: content.into(),
            source: None,
        }
    }

    /// Assistant message with a citation. An empty source is stored as `None`.
    pub fn ai_with_source(content: impl Into<String>, source: impl Into<String>) -> Self {
        let source = source.into();
        Self {
            role: Role::Ai,
            content: content.into(),
            source: if source.is_empty() { None } else { Some(source) },
        }
    }
}

/// One conversation thread in history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub first_line: String,
    pub session: Vec<Message>,
    pub started_at: DateTime<Utc>,
}

impl Session {
    /// Start an empty session labelled from its opening prompt.
    pub fn new(opening_prompt: &str) -> Self {
        Self {
            first_line: first_line_of(opening_prompt),
            session: Vec::new(),
            started_at: Utc::now(),
        }
    }
}

/// First `FIRST_LINE_LEN` characters of the first line of `prompt`.
pub fn first_line_of(prompt: &str) -> String {
    let line = prompt.split('\n').next().unwrap_or("");
    first_chars(line, FIRST_LINE_LEN).to_string()
}

/// Which view the client is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Landing,
    Conversation,
}
