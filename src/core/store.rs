// src/core/store.rs — Conversation store
//
// Owns history, the active session, the current screen and the input draft.
// While a session is live, the last history entry mirrors it. A session
// reopened from history mirrors back onto its own entry instead.

use super::types::{Message, Screen, Session};
use crate::infra::errors::FinGptError;

#[derive(Debug, Default)]
pub struct ConversationStore {
    history: Vec<Session>,
    current_session: Vec<Message>,
    /// History index the active session belongs to.
    active: Option<usize>,
    screen: Screen,
    draft: String,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &[Session] {
        &self.history
    }

    pub fn current_session(&self) -> &[Message] {
        &self.current_session
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn clear_draft(&mut self) {
        self.draft.clear();
    }

    pub fn show(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn is_session_empty(&self) -> bool {
        self.current_session.is_empty()
    }

    /// Append a new history entry labelled from `opening_prompt`.
    pub fn begin_session(&mut self, opening_prompt: &str) {
        self.history.push(Session::new(opening_prompt));
        self.active = Some(self.history.len() - 1);
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    /// Replace the message list of the last history entry.
    pub fn update_last_session(&mut self, messages: Vec<Message>) -> Result<(), FinGptError> {
        let last = self
            .history
            .last_mut()
            .ok_or(FinGptError::NoActiveSession)?;
        last.session = messages;
        Ok(())
    }

    /// Append to the active session and mirror it onto its history entry.
    pub fn append_and_mirror(&mut self, message: Message) -> Result<(), FinGptError> {
        self.current_session.push(message);
        let snapshot = self.current_session.clone();
        match self.active {
            Some(index) if index + 1 < self.history.len() => {
                self.history[index].session = snapshot;
                Ok(())
            }
            _ => self.update_last_session(snapshot),
        }
    }

    /// View a past session. History is left untouched.
    pub fn select(&mut self, index: usize) -> Result<(), FinGptError> {
        let entry = self
            .history
            .get(index)
            .ok_or(FinGptError::SessionNotFound { index })?;
        self.current_session = entry.session.clone();
        self.active = Some(index);
        self.screen = Screen::Conversation;
        Ok(())
    }

    /// Clear the active session and draft, back to the landing screen.
    pub fn new_chat(&mut self) {
        self.current_session.clear();
        self.active = None;
        self.draft.clear();
        self.screen = Screen::Landing;
    }
}
