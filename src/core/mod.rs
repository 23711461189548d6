// src/core/mod.rs — Conversation core

pub mod classifier;
pub mod dispatcher;
pub mod prompt;
pub mod store;
pub mod types;
