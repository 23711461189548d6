// src/lib.rs — Library root for FinGPT

pub mod cli;
pub mod core;
pub mod infra;
pub mod provider;
pub mod util;
pub mod voice;
