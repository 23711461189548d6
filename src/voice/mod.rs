// src/voice/mod.rs — Speech capabilities behind injectable traits

pub mod recognition;
pub mod synthesis;

/// Whether a platform capability can be used. Probed once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Available,
    Unavailable,
}

impl Capability {
    pub fn is_available(self) -> bool {
        self == Capability::Available
    }
}

impl From<bool> for Capability {
    fn from(present: bool) -> Self {
        if present {
            Capability::Available
        } else {
            Capability::Unavailable
        }
    }
}

/// Split a configured command line into program and arguments.
pub(crate) fn split_command(command: &str) -> Option<(String, Vec<String>)> {
    let mut words = command.split_whitespace().map(str::to_string);
    let program = words.next()?;
    Some((program, words.collect()))
}
