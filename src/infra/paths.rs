// src/infra/paths.rs — Config path management
//
// FINGPT_HOME overrides everything. Otherwise config lives in ~/.fingpt/.

use std::path::PathBuf;

/// Returns the FINGPT_HOME override, if set.
fn fingpt_home() -> Option<PathBuf> {
    std::env::var_os("FINGPT_HOME").map(PathBuf::from)
}

/// Configuration directory: $FINGPT_HOME/ or ~/.fingpt/
pub fn config_dir() -> Option<PathBuf> {
    if let Some(home) = fingpt_home() {
        return Some(home);
    }
    dirs_home().map(|home| home.join(".fingpt"))
}

/// Home directory, if the platform can name one.
pub fn dirs_home() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

/// Config file path
pub fn config_file_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}
