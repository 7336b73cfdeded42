// Application state module
// Runtime state derived from the loaded configuration

use std::path::PathBuf;

use super::types::Config;

/// Application state shared by every connection
pub struct AppState {
    pub config: Config,
    /// Canonicalized root directory, the boundary for path containment checks
    pub root: PathBuf,
}

impl AppState {
    /// Build the runtime state from a loaded configuration.
    ///
    /// Canonicalizes `files.root_dir` once at startup so per-request
    /// containment checks compare against a stable absolute path. Fails if
    /// the root directory does not exist.
    pub fn new(config: Config) -> std::io::Result<Self> {
        let root = PathBuf::from(&config.files.root_dir).canonicalize()?;
        Ok(Self { config, root })
    }
}
