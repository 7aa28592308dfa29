//! Platform application paths via the `dirs` crate.
//!
//! Config dir (settings):
//!   Windows: %APPDATA%\dictate\
//!   macOS:   ~/Library/Application Support/dictate/
//!   Linux:   ~/.config/dictate/
//!
//! Data dir (models, session dumps):
//!   Windows: %LOCALAPPDATA%\dictate\
//!   macOS:   ~/Library/Application Support/dictate/
//!   Linux:   ~/.local/share/dictate/

use std::path::PathBuf;

/// Resolved application directories and files.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory holding `settings.toml`.
    pub config_dir: PathBuf,
    /// Full path to `settings.toml`.
    pub settings_file: PathBuf,
    /// Directory for GGML model files.
    pub models_dir: PathBuf,
    /// Directory for debug session WAV dumps.
    pub recordings_dir: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "dictate";

    /// Resolve all paths, falling back to the current directory when the
    /// platform cannot provide a standard location.
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let settings_file = config_dir.join("settings.toml");
        let models_dir = data_dir.join("models");
        let recordings_dir = data_dir.join("recordings");

        Self {
            config_dir,
            settings_file,
            models_dir,
            recordings_dir,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}
