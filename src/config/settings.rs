//! Settings structs, defaults and TOML persistence.
//!
//! Every struct derives `Serialize`, `Deserialize`, `Default` and `Clone` so
//! the whole tree round-trips through `settings.toml` and can be cloned
//! across threads.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// InjectMethod
// ---------------------------------------------------------------------------

/// How the transcript is delivered to the focused application.
///
/// | Variant | Mechanism                                   |
/// |---------|---------------------------------------------|
/// | Paste   | clipboard set + Ctrl+V / ⌘V, typing fallback |
/// | Type    | synthetic keystrokes only                   |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InjectMethod {
    /// Clipboard paste — fast, handles any text, preserves the clipboard.
    Paste,
    /// Synthetic typing — slower, but works in apps that block paste.
    Type,
}

impl Default for InjectMethod {
    fn default() -> Self {
        Self::Paste
    }
}

// ---------------------------------------------------------------------------
// SttConfig
// ---------------------------------------------------------------------------

/// Whisper engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SttConfig {
    /// Model id from the registry (e.g. `"large-v3-turbo"`), a GGML file
    /// stem, or a `.bin` file name under the models directory.
    pub model: String,
    /// ISO-639-1 speech language, or `"auto"` for Whisper's detection.
    pub language: String,
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            model: "large-v3-turbo".into(),
            language: "auto".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// AudioConfig
// ---------------------------------------------------------------------------

/// Capture and session-length settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Input device name as reported by the audio host; `None` = system
    /// default.
    pub device: Option<String>,
    /// Sessions shorter than this (seconds) are discarded without
    /// transcription.
    pub min_session_secs: f32,
    /// Maximum session length in seconds; older audio is dropped beyond it.
    pub max_session_secs: f32,
    /// Trim leading/trailing silence before transcription.
    pub trim_silence: bool,
    /// RMS amplitude below which a 30 ms frame counts as silence.
    pub silence_rms_threshold: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            device: None,
            min_session_secs: 0.5,
            max_session_secs: 60.0,
            trim_silence: false,
            silence_rms_threshold: 0.01,
        }
    }
}

// ---------------------------------------------------------------------------
// HotkeyConfig
// ---------------------------------------------------------------------------

/// Push-to-talk key binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotkeyConfig {
    /// Key name accepted by [`crate::hotkey::parse_key`].
    pub push_to_talk_key: String,
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            push_to_talk_key: crate::hotkey::default_key_name().into(),
        }
    }
}

// ---------------------------------------------------------------------------
// InjectConfig
// ---------------------------------------------------------------------------

/// Text delivery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InjectConfig {
    /// Delivery mechanism.
    pub method: InjectMethod,
    /// Append a single space after the transcript so consecutive dictations
    /// don't run together.
    pub append_trailing_space: bool,
    /// Put the previous clipboard content back after pasting.
    pub restore_clipboard: bool,
    /// Milliseconds to wait before injecting, letting the target window keep
    /// focus after the key release.
    pub focus_delay_ms: u64,
    /// Milliseconds between setting the clipboard and simulating paste.
    pub paste_delay_ms: u64,
    /// Milliseconds between simulating paste and restoring the clipboard.
    pub restore_delay_ms: u64,
}

impl Default for InjectConfig {
    fn default() -> Self {
        Self {
            method: InjectMethod::default(),
            append_trailing_space: true,
            restore_clipboard: true,
            focus_delay_ms: 100,
            paste_delay_ms: 50,
            restore_delay_ms: 100,
        }
    }
}

// ---------------------------------------------------------------------------
// RecordingConfig
// ---------------------------------------------------------------------------

/// Debug WAV dump settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingConfig {
    /// Write each session to the recordings directory as a WAV file.
    pub save_sessions: bool,
    /// Delete dumps older than this many days on startup; `0` disables.
    pub retention_days: u32,
    /// Keep at most this many dumps; `0` disables.
    pub max_count: usize,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            save_sessions: false,
            retention_days: 7,
            max_count: 50,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use dictate::config::AppConfig;
///
/// // Load (returns defaults when the file is missing)
/// let config = AppConfig::load().unwrap();
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Whisper engine settings.
    pub stt: SttConfig,
    /// Capture and session-length settings.
    pub audio: AudioConfig,
    /// Push-to-talk key binding.
    pub hotkey: HotkeyConfig,
    /// Text delivery settings.
    pub inject: InjectConfig,
    /// Debug WAV dump settings.
    pub recording: RecordingConfig,
}

impl AppConfig {
    /// Load configuration from the platform `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet,
    /// so first runs need no special-casing.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save to the platform `settings.toml`, creating parent directories as
    /// needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trip_default_config() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(original.stt.model, loaded.stt.model);
        assert_eq!(original.stt.language, loaded.stt.language);
        assert_eq!(original.audio.device, loaded.audio.device);
        assert_eq!(original.audio.min_session_secs, loaded.audio.min_session_secs);
        assert_eq!(original.audio.max_session_secs, loaded.audio.max_session_secs);
        assert_eq!(
            original.hotkey.push_to_talk_key,
            loaded.hotkey.push_to_talk_key
        );
        assert_eq!(original.inject.method, loaded.inject.method);
        assert_eq!(original.inject.focus_delay_ms, loaded.inject.focus_delay_ms);
        assert_eq!(original.recording.save_sessions, loaded.recording.save_sessions);
        assert_eq!(original.recording.retention_days, loaded.recording.retention_days);
    }

    #[test]
    fn load_missing_file_returns_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        let default = AppConfig::default();

        assert_eq!(config.stt.model, default.stt.model);
        assert_eq!(config.audio.max_session_secs, default.audio.max_session_secs);
        assert_eq!(
            config.hotkey.push_to_talk_key,
            default.hotkey.push_to_talk_key
        );
    }

    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert_eq!(cfg.stt.model, "large-v3-turbo");
        assert_eq!(cfg.stt.language, "auto");
        assert!(cfg.audio.device.is_none());
        assert_eq!(cfg.audio.min_session_secs, 0.5);
        assert_eq!(cfg.audio.max_session_secs, 60.0);
        assert!(!cfg.audio.trim_silence);
        assert_eq!(cfg.inject.method, InjectMethod::Paste);
        assert!(cfg.inject.append_trailing_space);
        assert!(cfg.inject.restore_clipboard);
        assert_eq!(cfg.inject.focus_delay_ms, 100);
        assert!(!cfg.recording.save_sessions);
    }

    #[test]
    fn default_hotkey_is_parseable() {
        let cfg = AppConfig::default();
        assert!(crate::hotkey::parse_key(&cfg.hotkey.push_to_talk_key).is_some());
    }

    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.stt.model = "base".into();
        cfg.stt.language = "en".into();
        cfg.audio.device = Some("USB Microphone".into());
        cfg.audio.trim_silence = true;
        cfg.hotkey.push_to_talk_key = "F10".into();
        cfg.inject.method = InjectMethod::Type;
        cfg.inject.append_trailing_space = false;
        cfg.recording.save_sessions = true;
        cfg.recording.max_count = 5;

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.stt.model, "base");
        assert_eq!(loaded.stt.language, "en");
        assert_eq!(loaded.audio.device.as_deref(), Some("USB Microphone"));
        assert!(loaded.audio.trim_silence);
        assert_eq!(loaded.hotkey.push_to_talk_key, "F10");
        assert_eq!(loaded.inject.method, InjectMethod::Type);
        assert!(!loaded.inject.append_trailing_space);
        assert!(loaded.recording.save_sessions);
        assert_eq!(loaded.recording.max_count, 5);
    }
}
