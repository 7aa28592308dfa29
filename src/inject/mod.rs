//! Text injection — delivering a transcript to the focused application.
//!
//! # Overview
//!
//! The default path is clipboard paste, which handles arbitrary text
//! (punctuation, non-ASCII, any length) and leaves the user's clipboard as
//! it was:
//!
//! 1. **Save** the current clipboard content.
//! 2. **Set** the transcript into the clipboard.
//! 3. **Simulate** Ctrl+V (⌘V on macOS) against the focused window.
//! 4. **Restore** the saved clipboard content (best-effort).
//!
//! When pasting fails — no clipboard on a headless session, a target that
//! blocks synthetic paste — the injector falls back to typing the text as
//! keystrokes.  [`InjectMethod::Type`] selects typing outright.
//!
//! # Usage
//!
//! ```no_run
//! use dictate::inject::TextInjector;
//!
//! let injector = TextInjector::default();
//! injector.inject("dictated text ").expect("injection failed");
//! ```

pub mod clipboard;
pub mod keyboard;

pub use clipboard::{restore_clipboard, save_clipboard, set_clipboard};
pub use keyboard::{simulate_paste, type_text};

use std::time::Duration;

use thiserror::Error;

use crate::config::{InjectConfig, InjectMethod};

// ---------------------------------------------------------------------------
// InjectError
// ---------------------------------------------------------------------------

/// Errors that can surface during text injection.
#[derive(Debug, Error)]
pub enum InjectError {
    /// Could not open or read the system clipboard.
    #[error("cannot access clipboard: {0}")]
    ClipboardAccess(String),

    /// Could not write text to the system clipboard.
    #[error("cannot set clipboard text: {0}")]
    ClipboardSet(String),

    /// Could not simulate a key press/release event.
    #[error("cannot simulate key press: {0}")]
    KeySimulation(String),

    /// Could not type text as synthetic keystrokes.
    #[error("cannot type text: {0}")]
    TextEntry(String),
}

// ---------------------------------------------------------------------------
// TextInjector
// ---------------------------------------------------------------------------

/// Configurable transcript injector.
///
/// Holds the delivery method and the inter-step delays.  Build one from
/// config with [`TextInjector::from_config`]; `Default` gives the standard
/// delays with clipboard paste.
#[derive(Debug, Clone)]
pub struct TextInjector {
    /// Delivery mechanism; paste falls back to typing on failure.
    pub method: InjectMethod,
    /// Whether to put the saved clipboard content back after pasting.
    pub restore_clipboard: bool,
    /// Wait before injecting so the target window keeps focus after the
    /// hotkey release.
    pub focus_delay_ms: u64,
    /// Wait between setting the clipboard and simulating paste, letting the
    /// clipboard manager flush.
    pub paste_delay_ms: u64,
    /// Wait after simulating paste before restoring the clipboard, letting
    /// the target finish reading it.
    pub restore_delay_ms: u64,
}

impl Default for TextInjector {
    fn default() -> Self {
        Self::from_config(&InjectConfig::default())
    }
}

impl TextInjector {
    /// Build an injector from the `[inject]` config section.
    pub fn from_config(config: &InjectConfig) -> Self {
        Self {
            method: config.method,
            restore_clipboard: config.restore_clipboard,
            focus_delay_ms: config.focus_delay_ms,
            paste_delay_ms: config.paste_delay_ms,
            restore_delay_ms: config.restore_delay_ms,
        }
    }

    /// Deliver `text` to the focused application.
    ///
    /// With [`InjectMethod::Paste`], a paste failure at any step is logged
    /// and the text is retried as synthetic typing before giving up.
    ///
    /// # Errors
    ///
    /// Returns the typing error when both delivery paths fail (or the
    /// typing error alone under [`InjectMethod::Type`]).
    pub fn inject(&self, text: &str) -> Result<(), InjectError> {
        std::thread::sleep(Duration::from_millis(self.focus_delay_ms));

        match self.method {
            InjectMethod::Paste => match self.paste(text) {
                Ok(()) => Ok(()),
                Err(e) => {
                    log::warn!("paste failed ({e}), falling back to typing");
                    type_text(text)
                }
            },
            InjectMethod::Type => type_text(text),
        }
    }

    /// The clipboard-paste flow: save → set → paste → restore.
    fn paste(&self, text: &str) -> Result<(), InjectError> {
        let saved = if self.restore_clipboard {
            save_clipboard()?
        } else {
            None
        };

        set_clipboard(text)?;
        std::thread::sleep(Duration::from_millis(self.paste_delay_ms));

        simulate_paste()?;

        if self.restore_clipboard {
            std::thread::sleep(Duration::from_millis(self.restore_delay_ms));
            // Best-effort: the text is already delivered, a restore failure
            // only costs the old clipboard content.
            if let Err(e) = restore_clipboard(saved) {
                log::warn!("clipboard restore failed: {e}");
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_inject_config_default() {
        let injector = TextInjector::default();
        let config = InjectConfig::default();

        assert_eq!(injector.method, config.method);
        assert_eq!(injector.restore_clipboard, config.restore_clipboard);
        assert_eq!(injector.focus_delay_ms, config.focus_delay_ms);
        assert_eq!(injector.paste_delay_ms, config.paste_delay_ms);
        assert_eq!(injector.restore_delay_ms, config.restore_delay_ms);
    }

    #[test]
    fn from_config_carries_overrides() {
        let config = InjectConfig {
            method: InjectMethod::Type,
            restore_clipboard: false,
            focus_delay_ms: 0,
            paste_delay_ms: 5,
            restore_delay_ms: 10,
            ..InjectConfig::default()
        };

        let injector = TextInjector::from_config(&config);
        assert_eq!(injector.method, InjectMethod::Type);
        assert!(!injector.restore_clipboard);
        assert_eq!(injector.focus_delay_ms, 0);
        assert_eq!(injector.paste_delay_ms, 5);
    }

    #[test]
    fn restore_none_is_a_noop() {
        // No clipboard required — the None path returns before touching it.
        assert!(restore_clipboard(None).is_ok());
    }

    #[test]
    fn inject_error_display() {
        let e = InjectError::ClipboardSet("denied".into());
        assert!(e.to_string().contains("denied"));
        let e = InjectError::TextEntry("no display".into());
        assert!(e.to_string().contains("no display"));
    }
}
