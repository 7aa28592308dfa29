//! Synthetic keyboard input via `enigo`.
//!
//! [`simulate_paste`] sends the OS paste shortcut to the focused window:
//!
//! | Platform | Shortcut |
//! |----------|----------|
//! | macOS    | ⌘V (Meta + V) |
//! | Windows  | Ctrl+V |
//! | Linux    | Ctrl+V |
//!
//! [`type_text`] types a string character by character — the fallback when
//! pasting is unavailable or blocked by the target application.

use enigo::{Direction, Enigo, Key, Keyboard, Settings};

use super::InjectError;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Simulate the system paste shortcut in the currently focused window.
///
/// A fresh [`Enigo`] instance per call — `Enigo` is not `Send` and is cheap
/// to construct.
///
/// # Errors
///
/// [`InjectError::KeySimulation`] when the enigo backend cannot be
/// initialised or a key event fails to deliver.
pub fn simulate_paste() -> Result<(), InjectError> {
    let mut enigo = new_enigo()?;

    #[cfg(target_os = "macos")]
    let modifier = Key::Meta;
    #[cfg(not(target_os = "macos"))]
    let modifier = Key::Control;

    enigo
        .key(modifier, Direction::Press)
        .map_err(|e| InjectError::KeySimulation(e.to_string()))?;
    enigo
        .key(Key::Unicode('v'), Direction::Click)
        .map_err(|e| InjectError::KeySimulation(e.to_string()))?;
    enigo
        .key(modifier, Direction::Release)
        .map_err(|e| InjectError::KeySimulation(e.to_string()))
}

/// Type `text` into the focused window as synthetic keystrokes.
///
/// # Errors
///
/// [`InjectError::TextEntry`] when the backend rejects the input.
pub fn type_text(text: &str) -> Result<(), InjectError> {
    let mut enigo = new_enigo()?;
    enigo
        .text(text)
        .map_err(|e| InjectError::TextEntry(e.to_string()))
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn new_enigo() -> Result<Enigo, InjectError> {
    Enigo::new(&Settings::default()).map_err(|e| InjectError::KeySimulation(e.to_string()))
}
