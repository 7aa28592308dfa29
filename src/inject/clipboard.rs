//! Clipboard save / set / restore via `arboard`.
//!
//! Each function opens a short-lived [`arboard::Clipboard`] handle instead of
//! sharing one — `arboard::Clipboard` is not `Send` on every platform and a
//! handle is cheap to create.

use arboard::Clipboard;

use super::InjectError;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Capture the current plain-text clipboard content.
///
/// Returns `Ok(None)` when the clipboard is empty or holds non-text data
/// (an image, say) — neither is an error.
///
/// # Errors
///
/// [`InjectError::ClipboardAccess`] when the OS clipboard cannot be opened.
pub fn save_clipboard() -> Result<Option<String>, InjectError> {
    let mut clipboard = open_clipboard()?;
    // get_text errs on empty or non-text content — both map to None
    Ok(clipboard.get_text().ok())
}

/// Replace the clipboard content with `text`.
///
/// # Errors
///
/// [`InjectError::ClipboardAccess`] when the clipboard cannot be opened,
/// [`InjectError::ClipboardSet`] when writing fails.
pub fn set_clipboard(text: &str) -> Result<(), InjectError> {
    let mut clipboard = open_clipboard()?;
    clipboard
        .set_text(text)
        .map_err(|e| InjectError::ClipboardSet(e.to_string()))
}

/// Put a previously saved value back on the clipboard.
///
/// `None` means nothing was saved (the clipboard held no text before the
/// injection); the clipboard is left untouched.
///
/// # Errors
///
/// Propagates errors from [`set_clipboard`].
pub fn restore_clipboard(saved: Option<String>) -> Result<(), InjectError> {
    match saved {
        Some(text) => set_clipboard(&text),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn open_clipboard() -> Result<Clipboard, InjectError> {
    Clipboard::new().map_err(|e| InjectError::ClipboardAccess(e.to_string()))
}
