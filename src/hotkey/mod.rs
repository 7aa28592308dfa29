//! Global push-to-talk hotkey, backed by `rdev`.
//!
//! `rdev::listen()` is a blocking OS-level call that never returns while the
//! process is alive, so it runs on a dedicated OS thread owned by
//! [`HotkeyListener`].  Dropping the handle sets a stop flag and the callback
//! discards further events; the thread itself persists until process exit
//! (rdev has no shutdown API) but consumes no meaningful CPU while blocked.
//!
//! # Usage
//!
//! ```no_run
//! use tokio::sync::mpsc;
//! use dictate::hotkey::{HotkeyEvent, HotkeyListener, parse_key};
//!
//! let (tx, mut rx) = mpsc::channel(16);
//! let key = parse_key("F9").expect("unknown key");
//! let _listener = HotkeyListener::start(key, tx);
//!
//! // In the async loop:
//! // while let Some(ev) = rx.recv().await { ... }
//! ```

pub mod listener;

pub use listener::HotkeyListener;

// ---------------------------------------------------------------------------
// HotkeyEvent
// ---------------------------------------------------------------------------

/// Events emitted by the hotkey listener thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyEvent {
    /// The push-to-talk key went down.
    PushToTalkPressed,
    /// The push-to-talk key came back up.
    PushToTalkReleased,
}

// ---------------------------------------------------------------------------
// Platform default
// ---------------------------------------------------------------------------

/// Default push-to-talk key name for this platform.
///
/// F9 on Windows, Right Command on macOS, Right Alt elsewhere — keys that
/// sit under a finger without colliding with common shortcuts.
pub fn default_key_name() -> &'static str {
    #[cfg(target_os = "windows")]
    {
        "F9"
    }
    #[cfg(target_os = "macos")]
    {
        "RightCommand"
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        "RightAlt"
    }
}

// ---------------------------------------------------------------------------
// parse_key
// ---------------------------------------------------------------------------

/// Parse a key name from config into an [`rdev::Key`].
///
/// Accepts F1–F12, common named keys, modifier-side keys (e.g.
/// `"RightCommand"`, `"RightAlt"`), and single ASCII letters in either case.
/// Unknown names yield `None` so callers can fall back to the platform
/// default.
///
/// # Examples
///
/// ```
/// use dictate::hotkey::parse_key;
///
/// assert_eq!(parse_key("F9"),           Some(rdev::Key::F9));
/// assert_eq!(parse_key("RightCommand"), Some(rdev::Key::MetaRight));
/// assert_eq!(parse_key("a"),            Some(rdev::Key::KeyA));
/// assert_eq!(parse_key("xyz"),          None);
/// ```
pub fn parse_key(key_str: &str) -> Option<rdev::Key> {
    use rdev::Key;

    match key_str {
        // Function keys
        "F1" => Some(Key::F1),
        "F2" => Some(Key::F2),
        "F3" => Some(Key::F3),
        "F4" => Some(Key::F4),
        "F5" => Some(Key::F5),
        "F6" => Some(Key::F6),
        "F7" => Some(Key::F7),
        "F8" => Some(Key::F8),
        "F9" => Some(Key::F9),
        "F10" => Some(Key::F10),
        "F11" => Some(Key::F11),
        "F12" => Some(Key::F12),

        // Modifier-side keys — usable as push-to-talk without stealing a
        // character key
        "RightCommand" | "RightCmd" | "MetaRight" => Some(Key::MetaRight),
        "LeftCommand" | "LeftCmd" | "MetaLeft" => Some(Key::MetaLeft),
        "RightAlt" | "AltGr" => Some(Key::AltGr),
        "LeftAlt" | "Alt" => Some(Key::Alt),
        "RightControl" | "RightCtrl" => Some(Key::ControlRight),
        "LeftControl" | "LeftCtrl" => Some(Key::ControlLeft),
        "RightShift" => Some(Key::ShiftRight),
        "LeftShift" => Some(Key::ShiftLeft),

        // Navigation / control
        "Escape" | "Esc" => Some(Key::Escape),
        "Space" => Some(Key::Space),
        "Return" | "Enter" => Some(Key::Return),
        "Tab" => Some(Key::Tab),
        "Backspace" => Some(Key::Backspace),
        "Delete" | "Del" => Some(Key::Delete),
        "Home" => Some(Key::Home),
        "End" => Some(Key::End),
        "PageUp" => Some(Key::PageUp),
        "PageDown" => Some(Key::PageDown),
        "UpArrow" | "Up" => Some(Key::UpArrow),
        "DownArrow" | "Down" => Some(Key::DownArrow),
        "LeftArrow" | "Left" => Some(Key::LeftArrow),
        "RightArrow" | "Right" => Some(Key::RightArrow),

        // Lock / special
        "CapsLock" => Some(Key::CapsLock),
        "NumLock" => Some(Key::NumLock),
        "ScrollLock" => Some(Key::ScrollLock),
        "PrintScreen" => Some(Key::PrintScreen),
        "Pause" => Some(Key::Pause),

        // Single ASCII letters, either case
        s => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphabetic() => letter_key(c),
                _ => None,
            }
        }
    }
}

/// Map an ASCII letter to its `rdev::Key`.
fn letter_key(c: char) -> Option<rdev::Key> {
    use rdev::Key;

    Some(match c.to_ascii_lowercase() {
        'a' => Key::KeyA,
        'b' => Key::KeyB,
        'c' => Key::KeyC,
        'd' => Key::KeyD,
        'e' => Key::KeyE,
        'f' => Key::KeyF,
        'g' => Key::KeyG,
        'h' => Key::KeyH,
        'i' => Key::KeyI,
        'j' => Key::KeyJ,
        'k' => Key::KeyK,
        'l' => Key::KeyL,
        'm' => Key::KeyM,
        'n' => Key::KeyN,
        'o' => Key::KeyO,
        'p' => Key::KeyP,
        'q' => Key::KeyQ,
        'r' => Key::KeyR,
        's' => Key::KeyS,
        't' => Key::KeyT,
        'u' => Key::KeyU,
        'v' => Key::KeyV,
        'w' => Key::KeyW,
        'x' => Key::KeyX,
        'y' => Key::KeyY,
        'z' => Key::KeyZ,
        _ => return None,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
