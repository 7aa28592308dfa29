//! Push-to-talk dictation: hold a hotkey, speak, release — the transcript is
//! typed into whichever application currently has focus.
//!
//! # Pipeline
//!
//! ```text
//! Microphone → cpal callback → AudioChunk (mpsc) → downmix_to_mono
//!           → resample_to_16k → RingBuffer (while the key is held)
//!
//! Hotkey release
//!           → drain RingBuffer → [trim silence] → SttEngine::transcribe
//!           → TextInjector (clipboard paste, typing fallback)
//! ```
//!
//! The crate is split by subsystem: [`audio`] (capture and sample
//! conversion), [`hotkey`] (global key listener), [`stt`] (Whisper engine),
//! [`inject`] (clipboard / synthetic-keystroke delivery), [`pipeline`] (the
//! session state machine that ties them together) and [`config`] (TOML
//! settings).

pub mod audio;
pub mod config;
pub mod hotkey;
pub mod inject;
pub mod pipeline;
pub mod stt;
