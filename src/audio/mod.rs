//! Audio subsystem — capture, format conversion, session buffering.
//!
//! # Pipeline
//!
//! ```text
//! Microphone → cpal callback → AudioChunk (mpsc) → downmix_to_mono
//!           → resample_to_16k → RingBuffer → SilenceTrimmer → STT
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::mpsc;
//! use dictate::audio::{AudioCapture, AudioChunk};
//!
//! let (tx, rx) = mpsc::channel::<AudioChunk>();
//! let capture = AudioCapture::new(None).unwrap();
//! let _handle = capture.start(tx).unwrap();
//!
//! while let Ok(chunk) = rx.recv() {
//!     println!("{} samples @ {} Hz", chunk.samples.len(), chunk.sample_rate);
//! }
//! ```

pub mod buffer;
pub mod capture;
pub mod resample;
pub mod vad;
pub mod wav;

pub use buffer::RingBuffer;
pub use capture::{AudioCapture, AudioChunk, CaptureError, StreamHandle};
pub use resample::{downmix_to_mono, resample_to_16k, TARGET_SAMPLE_RATE};
pub use vad::SilenceTrimmer;
pub use wav::{cleanup_recordings, session_wav_path, write_wav};
