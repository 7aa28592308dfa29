//! Speech-to-text: the [`SttEngine`] trait, its Whisper implementation, and
//! model file resolution.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use dictate::stt::{SttEngine, TranscribeParams, WhisperEngine};
//!
//! let engine = WhisperEngine::load(
//!     "models/ggml-large-v3-turbo.bin",
//!     TranscribeParams::default(),
//! )
//! .expect("model file missing");
//!
//! // audio: 16 kHz mono f32 from the audio module
//! let audio = vec![0.0_f32; 16_000]; // 1 s of silence
//! let text = engine.transcribe(&audio).unwrap();
//! println!("{text}");
//! ```

pub mod engine;
pub mod model;
pub mod transcribe;

pub use engine::{SttEngine, SttError, WhisperEngine};
pub use model::{find_model, ModelInfo, ModelPaths, ModelSize, WHISPER_MODELS};
pub use transcribe::{SamplingStrategy, Segment, TranscribeParams, TranscriptionResult};

// test-only re-export so pipeline tests can use the mock without reaching
// into the engine module
#[cfg(test)]
pub use engine::MockSttEngine;
