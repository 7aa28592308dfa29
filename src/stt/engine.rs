//! The STT engine trait and its Whisper implementation.
//!
//! [`SttEngine`] is the object-safe interface the pipeline drives.
//! [`WhisperEngine`] wraps a `whisper_rs::WhisperContext`; the model file is
//! the opaque external dependency doing the actual recognition.
//! [`MockSttEngine`] (test-only) returns canned responses so the pipeline
//! can be tested without a GGML file.

use std::path::Path;

use thiserror::Error;
use whisper_rs::{FullParams, WhisperContext, WhisperContextParameters};

use crate::stt::transcribe::{SamplingStrategy, Segment, TranscribeParams, TranscriptionResult};

// ---------------------------------------------------------------------------
// SttError
// ---------------------------------------------------------------------------

/// Errors from the STT subsystem.
#[derive(Debug, Clone, Error)]
pub enum SttError {
    /// No GGML model file at the given path.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// `whisper_rs` failed to build a context or per-call state.
    #[error("whisper context initialisation failed: {0}")]
    ContextInit(String),

    /// The inference pass itself failed.
    #[error("transcription error: {0}")]
    Transcription(String),

    /// Audio shorter than the 0.5 s minimum (8 000 samples at 16 kHz).
    #[error("audio too short — minimum 0.5 s (8 000 samples at 16 kHz)")]
    AudioTooShort,

    /// Audio longer than the 60 s maximum (960 000 samples at 16 kHz).
    #[error("audio too long — maximum 60 s (960 000 samples at 16 kHz)")]
    AudioTooLong,
}

// ---------------------------------------------------------------------------
// SttEngine trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe speech-to-text interface.
///
/// # Contract
///
/// - `audio` is 16 kHz mono f32 PCM.
/// - `Err(SttError::AudioTooShort)` when `audio.len() < 8_000`.
/// - `Err(SttError::AudioTooLong)` when `audio.len() > 960_000`.
pub trait SttEngine: Send + Sync {
    /// Transcribe `audio` and return the transcript text.
    fn transcribe(&self, audio: &[f32]) -> Result<String, SttError>;
}

// Compile-time assertion: the trait stays object-safe.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn SttEngine>) {}
};

// ---------------------------------------------------------------------------
// Audio length bounds (16 kHz mono f32)
// ---------------------------------------------------------------------------

/// 0.5 s × 16 000 Hz.
pub(crate) const MIN_AUDIO_SAMPLES: usize = 8_000;
/// 60 s × 16 000 Hz.
pub(crate) const MAX_AUDIO_SAMPLES: usize = 960_000;

// ---------------------------------------------------------------------------
// WhisperEngine
// ---------------------------------------------------------------------------

/// Production engine over a `whisper_rs::WhisperContext`.
///
/// A fresh `WhisperState` is created per [`transcribe`] call, so a single
/// engine can be shared across threads without locking.
///
/// [`transcribe`]: SttEngine::transcribe
pub struct WhisperEngine {
    ctx: WhisperContext,
    params: TranscribeParams,
}

impl std::fmt::Debug for WhisperEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhisperEngine")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

// `WhisperContext` holds a raw pointer internally but whisper-rs declares it
// Send+Sync — the weights are read-only after loading.  `TranscribeParams`
// is fully owned.
// SAFETY: WhisperContext is Send+Sync as declared by whisper-rs.
unsafe impl Send for WhisperEngine {}
unsafe impl Sync for WhisperEngine {}

impl WhisperEngine {
    /// Load a GGML model from `model_path`.
    ///
    /// # Errors
    ///
    /// - [`SttError::ModelNotFound`] — no file at `model_path`.
    /// - [`SttError::ContextInit`] — whisper-rs rejected the file.
    pub fn load(model_path: impl AsRef<Path>, params: TranscribeParams) -> Result<Self, SttError> {
        let path = model_path.as_ref();

        if !path.exists() {
            return Err(SttError::ModelNotFound(path.display().to_string()));
        }

        let path_str = path.to_str().ok_or_else(|| {
            SttError::ModelNotFound(format!(
                "model path contains non-UTF-8 characters: {}",
                path.display()
            ))
        })?;

        let ctx = WhisperContext::new_with_params(path_str, WhisperContextParameters::default())
            .map_err(|e| SttError::ContextInit(e.to_string()))?;

        Ok(Self { ctx, params })
    }

    /// Transcribe `audio` and return a [`TranscriptionResult`] with
    /// per-segment timing.
    ///
    /// Prefer [`SttEngine::transcribe`] when only the text is needed.
    pub fn transcribe_full(&self, audio: &[f32]) -> Result<TranscriptionResult, SttError> {
        if audio.len() < MIN_AUDIO_SAMPLES {
            return Err(SttError::AudioTooShort);
        }
        if audio.len() > MAX_AUDIO_SAMPLES {
            return Err(SttError::AudioTooLong);
        }

        use whisper_rs::SamplingStrategy as WS;
        let strategy = match self.params.strategy {
            SamplingStrategy::Greedy { best_of } => WS::Greedy { best_of },
            SamplingStrategy::BeamSearch { beam_size, patience } => {
                WS::BeamSearch { beam_size, patience }
            }
        };

        let mut fp = FullParams::new(strategy);

        // set_language borrows the string; both `fp` and the borrow stay
        // alive until state.full() returns.
        let lang: Option<&str> = if self.params.language == "auto" {
            None
        } else {
            Some(self.params.language.as_str())
        };
        fp.set_language(lang);
        fp.set_n_threads(self.params.n_threads);

        if self.params.suppress_progress {
            fp.set_print_progress(false);
            fp.set_print_realtime(false);
        }

        let mut state = self
            .ctx
            .create_state()
            .map_err(|e| SttError::ContextInit(e.to_string()))?;

        let wall_start = std::time::Instant::now();

        state
            .full(fp, audio)
            .map_err(|e| SttError::Transcription(e.to_string()))?;

        let n_segments = state
            .full_n_segments()
            .map_err(|e| SttError::Transcription(e.to_string()))?;

        let mut text = String::new();
        let mut segments: Vec<Segment> = Vec::with_capacity(n_segments as usize);

        for i in 0..n_segments {
            let seg_text = state
                .full_get_segment_text(i)
                .map_err(|e| SttError::Transcription(format!("segment {i}: {e}")))?;

            // Whisper timestamps are centiseconds.
            let t0 = state.full_get_segment_t0(i).unwrap_or(0).max(0) as u64 * 10;
            let t1 = state.full_get_segment_t1(i).unwrap_or(0).max(0) as u64 * 10;

            text.push_str(&seg_text);
            segments.push(Segment {
                text: seg_text,
                start_ms: t0,
                end_ms: t1,
            });
        }

        Ok(TranscriptionResult {
            text: text.trim().to_string(),
            segments,
            duration_ms: wall_start.elapsed().as_millis(),
        })
    }
}

impl SttEngine for WhisperEngine {
    fn transcribe(&self, audio: &[f32]) -> Result<String, SttError> {
        self.transcribe_full(audio).map(|r| r.text)
    }
}

// ---------------------------------------------------------------------------
// MockSttEngine  (test-only)
// ---------------------------------------------------------------------------

/// Test double returning a canned response, no model file required.
///
/// Enforces the audio-length contract so callers are tested against it.
#[cfg(test)]
pub struct MockSttEngine {
    response: Result<String, SttError>,
}

#[cfg(test)]
impl MockSttEngine {
    /// A mock that always returns `Ok(text)`.
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            response: Ok(text.into()),
        }
    }

    /// A mock that always returns `Err(error)`.
    pub fn err(error: SttError) -> Self {
        Self {
            response: Err(error),
        }
    }
}

#[cfg(test)]
impl SttEngine for MockSttEngine {
    fn transcribe(&self, audio: &[f32]) -> Result<String, SttError> {
        if audio.len() < MIN_AUDIO_SAMPLES {
            return Err(SttError::AudioTooShort);
        }
        if audio.len() > MAX_AUDIO_SAMPLES {
            return Err(SttError::AudioTooLong);
        }
        self.response.clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ---- MockSttEngine -----------------------------------------------------

    #[test]
    fn mock_ok_returns_configured_text() {
        let engine = MockSttEngine::ok("hello world");
        let audio = vec![0.0f32; MIN_AUDIO_SAMPLES];
        assert_eq!(engine.transcribe(&audio).unwrap(), "hello world");
    }

    #[test]
    fn mock_err_returns_configured_error() {
        let engine = MockSttEngine::err(SttError::Transcription("boom".into()));
        let audio = vec![0.0f32; MIN_AUDIO_SAMPLES];
        assert!(matches!(
            engine.transcribe(&audio).unwrap_err(),
            SttError::Transcription(_)
        ));
    }

    // ---- Length guards -----------------------------------------------------

    #[test]
    fn exactly_min_samples_is_accepted() {
        let engine = MockSttEngine::ok("ok");
        assert!(engine.transcribe(&vec![0.0f32; MIN_AUDIO_SAMPLES]).is_ok());
    }

    #[test]
    fn one_below_min_is_too_short() {
        let engine = MockSttEngine::ok("ok");
        assert!(matches!(
            engine
                .transcribe(&vec![0.0f32; MIN_AUDIO_SAMPLES - 1])
                .unwrap_err(),
            SttError::AudioTooShort
        ));
    }

    #[test]
    fn one_above_max_is_too_long() {
        let engine = MockSttEngine::ok("ok");
        assert!(matches!(
            engine
                .transcribe(&vec![0.0f32; MAX_AUDIO_SAMPLES + 1])
                .unwrap_err(),
            SttError::AudioTooLong
        ));
    }

    // ---- WhisperEngine::load -----------------------------------------------

    #[test]
    fn load_missing_model_returns_model_not_found() {
        let result = WhisperEngine::load("/nonexistent/model.bin", TranscribeParams::default());
        assert!(
            matches!(result, Err(SttError::ModelNotFound(_))),
            "expected ModelNotFound, got: {result:?}"
        );
    }

    // ---- Object safety -----------------------------------------------------

    #[test]
    fn box_dyn_stt_engine_compiles() {
        let engine: Box<dyn SttEngine> = Box::new(MockSttEngine::ok("ok"));
        let _ = engine.transcribe(&vec![0.0f32; MIN_AUDIO_SAMPLES]);
    }

    // ---- Error display -----------------------------------------------------

    #[test]
    fn model_not_found_display_contains_path() {
        let e = SttError::ModelNotFound("/some/path.bin".into());
        assert!(e.to_string().contains("/some/path.bin"));
    }

    #[test]
    fn too_short_display_mentions_minimum() {
        assert!(SttError::AudioTooShort.to_string().contains("0.5 s"));
    }
}
