//! Transcription parameter and result types.
//!
//! [`TranscribeParams`] carries the settings for one Whisper inference run;
//! [`TranscriptionResult`] is what [`WhisperEngine::transcribe_full`]
//! returns.
//!
//! [`WhisperEngine::transcribe_full`]: crate::stt::WhisperEngine::transcribe_full

// ---------------------------------------------------------------------------
// SamplingStrategy
// ---------------------------------------------------------------------------

/// Owned, `Clone` mirror of `whisper_rs::SamplingStrategy`.
///
/// Greedy single-pass decoding is the right default for dictation latency;
/// beam search buys a little accuracy for 2–4× the inference time.
#[derive(Debug, Clone, PartialEq)]
pub enum SamplingStrategy {
    /// Greedy (single-pass) decoding.
    Greedy {
        /// Candidate tokens evaluated per step; 1 is fastest.
        best_of: i32,
    },
    /// Beam-search decoding.
    BeamSearch {
        /// Beams maintained in parallel.
        beam_size: i32,
        /// Patience factor (≥1.0 = standard beam search).
        patience: f32,
    },
}

impl Default for SamplingStrategy {
    fn default() -> Self {
        Self::Greedy { best_of: 1 }
    }
}

// ---------------------------------------------------------------------------
// TranscribeParams
// ---------------------------------------------------------------------------

/// Parameters for a single transcription run.
///
/// ```
/// use dictate::stt::TranscribeParams;
///
/// let params = TranscribeParams {
///     language: "en".into(),
///     ..TranscribeParams::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct TranscribeParams {
    /// ISO-639-1 language code, or `"auto"` for Whisper's own detection.
    pub language: String,

    /// Decoding strategy.
    pub strategy: SamplingStrategy,

    /// CPU threads handed to Whisper; defaults to [`optimal_threads()`].
    pub n_threads: i32,

    /// Suppress Whisper's progress output on stderr.
    pub suppress_progress: bool,
}

impl Default for TranscribeParams {
    fn default() -> Self {
        Self {
            language: "auto".into(),
            strategy: SamplingStrategy::default(),
            n_threads: optimal_threads(),
            suppress_progress: true,
        }
    }
}

/// Physical CPU threads to use for inference, capped at 8 — Whisper scales
/// poorly beyond that.
pub(crate) fn optimal_threads() -> i32 {
    std::thread::available_parallelism()
        .map(|n| n.get().min(8) as i32)
        .unwrap_or(4)
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// The output of a successful transcription.
#[derive(Debug, Clone)]
pub struct TranscriptionResult {
    /// Full transcript, trimmed of surrounding whitespace.
    pub text: String,

    /// Time-aligned segments as produced by Whisper.
    pub segments: Vec<Segment>,

    /// Wall-clock inference time in milliseconds.
    pub duration_ms: u128,
}

/// One time-aligned text chunk.
#[derive(Debug, Clone)]
pub struct Segment {
    /// Segment text, including any punctuation Whisper inserted.
    pub text: String,
    /// Start time in milliseconds from the beginning of the audio.
    pub start_ms: u64,
    /// End time in milliseconds from the beginning of the audio.
    pub end_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_use_auto_language_and_greedy() {
        let p = TranscribeParams::default();
        assert_eq!(p.language, "auto");
        assert_eq!(p.strategy, SamplingStrategy::Greedy { best_of: 1 });
        assert!(p.suppress_progress);
    }

    #[test]
    fn optimal_threads_between_1_and_8() {
        let t = optimal_threads();
        assert!((1..=8).contains(&t));
    }
}
