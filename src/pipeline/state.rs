//! Session state machine and shared status.
//!
//! [`Phase`] tracks where the current dictation session is in the
//! record → transcribe → inject cycle.  [`Status`] bundles the phase with
//! the last transcript and error for logging and tests, behind the
//! [`SharedStatus`] (`Arc<Mutex<…>>`) handle the runner mutates.

use std::sync::{Arc, Mutex};

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Phases of a dictation session.
///
/// ```text
/// Idle ──key press──▶ Recording ──key release──▶ Transcribing
///                                                  ──STT done──▶ Injecting
///                                                                  └─▶ Idle
/// any phase ──failure──▶ Error ──next key press──▶ Recording
/// ```
///
/// The runner holds exactly one session open at a time; key presses that
/// arrive while a phase is busy are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the push-to-talk key.
    Idle,

    /// Key is held; the capture feed is filling the session buffer.
    Recording,

    /// Audio drained; Whisper is running on the blocking thread pool.
    Transcribing,

    /// Transcript ready; delivery to the focused window is in progress.
    Injecting,

    /// A session failed.  Cleared by the next key press.
    Error,
}

impl Phase {
    /// `true` while a session is actively using the microphone, the model or
    /// the injector.
    ///
    /// ```
    /// use dictate::pipeline::Phase;
    ///
    /// assert!(!Phase::Idle.is_busy());
    /// assert!(Phase::Recording.is_busy());
    /// assert!(Phase::Transcribing.is_busy());
    /// assert!(Phase::Injecting.is_busy());
    /// assert!(!Phase::Error.is_busy());
    /// ```
    pub fn is_busy(&self) -> bool {
        matches!(self, Phase::Recording | Phase::Transcribing | Phase::Injecting)
    }

    /// Short label for log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Recording => "recording",
            Phase::Transcribing => "transcribing",
            Phase::Injecting => "injecting",
            Phase::Error => "error",
        }
    }
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Idle
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Current session status, mutated by the pipeline runner.
#[derive(Debug, Default)]
pub struct Status {
    /// Phase of the current (or last) session.
    pub phase: Phase,

    /// Text delivered by the most recent successful session.
    pub last_transcript: Option<String>,

    /// Failure description when `phase == Phase::Error`.
    pub last_error: Option<String>,

    /// Length of the most recent session's audio in seconds.
    pub recorded_secs: f32,
}

impl Status {
    /// Fresh status in the `Idle` phase.
    pub fn new() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// SharedStatus
// ---------------------------------------------------------------------------

/// Thread-safe handle to [`Status`].
///
/// Cheap to clone.  Lock for short critical sections only; never across an
/// `.await`.
pub type SharedStatus = Arc<Mutex<Status>>;

/// Construct a [`SharedStatus`] wrapping a fresh [`Status`].
pub fn new_shared_status() -> SharedStatus {
    Arc::new(Mutex::new(Status::new()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_phases() {
        assert!(!Phase::Idle.is_busy());
        assert!(Phase::Recording.is_busy());
        assert!(Phase::Transcribing.is_busy());
        assert!(Phase::Injecting.is_busy());
        assert!(!Phase::Error.is_busy());
    }

    #[test]
    fn labels_are_distinct() {
        let labels = [
            Phase::Idle.label(),
            Phase::Recording.label(),
            Phase::Transcribing.label(),
            Phase::Injecting.label(),
            Phase::Error.label(),
        ];
        for (i, a) in labels.iter().enumerate() {
            for b in &labels[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn default_phase_is_idle() {
        assert_eq!(Phase::default(), Phase::Idle);
    }

    #[test]
    fn fresh_status_is_empty() {
        let status = Status::new();
        assert_eq!(status.phase, Phase::Idle);
        assert!(status.last_transcript.is_none());
        assert!(status.last_error.is_none());
        assert_eq!(status.recorded_secs, 0.0);
    }

    #[test]
    fn shared_status_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SharedStatus>();
    }

    #[test]
    fn shared_status_clones_share_state() {
        let status = new_shared_status();
        let status2 = Arc::clone(&status);

        status.lock().unwrap().phase = Phase::Recording;
        assert_eq!(status2.lock().unwrap().phase, Phase::Recording);
    }
}
