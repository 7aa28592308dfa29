//! The pipeline runner — drives record → transcribe → inject per session.
//!
//! [`PipelineRunner`] responds to [`HotkeyEvent`]s from the listener thread:
//!
//! ```text
//! PushToTalkPressed
//!   └─▶ clear session buffer, open the recording gate      [Recording]
//!
//! PushToTalkReleased
//!   └─▶ close gate, drain buffer, [trim silence], [dump WAV]
//!         └─▶ spawn_blocking(stt.transcribe)               [Transcribing]
//!               └─▶ spawn_blocking(injector.inject)        [Injecting]
//!                     └─▶ back to Idle, timing logged
//! ```
//!
//! Blocking work (Whisper inference, clipboard I/O) runs on
//! `tokio::task::spawn_blocking` so the runner's task never stalls the
//! runtime.  Injection failures are logged, not fatal — the transcript is
//! already in the status for the user to recover.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use tokio::sync::mpsc;

use crate::audio::{session_wav_path, write_wav, RingBuffer, SilenceTrimmer, TARGET_SAMPLE_RATE};
use crate::config::AppConfig;
use crate::hotkey::HotkeyEvent;
use crate::inject::TextInjector;
use crate::stt::SttEngine;

use super::state::{Phase, SharedStatus};

// ---------------------------------------------------------------------------
// Shared handles
// ---------------------------------------------------------------------------

/// Session sample buffer shared between the capture feed thread and the
/// runner.  The feed appends while the gate is open; the runner drains on
/// key release.
pub type SharedAudioBuffer = Arc<Mutex<RingBuffer<f32>>>;

/// Recording gate shared with the capture feed thread.  `true` while the
/// push-to-talk key is held.
pub type RecordingGate = Arc<AtomicBool>;

// ---------------------------------------------------------------------------
// SessionOptions
// ---------------------------------------------------------------------------

/// Per-session processing options, derived from config.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Sessions with fewer 16 kHz samples than this are discarded.
    pub min_samples: usize,
    /// RMS threshold for silence trimming; `None` disables trimming.
    pub trim_silence: Option<f32>,
    /// Append one space after the transcript.
    pub append_trailing_space: bool,
    /// Directory for debug WAV dumps; `None` disables dumping.
    pub dump_dir: Option<PathBuf>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            min_samples: (0.5 * TARGET_SAMPLE_RATE as f32) as usize,
            trim_silence: None,
            append_trailing_space: true,
            dump_dir: None,
        }
    }
}

impl SessionOptions {
    /// Derive options from the loaded configuration.  `recordings_dir` is
    /// only used when `recording.save_sessions` is set.
    pub fn from_config(config: &AppConfig, recordings_dir: &Path) -> Self {
        Self {
            min_samples: (config.audio.min_session_secs * TARGET_SAMPLE_RATE as f32) as usize,
            trim_silence: config
                .audio
                .trim_silence
                .then_some(config.audio.silence_rms_threshold),
            append_trailing_space: config.inject.append_trailing_space,
            dump_dir: config
                .recording
                .save_sessions
                .then(|| recordings_dir.to_path_buf()),
        }
    }
}

// ---------------------------------------------------------------------------
// PipelineRunner
// ---------------------------------------------------------------------------

/// Owns one dictation session at a time.
///
/// Create with [`PipelineRunner::new`], then drive it with
/// [`run`](Self::run) on the tokio runtime.
pub struct PipelineRunner {
    status: SharedStatus,
    gate: RecordingGate,
    audio_buf: SharedAudioBuffer,
    stt: Arc<dyn SttEngine>,
    injector: TextInjector,
    trimmer: Option<SilenceTrimmer>,
    options: SessionOptions,
}

impl PipelineRunner {
    /// Wire up a runner.
    ///
    /// * `status`    — shared session status, also read by tests.
    /// * `gate`      — recording flag checked by the capture feed thread.
    /// * `audio_buf` — session buffer filled by the capture feed thread.
    /// * `stt`       — transcription engine.
    /// * `injector`  — transcript delivery.
    /// * `options`   — session processing options.
    pub fn new(
        status: SharedStatus,
        gate: RecordingGate,
        audio_buf: SharedAudioBuffer,
        stt: Arc<dyn SttEngine>,
        injector: TextInjector,
        options: SessionOptions,
    ) -> Self {
        let trimmer = options.trim_silence.map(SilenceTrimmer::new);
        Self {
            status,
            gate,
            audio_buf,
            stt,
            injector,
            trimmer,
            options,
        }
    }

    // -----------------------------------------------------------------------
    // Main async loop
    // -----------------------------------------------------------------------

    /// Run until `hotkey_rx` closes.
    ///
    /// Spawn (or `block_on`) this as a tokio task from `main()`.
    pub async fn run(mut self, mut hotkey_rx: mpsc::Receiver<HotkeyEvent>) {
        while let Some(event) = hotkey_rx.recv().await {
            match event {
                HotkeyEvent::PushToTalkPressed => self.handle_pressed(),
                HotkeyEvent::PushToTalkReleased => self.handle_released().await,
            }
        }

        log::info!("pipeline: hotkey channel closed, shutting down");
    }

    // -----------------------------------------------------------------------
    // Event handlers
    // -----------------------------------------------------------------------

    /// Key press: open a new session unless one is already in flight.
    fn handle_pressed(&mut self) {
        {
            let st = self.status.lock().unwrap();
            // One session at a time: a press while the previous session is
            // still recording/transcribing/injecting is dropped.
            if st.phase.is_busy() {
                log::debug!("pipeline: press ignored while {}", st.phase.label());
                return;
            }
        }

        if let Ok(mut buf) = self.audio_buf.lock() {
            buf.clear();
        }

        {
            let mut st = self.status.lock().unwrap();
            st.phase = Phase::Recording;
            st.recorded_secs = 0.0;
            st.last_error = None;
        }

        self.gate.store(true, Ordering::Release);
        log::debug!("pipeline: recording");
    }

    /// Key release: close the session and run it through STT and injection.
    async fn handle_released(&mut self) {
        {
            let st = self.status.lock().unwrap();
            // A release with no open session (press was ignored, or the key
            // was already down at startup) carries no audio.
            if st.phase != Phase::Recording {
                log::debug!("pipeline: release ignored while {}", st.phase.label());
                return;
            }
        }

        self.gate.store(false, Ordering::Release);
        let total_start = Instant::now();

        // ── 1. Drain the session buffer ─────────────────────────────────
        let collect_start = Instant::now();
        let audio: Vec<f32> = match self.audio_buf.lock() {
            Ok(mut buf) => buf.drain(),
            Err(e) => {
                self.set_error(format!("session buffer lock poisoned: {e}"));
                return;
            }
        };
        let collect_ms = collect_start.elapsed().as_secs_f64() * 1e3;

        if audio.is_empty() {
            log::warn!("pipeline: no audio captured");
            self.set_phase(Phase::Idle);
            return;
        }

        let recorded_secs = audio.len() as f32 / TARGET_SAMPLE_RATE as f32;
        self.status.lock().unwrap().recorded_secs = recorded_secs;

        if audio.len() < self.options.min_samples {
            log::info!("pipeline: session too short ({recorded_secs:.2} s), skipping");
            self.set_phase(Phase::Idle);
            return;
        }

        // ── 2. Convert: optional silence trim ───────────────────────────
        let convert_start = Instant::now();
        let audio: Vec<f32> = match &self.trimmer {
            Some(trimmer) => trimmer.trim(&audio).to_vec(),
            None => audio,
        };
        let convert_ms = convert_start.elapsed().as_secs_f64() * 1e3;

        if audio.len() < self.options.min_samples {
            log::info!("pipeline: only silence captured, skipping");
            self.set_phase(Phase::Idle);
            return;
        }

        // Debug dump is best-effort; a full disk must not break dictation.
        if let Some(dir) = &self.options.dump_dir {
            let path = session_wav_path(dir);
            if let Err(e) = write_wav(&path, &audio) {
                log::warn!("pipeline: session dump failed: {e}");
            }
        }

        // ── 3. Transcribe (blocking → thread pool) ──────────────────────
        self.set_phase(Phase::Transcribing);

        let stt = Arc::clone(&self.stt);
        let transcribe_start = Instant::now();
        let stt_result = tokio::task::spawn_blocking(move || stt.transcribe(&audio)).await;
        let transcribe_secs = transcribe_start.elapsed().as_secs_f64();

        let raw_text = match stt_result {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                self.set_error(format!("transcription failed: {e}"));
                return;
            }
            Err(e) => {
                self.set_error(format!("transcription task panicked: {e}"));
                return;
            }
        };

        let mut text = raw_text.trim().to_string();
        if text.is_empty() {
            log::info!("pipeline: empty transcript, nothing to inject");
            self.set_phase(Phase::Idle);
            return;
        }
        log::debug!("pipeline: transcript = {text:?}");

        if self.options.append_trailing_space {
            text.push(' ');
        }

        // ── 4. Inject (blocking → thread pool) ──────────────────────────
        self.set_phase(Phase::Injecting);

        let injector = self.injector.clone();
        let to_inject = text.clone();
        let inject_start = Instant::now();
        let inject_result =
            tokio::task::spawn_blocking(move || injector.inject(&to_inject)).await;
        let inject_ms = inject_start.elapsed().as_secs_f64() * 1e3;

        match inject_result {
            Ok(Ok(())) => log::debug!("pipeline: injection succeeded"),
            // Non-fatal: the transcript is kept in the status either way.
            Ok(Err(e)) => log::warn!("pipeline: injection failed: {e}"),
            Err(e) => log::warn!("pipeline: inject task panicked: {e}"),
        }

        // ── 5. Finalise ─────────────────────────────────────────────────
        {
            let mut st = self.status.lock().unwrap();
            st.phase = Phase::Idle;
            st.last_transcript = Some(text);
        }

        log::info!(
            "pipeline: session done ({recorded_secs:.2} s audio) — collect {collect_ms:.1} ms, \
             convert {convert_ms:.1} ms, transcribe {transcribe_secs:.2} s, \
             inject {inject_ms:.1} ms, total {:.2} s",
            total_start.elapsed().as_secs_f64()
        );
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn set_phase(&self, phase: Phase) {
        self.status.lock().unwrap().phase = phase;
    }

    fn set_error(&self, message: String) {
        let mut st = self.status.lock().unwrap();
        st.phase = Phase::Error;
        st.last_error = Some(message.clone());
        log::error!("pipeline: {message}");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
