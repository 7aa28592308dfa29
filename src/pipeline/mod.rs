//! Session orchestration — wires hotkey events to the audio, STT and inject
//! subsystems.
//!
//! # Architecture
//!
//! ```text
//! HotkeyEvent (tokio mpsc)
//!        │
//!        ▼
//! PipelineRunner::run()           ← tokio task
//!        │
//!        ├─ PushToTalkPressed  → clear buffer, open RecordingGate
//!        │
//!        └─ PushToTalkReleased
//!              ├─ close gate, drain SharedAudioBuffer
//!              ├─ optional silence trim / WAV dump
//!              ├─ spawn_blocking(SttEngine::transcribe)
//!              └─ spawn_blocking(TextInjector::inject)
//!
//! SharedStatus (Arc<Mutex<Status>>) ← phase + last transcript/error
//! ```
//!
//! The capture feed thread (spawned in `main`) checks the [`RecordingGate`]
//! and appends converted samples to the [`SharedAudioBuffer`] while it is
//! open; everything else lives here.

pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use runner::{PipelineRunner, RecordingGate, SessionOptions, SharedAudioBuffer};
pub use state::{new_shared_status, Phase, SharedStatus, Status};
