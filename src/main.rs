//! Application entry point.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (defaults on first run).
//! 3. Apply the session-dump retention policy.
//! 4. Load the Whisper model — fail fast with a hint when the GGML file is
//!    missing.
//! 5. Create the tokio runtime (multi-thread, 2 workers).
//! 6. Start audio capture and the feed thread that converts chunks into the
//!    session buffer while the recording gate is open.
//! 7. Spawn the hotkey listener thread.
//! 8. Run the [`PipelineRunner`] on the runtime until the process is killed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use tokio::sync::mpsc;

use dictate::{
    audio::{self, AudioCapture, AudioChunk, RingBuffer},
    config::{AppConfig, AppPaths},
    hotkey::{default_key_name, parse_key, HotkeyEvent, HotkeyListener},
    inject::TextInjector,
    pipeline::{
        new_shared_status, PipelineRunner, RecordingGate, SessionOptions, SharedAudioBuffer,
    },
    stt::{ModelPaths, SttEngine, TranscribeParams, WhisperEngine},
};

fn main() -> Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("dictate starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("failed to load config ({e}); using defaults");
        AppConfig::default()
    });
    let paths = AppPaths::new();

    // 3. Session dump retention
    if config.recording.save_sessions {
        if let Err(e) = audio::cleanup_recordings(
            &paths.recordings_dir,
            config.recording.retention_days,
            config.recording.max_count,
        ) {
            log::warn!("recordings cleanup failed: {e}");
        }
    }

    // 4. Whisper engine
    let model_path = ModelPaths::from_app_paths(&paths).resolve(&config.stt.model);
    let params = TranscribeParams {
        language: config.stt.language.clone(),
        ..TranscribeParams::default()
    };
    let stt: Arc<dyn SttEngine> =
        Arc::new(WhisperEngine::load(&model_path, params).with_context(|| {
            format!(
                "cannot load model {} — place a whisper.cpp GGML file there \
                 (https://huggingface.co/ggerganov/whisper.cpp)",
                model_path.display()
            )
        })?);
    log::info!("whisper model loaded: {}", model_path.display());

    // 5. Runtime (2 workers — inference and injection each take one)
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    // Shared session state
    let status = new_shared_status();
    let gate: RecordingGate = Arc::new(AtomicBool::new(false));
    let capacity =
        (config.audio.max_session_secs * audio::TARGET_SAMPLE_RATE as f32) as usize;
    let audio_buf: SharedAudioBuffer = Arc::new(Mutex::new(RingBuffer::new(capacity.max(1))));

    // 6. Audio capture + feed thread
    let capture =
        AudioCapture::new(config.audio.device.as_deref()).context("audio capture unavailable")?;
    log::info!(
        "audio input: {} Hz, {} ch",
        capture.sample_rate(),
        capture.channels()
    );

    let (chunk_tx, chunk_rx) = std::sync::mpsc::channel::<AudioChunk>();
    spawn_feed_thread(chunk_rx, Arc::clone(&gate), Arc::clone(&audio_buf));
    let _stream = capture
        .start(chunk_tx)
        .context("failed to start audio stream")?;

    // 7. Hotkey listener
    let key = parse_key(&config.hotkey.push_to_talk_key).unwrap_or_else(|| {
        log::warn!(
            "unknown hotkey {:?}, using platform default {}",
            config.hotkey.push_to_talk_key,
            default_key_name()
        );
        parse_key(default_key_name()).unwrap_or(rdev::Key::F9)
    });

    let (hotkey_tx, hotkey_rx) = mpsc::channel::<HotkeyEvent>(16);
    let _listener = HotkeyListener::start(key, hotkey_tx);
    log::info!("hold {} to dictate", config.hotkey.push_to_talk_key);

    // 8. Pipeline — runs until the process is killed
    let options = SessionOptions::from_config(&config, &paths.recordings_dir);
    let injector = TextInjector::from_config(&config.inject);
    let runner = PipelineRunner::new(status, gate, audio_buf, stt, injector, options);

    rt.block_on(runner.run(hotkey_rx));
    Ok(())
}

/// Drain raw chunks from the capture callback, convert them to 16 kHz mono,
/// and append to the session buffer while the recording gate is open.
fn spawn_feed_thread(
    chunk_rx: std::sync::mpsc::Receiver<AudioChunk>,
    gate: RecordingGate,
    audio_buf: SharedAudioBuffer,
) {
    std::thread::Builder::new()
        .name("audio-feed".into())
        .spawn(move || {
            while let Ok(chunk) = chunk_rx.recv() {
                if !gate.load(Ordering::Acquire) {
                    continue;
                }

                let mono = audio::downmix_to_mono(&chunk.samples, chunk.channels);
                let samples = audio::resample_to_16k(&mono, chunk.sample_rate);

                if let Ok(mut buf) = audio_buf.lock() {
                    buf.push_slice(&samples);
                }
            }
        })
        .expect("failed to spawn audio-feed thread");
}
