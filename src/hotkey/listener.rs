//! Dedicated OS-thread hotkey listener built on `rdev::listen`.
//!
//! `rdev::listen` blocks forever, so it lives on its own OS thread.
//! [`HotkeyListener`] owns that thread plus a stop flag; dropping the handle
//! sets the flag and the callback discards all further events.
//!
//! # Shutdown caveat
//!
//! `rdev::listen` has no graceful shutdown API.  The thread stays blocked in
//! the OS event loop until the process exits; with the stop flag set it
//! forwards nothing and holds no resources needing cleanup.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tokio::sync::mpsc;

use super::HotkeyEvent;

// ---------------------------------------------------------------------------
// HotkeyListener
// ---------------------------------------------------------------------------

/// Handle to a running hotkey listener thread.
///
/// Construct with [`HotkeyListener::start`]; drop to stop forwarding events.
pub struct HotkeyListener {
    /// Shared stop flag — set `true` on [`Drop`].
    stop: Arc<AtomicBool>,
    /// Kept so the thread is not detached prematurely; never joined because
    /// `rdev::listen` never returns.
    _thread: std::thread::JoinHandle<()>,
}

impl HotkeyListener {
    /// Spawn the listener thread and forward press/release of `key` as
    /// [`HotkeyEvent`]s on `tx`.
    ///
    /// OS key auto-repeat delivers a stream of `KeyPress` events while a key
    /// is held; a pressed-state flag collapses them so exactly one
    /// `PushToTalkPressed` is sent per physical press.  The thread sends with
    /// `blocking_send`, which is the correct call from a non-async context.
    ///
    /// # Panics
    ///
    /// Panics if the OS refuses to create the thread (extremely unlikely).
    pub fn start(key: rdev::Key, tx: mpsc::Sender<HotkeyEvent>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let thread = std::thread::Builder::new()
            .name("hotkey-listener".into())
            .spawn(move || {
                // Tracks whether the watched key is physically down, so
                // auto-repeat presses are not forwarded again.
                let key_down = AtomicBool::new(false);

                let result = rdev::listen(move |event| {
                    if stop_flag.load(Ordering::Relaxed) {
                        return;
                    }

                    match event.event_type {
                        rdev::EventType::KeyPress(k) if k == key => {
                            if !key_down.swap(true, Ordering::Relaxed) {
                                let _ = tx.blocking_send(HotkeyEvent::PushToTalkPressed);
                            }
                        }
                        rdev::EventType::KeyRelease(k) if k == key => {
                            key_down.store(false, Ordering::Relaxed);
                            let _ = tx.blocking_send(HotkeyEvent::PushToTalkReleased);
                        }
                        _ => {}
                    }
                });

                if let Err(e) = result {
                    log::error!("hotkey-listener: rdev::listen exited with error: {e:?}");
                }
            })
            .expect("failed to spawn hotkey-listener thread");

        Self {
            stop,
            _thread: thread,
        }
    }
}

impl Drop for HotkeyListener {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        // The OS thread stays blocked inside rdev::listen until process exit.
    }
}
