//! Bounded sample buffer for one recording session.
//!
//! The cpal feed thread appends converted samples while the push-to-talk key
//! is held; the pipeline drains the whole buffer on release.  Capacity is
//! fixed at construction (maximum session length × 16 kHz) and overflow
//! discards the *oldest* samples, so a session that runs past the limit keeps
//! its most recent audio.
//!
//! # Example
//!
//! ```rust
//! use dictate::audio::RingBuffer;
//!
//! let mut buf = RingBuffer::new(4);
//! buf.push_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]); // 5 samples into capacity 4
//! assert_eq!(buf.drain(), vec![2.0, 3.0, 4.0, 5.0]);
//! ```

use std::collections::VecDeque;

// ---------------------------------------------------------------------------
// RingBuffer
// ---------------------------------------------------------------------------

/// Fixed-capacity FIFO of audio samples.
///
/// Backed by a `VecDeque` that never grows past `capacity`; pushing into a
/// full buffer pops from the front.  Samples come out of [`drain`] in
/// chronological order.
///
/// [`drain`]: RingBuffer::drain
pub struct RingBuffer<T> {
    buf: VecDeque<T>,
    capacity: usize,
}

impl<T: Copy> RingBuffer<T> {
    /// Create a buffer holding at most `capacity` samples.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "RingBuffer capacity must be > 0");
        Self {
            buf: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append `data`, discarding the oldest samples on overflow.
    pub fn push_slice(&mut self, data: &[T]) {
        for &sample in data {
            if self.buf.len() == self.capacity {
                self.buf.pop_front();
            }
            self.buf.push_back(sample);
        }
    }

    /// Take every stored sample in chronological order, leaving the buffer
    /// empty.
    pub fn drain(&mut self) -> Vec<T> {
        self.buf.drain(..).collect()
    }

    /// Discard all stored samples.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Number of samples currently stored.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// `true` when no samples are stored.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Maximum number of samples the buffer can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// `true` once the buffer has reached capacity (the next push discards).
    pub fn is_full(&self) -> bool {
        self.buf.len() == self.capacity
    }

    /// Stored duration in seconds, assuming mono samples at `sample_rate` Hz.
    pub fn duration_secs(&self, sample_rate: u32) -> f32 {
        if sample_rate == 0 {
            return 0.0;
        }
        self.buf.len() as f32 / sample_rate as f32
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
