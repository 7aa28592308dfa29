//! Energy-based silence trimming.
//!
//! [`SilenceTrimmer`] removes leading and trailing silence from a 16 kHz mono
//! clip before it reaches the STT engine.  Less silence means less inference
//! time and fewer Whisper hallucinations on quiet audio.
//!
//! The clip is split into 30 ms frames (480 samples at 16 kHz); a frame
//! counts as voice when its RMS amplitude exceeds the configured threshold.
//! The output spans the first through the last voice frame.

// ---------------------------------------------------------------------------
// SilenceTrimmer
// ---------------------------------------------------------------------------

/// Trims leading/trailing silence by per-frame RMS energy.
///
/// # Example
///
/// ```rust
/// use dictate::audio::SilenceTrimmer;
///
/// let trimmer = SilenceTrimmer::new(0.01);
///
/// let mut audio = vec![0.0_f32; 480];      // silence
/// audio.extend(vec![0.5_f32; 480]);        // speech
/// audio.extend(vec![0.0_f32; 480]);        // silence
///
/// assert_eq!(trimmer.trim(&audio).len(), 480);
/// ```
pub struct SilenceTrimmer {
    /// Frames with RMS below this are treated as silence.
    rms_threshold: f32,
    /// Frame length in samples; 480 = 30 ms at 16 kHz.
    frame_size: usize,
}

impl SilenceTrimmer {
    /// Create a trimmer with the given RMS threshold.
    ///
    /// `0.01` suits a quiet room; raise towards `0.05` for noisy
    /// environments.
    pub fn new(rms_threshold: f32) -> Self {
        Self {
            rms_threshold,
            frame_size: 480,
        }
    }

    /// RMS threshold in use.
    pub fn threshold(&self) -> f32 {
        self.rms_threshold
    }

    /// Return the subslice of `samples` spanning the first to the last voice
    /// frame.
    ///
    /// A clip with no voice frames comes back empty.  Clips shorter than one
    /// frame are returned whole — too little signal to classify.
    pub fn trim<'a>(&self, samples: &'a [f32]) -> &'a [f32] {
        if samples.len() < self.frame_size {
            return samples;
        }

        let voiced: Vec<usize> = samples
            .chunks(self.frame_size)
            .enumerate()
            .filter(|(_, frame)| rms(frame) > self.rms_threshold)
            .map(|(i, _)| i)
            .collect();

        let (Some(&first), Some(&last)) = (voiced.first(), voiced.last()) else {
            return &[];
        };

        let start = first * self.frame_size;
        let end = ((last + 1) * self.frame_size).min(samples.len());
        &samples[start..end]
    }
}

/// Root-mean-square amplitude of a frame.
fn rms(frame: &[f32]) -> f32 {
    if frame.is_empty() {
        return 0.0;
    }
    let sum_sq: f32 = frame.iter().map(|s| s * s).sum();
    (sum_sq / frame.len() as f32).sqrt()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: usize = 480;

    fn silence(frames: usize) -> Vec<f32> {
        vec![0.0; FRAME * frames]
    }

    fn speech(frames: usize) -> Vec<f32> {
        vec![0.5; FRAME * frames]
    }

    #[test]
    fn rms_of_silence_is_zero() {
        assert_eq!(rms(&[0.0; 480]), 0.0);
    }

    #[test]
    fn rms_of_constant_signal() {
        assert!((rms(&[0.5; 480]) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn rms_of_empty_frame_is_zero() {
        assert_eq!(rms(&[]), 0.0);
    }

    #[test]
    fn trims_leading_and_trailing_silence() {
        let trimmer = SilenceTrimmer::new(0.01);
        let mut audio = silence(2);
        audio.extend(speech(3));
        audio.extend(silence(2));

        let trimmed = trimmer.trim(&audio);
        assert_eq!(trimmed.len(), FRAME * 3);
        assert!(trimmed.iter().all(|&s| s == 0.5));
    }

    #[test]
    fn keeps_internal_pauses() {
        let trimmer = SilenceTrimmer::new(0.01);
        let mut audio = speech(1);
        audio.extend(silence(1)); // pause between words stays
        audio.extend(speech(1));

        assert_eq!(trimmer.trim(&audio).len(), FRAME * 3);
    }

    #[test]
    fn all_silence_trims_to_empty() {
        let trimmer = SilenceTrimmer::new(0.01);
        let audio = silence(4);
        assert!(trimmer.trim(&audio).is_empty());
    }

    #[test]
    fn all_speech_is_untouched() {
        let trimmer = SilenceTrimmer::new(0.01);
        let audio = speech(4);
        assert_eq!(trimmer.trim(&audio).len(), audio.len());
    }

    #[test]
    fn sub_frame_clip_is_returned_whole() {
        let trimmer = SilenceTrimmer::new(0.01);
        let audio = vec![0.0_f32; 100];
        assert_eq!(trimmer.trim(&audio).len(), 100);
    }

    #[test]
    fn partial_last_frame_survives() {
        let trimmer = SilenceTrimmer::new(0.01);
        let mut audio = silence(1);
        audio.extend(speech(1));
        audio.extend(vec![0.5_f32; 100]); // partial voice frame at the tail

        let trimmed = trimmer.trim(&audio);
        assert_eq!(trimmed.len(), FRAME + 100);
    }
}
