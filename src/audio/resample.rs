//! Sample-format conversion: channel downmix and resampling.
//!
//! Whisper consumes **16 kHz mono `f32`** audio.  Capture devices deliver
//! whatever their native format is, so every chunk goes through two steps:
//!
//! 1. [`downmix_to_mono`] — average interleaved channels into one.
//! 2. [`resample_to_16k`] — linear-interpolation resample to 16 000 Hz.
//!
//! Linear interpolation is adequate for speech headed into Whisper; the
//! model's own mel front-end is far more lossy than the interpolation error.

/// Target rate expected by the STT engine.
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

// ---------------------------------------------------------------------------
// downmix_to_mono
// ---------------------------------------------------------------------------

/// Average interleaved multi-channel audio into mono.
///
/// Output length is `samples.len() / channels`.  Already-mono input is
/// returned as an owned copy; `channels == 0` yields an empty vector.
///
/// # Example
///
/// ```rust
/// use dictate::audio::downmix_to_mono;
///
/// let stereo = [0.5_f32, -0.5, 0.2, -0.2]; // L R L R
/// let mono = downmix_to_mono(&stereo, 2);
/// assert_eq!(mono.len(), 2);
/// assert!(mono[0].abs() < 1e-6);
/// ```
pub fn downmix_to_mono(samples: &[f32], channels: u16) -> Vec<f32> {
    match channels {
        0 => Vec::new(),
        1 => samples.to_vec(),
        n => {
            let n = usize::from(n);
            samples
                .chunks_exact(n)
                .map(|frame| frame.iter().sum::<f32>() / n as f32)
                .collect()
        }
    }
}

// ---------------------------------------------------------------------------
// resample_to_16k
// ---------------------------------------------------------------------------

/// Resample mono `samples` from `source_rate` Hz to 16 000 Hz.
///
/// Linear interpolation between neighbouring source samples.  Input already
/// at 16 kHz is copied through untouched; empty input yields empty output.
/// Output length is `samples.len() * 16_000 / source_rate`, rounded up.
///
/// # Example
///
/// ```rust
/// use dictate::audio::resample_to_16k;
///
/// let ten_ms_at_48k = vec![0.5_f32; 480];
/// let out = resample_to_16k(&ten_ms_at_48k, 48_000);
/// assert_eq!(out.len(), 160); // 10 ms at 16 kHz
/// ```
pub fn resample_to_16k(samples: &[f32], source_rate: u32) -> Vec<f32> {
    if source_rate == TARGET_SAMPLE_RATE {
        return samples.to_vec();
    }
    if samples.is_empty() {
        return Vec::new();
    }

    let step = f64::from(source_rate) / f64::from(TARGET_SAMPLE_RATE);
    let output_len = (samples.len() as f64 / step).ceil() as usize;

    (0..output_len)
        .map(|i| {
            let pos = i as f64 * step;
            let idx = pos as usize;
            let frac = (pos - idx as f64) as f32;

            match (samples.get(idx), samples.get(idx + 1)) {
                (Some(&a), Some(&b)) => a * (1.0 - frac) + b * frac,
                (Some(&a), None) => a,
                _ => 0.0,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ---- downmix_to_mono ---------------------------------------------------

    #[test]
    fn mono_input_passes_through() {
        let input = vec![0.1_f32, 0.2, 0.3];
        assert_eq!(downmix_to_mono(&input, 1), input);
    }

    #[test]
    fn stereo_frames_average() {
        let out = downmix_to_mono(&[1.0_f32, -1.0, 0.5, 0.5], 2);
        assert_eq!(out.len(), 2);
        assert!(out[0].abs() < 1e-6);
        assert!((out[1] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn four_channel_frame_averages() {
        let out = downmix_to_mono(&[0.4_f32; 4], 4);
        assert_eq!(out.len(), 1);
        assert!((out[0] - 0.4).abs() < 1e-6);
    }

    #[test]
    fn zero_channels_yields_empty() {
        assert!(downmix_to_mono(&[1.0_f32, 2.0], 0).is_empty());
    }

    #[test]
    fn trailing_partial_frame_is_dropped() {
        // 5 samples at 2 channels → 2 full frames, the odd sample is dropped
        let out = downmix_to_mono(&[1.0_f32, 1.0, 2.0, 2.0, 9.0], 2);
        assert_eq!(out.len(), 2);
    }

    // ---- resample_to_16k ---------------------------------------------------

    #[test]
    fn already_16k_is_untouched() {
        let input: Vec<f32> = (0..160).map(|i| i as f32 / 160.0).collect();
        assert_eq!(resample_to_16k(&input, 16_000), input);
    }

    #[test]
    fn empty_input_yields_empty() {
        assert!(resample_to_16k(&[], 48_000).is_empty());
    }

    #[test]
    fn downsample_48k_length() {
        let out = resample_to_16k(&vec![0.5_f32; 480], 48_000);
        assert_eq!(out.len(), 160);
    }

    #[test]
    fn downsample_44100_length_close_to_expected() {
        let out = resample_to_16k(&vec![0.0_f32; 44_100], 44_100);
        assert!(
            out.len().abs_diff(16_000) <= 1,
            "expected ~16000, got {}",
            out.len()
        );
    }

    #[test]
    fn upsample_8k_doubles_length() {
        let out = resample_to_16k(&vec![0.0_f32; 80], 8_000);
        assert_eq!(out.len(), 160);
    }

    #[test]
    fn dc_signal_keeps_amplitude() {
        let out = resample_to_16k(&vec![0.5_f32; 480], 48_000);
        for &s in &out {
            assert!((s - 0.5).abs() < 1e-5, "amplitude drift: {s}");
        }
    }
}
