//! Debug WAV dumps of recording sessions.
//!
//! When `recording.save_sessions` is enabled, every drained session is also
//! written to the recordings directory as `session_{unix_secs}.wav` (16 kHz,
//! mono, 32-bit float).  [`cleanup_recordings`] applies the retention policy
//! on startup so the directory never grows unbounded.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use hound::{SampleFormat, WavSpec, WavWriter};

use super::resample::TARGET_SAMPLE_RATE;

/// Prefix of dump files under the recordings directory.
const FILE_PREFIX: &str = "session_";

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Write 16 kHz mono f32 `samples` as a WAV file at `path`, creating parent
/// directories as needed.
///
/// # Errors
///
/// Fails when the directory cannot be created or the file cannot be written.
pub fn write_wav(path: &Path, samples: &[f32]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("failed to create recordings directory")?;
    }

    let spec = WavSpec {
        channels: 1,
        sample_rate: TARGET_SAMPLE_RATE,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec).context("failed to create WAV file")?;
    for &sample in samples {
        writer.write_sample(sample).context("failed to write sample")?;
    }
    writer.finalize().context("failed to finalize WAV file")?;

    log::debug!("saved session dump: {} ({} samples)", path.display(), samples.len());
    Ok(())
}

/// Path for a new session dump, stamped with the current unix time.
pub fn session_wav_path(recordings_dir: &Path) -> PathBuf {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    recordings_dir.join(format!("{FILE_PREFIX}{secs}.wav"))
}

// ---------------------------------------------------------------------------
// Retention cleanup
// ---------------------------------------------------------------------------

/// Delete session dumps older than `retention_days` or beyond the newest
/// `max_count` files.  Either limit can be disabled by passing `0`.
///
/// Returns the number of files deleted.  Individual deletion failures are
/// logged and skipped.
///
/// # Errors
///
/// Fails only when the directory exists but cannot be listed.
pub fn cleanup_recordings(dir: &Path, retention_days: u32, max_count: usize) -> Result<usize> {
    if !dir.exists() {
        return Ok(0);
    }

    // (path, unix timestamp parsed from the file name), newest first
    let mut dumps: Vec<(PathBuf, u64)> = std::fs::read_dir(dir)
        .context("failed to read recordings directory")?
        .filter_map(std::result::Result::ok)
        .filter_map(|entry| {
            let path = entry.path();
            let stamp = parse_timestamp(&path)?;
            Some((path, stamp))
        })
        .collect();
    dumps.sort_by(|a, b| b.1.cmp(&a.1));

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("failed to read system time")?
        .as_secs();

    let mut to_delete: Vec<&PathBuf> = Vec::new();

    if retention_days > 0 {
        let retention_secs = u64::from(retention_days) * 24 * 60 * 60;
        to_delete.extend(
            dumps
                .iter()
                .filter(|(_, stamp)| now.saturating_sub(*stamp) > retention_secs)
                .map(|(path, _)| path),
        );
    }

    if max_count > 0 && dumps.len() > max_count {
        to_delete.extend(dumps.iter().skip(max_count).map(|(path, _)| path));
    }

    to_delete.sort();
    to_delete.dedup();

    let mut deleted = 0;
    for path in to_delete {
        match std::fs::remove_file(path) {
            Ok(()) => {
                deleted += 1;
                log::debug!("deleted old session dump: {}", path.display());
            }
            Err(e) => log::warn!("failed to delete {}: {e}", path.display()),
        }
    }

    if deleted > 0 {
        log::info!("recordings cleanup: deleted {deleted} of {} dumps", dumps.len());
    }
    Ok(deleted)
}

/// Extract the unix timestamp from `session_{secs}.wav`; `None` for files
/// that don't match the dump naming scheme.
fn parse_timestamp(path: &Path) -> Option<u64> {
    if !path.is_file() {
        return None;
    }
    let name = path.file_name()?.to_str()?;
    name.strip_prefix(FILE_PREFIX)?
        .strip_suffix(".wav")?
        .parse()
        .ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"").unwrap();
    }

    // ---- write_wav ---------------------------------------------------------

    #[test]
    fn written_wav_reads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session_1.wav");
        let samples: Vec<f32> = (0..480).map(|i| (i as f32 / 480.0) - 0.5).collect();

        write_wav(&path, &samples).unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 16_000);
        assert_eq!(spec.sample_format, hound::SampleFormat::Float);

        let read: Vec<f32> = reader.samples::<f32>().map(|s| s.unwrap()).collect();
        assert_eq!(read.len(), samples.len());
        assert!((read[0] - samples[0]).abs() < 1e-6);
    }

    #[test]
    fn write_wav_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("session_2.wav");
        write_wav(&path, &[0.0; 16]).unwrap();
        assert!(path.exists());
    }

    // ---- session_wav_path --------------------------------------------------

    #[test]
    fn session_path_matches_naming_scheme() {
        let path = session_wav_path(Path::new("/tmp/recordings"));
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with(FILE_PREFIX));
        assert!(name.ends_with(".wav"));
        let stamp: &str = &name[FILE_PREFIX.len()..name.len() - 4];
        assert!(stamp.parse::<u64>().is_ok());
    }

    // ---- cleanup_recordings ------------------------------------------------

    #[test]
    fn missing_dir_cleans_nothing() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert_eq!(cleanup_recordings(&missing, 7, 10).unwrap(), 0);
    }

    #[test]
    fn count_limit_keeps_newest() {
        let dir = tempdir().unwrap();
        for stamp in [100, 200, 300, 400] {
            touch(dir.path(), &format!("session_{stamp}.wav"));
        }

        // retention disabled, keep the 2 newest
        let deleted = cleanup_recordings(dir.path(), 0, 2).unwrap();
        assert_eq!(deleted, 2);
        assert!(dir.path().join("session_400.wav").exists());
        assert!(dir.path().join("session_300.wav").exists());
        assert!(!dir.path().join("session_200.wav").exists());
        assert!(!dir.path().join("session_100.wav").exists());
    }

    #[test]
    fn age_limit_deletes_stale_dumps() {
        let dir = tempdir().unwrap();
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        touch(dir.path(), &format!("session_{now}.wav"));
        touch(dir.path(), "session_1000.wav"); // 1970 — well past any retention

        let deleted = cleanup_recordings(dir.path(), 7, 0).unwrap();
        assert_eq!(deleted, 1);
        assert!(dir.path().join(format!("session_{now}.wav")).exists());
    }

    #[test]
    fn unrelated_files_are_ignored() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "session_abc.wav"); // non-numeric stamp
        touch(dir.path(), "session_50.wav");

        let deleted = cleanup_recordings(dir.path(), 7, 0).unwrap();
        assert_eq!(deleted, 1);
        assert!(dir.path().join("notes.txt").exists());
        assert!(dir.path().join("session_abc.wav").exists());
    }

    #[test]
    fn zero_limits_disable_cleanup() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "session_1000.wav");
        assert_eq!(cleanup_recordings(dir.path(), 0, 0).unwrap(), 0);
        assert!(dir.path().join("session_1000.wav").exists());
    }
}
