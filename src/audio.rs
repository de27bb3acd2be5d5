//! WAV audio output utilities.

use anyhow::{Context, Result};
use hound::{SampleFormat, WavSpec, WavWriter};
use std::fs;
use std::path::{Path, PathBuf};

/// Save audio samples to a mono float WAV file.
///
/// Args:
///     samples: Audio samples in range [-1.0, 1.0]
///     path: Output file path
///     sample_rate: Sample rate in Hz (22050 for the stock checkpoints)
pub fn save_wav(samples: &[f32], path: &Path, sample_rate: u32) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec).context("Failed to create WAV file")?;

    for &sample in samples {
        writer
            .write_sample(sample)
            .context("Failed to write sample")?;
    }

    writer.finalize().context("Failed to finalize WAV file")?;

    Ok(())
}

/// Randomized temp path for a synthesized utterance, under a per-app
/// directory in the system temp dir. Names never collide across consecutive
/// runs.
pub fn temp_wav_path(text: &str) -> Result<PathBuf> {
    let dir = std::env::temp_dir().join("sekai-tts");
    fs::create_dir_all(&dir).context("Failed to create temp audio directory")?;

    let stem: String = text
        .chars()
        .filter(|ch| ch.is_alphanumeric())
        .take(10)
        .collect();
    let prefix = if stem.is_empty() {
        "voice".to_string()
    } else {
        stem
    };

    let file = tempfile::Builder::new()
        .prefix(&format!("{prefix}_"))
        .suffix(".wav")
        .tempfile_in(&dir)
        .context("Failed to create temp WAV file")?;
    let (_file, path) = file.keep().context("Failed to keep temp WAV file")?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::NamedTempFile;

    #[test]
    fn test_save_wav() {
        let samples: Vec<f32> = (0..1000).map(|i| (i as f32 / 1000.0).sin()).collect();

        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        save_wav(&samples, path, 22050).unwrap();

        // WAV files start with "RIFF"
        let mut file = std::fs::File::open(path).unwrap();
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer).unwrap();
        assert_eq!(&buffer[0..4], b"RIFF");

        let reader = hound::WavReader::open(path).unwrap();
        assert_eq!(reader.spec().channels, 1);
        assert_eq!(reader.spec().sample_rate, 22050);
        assert_eq!(reader.len(), 1000);
    }

    #[test]
    fn temp_paths_do_not_collide() {
        let first = temp_wav_path("こんにちは").unwrap();
        let second = temp_wav_path("こんにちは").unwrap();
        assert_ne!(first, second);
        assert!(first.extension().is_some_and(|ext| ext == "wav"));
        std::fs::remove_file(&first).ok();
        std::fs::remove_file(&second).ok();
    }

    #[test]
    fn temp_path_for_symbol_only_text_gets_fallback_stem() {
        let path = temp_wav_path("?!").unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("voice_"));
        std::fs::remove_file(&path).ok();
    }
}
