//! Model hyperparameters loaded from the external JSON configuration.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub const DEFAULT_SAMPLE_RATE: u32 = 22050;

/// Hyperparameters of a trained checkpoint. Consumed read-only; the nested
/// `model` object is passed through to the model loader untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct Hparams {
    pub train: TrainConfig,
    pub data: DataConfig,
    #[serde(default)]
    pub model: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrainConfig {
    pub segment_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    pub filter_length: u32,
    pub hop_length: u32,
    #[serde(default = "default_sampling_rate")]
    pub sampling_rate: u32,
    #[serde(default)]
    pub n_speakers: u32,
    #[serde(default)]
    pub add_blank: bool,
}

fn default_sampling_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}

impl Hparams {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).context("Failed to open configuration file")?;
        let reader = BufReader::new(file);
        let hps: Hparams =
            serde_json::from_reader(reader).context("Failed to parse configuration file")?;
        Ok(hps)
    }

    /// Linear-spectrogram channel count the model architecture is built with.
    pub fn spec_channels(&self) -> u32 {
        self.data.filter_length / 2 + 1
    }

    /// Training segment length in frames.
    pub fn segment_frames(&self) -> u32 {
        self.train.segment_size / self.data.hop_length
    }

    pub fn multi_speaker(&self) -> bool {
        self.data.n_speakers > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CONFIG_JSON: &str = r#"{
        "train": { "segment_size": 8192 },
        "data": {
            "filter_length": 1024,
            "hop_length": 256,
            "sampling_rate": 22050,
            "n_speakers": 4,
            "add_blank": true
        },
        "model": { "hidden_channels": 192 }
    }"#;

    #[test]
    fn parses_full_config() {
        let hps: Hparams = serde_json::from_str(CONFIG_JSON).unwrap();
        assert_eq!(hps.spec_channels(), 513);
        assert_eq!(hps.segment_frames(), 32);
        assert!(hps.multi_speaker());
        assert!(hps.data.add_blank);
        assert_eq!(hps.model["hidden_channels"], 192);
    }

    #[test]
    fn missing_optional_fields_take_defaults() {
        let hps: Hparams = serde_json::from_str(
            r#"{
                "train": { "segment_size": 8192 },
                "data": { "filter_length": 1024, "hop_length": 256 }
            }"#,
        )
        .unwrap();
        assert_eq!(hps.data.sampling_rate, DEFAULT_SAMPLE_RATE);
        assert_eq!(hps.data.n_speakers, 0);
        assert!(!hps.data.add_blank);
        assert!(!hps.multi_speaker());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Hparams::load(Path::new("/nonexistent/config.json")).unwrap_err();
        assert!(format!("{:#}", err).contains("configuration file"));
    }

    #[test]
    fn load_reports_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();
        let err = Hparams::load(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("parse configuration file"));
    }
}
