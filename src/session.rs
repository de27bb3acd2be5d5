//! Synthesis session: owned mutable state for one loaded model.

use crate::audio::{save_wav, temp_wav_path};
use crate::cleaners::{strategy_for_preset, CleanerBackend, DisabledCleanerBackend};
use crate::config::Hparams;
use crate::model::{DisabledModelLoader, InferenceParams, ModelLoader, Synthesizer};
use crate::normalize::normalize;
use crate::speakers::{resolve_speakers, SpeakerRoster};
use crate::symbols::{resolve_preset, SymbolPreset};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Map the UI speed slider (50-200) to the inference length scale (0.50-2.00).
pub fn speed_scale(slider: u32) -> f32 {
    slider.clamp(50, 200) as f32 / 100.0
}

#[derive(Clone, Debug)]
pub struct SynthesisResult {
    pub audio: Vec<f32>,
    pub sample_rate: u32,
}

#[derive(Clone, Debug)]
pub struct SessionStatus {
    pub config: Option<String>,
    pub model_loaded: bool,
    pub preset: &'static str,
    pub multi_speaker: bool,
    pub speaker_labels: Vec<String>,
    pub speaker_index: usize,
}

/// One synthesis session.
///
/// Owns the loaded hyperparameters, the active symbol preset, the speaker
/// roster, the model, and the last synthesized waveform. Single-threaded and
/// request-at-a-time; loading a configuration or model replaces the relevant
/// state wholesale, so nothing holds a stale reference past a reload.
pub struct Session {
    cleaner: Box<dyn CleanerBackend>,
    loader: Box<dyn ModelLoader>,
    config_name: Option<String>,
    hps: Option<Hparams>,
    preset: &'static SymbolPreset,
    roster: Option<SpeakerRoster>,
    speaker_index: usize,
    model: Option<Box<dyn Synthesizer>>,
    last_audio: Option<SynthesisResult>,
    last_text: String,
}

impl Session {
    pub fn new() -> Self {
        Self::with_backends(Box::new(DisabledCleanerBackend), Box::new(DisabledModelLoader))
    }

    pub fn with_backends(cleaner: Box<dyn CleanerBackend>, loader: Box<dyn ModelLoader>) -> Self {
        Self {
            cleaner,
            loader,
            config_name: None,
            hps: None,
            preset: resolve_preset(""),
            roster: None,
            speaker_index: 0,
            model: None,
            last_audio: None,
            last_text: String::new(),
        }
    }

    /// Load a hyperparameter file and resolve the preset and speaker roster
    /// from its file name. A model loaded against a previous configuration is
    /// dropped, since its architecture may no longer match.
    pub fn load_config(&mut self, path: &Path) -> Result<()> {
        let hps = Hparams::load(path)?;
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .context("configuration file has no readable name")?
            .to_string();

        let preset = resolve_preset(&name);
        let roster = resolve_speakers(&name);
        tracing::info!(
            config = %name,
            preset = preset.name,
            multi_speaker = roster.multi_speaker,
            "configuration loaded"
        );

        self.config_name = Some(name);
        self.hps = Some(hps);
        self.preset = preset;
        self.roster = Some(roster);
        self.speaker_index = 0;
        self.model = None;
        Ok(())
    }

    /// Load a checkpoint through the external model loader.
    pub fn load_model(&mut self, path: &Path) -> Result<()> {
        let hps = self.hps.as_ref().context("Configuration is not loaded")?;
        let model = self
            .loader
            .load(path, hps, self.preset.len())
            .context("Failed to load checkpoint")?;
        tracing::info!(checkpoint = %path.display(), "model loaded");
        self.model = Some(model);
        Ok(())
    }

    /// Select a speaker by label. Single-speaker configurations resolve every
    /// selection to index 0.
    pub fn select_speaker(&mut self, label: &str) -> Result<usize> {
        let roster = self.roster.as_ref().context("Configuration is not loaded")?;
        let index = roster.index_of(label)?;
        tracing::info!(speaker = label, index, "speaker selected");
        self.speaker_index = index;
        Ok(index)
    }

    pub fn speaker_labels(&self) -> &[String] {
        self.roster
            .as_ref()
            .map(|roster| roster.labels.as_slice())
            .unwrap_or(&[])
    }

    /// Synthesize text at the given speed-slider value (50-200).
    pub fn synthesize(&mut self, text: &str, speed_slider: u32) -> Result<SynthesisResult> {
        let hps = self.hps.as_ref().context("Configuration is not loaded")?;
        let model = self.model.as_ref().context("Model is not loaded")?;
        let roster = self.roster.as_ref().context("Configuration is not loaded")?;

        let raw = text.replace('\n', " ").trim().to_string();
        if raw.is_empty() {
            anyhow::bail!("no text to synthesize");
        }

        let strategy = strategy_for_preset(self.preset.id);
        let cleaned = self
            .cleaner
            .clean(&raw, strategy)
            .context("cleaner failed")?;
        let sequence = normalize(&cleaned, self.preset, hps.data.add_blank)?;

        let speaker = roster.multi_speaker.then_some(self.speaker_index as i64);
        let params = InferenceParams::with_speed(speed_scale(speed_slider));
        let audio = model
            .infer(&sequence, speaker, &params)
            .context("Inference failed")?;

        tracing::info!(
            symbols = sequence.len(),
            samples = audio.len(),
            speed = params.length_scale,
            "synthesis complete"
        );

        let result = SynthesisResult {
            audio,
            sample_rate: hps.data.sampling_rate,
        };
        self.last_audio = Some(result.clone());
        self.last_text = raw;
        Ok(result)
    }

    /// Write the last synthesized waveform to `path`.
    pub fn save_audio(&self, path: &Path) -> Result<()> {
        let last = self
            .last_audio
            .as_ref()
            .context("No synthesized audio to save")?;
        save_wav(&last.audio, path, last.sample_rate)
    }

    /// Write the last synthesized waveform to a randomized temp file and
    /// return its path (the playback handoff of the original front-end).
    pub fn write_temp_audio(&self) -> Result<PathBuf> {
        let last = self
            .last_audio
            .as_ref()
            .context("No synthesized audio to save")?;
        let path = temp_wav_path(&self.last_text)?;
        save_wav(&last.audio, &path, last.sample_rate)?;
        Ok(path)
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            config: self.config_name.clone(),
            model_loaded: self.model.is_some(),
            preset: self.preset.name,
            multi_speaker: self
                .roster
                .as_ref()
                .is_some_and(|roster| roster.multi_speaker),
            speaker_labels: self.speaker_labels().to_vec(),
            speaker_index: self.speaker_index,
        }
    }

    pub fn reset(&mut self) {
        self.config_name = None;
        self.hps = None;
        self.preset = resolve_preset("");
        self.roster = None;
        self.speaker_index = 0;
        self.model = None;
        self.last_audio = None;
        self.last_text.clear();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
