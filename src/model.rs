//! External synthesizer seam: checkpoint loading and the inference call.

use crate::config::Hparams;
use anyhow::Result;
use std::path::Path;

/// Quality constants the checkpoints were tuned with, plus the user-adjustable
/// speed scale.
#[derive(Debug, Clone, Copy)]
pub struct InferenceParams {
    pub noise_scale: f32,
    pub noise_scale_w: f32,
    pub length_scale: f32,
}

impl InferenceParams {
    pub fn with_speed(length_scale: f32) -> Self {
        Self {
            noise_scale: 0.667,
            noise_scale_w: 0.8,
            length_scale,
        }
    }
}

/// Loaded neural model. Inference is a pass-through: the core only assembles
/// the arguments.
pub trait Synthesizer: Send + Sync {
    /// Render a normalized symbol sequence to waveform samples.
    ///
    /// `speaker` is `Some` only for multi-speaker configurations.
    fn infer(
        &self,
        sequence: &[i64],
        speaker: Option<i64>,
        params: &InferenceParams,
    ) -> Result<Vec<f32>>;
}

/// Constructs a [`Synthesizer`] from a checkpoint file, using the
/// architecture parameters of the loaded hyperparameters.
pub trait ModelLoader: Send + Sync {
    fn load(
        &self,
        checkpoint: &Path,
        hps: &Hparams,
        n_symbols: usize,
    ) -> Result<Box<dyn Synthesizer>>;
}

/// Placeholder loader used when no synthesis feature is compiled in.
pub struct DisabledModelLoader;

impl ModelLoader for DisabledModelLoader {
    fn load(
        &self,
        _checkpoint: &Path,
        _hps: &Hparams,
        _n_symbols: usize,
    ) -> Result<Box<dyn Synthesizer>> {
        anyhow::bail!("cannot load model file: the onnx backend feature is not enabled")
    }
}

#[cfg(feature = "onnx")]
pub use onnx_backend::OnnxModelLoader;

#[cfg(feature = "onnx")]
mod onnx_backend {
    use super::{Hparams, InferenceParams, ModelLoader, Synthesizer};
    use anyhow::{Context, Result};
    use ndarray::{Array1, Array2};
    use ort::{inputs, session::Session, value::Value};
    use std::path::Path;
    use std::sync::Mutex;

    /// Loads VITS checkpoints exported to ONNX.
    pub struct OnnxModelLoader;

    struct OnnxSynthesizer {
        session: Mutex<Session>,
    }

    impl ModelLoader for OnnxModelLoader {
        fn load(
            &self,
            checkpoint: &Path,
            _hps: &Hparams,
            _n_symbols: usize,
        ) -> Result<Box<dyn Synthesizer>> {
            let session = Session::builder()
                .context("Failed to create session builder")?
                .commit_from_file(checkpoint)
                .context("Failed to load model file")?;
            Ok(Box::new(OnnxSynthesizer {
                session: Mutex::new(session),
            }))
        }
    }

    impl Synthesizer for OnnxSynthesizer {
        fn infer(
            &self,
            sequence: &[i64],
            speaker: Option<i64>,
            params: &InferenceParams,
        ) -> Result<Vec<f32>> {
            let len = sequence.len();
            let input_ids = Array2::from_shape_vec((1, len), sequence.to_vec())
                .context("Failed to shape input sequence")?;
            let input_lengths = Array1::from_vec(vec![len as i64]);
            let scales = Array1::from_vec(vec![
                params.noise_scale,
                params.length_scale,
                params.noise_scale_w,
            ]);

            let input_value = Value::from_array(input_ids)?;
            let lengths_value = Value::from_array(input_lengths)?;
            let scales_value = Value::from_array(scales)?;

            let mut session = self
                .session
                .lock()
                .map_err(|_| anyhow::anyhow!("Inference failed: session poisoned"))?;

            let outputs = match speaker {
                Some(sid) => {
                    let sid_value = Value::from_array(Array1::from_vec(vec![sid]))?;
                    session
                        .run(inputs![
                            "input" => &input_value,
                            "input_lengths" => &lengths_value,
                            "scales" => &scales_value,
                            "sid" => &sid_value,
                        ])
                        .context("Inference failed")?
                }
                None => session
                    .run(inputs![
                        "input" => &input_value,
                        "input_lengths" => &lengths_value,
                        "scales" => &scales_value,
                    ])
                    .context("Inference failed")?,
            };

            let output = outputs["output"]
                .try_extract_tensor::<f32>()
                .context("Inference failed: unexpected output tensor")?;
            Ok(output.1.to_vec())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inference_params_carry_fixed_quality_constants() {
        let params = InferenceParams::with_speed(1.5);
        assert!((params.noise_scale - 0.667).abs() < f32::EPSILON);
        assert!((params.noise_scale_w - 0.8).abs() < f32::EPSILON);
        assert!((params.length_scale - 1.5).abs() < f32::EPSILON);
    }

    #[test]
    fn disabled_loader_reports_itself() {
        let hps: Hparams = serde_json::from_str(
            r#"{"train":{"segment_size":8192},"data":{"filter_length":1024,"hop_length":256}}"#,
        )
        .unwrap();
        let err = DisabledModelLoader
            .load(Path::new("model.pth"), &hps, 43)
            .err()
            .unwrap();
        assert!(err.to_string().contains("cannot load model file"));
    }
}
