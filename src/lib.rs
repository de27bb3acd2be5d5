//! Character-Voice TTS Front-End Core
//!
//! Text normalization, preset and speaker dispatch, and a synthesis session
//! around externally supplied linguistic cleaner and neural model backends.

pub mod audio;
pub mod cleaners;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod session;
pub mod speakers;
pub mod symbols;

pub use audio::{save_wav, temp_wav_path};
pub use cleaners::{strategy_for_preset, CleanerBackend, CleanerStrategy, DisabledCleanerBackend};
pub use config::{Hparams, DEFAULT_SAMPLE_RATE};
pub use error::TtsError;
pub use model::{DisabledModelLoader, InferenceParams, ModelLoader, Synthesizer};
pub use normalize::{intersperse, normalize, text_to_sequence, PAD_ID};
pub use session::{speed_scale, Session, SessionStatus, SynthesisResult};
pub use speakers::{resolve_speakers, SpeakerRoster};
pub use symbols::{resolve_preset, SymbolPreset};

#[cfg(feature = "cleaner-jpreprocess")]
pub use cleaners::JPreprocessCleaner;
#[cfg(feature = "onnx")]
pub use model::OnnxModelLoader;
