//! Cleaning-strategy dispatch and the external linguistic cleaner seam.

use anyhow::Result;

/// The cleaner families the trained model checkpoints expect.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CleanerStrategy {
    /// Tokenized romaji stream (preset 1 and 4 vocabularies).
    Tokenization,
    /// Plain romaji with pitch-accent marks (preset 2 vocabulary).
    Romaji,
    /// Romaji with accent marks and the extended affricate set (preset 3).
    RomajiAccent,
}

/// Fixed preset-to-cleaner table. Unrecognized preset IDs fall back to the
/// strategy used by preset 1.
const PRESET_TO_STRATEGY: &[(u32, CleanerStrategy)] = &[
    (1, CleanerStrategy::Tokenization),
    (2, CleanerStrategy::Romaji),
    (3, CleanerStrategy::RomajiAccent),
    (4, CleanerStrategy::Tokenization),
];

pub fn strategy_for_preset(preset_id: u32) -> CleanerStrategy {
    PRESET_TO_STRATEGY
        .iter()
        .find(|(id, _)| *id == preset_id)
        .map(|(_, strategy)| *strategy)
        .unwrap_or(CleanerStrategy::Tokenization)
}

/// Externally supplied linguistic cleaner.
///
/// Turns raw Japanese text into the token stream a symbol preset indexes.
pub trait CleanerBackend: Send + Sync {
    fn clean(&self, text: &str, strategy: CleanerStrategy) -> Result<String>;
}

/// Placeholder backend used when no cleaner feature is compiled in.
pub struct DisabledCleanerBackend;

impl CleanerBackend for DisabledCleanerBackend {
    fn clean(&self, _text: &str, _strategy: CleanerStrategy) -> Result<String> {
        anyhow::bail!("cleaner backend is disabled; enable the cleaner-jpreprocess feature")
    }
}

#[cfg(feature = "cleaner-jpreprocess")]
pub use jpreprocess_backend::JPreprocessCleaner;

#[cfg(feature = "cleaner-jpreprocess")]
mod jpreprocess_backend {
    use super::{CleanerBackend, CleanerStrategy};
    use anyhow::Result;
    use jpreprocess::{
        kind::JPreprocessDictionaryKind, DefaultFetcher, JPreprocess, JPreprocessConfig,
        SystemDictionaryConfig,
    };

    /// Japanese cleaner backed by the JPreprocess front-end.
    pub struct JPreprocessCleaner {
        inner: JPreprocess<DefaultFetcher>,
    }

    impl JPreprocessCleaner {
        pub fn new() -> Result<Self> {
            let config = JPreprocessConfig {
                dictionary: SystemDictionaryConfig::Bundled(JPreprocessDictionaryKind::NaistJdic),
                user_dictionary: None,
            };
            let inner = JPreprocess::from_config(config)
                .map_err(|err| anyhow::anyhow!("cleaner init failed: {err}"))?;
            Ok(Self { inner })
        }
    }

    impl CleanerBackend for JPreprocessCleaner {
        fn clean(&self, text: &str, strategy: CleanerStrategy) -> Result<String> {
            let labels = self
                .inner
                .extract_fullcontext(text)
                .map_err(|err| anyhow::anyhow!("cleaner conversion failed: {err}"))?;

            let mut output = String::new();
            for label in &labels {
                let full = label.to_string();
                let Some(phoneme) = phoneme_of(&full) else {
                    continue;
                };
                match phoneme {
                    "sil" => {}
                    "pau" => output.push(','),
                    other => output.push_str(map_phoneme(strategy, other)),
                }
            }

            if output.is_empty() {
                anyhow::bail!("cleaner produced no symbols for input");
            }
            Ok(output)
        }
    }

    /// Phoneme field of a full-context label (between `-` and `+`).
    fn phoneme_of(label: &str) -> Option<&str> {
        label.split('-').nth(1)?.split('+').next()
    }

    fn map_phoneme(strategy: CleanerStrategy, phoneme: &str) -> &str {
        match (strategy, phoneme) {
            (CleanerStrategy::Tokenization, "cl") => "*",
            (_, "cl") => "Q",
            (CleanerStrategy::Romaji | CleanerStrategy::RomajiAccent, "sh") => "\u{283}",
            (CleanerStrategy::Romaji | CleanerStrategy::RomajiAccent, "ch") => "\u{2a7}",
            (CleanerStrategy::RomajiAccent, "ts") => "\u{2a6}",
            _ => phoneme,
        }
    }
}
