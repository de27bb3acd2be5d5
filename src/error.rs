//! Structured error type for public API surfaces.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TtsError {
    ConfigLoad { message: String },
    ModelLoad { message: String },
    UnknownSymbol { message: String },
    InvalidSelection { message: String },
    Inference { message: String },
    NoAudio { message: String },
    NotInitialized { message: String },
    Io { message: String },
    Internal { message: String },
}

impl TtsError {
    pub fn from_anyhow(err: anyhow::Error) -> Self {
        let message = format!("{:#}", err);
        if message.contains("not loaded") || message.contains("not initialized") {
            return TtsError::NotInitialized { message };
        }
        if message.contains("configuration file") || message.contains("hyperparameter") {
            return TtsError::ConfigLoad { message };
        }
        if message.contains("checkpoint") || message.contains("model file") {
            return TtsError::ModelLoad { message };
        }
        if message.contains("not in symbol preset") {
            return TtsError::UnknownSymbol { message };
        }
        if message.contains("not among the offered") {
            return TtsError::InvalidSelection { message };
        }
        if message.contains("No synthesized audio") {
            return TtsError::NoAudio { message };
        }
        if message.contains("Inference failed") || message.contains("cleaner") {
            return TtsError::Inference { message };
        }
        if message.contains("Failed to open")
            || message.contains("Failed to read")
            || message.contains("Failed to write")
            || message.contains("Failed to create")
        {
            return TtsError::Io { message };
        }
        TtsError::Internal { message }
    }

    pub fn message(&self) -> &str {
        match self {
            TtsError::ConfigLoad { message }
            | TtsError::ModelLoad { message }
            | TtsError::UnknownSymbol { message }
            | TtsError::InvalidSelection { message }
            | TtsError::Inference { message }
            | TtsError::NoAudio { message }
            | TtsError::NotInitialized { message }
            | TtsError::Io { message }
            | TtsError::Internal { message } => message,
        }
    }
}

impl From<anyhow::Error> for TtsError {
    fn from(err: anyhow::Error) -> Self {
        Self::from_anyhow(err)
    }
}

impl std::fmt::Display for TtsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for TtsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_unknown_symbol() {
        let err = anyhow::anyhow!("character '@' is not in symbol preset 'default'");
        assert!(matches!(
            TtsError::from_anyhow(err),
            TtsError::UnknownSymbol { .. }
        ));
    }

    #[test]
    fn classifies_missing_state_as_not_initialized() {
        let err = anyhow::anyhow!("Configuration is not loaded");
        assert!(matches!(
            TtsError::from_anyhow(err),
            TtsError::NotInitialized { .. }
        ));
    }

    #[test]
    fn classifies_no_audio() {
        let err = anyhow::anyhow!("No synthesized audio to save");
        assert!(matches!(TtsError::from_anyhow(err), TtsError::NoAudio { .. }));
    }
}
