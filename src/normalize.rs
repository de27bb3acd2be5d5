//! Cleaned text to symbol-ID sequences, with optional blank-interspersing.

use crate::symbols::SymbolPreset;
use anyhow::Result;

/// Padding token interspersed between real symbols when a model was trained
/// with blank-interspersing.
pub const PAD_ID: i64 = 0;

/// Map each cleaned symbol to its ID in the preset vocabulary.
///
/// Unknown characters are an error, never silently dropped: they indicate the
/// text falls outside the model's trained vocabulary and the caller must
/// strip them or surface the failure.
pub fn text_to_sequence(cleaned: &str, preset: &SymbolPreset) -> Result<Vec<i64>> {
    let mut sequence = Vec::with_capacity(cleaned.chars().count());
    for ch in cleaned.chars() {
        let id = preset.index_of(ch).ok_or_else(|| {
            anyhow::anyhow!(
                "character '{}' is not in symbol preset '{}'",
                ch,
                preset.name
            )
        })?;
        sequence.push(id);
    }
    Ok(sequence)
}

/// Intersperse `pad` between consecutive items: `[a, b, c]` becomes
/// `[a, pad, b, pad, c]`. Length is `2k - 1` for `k >= 1` inputs.
pub fn intersperse(sequence: &[i64], pad: i64) -> Vec<i64> {
    let mut result = Vec::with_capacity(sequence.len().saturating_mul(2));
    for (i, &id) in sequence.iter().enumerate() {
        if i > 0 {
            result.push(pad);
        }
        result.push(id);
    }
    result
}

/// Full normalization of an already-cleaned token stream.
pub fn normalize(cleaned: &str, preset: &SymbolPreset, add_blank: bool) -> Result<Vec<i64>> {
    let sequence = text_to_sequence(cleaned, preset)?;
    if add_blank {
        Ok(intersperse(&sequence, PAD_ID))
    } else {
        Ok(sequence)
    }
}
