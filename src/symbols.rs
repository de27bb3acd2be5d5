//! Symbol presets and configuration-to-preset resolution.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Fixed symbol vocabulary for one trained model family.
///
/// A symbol's position is its token ID. Model weights were trained against a
/// fixed vocabulary ordering, so presets are immutable once built.
#[derive(Debug)]
pub struct SymbolPreset {
    pub id: u32,
    pub name: &'static str,
    symbols: Vec<char>,
    index: HashMap<char, i64>,
}

impl SymbolPreset {
    fn new(id: u32, name: &'static str, inventory: &str) -> Self {
        let symbols: Vec<char> = inventory.chars().collect();
        let mut index = HashMap::with_capacity(symbols.len());
        for (i, &ch) in symbols.iter().enumerate() {
            // First occurrence wins if the inventory repeats a character.
            index.entry(ch).or_insert(i as i64);
        }
        Self {
            id,
            name,
            symbols,
            index,
        }
    }

    /// Token ID of a symbol, or `None` if it is outside this preset's
    /// trained vocabulary.
    pub fn index_of(&self, ch: char) -> Option<i64> {
        self.index.get(&ch).copied()
    }

    pub fn contains(&self, ch: char) -> bool {
        self.index.contains_key(&ch)
    }

    /// Number of symbols in the vocabulary (model input dimension).
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

const DEFAULT_PRESET: &str = "default";

/// Fixed mapping from configuration file name to preset name. Names absent
/// from this table resolve to the default preset.
const CONFIG_TO_PRESET: &[(&str, &str)] = &[
    ("mmj.json", "default"),
    ("vbs.json", "default"),
    ("ws.json", "default"),
    ("mafuyu.json", "default"),
];

fn presets() -> &'static [SymbolPreset] {
    static PRESETS: OnceLock<Vec<SymbolPreset>> = OnceLock::new();
    PRESETS.get_or_init(|| {
        vec![
            SymbolPreset::new(
                1,
                "default",
                " !\"&*,-.?ABCINU[]abcdefghijklmnoprstuwyz{}~",
            ),
            SymbolPreset::new(
                2,
                "preset2",
                "_,.!?-AEINOQUabdefghijkmnoprstuvwyz\u{283}\u{2a7}\u{2193}\u{2191} ",
            ),
            SymbolPreset::new(
                3,
                "preset3",
                "_,.!?-~\u{2026}AEINOQUabdefghijkmnoprstuvwyz\u{283}\u{2a7}\u{2a6}\u{2193}\u{2191} ",
            ),
            SymbolPreset::new(
                4,
                "ipa",
                concat!(
                    "_;:,.!?\u{a1}\u{bf}\u{2014}\u{2026}\"\u{ab}\u{bb}\u{201c}\u{201d} ",
                    "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
                    "abcdefghijklmnopqrstuvwxyz",
                    "ɑɐɒæɓʙβɔɕçɗɖðʤəɘɚɛɜɝɞɟʄɡɠɢʛɦɧħɥʜɨɪʝɭɬɫɮʟɱɯɰŋɳɲɴøɵɸθœɶʘ",
                    "ɹɺɾɻʀʁɽʂʃʈʧʉʊʋⱱʌɣɤʍχʎʏʑʐʒʔʡʕʢǀǁǂǃˈˌːˑʼʴʰʱʲʷˠˤ˞↓↑→↗↘'̩'ᵻ",
                ),
            ),
        ]
    })
}

fn preset_by_name(name: &str) -> &'static SymbolPreset {
    presets()
        .iter()
        .find(|preset| preset.name == name)
        .unwrap_or(&presets()[0])
}

/// Resolve the symbol preset for a configuration file name.
///
/// Absence from the mapping is not an error: unknown names use the default
/// preset.
pub fn resolve_preset(config_file_name: &str) -> &'static SymbolPreset {
    let name = CONFIG_TO_PRESET
        .iter()
        .find(|(config, _)| *config == config_file_name)
        .map(|(_, preset)| *preset)
        .unwrap_or(DEFAULT_PRESET);
    preset_by_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapped_configs_resolve_to_their_preset() {
        for (config, _) in CONFIG_TO_PRESET {
            assert_eq!(resolve_preset(config).name, "default");
        }
    }

    #[test]
    fn unmapped_config_falls_back_to_default() {
        assert_eq!(resolve_preset("unknown.json").name, "default");
        assert_eq!(resolve_preset("unknown.json").id, 1);
    }

    #[test]
    fn symbol_index_is_list_position() {
        let preset = resolve_preset("mmj.json");
        assert_eq!(preset.index_of(' '), Some(0));
        assert_eq!(preset.index_of('!'), Some(1));
        assert_eq!(preset.index_of('~'), Some(preset.len() as i64 - 1));
        assert_eq!(preset.index_of('@'), None);
    }

    #[test]
    fn presets_have_distinct_ids() {
        let ids: Vec<u32> = presets().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn pad_symbol_is_index_zero_for_underscore_presets() {
        let preset = preset_by_name("preset2");
        assert_eq!(preset.index_of('_'), Some(0));
    }
}
