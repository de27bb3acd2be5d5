//! Speaker roster resolution and speaker-index selection.

use anyhow::Result;

/// Fixed multi-speaker groups keyed by configuration file name. A character's
/// position in its group is the speaker ID passed to inference.
const MULTI_SPEAKER_GROUPS: &[(&str, &[&str])] = &[
    ("mmj.json", &["minori", "haruka", "airi", "shizuku"]),
    ("vbs.json", &["akito", "an", "kohane", "toya"]),
    ("ws.json", &["emu", "nene", "rui", "tsukasa"]),
    ("mafuyu.json", &["white", "black"]),
];

/// Speaker choices for one loaded configuration.
///
/// Single-speaker configurations get a one-entry roster labelled with the
/// configuration file's stem, and every selection resolves to index 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakerRoster {
    pub multi_speaker: bool,
    pub labels: Vec<String>,
}

impl SpeakerRoster {
    /// Zero-based position of `label` among the offered choices.
    pub fn index_of(&self, label: &str) -> Result<usize> {
        if !self.multi_speaker {
            return Ok(0);
        }
        self.labels
            .iter()
            .position(|candidate| candidate == label)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "speaker '{}' is not among the offered choices {:?}",
                    label,
                    self.labels
                )
            })
    }

    pub fn default_label(&self) -> &str {
        &self.labels[0]
    }
}

/// Resolve the speaker roster for a configuration file name.
pub fn resolve_speakers(config_file_name: &str) -> SpeakerRoster {
    if let Some((_, labels)) = MULTI_SPEAKER_GROUPS
        .iter()
        .find(|(config, _)| *config == config_file_name)
    {
        return SpeakerRoster {
            multi_speaker: true,
            labels: labels.iter().map(|label| label.to_string()).collect(),
        };
    }

    let stem = config_file_name
        .split('.')
        .next()
        .unwrap_or(config_file_name);
    SpeakerRoster {
        multi_speaker: false,
        labels: vec![stem.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_speaker_groups_keep_label_order() {
        let roster = resolve_speakers("mmj.json");
        assert!(roster.multi_speaker);
        assert_eq!(roster.labels, vec!["minori", "haruka", "airi", "shizuku"]);
    }

    #[test]
    fn label_position_is_speaker_index() {
        let roster = resolve_speakers("mmj.json");
        assert_eq!(roster.index_of("airi").unwrap(), 2);
        assert_eq!(roster.index_of("shizuku").unwrap(), 3);
    }

    #[test]
    fn unknown_label_is_rejected() {
        let roster = resolve_speakers("vbs.json");
        let err = roster.index_of("mizuki").unwrap_err();
        assert!(err.to_string().contains("not among the offered"));
    }

    #[test]
    fn unknown_config_gets_stem_roster() {
        let roster = resolve_speakers("unknown.json");
        assert!(!roster.multi_speaker);
        assert_eq!(roster.labels, vec!["unknown"]);
        // Single-speaker rosters resolve every selection to 0.
        assert_eq!(roster.index_of("anything").unwrap(), 0);
    }

    #[test]
    fn two_voice_group_resolves() {
        let roster = resolve_speakers("mafuyu.json");
        assert_eq!(roster.labels, vec!["white", "black"]);
        assert_eq!(roster.index_of("black").unwrap(), 1);
    }
}
