use serde::{Deserialize, Serialize};

/// Direction of a conversion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionMode {
    /// Romanized (phonetic) Bengali in, Bengali script out.
    #[default]
    ToScript,
    /// Bengali script in, Romanized (phonetic) Bengali out.
    ToPhonetic,
}

/// Per-mode instruction and labels. The two directions share one table so
/// they cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeProfile {
    pub mode: ConversionMode,
    pub source_label: &'static str,
    pub target_label: &'static str,
    pub placeholder: &'static str,
    pub system_instruction: &'static str,
}

const MODE_PROFILES: [ModeProfile; 2] = [
    ModeProfile {
        mode: ConversionMode::ToScript,
        source_label: "Banglish (phonetic)",
        target_label: "Bangla script",
        placeholder: "Type Banglish here, e.g. ami bhalo achi",
        system_instruction: "You are an expert Bengali transliterator. Convert the user's \
Romanized (phonetic) Bengali text into correct Bengali script. Preserve all line breaks \
exactly. Fix obvious spelling mistakes and translate stray English words into natural \
Bengali where needed. If the input is not meaningful language (random symbols, numbers \
or gibberish), reply with exactly: Invalid input. Return only the converted text with no \
explanations, notes or quotes.",
    },
    ModeProfile {
        mode: ConversionMode::ToPhonetic,
        source_label: "Bangla script",
        target_label: "Banglish (phonetic)",
        placeholder: "বাংলায় লিখুন, যেমন আমি ভালো আছি",
        system_instruction: "You are an expert Bengali transliterator. Convert the user's \
Bengali script text into Romanized (phonetic) Bengali using common Banglish spelling. \
Preserve all line breaks exactly. Fix obvious spelling mistakes and translate stray \
non-Bengali words where needed. If the input is not meaningful language (random symbols, \
numbers or gibberish), reply with exactly: Invalid input. Return only the converted text \
with no explanations, notes or quotes.",
    },
];

impl ConversionMode {
    pub fn profile(self) -> &'static ModeProfile {
        match self {
            ConversionMode::ToScript => &MODE_PROFILES[0],
            ConversionMode::ToPhonetic => &MODE_PROFILES[1],
        }
    }

    pub fn system_instruction(self) -> &'static str {
        self.profile().system_instruction
    }

    pub fn toggled(self) -> Self {
        match self {
            ConversionMode::ToScript => ConversionMode::ToPhonetic,
            ConversionMode::ToPhonetic => ConversionMode::ToScript,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConversionMode::ToScript => "Banglish → Bangla",
            ConversionMode::ToPhonetic => "Bangla → Banglish",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_table_is_keyed_by_mode() {
        for mode in [ConversionMode::ToScript, ConversionMode::ToPhonetic] {
            assert_eq!(mode.profile().mode, mode);
        }
    }

    #[test]
    fn instructions_differ_by_direction_and_name_the_sentinel() {
        let to_script = ConversionMode::ToScript.system_instruction();
        let to_phonetic = ConversionMode::ToPhonetic.system_instruction();
        assert_ne!(to_script, to_phonetic);
        for instruction in [to_script, to_phonetic] {
            assert!(instruction.contains("Invalid input"));
            assert!(instruction.contains("line breaks"));
        }
    }

    #[test]
    fn toggled_round_trips() {
        assert_eq!(
            ConversionMode::ToScript.toggled(),
            ConversionMode::ToPhonetic
        );
        assert_eq!(ConversionMode::ToScript.toggled().toggled(), ConversionMode::ToScript);
    }

    #[test]
    fn mode_serializes_snake_case() {
        let raw = serde_json::to_string(&ConversionMode::ToPhonetic).expect("serialize");
        assert_eq!(raw, "\"to_phonetic\"");
    }
}
