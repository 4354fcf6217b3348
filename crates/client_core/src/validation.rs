//! Advisory input checks, re-evaluated on every edit. None of these block a
//! submission.

use std::fmt;

use shared::domain::ConversionMode;

const SHORT_INPUT_CHARS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationWarning {
    ShortInput,
    SymbolsOnly,
}

impl ValidationWarning {
    pub fn message(self) -> &'static str {
        match self {
            ValidationWarning::ShortInput => "Input is a bit short. Results might be inaccurate.",
            ValidationWarning::SymbolsOnly => "Input seems to contain only symbols or numbers.",
        }
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

pub fn validate(input: &str, mode: ConversionMode) -> Option<ValidationWarning> {
    let len = input.chars().count();
    if len > 0 && len < SHORT_INPUT_CHARS {
        return Some(ValidationWarning::ShortInput);
    }
    // Bengali vowel signs are Alphabetic, so script input always has a letter
    if mode == ConversionMode::ToScript && len > 0 && !input.chars().any(char::is_alphabetic) {
        return Some(ValidationWarning::SymbolsOnly);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_has_no_warning() {
        assert_eq!(validate("", ConversionMode::ToScript), None);
        assert_eq!(validate("", ConversionMode::ToPhonetic), None);
    }

    #[test]
    fn one_or_two_characters_are_short() {
        for input in ["a", "ab", "আ", " ", "12"] {
            assert_eq!(
                validate(input, ConversionMode::ToScript),
                Some(ValidationWarning::ShortInput),
                "input {input:?}"
            );
        }
        assert_eq!(
            validate("hi", ConversionMode::ToPhonetic),
            Some(ValidationWarning::ShortInput)
        );
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // three Bengali characters, nine UTF-8 bytes
        assert_eq!(validate("আমি", ConversionMode::ToPhonetic), None);
    }

    #[test]
    fn three_or_more_with_a_letter_is_clean() {
        assert_eq!(validate("ami", ConversionMode::ToScript), None);
        assert_eq!(validate("ami bhalo achi", ConversionMode::ToScript), None);
        assert_eq!(validate("123 abc", ConversionMode::ToScript), None);
    }

    #[test]
    fn symbols_only_in_script_mode() {
        for input in [
            "12345",
            "!!!",
            "1, 2; 3?",
            "...\n---",
            "৫৬৭",
            "😀😀😀",
            "€€€ 100",
            "+-= <> ©®",
            "।।।",
        ] {
            assert_eq!(
                validate(input, ConversionMode::ToScript),
                Some(ValidationWarning::SymbolsOnly),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn bengali_script_with_vowel_signs_is_not_symbols_only() {
        assert_eq!(validate("কি হবে", ConversionMode::ToScript), None);
        assert_eq!(validate("😀 ami", ConversionMode::ToScript), None);
    }

    #[test]
    fn symbols_only_is_not_flagged_in_phonetic_mode() {
        assert_eq!(validate("12345", ConversionMode::ToPhonetic), None);
    }

    #[test]
    fn warning_text_matches_form_copy() {
        assert_eq!(
            ValidationWarning::ShortInput.to_string(),
            "Input is a bit short. Results might be inaccurate."
        );
        assert_eq!(
            ValidationWarning::SymbolsOnly.message(),
            "Input seems to contain only symbols or numbers."
        );
    }
}
