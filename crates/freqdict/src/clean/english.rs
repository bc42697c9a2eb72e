use freqdict_types::Language;

use super::{CleanOutcome, Cleaner, CleanerConfig, CleaningRule, apply_rules, only_letters};
use crate::frequency::WordFrequency;

const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz'";
const VOWELS: [char; 6] = ['a', 'e', 'i', 'o', 'u', 'y'];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EnglishRule {
    /// Only `a-z` and apostrophes.
    Alphabet,
    /// At least one of `aeiouy`.
    Vowel,
    /// At most one apostrophe and two periods (`a-a-a-able`, `a'whoppinganda'whumping`).
    PunctuationDensity,
    /// No `..`.
    Ellipsis,
    /// Stuttered letters at the edges: `aa…`, `a'…`, `zz…`, `…yy`, `…hh`.
    DoubledLetters,
    /// Common words run together with the next one.
    MissingSpace,
}

pub const ENGLISH_RULES: [EnglishRule; 6] = [
    EnglishRule::Alphabet,
    EnglishRule::Vowel,
    EnglishRule::PunctuationDensity,
    EnglishRule::Ellipsis,
    EnglishRule::DoubledLetters,
    EnglishRule::MissingSpace,
];

impl CleaningRule for EnglishRule {
    fn name(self) -> &'static str {
        match self {
            EnglishRule::Alphabet => "alphabet",
            EnglishRule::Vowel => "vowel",
            EnglishRule::PunctuationDensity => "punctuation-density",
            EnglishRule::Ellipsis => "ellipsis",
            EnglishRule::DoubledLetters => "doubled-letters",
            EnglishRule::MissingSpace => "missing-space",
        }
    }

    fn is_misfit(self, word: &str, count: u64, config: &CleanerConfig) -> bool {
        match self {
            EnglishRule::Alphabet => !only_letters(word, ALPHABET),
            EnglishRule::Vowel => !word.contains(VOWELS),
            EnglishRule::PunctuationDensity => {
                word.matches('\'').count() > 1 || word.matches('.').count() > 2
            }
            EnglishRule::Ellipsis => word.contains(".."),
            EnglishRule::DoubledLetters => {
                (word.starts_with("aa") && !config.aa_allow_list.iter().any(|w| w == word))
                    || word.starts_with("a'")
                    || word.starts_with("zz")
                    || word.ends_with("yy")
                    || word.ends_with("hh")
            }
            EnglishRule::MissingSpace => {
                config
                    .missing_space_words
                    .iter()
                    .any(|common| word.len() > common.len() && word.starts_with(common.as_str()))
                    || config
                        .prefix_thresholds
                        .iter()
                        .any(|p| word.starts_with(p.prefix.as_str()) && count < p.below)
            }
        }
    }
}

pub struct EnglishCleaner {
    config: CleanerConfig,
}

impl EnglishCleaner {
    pub fn new(config: CleanerConfig) -> Self {
        Self { config }
    }
}

impl Cleaner for EnglishCleaner {
    fn language(&self) -> Language {
        Language::English
    }

    fn clean(&self, mut words: WordFrequency) -> CleanOutcome {
        let removals = apply_rules(&mut words, &ENGLISH_RULES, &self.config);
        CleanOutcome {
            words,
            removals,
            ..CleanOutcome::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn misfit(rule: EnglishRule, word: &str, count: u64) -> bool {
        rule.is_misfit(word, count, &CleanerConfig::default())
    }

    #[test]
    fn alphabet_and_vowels() {
        assert!(!misfit(EnglishRule::Alphabet, "don't", 1));
        assert!(misfit(EnglishRule::Alphabet, "café", 1));
        assert!(misfit(EnglishRule::Alphabet, "r2d2", 1));
        assert!(misfit(EnglishRule::Vowel, "hmm", 1));
        assert!(!misfit(EnglishRule::Vowel, "rhythm", 1));
    }

    #[test]
    fn punctuation_rules() {
        assert!(misfit(EnglishRule::PunctuationDensity, "a'whoppinganda'whumping", 1));
        assert!(misfit(EnglishRule::PunctuationDensity, "u.s.a.", 1));
        assert!(!misfit(EnglishRule::PunctuationDensity, "e.g.", 1));
        assert!(misfit(EnglishRule::Ellipsis, "wait..", 1));
    }

    #[test]
    fn doubled_letters_respect_allow_list() {
        assert!(misfit(EnglishRule::DoubledLetters, "aaargh", 1));
        assert!(!misfit(EnglishRule::DoubledLetters, "aardvark", 1));
        assert!(misfit(EnglishRule::DoubledLetters, "a'right", 1));
        assert!(misfit(EnglishRule::DoubledLetters, "zzzz", 1));
        assert!(misfit(EnglishRule::DoubledLetters, "heyy", 1));
        assert!(misfit(EnglishRule::DoubledLetters, "ahh", 1));
        assert!(!misfit(EnglishRule::DoubledLetters, "buzz", 1));
    }

    #[test]
    fn missing_space_prefixes() {
        assert!(misfit(EnglishRule::MissingSpace, "aboutthat", 100));
        assert!(!misfit(EnglishRule::MissingSpace, "about", 100));
        assert!(misfit(EnglishRule::MissingSpace, "i'mgoing", 100));
        assert!(misfit(EnglishRule::MissingSpace, "toasterhood", 20));
        assert!(!misfit(EnglishRule::MissingSpace, "together", 25));
        assert!(misfit(EnglishRule::MissingSpace, "allright", 14));
        assert!(!misfit(EnglishRule::MissingSpace, "allow", 15));
    }

    #[test]
    fn prefix_thresholds_are_configurable() {
        let config = CleanerConfig::default().with_prefix_threshold("to", 10);
        assert!(!EnglishRule::MissingSpace.is_misfit("toasterhood", 20, &config));
    }

    #[test]
    fn survivors_satisfy_every_rule() {
        let words: WordFrequency = [
            ("the", 500),
            ("aardvark", 3),
            ("aaah", 4),
            ("hmm", 9),
            ("don't", 40),
            ("o'clock'd", 2),
            ("wait..", 2),
            ("café", 8),
            ("aboutface", 30),
            ("toasterhood", 20),
            ("today", 200),
            ("allright", 3),
            ("zzz", 1),
        ]
        .into_iter()
        .collect();
        let cleaner = EnglishCleaner::new(CleanerConfig::default());
        let outcome = cleaner.clean(words);

        let mut kept: Vec<&str> = outcome.words.words().collect();
        kept.sort();
        assert_eq!(kept, vec!["aardvark", "don't", "the", "today"]);
        assert_eq!(outcome.removed(), 9);
        assert_eq!(outcome.removals.len(), ENGLISH_RULES.len());

        let config = CleanerConfig::default();
        for (word, count) in outcome.words.iter() {
            for rule in ENGLISH_RULES {
                assert!(!rule.is_misfit(word, count, &config), "{word} breaks {}", rule.name());
            }
        }
    }
}
