use freqdict_types::Language;

use super::{CleanOutcome, Cleaner, CleanerConfig, CleaningRule, apply_rules, only_letters};
use crate::frequency::WordFrequency;

const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzéàèùâêîôûëïüÿçœæ";

/// French gets the alphabet and `aa` checks only; no stemming.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FrenchRule {
    Alphabet,
    DoubleA,
}

pub const FRENCH_RULES: [FrenchRule; 2] = [FrenchRule::Alphabet, FrenchRule::DoubleA];

impl CleaningRule for FrenchRule {
    fn name(self) -> &'static str {
        match self {
            FrenchRule::Alphabet => "alphabet",
            FrenchRule::DoubleA => "double-a",
        }
    }

    fn is_misfit(self, word: &str, _count: u64, _config: &CleanerConfig) -> bool {
        match self {
            FrenchRule::Alphabet => !only_letters(word, ALPHABET),
            FrenchRule::DoubleA => word.starts_with("aa"),
        }
    }
}

pub struct FrenchCleaner {
    config: CleanerConfig,
}

impl FrenchCleaner {
    pub fn new(config: CleanerConfig) -> Self {
        Self { config }
    }
}

impl Cleaner for FrenchCleaner {
    fn language(&self) -> Language {
        Language::French
    }

    fn clean(&self, mut words: WordFrequency) -> CleanOutcome {
        let removals = apply_rules(&mut words, &FRENCH_RULES, &self.config);
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

    #[test]
    fn keeps_accents_and_ligatures() {
        let words: WordFrequency = [
            ("œuvre", 3),
            ("château", 5),
            ("garçon", 2),
            ("aaah", 1),
            ("aujourd'hui", 9),
            ("straße", 1),
        ]
        .into_iter()
        .collect();
        let outcome = FrenchCleaner::new(CleanerConfig::default()).clean(words);
        let mut kept: Vec<&str> = outcome.words.words().collect();
        kept.sort();
        assert_eq!(kept, vec!["château", "garçon", "œuvre"]);
        assert_eq!(outcome.removed(), 3);
        assert_eq!(outcome.stemmed, 0);
    }
}
