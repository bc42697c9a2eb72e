use freqdict_types::Language;
use tracing::{debug, warn};

use super::{CleanOutcome, Cleaner, CleanerConfig, CleaningRule, apply_rules, only_letters};
use crate::frequency::WordFrequency;
use crate::stem::{StemAnalyzer, UnstemmedWord, choose_stem};

const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzäöüß";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GermanRule {
    /// Only lowercase `a-z`, umlauts and `ß`.
    Alphabet,
    /// No leading `aa`.
    DoubleA,
}

pub const GERMAN_RULES: [GermanRule; 2] = [GermanRule::Alphabet, GermanRule::DoubleA];

impl CleaningRule for GermanRule {
    fn name(self) -> &'static str {
        match self {
            GermanRule::Alphabet => "alphabet",
            GermanRule::DoubleA => "double-a",
        }
    }

    fn is_misfit(self, word: &str, _count: u64, _config: &CleanerConfig) -> bool {
        match self {
            GermanRule::Alphabet => !only_letters(word, ALPHABET),
            GermanRule::DoubleA => word.starts_with("aa"),
        }
    }
}

/// Outcome of folding inflected forms into their stems.
#[derive(Clone, Debug, Default)]
pub struct StemReport {
    /// Forms replaced by a different stem.
    pub stemmed: usize,
    pub unstemmed: Vec<UnstemmedWord>,
}

/// Replace every ambiguous inflected form by the stem [`choose_stem`] selects.
///
/// Words with zero or one candidate are kept as they are. Counts of all forms
/// resolving to the same stem are summed into the stem's entry. Forms with no
/// resolvable stem are dropped and reported, in word order.
pub fn reconcile_stems(
    words: WordFrequency,
    analyzer: &dyn StemAnalyzer,
) -> (WordFrequency, StemReport) {
    let mut entries: Vec<(String, u64)> = words.into_iter().collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(&b.0));

    let mut result = WordFrequency::new();
    let mut report = StemReport::default();
    for (word, count) in entries {
        let options = analyzer.stems(&word);
        if options.len() <= 1 {
            result.add(word, count);
            continue;
        }
        match choose_stem(&word, &options) {
            Some(stem) => {
                if stem != word {
                    debug!("stemmed {word} -> {stem}");
                    report.stemmed += 1;
                }
                result.add(stem, count);
            }
            None => {
                warn!("not stemmed: {word} {options:?}");
                report.unstemmed.push(UnstemmedWord {
                    word,
                    count,
                    candidates: options,
                });
            }
        }
    }
    (result, report)
}

pub struct GermanCleaner<'a> {
    config: CleanerConfig,
    analyzer: &'a dyn StemAnalyzer,
}

impl<'a> GermanCleaner<'a> {
    pub fn new(config: CleanerConfig, analyzer: &'a dyn StemAnalyzer) -> Self {
        Self { config, analyzer }
    }
}

impl Cleaner for GermanCleaner<'_> {
    fn language(&self) -> Language {
        Language::German
    }

    fn clean(&self, mut words: WordFrequency) -> CleanOutcome {
        let mut removals = apply_rules(&mut words, &GERMAN_RULES, &self.config);
        let (mut words, report) = reconcile_stems(words, self.analyzer);
        // Stems come from the dictionary and may themselves break a rule.
        for mut removal in apply_rules(&mut words, &GERMAN_RULES, &self.config) {
            if removal.removed > 0 {
                removal.rule = match removal.rule {
                    "alphabet" => "stem-alphabet",
                    _ => "stem-double-a",
                };
                removals.push(removal);
            }
        }
        CleanOutcome {
            words,
            removals,
            stemmed: report.stemmed,
            unstemmed: report.unstemmed,
        }
    }
}
