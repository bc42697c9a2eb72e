//! Language-specific cleanup of raw frequency counts.
//!
//! Each language has an ordered table of [`CleaningRule`]s. Rules run one
//! after another; each computes its misfits against the map as the previous
//! rule left it, then removes them all at once.

pub mod english;
pub mod french;
pub mod german;

use freqdict_types::Language;
use serde::Serialize;
use tracing::debug;

use crate::error::PipelineError;
use crate::frequency::WordFrequency;
use crate::stem::{StemAnalyzer, UnstemmedWord};

pub use english::{EnglishCleaner, EnglishRule};
pub use french::{FrenchCleaner, FrenchRule};
pub use german::{GermanCleaner, GermanRule, StemReport, reconcile_stems};

/// Prefix that marks a word as a likely run-together typo when it is rare.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PrefixThreshold {
    pub prefix: String,
    /// Words with this prefix seen fewer times than this are dropped.
    pub below: u64,
}

/// Tunables for the rule tables.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CleanerConfig {
    /// Words starting with `aa` that are real words.
    pub aa_allow_list: Vec<String>,
    /// Common words that are never legitimately followed by more letters.
    pub missing_space_words: Vec<String>,
    /// Short prefixes whose rare extensions are dropped.
    pub prefix_thresholds: Vec<PrefixThreshold>,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            aa_allow_list: vec!["aardvark".into(), "aardvarks".into()],
            missing_space_words: ["about", "above", "after", "against", "almost", "can't", "i'm"]
                .into_iter()
                .map(String::from)
                .collect(),
            prefix_thresholds: vec![
                PrefixThreshold {
                    prefix: "all".into(),
                    below: 15,
                },
                PrefixThreshold {
                    prefix: "to".into(),
                    below: 25,
                },
            ],
        }
    }
}

impl CleanerConfig {
    /// Override the cutoff for one prefix, adding it if absent.
    pub fn with_prefix_threshold(mut self, prefix: &str, below: u64) -> Self {
        match self.prefix_thresholds.iter_mut().find(|p| p.prefix == prefix) {
            Some(existing) => existing.below = below,
            None => self.prefix_thresholds.push(PrefixThreshold {
                prefix: prefix.to_string(),
                below,
            }),
        }
        self
    }
}

/// A predicate over `(word, count)` deciding removal.
pub trait CleaningRule: Copy {
    fn name(self) -> &'static str;
    fn is_misfit(self, word: &str, count: u64, config: &CleanerConfig) -> bool;
}

/// How many words one rule removed.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RuleRemoval {
    pub rule: &'static str,
    pub removed: usize,
}

/// Result of running a cleaner.
#[derive(Clone, Debug, Default)]
pub struct CleanOutcome {
    pub words: WordFrequency,
    pub removals: Vec<RuleRemoval>,
    /// Inflected forms folded into a different stem (German only).
    pub stemmed: usize,
    /// Words dropped because their stem was ambiguous (German only).
    pub unstemmed: Vec<UnstemmedWord>,
}

impl CleanOutcome {
    pub fn removed(&self) -> usize {
        self.removals.iter().map(|r| r.removed).sum::<usize>() + self.unstemmed.len()
    }
}

/// A language's full filter chain.
pub trait Cleaner {
    fn language(&self) -> Language;
    fn clean(&self, words: WordFrequency) -> CleanOutcome;
}

/// Apply `rules` in order, each against the map the previous one left.
pub fn apply_rules<R: CleaningRule>(
    words: &mut WordFrequency,
    rules: &[R],
    config: &CleanerConfig,
) -> Vec<RuleRemoval> {
    rules
        .iter()
        .map(|&rule| {
            let removed = words.drop_misfits(|word, count| rule.is_misfit(word, count, config));
            debug!("rule {} removed {} words", rule.name(), removed);
            RuleRemoval {
                rule: rule.name(),
                removed,
            }
        })
        .collect()
}

/// Build the cleaner for `language`. German needs a stem analyzer.
pub fn cleaner_for<'a>(
    language: Language,
    config: CleanerConfig,
    analyzer: Option<&'a dyn StemAnalyzer>,
) -> Result<Box<dyn Cleaner + 'a>, PipelineError> {
    Ok(match language {
        Language::English => Box::new(EnglishCleaner::new(config)),
        Language::French => Box::new(FrenchCleaner::new(config)),
        Language::German => {
            let analyzer = analyzer.ok_or(PipelineError::MissingAnalyzer(language))?;
            Box::new(GermanCleaner::new(config, analyzer))
        }
    })
}

/// True when every character of `word` is in `alphabet`.
pub(crate) fn only_letters(word: &str, alphabet: &str) -> bool {
    word.chars().all(|c| alphabet.contains(c))
}
