use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use freqdict_types::Language;
use serde::Serialize;
use tracing::info;

use crate::clean::{CleanerConfig, Cleaner, RuleRemoval, cleaner_for};
use crate::error::PipelineError;
use crate::exclude::ExclusionList;
use crate::frequency::{WordFrequency, accumulate_file};
use crate::stem::{StemAnalyzer, UnstemmedWord};
use crate::tokenize::{LemmaTable, LemmaTokenizer, Tokenizer, WhitespaceTokenizer};

/// Everything a build needs besides the corpus and the collaborators.
#[derive(Clone, Debug)]
pub struct PipelineOptions {
    pub language: Language,
    /// Entries counted this many times or fewer are dropped.
    pub threshold: u64,
    pub cleaner: CleanerConfig,
    pub exclusion: Option<ExclusionList>,
}

impl PipelineOptions {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            threshold: 0,
            cleaner: CleanerConfig::default(),
            exclusion: None,
        }
    }
}

/// Per-stage statistics of one run, serialisable for later review.
#[derive(Clone, Debug, Default, Serialize)]
pub struct RunSummary {
    pub language: String,
    pub lines: usize,
    pub counted: usize,
    pub rule_removals: Vec<RuleRemoval>,
    pub stemmed: usize,
    pub unstemmed: Vec<UnstemmedWord>,
    pub cleaned: usize,
    pub excluded: usize,
    pub below_threshold: usize,
    pub exported: usize,
    pub total_count: u64,
}

impl RunSummary {
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), PipelineError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| PipelineError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .map_err(|e| PipelineError::io(path, e.into()))?;
        writer.flush().map_err(|e| PipelineError::io(path, e))
    }
}

pub struct PipelineOutput {
    pub words: WordFrequency,
    pub summary: RunSummary,
}

/// Whitespace tokenizer for `language`, optionally lemmatizing through `lemmas`.
///
/// Proper-noun tagging is disabled for German.
pub fn tokenizer_for(language: Language, lemmas: Option<LemmaTable>) -> Box<dyn Tokenizer> {
    let base = WhitespaceTokenizer::with_proper_noun_tagging(language != Language::German);
    match lemmas {
        Some(table) => Box::new(LemmaTokenizer::new(base, table)),
        None => Box::new(base),
    }
}

/// Count, clean, exclude and threshold the corpus at `corpus`.
///
/// The cleaner is built before the corpus is read, so configuration errors
/// surface without any processing.
pub fn run_file(
    corpus: impl AsRef<Path>,
    tokenizer: &dyn Tokenizer,
    options: &PipelineOptions,
    analyzer: Option<&dyn StemAnalyzer>,
) -> Result<PipelineOutput, PipelineError> {
    let cleaner = cleaner_for(options.language, options.cleaner.clone(), analyzer)?;
    let (words, lines) = accumulate_file(corpus, tokenizer)?;
    Ok(finish(words, lines, cleaner.as_ref(), options))
}

/// The stages after accumulation, for counts gathered elsewhere.
pub fn process(
    words: WordFrequency,
    options: &PipelineOptions,
    analyzer: Option<&dyn StemAnalyzer>,
) -> Result<PipelineOutput, PipelineError> {
    let cleaner = cleaner_for(options.language, options.cleaner.clone(), analyzer)?;
    Ok(finish(words, 0, cleaner.as_ref(), options))
}

fn finish(
    words: WordFrequency,
    lines: usize,
    cleaner: &dyn Cleaner,
    options: &PipelineOptions,
) -> PipelineOutput {
    let counted = words.len();
    let outcome = cleaner.clean(words);
    let cleaned = outcome.removed();
    info!(
        "{} cleaning removed {} of {} words, stemmed {}, {} unstemmed",
        cleaner.language(),
        cleaned,
        counted,
        outcome.stemmed,
        outcome.unstemmed.len()
    );

    let mut words = outcome.words;
    let excluded = options
        .exclusion
        .as_ref()
        .map_or(0, |list| list.remove_from(&mut words));
    if excluded > 0 {
        info!("excluded {excluded} listed words");
    }

    let below_threshold = words.apply_threshold(options.threshold);
    info!(
        "threshold {} removed {} words, {} remain",
        options.threshold,
        below_threshold,
        words.len()
    );

    let summary = RunSummary {
        language: options.language.code().to_string(),
        lines,
        counted,
        rule_removals: outcome.removals,
        stemmed: outcome.stemmed,
        unstemmed: outcome.unstemmed,
        cleaned,
        excluded,
        below_threshold,
        exported: words.len(),
        total_count: words.total(),
    };
    PipelineOutput { words, summary }
}
