//! Split several cleaned dictionaries into a shared part and per-source parts.
//!
//! The shared ("common") dictionary is the union of every pairwise
//! intersection, with both sides' counts summed and then summed again across
//! pairs. A word present in three or more sources therefore shows up in
//! several pairs; no true k-way intersection is attempted.

use std::path::{Path, PathBuf};

use freqdict_types::Separator;
use tracing::info;

use crate::error::PipelineError;
use crate::frequency::WordFrequency;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    pub common: WordFrequency,
    /// One entry per source, in input order, with common words removed.
    pub unique: Vec<WordFrequency>,
}

impl MergeOutcome {
    /// Write `common` to `common_path` and each unique list to the matching
    /// entry of `unique_paths`.
    ///
    /// Every file is written to a temporary file first; none is moved into
    /// place unless all of them were written.
    pub fn export(
        &self,
        common_path: &Path,
        unique_paths: &[PathBuf],
        separator: Separator,
    ) -> Result<(), PipelineError> {
        let mut staged = Vec::with_capacity(self.unique.len() + 1);
        staged.push(self.common.stage(common_path, separator)?);
        for (words, path) in self.unique.iter().zip(unique_paths) {
            staged.push(words.stage(path, separator)?);
        }
        staged.into_iter().try_for_each(|file| file.commit())
    }
}

/// Words found in at least two sources, summed over every pair `(i, j)`, `j < i`.
pub fn common_words(sources: &[WordFrequency]) -> WordFrequency {
    let mut common = WordFrequency::new();
    for (i, later) in sources.iter().enumerate() {
        for earlier in &sources[..i] {
            for (word, count) in later.iter() {
                if let Some(other) = earlier.get(word) {
                    common.add(word, count.saturating_add(other));
                }
            }
        }
    }
    common
}

/// Remove every common word from every source; returns how many entries went.
pub fn subtract_common(sources: &mut [WordFrequency], common: &WordFrequency) -> usize {
    sources
        .iter_mut()
        .map(|source| source.drop_misfits(|word, _| common.contains(word)))
        .sum()
}

/// Compute the common dictionary and strip it from the sources.
pub fn merge(mut sources: Vec<WordFrequency>) -> Result<MergeOutcome, PipelineError> {
    if sources.len() < 2 {
        return Err(PipelineError::TooFewSources(sources.len()));
    }
    let common = common_words(&sources);
    let removed = subtract_common(&mut sources, &common);
    info!(
        "{} common words across {} dictionaries, {} source entries removed",
        common.len(),
        sources.len(),
        removed
    );
    Ok(MergeOutcome {
        common,
        unique: sources,
    })
}
