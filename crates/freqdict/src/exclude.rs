use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::info;

use crate::error::PipelineError;
use crate::frequency::WordFrequency;

/// Known-bad words that are always removed, one per line in the source file.
#[derive(Clone, Debug, Default)]
pub struct ExclusionList {
    words: HashSet<String>,
}

impl ExclusionList {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| PipelineError::io(path, e))?;
        let mut words = HashSet::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| PipelineError::io(path, e))?;
            let word = line.trim();
            if !word.is_empty() {
                words.insert(word.to_string());
            }
        }
        info!("loaded {} excluded words from {}", words.len(), path.display());
        Ok(Self { words })
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Drop every listed word present in `words`; returns how many were dropped.
    pub fn remove_from(&self, words: &mut WordFrequency) -> usize {
        self.words
            .iter()
            .filter(|word| words.remove(word).is_some())
            .count()
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(Into::into).collect(),
        }
    }
}
