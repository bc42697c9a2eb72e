use std::path::PathBuf;

use freqdict_types::Language;
use thiserror::Error;

/// Failures that abort a dictionary build or merge.
///
/// Words the German stemmer cannot resolve are not errors; they are dropped
/// and reported through [`crate::stem::UnstemmedWord`].
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(
        "unsupported language: {0} (expected one of {codes})",
        codes = Language::supported_codes().join(", ")
    )]
    UnsupportedLanguage(String),
    #[error("missing {what}: {}", path.display())]
    MissingResource { what: &'static str, path: PathBuf },
    #[error("{0} cleaning needs a stem analyzer")]
    MissingAnalyzer(Language),
    #[error("failed to load stem dictionary from {}: {source:#}", path.display())]
    Analyzer {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed entry at {}:{line}: {content:?}", path.display())]
    MalformedEntry {
        path: PathBuf,
        line: usize,
        content: String,
    },
    #[error("merging needs at least two dictionaries, got {0}")]
    TooFewSources(usize),
    #[error("two inputs would write the same output file: {0}")]
    DuplicateOutput(String),
}

impl PipelineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for configuration problems detected before any processing starts.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            PipelineError::UnsupportedLanguage(_)
                | PipelineError::MissingResource { .. }
                | PipelineError::MissingAnalyzer(_)
                | PipelineError::Analyzer { .. }
                | PipelineError::TooFewSources(_)
                | PipelineError::DuplicateOutput(_)
        )
    }
}

/// Fail with [`PipelineError::MissingResource`] unless `path` is an existing file.
pub fn require_file(what: &'static str, path: impl Into<PathBuf>) -> Result<PathBuf, PipelineError> {
    let path = path.into();
    if path.is_file() {
        Ok(path)
    } else {
        Err(PipelineError::MissingResource { what, path })
    }
}
