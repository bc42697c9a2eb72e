pub mod clean;
pub mod cli;
pub mod error;
pub mod exclude;
pub mod frequency;
pub mod merge;
pub mod pipeline;
pub mod stem;
pub mod tokenize;

pub use clean::{CleanOutcome, Cleaner, CleanerConfig, cleaner_for};
pub use error::PipelineError;
pub use exclude::ExclusionList;
pub use frequency::{WordFrequency, accumulate, accumulate_file};
pub use merge::{MergeOutcome, common_words, merge, subtract_common};
pub use pipeline::{PipelineOptions, PipelineOutput, RunSummary, process, run_file, tokenizer_for};
pub use stem::{MorphyAnalyzer, StemAnalyzer, UnstemmedWord, choose_stem};
pub use tokenize::{LemmaTable, LemmaTokenizer, Tokenizer, WhitespaceTokenizer};

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber used by both binaries (`RUST_LOG`, default `info`).
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let max_level = env_filter
        .max_level_hint()
        .and_then(|hint| hint.into_level())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .init();
}
