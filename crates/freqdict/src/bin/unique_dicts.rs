use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use freqdict_types::Separator;
use tracing::info;

use freqdict::cli::separator_parser;
use freqdict::error::require_file;
use freqdict::{PipelineError, WordFrequency, init_tracing, merge};

const COMMON_FILE: &str = "common.txt";

/// Split cleaned dictionaries into one shared dictionary and per-source remainders.
#[derive(Parser)]
#[command(name = "unique-dicts", version, about)]
struct Cli {
    /// Dictionaries written by build-dictionary
    #[arg(required = true, num_args = 2..)]
    sources: Vec<PathBuf>,

    /// Directory receiving common.txt and one <name>.unique.txt per source
    #[arg(short, long)]
    output_dir: PathBuf,

    /// Separator between count and word
    #[arg(long, default_value = "space", value_parser = separator_parser())]
    separator: Separator,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let targets = unique_targets(&cli.sources, &cli.output_dir)?;

    let mut dictionaries = Vec::with_capacity(cli.sources.len());
    for source in &cli.sources {
        let path = require_file("dictionary", source)?;
        let words = WordFrequency::load(&path)?;
        info!("{}: {} words", path.display(), words.len());
        dictionaries.push(words);
    }

    let outcome = merge(dictionaries)?;
    outcome.export(&cli.output_dir.join(COMMON_FILE), &targets, cli.separator)?;
    info!(
        "wrote {} common words and {} unique dictionaries to {}",
        outcome.common.len(),
        targets.len(),
        cli.output_dir.display()
    );
    Ok(())
}

/// Output path per source; two sources with the same file stem are rejected.
fn unique_targets(sources: &[PathBuf], output_dir: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    let mut seen = HashSet::new();
    let mut targets = Vec::with_capacity(sources.len());
    for source in sources {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "dictionary".to_string());
        let name = format!("{stem}.unique.txt");
        if !seen.insert(name.clone()) {
            return Err(PipelineError::DuplicateOutput(name));
        }
        targets.push(output_dir.join(name));
    }
    Ok(targets)
}
