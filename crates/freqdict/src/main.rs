use std::env;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use freqdict_lexicon::LoadMode;
use freqdict_types::{Language, Separator};
use tracing::info;

use freqdict::cli::{language_parser, separator_parser};
use freqdict::error::require_file;
use freqdict::{
    CleanerConfig, ExclusionList, LemmaTable, MorphyAnalyzer, PipelineOptions, StemAnalyzer,
    init_tracing, run_file, tokenizer_for,
};

const DEFAULT_DICT_DIR: &str = "/usr/share/hunspell";

/// Build a cleaned word-frequency dictionary from a text corpus.
#[derive(Parser)]
#[command(name = "build-dictionary", version, about)]
struct Cli {
    /// Corpus file, one sentence per line
    input: PathBuf,

    /// Corpus language
    #[arg(short, long, default_value = "en", value_parser = language_parser())]
    language: Language,

    /// File of words to always remove, one per line
    #[arg(short, long)]
    exclude: Option<PathBuf>,

    /// Where to write the dictionary
    #[arg(short, long, default_value = "out.txt")]
    output: PathBuf,

    /// Drop words seen this many times or fewer
    #[arg(short, long, default_value_t = 0)]
    threshold: u64,

    /// Separator between count and word
    #[arg(long, default_value = "space", value_parser = separator_parser())]
    separator: Separator,

    /// `form lemma` table applied to tokens before counting
    #[arg(long)]
    lemmas: Option<PathBuf>,

    /// Directory holding the German hunspell dictionary (env: FREQDICT_DICT_DIR)
    #[arg(long)]
    dict_dir: Option<PathBuf>,

    /// Base name of the dictionary files inside --dict-dir
    #[arg(long, default_value = "de_DE")]
    dict_name: String,

    /// How to read the dictionary: mmap or owned (env: FREQDICT_LEXICON_MODE)
    #[arg(long)]
    lexicon_mode: Option<String>,

    /// Rare words starting with "all" below this count are dropped (English)
    #[arg(long, default_value_t = 15)]
    all_threshold: u64,

    /// Rare words starting with "to" below this count are dropped (English)
    #[arg(long, default_value_t = 25)]
    to_threshold: u64,

    /// Write a JSON run summary, including unstemmed words, to this file
    #[arg(long)]
    summary: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let language = cli.language;

    // Every input must exist before any work starts.
    let input = require_file("corpus", &cli.input)?;
    let exclusion = cli
        .exclude
        .as_ref()
        .map(|path| require_file("exclusion list", path).and_then(ExclusionList::load))
        .transpose()?;
    let lemmas = cli
        .lemmas
        .as_ref()
        .map(|path| require_file("lemma table", path).and_then(LemmaTable::load))
        .transpose()?;

    let analyzer = match language {
        Language::German => {
            let dict_dir = cli
                .dict_dir
                .clone()
                .or_else(|| env::var("FREQDICT_DICT_DIR").ok().map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DICT_DIR));
            let mode = lexicon_mode(cli.lexicon_mode.as_deref())?;
            info!(
                "using stem dictionary {} in {} (mode: {:?})",
                cli.dict_name,
                dict_dir.display(),
                mode
            );
            Some(MorphyAnalyzer::load(&dict_dir, &cli.dict_name, mode)?)
        }
        Language::English | Language::French => None,
    };

    let mut options = PipelineOptions::new(language);
    options.threshold = cli.threshold;
    options.exclusion = exclusion;
    options.cleaner = CleanerConfig::default()
        .with_prefix_threshold("all", cli.all_threshold)
        .with_prefix_threshold("to", cli.to_threshold);

    info!("building {} dictionary from {}", language, input.display());
    let start = Instant::now();
    let tokenizer = tokenizer_for(language, lemmas);
    let output = run_file(
        &input,
        tokenizer.as_ref(),
        &options,
        analyzer.as_ref().map(|a| a as &dyn StemAnalyzer),
    )?;
    info!("pipeline finished in {} ms", start.elapsed().as_millis());

    output.words.export(&cli.output, cli.separator)?;
    if let Some(path) = &cli.summary {
        output.summary.write_json(path)?;
        info!("run summary written to {}", path.display());
    }
    Ok(())
}

fn lexicon_mode(cli_mode: Option<&str>) -> Result<LoadMode> {
    let raw = cli_mode
        .map(str::to_string)
        .or_else(|| env::var("FREQDICT_LEXICON_MODE").ok());
    match raw {
        Some(raw) => LoadMode::from_name(&raw)
            .with_context(|| format!("unsupported lexicon mode: {raw} (expected mmap or owned)")),
        None => Ok(LoadMode::Mmap),
    }
}
