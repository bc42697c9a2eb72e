use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use freqdict_lexicon::{LoadMode, Lexicon};

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let dict_dir = args
        .next()
        .map(PathBuf::from)
        .context("usage: cargo run -p freqdict-lexicon --example stats -- <dict-dir> <name>")?;
    let name = args.next().unwrap_or_else(|| "de_DE".to_string());

    let lex = Lexicon::load_with_mode(&dict_dir, &name, LoadMode::Mmap)
        .with_context(|| format!("loading {name} from {}", dict_dir.display()))?;

    println!("Dictionary: {}", lex.source().display());
    println!("Encoding  : {:?}", lex.encoding());
    println!("Headwords : {}", lex.len());

    for word in ["hund", "haus", "laufen", "straße"] {
        println!("Headword '{}' exists? {}", word, lex.contains(word));
    }

    Ok(())
}
