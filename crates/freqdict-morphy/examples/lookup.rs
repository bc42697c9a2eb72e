use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use freqdict_lexicon::{LoadMode, Lexicon};
use freqdict_morphy::GermanMorphy;

const USAGE: &str =
    "usage: cargo run -p freqdict-morphy --example lookup -- <dict-dir> <name> [--demo | <word>]";

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let dict_dir = args.next().map(PathBuf::from).context(USAGE)?;
    let name = args.next().context(USAGE)?;
    let words: Vec<String> = match args.next() {
        Some(arg) if arg == "--demo" => vec![
            "hunde".into(),
            "häuser".into(),
            "machst".into(),
            "redete".into(),
            "verloren".into(),
        ],
        Some(arg) => vec![arg],
        None => bail!(USAGE),
    };
    if args.next().is_some() {
        bail!("too many arguments");
    }

    let lex = Lexicon::load_with_mode(&dict_dir, &name, LoadMode::Mmap)
        .with_context(|| format!("loading {name} from {}", dict_dir.display()))?;
    let morph = GermanMorphy::load(&dict_dir, &name)
        .with_context(|| format!("loading exceptions from {}", dict_dir.display()))?;

    println!("Dictionary: {}", lex.source().display());

    for word in words {
        println!("\nSurface: {}", word);
        for cand in morph.stems_for(&word, |stem| lex.contains(stem)) {
            println!("  {:<12} [{:?}]", cand.stem, cand.source);
        }
    }

    Ok(())
}
