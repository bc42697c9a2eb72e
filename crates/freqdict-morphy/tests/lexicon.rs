use std::path::PathBuf;

use freqdict_lexicon::Lexicon;
use freqdict_morphy::{CandidateSource, GermanMorphy};

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

#[test]
fn resolves_inflections_against_fixture_lexicon() {
    let dir = fixture_dir();
    let lex = Lexicon::load(&dir, "de_DE").expect("load lexicon");
    let morph = GermanMorphy::load(&dir, "de_DE").expect("load exceptions");
    assert_eq!(morph.exception_count(), 2);
    let exists = |stem: &str| lex.contains(stem);

    let hunde = morph.stems_for("Hunde", &exists);
    assert!(hunde.iter().any(|c| c.stem == "hund"));

    let machte = morph.stems_for("machte", &exists);
    assert_eq!(machte.len(), 1);
    assert_eq!(machte[0].stem, "machen");

    let ging = morph.stems_for("ging", &exists);
    assert_eq!(ging.len(), 1);
    assert_eq!(ging[0].stem, "gehen");
    assert!(matches!(ging[0].source, CandidateSource::Exception));

    assert!(morph.stems_for("xylofon", &exists).is_empty());
}

#[test]
fn missing_exception_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let morph = GermanMorphy::load(dir.path(), "de_DE").expect("optional file");
    assert_eq!(morph.exception_count(), 0);
}
