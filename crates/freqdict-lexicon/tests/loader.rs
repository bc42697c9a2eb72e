use std::path::PathBuf;

use freqdict_lexicon::{Encoding, LoadMode, Lexicon};

fn fixture_dir(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn loads_utf8_dictionary_in_both_modes() {
    for mode in [LoadMode::Mmap, LoadMode::Owned] {
        let lex = Lexicon::load_with_mode(fixture_dir("de"), "de_DE", mode).expect("load fixtures");
        assert_eq!(lex.encoding(), Encoding::Utf8);
        assert_eq!(lex.len(), 14);
        assert!(lex.contains("hund"));
        assert!(lex.contains("Straße"));
        assert!(lex.contains("müller"));
        assert!(!lex.contains("hunde"));
        assert!(lex.source().ends_with("de_DE.dic"));
    }
}

#[test]
fn decodes_latin1_dictionary() {
    let lex = Lexicon::load(fixture_dir("latin1"), "de_AT").expect("load latin1 fixtures");
    assert_eq!(lex.encoding(), Encoding::Latin1);
    assert!(lex.contains("müller"));
    assert!(lex.contains("straße"));
}

#[test]
fn missing_dictionary_is_an_error() {
    let err = match Lexicon::load(fixture_dir("de"), "xx_XX") {
        Ok(_) => panic!("expected missing dictionary error"),
        Err(err) => err,
    };
    assert!(err.to_string().contains("xx_XX.dic"));
}

#[test]
fn empty_dictionary_maps_without_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("empty.dic"), b"").unwrap();
    let lex = Lexicon::load_with_mode(dir.path(), "empty", LoadMode::Mmap).unwrap();
    assert!(lex.is_empty());
}
