use std::fs;

use freqdict::{PipelineError, WordFrequency, merge};
use freqdict_types::Separator;

fn write(dir: &std::path::Path, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn exported_dictionaries_split_into_common_and_unique() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.txt", "5 haus\n3 auto\n");
    let b = write(dir.path(), "b.txt", "2\thaus\n4\tbrot\n");

    let sources = vec![
        WordFrequency::load(&a).unwrap(),
        WordFrequency::load(&b).unwrap(),
    ];
    let outcome = merge(sources).unwrap();

    let out = dir.path().join("out");
    outcome.common.export(out.join("common.txt"), Separator::Space).unwrap();
    outcome.unique[0].export(out.join("a.unique.txt"), Separator::Space).unwrap();
    outcome.unique[1].export(out.join("b.unique.txt"), Separator::Space).unwrap();

    assert_eq!(fs::read_to_string(out.join("common.txt")).unwrap(), "7 haus\n");
    assert_eq!(fs::read_to_string(out.join("a.unique.txt")).unwrap(), "3 auto\n");
    assert_eq!(fs::read_to_string(out.join("b.unique.txt")).unwrap(), "4 brot\n");
}

#[test]
fn unique_parts_share_no_words() {
    let sources: Vec<WordFrequency> = vec![
        [("der", 9), ("haus", 5), ("wald", 1)].into_iter().collect(),
        [("the", 9), ("haus", 1), ("house", 4)].into_iter().collect(),
        [("le", 9), ("the", 2), ("maison", 3)].into_iter().collect(),
    ];
    let outcome = merge(sources).unwrap();
    for (i, left) in outcome.unique.iter().enumerate() {
        for right in &outcome.unique[i + 1..] {
            assert!(left.words().all(|w| !right.contains(w)));
        }
        assert!(left.words().all(|w| !outcome.common.contains(w)));
    }
    assert_eq!(outcome.common.get("haus"), Some(6));
    assert_eq!(outcome.common.get("the"), Some(11));
}

#[test]
fn malformed_dictionary_line_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "bad.txt", "5 haus\nbrot\n");
    let err = WordFrequency::load(&path).unwrap_err();
    match err {
        PipelineError::MalformedEntry { line, content, .. } => {
            assert_eq!(line, 2);
            assert_eq!(content, "brot");
        }
        other => panic!("unexpected error: {other}"),
    }
}
