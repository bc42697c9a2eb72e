//! German inflection stripping for stem lookup.
//!
//! Modelled on the classic morphy algorithm: emit the surface form if it is a
//! known headword, consult an exception list, then apply suffix rules and keep
//! only the guesses a caller-provided existence predicate accepts. The crate is
//! decoupled from any particular word list; it only needs the callback.
//!
//! # How it works
//! 1. Emit the surface form if it exists.
//! 2. Check exceptions (`<name>.exc`, one `surface stem [stem ...]` per line).
//! 3. Apply suffix rules for noun plurals/genitives, adjective endings and
//!    weak verb conjugation (mapped back to the infinitive).
//! 4. Deduplicate while preserving provenance (`Surface`, `Exception`, `Rule`).
//!
//! Candidate order is stable: surface, exceptions in file order, then rules in
//! table order. Downstream disambiguation relies on that.
//!
//! # Example
//! ```no_run
//! use freqdict_lexicon::Lexicon;
//! use freqdict_morphy::GermanMorphy;
//!
//! # fn main() -> anyhow::Result<()> {
//! let dir = "/usr/share/hunspell";
//! let lex = Lexicon::load(dir, "de_DE")?;
//! let morph = GermanMorphy::load(dir, "de_DE")?;
//!
//! for cand in morph.stems_for("hunde", |stem| lex.contains(stem)) {
//!     println!("{:?}: {}", cand.source, cand.stem);
//! }
//! # Ok(()) }
//! ```
//!
//! For a runnable demo, see `cargo run -p freqdict-morphy --example lookup -- <dir> <name> <word>`.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Where a stem candidate originated.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CandidateSource {
    Surface,
    Exception,
    Rule {
        suffix: &'static str,
        replacement: &'static str,
    },
}

/// A stem candidate paired with its provenance.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StemCandidate<'a> {
    pub stem: Cow<'a, str>,
    pub source: CandidateSource,
}

/// Suffix-stripping analyzer parameterised by caller-provided existence checks.
#[derive(Default)]
pub struct GermanMorphy {
    exceptions: HashMap<String, Vec<String>>,
}

impl GermanMorphy {
    /// Load the exception list `<dir>/<name>.exc`.
    ///
    /// The file is optional; a missing one is treated as empty.
    pub fn load(dict_dir: impl AsRef<Path>, name: &str) -> Result<Self> {
        let path = dict_dir.as_ref().join(format!("{name}.exc"));
        Ok(Self {
            exceptions: load_exc(path)?,
        })
    }

    /// Analyzer with an explicit exception table.
    pub fn with_exceptions(exceptions: HashMap<String, Vec<String>>) -> Self {
        Self {
            exceptions: exceptions
                .into_iter()
                .map(|(surface, stems)| {
                    (
                        normalize(&surface),
                        stems.iter().map(|s| normalize(s)).collect(),
                    )
                })
                .collect(),
        }
    }

    pub fn exception_count(&self) -> usize {
        self.exceptions.len()
    }

    /// Generate stem candidates for a surface form, returning provenance.
    ///
    /// `stem_exists` typically delegates to `Lexicon::contains`. Candidates are
    /// case-folded.
    pub fn stems_for<'a, F>(&'a self, surface: &str, stem_exists: F) -> Vec<StemCandidate<'a>>
    where
        F: Fn(&str) -> bool,
    {
        let mut seen: HashSet<Cow<'a, str>> = HashSet::new();
        let mut out: Vec<StemCandidate<'a>> = Vec::new();
        let norm_surface = normalize(surface);
        if norm_surface.is_empty() {
            return out;
        }

        if stem_exists(&norm_surface) {
            push_unique(
                &mut out,
                &mut seen,
                StemCandidate {
                    stem: Cow::Owned(norm_surface.clone()),
                    source: CandidateSource::Surface,
                },
            );
        }

        // Exceptions cover strong verbs and umlaut plurals the rules cannot reach.
        if let Some(entries) = self.exceptions.get(&norm_surface) {
            for stem in entries {
                if stem_exists(stem) {
                    push_unique(
                        &mut out,
                        &mut seen,
                        StemCandidate {
                            stem: Cow::Borrowed(stem.as_str()),
                            source: CandidateSource::Exception,
                        },
                    );
                }
            }
        }

        for (suffix, replacement) in RULES {
            if let Some(candidate) = apply_rule(&norm_surface, suffix, replacement)
                && stem_exists(&candidate)
            {
                push_unique(
                    &mut out,
                    &mut seen,
                    StemCandidate {
                        stem: Cow::Owned(candidate),
                        source: CandidateSource::Rule {
                            suffix,
                            replacement,
                        },
                    },
                );
            }
        }

        out
    }
}

fn load_exc(path: PathBuf) -> Result<HashMap<String, Vec<String>>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let file =
        File::open(&path).with_context(|| format!("open exception file {}", path.display()))?;
    let reader = BufReader::new(file);
    let mut map = HashMap::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line =
            line.with_context(|| format!("read line {} in {}", lineno + 1, path.display()))?;
        if line.trim_start().starts_with('#') {
            continue;
        }
        let mut parts = line.split_whitespace();
        let surface = match parts.next() {
            Some(s) => normalize(s),
            None => continue,
        };
        let stems: Vec<String> = parts.map(normalize).collect();
        if !stems.is_empty() {
            map.insert(surface, stems);
        }
    }
    Ok(map)
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

fn push_unique<'a>(
    out: &mut Vec<StemCandidate<'a>>,
    seen: &mut HashSet<Cow<'a, str>>,
    candidate: StemCandidate<'a>,
) {
    if seen.insert(candidate.stem.clone()) {
        out.push(candidate);
    }
}

fn apply_rule(surface: &str, suffix: &str, replacement: &str) -> Option<String> {
    let stem = surface.strip_suffix(suffix)?;
    // A bare suffix is not a word.
    if stem.chars().count() < 2 {
        return None;
    }
    Some(if replacement.is_empty() {
        stem.to_string()
    } else {
        format!("{stem}{replacement}")
    })
}

const RULES: [(&str, &str); 27] = [
    // nouns: plural and genitive endings
    ("e", ""),
    ("en", ""),
    ("n", ""),
    ("er", ""),
    ("ern", ""),
    ("es", ""),
    ("s", ""),
    ("nen", ""),
    // adjectives: declension and comparison
    ("em", ""),
    ("ere", ""),
    ("eren", ""),
    ("erem", ""),
    ("erer", ""),
    ("eres", ""),
    ("ste", ""),
    ("sten", ""),
    ("ster", ""),
    // weak verbs: present and preterite back to the infinitive
    ("e", "en"),
    ("st", "en"),
    ("t", "en"),
    ("et", "en"),
    ("est", "en"),
    ("te", "en"),
    ("ten", "en"),
    ("tet", "en"),
    ("test", "en"),
    ("n", "en"),
];
