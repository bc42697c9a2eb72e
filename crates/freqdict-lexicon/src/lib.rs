//! Load hunspell-style word lists as a case-folded headword set.
//!
//! A dictionary is a pair of files sharing a base name inside one directory:
//! `<name>.dic` (required) and `<name>.aff` (optional). Only the headwords of
//! the `.dic` file are read; affix flags after `/` and morphological fields
//! after whitespace are ignored. The `.aff` file is consulted solely for its
//! `SET` line so ISO-8859-1 dictionaries decode correctly.
//!
//! Callers choose between memory-mapped files or owned buffers at runtime via
//! [`LoadMode`], the same way for every file the lexicon touches.
//!
//! # Example
//! ```no_run
//! use freqdict_lexicon::{LoadMode, Lexicon};
//!
//! # fn main() -> anyhow::Result<()> {
//! let lex = Lexicon::load_with_mode("/usr/share/hunspell", "de_DE", LoadMode::Mmap)?;
//! assert!(lex.contains("Hund"));
//! println!("{} headwords", lex.len());
//! # Ok(()) }
//! ```
//!
//! For a runnable demo, see `cargo run -p freqdict-lexicon --example stats -- <dir> <name>`.

use std::borrow::Cow;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use memmap2::Mmap;

/// Strategy for loading dictionary files.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoadMode {
    /// Memory-map each file (fast, zero-copy).
    Mmap,
    /// Read each file into an owned buffer (portable fallback).
    Owned,
}

impl LoadMode {
    /// Parse `mmap` or `owned`, ignoring case.
    pub fn from_name(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "mmap" => Some(LoadMode::Mmap),
            "owned" => Some(LoadMode::Owned),
            _ => None,
        }
    }
}

enum Buffer {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Buffer {
    fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Mmap(m) => m.as_ref(),
            Buffer::Owned(v) => v.as_slice(),
        }
    }
}

/// Character set declared by the affix file's `SET` directive.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Encoding {
    Utf8,
    /// ISO-8859-1 and ISO-8859-15; decoded byte-for-byte.
    Latin1,
}

impl Encoding {
    fn from_set(raw: &str) -> Option<Self> {
        match raw.to_ascii_uppercase().replace('_', "-").as_str() {
            "UTF-8" | "UTF8" => Some(Encoding::Utf8),
            "ISO8859-1" | "ISO-8859-1" | "ISO8859-15" | "ISO-8859-15" => Some(Encoding::Latin1),
            _ => None,
        }
    }

    fn decode<'a>(self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        match self {
            Encoding::Utf8 => std::str::from_utf8(bytes).ok().map(Cow::Borrowed),
            Encoding::Latin1 => Some(Cow::Owned(
                bytes.iter().map(|&b| b as char).collect(),
            )),
        }
    }
}

/// Case-folded headword set read from a `.dic` file.
pub struct Lexicon {
    words: HashSet<String>,
    encoding: Encoding,
    source: PathBuf,
}

impl Lexicon {
    /// Load `<dir>/<name>.dic`, memory-mapping the source files.
    pub fn load(dict_dir: impl AsRef<Path>, name: &str) -> Result<Self> {
        Self::load_with_mode(dict_dir, name, LoadMode::Mmap)
    }

    /// Load choosing between mmap and owned buffers at runtime.
    pub fn load_with_mode(dict_dir: impl AsRef<Path>, name: &str, mode: LoadMode) -> Result<Self> {
        let dir = dict_dir.as_ref();
        let dic_path = dir.join(format!("{name}.dic"));
        if !dic_path.exists() {
            bail!("missing required dictionary file: {}", dic_path.display());
        }

        let encoding = match load_optional_file(dir.join(format!("{name}.aff")), mode)? {
            Some(aff) => parse_aff_encoding(aff.as_slice())?,
            None => Encoding::Utf8,
        };

        let dic = load_file(dic_path.clone(), mode)?;
        let words = parse_dic(dic.as_slice(), encoding)
            .with_context(|| format!("parse {}", dic_path.display()))?;

        Ok(Self {
            words,
            encoding,
            source: dic_path,
        })
    }

    /// Build directly from headwords; mostly useful in tests.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words.into_iter().map(|w| normalize(w.as_ref())).collect(),
            encoding: Encoding::Utf8,
            source: PathBuf::new(),
        }
    }

    /// Check whether a headword exists, ignoring case.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&normalize(word))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Path of the `.dic` file this lexicon was read from (empty if built in memory).
    pub fn source(&self) -> &Path {
        &self.source
    }
}

fn load_file(path: PathBuf, mode: LoadMode) -> Result<Buffer> {
    match mode {
        LoadMode::Mmap => {
            let file = File::open(&path).with_context(|| format!("open {}", path.display()))?;
            let len = file
                .metadata()
                .with_context(|| format!("stat {}", path.display()))?
                .len();
            // Zero-length files cannot be mapped on every platform.
            if len == 0 {
                return Ok(Buffer::Owned(Vec::new()));
            }
            unsafe { Mmap::map(&file) }
                .map(Buffer::Mmap)
                .with_context(|| format!("mmap {}", path.display()))
        }
        LoadMode::Owned => {
            let mut file = File::open(&path).with_context(|| format!("open {}", path.display()))?;
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)
                .with_context(|| format!("read {}", path.display()))?;
            Ok(Buffer::Owned(buf))
        }
    }
}

fn load_optional_file(path: PathBuf, mode: LoadMode) -> Result<Option<Buffer>> {
    if !path.exists() {
        return Ok(None);
    }
    load_file(path, mode).map(Some)
}

fn parse_aff_encoding(bytes: &[u8]) -> Result<Encoding> {
    for raw_line in bytes.split(|b| *b == b'\n') {
        let line = strip_cr(raw_line);
        let Some(rest) = line.strip_prefix(b"SET") else {
            continue;
        };
        // `SET` is always ASCII; anything else on the line is the charset name.
        let value = String::from_utf8_lossy(rest);
        let value = value.trim();
        return match Encoding::from_set(value) {
            Some(enc) => Ok(enc),
            None => bail!("unsupported dictionary encoding: {value}"),
        };
    }
    Ok(Encoding::Utf8)
}

fn parse_dic(bytes: &[u8], encoding: Encoding) -> Result<HashSet<String>> {
    let mut words = HashSet::new();
    for (lineno, raw_line) in bytes.split(|b| *b == b'\n').enumerate() {
        let line = strip_cr(raw_line);
        if line.is_empty() {
            continue;
        }
        let Some(text) = encoding.decode(line) else {
            bail!("line {} is not valid {:?}", lineno + 1, encoding);
        };
        let text = text.trim();
        // First line carries the approximate entry count.
        if lineno == 0 && text.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }
        if text.starts_with('#') {
            continue;
        }
        let headword = text
            .split(|c: char| c == '/' || c.is_whitespace())
            .next()
            .unwrap_or_default();
        if !headword.is_empty() {
            words.insert(normalize(headword));
        }
    }
    Ok(words)
}

fn strip_cr(line: &[u8]) -> &[u8] {
    if line.ends_with(b"\r") {
        &line[..line.len() - 1]
    } else {
        line
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
