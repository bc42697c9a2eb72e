use std::borrow::Cow;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use freqdict_types::{PosTag, Token};
use tracing::info;

use crate::error::PipelineError;

/// Turns one corpus line into tokens, optionally tagged.
pub trait Tokenizer {
    fn tokenize<'a>(&self, line: &'a str) -> Vec<Token<'a>>;
}

/// Splits on whitespace and, when enabled, tags capitalised words that do
/// not open a sentence as proper nouns.
///
/// Tagging is a rough stand-in for a statistical tagger; it must stay off for
/// German, where every noun is capitalised.
#[derive(Clone, Copy, Debug, Default)]
pub struct WhitespaceTokenizer {
    tag_proper_nouns: bool,
}

impl WhitespaceTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_proper_noun_tagging(tag_proper_nouns: bool) -> Self {
        Self { tag_proper_nouns }
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize<'a>(&self, line: &'a str) -> Vec<Token<'a>> {
        let mut sentence_start = true;
        let mut tokens = Vec::new();
        for part in line.split_whitespace() {
            let token = if self.tag_proper_nouns {
                let tag = if !sentence_start && looks_like_name(part) {
                    PosTag::ProperNoun
                } else {
                    PosTag::Other
                };
                Token::tagged(part, tag)
            } else {
                Token::new(part)
            };
            sentence_start = part.ends_with(['.', '!', '?', ':']);
            tokens.push(token);
        }
        tokens
    }
}

fn looks_like_name(word: &str) -> bool {
    // "I", "I'm", "I'll" are capitalised pronouns, not names.
    if word == "I" || word.starts_with("I'") {
        return false;
    }
    word.chars().next().is_some_and(char::is_uppercase)
}

/// Surface form to lemma table, one `form lemma` pair per line.
#[derive(Clone, Debug, Default)]
pub struct LemmaTable {
    lemmas: HashMap<String, String>,
}

impl LemmaTable {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| PipelineError::io(path, e))?;
        let mut lemmas = HashMap::new();
        for (lineno, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| PipelineError::io(path, e))?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let mut parts = trimmed.split_whitespace();
            match (parts.next(), parts.next()) {
                (Some(form), Some(lemma)) => {
                    lemmas.insert(form.to_string(), lemma.to_string());
                }
                _ => {
                    return Err(PipelineError::MalformedEntry {
                        path: path.to_path_buf(),
                        line: lineno + 1,
                        content: line,
                    });
                }
            }
        }
        info!("loaded {} lemma mappings from {}", lemmas.len(), path.display());
        Ok(Self { lemmas })
    }

    pub fn from_pairs<I, A, B>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        Self {
            lemmas: pairs
                .into_iter()
                .map(|(form, lemma)| (form.into(), lemma.into()))
                .collect(),
        }
    }

    /// Exact match first, then the lower-cased form.
    pub fn lemma_of(&self, form: &str) -> Option<&str> {
        self.lemmas
            .get(form)
            .or_else(|| self.lemmas.get(&form.to_lowercase()))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lemmas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty()
    }
}

/// Wraps another tokenizer and replaces known surface forms by their lemma.
pub struct LemmaTokenizer<T> {
    inner: T,
    table: LemmaTable,
}

impl<T: Tokenizer> LemmaTokenizer<T> {
    pub fn new(inner: T, table: LemmaTable) -> Self {
        Self { inner, table }
    }
}

impl<T: Tokenizer> Tokenizer for LemmaTokenizer<T> {
    fn tokenize<'a>(&self, line: &'a str) -> Vec<Token<'a>> {
        self.inner
            .tokenize(line)
            .into_iter()
            .map(|token| match self.table.lemma_of(&token.text) {
                Some(lemma) => Token {
                    text: Cow::Owned(lemma.to_string()),
                    tag: token.tag,
                },
                None => token,
            })
            .collect()
    }
}

impl<T: Tokenizer + ?Sized> Tokenizer for Box<T> {
    fn tokenize<'a>(&self, line: &'a str) -> Vec<Token<'a>> {
        (**self).tokenize(line)
    }
}
