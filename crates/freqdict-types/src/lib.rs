//! Shared types for building word-frequency dictionaries.
//!
//! The crate is deliberately dependency-free so every stage of the pipeline
//! (tokenizer adapters, cleaners, the merger) can agree on the same
//! vocabulary: which [`Language`] a corpus is in, what a [`Token`] looks like
//! once a tokenizer has tagged it, and which [`Separator`] an exported list
//! uses between count and word.
//!
//! ```rust
//! use freqdict_types::{Language, Separator, Token, PosTag};
//!
//! let lang = Language::from_code("de").unwrap();
//! assert_eq!(lang.code(), "de");
//! assert_eq!(Separator::from_name("tab"), Some(Separator::Tab));
//! let tok = Token::tagged("Berlin", PosTag::ProperNoun);
//! assert!(tok.is_proper_noun());
//! ```

use std::borrow::Cow;
use std::fmt;

/// Corpus language; selects the cleaning rule set.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Language {
    German,
    English,
    French,
}

impl Language {
    /// Parse a two-letter language code (`de`, `en`, `fr`), ignoring case.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "de" => Some(Language::German),
            "en" => Some(Language::English),
            "fr" => Some(Language::French),
            _ => None,
        }
    }

    /// Two-letter code as accepted by [`Language::from_code`].
    pub fn code(self) -> &'static str {
        match self {
            Language::German => "de",
            Language::English => "en",
            Language::French => "fr",
        }
    }

    /// Codes of every supported language, in CLI order.
    pub fn supported_codes() -> &'static [&'static str] {
        &["de", "en", "fr"]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Language::German => "german",
            Language::English => "english",
            Language::French => "french",
        })
    }
}

/// Coarse part-of-speech marker attached by a tokenizer.
///
/// The pipeline only cares whether a token is a proper noun; richer taggers
/// collapse everything else into [`PosTag::Other`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PosTag {
    ProperNoun,
    Other,
}

/// A token as produced by a tokenizer/lemmatizer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token<'a> {
    pub text: Cow<'a, str>,
    pub tag: Option<PosTag>,
}

impl<'a> Token<'a> {
    /// Untagged token borrowing from the source line.
    pub fn new(text: impl Into<Cow<'a, str>>) -> Self {
        Self {
            text: text.into(),
            tag: None,
        }
    }

    pub fn tagged(text: impl Into<Cow<'a, str>>, tag: PosTag) -> Self {
        Self {
            text: text.into(),
            tag: Some(tag),
        }
    }

    pub fn is_proper_noun(&self) -> bool {
        self.tag == Some(PosTag::ProperNoun)
    }
}

/// Field separator between count and word in an exported list.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Separator {
    #[default]
    Space,
    Tab,
}

impl Separator {
    /// Parse `space` or `tab` (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "space" => Some(Separator::Space),
            "tab" => Some(Separator::Tab),
            _ => None,
        }
    }

    /// Names accepted by [`Separator::from_name`].
    pub fn supported_names() -> &'static [&'static str] {
        &["space", "tab"]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Separator::Space => " ",
            Separator::Tab => "\t",
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Separator::Space => "space",
            Separator::Tab => "tab",
        })
    }
}
