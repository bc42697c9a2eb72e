//! Argument parsers shared by the binaries.
//!
//! Both parsers restrict input to the accepted names, so `--help` lists the
//! choices and a bad value is rejected before `main` runs.

use clap::builder::{PossibleValuesParser, TypedValueParser};
use freqdict_types::{Language, Separator};

use crate::error::PipelineError;

/// `de`, `en` or `fr`.
pub fn language_parser() -> impl TypedValueParser<Value = Language> {
    PossibleValuesParser::new(Language::supported_codes().iter().copied())
        .try_map(|code| Language::from_code(&code).ok_or(PipelineError::UnsupportedLanguage(code)))
}

/// `space` or `tab`.
pub fn separator_parser() -> impl TypedValueParser<Value = Separator> {
    PossibleValuesParser::new(Separator::supported_names().iter().copied()).try_map(|name| {
        Separator::from_name(&name).ok_or_else(|| format!("unsupported separator: {name}"))
    })
}
