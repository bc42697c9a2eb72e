//! German stem disambiguation.
//!
//! A morphological analyzer may offer several stems for one inflected form.
//! [`choose_stem`] picks one by walking [`STEM_RULES`] in order; the first rule
//! that produces an answer wins. Every answer is either one of the offered
//! candidates or the word itself. When no rule applies the word is reported as
//! unstemmed rather than guessed at.

use std::path::Path;

use freqdict_lexicon::{LoadMode, Lexicon};
use freqdict_morphy::GermanMorphy;
use serde::Serialize;
use tracing::info;

use crate::error::{PipelineError, require_file};

/// Source of stem candidates for an inflected word.
///
/// An empty or single-element answer means "no ambiguity".
pub trait StemAnalyzer {
    fn stems(&self, word: &str) -> Vec<String>;
}

impl<F> StemAnalyzer for F
where
    F: Fn(&str) -> Vec<String>,
{
    fn stems(&self, word: &str) -> Vec<String> {
        self(word)
    }
}

/// Hunspell word list plus suffix rules, constructed once per run.
pub struct MorphyAnalyzer {
    lexicon: Lexicon,
    morphy: GermanMorphy,
}

impl MorphyAnalyzer {
    pub fn new(lexicon: Lexicon, morphy: GermanMorphy) -> Self {
        Self { lexicon, morphy }
    }

    /// Load `<name>.dic` (required), `<name>.aff` and `<name>.exc` from `dict_dir`.
    pub fn load(dict_dir: &Path, name: &str, mode: LoadMode) -> Result<Self, PipelineError> {
        require_file("German stem dictionary", dict_dir.join(format!("{name}.dic")))?;
        let lexicon = Lexicon::load_with_mode(dict_dir, name, mode).map_err(|source| {
            PipelineError::Analyzer {
                path: dict_dir.to_path_buf(),
                source,
            }
        })?;
        let morphy = GermanMorphy::load(dict_dir, name).map_err(|source| PipelineError::Analyzer {
            path: dict_dir.to_path_buf(),
            source,
        })?;
        info!(
            "stem dictionary {} loaded: {} headwords, {} exceptions",
            lexicon.source().display(),
            lexicon.len(),
            morphy.exception_count()
        );
        Ok(Self::new(lexicon, morphy))
    }
}

impl StemAnalyzer for MorphyAnalyzer {
    fn stems(&self, word: &str) -> Vec<String> {
        self.morphy
            .stems_for(word, |stem| self.lexicon.contains(stem))
            .into_iter()
            .map(|cand| cand.stem.into_owned())
            .collect()
    }
}

/// A word dropped because its candidates could not be disambiguated.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct UnstemmedWord {
    pub word: String,
    pub count: u64,
    pub candidates: Vec<String>,
}

/// One step of the disambiguation chain.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StemRule {
    /// `-en`/`-es`: the word without the suffix, else the word itself.
    PluralSuffix,
    /// Word contains `t`, `e` or `st`: the first candidate ending in `-en`,
    /// other than the word plus `n` (the dative plural of an `-e` noun).
    Infinitive,
    /// `-e`/`-s`: the word without its last letter.
    FinalLetter,
    /// `-ere`: the word without the three letters.
    ComparativeEre,
    /// `-er`: the word without the two letters.
    ComparativeEr,
    /// `-ere`: the word without the final `e`.
    ComparativeEreToEr,
    /// `vor-`/`ver-`: the only candidate sharing that prefix.
    VerbPrefix,
    /// `[td]e[rn]…` determiner-like forms: the word without its last letter.
    Determiner,
    /// The word is itself a candidate.
    Identity,
}

pub const STEM_RULES: [StemRule; 9] = [
    StemRule::PluralSuffix,
    StemRule::Infinitive,
    StemRule::FinalLetter,
    StemRule::ComparativeEre,
    StemRule::ComparativeEr,
    StemRule::ComparativeEreToEr,
    StemRule::VerbPrefix,
    StemRule::Determiner,
    StemRule::Identity,
];

impl StemRule {
    /// The stem this rule selects, or `None` to fall through to the next rule.
    pub fn apply(self, word: &str, options: &[String]) -> Option<String> {
        let offered = |stem: &str| options.iter().any(|o| o == stem);
        let pick = |stem: &str| offered(stem).then(|| stem.to_string());
        match self {
            StemRule::PluralSuffix => {
                let base = word.strip_suffix("en").or_else(|| word.strip_suffix("es"))?;
                pick(base).or_else(|| pick(word))
            }
            StemRule::Infinitive => {
                if !word.contains(['t', 'e']) {
                    return None;
                }
                options
                    .iter()
                    .find(|alt| alt.ends_with("en") && !is_dative_plural(alt, word))
                    .cloned()
            }
            StemRule::FinalLetter => {
                let base = word.strip_suffix('e').or_else(|| word.strip_suffix('s'))?;
                pick(base)
            }
            StemRule::ComparativeEre => pick(word.strip_suffix("ere")?),
            StemRule::ComparativeEr => pick(word.strip_suffix("er")?),
            StemRule::ComparativeEreToEr => {
                word.strip_suffix("ere")?;
                pick(&word[..word.len() - 1])
            }
            StemRule::VerbPrefix => {
                let prefix = ["vor", "ver"].into_iter().find(|p| word.starts_with(p))?;
                let mut matching = options.iter().filter(|alt| alt.starts_with(prefix));
                match (matching.next(), matching.next()) {
                    (Some(only), None) => Some(only.clone()),
                    _ => None,
                }
            }
            StemRule::Determiner => {
                if !is_determiner_like(word) {
                    return None;
                }
                pick(drop_last_char(word))
            }
            StemRule::Identity => pick(word),
        }
    }
}

/// Pick a single stem for `word` from ambiguous `options`.
pub fn choose_stem(word: &str, options: &[String]) -> Option<String> {
    STEM_RULES.iter().find_map(|rule| rule.apply(word, options))
}

/// `alt` is exactly `word` followed by `n`.
fn is_dative_plural(alt: &str, word: &str) -> bool {
    alt.strip_prefix(word) == Some("n")
}

fn is_determiner_like(word: &str) -> bool {
    let mut chars = word.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some('t' | 'd'), Some('e'), Some('r' | 'n'))
    )
}

fn drop_last_char(word: &str) -> &str {
    let mut chars = word.chars();
    chars.next_back();
    chars.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn prefers_plural_suffix_stripping() {
        assert_eq!(choose_stem("häusen", &opts(&["haus", "häus"])).as_deref(), Some("häus"));
        assert_eq!(
            choose_stem("reden", &opts(&["rede", "reden"])).as_deref(),
            Some("reden")
        );
        assert_eq!(
            choose_stem("tages", &opts(&["tag", "tages"])).as_deref(),
            Some("tag")
        );
    }

    #[test]
    fn conjugated_verbs_resolve_to_infinitive() {
        assert_eq!(
            choose_stem("macht", &opts(&["mach", "machen"])).as_deref(),
            Some("machen")
        );
        assert_eq!(
            choose_stem("gehst", &opts(&["geh", "gehen"])).as_deref(),
            Some("gehen")
        );
    }

    #[test]
    fn appended_plural_is_not_an_infinitive() {
        assert_eq!(
            choose_stem("Hunde", &opts(&["Hund", "Hunden"])).as_deref(),
            Some("Hund")
        );
    }

    #[test]
    fn longer_infinitives_still_win() {
        assert_eq!(
            choose_stem("arbeit", &opts(&["arbeit", "arbeiten"])).as_deref(),
            Some("arbeiten")
        );
        assert_eq!(
            choose_stem("wart", &opts(&["wart", "warten"])).as_deref(),
            Some("warten")
        );
        assert!(!is_dative_plural("arbeiten", "arbeit"));
        assert!(is_dative_plural("hunden", "hunde"));
    }

    #[test]
    fn comparative_endings() {
        assert_eq!(choose_stem("klarer", &opts(&["klar", "klare"])).as_deref(), Some("klar"));
        assert_eq!(StemRule::ComparativeEre.apply("klarere", &opts(&["klar"])).as_deref(), Some("klar"));
        assert_eq!(
            StemRule::ComparativeEreToEr.apply("andere", &opts(&["ander"])).as_deref(),
            Some("ander")
        );
    }

    #[test]
    fn verb_prefix_needs_a_unique_match() {
        let unique = opts(&["vorlaufen", "laufen"]);
        assert_eq!(
            StemRule::VerbPrefix.apply("vorlauf", &unique).as_deref(),
            Some("vorlaufen")
        );
        let ambiguous = opts(&["verlieren", "verloren"]);
        assert_eq!(StemRule::VerbPrefix.apply("verlor", &ambiguous), None);
        assert_eq!(StemRule::VerbPrefix.apply("laufen", &unique), None);
    }

    #[test]
    fn determiner_forms_drop_last_letter() {
        assert!(is_determiner_like("dern"));
        assert!(is_determiner_like("ten"));
        assert!(!is_determiner_like("dar"));
        assert_eq!(StemRule::Determiner.apply("denn", &opts(&["den", "dann"])).as_deref(), Some("den"));
    }

    fn deciding_rule(word: &str, options: &[String]) -> Option<StemRule> {
        STEM_RULES
            .into_iter()
            .find(|rule| rule.apply(word, options).is_some())
    }

    #[test]
    fn verb_prefix_wins_once_earlier_rules_fall_through() {
        let options = opts(&["vorrangig", "rang"]);
        assert_eq!(deciding_rule("vorrang", &options), Some(StemRule::VerbPrefix));
        assert_eq!(choose_stem("vorrang", &options).as_deref(), Some("vorrangig"));

        // Every `ver-` word contains an `e`, so an `-en` candidate is taken earlier.
        let options = opts(&["verlaufen", "laufen"]);
        assert_eq!(deciding_rule("verlauf", &options), Some(StemRule::Infinitive));
        assert_eq!(choose_stem("verlauf", &options).as_deref(), Some("verlaufen"));
    }

    #[test]
    fn determiner_wins_once_earlier_rules_fall_through() {
        let options = opts(&["der", "dar"]);
        assert_eq!(deciding_rule("dern", &options), Some(StemRule::Determiner));
        assert_eq!(choose_stem("dern", &options).as_deref(), Some("der"));

        let options = opts(&["ter", "tor"]);
        assert_eq!(deciding_rule("tern", &options), Some(StemRule::Determiner));
        assert_eq!(choose_stem("tern", &options).as_deref(), Some("ter"));
    }

    #[test]
    fn falls_back_to_identity_then_gives_up() {
        assert_eq!(choose_stem("ab", &opts(&["ab", "abb"])).as_deref(), Some("ab"));
        assert_eq!(choose_stem("ab", &opts(&["xy", "zz"])), None);
    }

    #[test]
    fn choice_is_always_a_candidate_or_the_word() {
        let cases: &[(&str, &[&str])] = &[
            ("hunde", &["hund", "hunden"]),
            ("macht", &["mach", "machen"]),
            ("verloren", &["verlieren", "verlor"]),
            ("der", &["de", "die"]),
            ("kinder", &["kind", "kinde"]),
            ("arbeitest", &["arbeit", "arbeiten"]),
            ("xyz", &["a", "b"]),
        ];
        for (word, options) in cases {
            let options = opts(options);
            if let Some(choice) = choose_stem(word, &options) {
                assert!(choice == *word || options.contains(&choice), "{word} -> {choice}");
            }
        }
    }

    #[test]
    fn closures_act_as_analyzers() {
        let analyzer = |word: &str| {
            if word == "hunde" {
                vec!["hund".to_string(), "hunden".to_string()]
            } else {
                Vec::new()
            }
        };
        assert_eq!(analyzer.stems("hunde").len(), 2);
        assert!(analyzer.stems("katze").is_empty());
    }
}
