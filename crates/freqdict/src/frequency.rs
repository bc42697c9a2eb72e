use std::collections::HashMap;
use std::collections::hash_map;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use freqdict_types::Separator;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::PipelineError;
use crate::tokenize::Tokenizer;

/// Case-folded word to occurrence count.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WordFrequency {
    counts: HashMap<String, u64>,
}

impl WordFrequency {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` occurrences of `word`, creating the entry if needed.
    /// Counts saturate at `u64::MAX`.
    pub fn add(&mut self, word: impl Into<String>, count: u64) {
        let entry = self.counts.entry(word.into()).or_insert(0);
        *entry = entry.saturating_add(count);
    }

    pub fn get(&self, word: &str) -> Option<u64> {
        self.counts.get(word).copied()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.counts.contains_key(word)
    }

    pub fn remove(&mut self, word: &str) -> Option<u64> {
        self.counts.remove(word)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.counts.values().fold(0, |acc, &c| acc.saturating_add(c))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counts.iter().map(|(w, c)| (w.as_str(), *c))
    }

    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.counts.keys().map(String::as_str)
    }

    /// Remove every word the predicate flags.
    ///
    /// The misfit set is computed from a read-only snapshot before anything is
    /// removed, so the predicate never observes a partially filtered map.
    pub fn drop_misfits<F>(&mut self, is_misfit: F) -> usize
    where
        F: Fn(&str, u64) -> bool,
    {
        let misfits: Vec<String> = self
            .counts
            .iter()
            .filter(|(word, count)| is_misfit(word, **count))
            .map(|(word, _)| word.clone())
            .collect();
        for word in &misfits {
            self.counts.remove(word);
        }
        misfits.len()
    }

    /// Drop entries observed `threshold` times or fewer.
    pub fn apply_threshold(&mut self, threshold: u64) -> usize {
        let removed = self.drop_misfits(|_, count| count <= threshold);
        debug!("threshold {threshold} removed {removed} words");
        removed
    }

    /// Entries by descending count, ties broken by ascending word.
    pub fn sorted(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// Write `<count><sep><word>` lines in [`WordFrequency::sorted`] order.
    pub fn write_to<W: Write>(&self, writer: W, separator: Separator) -> std::io::Result<()> {
        let mut writer = BufWriter::new(writer);
        let sep = separator.as_str();
        for (word, count) in self.sorted() {
            writeln!(writer, "{count}{sep}{word}")?;
        }
        writer.flush()
    }

    /// Export to `path` atomically: the list is written to a temporary file
    /// in the same directory and moved into place once complete.
    pub fn export(&self, path: impl AsRef<Path>, separator: Separator) -> Result<(), PipelineError> {
        self.stage(path, separator)?.commit()
    }

    /// Write the list next to `path` without moving it into place yet.
    pub fn stage(
        &self,
        path: impl AsRef<Path>,
        separator: Separator,
    ) -> Result<StagedExport, PipelineError> {
        let path = path.as_ref();
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;
        let mut temp = NamedTempFile::new_in(parent).map_err(|e| PipelineError::io(parent, e))?;
        self.write_to(temp.as_file_mut(), separator)
            .map_err(|e| PipelineError::io(path, e))?;
        Ok(StagedExport {
            temp,
            path: path.to_path_buf(),
            words: self.len(),
        })
    }

    /// Read an exported list; count and word may be separated by any whitespace.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| PipelineError::io(path, e))?;
        let mut words = Self::new();
        for (lineno, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| PipelineError::io(path, e))?;
            if line.trim().is_empty() {
                continue;
            }
            let mut parts = line.split_whitespace();
            let parsed = match (parts.next(), parts.next(), parts.next()) {
                (Some(count), Some(word), None) => count.parse::<u64>().ok().map(|c| (word, c)),
                _ => None,
            };
            let Some((word, count)) = parsed else {
                return Err(PipelineError::MalformedEntry {
                    path: path.to_path_buf(),
                    line: lineno + 1,
                    content: line,
                });
            };
            words.add(word, count);
        }
        debug!("loaded {} words from {}", words.len(), path.display());
        Ok(words)
    }
}

/// A fully written export; dropping it without [`StagedExport::commit`]
/// deletes the temporary file.
pub struct StagedExport {
    temp: NamedTempFile,
    path: PathBuf,
    words: usize,
}

impl StagedExport {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Move the temporary file over the target path.
    pub fn commit(self) -> Result<(), PipelineError> {
        let StagedExport { temp, path, words } = self;
        temp.persist(&path)
            .map_err(|e| PipelineError::io(&path, e.error))?;
        info!("exported {} words to {}", words, path.display());
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for WordFrequency {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut words = Self::new();
        for (word, count) in iter {
            words.add(word, count);
        }
        words
    }
}

impl IntoIterator for WordFrequency {
    type Item = (String, u64);
    type IntoIter = hash_map::IntoIter<String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}

/// Stream lines from `reader` through `tokenizer` and count the survivors.
///
/// Tokens tagged as proper nouns are skipped, as are tokens that start or end
/// with a non-alphabetic character. Everything else is lower-cased. Returns
/// the counts and the number of lines read.
pub fn accumulate<R, T>(reader: R, tokenizer: &T) -> std::io::Result<(WordFrequency, usize)>
where
    R: BufRead,
    T: Tokenizer + ?Sized,
{
    let mut words = WordFrequency::new();
    let mut lines = 0usize;
    for line in reader.lines() {
        let line = line?;
        lines += 1;
        for token in tokenizer.tokenize(&line) {
            if token.is_proper_noun() || !alphabetic_bounds(&token.text) {
                continue;
            }
            words.add(token.text.to_lowercase(), 1);
        }
    }
    Ok((words, lines))
}

/// [`accumulate`] over a corpus file.
pub fn accumulate_file<T>(path: impl AsRef<Path>, tokenizer: &T) -> Result<(WordFrequency, usize), PipelineError>
where
    T: Tokenizer + ?Sized,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| PipelineError::io(path, e))?;
    let (words, lines) =
        accumulate(BufReader::new(file), tokenizer).map_err(|e| PipelineError::io(path, e))?;
    info!(
        "counted {} distinct words over {} lines from {}",
        words.len(),
        lines,
        path.display()
    );
    Ok((words, lines))
}

fn alphabetic_bounds(token: &str) -> bool {
    let mut chars = token.chars();
    let first = chars.next();
    let last = chars.next_back().or(first);
    matches!((first, last), (Some(a), Some(b)) if a.is_alphabetic() && b.is_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize::WhitespaceTokenizer;
    use std::io::Cursor;

    #[test]
    fn accumulates_lowercased_counts() {
        let corpus = "The dog saw the DOG\n\"quoted\" words, and more!\nthe end\n";
        let (words, lines) =
            accumulate(Cursor::new(corpus), &WhitespaceTokenizer::new()).unwrap();
        assert_eq!(lines, 3);
        assert_eq!(words.get("the"), Some(3));
        assert_eq!(words.get("dog"), Some(2));
        assert_eq!(words.get("and"), Some(1));
        assert!(!words.contains("\"quoted\""));
        assert!(!words.contains("words,"));
        assert!(!words.contains("more!"));
    }

    #[test]
    fn skips_tagged_proper_nouns() {
        let corpus = "We met Anna in Paris\n";
        let tok = WhitespaceTokenizer::with_proper_noun_tagging(true);
        let (words, _) = accumulate(Cursor::new(corpus), &tok).unwrap();
        assert!(words.contains("we"));
        assert!(!words.contains("anna"));
        assert!(!words.contains("paris"));
    }

    #[test]
    fn keeps_inner_punctuation() {
        assert!(alphabetic_bounds("can't"));
        assert!(alphabetic_bounds("a"));
        assert!(!alphabetic_bounds("'tis"));
        assert!(!alphabetic_bounds("42"));
        assert!(!alphabetic_bounds(""));
    }

    #[test]
    fn threshold_is_inclusive() {
        let mut words: WordFrequency = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        assert_eq!(words.apply_threshold(0), 0);
        assert_eq!(words.apply_threshold(2), 2);
        assert_eq!(words.words().collect::<Vec<_>>(), vec!["c"]);
    }

    #[test]
    fn sorts_by_count_then_word() {
        let words: WordFrequency = [("beta", 2), ("alpha", 2), ("gamma", 5), ("delta", 1)]
            .into_iter()
            .collect();
        let order: Vec<&str> = words.sorted().into_iter().map(|(w, _)| w).collect();
        assert_eq!(order, vec!["gamma", "alpha", "beta", "delta"]);
    }

    #[test]
    fn writes_with_chosen_separator() {
        let words: WordFrequency = [("haus", 3), ("auto", 7)].into_iter().collect();
        let mut out = Vec::new();
        words.write_to(&mut out, Separator::Tab).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "7\tauto\n3\thaus\n");
    }

    #[test]
    fn exports_and_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.txt");
        let words: WordFrequency = [("haus", 3), ("auto", 7)].into_iter().collect();
        words.export(&path, Separator::Space).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "7 auto\n3 haus\n");
        assert_eq!(WordFrequency::load(&path).unwrap(), words);
    }

    #[test]
    fn counts_saturate_instead_of_overflowing() {
        let mut words: WordFrequency = [("haus", u64::MAX)].into_iter().collect();
        words.add("haus", 2);
        words.add("auto", u64::MAX);
        assert_eq!(words.get("haus"), Some(u64::MAX));
        assert_eq!(words.total(), u64::MAX);
    }

    #[test]
    fn staged_export_appears_only_on_commit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let words: WordFrequency = [("haus", 3)].into_iter().collect();

        let staged = words.stage(&path, Separator::Space).unwrap();
        assert_eq!(staged.path(), path.as_path());
        assert!(!path.exists());
        drop(staged);
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);

        words.stage(&path, Separator::Space).unwrap().commit().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "3 haus\n");
    }

    #[test]
    fn load_rejects_malformed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        std::fs::write(&path, "3 haus\nmany auto\n").unwrap();
        let err = WordFrequency::load(&path).unwrap_err();
        assert!(matches!(err, PipelineError::MalformedEntry { line: 2, .. }));
    }
}
