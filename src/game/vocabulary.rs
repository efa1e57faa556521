//! Word list used both for picking secrets and for validating guesses
//!
//! The vocabulary file is prepared offline: `words` holds the candidate
//! nouns in their dictionary form, `frequencies` optionally carries a Zipf
//! frequency per word, and `white_list`/`black_list` let the operator force
//! words in or out.

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use crate::core::config::game::{MAX_WORD_LENGTH, MIN_WORD_LENGTH};
use crate::core::error::{AppError, AppResult};

/// Raw contents of `vocabulary.json`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VocabularySource {
    pub words: Vec<String>,
    pub frequencies: HashMap<String, f64>,
    pub white_list: Vec<String>,
    pub black_list: Vec<String>,
}

/// Filtered, sorted, de-duplicated word list
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    words: Vec<String>,
    by_length: BTreeMap<usize, Vec<String>>,
}

fn has_playable_length(word: &str) -> bool {
    (MIN_WORD_LENGTH..=MAX_WORD_LENGTH).contains(&word.chars().count())
}

impl Vocabulary {
    /// Loads and filters the vocabulary file.
    pub async fn from_file(path: impl AsRef<Path>, zipf_threshold: f64) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = fs_err::tokio::read_to_string(path).await?;
        let source: VocabularySource = serde_json::from_str(&raw)?;
        let vocabulary = Self::from_source(source, zipf_threshold);

        if vocabulary.is_empty() {
            return Err(AppError::Vocabulary(format!(
                "{} contains no words of {}..={} letters",
                path.display(),
                MIN_WORD_LENGTH,
                MAX_WORD_LENGTH
            )));
        }

        log::info!(
            "Loaded vocabulary from {}: {} words",
            path.display(),
            vocabulary.len()
        );
        Ok(vocabulary)
    }

    /// Builds the vocabulary from already parsed sources.
    pub fn from_source(source: VocabularySource, zipf_threshold: f64) -> Self {
        let black_list: BTreeSet<String> = source.black_list.iter().map(|w| w.trim().to_lowercase()).collect();

        let mut words: BTreeSet<String> = source
            .words
            .iter()
            .map(|w| w.trim().to_lowercase())
            .filter(|w| !w.is_empty() && w.chars().all(char::is_alphabetic))
            .filter(|w| has_playable_length(w))
            .filter(|w| !black_list.contains(w))
            .filter(|w| {
                source
                    .frequencies
                    .get(w.as_str())
                    .is_none_or(|zipf| *zipf >= zipf_threshold)
            })
            .collect();

        words.extend(
            source
                .white_list
                .iter()
                .map(|w| w.trim().to_lowercase())
                .filter(|w| has_playable_length(w)),
        );

        Self::from_words(words)
    }

    fn from_words(words: BTreeSet<String>) -> Self {
        let mut by_length: BTreeMap<usize, Vec<String>> = BTreeMap::new();
        for word in &words {
            by_length.entry(word.chars().count()).or_default().push(word.clone());
        }
        Self {
            words: words.into_iter().collect(),
            by_length,
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.binary_search_by(|w| w.as_str().cmp(word)).is_ok()
    }

    pub fn words_of_length(&self, length: usize) -> &[String] {
        self.by_length.get(&length).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Uniformly picks a secret of `length` letters, `None` if there is none.
    pub fn pick_secret<R: Rng + ?Sized>(&self, length: usize, rng: &mut R) -> Option<&str> {
        self.words_of_length(length).choose(rng).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Number of words per length, shortest first
    pub fn length_histogram(&self) -> Vec<(usize, usize)> {
        self.by_length.iter().map(|(len, words)| (*len, words.len())).collect()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}
