// Bag-of-words counting stage.
//
// Each document is lowercased, split into tokens and counted against a
// vocabulary that grows in first-seen order. The vocabulary persists across
// calls, so fitting a second corpus only appends the new words; earlier
// columns keep their positions.

use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result};
use regex_lite::Regex;
use stop_words::{get, LANGUAGE};
use tracing::debug;

use super::traits::{Matrix, Vectorizer};

/// Counting vectorizer with an insertion-ordered, deduplicated vocabulary.
#[derive(Debug, Clone)]
pub struct CountVectorizer {
    /// Lowercase documents before tokenizing (default: true)
    lowercase: bool,
    /// Token regex; `None` splits on whitespace
    token_pattern: Option<Regex>,
    /// Tokens dropped before counting
    stop_words: HashSet<String>,
    vocabulary: Vec<String>,
    index: HashMap<String, usize>,
}

impl Default for CountVectorizer {
    fn default() -> Self {
        Self {
            lowercase: true,
            token_pattern: None,
            stop_words: HashSet::new(),
            vocabulary: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl CountVectorizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep or drop the lowercasing step.
    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Tokenize with a regex instead of whitespace splitting.
    /// Each match is one token.
    pub fn with_token_pattern(mut self, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .with_context(|| format!("Invalid token pattern: {pattern}"))?;
        self.token_pattern = Some(regex);
        Ok(self)
    }

    /// Drop English stop words from the `stop-words` list.
    pub fn with_english_stop_words(mut self) -> Self {
        let words: Vec<String> = get(LANGUAGE::English);
        self.stop_words.extend(words);
        self
    }

    /// Drop a custom set of stop words (matched after lowercasing).
    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words.extend(words.into_iter().map(Into::into));
        self
    }

    /// Split a document into the tokens that will be counted.
    pub fn tokenize(&self, document: &str) -> Vec<String> {
        let text = if self.lowercase {
            document.to_lowercase()
        } else {
            document.to_string()
        };

        let tokens: Vec<String> = match &self.token_pattern {
            Some(regex) => regex
                .find_iter(&text)
                .map(|m| m.as_str().to_string())
                .collect(),
            None => text.split_whitespace().map(str::to_string).collect(),
        };

        tokens
            .into_iter()
            .filter(|t| !self.stop_words.contains(t))
            .collect()
    }

    /// Extend the vocabulary with every new token in `corpus`.
    pub fn fit<S: AsRef<str>>(&mut self, corpus: &[S]) {
        let before = self.vocabulary.len();
        for document in corpus {
            for token in self.tokenize(document.as_ref()) {
                if !self.index.contains_key(&token) {
                    self.index.insert(token.clone(), self.vocabulary.len());
                    self.vocabulary.push(token);
                }
            }
        }
        debug!(
            documents = corpus.len(),
            added = self.vocabulary.len() - before,
            vocabulary = self.vocabulary.len(),
            "Fitted vocabulary"
        );
    }

    /// Count tokens against the current vocabulary. Unseen tokens are ignored.
    pub fn transform<S: AsRef<str>>(&self, corpus: &[S]) -> Matrix<u32> {
        corpus
            .iter()
            .map(|document| {
                let mut row = vec![0u32; self.vocabulary.len()];
                for token in self.tokenize(document.as_ref()) {
                    if let Some(&col) = self.index.get(&token) {
                        row[col] += 1;
                    }
                }
                row
            })
            .collect()
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }
}

impl Vectorizer for CountVectorizer {
    type Output = u32;

    fn fit_transform<S: AsRef<str>>(&mut self, corpus: &[S]) -> Matrix<u32> {
        self.fit(corpus);
        self.transform(corpus)
    }

    fn feature_names(&self) -> &[String] {
        &self.vocabulary
    }
}
