// TF-IDF weighting on top of the counting stage.
//
// The transformer works on any count matrix:
//
//   tf  = count / row_sum
//   idf = ln((N + 1) / (df + 1)) + 1     (N documents, df = docs containing the term)
//
// tf, idf and their product are each rounded to 3 decimals, in that order,
// so the product is computed from already-rounded factors.

use tracing::debug;

use super::count::CountVectorizer;
use super::traits::{Matrix, Vectorizer};

/// Round to 3 decimal places, ties to even (0.0625 -> 0.062).
fn round3(x: f64) -> f64 {
    (x * 1000.0).round_ties_even() / 1000.0
}

/// Stateless TF-IDF arithmetic over a count matrix.
#[derive(Debug, Clone, Copy, Default)]
pub struct TfidfTransformer;

impl TfidfTransformer {
    /// Term frequency per row. A row with no tokens stays all zeros.
    pub fn tf_transform(&self, counts: &[Vec<u32>]) -> Matrix<f64> {
        counts
            .iter()
            .map(|row| {
                let total: u32 = row.iter().sum();
                row.iter()
                    .map(|&c| {
                        if total == 0 {
                            0.0
                        } else {
                            round3(f64::from(c) / f64::from(total))
                        }
                    })
                    .collect()
            })
            .collect()
    }

    /// Smoothed inverse document frequency per column.
    pub fn idf_transform(&self, counts: &[Vec<u32>]) -> Vec<f64> {
        let n_docs = counts.len() as f64;
        let n_terms = counts.iter().map(Vec::len).max().unwrap_or(0);

        (0..n_terms)
            .map(|col| {
                let df = counts
                    .iter()
                    .filter(|row| row.get(col).is_some_and(|&c| c > 0))
                    .count() as f64;
                round3(((n_docs + 1.0) / (df + 1.0)).ln() + 1.0)
            })
            .collect()
    }

    /// Element-wise tf * idf.
    pub fn fit_transform(&self, counts: &[Vec<u32>]) -> Matrix<f64> {
        let tf = self.tf_transform(counts);
        let idf = self.idf_transform(counts);

        debug!(documents = counts.len(), terms = idf.len(), "Computed TF-IDF");

        tf.into_iter()
            .map(|row| {
                row.into_iter()
                    .zip(&idf)
                    .map(|(t, &i)| round3(t * i))
                    .collect()
            })
            .collect()
    }
}

/// Counting stage followed by TF-IDF weighting.
#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer {
    counter: CountVectorizer,
    transformer: TfidfTransformer,
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured counting stage (token pattern, stop words).
    pub fn with_counter(counter: CountVectorizer) -> Self {
        Self {
            counter,
            transformer: TfidfTransformer,
        }
    }

    pub fn counter(&self) -> &CountVectorizer {
        &self.counter
    }
}

impl Vectorizer for TfidfVectorizer {
    type Output = f64;

    fn fit_transform<S: AsRef<str>>(&mut self, corpus: &[S]) -> Matrix<f64> {
        let counts = self.counter.fit_transform(corpus);
        self.transformer.fit_transform(&counts)
    }

    fn feature_names(&self) -> &[String] {
        self.counter.feature_names()
    }
}
