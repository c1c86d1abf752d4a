// Vectorizer trait: the shared face of the counting and TF-IDF stages.
//
// Both vectorizers learn a vocabulary from a corpus and turn each document
// into one row over that vocabulary. `fit_transform` is generic over the
// document type, so the trait is not object-safe: callers take it as a
// generic bound (`V: Vectorizer`), not as `dyn Vectorizer`.

/// A dense document-term matrix, one row per document.
pub type Matrix<T> = Vec<Vec<T>>;

/// Trait for turning a corpus into a document-term matrix.
pub trait Vectorizer {
    /// Cell type of the produced matrix (raw counts or weights).
    type Output;

    /// Learn vocabulary from `corpus` and return its matrix.
    fn fit_transform<S: AsRef<str>>(&mut self, corpus: &[S]) -> Matrix<Self::Output>;

    /// The learned vocabulary, in column order.
    fn feature_names(&self) -> &[String];
}
