// Feature extraction — bag-of-words counts, TF-IDF weighting, one-hot codes.

pub mod count;
pub mod one_hot;
pub mod tfidf;
pub mod traits;
