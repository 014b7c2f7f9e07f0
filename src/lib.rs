//! This crate ranks documents by TF-IDF weighted cosine similarity to a query document.

pub mod error;
pub mod vectorizer;

/// Document comparison pipeline
/// The top-level struct of this crate.
/// It takes a query text, an optional stopword text and any number of
/// candidate documents, and ranks the candidates by similarity to the query.
///
/// Internally, it holds:
/// - The stopword multiset
/// - The query multiset (not stopword filtered)
/// - One `DocumentVector` per candidate
/// - The sources that could not be read
///
/// `DocCompare<N, E>` has the following generic parameters:
/// - `N`: Score type (f32, f64)
/// - `E`: TF-IDF weighting engine (e.g., DefaultTFIDFEngine)
pub use vectorizer::DocCompare;

/// One-shot ranking of `(name, text)` pairs
pub use vectorizer::rank_documents;

/// Canonical term
/// Punctuation stripped, compared and hashed case-insensitively.
pub use vectorizer::term::Term;

/// Multiset of terms (or any hashable key)
/// Keeps the count of each key and the total count.
/// Merging sums counts; the unique view maps every key to 1.
pub use vectorizer::frequency::FrequencyMultiset;

/// Term multiset of one named document plus its similarity score
/// The score is unset until computed, reading it earlier is an error.
pub use vectorizer::document::DocumentVector;

/// Document frequency index
/// For each term, the number of documents that contain it.
/// Built once, then shared read-only by all scoring threads.
pub use vectorizer::corpus::CorpusFrequencyIndex;

/// TF IDF Calculation Engine Trait
/// Defines the per-term weight used by the scorer.
/// `DefaultTFIDFEngine` uses `idf = 1/df` and `tf = ln(1 + count/total)`
/// and supports f32 and f64.
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};

/// Weighted cosine similarity against a fixed query
pub use vectorizer::evaluate::scoring::SimilarityScorer;

/// Search Hits and Hit Entry structures
/// - `Hits`: ranked results, best first, at most `k` entries
/// - `HitEntry`: a single result, containing the document name and score
pub use vectorizer::evaluate::scoring::{HitEntry, Hits};

pub use error::{CompareError, Result};
