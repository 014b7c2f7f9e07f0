pub mod corpus;
pub mod document;
pub mod evaluate;
pub mod frequency;
pub mod term;
pub mod tfidf;

use std::{io, marker::PhantomData};

use num::Float;

use crate::{error::{CompareError, Result}, vectorizer::{corpus::CorpusFrequencyIndex, document::{tokenize, DocumentVector}, evaluate::scoring::{Hits, SimilarityScorer}, frequency::FrequencyMultiset, term::Term, tfidf::{DefaultTFIDFEngine, TFIDFEngine}}};

/// Ranks a set of documents against one query document
///
/// Documents are added one by one; `rank` then builds the corpus index
/// once, scores every document in parallel and returns the best `k`.
#[derive(Debug)]
pub struct DocCompare<N = f64, E = DefaultTFIDFEngine>
where
    N: Float,
    E: TFIDFEngine<N>,
{
    /// terms ignored in every candidate document
    stopwords: Option<FrequencyMultiset<Term>>,
    /// query terms, never stopword filtered
    query: FrequencyMultiset<Term>,
    documents: Vec<DocumentVector<N>>,
    /// sources that could not be read
    skipped: Vec<CompareError>,
    _marker: PhantomData<fn() -> E>,
}

impl<N, E> DocCompare<N, E>
where
    N: Float + Send + Sync,
    E: TFIDFEngine<N>,
{
    /// Create a comparison for `query_text`
    /// `stopwords_text` is parsed as a plain, unfiltered document.
    pub fn new(query_text: &str, stopwords_text: Option<&str>) -> Self {
        Self {
            stopwords: stopwords_text.map(|text| tokenize(text).collect()),
            query: tokenize(query_text).collect(),
            documents: Vec::new(),
            skipped: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Add a candidate document
    pub fn add_document(&mut self, name: impl Into<String>, text: &str) -> &mut Self {
        let doc = DocumentVector::new(name, text, self.stopwords.as_ref());
        self.documents.push(doc);
        self
    }

    /// Add a candidate whose text may have failed to load
    /// A failed source is recorded and left out of the ranking.
    pub fn add_source(&mut self, name: impl Into<String>, source: io::Result<String>) -> &mut Self {
        let name = name.into();
        match source {
            Ok(text) => {
                self.add_document(name, &text);
            }
            Err(source) => {
                tracing::warn!(
                    target: "doc_compare",
                    name = %name,
                    error = %source,
                    "Skipping unreadable source"
                );
                self.skipped.push(CompareError::UnreadableSource { name, source });
            }
        }
        self
    }

    /// Rank all documents and keep the best `k`
    ///
    /// # Errors
    /// * `InvalidArgument` - `k == 0`, nothing is scored
    pub fn rank(&mut self, k: usize) -> Result<Hits<N>> {
        if k == 0 {
            return Err(CompareError::InvalidArgument("k must be greater than 0".to_string()));
        }
        let index = CorpusFrequencyIndex::build(self.documents.iter().map(|doc| doc.terms()));
        let scorer: SimilarityScorer<'_, N, E> = SimilarityScorer::new(&self.query, &index);
        scorer.score_all(&mut self.documents);
        let hits = Hits::from_scored(&self.documents, k)?;
        tracing::debug!(
            target: "doc_compare",
            candidates = self.documents.len(),
            skipped = self.skipped.len(),
            hits = hits.len(),
            "Documents ranked"
        );
        Ok(hits)
    }

    #[inline]
    pub fn documents(&self) -> &[DocumentVector<N>] {
        &self.documents
    }

    #[inline]
    pub fn skipped(&self) -> &[CompareError] {
        &self.skipped
    }

    #[inline]
    pub fn query(&self) -> &FrequencyMultiset<Term> {
        &self.query
    }

    #[inline]
    pub fn stopwords(&self) -> Option<&FrequencyMultiset<Term>> {
        self.stopwords.as_ref()
    }
}

/// Rank `(name, text)` documents against `query_text`
/// Rejects `k == 0` before any document is read.
pub fn rank_documents<I, S, T>(query_text: &str, stopwords_text: Option<&str>, documents: I, k: usize) -> Result<Hits>
where
    I: IntoIterator<Item = (S, T)>,
    S: Into<String>,
    T: AsRef<str>,
{
    if k == 0 {
        return Err(CompareError::InvalidArgument("k must be greater than 0".to_string()));
    }
    let mut compare: DocCompare = DocCompare::new(query_text, stopwords_text);
    for (name, text) in documents {
        compare.add_document(name, text.as_ref());
    }
    compare.rank(k)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(hits: &Hits) -> Vec<&str> {
        hits.iter().map(|hit| hit.key.as_str()).collect()
    }

    #[test]
    fn cat_dog_ranking() {
        let docs = [("A", "cat dog"), ("B", "dog dog")];
        let hits = rank_documents("cat", Some(""), docs, 2).unwrap();
        assert_eq!(keys(&hits), vec!["A", "B"]);
        assert!((hits.list[0].score - 0.8944).abs() < 1e-3);
        assert_eq!(hits.list[1].score, 0.0);

        let top = rank_documents("cat", None, docs, 1).unwrap();
        assert_eq!(keys(&top), vec!["A"]);
    }

    #[test]
    fn k_zero_is_rejected() {
        let err = rank_documents("cat", None, [("A", "cat")], 0).unwrap_err();
        assert!(matches!(err, CompareError::InvalidArgument(_)));

        let mut compare: DocCompare = DocCompare::new("cat", None);
        compare.add_document("A", "cat");
        assert!(compare.rank(0).is_err());
        assert!(!compare.documents()[0].is_scored());
    }

    #[test]
    fn stopword_terms_never_reach_documents() {
        let mut compare: DocCompare = DocCompare::new("the cat", Some("The of"));
        compare.add_document("A", "the cat of the hat");
        let the = Term::new("the").unwrap();
        assert!(!compare.documents()[0].terms().contains(&the));
        assert!(compare.query().contains(&the));
        assert!(compare.stopwords().unwrap().contains(&the));
    }

    #[test]
    fn unreadable_source_is_skipped() {
        let mut compare: DocCompare = DocCompare::new("cat", None);
        compare
            .add_source("A", Ok("cat".to_string()))
            .add_source("B", Err(io::Error::new(io::ErrorKind::NotFound, "gone")))
            .add_source("C", Ok("dog".to_string()));
        let hits = compare.rank(10).unwrap();
        assert_eq!(keys(&hits), vec!["A", "C"]);
        assert_eq!(compare.skipped().len(), 1);
        assert!(matches!(&compare.skipped()[0], CompareError::UnreadableSource { name, .. } if name == "B"));
    }

    #[test]
    fn k_larger_than_corpus_returns_everything() {
        let docs = [("A", "cat"), ("B", "dog"), ("C", "bird")];
        let hits = rank_documents("dog", None, docs, 10).unwrap();
        assert_eq!(hits.len(), 3);
        assert_eq!(hits.list[0].key, "B");
    }

    #[test]
    fn empty_corpus_ranks_nothing() {
        let hits = rank_documents("cat", None, Vec::<(String, String)>::new(), 3).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn f32_pipeline() {
        let mut compare: DocCompare<f32> = DocCompare::new("cat", None);
        compare.add_document("A", "cat dog").add_document("B", "dog dog");
        let hits = compare.rank(2).unwrap();
        assert_eq!(hits.list[0].key, "A");
        assert!((hits.list[0].score - 0.8944).abs() < 1e-3);
    }
}
