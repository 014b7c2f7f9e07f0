use serde::{Deserialize, Serialize};

use crate::vectorizer::{frequency::FrequencyMultiset, term::Term};

/// Document frequency of every term over a fixed document set
///
/// `doc_freq(t)` is the number of documents that contain `t` at least once,
/// never the raw number of occurrences. The index is built once and then
/// only read, so it can be shared by all scoring threads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorpusFrequencyIndex {
    /// term -> number of documents containing it
    doc_freq: FrequencyMultiset<Term>,
    /// number of documents the index was built from
    doc_num: u64,
}

impl CorpusFrequencyIndex {
    /// Build the index by merging the unique view of every document
    pub fn build<'a, I>(documents: I) -> Self
    where
        I: IntoIterator<Item = &'a FrequencyMultiset<Term>>,
    {
        let mut doc_freq = FrequencyMultiset::new();
        let mut doc_num = 0;
        for terms in documents {
            doc_freq.merge(&terms.unique_view());
            doc_num += 1;
        }
        tracing::debug!(
            target: "doc_compare",
            doc_num,
            vocab_size = doc_freq.len(),
            "Corpus frequency index built"
        );
        Self { doc_freq, doc_num }
    }

    /// Number of documents containing `term`, 0 if unknown
    #[inline]
    pub fn doc_freq(&self, term: &Term) -> u64 {
        self.doc_freq.count(term)
    }

    #[inline]
    pub fn doc_num(&self) -> u64 {
        self.doc_num
    }

    /// Number of distinct terms in the corpus
    #[inline]
    pub fn vocab_size(&self) -> usize {
        self.doc_freq.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorizer::document::tokenize;

    fn bag(text: &str) -> FrequencyMultiset<Term> {
        tokenize(text).collect()
    }

    #[test]
    fn counts_documents_not_occurrences() {
        let docs = [bag("cat dog"), bag("dog dog dog"), bag("Dog bird")];
        let index = CorpusFrequencyIndex::build(&docs);
        assert_eq!(index.doc_num(), 3);
        assert_eq!(index.doc_freq(&Term::new("dog").unwrap()), 3);
        assert_eq!(index.doc_freq(&Term::new("cat").unwrap()), 1);
        assert_eq!(index.doc_freq(&Term::new("fish").unwrap()), 0);
        assert_eq!(index.vocab_size(), 3);
    }

    #[test]
    fn doc_freq_never_exceeds_doc_num() {
        let docs = [bag("a a a b"), bag("a c c"), bag("")];
        let index = CorpusFrequencyIndex::build(&docs);
        for term in docs.iter().flat_map(|doc| doc.iter()) {
            assert!(index.doc_freq(term) >= 1);
            assert!(index.doc_freq(term) <= index.doc_num());
        }
    }

    #[test]
    fn empty_corpus() {
        let index = CorpusFrequencyIndex::build(std::iter::empty());
        assert_eq!(index.doc_num(), 0);
        assert_eq!(index.vocab_size(), 0);
    }
}
