use std::{cmp::Ordering, fmt, marker::PhantomData};

use num::Float;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{error::Result, vectorizer::{corpus::CorpusFrequencyIndex, document::DocumentVector, frequency::FrequencyMultiset, term::Term, tfidf::{DefaultTFIDFEngine, TFIDFEngine}}};

/// TF-IDF weighted cosine similarity against a fixed query
///
/// The query always plays the base role. A document with no weight on any
/// indexed term scores 0, and so does a query with no indexed weight
/// instead of dividing by zero.
pub struct SimilarityScorer<'a, N = f64, E = DefaultTFIDFEngine>
where
    N: Float,
    E: TFIDFEngine<N>,
{
    query: &'a FrequencyMultiset<Term>,
    index: &'a CorpusFrequencyIndex,
    _marker: PhantomData<fn() -> (N, E)>,
}

impl<'a, N, E> SimilarityScorer<'a, N, E>
where
    N: Float,
    E: TFIDFEngine<N>,
{
    pub fn new(query: &'a FrequencyMultiset<Term>, index: &'a CorpusFrequencyIndex) -> Self {
        Self {
            query,
            index,
            _marker: PhantomData,
        }
    }

    /// Score one document against the query
    /// cosθ = Q・D / (|Q||D|), in [0, 1]
    pub fn score(&self, doc: &FrequencyMultiset<Term>) -> N {
        let query = self.query;
        let mut dot = N::zero();
        let mut doc_mag2 = N::zero();
        let mut query_mag2 = N::zero();

        // union of both key sets, each term once
        let candidates = query
            .iter()
            .chain(doc.iter().filter(|term| !query.contains(term)));
        for term in candidates {
            let doc_freq = self.index.doc_freq(term);
            if doc_freq == 0 {
                continue;
            }
            let doc_weight = E::weight(doc_freq, doc.count(term), doc.total());
            let query_weight = E::weight(doc_freq, query.count(term), query.total());
            dot = dot + doc_weight * query_weight;
            doc_mag2 = doc_mag2 + doc_weight * doc_weight;
            query_mag2 = query_mag2 + query_weight * query_weight;
        }

        // disjoint from every indexed term
        if doc_mag2.is_zero() {
            return N::zero();
        }
        // query without indexed weight would divide by zero
        if query_mag2.is_zero() {
            return N::zero();
        }
        dot / (doc_mag2.sqrt() * query_mag2.sqrt())
    }

    /// Score every document in parallel
    /// Each document's score goes from unset to set.
    pub fn score_all(&self, documents: &mut [DocumentVector<N>])
    where
        N: Send + Sync,
    {
        documents.par_iter_mut().for_each(|doc| {
            let score = self.score(doc.terms());
            doc.set_score(score);
        });
    }
}

/// A single ranked result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitEntry<N = f64> {
    /// document name
    pub key: String,
    pub score: N,
}

/// Structure to store ranked results, best first
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Hits<N = f64> {
    pub list: Vec<HitEntry<N>>,
}

impl<N> Hits<N>
where
    N: Float,
{
    /// Rank scored documents and keep the best `k`
    ///
    /// Sorting is stable: equal scores keep their input order.
    /// Scores are compared in IEEE total order, so a NaN never breaks the sort.
    /// Fails with `InvalidState` if any document is unscored.
    pub fn from_scored(documents: &[DocumentVector<N>], k: usize) -> Result<Self> {
        let mut list = documents
            .iter()
            .map(|doc| -> Result<HitEntry<N>> {
                Ok(HitEntry {
                    key: doc.name().to_string(),
                    score: doc.score()?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        list.sort_by(|a, b| descending(a.score, b.score));
        list.truncate(k);
        Ok(Hits { list })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HitEntry<N>> {
        self.list.iter()
    }
}

/// Best score first
fn descending<N: Float>(a: N, b: N) -> Ordering {
    let key = |score: N| score.to_f64().unwrap_or(f64::NAN);
    key(b).total_cmp(&key(a))
}

/// One `name : score` line per hit
/// Scores always print as floats, `1.0` and `0.0` included.
impl<N> fmt::Display for Hits<N>
where
    N: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for hit in &self.list {
            writeln!(f, "{} : {:?}", hit.key, hit.score)?;
        }
        Ok(())
    }
}

impl<N> fmt::Debug for Hits<N>
where
    N: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            // each hit on a new line
            writeln!(f, "Hits [")?;
            for hit in &self.list {
                writeln!(f, "    {:?}: {:?}", hit.key, hit.score)?;
            }
            write!(f, "]")
        } else {
            f.debug_list()
                .entries(self.list.iter().map(|hit| (&hit.key, &hit.score)))
                .finish()
        }
    }
}
