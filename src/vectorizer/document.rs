use std::cmp::Ordering;

use num::Float;

use crate::{error::{CompareError, Result}, vectorizer::{frequency::FrequencyMultiset, term::Term}};

/// Split text on whitespace and canonicalize each token
/// Tokens made only of punctuation are dropped.
pub fn tokenize(text: &str) -> impl Iterator<Item = Term> + '_ {
    text.split_whitespace().filter_map(Term::new)
}

/// DocumentVector struct
/// The term multiset of one named document plus its similarity score.
///
/// The score starts unset and can only be read once the scorer has set it.
#[derive(Debug, Clone)]
pub struct DocumentVector<N = f64>
where
    N: Float,
{
    name: String,
    terms: FrequencyMultiset<Term>,
    score: Option<N>,
}

impl<N> DocumentVector<N>
where
    N: Float,
{
    /// Build the vector of `text`
    /// Terms contained in `stopwords` are left out.
    ///
    /// # Arguments
    /// * `name` - stable identifier, usually the source path
    /// * `text` - raw document text
    /// * `stopwords` - terms to ignore, `None` keeps every term
    pub fn new(name: impl Into<String>, text: &str, stopwords: Option<&FrequencyMultiset<Term>>) -> Self {
        let terms = tokenize(text)
            .filter(|term| stopwords.map_or(true, |stop| !stop.contains(term)))
            .collect();
        DocumentVector {
            name: name.into(),
            terms,
            score: None,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn terms(&self) -> &FrequencyMultiset<Term> {
        &self.terms
    }

    /// Cosine similarity against the query
    /// Fails with `InvalidState` before the score is computed.
    pub fn score(&self) -> Result<N> {
        self.score.ok_or_else(|| CompareError::InvalidState {
            name: self.name.clone(),
        })
    }

    #[inline]
    pub fn is_scored(&self) -> bool {
        self.score.is_some()
    }

    #[inline]
    pub fn set_score(&mut self, score: N) {
        self.score = Some(score);
    }

    /// Ordering by descending score
    /// Fails if either document is still unscored.
    pub fn compare_score(&self, other: &Self) -> Result<Ordering> {
        let ours = self.score()?;
        let theirs = other.score()?;
        Ok(theirs.partial_cmp(&ours).unwrap_or(Ordering::Equal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(raw: &str) -> Term {
        Term::new(raw).unwrap()
    }

    #[test]
    fn builds_multiset_from_text() {
        let doc: DocumentVector = DocumentVector::new("a.txt", "The cat, the DOG.\n  the -- end", None);
        assert_eq!(doc.name(), "a.txt");
        assert_eq!(doc.terms().count(&term("the")), 3);
        assert_eq!(doc.terms().count(&term("dog")), 1);
        assert_eq!(doc.terms().total(), 6);
    }

    #[test]
    fn stopwords_are_filtered() {
        let stop: DocumentVector = DocumentVector::new("stopwords.txt", "the A", None);
        let doc: DocumentVector = DocumentVector::new("a.txt", "The cat sat on a mat", Some(stop.terms()));
        assert!(!doc.terms().contains(&term("the")));
        assert!(!doc.terms().contains(&term("a")));
        assert_eq!(doc.terms().total(), 4);
    }

    #[test]
    fn score_is_unset_until_computed() {
        let mut doc: DocumentVector = DocumentVector::new("a.txt", "cat", None);
        assert!(matches!(doc.score(), Err(CompareError::InvalidState { ref name }) if name == "a.txt"));
        doc.set_score(0.5);
        assert_eq!(doc.score().unwrap(), 0.5);
    }

    #[test]
    fn comparing_unscored_documents_fails() {
        let mut a: DocumentVector = DocumentVector::new("a", "cat", None);
        let b: DocumentVector = DocumentVector::new("b", "dog", None);
        a.set_score(0.2);
        assert!(a.compare_score(&b).is_err());
        assert!(b.compare_score(&a).is_err());
    }

    #[test]
    fn higher_score_sorts_first() {
        let mut a: DocumentVector = DocumentVector::new("a", "cat", None);
        let mut b: DocumentVector = DocumentVector::new("b", "dog", None);
        a.set_score(0.9);
        b.set_score(0.1);
        assert_eq!(a.compare_score(&b).unwrap(), Ordering::Less);
        assert_eq!(b.compare_score(&a).unwrap(), Ordering::Greater);
    }
}
