use std::{cmp::Ordering, fmt, hash::{Hash, Hasher}};

use serde::{Deserialize, Serialize};

use crate::error::CompareError;

/// Term struct
/// An immutable, punctuation-free token that compares case-insensitively.
///
/// The text keeps the casing it was first seen with, while equality,
/// hashing and ordering all go through the case-folded form.
///
/// # Examples
/// ```
/// use doc_compare::Term;
/// let a = Term::new("Cat,").unwrap();
/// let b = Term::new("cAT").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "Cat");
/// assert!(Term::new("?!").is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Term {
    value: Box<str>,
    folded: Box<str>,
}

impl Term {
    /// Canonicalize a raw token
    /// Returns `None` when nothing is left after stripping punctuation,
    /// such a token must be skipped by the caller.
    pub fn new(raw: &str) -> Option<Self> {
        let value: String = raw.chars().filter(|c| !c.is_ascii_punctuation()).collect();
        if value.is_empty() {
            return None;
        }
        let folded = value.to_lowercase();
        Some(Term {
            value: value.into_boxed_str(),
            folded: folded.into_boxed_str(),
        })
    }

    /// Text of the term without punctuation, original casing
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Case-folded key used for comparison
    #[inline]
    pub fn folded(&self) -> &str {
        &self.folded
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        self.folded == other.folded
    }
}

impl Eq for Term {}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.folded.hash(state);
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Term {
    fn cmp(&self, other: &Self) -> Ordering {
        self.folded.cmp(&other.folded)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl TryFrom<String> for Term {
    type Error = CompareError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Term::new(&raw).ok_or_else(|| CompareError::InvalidArgument(format!("`{raw}` is not a valid term")))
    }
}

impl From<Term> for String {
    fn from(term: Term) -> Self {
        term.value.into_string()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn strips_punctuation() {
        let term = Term::new("\"hello,world!\"").unwrap();
        assert_eq!(term.as_str(), "helloworld");
        assert_eq!(Term::new("don't").unwrap().as_str(), "dont");
    }

    #[test]
    fn punctuation_only_is_invalid() {
        assert!(Term::new("").is_none());
        assert!(Term::new("...").is_none());
        assert!(Term::new("--").is_none());
    }

    #[test]
    fn case_insensitive_equality_and_hash() {
        let mut set = HashSet::new();
        set.insert(Term::new("Dog").unwrap());
        set.insert(Term::new("DOG").unwrap());
        set.insert(Term::new("dog.").unwrap());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn ordering_ignores_case() {
        let a = Term::new("apple").unwrap();
        let b = Term::new("Banana").unwrap();
        assert_eq!(b.folded(), "banana");
        assert_eq!(a.cmp(&b), Ordering::Less);
        assert_eq!(Term::new("ZEBRA").unwrap().cmp(&Term::new("zebra").unwrap()), Ordering::Equal);
    }

    #[test]
    fn deserialize_rejects_empty_term() {
        let bytes = serde_cbor::to_vec(&"!!!".to_string()).unwrap();
        assert!(serde_cbor::from_slice::<Term>(&bytes).is_err());
        let bytes = serde_cbor::to_vec(&Term::new("Cat").unwrap()).unwrap();
        assert_eq!(serde_cbor::from_slice::<Term>(&bytes).unwrap().as_str(), "Cat");
    }
}
