use std::{hash::Hash, iter::FusedIterator};

use indexmap::IndexMap;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CompareError;

/// FrequencyMultiset struct
/// A multiset (bag) that counts how many times each key was added.
///
/// Only keys with a positive count are stored, so iteration and `contains`
/// never see a zero-count entry. Iteration order is an implementation detail.
///
/// # Examples
/// ```
/// use doc_compare::FrequencyMultiset;
/// let mut bag = FrequencyMultiset::new();
/// bag.add("cat");
/// bag.add("cat");
/// bag.add("dog");
///
/// assert_eq!(bag.count(&"cat"), 2);
/// assert_eq!(bag.total(), 3);
/// assert_eq!(bag.unique_view().total(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct FrequencyMultiset<T> {
    counts: IndexMap<T, u64>,
    total: u64,
}

/// Implementation for adding and removing entries
impl<T> FrequencyMultiset<T>
where
    T: Eq + Hash,
{
    /// Create an empty multiset
    pub fn new() -> Self {
        FrequencyMultiset {
            counts: IndexMap::new(),
            total: 0,
        }
    }

    /// Add one occurrence of `key`
    #[inline]
    pub fn add(&mut self, key: T) -> &mut Self {
        self.add_count(key, 1)
    }

    /// Add `count` occurrences of `key`
    /// A zero count leaves the multiset untouched.
    #[inline]
    pub fn add_count(&mut self, key: T, count: u64) -> &mut Self {
        if count == 0 {
            return self;
        }
        *self.counts.entry(key).or_insert(0) += count;
        self.total += count;
        self
    }

    /// Sum the counts of `other` into self
    /// This is a frequency sum, not a set union.
    pub fn merge(&mut self, other: &FrequencyMultiset<T>) -> &mut Self
    where
        T: Clone,
    {
        for (key, &count) in &other.counts {
            self.add_count(key.clone(), count);
        }
        self
    }

    /// Remove one occurrence of `key`
    ///
    /// # Returns
    /// * `bool` - whether the key was present
    pub fn remove(&mut self, key: &T) -> bool {
        let Some(count) = self.counts.get_mut(key) else {
            return false;
        };
        *count -= 1;
        if *count == 0 {
            self.counts.swap_remove(key);
        }
        self.total -= 1;
        true
    }

    /// Build from decoded `(key, count)` pairs
    /// Zero counts are rejected and the total is recomputed from the counts.
    fn from_counts(counts: IndexMap<T, u64>) -> Result<Self, CompareError> {
        let mut total: u64 = 0;
        for &count in counts.values() {
            if count == 0 {
                return Err(CompareError::InvalidArgument("multiset entry with zero count".to_string()));
            }
            total = total
                .checked_add(count)
                .ok_or_else(|| CompareError::InvalidArgument("multiset total overflows u64".to_string()))?;
        }
        Ok(FrequencyMultiset { counts, total })
    }
}

/// Implementation for reading counts
impl<T> FrequencyMultiset<T>
where
    T: Eq + Hash,
{
    #[inline]
    pub fn contains(&self, key: &T) -> bool {
        self.counts.contains_key(key)
    }

    /// Occurrences of `key`, 0 if absent
    #[inline]
    pub fn count(&self, key: &T) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Sum of all counts
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct keys
    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// New multiset holding every present key once
    /// Used to turn term counts into presence for document frequency.
    pub fn unique_view(&self) -> FrequencyMultiset<T>
    where
        T: Clone,
    {
        FrequencyMultiset {
            counts: self.counts.keys().map(|key| (key.clone(), 1)).collect(),
            total: self.counts.len() as u64,
        }
    }

    /// Iterate the distinct keys
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.counts.keys(),
        }
    }
}

impl<T> Default for FrequencyMultiset<T>
where
    T: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PartialEq for FrequencyMultiset<T>
where
    T: Eq + Hash,
{
    fn eq(&self, other: &Self) -> bool {
        self.total == other.total && self.counts == other.counts
    }
}

impl<T> Eq for FrequencyMultiset<T> where T: Eq + Hash {}

/// Serialized as a sequence of `(key, count)` pairs, the total is derived
impl<T> Serialize for FrequencyMultiset<T>
where
    T: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        indexmap::map::serde_seq::serialize(&self.counts, serializer)
    }
}

impl<'de, T> Deserialize<'de> for FrequencyMultiset<T>
where
    T: Deserialize<'de> + Eq + Hash,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let counts: IndexMap<T, u64> = indexmap::map::serde_seq::deserialize(deserializer)?;
        FrequencyMultiset::from_counts(counts).map_err(de::Error::custom)
    }
}

impl<T> FromIterator<T> for FrequencyMultiset<T>
where
    T: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut bag = FrequencyMultiset::new();
        bag.extend(iter);
        bag
    }
}

impl<T> Extend<T> for FrequencyMultiset<T>
where
    T: Eq + Hash,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            self.add(key);
        }
    }
}

impl<'a, T> IntoIterator for &'a FrequencyMultiset<T>
where
    T: Eq + Hash,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Read-only iterator over the distinct keys of a [`FrequencyMultiset`]
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    inner: indexmap::map::Keys<'a, T, u64>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
