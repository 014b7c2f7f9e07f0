use num::Float;

/// TF-IDF weighting strategy used by the scorer
///
/// A term's weight in one vector is `idf(doc_freq) * tf(count, total)`.
pub trait TFIDFEngine<N>
where
    N: Float,
{
    /// Inverse document frequency of a term found in `doc_freq` documents
    /// `doc_freq` is always > 0; terms unknown to the corpus are skipped before this.
    fn idf(doc_freq: u64) -> N;

    /// Term frequency of a term seen `count` times in a vector of `total` terms
    fn tf(count: u64, total: u64) -> N;

    fn weight(doc_freq: u64, count: u64, total: u64) -> N {
        Self::idf(doc_freq) * Self::tf(count, total)
    }
}

/// Default TF-IDF engine
/// `idf = 1 / df`, `tf = ln(1 + count / total)`
/// Supports `f32` and `f64`
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl TFIDFEngine<f32> for DefaultTFIDFEngine {
    #[inline]
    fn idf(doc_freq: u64) -> f32 {
        (doc_freq as f32).recip()
    }

    #[inline]
    fn tf(count: u64, total: u64) -> f32 {
        if total == 0 {
            return 0.0;
        }
        (count as f32 / total as f32).ln_1p()
    }
}

impl TFIDFEngine<f64> for DefaultTFIDFEngine {
    #[inline]
    fn idf(doc_freq: u64) -> f64 {
        (doc_freq as f64).recip()
    }

    #[inline]
    fn tf(count: u64, total: u64) -> f64 {
        if total == 0 {
            return 0.0;
        }
        (count as f64 / total as f64).ln_1p()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idf_is_reciprocal_document_frequency() {
        assert_eq!(<DefaultTFIDFEngine as TFIDFEngine<f64>>::idf(1), 1.0);
        assert_eq!(<DefaultTFIDFEngine as TFIDFEngine<f64>>::idf(4), 0.25);
    }

    #[test]
    fn tf_is_log_scaled() {
        let tf = <DefaultTFIDFEngine as TFIDFEngine<f64>>::tf(1, 2);
        assert!((tf - 1.5f64.ln()).abs() < 1e-12);
        assert_eq!(<DefaultTFIDFEngine as TFIDFEngine<f64>>::tf(0, 5), 0.0);
    }

    #[test]
    fn empty_vector_has_zero_tf() {
        assert_eq!(<DefaultTFIDFEngine as TFIDFEngine<f64>>::tf(0, 0), 0.0);
        assert_eq!(<DefaultTFIDFEngine as TFIDFEngine<f32>>::tf(0, 0), 0.0);
    }

    #[test]
    fn f32_matches_f64() {
        let w32 = <DefaultTFIDFEngine as TFIDFEngine<f32>>::weight(2, 3, 7);
        let w64 = <DefaultTFIDFEngine as TFIDFEngine<f64>>::weight(2, 3, 7);
        assert!((w32 as f64 - w64).abs() < 1e-6);
    }
}
