use serde::{Deserialize, Serialize};

/// A fixed-width feature vector, one slot per canonical symptom column
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureVector {
    data: Vec<f64>,
}

impl FeatureVector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f64>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn from_slice(data: &[f64]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    /// Build a binary vector: `true` becomes 1.0, `false` becomes 0.0
    #[must_use]
    pub fn from_bits(bits: &[bool]) -> Self {
        Self {
            data: bits.iter().map(|&b| if b { 1.0 } else { 0.0 }).collect(),
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Number of non-zero slots
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.data.iter().filter(|&&x| x != 0.0).count()
    }

    /// Compute L2 (Euclidean) distance
    ///
    /// Squared differences are accumulated left to right, so the result is
    /// reproducible bit-for-bit. Callers check dimensions beforehand.
    #[inline]
    pub fn l2_distance(&self, other: &FeatureVector) -> f64 {
        debug_assert_eq!(self.dim(), other.dim());

        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| {
                let d = a - b;
                d * d
            })
            .sum::<f64>()
            .sqrt()
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(data: Vec<f64>) -> Self {
        Self::new(data)
    }
}
