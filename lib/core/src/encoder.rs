//! Free-text symptom encoding.
//!
//! Maps caller-supplied symptom names onto the canonical column list. Matching
//! is case-insensitive substring containment in either direction:
//!
//! ```text
//! column "Abdominal Pain" vs input "pain"                 -> match (input ⊂ column)
//! column "Fever"          vs input "high fever at night"  -> match (column ⊂ input)
//! column "Cough"          vs input "coughing"             -> match (column ⊂ input)
//! column "Cough"          vs input "cogh"                 -> no match
//! ```
//!
//! Each column is evaluated on its own, so one input may light up several
//! columns.

use crate::{FeatureVector, SymptomColumns};

/// Result of encoding a symptom list
#[derive(Debug, Clone, PartialEq)]
pub struct Encoding {
    /// Binary vector aligned to the column list
    pub vector: FeatureVector,
    /// Canonical names of the columns set to 1, in column order
    pub matched: Vec<String>,
}

impl Encoding {
    #[inline]
    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }
}

/// Encode `symptoms` against `columns`.
///
/// An empty symptom list is valid here and yields an all-zero vector.
pub fn encode_symptoms<S: AsRef<str>>(symptoms: &[S], columns: &SymptomColumns) -> Encoding {
    let normalized: Vec<String> = symptoms
        .iter()
        .map(|s| s.as_ref().to_lowercase())
        .collect();

    let mut bits = Vec::with_capacity(columns.len());
    let mut matched = Vec::new();

    for column in columns.iter() {
        let column_lower = column.to_lowercase();
        let hit = normalized
            .iter()
            .any(|input| column_lower.contains(input.as_str()) || input.contains(&column_lower));

        if hit {
            matched.push(column.to_string());
        }
        bits.push(hit);
    }

    tracing::debug!(
        supplied = symptoms.len(),
        matched = matched.len(),
        "encoded symptom list"
    );

    Encoding {
        vector: FeatureVector::from_bits(&bits),
        matched,
    }
}
