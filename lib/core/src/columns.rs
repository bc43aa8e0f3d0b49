use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered list of canonical symptom names.
///
/// Position `i` names slot `i` of every [`FeatureVector`](crate::FeatureVector)
/// built against this list. The same list must be used at training and at
/// query time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct SymptomColumns {
    names: Vec<String>,
}

impl SymptomColumns {
    /// Create a column list, rejecting empty lists and duplicate names
    pub fn new(names: Vec<String>) -> Result<Self> {
        if names.is_empty() {
            return Err(Error::InvalidConfig(
                "symptom column list is empty".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(Error::InvalidConfig(format!(
                    "duplicate symptom column: {}",
                    name
                )));
            }
        }

        Ok(Self { names })
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl TryFrom<Vec<String>> for SymptomColumns {
    type Error = Error;

    fn try_from(names: Vec<String>) -> Result<Self> {
        Self::new(names)
    }
}

impl From<SymptomColumns> for Vec<String> {
    fn from(columns: SymptomColumns) -> Self {
        columns.names
    }
}
