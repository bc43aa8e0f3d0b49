use crate::{Error, FeatureVector, Result, SymptomColumns};

/// Labelled training rows aligned to a [`SymptomColumns`] list.
///
/// Every row has exactly `columns.len()` features; `push` enforces it.
#[derive(Debug, Clone)]
pub struct TrainingTable {
    columns: SymptomColumns,
    rows: Vec<FeatureVector>,
    labels: Vec<String>,
}

impl TrainingTable {
    pub fn new(columns: SymptomColumns) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// Build a table from `(vector, label)` pairs
    pub fn from_rows<I, L>(columns: SymptomColumns, rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = (FeatureVector, L)>,
        L: Into<String>,
    {
        let mut table = Self::new(columns);
        for (vector, label) in rows {
            table.push(vector, label)?;
        }
        Ok(table)
    }

    /// Append a row
    pub fn push(&mut self, vector: FeatureVector, label: impl Into<String>) -> Result<()> {
        if vector.dim() != self.columns.len() {
            return Err(Error::ShapeMismatch {
                expected: self.columns.len(),
                actual: vector.dim(),
            });
        }
        self.rows.push(vector);
        self.labels.push(label.into());
        Ok(())
    }

    pub fn with_capacity(columns: SymptomColumns, capacity: usize) -> Self {
        Self {
            columns,
            rows: Vec::with_capacity(capacity),
            labels: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn columns(&self) -> &SymptomColumns {
        &self.columns
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[inline]
    pub fn rows(&self) -> &[FeatureVector] {
        &self.rows
    }

    #[inline]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub(crate) fn into_parts(self) -> (SymptomColumns, Vec<FeatureVector>, Vec<String>) {
        (self.columns, self.rows, self.labels)
    }
}
