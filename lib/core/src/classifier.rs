use crate::confidence::base_confidence;
use crate::neighbors::{majority_vote, select_k_nearest};
use crate::{Error, FeatureVector, Result, SymptomColumns, TrainingTable};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Row count from which per-query distances are computed in parallel
const PARALLEL_THRESHOLD: usize = 4_096;

/// Bumped whenever the persisted layout changes
const SNAPSHOT_VERSION: u32 = 1;

/// Neighbor count used when none is configured
pub const DEFAULT_K: usize = 7;

/// Predicted label with its base confidence
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub confidence: f64,
}

#[derive(Debug)]
struct Fitted {
    columns: SymptomColumns,
    rows: Vec<FeatureVector>,
    labels: Vec<String>,
    label_frequencies: BTreeMap<String, usize>,
}

/// Exact brute-force k-nearest-neighbor classifier.
///
/// Starts untrained; [`fit`](Self::fit) consumes the untrained value and
/// returns a trained one that is never mutated again, so it can be shared
/// behind an `Arc` and queried from many threads without locking.
#[derive(Debug)]
pub struct KnnClassifier {
    k: usize,
    fitted: Option<Fitted>,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    k: usize,
    columns: &'a [String],
    rows: &'a [FeatureVector],
    labels: &'a [String],
    label_frequencies: &'a BTreeMap<String, usize>,
}

#[derive(Deserialize)]
struct Snapshot {
    version: u32,
    k: usize,
    columns: Vec<String>,
    rows: Vec<FeatureVector>,
    labels: Vec<String>,
    label_frequencies: BTreeMap<String, usize>,
}

impl KnnClassifier {
    /// Create an untrained classifier
    pub fn new(k: usize) -> Result<Self> {
        if k == 0 {
            return Err(Error::InvalidConfig("k must be >= 1, got 0".to_string()));
        }
        Ok(Self { k, fitted: None })
    }

    /// Store the training table and index its label frequencies.
    ///
    /// The table is kept verbatim; no scaling or normalization is applied.
    pub fn fit(self, table: TrainingTable) -> Result<Self> {
        if self.fitted.is_some() {
            return Err(Error::AlreadyFitted);
        }
        if table.is_empty() {
            return Err(Error::EmptyTrainingSet);
        }

        let (columns, rows, labels) = table.into_parts();
        let label_frequencies = count_labels(&labels);

        tracing::debug!(
            rows = rows.len(),
            features = columns.len(),
            labels = label_frequencies.len(),
            k = self.k,
            "fitted knn classifier"
        );

        Ok(Self {
            k: self.k,
            fitted: Some(Fitted {
                columns,
                rows,
                labels,
                label_frequencies,
            }),
        })
    }

    #[inline]
    pub fn k(&self) -> usize {
        self.k
    }

    #[inline]
    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    pub fn columns(&self) -> Result<&SymptomColumns> {
        Ok(&self.state()?.columns)
    }

    pub fn label_frequencies(&self) -> Result<&BTreeMap<String, usize>> {
        Ok(&self.state()?.label_frequencies)
    }

    /// Number of distinct labels seen during fit
    pub fn n_labels(&self) -> usize {
        self.fitted
            .as_ref()
            .map_or(0, |f| f.label_frequencies.len())
    }

    pub fn n_rows(&self) -> usize {
        self.fitted.as_ref().map_or(0, |f| f.rows.len())
    }

    fn state(&self) -> Result<&Fitted> {
        self.fitted.as_ref().ok_or(Error::NotFitted)
    }

    /// Predict one label per query, in input order
    pub fn predict(&self, queries: &[FeatureVector]) -> Result<Vec<Prediction>> {
        queries.iter().map(|q| self.predict_one(q)).collect()
    }

    /// Predict the label of a single query vector
    pub fn predict_one(&self, query: &FeatureVector) -> Result<Prediction> {
        let state = self.state()?;

        if query.dim() != state.columns.len() {
            return Err(Error::ShapeMismatch {
                expected: state.columns.len(),
                actual: query.dim(),
            });
        }

        let distances = row_distances(&state.rows, query);
        let neighbors = select_k_nearest(&distances, self.k);

        // rows is non-empty once fitted, so at least one neighbor exists
        let (label, votes) = majority_vote(&neighbors, &state.labels).ok_or(Error::NotFitted)?;

        // Share is over the configured k even when fewer rows exist
        let vote_share = votes as f64 / self.k as f64;
        let mean_distance =
            neighbors.iter().map(|n| n.distance).sum::<f64>() / neighbors.len() as f64;

        Ok(Prediction {
            label: label.to_string(),
            confidence: base_confidence(vote_share, mean_distance),
        })
    }

    /// Serialize the trained state to a single binary blob
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let state = self.state()?;
        let snapshot = SnapshotRef {
            version: SNAPSHOT_VERSION,
            k: self.k,
            columns: state.columns.names(),
            rows: &state.rows,
            labels: &state.labels,
            label_frequencies: &state.label_frequencies,
        };
        bincode::serialize(&snapshot).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Rebuild a trained classifier from [`to_bytes`](Self::to_bytes) output
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let snapshot: Snapshot = bincode::deserialize(bytes)
            .map_err(|e| Error::Persistence(format!("corrupt model blob: {}", e)))?;

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(Error::Persistence(format!(
                "unsupported model format version {} (expected {})",
                snapshot.version, SNAPSHOT_VERSION
            )));
        }
        if snapshot.k == 0 {
            return Err(Error::Persistence("stored k is 0".to_string()));
        }
        if snapshot.rows.is_empty() {
            return Err(Error::Persistence("stored training table is empty".to_string()));
        }
        if snapshot.rows.len() != snapshot.labels.len() {
            return Err(Error::Persistence(format!(
                "{} rows but {} labels",
                snapshot.rows.len(),
                snapshot.labels.len()
            )));
        }

        let columns = SymptomColumns::new(snapshot.columns)
            .map_err(|e| Error::Persistence(format!("invalid stored columns: {}", e)))?;

        if let Some((i, row)) = snapshot
            .rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.dim() != columns.len())
        {
            return Err(Error::Persistence(format!(
                "row {} has {} features, expected {}",
                i,
                row.dim(),
                columns.len()
            )));
        }

        if count_labels(&snapshot.labels) != snapshot.label_frequencies {
            return Err(Error::Persistence(
                "label frequency map does not match stored labels".to_string(),
            ));
        }

        Ok(Self {
            k: snapshot.k,
            fitted: Some(Fitted {
                columns,
                rows: snapshot.rows,
                labels: snapshot.labels,
                label_frequencies: snapshot.label_frequencies,
            }),
        })
    }
}

fn count_labels(labels: &[String]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for label in labels {
        *counts.entry(label.clone()).or_insert(0) += 1;
    }
    counts
}

fn row_distances(rows: &[FeatureVector], query: &FeatureVector) -> Vec<f64> {
    if rows.len() >= PARALLEL_THRESHOLD {
        rows.par_iter().map(|row| query.l2_distance(row)).collect()
    } else {
        rows.iter().map(|row| query.l2_distance(row)).collect()
    }
}
