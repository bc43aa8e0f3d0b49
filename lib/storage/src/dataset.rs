//! CSV training data.
//!
//! The file has a header row; one column holds the condition label and every
//! other column is a canonical symptom, in header order. Symptom cells are
//! numeric (normally `0` or `1`).

use medknn_core::{Error, FeatureVector, Result, SymptomColumns, TrainingTable};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;

pub const DEFAULT_LABEL_COLUMN: &str = "diseases";

/// Rows kept when a dataset is larger than this
pub const DEFAULT_SAMPLE_CAP: usize = 50_000;

#[derive(Debug, Clone)]
pub struct DatasetConfig {
    pub label_column: String,
    pub sample_cap: usize,
    /// Fixed seed for row sampling; `None` draws from the OS
    pub seed: Option<u64>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            label_column: DEFAULT_LABEL_COLUMN.to_string(),
            sample_cap: DEFAULT_SAMPLE_CAP,
            seed: None,
        }
    }
}

/// Read a CSV dataset into a training table, sampling down to `sample_cap` rows
pub fn load_training_table<P: AsRef<Path>>(path: P, config: &DatasetConfig) -> Result<TrainingTable> {
    let path = path.as_ref();

    if config.sample_cap == 0 {
        return Err(Error::InvalidConfig("sample cap must be >= 1".to_string()));
    }

    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| Error::Dataset(format!("failed to open {}: {}", path.display(), e)))?;

    let headers = reader
        .headers()
        .map_err(|e| Error::Dataset(format!("failed to read headers: {}", e)))?
        .clone();

    let label_idx = headers
        .iter()
        .position(|h| h == config.label_column)
        .ok_or_else(|| {
            Error::Dataset(format!(
                "label column '{}' not found; available columns: {:?}",
                config.label_column,
                headers.iter().collect::<Vec<_>>()
            ))
        })?;

    let names: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != label_idx)
        .map(|(_, h)| h.to_string())
        .collect();
    let columns = SymptomColumns::new(names).map_err(|e| Error::Dataset(e.to_string()))?;

    let mut rows: Vec<(FeatureVector, String)> = Vec::new();

    for (i, result) in reader.records().enumerate() {
        let line = i + 2; // header is line 1
        let record = result.map_err(|e| Error::Dataset(format!("line {}: {}", line, e)))?;

        let mut features = Vec::with_capacity(columns.len());
        let mut label = String::new();

        for (j, cell) in record.iter().enumerate() {
            if j == label_idx {
                label = cell.to_string();
                continue;
            }
            let value = cell.trim().parse::<f64>().map_err(|_| {
                Error::Dataset(format!(
                    "line {}, column '{}': not a number: {:?}",
                    line, &headers[j], cell
                ))
            })?;
            features.push(value);
        }

        rows.push((FeatureVector::new(features), label));
    }

    let total = rows.len();
    let rows = sample_rows(rows, config.sample_cap, config.seed);
    if rows.len() < total {
        tracing::info!(kept = rows.len(), total, "sampled training rows");
    }

    let table = TrainingTable::from_rows(columns, rows)?;
    tracing::info!(
        path = %path.display(),
        rows = table.len(),
        symptoms = table.columns().len(),
        "dataset loaded"
    );
    Ok(table)
}

/// Keep at most `cap` rows, drawn uniformly without replacement.
///
/// The draw order is kept, matching a random permutation prefix.
fn sample_rows<T>(rows: Vec<T>, cap: usize, seed: Option<u64>) -> Vec<T> {
    if rows.len() <= cap {
        return rows;
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let picked = rand::seq::index::sample(&mut rng, rows.len(), cap);

    let mut slots: Vec<Option<T>> = rows.into_iter().map(Some).collect();
    picked.iter().filter_map(|i| slots[i].take()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_label_column_removed() {
        let file = csv_file("diseases,fever,cough\nflu,1,0\ncold,0,1\n");
        let table = load_training_table(file.path(), &DatasetConfig::default()).unwrap();

        assert_eq!(table.columns().names(), &["fever".to_string(), "cough".to_string()]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.labels(), &["flu".to_string(), "cold".to_string()]);
        assert_eq!(table.rows()[1].as_slice(), &[0.0, 1.0]);
    }

    #[test]
    fn test_label_column_anywhere() {
        let file = csv_file("fever,condition,cough\n1,flu,0\n");
        let config = DatasetConfig {
            label_column: "condition".to_string(),
            ..DatasetConfig::default()
        };
        let table = load_training_table(file.path(), &config).unwrap();
        assert_eq!(table.columns().names(), &["fever".to_string(), "cough".to_string()]);
        assert_eq!(table.rows()[0].as_slice(), &[1.0, 0.0]);
    }

    #[test]
    fn test_missing_label_column() {
        let file = csv_file("fever,cough\n1,0\n");
        let result = load_training_table(file.path(), &DatasetConfig::default());
        assert!(matches!(result, Err(Error::Dataset(_))));
    }

    #[test]
    fn test_non_numeric_cell() {
        let file = csv_file("diseases,fever\nflu,yes\n");
        let err = load_training_table(file.path(), &DatasetConfig::default()).unwrap_err();
        match err {
            Error::Dataset(msg) => assert!(msg.contains("line 2")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let result = load_training_table("/nonexistent/data.csv", &DatasetConfig::default());
        assert!(matches!(result, Err(Error::Dataset(_))));
    }

    #[test]
    fn test_sampling_caps_rows() {
        let mut contents = String::from("diseases,a,b\n");
        for i in 0..100 {
            contents.push_str(&format!("d{},{},{}\n", i, i % 2, (i / 2) % 2));
        }
        let file = csv_file(&contents);
        let config = DatasetConfig {
            sample_cap: 10,
            seed: Some(42),
            ..DatasetConfig::default()
        };

        let first = load_training_table(file.path(), &config).unwrap();
        let second = load_training_table(file.path(), &config).unwrap();
        assert_eq!(first.len(), 10);
        assert_eq!(first.labels(), second.labels());

        let unique: HashSet<&String> = first.labels().iter().collect();
        assert_eq!(unique.len(), 10);
    }

    #[test]
    fn test_zero_cap_rejected() {
        let file = csv_file("diseases,a\nx,1\n");
        let config = DatasetConfig {
            sample_cap: 0,
            ..DatasetConfig::default()
        };
        assert!(matches!(
            load_training_table(file.path(), &config),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_sample_rows_under_cap_untouched() {
        let rows = vec![1, 2, 3];
        assert_eq!(sample_rows(rows, 5, None), vec![1, 2, 3]);
    }
}
