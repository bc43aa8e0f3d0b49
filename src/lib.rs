//! # medknn
//!
//! A symptom-to-condition classifier built on an exact, from-scratch
//! k-nearest-neighbor search.
//!
//! Free-text symptom names are encoded against a fixed vocabulary of
//! canonical symptom columns, the resulting binary vector is compared with
//! every training row, and the majority label among the `k` closest rows is
//! reported with a calibrated confidence in `[0, 0.99]`.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! medknn --dataset ./Final_Augmented_dataset_Diseases_and_Symptoms.csv --http-port 5000
//! curl -X POST localhost:5000/predict -H 'content-type: application/json' \
//!      -d '{"symptoms": ["fever", "cough"]}'
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use medknn::prelude::*;
//!
//! let columns = SymptomColumns::new(vec!["Fever".to_string(), "Cough".to_string()]).unwrap();
//! let table = TrainingTable::from_rows(
//!     columns.clone(),
//!     vec![
//!         (FeatureVector::new(vec![1.0, 0.0]), "Flu"),
//!         (FeatureVector::new(vec![0.0, 1.0]), "Cold"),
//!     ],
//! )
//! .unwrap();
//! let model = KnnClassifier::new(1).unwrap().fit(table).unwrap();
//!
//! let encoding = encode_symptoms(&["cough"], &columns);
//! let prediction = model.predict_one(&encoding.vector).unwrap();
//! assert_eq!(prediction.label, "Cold");
//! ```
//!
//! ## Crate Structure
//!
//! - `medknn-core` - Feature encoding, k-NN classifier, confidence calibration
//! - `medknn-storage` - Model artifacts, CSV datasets, load-or-train startup
//! - `medknn-api` - REST API

// Re-export core types
pub use medknn_core::{
    base_confidence, blend_with_match_ratio, encode_symptoms, match_ratio,
    Encoding, Error, FeatureVector, KnnClassifier, ModelHandle, Prediction, Result,
    SymptomColumns, TrainingTable, CONFIDENCE_CAP, DEFAULT_K,
};

// Re-export storage
pub use medknn_storage::{load_training_table, DatasetConfig, ModelManager, ModelStore};

// Re-export API
pub use medknn_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        blend_with_match_ratio, encode_symptoms,
        DatasetConfig, Encoding, Error, FeatureVector, KnnClassifier, ModelHandle,
        ModelManager, ModelStore, Prediction, RestApi, Result, SymptomColumns,
        TrainingTable, CONFIDENCE_CAP,
    };
}
