//! # medknn Core
//!
//! Core library for the medknn symptom classifier.
//!
//! This crate provides the data structures and algorithms:
//!
//! - [`SymptomColumns`] - Ordered canonical symptom vocabulary
//! - [`FeatureVector`] - Fixed-width binary symptom encoding
//! - [`encode_symptoms`] - Free-text symptoms to feature vector
//! - [`TrainingTable`] - Labelled rows aligned to the vocabulary
//! - [`KnnClassifier`] - Exact brute-force k-nearest-neighbor classifier
//! - [`ModelHandle`] - Shared, swappable reference to the served model
//!
//! ## Example
//!
//! ```rust
//! use medknn_core::{
//!     blend_with_match_ratio, encode_symptoms, FeatureVector, KnnClassifier,
//!     SymptomColumns, TrainingTable,
//! };
//!
//! let columns = SymptomColumns::new(vec!["Fever".to_string(), "Cough".to_string()]).unwrap();
//! let table = TrainingTable::from_rows(
//!     columns.clone(),
//!     vec![
//!         (FeatureVector::new(vec![1.0, 0.0]), "Flu"),
//!         (FeatureVector::new(vec![1.0, 0.0]), "Flu"),
//!         (FeatureVector::new(vec![0.0, 1.0]), "Cold"),
//!     ],
//! )
//! .unwrap();
//!
//! let model = KnnClassifier::new(2).unwrap().fit(table).unwrap();
//!
//! let symptoms = ["fev"];
//! let encoding = encode_symptoms(&symptoms, &columns);
//! let prediction = model.predict_one(&encoding.vector).unwrap();
//! let confidence =
//!     blend_with_match_ratio(prediction.confidence, encoding.matched_count(), symptoms.len());
//!
//! assert_eq!(prediction.label, "Flu");
//! assert!(confidence <= 0.99);
//! ```

pub mod classifier;
pub mod columns;
pub mod confidence;
pub mod encoder;
pub mod error;
pub mod handle;
pub mod neighbors;
pub mod table;
pub mod vector;

pub use classifier::{KnnClassifier, Prediction, DEFAULT_K};
pub use columns::SymptomColumns;
pub use confidence::{base_confidence, blend_with_match_ratio, match_ratio, CONFIDENCE_CAP};
pub use encoder::{encode_symptoms, Encoding};
pub use error::{Error, Result};
pub use handle::ModelHandle;
pub use table::TrainingTable;
pub use vector::FeatureVector;
