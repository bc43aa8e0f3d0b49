//! # medknn Storage
//!
//! Model artifacts on disk, CSV training data, and the load-or-train
//! startup path.

pub mod dataset;
pub mod manager;
pub mod persistence;

pub use dataset::{load_training_table, DatasetConfig, DEFAULT_LABEL_COLUMN, DEFAULT_SAMPLE_CAP};
pub use manager::ModelManager;
pub use persistence::{ModelStore, COLUMNS_FILE, MODEL_FILE};
