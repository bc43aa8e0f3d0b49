use atomicwrites::{AtomicFile, OverwriteBehavior};
use medknn_core::{Error, KnnClassifier, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Classifier blob: k, training rows, labels, columns, label frequencies
pub const MODEL_FILE: &str = "model.bin";

/// Plain JSON array of canonical symptom names
pub const COLUMNS_FILE: &str = "symptom_columns.json";

/// On-disk home of a trained model.
///
/// A model is stored as two artifacts that must both be present. Each is
/// written to a temporary file and renamed into place.
#[derive(Debug, Clone)]
pub struct ModelStore {
    model_dir: PathBuf,
    model_path: PathBuf,
    columns_path: PathBuf,
}

impl ModelStore {
    pub fn new<P: AsRef<Path>>(model_dir: P) -> Self {
        let model_dir = model_dir.as_ref().to_path_buf();
        let model_path = model_dir.join(MODEL_FILE);
        let columns_path = model_dir.join(COLUMNS_FILE);

        Self {
            model_dir,
            model_path,
            columns_path,
        }
    }

    #[inline]
    pub fn model_dir(&self) -> &Path {
        &self.model_dir
    }

    #[inline]
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    #[inline]
    pub fn columns_path(&self) -> &Path {
        &self.columns_path
    }

    /// Both artifacts are present
    pub fn exists(&self) -> bool {
        self.model_path.exists() && self.columns_path.exists()
    }

    /// Write both artifacts for a trained model
    pub fn save(&self, model: &KnnClassifier) -> Result<()> {
        let blob = model.to_bytes()?;
        let columns = serde_json::to_vec_pretty(model.columns()?.names())
            .map_err(|e| Error::Serialization(e.to_string()))?;

        fs::create_dir_all(&self.model_dir)?;
        write_atomic(&self.model_path, &blob)?;
        write_atomic(&self.columns_path, &columns)?;

        tracing::info!(
            dir = %self.model_dir.display(),
            bytes = blob.len(),
            "model saved"
        );
        Ok(())
    }

    /// Read both artifacts back into a trained model
    pub fn load(&self) -> Result<KnnClassifier> {
        let missing: Vec<String> = [&self.model_path, &self.columns_path]
            .iter()
            .filter(|p| !p.exists())
            .map(|p| p.display().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(Error::Configuration(format!(
                "missing model artifact(s): {}",
                missing.join(", ")
            )));
        }

        let blob = fs::read(&self.model_path).map_err(|e| {
            Error::Persistence(format!("cannot read {}: {}", self.model_path.display(), e))
        })?;
        let model = KnnClassifier::from_bytes(&blob)?;

        let raw = fs::read(&self.columns_path).map_err(|e| {
            Error::Persistence(format!("cannot read {}: {}", self.columns_path.display(), e))
        })?;
        let names: Vec<String> = serde_json::from_slice(&raw).map_err(|e| {
            Error::Persistence(format!("malformed {}: {}", self.columns_path.display(), e))
        })?;

        if names.as_slice() != model.columns()?.names() {
            return Err(Error::Persistence(format!(
                "{} does not match the column list stored in {}",
                COLUMNS_FILE, MODEL_FILE
            )));
        }

        tracing::debug!(dir = %self.model_dir.display(), "model loaded");
        Ok(model)
    }
}

fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    AtomicFile::new(path, OverwriteBehavior::AllowOverwrite)
        .write(|f| f.write_all(data))
        .map_err(|e| match e {
            atomicwrites::Error::Internal(io) => Error::Io(io),
            atomicwrites::Error::User(io) => Error::Io(io),
        })
}
