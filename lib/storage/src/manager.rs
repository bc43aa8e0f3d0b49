use crate::dataset::{load_training_table, DatasetConfig};
use crate::persistence::ModelStore;
use medknn_core::{Error, KnnClassifier, ModelHandle, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Brings a model into service: load it from disk, or train from the dataset.
pub struct ModelManager {
    store: ModelStore,
    dataset_path: PathBuf,
    dataset: DatasetConfig,
    k: usize,
    handle: ModelHandle,
}

impl ModelManager {
    pub fn new<P: AsRef<Path>>(
        store: ModelStore,
        dataset_path: P,
        dataset: DatasetConfig,
        k: usize,
    ) -> Result<Self> {
        if k == 0 {
            return Err(Error::InvalidConfig("k must be >= 1, got 0".to_string()));
        }

        Ok(Self {
            store,
            dataset_path: dataset_path.as_ref().to_path_buf(),
            dataset,
            k,
            handle: ModelHandle::new(),
        })
    }

    /// Handle shared with the request layer
    #[inline]
    pub fn handle(&self) -> ModelHandle {
        self.handle.clone()
    }

    #[inline]
    pub fn store(&self) -> &ModelStore {
        &self.store
    }

    #[inline]
    pub fn dataset_path(&self) -> &Path {
        &self.dataset_path
    }

    /// Load the saved model, falling back to training when it is absent or unreadable
    pub fn load_or_train(&self) -> Result<Arc<KnnClassifier>> {
        if self.store.exists() {
            tracing::info!(dir = %self.store.model_dir().display(), "loading saved model");
            match self.store.load() {
                Ok(model) => return Ok(self.install(model)),
                Err(Error::Persistence(reason)) => {
                    tracing::warn!(%reason, "saved model is unusable, retraining");
                }
                Err(e) => return Err(e),
            }
        } else {
            tracing::info!("no saved model found, training a new one");
        }

        self.retrain()
    }

    /// Train a fresh model from the dataset, persist it and swap it in
    pub fn retrain(&self) -> Result<Arc<KnnClassifier>> {
        if !self.dataset_path.exists() {
            return Err(Error::Configuration(format!(
                "dataset not found at {}",
                self.dataset_path.display()
            )));
        }

        let table = load_training_table(&self.dataset_path, &self.dataset)?;
        let probe = table
            .rows()
            .first()
            .cloned()
            .zip(table.labels().first().cloned());

        tracing::info!(k = self.k, rows = table.len(), "training knn model");
        let model = KnnClassifier::new(self.k)?.fit(table)?;

        if let Some((row, actual)) = probe {
            let p = model.predict_one(&row)?;
            tracing::debug!(
                predicted = %p.label,
                confidence = p.confidence,
                %actual,
                "sanity prediction on first training row"
            );
        }

        self.store.save(&model)?;
        Ok(self.install(model))
    }

    fn install(&self, model: KnnClassifier) -> Arc<KnnClassifier> {
        tracing::info!(
            rows = model.n_rows(),
            symptoms = model.columns().map(|c| c.len()).unwrap_or(0),
            diseases = model.n_labels(),
            k = model.k(),
            "model ready"
        );

        let model = Arc::new(model);
        self.handle.replace(model.clone());
        model
    }
}
