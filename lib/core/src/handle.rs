use crate::KnnClassifier;
use parking_lot::RwLock;
use std::sync::Arc;

/// Shared slot holding the model currently used for predictions.
///
/// Readers take an `Arc` clone and release the lock before predicting.
/// Retraining builds a new classifier and swaps it in whole; a model that is
/// already being served is never mutated.
#[derive(Clone, Default)]
pub struct ModelHandle {
    inner: Arc<RwLock<Option<Arc<KnnClassifier>>>>,
}

impl ModelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(model: KnnClassifier) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(Arc::new(model)))),
        }
    }

    /// The model currently being served, if any
    #[inline]
    pub fn current(&self) -> Option<Arc<KnnClassifier>> {
        self.inner.read().clone()
    }

    #[inline]
    pub fn is_loaded(&self) -> bool {
        self.inner.read().is_some()
    }

    /// Swap in a new model, returning the one it replaces
    pub fn replace(&self, model: impl Into<Arc<KnnClassifier>>) -> Option<Arc<KnnClassifier>> {
        let model = model.into();
        std::mem::replace(&mut *self.inner.write(), Some(model))
    }
}

impl std::fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelHandle")
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FeatureVector, SymptomColumns, TrainingTable};

    fn model(k: usize, label: &str) -> KnnClassifier {
        let columns = SymptomColumns::new(vec!["Fever".to_string()]).unwrap();
        let table =
            TrainingTable::from_rows(columns, vec![(FeatureVector::new(vec![1.0]), label)]).unwrap();
        KnnClassifier::new(k).unwrap().fit(table).unwrap()
    }

    #[test]
    fn test_empty_handle() {
        let handle = ModelHandle::new();
        assert!(!handle.is_loaded());
        assert!(handle.current().is_none());
    }

    #[test]
    fn test_replace_swaps_whole_model() {
        let handle = ModelHandle::with_model(model(1, "Old"));
        let held = handle.current().unwrap();

        let previous = handle.replace(model(3, "New")).unwrap();
        assert_eq!(previous.k(), 1);

        // a reader holding the old Arc keeps a consistent model
        assert_eq!(held.predict_one(&FeatureVector::new(vec![1.0])).unwrap().label, "Old");
        assert_eq!(handle.current().unwrap().k(), 3);
    }

    #[test]
    fn test_clones_share_slot() {
        let handle = ModelHandle::new();
        let other = handle.clone();
        handle.replace(model(2, "X"));
        assert!(other.is_loaded());
    }

    #[test]
    fn test_concurrent_readers() {
        let handle = ModelHandle::with_model(model(1, "Flu"));
        let threads: Vec<_> = (0..4)
            .map(|_| {
                let h = handle.clone();
                std::thread::spawn(move || {
                    let m = h.current().unwrap();
                    m.predict_one(&FeatureVector::new(vec![0.0])).unwrap().label
                })
            })
            .collect();

        for t in threads {
            assert_eq!(t.join().unwrap(), "Flu");
        }
    }
}
