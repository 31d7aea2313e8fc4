//! Memoizing registry of classifiers, keyed by model identifier.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use mesa_core::error::MesaResult;
use mesa_core::traits::{ModelConfig, TextClassifier};

use crate::huggingface::HfTextClassifier;

/// Lazy, memoizing registry: one classifier per model identifier.
///
/// A classifier is built on first request and reused afterwards.
/// Construction failures are returned to the caller and not cached, so a
/// later call with the same identifier retries.
pub struct ClassifierRegistry {
    defaults: ModelConfig,
    loaded: Mutex<HashMap<String, Arc<dyn TextClassifier>>>,
}

impl ClassifierRegistry {
    /// Create a registry whose adapters inherit token and endpoint settings
    /// from `defaults`.
    pub fn new(defaults: ModelConfig) -> Self {
        Self {
            defaults,
            loaded: Mutex::new(HashMap::new()),
        }
    }

    /// Get the classifier for `model_id`, building it on first use.
    pub fn get(&self, model_id: &str) -> MesaResult<Arc<dyn TextClassifier>> {
        let mut loaded = self.loaded.lock().unwrap();
        if let Some(classifier) = loaded.get(model_id) {
            return Ok(classifier.clone());
        }

        let config = ModelConfig {
            model: model_id.to_string(),
            ..self.defaults.clone()
        };
        let classifier: Arc<dyn TextClassifier> = Arc::new(HfTextClassifier::new(config)?);
        loaded.insert(model_id.to_string(), classifier.clone());
        tracing::info!(model = %model_id, "classifier loaded");
        Ok(classifier)
    }

    /// Whether a classifier for `model_id` has been built.
    pub fn is_loaded(&self, model_id: &str) -> bool {
        self.loaded.lock().unwrap().contains_key(model_id)
    }

    /// Number of loaded classifiers.
    pub fn len(&self) -> usize {
        self.loaded.lock().unwrap().len()
    }

    /// Whether no classifier has been built yet.
    pub fn is_empty(&self) -> bool {
        self.loaded.lock().unwrap().is_empty()
    }
}
