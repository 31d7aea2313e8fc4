//! Factory for creating model adapters.

use std::sync::Arc;

use mesa_core::error::MesaResult;
use mesa_core::traits::{ModelConfig, TextClassifier, TextToSql};

use crate::huggingface::{HfTextClassifier, HfTextToSql};
use crate::registry::ClassifierRegistry;

/// Factory for creating model adapters.
pub struct LlmFactory;

impl LlmFactory {
    /// Create a text classifier from the given configuration.
    pub fn classifier(config: ModelConfig) -> MesaResult<Arc<dyn TextClassifier>> {
        Ok(Arc::new(HfTextClassifier::new(config)?))
    }

    /// Create a text classifier for a specific model identifier.
    pub fn classifier_with_model(model: impl Into<String>) -> MesaResult<Arc<dyn TextClassifier>> {
        Self::classifier(ModelConfig::for_model(model))
    }

    /// Create a NL-to-SQL translator from the given configuration.
    pub fn translator(config: ModelConfig) -> MesaResult<Arc<dyn TextToSql>> {
        Ok(Arc::new(HfTextToSql::new(config)?))
    }

    /// Create a NL-to-SQL translator for a specific model identifier.
    pub fn translator_with_model(model: impl Into<String>) -> MesaResult<Arc<dyn TextToSql>> {
        Self::translator(ModelConfig::for_model(model))
    }

    /// Create a classifier registry seeded with default settings.
    pub fn registry(defaults: ModelConfig) -> ClassifierRegistry {
        ClassifierRegistry::new(defaults)
    }
}
