//! Traits implemented by external model adapters.

mod classifier;
mod translator;

pub use classifier::{Classification, TextClassifier};
pub use translator::{TableSchema, TextToSql};

use serde::{Deserialize, Serialize};

/// Configuration for a hosted model adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model identifier (e.g. "distilbert-base-uncased").
    pub model: String,
    /// API token (if not using environment variable).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    /// Base URL for the inference API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: String::new(),
            api_token: None,
            base_url: None,
        }
    }
}

impl ModelConfig {
    /// Create a config for a specific model identifier.
    pub fn for_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }
}
