//! mesa-llm - Hosted model adapters for mesa.
//!
//! Implements the [`TextClassifier`](mesa_core::TextClassifier) and
//! [`TextToSql`](mesa_core::TextToSql) traits over the Hugging Face
//! Inference API, plus a memoizing per-model registry so each classifier is
//! built at most once per model identifier.
//!
//! # Example
//!
//! ```ignore
//! use mesa_core::ModelConfig;
//! use mesa_llm::ClassifierRegistry;
//!
//! let registry = ClassifierRegistry::new(ModelConfig::default());
//! let classifier = registry.get("distilbert-base-uncased")?;
//! let results = classifier.classify("great product, would buy again").await?;
//! ```

mod factory;
mod huggingface;
mod registry;

pub use factory::LlmFactory;
pub use huggingface::{HfTextClassifier, HfTextToSql};
pub use registry::ClassifierRegistry;
