//! Configuration system for mesa.
//!
//! All components take their settings from an explicit [`MesaConfig`] passed
//! at construction; nothing reads global state after startup. Secrets come
//! from the process environment.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{MesaError, MesaResult};
use crate::traits::ModelConfig;

/// Default model used to annotate extracted text.
pub const DEFAULT_CLASSIFIER_MODEL: &str = "distilbert-base-uncased";

/// Default model used to translate questions into SQL.
pub const DEFAULT_TRANSLATOR_MODEL: &str = "Salesforce/grappa_large_jnt";

/// Main mesa configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MesaConfig {
    /// Directory holding one SQLite file per database name.
    pub databases_dir: PathBuf,
    /// Path to the interaction memory log (a JSON array file).
    pub memory_path: PathBuf,
    /// Database the router ingests files into when none is named.
    pub default_database: String,
    /// Text-classification model configuration.
    pub classifier: ModelConfig,
    /// Natural-language-to-SQL model configuration.
    pub translator: ModelConfig,
}

impl Default for MesaConfig {
    fn default() -> Self {
        Self {
            databases_dir: PathBuf::from("databases"),
            memory_path: PathBuf::from("documents/memory.json"),
            default_database: "main".to_string(),
            classifier: ModelConfig::for_model(DEFAULT_CLASSIFIER_MODEL),
            translator: ModelConfig::for_model(DEFAULT_TRANSLATOR_MODEL),
        }
    }
}

impl MesaConfig {
    /// Load configuration from a file (TOML, JSON, or YAML).
    pub fn from_file(path: impl AsRef<std::path::Path>) -> MesaResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let ext = path.as_ref().extension().and_then(|e| e.to_str());

        match ext {
            Some("toml") => {
                toml::from_str(&content).map_err(|e| MesaError::Configuration(e.to_string()))
            }
            Some("json") => {
                serde_json::from_str(&content).map_err(|e| MesaError::Configuration(e.to_string()))
            }
            Some("yaml" | "yml") => {
                serde_yaml::from_str(&content).map_err(|e| MesaError::Configuration(e.to_string()))
            }
            _ => Err(MesaError::Configuration(
                "Unsupported config file format. Use .toml, .json, or .yaml".to_string(),
            )),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("MESA_DATABASES_DIR") {
            config.databases_dir = PathBuf::from(dir);
        }
        if let Ok(path) = std::env::var("MESA_MEMORY_PATH") {
            config.memory_path = PathBuf::from(path);
        }
        if let Ok(db) = std::env::var("MESA_DEFAULT_DATABASE") {
            config.default_database = db;
        }
        if let Ok(model) = std::env::var("MESA_CLASSIFIER_MODEL") {
            config.classifier.model = model;
        }
        if let Ok(model) = std::env::var("MESA_TRANSLATOR_MODEL") {
            config.translator.model = model;
        }

        // HF_API_TOKEN is the canonical variable; HUGGINGFACE_API_KEY is
        // accepted for compatibility with older deployments.
        if let Ok(token) =
            std::env::var("HF_API_TOKEN").or_else(|_| std::env::var("HUGGINGFACE_API_KEY"))
        {
            config.classifier.api_token = Some(token.clone());
            config.translator.api_token = Some(token);
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = MesaConfig::default();
        assert_eq!(config.databases_dir, PathBuf::from("databases"));
        assert_eq!(config.classifier.model, DEFAULT_CLASSIFIER_MODEL);
        assert_eq!(config.translator.model, DEFAULT_TRANSLATOR_MODEL);
        assert!(config.classifier.api_token.is_none());
    }

    #[test]
    fn test_from_file_toml() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            r#"
databases_dir = "data/dbs"
default_database = "mi_base"

[classifier]
model = "finiteautomata/beto-sentiment-analysis"
"#
        )
        .unwrap();

        let config = MesaConfig::from_file(file.path()).unwrap();
        assert_eq!(config.databases_dir, PathBuf::from("data/dbs"));
        assert_eq!(config.default_database, "mi_base");
        assert_eq!(
            config.classifier.model,
            "finiteautomata/beto-sentiment-analysis"
        );
        // Unspecified sections keep their defaults
        assert_eq!(config.translator.model, DEFAULT_TRANSLATOR_MODEL);
    }

    #[test]
    fn test_from_file_rejects_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        assert!(MesaConfig::from_file(file.path()).is_err());
    }
}
