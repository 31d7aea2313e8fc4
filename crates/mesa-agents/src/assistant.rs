//! Command surface of the assistant.
//!
//! Every method returns a human-readable string. Errors are rendered, never
//! propagated: nothing past this boundary throws.

use std::path::Path;
use std::sync::Arc;

use mesa_core::{MemoryLog, MesaConfig, MesaResult};
use mesa_extractors::ExtractionPipeline;
use mesa_llm::{ClassifierRegistry, LlmFactory};
use mesa_store::SchemaStore;

use crate::integration::IntegrationAgent;
use crate::search::SearchAgent;

/// Facade over the agents and the interaction memory.
pub struct Assistant {
    integration: IntegrationAgent,
    search: SearchAgent,
    memory: MemoryLog,
    default_database: String,
}

impl Assistant {
    /// Wire up the agents from a configuration.
    pub fn new(config: &MesaConfig) -> MesaResult<Self> {
        let store = Arc::new(SchemaStore::new(&config.databases_dir));

        let integration = IntegrationAgent::new(
            ExtractionPipeline::with_defaults(),
            ClassifierRegistry::new(config.classifier.clone()),
            store.clone(),
            config.classifier.model.clone(),
        );
        let search = SearchAgent::new(LlmFactory::translator(config.translator.clone())?, store);
        let memory = MemoryLog::new(&config.memory_path)?;

        Ok(Self {
            integration,
            search,
            memory,
            default_database: config.default_database.clone(),
        })
    }

    /// The interaction memory backing this assistant.
    pub fn memory(&self) -> &MemoryLog {
        &self.memory
    }

    /// Database used when a command does not name one.
    pub fn default_database(&self) -> &str {
        &self.default_database
    }

    /// Open (or create) the named database.
    pub fn connect_database(&self, name: &str) -> String {
        match self.integration.connect_database(name) {
            Ok(()) => format!("Connected to database '{}'.", name),
            Err(e) => e.to_string(),
        }
    }

    /// Ingest one file into a table of `db_name`.
    pub async fn process_file(&self, db_name: &str, path: &Path, model: Option<&str>) -> String {
        match self.integration.process_file(db_name, path, model).await {
            Ok(report) => report.to_string(),
            Err(e) => e.to_string(),
        }
    }

    /// Answer a natural-language question against a table of the default
    /// database.
    pub async fn ask_natural_language(&self, table: &str, question: &str) -> String {
        match self
            .search
            .ask(&self.default_database, table, question)
            .await
        {
            Ok(outcome) => outcome.to_string(),
            Err(e) => e.to_string(),
        }
    }

    /// The full interaction history, rendered as JSON.
    pub fn get_history(&self) -> String {
        match self.memory.history() {
            Ok(entries) if entries.is_empty() => "No interactions recorded yet.".to_string(),
            Ok(entries) => serde_json::to_string_pretty(&entries)
                .unwrap_or_else(|e| format!("Serialization error: {}", e)),
            Err(e) => e.to_string(),
        }
    }

    /// Past interactions whose user message contains `keyword`.
    pub fn search_history(&self, keyword: &str) -> String {
        match self.memory.search(keyword) {
            Ok(hits) if hits.is_empty() => {
                format!("No interactions match '{}'.", keyword)
            }
            Ok(hits) => serde_json::to_string_pretty(&hits)
                .unwrap_or_else(|e| format!("Serialization error: {}", e)),
            Err(e) => e.to_string(),
        }
    }
}
