//! Data-integration agent: extract, annotate, persist.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use mesa_core::{MesaError, MesaResult, Record, RecordSet};
use mesa_extractors::{Extracted, ExtractedText, ExtractionPipeline, PipelineOutcome};
use mesa_llm::ClassifierRegistry;
use mesa_store::{sanitize_identifier, QueryOutcome, SchemaStore};

/// Terminal outcome of processing one file.
#[derive(Debug, Clone, PartialEq)]
pub enum IngestReport {
    /// Content was persisted.
    Stored {
        /// Database the table lives in.
        database: String,
        /// Sanitized table name (the file's base name).
        table: String,
        /// Rows inserted.
        rows: usize,
    },
    /// The file's extension is not supported. Terminal, but not an error.
    Unsupported {
        /// The lowercased extension (empty for extension-less paths).
        extension: String,
    },
}

impl fmt::Display for IngestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestReport::Stored {
                database,
                table,
                rows,
            } => write!(
                f,
                "Table '{}' created and {} row(s) inserted into database '{}'.",
                table, rows, database
            ),
            IngestReport::Unsupported { extension } if extension.is_empty() => {
                f.write_str("Unsupported file format: the file has no extension.")
            }
            IngestReport::Unsupported { extension } => {
                write!(f, "Unsupported file format: '.{}'.", extension)
            }
        }
    }
}

/// Agent that turns heterogeneous files into relational tables.
///
/// Each file runs through a linear, non-resumable machine: EXTRACT, then
/// CLASSIFY (text only), then PERSIST under the file's base name. Every
/// failure is terminal for that file; there are no retries.
pub struct IntegrationAgent {
    pipeline: ExtractionPipeline,
    classifiers: ClassifierRegistry,
    store: Arc<SchemaStore>,
    default_model: String,
}

impl IntegrationAgent {
    /// Create an agent from its collaborators.
    pub fn new(
        pipeline: ExtractionPipeline,
        classifiers: ClassifierRegistry,
        store: Arc<SchemaStore>,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            pipeline,
            classifiers,
            store,
            default_model: default_model.into(),
        }
    }

    /// Open (or create) the named database.
    pub fn connect_database(&self, db_name: &str) -> MesaResult<()> {
        self.store.connect(db_name)?;
        Ok(())
    }

    /// Process one file into a table of `db_name`.
    ///
    /// Text-producing modalities are annotated with the default classifier
    /// model unless `model_override` names another one; tabular input is
    /// persisted as-is.
    pub async fn process_file(
        &self,
        db_name: &str,
        path: &Path,
        model_override: Option<&str>,
    ) -> MesaResult<IngestReport> {
        debug!(path = %path.display(), database = %db_name, "processing file");

        let outcome = self.pipeline.extract_path(path).await?;
        let extracted = match outcome {
            PipelineOutcome::Unsupported { extension } => {
                info!(path = %path.display(), "unsupported format");
                return Ok(IngestReport::Unsupported { extension });
            }
            PipelineOutcome::Extracted(extracted) => extracted,
        };

        let records = match extracted {
            Extracted::Records(records) => records,
            Extracted::Text(content) => self.annotate(content, model_override).await?,
        };

        let base_name = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        let table = sanitize_identifier(base_name).map_err(MesaError::from)?;
        let rows = self.store.create_and_insert(db_name, &table, &records)?;

        info!(database = %db_name, table = %table, rows, "file integrated");
        Ok(IngestReport::Stored {
            database: db_name.to_string(),
            table,
            rows,
        })
    }

    /// Declare a workflow link between two existing tables.
    pub fn define_workflow(
        &self,
        db_name: &str,
        origin_table: &str,
        dest_table: &str,
        column_name: &str,
    ) -> MesaResult<()> {
        self.store
            .add_workflow_link(db_name, origin_table, dest_table, column_name)?;
        Ok(())
    }

    /// Filtered lookup in an existing table.
    pub fn search_table(
        &self,
        db_name: &str,
        table_name: &str,
        filter: &[(String, String)],
    ) -> MesaResult<QueryOutcome> {
        Ok(self.store.query(db_name, table_name, filter)?)
    }

    /// Wrap extracted text and its classifications into records: one per
    /// (label, score) pair, each carrying the full source text.
    async fn annotate(
        &self,
        content: ExtractedText,
        model_override: Option<&str>,
    ) -> MesaResult<RecordSet> {
        let model = model_override.unwrap_or(&self.default_model);
        let classifier = self.classifiers.get(model)?;
        let classifications = classifier.classify(&content.text).await?;

        Ok(classifications
            .into_iter()
            .map(|c| {
                Record::new()
                    .with("source_text", content.text.clone())
                    .with("annotation", c.label)
                    .with("confidence", c.score)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesa_core::{FieldValue, ModelConfig};
    use std::io::Write;

    fn offline_agent(store: Arc<SchemaStore>) -> IntegrationAgent {
        let defaults = ModelConfig {
            model: String::new(),
            api_token: Some("test-token".to_string()),
            base_url: None,
        };
        IntegrationAgent::new(
            ExtractionPipeline::with_defaults(),
            ClassifierRegistry::new(defaults),
            store,
            "distilbert-base-uncased",
        )
    }

    #[tokio::test]
    async fn test_csv_is_persisted_without_classification() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("sample.csv");
        let mut file = std::fs::File::create(&csv_path).unwrap();
        writeln!(file, "a,b").unwrap();
        writeln!(file, "1,x").unwrap();
        writeln!(file, "2,y").unwrap();

        let store = Arc::new(SchemaStore::new(dir.path().join("databases")));
        let agent = offline_agent(store.clone());

        let report = agent
            .process_file("mi_base", &csv_path, None)
            .await
            .unwrap();
        assert_eq!(
            report,
            IngestReport::Stored {
                database: "mi_base".to_string(),
                table: "sample".to_string(),
                rows: 2,
            }
        );

        let outcome = store.query("mi_base", "sample", &[]).unwrap();
        let rows = outcome.rows().expect("two rows were persisted");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("a"), Some(&FieldValue::Text("1".into())));
    }

    #[tokio::test]
    async fn test_unsupported_extension_is_terminal_but_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.docx");
        std::fs::write(&path, b"irrelevant").unwrap();

        let store = Arc::new(SchemaStore::new(dir.path().join("databases")));
        let agent = offline_agent(store.clone());

        let report = agent.process_file("mi_base", &path, None).await.unwrap();
        assert_eq!(
            report,
            IngestReport::Unsupported {
                extension: "docx".to_string()
            }
        );
        // No table was created
        assert!(store.table_schema("mi_base", "notes").is_err());
    }

    #[tokio::test]
    async fn test_header_only_csv_fails_with_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("empty.csv");
        std::fs::write(&csv_path, "a,b\n").unwrap();

        let store = Arc::new(SchemaStore::new(dir.path().join("databases")));
        let agent = offline_agent(store);

        let result = agent.process_file("mi_base", &csv_path, None).await;
        assert!(matches!(result, Err(MesaError::Storage(_))));
    }

    #[tokio::test]
    async fn test_table_name_comes_from_sanitized_base_name() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("ventas 2024.csv");
        let mut file = std::fs::File::create(&csv_path).unwrap();
        writeln!(file, "total").unwrap();
        writeln!(file, "10").unwrap();

        let store = Arc::new(SchemaStore::new(dir.path().join("databases")));
        let agent = offline_agent(store.clone());

        let report = agent
            .process_file("mi_base", &csv_path, None)
            .await
            .unwrap();
        assert!(
            matches!(report, IngestReport::Stored { ref table, .. } if table == "ventas_2024")
        );
    }

    #[test]
    fn test_ingest_report_rendering() {
        let stored = IngestReport::Stored {
            database: "mi_base".to_string(),
            table: "sample".to_string(),
            rows: 2,
        };
        assert_eq!(
            stored.to_string(),
            "Table 'sample' created and 2 row(s) inserted into database 'mi_base'."
        );

        let unsupported = IngestReport::Unsupported {
            extension: "docx".to_string(),
        };
        assert_eq!(unsupported.to_string(), "Unsupported file format: '.docx'.");
    }
}
