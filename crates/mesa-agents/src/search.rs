//! Search agent: natural-language questions over existing tables.

use std::sync::Arc;

use tracing::debug;

use mesa_core::{MesaError, MesaResult, TableSchema, TextToSql};
use mesa_store::{QueryOutcome, SchemaStore};

/// Agent translating questions into SQL and executing them.
///
/// The translation is opaque and unvalidated; whatever statement comes back
/// runs as-is, and whatever SQLite reports becomes the query error.
pub struct SearchAgent {
    translator: Arc<dyn TextToSql>,
    store: Arc<SchemaStore>,
}

impl SearchAgent {
    /// Create an agent from its collaborators.
    pub fn new(translator: Arc<dyn TextToSql>, store: Arc<SchemaStore>) -> Self {
        Self { translator, store }
    }

    /// Answer a natural-language question against an existing table.
    ///
    /// The table's current schema is discovered first so the model sees the
    /// live column set; a missing table is a query error.
    pub async fn ask(
        &self,
        db_name: &str,
        table_name: &str,
        question: &str,
    ) -> MesaResult<QueryOutcome> {
        let columns = self
            .store
            .table_schema(db_name, table_name)
            .map_err(|e| MesaError::query(e.to_string()))?;
        let schema = TableSchema::new(table_name, columns);

        let sql = self.translator.translate(question, &schema).await?;
        debug!(table = %table_name, %sql, "executing translated statement");

        self.store
            .execute_sql(db_name, &sql)
            .map_err(|e| MesaError::query(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mesa_core::Record;

    /// Translator stub returning a canned statement.
    struct FixedSql(&'static str);

    #[async_trait]
    impl TextToSql for FixedSql {
        async fn translate(&self, _question: &str, _table: &TableSchema) -> MesaResult<String> {
            Ok(self.0.to_string())
        }

        fn model_id(&self) -> &str {
            "fixed"
        }
    }

    fn seeded_store() -> Arc<SchemaStore> {
        let store = Arc::new(SchemaStore::new("unused"));
        let records = vec![
            Record::new().with("producto", "norte").with("total", "10"),
            Record::new().with("producto", "sur").with("total", "20"),
        ];
        store
            .create_and_insert(":memory:", "ventas", &records)
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_ask_executes_translated_sql() {
        let store = seeded_store();
        let agent = SearchAgent::new(
            Arc::new(FixedSql("SELECT producto FROM ventas WHERE total = '20'")),
            store,
        );

        let outcome = agent
            .ask(":memory:", "ventas", "which product sold 20?")
            .await
            .unwrap();
        let rows = outcome.rows().expect("one row matches");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("producto").unwrap().as_text(), Some("sur"));
    }

    #[tokio::test]
    async fn test_missing_table_is_a_query_error() {
        let store = Arc::new(SchemaStore::new("unused"));
        store.connect(":memory:").unwrap();
        let agent = SearchAgent::new(Arc::new(FixedSql("SELECT 1")), store);

        let result = agent.ask(":memory:", "nada", "anything").await;
        assert!(matches!(result, Err(MesaError::Query(_))));
    }

    #[tokio::test]
    async fn test_bad_generated_sql_is_a_query_error_not_a_panic() {
        let store = seeded_store();
        let agent = SearchAgent::new(Arc::new(FixedSql("SELEKT gibberish")), store);

        let result = agent.ask(":memory:", "ventas", "anything").await;
        assert!(matches!(result, Err(MesaError::Query(_))));
    }

    #[tokio::test]
    async fn test_zero_matches_is_the_empty_sentinel() {
        let store = seeded_store();
        let agent = SearchAgent::new(
            Arc::new(FixedSql("SELECT * FROM ventas WHERE total = '99'")),
            store,
        );

        let outcome = agent.ask(":memory:", "ventas", "anything").await.unwrap();
        assert!(outcome.is_empty());
    }
}
