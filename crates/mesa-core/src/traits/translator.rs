//! Natural-language-to-SQL translation trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::MesaResult;

/// Schema of the table a question is asked against.
///
/// Discovered from the live database before translation so the model sees
/// the current column set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Table name.
    pub table: String,
    /// Column names in declaration order.
    pub columns: Vec<String>,
}

impl TableSchema {
    /// Create a schema description.
    pub fn new(table: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            table: table.into(),
            columns,
        }
    }
}

/// Translates a natural-language question into a SQL statement.
///
/// The returned statement is used verbatim; no correctness guarantee is
/// assumed from the model (garbage in, garbage out).
#[async_trait]
pub trait TextToSql: Send + Sync {
    /// Translate a question into SQL against the given table.
    async fn translate(&self, question: &str, table: &TableSchema) -> MesaResult<String>;

    /// Model identifier this translator was built for.
    fn model_id(&self) -> &str;
}
