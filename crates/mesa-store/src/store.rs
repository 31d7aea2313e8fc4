//! Dynamic-schema store over SQLite.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use rusqlite::types::{Value, ValueRef};
use rusqlite::{params_from_iter, Connection, OptionalExtension};
use tracing::{debug, info};

use mesa_core::{FieldValue, Record, RecordSet};

use crate::error::{StorageError, StorageResult};
use crate::ident::sanitize_identifier;

/// Outcome of a query that executed successfully.
///
/// Zero rows is the `Empty` sentinel, distinct from any error.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// At least one matching row.
    Rows(RecordSet),
    /// The query ran but matched nothing.
    Empty,
}

impl QueryOutcome {
    /// The matched rows, if any.
    pub fn rows(&self) -> Option<&RecordSet> {
        match self {
            QueryOutcome::Rows(rows) => Some(rows),
            QueryOutcome::Empty => None,
        }
    }

    /// Whether the query matched nothing.
    pub fn is_empty(&self) -> bool {
        matches!(self, QueryOutcome::Empty)
    }
}

impl fmt::Display for QueryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryOutcome::Empty => f.write_str("No results found."),
            QueryOutcome::Rows(rows) => {
                let rendered = serde_json::to_string_pretty(rows)
                    .unwrap_or_else(|e| format!("<unrenderable result: {}>", e));
                f.write_str(&rendered)
            }
        }
    }
}

/// Store owning one SQLite connection per named database.
///
/// Connections are opened on first reference and live for the process;
/// there is no pooling and no explicit release.
pub struct SchemaStore {
    databases_dir: PathBuf,
    connections: Mutex<HashMap<String, Arc<Mutex<Connection>>>>,
}

impl SchemaStore {
    /// Create a store backed by `<databases_dir>/<name>.db` files.
    pub fn new(databases_dir: impl Into<PathBuf>) -> Self {
        Self {
            databases_dir: databases_dir.into(),
            connections: Mutex::new(HashMap::new()),
        }
    }

    /// Connect to (or create) the named database, reusing any existing
    /// connection. The name `:memory:` opens a non-persistent database.
    pub fn connect(&self, db_name: &str) -> StorageResult<Arc<Mutex<Connection>>> {
        let mut connections = self.connections.lock().unwrap();
        if let Some(handle) = connections.get(db_name) {
            return Ok(handle.clone());
        }

        let conn = if db_name == ":memory:" {
            Connection::open_in_memory()?
        } else {
            std::fs::create_dir_all(&self.databases_dir)?;
            Connection::open(self.databases_dir.join(format!("{}.db", db_name)))?
        };

        info!(database = %db_name, "connection opened");
        let handle = Arc::new(Mutex::new(conn));
        connections.insert(db_name.to_string(), handle.clone());
        Ok(handle)
    }

    /// Whether a connection for `db_name` is already open.
    pub fn is_connected(&self, db_name: &str) -> bool {
        self.connections.lock().unwrap().contains_key(db_name)
    }

    /// Create the table if absent (schema inferred from the first record)
    /// and insert every record in one transaction. Returns the number of
    /// rows inserted.
    ///
    /// If the table already exists its schema is left untouched: values are
    /// still bound by the seed record's keys, so unseen keys are dropped
    /// and missing ones become NULL.
    pub fn create_and_insert(
        &self,
        db_name: &str,
        table_name: &str,
        records: &[Record],
    ) -> StorageResult<usize> {
        let seed = records.first().ok_or(StorageError::EmptyRecordSet)?;
        if seed.is_empty() {
            return Err(StorageError::EmptyRecordSet);
        }
        let table = sanitize_identifier(table_name)?;
        let columns: Vec<String> = seed
            .keys()
            .map(sanitize_identifier)
            .collect::<StorageResult<_>>()?;
        let seed_keys: Vec<String> = seed.keys().map(str::to_string).collect();

        let handle = self.connect(db_name)?;
        let mut conn = handle.lock().unwrap();

        let column_defs = columns
            .iter()
            .map(|c| format!(r#""{}" TEXT"#, c))
            .collect::<Vec<_>>()
            .join(", ");
        let create = format!(
            r#"CREATE TABLE IF NOT EXISTS "{}" (id INTEGER PRIMARY KEY AUTOINCREMENT, {})"#,
            table, column_defs
        );
        debug!(sql = %create, "ensuring table");
        conn.execute(&create, [])?;

        let tx = conn.transaction()?;
        {
            let quoted_columns = columns
                .iter()
                .map(|c| format!(r#""{}""#, c))
                .collect::<Vec<_>>()
                .join(", ");
            let placeholders = (1..=columns.len())
                .map(|i| format!("?{}", i))
                .collect::<Vec<_>>()
                .join(", ");
            let mut stmt = tx.prepare(&format!(
                r#"INSERT INTO "{}" ({}) VALUES ({})"#,
                table, quoted_columns, placeholders
            ))?;

            for record in records {
                let values: Vec<Value> = seed_keys
                    .iter()
                    .map(|key| match record.get(key) {
                        Some(FieldValue::Text(s)) => Value::Text(s.clone()),
                        Some(FieldValue::Number(n)) => Value::Real(*n),
                        None => Value::Null,
                    })
                    .collect();
                stmt.execute(params_from_iter(values))?;
            }
        }
        tx.commit()?;

        info!(
            database = %db_name,
            table = %table,
            rows = records.len(),
            "records inserted"
        );
        Ok(records.len())
    }

    /// Add a workflow link: an integer column on `dest_table` referencing
    /// `origin_table`'s identity column. Both tables must already exist.
    pub fn add_workflow_link(
        &self,
        db_name: &str,
        origin_table: &str,
        dest_table: &str,
        column_name: &str,
    ) -> StorageResult<()> {
        let origin = sanitize_identifier(origin_table)?;
        let dest = sanitize_identifier(dest_table)?;
        let column = sanitize_identifier(column_name)?;

        if !self.table_exists(db_name, &origin)? {
            return Err(StorageError::NoSuchTable(origin));
        }
        if !self.table_exists(db_name, &dest)? {
            return Err(StorageError::NoSuchTable(dest));
        }

        let handle = self.connect(db_name)?;
        let conn = handle.lock().unwrap();
        conn.execute(
            &format!(
                r#"ALTER TABLE "{}" ADD COLUMN "{}" INTEGER REFERENCES "{}"(id)"#,
                dest, column, origin
            ),
            [],
        )?;

        info!(
            database = %db_name,
            origin = %origin,
            dest = %dest,
            column = %column,
            "workflow link created"
        );
        Ok(())
    }

    /// Query a table with a conjunctive exact-match filter. An empty filter
    /// returns every row.
    pub fn query(
        &self,
        db_name: &str,
        table_name: &str,
        filter: &[(String, String)],
    ) -> StorageResult<QueryOutcome> {
        let table = sanitize_identifier(table_name)?;

        let mut sql = format!(r#"SELECT * FROM "{}""#, table);
        if !filter.is_empty() {
            let clauses = filter
                .iter()
                .enumerate()
                .map(|(i, (column, _))| {
                    Ok(format!(r#""{}" = ?{}"#, sanitize_identifier(column)?, i + 1))
                })
                .collect::<StorageResult<Vec<_>>>()?;
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        let params: Vec<String> = filter.iter().map(|(_, value)| value.clone()).collect();

        let handle = self.connect(db_name)?;
        let conn = handle.lock().unwrap();
        Self::run_select(&conn, &sql, &params)
    }

    /// Execute an arbitrary SQL statement and collect its rows.
    ///
    /// Used for translator-generated statements; no attempt is made to
    /// validate them beyond what SQLite itself reports.
    pub fn execute_sql(&self, db_name: &str, sql: &str) -> StorageResult<QueryOutcome> {
        let handle = self.connect(db_name)?;
        let conn = handle.lock().unwrap();
        Self::run_select(&conn, sql, &[])
    }

    /// Ordered column names of an existing table.
    pub fn table_schema(&self, db_name: &str, table_name: &str) -> StorageResult<Vec<String>> {
        let table = sanitize_identifier(table_name)?;
        let handle = self.connect(db_name)?;
        let conn = handle.lock().unwrap();

        let mut stmt = conn.prepare(&format!(r#"PRAGMA table_info("{}")"#, table))?;
        let columns = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<Result<Vec<_>, _>>()?;

        if columns.is_empty() {
            return Err(StorageError::NoSuchTable(table));
        }
        Ok(columns)
    }

    fn table_exists(&self, db_name: &str, table: &str) -> StorageResult<bool> {
        let handle = self.connect(db_name)?;
        let conn = handle.lock().unwrap();
        let found: Option<String> = conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
                [table],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn run_select(conn: &Connection, sql: &str, params: &[String]) -> StorageResult<QueryOutcome> {
        let mut stmt = conn.prepare(sql)?;
        let column_names: Vec<String> =
            stmt.column_names().iter().map(|c| c.to_string()).collect();

        let rows = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                let mut record = Record::new();
                for (i, name) in column_names.iter().enumerate() {
                    match row.get_ref(i)? {
                        ValueRef::Null => {}
                        ValueRef::Integer(n) => record.set(name.clone(), n as f64),
                        ValueRef::Real(r) => record.set(name.clone(), r),
                        ValueRef::Text(t) => {
                            record.set(name.clone(), String::from_utf8_lossy(t).into_owned())
                        }
                        ValueRef::Blob(_) => {}
                    }
                }
                Ok(record)
            })?
            .collect::<Result<Vec<_>, _>>()?;

        if rows.is_empty() {
            Ok(QueryOutcome::Empty)
        } else {
            Ok(QueryOutcome::Rows(rows))
        }
    }
}
