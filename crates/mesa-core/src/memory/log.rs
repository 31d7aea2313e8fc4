//! Flat-file interaction log.
//!
//! The log is a single pretty-printed JSON array; every append is a full
//! read-modify-write of the file. Concurrent writers are not synchronized
//! here - the caller must serialize appends (one process, one command at a
//! time).

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::MesaResult;

/// One recorded exchange. Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryEntry {
    /// ISO-8601 timestamp of the exchange.
    pub timestamp: String,
    /// What the user sent.
    pub user_message: String,
    /// What the assistant answered.
    pub assistant_response: String,
}

/// Append-only log of interactions, persisted as a JSON array file.
#[derive(Debug, Clone)]
pub struct MemoryLog {
    path: PathBuf,
}

impl MemoryLog {
    /// Open the log at `path`, initializing it to `[]` if absent.
    pub fn new(path: impl Into<PathBuf>) -> MesaResult<Self> {
        let path = path.into();
        if !path.exists() {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(&path, "[]")?;
        }
        Ok(Self { path })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one exchange, stamped with the current UTC time.
    pub fn append(
        &self,
        user_message: impl Into<String>,
        assistant_response: impl Into<String>,
    ) -> MesaResult<()> {
        let mut entries = self.load()?;
        entries.push(MemoryEntry {
            timestamp: Utc::now().to_rfc3339(),
            user_message: user_message.into(),
            assistant_response: assistant_response.into(),
        });
        fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        Ok(())
    }

    /// The full history, oldest first.
    pub fn history(&self) -> MesaResult<Vec<MemoryEntry>> {
        self.load()
    }

    /// Entries whose user message contains `keyword`, case-insensitively,
    /// in their original order.
    pub fn search(&self, keyword: &str) -> MesaResult<Vec<MemoryEntry>> {
        let keyword = keyword.to_lowercase();
        Ok(self
            .load()?
            .into_iter()
            .filter(|entry| entry.user_message.to_lowercase().contains(&keyword))
            .collect())
    }

    fn load(&self) -> MesaResult<Vec<MemoryEntry>> {
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
