//! mesa-store - Dynamic-schema SQLite store.
//!
//! Owns one long-lived connection per named database and materializes
//! tables on the fly: the column set is inferred from the first record of
//! an insert batch, every inferred column is TEXT, and an integer identity
//! column is always present. Workflow links (foreign-key columns between
//! existing tables) and conjunctive exact-match queries round out the
//! surface.
//!
//! # Example
//!
//! ```ignore
//! use mesa_store::{QueryOutcome, SchemaStore};
//!
//! let store = SchemaStore::new("databases");
//! store.create_and_insert("mi_base", "sample", &records)?;
//! match store.query("mi_base", "sample", &[])? {
//!     QueryOutcome::Rows(rows) => { /* ... */ }
//!     QueryOutcome::Empty => { /* valid zero-row outcome */ }
//! }
//! ```

mod error;
mod ident;
mod store;

pub use error::{StorageError, StorageResult};
pub use ident::sanitize_identifier;
pub use store::{QueryOutcome, SchemaStore};
