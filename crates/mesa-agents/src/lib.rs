//! mesa-agents - The agents behind the mesa assistant.
//!
//! Composes the extraction pipeline, model adapters, schema store, and
//! interaction memory into two agents and a command boundary:
//!
//! - [`IntegrationAgent`] - extract, optionally annotate, persist.
//! - [`SearchAgent`] - translate a question to SQL and execute it.
//! - [`Assistant`] - the command surface; every method returns a
//!   human-readable string and never propagates an error.
//! - [`Router`] - keyword dispatch over free-text commands, recording every
//!   exchange in the interaction memory.

mod assistant;
mod integration;
mod router;
mod search;

pub use assistant::Assistant;
pub use integration::{IngestReport, IntegrationAgent};
pub use router::Router;
pub use search::SearchAgent;
