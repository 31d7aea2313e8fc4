//! Interaction memory: the append-only log of user/assistant exchanges.

mod log;

pub use log::{MemoryEntry, MemoryLog};
