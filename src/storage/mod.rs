//! Deck persistence.
//!
//! ## Key Types
//!
//! - `KeyValueStore`: The `get`/`set` text store the adapter is injected with
//! - `MemoryStore`: In-memory store, optionally bounded by a byte quota
//! - `FileStore`: One JSON file per key in a directory
//! - `DeckRepository`: Save, list, load and delete named deck snapshots
//!
//! A save either fully succeeds or leaves the stored collection as it
//! was. Nothing is retried.

pub mod kv;
pub mod repository;

pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use repository::{DeckId, DeckRepository, SavedDeck, UNNAMED_DECK};
