//! # pocket-deckbuilder
//!
//! Deck construction and card classification for Pokémon TCG Pocket.
//!
//! ## Design Principles
//!
//! 1. **Catalog Is Read-Only**: Cards are loaded once and never mutated.
//!    Derived data such as the trainer subtype is computed on demand.
//!
//! 2. **Total Queries**: Classification, filtering and sorting never fail.
//!    Missing fields fall into the default bucket instead of erroring.
//!
//! 3. **Rules As Data**: Deck limits, pattern tables and staple aliases
//!    are plain values that can be replaced or extended.
//!
//! ## Architecture
//!
//! - **Single Writer**: A `DeckBuilder` owns one in-progress deck. Each
//!   session gets its own builder; nothing here is shared between threads.
//!
//! - **Whole-Collection Persistence**: Saved decks are one JSON array
//!   under one key, rewritten in full on every save or delete.
//!
//! ## Modules
//!
//! - `cards`: Card data and the resident catalog
//! - `taxonomy`: Trainer subtype classifier and its pattern tables
//! - `browse`: Filtering, sorting and filter options over the catalog
//! - `deck`: Deck state machine, statistics, import and export
//! - `storage`: Key-value stores and the saved-deck repository
//! - `config`: Deck rules and builder configuration
//! - `error`: Error types

pub mod browse;
pub mod cards;
pub mod config;
pub mod deck;
pub mod error;
pub mod storage;
pub mod taxonomy;

// Re-export commonly used types
pub use crate::cards::{Card, CardId, Catalog};

pub use crate::taxonomy::{classify, Classifier, NamePattern, Subtype, SubtypeRule, TrainerSubtype};

pub use crate::browse::{
    browse, filter_cards, sort_cards, CardCategory, FilterOptions, FilterState, SortKey, SortOrder,
};

pub use crate::deck::{Deck, DeckBuilder, DeckEntry, DeckStats, ImportedDeck};

pub use crate::storage::{DeckId, DeckRepository, FileStore, KeyValueStore, MemoryStore, SavedDeck};

pub use crate::config::{DeckBuilderConfig, DeckRules, StapleCard};

pub use crate::error::{ConstraintViolation, ImportError, SaveError, StorageError, ValidationError};
