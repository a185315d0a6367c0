//! Saved-deck collection over a key-value store.
//!
//! The whole collection lives under one key as a JSON array. Every write
//! is a read-modify-write of that array, assuming a single writer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{DeckBuilderConfig, DeckRules, DEFAULT_STORAGE_KEY};
use crate::deck::{Deck, DeckBuilder, DeckEntry, DeckStats};
use crate::error::{SaveError, StorageError, ValidationError};

use super::kv::KeyValueStore;

/// Name stored when the requested one is blank.
pub const UNNAMED_DECK: &str = "Unnamed Deck";

/// Identity of a saved deck (`deck_<unix millis>`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeckId(String);

impl DeckId {
    /// Wrap a raw id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DeckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Deck({})", self.0)
    }
}

/// An immutable snapshot of a deck as persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedDeck {
    /// Unique id.
    pub id: DeckId,
    /// Trimmed deck name.
    pub name: String,
    /// Entries at save time.
    pub cards: Vec<DeckEntry>,
    /// Statistics at save time.
    #[serde(default)]
    pub stats: DeckStats,
    /// Save time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SavedDeck {
    /// Total copies in the snapshot.
    #[must_use]
    pub fn total_cards(&self) -> u32 {
        self.cards.iter().map(|e| u32::from(e.count)).sum()
    }

    /// Reopen the snapshot for editing under `rules`.
    ///
    /// Entries are brought within `rules`, so a deck saved under looser
    /// limits is trimmed rather than rejected.
    #[must_use]
    pub fn to_builder(&self, rules: DeckRules) -> DeckBuilder {
        let mut builder = DeckBuilder::with_rules(rules);
        builder.set_name(self.name.clone());
        builder.replace_entries(self.cards.iter().cloned());
        builder
    }
}

/// Persistence adapter for named decks.
///
/// ```
/// use pocket_deckbuilder::cards::Card;
/// use pocket_deckbuilder::deck::DeckBuilder;
/// use pocket_deckbuilder::storage::{DeckRepository, MemoryStore};
///
/// let mut builder = DeckBuilder::new();
/// builder.add_card(&Card::new("a1-001", "Bulbasaur", "grass"));
///
/// let mut repo = DeckRepository::new(MemoryStore::new());
/// let id = repo.save(builder.deck(), "  Grass  ").unwrap();
///
/// let saved = repo.load(&id).unwrap();
/// assert_eq!(saved.name, "Grass");
/// assert_eq!(repo.load_all().len(), 1);
/// ```
#[derive(Debug)]
pub struct DeckRepository<S> {
    store: S,
    key: String,
    rules: DeckRules,
}

impl<S: KeyValueStore> DeckRepository<S> {
    /// Repository under the default key and rules.
    pub fn new(store: S) -> Self {
        Self {
            store,
            key: DEFAULT_STORAGE_KEY.to_string(),
            rules: DeckRules::default(),
        }
    }

    /// Repository keyed and limited by `config`.
    pub fn with_config(store: S, config: &DeckBuilderConfig) -> Self {
        Self {
            store,
            key: config.storage_key.clone(),
            rules: config.rules,
        }
    }

    /// Set the storage key (builder pattern).
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Storage key of the collection.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the repository, returning the store.
    pub fn into_inner(self) -> S {
        self.store
    }

    /// Append a snapshot of `deck` to the collection.
    ///
    /// Fails without writing if the deck is empty or the stored
    /// collection cannot be read back.
    pub fn save(&mut self, deck: &Deck, name: &str) -> Result<DeckId, SaveError> {
        self.save_at(deck, name, Utc::now())
    }

    /// `save` with an explicit timestamp.
    pub fn save_at(&mut self, deck: &Deck, name: &str, now: DateTime<Utc>) -> Result<DeckId, SaveError> {
        if deck.total_cards() == 0 {
            return Err(ValidationError::EmptyDeck.into());
        }

        let mut decks = self.read()?;
        let id = next_id(&decks, now);
        let name = match name.trim() {
            "" => UNNAMED_DECK.to_string(),
            trimmed => trimmed.to_string(),
        };

        decks.push(SavedDeck {
            id: id.clone(),
            name,
            cards: deck.entries().to_vec(),
            stats: DeckStats::compute(deck, self.rules),
            created_at: now,
            updated_at: Some(now),
        });
        self.write(&decks)?;

        debug!(deck = %id, total = deck.total_cards(), "deck saved");
        Ok(id)
    }

    /// Every saved deck, oldest first.
    ///
    /// A missing, unreadable or unparsable collection reads as empty.
    #[must_use]
    pub fn load_all(&self) -> Vec<SavedDeck> {
        match self.read() {
            Ok(decks) => decks,
            Err(e) => {
                warn!(key = %self.key, error = %e, "saved decks unreadable, treating as empty");
                Vec::new()
            }
        }
    }

    /// The saved deck with `id`, if any.
    #[must_use]
    pub fn load(&self, id: &DeckId) -> Option<SavedDeck> {
        let found = self.load_all().into_iter().find(|d| d.id == *id);
        debug!(deck = %id, found = found.is_some(), "deck loaded");
        found
    }

    /// Remove the saved deck with `id`. Returns whether it existed.
    pub fn delete(&mut self, id: &DeckId) -> Result<bool, StorageError> {
        let mut decks = self.read()?;
        let before = decks.len();
        decks.retain(|d| d.id != *id);

        if decks.len() == before {
            return Ok(false);
        }
        self.write(&decks)?;
        debug!(deck = %id, "deck deleted");
        Ok(true)
    }

    fn read(&self) -> Result<Vec<SavedDeck>, StorageError> {
        let Some(text) = self.store.get(&self.key)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&text).map_err(|e| StorageError::Corrupt {
            key: self.key.clone(),
            reason: e.to_string(),
        })
    }

    fn write(&mut self, decks: &[SavedDeck]) -> Result<(), StorageError> {
        let json = serde_json::to_string(decks)?;
        self.store.set(&self.key, json)
    }
}

/// `deck_<millis>`, suffixed until unique within `existing`.
fn next_id(existing: &[SavedDeck], now: DateTime<Utc>) -> DeckId {
    let base = format!("deck_{}", now.timestamp_millis());
    let taken = |candidate: &str| existing.iter().any(|d| d.id.as_str() == candidate);

    if !taken(&base) {
        return DeckId::new(base);
    }
    let mut n = 1u32;
    loop {
        let candidate = format!("{base}_{n}");
        if !taken(&candidate) {
            return DeckId::new(candidate);
        }
        n += 1;
    }
}
