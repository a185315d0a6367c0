//! Deck construction.
//!
//! ## Key Types
//!
//! - `Deck`: A named, bounded multiset of catalog cards
//! - `DeckEntry`: One card and its copy count
//! - `DeckBuilder`: The only way to mutate a deck; enforces `DeckRules`
//! - `DeckStats`: Totals and distributions derived from a deck
//!
//! ## Invariants
//!
//! For a deck mutated only through `DeckBuilder`:
//! - every entry has `1 <= count <= max_copies_per_card`
//! - no two entries share a card id
//! - the sum of counts never exceeds `max_deck_size`
//!
//! Rejected mutations leave the deck untouched.

pub mod builder;
pub mod stats;
pub mod transfer;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId};

pub use builder::DeckBuilder;
pub use stats::{CategoryDistribution, DeckStats};
pub use transfer::{
    export_json, export_text, import_json, import_share_code, import_text, share_code,
    ImportedDeck,
};

/// One card in a deck and how many copies of it.
///
/// Serialized as `{ "card": {...}, "count": n }`, the shape saved decks
/// use. The flat form (card fields next to `count`) is also accepted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredEntry")]
pub struct DeckEntry {
    /// The card.
    pub card: Card,
    /// Number of copies.
    pub count: u8,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredEntry {
    Nested { card: Card, count: u8 },
    Flat(FlatEntry),
}

#[derive(Deserialize)]
struct FlatEntry {
    #[serde(flatten)]
    card: Card,
    count: u8,
}

impl From<StoredEntry> for DeckEntry {
    fn from(stored: StoredEntry) -> Self {
        match stored {
            StoredEntry::Nested { card, count } | StoredEntry::Flat(FlatEntry { card, count }) => {
                Self { card, count }
            }
        }
    }
}

impl DeckEntry {
    /// Create an entry.
    #[must_use]
    pub fn new(card: Card, count: u8) -> Self {
        Self { card, count }
    }

    /// The entry's card id.
    #[must_use]
    pub fn id(&self) -> &CardId {
        &self.card.id
    }
}

/// A named deck.
///
/// Entries keep insertion order. The entry list is read-only from the
/// outside; use `DeckBuilder` to change it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Deck {
    name: String,
    entries: Vec<DeckEntry>,
}

impl Deck {
    /// Create an empty deck.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Deck name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[DeckEntry] {
        &self.entries
    }

    /// Sum of all copy counts.
    #[must_use]
    pub fn total_cards(&self) -> u32 {
        self.entries.iter().map(|e| u32::from(e.count)).sum()
    }

    /// Copies of `id` in the deck, 0 if absent.
    #[must_use]
    pub fn card_count(&self, id: &CardId) -> u8 {
        self.entry(id).map_or(0, |e| e.count)
    }

    /// Is `id` in the deck?
    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.entry(id).is_some()
    }

    /// The entry for `id`, if present.
    #[must_use]
    pub fn entry(&self, id: &CardId) -> Option<&DeckEntry> {
        self.entries.iter().find(|e| e.card.id == *id)
    }

    /// Number of distinct cards.
    #[must_use]
    pub fn distinct_cards(&self) -> usize {
        self.entries.len()
    }

    /// Does the deck hold no cards?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, id: &CardId) -> Option<usize> {
        self.entries.iter().position(|e| e.card.id == *id)
    }
}
