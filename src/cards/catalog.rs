//! The resident card catalog.
//!
//! The `Catalog` stores every card supplied by the upstream data source in
//! catalog order and provides lookup by `CardId` and by name.

use rustc_hash::FxHashMap;

use super::definition::{Card, CardId};

/// Ordered collection of catalog cards.
///
/// Order is the order the cards were supplied in; the browse pipeline
/// relies on it being stable.
///
/// ## Example
///
/// ```
/// use pocket_deckbuilder::cards::{Card, CardId, Catalog};
///
/// let catalog = Catalog::from_cards(vec![
///     Card::new("a1-001", "Bulbasaur", "grass"),
///     Card::new("p-a-007", "Professor's Research", "trainer"),
/// ]);
///
/// assert_eq!(catalog.get(&CardId::new("a1-001")).unwrap().name, "Bulbasaur");
/// assert!(catalog.find_by_name("professor’s research").is_some());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    cards: Vec<Card>,
    index: FxHashMap<CardId, usize>,
}

impl Catalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from cards in upstream order.
    ///
    /// Later duplicates of an id are dropped.
    #[must_use]
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut catalog = Self::new();
        for card in cards {
            catalog.insert(card);
        }
        catalog
    }

    /// Parse a catalog from the upstream JSON array.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let cards: Vec<Card> = serde_json::from_str(json)?;
        Ok(Self::from_cards(cards))
    }

    /// Append a card.
    ///
    /// Returns `false` (and keeps the existing card) if the id is already
    /// present.
    pub fn insert(&mut self, card: Card) -> bool {
        if self.index.contains_key(&card.id) {
            tracing::warn!(card = %card.id, name = %card.name, "duplicate card id in catalog, keeping first");
            return false;
        }
        self.index.insert(card.id.clone(), self.cards.len());
        self.cards.push(card);
        true
    }

    /// Get a card by ID.
    #[must_use]
    pub fn get(&self, id: &CardId) -> Option<&Card> {
        self.index.get(id).map(|&i| &self.cards[i])
    }

    /// Check if a card ID is in the catalog.
    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.index.contains_key(id)
    }

    /// Get the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// All cards in catalog order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Iterate over all cards in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// First card whose name matches, ignoring case and apostrophe style.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&Card> {
        let wanted = normalize_name(name);
        self.cards.iter().find(|c| normalize_name(&c.name) == wanted)
    }

    /// Find cards matching a predicate, in catalog order.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &Card>
    where
        F: Fn(&Card) -> bool,
    {
        self.cards.iter().filter(move |c| predicate(c))
    }
}

/// Lowercase, trim, and fold curly apostrophes to `'`.
pub(crate) fn normalize_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| if c == '\u{2019}' || c == '\u{2018}' { '\'' } else { c })
        .collect::<String>()
        .to_lowercase()
}
