//! Deck statistics, recomputed from the entries on every call.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::DeckRules;

use super::Deck;

/// Copies per broad card category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDistribution {
    /// Everything that is neither trainer nor energy.
    pub pokemon: u32,
    /// Trainer cards of any subtype.
    pub trainer: u32,
    /// Energy cards.
    pub energy: u32,
}

/// Totals and distributions of a deck.
///
/// Distributions key on the raw catalog fields, not on the display
/// subtype: every trainer card counts under "trainer". Fields missing
/// from stored snapshots deserialize as zero or empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeckStats {
    /// Sum of copy counts.
    pub total_cards: u32,
    /// Cards that can still be added.
    pub remaining_slots: u32,
    /// Raw `type` to copies.
    pub type_distribution: BTreeMap<String, u32>,
    /// Raw `rarity` to copies.
    pub rarity_distribution: BTreeMap<String, u32>,
    /// Copies per broad category.
    pub category_distribution: CategoryDistribution,
    /// No cards at all.
    pub is_empty: bool,
    /// At the deck size limit.
    pub is_full: bool,
}

impl DeckStats {
    /// Aggregate `deck` under `rules`.
    ///
    /// ```
    /// use pocket_deckbuilder::cards::Card;
    /// use pocket_deckbuilder::config::DeckRules;
    /// use pocket_deckbuilder::deck::{DeckBuilder, DeckStats};
    ///
    /// let mut builder = DeckBuilder::new();
    /// builder.add_card(&Card::new("a1-033", "Charmander", "fire"));
    ///
    /// let stats = DeckStats::compute(builder.deck(), DeckRules::default());
    /// assert_eq!(stats.total_cards, 1);
    /// assert_eq!(stats.remaining_slots, 19);
    /// ```
    #[must_use]
    pub fn compute(deck: &Deck, rules: DeckRules) -> Self {
        let mut stats = Self::default();

        for entry in deck.entries() {
            let count = u32::from(entry.count);
            let card = &entry.card;

            stats.total_cards += count;
            *stats.type_distribution.entry(card.card_type.clone()).or_default() += count;
            *stats.rarity_distribution.entry(card.rarity.clone()).or_default() += count;

            let category = &mut stats.category_distribution;
            if card.is_trainer() {
                category.trainer += count;
            } else if card.is_energy() {
                category.energy += count;
            } else {
                category.pokemon += count;
            }
        }

        stats.remaining_slots = rules.max_deck_size.saturating_sub(stats.total_cards);
        stats.is_empty = stats.total_cards == 0;
        stats.is_full = stats.total_cards >= rules.max_deck_size;
        stats
    }
}
