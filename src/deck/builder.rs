//! The deck construction state machine.
//!
//! The state is just the deck's entry list. Every mutator comes in two
//! forms: a plain one that returns whether the deck changed, and a
//! `try_*` one that reports why it did not.

use tracing::{debug, warn};

use crate::cards::{Card, CardId, Catalog};
use crate::config::{DeckBuilderConfig, DeckRules, StapleCard, DEFAULT_DECK_NAME};
use crate::error::ConstraintViolation;

use super::stats::DeckStats;
use super::transfer::ImportedDeck;
use super::{Deck, DeckEntry};

/// Owns an in-progress deck and enforces `DeckRules` on it.
///
/// ```
/// use pocket_deckbuilder::cards::Card;
/// use pocket_deckbuilder::deck::DeckBuilder;
///
/// let pikachu = Card::new("a1-094", "Pikachu", "lightning");
/// let mut builder = DeckBuilder::new();
///
/// assert!(builder.add_card(&pikachu));
/// assert!(builder.add_card(&pikachu));
/// assert!(!builder.add_card(&pikachu)); // copy limit
/// assert_eq!(builder.card_count(&pikachu.id), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeckBuilder {
    deck: Deck,
    rules: DeckRules,
}

impl Default for DeckBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DeckBuilder {
    /// Empty deck under the default rules.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rules(DeckRules::default())
    }

    /// Empty deck under custom rules.
    #[must_use]
    pub fn with_rules(rules: DeckRules) -> Self {
        Self {
            deck: Deck::new(DEFAULT_DECK_NAME),
            rules,
        }
    }

    /// Empty deck named and limited by `config`.
    #[must_use]
    pub fn with_config(config: &DeckBuilderConfig) -> Self {
        Self {
            deck: Deck::new(config.default_deck_name.clone()),
            rules: config.rules,
        }
    }

    /// The current deck.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Consume the builder, keeping the deck.
    #[must_use]
    pub fn into_deck(self) -> Deck {
        self.deck
    }

    /// Active rules.
    #[must_use]
    pub fn rules(&self) -> DeckRules {
        self.rules
    }

    /// Copies of `id` in the deck.
    #[must_use]
    pub fn card_count(&self, id: &CardId) -> u8 {
        self.deck.card_count(id)
    }

    /// Sum of all copy counts.
    #[must_use]
    pub fn total_cards(&self) -> u32 {
        self.deck.total_cards()
    }

    /// Statistics of the current deck.
    #[must_use]
    pub fn stats(&self) -> DeckStats {
        DeckStats::compute(&self.deck, self.rules)
    }

    /// Rename the deck.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.deck.name = name.into();
    }

    /// Add one copy of `card`. Returns `false` if the deck is unchanged.
    pub fn add_card(&mut self, card: &Card) -> bool {
        self.try_add_card(card).is_ok()
    }

    /// Add one copy of `card`, or report the violated limit.
    ///
    /// A present card is checked against the copy limit before the deck
    /// size limit.
    pub fn try_add_card(&mut self, card: &Card) -> Result<(), ConstraintViolation> {
        let total = self.deck.total_cards();
        let DeckRules {
            max_deck_size,
            max_copies_per_card,
        } = self.rules;

        let result = match self.deck.position(&card.id) {
            Some(i) => {
                let entry = &mut self.deck.entries[i];
                if entry.count >= max_copies_per_card {
                    Err(ConstraintViolation::CopyLimit {
                        card: card.id.clone(),
                        max: max_copies_per_card,
                    })
                } else if total >= max_deck_size {
                    Err(ConstraintViolation::DeckFull { max: max_deck_size })
                } else {
                    entry.count += 1;
                    Ok(())
                }
            }
            None if total >= max_deck_size => {
                Err(ConstraintViolation::DeckFull { max: max_deck_size })
            }
            None if max_copies_per_card == 0 => Err(ConstraintViolation::CopyLimit {
                card: card.id.clone(),
                max: max_copies_per_card,
            }),
            None => {
                self.deck.entries.push(DeckEntry::new(card.clone(), 1));
                Ok(())
            }
        };

        if let Err(ref violation) = result {
            debug!(card = %card.id, %violation, "add rejected");
        }
        result
    }

    /// Remove one copy of `id`. Returns `false` if it was not in the deck.
    pub fn remove_card(&mut self, id: &CardId) -> bool {
        self.try_remove_card(id).is_ok()
    }

    /// Remove one copy of `id`; the entry goes away with its last copy.
    pub fn try_remove_card(&mut self, id: &CardId) -> Result<(), ConstraintViolation> {
        let Some(i) = self.deck.position(id) else {
            debug!(card = %id, "remove of absent card ignored");
            return Err(ConstraintViolation::NotInDeck { card: id.clone() });
        };

        if self.deck.entries[i].count > 1 {
            self.deck.entries[i].count -= 1;
        } else {
            self.deck.entries.remove(i);
        }
        Ok(())
    }

    /// Empty the deck. The name is kept.
    pub fn clear(&mut self) {
        self.deck.entries.clear();
    }

    /// Set the copy count of a card already in the deck; 0 removes it.
    pub fn set_card_count(&mut self, id: &CardId, count: u8) -> bool {
        self.try_set_card_count(id, count).is_ok()
    }

    /// Set the copy count of a card already in the deck, or report why not.
    pub fn try_set_card_count(&mut self, id: &CardId, count: u8) -> Result<(), ConstraintViolation> {
        let max = self.rules.max_copies_per_card;
        if count > max {
            return Err(ConstraintViolation::InvalidCount { count, max });
        }

        let Some(i) = self.deck.position(id) else {
            return Err(ConstraintViolation::NotInDeck { card: id.clone() });
        };

        if count == 0 {
            self.deck.entries.remove(i);
            return Ok(());
        }

        let current = self.deck.entries[i].count;
        let total = self.deck.total_cards() - u32::from(current) + u32::from(count);
        if total > self.rules.max_deck_size {
            return Err(ConstraintViolation::DeckFull {
                max: self.rules.max_deck_size,
            });
        }

        self.deck.entries[i].count = count;
        Ok(())
    }

    /// Replace the whole deck with `entries`, bringing them within the rules.
    ///
    /// Duplicate ids are merged, counts are clamped to the copy limit and
    /// entries are cut off once the deck is full. Returns how many copies
    /// were dropped.
    pub fn replace_entries(&mut self, entries: impl IntoIterator<Item = DeckEntry>) -> usize {
        let max_copies = self.rules.max_copies_per_card;
        let mut merged: Vec<DeckEntry> = Vec::new();
        let mut dropped = 0usize;

        for entry in entries {
            if entry.count == 0 {
                continue;
            }
            match merged.iter_mut().find(|e| e.card.id == entry.card.id) {
                Some(existing) => {
                    let sum = existing.count.saturating_add(entry.count);
                    existing.count = sum.min(max_copies);
                    dropped += usize::from(sum - existing.count);
                }
                None => {
                    let count = entry.count.min(max_copies);
                    dropped += usize::from(entry.count - count);
                    if count > 0 {
                        merged.push(DeckEntry::new(entry.card, count));
                    }
                }
            }
        }

        let mut remaining = self.rules.max_deck_size;
        self.deck.entries.clear();
        for mut entry in merged {
            let take = u8::try_from(remaining.min(u32::from(entry.count))).unwrap_or(entry.count);
            dropped += usize::from(entry.count - take);
            if take == 0 {
                continue;
            }
            remaining -= u32::from(take);
            entry.count = take;
            self.deck.entries.push(entry);
        }

        if dropped > 0 {
            debug!(dropped, "entries trimmed to deck rules");
        }
        dropped
    }

    /// Replace the deck with an import result; the name is taken over if
    /// the import carried one.
    pub fn apply_import(&mut self, imported: ImportedDeck) -> usize {
        if let Some(name) = imported.name {
            self.deck.name = name;
        }
        self.replace_entries(imported.entries)
    }

    /// Seed two copies of each staple found in `catalog`.
    ///
    /// Each staple resolves to the first alias present in the catalog.
    /// Staples that do not resolve are skipped. Returns the number of
    /// copies added.
    pub fn add_default_cards(&mut self, catalog: &Catalog, staples: &[StapleCard]) -> usize {
        let mut added = 0;
        let mut resolved = 0;

        for staple in staples {
            let Some(card) = staple
                .aliases
                .iter()
                .find_map(|alias| catalog.find_by_name(alias))
            else {
                debug!(staple = %staple.label, "staple not in catalog");
                continue;
            };

            resolved += 1;
            for _ in 0..2 {
                if self.add_card(card) {
                    added += 1;
                }
            }
        }

        if resolved == 0 && !staples.is_empty() {
            warn!(staples = staples.len(), "no staple aliases matched the catalog");
        }
        added
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(n: usize) -> Card {
        Card::new(format!("c{n}"), format!("Card {n}"), "fire")
    }

    #[test]
    fn test_add_up_to_copy_limit() {
        let mut builder = DeckBuilder::new();
        let a = card(1);

        assert!(builder.add_card(&a));
        assert_eq!(builder.card_count(&a.id), 1);
        assert!(builder.add_card(&a));
        assert_eq!(builder.card_count(&a.id), 2);

        let before = builder.deck().clone();
        assert_eq!(
            builder.try_add_card(&a),
            Err(ConstraintViolation::CopyLimit { card: a.id.clone(), max: 2 })
        );
        assert_eq!(builder.deck(), &before);
    }

    #[test]
    fn test_full_deck_rejects_new_card() {
        let mut builder = DeckBuilder::new();
        for n in 0..20 {
            assert!(builder.add_card(&card(n)));
        }
        assert_eq!(builder.total_cards(), 20);

        let extra = card(20);
        assert_eq!(builder.try_add_card(&extra), Err(ConstraintViolation::DeckFull { max: 20 }));
        assert!(!builder.deck().contains(&extra.id));
    }

    #[test]
    fn test_full_deck_rejects_second_copy() {
        let mut builder = DeckBuilder::with_rules(DeckRules::new(3, 2));
        for n in 0..3 {
            builder.add_card(&card(n));
        }
        assert_eq!(builder.try_add_card(&card(0)), Err(ConstraintViolation::DeckFull { max: 3 }));
        assert_eq!(builder.card_count(&card(0).id), 1);
    }

    #[test]
    fn test_copy_limit_reported_before_deck_full() {
        let mut builder = DeckBuilder::with_rules(DeckRules::new(2, 2));
        let a = card(1);
        builder.add_card(&a);
        builder.add_card(&a);
        assert!(matches!(
            builder.try_add_card(&a),
            Err(ConstraintViolation::CopyLimit { .. })
        ));
    }

    #[test]
    fn test_remove_decrements_then_removes() {
        let mut builder = DeckBuilder::new();
        let a = card(1);
        builder.add_card(&a);
        builder.add_card(&a);

        assert!(builder.remove_card(&a.id));
        assert_eq!(builder.card_count(&a.id), 1);
        assert!(builder.remove_card(&a.id));
        assert!(!builder.deck().contains(&a.id));
        assert!(builder.deck().is_empty());
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut builder = DeckBuilder::new();
        builder.add_card(&card(1));
        let before = builder.deck().clone();

        assert_eq!(
            builder.try_remove_card(&CardId::new("missing")),
            Err(ConstraintViolation::NotInDeck { card: CardId::new("missing") })
        );
        assert_eq!(builder.deck(), &before);
    }

    #[test]
    fn test_clear_keeps_name() {
        let mut builder = DeckBuilder::new();
        builder.set_name("Fire Deck");
        builder.add_card(&card(1));
        builder.clear();

        assert!(builder.deck().is_empty());
        assert_eq!(builder.deck().name(), "Fire Deck");
    }

    #[test]
    fn test_set_card_count() {
        let mut builder = DeckBuilder::new();
        let a = card(1);
        builder.add_card(&a);

        assert!(builder.set_card_count(&a.id, 2));
        assert_eq!(builder.card_count(&a.id), 2);
        assert_eq!(
            builder.try_set_card_count(&a.id, 3),
            Err(ConstraintViolation::InvalidCount { count: 3, max: 2 })
        );
        assert!(!builder.set_card_count(&card(2).id, 1));
        assert!(builder.set_card_count(&a.id, 0));
        assert!(builder.deck().is_empty());
    }

    #[test]
    fn test_set_card_count_respects_deck_size() {
        let mut builder = DeckBuilder::with_rules(DeckRules::new(2, 2));
        builder.add_card(&card(1));
        builder.add_card(&card(2));

        assert_eq!(
            builder.try_set_card_count(&card(1).id, 2),
            Err(ConstraintViolation::DeckFull { max: 2 })
        );
        assert_eq!(builder.total_cards(), 2);
    }

    #[test]
    fn test_replace_entries_merges_clamps_and_truncates() {
        let mut builder = DeckBuilder::with_rules(DeckRules::new(4, 2));
        let dropped = builder.replace_entries(vec![
            DeckEntry::new(card(1), 1),
            DeckEntry::new(card(2), 5),
            DeckEntry::new(card(1), 1),
            DeckEntry::new(card(3), 0),
            DeckEntry::new(card(4), 2),
        ]);

        let counts: Vec<_> = builder
            .deck()
            .entries()
            .iter()
            .map(|e| (e.card.id.as_str().to_string(), e.count))
            .collect();
        assert_eq!(counts, vec![("c1".to_string(), 2), ("c2".to_string(), 2)]);
        // 3 clamped from c2, 2 cut from c4
        assert_eq!(dropped, 5);
    }

    #[test]
    fn test_add_default_cards() {
        let catalog = Catalog::from_cards([
            Card::new("p-a-007", "Professor\u{2019}s Research", "trainer"),
            Card::new("p-a-005", "Poké Ball", "trainer"),
            Card::new("a1-001", "Bulbasaur", "grass"),
        ]);

        let mut builder = DeckBuilder::new();
        let added = builder.add_default_cards(&catalog, &StapleCard::defaults());

        assert_eq!(added, 4);
        assert_eq!(builder.card_count(&CardId::new("p-a-007")), 2);
        assert_eq!(builder.card_count(&CardId::new("p-a-005")), 2);
    }

    #[test]
    fn test_add_default_cards_none_resolve() {
        let catalog = Catalog::from_cards([Card::new("a1-001", "Bulbasaur", "grass")]);
        let mut builder = DeckBuilder::new();

        assert_eq!(builder.add_default_cards(&catalog, &StapleCard::defaults()), 0);
        assert!(builder.deck().is_empty());
    }

    #[test]
    fn test_zero_copy_rules_reject_everything() {
        let mut builder = DeckBuilder::with_rules(DeckRules::new(20, 0));
        assert!(!builder.add_card(&card(1)));
        assert!(builder.deck().is_empty());
    }
}
