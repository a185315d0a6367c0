//! Catalog filtering.
//!
//! `FilterState` holds the user's current criteria. Each criterion is an
//! independent predicate; a card passes when all of them pass. Empty
//! selection sets are wildcards: they match every card.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::taxonomy::{Classifier, TrainerSubtype};

use super::sort::{SortKey, SortOrder};

/// Broad card category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardCategory {
    /// No category restriction.
    #[default]
    All,
    /// Anything that is neither a trainer nor an energy.
    Pokemon,
    /// Trainer cards.
    Trainer,
    /// Energy cards.
    Energy,
}

impl CardCategory {
    /// Does the card belong to this category?
    #[must_use]
    pub fn contains(self, card: &Card) -> bool {
        match self {
            Self::All => true,
            Self::Pokemon => !card.is_trainer() && !card.is_energy(),
            Self::Trainer => card.is_trainer(),
            Self::Energy => card.is_energy(),
        }
    }
}

/// Current browse criteria.
///
/// Type keys are lowercase: base types ("fire") or trainer subtype keys
/// ("item", "supporter", "tool", "fossil"). Rarity and pack selections
/// are compared exactly.
///
/// ## Example
///
/// ```
/// use pocket_deckbuilder::browse::FilterState;
/// use pocket_deckbuilder::cards::Card;
///
/// let state = FilterState::new().with_search("char").with_type("Fire");
///
/// assert!(state.matches(&Card::new("a1-033", "Charmander", "fire")));
/// assert!(!state.matches(&Card::new("a1-053", "Squirtle", "water")));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    /// Case-insensitive substring of the card name.
    pub search_text: String,

    /// Selected type keys. Empty matches all.
    pub selected_types: FxHashSet<String>,

    /// Selected rarity symbols. Empty matches all.
    pub selected_rarities: FxHashSet<String>,

    /// Selected packs. Empty matches all.
    pub selected_packs: FxHashSet<String>,

    /// Broad category restriction.
    pub category: CardCategory,

    /// Inclusive hit point range; missing health counts as 0.
    pub hp_range: Option<(u32, u32)>,

    /// Sort key applied after filtering.
    pub sort_key: SortKey,

    /// Sort direction.
    pub sort_order: SortOrder,
}

impl FilterState {
    /// Criteria that match every card, sorted by name.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text (builder pattern).
    #[must_use]
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    /// Select a type key (builder pattern).
    #[must_use]
    pub fn with_type(mut self, key: impl AsRef<str>) -> Self {
        self.selected_types.insert(key.as_ref().to_lowercase());
        self
    }

    /// Select a rarity (builder pattern).
    #[must_use]
    pub fn with_rarity(mut self, rarity: impl Into<String>) -> Self {
        self.selected_rarities.insert(rarity.into());
        self
    }

    /// Select a pack (builder pattern).
    #[must_use]
    pub fn with_pack(mut self, pack: impl Into<String>) -> Self {
        self.selected_packs.insert(pack.into());
        self
    }

    /// Restrict to a category (builder pattern).
    #[must_use]
    pub fn with_category(mut self, category: CardCategory) -> Self {
        self.category = category;
        self
    }

    /// Restrict hit points to `min..=max` (builder pattern).
    #[must_use]
    pub fn with_hp_range(mut self, min: u32, max: u32) -> Self {
        self.hp_range = Some((min, max));
        self
    }

    /// Set the sort (builder pattern).
    #[must_use]
    pub fn with_sort(mut self, key: SortKey, order: SortOrder) -> Self {
        self.sort_key = key;
        self.sort_order = order;
        self
    }

    /// Add the type key if absent, remove it if present.
    pub fn toggle_type(&mut self, key: &str) {
        toggle(&mut self.selected_types, key.to_lowercase());
    }

    /// Add the rarity if absent, remove it if present.
    pub fn toggle_rarity(&mut self, rarity: &str) {
        toggle(&mut self.selected_rarities, rarity.to_string());
    }

    /// Add the pack if absent, remove it if present.
    pub fn toggle_pack(&mut self, pack: &str) {
        toggle(&mut self.selected_packs, pack.to_string());
    }

    /// Reset every criterion, keeping the sort.
    pub fn clear(&mut self) {
        *self = Self {
            sort_key: self.sort_key,
            sort_order: self.sort_order,
            ..Self::default()
        };
    }

    /// Is any criterion narrowing the catalog?
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        self.active_filter_count() > 0
    }

    /// Number of active criteria; each selected value counts once.
    #[must_use]
    pub fn active_filter_count(&self) -> usize {
        usize::from(!self.search_text.is_empty())
            + self.selected_types.len()
            + self.selected_rarities.len()
            + self.selected_packs.len()
            + usize::from(self.category != CardCategory::All)
            + usize::from(self.hp_range.is_some())
    }

    /// Does the card pass every criterion, using the standard classifier?
    #[must_use]
    pub fn matches(&self, card: &Card) -> bool {
        self.matches_with(card, &Classifier::default())
    }

    /// Does the card pass every criterion?
    #[must_use]
    pub fn matches_with(&self, card: &Card, classifier: &Classifier) -> bool {
        self.matches_search(card)
            && self.matches_type(card, classifier)
            && self.matches_rarity(card)
            && self.matches_pack(card)
            && self.category.contains(card)
            && self.matches_hp(card)
    }

    /// Name contains the search text, ignoring case.
    #[must_use]
    pub fn matches_search(&self, card: &Card) -> bool {
        self.search_text.is_empty()
            || card.name.to_lowercase().contains(&self.search_text.to_lowercase())
    }

    /// Type selection test.
    ///
    /// Trainers are matched by inferred subtype; fossils also match the
    /// "item" key. Multi-type cards match if any of their types is
    /// selected; other cards match on their declared type.
    #[must_use]
    pub fn matches_type(&self, card: &Card, classifier: &Classifier) -> bool {
        if self.selected_types.is_empty() {
            return true;
        }

        if card.is_trainer() {
            let subtype = classifier.classify_trainer(&card.name);
            return self.selected_types.contains(subtype.key())
                || (subtype == TrainerSubtype::Fossil
                    && self.selected_types.contains(TrainerSubtype::Item.key()));
        }

        let types = card.type_list();
        if !types.is_empty() {
            return types
                .iter()
                .any(|t| self.selected_types.contains(&t.to_lowercase()));
        }

        self.selected_types.contains(&card.card_type.to_lowercase())
    }

    /// Rarity selection test.
    #[must_use]
    pub fn matches_rarity(&self, card: &Card) -> bool {
        self.selected_rarities.is_empty() || self.selected_rarities.contains(&card.rarity)
    }

    /// Pack selection test.
    #[must_use]
    pub fn matches_pack(&self, card: &Card) -> bool {
        self.selected_packs.is_empty() || self.selected_packs.contains(&card.pack)
    }

    fn matches_hp(&self, card: &Card) -> bool {
        match self.hp_range {
            Some((min, max)) => (min..=max).contains(&card.health_or_zero()),
            None => true,
        }
    }
}

fn toggle(set: &mut FxHashSet<String>, value: String) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

/// Cards passing `state`, in catalog order.
#[must_use]
pub fn filter_cards<'a>(cards: &'a [Card], state: &FilterState) -> Vec<&'a Card> {
    filter_cards_with(cards, state, &Classifier::default())
}

/// Cards passing `state` under a custom classifier, in catalog order.
#[must_use]
pub fn filter_cards_with<'a>(
    cards: &'a [Card],
    state: &FilterState,
    classifier: &Classifier,
) -> Vec<&'a Card> {
    cards
        .iter()
        .filter(|card| state.matches_with(card, classifier))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::NamePattern;

    fn catalog() -> Vec<Card> {
        vec![
            Card::new("a1-033", "Charmander", "fire").with_rarity("◊").with_pack("Charizard").with_health(60),
            Card::new("a1-036", "Charizard ex", "fire").with_rarity("◊◊◊◊").with_pack("Charizard").with_health(180),
            Card::new("a1-053", "Squirtle", "water").with_rarity("◊").with_pack("Pikachu").with_health(60),
            Card::new("dual-1", "Volcanion", "").with_types(["fire", "water"]).with_health(120),
            Card::new("p-a-001", "Potion", "trainer").with_rarity("◊"),
            Card::new("a1-216", "Helix Fossil", "trainer"),
            Card::new("a1-219", "Erika", "trainer"),
            Card::new("a2-147", "Giant Cape", "trainer"),
            Card::new("e-1", "Fire Energy", "energy"),
        ]
    }

    fn ids(cards: &[&Card]) -> Vec<String> {
        cards.iter().map(|c| c.id.as_str().to_string()).collect()
    }

    #[test]
    fn test_empty_state_returns_everything_in_order() {
        let cards = catalog();
        let filtered = filter_cards(&cards, &FilterState::new());
        assert_eq!(filtered.len(), cards.len());
        assert!(filtered.iter().zip(&cards).all(|(a, b)| a.id == b.id));
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let cards = catalog();
        let filtered = filter_cards(&cards, &FilterState::new().with_search("CHAR"));
        assert_eq!(ids(&filtered), vec!["a1-033", "a1-036"]);
    }

    #[test]
    fn test_type_filter_base_and_multi_type() {
        let cards = catalog();
        let filtered = filter_cards(&cards, &FilterState::new().with_type("water"));
        assert_eq!(ids(&filtered), vec!["a1-053", "dual-1"]);
    }

    #[test]
    fn test_type_filter_trainer_subtypes() {
        let cards = catalog();

        let supporters = filter_cards(&cards, &FilterState::new().with_type("supporter"));
        assert_eq!(ids(&supporters), vec!["a1-219"]);

        let tools = filter_cards(&cards, &FilterState::new().with_type("tool"));
        assert_eq!(ids(&tools), vec!["a2-147"]);

        // "trainer" itself is not a subtype key
        let trainers = filter_cards(&cards, &FilterState::new().with_type("trainer"));
        assert!(trainers.is_empty());
    }

    #[test]
    fn test_fossils_count_as_items() {
        let cards = catalog();

        let items = filter_cards(&cards, &FilterState::new().with_type("item"));
        assert_eq!(ids(&items), vec!["p-a-001", "a1-216"]);

        let fossils = filter_cards(&cards, &FilterState::new().with_type("fossil"));
        assert_eq!(ids(&fossils), vec!["a1-216"]);
    }

    #[test]
    fn test_criteria_are_anded() {
        let cards = catalog();
        let state = FilterState::new()
            .with_type("fire")
            .with_rarity("◊")
            .with_pack("Charizard");
        assert_eq!(ids(&filter_cards(&cards, &state)), vec!["a1-033"]);
    }

    #[test]
    fn test_category_and_hp_range() {
        let cards = catalog();

        let pokemon = filter_cards(&cards, &FilterState::new().with_category(CardCategory::Pokemon));
        assert_eq!(pokemon.len(), 4);

        let energy = filter_cards(&cards, &FilterState::new().with_category(CardCategory::Energy));
        assert_eq!(ids(&energy), vec!["e-1"]);

        let big = filter_cards(&cards, &FilterState::new().with_hp_range(100, 200));
        assert_eq!(ids(&big), vec!["a1-036", "dual-1"]);
    }

    #[test]
    fn test_custom_classifier() {
        let cards = vec![Card::new("x", "Pokémon Center Lady", "trainer")];
        let state = FilterState::new().with_type("supporter");
        assert!(filter_cards(&cards, &state).is_empty());

        let classifier = Classifier::new()
            .with_pattern(TrainerSubtype::Supporter, NamePattern::suffix("lady"));
        assert_eq!(filter_cards_with(&cards, &state, &classifier).len(), 1);
    }

    #[test]
    fn test_toggle_and_counts() {
        let mut state = FilterState::new();
        assert!(!state.has_active_filters());

        state.toggle_type("Fire");
        state.toggle_pack("Pikachu");
        state.search_text = "pi".to_string();
        assert_eq!(state.active_filter_count(), 3);
        assert!(state.selected_types.contains("fire"));

        state.toggle_type("fire");
        assert_eq!(state.active_filter_count(), 2);

        state.sort_key = SortKey::Health;
        state.clear();
        assert!(!state.has_active_filters());
        assert_eq!(state.sort_key, SortKey::Health);
    }
}
