//! Catalog browsing: filtering, sorting and filter options.
//!
//! ## Key Types
//!
//! - `FilterState`: Search text, multi-select criteria and sort choice
//! - `FilterOptions`: The types, rarities and packs offered to the user
//! - `SortKey` / `SortOrder`: Stable ordering of a filtered list
//!
//! Everything here is a pure query over borrowed cards. Results borrow
//! from the catalog and preserve catalog order until sorted.

pub mod filter;
pub mod options;
pub mod sort;

pub use filter::{filter_cards, filter_cards_with, CardCategory, FilterState};
pub use options::{FilterOptions, KNOWN_PACKS, TRAINER_TYPE_OPTIONS};
pub use sort::{compare, rarity_rank, sort_cards, SortKey, SortOrder};

use crate::cards::Card;
use crate::taxonomy::Classifier;

/// Filter then sort, as the card browser shows the catalog.
///
/// ```
/// use pocket_deckbuilder::browse::{browse, FilterState, SortKey, SortOrder};
/// use pocket_deckbuilder::cards::Card;
///
/// let cards = vec![
///     Card::new("1", "Squirtle", "water").with_health(60),
///     Card::new("2", "Charmander", "fire").with_health(60),
///     Card::new("3", "Blastoise ex", "water").with_health(180),
/// ];
///
/// let state = FilterState::new()
///     .with_type("water")
///     .with_sort(SortKey::Health, SortOrder::Ascending);
///
/// let shown: Vec<_> = browse(&cards, &state).iter().map(|c| c.name.as_str()).collect();
/// assert_eq!(shown, ["Blastoise ex", "Squirtle"]);
/// ```
#[must_use]
pub fn browse<'a>(cards: &'a [Card], state: &FilterState) -> Vec<&'a Card> {
    browse_with(cards, state, &Classifier::default())
}

/// Filter then sort under a custom classifier.
#[must_use]
pub fn browse_with<'a>(
    cards: &'a [Card],
    state: &FilterState,
    classifier: &Classifier,
) -> Vec<&'a Card> {
    let filtered = filter_cards_with(cards, state, classifier);
    sort_cards(&filtered, state.sort_key, state.sort_order)
}
