//! Card ordering.
//!
//! All sorts are stable: cards that compare equal keep their filtered
//! (catalog) order. `Descending` reverses the comparator rather than the
//! output, so ties stay in catalog order in both directions.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::cards::Card;

/// Sort key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Name, ignoring accents and case first.
    #[default]
    Name,
    /// Raw declared type (not the trainer subtype).
    Type,
    /// Hit points, highest first; missing counts as 0.
    Health,
    /// Raw rarity symbol, compared as a plain string.
    Rarity,
    /// Rarity by game rank (◊ < ◊◊ < ... < ☆ < ... < ♕).
    RarityRank,
    /// Pack name.
    Pack,
}

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Natural order of the key.
    #[default]
    Ascending,
    /// Reverse of the natural order.
    Descending,
}

impl SortOrder {
    /// The other direction.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Compare two cards by `key` in its natural order.
#[must_use]
pub fn compare(a: &Card, b: &Card, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => text_cmp(&a.name, &b.name),
        SortKey::Type => text_cmp(&a.card_type, &b.card_type),
        SortKey::Health => b.health_or_zero().cmp(&a.health_or_zero()),
        SortKey::Rarity => a.rarity.cmp(&b.rarity),
        SortKey::RarityRank => rarity_rank(&a.rarity).cmp(&rarity_rank(&b.rarity)),
        SortKey::Pack => text_cmp(&a.pack, &b.pack),
    }
}

/// Sorted copy of `cards`; the input is left untouched.
///
/// ```
/// use pocket_deckbuilder::browse::{sort_cards, SortKey, SortOrder};
/// use pocket_deckbuilder::cards::Card;
///
/// let a = Card::new("1", "Squirtle", "water").with_health(60);
/// let b = Card::new("2", "Blastoise ex", "water").with_health(180);
/// let cards = vec![&a, &b];
///
/// let sorted = sort_cards(&cards, SortKey::Health, SortOrder::Ascending);
/// assert_eq!(sorted[0].name, "Blastoise ex");
/// assert_eq!(cards[0].name, "Squirtle");
/// ```
#[must_use]
pub fn sort_cards<'a>(cards: &[&'a Card], key: SortKey, order: SortOrder) -> Vec<&'a Card> {
    let mut sorted = cards.to_vec();
    // slice::sort_by is stable
    sorted.sort_by(|a, b| {
        let ord = compare(a, b, key);
        match order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    });
    sorted
}

/// Rank of a rarity symbol; unknown symbols rank 0.
///
/// Filled (★) and outlined (☆) stars rank the same.
#[must_use]
pub fn rarity_rank(rarity: &str) -> u8 {
    match rarity.trim() {
        "◊" => 1,
        "◊◊" => 2,
        "◊◊◊" => 3,
        "◊◊◊◊" => 4,
        "☆" | "★" => 5,
        "☆☆" | "★★" => 6,
        "☆☆☆" | "★★★" => 7,
        "♕" => 8,
        _ => 0,
    }
}

/// Accent- and case-insensitive comparison ("Électrode" before "Zubat"),
/// then case-insensitive, then raw so the order is total.
fn text_cmp(a: &str, b: &str) -> Ordering {
    folded(a)
        .cmp(folded(b))
        .then_with(|| lowered(a).cmp(lowered(b)))
        .then_with(|| a.cmp(b))
}

/// Base letters only: decomposed, combining marks dropped, lowercased.
fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().filter(|c| !is_combining_mark(*c)).flat_map(char::to_lowercase)
}

fn lowered(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}
