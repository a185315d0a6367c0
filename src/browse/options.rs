//! Filter options offered to the user, derived from the catalog.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::config::DeckBuilderConfig;
use crate::taxonomy::TrainerSubtype;

/// Known booster packs in release order.
pub const KNOWN_PACKS: &[&str] = &[
    "Charizard",
    "Mewtwo",
    "Pikachu",
    "Mythical Island",
    "Apex",
    "Mythical",
    "Celestial",
    "Eevee Grove",
    "Dialga",
    "Palkia",
    "Triumphant Light",
    "Shining Revelry",
    "Solgaleo",
    "Lunala",
    "Extradimensional Crisis",
];

/// Trainer subtype keys offered in place of "trainer".
///
/// Fossil is not offered on its own; fossils are reachable through
/// "item".
pub const TRAINER_TYPE_OPTIONS: [TrainerSubtype; 3] =
    [TrainerSubtype::Item, TrainerSubtype::Supporter, TrainerSubtype::Tool];

/// Values the user can pick from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    /// Lowercase type keys: base types sorted, then trainer subtypes.
    pub types: Vec<String>,
    /// Distinct rarities, sorted.
    pub rarities: Vec<String>,
    /// Packs present in the catalog, in allow-list order.
    pub packs: Vec<String>,
    /// Highest hit points in the catalog.
    pub max_hp: u32,
}

impl FilterOptions {
    /// Derive options using the default pack allow-list.
    #[must_use]
    pub fn from_cards(cards: &[Card]) -> Self {
        Self::from_cards_with_packs(cards, KNOWN_PACKS)
    }

    /// Derive options using the pack allow-list of `config`.
    #[must_use]
    pub fn from_config(cards: &[Card], config: &DeckBuilderConfig) -> Self {
        Self::from_cards_with_packs(cards, config.known_packs.as_slice())
    }

    /// Derive options using a custom pack allow-list.
    #[must_use]
    pub fn from_cards_with_packs<S: AsRef<str>>(cards: &[Card], known_packs: &[S]) -> Self {
        let mut types = BTreeSet::new();
        let mut rarities = BTreeSet::new();
        let mut present_packs = BTreeSet::new();
        let mut has_trainer = false;
        let mut max_hp = 0;

        for card in cards {
            if card.is_trainer() {
                has_trainer = true;
            } else if !card.card_type.is_empty() {
                types.insert(card.card_type.to_lowercase());
            } else {
                types.extend(card.type_list().iter().map(|t| t.to_lowercase()));
            }

            if !card.rarity.is_empty() {
                rarities.insert(card.rarity.as_str());
            }
            if !card.pack.is_empty() {
                present_packs.insert(card.pack.as_str());
            }
            max_hp = max_hp.max(card.health_or_zero());
        }

        let mut types: Vec<String> = types.into_iter().collect();
        if has_trainer {
            types.extend(TRAINER_TYPE_OPTIONS.iter().map(|t| t.key().to_string()));
        }

        let packs = known_packs
            .iter()
            .filter_map(|p| {
                let p: &str = p.as_ref();
                present_packs.contains(p).then(|| p.to_string())
            })
            .collect();

        Self {
            types,
            rarities: rarities.into_iter().map(str::to_string).collect(),
            packs,
            max_hp,
        }
    }
}
