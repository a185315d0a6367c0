//! Deck builder configuration.
//!
//! Applications configure the builder at startup by providing:
//! - `DeckRules`: Deck size and copy limits
//! - `StapleCard`: Alias table for the default staples
//! - `DeckBuilderConfig`: Combines all configuration
//!
//! Every field has a default, so a config document only needs to name
//! what it changes.

use serde::{Deserialize, Serialize};

use crate::browse::KNOWN_PACKS;

/// Default deck size limit.
pub const MAX_DECK_SIZE: u32 = 20;

/// Default copies allowed of a single card.
pub const MAX_COPIES_PER_CARD: u8 = 2;

/// Storage key of the saved-deck collection.
pub const DEFAULT_STORAGE_KEY: &str = "pocketDecks";

/// Name given to a fresh deck.
pub const DEFAULT_DECK_NAME: &str = "My Pocket Deck";

/// Deck construction limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeckRules {
    /// Maximum total cards in a deck.
    pub max_deck_size: u32,
    /// Maximum copies of any one card.
    pub max_copies_per_card: u8,
}

impl Default for DeckRules {
    fn default() -> Self {
        Self {
            max_deck_size: MAX_DECK_SIZE,
            max_copies_per_card: MAX_COPIES_PER_CARD,
        }
    }
}

impl DeckRules {
    /// Create rules with explicit limits.
    #[must_use]
    pub const fn new(max_deck_size: u32, max_copies_per_card: u8) -> Self {
        Self {
            max_deck_size,
            max_copies_per_card,
        }
    }

    /// Set the deck size limit (builder pattern).
    #[must_use]
    pub fn with_max_deck_size(mut self, max: u32) -> Self {
        self.max_deck_size = max;
        self
    }

    /// Set the copy limit (builder pattern).
    #[must_use]
    pub fn with_max_copies(mut self, max: u8) -> Self {
        self.max_copies_per_card = max;
        self
    }
}

/// A staple card and the catalog spellings it may appear under.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StapleCard {
    /// Name used in diagnostics.
    pub label: String,
    /// Accepted names, tried in order.
    pub aliases: Vec<String>,
}

impl StapleCard {
    /// Create a staple from a label and its aliases.
    pub fn new<I, S>(label: impl Into<String>, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            label: label.into(),
            aliases: aliases.into_iter().map(Into::into).collect(),
        }
    }

    /// The staples seeded by `add_default_cards`: the basic draw
    /// supporter and the basic search item.
    #[must_use]
    pub fn defaults() -> Vec<StapleCard> {
        vec![
            Self::new(
                "Professor's Research",
                [
                    "Professor's Research",
                    "Professors Research",
                    "Professor\u{2019}s Research",
                    "Professor Research",
                ],
            ),
            Self::new("Poké Ball", ["Poké Ball", "Poke Ball", "Pokeball", "Pokéball"]),
        ]
    }
}

/// Complete deck builder configuration.
///
/// ```
/// use pocket_deckbuilder::config::DeckBuilderConfig;
///
/// let config = DeckBuilderConfig::from_json_str(r#"{ "rules": { "maxDeckSize": 30 } }"#).unwrap();
/// assert_eq!(config.rules.max_deck_size, 30);
/// assert_eq!(config.rules.max_copies_per_card, 2);
/// assert_eq!(config.storage_key, "pocketDecks");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeckBuilderConfig {
    /// Construction limits.
    pub rules: DeckRules,
    /// Key the saved-deck collection is stored under.
    pub storage_key: String,
    /// Name given to a fresh deck.
    pub default_deck_name: String,
    /// Staples seeded by `add_default_cards`.
    pub staples: Vec<StapleCard>,
    /// Pack allow-list, in display order.
    pub known_packs: Vec<String>,
}

impl Default for DeckBuilderConfig {
    fn default() -> Self {
        Self {
            rules: DeckRules::default(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            default_deck_name: DEFAULT_DECK_NAME.to_string(),
            staples: StapleCard::defaults(),
            known_packs: KNOWN_PACKS.iter().map(|p| (*p).to_string()).collect(),
        }
    }
}

impl DeckBuilderConfig {
    /// Create a config with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON config document; absent fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Set the construction limits (builder pattern).
    #[must_use]
    pub fn with_rules(mut self, rules: DeckRules) -> Self {
        self.rules = rules;
        self
    }

    /// Set the storage key (builder pattern).
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set the staple table (builder pattern).
    #[must_use]
    pub fn with_staples(mut self, staples: Vec<StapleCard>) -> Self {
        self.staples = staples;
        self
    }

    /// Set the pack allow-list (builder pattern).
    #[must_use]
    pub fn with_known_packs<I, S>(mut self, packs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known_packs = packs.into_iter().map(Into::into).collect();
        self
    }
}
