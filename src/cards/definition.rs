//! Card definitions - immutable catalog data.
//!
//! A `Card` is loaded once from the catalog and never mutated by the
//! engine. Derived data (such as the trainer subtype) is computed on
//! demand rather than stored, so it always reflects the current name
//! and type.

use serde::{Deserialize, Deserializer, Serialize};
use smallvec::SmallVec;

use crate::taxonomy::{self, Subtype};

/// Declared type shared by every trainer card.
pub const TRAINER_TYPE: &str = "trainer";

/// Declared type of energy cards.
pub const ENERGY_TYPE: &str = "energy";

/// Opaque identity of a catalog card.
///
/// Wrapping the raw string keeps ids from being compared against names,
/// packs or other string fields by accident.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Create a new card ID.
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

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CardId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A catalog card.
///
/// Field names follow the upstream catalog JSON (`type`, `health`, ...).
/// Missing text fields deserialize as empty strings.
///
/// ## Example
///
/// ```
/// use pocket_deckbuilder::cards::Card;
///
/// let pikachu = Card::new("a1-094", "Pikachu", "lightning")
///     .with_rarity("◊")
///     .with_pack("Pikachu")
///     .with_health(60);
///
/// assert_eq!(pikachu.health_or_zero(), 60);
/// assert_eq!(pikachu.subtype().to_string(), "Lightning");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Unique identifier for this card.
    pub id: CardId,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Declared base type ("fire", "trainer", ...).
    #[serde(rename = "type", default)]
    pub card_type: String,

    /// All types of a multi-type card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<SmallVec<[String; 2]>>,

    /// Rarity symbol ("◊◊", "☆", ...).
    #[serde(default)]
    pub rarity: String,

    /// Booster pack the card comes from.
    #[serde(default)]
    pub pack: String,

    /// Hit points, if the card has any.
    #[serde(
        default,
        deserialize_with = "deserialize_health",
        skip_serializing_if = "Option::is_none"
    )]
    pub health: Option<u32>,

    /// Image reference, opaque to the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Card {
    /// Create a card with the required fields.
    #[must_use]
    pub fn new(id: impl Into<CardId>, name: impl Into<String>, card_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            card_type: card_type.into(),
            types: None,
            rarity: String::new(),
            pack: String::new(),
            health: None,
            image: None,
        }
    }

    /// Set the rarity (builder pattern).
    #[must_use]
    pub fn with_rarity(mut self, rarity: impl Into<String>) -> Self {
        self.rarity = rarity.into();
        self
    }

    /// Set the pack (builder pattern).
    #[must_use]
    pub fn with_pack(mut self, pack: impl Into<String>) -> Self {
        self.pack = pack.into();
        self
    }

    /// Set hit points (builder pattern).
    #[must_use]
    pub fn with_health(mut self, health: u32) -> Self {
        self.health = Some(health);
        self
    }

    /// Set the multi-type list (builder pattern).
    #[must_use]
    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    /// Set the image reference (builder pattern).
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Is this a trainer card?
    #[must_use]
    pub fn is_trainer(&self) -> bool {
        taxonomy::is_trainer_type(&self.card_type)
    }

    /// Is this an energy card?
    #[must_use]
    pub fn is_energy(&self) -> bool {
        self.card_type.trim().eq_ignore_ascii_case(ENERGY_TYPE)
    }

    /// Hit points, with missing values treated as zero.
    #[must_use]
    pub fn health_or_zero(&self) -> u32 {
        self.health.unwrap_or(0)
    }

    /// The multi-type list, empty for single-type cards.
    #[must_use]
    pub fn type_list(&self) -> &[String] {
        self.types.as_deref().unwrap_or(&[])
    }

    /// Display subtype, computed from the current type and name.
    #[must_use]
    pub fn subtype(&self) -> Subtype {
        taxonomy::classify(&self.card_type, &self.name)
    }
}

/// Accept `70`, `"70"`, `""` or `null` for hit points.
///
/// The upstream catalog ships health as a string; anything that does not
/// parse as a number is treated as missing.
fn deserialize_health<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawHealth {
        Number(u32),
        Text(String),
    }

    Ok(match Option::<RawHealth>::deserialize(deserializer)? {
        Some(RawHealth::Number(n)) => Some(n),
        Some(RawHealth::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}
