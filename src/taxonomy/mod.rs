//! Card taxonomy: refined display subtypes for catalog cards.
//!
//! The catalog only says a card is a "trainer". Deck building needs the
//! finer split the game uses (Fossil, Tool, Item, Supporter), which is
//! inferred from the card name by ordered pattern tables.
//!
//! ## Key Types
//!
//! - `TrainerSubtype`: The four trainer categories
//! - `Subtype`: Trainer subtype or capitalized base type
//! - `NamePattern` / `SubtypeRule`: Pattern tables, kept as data
//! - `Classifier`: Evaluator over a (possibly extended) rule set
//!
//! `classify` never fails. Unknown or empty input lands in the default
//! bucket (`Item` for trainers, the capitalized type otherwise).

pub mod pattern;
pub mod rules;

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::cards::TRAINER_TYPE;

pub use pattern::NamePattern;
pub use rules::{SubtypeRule, PERSON_INDICATORS, STANDARD_RULES};

/// Trainer card category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainerSubtype {
    /// Restorable fossil.
    Fossil,
    /// Attached held item.
    Tool,
    /// One-shot item.
    Item,
    /// Character card, one per turn.
    Supporter,
}

impl TrainerSubtype {
    /// All subtypes in classification priority order.
    pub const ALL: [TrainerSubtype; 4] = [Self::Fossil, Self::Tool, Self::Item, Self::Supporter];

    /// Display name ("Fossil").
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fossil => "Fossil",
            Self::Tool => "Tool",
            Self::Item => "Item",
            Self::Supporter => "Supporter",
        }
    }

    /// Lowercase filter key ("fossil").
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Fossil => "fossil",
            Self::Tool => "tool",
            Self::Item => "item",
            Self::Supporter => "supporter",
        }
    }
}

/// Display subtype of a card.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Subtype {
    /// A trainer card's inferred category.
    Trainer(TrainerSubtype),
    /// Any other card: its base type, capitalized ("Fire").
    Base(String),
}

impl Subtype {
    /// Lowercase key used by type filters.
    #[must_use]
    pub fn key(&self) -> Cow<'static, str> {
        match self {
            Self::Trainer(t) => Cow::Borrowed(t.key()),
            Self::Base(s) => Cow::Owned(s.to_lowercase()),
        }
    }

    /// The trainer category, if this is a trainer subtype.
    #[must_use]
    pub fn trainer(&self) -> Option<TrainerSubtype> {
        match self {
            Self::Trainer(t) => Some(*t),
            Self::Base(_) => None,
        }
    }
}

impl From<TrainerSubtype> for Subtype {
    fn from(t: TrainerSubtype) -> Self {
        Self::Trainer(t)
    }
}

impl PartialEq<TrainerSubtype> for Subtype {
    fn eq(&self, other: &TrainerSubtype) -> bool {
        self.trainer() == Some(*other)
    }
}

impl std::fmt::Display for Subtype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trainer(t) => f.write_str(t.name()),
            Self::Base(s) => f.write_str(s),
        }
    }
}

/// Classify a card by declared type and name with the standard tables.
///
/// ```
/// use pocket_deckbuilder::taxonomy::{classify, TrainerSubtype};
///
/// assert_eq!(classify("trainer", "Old Amber"), TrainerSubtype::Fossil);
/// assert_eq!(classify("trainer", "Rocky Helmet"), TrainerSubtype::Tool);
/// assert_eq!(classify("fire", "Charmander").to_string(), "Fire");
/// ```
#[must_use]
pub fn classify(card_type: &str, name: &str) -> Subtype {
    if is_trainer_type(card_type) {
        Subtype::Trainer(rules::evaluate(&STANDARD_RULES, PERSON_INDICATORS, name))
    } else {
        Subtype::Base(capitalize(card_type))
    }
}

/// Classifier over an extensible rule set.
///
/// `Classifier::default()` uses `STANDARD_RULES`; extra patterns can be
/// appended to a subtype's rule, or whole rules pushed after the
/// standard ones.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classifier {
    rules: Vec<SubtypeRule>,
    person_indicators: Vec<Cow<'static, str>>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            rules: STANDARD_RULES.to_vec(),
            person_indicators: PERSON_INDICATORS.iter().map(|&w| Cow::Borrowed(w)).collect(),
        }
    }
}

impl Classifier {
    /// Classifier with the standard tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifier with custom rules and person indicators.
    #[must_use]
    pub fn with_rules(rules: Vec<SubtypeRule>, person_indicators: Vec<String>) -> Self {
        Self {
            rules,
            person_indicators: person_indicators.into_iter().map(Cow::Owned).collect(),
        }
    }

    /// Append a pattern to the first rule for `subtype` (builder pattern).
    ///
    /// If there is no rule for that subtype, a new one is added last.
    #[must_use]
    pub fn with_pattern(mut self, subtype: TrainerSubtype, pattern: NamePattern) -> Self {
        match self.rules.iter_mut().find(|r| r.subtype == subtype) {
            Some(rule) => rule.push(pattern),
            None => self.rules.push(SubtypeRule::new(subtype, [pattern])),
        }
        self
    }

    /// Append a whole rule after the existing ones (builder pattern).
    #[must_use]
    pub fn with_rule(mut self, rule: SubtypeRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[SubtypeRule] {
        &self.rules
    }

    /// Classify a card by declared type and name.
    #[must_use]
    pub fn classify(&self, card_type: &str, name: &str) -> Subtype {
        if is_trainer_type(card_type) {
            Subtype::Trainer(self.classify_trainer(name))
        } else {
            Subtype::Base(capitalize(card_type))
        }
    }

    /// Classify a name known to belong to a trainer card.
    #[must_use]
    pub fn classify_trainer(&self, name: &str) -> TrainerSubtype {
        rules::evaluate(&self.rules, &self.person_indicators, name)
    }
}

/// Declared type names a trainer, ignoring case and surrounding space.
pub(crate) fn is_trainer_type(card_type: &str) -> bool {
    card_type.trim().eq_ignore_ascii_case(TRAINER_TYPE)
}

/// "fIRE" -> "Fire".
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
