//! Ordered trainer classification tables.
//!
//! Each `SubtypeRule` pairs a subtype with the name patterns that select
//! it. Rules are evaluated in slice order and the first match wins, so
//! the order of `STANDARD_RULES` is part of the behaviour: a "Crystal
//! ..." card is a Tool before the roster can call it a Supporter.

use std::borrow::Cow;

use super::pattern::{contains, exact, prefix, suffix, NamePattern};
use super::TrainerSubtype;

/// A subtype and the patterns that select it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubtypeRule {
    /// Subtype assigned on match.
    pub subtype: TrainerSubtype,
    /// Any one of these patterns selects the subtype.
    pub patterns: Cow<'static, [NamePattern]>,
}

impl SubtypeRule {
    /// Create a rule from owned patterns.
    pub fn new(subtype: TrainerSubtype, patterns: impl IntoIterator<Item = NamePattern>) -> Self {
        Self {
            subtype,
            patterns: Cow::Owned(patterns.into_iter().collect()),
        }
    }

    /// Does any pattern match the normalized name?
    #[must_use]
    pub fn matches(&self, normalized: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(normalized))
    }

    /// Append a pattern to this rule.
    pub fn push(&mut self, pattern: NamePattern) {
        self.patterns.to_mut().push(pattern);
    }
}

/// Fossils are a closed set of exact names.
pub const FOSSIL_PATTERNS: &[NamePattern] = &[
    exact("helix fossil"),
    exact("dome fossil"),
    exact("old amber"),
];

/// Held items that stay attached to a Pokémon.
pub const TOOL_PATTERNS: &[NamePattern] = &[
    suffix("tool"),
    // equipment
    prefix("rocky helmet"),
    prefix("muscle band"),
    prefix("leftovers"),
    prefix("float stone"),
    prefix("choice band"),
    prefix("focus sash"),
    prefix("weakness policy"),
    prefix("air balloon"),
    // worn or held
    suffix("berry"),
    suffix("cape"),
    suffix("band"),
    suffix("barb"),
    suffix("cord"),
    suffix("stone"),
    prefix("protective"),
    prefix("defense"),
    prefix("shield"),
    // energy attachments
    prefix("energy"),
    prefix("double colorless energy"),
    prefix("rainbow energy"),
    prefix("lucky"),
    prefix("amulet"),
    prefix("charm"),
    prefix("crystal"),
    prefix("scope"),
    prefix("specs"),
    prefix("goggles"),
];

/// One-shot items.
pub const ITEM_PATTERNS: &[NamePattern] = &[
    suffix("potion"),
    suffix("ball"),
    prefix("x "),
    prefix("switch"),
    prefix("rope"),
    suffix("candy"),
];

/// People, roles and teams.
pub const SUPPORTER_PATTERNS: &[NamePattern] = &[
    // honorifics and titles
    prefix("professor"),
    prefix("dr."),
    prefix("mr."),
    prefix("ms."),
    prefix("mrs."),
    prefix("captain"),
    prefix("gym leader"),
    prefix("elite"),
    // team roles
    suffix("grunt"),
    suffix("admin"),
    suffix("boss"),
    suffix("leader"),
    // possessives
    suffix("'s advice"),
    suffix("'s training"),
    suffix("'s encouragement"),
    suffix("'s help"),
    suffix("'s research"),
    suffix("'s orders"),
    suffix("'s conviction"),
    suffix("'s dedication"),
    suffix("'s determination"),
    suffix("'s resolve"),
    suffix("research"),
    suffix("analysis"),
    suffix("theory"),
    // roster
    exact("erika"),
    exact("misty"),
    exact("blaine"),
    exact("koga"),
    exact("giovanni"),
    exact("brock"),
    exact("lt. surge"),
    exact("sabrina"),
    exact("bill"),
    exact("oak"),
    exact("red"),
    exact("blue"),
    exact("green"),
    exact("yellow"),
    exact("gold"),
    exact("silver"),
    exact("crystal"),
    exact("ruby"),
    exact("sapphire"),
    exact("cynthia"),
    exact("lance"),
    exact("steven"),
    exact("wallace"),
    exact("diantha"),
    exact("iris"),
    exact("alder"),
    // teams
    prefix("team"),
    contains("rocket"),
    contains("aqua"),
    contains("magma"),
    contains("galactic"),
    contains("plasma"),
    contains("flare"),
];

/// Standard evaluation order: Fossil, Tool, Item, Supporter.
pub const STANDARD_RULES: [SubtypeRule; 4] = [
    SubtypeRule {
        subtype: TrainerSubtype::Fossil,
        patterns: Cow::Borrowed(FOSSIL_PATTERNS),
    },
    SubtypeRule {
        subtype: TrainerSubtype::Tool,
        patterns: Cow::Borrowed(TOOL_PATTERNS),
    },
    SubtypeRule {
        subtype: TrainerSubtype::Item,
        patterns: Cow::Borrowed(ITEM_PATTERNS),
    },
    SubtypeRule {
        subtype: TrainerSubtype::Supporter,
        patterns: Cow::Borrowed(SUPPORTER_PATTERNS),
    },
];

/// Words that mark a short trainer name as a person.
pub const PERSON_INDICATORS: &[&str] =
    &["grunt", "admin", "boss", "leader", "trainer", "champion", "rival"];

/// Apply `rules` in order, then the short-name fallback.
///
/// `name` is the display name as printed; rule patterns see the
/// normalized form, the fallback also looks at capitalization.
pub(crate) fn evaluate<S: AsRef<str>>(
    rules: &[SubtypeRule],
    person_indicators: &[S],
    name: &str,
) -> TrainerSubtype {
    let normalized = super::pattern::normalize(name);

    if let Some(rule) = rules.iter().find(|r| r.matches(&normalized)) {
        return rule.subtype;
    }

    if looks_like_person(name, &normalized, person_indicators) {
        TrainerSubtype::Supporter
    } else {
        TrainerSubtype::Item
    }
}

/// Short capitalized names that mention a role, or a lone proper noun.
fn looks_like_person<S: AsRef<str>>(name: &str, normalized: &str, indicators: &[S]) -> bool {
    let words: Vec<&str> = name.split_whitespace().collect();
    let Some(first) = words.first() else {
        return false;
    };

    if words.len() > 3 || !first.chars().next().is_some_and(char::is_uppercase) {
        return false;
    }

    if indicators.iter().any(|w| {
        let w: &str = w.as_ref();
        normalized.contains(w)
    }) {
        return true;
    }

    words.len() == 1 && is_proper_noun(first)
}

/// `^[A-Z][a-z]+$`
fn is_proper_noun(word: &str) -> bool {
    let mut chars = word.chars();
    chars.next().is_some_and(|c| c.is_ascii_uppercase())
        && word.len() > 1
        && chars.all(|c| c.is_ascii_lowercase())
}
