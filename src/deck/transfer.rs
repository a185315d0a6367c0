//! Deck import and export.
//!
//! Three formats are supported:
//! - Plain text: a `Deck Name:` / `Total Cards:` header, then one
//!   `2x Card Name` line per entry
//! - JSON: `{ name, format, totalCards, cards: [{ id, name, count, type, pack }] }`
//! - Share code: base64 of the compact JSON `{ n, c: [{ i, c }] }`
//!
//! Imports resolve cards against a `Catalog` and clamp counts to the
//! copy limit. They do not enforce the deck size; feed the result to
//! `DeckBuilder::apply_import`, which does.

use std::sync::LazyLock;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId, Catalog};
use crate::config::DeckRules;
use crate::error::ImportError;

use super::{Deck, DeckEntry};

/// Format tag written into JSON exports.
pub const JSON_FORMAT: &str = "pocket";

const NAME_HEADER: &str = "Deck Name:";
const TOTAL_HEADER: &str = "Total Cards:";

/// "2x Card Name" or "2 Card Name".
static LEADING_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+)x?\s+(.+)$").expect("valid leading count pattern"));

/// "Card Name x2".
static TRAILING_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(.+?)\s*x\s*(\d+)$").expect("valid trailing count pattern"));

/// Cards recovered from an import, plus what could not be used.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportedDeck {
    /// Deck name carried by the input, if any.
    pub name: Option<String>,
    /// Resolved entries, duplicates merged, counts within the copy limit.
    pub entries: Vec<DeckEntry>,
    /// Lines or items that were skipped, in input order.
    pub warnings: Vec<String>,
}

/// Accumulates resolved cards, merging repeats.
struct Collector {
    deck: ImportedDeck,
    max_copies: u8,
}

impl Collector {
    fn new(max_copies: u8) -> Self {
        Self {
            deck: ImportedDeck::default(),
            max_copies,
        }
    }

    fn add(&mut self, card: &Card, count: u8) {
        let count = count.min(self.max_copies);
        match self.deck.entries.iter_mut().find(|e| e.card.id == card.id) {
            Some(entry) => entry.count = entry.count.saturating_add(count).min(self.max_copies),
            None if count > 0 => self.deck.entries.push(DeckEntry::new(card.clone(), count)),
            None => {}
        }
    }

    fn warn(&mut self, message: String) {
        self.deck.warnings.push(message);
    }

    fn finish(self) -> Result<ImportedDeck, ImportError> {
        if self.deck.entries.is_empty() {
            return Err(ImportError::NoValidCards {
                warnings: self.deck.warnings,
            });
        }
        Ok(self.deck)
    }
}

/// Render `deck` as text; an empty deck renders as "".
///
/// ```
/// use pocket_deckbuilder::cards::Card;
/// use pocket_deckbuilder::deck::{export_text, DeckBuilder};
///
/// let mut builder = DeckBuilder::new();
/// builder.set_name("Sparks");
/// let pikachu = Card::new("a1-094", "Pikachu", "lightning");
/// builder.add_card(&pikachu);
/// builder.add_card(&pikachu);
///
/// assert_eq!(
///     export_text(builder.deck()),
///     "Deck Name: Sparks\nTotal Cards: 2\n\n2x Pikachu"
/// );
/// ```
#[must_use]
pub fn export_text(deck: &Deck) -> String {
    if deck.is_empty() {
        return String::new();
    }

    let mut lines = vec![
        format!("{NAME_HEADER} {}", deck.name()),
        format!("{TOTAL_HEADER} {}", deck.total_cards()),
        String::new(),
    ];
    lines.extend(deck.entries().iter().map(|e| format!("{}x {}", e.count, e.card.name)));
    lines.join("\n")
}

/// Parse a text deck list.
///
/// Accepted card lines: `2x Name`, `2 Name`, `Name x2` and a bare
/// `Name` (one copy). Names match case-insensitively. Header lines are
/// only recognised before the first card line.
pub fn import_text(text: &str, catalog: &Catalog, rules: DeckRules) -> Result<ImportedDeck, ImportError> {
    let max = rules.max_copies_per_card;
    let mut collector = Collector::new(max);
    let mut in_header = true;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if in_header {
            if let Some(name) = line.strip_prefix(NAME_HEADER) {
                let name = name.trim();
                if !name.is_empty() {
                    collector.deck.name = Some(name.to_string());
                }
                continue;
            }
            if line.starts_with(TOTAL_HEADER) {
                continue;
            }
        }
        in_header = false;

        let (name, count) = parse_card_line(line);
        let Some(count) = count.filter(|c| (1..=u32::from(max)).contains(c)) else {
            collector.warn(format!("Invalid count for \"{name}\": {}", describe_count(count)));
            continue;
        };

        match catalog.find_by_name(name) {
            Some(card) => collector.add(card, u8::try_from(count).unwrap_or(max)),
            None => collector.warn(format!("Card not found: \"{name}\"")),
        }
    }

    collector.finish()
}

/// Split a card line into name and count.
///
/// A bare name counts as one copy. `None` means the count did not fit
/// in a `u32`.
fn parse_card_line(line: &str) -> (&str, Option<u32>) {
    if let Some(caps) = LEADING_COUNT.captures(line) {
        if let (Some(count), Some(name)) = (caps.get(1), caps.get(2)) {
            return (name.as_str().trim(), count.as_str().parse().ok());
        }
    }
    if let Some(caps) = TRAILING_COUNT.captures(line) {
        if let (Some(name), Some(count)) = (caps.get(1), caps.get(2)) {
            return (name.as_str().trim(), count.as_str().parse().ok());
        }
    }
    (line, Some(1))
}

fn describe_count(count: Option<u32>) -> String {
    count.map_or_else(|| "out of range".to_string(), |c| c.to_string())
}

/// JSON deck document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckDocument {
    /// Deck name.
    #[serde(default)]
    pub name: String,
    /// Format tag, `"pocket"` on export.
    #[serde(default)]
    pub format: String,
    /// Sum of counts at export time; informational.
    #[serde(default)]
    pub total_cards: u32,
    /// Card list. Required on import.
    #[serde(default)]
    pub cards: Option<Vec<DocumentCard>>,
}

/// One card in a JSON deck document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentCard {
    /// Catalog id.
    #[serde(default)]
    pub id: String,
    /// Card name, used when the id does not resolve.
    #[serde(default)]
    pub name: String,
    /// Copies; 0 or missing means one.
    #[serde(default)]
    pub count: u32,
    /// Raw card type.
    #[serde(rename = "type", default)]
    pub card_type: String,
    /// Pack name.
    #[serde(default)]
    pub pack: String,
}

impl From<&Deck> for DeckDocument {
    fn from(deck: &Deck) -> Self {
        Self {
            name: deck.name().to_string(),
            format: JSON_FORMAT.to_string(),
            total_cards: deck.total_cards(),
            cards: Some(
                deck.entries()
                    .iter()
                    .map(|e| DocumentCard {
                        id: e.card.id.as_str().to_string(),
                        name: e.card.name.clone(),
                        count: u32::from(e.count),
                        card_type: e.card.card_type.clone(),
                        pack: e.card.pack.clone(),
                    })
                    .collect(),
            ),
        }
    }
}

/// Render `deck` as a pretty-printed JSON document.
pub fn export_json(deck: &Deck) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&DeckDocument::from(deck))
}

/// Parse a JSON deck document. Cards resolve by id, then by name.
pub fn import_json(json: &str, catalog: &Catalog, rules: DeckRules) -> Result<ImportedDeck, ImportError> {
    let document: DeckDocument = serde_json::from_str(json)?;
    let cards = document.cards.ok_or(ImportError::MissingCards)?;

    let mut collector = Collector::new(rules.max_copies_per_card);
    if !document.name.trim().is_empty() {
        collector.deck.name = Some(document.name);
    }

    for item in cards {
        let card = catalog
            .get(&CardId::new(item.id.as_str()))
            .or_else(|| catalog.find_by_name(&item.name));

        match card {
            Some(card) => collector.add(card, clamp_count(item.count, rules)),
            None => {
                let label = if item.name.is_empty() { item.id } else { item.name };
                collector.warn(format!("Card not found: {label}"));
            }
        }
    }

    collector.finish()
}

#[derive(Serialize, Deserialize)]
struct ShareDeck {
    #[serde(default)]
    n: String,
    #[serde(default)]
    c: Vec<ShareCard>,
}

#[derive(Serialize, Deserialize)]
struct ShareCard {
    i: CardId,
    #[serde(default)]
    c: u32,
}

/// Encode `deck` as a share code.
pub fn share_code(deck: &Deck) -> Result<String, serde_json::Error> {
    let share = ShareDeck {
        n: deck.name().to_string(),
        c: deck
            .entries()
            .iter()
            .map(|e| ShareCard {
                i: e.card.id.clone(),
                c: u32::from(e.count),
            })
            .collect(),
    };
    Ok(STANDARD.encode(serde_json::to_vec(&share)?))
}

/// Decode a share code. Cards resolve by id only.
pub fn import_share_code(
    code: &str,
    catalog: &Catalog,
    rules: DeckRules,
) -> Result<ImportedDeck, ImportError> {
    let bytes = STANDARD
        .decode(code.trim())
        .map_err(|e| ImportError::InvalidShareCode(e.to_string()))?;
    let share: ShareDeck =
        serde_json::from_slice(&bytes).map_err(|e| ImportError::InvalidShareCode(e.to_string()))?;

    let mut collector = Collector::new(rules.max_copies_per_card);
    if !share.n.trim().is_empty() {
        collector.deck.name = Some(share.n);
    }

    for item in share.c {
        match catalog.get(&item.i) {
            Some(card) => collector.add(card, clamp_count(item.c, rules)),
            None => collector.warn(format!("Card not found: {}", item.i.as_str())),
        }
    }

    collector.finish()
}

/// 0 means one copy; anything else is capped at the copy limit.
fn clamp_count(count: u32, rules: DeckRules) -> u8 {
    let max = rules.max_copies_per_card;
    u8::try_from(count.max(1)).map_or(max, |c| c.min(max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::DeckBuilder;

    fn catalog() -> Catalog {
        Catalog::from_cards([
            Card::new("a1-094", "Pikachu", "lightning").with_pack("Pikachu"),
            Card::new("a1-096", "Pikachu ex", "lightning").with_pack("Pikachu"),
            Card::new("p-a-007", "Professor's Research", "trainer"),
            Card::new("p-a-005", "Poké Ball", "trainer"),
        ])
    }

    fn counts(imported: &ImportedDeck) -> Vec<(&str, u8)> {
        imported.entries.iter().map(|e| (e.card.id.as_str(), e.count)).collect()
    }

    #[test]
    fn test_export_text_empty() {
        assert_eq!(export_text(&Deck::new("Nothing")), "");
    }

    #[test]
    fn test_import_text_formats() {
        let text = "Deck Name: Sparks\nTotal Cards: 5\n\n2x Pikachu ex\n1 Poké Ball\nprofessor\u{2019}s research x2\nPikachu";
        let imported = import_text(text, &catalog(), DeckRules::default()).unwrap();

        assert_eq!(imported.name.as_deref(), Some("Sparks"));
        assert_eq!(
            counts(&imported),
            vec![("a1-096", 2), ("p-a-005", 1), ("p-a-007", 2), ("a1-094", 1)]
        );
        assert!(imported.warnings.is_empty());
    }

    #[test]
    fn test_import_text_warnings() {
        let text = "3x Pikachu\nMissingno\n2x Pikachu";
        let imported = import_text(text, &catalog(), DeckRules::default()).unwrap();

        assert_eq!(counts(&imported), vec![("a1-094", 2)]);
        assert_eq!(
            imported.warnings,
            vec![
                "Invalid count for \"Pikachu\": 3".to_string(),
                "Card not found: \"Missingno\"".to_string(),
            ]
        );
    }

    #[test]
    fn test_import_text_merges_repeats_up_to_limit() {
        let imported = import_text("1x Pikachu\n2x Pikachu", &catalog(), DeckRules::default()).unwrap();
        assert_eq!(counts(&imported), vec![("a1-094", 2)]);
    }

    #[test]
    fn test_import_text_nothing_valid() {
        let err = import_text("Deck Name: X\n\nMissingno", &catalog(), DeckRules::default()).unwrap_err();
        match err {
            ImportError::NoValidCards { warnings } => assert_eq!(warnings.len(), 1),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_text_round_trip() {
        let catalog = catalog();
        let mut builder = DeckBuilder::new();
        builder.set_name("Sparks");
        for card in catalog.cards() {
            builder.add_card(card);
        }
        builder.add_card(&catalog.cards()[0]);

        let imported = import_text(&export_text(builder.deck()), &catalog, DeckRules::default()).unwrap();
        let mut restored = DeckBuilder::new();
        restored.apply_import(imported);
        assert_eq!(restored.deck(), builder.deck());
    }

    #[test]
    fn test_json_export_shape() {
        let catalog = catalog();
        let mut builder = DeckBuilder::new();
        builder.set_name("Sparks");
        builder.add_card(&catalog.cards()[0]);

        let json: serde_json::Value = serde_json::from_str(&export_json(builder.deck()).unwrap()).unwrap();
        assert_eq!(json["format"], "pocket");
        assert_eq!(json["totalCards"], 1);
        assert_eq!(json["cards"][0]["id"], "a1-094");
        assert_eq!(json["cards"][0]["type"], "lightning");
        assert_eq!(json["cards"][0]["pack"], "Pikachu");
    }

    #[test]
    fn test_import_json_resolves_by_id_then_name() {
        let json = r#"{
            "name": "Imported",
            "cards": [
                { "id": "a1-094", "name": "Wrong Name", "count": 5 },
                { "id": "gone", "name": "Poké Ball" },
                { "id": "gone-too", "name": "Missingno", "count": 1 }
            ]
        }"#;
        let imported = import_json(json, &catalog(), DeckRules::default()).unwrap();

        assert_eq!(imported.name.as_deref(), Some("Imported"));
        assert_eq!(counts(&imported), vec![("a1-094", 2), ("p-a-005", 1)]);
        assert_eq!(imported.warnings, vec!["Card not found: Missingno".to_string()]);
    }

    #[test]
    fn test_import_json_errors() {
        let rules = DeckRules::default();
        assert!(matches!(
            import_json("not json", &catalog(), rules),
            Err(ImportError::InvalidJson(_))
        ));
        assert!(matches!(
            import_json(r#"{ "name": "x" }"#, &catalog(), rules),
            Err(ImportError::MissingCards)
        ));
        assert!(matches!(
            import_json(r#"{ "cards": [] }"#, &catalog(), rules),
            Err(ImportError::NoValidCards { .. })
        ));
    }

    #[test]
    fn test_share_code_round_trip() {
        let catalog = catalog();
        let mut builder = DeckBuilder::new();
        builder.set_name("Shared");
        builder.add_card(&catalog.cards()[1]);
        builder.add_card(&catalog.cards()[1]);
        builder.add_card(&catalog.cards()[3]);

        let code = share_code(builder.deck()).unwrap();
        let imported = import_share_code(&code, &catalog, DeckRules::default()).unwrap();

        assert_eq!(imported.name.as_deref(), Some("Shared"));
        assert_eq!(counts(&imported), vec![("a1-096", 2), ("p-a-005", 1)]);
    }

    #[test]
    fn test_share_code_invalid() {
        let rules = DeckRules::default();
        assert!(matches!(
            import_share_code("***", &catalog(), rules),
            Err(ImportError::InvalidShareCode(_))
        ));

        let not_a_deck = STANDARD.encode("[1, 2, 3]");
        assert!(matches!(
            import_share_code(&not_a_deck, &catalog(), rules),
            Err(ImportError::InvalidShareCode(_))
        ));
    }

    #[test]
    fn test_clamp_count() {
        let rules = DeckRules::default();
        assert_eq!(clamp_count(0, rules), 1);
        assert_eq!(clamp_count(2, rules), 2);
        assert_eq!(clamp_count(9, rules), 2);
        assert_eq!(clamp_count(100_000, rules), 2);
    }
}
