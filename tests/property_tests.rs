//! Property-based tests.
//!
//! Random operation sequences against the deck builder, plus totality of
//! classification, filter identity and persistence round trips.

use pocket_deckbuilder::browse::{filter_cards, FilterState};
use pocket_deckbuilder::cards::{Card, CardId};
use pocket_deckbuilder::config::{DeckRules, MAX_COPIES_PER_CARD, MAX_DECK_SIZE};
use pocket_deckbuilder::deck::{Deck, DeckBuilder};
use pocket_deckbuilder::storage::{DeckRepository, KeyValueStore, MemoryStore};
use pocket_deckbuilder::taxonomy::classify;
use proptest::prelude::*;

const POOL: usize = 30;

#[derive(Clone, Debug)]
enum Op {
    Add(usize),
    Remove(usize),
}

fn pool_card(i: usize) -> Card {
    let types = ["fire", "water", "grass", "trainer"];
    Card::new(format!("t-{i:03}"), format!("Card {i}"), types[i % types.len()])
        .with_rarity("◊")
        .with_health(40 + 10 * (i as u32 % 8))
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..POOL).prop_map(Op::Add),
        1 => (0..POOL).prop_map(Op::Remove),
    ]
}

fn apply(builder: &mut DeckBuilder, op: &Op) {
    match *op {
        Op::Add(i) => {
            builder.add_card(&pool_card(i));
        }
        Op::Remove(i) => {
            builder.remove_card(&pool_card(i).id);
        }
    }
}

fn assert_invariants(deck: &Deck) -> Result<(), TestCaseError> {
    let total: u32 = deck.entries().iter().map(|e| u32::from(e.count)).sum();
    prop_assert_eq!(total, deck.total_cards());
    prop_assert!(total <= MAX_DECK_SIZE);

    let mut seen: Vec<&CardId> = Vec::new();
    for entry in deck.entries() {
        prop_assert!(entry.count >= 1);
        prop_assert!(entry.count <= MAX_COPIES_PER_CARD);
        prop_assert!(!seen.contains(&&entry.card.id), "duplicate entry {}", entry.card.id);
        seen.push(&entry.card.id);
    }
    Ok(())
}

fn built(ops: &[Op]) -> DeckBuilder {
    let mut builder = DeckBuilder::new();
    for op in ops {
        apply(&mut builder, op);
    }
    builder
}

proptest! {
    /// Trainer names always classify to a trainer subtype, the same one every time.
    #[test]
    fn test_trainer_classification_is_total(name in "\\PC{0,40}") {
        let first = classify("trainer", &name);
        prop_assert!(first.trainer().is_some());
        prop_assert_eq!(first, classify("trainer", &name));
    }

    /// Non-trainer types never acquire a trainer subtype.
    #[test]
    fn test_non_trainer_passthrough(card_type in "[a-z]{1,10}", name in "\\PC{0,20}") {
        prop_assume!(card_type != "trainer");
        prop_assert!(classify(&card_type, &name).trainer().is_none());
    }

    /// Deck invariants hold after every operation.
    #[test]
    fn test_invariants_hold_every_step(ops in prop::collection::vec(op_strategy(), 0..80)) {
        let mut builder = DeckBuilder::new();
        for op in &ops {
            apply(&mut builder, op);
            assert_invariants(builder.deck())?;
        }
    }

    /// Adding a card already at the copy limit changes nothing.
    #[test]
    fn test_add_at_copy_limit_is_noop(ops in prop::collection::vec(op_strategy(), 0..60), i in 0..POOL) {
        let mut builder = built(&ops);
        let card = pool_card(i);
        prop_assume!(builder.card_count(&card.id) == MAX_COPIES_PER_CARD);

        let before = builder.deck().clone();
        prop_assert!(!builder.add_card(&card));
        prop_assert_eq!(builder.deck(), &before);
    }

    /// A full deck accepts nothing.
    #[test]
    fn test_full_deck_rejects_adds(i in 0..POOL, j in 0..POOL) {
        let mut builder = DeckBuilder::new();
        for n in 0..POOL {
            builder.add_card(&pool_card(n));
        }
        prop_assert_eq!(builder.total_cards(), MAX_DECK_SIZE);

        let before = builder.deck().clone();
        builder.add_card(&pool_card(i));
        builder.add_card(&pool_card(j));
        prop_assert_eq!(builder.deck(), &before);
    }

    /// Removing an absent card changes nothing.
    #[test]
    fn test_remove_absent_is_noop(ops in prop::collection::vec(op_strategy(), 0..60)) {
        let mut builder = built(&ops);
        let absent = Card::new("absent", "Absent", "fire");

        let before = builder.deck().clone();
        prop_assert!(!builder.remove_card(&absent.id));
        prop_assert_eq!(builder.deck(), &before);
    }

    /// The empty filter keeps every card in order.
    #[test]
    fn test_empty_filter_is_identity(ids in prop::collection::vec(0..POOL, 0..40)) {
        let cards: Vec<Card> = ids.into_iter().map(pool_card).collect();
        let filtered = filter_cards(&cards, &FilterState::new());

        prop_assert_eq!(filtered.len(), cards.len());
        for (a, b) in filtered.iter().zip(&cards) {
            prop_assert!(std::ptr::eq(*a, b));
        }
    }

    /// Saving an empty deck never touches storage.
    #[test]
    fn test_empty_save_leaves_storage(ops in prop::collection::vec(op_strategy(), 1..40), name in "\\PC{0,12}") {
        let mut repo = DeckRepository::new(MemoryStore::new());
        let deck = built(&ops).into_deck();
        if !deck.is_empty() {
            repo.save(&deck, "seed").unwrap();
        }
        let raw = repo.store().get("pocketDecks").unwrap();

        prop_assert!(repo.save(&Deck::new("empty"), &name).is_err());
        prop_assert_eq!(repo.store().get("pocketDecks").unwrap(), raw);
    }

    /// Saved entries reload with the same ids and counts.
    #[test]
    fn test_save_load_round_trip(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let deck = built(&ops).into_deck();
        prop_assume!(!deck.is_empty());

        let mut repo = DeckRepository::new(MemoryStore::new());
        let id = repo.save(&deck, "round trip").unwrap();
        let saved = repo.load(&id).unwrap();

        prop_assert_eq!(saved.cards.as_slice(), deck.entries());
        let reopened = saved.to_builder(DeckRules::default());
        prop_assert_eq!(reopened.deck().entries(), deck.entries());
    }
}
