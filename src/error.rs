//! Error types.
//!
//! Only persistence and import have failure channels. The classifier,
//! the browse pipeline and the deck mutators are total; the `try_*`
//! mutator variants report `ConstraintViolation` for callers that want
//! to surface why a mutation was refused.

use thiserror::Error;

use crate::cards::CardId;

/// A deck failed validation before being persisted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The deck has no cards.
    #[error("cannot save an empty deck")]
    EmptyDeck,
}

/// The backing key-value store failed.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The write would exceed the store's capacity.
    #[error("storage quota exceeded: {needed} bytes needed, limit is {limit}")]
    QuotaExceeded {
        /// Bytes the store would hold after the write.
        needed: usize,
        /// Store capacity in bytes.
        limit: usize,
    },

    /// The key cannot be used as a file name.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Filesystem failure in a file-backed store.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored value exists but cannot be parsed.
    #[error("stored value under '{key}' is corrupt: {reason}")]
    Corrupt {
        /// Storage key.
        key: String,
        /// Parser message.
        reason: String,
    },

    /// The collection could not be serialized.
    #[error("failed to serialize saved decks: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Failure of `DeckRepository::save`.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The deck is not valid for saving.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The store rejected the read or the write.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Why a deck mutation was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintViolation {
    /// The deck already holds the maximum number of cards.
    #[error("deck is full ({max} cards)")]
    DeckFull {
        /// Deck size limit.
        max: u32,
    },

    /// The card is already at its copy limit.
    #[error("at most {max} copies of {card} are allowed")]
    CopyLimit {
        /// The card.
        card: CardId,
        /// Copy limit.
        max: u8,
    },

    /// The card is not in the deck.
    #[error("{card} is not in the deck")]
    NotInDeck {
        /// The card.
        card: CardId,
    },

    /// A requested count is outside `0..=max`.
    #[error("invalid copy count {count} (max {max})")]
    InvalidCount {
        /// Requested count.
        count: u8,
        /// Copy limit.
        max: u8,
    },
}

/// Failure to import a deck from text, JSON or a share code.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The JSON document could not be parsed.
    #[error("invalid JSON format: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The share code is not valid base64 or does not decode to a deck.
    #[error("invalid share code: {0}")]
    InvalidShareCode(String),

    /// The document has no `cards` array.
    #[error("invalid JSON format: missing cards array")]
    MissingCards,

    /// Nothing in the input resolved to a catalog card.
    #[error("no valid cards found")]
    NoValidCards {
        /// Per-line problems encountered while parsing.
        warnings: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(ValidationError::EmptyDeck.to_string(), "cannot save an empty deck");

        let err = ConstraintViolation::CopyLimit { card: CardId::new("a1-001"), max: 2 };
        assert_eq!(err.to_string(), "at most 2 copies of Card(a1-001) are allowed");

        let err = StorageError::QuotaExceeded { needed: 10, limit: 4 };
        assert!(err.to_string().contains("quota"));
    }

    #[test]
    fn test_save_error_from() {
        let err: SaveError = ValidationError::EmptyDeck.into();
        assert!(matches!(err, SaveError::Validation(ValidationError::EmptyDeck)));
        assert_eq!(err.to_string(), "cannot save an empty deck");
    }
}
