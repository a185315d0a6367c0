//! Card system: catalog cards and the resident catalog.
//!
//! ## Key Types
//!
//! - `CardId`: Opaque card identity
//! - `Card`: Immutable catalog data (name, type, rarity, pack, health)
//! - `Catalog`: Ordered card collection with id and name lookup
//!
//! Cards are never mutated once loaded. Anything derived from them, such
//! as the trainer subtype, is recomputed on demand.

pub mod catalog;
pub mod definition;

pub use catalog::Catalog;
pub use definition::{Card, CardId, ENERGY_TYPE, TRAINER_TYPE};
