//! Card system: types, definitions, the catalog and the standard set.
//!
//! ## Key Types
//!
//! - `CardType` / `CardTypes`: closed set of card types, held as a bitset
//! - `Card`: static definition; its effect is a list of `RuleStep`s
//! - `CardId`: index into the catalog
//! - `CardCatalog`: definitions by id and by name
//!
//! Definitions are never mutated during a game. Effects that change a
//! card's cost or value for a turn live in
//! [`TurnModifiers`](crate::rules::TurnModifiers).

pub mod definition;
pub mod registry;
pub mod standard;
pub mod types;

pub use definition::{Card, CardId, Scoring};
pub use registry::CardCatalog;
pub use standard::{standard_cards, standard_catalog};
pub use types::{CardType, CardTypes};
