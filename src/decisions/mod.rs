//! Decisions, the per-player broker, and prompt builders.

pub mod broker;
pub mod decision;
pub mod prompts;

pub(crate) use decision::Handler;
pub use decision::{index_key, parse_index, Decision, DecisionId, DecisionOption, Options, Prompt};
pub use prompts::{choose_one, pick_from_hand, pick_from_supply, yes_no, Pick};
