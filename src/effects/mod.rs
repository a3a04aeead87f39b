//! Card effects as data, and the interpreter that runs them.
//!
//! - `RuleStep`: one primitive unit of a card effect
//! - `CardFilter` / `Condition`: which cards a step may pick, and when a
//!   conditional branch applies
//! - `execute_step`: performs a step and resumes its continuation

pub mod resolver;
pub mod step;
pub mod targeting;

pub use resolver::execute_step;
pub use step::{Choice, Destination, DiscardReward, RuleStep};
pub use targeting::{CardFilter, Condition};
