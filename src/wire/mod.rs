//! Wire boundary: outbound messages and the transport trait.

pub mod message;
pub mod transport;

pub use message::{
    BoardView, DecisionView, FinalScore, OptionView, PileView, ServerMessage, StackView,
};
pub use transport::{NullTransport, Outbox, Transport};
