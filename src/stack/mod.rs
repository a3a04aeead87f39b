//! Effect pipeline: continuations, the pending-rule queue and the drivers that
//! run steps through them.
//!
//! Everything here is single-threaded and cooperative. A step that needs an
//! answer parks its continuation inside a decision handler and returns; the
//! answer resumes it later.

pub mod continuation;
pub mod pipeline;
pub mod queue;

pub use continuation::{Continuation, ProtocolMonitor};
pub use pipeline::run_steps;
pub use queue::RuleQueue;
