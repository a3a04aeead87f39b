//! One-shot continuations.
//!
//! A `Continuation` is "what happens after this step finishes". Resuming it
//! consumes it, so a step cannot resume its continuation twice. A
//! continuation that is dropped without being resumed would silently stall the
//! turn; its `Drop` impl reports that to the game's [`ProtocolMonitor`], and
//! the public entry points turn any report into
//! [`EngineError::ProtocolViolation`](crate::core::EngineError::ProtocolViolation).

use std::cell::RefCell;
use std::rc::Rc;

use crate::game::GameState;

type Body = Box<dyn FnOnce(&mut GameState)>;

/// Collects exactly-once violations.
///
/// Clones share the same record.
#[derive(Clone, Debug, Default)]
pub struct ProtocolMonitor {
    violations: Rc<RefCell<Vec<String>>>,
}

impl ProtocolMonitor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation.
    pub fn record(&self, violation: impl Into<String>) {
        self.violations.borrow_mut().push(violation.into());
    }

    /// Whether no violation has been recorded since the last `take`.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violations.borrow().is_empty()
    }

    /// Drain recorded violations.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.violations.borrow_mut())
    }
}

/// The rest of an effect, to be resumed exactly once.
pub struct Continuation {
    label: &'static str,
    body: Option<Body>,
    monitor: ProtocolMonitor,
}

impl Continuation {
    /// Wrap `body`. Prefer [`GameState::continuation`], which wires in the
    /// game's monitor.
    pub fn new(
        monitor: &ProtocolMonitor,
        label: &'static str,
        body: impl FnOnce(&mut GameState) + 'static,
    ) -> Self {
        Self {
            label,
            body: Some(Box::new(body)),
            monitor: monitor.clone(),
        }
    }

    /// Run the rest of the effect.
    pub fn resume(mut self, game: &mut GameState) {
        if let Some(body) = self.body.take() {
            body(game);
        }
    }

    /// Name used in violation reports.
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl Drop for Continuation {
    fn drop(&mut self) {
        if self.body.is_some() && !std::thread::panicking() {
            self.monitor
                .record(format!("continuation `{}` dropped without being resumed", self.label));
        }
    }
}

impl std::fmt::Debug for Continuation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Continuation")
            .field("label", &self.label)
            .field("pending", &self.body.is_some())
            .finish()
    }
}
