//! Decisions: questions posed to one player.

use smallvec::SmallVec;

use crate::core::PlayerId;
use crate::game::GameState;
use crate::wire::DecisionView;

/// Unique, increasing decision identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DecisionId(pub u64);

impl std::fmt::Display for DecisionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Decision({})", self.0)
    }
}

/// One answer a player may give.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecisionOption {
    pub key: String,
    pub label: String,
}

impl DecisionOption {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// Option list; most prompts offer a handful.
pub type Options = SmallVec<[DecisionOption; 4]>;

/// What a step wants to ask, before the broker turns it into a [`Decision`].
///
/// ```
/// use rust_deckbuilder::decisions::Prompt;
///
/// let prompt = Prompt::new("Discard an Estate?")
///     .option("yes", "Yes")
///     .option("no", "No")
///     .info("Baron: +1 Buy");
/// assert_eq!(prompt.options.len(), 2);
/// assert!(prompt.has_option("no"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Prompt {
    pub message: String,
    pub options: Options,
    pub info: Vec<String>,
}

impl Prompt {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn option(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.push(DecisionOption::new(key, label));
        self
    }

    #[must_use]
    pub fn info(mut self, line: impl Into<String>) -> Self {
        self.info.push(line.into());
        self
    }

    #[must_use]
    pub fn has_option(&self, key: &str) -> bool {
        self.options.iter().any(|o| o.key == key)
    }
}

/// An outstanding question. Immutable once asked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decision {
    pub id: DecisionId,
    pub player: PlayerId,
    pub message: String,
    pub options: Options,
    pub info: Vec<String>,
}

impl Decision {
    /// Whether `key` answers this decision.
    #[must_use]
    pub fn accepts(&self, key: &str) -> bool {
        !key.is_empty() && self.options.iter().any(|o| o.key == key)
    }

    /// Wire representation.
    #[must_use]
    pub fn show(&self) -> DecisionView {
        DecisionView {
            info: self.info.clone(),
            message: self.message.clone(),
            options: self.options.iter().cloned().map(Into::into).collect(),
        }
    }
}

/// The logic bound to a decision; consumes the answer key.
pub(crate) struct Handler {
    pub(crate) decision: DecisionId,
    pub(crate) respond: Box<dyn FnOnce(&mut GameState, &str)>,
}

impl std::fmt::Debug for Handler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handler").field("decision", &self.decision).finish()
    }
}

/// Parse an indexed key such as `card[3]` with prefix `card`.
#[must_use]
pub fn parse_index(key: &str, prefix: &str) -> Option<usize> {
    key.strip_prefix(prefix)?
        .strip_prefix('[')?
        .strip_suffix(']')?
        .parse()
        .ok()
}

/// Build an indexed key such as `card[3]`.
#[must_use]
pub fn index_key(prefix: &str, index: usize) -> String {
    format!("{prefix}[{index}]")
}
