//! Transition history tracking.
//!
//! Each basket carries an immutable log of the transitions applied to
//! it. The log is persisted with the basket and is append-only:
//! `record` returns a new log rather than mutating in place.

use super::state::{BasketState, Symbol};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of a single applied transition.
///
/// # Example
///
/// ```rust
/// use hamper::{BasketState, Symbol, TransitionRecord};
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     symbol: Symbol::Add,
///     from: BasketState::Empty,
///     to: BasketState::Filled,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(record.to, BasketState::Filled);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The symbol that drove the transition.
    pub symbol: Symbol,
    /// State before the transition.
    pub from: BasketState,
    /// State after the transition.
    pub to: BasketState,
    /// When the transition was applied.
    pub timestamp: DateTime<Utc>,
}

/// Ordered, append-only log of applied transitions.
///
/// # Example
///
/// ```rust
/// use hamper::{BasketState, Symbol, TransitionLog, TransitionRecord};
/// use chrono::Utc;
///
/// let log = TransitionLog::new();
/// let log = log.record(TransitionRecord {
///     symbol: Symbol::Add,
///     from: BasketState::Empty,
///     to: BasketState::Filled,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(log.records().len(), 1);
/// assert_eq!(log.path(), vec![BasketState::Empty, BasketState::Filled]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionLog {
    records: Vec<TransitionRecord>,
}

impl TransitionLog {
    /// Create a new empty log.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Record a transition, returning a new log.
    ///
    /// The existing log is left untouched.
    pub fn record(&self, record: TransitionRecord) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }

    /// All recorded transitions, oldest first.
    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    /// The most recent transition, if any.
    pub fn last(&self) -> Option<&TransitionRecord> {
        self.records.last()
    }

    /// The sequence of states traversed: the first record's `from`
    /// state followed by every record's `to` state. Empty for a log
    /// with no records.
    pub fn path(&self) -> Vec<BasketState> {
        let mut path = Vec::new();
        if let Some(first) = self.records.first() {
            path.push(first.from);
        }
        for record in &self.records {
            path.push(record.to);
        }
        path
    }
}
