//! The strongly-typed transition table.
//!
//! The table maps a symbol to an ordered list of rules. Each rule names
//! a state pattern (an exact state or the `*` wildcard), an optional
//! condition, the action to run, and the next state. Actions and
//! conditions are closed enums resolved by `match`, so an "unknown
//! action name" cannot exist at runtime; the only remaining failure
//! mode is "no rule found" for a (symbol, state) pair.
//!
//! The standard basket table:
//!
//! ```text
//! SYMBOL   STATE    CONDITION            NEXT STATE   ACTION
//! ------------------------------------------------------------------
//! EXPIRE   *                             EMPTY        clean
//! CLEAN    *                             EMPTY        clean
//! ADD      EMPTY                         FILLED       add_article
//! ADD      FILLED                        FILLED       add_article
//! DELETE   FILLED   has_single_article   EMPTY        clean
//! DELETE   FILLED                        FILLED       delete_article
//! ```

mod builder;

pub use builder::{BuildError, TableBuilder};

use crate::core::{BasketState, Symbol};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Side-effecting basket operation named by a rule.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Create one line item for the context's article.
    AddArticle,
    /// Remove one line item matching the context's article.
    DeleteArticle,
    /// Remove every line item and clear the TTL deadline.
    Clean,
}

impl Action {
    /// The action's name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddArticle => "add_article",
            Self::DeleteArticle => "delete_article",
            Self::Clean => "clean",
        }
    }
}

/// Predicate a rule may attach; evaluated against the basket before the
/// action runs.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// The basket holds exactly one line item.
    HasSingleArticle,
}

impl Condition {
    /// The condition's name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::HasSingleArticle => "has_single_article",
        }
    }
}

/// Which current states a rule applies to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StatePattern {
    /// Matches any current state (the table's `*`).
    Any,
    /// Matches one exact state.
    Exact(BasketState),
}

impl StatePattern {
    /// Whether the pattern covers the given state.
    pub fn matches(&self, state: BasketState) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(expected) => *expected == state,
        }
    }
}

/// One transition descriptor: pattern, optional condition, action, next
/// state.
///
/// # Example
///
/// ```rust
/// use hamper::{Action, BasketState, Condition, Rule, StatePattern};
///
/// let collapse = Rule::new(
///     StatePattern::Exact(BasketState::Filled),
///     Action::Clean,
///     BasketState::Empty,
/// )
/// .when(Condition::HasSingleArticle);
///
/// assert_eq!(collapse.condition, Some(Condition::HasSingleArticle));
/// ```
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Rule {
    /// States this rule applies to.
    pub pattern: StatePattern,
    /// Optional gate; a rule without one matches unconditionally.
    pub condition: Option<Condition>,
    /// The basket action to invoke.
    pub action: Action,
    /// State the basket moves to once the action succeeds.
    pub next_state: BasketState,
}

impl Rule {
    /// Create an unconditional rule.
    pub fn new(pattern: StatePattern, action: Action, next_state: BasketState) -> Self {
        Self {
            pattern,
            condition: None,
            action,
            next_state,
        }
    }

    /// Attach a condition to the rule.
    pub fn when(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }
}

/// Immutable symbol → rules mapping.
///
/// Built once (usually via [`TransitionTable::shared`]) and read-only
/// thereafter. Rule order within a symbol is the declaration order and
/// is significant: the engine picks the first rule whose condition
/// holds, or the first without a condition.
///
/// # Example
///
/// ```rust
/// use hamper::{BasketState, Symbol, TransitionTable};
///
/// let table = TransitionTable::shared();
/// assert!(table.contains(Symbol::Add));
///
/// // DELETE from FILLED has a conditional and an unconditional rule.
/// let rules = table.rules_for(Symbol::Delete, BasketState::Filled);
/// assert_eq!(rules.len(), 2);
///
/// // No rule covers DELETE from EMPTY.
/// assert!(table.rules_for(Symbol::Delete, BasketState::Empty).is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct TransitionTable {
    rules: HashMap<Symbol, Vec<Rule>>,
}

impl TransitionTable {
    /// Start building a custom table.
    pub fn builder() -> TableBuilder {
        TableBuilder::new()
    }

    /// The standard basket table (see the module docs).
    pub fn standard() -> Self {
        TableBuilder::new()
            .on(
                Symbol::Expire,
                Rule::new(StatePattern::Any, Action::Clean, BasketState::Empty),
            )
            .on(
                Symbol::Clean,
                Rule::new(StatePattern::Any, Action::Clean, BasketState::Empty),
            )
            .on(
                Symbol::Add,
                Rule::new(
                    StatePattern::Exact(BasketState::Empty),
                    Action::AddArticle,
                    BasketState::Filled,
                ),
            )
            .on(
                Symbol::Add,
                Rule::new(
                    StatePattern::Exact(BasketState::Filled),
                    Action::AddArticle,
                    BasketState::Filled,
                ),
            )
            .on(
                Symbol::Delete,
                Rule::new(
                    StatePattern::Exact(BasketState::Filled),
                    Action::Clean,
                    BasketState::Empty,
                )
                .when(Condition::HasSingleArticle),
            )
            .on(
                Symbol::Delete,
                Rule::new(
                    StatePattern::Exact(BasketState::Filled),
                    Action::DeleteArticle,
                    BasketState::Filled,
                ),
            )
            .build()
            .expect("standard basket table is valid")
    }

    /// Process-wide shared instance of the standard table, built once.
    pub fn shared() -> &'static TransitionTable {
        static TABLE: OnceLock<TransitionTable> = OnceLock::new();
        TABLE.get_or_init(TransitionTable::standard)
    }

    /// Whether any rule is registered for the symbol.
    pub fn contains(&self, symbol: Symbol) -> bool {
        self.rules.contains_key(&symbol)
    }

    /// Candidate rules for a (symbol, state) pair, in declaration
    /// order. Exact-state matches are preferred: wildcard rules are
    /// consulted only when no exact rule exists for the state.
    pub fn rules_for(&self, symbol: Symbol, state: BasketState) -> Vec<&Rule> {
        let Some(rules) = self.rules.get(&symbol) else {
            return Vec::new();
        };

        let exact: Vec<&Rule> = rules
            .iter()
            .filter(|rule| rule.pattern == StatePattern::Exact(state))
            .collect();
        if !exact.is_empty() {
            return exact;
        }

        rules
            .iter()
            .filter(|rule| rule.pattern == StatePattern::Any)
            .collect()
    }

    /// Total number of rules across all symbols.
    pub fn rule_count(&self) -> usize {
        self.rules.values().map(Vec::len).sum()
    }

    pub(crate) fn from_rules(rules: HashMap<Symbol, Vec<Rule>>) -> Self {
        Self { rules }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_has_six_rules() {
        let table = TransitionTable::standard();
        assert_eq!(table.rule_count(), 6);
        assert!(table.contains(Symbol::Add));
        assert!(table.contains(Symbol::Delete));
        assert!(table.contains(Symbol::Clean));
        assert!(table.contains(Symbol::Expire));
    }

    #[test]
    fn shared_table_is_a_single_instance() {
        let a = TransitionTable::shared();
        let b = TransitionTable::shared();
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn wildcard_rules_cover_both_states() {
        let table = TransitionTable::standard();
        for state in [BasketState::Empty, BasketState::Filled] {
            let rules = table.rules_for(Symbol::Clean, state);
            assert_eq!(rules.len(), 1);
            assert_eq!(rules[0].action, Action::Clean);
            assert_eq!(rules[0].next_state, BasketState::Empty);
        }
    }

    #[test]
    fn delete_rules_keep_declaration_order() {
        let table = TransitionTable::standard();
        let rules = table.rules_for(Symbol::Delete, BasketState::Filled);
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].condition, Some(Condition::HasSingleArticle));
        assert_eq!(rules[0].action, Action::Clean);
        assert_eq!(rules[1].condition, None);
        assert_eq!(rules[1].action, Action::DeleteArticle);
    }

    #[test]
    fn no_rule_for_delete_from_empty() {
        let table = TransitionTable::standard();
        assert!(table
            .rules_for(Symbol::Delete, BasketState::Empty)
            .is_empty());
    }

    #[test]
    fn exact_match_is_preferred_over_wildcard() {
        let table = TransitionTable::builder()
            .on(
                Symbol::Clean,
                Rule::new(StatePattern::Any, Action::Clean, BasketState::Empty),
            )
            .on(
                Symbol::Clean,
                Rule::new(
                    StatePattern::Exact(BasketState::Filled),
                    Action::DeleteArticle,
                    BasketState::Filled,
                ),
            )
            .build()
            .unwrap();

        let filled = table.rules_for(Symbol::Clean, BasketState::Filled);
        assert_eq!(filled.len(), 1);
        assert_eq!(filled[0].action, Action::DeleteArticle);

        let empty = table.rules_for(Symbol::Clean, BasketState::Empty);
        assert_eq!(empty.len(), 1);
        assert_eq!(empty[0].action, Action::Clean);
    }

    #[test]
    fn pattern_matching() {
        assert!(StatePattern::Any.matches(BasketState::Empty));
        assert!(StatePattern::Any.matches(BasketState::Filled));
        assert!(StatePattern::Exact(BasketState::Empty).matches(BasketState::Empty));
        assert!(!StatePattern::Exact(BasketState::Empty).matches(BasketState::Filled));
    }

    #[test]
    fn action_and_condition_names() {
        assert_eq!(Action::AddArticle.name(), "add_article");
        assert_eq!(Action::DeleteArticle.name(), "delete_article");
        assert_eq!(Action::Clean.name(), "clean");
        assert_eq!(Condition::HasSingleArticle.name(), "has_single_article");
    }
}
