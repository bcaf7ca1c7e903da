//! Builder for constructing transition tables.

use super::{Rule, TransitionTable};
use crate::core::Symbol;
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur when building a transition table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// `build()` called on a builder with no rules.
    #[error("no rules defined; add at least one rule with .on(symbol, rule)")]
    Empty,

    /// A rule can never be selected: an earlier rule for the same
    /// symbol and state pattern has no condition, so evaluation always
    /// stops before reaching it.
    #[error("rule {index} for symbol '{symbol}' is unreachable; an earlier unconditional rule with the same state pattern masks it")]
    UnreachableRule {
        /// Symbol whose rule list contains the masked rule.
        symbol: Symbol,
        /// Zero-based position within that symbol's rule list.
        index: usize,
    },
}

/// Fluent builder for [`TransitionTable`].
///
/// Rules are kept in the order they are declared; that order decides
/// condition evaluation at resolution time.
///
/// # Example
///
/// ```rust
/// use hamper::{Action, BasketState, Rule, StatePattern, Symbol, TransitionTable};
///
/// let table = TransitionTable::builder()
///     .on(
///         Symbol::Clean,
///         Rule::new(StatePattern::Any, Action::Clean, BasketState::Empty),
///     )
///     .build()
///     .unwrap();
///
/// assert_eq!(table.rule_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct TableBuilder {
    rules: HashMap<Symbol, Vec<Rule>>,
    order: Vec<Symbol>,
}

impl TableBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule to a symbol's list.
    pub fn on(mut self, symbol: Symbol, rule: Rule) -> Self {
        if !self.rules.contains_key(&symbol) {
            self.order.push(symbol);
        }
        self.rules.entry(symbol).or_default().push(rule);
        self
    }

    /// Validate and build the table.
    pub fn build(self) -> Result<TransitionTable, BuildError> {
        if self.rules.is_empty() {
            return Err(BuildError::Empty);
        }

        for symbol in &self.order {
            let rules = &self.rules[symbol];
            for (index, rule) in rules.iter().enumerate() {
                let masked = rules[..index]
                    .iter()
                    .any(|earlier| earlier.pattern == rule.pattern && earlier.condition.is_none());
                if masked {
                    return Err(BuildError::UnreachableRule {
                        symbol: *symbol,
                        index,
                    });
                }
            }
        }

        Ok(TransitionTable::from_rules(self.rules))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BasketState;
    use crate::table::{Action, Condition, StatePattern};

    #[test]
    fn empty_builder_fails() {
        let result = TableBuilder::new().build();
        assert_eq!(result.unwrap_err(), BuildError::Empty);
    }

    #[test]
    fn single_rule_builds() {
        let table = TableBuilder::new()
            .on(
                Symbol::Clean,
                Rule::new(StatePattern::Any, Action::Clean, BasketState::Empty),
            )
            .build()
            .unwrap();
        assert_eq!(table.rule_count(), 1);
    }

    #[test]
    fn unconditional_rule_masks_later_rule() {
        let result = TableBuilder::new()
            .on(
                Symbol::Delete,
                Rule::new(
                    StatePattern::Exact(BasketState::Filled),
                    Action::DeleteArticle,
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
            .build();

        assert_eq!(
            result.unwrap_err(),
            BuildError::UnreachableRule {
                symbol: Symbol::Delete,
                index: 1,
            }
        );
    }

    #[test]
    fn conditional_then_unconditional_is_fine() {
        let result = TableBuilder::new()
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
            .build();

        assert!(result.is_ok());
    }

    #[test]
    fn different_patterns_do_not_mask() {
        let result = TableBuilder::new()
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
            .build();

        assert!(result.is_ok());
    }

    #[test]
    fn standard_table_passes_validation() {
        // Built through the same builder path, so this guards the
        // standard rules against masking regressions.
        let table = TransitionTable::standard();
        assert_eq!(table.rule_count(), 6);
    }
}
