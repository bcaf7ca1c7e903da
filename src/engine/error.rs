//! Engine error taxonomy.

use crate::core::{BasketState, Symbol, UnknownSymbol};
use crate::model::ActionError;
use crate::store::StoreError;
use thiserror::Error;

/// Errors surfaced by [`Engine::transition`].
///
/// No transition is retried automatically; every error propagates to
/// the calling layer with the basket left as it was before the call.
///
/// [`Engine::transition`]: crate::engine::Engine::transition
#[derive(Debug, Error)]
pub enum EngineError {
    /// The requested symbol is not in the recognized set.
    #[error("invalid symbol '{symbol}'")]
    InvalidSymbol {
        /// The offending symbol spelling.
        symbol: String,
    },

    /// No table rule (or satisfied condition) resolves for the
    /// (symbol, state) pair.
    #[error("no transition for symbol '{symbol}' from state '{state}'")]
    InvalidTransition {
        /// The requested symbol.
        symbol: Symbol,
        /// The basket state at resolution time.
        state: BasketState,
    },

    /// Internal failure while executing the action or persisting the
    /// result; any partial effect was discarded.
    #[error("transition failed: {0}")]
    Transition(#[from] TransitionFailure),
}

/// Cause of an [`EngineError::Transition`].
#[derive(Debug, Error)]
pub enum TransitionFailure {
    /// The basket action itself failed.
    #[error(transparent)]
    Action(#[from] ActionError),

    /// The store refused the commit.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ActionError> for EngineError {
    fn from(err: ActionError) -> Self {
        Self::Transition(TransitionFailure::Action(err))
    }
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        Self::Transition(TransitionFailure::Store(err))
    }
}

impl From<UnknownSymbol> for EngineError {
    fn from(err: UnknownSymbol) -> Self {
        Self::InvalidSymbol { symbol: err.0 }
    }
}
