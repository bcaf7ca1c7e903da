//! Core basket machine vocabulary.
//!
//! This module contains the pure value types of the machine:
//! - States and symbols (`BasketState`, `Symbol`)
//! - The per-call payload (`TransitionContext`)
//! - Immutable transition history (`TransitionLog`)
//!
//! Nothing here performs I/O; side effects live in the engine and the
//! store.

mod context;
mod history;
mod state;

pub use context::TransitionContext;
pub use history::{TransitionLog, TransitionRecord};
pub use state::{BasketState, Symbol, UnknownSymbol};
