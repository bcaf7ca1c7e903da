//! Hamper: a table-driven session basket state machine.
//!
//! A basket cycles between two states, `EMPTY` and `FILLED`, driven by
//! the symbols `ADD`, `DELETE` and `CLEAN` (plus the engine-internal
//! `EXPIRE`). Transitions are described by an immutable table of
//! strongly-typed rules; the engine resolves the rule for each
//! (symbol, state) pair, evaluates conditions in declaration order,
//! runs the rule's action against the basket, and commits the result
//! through a pluggable store in one atomic step.
//!
//! Baskets carry a time-to-live: once a basket sits idle past its
//! `expire_at` deadline, the engine forces an `EXPIRE` transition
//! (emptying it) before processing whatever symbol was requested.
//!
//! # Core Concepts
//!
//! - **Symbols and states**: the closed machine alphabet (`Symbol`,
//!   `BasketState`)
//! - **Transition table**: ordered rules with optional conditions
//!   (`TransitionTable`)
//! - **Engine**: expiry pre-check, resolution, atomic execution
//!   (`Engine`)
//! - **Store**: the persistence seam (`BasketStore`, `MemoryStore`)
//!
//! # Example
//!
//! ```rust
//! use hamper::{Article, BasketState, Engine, MemoryStore, Symbol, TransitionContext};
//!
//! let mut engine = Engine::new(MemoryStore::new());
//! let tea = Article::new("Green tea", "X42", 120);
//! let coffee = Article::new("Coffee beans", "Y7", 260);
//!
//! engine
//!     .transition("s1", Symbol::Add, &TransitionContext::with_article(tea.clone()))
//!     .unwrap();
//! engine
//!     .transition("s1", Symbol::Add, &TransitionContext::with_article(coffee.clone()))
//!     .unwrap();
//!
//! let basket = engine.store().get("s1").unwrap();
//! assert_eq!(basket.state(), BasketState::Filled);
//! assert_eq!(basket.items().len(), 2);
//! assert_eq!(basket.total_cost(), 380);
//!
//! // Deleting down to nothing collapses the basket back to EMPTY.
//! engine
//!     .transition("s1", Symbol::Delete, &TransitionContext::with_article(tea))
//!     .unwrap();
//! let state = engine
//!     .transition("s1", Symbol::Delete, &TransitionContext::with_article(coffee))
//!     .unwrap();
//! assert_eq!(state, BasketState::Empty);
//! ```

pub mod core;
pub mod engine;
pub mod model;
pub mod store;
pub mod table;

// Re-export commonly used types
pub use crate::core::{
    BasketState, Symbol, TransitionContext, TransitionLog, TransitionRecord, UnknownSymbol,
};
pub use engine::{Engine, EngineConfig, EngineError, TransitionFailure, DEFAULT_TTL_MINUTES};
pub use model::{ActionError, Article, Basket, Currency, LineItem};
pub use store::{BasketStore, MemoryStore, StoreError};
pub use table::{Action, BuildError, Condition, Rule, StatePattern, TableBuilder, TransitionTable};
