//! The transition engine.
//!
//! The engine drives baskets through the transition table: it validates
//! the requested symbol, forces an EXPIRE transition when a basket's
//! TTL has lapsed, resolves the rule for the (symbol, state) pair with
//! exact-state matches preferred over the wildcard, evaluates rule
//! conditions in declaration order, and executes the selected rule as
//! one logical unit (action, state assignment, commit).
//!
//! All mutation happens on an in-memory copy of the basket. The store
//! sees a single commit at the end of a successful call; when anything
//! fails mid-way, the copy is discarded and other readers never observe
//! a partial state change. The engine performs no locking of its own:
//! transitions for one basket key are expected to be serialized by the
//! caller, and concurrent environments need an external per-key mutual
//! exclusion boundary around `transition`.
//!
//! # Example
//!
//! ```rust
//! use hamper::{Article, BasketState, Engine, MemoryStore, Symbol, TransitionContext};
//!
//! let mut engine = Engine::new(MemoryStore::new());
//! let tea = Article::new("Green tea", "X42", 120);
//!
//! let state = engine
//!     .transition("s1", Symbol::Add, &TransitionContext::with_article(tea.clone()))
//!     .unwrap();
//! assert_eq!(state, BasketState::Filled);
//!
//! // Single-item DELETE collapses straight back to EMPTY.
//! let state = engine
//!     .transition("s1", Symbol::Delete, &TransitionContext::with_article(tea))
//!     .unwrap();
//! assert_eq!(state, BasketState::Empty);
//! assert!(engine.store().get("s1").unwrap().expire_at().is_none());
//! ```

pub mod error;

pub use error::{EngineError, TransitionFailure};

use crate::core::{BasketState, Symbol, TransitionContext, TransitionRecord};
use crate::model::Basket;
use crate::store::BasketStore;
use crate::table::{Rule, TransitionTable};
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

/// Idle minutes before a non-empty basket is implicitly expired.
pub const DEFAULT_TTL_MINUTES: i64 = 30;

/// Engine tuning knobs.
#[derive(Clone, Copy, Debug)]
pub struct EngineConfig {
    /// Idle duration after which a non-empty basket expires.
    pub ttl: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::minutes(DEFAULT_TTL_MINUTES),
        }
    }
}

/// Table-driven basket transition engine over a [`BasketStore`].
pub struct Engine<S: BasketStore> {
    store: S,
    table: TransitionTable,
    config: EngineConfig,
}

impl<S: BasketStore> Engine<S> {
    /// Create an engine with the standard table and default TTL.
    pub fn new(store: S) -> Self {
        Self::with_config(store, EngineConfig::default())
    }

    /// Create an engine with the standard table and a custom config.
    pub fn with_config(store: S, config: EngineConfig) -> Self {
        Self::with_table(store, config, TransitionTable::shared().clone())
    }

    /// Create an engine with a custom transition table.
    pub fn with_table(store: S, config: EngineConfig, table: TransitionTable) -> Self {
        Self {
            store,
            table,
            config,
        }
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the underlying store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consume the engine and return its store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// String-typed caller boundary: parse the symbol, then run
    /// [`transition`]. Unrecognized spellings fail with
    /// [`EngineError::InvalidSymbol`] and touch nothing.
    ///
    /// `"EXPIRE"` parses like the rest of the alphabet and behaves as
    /// a forced cleanup. By convention it is engine-internal — the
    /// engine raises it itself when a TTL lapses — so presentation
    /// layers should only ever send `"ADD"`, `"DELETE"` and
    /// `"CLEAN"`.
    ///
    /// [`transition`]: Engine::transition
    pub fn transition_named(
        &mut self,
        key: &str,
        symbol: &str,
        ctx: &TransitionContext,
    ) -> Result<BasketState, EngineError> {
        let symbol: Symbol = symbol.parse()?;
        self.transition(key, symbol, ctx)
    }

    /// Apply one symbol to the basket identified by `key`.
    ///
    /// The basket is created lazily if no persisted row exists for the
    /// key. If its TTL deadline has passed, an EXPIRE transition runs
    /// first and the requested symbol is then processed as if the
    /// basket started out EMPTY. Returns the basket state after the
    /// commit.
    pub fn transition(
        &mut self,
        key: &str,
        symbol: Symbol,
        ctx: &TransitionContext,
    ) -> Result<BasketState, EngineError> {
        if !self.table.contains(symbol) {
            return Err(EngineError::InvalidSymbol {
                symbol: symbol.to_string(),
            });
        }

        let now = Utc::now();
        let mut basket = self
            .store
            .find_by_key(key)?
            .unwrap_or_else(|| Basket::new(key));

        // Expiry pre-check: correct the in-memory copy before resolving
        // the requested symbol. Committed together with it below.
        if basket.is_expired_at(now) {
            debug!(key, "basket TTL lapsed, forcing EXPIRE");
            let rule = self.resolve(Symbol::Expire, &basket)?;
            self.execute(&mut basket, Symbol::Expire, rule, &TransitionContext::empty(), now)?;
        }

        let rule = self.resolve(symbol, &basket)?;

        // Identity must exist before line items can reference it.
        if basket.id().is_none() {
            self.store.create(&mut basket)?;
        }

        self.execute(&mut basket, symbol, rule, ctx, now)?;

        basket.touch(now);
        self.store.save(&basket)?;
        Ok(basket.state())
    }

    /// Resolve the rule for (symbol, current state): first candidate
    /// whose condition holds, or the first without a condition.
    fn resolve(&self, symbol: Symbol, basket: &Basket) -> Result<Rule, EngineError> {
        for rule in self.table.rules_for(symbol, basket.state()) {
            match rule.condition {
                Some(condition) if basket.evaluate(condition) => return Ok(*rule),
                Some(_) => continue,
                None => return Ok(*rule),
            }
        }
        Err(EngineError::InvalidTransition {
            symbol,
            state: basket.state(),
        })
    }

    /// Run the rule's action against the basket, advance its state and
    /// record the transition. The caller owns the commit.
    fn execute(
        &self,
        basket: &mut Basket,
        symbol: Symbol,
        rule: Rule,
        ctx: &TransitionContext,
        now: DateTime<Utc>,
    ) -> Result<(), EngineError> {
        let from = basket.state();
        basket.apply_action(rule.action, ctx, now, self.config.ttl)?;
        basket.set_state(rule.next_state);
        basket.record(TransitionRecord {
            symbol,
            from,
            to: rule.next_state,
            timestamp: now,
        });
        debug!(
            key = basket.key(),
            symbol = %symbol,
            from = %from,
            to = %rule.next_state,
            action = rule.action.name(),
            "applied transition"
        );
        Ok(())
    }
}
