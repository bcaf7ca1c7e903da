//! Basket states and input symbols.
//!
//! The basket machine is a closed alphabet: two states and four symbols.
//! Both are plain enums so that every (symbol, state) pairing the engine
//! can encounter is known at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Coarse status of a basket.
///
/// A basket is `Empty` exactly when its line-item collection is empty;
/// the engine is the sole mutator and maintains that invariant.
///
/// # Example
///
/// ```rust
/// use hamper::BasketState;
///
/// assert_eq!(BasketState::default(), BasketState::Empty);
/// assert_eq!(BasketState::Filled.name(), "FILLED");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BasketState {
    /// No line items. The initial state of every basket.
    #[default]
    Empty,
    /// At least one line item.
    Filled,
}

impl BasketState {
    /// Get the state's name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Empty => "EMPTY",
            Self::Filled => "FILLED",
        }
    }
}

impl fmt::Display for BasketState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An input event driving the basket machine.
///
/// `Add`, `Delete` and `Clean` are caller-triggerable; `Expire` is
/// issued by the engine itself when a basket's TTL has lapsed and is
/// never part of the string-typed caller surface.
///
/// # Example
///
/// ```rust
/// use hamper::Symbol;
///
/// let symbol: Symbol = "ADD".parse().unwrap();
/// assert_eq!(symbol, Symbol::Add);
/// assert!("CHECKOUT".parse::<Symbol>().is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Symbol {
    /// Put one article into the basket.
    Add,
    /// Remove one line item matching an article.
    Delete,
    /// Drop every line item.
    Clean,
    /// Engine-internal: forced cleanup of a basket past its TTL.
    Expire,
}

impl Symbol {
    /// Get the symbol's name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Delete => "DELETE",
            Self::Clean => "CLEAN",
            Self::Expire => "EXPIRE",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing a string that names no known symbol.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown symbol '{0}'")]
pub struct UnknownSymbol(pub String);

impl FromStr for Symbol {
    type Err = UnknownSymbol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADD" => Ok(Self::Add),
            "DELETE" => Ok(Self::Delete),
            "CLEAN" => Ok(Self::Clean),
            "EXPIRE" => Ok(Self::Expire),
            other => Err(UnknownSymbol(other.to_string())),
        }
    }
}
