//! Catalog articles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Settlement currency for articles and baskets.
///
/// The catalog currently trades in a single currency; the closed enum
/// keeps the wire format (`"uah"`) stable while leaving room to grow.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    /// Ukrainian hryvnia.
    #[default]
    Uah,
}

impl Currency {
    /// ISO-style lowercase currency code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Uah => "uah",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A catalog item. Read-only from the engine's perspective: transitions
/// reference articles but never mutate them.
///
/// # Example
///
/// ```rust
/// use hamper::{Article, Currency};
///
/// let tea = Article::new("Green tea", "X42", 120);
/// assert_eq!(tea.code, "X42");
/// assert_eq!(tea.price, 120);
/// assert_eq!(tea.currency, Currency::Uah);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Catalog identity.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Unique catalog code.
    pub code: String,
    /// Non-negative price in minor units.
    pub price: u64,
    /// Settlement currency.
    pub currency: Currency,
    /// Free-form description.
    pub description: String,
    /// When the article entered the catalog.
    pub created_at: DateTime<Utc>,
    /// Last catalog update.
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Create an article with the default currency and an empty
    /// description.
    pub fn new(name: impl Into<String>, code: impl Into<String>, price: u64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            code: code.into(),
            price,
            currency: Currency::default(),
            description: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_article_uses_default_currency() {
        let article = Article::new("Coffee beans", "Y7", 260);
        assert_eq!(article.currency, Currency::Uah);
        assert!(article.description.is_empty());
    }

    #[test]
    fn currency_serializes_lowercase() {
        let json = serde_json::to_string(&Currency::Uah).unwrap();
        assert_eq!(json, "\"uah\"");
        assert_eq!(Currency::Uah.to_string(), "uah");
    }

    #[test]
    fn article_roundtrip_serialization() {
        let article = Article::new("Green tea", "X42", 120);
        let json = serde_json::to_string(&article).unwrap();
        let restored: Article = serde_json::from_str(&json).unwrap();
        assert_eq!(article, restored);
    }
}
