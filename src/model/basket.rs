//! The basket entity and its line items.
//!
//! The basket owns the data the engine mutates: current state, the
//! line-item collection, and the TTL bookkeeping. Action methods are
//! crate-private on purpose; line items are created and destroyed only
//! as side effects of engine transitions.

use crate::core::{BasketState, TransitionContext, TransitionLog, TransitionRecord};
use crate::model::article::{Article, Currency};
use crate::table::{Action, Condition};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Failure of a basket action during transition execution.
///
/// Surfaced to the caller wrapped in the engine's transition-failure
/// error; nothing is committed when an action fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// ADD/DELETE invoked without a target article in the context.
    #[error("transition context is missing the target article")]
    MissingArticle,

    /// DELETE targeted an article with no matching line item.
    #[error("basket has no line item for article code '{code}'")]
    NoSuchItem { code: String },
}

/// One unit linking a basket to an article instance.
///
/// Multiple line items for the same article are permitted; each ADD of
/// the same code creates a new item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Persisted identity of the line item.
    pub id: Uuid,
    /// The referenced catalog article.
    pub article: Article,
    /// When the item was added to the basket.
    pub created_at: DateTime<Utc>,
}

/// A per-session shopping basket.
///
/// Identity is established by `key` (session-derived) before the first
/// save assigns a persisted id. State and line items are only mutated
/// through the transition engine, which maintains the invariant that
/// `state == Empty` exactly when the basket holds no line items.
///
/// # Example
///
/// ```rust
/// use hamper::{Basket, BasketState};
///
/// let basket = Basket::new("s1");
/// assert_eq!(basket.state(), BasketState::Empty);
/// assert!(basket.is_empty());
/// assert!(basket.expire_at().is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Basket {
    id: Option<Uuid>,
    key: String,
    /// Owning user reference, if the session is authenticated.
    pub user: Option<String>,
    state: BasketState,
    /// Settlement currency for the basket.
    pub currency: Currency,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    expire_at: Option<DateTime<Utc>>,
    items: Vec<LineItem>,
    log: TransitionLog,
}

impl Basket {
    /// Create a fresh, unpersisted basket for a session key.
    pub fn new(key: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            key: key.into(),
            user: None,
            state: BasketState::default(),
            currency: Currency::default(),
            created_at: now,
            updated_at: now,
            expire_at: None,
            items: Vec::new(),
            log: TransitionLog::new(),
        }
    }

    /// Persisted identity, absent until the first save.
    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    /// Assign the persisted identity. Called by stores when a basket is
    /// first created; a second assignment is ignored.
    pub fn assign_id(&mut self, id: Uuid) {
        if self.id.is_none() {
            self.id = Some(id);
        }
    }

    /// The session-derived basket key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current machine state.
    pub fn state(&self) -> BasketState {
        self.state
    }

    /// Line items, ordered by article code then insertion time.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// When the basket was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last committed update.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// TTL deadline; absent means the basket never expires.
    pub fn expire_at(&self) -> Option<DateTime<Utc>> {
        self.expire_at
    }

    /// Log of every transition applied to this basket.
    pub fn log(&self) -> &TransitionLog {
        &self.log
    }

    /// Sum of line-item prices in minor units.
    pub fn total_cost(&self) -> u64 {
        self.items.iter().map(|item| item.article.price).sum()
    }

    /// True when the basket holds no line items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Condition: exactly one line item, whatever its article.
    pub fn has_single_article(&self) -> bool {
        self.items.len() == 1
    }

    /// True when a TTL deadline is set and lies strictly in the past.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Expiry check against an explicit clock reading.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.expire_at, Some(deadline) if deadline < now)
    }

    /// Evaluate a table condition against the current basket contents.
    pub(crate) fn evaluate(&self, condition: Condition) -> bool {
        match condition {
            Condition::HasSingleArticle => self.has_single_article(),
        }
    }

    /// Invoke a table action. ADD/DELETE require an article in the
    /// context and refresh the TTL; CLEAN drops everything and clears
    /// it.
    pub(crate) fn apply_action(
        &mut self,
        action: Action,
        ctx: &TransitionContext,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<(), ActionError> {
        match action {
            Action::AddArticle => {
                let article = ctx.article().ok_or(ActionError::MissingArticle)?;
                self.add_article(article, now, ttl);
                Ok(())
            }
            Action::DeleteArticle => {
                let article = ctx.article().ok_or(ActionError::MissingArticle)?;
                self.delete_article(article, now, ttl)
            }
            Action::Clean => {
                self.clean();
                Ok(())
            }
        }
    }

    /// Create a line item for the article and refresh the TTL deadline.
    /// Items keep (article code, insertion time) order.
    fn add_article(&mut self, article: &Article, now: DateTime<Utc>, ttl: Duration) {
        let position = self
            .items
            .partition_point(|item| item.article.code.as_str() <= article.code.as_str());
        self.items.insert(
            position,
            LineItem {
                id: Uuid::new_v4(),
                article: article.clone(),
                created_at: now,
            },
        );
        self.expire_at = Some(now + ttl);
    }

    /// Remove one line item matching the article's code and refresh the
    /// TTL deadline. With duplicates, the earliest-created match goes.
    fn delete_article(
        &mut self,
        article: &Article,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<(), ActionError> {
        let position = self
            .items
            .iter()
            .position(|item| item.article.code == article.code)
            .ok_or_else(|| ActionError::NoSuchItem {
                code: article.code.clone(),
            })?;
        self.items.remove(position);
        self.expire_at = Some(now + ttl);
        Ok(())
    }

    /// Remove all line items and clear the TTL deadline.
    fn clean(&mut self) {
        self.items.clear();
        self.expire_at = None;
    }

    pub(crate) fn set_state(&mut self, state: BasketState) {
        self.state = state;
    }

    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    pub(crate) fn record(&mut self, record: TransitionRecord) {
        self.log = self.log.record(record);
    }
}
