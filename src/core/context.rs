//! Per-call transition payload.

use crate::model::Article;

/// Data carried into a single `transition` call.
///
/// ADD and DELETE consume the target article; CLEAN (and the
/// engine-internal EXPIRE) ignore it. An action that needs an article
/// and does not find one fails the transition without committing
/// anything.
///
/// # Example
///
/// ```rust
/// use hamper::{Article, TransitionContext};
///
/// let ctx = TransitionContext::with_article(Article::new("Green tea", "X42", 120));
/// assert_eq!(ctx.article().unwrap().code, "X42");
///
/// let empty = TransitionContext::default();
/// assert!(empty.article().is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct TransitionContext {
    article: Option<Article>,
}

impl TransitionContext {
    /// Create a context with no payload (CLEAN and EXPIRE).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a context targeting an article (ADD and DELETE).
    pub fn with_article(article: Article) -> Self {
        Self {
            article: Some(article),
        }
    }

    /// The target article, if any.
    pub fn article(&self) -> Option<&Article> {
        self.article.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_context_carries_no_article() {
        assert!(TransitionContext::empty().article().is_none());
    }

    #[test]
    fn context_exposes_target_article() {
        let ctx = TransitionContext::with_article(Article::new("Coffee beans", "Y7", 260));
        assert_eq!(ctx.article().unwrap().code, "Y7");
    }
}
