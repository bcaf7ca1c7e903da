//! Basket and catalog data model.

mod article;
mod basket;

pub use article::{Article, Currency};
pub use basket::{ActionError, Basket, LineItem};
