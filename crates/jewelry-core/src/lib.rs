//! Core types and state containers for the jewelry storefront.
//!
//! This crate has no HTTP or database dependencies. It owns
//! the catalog, the pricing rules, the cart, the favorites abstraction and the
//! order log. The HTTP layer (`jewelry-api`) and the storage and mail backends
//! depend on it.

// Implementations use native `async fn` for the trait methods.
#![allow(async_fn_in_trait)]

pub mod cart;
pub mod catalog;
pub mod error;
pub mod favorite;
pub mod order;
pub mod pricing;
pub mod selection;

pub use error::{Error, Result};
