//! Boutique Storefront engine.
//!
//! The synchronous computation layer behind the storefront views: catalog
//! browsing, filtering and sorting, the cart ledger with derived checkout
//! pricing, per-user favorites, global search, mock authentication, and
//! order history.
//!
//! The engine performs no I/O of its own beyond an injected
//! [`storage::KeyValueStore`] collaborator, mirroring the browser
//! local-storage contract it was designed against. All state lives in a
//! [`state::StoreContext`] constructed once per session and passed by
//! reference to consumers; there are no ambient globals.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod cart;
pub mod config;
pub mod error;
pub mod favorites;
pub mod filter;
pub mod models;
pub mod pricing;
pub mod search;
pub mod services;
pub mod sort;
pub mod state;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_support;

pub use catalog::{Catalog, CatalogError};
pub use cart::{CartLedger, CartLine, CartService};
pub use config::{ConfigError, PricingConfig, SearchConfig, StoreConfig};
pub use error::{Result, StoreError};
pub use favorites::{FavoritesService, FavoritesState};
pub use filter::{FilterSet, PriceRange};
pub use models::{Address, Category, Order, OrderLine, Product, Review, User};
pub use pricing::{CheckoutSummary, effective_price};
pub use services::auth::{AuthError, AuthService};
pub use services::orders::{OrderError, OrderService};
pub use sort::SortOrder;
pub use state::StoreContext;
pub use storage::{KeyValueStore, MemoryStore, StorageError};
