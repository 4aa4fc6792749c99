//! Domain models for the storefront engine.
//!
//! These are validated domain objects separate from any persisted or wire
//! representation; storage shapes live next to the services that own them.

pub mod order;
pub mod product;
pub mod user;

pub use order::{Address, Order, OrderLine};
pub use product::{Category, Product, Review};
pub use user::User;
