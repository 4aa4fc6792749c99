//! Boutique Core - Shared types library.
//!
//! This crate provides the common domain types used across the boutique
//! storefront components:
//! - `storefront` - the catalog/cart/favorites engine consumed by views
//! - `integration-tests` - cross-module scenario tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! clocks. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and
//!   order statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
