//! Unified engine error type.
//!
//! Most of the engine deliberately does not error: malformed persisted
//! data is discarded, invalid quantities are normalized, unauthorized
//! favorites mutations are silent no-ops. What remains - catalog loading,
//! configuration, authentication input, and checkout - funnels into
//! [`StoreError`] so embedders handle one type.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::services::auth::AuthError;
use crate::services::orders::OrderError;
use crate::storage::StorageError;

/// Top-level error type for the storefront engine.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Catalog data could not be loaded.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// An authentication operation failed.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// An order operation failed.
    #[error("order error: {0}")]
    Order(#[from] OrderError),

    /// A storage operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type alias for [`StoreError`].
pub type Result<T> = std::result::Result<T, StoreError>;
