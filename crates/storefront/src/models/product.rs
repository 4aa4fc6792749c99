//! Product and category domain types.
//!
//! Products are immutable for the session and owned by the
//! [`crate::catalog::Catalog`]; everything else in the engine holds
//! references into it. The serde shape matches the catalog data feed
//! (camelCase keys, most fields optional).

use boutique_core::{CategoryId, Price, ProductId, ReviewId, UserId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A purchasable product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Long-form description.
    pub description: String,
    /// List price. Discounts are applied at pricing time, never stored back.
    pub price: Price,
    /// Image URLs, primary first.
    #[serde(default)]
    pub images: Vec<String>,
    /// Category display name (e.g., "Women").
    pub category: String,
    /// Free-form search tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Units on hand. Checked by views at add-to-cart time, not by the ledger.
    #[serde(default)]
    pub stock: u32,
    /// Active percentage discount, 0-100.
    #[serde(default)]
    pub discount: Option<u8>,
    /// Average review rating.
    #[serde(default)]
    pub rating: Option<f64>,
    /// Customer reviews.
    #[serde(default)]
    pub reviews: Vec<Review>,
    /// Size variants, in display order. Empty means the product has no sizes.
    #[serde(default)]
    pub sizes: Vec<String>,
    /// Color variants, in display order. Empty means the product has no colors.
    #[serde(default)]
    pub colors: Vec<String>,
    /// Shown in the featured carousel and sorted first by default.
    #[serde(default)]
    pub featured: bool,
    /// New arrival flag.
    #[serde(default, rename = "new")]
    pub is_new: bool,
    /// Best-seller flag.
    #[serde(default)]
    pub best_seller: bool,
}

impl Product {
    /// Whether this product is sold in size variants.
    #[must_use]
    pub fn has_sizes(&self) -> bool {
        !self.sizes.is_empty()
    }

    /// Whether this product is sold in color variants.
    #[must_use]
    pub fn has_colors(&self) -> bool {
        !self.colors.is_empty()
    }

    /// Whether a percentage discount is currently active.
    #[must_use]
    pub const fn is_discounted(&self) -> bool {
        self.discount.is_some()
    }
}

/// A customer review attached to a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub user_id: UserId,
    pub user_name: String,
    pub rating: f64,
    pub comment: String,
    pub date: NaiveDate,
}

/// A top-level shop category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    /// URL slug used by category routes.
    pub slug: String,
}
