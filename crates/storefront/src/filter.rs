//! Shop filter evaluation.
//!
//! A [`FilterSet`] narrows the catalog view by category, color, size, and
//! price range, optionally combined with a free-text query. Inclusion is
//! the logical AND of all five predicates; an empty constraint always
//! passes.
//!
//! Two asymmetries are carried over from the shipped storefront behavior
//! and must not be "fixed" here:
//! - category filters use exact, case-sensitive equality while the text
//!   query matches case-insensitive substrings;
//! - the price range compares the list price, ignoring any active
//!   discount.

use std::collections::BTreeSet;

use rust_decimal::Decimal;

use crate::models::Product;

/// An inclusive price range over list prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl PriceRange {
    /// Create a range, swapping the bounds if they arrive inverted.
    ///
    /// Invalid input is normalized rather than rejected, like every other
    /// mutation input in the engine.
    #[must_use]
    pub fn new(min: Decimal, max: Decimal) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Whether `amount` lies within the range, inclusive on both ends.
    #[must_use]
    pub fn contains(&self, amount: Decimal) -> bool {
        self.min <= amount && amount <= self.max
    }
}

/// The combined filter constraints for a shop view.
///
/// Rebuilt on every user interaction; never persisted.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    /// Selected categories. Empty means no constraint.
    pub categories: BTreeSet<String>,
    /// Selected colors. Empty means no constraint.
    pub colors: BTreeSet<String>,
    /// Selected sizes. Empty means no constraint.
    pub sizes: BTreeSet<String>,
    /// Price constraint. `None` means no constraint.
    pub price_range: Option<PriceRange>,
}

impl FilterSet {
    /// An unconstrained filter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A filter set whose price range spans the given catalog bounds.
    ///
    /// This is how shop views initialize their sliders, so the price
    /// predicate starts out accepting every product.
    #[must_use]
    pub fn for_catalog(catalog: &crate::catalog::Catalog) -> Self {
        Self {
            price_range: catalog
                .price_bounds()
                .map(|(min, max)| PriceRange::new(min, max)),
            ..Self::default()
        }
    }

    /// Replace the selected categories.
    #[must_use]
    pub fn with_categories(mut self, categories: impl IntoIterator<Item = String>) -> Self {
        self.categories = categories.into_iter().collect();
        self
    }

    /// Replace the selected colors.
    #[must_use]
    pub fn with_colors(mut self, colors: impl IntoIterator<Item = String>) -> Self {
        self.colors = colors.into_iter().collect();
        self
    }

    /// Replace the selected sizes.
    #[must_use]
    pub fn with_sizes(mut self, sizes: impl IntoIterator<Item = String>) -> Self {
        self.sizes = sizes.into_iter().collect();
        self
    }

    /// Replace the price range.
    #[must_use]
    pub fn with_price_range(mut self, min: Decimal, max: Decimal) -> Self {
        self.price_range = Some(PriceRange::new(min, max));
        self
    }

    /// Whether `product` passes every constraint plus the optional text
    /// query.
    ///
    /// Pure; no allocation beyond the lowercased query comparison.
    #[must_use]
    pub fn matches(&self, product: &Product, query: Option<&str>) -> bool {
        matches_query(product, query)
            && self.matches_category(product)
            && self.matches_colors(product)
            && self.matches_sizes(product)
            && self.matches_price(product)
    }

    fn matches_category(&self, product: &Product) -> bool {
        self.categories.is_empty() || self.categories.contains(&product.category)
    }

    fn matches_colors(&self, product: &Product) -> bool {
        self.colors.is_empty() || product.colors.iter().any(|c| self.colors.contains(c))
    }

    fn matches_sizes(&self, product: &Product) -> bool {
        self.sizes.is_empty() || product.sizes.iter().any(|s| self.sizes.contains(s))
    }

    fn matches_price(&self, product: &Product) -> bool {
        // List price on purpose, even when a discount is active.
        self.price_range
            .is_none_or(|range| range.contains(product.price.amount()))
    }
}

/// Case-insensitive substring match against name, description, category,
/// or any tag. An absent, empty, or whitespace-only query passes.
#[must_use]
pub fn matches_query(product: &Product, query: Option<&str>) -> bool {
    let Some(query) = query else { return true };
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }

    product.name.to_lowercase().contains(&query)
        || product.description.to_lowercase().contains(&query)
        || product.category.to_lowercase().contains(&query)
        || product
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&query))
}
