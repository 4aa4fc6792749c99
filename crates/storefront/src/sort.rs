//! Shop sort orders.
//!
//! Every order except the price sorts is a two-bucket boolean sort: the
//! flagged products come first and everything else keeps its catalog
//! order. That tie behavior is load-bearing for the UI, so application
//! must always go through a stable sort.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::models::Product;

/// A selectable sort order for the shop view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Featured products first.
    #[default]
    Featured,
    /// List price, low to high.
    PriceAsc,
    /// List price, high to low.
    PriceDesc,
    /// New arrivals first.
    Newest,
    /// Best sellers first.
    BestSelling,
}

impl SortOrder {
    /// All orders, in the order the shop's dropdown presents them.
    pub const ALL: [Self; 5] = [
        Self::Featured,
        Self::PriceAsc,
        Self::PriceDesc,
        Self::Newest,
        Self::BestSelling,
    ];

    /// The wire/UI name of this order.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::Newest => "newest",
            Self::BestSelling => "best-selling",
        }
    }

    /// Compare two products under this order.
    ///
    /// Returns [`Ordering::Equal`] for ties; a stable sort then keeps the
    /// original catalog order.
    #[must_use]
    pub fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Featured => b.featured.cmp(&a.featured),
            Self::PriceAsc => a.price.cmp(&b.price),
            Self::PriceDesc => b.price.cmp(&a.price),
            Self::Newest => b.is_new.cmp(&a.is_new),
            Self::BestSelling => b.best_seller.cmp(&a.best_seller),
        }
    }

    /// Sort `products` in place, stably.
    pub fn apply(self, products: &mut [Arc<Product>]) {
        products.sort_by(|a, b| self.compare(a, b));
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "featured" => Ok(Self::Featured),
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            "newest" => Ok(Self::Newest),
            "best-selling" => Ok(Self::BestSelling),
            _ => Err(format!("invalid sort order: {s}")),
        }
    }
}
