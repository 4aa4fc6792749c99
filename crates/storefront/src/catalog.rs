//! In-session product catalog.
//!
//! The catalog holds the immutable product and category lists for the
//! session, loaded once at startup from the data feed. Products are stored
//! behind `Arc` so cart lines and derived views reference the catalog's
//! entries rather than copying them.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use boutique_core::ProductId;

use crate::filter::FilterSet;
use crate::models::{Category, Product};
use crate::sort::SortOrder;

/// Errors that can occur while building a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog feed could not be parsed.
    #[error("failed to parse catalog data: {0}")]
    Parse(#[from] serde_json::Error),
    /// Two products share the same ID.
    #[error("duplicate product id: {0}")]
    DuplicateProduct(ProductId),
    /// A product failed validation.
    #[error("invalid product {id}: {reason}")]
    InvalidProduct {
        id: ProductId,
        reason: String,
    },
}

/// Top-level shape of the catalog data feed.
#[derive(Debug, Deserialize)]
struct CatalogData {
    products: Vec<Product>,
    #[serde(default)]
    categories: Vec<Category>,
}

/// The immutable in-session catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Arc<Product>>,
    by_id: HashMap<ProductId, usize>,
    categories: Vec<Category>,
}

impl Catalog {
    /// Build a catalog from already-deserialized products and categories.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateProduct`] if two products share an
    /// ID, or [`CatalogError::InvalidProduct`] for an out-of-range
    /// discount.
    pub fn from_products(
        products: Vec<Product>,
        categories: Vec<Category>,
    ) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(products.len());
        for (index, product) in products.iter().enumerate() {
            if let Some(discount) = product.discount.filter(|d| *d > 100) {
                return Err(CatalogError::InvalidProduct {
                    id: product.id.clone(),
                    reason: format!("discount must be 0-100, got {discount}"),
                });
            }
            if by_id.insert(product.id.clone(), index).is_some() {
                return Err(CatalogError::DuplicateProduct(product.id.clone()));
            }
        }

        info!(
            products = products.len(),
            categories = categories.len(),
            "catalog loaded"
        );

        Ok(Self {
            products: products.into_iter().map(Arc::new).collect(),
            by_id,
            categories,
        })
    }

    /// Build a catalog from a JSON feed of the form
    /// `{"products": [...], "categories": [...]}`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] for malformed JSON, otherwise the
    /// same validation errors as [`Catalog::from_products`].
    pub fn from_json(data: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(data)?;
        Self::from_products(data.products, data.categories)
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Arc<Product>> {
        self.by_id.get(id).and_then(|&index| self.products.get(index))
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Arc<Product>] {
        &self.products
    }

    /// All shop categories, in display order.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Distinct product category names, in first-seen catalog order.
    #[must_use]
    pub fn category_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for product in &self.products {
            if !names.contains(&product.category) {
                names.push(product.category.clone());
            }
        }
        names
    }

    /// Distinct colors across all products, in first-seen catalog order.
    #[must_use]
    pub fn colors(&self) -> Vec<String> {
        self.distinct(|p| p.colors.as_slice())
    }

    /// Distinct sizes across all products, in first-seen catalog order.
    #[must_use]
    pub fn sizes(&self) -> Vec<String> {
        self.distinct(|p| p.sizes.as_slice())
    }

    fn distinct(&self, attr: for<'a> fn(&'a Product) -> &'a [String]) -> Vec<String> {
        let mut values: Vec<String> = Vec::new();
        for product in &self.products {
            for value in attr(product) {
                if !values.contains(value) {
                    values.push(value.clone());
                }
            }
        }
        values
    }

    /// The minimum and maximum list price, or `None` for an empty catalog.
    ///
    /// Shop views use this to initialize their price-range slider.
    #[must_use]
    pub fn price_bounds(&self) -> Option<(Decimal, Decimal)> {
        let mut prices = self.products.iter().map(|p| p.price.amount());
        let first = prices.next()?;
        let (min, max) = prices.fold((first, first), |(min, max), price| {
            (min.min(price), max.max(price))
        });
        Some((min, max))
    }

    /// Products flagged as featured, in catalog order.
    #[must_use]
    pub fn featured(&self) -> Vec<Arc<Product>> {
        self.flagged(|p| p.featured)
    }

    /// Products flagged as new arrivals, in catalog order.
    #[must_use]
    pub fn new_arrivals(&self) -> Vec<Arc<Product>> {
        self.flagged(|p| p.is_new)
    }

    /// Products flagged as best sellers, in catalog order.
    #[must_use]
    pub fn best_sellers(&self) -> Vec<Arc<Product>> {
        self.flagged(|p| p.best_seller)
    }

    fn flagged(&self, flag: impl Fn(&Product) -> bool) -> Vec<Arc<Product>> {
        self.products
            .iter()
            .filter(|p| flag(p))
            .cloned()
            .collect()
    }

    /// The shop view: products passing `filters` (and the optional text
    /// query), stably sorted under `sort`.
    #[must_use]
    pub fn browse(
        &self,
        filters: &FilterSet,
        query: Option<&str>,
        sort: SortOrder,
    ) -> Vec<Arc<Product>> {
        let mut results: Vec<Arc<Product>> = self
            .products
            .iter()
            .filter(|p| filters.matches(p, query))
            .cloned()
            .collect();
        sort.apply(&mut results);
        results
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::product;

    fn sample_catalog() -> Catalog {
        let mut sweater = product("1", "Silk Sweater", 8999);
        sweater.category = "Women".to_owned();
        sweater.colors = vec!["Navy".to_owned(), "Cream".to_owned()];
        sweater.sizes = vec!["S".to_owned(), "M".to_owned()];
        sweater.featured = true;

        let mut blazer = product("2", "Wool Blazer", 14999);
        blazer.category = "Men".to_owned();
        blazer.colors = vec!["Charcoal".to_owned(), "Navy".to_owned()];
        blazer.sizes = vec!["M".to_owned(), "L".to_owned()];
        blazer.is_new = true;

        let mut tote = product("3", "Leather Tote", 12999);
        tote.category = "Accessories".to_owned();
        tote.best_seller = true;

        Catalog::from_products(vec![sweater, blazer, tote], Vec::new()).unwrap()
    }

    #[test]
    fn test_get_by_id() {
        let catalog = sample_catalog();
        let found = catalog.get(&ProductId::new("2")).unwrap();
        assert_eq!(found.name, "Wool Blazer");
        assert!(catalog.get(&ProductId::new("99")).is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = Catalog::from_products(
            vec![product("1", "A", 1000), product("1", "B", 2000)],
            Vec::new(),
        );
        assert!(matches!(result, Err(CatalogError::DuplicateProduct(_))));
    }

    #[test]
    fn test_out_of_range_discount_rejected() {
        let mut p = product("1", "A", 1000);
        p.discount = Some(120);
        let result = Catalog::from_products(vec![p], Vec::new());
        assert!(matches!(result, Err(CatalogError::InvalidProduct { .. })));
    }

    #[test]
    fn test_distinct_values_keep_first_seen_order() {
        let catalog = sample_catalog();
        assert_eq!(catalog.category_names(), ["Women", "Men", "Accessories"]);
        assert_eq!(catalog.colors(), ["Navy", "Cream", "Charcoal"]);
        assert_eq!(catalog.sizes(), ["S", "M", "L"]);
    }

    #[test]
    fn test_price_bounds() {
        let catalog = sample_catalog();
        let (min, max) = catalog.price_bounds().unwrap();
        assert_eq!(min, Decimal::new(8999, 2));
        assert_eq!(max, Decimal::new(14999, 2));

        let empty = Catalog::from_products(Vec::new(), Vec::new()).unwrap();
        assert!(empty.price_bounds().is_none());
    }

    #[test]
    fn test_flagged_views() {
        let catalog = sample_catalog();
        assert_eq!(catalog.featured().len(), 1);
        assert_eq!(catalog.new_arrivals().len(), 1);
        assert_eq!(catalog.best_sellers().len(), 1);
    }

    #[test]
    fn test_browse_filters_then_sorts() {
        let catalog = sample_catalog();
        let filters = FilterSet::new().with_colors(["Navy".to_owned()]);

        let results = catalog.browse(&filters, None, SortOrder::PriceDesc);
        let ids: Vec<&str> = results.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["2", "1"]);
    }

    #[test]
    fn test_from_json_feed() {
        let feed = r#"{
            "products": [
                {"id": "1", "name": "Silk Sweater", "description": "", "price": "89.99", "category": "Women"}
            ],
            "categories": [
                {"id": "1", "name": "Women", "slug": "women"}
            ]
        }"#;
        let catalog = Catalog::from_json(feed).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.categories().len(), 1);
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        assert!(matches!(
            Catalog::from_json("{not json"),
            Err(CatalogError::Parse(_))
        ));
    }
}
