//! Global product search.
//!
//! The header search dialog runs this on every keystroke: a linear scan
//! of the catalog with the same case-insensitive substring predicate the
//! shop filter uses, capped at [`crate::config::SearchConfig::max_results`]
//! hits. An empty query returns nothing; the dialog shows no results
//! until the visitor types.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::SearchConfig;
use crate::filter::matches_query;
use crate::models::Product;

/// Search the catalog for `query`, in catalog order, truncated to the
/// configured result cap.
#[must_use]
pub fn search(catalog: &Catalog, query: &str, config: &SearchConfig) -> Vec<Arc<Product>> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }

    catalog
        .products()
        .iter()
        .filter(|p| matches_query(p, Some(query)))
        .take(config.max_results)
        .cloned()
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::product;

    fn catalog_of(products: Vec<crate::models::Product>) -> Catalog {
        Catalog::from_products(products, Vec::new()).unwrap()
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let catalog = catalog_of(vec![product("1", "Silk Sweater", 8999)]);
        assert!(search(&catalog, "", &SearchConfig::default()).is_empty());
        assert!(search(&catalog, "   ", &SearchConfig::default()).is_empty());
    }

    #[test]
    fn test_matches_name_description_category_and_tags() {
        let mut p = product("1", "Silk Sweater", 8999);
        p.description = "Luxurious blend".to_owned();
        p.category = "Women".to_owned();
        p.tags = vec!["knitwear".to_owned()];
        let catalog = catalog_of(vec![p]);

        for query in ["silk", "luxurious", "women", "KNIT"] {
            assert_eq!(search(&catalog, query, &SearchConfig::default()).len(), 1);
        }
        assert!(search(&catalog, "denim", &SearchConfig::default()).is_empty());
    }

    #[test]
    fn test_results_are_capped() {
        let products = (0..20)
            .map(|i| product(&i.to_string(), &format!("Sweater {i}"), 1000))
            .collect();
        let catalog = catalog_of(products);

        let results = search(&catalog, "sweater", &SearchConfig::default());
        assert_eq!(results.len(), 8);

        let results = search(&catalog, "sweater", &SearchConfig { max_results: 3 });
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn test_results_keep_catalog_order() {
        let catalog = catalog_of(vec![
            product("b", "Sweater B", 1000),
            product("a", "Sweater A", 2000),
        ]);

        let results = search(&catalog, "sweater", &SearchConfig::default());
        let ids: Vec<&str> = results.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }
}
