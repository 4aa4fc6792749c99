//! Shared fixtures for unit tests.

use boutique_core::{Price, ProductId};

use crate::models::Product;

/// A minimal product: given id, name, and a price in cents; no variants,
/// no flags, category "Women". Tests tweak fields as needed.
pub(crate) fn product(id: &str, name: &str, price_cents: u64) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        description: String::new(),
        price: Price::from_cents(price_cents),
        images: Vec::new(),
        category: "Women".to_owned(),
        tags: Vec::new(),
        stock: 10,
        discount: None,
        rating: None,
        reviews: Vec::new(),
        sizes: Vec::new(),
        colors: Vec::new(),
        featured: false,
        is_new: false,
        best_seller: false,
    }
}
