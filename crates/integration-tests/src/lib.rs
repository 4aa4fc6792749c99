//! Shared fixtures for the storefront engine integration tests.
//!
//! The catalogs here mirror the shapes the real data feed produces: a
//! small scenario catalog for pricing-sensitive tests, and a fuller
//! boutique catalog with categories, variants, and flags for browsing
//! tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use boutique_core::{Price, ProductId};
use boutique_storefront::{
    Address, Catalog, KeyValueStore, MemoryStore, Product, StoreConfig, StoreContext,
};

/// A product with the given id, name, and price in cents; category
/// "Women", no variants, no flags.
#[must_use]
pub fn product(id: &str, name: &str, price_cents: u64) -> Product {
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

/// The three-product scenario catalog: $10 plain, $20 with a 10%
/// discount, $30 featured.
///
/// # Panics
///
/// Panics if the fixture data is invalid, which would be a bug in the
/// fixture itself.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn scenario_catalog() -> Catalog {
    let ten = product("tee", "Cotton Tee", 1000);

    let mut twenty = product("scarf", "Silk Scarf", 2000);
    twenty.discount = Some(10);

    let mut thirty = product("belt", "Leather Belt", 3000);
    thirty.featured = true;

    Catalog::from_products(vec![ten, twenty, thirty], Vec::new()).unwrap()
}

/// A fuller boutique catalog: categories, color/size variants, discounts,
/// and showcase flags.
///
/// # Panics
///
/// Panics if the fixture data is invalid, which would be a bug in the
/// fixture itself.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn boutique_catalog() -> Catalog {
    let mut sweater = product("1", "Silk Blend V-Neck Sweater", 8999);
    sweater.description = "Luxurious silk blend V-neck sweater with ribbed trim.".to_owned();
    sweater.tags = vec!["sweater".to_owned(), "silk".to_owned(), "luxury".to_owned()];
    sweater.sizes = vec!["XS", "S", "M", "L", "XL"].into_iter().map(String::from).collect();
    sweater.colors = vec!["Navy", "Cream", "Burgundy"].into_iter().map(String::from).collect();
    sweater.featured = true;
    sweater.best_seller = true;

    let mut blazer = product("2", "Tailored Wool Blazer", 14999);
    blazer.description = "Classic tailored wool blazer with a modern fit.".to_owned();
    blazer.category = "Men".to_owned();
    blazer.tags = vec!["blazer".to_owned(), "wool".to_owned(), "formal".to_owned()];
    blazer.discount = Some(15);
    blazer.sizes = vec!["S", "M", "L", "XL"].into_iter().map(String::from).collect();
    blazer.colors = vec!["Charcoal", "Navy", "Black"].into_iter().map(String::from).collect();
    blazer.featured = true;

    let mut tote = product("3", "Leather Tote Bag", 12999);
    tote.description = "Spacious leather tote with interior pockets.".to_owned();
    tote.category = "Accessories".to_owned();
    tote.tags = vec!["bag".to_owned(), "leather".to_owned()];
    tote.colors = vec!["Tan".to_owned(), "Black".to_owned()];
    tote.is_new = true;

    let mut dress = product("4", "Linen Midi Dress", 7999);
    dress.description = "Breathable linen midi dress for warm days.".to_owned();
    dress.tags = vec!["dress".to_owned(), "linen".to_owned(), "summer".to_owned()];
    dress.discount = Some(20);
    dress.sizes = vec!["XS", "S", "M", "L"].into_iter().map(String::from).collect();
    dress.colors = vec!["White".to_owned(), "Sage".to_owned()];
    dress.is_new = true;

    Catalog::from_products(vec![sweater, blazer, tote, dress], Vec::new()).unwrap()
}

/// A context over the boutique catalog with fresh in-memory storage.
#[must_use]
pub fn boutique_context() -> StoreContext {
    StoreContext::new(
        boutique_catalog(),
        Arc::new(MemoryStore::new()),
        StoreConfig::default(),
    )
}

/// A context over the boutique catalog sharing the given storage, for
/// session-restore tests.
#[must_use]
pub fn boutique_context_with(storage: Arc<dyn KeyValueStore>) -> StoreContext {
    StoreContext::new(boutique_catalog(), storage, StoreConfig::default())
}

/// A checkout shipping address.
#[must_use]
pub fn sample_address() -> Address {
    Address {
        name: "Demo User".to_owned(),
        street: "1 Main St".to_owned(),
        city: "Springfield".to_owned(),
        state: "IL".to_owned(),
        zip_code: "62704".to_owned(),
        country: "US".to_owned(),
        phone: "555-0100".to_owned(),
    }
}
