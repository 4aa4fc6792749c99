//! Cart persistence and checkout flows.

use std::sync::Arc;

use boutique_core::ProductId;
use boutique_integration_tests::{
    boutique_context, boutique_context_with, product, sample_address, scenario_catalog,
};
use boutique_storefront::{
    CartService, KeyValueStore, MemoryStore, PricingConfig, StoreConfig, StoreContext,
};
use rust_decimal::Decimal;

#[test]
fn cart_survives_a_context_rebuild() {
    let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());

    {
        let mut ctx = boutique_context_with(Arc::clone(&storage));
        let sweater = Arc::clone(ctx.catalog().get(&ProductId::new("1")).expect("sweater"));
        ctx.cart_mut()
            .add_item(sweater, 2, Some("M".to_owned()), Some("Navy".to_owned()));
    }

    let restored = boutique_context_with(storage);
    let lines = restored.cart().ledger().lines();
    assert_eq!(lines.len(), 1);
    let line = lines.first().expect("line");
    assert_eq!(line.quantity, 2);
    assert_eq!(line.size.as_deref(), Some("M"));
    assert_eq!(line.color.as_deref(), Some("Navy"));
}

#[test]
fn corrupt_saved_cart_recovers_to_empty() {
    let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::with_entries([(
        "cart".to_owned(),
        "{{{{".to_owned(),
    )]));

    let ctx = boutique_context_with(storage);
    assert!(ctx.cart().ledger().is_empty());
}

#[test]
fn remove_item_spans_every_variant_of_the_product() {
    let mut ctx = boutique_context();
    let sweater = Arc::clone(ctx.catalog().get(&ProductId::new("1")).expect("sweater"));

    ctx.cart_mut()
        .add_item(Arc::clone(&sweater), 1, Some("S".to_owned()), None);
    ctx.cart_mut()
        .add_item(sweater, 1, Some("L".to_owned()), None);
    assert_eq!(ctx.cart().ledger().lines().len(), 2);

    ctx.cart_mut().remove_item(&ProductId::new("1"));
    assert!(ctx.cart().ledger().is_empty());
}

#[test]
fn checkout_figures_match_store_policy() {
    // One discounted line: 50.00 at 20% off, quantity 2 -> subtotal
    // 80.00, shipping 10, tax 8.00.
    let mut discounted = product("sale", "Sale Cardigan", 5000);
    discounted.discount = Some(20);
    let catalog = boutique_storefront::Catalog::from_products(
        vec![discounted, product("full", "Full Price Coat", 20000)],
        Vec::new(),
    )
    .expect("catalog");

    let mut ctx = StoreContext::new(catalog, Arc::new(MemoryStore::new()), StoreConfig::default());

    let sale = Arc::clone(ctx.catalog().get(&ProductId::new("sale")).expect("sale"));
    ctx.cart_mut().add_item(sale, 2, None, None);

    let summary = ctx.cart_summary();
    assert_eq!(summary.subtotal, Decimal::new(8000, 2));
    assert_eq!(summary.shipping, Decimal::from(10));
    assert_eq!(summary.tax, Decimal::new(800, 2));
    assert_eq!(summary.grand_total, Decimal::from(98));

    // Adding the 200.00 coat pushes the subtotal over the free-shipping
    // threshold.
    let coat = Arc::clone(ctx.catalog().get(&ProductId::new("full")).expect("coat"));
    ctx.cart_mut().add_item(coat, 1, None, None);
    assert_eq!(ctx.cart_summary().shipping, Decimal::ZERO);
}

#[test]
fn custom_pricing_config_flows_through_checkout() {
    let config = StoreConfig {
        pricing: PricingConfig {
            free_shipping_threshold: Decimal::from(20),
            flat_shipping_rate: Decimal::from(3),
            tax_rate: Decimal::new(5, 2),
        },
        ..StoreConfig::default()
    };

    let mut ctx = StoreContext::new(scenario_catalog(), Arc::new(MemoryStore::new()), config);
    let tee = Arc::clone(ctx.catalog().get(&ProductId::new("tee")).expect("tee"));
    ctx.cart_mut().add_item(tee, 1, None, None);

    let summary = ctx.cart_summary();
    assert_eq!(summary.subtotal, Decimal::from(10));
    assert_eq!(summary.shipping, Decimal::from(3));
    assert_eq!(summary.tax, Decimal::new(50, 2));
}

#[test]
fn placing_an_order_snapshots_the_cart_and_clears_it() {
    let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let mut ctx = boutique_context_with(Arc::clone(&storage));

    ctx.login("demo@example.com", "pw").expect("login");

    // The blazer is 149.99 at 15% off.
    let blazer = Arc::clone(ctx.catalog().get(&ProductId::new("2")).expect("blazer"));
    ctx.cart_mut()
        .add_item(blazer, 1, Some("M".to_owned()), None);

    let order = ctx
        .place_order(sample_address(), "credit-card")
        .expect("order");

    assert_eq!(order.subtotal, Decimal::new(1_274_915, 4));
    assert_eq!(order.shipping, Decimal::ZERO);
    assert_eq!(
        order.items.first().map(|l| l.size.as_deref()),
        Some(Some("M"))
    );
    assert!(ctx.cart().ledger().is_empty());

    // The cleared cart is what persists: a rebuilt context starts empty
    // but still sees the order history.
    let restored = boutique_context_with(storage);
    assert!(restored.cart().ledger().is_empty());
    assert_eq!(restored.my_orders().len(), 1);
    assert_eq!(
        restored.my_orders().first().map(|o| o.id.clone()),
        Some(order.id)
    );
}

#[test]
fn order_requires_a_signed_in_user() {
    let mut ctx = boutique_context();
    let sweater = Arc::clone(ctx.catalog().get(&ProductId::new("1")).expect("sweater"));
    ctx.cart_mut().add_item(sweater, 1, None, None);

    assert!(ctx.place_order(sample_address(), "credit-card").is_err());
    // The cart is untouched by the failed attempt.
    assert_eq!(ctx.cart().ledger().count(), 1);
}

#[test]
fn saved_cart_lines_for_retired_products_are_dropped() {
    let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());

    // Save a cart against a catalog that carries the product...
    {
        let catalog = boutique_storefront::Catalog::from_products(
            vec![product("retired", "Discontinued Wrap", 4500)],
            Vec::new(),
        )
        .expect("catalog");
        let mut cart = CartService::load(&catalog, Arc::clone(&storage));
        let wrap = Arc::clone(catalog.get(&ProductId::new("retired")).expect("wrap"));
        cart.add_item(wrap, 1, None, None);
    }

    // ...then reload it against a catalog that no longer does.
    let ctx = boutique_context_with(storage);
    assert!(ctx.cart().ledger().is_empty());
}
