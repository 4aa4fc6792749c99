//! Effective pricing and derived checkout figures.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PricingConfig;
use crate::models::Product;

/// The price a customer actually pays per unit: the list price with any
/// active percentage discount applied.
#[must_use]
pub fn effective_price(product: &Product) -> Decimal {
    product
        .discount
        .map_or_else(|| product.price.amount(), |d| product.price.discounted_by(d))
}

/// Derived checkout figures for a cart subtotal.
///
/// No currency rounding happens here; rounding to two decimals is a
/// presentation concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    /// Sum of effective line prices.
    pub subtotal: Decimal,
    /// Shipping charged: zero once the subtotal clears the free-shipping
    /// threshold, the flat rate otherwise.
    pub shipping: Decimal,
    /// Tax on the subtotal.
    pub tax: Decimal,
    /// What the customer pays: subtotal + shipping + tax.
    pub grand_total: Decimal,
}

impl CheckoutSummary {
    /// Compute the checkout figures for `subtotal` under `pricing`.
    #[must_use]
    pub fn compute(subtotal: Decimal, pricing: &PricingConfig) -> Self {
        let shipping = if subtotal > pricing.free_shipping_threshold {
            Decimal::ZERO
        } else {
            pricing.flat_shipping_rate
        };
        let tax = subtotal * pricing.tax_rate;

        Self {
            subtotal,
            shipping,
            tax,
            grand_total: subtotal + shipping + tax,
        }
    }
}
