//! Order and address domain types.
//!
//! An order is an immutable snapshot taken at checkout: line prices are
//! captured at their effective (post-discount) value, so later catalog
//! changes never rewrite order history.

use boutique_core::{OrderId, OrderStatus, ProductId, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A shipping address captured from the checkout form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub phone: String,
}

/// A single purchased line within an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    /// The product this line was created from.
    pub product_id: ProductId,
    /// Product name at purchase time.
    pub name: String,
    /// Effective unit price at purchase time (discount applied).
    pub unit_price: Decimal,
    /// Units purchased.
    pub quantity: u32,
    /// Chosen size variant, if any.
    #[serde(default)]
    pub size: Option<String>,
    /// Chosen color variant, if any.
    #[serde(default)]
    pub color: Option<String>,
}

impl OrderLine {
    /// The line total (`unit_price * quantity`).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// The user who placed the order.
    pub user_id: UserId,
    /// Purchased lines.
    pub items: Vec<OrderLine>,
    /// Sum of line totals before shipping and tax.
    pub subtotal: Decimal,
    /// Shipping charged at checkout.
    pub shipping: Decimal,
    /// Tax charged at checkout.
    pub tax: Decimal,
    /// Grand total actually charged.
    pub total_amount: Decimal,
    /// Lifecycle status; new orders start as `pending`.
    pub status: OrderStatus,
    /// Where the order ships.
    pub shipping_address: Address,
    /// Payment method label (e.g., "credit-card").
    pub payment_method: String,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
    /// When the order last changed.
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }
}
