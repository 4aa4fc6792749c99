//! Cart ledger and its persisted wrapper.
//!
//! [`CartLedger`] is the pure state container: lines keyed by
//! (product, size, color), merge-on-add, and derived totals. It never
//! touches storage, which keeps it independently testable.
//!
//! [`CartService`] wraps the ledger with write-through persistence under
//! the `"cart"` key: every mutation is followed by a best-effort save,
//! and a corrupt or unreadable saved cart degrades to an empty one.
//!
//! Removal breadth is carried over from the shipped storefront behavior:
//! `remove_item` and a remove-via-`update_quantity` match on product ID
//! alone, so two lines of the same product with different sizes are both
//! removed by one call.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use boutique_core::ProductId;

use crate::catalog::Catalog;
use crate::models::Product;
use crate::pricing::effective_price;
use crate::storage::KeyValueStore;

/// Storage key for the persisted cart.
pub const CART_KEY: &str = "cart";

/// One line in the cart: a product reference, a chosen variant, and a
/// quantity that is always at least 1.
#[derive(Debug, Clone)]
pub struct CartLine {
    /// Reference into the catalog, not a copy; catalog price changes are
    /// reflected live.
    pub product: Arc<Product>,
    /// Units of this variant. Never 0; setting a quantity to 0 removes
    /// the line instead.
    pub quantity: u32,
    /// Chosen size variant, if the product has sizes.
    pub size: Option<String>,
    /// Chosen color variant, if the product has colors.
    pub color: Option<String>,
}

impl CartLine {
    /// The effective per-unit price (discount applied).
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        effective_price(&self.product)
    }

    /// The line total (`unit_price * quantity`).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price() * Decimal::from(self.quantity)
    }

    fn matches_key(&self, product_id: &ProductId, size: Option<&str>, color: Option<&str>) -> bool {
        self.product.id == *product_id
            && self.size.as_deref() == size
            && self.color.as_deref() == color
    }
}

/// The cart state container.
///
/// Lines keep insertion order. At most one line exists per
/// (product, size, color) triple; adding the same key again merges
/// quantities.
#[derive(Debug, Clone, Default)]
pub struct CartLedger {
    lines: Vec<CartLine>,
}

impl CartLedger {
    /// Create an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add `quantity` units of a product variant.
    ///
    /// If a line with the same (product, size, color) key exists, its
    /// quantity is incremented; otherwise a new line is appended. A
    /// `quantity` of 0 is normalized to 1. Stock is not checked here;
    /// that is an add-time view concern.
    pub fn add_item(
        &mut self,
        product: Arc<Product>,
        quantity: u32,
        size: Option<String>,
        color: Option<String>,
    ) {
        let quantity = quantity.max(1);

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.matches_key(&product.id, size.as_deref(), color.as_deref()))
        {
            line.quantity = line.quantity.saturating_add(quantity);
            return;
        }

        self.lines.push(CartLine {
            product,
            quantity,
            size,
            color,
        });
    }

    /// Add a single unit with no variant selection.
    pub fn add_one(&mut self, product: Arc<Product>) {
        self.add_item(product, 1, None, None);
    }

    /// Remove every line whose product matches `product_id`, regardless
    /// of variant.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        self.lines.retain(|line| line.product.id != *product_id);
    }

    /// Set the quantity on every line whose product matches `product_id`.
    ///
    /// A quantity of 0 or below behaves as removal, with the same
    /// product-ID breadth as [`CartLedger::remove_item`].
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        for line in &mut self.lines {
            if line.product.id == *product_id {
                line.quantity = quantity;
            }
        }
    }

    /// Remove all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of effective line totals. Unrounded; rounding is a
    /// presentation concern.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Total units across all lines (the cart badge number).
    #[must_use]
    pub fn count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// The lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Persistence
// =============================================================================

/// The persisted shape of a cart line: just the key and quantity. The
/// product is re-linked against the catalog on load so the ledger keeps
/// holding references, not copies.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredCartLine {
    product_id: ProductId,
    quantity: u32,
    #[serde(default)]
    size: Option<String>,
    #[serde(default)]
    color: Option<String>,
}

/// [`CartLedger`] plus write-through persistence.
pub struct CartService {
    ledger: CartLedger,
    storage: Arc<dyn KeyValueStore>,
}

impl CartService {
    /// Restore the cart from storage, degrading to an empty cart when the
    /// saved value is missing, unreadable, or corrupt.
    ///
    /// Lines referencing products no longer in the catalog are dropped.
    #[must_use]
    pub fn load(catalog: &Catalog, storage: Arc<dyn KeyValueStore>) -> Self {
        let mut ledger = CartLedger::new();

        match storage.get(CART_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<StoredCartLine>>(&raw) {
                Ok(stored) => {
                    for line in stored {
                        let Some(product) = catalog.get(&line.product_id) else {
                            warn!(product_id = %line.product_id, "dropping cart line for unknown product");
                            continue;
                        };
                        ledger.add_item(
                            Arc::clone(product),
                            line.quantity,
                            line.size,
                            line.color,
                        );
                    }
                    debug!(lines = ledger.lines().len(), "cart restored from storage");
                }
                Err(e) => {
                    warn!(error = %e, "discarding corrupt saved cart");
                }
            },
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "failed to read saved cart, starting empty");
            }
        }

        Self { ledger, storage }
    }

    /// Read access to the underlying ledger.
    #[must_use]
    pub fn ledger(&self) -> &CartLedger {
        &self.ledger
    }

    /// See [`CartLedger::add_item`].
    pub fn add_item(
        &mut self,
        product: Arc<Product>,
        quantity: u32,
        size: Option<String>,
        color: Option<String>,
    ) {
        self.ledger.add_item(product, quantity, size, color);
        self.persist();
    }

    /// See [`CartLedger::remove_item`].
    pub fn remove_item(&mut self, product_id: &ProductId) {
        self.ledger.remove_item(product_id);
        self.persist();
    }

    /// See [`CartLedger::update_quantity`].
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        self.ledger.update_quantity(product_id, quantity);
        self.persist();
    }

    /// See [`CartLedger::clear`].
    pub fn clear(&mut self) {
        self.ledger.clear();
        self.persist();
    }

    /// Write the current lines to storage. Best effort: a failed write is
    /// logged and the in-memory state keeps going.
    fn persist(&self) {
        let stored: Vec<StoredCartLine> = self
            .ledger
            .lines()
            .iter()
            .map(|line| StoredCartLine {
                product_id: line.product.id.clone(),
                quantity: line.quantity,
                size: line.size.clone(),
                color: line.color.clone(),
            })
            .collect();

        match serde_json::to_string(&stored) {
            Ok(json) => {
                if let Err(e) = self.storage.set(CART_KEY, &json) {
                    warn!(error = %e, "failed to save cart");
                }
            }
            Err(e) => warn!(error = %e, "failed to serialize cart"),
        }
    }
}
