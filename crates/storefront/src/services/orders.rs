//! Order placement and per-user order history.
//!
//! Checkout snapshots the cart into an [`Order`] - effective unit prices,
//! derived shipping and tax, a `pending` status - and appends it to the
//! user's history under `orders_{user_id}`. The history is read back
//! through the same key; a corrupt saved list reads as empty.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use boutique_core::{OrderId, OrderStatus, UserId};

use crate::cart::CartLedger;
use crate::config::PricingConfig;
use crate::models::{Address, Order, OrderLine, User};
use crate::pricing::CheckoutSummary;
use crate::storage::KeyValueStore;

/// Order placement errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum OrderError {
    /// Checkout requires at least one cart line.
    #[error("cannot place an order with an empty cart")]
    EmptyCart,
}

/// Order history over the key-value storage seam.
pub struct OrderService {
    storage: Arc<dyn KeyValueStore>,
}

fn storage_key(user_id: &UserId) -> String {
    format!("orders_{user_id}")
}

impl OrderService {
    /// Create the service.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Snapshot `cart` into a new pending order for `user` and persist it
    /// at the head of the user's history.
    ///
    /// The cart itself is not cleared here; the checkout flow clears it
    /// after a successful placement so the persisted cart stays in step.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::EmptyCart`] if the cart has no lines.
    #[instrument(skip(self, cart, user, shipping_address, pricing), fields(user_id = %user.id))]
    pub fn place_order(
        &self,
        cart: &CartLedger,
        user: &User,
        shipping_address: Address,
        payment_method: &str,
        pricing: &PricingConfig,
    ) -> Result<Order, OrderError> {
        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let items: Vec<OrderLine> = cart
            .lines()
            .iter()
            .map(|line| OrderLine {
                product_id: line.product.id.clone(),
                name: line.product.name.clone(),
                unit_price: line.unit_price(),
                quantity: line.quantity,
                size: line.size.clone(),
                color: line.color.clone(),
            })
            .collect();

        let summary = CheckoutSummary::compute(cart.total(), pricing);
        let now = Utc::now();
        let order = Order {
            id: OrderId::new(format!("ORD-{}", Uuid::new_v4().simple())),
            user_id: user.id.clone(),
            items,
            subtotal: summary.subtotal,
            shipping: summary.shipping,
            tax: summary.tax,
            total_amount: summary.grand_total,
            status: OrderStatus::Pending,
            shipping_address,
            payment_method: payment_method.to_owned(),
            created_at: now,
            updated_at: now,
        };

        let mut history = self.orders_for(&user.id);
        history.insert(0, order.clone());
        self.persist(&user.id, &history);

        debug!(order_id = %order.id, total = %order.total_amount, "order placed");
        Ok(order)
    }

    /// The user's order history, newest first. A missing, unreadable, or
    /// corrupt saved history reads as empty.
    #[must_use]
    pub fn orders_for(&self, user_id: &UserId) -> Vec<Order> {
        match self.storage.get(&storage_key(user_id)) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(orders) => orders,
                Err(e) => {
                    warn!(error = %e, %user_id, "discarding corrupt saved orders");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, %user_id, "failed to read saved orders");
                Vec::new()
            }
        }
    }

    /// Write the user's history to storage. Best effort.
    fn persist(&self, user_id: &UserId, orders: &[Order]) {
        match serde_json::to_string(orders) {
            Ok(json) => {
                if let Err(e) = self.storage.set(&storage_key(user_id), &json) {
                    warn!(error = %e, %user_id, "failed to save orders");
                }
            }
            Err(e) => warn!(error = %e, "failed to serialize orders"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::test_support::product;
    use boutique_core::Email;
    use rust_decimal::Decimal;

    fn demo_user() -> User {
        User {
            id: UserId::new("1"),
            name: "Demo User".to_owned(),
            email: Email::parse("demo@example.com").unwrap(),
            phone: None,
            avatar: None,
        }
    }

    fn sample_address() -> Address {
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

    #[test]
    fn test_empty_cart_is_rejected() {
        let service = OrderService::new(Arc::new(MemoryStore::new()));
        let result = service.place_order(
            &CartLedger::new(),
            &demo_user(),
            sample_address(),
            "credit-card",
            &PricingConfig::default(),
        );
        assert!(matches!(result, Err(OrderError::EmptyCart)));
    }

    #[test]
    fn test_order_snapshots_effective_prices_and_totals() {
        // 50.00 at 20% off, quantity 2 -> subtotal 80.00, shipping 10,
        // tax 8.00, total 98.00
        let mut discounted = product("1", "Silk Sweater", 5000);
        discounted.discount = Some(20);

        let mut cart = CartLedger::new();
        cart.add_item(Arc::new(discounted), 2, None, None);

        let service = OrderService::new(Arc::new(MemoryStore::new()));
        let order = service
            .place_order(
                &cart,
                &demo_user(),
                sample_address(),
                "credit-card",
                &PricingConfig::default(),
            )
            .unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.subtotal, Decimal::new(8000, 2));
        assert_eq!(order.shipping, Decimal::from(10));
        assert_eq!(order.tax, Decimal::new(800, 2));
        assert_eq!(order.total_amount, Decimal::from(98));
        assert_eq!(order.items.first().unwrap().unit_price, Decimal::new(4000, 2));
    }

    #[test]
    fn test_history_is_newest_first_and_persists() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let service = OrderService::new(Arc::clone(&storage));
        let user = demo_user();

        let mut cart = CartLedger::new();
        cart.add_one(Arc::new(product("1", "A", 1000)));
        let first = service
            .place_order(&cart, &user, sample_address(), "credit-card", &PricingConfig::default())
            .unwrap();

        cart.clear();
        cart.add_one(Arc::new(product("2", "B", 2000)));
        let second = service
            .place_order(&cart, &user, sample_address(), "credit-card", &PricingConfig::default())
            .unwrap();

        // A fresh service over the same storage sees both orders.
        let reread = OrderService::new(storage).orders_for(&user.id);
        assert_eq!(reread.len(), 2);
        assert_eq!(reread.first().unwrap().id, second.id);
        assert_eq!(reread.get(1).unwrap().id, first.id);
    }

    #[test]
    fn test_corrupt_saved_history_reads_as_empty() {
        let storage = MemoryStore::with_entries([(
            "orders_1".to_owned(),
            "[{broken".to_owned(),
        )]);
        let service = OrderService::new(Arc::new(storage));
        assert!(service.orders_for(&UserId::new("1")).is_empty());
    }

    #[test]
    fn test_histories_are_per_user() {
        let service = OrderService::new(Arc::new(MemoryStore::new()));
        let mut cart = CartLedger::new();
        cart.add_one(Arc::new(product("1", "A", 1000)));

        service
            .place_order(&cart, &demo_user(), sample_address(), "credit-card", &PricingConfig::default())
            .unwrap();

        assert!(service.orders_for(&UserId::new("someone-else")).is_empty());
    }
}
