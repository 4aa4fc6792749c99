//! Session-scoped store context.
//!
//! One [`StoreContext`] is constructed at process start from the catalog,
//! a storage implementation, and configuration, then passed by reference
//! to every view. It owns the auth, cart, favorites, and order services
//! and keeps the cross-service choreography (login loads favorites,
//! logout unloads them, checkout clears the cart) in one place.
//!
//! Everything is synchronous and single-threaded: views drive the engine
//! through discrete, serialized calls, so no internal locking exists. A
//! server embedding would wrap the whole context in a per-user lock
//! rather than redesign the services.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::cart::CartService;
use crate::config::StoreConfig;
use crate::error::Result;
use crate::favorites::FavoritesService;
use crate::filter::FilterSet;
use crate::models::{Address, Order, Product, User};
use crate::pricing::CheckoutSummary;
use crate::search;
use crate::services::auth::{AuthError, AuthService};
use crate::services::orders::OrderService;
use crate::sort::SortOrder;
use crate::storage::KeyValueStore;

use boutique_core::ProductId;

/// The engine's shared session state.
pub struct StoreContext {
    catalog: Catalog,
    config: StoreConfig,
    auth: AuthService,
    cart: CartService,
    favorites: FavoritesService,
    orders: OrderService,
}

impl StoreContext {
    /// Build the context: restore the session user and saved cart from
    /// storage, and load favorites if a user was restored.
    #[must_use]
    pub fn new(catalog: Catalog, storage: Arc<dyn KeyValueStore>, config: StoreConfig) -> Self {
        let auth = AuthService::load(Arc::clone(&storage));
        let cart = CartService::load(&catalog, Arc::clone(&storage));
        let mut favorites = FavoritesService::new(Arc::clone(&storage));
        if let Some(user) = auth.current_user() {
            favorites.load_for_user(&user.id);
        }
        let orders = OrderService::new(storage);

        Self {
            catalog,
            config,
            auth,
            cart,
            favorites,
            orders,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The session catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The engine configuration.
    #[must_use]
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The authentication service.
    #[must_use]
    pub const fn auth(&self) -> &AuthService {
        &self.auth
    }

    /// The cart service.
    #[must_use]
    pub const fn cart(&self) -> &CartService {
        &self.cart
    }

    /// Mutable cart access for add/update/remove flows.
    pub const fn cart_mut(&mut self) -> &mut CartService {
        &mut self.cart
    }

    /// The favorites service.
    #[must_use]
    pub const fn favorites(&self) -> &FavoritesService {
        &self.favorites
    }

    /// The order history service.
    #[must_use]
    pub const fn orders(&self) -> &OrderService {
        &self.orders
    }

    // =========================================================================
    // Session flows
    // =========================================================================

    /// Sign in and load the user's favorites.
    ///
    /// # Errors
    ///
    /// Propagates [`AuthError`] from the credential checks.
    pub fn login(&mut self, email: &str, password: &str) -> std::result::Result<User, AuthError> {
        let user = self.auth.login(email, password)?.clone();
        self.favorites.load_for_user(&user.id);
        Ok(user)
    }

    /// Register, sign in, and start an empty favorites set.
    ///
    /// # Errors
    ///
    /// Propagates [`AuthError`] from the field checks.
    pub fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> std::result::Result<User, AuthError> {
        let user = self.auth.register(name, email, password)?.clone();
        self.favorites.load_for_user(&user.id);
        Ok(user)
    }

    /// Sign out and unload favorites. The favorites storage is kept, so
    /// they come back at the next login.
    pub fn logout(&mut self) {
        self.auth.logout();
        self.favorites.unload();
    }

    /// Toggle a favorite. A silent no-op while signed out; the view layer
    /// handles the login redirect.
    pub fn toggle_favorite(&mut self, product_id: &ProductId) {
        self.favorites.toggle_favorite(product_id);
    }

    // =========================================================================
    // Derived views
    // =========================================================================

    /// The shop view: filter, optional text query, stable sort.
    #[must_use]
    pub fn browse(
        &self,
        filters: &FilterSet,
        query: Option<&str>,
        sort: SortOrder,
    ) -> Vec<Arc<Product>> {
        self.catalog.browse(filters, query, sort)
    }

    /// Global search over the catalog, capped per configuration.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<Arc<Product>> {
        search::search(&self.catalog, query, &self.config.search)
    }

    /// Checkout figures for the current cart under the configured pricing
    /// policy.
    #[must_use]
    pub fn cart_summary(&self) -> CheckoutSummary {
        CheckoutSummary::compute(self.cart.ledger().total(), &self.config.pricing)
    }

    /// The signed-in user's order history, newest first. Empty while
    /// signed out.
    #[must_use]
    pub fn my_orders(&self) -> Vec<Order> {
        self.auth
            .current_user()
            .map(|user| self.orders.orders_for(&user.id))
            .unwrap_or_default()
    }

    /// Place an order from the current cart, then clear the cart.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotAuthenticated`] while signed out, or
    /// [`crate::services::orders::OrderError::EmptyCart`] for an empty
    /// cart. The cart is only cleared after a successful placement.
    pub fn place_order(&mut self, shipping_address: Address, payment_method: &str) -> Result<Order> {
        let user = self
            .auth
            .current_user()
            .ok_or(AuthError::NotAuthenticated)?
            .clone();

        let order = self.orders.place_order(
            self.cart.ledger(),
            &user,
            shipping_address,
            payment_method,
            &self.config.pricing,
        )?;

        self.cart.clear();
        Ok(order)
    }
}
