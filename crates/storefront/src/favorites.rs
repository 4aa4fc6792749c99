//! Per-user favorites.
//!
//! Favorites are scoped to the authenticated user and persisted under
//! `favorites_{user_id}`. The service moves through a small session state
//! machine: `Unloaded -> Loading -> Ready` when a user signs in, back to
//! `Unloaded` on logout. A storage read failure lands in `Failed`, which
//! reads as an empty set and rejects mutations without ever surfacing an
//! error to the caller.
//!
//! Mutations while no user is loaded are silent no-ops; redirecting an
//! unauthenticated visitor to the login page is the view layer's job.
//! Logout clears the in-memory set but leaves storage untouched, so the
//! set comes back on the next login.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, warn};

use boutique_core::{ProductId, UserId};

use crate::catalog::Catalog;
use crate::models::Product;
use crate::storage::KeyValueStore;

/// Session state of the favorites set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FavoritesState {
    /// No user loaded.
    #[default]
    Unloaded,
    /// A load is in progress.
    Loading,
    /// The set is loaded and mutable.
    Ready,
    /// Storage could not be read; behaves as an empty, read-only set.
    Failed,
}

/// The per-user favorites service.
pub struct FavoritesService {
    storage: Arc<dyn KeyValueStore>,
    state: FavoritesState,
    user_id: Option<UserId>,
    favorites: BTreeSet<ProductId>,
}

fn storage_key(user_id: &UserId) -> String {
    format!("favorites_{user_id}")
}

impl FavoritesService {
    /// Create an unloaded service.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            state: FavoritesState::Unloaded,
            user_id: None,
            favorites: BTreeSet::new(),
        }
    }

    /// Load the favorites set for a signing-in user, replacing whatever
    /// was loaded before.
    ///
    /// A corrupt saved value is discarded and the user starts empty; an
    /// unreadable store lands in [`FavoritesState::Failed`].
    pub fn load_for_user(&mut self, user_id: &UserId) {
        self.state = FavoritesState::Loading;
        self.user_id = Some(user_id.clone());
        self.favorites.clear();

        match self.storage.get(&storage_key(user_id)) {
            Ok(Some(raw)) => {
                match serde_json::from_str::<Vec<ProductId>>(&raw) {
                    Ok(ids) => self.favorites = ids.into_iter().collect(),
                    Err(e) => warn!(error = %e, %user_id, "discarding corrupt saved favorites"),
                }
                self.state = FavoritesState::Ready;
            }
            Ok(None) => self.state = FavoritesState::Ready,
            Err(e) => {
                warn!(error = %e, %user_id, "failed to read favorites, marking failed");
                self.state = FavoritesState::Failed;
            }
        }

        debug!(%user_id, count = self.favorites.len(), state = ?self.state, "favorites loaded");
    }

    /// Drop the in-memory set on logout. Storage is untouched.
    pub fn unload(&mut self) {
        self.state = FavoritesState::Unloaded;
        self.user_id = None;
        self.favorites.clear();
    }

    /// Current session state.
    #[must_use]
    pub const fn state(&self) -> FavoritesState {
        self.state
    }

    /// Whether mutations are currently accepted.
    #[must_use]
    pub fn is_authorized(&self) -> bool {
        self.state == FavoritesState::Ready && self.user_id.is_some()
    }

    /// Whether `product_id` is in the active user's set. Always `false`
    /// when no user is loaded.
    #[must_use]
    pub fn is_favorite(&self, product_id: &ProductId) -> bool {
        self.favorites.contains(product_id)
    }

    /// Add `product_id` to the set. Silent no-op when unauthorized.
    pub fn add(&mut self, product_id: &ProductId) {
        if !self.is_authorized() {
            return;
        }
        if self.favorites.insert(product_id.clone()) {
            self.persist();
        }
    }

    /// Remove `product_id` from the set. Silent no-op when unauthorized.
    pub fn remove(&mut self, product_id: &ProductId) {
        if !self.is_authorized() {
            return;
        }
        if self.favorites.remove(product_id) {
            self.persist();
        }
    }

    /// Toggle membership: add if absent, remove if present. Toggling
    /// twice always restores the original state.
    pub fn toggle_favorite(&mut self, product_id: &ProductId) {
        if self.is_favorite(product_id) {
            self.remove(product_id);
        } else {
            self.add(product_id);
        }
    }

    /// Number of favorites for the active user.
    #[must_use]
    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    /// Whether the active user has no favorites.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    /// The favorite product IDs, in stable order.
    pub fn ids(&self) -> impl Iterator<Item = &ProductId> {
        self.favorites.iter()
    }

    /// Resolve the set against the catalog, skipping IDs the catalog no
    /// longer carries.
    #[must_use]
    pub fn favorite_products(&self, catalog: &Catalog) -> Vec<Arc<Product>> {
        self.favorites
            .iter()
            .filter_map(|id| catalog.get(id).cloned())
            .collect()
    }

    /// Write the active user's set to storage. Best effort: a failed
    /// write is logged and the in-memory set keeps going.
    fn persist(&self) {
        let Some(user_id) = &self.user_id else {
            return;
        };

        let ids: Vec<&ProductId> = self.favorites.iter().collect();
        match serde_json::to_string(&ids) {
            Ok(json) => {
                if let Err(e) = self.storage.set(&storage_key(user_id), &json) {
                    warn!(error = %e, %user_id, "failed to save favorites");
                }
            }
            Err(e) => warn!(error = %e, "failed to serialize favorites"),
        }
    }
}
