//! User domain type.

use boutique_core::{Email, UserId};
use serde::{Deserialize, Serialize};

/// A storefront user.
///
/// Authentication is mocked: users are materialized at login and persisted
/// to the key-value collaborator under the `"user"` session key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login email address.
    pub email: Email,
    /// Optional contact phone.
    #[serde(default)]
    pub phone: Option<String>,
    /// Optional avatar image URL.
    #[serde(default)]
    pub avatar: Option<String>,
}
