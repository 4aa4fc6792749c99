//! Mock authentication service.
//!
//! There is no real identity provider: logging in with the demo address
//! yields the fixed demo account, and any other structurally valid email
//! materializes a fresh user on the spot, named after the email's local
//! part. The signed-in user is persisted under the `"user"` key so the
//! session survives a restart; a corrupt saved user is discarded and the
//! visitor simply starts signed out.

use std::sync::Arc;

use tracing::{debug, instrument, warn};
use uuid::Uuid;

use boutique_core::{Email, EmailError, UserId};

use crate::models::User;
use crate::storage::KeyValueStore;

/// Storage key for the persisted session user.
pub const USER_KEY: &str = "user";

/// The email that maps to the fixed demo account.
const DEMO_EMAIL: &str = "demo@example.com";

/// Authentication errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthError {
    /// Login requires both an email and a password.
    #[error("email and password are required")]
    MissingCredentials,
    /// Registration requires name, email, and password.
    #[error("all fields are required")]
    MissingFields,
    /// The email is structurally invalid.
    #[error(transparent)]
    InvalidEmail(#[from] EmailError),
    /// The operation requires a signed-in user.
    #[error("not signed in")]
    NotAuthenticated,
}

/// Mock authentication over the key-value storage seam.
pub struct AuthService {
    storage: Arc<dyn KeyValueStore>,
    current: Option<User>,
}

impl AuthService {
    /// Restore the session from storage. A missing, unreadable, or
    /// corrupt saved user starts the session signed out.
    #[must_use]
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let current = match storage.get(USER_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => {
                    debug!(user_id = %user.id, "session restored");
                    Some(user)
                }
                Err(e) => {
                    warn!(error = %e, "discarding corrupt saved user");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "failed to read saved user, starting signed out");
                None
            }
        };

        Self { storage, current }
    }

    /// The signed-in user, if any.
    #[must_use]
    pub const fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    /// Whether a user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingCredentials`] when either field is
    /// empty, or [`AuthError::InvalidEmail`] for a malformed email. Any
    /// valid credentials succeed; the password is never checked.
    #[instrument(skip(self, password))]
    pub fn login(&mut self, email: &str, password: &str) -> Result<&User, AuthError> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let email = Email::parse(email)?;
        let user = if email.as_str() == DEMO_EMAIL {
            User {
                id: UserId::new("1"),
                name: "Demo User".to_owned(),
                email,
                phone: None,
                avatar: None,
            }
        } else {
            User {
                id: UserId::new(Uuid::new_v4().to_string()),
                name: email.local_part().to_owned(),
                email,
                phone: None,
                avatar: None,
            }
        };

        debug!(user_id = %user.id, "signed in");
        self.current = Some(user);
        let user = self.current.as_ref().ok_or(AuthError::NotAuthenticated)?;
        self.persist_user(user);
        Ok(user)
    }

    /// Create an account and sign in.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MissingFields`] when any field is empty, or
    /// [`AuthError::InvalidEmail`] for a malformed email.
    #[instrument(skip(self, password))]
    pub fn register(&mut self, name: &str, email: &str, password: &str) -> Result<&User, AuthError> {
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let email = Email::parse(email)?;
        let user = User {
            id: UserId::new(Uuid::new_v4().to_string()),
            name: name.to_owned(),
            email,
            phone: None,
            avatar: None,
        };

        debug!(user_id = %user.id, "registered");
        self.current = Some(user);
        let user = self.current.as_ref().ok_or(AuthError::NotAuthenticated)?;
        self.persist_user(user);
        Ok(user)
    }

    /// Sign out and remove the persisted session user.
    pub fn logout(&mut self) {
        if let Some(user) = self.current.take() {
            debug!(user_id = %user.id, "signed out");
        }
        if let Err(e) = self.storage.remove(USER_KEY) {
            warn!(error = %e, "failed to remove saved user");
        }
    }

    /// Update the signed-in user's profile.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotAuthenticated`] when no user is signed in,
    /// or [`AuthError::MissingFields`] for an empty name.
    pub fn update_profile(
        &mut self,
        name: &str,
        phone: Option<&str>,
    ) -> Result<&User, AuthError> {
        if name.is_empty() {
            return Err(AuthError::MissingFields);
        }

        {
            let user = self.current.as_mut().ok_or(AuthError::NotAuthenticated)?;
            user.name = name.to_owned();
            if let Some(phone) = phone {
                user.phone = Some(phone.to_owned());
            }
        }

        let user = self.current.as_ref().ok_or(AuthError::NotAuthenticated)?;
        self.persist_user(user);
        Ok(user)
    }

    /// Write the session user to storage. Best effort.
    fn persist_user(&self, user: &User) {
        match serde_json::to_string(user) {
            Ok(json) => {
                if let Err(e) = self.storage.set(USER_KEY, &json) {
                    warn!(error = %e, "failed to save session user");
                }
            }
            Err(e) => warn!(error = %e, "failed to serialize session user"),
        }
    }
}
