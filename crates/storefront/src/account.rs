//! Account: signup validation, persisted profile, mock order history.
//!
//! There is no authentication backend. Signup validates the form and writes
//! the profile to the key-value store; the account view reads it back,
//! silently substituting a placeholder profile when nothing usable is stored.
//! Order history is fixed demonstration data - orders are not persisted
//! beyond the session.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use quickcart_core::{Email, OrderStatus, Price};

use crate::error::FieldErrors;
use crate::storage::{self, KvStore, StorageError, keys};

// =============================================================================
// Profile
// =============================================================================

/// Locally stored user profile.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Display name.
    pub name: String,
    /// Email address as entered at signup.
    pub email: String,
    /// Password as entered at signup. Mock data only - nothing authenticates
    /// against it.
    pub password: String,
}

impl Default for Profile {
    /// Placeholder profile shown when no signup has happened.
    fn default() -> Self {
        Self {
            name: "UserName".to_string(),
            email: "ABC@gmail.com".to_string(),
            password: "555@555".to_string(),
        }
    }
}

impl std::fmt::Debug for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profile")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Load the stored profile, falling back to the placeholder on absence or
/// parse failure.
#[must_use]
pub fn load_profile(store: &dyn KvStore) -> Profile {
    storage::load_or_default(store, keys::PROFILE)
}

/// Persist the profile (called at signup).
///
/// # Errors
///
/// Returns `StorageError` if the profile cannot be written.
pub fn save_profile(store: &dyn KvStore, profile: &Profile) -> Result<(), StorageError> {
    storage::store_json(store, keys::PROFILE, profile)
}

// =============================================================================
// Signup
// =============================================================================

/// Signup form fields.
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    /// Validate all fields.
    ///
    /// Returns a message for every failing field; an empty map means the
    /// account can be created.
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if self.username.is_empty() {
            errors.insert("username", "Username is required".to_string());
        }
        if self.email.is_empty() {
            errors.insert("email", "Email is required".to_string());
        } else if Email::parse(&self.email).is_err() {
            errors.insert("email", "Email is invalid".to_string());
        }
        if self.password.is_empty() {
            errors.insert("password", "Password is required".to_string());
        }
        if self.confirm_password.is_empty() {
            errors.insert("confirm_password", "Password confirmation is required".to_string());
        } else if self.password != self.confirm_password {
            errors.insert("confirm_password", "Passwords do not match".to_string());
        }

        errors
    }
}

/// Validate the signup form and persist the resulting profile.
///
/// The validation outcome is nested inside the storage result:
/// `Ok(Err(errors))` means the form was rejected and nothing was stored.
///
/// # Errors
///
/// Returns `StorageError` if the profile cannot be written.
pub fn sign_up(
    store: &dyn KvStore,
    form: &SignupForm,
) -> Result<Result<Profile, FieldErrors>, StorageError> {
    let errors = form.validate();
    if !errors.is_empty() {
        return Ok(Err(errors));
    }

    let profile = Profile {
        name: form.username.clone(),
        email: form.email.clone(),
        password: form.password.clone(),
    };
    save_profile(store, &profile)?;
    info!(name = %profile.name, "Account created");

    Ok(Ok(profile))
}

// =============================================================================
// Order History (mock)
// =============================================================================

/// One entry in the account page's order history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSummary {
    /// Order reference.
    pub reference: String,
    /// Date the order was placed.
    pub placed_on: NaiveDate,
    /// Order total.
    pub total: Price,
    /// Fulfillment status.
    pub status: OrderStatus,
    /// Number of items in the order.
    pub item_count: u32,
}

/// Fixed demonstration order history for the account view.
#[must_use]
pub fn order_history() -> Vec<OrderSummary> {
    fn entry(reference: &str, (y, m, d): (i32, u32, u32), cents: i64, status: OrderStatus, item_count: u32) -> OrderSummary {
        OrderSummary {
            reference: reference.to_string(),
            placed_on: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
            total: Price::from_cents(cents).unwrap_or(Price::ZERO),
            status,
            item_count,
        }
    }

    vec![
        entry("ORD-12345", (2025, 4, 1), 12_999, OrderStatus::Delivered, 3),
        entry("ORD-12344", (2025, 3, 15), 7_950, OrderStatus::Shipped, 2),
        entry("ORD-12343", (2025, 2, 28), 24_075, OrderStatus::Delivered, 4),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::storage::MemoryStore;

    use super::*;

    fn valid_form() -> SignupForm {
        SignupForm {
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "correct-horse".to_string(),
            confirm_password: "correct-horse".to_string(),
        }
    }

    #[test]
    fn test_missing_profile_yields_placeholder() {
        let store = MemoryStore::new();
        let profile = load_profile(&store);
        assert_eq!(profile, Profile::default());
        assert_eq!(profile.name, "UserName");
    }

    #[test]
    fn test_corrupt_profile_yields_placeholder() {
        let store = MemoryStore::new();
        store.put(keys::PROFILE, b"][").unwrap();
        assert_eq!(load_profile(&store), Profile::default());
    }

    #[test]
    fn test_signup_persists_profile() {
        let store = MemoryStore::new();
        let profile = sign_up(&store, &valid_form()).unwrap().unwrap();

        assert_eq!(profile.name, "ada");
        assert_eq!(load_profile(&store), profile);
    }

    #[test]
    fn test_signup_rejects_mismatched_passwords() {
        let store = MemoryStore::new();
        let mut form = valid_form();
        form.confirm_password = "different".to_string();

        let errors = sign_up(&store, &form).unwrap().unwrap_err();
        assert_eq!(
            errors.get("confirm_password").unwrap(),
            "Passwords do not match"
        );
        // Nothing was stored
        assert!(store.get(keys::PROFILE).unwrap().is_none());
    }

    #[test]
    fn test_signup_requires_all_fields() {
        let errors = SignupForm::default().validate();
        for field in ["username", "email", "password", "confirm_password"] {
            assert!(errors.contains_key(field), "missing error for {field}");
        }
    }

    #[test]
    fn test_signup_rejects_invalid_email() {
        let mut form = valid_form();
        form.email = "not-an-email".to_string();
        let errors = form.validate();
        assert_eq!(errors.get("email").unwrap(), "Email is invalid");
    }

    #[test]
    fn test_profile_debug_redacts_password() {
        let profile = Profile {
            name: "ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "super-secret".to_string(),
        };
        let debug = format!("{profile:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_order_history_shape() {
        let orders = order_history();
        assert_eq!(orders.len(), 3);
        assert_eq!(orders[0].reference, "ORD-12345");
        assert_eq!(orders[0].status, OrderStatus::Delivered);
        assert_eq!(orders[1].total, Price::from_cents(7_950).unwrap());
    }
}
