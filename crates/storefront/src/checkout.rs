//! Checkout: form validation and simulated order placement.
//!
//! Validation is a pure function from form contents to a field-to-message
//! map; submission proceeds only when the map is empty. Order placement is
//! simulated with a fixed artificial delay before resolving to a terminal
//! confirmation - the delay is cosmetic and carries no correctness contract.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use quickcart_core::Email;

use crate::cart::CartStore;
use crate::cart::pricing::CartTotals;
use crate::error::FieldErrors;
use crate::storage::StorageError;

/// Simulated payment-processing delay before an order resolves.
pub const PROCESSING_DELAY: Duration = Duration::from_millis(1500);

/// Errors that can occur when placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout was attempted with nothing in the cart.
    #[error("cart is empty")]
    EmptyCart,

    /// One or more form fields failed validation.
    #[error("invalid checkout form: {}", format_invalid_fields(.0))]
    Invalid(FieldErrors),

    /// The cleared cart could not be persisted.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

fn format_invalid_fields(errors: &FieldErrors) -> String {
    errors.keys().copied().collect::<Vec<_>>().join(", ")
}

// =============================================================================
// Enumerated Fields
// =============================================================================

/// Shipping destination country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Country {
    UnitedStates,
    Canada,
    UnitedKingdom,
    Australia,
    #[default]
    India,
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnitedStates => write!(f, "United States"),
            Self::Canada => write!(f, "Canada"),
            Self::UnitedKingdom => write!(f, "United Kingdom"),
            Self::Australia => write!(f, "Australia"),
            Self::India => write!(f, "India"),
        }
    }
}

impl std::str::FromStr for Country {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "united states" | "united-states" | "us" => Ok(Self::UnitedStates),
            "canada" | "ca" => Ok(Self::Canada),
            "united kingdom" | "united-kingdom" | "uk" => Ok(Self::UnitedKingdom),
            "australia" | "au" => Ok(Self::Australia),
            "india" | "in" => Ok(Self::India),
            _ => Err(format!("unsupported country: {s}")),
        }
    }
}

/// Accepted payment methods. No real gateway sits behind any of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    Paypal,
    ApplePay,
    GooglePay,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreditCard => write!(f, "Credit Card"),
            Self::Paypal => write!(f, "PayPal"),
            Self::ApplePay => write!(f, "Apple Pay"),
            Self::GooglePay => write!(f, "Google Pay"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "credit-card" | "creditcard" => Ok(Self::CreditCard),
            "paypal" => Ok(Self::Paypal),
            "apple-pay" | "applepay" => Ok(Self::ApplePay),
            "google-pay" | "googlepay" => Ok(Self::GooglePay),
            _ => Err(format!("unsupported payment method: {s}")),
        }
    }
}

// =============================================================================
// Checkout Form
// =============================================================================

/// Flat record of checkout fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub country: Country,
    pub payment_method: PaymentMethod,
}

impl CheckoutForm {
    /// Validate all required fields.
    ///
    /// Returns a message for every failing field; an empty map means the form
    /// may be submitted. This has no side effects.
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if self.first_name.is_empty() {
            errors.insert("first_name", "First name is required".to_string());
        }
        if self.last_name.is_empty() {
            errors.insert("last_name", "Last name is required".to_string());
        }
        if self.email.is_empty() {
            errors.insert("email", "Email is required".to_string());
        } else if Email::parse(&self.email).is_err() {
            errors.insert("email", "Email is invalid".to_string());
        }
        if self.phone.is_empty() {
            errors.insert("phone", "Phone number is required".to_string());
        }
        if self.address.is_empty() {
            errors.insert("address", "Address is required".to_string());
        }
        if self.city.is_empty() {
            errors.insert("city", "City is required".to_string());
        }
        if self.zip_code.is_empty() {
            errors.insert("zip_code", "ZIP code is required".to_string());
        }

        errors
    }
}

/// Terminal "order complete" state.
#[derive(Debug, Clone)]
pub struct OrderConfirmation {
    /// Generated order reference (e.g., `ORD-9F2C41AB`).
    pub reference: String,
    /// Totals captured at placement time.
    pub totals: CartTotals,
}

/// Place an order for the current cart contents.
///
/// Validates the form, simulates payment processing for
/// [`PROCESSING_DELAY`], clears the cart, and resolves to a confirmation.
///
/// # Errors
///
/// - [`CheckoutError::EmptyCart`] if there is nothing to order.
/// - [`CheckoutError::Invalid`] carrying the field errors if validation fails.
/// - [`CheckoutError::Storage`] if the cleared cart cannot be persisted.
pub async fn place_order(
    form: &CheckoutForm,
    cart: &mut CartStore,
) -> Result<OrderConfirmation, CheckoutError> {
    if cart.cart().is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let errors = form.validate();
    if !errors.is_empty() {
        return Err(CheckoutError::Invalid(errors));
    }

    let totals = cart.totals();

    tokio::time::sleep(PROCESSING_DELAY).await;

    cart.clear()?;

    let reference = order_reference();
    info!(
        reference,
        items = totals.item_count,
        payment_method = %form.payment_method,
        "Order placed"
    );

    Ok(OrderConfirmation { reference, totals })
}

/// Generate a short human-readable order reference.
fn order_reference() -> String {
    let id = Uuid::new_v4().simple().to_string();
    let short: String = id.chars().take(8).collect();
    format!("ORD-{}", short.to_uppercase())
}
