//! Checkout view: form validation and order placement.

use clap::Args;

use quickcart_storefront::cart::pricing::format_usd;
use quickcart_storefront::checkout::{self, CheckoutError, CheckoutForm, Country, PaymentMethod};
use quickcart_storefront::error::{AppError, Result};
use quickcart_storefront::state::Session;

/// Checkout form fields.
#[derive(Args)]
pub struct CheckoutArgs {
    /// First name
    #[arg(long, default_value = "")]
    pub first_name: String,

    /// Last name
    #[arg(long, default_value = "")]
    pub last_name: String,

    /// Email address
    #[arg(long, default_value = "")]
    pub email: String,

    /// Phone number
    #[arg(long, default_value = "")]
    pub phone: String,

    /// Street address
    #[arg(long, default_value = "")]
    pub address: String,

    /// City
    #[arg(long, default_value = "")]
    pub city: String,

    /// ZIP code
    #[arg(long, default_value = "")]
    pub zip_code: String,

    /// Shipping country
    #[arg(long, default_value = "india")]
    pub country: Country,

    /// Payment method (credit-card, paypal, apple-pay, google-pay)
    #[arg(long, default_value = "credit-card")]
    pub payment: PaymentMethod,
}

impl From<CheckoutArgs> for CheckoutForm {
    fn from(args: CheckoutArgs) -> Self {
        Self {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            phone: args.phone,
            address: args.address,
            city: args.city,
            zip_code: args.zip_code,
            country: args.country,
            payment_method: args.payment,
        }
    }
}

/// Validate the form and place the order.
pub async fn run(session: &mut Session, args: CheckoutArgs) -> Result<()> {
    let form = CheckoutForm::from(args);

    println!("Processing...");
    match checkout::place_order(&form, &mut session.cart).await {
        Ok(confirmation) => {
            println!();
            println!("Thank You for Your Order!");
            println!("Your order has been placed successfully.");
            println!();
            println!("Order reference: {}", confirmation.reference);
            println!("Items:    {:>10}", confirmation.totals.item_count);
            println!("Subtotal  {:>10}", format_usd(confirmation.totals.subtotal));
            println!("Tax (7%)  {:>10}", format_usd(confirmation.totals.tax));
            println!("Shipping  {:>10}", format_usd(confirmation.totals.shipping));
            println!("Total     {:>10}", format_usd(confirmation.totals.total));
            Ok(())
        }
        Err(CheckoutError::EmptyCart) => {
            println!("Your cart is empty");
            println!("Add something before checking out");
            Ok(())
        }
        Err(CheckoutError::Invalid(errors)) => {
            println!("Please fix the following and try again:");
            for (field, message) in &errors {
                println!("  {field}: {message}");
            }
            Ok(())
        }
        Err(e @ CheckoutError::Storage(_)) => Err(AppError::from(e)),
    }
}
