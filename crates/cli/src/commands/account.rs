//! Account view: profile, signup, mock order history.

use clap::Subcommand;

use quickcart_storefront::account::{self, SignupForm};
use quickcart_storefront::error::Result;
use quickcart_storefront::state::AppState;

/// Account operations.
#[derive(Subcommand)]
pub enum AccountAction {
    /// Show the stored profile
    Show,
    /// Create an account (overwrites any stored profile)
    Signup {
        /// Display name
        #[arg(long)]
        username: String,

        /// Email address
        #[arg(long)]
        email: String,

        /// Password
        #[arg(long)]
        password: String,

        /// Password, again
        #[arg(long)]
        confirm_password: String,
    },
    /// Show order history
    Orders,
}

/// Dispatch an account operation.
pub fn run(state: &AppState, action: AccountAction) -> Result<()> {
    let store = state.storage().as_ref();

    match action {
        AccountAction::Show => {
            let profile = account::load_profile(store);
            println!("My Account");
            println!();
            println!("Name:   {}", profile.name);
            println!("Email:  {}", profile.email);
            Ok(())
        }
        AccountAction::Signup {
            username,
            email,
            password,
            confirm_password,
        } => {
            let form = SignupForm {
                username,
                email,
                password,
                confirm_password,
            };
            match account::sign_up(store, &form)? {
                Ok(profile) => {
                    println!("Account Created Successfully");
                    println!("Welcome, {}!", profile.name);
                }
                Err(errors) => {
                    println!("Please fix the following and try again:");
                    for (field, message) in &errors {
                        println!("  {field}: {message}");
                    }
                }
            }
            Ok(())
        }
        AccountAction::Orders => {
            println!("Order History");
            println!();
            for order in account::order_history() {
                println!(
                    "{}  {}  {:>10}  {:<10}  {} item(s)",
                    order.reference,
                    order.placed_on,
                    order.total.to_string(),
                    order.status.to_string(),
                    order.item_count,
                );
            }
            Ok(())
        }
    }
}
