//! Cart view and mutations.

use clap::Subcommand;

use quickcart_core::ProductId;
use quickcart_storefront::cart::pricing::format_usd;
use quickcart_storefront::error::{AppError, Result};
use quickcart_storefront::state::{AppState, Session};

/// Cart operations.
#[derive(Subcommand)]
pub enum CartAction {
    /// Show cart contents and totals
    Show,
    /// Add one unit of a product
    Add {
        /// Product id from the listing
        product_id: ProductId,
    },
    /// Set the quantity for a carted product (0 removes it)
    Update {
        /// Product id from the listing
        product_id: ProductId,
        /// New quantity
        quantity: u32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id from the listing
        product_id: ProductId,
    },
    /// Empty the cart
    Clear,
}

/// Dispatch a cart operation.
pub async fn run(state: &AppState, session: &mut Session, action: CartAction) -> Result<()> {
    match action {
        CartAction::Show => show(session),
        CartAction::Add { product_id } => {
            let product = state
                .catalog()
                .find_product(product_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;
            let quantity = session.cart.add_item(&product)?;
            println!("Added {} to cart (x{quantity})", product.title);
            Ok(())
        }
        CartAction::Update {
            product_id,
            quantity,
        } => {
            session.cart.update_quantity(product_id, quantity)?;
            show(session)
        }
        CartAction::Remove { product_id } => {
            session.cart.remove_item(product_id)?;
            show(session)
        }
        CartAction::Clear => {
            session.cart.clear()?;
            println!("Cart cleared");
            Ok(())
        }
    }
}

fn show(session: &Session) -> Result<()> {
    let cart = session.cart.cart();

    if cart.is_empty() {
        println!("Your cart is empty");
        println!("Looks like you haven't added any items yet");
        return Ok(());
    }

    let totals = session.cart.totals();
    println!(
        "Shopping Cart ({} {})",
        totals.item_count,
        if totals.item_count == 1 { "item" } else { "items" }
    );
    println!();

    for line in cart.lines() {
        println!(
            "{:>5}  {:<40}  {:>10}  x{:<3}  {:>10}",
            line.product_id.as_i64(),
            line.title,
            line.price.to_string(),
            line.quantity,
            format_usd(line.price.extended(line.quantity)),
        );
    }

    println!();
    println!("Subtotal  {:>10}", format_usd(totals.subtotal));
    println!("Tax (7%)  {:>10}", format_usd(totals.tax));
    println!("Shipping  {:>10}", format_usd(totals.shipping));
    println!("Total     {:>10}", format_usd(totals.total));

    Ok(())
}
