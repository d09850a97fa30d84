//! Derived cart totals: subtotal, tax, shipping, grand total.
//!
//! Totals are derived from cart contents on demand and never stored. All
//! arithmetic is exact `Decimal`; rounding to two decimal places happens only
//! in [`format_usd`], so accumulated values carry full precision (a 7% tax on
//! $49.99 really is $3.4993 until displayed).

use rust_decimal::Decimal;

use super::Cart;

/// Flat tax rate applied to the subtotal.
pub const TAX_RATE: Decimal = Decimal::from_parts(7, 0, 0, false, 2);

/// Flat shipping charge for any non-empty cart.
pub const SHIPPING_FLAT: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Derived totals for a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartTotals {
    /// Sum of line quantities.
    pub item_count: u32,
    /// Sum of `price * quantity` over all lines.
    pub subtotal: Decimal,
    /// `subtotal * TAX_RATE`.
    pub tax: Decimal,
    /// `SHIPPING_FLAT` when the subtotal is positive, zero otherwise.
    pub shipping: Decimal,
    /// `subtotal + tax + shipping`.
    pub total: Decimal,
}

/// Compute derived totals from cart contents.
#[must_use]
pub fn totals(cart: &Cart) -> CartTotals {
    let item_count = cart.lines().iter().map(|l| l.quantity).sum();
    let subtotal: Decimal = cart
        .lines()
        .iter()
        .map(|l| l.price.extended(l.quantity))
        .sum();
    let tax = subtotal * TAX_RATE;
    let shipping = if subtotal > Decimal::ZERO {
        SHIPPING_FLAT
    } else {
        Decimal::ZERO
    };
    let total = subtotal + tax + shipping;

    CartTotals {
        item_count,
        subtotal,
        tax,
        shipping,
        total,
    }
}

/// Display-time formatting of a monetary amount (e.g., `$63.49`).
///
/// This is the only place accumulated amounts get rounded.
#[must_use]
pub fn format_usd(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use quickcart_core::{Price, ProductId};

    use crate::catalog::Product;
    use crate::cart::CartStore;
    use crate::storage::MemoryStore;

    use super::*;

    fn product(id: i64, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            description: String::new(),
            price: Price::from_cents(cents).unwrap(),
            category: None,
            images: Vec::new(),
        }
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_constants() {
        assert_eq!(TAX_RATE, dec("0.07"));
        assert_eq!(SHIPPING_FLAT, dec("10"));
    }

    #[test]
    fn test_empty_cart_has_zero_totals() {
        let t = totals(&Cart::default());
        assert_eq!(t.item_count, 0);
        assert_eq!(t.subtotal, Decimal::ZERO);
        assert_eq!(t.tax, Decimal::ZERO);
        assert_eq!(t.shipping, Decimal::ZERO);
        assert_eq!(t.total, Decimal::ZERO);
    }

    #[test]
    fn test_worked_example() {
        // Lines [(20.00 x 2), (9.99 x 1)] from the checkout summary
        let mut cart = CartStore::load(Arc::new(MemoryStore::new()));
        let twenty = product(1, 2000);
        cart.add_item(&twenty).unwrap();
        cart.add_item(&twenty).unwrap();
        cart.add_item(&product(2, 999)).unwrap();

        let t = cart.totals();
        assert_eq!(t.item_count, 3);
        assert_eq!(t.subtotal, dec("49.99"));
        assert_eq!(t.tax, dec("3.4993"));
        assert_eq!(t.shipping, dec("10"));
        assert_eq!(t.total, dec("63.4893"));
    }

    #[test]
    fn test_subtotal_is_exact_sum_of_extended_prices() {
        let mut cart = CartStore::load(Arc::new(MemoryStore::new()));
        cart.add_item(&product(1, 333)).unwrap();
        cart.update_quantity(ProductId::new(1), 3).unwrap();

        let t = cart.totals();
        assert_eq!(t.subtotal, dec("9.99"));
        assert_eq!(t.total, t.subtotal + t.tax + t.shipping);
    }

    #[test]
    fn test_shipping_waived_for_empty_cart_only() {
        let mut cart = CartStore::load(Arc::new(MemoryStore::new()));
        assert_eq!(cart.totals().shipping, Decimal::ZERO);

        cart.add_item(&product(1, 1)).unwrap();
        assert_eq!(cart.totals().shipping, SHIPPING_FLAT);

        cart.clear().unwrap();
        assert_eq!(cart.totals().shipping, Decimal::ZERO);
    }

    #[test]
    fn test_format_usd_rounds_at_display_time() {
        assert_eq!(format_usd(dec("3.4993")), "$3.50");
        assert_eq!(format_usd(dec("63.4893")), "$63.49");
        assert_eq!(format_usd(dec("10")), "$10.00");
        assert_eq!(format_usd(Decimal::ZERO), "$0.00");
    }
}
