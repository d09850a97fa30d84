//! Cart contents and mutation operations.
//!
//! The cart is an ordered sequence of lines, one per product: adding an
//! already-carted product increments its line instead of appending a second
//! one, updates preserve insertion order, and new lines go to the end. Every
//! mutation is written through to the key-value store before it returns, so
//! the persisted cart always matches the in-memory one.

pub mod pricing;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use quickcart_core::{Price, ProductId};

use crate::catalog::Product;
use crate::storage::{self, KvStore, StorageError, keys};

/// One product's quantity entry within the cart.
///
/// Display fields are denormalized copies captured at add-time so the cart
/// can render without the catalog in scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// The carted product.
    pub product_id: ProductId,
    /// Product title at add-time.
    pub title: String,
    /// Unit price at add-time.
    pub price: Price,
    /// Primary product image at add-time.
    #[serde(default)]
    pub image: Option<String>,
    /// Number of units; always >= 1 (a line that would drop to zero is
    /// removed instead).
    pub quantity: u32,
}

/// The cart: an ordered sequence of [`CartLine`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// The cart lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.lines.iter().position(|l| l.product_id == product_id)
    }
}

/// Owns the session's cart and persists it across mutations.
pub struct CartStore {
    cart: Cart,
    store: Arc<dyn KvStore>,
}

impl CartStore {
    /// Load the persisted cart, or start empty.
    ///
    /// An unparseable stored cart is silently replaced by the empty cart.
    #[must_use]
    pub fn load(store: Arc<dyn KvStore>) -> Self {
        let cart: Cart = storage::load_or_default(store.as_ref(), keys::CART);
        debug!(lines = cart.lines.len(), "Loaded cart");
        Self { cart, store }
    }

    /// The current cart contents.
    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Derived totals for the current contents.
    #[must_use]
    pub fn totals(&self) -> pricing::CartTotals {
        pricing::totals(&self.cart)
    }

    /// Add one unit of `product`.
    ///
    /// Increments the existing line if the product is already carted,
    /// otherwise appends a new line with quantity 1. Returns the line's
    /// resulting quantity so the caller can surface a confirmation.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the updated cart cannot be persisted.
    pub fn add_item(&mut self, product: &Product) -> Result<u32, StorageError> {
        let existing = self
            .cart
            .lines
            .iter_mut()
            .find(|l| l.product_id == product.id);

        let quantity = if let Some(line) = existing {
            line.quantity += 1;
            line.quantity
        } else {
            self.cart.lines.push(CartLine {
                product_id: product.id,
                title: product.title.clone(),
                price: product.price,
                image: product.primary_image().map(String::from),
                quantity: 1,
            });
            1
        };

        debug!(product_id = %product.id, quantity, "Added item to cart");
        self.persist()?;
        Ok(quantity)
    }

    /// Remove the line for `product_id`, if present. Absent is a no-op, not
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the updated cart cannot be persisted.
    pub fn remove_item(&mut self, product_id: ProductId) -> Result<(), StorageError> {
        if let Some(index) = self.cart.position(product_id) {
            self.cart.lines.remove(index);
            debug!(product_id = %product_id, "Removed item from cart");
            self.persist()?;
        }
        Ok(())
    }

    /// Set the quantity for `product_id`.
    ///
    /// A quantity of 0 removes the line (equivalent to [`Self::remove_item`]).
    /// An absent id is a no-op; no line is created.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the updated cart cannot be persisted.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: u32) -> Result<(), StorageError> {
        if quantity == 0 {
            return self.remove_item(product_id);
        }

        if let Some(line) = self
            .cart
            .lines
            .iter_mut()
            .find(|l| l.product_id == product_id)
        {
            line.quantity = quantity;
            debug!(product_id = %product_id, quantity, "Updated cart quantity");
            self.persist()?;
        }
        Ok(())
    }

    /// Empty the cart unconditionally.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the emptied cart cannot be persisted.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.cart.lines.clear();
        debug!("Cleared cart");
        self.persist()
    }

    fn persist(&self) -> Result<(), StorageError> {
        storage::store_json(self.store.as_ref(), keys::CART, &self.cart)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use quickcart_core::CategoryId;

    use crate::catalog::Category;
    use crate::storage::MemoryStore;

    use super::*;

    fn product(id: i64, title: &str, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: title.to_string(),
            description: String::new(),
            price: Price::from_cents(cents).unwrap(),
            category: Some(Category {
                id: CategoryId::new(1),
                name: "Clothes".to_string(),
                image: None,
            }),
            images: vec![format!("https://img.example/{id}.jpeg")],
        }
    }

    fn empty_cart_store() -> CartStore {
        CartStore::load(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_add_same_product_merges_into_one_line() {
        let mut cart = empty_cart_store();
        let shirt = product(1, "Red Shirt", 500);

        for _ in 0..4 {
            cart.add_item(&shirt).unwrap();
        }

        assert_eq!(cart.cart().lines().len(), 1);
        assert_eq!(cart.cart().lines()[0].quantity, 4);
    }

    #[test]
    fn test_add_returns_resulting_quantity() {
        let mut cart = empty_cart_store();
        let shirt = product(1, "Red Shirt", 500);

        assert_eq!(cart.add_item(&shirt).unwrap(), 1);
        assert_eq!(cart.add_item(&shirt).unwrap(), 2);
    }

    #[test]
    fn test_add_captures_display_fields() {
        let mut cart = empty_cart_store();
        cart.add_item(&product(7, "Blue Hat", 999)).unwrap();

        let line = &cart.cart().lines()[0];
        assert_eq!(line.title, "Blue Hat");
        assert_eq!(line.price, Price::from_cents(999).unwrap());
        assert_eq!(line.image.as_deref(), Some("https://img.example/7.jpeg"));
    }

    #[test]
    fn test_new_lines_append_in_insertion_order() {
        let mut cart = empty_cart_store();
        cart.add_item(&product(1, "First", 100)).unwrap();
        cart.add_item(&product(2, "Second", 200)).unwrap();
        cart.add_item(&product(1, "First", 100)).unwrap();

        let ids: Vec<i64> = cart
            .cart()
            .lines()
            .iter()
            .map(|l| l.product_id.as_i64())
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_remove_item() {
        let mut cart = empty_cart_store();
        cart.add_item(&product(1, "First", 100)).unwrap();
        cart.add_item(&product(2, "Second", 200)).unwrap();

        cart.remove_item(ProductId::new(1)).unwrap();
        assert_eq!(cart.cart().lines().len(), 1);
        assert_eq!(cart.cart().lines()[0].product_id, ProductId::new(2));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = empty_cart_store();
        cart.add_item(&product(1, "First", 100)).unwrap();
        cart.remove_item(ProductId::new(99)).unwrap();
        assert_eq!(cart.cart().lines().len(), 1);
    }

    #[test]
    fn test_update_quantity_sets_value() {
        let mut cart = empty_cart_store();
        cart.add_item(&product(1, "First", 100)).unwrap();

        cart.update_quantity(ProductId::new(1), 5).unwrap();
        assert_eq!(cart.cart().lines()[0].quantity, 5);
    }

    #[test]
    fn test_update_quantity_zero_equals_remove() {
        let shirt = product(1, "Red Shirt", 500);

        let mut removed = empty_cart_store();
        removed.add_item(&shirt).unwrap();
        removed.remove_item(shirt.id).unwrap();

        let mut updated = empty_cart_store();
        updated.add_item(&shirt).unwrap();
        updated.update_quantity(shirt.id, 0).unwrap();

        assert_eq!(removed.cart(), updated.cart());
        assert!(updated.cart().is_empty());
    }

    #[test]
    fn test_update_quantity_absent_creates_no_line() {
        let mut cart = empty_cart_store();
        cart.update_quantity(ProductId::new(42), 3).unwrap();
        assert!(cart.cart().is_empty());
    }

    #[test]
    fn test_update_preserves_insertion_order() {
        let mut cart = empty_cart_store();
        cart.add_item(&product(1, "First", 100)).unwrap();
        cart.add_item(&product(2, "Second", 200)).unwrap();
        cart.add_item(&product(3, "Third", 300)).unwrap();

        cart.update_quantity(ProductId::new(2), 9).unwrap();

        let ids: Vec<i64> = cart
            .cart()
            .lines()
            .iter()
            .map(|l| l.product_id.as_i64())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_clear() {
        let mut cart = empty_cart_store();
        cart.add_item(&product(1, "First", 100)).unwrap();
        cart.add_item(&product(2, "Second", 200)).unwrap();

        cart.clear().unwrap();
        assert!(cart.cart().is_empty());
    }

    #[test]
    fn test_mutations_persist_across_reload() {
        let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());

        let mut cart = CartStore::load(Arc::clone(&store));
        cart.add_item(&product(1, "Red Shirt", 500)).unwrap();
        cart.add_item(&product(1, "Red Shirt", 500)).unwrap();

        let reloaded = CartStore::load(store);
        assert_eq!(reloaded.cart(), cart.cart());
        assert_eq!(reloaded.cart().lines()[0].quantity, 2);
    }

    #[test]
    fn test_corrupt_persisted_cart_loads_empty() {
        let store: Arc<dyn KvStore> = Arc::new(MemoryStore::new());
        store.put(keys::CART, b"{definitely not a cart").unwrap();

        let cart = CartStore::load(store);
        assert!(cart.cart().is_empty());
    }
}
