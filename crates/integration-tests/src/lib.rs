//! Shared helpers for QuickCart integration tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use quickcart_core::{Price, ProductId};
use quickcart_storefront::catalog::Product;
use quickcart_storefront::config::StorefrontConfig;
use quickcart_storefront::state::AppState;
use quickcart_storefront::storage::MemoryStore;

/// Build a product without touching the network.
///
/// # Panics
///
/// Panics if `cents` is negative; test fixtures use valid prices.
#[must_use]
pub fn product(id: i64, title: &str, cents: i64) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        description: format!("{title} description"),
        price: Price::from_cents(cents).expect("fixture price is non-negative"),
        category: None,
        images: vec![format!("https://img.example/{id}.jpeg")],
    }
}

/// Application state over an in-memory store.
///
/// # Panics
///
/// Panics if state construction fails; the default config is always valid.
#[must_use]
pub fn memory_state() -> AppState {
    AppState::with_storage(StorefrontConfig::default(), Arc::new(MemoryStore::new()))
        .expect("in-memory state construction cannot fail")
}
