//! Product catalog: remote loading and view building.
//!
//! The catalog is a read-only list of products fetched once per session from
//! a public endpoint. [`CatalogClient`] performs the fetch (with short-lived
//! caching so a manual retry does not re-hit the API); [`view`] turns the
//! immutable list into the filtered/sorted sequence a shell renders.

mod client;
pub mod view;

pub use client::CatalogClient;
pub use view::{CatalogFilter, SortMode};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use quickcart_core::{CategoryId, Price, ProductId};

/// Errors that can occur when fetching the catalog.
///
/// Fetch failures are surfaced to the shell, which offers a manual retry;
/// nothing is retried automatically.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status.
    #[error("Catalog endpoint returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: reqwest::StatusCode,
        /// Leading snippet of the response body, for diagnostics.
        body: String,
    },

    /// Response body was not a valid product list.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

// =============================================================================
// Catalog Types
// =============================================================================

/// A product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Category ID.
    pub id: CategoryId,
    /// Category display name.
    pub name: String,
    /// Category image URL.
    #[serde(default)]
    pub image: Option<String>,
}

/// A purchasable product from the remote catalog.
///
/// Immutable once loaded; owned by the catalog, read-only everywhere else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Stable unique identifier.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Plain text description.
    pub description: String,
    /// Unit price.
    pub price: Price,
    /// Category, if the source assigned one.
    #[serde(default)]
    pub category: Option<Category>,
    /// Ordered product image URLs.
    #[serde(default)]
    pub images: Vec<String>,
}

impl Product {
    /// Name of the product's category, if any.
    #[must_use]
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.name.as_str())
    }

    /// The product's primary image, if any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_catalog_shape() {
        // Shape emitted by the product listing endpoint
        let json = r#"{
            "id": 14,
            "title": "Classic Red Shirt",
            "description": "A classic red shirt",
            "price": 35.99,
            "category": { "id": 1, "name": "Clothes", "image": "https://i.imgur.com/QkIa5tT.jpeg" },
            "images": ["https://i.imgur.com/1.jpeg", "https://i.imgur.com/2.jpeg"]
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(14));
        assert_eq!(product.category_name(), Some("Clothes"));
        assert_eq!(product.primary_image(), Some("https://i.imgur.com/1.jpeg"));
        assert_eq!(product.price, Price::from_cents(3599).unwrap());
    }

    #[test]
    fn test_deserialize_without_category_or_images() {
        let json = r#"{
            "id": 2,
            "title": "Mystery Item",
            "description": "No category assigned",
            "price": 5
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.category.is_none());
        assert!(product.images.is_empty());
        assert!(product.primary_image().is_none());
    }
}
