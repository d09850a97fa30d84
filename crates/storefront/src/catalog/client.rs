//! Catalog endpoint client.
//!
//! Fetches the complete product list from the configured read-only endpoint.
//! Responses are cached for 5 minutes so repeated views within one session do
//! not re-hit the public API. The fetch is complete-or-failed: there is no
//! pagination and no partial-result handling.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, info, instrument};

use quickcart_core::ProductId;

use crate::config::StorefrontConfig;

use super::{CatalogError, Product};

const CACHE_TTL: Duration = Duration::from_secs(300);

/// Client for the product listing endpoint.
///
/// Cheaply cloneable; clones share the HTTP client and the response cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    endpoint: String,
    cache: Cache<String, Arc<Vec<Product>>>,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the HTTP client cannot be constructed.
    pub fn new(config: &StorefrontConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        let cache = Cache::builder().max_capacity(8).time_to_live(CACHE_TTL).build();

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                endpoint: config.catalog_url.to_string(),
                cache,
            }),
        })
    }

    /// Fetch the complete product list.
    ///
    /// Returns the cached list when a fetch within the cache window already
    /// succeeded; failures are never cached.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the request fails, the endpoint answers with
    /// a non-success status, or the body is not a valid product list.
    #[instrument(skip(self))]
    pub async fn fetch_products(&self) -> Result<Arc<Vec<Product>>, CatalogError> {
        if let Some(products) = self.inner.cache.get(&self.inner.endpoint).await {
            debug!(count = products.len(), "Serving catalog from cache");
            return Ok(products);
        }

        let response = self.inner.client.get(&self.inner.endpoint).send().await?;
        let status = response.status();

        // Read the body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Catalog endpoint returned non-success status"
            );
            return Err(CatalogError::Status {
                status,
                body: body.chars().take(200).collect(),
            });
        }

        let products: Vec<Product> = serde_json::from_str(&body)?;
        info!(count = products.len(), "Fetched product catalog");

        let products = Arc::new(products);
        self.inner
            .cache
            .insert(self.inner.endpoint.clone(), Arc::clone(&products))
            .await;

        Ok(products)
    }

    /// Fetch the catalog and return the product with the given id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the underlying fetch fails. An unknown id is
    /// not an error; it yields `None`.
    pub async fn find_product(&self, id: ProductId) -> Result<Option<Product>, CatalogError> {
        let products = self.fetch_products().await?;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }
}
