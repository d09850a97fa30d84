//! Catalog view builder: search filter, category filter, sort ordering.
//!
//! Views are recomputed from scratch on every filter or sort change. The
//! dataset is small and this is not a performance path, so there is no
//! incremental diffing.

use serde::{Deserialize, Serialize};

use super::Product;

/// Sort orderings for the product listing.
///
/// All modes are stable with respect to the filtered order for equal keys;
/// `Default` preserves the filtered order entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Catalog order, unchanged.
    #[default]
    Default,
    /// Price: low to high.
    PriceLow,
    /// Price: high to low.
    PriceHigh,
    /// Title: A to Z.
    NameAsc,
    /// Title: Z to A.
    NameDesc,
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::PriceLow => write!(f, "price-low"),
            Self::PriceHigh => write!(f, "price-high"),
            Self::NameAsc => write!(f, "name-asc"),
            Self::NameDesc => write!(f, "name-desc"),
        }
    }
}

impl std::str::FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "price-low" => Ok(Self::PriceLow),
            "price-high" => Ok(Self::PriceHigh),
            "name-asc" => Ok(Self::NameAsc),
            "name-desc" => Ok(Self::NameDesc),
            _ => Err(format!(
                "invalid sort mode: {s} (expected default, price-low, price-high, name-asc, name-desc)"
            )),
        }
    }
}

/// Ephemeral view state for the product listing.
///
/// Held only by the shell while the listing is on screen; never persisted.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    /// Search text matched against title and description; empty matches all.
    pub search: String,
    /// Selected category name; `None` means "all categories".
    pub category: Option<String>,
    /// Sort ordering.
    pub sort: SortMode,
}

impl CatalogFilter {
    /// Whether a single product passes the search and category predicates.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let matches_search = self.search.is_empty() || {
            let needle = self.search.to_lowercase();
            product.title.to_lowercase().contains(&needle)
                || product.description.to_lowercase().contains(&needle)
        };

        let matches_category = self
            .category
            .as_deref()
            .is_none_or(|selected| product.category_name() == Some(selected));

        matches_search && matches_category
    }

    /// Build the display sequence: filter, then stable-sort.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        let mut view: Vec<&Product> = products.iter().filter(|p| self.matches(p)).collect();

        match self.sort {
            SortMode::Default => {}
            SortMode::PriceLow => view.sort_by(|a, b| a.price.cmp(&b.price)),
            SortMode::PriceHigh => view.sort_by(|a, b| b.price.cmp(&a.price)),
            SortMode::NameAsc => view.sort_by(|a, b| a.title.cmp(&b.title)),
            SortMode::NameDesc => view.sort_by(|a, b| b.title.cmp(&a.title)),
        }

        view
    }
}

/// Unique category names across the catalog, in first-seen order.
///
/// Drives the category filter choices a shell offers.
#[must_use]
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut seen = Vec::new();
    for product in products {
        if let Some(name) = product.category_name()
            && !seen.iter().any(|s| s == name)
        {
            seen.push(name.to_string());
        }
    }
    seen
}
