//! Product listing view.

use quickcart_storefront::catalog::view::{self, CatalogFilter};
use quickcart_storefront::catalog::SortMode;
use quickcart_storefront::error::Result;
use quickcart_storefront::state::AppState;

/// Render the product listing, or the category list with `--categories`.
pub async fn run(
    state: &AppState,
    search: Option<String>,
    category: Option<String>,
    sort: SortMode,
    categories: bool,
) -> Result<()> {
    let products = state.catalog().fetch_products().await?;

    if categories {
        for name in view::categories(&products) {
            println!("{name}");
        }
        return Ok(());
    }

    let filter = CatalogFilter {
        search: search.unwrap_or_default(),
        category,
        sort,
    };
    let listing = filter.apply(&products);

    if listing.is_empty() {
        println!("No products found");
        println!("Try changing your search or filter criteria");
        return Ok(());
    }

    for product in &listing {
        println!(
            "{:>5}  {:<40}  {:>10}  {}",
            product.id.as_i64(),
            truncate(&product.title, 40),
            product.price.to_string(),
            product.category_name().unwrap_or("Uncategorized"),
        );
    }
    println!();
    println!("{} product(s)", listing.len());

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{head}\u{2026}")
    }
}
