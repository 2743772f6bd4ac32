//! Search filter

use crate::core::Product;

/// Whether `product` matches the search term
///
/// Case-insensitive substring match on the name, the description or the
/// decimal form of the category id. Absent fields match as empty strings.
pub fn matches(product: &Product, search_term: &str) -> bool {
    if search_term.is_empty() {
        return true;
    }
    let needle = search_term.to_lowercase();

    product.product_name.to_lowercase().contains(&needle)
        || product.description_text().to_lowercase().contains(&needle)
        || product
            .category_id
            .is_some_and(|id| id.to_string().contains(&needle))
}

/// Records matching `search_term`, in input order
pub fn filter(records: &[Product], search_term: &str) -> Vec<Product> {
    records
        .iter()
        .filter(|product| matches(product, search_term))
        .cloned()
        .collect()
}
