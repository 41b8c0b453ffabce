//! Display-order assignment and sorting.
//!
//! New items get `sibling count + 1`. Two concurrent creations can therefore
//! end up with the same order value; duplicates are kept as-is and resolved
//! only by an explicit reorder.

use super::{Category, Product};

/// Order value for a new item among `sibling_count` existing siblings.
pub fn next_order(sibling_count: usize) -> u32 {
    sibling_count as u32 + 1
}

/// Sorts categories by their order value, stable. Items without an order
/// value sort last, keeping their relative store order.
pub fn sort_categories(categories: &mut [Category]) {
    categories.sort_by_key(|c| c.order.unwrap_or(u32::MAX));
}

/// Sorts products by their order value, stable.
pub fn sort_products(products: &mut [Product]) {
    products.sort_by_key(|p| p.order.unwrap_or(u32::MAX));
}
