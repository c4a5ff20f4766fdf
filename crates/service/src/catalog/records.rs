//! Record operations over an in-memory collection.
//!
//! All lookups are linear scans in insertion order; the collection is small
//! and is re-read from storage on every request anyway.

use super::product::{Product, ProductPatch};

/// Index of the first record with the given id.
pub fn position_of(products: &[Product], id: u64) -> Option<usize> {
    products.iter().position(|p| p.id == id)
}

pub fn find_by_id(products: &[Product], id: u64) -> Option<&Product> {
    products.iter().find(|p| p.id == id)
}

/// Records whose name contains `needle`, ignoring case, in original order.
/// Only the empty needle matches everything; whitespace is matched literally.
pub fn filter_by_name(products: Vec<Product>, needle: &str) -> Vec<Product> {
    if needle.is_empty() {
        return products;
    }
    let needle = needle.to_lowercase();
    products
        .into_iter()
        .filter(|p| p.product_name.to_lowercase().contains(&needle))
        .collect()
}

/// `max(existing id) + 1`, or 1 for an empty collection.
pub fn next_id(products: &[Product]) -> u64 {
    products.iter().map(|p| p.id).max().map_or(1, |max| max + 1)
}

pub fn insert(products: &mut Vec<Product>, product: Product) {
    products.push(product);
}

/// Shallow-merge `patch` into the record at `index` and return the result.
pub fn merge_at(products: &mut [Product], index: usize, patch: ProductPatch) -> Product {
    let slot = &mut products[index];
    patch.apply(slot);
    slot.clone()
}

pub fn remove_at(products: &mut Vec<Product>, index: usize) -> Product {
    products.remove(index)
}
