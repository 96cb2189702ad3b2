//! Eligible-order filter: only orders with at least 3 distinct products can
//! form a triple, everything else is dropped before generation.

use std::collections::{HashMap, HashSet};

use crate::domain::{LineItem, OrderId, ProductId};

/// Minimum distinct products an order needs to contribute triples.
pub const MIN_DISTINCT_PRODUCTS: usize = 3;

/// Keeps only line items whose order carries at least
/// [`MIN_DISTINCT_PRODUCTS`] distinct product ids across the whole input.
///
/// Orders below the threshold are removed entirely, not trimmed. Input order
/// of the surviving line items is preserved.
pub fn eligible_line_items(line_items: &[LineItem]) -> Vec<LineItem> {
    let mut distinct_per_order: HashMap<&OrderId, HashSet<&ProductId>> = HashMap::new();
    for item in line_items {
        distinct_per_order.entry(&item.order_id).or_default().insert(&item.product.id);
    }

    let eligible: HashSet<&OrderId> = distinct_per_order
        .into_iter()
        .filter(|(_, products)| products.len() >= MIN_DISTINCT_PRODUCTS)
        .map(|(order_id, _)| order_id)
        .collect();

    line_items.iter().filter(|item| eligible.contains(&item.order_id)).cloned().collect()
}
