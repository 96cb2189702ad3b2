//! Triple generation: every eligible order contributes all unordered
//! 3-combinations of its distinct products.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::domain::{LineItem, OrderId, ProductRef, ProductTriple};
use crate::pipeline::filter::MIN_DISTINCT_PRODUCTS;

/// One generated triple with the order context it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TripleRecord {
    pub order_id: OrderId,
    pub order_date: NaiveDate,
    pub triple: ProductTriple,
}

/// Enumerates all C(k,3) product triples per order.
///
/// Line items are grouped by order, deduplicated to unique (id, name) pairs,
/// then combined. Dedup can drop an order below 3 distinct products even after
/// the eligibility filter (duplicate product lines inflate the raw count), so
/// such orders are skipped here as well. Each record carries the date of the
/// order's first line item.
pub fn generate(line_items: &[LineItem]) -> Vec<TripleRecord> {
    let mut order_sequence: Vec<&OrderId> = Vec::new();
    let mut grouped: HashMap<&OrderId, Vec<&LineItem>> = HashMap::new();
    for item in line_items {
        let group = grouped.entry(&item.order_id).or_default();
        if group.is_empty() {
            order_sequence.push(&item.order_id);
        }
        group.push(item);
    }

    let mut records = Vec::new();
    for order_id in order_sequence {
        let group = &grouped[order_id];
        let order_date = group[0].order_date;

        let mut seen: HashSet<&ProductRef> = HashSet::new();
        let mut products: Vec<&ProductRef> = Vec::new();
        for item in group {
            if seen.insert(&item.product) {
                products.push(&item.product);
            }
        }

        if products.len() < MIN_DISTINCT_PRODUCTS {
            continue;
        }

        for i in 0..products.len() {
            for j in (i + 1)..products.len() {
                for k in (j + 1)..products.len() {
                    records.push(TripleRecord {
                        order_id: order_id.clone(),
                        order_date,
                        triple: ProductTriple::new(
                            products[i].clone(),
                            products[j].clone(),
                            products[k].clone(),
                        ),
                    });
                }
            }
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn item(order: &str, product: &str, day: u32) -> LineItem {
        LineItem::new(order, product, format!("{product} name"), date(day))
    }

    fn choose_3(n: usize) -> usize {
        n * (n - 1) * (n - 2) / 6
    }

    #[test]
    fn order_with_k_distinct_products_yields_c_k_3_distinct_triples() {
        for k in 3..=6 {
            let items: Vec<LineItem> =
                (0..k).map(|i| item("O1", &format!("P{i}"), 1)).collect();

            let records = generate(&items);

            assert_eq!(records.len(), choose_3(k), "k = {k}");
            let distinct: HashSet<&ProductTriple> =
                records.iter().map(|record| &record.triple).collect();
            assert_eq!(distinct.len(), records.len(), "k = {k}: no triple generated twice");
        }
    }

    #[test]
    fn duplicate_product_lines_count_once() {
        let items = vec![
            item("O1", "P1", 1),
            item("O1", "P1", 1),
            item("O1", "P2", 1),
            item("O1", "P3", 1),
        ];

        let records = generate(&items);

        assert_eq!(records.len(), 1);
    }

    #[test]
    fn order_falling_under_three_distinct_after_dedup_is_skipped() {
        let items = vec![
            item("O1", "P1", 1),
            item("O1", "P1", 1),
            item("O1", "P1", 1),
            item("O1", "P2", 1),
        ];

        assert!(generate(&items).is_empty());
    }

    #[test]
    fn records_carry_the_orders_first_line_item_date() {
        let items = vec![
            item("O1", "P1", 7),
            item("O1", "P2", 9),
            item("O1", "P3", 11),
        ];

        let records = generate(&items);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].order_date, date(7));
        assert_eq!(records[0].order_id, OrderId("O1".to_string()));
    }

    #[test]
    fn multiple_orders_contribute_independently() {
        let items = vec![
            item("O1", "P1", 1),
            item("O1", "P2", 1),
            item("O1", "P3", 1),
            item("O2", "P1", 2),
            item("O2", "P2", 2),
            item("O2", "P3", 2),
            item("O2", "P4", 2),
        ];

        let records = generate(&items);

        assert_eq!(records.len(), 1 + choose_3(4));
    }
}
