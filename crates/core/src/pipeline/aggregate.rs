//! Co-occurrence aggregation: counts how many orders produced each distinct
//! product triple.

use std::collections::HashMap;

use crate::domain::{ProductTriple, TripleFrequency};
use crate::pipeline::triples::TripleRecord;

/// Groups triple records by canonical triple identity and counts occurrences.
///
/// The result is sorted by frequency descending; ties fall back to the
/// lexicographic order of the canonical triple, so the ranking is deterministic
/// regardless of input permutation.
pub fn count_frequencies(records: Vec<TripleRecord>) -> Vec<TripleFrequency> {
    let mut counts: HashMap<ProductTriple, u64> = HashMap::new();
    for record in records {
        *counts.entry(record.triple).or_insert(0) += 1;
    }

    let mut frequencies: Vec<TripleFrequency> =
        counts.into_iter().map(|(triple, count)| TripleFrequency { triple, count }).collect();

    frequencies.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.triple.cmp(&b.triple)));

    frequencies
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::domain::{OrderId, ProductRef};

    use super::*;

    fn record(order: &str, ids: [&str; 3]) -> TripleRecord {
        TripleRecord {
            order_id: OrderId(order.to_string()),
            order_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            triple: ProductTriple::new(
                ProductRef::new(ids[0], format!("{} name", ids[0])),
                ProductRef::new(ids[1], format!("{} name", ids[1])),
                ProductRef::new(ids[2], format!("{} name", ids[2])),
            ),
        }
    }

    #[test]
    fn identical_product_sets_aggregate_into_one_group() {
        let records = vec![
            record("O1", ["P1", "P2", "P3"]),
            record("O2", ["P3", "P1", "P2"]),
            record("O3", ["P1", "P2", "P4"]),
        ];

        let frequencies = count_frequencies(records);

        assert_eq!(frequencies.len(), 2);
        assert_eq!(frequencies[0].count, 2);
        assert_eq!(frequencies[1].count, 1);
    }

    #[test]
    fn output_is_invariant_under_input_permutation() {
        let records = vec![
            record("O1", ["P1", "P2", "P3"]),
            record("O2", ["P2", "P3", "P4"]),
            record("O3", ["P1", "P2", "P3"]),
            record("O4", ["P1", "P3", "P4"]),
        ];

        let forward = count_frequencies(records.clone());
        let mut reversed_input = records;
        reversed_input.reverse();
        let reversed = count_frequencies(reversed_input);

        assert_eq!(forward, reversed);
    }

    #[test]
    fn equal_frequencies_break_ties_lexicographically() {
        let records = vec![
            record("O1", ["P2", "P3", "P4"]),
            record("O2", ["P1", "P2", "P3"]),
        ];

        let frequencies = count_frequencies(records);

        assert_eq!(frequencies[0].triple.products()[0].id.0, "P1");
        assert_eq!(frequencies[1].triple.products()[0].id.0, "P2");
    }

    #[test]
    fn empty_input_yields_empty_index() {
        assert!(count_frequencies(Vec::new()).is_empty());
    }
}
