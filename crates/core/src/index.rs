//! The co-occurrence index: built once per dataset load, read-only afterwards.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::domain::{LineItem, ProductId, SuggestionEntry, TripleFrequency};
use crate::pipeline::{aggregate, eligible_line_items, triples};

/// Summary counters captured while building an index, surfaced by the shells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Line items in the raw dataset.
    pub line_items: u64,
    /// Orders that survived the eligibility filter.
    pub eligible_orders: u64,
    /// Distinct product triples in the index.
    pub distinct_triples: u64,
    /// Total (order, triple) generation events; sum of all frequencies.
    pub triple_events: u64,
}

/// Frequency-ranked index of product triples that co-occurred in orders.
///
/// Built as a one-shot batch over the full dataset and never mutated after
/// construction, so it can be shared freely across concurrent readers. A
/// dataset refresh builds a fresh index and swaps it in whole.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoOccurrenceIndex {
    frequencies: Vec<TripleFrequency>,
    stats: IndexStats,
}

impl CoOccurrenceIndex {
    /// Runs the full filter → generate → aggregate pipeline over a dataset.
    ///
    /// An empty dataset is not an error; it yields an empty index whose
    /// queries all return empty results.
    pub fn build(line_items: &[LineItem]) -> Self {
        let eligible = eligible_line_items(line_items);

        let eligible_order_count =
            eligible.iter().map(|item| &item.order_id).collect::<HashSet<_>>().len() as u64;

        let records = triples::generate(&eligible);
        let triple_events = records.len() as u64;
        let frequencies = aggregate::count_frequencies(records);

        let stats = IndexStats {
            line_items: line_items.len() as u64,
            eligible_orders: eligible_order_count,
            distinct_triples: frequencies.len() as u64,
            triple_events,
        };

        Self { frequencies, stats }
    }

    /// All indexed triples, frequency-descending with a deterministic
    /// tie-break.
    pub fn all_triples(&self) -> &[TripleFrequency] {
        &self.frequencies
    }

    pub fn stats(&self) -> IndexStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Ranks the products most frequently co-purchased with the named product.
    ///
    /// Matching is by exact product name, as the order dataset's display field
    /// drives the suggestion surface; distinct ids sharing a name are
    /// conflated (see [`CoOccurrenceIndex::suggest_by_id`] for the precise
    /// variant). An unknown name and a known name with no co-purchases both
    /// yield an empty list; neither is an error.
    pub fn suggest(&self, product_name: &str) -> Vec<SuggestionEntry> {
        self.rank_co_products(|frequency| frequency.triple.contains_name(product_name), |name| {
            name != product_name
        })
    }

    /// Ranks co-purchased products matching the target by product id.
    pub fn suggest_by_id(&self, product_id: &ProductId) -> Vec<SuggestionEntry> {
        let mut scores: HashMap<&str, u64> = HashMap::new();
        for frequency in &self.frequencies {
            if !frequency.triple.contains_id(product_id) {
                continue;
            }
            for product in frequency.triple.products() {
                if &product.id != product_id {
                    *scores.entry(product.name.as_str()).or_insert(0) += frequency.count;
                }
            }
        }

        rank(scores)
    }

    fn rank_co_products(
        &self,
        matches: impl Fn(&TripleFrequency) -> bool,
        keep: impl Fn(&str) -> bool,
    ) -> Vec<SuggestionEntry> {
        let mut scores: HashMap<&str, u64> = HashMap::new();
        for frequency in &self.frequencies {
            if !matches(frequency) {
                continue;
            }
            for product in frequency.triple.products() {
                if keep(&product.name) {
                    *scores.entry(product.name.as_str()).or_insert(0) += frequency.count;
                }
            }
        }

        rank(scores)
    }
}

fn rank(scores: HashMap<&str, u64>) -> Vec<SuggestionEntry> {
    let mut entries: Vec<SuggestionEntry> = scores
        .into_iter()
        .map(|(product, score)| SuggestionEntry { product: product.to_string(), score })
        .collect();

    entries.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.product.cmp(&b.product)));

    entries
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn item(order: &str, product: &str) -> LineItem {
        LineItem::new(order, product, product, date())
    }

    /// O1: [A,B,C], O2: [A,B,C], O3: [A,B,D].
    fn reference_dataset() -> Vec<LineItem> {
        vec![
            item("O1", "A"),
            item("O1", "B"),
            item("O1", "C"),
            item("O2", "A"),
            item("O2", "B"),
            item("O2", "C"),
            item("O3", "A"),
            item("O3", "B"),
            item("O3", "D"),
        ]
    }

    #[test]
    fn reference_scenario_index_and_suggestions() {
        let index = CoOccurrenceIndex::build(&reference_dataset());

        assert_eq!(index.len(), 2);
        assert_eq!(index.all_triples()[0].count, 2);
        assert_eq!(index.all_triples()[1].count, 1);

        let suggestions = index.suggest("A");
        assert_eq!(
            suggestions,
            vec![
                SuggestionEntry { product: "B".to_string(), score: 3 },
                SuggestionEntry { product: "C".to_string(), score: 2 },
                SuggestionEntry { product: "D".to_string(), score: 1 },
            ]
        );
    }

    #[test]
    fn suggest_never_returns_the_queried_product() {
        let index = CoOccurrenceIndex::build(&reference_dataset());

        for name in ["A", "B", "C", "D"] {
            assert!(index.suggest(name).iter().all(|entry| entry.product != name));
        }
    }

    #[test]
    fn suggest_for_absent_product_is_empty() {
        let index = CoOccurrenceIndex::build(&reference_dataset());

        assert!(index.suggest("Nonexistent").is_empty());
    }

    #[test]
    fn suggestion_scores_sum_to_twice_the_matching_triple_counts() {
        let index = CoOccurrenceIndex::build(&reference_dataset());

        // Every triple containing the target contributes its count to exactly
        // two co-product entries when all names are distinct.
        let matching: u64 = index
            .all_triples()
            .iter()
            .filter(|frequency| frequency.triple.contains_name("A"))
            .map(|frequency| frequency.count)
            .sum();
        let suggested: u64 = index.suggest("A").iter().map(|entry| entry.score).sum();

        assert_eq!(suggested, 2 * matching);
    }

    #[test]
    fn suggest_by_id_matches_name_based_ranking_when_names_are_unique() {
        let index = CoOccurrenceIndex::build(&reference_dataset());

        assert_eq!(index.suggest_by_id(&ProductId("A".to_string())), index.suggest("A"));
    }

    #[test]
    fn shared_display_names_are_conflated_by_name_but_not_by_id() {
        // P9 and P1 both display as "Stapler".
        let items = vec![
            LineItem::new("O1", "P1", "Stapler", date()),
            LineItem::new("O1", "P2", "Tape", date()),
            LineItem::new("O1", "P3", "Binder", date()),
            LineItem::new("O2", "P9", "Stapler", date()),
            LineItem::new("O2", "P2", "Tape", date()),
            LineItem::new("O2", "P3", "Binder", date()),
        ];
        let index = CoOccurrenceIndex::build(&items);

        // Name-based: both orders' triples match "Stapler".
        let by_name = index.suggest("Stapler");
        assert_eq!(
            by_name,
            vec![
                SuggestionEntry { product: "Binder".to_string(), score: 2 },
                SuggestionEntry { product: "Tape".to_string(), score: 2 },
            ]
        );

        // Id-based: only the P1 triple matches.
        let by_id = index.suggest_by_id(&ProductId("P1".to_string()));
        assert_eq!(
            by_id,
            vec![
                SuggestionEntry { product: "Binder".to_string(), score: 1 },
                SuggestionEntry { product: "Tape".to_string(), score: 1 },
            ]
        );
    }

    #[test]
    fn two_product_orders_contribute_nothing() {
        let mut items = reference_dataset();
        items.push(item("O4", "A"));
        items.push(item("O4", "B"));

        let with_small_order = CoOccurrenceIndex::build(&items);
        let without = CoOccurrenceIndex::build(&reference_dataset());

        assert_eq!(with_small_order.all_triples(), without.all_triples());
    }

    #[test]
    fn empty_dataset_builds_an_empty_index_without_error() {
        let index = CoOccurrenceIndex::build(&[]);

        assert!(index.is_empty());
        assert!(index.suggest("Anything").is_empty());
        assert_eq!(index.stats(), IndexStats::default());
    }

    #[test]
    fn rebuild_is_idempotent() {
        let dataset = reference_dataset();

        let first = CoOccurrenceIndex::build(&dataset);
        let second = CoOccurrenceIndex::build(&dataset);

        assert_eq!(first, second);
    }

    #[test]
    fn build_is_invariant_under_order_permutation() {
        let dataset = reference_dataset();
        let mut reversed = dataset.clone();
        reversed.reverse();

        let forward = CoOccurrenceIndex::build(&dataset);
        let backward = CoOccurrenceIndex::build(&reversed);

        assert_eq!(forward.all_triples(), backward.all_triples());
    }

    #[test]
    fn stats_count_events_not_just_distinct_triples() {
        let index = CoOccurrenceIndex::build(&reference_dataset());

        let stats = index.stats();
        assert_eq!(stats.line_items, 9);
        assert_eq!(stats.eligible_orders, 3);
        assert_eq!(stats.distinct_triples, 2);
        // One C(3,3) event per order.
        assert_eq!(stats.triple_events, 3);
    }
}
