use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

/// The (id, name) pair that identifies a product throughout the pipeline.
///
/// Two refs are the same product only when both id and name match; a renamed
/// product is treated as a different product for aggregation purposes.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductRef {
    pub id: ProductId,
    pub name: String,
}

impl ProductRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: ProductId(id.into()), name: name.into() }
    }
}

/// One row of the order dataset: a single product purchased within an order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub order_id: OrderId,
    pub product: ProductRef,
    pub order_date: NaiveDate,
}

impl LineItem {
    pub fn new(
        order_id: impl Into<String>,
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        order_date: NaiveDate,
    ) -> Self {
        Self {
            order_id: OrderId(order_id.into()),
            product: ProductRef::new(product_id, product_name),
            order_date,
        }
    }
}

/// An unordered set of exactly 3 distinct products that co-appeared in an order.
///
/// Canonicalized on construction by sorting the products by (id, name), so
/// identical product sets coming from different orders compare and hash equal
/// regardless of the order their line items appeared in.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductTriple([ProductRef; 3]);

impl ProductTriple {
    pub fn new(a: ProductRef, b: ProductRef, c: ProductRef) -> Self {
        let mut slots = [a, b, c];
        slots.sort();
        Self(slots)
    }

    pub fn products(&self) -> &[ProductRef; 3] {
        &self.0
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.0.iter().any(|product| product.name == name)
    }

    pub fn contains_id(&self, id: &ProductId) -> bool {
        self.0.iter().any(|product| &product.id == id)
    }
}

/// A canonical product triple plus the number of orders it co-occurred in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripleFrequency {
    pub triple: ProductTriple,
    pub count: u64,
}

/// One ranked cross-sell candidate, ephemeral per query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionEntry {
    pub product: String,
    pub score: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(id: &str, name: &str) -> ProductRef {
        ProductRef::new(id, name)
    }

    #[test]
    fn triple_canonicalization_ignores_construction_order() {
        let forward = ProductTriple::new(p("P1", "Stapler"), p("P2", "Tape"), p("P3", "Binder"));
        let shuffled = ProductTriple::new(p("P3", "Binder"), p("P1", "Stapler"), p("P2", "Tape"));

        assert_eq!(forward, shuffled);
        assert_eq!(forward.products()[0].id, ProductId("P1".to_string()));
    }

    #[test]
    fn triples_differing_only_by_name_are_distinct() {
        let a = ProductTriple::new(p("P1", "Stapler"), p("P2", "Tape"), p("P3", "Binder"));
        let b = ProductTriple::new(p("P1", "Stapler v2"), p("P2", "Tape"), p("P3", "Binder"));

        assert_ne!(a, b);
    }

    #[test]
    fn contains_matches_by_the_right_field() {
        let triple = ProductTriple::new(p("P1", "Stapler"), p("P2", "Tape"), p("P3", "Binder"));

        assert!(triple.contains_name("Tape"));
        assert!(!triple.contains_name("P2"));
        assert!(triple.contains_id(&ProductId("P2".to_string())));
        assert!(!triple.contains_id(&ProductId("Tape".to_string())));
    }
}
