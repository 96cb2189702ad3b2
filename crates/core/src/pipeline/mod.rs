//! Batch pipeline turning raw order line-items into a ranked co-occurrence
//! index: eligibility filter → triple generation → frequency aggregation.

pub mod aggregate;
pub mod filter;
pub mod triples;

pub use filter::{eligible_line_items, MIN_DISTINCT_PRODUCTS};
pub use triples::TripleRecord;
