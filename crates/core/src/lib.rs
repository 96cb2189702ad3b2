pub mod config;
pub mod domain;
pub mod errors;
pub mod index;
pub mod pipeline;

pub use domain::{
    LineItem, OrderId, ProductId, ProductRef, ProductTriple, SuggestionEntry, TripleFrequency,
};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use index::{CoOccurrenceIndex, IndexStats};
