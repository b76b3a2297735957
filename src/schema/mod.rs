//! Flattening heterogeneous items into one table.
//!
//! Items scraped across product types carry different specification keys.
//! [`SchemaAccumulator::finalize`] keeps the keys common enough to be worth
//! a column and lays every eligible item out under that shared schema.

mod accumulator;
mod table;

pub use accumulator::{presence_threshold, RowFilter, SchemaAccumulator, SPEC_PRESENCE_THRESHOLD};
pub use table::{FinalSchema, FlatTable, CONSTANT_COLUMNS, PLACEHOLDER};
