//! Run statistics and history comparison.

pub mod aggregate;
pub mod compare;

pub use aggregate::{loss_percent, StatsAggregator};
pub use compare::{compare, Comparison, Field, FieldDelta};
