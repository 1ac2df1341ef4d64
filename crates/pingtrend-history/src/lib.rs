//! Append-only run history stored as a JSON list.

pub mod store;

pub use store::{append, load, load_all};
