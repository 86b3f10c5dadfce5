//! Database operations split into focused modules.

pub mod stats;

pub use stats::{all_collection_stats, collection_stats, database_stats, list_collection_names};
