// Data structures and types

pub mod connection;
pub mod ordering;
pub mod stats;

pub use connection::SavedConnection;
pub use ordering::{
    StatsOrder, sort_by_index_size_asc, sort_by_index_size_desc, sort_by_size_asc,
    sort_by_size_desc,
};
pub use stats::{CollectionStats, DataFileVersion, DatabaseStats, ExtentFreeList};
