//! Collection and database storage statistics for MongoDB.
//!
//! The [`connection::ops::stats`] functions run `listCollections`, `collStats` and
//! `dbStats` against any [`connection::Database`] and decode the replies into
//! [`models::CollectionStats`] and [`models::DatabaseStats`]. [`models::StatsOrder`]
//! sorts collection stats by index size or data size.

pub mod cli;
pub mod connection;
pub mod error;
pub mod helpers;
pub mod models;
pub mod report;
pub mod state;

pub use connection::ops::stats::{
    all_collection_stats, collection_stats, database_stats, list_collection_names,
};
pub use connection::{ConnectionManager, Database, MongoDatabase};
pub use error::{Error, Result};
pub use models::{CollectionStats, DatabaseStats, SavedConnection, StatsOrder};
