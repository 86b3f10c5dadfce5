//! Database and collection statistics operations.

use mongodb::bson::{Document, doc};

use crate::connection::Database;
use crate::error::{Error, Result};
use crate::models::{CollectionStats, DatabaseStats};

/// Names of all collections in `db`, in the order the server lists them.
///
/// An entry without a string `name` is reported as an empty name.
pub fn list_collection_names<D: Database + ?Sized>(db: &D) -> Result<Vec<String>> {
    log::debug!("listCollections on {}", db.name());
    let entries = db.run_cursor_command(doc! { "listCollections": 1 })?;

    Ok(entries
        .iter()
        .map(|entry| match entry.get_str("name") {
            Ok(name) => name.to_string(),
            Err(_) => {
                log::warn!("Collection entry without a name in {}: {}", db.name(), entry);
                String::new()
            }
        })
        .collect())
}

/// Storage statistics for one collection, in bytes.
pub fn collection_stats<D: Database + ?Sized>(
    db: &D,
    collection: &str,
) -> Result<CollectionStats> {
    log::debug!("collStats on {}.{}", db.name(), collection);
    let response = db.run_command(doc! {
        "collStats": collection,
        "scale": 1,
        "verbose": true,
    })?;
    Ok(CollectionStats::from_document(response)?)
}

/// Storage statistics for the whole database, in bytes.
pub fn database_stats<D: Database + ?Sized>(db: &D) -> Result<DatabaseStats> {
    log::debug!("dbStats on {}", db.name());
    let response = db.run_command(doc! { "dbStats": 1, "scale": 1 })?;
    Ok(DatabaseStats::from_document(response)?)
}

/// Statistics for every collection in `db`, one per collection in listing order.
///
/// Collections are fetched one at a time. The first failure stops the scan and
/// is returned as [`Error::CollectionStats`], carrying the records gathered so far.
pub fn all_collection_stats<D: Database + ?Sized>(db: &D) -> Result<Vec<CollectionStats>> {
    let names = list_collection_names(db)?;
    let mut stats = Vec::with_capacity(names.len());

    for name in names {
        match collection_stats(db, &name) {
            Ok(entry) => stats.push(entry),
            Err(err) => {
                log::warn!("Stopping stats scan of {} at `{}`: {}", db.name(), name, err);
                return Err(Error::CollectionStats {
                    collection: name,
                    completed: stats,
                    source: Box::new(err),
                });
            }
        }
    }

    Ok(stats)
}
