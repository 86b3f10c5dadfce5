//! Storage statistics returned by the `collStats` and `dbStats` commands.
//!
//! Every field is tagged with the key the server uses in its response. All size
//! values are in bytes because the commands are always issued with `scale: 1`.

use std::collections::BTreeMap;

use mongodb::bson::{Bson, Document};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Size measurements of a single collection at the time of the call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionStats {
    /// Namespace of the collection, `[database].[collection]`.
    #[serde(rename = "ns")]
    pub namespace: String,

    /// Number of documents in the collection.
    #[serde(rename = "count", deserialize_with = "lenient_u64")]
    pub count: u64,

    #[serde(rename = "avgObjSize", deserialize_with = "lenient_u64")]
    pub avg_obj_size: u64,

    /// Total in-memory size of all records. Does not include indexes, which
    /// `total_index_size` reports.
    #[serde(rename = "size", deserialize_with = "lenient_u64")]
    pub size: u64,

    /// Storage allocated to the collection for document storage.
    #[serde(rename = "storageSize", deserialize_with = "lenient_u64")]
    pub storage_size: u64,

    /// Combined size of all indexes.
    #[serde(rename = "totalIndexSize", deserialize_with = "lenient_u64")]
    pub total_index_size: u64,

    /// Size of every index on the collection, keyed by index name.
    #[serde(rename = "indexSizes", deserialize_with = "lenient_u64_map")]
    pub index_sizes: BTreeMap<String, u64>,

    /// Number of indexes, including `_id_`.
    #[serde(rename = "nindexes", deserialize_with = "lenient_u64")]
    pub index_count: u64,

    /// Fixed-size collection that overwrites its oldest entries when full.
    #[serde(rename = "capped", deserialize_with = "lenient_bool")]
    pub capped: bool,

    /// Size of the last extent allocated. Only reported by the mmapv1 engine.
    #[serde(rename = "lastExtentSize", deserialize_with = "lenient_u64")]
    pub last_extent_size: u64,

    /// User-set flags on the collection. Only reported by the mmapv1 engine.
    #[serde(rename = "userFlags", deserialize_with = "lenient_i64")]
    pub user_flags: i64,
}

impl CollectionStats {
    /// Decode a `collStats` response.
    pub fn from_document(doc: Document) -> Result<Self, mongodb::bson::de::Error> {
        mongodb::bson::from_document(doc)
    }

    /// Collection name without the database prefix.
    pub fn collection_name(&self) -> &str {
        self.namespace.split_once('.').map(|(_, name)| name).unwrap_or(&self.namespace)
    }

    /// Sum of the per-index sizes.
    pub fn summed_index_sizes(&self) -> u64 {
        self.index_sizes.values().sum()
    }
}

/// Storage statistics for a whole database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseStats {
    #[serde(rename = "db")]
    pub database: String,

    #[serde(rename = "collections", deserialize_with = "lenient_u64")]
    pub collections: u64,

    /// Documents across all collections.
    #[serde(rename = "objects", deserialize_with = "lenient_u64")]
    pub objects: u64,

    /// `data_size` divided by `objects`.
    #[serde(rename = "avgObjSize", deserialize_with = "lenient_u64")]
    pub avg_obj_size: u64,

    #[serde(rename = "dataSize", deserialize_with = "lenient_u64")]
    pub data_size: u64,

    #[serde(rename = "storageSize", deserialize_with = "lenient_u64")]
    pub storage_size: u64,

    #[serde(rename = "numExtents", deserialize_with = "lenient_u64")]
    pub num_extents: u64,

    /// Indexes across all collections.
    #[serde(rename = "indexes", deserialize_with = "lenient_u64")]
    pub indexes: u64,

    #[serde(rename = "indexSize", deserialize_with = "lenient_u64")]
    pub index_size: u64,

    /// Size of the data files, excluding the namespace file. mmapv1 only.
    #[serde(rename = "fileSize", deserialize_with = "lenient_u64")]
    pub file_size: u64,

    /// Size of the `.ns` namespace files. mmapv1 only.
    #[serde(rename = "nsSizeMB", deserialize_with = "lenient_u64")]
    pub ns_size_mb: u64,

    #[serde(rename = "dataFileVersion")]
    pub data_file_version: DataFileVersion,

    #[serde(rename = "extentFreeList")]
    pub extent_free_list: ExtentFreeList,
}

impl DatabaseStats {
    /// Decode a `dbStats` response.
    pub fn from_document(doc: Document) -> Result<Self, mongodb::bson::de::Error> {
        mongodb::bson::from_document(doc)
    }
}

/// On-disk format version of the data files. mmapv1 only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataFileVersion {
    #[serde(deserialize_with = "lenient_i64")]
    pub major: i64,
    #[serde(deserialize_with = "lenient_i64")]
    pub minor: i64,
}

/// Free extents of the database. mmapv1 only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtentFreeList {
    #[serde(rename = "num", deserialize_with = "lenient_u64")]
    pub count: u64,
    #[serde(rename = "size", deserialize_with = "lenient_u64")]
    pub size: u64,
}

// The server picks Int32, Int64 or Double per field depending on magnitude and
// version, so numeric fields accept any of them.

fn bson_to_i64(value: &Bson) -> Option<i64> {
    match value {
        Bson::Int32(v) => Some(i64::from(*v)),
        Bson::Int64(v) => Some(*v),
        Bson::Double(v) if v.is_finite() => Some(*v as i64),
        Bson::Null => Some(0),
        _ => None,
    }
}

fn bson_to_u64(value: &Bson) -> Option<u64> {
    bson_to_i64(value).and_then(|v| u64::try_from(v).ok())
}

fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Bson::deserialize(deserializer)?;
    bson_to_i64(&value).ok_or_else(|| D::Error::custom(format!("expected a number, got {value}")))
}

fn lenient_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = Bson::deserialize(deserializer)?;
    bson_to_u64(&value)
        .ok_or_else(|| D::Error::custom(format!("expected a non-negative number, got {value}")))
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    match Bson::deserialize(deserializer)? {
        Bson::Boolean(v) => Ok(v),
        Bson::Null => Ok(false),
        other => Err(D::Error::custom(format!("expected a boolean, got {other}"))),
    }
}

fn lenient_u64_map<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, u64>, D::Error> {
    let doc = match Bson::deserialize(deserializer)? {
        Bson::Document(doc) => doc,
        Bson::Null => return Ok(BTreeMap::new()),
        other => return Err(D::Error::custom(format!("expected a document, got {other}"))),
    };

    doc.into_iter()
        .map(|(key, value)| match bson_to_u64(&value) {
            Some(size) => Ok((key, size)),
            None => Err(D::Error::custom(format!("index `{key}`: expected a size, got {value}"))),
        })
        .collect()
}
