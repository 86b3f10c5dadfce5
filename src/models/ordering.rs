//! Orderings over collection statistics.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::stats::CollectionStats;

/// Sort order for a list of [`CollectionStats`].
///
/// Each order compares a single field. Ties keep no particular order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatsOrder {
    /// Largest total index size first.
    #[default]
    IndexSizeDesc,
    IndexSizeAsc,
    /// Largest data size first.
    SizeDesc,
    SizeAsc,
}

impl StatsOrder {
    pub fn all() -> &'static [StatsOrder] {
        &[
            StatsOrder::IndexSizeDesc,
            StatsOrder::IndexSizeAsc,
            StatsOrder::SizeDesc,
            StatsOrder::SizeAsc,
        ]
    }

    pub fn key(self) -> &'static str {
        match self {
            StatsOrder::IndexSizeDesc => "index-size-desc",
            StatsOrder::IndexSizeAsc => "index-size-asc",
            StatsOrder::SizeDesc => "size-desc",
            StatsOrder::SizeAsc => "size-asc",
        }
    }

    pub fn compare(self, a: &CollectionStats, b: &CollectionStats) -> Ordering {
        match self {
            StatsOrder::IndexSizeDesc => b.total_index_size.cmp(&a.total_index_size),
            StatsOrder::IndexSizeAsc => a.total_index_size.cmp(&b.total_index_size),
            StatsOrder::SizeDesc => b.size.cmp(&a.size),
            StatsOrder::SizeAsc => a.size.cmp(&b.size),
        }
    }

    /// Reorder `stats` in place.
    pub fn sort(self, stats: &mut [CollectionStats]) {
        stats.sort_by(|a, b| self.compare(a, b));
    }
}

impl fmt::Display for StatsOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for StatsOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        StatsOrder::all()
            .iter()
            .copied()
            .find(|order| order.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let keys: Vec<&str> = StatsOrder::all().iter().map(|order| order.key()).collect();
                format!("unknown sort order `{s}` (expected one of: {})", keys.join(", "))
            })
    }
}

pub fn sort_by_index_size_desc(stats: &mut [CollectionStats]) {
    StatsOrder::IndexSizeDesc.sort(stats);
}

pub fn sort_by_index_size_asc(stats: &mut [CollectionStats]) {
    StatsOrder::IndexSizeAsc.sort(stats);
}

pub fn sort_by_size_desc(stats: &mut [CollectionStats]) {
    StatsOrder::SizeDesc.sort(stats);
}

pub fn sort_by_size_asc(stats: &mut [CollectionStats]) {
    StatsOrder::SizeAsc.sort(stats);
}
