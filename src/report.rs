//! Plain-text rendering of statistics.

use std::fmt::Write as _;

use crate::helpers::{format_number, format_size};
use crate::models::{CollectionStats, DatabaseStats};

const COLLECTION_HEADERS: [&str; 8] =
    ["COLLECTION", "COUNT", "SIZE", "AVG OBJ", "STORAGE", "INDEXES", "INDEX SIZE", "CAPPED"];

/// One row per collection, columns aligned. Numbers are right-aligned.
pub fn collection_table(stats: &[CollectionStats], human_readable: bool) -> String {
    let rows: Vec<[String; 8]> = stats
        .iter()
        .map(|s| {
            [
                s.collection_name().to_string(),
                format_number(s.count),
                format_size(s.size, human_readable),
                format_size(s.avg_obj_size, human_readable),
                format_size(s.storage_size, human_readable),
                s.index_count.to_string(),
                format_size(s.total_index_size, human_readable),
                (if s.capped { "yes" } else { "no" }).to_string(),
            ]
        })
        .collect();

    let mut widths = COLLECTION_HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let headers = COLLECTION_HEADERS.map(String::from);
    for row in std::iter::once(&headers).chain(&rows) {
        let mut line = String::new();
        for (column, (cell, width)) in row.iter().zip(widths).enumerate() {
            if column > 0 {
                line.push_str("  ");
            }
            if column == 0 || column == COLLECTION_HEADERS.len() - 1 {
                let _ = write!(line, "{cell:<width$}");
            } else {
                let _ = write!(line, "{cell:>width$}");
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// `label: value` lines for a database. Legacy mmapv1 fields are shown only when reported.
pub fn database_summary(stats: &DatabaseStats, human_readable: bool) -> String {
    let mut lines: Vec<(&str, String)> = vec![
        ("Database", stats.database.clone()),
        ("Collections", format_number(stats.collections)),
        ("Objects", format_number(stats.objects)),
        ("Avg object size", format_size(stats.avg_obj_size, human_readable)),
        ("Data size", format_size(stats.data_size, human_readable)),
        ("Storage size", format_size(stats.storage_size, human_readable)),
        ("Indexes", format_number(stats.indexes)),
        ("Index size", format_size(stats.index_size, human_readable)),
    ];

    if stats.num_extents > 0 {
        lines.push(("Extents", format_number(stats.num_extents)));
    }
    if stats.file_size > 0 {
        lines.push(("File size", format_size(stats.file_size, human_readable)));
    }
    if stats.ns_size_mb > 0 {
        lines.push(("Namespace size", format!("{} MB", stats.ns_size_mb)));
    }
    let version = stats.data_file_version;
    if version.major != 0 || version.minor != 0 {
        lines.push(("Data file version", format!("{}.{}", version.major, version.minor)));
    }
    let free = stats.extent_free_list;
    if free.count > 0 {
        lines.push((
            "Free extents",
            format!("{} ({})", format_number(free.count), format_size(free.size, human_readable)),
        ));
    }

    let width = lines.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    lines.iter().map(|(label, value)| format!("{label:<width$}  {value}\n")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DataFileVersion, ExtentFreeList};

    #[test]
    fn collection_table_aligns_columns() {
        let stats = vec![
            CollectionStats {
                namespace: "shop.orders".into(),
                count: 1200,
                size: 2048,
                index_count: 2,
                total_index_size: 36_864,
                ..Default::default()
            },
            CollectionStats { namespace: "shop.log".into(), capped: true, ..Default::default() },
        ];

        let table = collection_table(&stats, true);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("COLLECTION"));
        assert!(lines[1].starts_with("orders "));
        assert!(lines[1].contains("1,200"));
        assert!(lines[1].contains("2.0 KB"));
        assert!(lines[1].contains("36 KB"));
        assert!(lines[2].starts_with("log "));
        assert!(lines[2].ends_with("yes"));
        let index_column = lines[0].find("INDEXES").unwrap() + "INDEXES".len();
        assert_eq!(&lines[1][index_column - 1..index_column], "2");
    }

    #[test]
    fn collection_table_raw_bytes() {
        let stats = vec![CollectionStats {
            namespace: "a.b".into(),
            size: 2048,
            ..Default::default()
        }];
        assert!(collection_table(&stats, false).contains(" 2048 "));
    }

    #[test]
    fn collection_table_empty_has_header_only() {
        assert_eq!(collection_table(&[], true).lines().count(), 1);
    }

    #[test]
    fn database_summary_hides_absent_legacy_fields() {
        let stats = DatabaseStats { database: "shop".into(), collections: 3, ..Default::default() };
        let summary = database_summary(&stats, true);
        assert!(summary.starts_with("Database"));
        assert!(summary.contains("shop"));
        assert!(!summary.contains("File size"));
        assert!(!summary.contains("Data file version"));
    }

    #[test]
    fn database_summary_shows_legacy_fields() {
        let stats = DatabaseStats {
            database: "legacy".into(),
            file_size: 64 * 1024 * 1024,
            ns_size_mb: 16,
            data_file_version: DataFileVersion { major: 4, minor: 22 },
            extent_free_list: ExtentFreeList { count: 2, size: 1024 },
            ..Default::default()
        };
        let summary = database_summary(&stats, true);
        assert!(summary.contains("64 MB"));
        assert!(summary.contains("16 MB"));
        assert!(summary.contains("4.22"));
        assert!(summary.contains("2 (1.0 KB)"));
    }
}
