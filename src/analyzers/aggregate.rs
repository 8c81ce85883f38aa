use std::collections::HashMap;

use tracing::debug;

use crate::analyzers::types::AggregateEntry;
use crate::cleaning::coerce::{ColumnKind, coerce_cell};
use crate::error::{PipelineError, Result};
use crate::table::{Cell, Table};

/// Groups `table` by `key_col` and sums `measure_col` per group.
///
/// Groups are returned by total, highest first. The sort is stable, so groups
/// with equal totals keep the order in which their key first appeared.
/// Rows with a missing key are left out; missing measure cells add nothing.
/// Measure cells still holding numeric text (columns the cleaner never
/// coerced) are read as numbers.
///
/// # Errors
///
/// [`PipelineError::MissingColumn`] if either column is absent, and
/// [`PipelineError::TypeMismatch`] if a measure cell holds a date or text
/// that does not parse as a number.
#[tracing::instrument(skip(table), fields(rows = table.len()))]
pub fn aggregate(table: &Table, key_col: &str, measure_col: &str) -> Result<Vec<AggregateEntry>> {
    let key_idx = table.column_index(key_col)?;
    let measure_idx = table.column_index(measure_col)?;

    let mut entries: Vec<AggregateEntry> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for (row_idx, row) in table.rows().iter().enumerate() {
        let cell = &row[measure_idx];
        let value = match coerce_cell(cell, ColumnKind::Numeric) {
            Cell::Number(n) => n,
            // Non-finite numbers are skipped like missing ones.
            _ if matches!(cell, Cell::Missing | Cell::Number(_)) => 0.0,
            _ => {
                return Err(PipelineError::TypeMismatch {
                    column: measure_col.to_string(),
                    row: row_idx,
                    found: cell.kind_name(),
                });
            }
        };

        let key = match &row[key_idx] {
            Cell::Missing => continue,
            cell => cell.to_string(),
        };

        match positions.get(&key) {
            Some(&pos) => entries[pos].total += value,
            None => {
                positions.insert(key.clone(), entries.len());
                entries.push(AggregateEntry::new(key, value));
            }
        }
    }

    entries.sort_by(|a, b| b.total.total_cmp(&a.total));

    debug!(groups = entries.len(), "Aggregation complete");
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sales(rows: &[(&str, f64)]) -> Table {
        Table::from_rows(
            vec!["Category".into(), "Revenue".into()],
            rows.iter()
                .map(|(k, v)| vec![Cell::text(*k), Cell::Number(*v)])
                .collect(),
        )
    }

    #[test]
    fn test_sums_and_orders_descending() {
        let t = sales(&[("A", 5.0), ("B", 10.0), ("A", 7.5), ("C", 1.0)]);
        let ranked = aggregate(&t, "Category", "Revenue").unwrap();

        assert_eq!(
            ranked,
            vec![
                AggregateEntry::new("A", 12.5),
                AggregateEntry::new("B", 10.0),
                AggregateEntry::new("C", 1.0),
            ]
        );
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let t = sales(&[("A", 20.0), ("Unknown", 20.0)]);
        let ranked = aggregate(&t, "Category", "Revenue").unwrap();
        assert_eq!(ranked[0].key, "A");
        assert_eq!(ranked[1].key, "Unknown");

        let t = sales(&[("Unknown", 20.0), ("A", 20.0)]);
        let ranked = aggregate(&t, "Category", "Revenue").unwrap();
        assert_eq!(ranked[0].key, "Unknown");
    }

    #[test]
    fn test_permutation_invariant() {
        let rows = [("A", 3.0), ("B", 9.0), ("A", 4.0), ("C", 2.0), ("B", 1.0)];
        let forward = aggregate(&sales(&rows), "Category", "Revenue").unwrap();

        let mut reversed = rows;
        reversed.reverse();
        let backward = aggregate(&sales(&reversed), "Category", "Revenue").unwrap();

        assert_eq!(forward, backward);
    }

    #[test]
    fn test_missing_key_and_measure() {
        let t = Table::from_rows(
            vec!["Category".into(), "Revenue".into()],
            vec![
                vec![Cell::Missing, Cell::Number(100.0)],
                vec![Cell::text("A"), Cell::Missing],
                vec![Cell::text("A"), Cell::Number(2.0)],
            ],
        );
        let ranked = aggregate(&t, "Category", "Revenue").unwrap();
        assert_eq!(ranked, vec![AggregateEntry::new("A", 2.0)]);
    }

    #[test]
    fn test_text_measure_is_type_mismatch() {
        let t = Table::from_rows(
            vec!["Category".into(), "Revenue".into()],
            vec![vec![Cell::text("A"), Cell::text("lots")]],
        );
        let err = aggregate(&t, "Category", "Revenue").unwrap_err();
        assert!(matches!(err, PipelineError::TypeMismatch { row: 0, .. }));
    }

    #[test]
    fn test_numeric_text_measure_is_summed() {
        let t = Table::from_rows(
            vec!["Category".into(), "Cost".into()],
            vec![
                vec![Cell::text("A"), Cell::text("3")],
                vec![Cell::text("B"), Cell::text(" 7.5 ")],
                vec![Cell::text("A"), Cell::text("7")],
            ],
        );
        let ranked = aggregate(&t, "Category", "Cost").unwrap();
        assert_eq!(
            ranked,
            vec![AggregateEntry::new("A", 10.0), AggregateEntry::new("B", 7.5)]
        );
    }

    #[test]
    fn test_date_measure_is_type_mismatch() {
        let d = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let t = Table::from_rows(
            vec!["Category".into(), "Revenue".into()],
            vec![
                vec![Cell::text("A"), Cell::Number(1.0)],
                vec![Cell::text("A"), Cell::Date(d)],
            ],
        );
        let err = aggregate(&t, "Category", "Revenue").unwrap_err();
        assert!(matches!(err, PipelineError::TypeMismatch { row: 1, found: "date", .. }));
    }

    #[test]
    fn test_custom_key_column() {
        let t = Table::from_rows(
            vec!["Region".into(), "Revenue".into()],
            vec![
                vec![Cell::text("EU"), Cell::Number(1.0)],
                vec![Cell::text("US"), Cell::Number(3.0)],
            ],
        );
        let ranked = aggregate(&t, "Region", "Revenue").unwrap();
        assert_eq!(ranked[0].key, "US");
        assert!(aggregate(&t, "Category", "Revenue").is_err());
    }

    #[test]
    fn test_empty_table() {
        let ranked = aggregate(&sales(&[]), "Category", "Revenue").unwrap();
        assert!(ranked.is_empty());
    }
}
