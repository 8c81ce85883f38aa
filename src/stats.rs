use serde::Serialize;

use crate::analyzers::utility::{mean, min_max, pct, stddev};
use crate::cleaning::coerce::{ColumnKind, coerce_cell};
use crate::table::{Cell, Table};

/// Inferred content of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnType {
    Numeric,
    Date,
    Text,
    Empty,
}

/// count / mean / std / min / max over the numeric cells of a column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    pub name: String,
    pub column_type: ColumnType,
    pub missing: usize,
    pub missing_pct: f64,
    pub numeric: Option<NumericSummary>,
}

/// Shape and per-column profile of a table, used by `inspect`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableStats {
    pub rows: usize,
    pub columns: usize,
    pub column_stats: Vec<ColumnStats>,
}

impl TableStats {
    pub fn from_table(table: &Table) -> Self {
        let column_stats = table
            .columns()
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let cells: Vec<&Cell> = table.rows().iter().map(|r| &r[idx]).collect();
                column_stats(name, &cells)
            })
            .collect();

        TableStats {
            rows: table.len(),
            columns: table.width(),
            column_stats,
        }
    }

    pub fn column(&self, name: &str) -> Option<&ColumnStats> {
        self.column_stats.iter().find(|c| c.name == name)
    }
}

fn column_stats(name: &str, cells: &[&Cell]) -> ColumnStats {
    let present: Vec<&Cell> = cells.iter().copied().filter(|c| !c.is_missing()).collect();
    let missing = cells.len() - present.len();

    let numbers: Vec<f64> = present
        .iter()
        .filter_map(|c| coerce_cell(c, ColumnKind::Numeric).as_number())
        .collect();

    let column_type = if present.is_empty() {
        ColumnType::Empty
    } else if numbers.len() == present.len() {
        ColumnType::Numeric
    } else if present
        .iter()
        .all(|c| !coerce_cell(c, ColumnKind::Date).is_missing())
    {
        ColumnType::Date
    } else {
        ColumnType::Text
    };

    let numeric = match (column_type, min_max(&numbers)) {
        (ColumnType::Numeric, Some((min, max))) => {
            let avg = mean(&numbers);
            Some(NumericSummary {
                count: numbers.len(),
                mean: avg,
                std: stddev(&numbers, avg),
                min,
                max,
            })
        }
        _ => None,
    };

    ColumnStats {
        name: name.to_string(),
        column_type,
        missing,
        missing_pct: pct(missing, cells.len()),
        numeric,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_table;

    fn sample() -> Table {
        let csv = "Category,Price,Sale_Date,Note\n\
                   A,10,2024-01-01,\n\
                   B,30,2024-01-02,\n\
                   ,x,bad,\n\
                   C,20,2024-01-03,\n";
        parse_table(csv.as_bytes()).unwrap()
    }

    #[test]
    fn test_shape() {
        let stats = TableStats::from_table(&sample());
        assert_eq!(stats.rows, 4);
        assert_eq!(stats.columns, 4);
    }

    #[test]
    fn test_column_types() {
        let stats = TableStats::from_table(&sample());
        assert_eq!(stats.column("Category").unwrap().column_type, ColumnType::Text);
        // "x" is not numeric, so Price reads as text until cleaned.
        assert_eq!(stats.column("Price").unwrap().column_type, ColumnType::Text);
        assert_eq!(stats.column("Sale_Date").unwrap().column_type, ColumnType::Text);
        assert_eq!(stats.column("Note").unwrap().column_type, ColumnType::Empty);
    }

    #[test]
    fn test_numeric_summary() {
        let table = sample().head(2);
        let stats = TableStats::from_table(&table);
        let price = stats.column("Price").unwrap();

        assert_eq!(price.column_type, ColumnType::Numeric);
        let summary = price.numeric.as_ref().unwrap();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.mean, 20.0);
        assert_eq!(summary.std, 10.0);
        assert_eq!(summary.min, 10.0);
        assert_eq!(summary.max, 30.0);

        assert_eq!(stats.column("Sale_Date").unwrap().column_type, ColumnType::Date);
    }

    #[test]
    fn test_missing_pct() {
        let stats = TableStats::from_table(&sample());
        let category = stats.column("Category").unwrap();
        assert_eq!(category.missing, 1);
        assert_eq!(category.missing_pct, 25.0);
        assert_eq!(stats.column("Note").unwrap().missing_pct, 100.0);
    }

    #[test]
    fn test_empty_table() {
        let stats = TableStats::from_table(&Table::new(vec!["a".into()]));
        assert_eq!(stats.rows, 0);
        assert_eq!(stats.column("a").unwrap().missing_pct, 0.0);
    }
}
