//! In-memory table model shared by every pipeline stage.
//!
//! A [`Table`] is an ordered list of rows over a fixed column set. Cells are
//! dynamically typed so that a column can start as raw text and be coerced
//! in place into numbers or dates without changing the table's shape.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use crate::error::{PipelineError, Result};

/// A single table value.
///
/// [`Cell::Missing`] is the explicit "no value" marker. It is produced by the
/// loader for empty/NA fields and by coercion for values that fail to parse.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Missing,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Short name of the variant, used in error messages and inspection output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Cell::Missing => "missing",
            Cell::Text(_) => "text",
            Cell::Number(_) => "number",
            Cell::Date(_) => "date",
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Missing => Ok(()),
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => write!(f, "{n}"),
            Cell::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Builds a table, padding short rows with [`Cell::Missing`] and dropping
    /// cells beyond the last column.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row);
        }
        table
    }

    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), Cell::Missing);
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| PipelineError::MissingColumn(name.to_string()))
    }

    /// Returns the cell at `row` in column `name`, if both exist.
    pub fn get(&self, row: usize, name: &str) -> Option<&Cell> {
        let idx = self.columns.iter().position(|c| c == name)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// Copies out one column's values in row order.
    pub fn column_values(&self, name: &str) -> Result<Vec<Cell>> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|r| r[idx].clone()).collect())
    }

    /// Overwrites an existing column, or appends it when absent.
    ///
    /// `values` must have exactly one entry per row.
    pub fn set_column(&mut self, name: &str, values: Vec<Cell>) {
        debug_assert_eq!(values.len(), self.rows.len());
        match self.columns.iter().position(|c| c == name) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                self.columns.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
    }

    /// Splits rows into `(matching, rest)`, preserving order in both halves.
    pub fn partition_rows<F>(&self, mut pred: F) -> (Table, Table)
    where
        F: FnMut(&[Cell]) -> bool,
    {
        let mut yes = Table::new(self.columns.clone());
        let mut no = Table::new(self.columns.clone());
        for row in &self.rows {
            if pred(row) {
                yes.rows.push(row.clone());
            } else {
                no.rows.push(row.clone());
            }
        }
        (yes, no)
    }

    pub fn filter_rows<F>(&self, pred: F) -> Table
    where
        F: FnMut(&[Cell]) -> bool,
    {
        self.partition_rows(pred).0
    }

    /// Returns a copy with every column name title-cased.
    ///
    /// Fails if two names collide once normalized (e.g. `price` and `PRICE`).
    pub fn with_title_case_columns(&self) -> Result<Table> {
        let mut columns: Vec<String> = Vec::with_capacity(self.columns.len());
        for name in &self.columns {
            let normalized = title_case(name);
            if columns.contains(&normalized) {
                return Err(PipelineError::DuplicateColumn(normalized));
            }
            columns.push(normalized);
        }
        Ok(Table {
            columns,
            rows: self.rows.clone(),
        })
    }

    /// First `n` rows as a new table.
    pub fn head(&self, n: usize) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}

/// Capitalizes the first letter of every word and lowercases the rest.
///
/// A word starts after any non-alphabetic character, so `sale_date` becomes
/// `Sale_Date` and `UNIT PRICE` becomes `Unit Price`.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_is_letter = false;
    for ch in name.trim().chars() {
        if ch.is_alphabetic() {
            if prev_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(ch);
            prev_is_letter = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("sale_date"), "Sale_Date");
        assert_eq!(title_case("PRICE"), "Price");
        assert_eq!(title_case("unit price"), "Unit Price");
        assert_eq!(title_case("  category "), "Category");
        assert_eq!(title_case("2nd"), "2Nd");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_from_rows_pads_and_truncates() {
        let table = Table::from_rows(
            cols(&["a", "b"]),
            vec![vec![Cell::from("1")], vec!["1".into(), "2".into(), "3".into()]],
        );
        assert_eq!(table.rows()[0], vec![Cell::text("1"), Cell::Missing]);
        assert_eq!(table.rows()[1].len(), 2);
    }

    #[test]
    fn test_duplicate_after_title_case() {
        let table = Table::new(cols(&["price", "PRICE"]));
        let err = table.with_title_case_columns().unwrap_err();
        assert!(matches!(err, PipelineError::DuplicateColumn(ref c) if c == "Price"));
    }

    #[test]
    fn test_set_column_appends_then_overwrites() {
        let mut table = Table::from_rows(cols(&["a"]), vec![vec!["x".into()], vec!["y".into()]]);
        table.set_column("b", vec![Cell::Number(1.0), Cell::Number(2.0)]);
        assert_eq!(table.columns(), &["a", "b"]);
        table.set_column("b", vec![Cell::Missing, Cell::Number(3.0)]);
        assert_eq!(table.width(), 2);
        assert_eq!(table.get(1, "b"), Some(&Cell::Number(3.0)));
        assert_eq!(table.get(0, "b"), Some(&Cell::Missing));
    }

    #[test]
    fn test_partition_keeps_order() {
        let table = Table::from_rows(
            cols(&["n"]),
            (1..=5).map(|i| vec![Cell::Number(i as f64)]).collect(),
        );
        let (even, odd) = table.partition_rows(|r| r[0].as_number().unwrap() % 2.0 == 0.0);
        assert_eq!(
            even.column_values("n").unwrap(),
            vec![Cell::Number(2.0), Cell::Number(4.0)]
        );
        assert_eq!(odd.len(), 3);
        assert_eq!(table.len(), 5);
    }

    #[test]
    fn test_column_index_missing() {
        let table = Table::new(cols(&["a"]));
        assert!(matches!(
            table.column_index("b"),
            Err(PipelineError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::Missing.to_string(), "");
        assert_eq!(Cell::Number(20.0).to_string(), "20");
        assert_eq!(Cell::Number(10.5).to_string(), "10.5");
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(Cell::Date(d).to_string(), "2024-01-01");
    }

    #[test]
    fn test_cell_serializes_missing_as_null() {
        let json = serde_json::to_string(&vec![Cell::Missing, Cell::text("A"), Cell::Number(2.5)])
            .unwrap();
        assert_eq!(json, r#"[null,"A",2.5]"#);
    }
}
