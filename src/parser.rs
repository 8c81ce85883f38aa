//! CSV loader for raw sales tables.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::table::{Cell, Table};

/// Field values read as the missing marker rather than as text.
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Converts one raw CSV field into a cell.
pub fn raw_cell(field: &str) -> Cell {
    let trimmed = field.trim();
    if NA_TOKENS.contains(&trimmed) {
        Cell::Missing
    } else {
        Cell::text(trimmed)
    }
}

/// Reads a headed CSV document into a [`Table`] of text cells.
///
/// Rows shorter than the header are padded with [`Cell::Missing`]; extra
/// trailing fields are dropped.
///
/// # Errors
///
/// Returns [`PipelineError::EmptyHeader`] if there is no header row and
/// [`PipelineError::Csv`] if the document is not readable as CSV.
pub fn parse_table<R: Read>(reader: R) -> Result<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
    if headers.is_empty() || headers.iter().all(String::is_empty) {
        return Err(PipelineError::EmptyHeader);
    }

    let mut table = Table::new(headers);
    for result in rdr.records() {
        let record = result?;
        table.push_row(record.iter().map(raw_cell).collect());
    }

    debug!(rows = table.len(), columns = table.width(), "CSV parsed");
    Ok(table)
}

/// Opens `path` and parses it with [`parse_table`].
pub fn load_table(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Loading CSV");
    let file = File::open(path)?;
    parse_table(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_table() {
        let csv = "Category,Region,Price\nA,US,10\nB,EU,4.5\n";
        let table = parse_table(csv.as_bytes()).unwrap();

        assert_eq!(table.columns(), &["Category", "Region", "Price"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(1, "Price"), Some(&Cell::text("4.5")));
    }

    #[test]
    fn test_na_tokens_become_missing() {
        let csv = "a,b,c,d\n,NA,null,x\n";
        let table = parse_table(csv.as_bytes()).unwrap();

        assert_eq!(
            table.rows()[0],
            vec![Cell::Missing, Cell::Missing, Cell::Missing, Cell::text("x")]
        );
    }

    #[test]
    fn test_short_rows_are_padded() {
        let csv = "a,b,c\n1\n";
        let table = parse_table(csv.as_bytes()).unwrap();

        assert_eq!(table.rows()[0], vec![Cell::text("1"), Cell::Missing, Cell::Missing]);
    }

    #[test]
    fn test_header_only_is_empty_table() {
        let table = parse_table("a,b\n".as_bytes()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.width(), 2);
    }

    #[test]
    fn test_empty_input_is_error() {
        let result = parse_table("".as_bytes());
        assert!(matches!(result, Err(PipelineError::EmptyHeader)));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_table("/definitely/not/here.csv");
        assert!(matches!(result, Err(PipelineError::Io(_))));
    }
}
