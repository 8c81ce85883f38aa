//! Row classification: invalid measures and incomplete labels.
//!
//! The two checks are independent. A row can be incomplete without being
//! invalid and the other way round.

use crate::error::Result;
use crate::table::{Cell, Table};

use super::columns::{CATEGORY, PRICE, QUANTITY, REGION};

/// A measure passes only if it is a number strictly greater than zero.
/// Missing or non-numeric cells always fail.
fn is_positive(cell: &Cell) -> bool {
    cell.as_number().is_some_and(|n| n > 0.0)
}

/// Splits `table` into `(valid_rows, invalid_rows)`.
///
/// A row is invalid when Price or Quantity is missing or not strictly positive.
pub fn partition_invalid(table: &Table) -> Result<(Table, Table)> {
    let price = table.column_index(PRICE)?;
    let quantity = table.column_index(QUANTITY)?;

    Ok(table.partition_rows(|row| is_positive(&row[price]) && is_positive(&row[quantity])))
}

/// Rows whose Category or Region is missing.
pub fn find_incomplete(table: &Table) -> Result<Table> {
    let category = table.column_index(CATEGORY)?;
    let region = table.column_index(REGION)?;

    Ok(table.filter_rows(|row| row[category].is_missing() || row[region].is_missing()))
}
