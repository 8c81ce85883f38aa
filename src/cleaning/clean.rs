use tracing::info;

use crate::error::Result;
use crate::table::{Cell, Table};

use super::coerce::{ColumnKind, coerce};
use super::columns::{CATEGORY, PRICE, QUANTITY, REGION, REQUIRED, REVENUE, SALE_DATE, UNKNOWN};
use super::validate::{find_incomplete, partition_invalid};

/// Output of [`clean`].
#[derive(Debug, Clone)]
pub struct CleanOutcome {
    /// Valid, defaulted rows with a Revenue column.
    pub cleaned: Table,
    /// Valid rows that lacked Category or Region, as they were before defaulting.
    pub missing: Table,
    /// Rows removed for a missing or non-positive Price or Quantity.
    pub invalid: Table,
}

/// Repairs a raw sales table.
///
/// Steps run in a fixed order: title-case headers, coerce Price/Quantity/
/// Sale_Date, drop invalid rows, snapshot incomplete rows, default missing
/// Category/Region to `"Unknown"`, then add Revenue = Price × Quantity.
///
/// The `missing` snapshot is taken after invalid rows are gone and before
/// defaulting, so it only counts surviving rows and has no Revenue column
/// (unless the input already carried one).
///
/// # Errors
///
/// Fails only on structural problems: a required column is absent or two
/// headers collide after title-casing.
#[tracing::instrument(skip_all, fields(rows = raw.len()))]
pub fn clean(raw: &Table) -> Result<CleanOutcome> {
    let mut table = raw.with_title_case_columns()?;
    for column in REQUIRED {
        table.column_index(column)?;
    }

    let price = coerce(&table.column_values(PRICE)?, ColumnKind::Numeric);
    let quantity = coerce(&table.column_values(QUANTITY)?, ColumnKind::Numeric);
    let sale_date = coerce(&table.column_values(SALE_DATE)?, ColumnKind::Date);
    table.set_column(PRICE, price);
    table.set_column(QUANTITY, quantity);
    table.set_column(SALE_DATE, sale_date);

    let (mut working, invalid) = partition_invalid(&table)?;

    let missing = find_incomplete(&working)?;

    fill_missing(&mut working, CATEGORY)?;
    fill_missing(&mut working, REGION)?;

    let revenue = revenue(&working)?;
    working.set_column(REVENUE, revenue);

    info!(
        cleaned = working.len(),
        invalid = invalid.len(),
        missing = missing.len(),
        "Table cleaned"
    );

    Ok(CleanOutcome {
        cleaned: working,
        missing,
        invalid,
    })
}

fn fill_missing(table: &mut Table, column: &str) -> Result<()> {
    let filled = table
        .column_values(column)?
        .into_iter()
        .map(|c| if c.is_missing() { Cell::text(UNKNOWN) } else { c })
        .collect();
    table.set_column(column, filled);
    Ok(())
}

fn revenue(table: &Table) -> Result<Vec<Cell>> {
    let price = table.column_values(PRICE)?;
    let quantity = table.column_values(QUANTITY)?;

    Ok(price
        .iter()
        .zip(&quantity)
        .map(|(p, q)| match (p.as_number(), q.as_number()) {
            (Some(p), Some(q)) => Cell::Number(p * q),
            _ => Cell::Missing,
        })
        .collect())
}
