//! Value-wise, best-effort type coercion.
//!
//! A cell that cannot be read as the target kind becomes [`Cell::Missing`].
//! Coercion never fails for a column as a whole.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::table::Cell;

/// Target kind for [`coerce`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Date,
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%Y%m%d"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

pub fn coerce(values: &[Cell], kind: ColumnKind) -> Vec<Cell> {
    let out: Vec<Cell> = values.iter().map(|v| coerce_cell(v, kind)).collect();

    let dropped = values
        .iter()
        .zip(&out)
        .filter(|(before, after)| !before.is_missing() && after.is_missing())
        .count();
    if dropped > 0 {
        debug!(?kind, dropped, "Values coerced to missing");
    }

    out
}

pub fn coerce_cell(value: &Cell, kind: ColumnKind) -> Cell {
    match kind {
        ColumnKind::Numeric => to_number(value).map_or(Cell::Missing, Cell::Number),
        ColumnKind::Date => to_date(value).map_or(Cell::Missing, Cell::Date),
    }
}

fn to_number(value: &Cell) -> Option<f64> {
    let n = match value {
        Cell::Number(n) => *n,
        Cell::Text(s) => s.trim().parse::<f64>().ok()?,
        Cell::Missing | Cell::Date(_) => return None,
    };
    n.is_finite().then_some(n)
}

fn to_date(value: &Cell) -> Option<NaiveDate> {
    let s = match value {
        Cell::Date(d) => return Some(*d),
        Cell::Text(s) => s.trim(),
        Cell::Missing | Cell::Number(_) => return None,
    };

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}
