//! Table repair: type coercion, row validation, and defaulting.
//!
//! [`clean`] is the entry point. [`coerce`] and the validators are exposed so
//! they can be tested and reused on their own.

pub mod clean;
pub mod coerce;
pub mod validate;

pub use clean::{CleanOutcome, clean};
pub use coerce::{ColumnKind, coerce};
pub use validate::{find_incomplete, partition_invalid};

/// Canonical (title-cased) column names.
pub mod columns {
    pub const CATEGORY: &str = "Category";
    pub const REGION: &str = "Region";
    pub const PRICE: &str = "Price";
    pub const QUANTITY: &str = "Quantity";
    pub const SALE_DATE: &str = "Sale_Date";
    pub const REVENUE: &str = "Revenue";

    /// Columns every raw input must provide.
    pub const REQUIRED: [&str; 5] = [CATEGORY, REGION, PRICE, QUANTITY, SALE_DATE];

    /// Default for missing Category/Region after validity filtering.
    pub const UNKNOWN: &str = "Unknown";
}
