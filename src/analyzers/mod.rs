//! Revenue ranking and tiering.
//!
//! [`aggregate`] reduces a cleaned table to a ranked list of
//! [`types::AggregateEntry`], and [`tier`] splits that ranking into
//! top, middle, and bottom partitions.

pub mod aggregate;
pub mod tier;
pub mod types;
pub mod utility;

pub use aggregate::aggregate;
pub use tier::{tier, tier_bounds};
pub use types::{AggregateEntry, Tier, Tiers};
