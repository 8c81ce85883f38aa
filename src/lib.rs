pub mod analyzers;
pub mod cleaning;
pub mod config;
pub mod error;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod report;
pub mod stats;
pub mod table;

pub use error::{PipelineError, Result};
pub use table::{Cell, Table};
