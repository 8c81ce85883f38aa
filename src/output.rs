//! Export of cleaned tables and summaries.
//!
//! Supports CSV and JSON, each optionally gzip-compressed.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::table::Table;

/// Output encoding for [`export_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    /// Parses a user-supplied format name. Unknown names fall back to CSV.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "csv" => ExportFormat::Csv,
            "json" => ExportFormat::Json,
            other => {
                warn!(format = other, "Unsupported export format, falling back to CSV");
                ExportFormat::Csv
            }
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Writes `table` as CSV with a header row. Missing cells become empty fields.
pub fn write_table_csv<W: Write>(writer: W, table: &Table) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(table.columns())?;
    for row in table.rows() {
        wtr.write_record(row.iter().map(|c| c.to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes `table` as a JSON array of objects keyed by column name.
pub fn write_table_json<W: Write>(writer: W, table: &Table) -> Result<()> {
    let mut records = Vec::with_capacity(table.len());
    for row in table.rows() {
        let mut record = serde_json::Map::new();
        for (name, cell) in table.columns().iter().zip(row) {
            record.insert(name.clone(), serde_json::to_value(cell)?);
        }
        records.push(serde_json::Value::Object(record));
    }

    serde_json::to_writer_pretty(writer, &records)?;
    Ok(())
}

/// Writes `table` to `path` in `format`, gzip-compressing when `gzip` is set.
pub fn export_table(path: &Path, table: &Table, format: ExportFormat, gzip: bool) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = BufWriter::new(File::create(path)?);
    debug!(path = %path.display(), ?format, gzip, "Exporting table");

    if gzip {
        let mut encoder = GzEncoder::new(file, Compression::default());
        write_table(&mut encoder, table, format)?;
        encoder.finish()?.flush()?;
    } else {
        let mut file = file;
        write_table(&mut file, table, format)?;
        file.flush()?;
    }

    info!(path = %path.display(), rows = table.len(), "Table exported");
    Ok(())
}

fn write_table<W: Write>(writer: W, table: &Table, format: ExportFormat) -> Result<()> {
    match format {
        ExportFormat::Csv => write_table_csv(writer, table),
        ExportFormat::Json => write_table_json(writer, table),
    }
}

/// Logs any serializable value as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
