//! Plain-text sales summary.
//!
//! [`render`] is pure: it formats counts, tiers, and a fixed narrative into a
//! `String` and leaves printing to the caller.

use std::fmt::{self, Write};

use serde::Serialize;
use textwrap::{Options, WordSeparator, WordSplitter, WrapAlgorithm};

use crate::analyzers::types::{AggregateEntry, Tier, Tiers};
use crate::cleaning::columns::UNKNOWN;
use crate::table::{Cell, Table};

pub const DEFAULT_WIDTH: usize = 70;

const RULE: &str = "===========";
const FOOTER: &str = "-------------------------------------";

const ANALYSIS: &str = "The top-performing categories make up the biggest share of revenue, \
showing strong customer demand and reliable sales strength. The mid-range \
categories perform steadily and could benefit from targeted promotions or \
slightly increased visibility. Lower-ranked categories move slower and may \
need pricing adjustments, better placement, or more marketing push. \
Overall, the spread shows clear leaders, stable performers, and areas that \
may require review.";

/// Everything the report needs, detached from the tables it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_rows: usize,
    pub missing_rows: usize,
    pub tiers: Tiers<AggregateEntry>,
    /// Whether the cleaned key column contains the `"Unknown"` default.
    pub has_unknown: bool,
}

impl Summary {
    pub fn new(cleaned: &Table, missing: &Table, tiers: Tiers<AggregateEntry>, key_col: &str) -> Self {
        let unknown = Cell::text(UNKNOWN);
        let has_unknown = cleaned
            .column_values(key_col)
            .map(|values| values.contains(&unknown))
            .unwrap_or(false);

        Self {
            total_rows: cleaned.len(),
            missing_rows: missing.len(),
            tiers,
            has_unknown,
        }
    }
}

fn tier_heading(tier: Tier) -> &'static str {
    match tier {
        Tier::Top => "Top Category:",
        Tier::Middle => "Middle Categories:",
        Tier::Bottom => "Lowest Category:",
    }
}

/// Renders the summary, wrapping the narrative to `width` columns.
pub fn render(summary: &Summary, width: usize) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, summary, width);
    out
}

fn write_report(out: &mut String, summary: &Summary, width: usize) -> fmt::Result {
    writeln!(out, "{RULE} Sales Summary {RULE}")?;
    writeln!(out)?;
    writeln!(out, "Total Rows: {}", summary.total_rows)?;
    writeln!(out, "Missing Values Handled: {}", summary.missing_rows)?;

    for tier in Tier::ALL {
        writeln!(out)?;
        writeln!(out, "{}", tier_heading(tier))?;
        for entry in summary.tiers.get(tier) {
            writeln!(out, "{}", format_entry(entry))?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Overall Insights:")?;
    writeln!(out, "{}", wrap_text(ANALYSIS, width))?;
    writeln!(out)?;
    writeln!(out, "{FOOTER}")?;

    if summary.has_unknown {
        writeln!(out)?;
        writeln!(out, "Note: Some entries fall under '{UNKNOWN}'.")?;
        writeln!(
            out,
            "This may simply represent missing labels or newly introduced items."
        )?;
    }
    Ok(())
}

/// `"{key} - $1,234.50"`
pub fn format_entry(entry: &AggregateEntry) -> String {
    format!("{} - {}", entry.key, format_currency(entry.total))
}

/// Dollar amount with thousands separators and two decimals, `$-12.50` when
/// negative.
pub fn format_currency(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("${sign}{grouped}.{frac_part}")
}

/// First-fit word wrap. Words may break after an inner hyphen and words
/// longer than `width` are split. Blank lines in `text` are kept.
pub fn wrap_text(text: &str, width: usize) -> String {
    let options = Options::new(width.max(1))
        .break_words(true)
        .word_separator(WordSeparator::AsciiSpace)
        .word_splitter(WordSplitter::HyphenSplitter)
        .wrap_algorithm(WrapAlgorithm::FirstFit);

    text.split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                textwrap::wrap(line, &options).join("\n")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
