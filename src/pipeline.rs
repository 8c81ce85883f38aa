//! End-to-end run: clean → aggregate → tier → render.

use tracing::info;

use crate::analyzers::{AggregateEntry, Tiers, aggregate, tier};
use crate::cleaning::clean;
use crate::config::ReportConfig;
use crate::error::Result;
use crate::report::{Summary, render};
use crate::table::Table;

/// Every artefact of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub cleaned: Table,
    pub missing: Table,
    pub invalid: Table,
    pub ranked: Vec<AggregateEntry>,
    pub summary: Summary,
    pub report: String,
}

impl PipelineOutput {
    pub fn tiers(&self) -> &Tiers<AggregateEntry> {
        &self.summary.tiers
    }
}

/// Runs all stages over `raw` with the given settings.
///
/// # Errors
///
/// Only structural errors propagate: missing columns, header collisions, or
/// a non-numeric measure column.
pub fn run(raw: &Table, config: &ReportConfig) -> Result<PipelineOutput> {
    let outcome = clean(raw)?;
    let ranked = aggregate(&outcome.cleaned, &config.key_column, &config.measure_column)?;
    let tiers = tier(&ranked);

    let summary = Summary::new(&outcome.cleaned, &outcome.missing, tiers, &config.key_column);
    let report = render(&summary, config.width);

    info!(
        rows = outcome.cleaned.len(),
        groups = ranked.len(),
        top = summary.tiers.top.len(),
        middle = summary.tiers.middle.len(),
        bottom = summary.tiers.bottom.len(),
        "Pipeline finished"
    );

    Ok(PipelineOutput {
        cleaned: outcome.cleaned,
        missing: outcome.missing,
        invalid: outcome.invalid,
        ranked,
        summary,
        report,
    })
}
