use std::fs;
use std::path::Path;

use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::io::sheet;
use crate::model::Expedition;
use crate::normalize::{
    self, CONDITIONS_SHEET, DELIVERABLES_SHEET, ExportOptions, NormalizeReport, PROPERTIES_SHEET,
    REWARDS_SHEET,
};

/// Outcome of an export or check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    /// Number of expedition records in the produced document.
    pub exported: usize,
    /// Row-level skip tallies from the normalize passes.
    pub report: NormalizeReport,
}

/// Converts an expedition workbook into the normalized JSON document.
///
/// The document is serialized in full before anything touches the output
/// path, so a fatal failure never leaves a partial file behind.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn export_workbook(input: &Path, output: &Path, options: &ExportOptions) -> Result<ExportSummary> {
    let (expeditions, report) = read_expeditions(input, options)?;
    let json = serde_json::to_string_pretty(&expeditions)?;
    fs::write(output, json)?;
    info!(expedition_count = expeditions.len(), "wrote expedition document");
    Ok(ExportSummary {
        exported: expeditions.len(),
        report,
    })
}

/// Runs the full pipeline without writing anything, so a workbook can be
/// validated and its skip report inspected before content ships.
#[instrument(level = "info", skip_all, fields(input = %input.display()))]
pub fn check_workbook(input: &Path, options: &ExportOptions) -> Result<ExportSummary> {
    let (expeditions, report) = read_expeditions(input, options)?;
    Ok(ExportSummary {
        exported: expeditions.len(),
        report,
    })
}

fn read_expeditions(
    input: &Path,
    options: &ExportOptions,
) -> Result<(Vec<Expedition>, NormalizeReport)> {
    let mut workbook = sheet::open(input)?;

    let props = sheet::load_sheet(&mut workbook, PROPERTIES_SHEET, options.header_row)?;
    let conditions = sheet::load_sheet(&mut workbook, CONDITIONS_SHEET, options.header_row)?;
    let deliverables = sheet::load_sheet(&mut workbook, DELIVERABLES_SHEET, options.header_row)?;
    let rewards = sheet::load_sheet(&mut workbook, REWARDS_SHEET, options.header_row)?;
    debug!(
        properties = props.len(),
        conditions = conditions.len(),
        deliverables = deliverables.len(),
        rewards = rewards.len(),
        "loaded expedition sheets"
    );

    let (expeditions, report) = normalize::normalize(
        &props,
        &conditions,
        &deliverables,
        &rewards,
        options,
    );
    info!(
        expedition_count = expeditions.len(),
        skipped_rows = report.skipped_total(),
        "normalized expedition records"
    );
    Ok((expeditions, report))
}
