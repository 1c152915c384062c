//! Listing output: single tables, the parameter usage list and the
//! composite README section.
//!
//! Report flow:
//! Catalog → project (github) per section → render → `### <Title>` blocks

use super::rows::{TableFormat, headers, project};
use super::table::render_table;
use crate::models::{CatalogConfig, ComponentKind, KgexError, Result};
use crate::registry::{Catalog, Registry};
use std::collections::BTreeSet;
use std::io::Write;
use tracing::debug;

/// Sections of the composite report, in output order.
///
/// Negative samplers are listed separately and not part of the report.
pub const REPORT_SECTIONS: [ComponentKind; 5] = [
    ComponentKind::Model,
    ComponentKind::Dataset,
    ComponentKind::TrainingLoop,
    ComponentKind::Evaluator,
    ComponentKind::Metric,
];

/// Render one registry as a table.
pub fn listing(registry: &Registry, format: TableFormat, catalog: &CatalogConfig) -> String {
    let rows = project(registry, format, catalog);
    debug!(kind = %registry.kind(), rows = rows.len(), %format, "Rendering listing");
    render_table(&headers(registry.kind(), format), &rows, format)
}

/// Write one registry listing followed by a newline.
pub fn write_listing<W: Write + ?Sized>(
    out: &mut W,
    registry: &Registry,
    format: TableFormat,
    catalog: &CatalogConfig,
) -> Result<()> {
    writeln!(out, "{}", listing(registry, format, catalog))
        .map_err(|e| KgexError::io("writing listing", e))
}

/// One titled block of the composite report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportBlock {
    pub title: &'static str,
    pub table: String,
}

impl ReportBlock {
    /// `### <Title>`, a blank line, then the table.
    pub fn render(&self) -> String {
        format!("### {}\n\n{}\n", self.title, self.table)
    }
}

/// Build every report section as a github table, in fixed order.
///
/// Empty registries still produce their section.
pub fn emit(catalog: &Catalog, config: &CatalogConfig) -> Vec<ReportBlock> {
    REPORT_SECTIONS
        .iter()
        .map(|&kind| ReportBlock {
            title: kind.section_title(),
            table: listing(catalog.registry(kind), TableFormat::Github, config),
        })
        .collect()
}

/// The composite report, sections separated by a single blank line.
pub fn render_report(blocks: &[ReportBlock]) -> String {
    blocks
        .iter()
        .map(ReportBlock::render)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write the composite report.
pub fn write_report<W: Write + ?Sized>(out: &mut W, catalog: &Catalog, config: &CatalogConfig) -> Result<()> {
    let blocks = emit(catalog, config);
    write!(out, "{}", render_report(&blocks)).map_err(|e| KgexError::io("writing report", e))
}

/// Render hyperparameter usage as a numbered list.
pub fn render_parameters(usage: &[(String, BTreeSet<String>)]) -> String {
    let mut text = String::from("Names of __init__() parameters in all classes:\n");
    for (i, (name, users)) in usage.iter().enumerate() {
        text.push_str(&format!("{:>2}. {name}\n", i + 1));
        for user in users {
            text.push_str(&format!("    - {user}\n"));
        }
    }
    text
}

/// Write the hyperparameter usage list.
pub fn write_parameters<W: Write + ?Sized>(out: &mut W, catalog: &Catalog) -> Result<()> {
    let usage = catalog.hyperparameter_usage();
    write!(out, "{}", render_parameters(&usage))
        .map_err(|e| KgexError::io("writing parameters", e))
}
