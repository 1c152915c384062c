//! Projection of registries into display rows.
//!
//! K_i: One row per registry entry, in ascending name order.
//! K_i: Row shape depends only on the table format and the registry kind.

use super::citation::{citation_reference, parse_citation};
use crate::models::{CatalogConfig, Component, ComponentKind};
use crate::registry::Registry;
use std::fmt;

/// Output table format.
///
/// Parsing is permissive: any unrecognized name is `Plain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFormat {
    #[default]
    Plain,
    Rst,
    Github,
}

impl TableFormat {
    pub fn parse(name: &str) -> Self {
        match name.trim() {
            "rst" => Self::Rst,
            "github" => Self::Github,
            _ => Self::Plain,
        }
    }

    /// Structured formats carry a reference column.
    pub fn is_structured(&self) -> bool {
        !matches!(self, Self::Plain)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Rst => "rst",
            Self::Github => "github",
        }
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of an output table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub cells: Vec<String>,
}

impl DisplayRow {
    fn new<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }

    /// Registry key of the entry this row was projected from.
    pub fn name(&self) -> &str {
        self.cells.first().map(String::as_str).unwrap_or("")
    }
}

/// Column headers for a listing of `kind` in `format`.
///
/// In rst, the "Description" column of uncited kinds holds the bare
/// dotted reference rather than documentation text.
pub fn headers(kind: ComponentKind, format: TableFormat) -> Vec<&'static str> {
    match (kind.is_cited(), format.is_structured()) {
        (true, true) => vec!["Name", "Reference", "Citation"],
        (true, false) => vec!["Name", "Citation"],
        (false, true) => vec!["Name", "Reference", "Description"],
        (false, false) => vec!["Name", "Description"],
    }
}

/// Project every registry entry into a display row.
pub fn project(registry: &Registry, format: TableFormat, catalog: &CatalogConfig) -> Vec<DisplayRow> {
    registry
        .iter()
        .map(|component| project_one(component, format, catalog))
        .collect()
}

fn project_one(component: &Component, format: TableFormat, catalog: &CatalogConfig) -> DisplayRow {
    let summary = component.summary();
    let path = component.dotted_path(&catalog.namespace);

    match format {
        TableFormat::Rst => {
            let reference = format!(":{}:`{path}`", catalog.rst_role);
            let detail = if component.kind.is_cited() {
                citation_reference(summary)
            } else {
                path
            };
            DisplayRow::new([component.name.clone(), reference, detail])
        }
        TableFormat::Github => {
            let detail = if component.kind.is_cited() {
                parse_citation(summary).et_al()
            } else {
                summary.to_string()
            };
            DisplayRow::new([component.name.clone(), format!("`{path}`"), detail])
        }
        TableFormat::Plain => {
            let detail = if component.kind.is_cited() {
                parse_citation(summary).short()
            } else {
                summary.to_string()
            };
            DisplayRow::new([component.name.clone(), detail])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ComponentSpec;
    use crate::registry::RegistryBuilder;

    fn models() -> Registry {
        let mut builder = RegistryBuilder::new(ComponentKind::Model);
        builder
            .register(ComponentSpec::class("TransH", "An implementation of TransH [wang2014]_."))
            .unwrap();
        builder
            .register(ComponentSpec::class("TransE", "An implementation of TransE [bordes2013]_.\n\nMore."))
            .unwrap();
        builder
            .register(ComponentSpec::class("Plain", "A model with no citation"))
            .unwrap();
        builder.build()
    }

    fn metrics() -> Registry {
        let mut builder = RegistryBuilder::new(ComponentKind::Metric);
        builder
            .register(ComponentSpec::instance("mean_rank", "A rank-based metric.\nDetails."))
            .unwrap();
        builder
            .register(
                ComponentSpec::class("hits", "Hits at k.").with_reference("HitsAtK"),
            )
            .unwrap();
        builder.build()
    }

    #[test]
    fn test_row_count_and_order_for_every_format() {
        let config = CatalogConfig::default();
        for registry in [models(), metrics()] {
            for name in ["plain", "rst", "github", "grid"] {
                let rows = project(&registry, TableFormat::parse(name), &config);
                assert_eq!(rows.len(), registry.len());

                let names: Vec<_> = rows.iter().map(DisplayRow::name).collect();
                let mut sorted = names.clone();
                sorted.sort();
                assert_eq!(names, sorted);
            }
        }
    }

    #[test]
    fn test_model_rows() {
        let config = CatalogConfig::default();
        let registry = models();

        let plain = project(&registry, TableFormat::Plain, &config);
        assert_eq!(plain[1].cells, vec!["TransE", "Bordes, 2013"]);

        let github = project(&registry, TableFormat::Github, &config);
        assert_eq!(
            github[1].cells,
            vec!["TransE", "`poem.models.TransE`", "Bordes et al., 2013"]
        );

        let rst = project(&registry, TableFormat::Rst, &config);
        assert_eq!(
            rst[2].cells,
            vec!["TransH", ":class:`poem.models.TransH`", "[wang2014]_"]
        );
    }

    #[test]
    fn test_uncited_model_does_not_fail() {
        let config = CatalogConfig::default();
        for format in [TableFormat::Plain, TableFormat::Rst, TableFormat::Github] {
            let rows = project(&models(), format, &config);
            assert_eq!(rows[0].name(), "Plain");
        }
    }

    #[test]
    fn test_non_model_rows() {
        let config = CatalogConfig {
            namespace: "pykeen".to_string(),
            rst_role: "class".to_string(),
        };
        let registry = metrics();

        let plain = project(&registry, TableFormat::Plain, &config);
        assert_eq!(plain[1].cells, vec!["mean_rank", "A rank-based metric."]);

        let github = project(&registry, TableFormat::Github, &config);
        assert_eq!(
            github[0].cells,
            vec!["hits", "`pykeen.evaluators.HitsAtK`", "Hits at k."]
        );
        assert_eq!(
            github[1].cells,
            vec!["mean_rank", "`pykeen.evaluators.mean_rank`", "A rank-based metric."]
        );

        let rst = project(&registry, TableFormat::Rst, &config);
        assert_eq!(
            rst[0].cells,
            vec!["hits", ":class:`pykeen.evaluators.HitsAtK`", "pykeen.evaluators.HitsAtK"]
        );
        assert_eq!(rst[1].cells[2], "pykeen.evaluators.mean_rank");
    }

    #[test]
    fn test_headers() {
        assert_eq!(headers(ComponentKind::Model, TableFormat::Plain), vec!["Name", "Citation"]);
        assert_eq!(
            headers(ComponentKind::Dataset, TableFormat::Github),
            vec!["Name", "Reference", "Description"]
        );
        assert_eq!(TableFormat::parse("fancy_grid"), TableFormat::Plain);
    }
}
