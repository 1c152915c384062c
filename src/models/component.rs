//! Component descriptors held by the registries.
//!
//! K_i: These types represent what a registry knows about one pluggable
//! component, resolved once at registration time.

use super::schema::ParamSpec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of pluggable component, one per registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Model,
    Dataset,
    Sampler,
    TrainingLoop,
    Evaluator,
    Metric,
}

impl ComponentKind {
    /// Every kind, in registry declaration order.
    pub const ALL: [ComponentKind; 6] = [
        Self::Model,
        Self::Dataset,
        Self::Sampler,
        Self::TrainingLoop,
        Self::Evaluator,
        Self::Metric,
    ];

    /// Sub-namespace used in dotted reference paths.
    ///
    /// Metrics live next to the evaluators.
    pub fn submodule(&self) -> &'static str {
        match self {
            Self::Model => "models",
            Self::Dataset => "datasets",
            Self::Sampler => "sampling",
            Self::TrainingLoop => "training",
            Self::Evaluator | Self::Metric => "evaluators",
        }
    }

    /// Section title in the composite report.
    pub fn section_title(&self) -> &'static str {
        match self {
            Self::Model => "Models",
            Self::Dataset => "Data Sets",
            Self::Sampler => "Negative Samplers",
            Self::TrainingLoop => "Training Modes",
            Self::Evaluator => "Evaluators",
            Self::Metric => "Metrics",
        }
    }

    /// Whether the third listing column is a citation parsed from documentation.
    pub fn is_cited(&self) -> bool {
        matches!(self, Self::Model)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Dataset => "dataset",
            Self::Sampler => "sampler",
            Self::TrainingLoop => "training loop",
            Self::Evaluator => "evaluator",
            Self::Metric => "metric",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registration input for one component.
///
/// A component is either a class (it has a declared `reference` name and
/// its own documentation) or an instance (no declared name; documentation
/// may only exist on its type).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ComponentSpec {
    /// Registry key
    pub name: String,

    /// Declared type name, when the entry is a class
    pub reference: Option<String>,

    /// Entry-level documentation
    pub doc: Option<String>,

    /// Type-level documentation
    pub type_doc: Option<String>,

    /// Constructor schema (models only)
    pub parameters: Vec<ParamSpec>,

    /// Hyperparameters consumed without being constructor parameters
    pub uses: Vec<String>,
}

impl ComponentSpec {
    /// A class entry: the declared name is the registry key.
    pub fn class(name: impl Into<String>, doc: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            reference: Some(name.clone()),
            name,
            doc: Some(doc.into()),
            ..Default::default()
        }
    }

    /// An instance entry documented only through its type.
    pub fn instance(name: impl Into<String>, type_doc: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_doc: Some(type_doc.into()),
            ..Default::default()
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn with_parameters(mut self, parameters: Vec<ParamSpec>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_uses<I, S>(mut self, uses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.uses = uses.into_iter().map(Into::into).collect();
        self
    }
}

/// Documentation of a component: its own, else its type's.
///
/// Blank strings count as absent.
pub fn documentation_of(spec: &ComponentSpec) -> Option<String> {
    [&spec.doc, &spec.type_doc]
        .into_iter()
        .flatten()
        .find(|doc| !doc.trim().is_empty())
        .cloned()
}

/// A registered component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
    pub kind: ComponentKind,

    /// Registry key
    pub name: String,

    /// Declared type name, or the registry key for instance entries
    pub reference: String,

    /// Resolved documentation text
    pub documentation: String,

    /// Constructor schema (models only)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParamSpec>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub uses: Vec<String>,
}

impl Component {
    /// First line of the documentation, trimmed.
    pub fn summary(&self) -> &str {
        self.documentation.trim_start().lines().next().unwrap_or("").trim()
    }

    /// Dotted reference path, e.g. `poem.models.TransE`.
    pub fn dotted_path(&self, namespace: &str) -> String {
        format!("{namespace}.{}.{}", self.kind.submodule(), self.reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documentation_prefers_entry_level() {
        let mut spec = ComponentSpec::class("TransE", "Entry doc.");
        spec.type_doc = Some("Type doc.".to_string());
        assert_eq!(documentation_of(&spec).as_deref(), Some("Entry doc."));
    }

    #[test]
    fn test_documentation_falls_back_to_type_level() {
        let mut spec = ComponentSpec::instance("hits_at_k", "Hits at k.");
        assert_eq!(documentation_of(&spec).as_deref(), Some("Hits at k."));

        spec.doc = Some("   ".to_string());
        assert_eq!(documentation_of(&spec).as_deref(), Some("Hits at k."));

        spec.type_doc = None;
        assert_eq!(documentation_of(&spec), None);
    }

    #[test]
    fn test_summary_and_path() {
        let component = Component {
            kind: ComponentKind::Metric,
            name: "mean_rank".to_string(),
            reference: "mean_rank".to_string(),
            documentation: "\nThe mean rank.\n\nLonger text.".to_string(),
            parameters: Vec::new(),
            uses: Vec::new(),
        };
        assert_eq!(component.summary(), "The mean rank.");
        assert_eq!(component.dotted_path("poem"), "poem.evaluators.mean_rank");
    }
}
