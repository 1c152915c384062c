//! Hyperparameter usage aggregation.
//!
//! Components contribute their `parameter → component` pairs when they
//! are registered; the "parameters" listing reads the flat result without
//! walking any type hierarchy.

use std::collections::{BTreeMap, BTreeSet};

/// Name that never appears in the usage listing.
pub const EXCLUDED_SENTINEL: &str = "init";

/// Flat `hyperparameter → {component}` map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HyperparameterUsage {
    usage: BTreeMap<String, BTreeSet<String>>,
}

impl HyperparameterUsage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `component` declares or consumes `parameter`.
    pub fn record(&mut self, parameter: impl Into<String>, component: impl Into<String>) {
        self.usage
            .entry(parameter.into())
            .or_default()
            .insert(component.into());
    }

    /// Record every parameter of one component.
    pub fn record_all<I, S>(&mut self, component: &str, parameters: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for parameter in parameters {
            self.record(parameter, component);
        }
    }

    /// Usage of every hyperparameter outside the shared base constructor.
    ///
    /// Sorted by hyperparameter name; each usage set is sorted too. Reads
    /// only, so repeated calls return identical output.
    pub fn aggregate(&self, base_parameters: &BTreeSet<String>) -> Vec<(String, BTreeSet<String>)> {
        self.usage
            .iter()
            .filter(|(name, _)| {
                name.as_str() != EXCLUDED_SENTINEL && !base_parameters.contains(name.as_str())
            })
            .map(|(name, users)| (name.clone(), users.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.usage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.usage.is_empty()
    }
}
