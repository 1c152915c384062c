//! The full set of registries, built once at process start.
//!
//! Epistemic foundation:
//! - K_i: Registration happens in one explicit pass, then the catalog is frozen
//! - K_i: Model parameters feed the usage aggregator as they are registered
//! - I^R: The shared base-constructor parameters are declared by the caller

use super::snapshot::{Registry, RegistryBuilder};
use super::usage::HyperparameterUsage;
use crate::models::{ComponentKind, ComponentSpec, Result};
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

/// Immutable snapshot of every registry.
#[derive(Debug, Clone)]
pub struct Catalog {
    registries: BTreeMap<ComponentKind, Registry>,
    usage: HyperparameterUsage,
    base_parameters: BTreeSet<String>,
}

impl Catalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Registry for one kind of component (empty if nothing was registered).
    pub fn registry(&self, kind: ComponentKind) -> &Registry {
        &self.registries[&kind]
    }

    pub fn models(&self) -> &Registry {
        self.registry(ComponentKind::Model)
    }

    /// Hyperparameter usage outside the base constructor, sorted by name.
    pub fn hyperparameter_usage(&self) -> Vec<(String, BTreeSet<String>)> {
        self.usage.aggregate(&self.base_parameters)
    }
}

/// Explicit registration pass for a [`Catalog`].
#[derive(Debug)]
pub struct CatalogBuilder {
    builders: BTreeMap<ComponentKind, RegistryBuilder>,
    usage: HyperparameterUsage,
    base_parameters: BTreeSet<String>,
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self {
            builders: ComponentKind::ALL
                .into_iter()
                .map(|kind| (kind, RegistryBuilder::new(kind)))
                .collect(),
            usage: HyperparameterUsage::new(),
            base_parameters: BTreeSet::new(),
        }
    }
}

impl CatalogBuilder {
    /// Declare the parameter names of the shared base constructor.
    pub fn base_parameters<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base_parameters
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Register one component of `kind`.
    ///
    /// Model parameters and declared usages are recorded against the
    /// model's reference name.
    pub fn register(&mut self, kind: ComponentKind, spec: ComponentSpec) -> Result<&mut Self> {
        let builder = self
            .builders
            .entry(kind)
            .or_insert_with(|| RegistryBuilder::new(kind));
        let component = builder.register(spec)?;

        if kind == ComponentKind::Model {
            let names = component
                .parameters
                .iter()
                .map(|p| p.name.as_str())
                .chain(component.uses.iter().map(String::as_str));
            self.usage.record_all(&component.reference, names);
        }

        Ok(self)
    }

    /// Register several components of the same kind.
    pub fn register_all<I>(&mut self, kind: ComponentKind, specs: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = ComponentSpec>,
    {
        for spec in specs {
            self.register(kind, spec)?;
        }
        Ok(self)
    }

    /// Freeze every registry.
    pub fn build(self) -> Catalog {
        let registries: BTreeMap<_, _> = self
            .builders
            .into_iter()
            .map(|(kind, builder)| (kind, builder.build()))
            .collect();

        info!(
            models = registries[&ComponentKind::Model].len(),
            datasets = registries[&ComponentKind::Dataset].len(),
            hyperparameters = self.usage.len(),
            "Catalog built"
        );

        Catalog {
            registries,
            usage: self.usage,
            base_parameters: self.base_parameters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ParamSpec;

    #[test]
    fn test_usage_excludes_base_parameters() {
        let mut builder = Catalog::builder().base_parameters(["a", "b"]);
        builder
            .register(
                ComponentKind::Model,
                ComponentSpec::class("X", "X [doe2001]_.")
                    .with_parameters(vec![ParamSpec::new("a", "int").default(1)]),
            )
            .unwrap()
            .register(
                ComponentKind::Model,
                ComponentSpec::class("Y", "Y [doe2002]_.")
                    .with_parameters(vec![ParamSpec::new("c", "float")]),
            )
            .unwrap()
            .register(
                ComponentKind::Model,
                ComponentSpec::class("Z", "Z [doe2003]_.").with_uses(["c"]),
            )
            .unwrap();
        let catalog = builder.build();

        let usage = catalog.hyperparameter_usage();
        assert_eq!(usage.len(), 1);
        assert_eq!(usage[0].0, "c");
        assert_eq!(
            usage[0].1.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["Y", "Z"]
        );
    }

    #[test]
    fn test_unregistered_kinds_are_empty() {
        let catalog = Catalog::builder().build();
        for kind in ComponentKind::ALL {
            assert!(catalog.registry(kind).is_empty());
            assert_eq!(catalog.registry(kind).kind(), kind);
        }
    }

    #[test]
    fn test_non_model_parameters_not_recorded() {
        let mut builder = Catalog::builder();
        builder
            .register(
                ComponentKind::TrainingLoop,
                ComponentSpec::class("OWATrainingLoop", "Open world.")
                    .with_parameters(vec![ParamSpec::new("num_epochs", "int")]),
            )
            .unwrap();
        assert!(builder.build().hyperparameter_usage().is_empty());
    }
}
