//! Registry module - immutable component registries.
//!
//! Provides:
//! - `Registry` / `RegistryBuilder`: One kind of component, name-ordered
//! - `Catalog`: Every registry plus hyperparameter usage
//! - `HyperparameterUsage`: Flat parameter → component aggregation
//! - `builtin_catalog`: The components shipped with kgex
//! - `load_model_schemas`: Extra model schemas from a JSON file

mod builtin;
mod catalog;
mod snapshot;
mod usage;

pub use builtin::*;
pub use catalog::*;
pub use snapshot::*;
pub use usage::*;
