//! kgex - Registry listings and schema-driven training commands for
//! knowledge graph embedding components.
//!
//! ## Architecture
//!
//! kgex keeps one immutable `Catalog` built at process start:
//! - **Registries**: Models, datasets, samplers, training loops, evaluators, metrics
//! - **Usage**: Which models declare or consume each hyperparameter
//!
//! ## Surfaces
//!
//! - **Listings**: Plain/rst/github tables with citations parsed from documentation
//! - **Report**: All listings as github tables under `###` section headers
//! - **Training**: One `train <model>` subcommand per model, flags from its schema
//!
//! ## Epistemic Design
//!
//! - K_i (Knowledge): Registration is a single explicit pass; registries are frozen after
//! - B_i (Beliefs): Documentation may not follow the citation layout → degrade, never fail
//! - I^R (Resolvable): Namespace, rst role and default format come from config

pub mod listing;
pub mod models;
pub mod registry;
pub mod train;

// Re-exports for convenience
pub use listing::{DisplayRow, TableFormat, emit, parse_citation, project};
pub use models::{Component, ComponentKind, ComponentSpec, Config, KgexError, ParamSpec, ParamValue, Result};
pub use registry::{Catalog, HyperparameterUsage, Registry, builtin_catalog};
pub use train::{ModelInstance, ReportingHook, TrainingHook, build_subcommand, build_train_command};
