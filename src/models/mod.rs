//! Core data models for kgex.
//!
//! Epistemic mapping:
//! - K_i (Knowledge): Concrete types with compile-time guarantees
//! - B_i (Beliefs): Wrapped in Result/Option
//! - I^R (Resolvable): Config parameters and declarative schemas

mod component;
mod config;
mod error;
mod schema;

pub use component::*;
pub use config::*;
pub use error::*;
pub use schema::*;
