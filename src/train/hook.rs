//! Constructed models and the training hook they are handed to.
//!
//! K_i: A `ModelInstance` holds exactly one value per declared parameter.
//! I^R: What "training" does is up to the `TrainingHook` implementation.

use crate::models::{Component, KgexError, ParamValue, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use tracing::info;

/// A model constructed from parsed flag values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelInstance {
    /// Registry key
    pub model: String,

    /// Declared type name
    pub reference: String,

    /// Constructor arguments by parameter name
    pub arguments: BTreeMap<String, ParamValue>,
}

impl ModelInstance {
    /// Construct `component` with `arguments`.
    ///
    /// # Errors
    ///
    /// Returns `KgexError::InvalidArgument` if an argument is missing or
    /// not part of the constructor.
    pub fn new(component: &Component, arguments: BTreeMap<String, ParamValue>) -> Result<Self> {
        for param in &component.parameters {
            if !arguments.contains_key(&param.name) {
                return Err(KgexError::InvalidArgument {
                    flag: param.flag_name(),
                    message: format!("required by {}", component.name),
                });
            }
        }

        if let Some(extra) = arguments
            .keys()
            .find(|name| !component.parameters.iter().any(|p| &p.name == *name))
        {
            return Err(KgexError::InvalidArgument {
                flag: extra.replace('_', "-"),
                message: format!("{} has no such parameter", component.name),
            });
        }

        Ok(Self {
            model: component.name.clone(),
            reference: component.reference.clone(),
            arguments,
        })
    }

    /// Value of one constructor argument.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.arguments.get(name)
    }
}

/// Receives a constructed model; training itself happens behind this seam.
pub trait TrainingHook {
    fn train(&self, model: &ModelInstance, out: &mut dyn Write) -> Result<()>;
}

/// Default hook: logs the model and optionally prints it as JSON.
#[derive(Debug, Clone, Copy)]
pub struct ReportingHook {
    emit_json: bool,
}

impl ReportingHook {
    pub fn new(emit_json: bool) -> Self {
        Self { emit_json }
    }
}

impl TrainingHook for ReportingHook {
    fn train(&self, model: &ModelInstance, out: &mut dyn Write) -> Result<()> {
        for (name, value) in &model.arguments {
            info!(model = %model.model, parameter = %name, %value, "Hyperparameter");
        }

        if self.emit_json {
            serde_json::to_writer_pretty(&mut *out, model)?;
            writeln!(out).map_err(|e| KgexError::io("writing model", e))?;
        }
        Ok(())
    }
}
