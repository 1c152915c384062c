//! Schema-driven `train <model>` subcommands.
//!
//! Epistemic foundation:
//! - K_i: One flag per declared constructor parameter, in declaration order
//! - K_i: Parameters without defaults are required flags
//! - B_i: A declared annotation may not map to a flag type → startup failure

use super::hook::{ModelInstance, TrainingHook};
use crate::models::{Component, KgexError, ParamSpec, ParamType, ParamValue, Result};
use crate::registry::Registry;
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use std::collections::{BTreeMap, HashSet};
use std::io::Write;
use tracing::{debug, info};

/// Name of the parent command the model subcommands are mounted under.
pub const TRAIN_COMMAND: &str = "train";

/// Flag names clap generates for every subcommand.
const RESERVED_FLAGS: [&str; 2] = ["help", "version"];

fn check_flag_name(component: &Component, param: &ParamSpec) -> Result<()> {
    let flag = param.flag_name();
    let reserved = [flag.as_str(), param.name.as_str()]
        .iter()
        .any(|name| RESERVED_FLAGS.contains(name));
    if flag.is_empty() || reserved {
        return Err(KgexError::ReservedParameter {
            model: component.name.clone(),
            parameter: param.name.clone(),
            flag,
        });
    }
    Ok(())
}

/// Flag type and nullability of one parameter, validated against its default.
fn resolve(component: &Component, param: &ParamSpec) -> Result<(ParamType, bool)> {
    let (ty, nullable) = ParamType::from_annotation(param.annotation.as_deref()).ok_or_else(|| {
        KgexError::UnsupportedParameterType {
            model: component.name.clone(),
            parameter: param.name.clone(),
            annotation: param.annotation.clone().unwrap_or_default(),
        }
    })?;

    if let Some(default) = &param.default {
        if !default.fits(ty, nullable) {
            return Err(KgexError::DefaultTypeMismatch {
                model: component.name.clone(),
                parameter: param.name.clone(),
                annotation: param.annotation.clone().unwrap_or_default(),
                default: default.to_string(),
            });
        }
    }

    Ok((ty, nullable))
}

fn flag(param: &ParamSpec, ty: ParamType) -> Arg {
    let help = match &param.annotation {
        Some(annotation) => format!("{} ({annotation})", param.name),
        None => param.name.clone(),
    };

    let arg = Arg::new(param.name.clone())
        .long(param.flag_name())
        .value_name(ty.as_str().to_uppercase())
        .action(ArgAction::Set)
        .help(help);

    let arg = match ty {
        ParamType::Int => arg.value_parser(value_parser!(i64)).allow_negative_numbers(true),
        ParamType::Float => arg.value_parser(value_parser!(f64)).allow_negative_numbers(true),
        ParamType::Bool => arg.value_parser(value_parser!(bool)),
        ParamType::Str => arg.value_parser(value_parser!(String)),
    };

    match &param.default {
        None => arg.required(true),
        Some(ParamValue::Null) => arg,
        Some(default) => arg.default_value(default.clone().coerce(ty).to_string()),
    }
}

/// Build the subcommand for one model from its constructor schema.
///
/// # Errors
///
/// Fails on any parameter whose annotation has no flag type or whose
/// default does not match its type. Names declared twice, names that
/// collide with `--help`/`--version` and names with no flag form
/// (`_`) fail as well.
pub fn build_subcommand(component: &Component) -> Result<Command> {
    let mut seen = HashSet::new();
    let mut command = Command::new(component.name.clone()).about(component.summary().to_string());

    for param in &component.parameters {
        check_flag_name(component, param)?;
        if !seen.insert(param.flag_name()) {
            return Err(KgexError::DuplicateParameter {
                model: component.name.clone(),
                parameter: param.name.clone(),
            });
        }
        let (ty, _) = resolve(component, param)?;
        command = command.arg(flag(param, ty));
    }

    debug!(model = %component.name, flags = component.parameters.len(), "Built subcommand");
    Ok(command)
}

/// Build the `train` parent command with one subcommand per model.
///
/// Any misconfigured model aborts the whole command surface.
pub fn build_train_command(models: &Registry) -> Result<Command> {
    let subcommands = models
        .iter()
        .map(build_subcommand)
        .collect::<Result<Vec<_>>>()?;

    Ok(Command::new(TRAIN_COMMAND)
        .about("Train a KGE model.")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommands(subcommands))
}

/// Read constructor arguments for `component` out of parsed flags.
pub fn parse_arguments(
    component: &Component,
    matches: &ArgMatches,
) -> Result<BTreeMap<String, ParamValue>> {
    let mut arguments = BTreeMap::new();

    for param in &component.parameters {
        let (ty, _) = resolve(component, param)?;
        let id = param.name.as_str();
        let value = match ty {
            ParamType::Int => matches.get_one::<i64>(id).map(|v| ParamValue::Int(*v)),
            ParamType::Float => matches.get_one::<f64>(id).map(|v| ParamValue::Float(*v)),
            ParamType::Bool => matches.get_one::<bool>(id).map(|v| ParamValue::Bool(*v)),
            ParamType::Str => matches.get_one::<String>(id).map(|v| ParamValue::Str(v.clone())),
        };

        let value = match (value, &param.default) {
            (Some(value), _) => value,
            (None, Some(ParamValue::Null)) => ParamValue::Null,
            (None, _) => {
                return Err(KgexError::InvalidArgument {
                    flag: param.flag_name(),
                    message: "missing value".to_string(),
                });
            }
        };
        arguments.insert(param.name.clone(), value);
    }

    Ok(arguments)
}

/// Run `train <model>`: construct the model and hand it to the hook.
pub fn dispatch(
    models: &Registry,
    matches: &ArgMatches,
    hook: &dyn TrainingHook,
    out: &mut dyn Write,
) -> Result<ModelInstance> {
    let (name, sub_matches) = matches
        .subcommand()
        .ok_or_else(|| KgexError::UnknownModel(String::new()))?;
    let component = models
        .get(name)
        .ok_or_else(|| KgexError::UnknownModel(name.to_string()))?;

    let arguments = parse_arguments(component, sub_matches)?;
    let instance = ModelInstance::new(component, arguments)?;
    info!(model = %instance.model, "Constructed model");

    hook.train(&instance, out)?;
    Ok(instance)
}
