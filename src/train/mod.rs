//! Train module - generated model subcommands and the training hook.

mod command;
mod hook;

pub use command::*;
pub use hook::*;
