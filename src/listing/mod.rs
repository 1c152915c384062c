//! Listing module - registry tables and the composite report.

mod citation;
mod report;
mod rows;
mod table;

pub use citation::*;
pub use report::*;
pub use rows::*;
pub use table::*;
