//! Plan output.
//!
//! - [`json`] - JSON for the provisioning engine
//! - [`terminal`] - Human readable summary

mod json;
mod terminal;

pub use json::{plan_json, write_plan};
pub use terminal::{format_field, print_summary, summary_lines};
