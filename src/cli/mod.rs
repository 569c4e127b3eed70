// src/cli/mod.rs
//
// Terminal rendering for analysis reports

mod output;

pub use output::{format_legend, format_report};
