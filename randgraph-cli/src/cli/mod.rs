//! Command-line interface orchestration for random graph generation.
//!
//! `generate` realises one graph and prints its degree and cluster-size
//! distributions; `sweep` aggregates repeated runs over several sizes.

mod commands;

pub use commands::{
    Cli, CliError, Command, DistributionChoice, ExecutionSummary, GenerateCommand, GraphSummary,
    ModelArgs, ModelChoice, OutputFormat, Report, SweepCommand, render_summary, run_cli,
};

#[cfg(test)]
mod tests;
