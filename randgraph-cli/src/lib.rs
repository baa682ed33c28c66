//! Support library for the randgraph CLI binary.
//!
//! Exposes the command pipeline, the sweep aggregation and logging setup so
//! doctests and tests can exercise them without spawning a subprocess.

pub mod cli;
pub mod logging;
pub mod sweep;
