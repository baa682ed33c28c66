//! Benchmark support crate for randgraph.
//!
//! Provides the models, generators and parameter labels shared by the
//! Criterion benchmarks of graph generation and cluster discovery.

pub mod error;
pub mod models;
pub mod params;
