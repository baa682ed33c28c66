//! Command implementations and argument parsing for the randgraph CLI.

use std::{
    collections::BTreeMap,
    io::{self, Write},
    num::NonZeroUsize,
};

use clap::{Args, Parser, Subcommand, ValueEnum};
use randgraph_core::{
    CountDistribution, DEFAULT_MAX_ATTEMPTS, DEFAULT_SEED, GeneratorBuilder, GraphError,
    GraphModel, WeightDistribution,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use crate::sweep::{SweepConfig, SweepReport, run_sweep};

const DEFAULT_NODES: usize = 1_000;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "randgraph",
    about = "Generate random graphs and summarise their degree and cluster-size distributions."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Generate one graph and print its distributions.
    Generate(GenerateCommand),
    /// Generate repeated graphs over several sizes and aggregate the results.
    Sweep(SweepCommand),
}

/// Options accepted by the `generate` command.
#[derive(Debug, Args, Clone)]
pub struct GenerateCommand {
    /// Number of nodes in the graph.
    #[arg(long, default_value_t = DEFAULT_NODES)]
    pub nodes: usize,

    /// Model and sampling options.
    #[command(flatten)]
    pub model: ModelArgs,
}

/// Options accepted by the `sweep` command.
#[derive(Debug, Args, Clone)]
pub struct SweepCommand {
    /// Comma-separated graph sizes.
    #[arg(long, value_delimiter = ',', required = true)]
    pub sizes: Vec<usize>,

    /// Graphs generated per size.
    #[arg(long, default_value = "5")]
    pub runs: NonZeroUsize,

    /// Model and sampling options.
    #[command(flatten)]
    pub model: ModelArgs,
}

/// Options shared by every command that builds a model.
#[derive(Debug, Args, Clone)]
pub struct ModelArgs {
    /// Random graph model to realise.
    #[arg(long, value_enum)]
    pub model: ModelChoice,

    /// Distribution family for stub counts, neighbour counts or weights.
    #[arg(long, value_enum, default_value_t = DistributionChoice::Poisson)]
    pub distribution: DistributionChoice,

    /// Parameter of the chosen distribution.
    #[arg(long, default_value_t = 2.0)]
    pub param: f64,

    /// Shape parameter of the generalized random graph.
    #[arg(long, default_value_t = 2.0)]
    pub gamma: f64,

    /// Seed for the random number generator.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Attempt cap for models that restart on failure.
    #[arg(long = "max-attempts", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,

    /// Output format written to stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Models selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModelChoice {
    /// Configuration model restarted until simple.
    Repeated,
    /// Configuration model with self-loops and multi-edges erased.
    Erased,
    /// Generalized random graph.
    General,
    /// Neighbour-drawing model.
    Dag,
}

/// Distribution families selectable from the command line.
///
/// `constant`, `poisson`, `geometric` and `power-law` drive the count-based
/// models; `constant`, `exponential` and `pareto` drive the weight-based one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DistributionChoice {
    /// Always yields `--param`.
    Constant,
    /// Poisson with mean `--param`.
    Poisson,
    /// Geometric with success probability `--param`.
    Geometric,
    /// Power law with exponent `--param`.
    PowerLaw,
    /// Exponential with rate `--param`.
    Exponential,
    /// Pareto with shape `--param`.
    Pareto,
}

impl DistributionChoice {
    const fn label(self) -> &'static str {
        match self {
            Self::Constant => "constant",
            Self::Poisson => "poisson",
            Self::Geometric => "geometric",
            Self::PowerLaw => "power-law",
            Self::Exponential => "exponential",
            Self::Pareto => "pareto",
        }
    }
}

/// Rendering formats for command output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Tab-separated, human-readable text.
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The distribution family cannot drive the chosen model.
    #[error("the {model:?} model cannot sample from a {distribution} distribution")]
    UnsupportedDistribution {
        /// Requested model.
        model: ModelChoice,
        /// Requested distribution family.
        distribution: &'static str,
    },
    /// A constant count must be a non-negative integer.
    #[error("constant counts must be non-negative integers (got {value})")]
    FractionalCount {
        /// Value passed through `--param`.
        value: f64,
    },
    /// Core generation failed.
    #[error(transparent)]
    Core(#[from] GraphError),
}

/// Summary of one generated graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphSummary {
    /// Model identifier.
    pub model: String,
    /// Number of nodes.
    pub nodes: usize,
    /// Number of edges.
    pub edges: usize,
    /// Stubs left without a partner.
    pub dangling_stubs: usize,
    /// Attempts used, including the successful one.
    pub attempts: usize,
    /// Fraction of nodes per degree.
    pub degree_distribution: BTreeMap<usize, f64>,
    /// Fraction of nodes per containing-component size.
    pub cluster_sizes: BTreeMap<usize, f64>,
}

/// Payload produced by a command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Report {
    /// Output of `generate`.
    Graph(GraphSummary),
    /// Output of `sweep`.
    Sweep(SweepReport),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionSummary {
    /// Requested output format.
    pub format: OutputFormat,
    /// Command payload.
    pub report: Report,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the model cannot be built or generation fails.
///
/// # Examples
/// ```
/// use clap::Parser;
/// use randgraph_cli::cli::{Cli, Report, run_cli};
///
/// let cli = Cli::try_parse_from([
///     "randgraph", "generate", "--nodes", "30", "--model", "erased",
///     "--distribution", "constant", "--param", "2",
/// ])?;
/// let summary = run_cli(cli)?;
/// let Report::Graph(graph) = summary.report else { unreachable!() };
/// assert_eq!(graph.nodes, 30);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Generate(command) => {
            Span::current().record("command", field::display("generate"));
            run_generate(command)
        }
        Command::Sweep(command) => {
            Span::current().record("command", field::display("sweep"));
            run_sweep_command(command)
        }
    }
}

#[instrument(
    name = "cli.generate",
    err,
    skip(command),
    fields(nodes = command.nodes, model = ?command.model.model, seed = command.model.seed),
)]
pub(super) fn run_generate(command: GenerateCommand) -> Result<ExecutionSummary, CliError> {
    let GenerateCommand { nodes, model: args } = command;
    let model = build_model(&args)?;
    let generator = GeneratorBuilder::new()
        .with_node_count(nodes)
        .with_max_attempts(args.max_attempts)
        .with_rng_seed(args.seed)
        .build()?;

    let mut generated = generator.generate(&model)?;
    let attempts = generated.attempts().get();
    let kind = generated.model();
    let graph = generated.graph_mut();
    let summary = GraphSummary {
        model: kind.to_string(),
        nodes: graph.node_count(),
        edges: graph.edge_count(),
        dangling_stubs: graph.dangling_stub_count(),
        attempts,
        degree_distribution: graph.degree_distribution().into_map(),
        cluster_sizes: graph.cluster_sizes().into_map(),
    };
    info!(edges = summary.edges, attempts, "command completed");
    Ok(ExecutionSummary {
        format: args.format,
        report: Report::Graph(summary),
    })
}

#[instrument(
    name = "cli.sweep",
    err,
    skip(command),
    fields(sizes = command.sizes.len(), runs = command.runs.get()),
)]
pub(super) fn run_sweep_command(command: SweepCommand) -> Result<ExecutionSummary, CliError> {
    let SweepCommand {
        sizes,
        runs,
        model: args,
    } = command;
    let model = build_model(&args)?;
    let config = SweepConfig {
        sizes,
        runs,
        seed: args.seed,
        max_attempts: args.max_attempts,
    };
    let report = run_sweep(&model, &config)?;
    info!(sizes = report.sizes.len(), "command completed");
    Ok(ExecutionSummary {
        format: args.format,
        report: Report::Sweep(report),
    })
}

/// Maps the model and distribution flags onto a core [`GraphModel`].
pub(super) fn build_model(args: &ModelArgs) -> Result<GraphModel, CliError> {
    let model = match args.model {
        ModelChoice::Repeated => GraphModel::RepeatedConfiguration {
            stubs: count_distribution(args)?,
        },
        ModelChoice::Erased => GraphModel::ErasedConfiguration {
            stubs: count_distribution(args)?,
        },
        ModelChoice::Dag => GraphModel::Dag {
            neighbours: count_distribution(args)?,
        },
        ModelChoice::General => GraphModel::GeneralizedRandomGraph {
            weights: weight_distribution(args)?,
            gamma: args.gamma,
        },
    };
    model.validate()?;
    Ok(model)
}

fn count_distribution(args: &ModelArgs) -> Result<CountDistribution, CliError> {
    let param = args.param;
    let distribution = match args.distribution {
        DistributionChoice::Constant => CountDistribution::constant(constant_count(param)?),
        DistributionChoice::Poisson => CountDistribution::poisson(param)?,
        DistributionChoice::Geometric => CountDistribution::geometric(param)?,
        DistributionChoice::PowerLaw => CountDistribution::power_law(param)?,
        other @ (DistributionChoice::Exponential | DistributionChoice::Pareto) => {
            return Err(unsupported(args.model, other));
        }
    };
    Ok(distribution)
}

fn weight_distribution(args: &ModelArgs) -> Result<WeightDistribution, CliError> {
    let param = args.param;
    let distribution = match args.distribution {
        DistributionChoice::Constant => WeightDistribution::constant(param)?,
        DistributionChoice::Exponential => WeightDistribution::exponential(param)?,
        DistributionChoice::Pareto => WeightDistribution::pareto(param)?,
        other @ (DistributionChoice::Poisson
        | DistributionChoice::Geometric
        | DistributionChoice::PowerLaw) => return Err(unsupported(args.model, other)),
    };
    Ok(distribution)
}

fn constant_count(value: f64) -> Result<usize, CliError> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= usize::MAX as f64 {
        Ok(value as usize)
    } else {
        Err(CliError::FractionalCount { value })
    }
}

fn unsupported(model: ModelChoice, distribution: DistributionChoice) -> CliError {
    CliError::UnsupportedDistribution {
        model,
        distribution: distribution.label(),
    }
}

/// Renders `summary` to `writer` in the format it requests.
///
/// Text output lists one `key<TAB>fraction` row per distribution entry.
///
/// # Errors
/// Returns [`io::Error`] if writing or JSON encoding fails.
///
/// # Examples
/// ```
/// # use std::collections::BTreeMap;
/// # use randgraph_cli::cli::{ExecutionSummary, GraphSummary, OutputFormat, Report, render_summary};
/// let summary = ExecutionSummary {
///     format: OutputFormat::Text,
///     report: Report::Graph(GraphSummary {
///         model: "dag".into(),
///         nodes: 2,
///         edges: 0,
///         dangling_stubs: 0,
///         attempts: 1,
///         degree_distribution: BTreeMap::from([(0, 1.0)]),
///         cluster_sizes: BTreeMap::from([(1, 1.0)]),
///     }),
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// let text = String::from_utf8(buffer)?;
/// assert!(text.contains("degree\tfraction\n0\t1\n"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, &summary.report)?;
            writeln!(writer)
        }
        OutputFormat::Text => match &summary.report {
            Report::Graph(graph) => render_graph(graph, writer),
            Report::Sweep(report) => report.render_text(writer),
        },
    }
}

fn render_graph(graph: &GraphSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "model: {}", graph.model)?;
    writeln!(writer, "nodes: {}", graph.nodes)?;
    writeln!(writer, "edges: {}", graph.edges)?;
    writeln!(writer, "dangling stubs: {}", graph.dangling_stubs)?;
    writeln!(writer, "attempts: {}", graph.attempts)?;
    writeln!(writer, "degree\tfraction")?;
    for (degree, fraction) in &graph.degree_distribution {
        writeln!(writer, "{degree}\t{fraction}")?;
    }
    writeln!(writer, "cluster size\tfraction")?;
    for (size, fraction) in &graph.cluster_sizes {
        writeln!(writer, "{size}\t{fraction}")?;
    }
    Ok(())
}
