//! Unit tests for argument parsing, model mapping and rendering.

use super::commands::{build_model, run_generate};
use super::{
    Cli, CliError, Command, DistributionChoice, ExecutionSummary, GenerateCommand, GraphSummary,
    ModelArgs, ModelChoice, OutputFormat, Report, render_summary, run_cli,
};

use std::collections::BTreeMap;

use clap::Parser;
use randgraph_core::{GraphError, ModelKind};
use randgraph_test_support::tracing::with_recording;
use rstest::{fixture, rstest};

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[fixture]
fn erased_args() -> ModelArgs {
    ModelArgs {
        model: ModelChoice::Erased,
        distribution: DistributionChoice::Poisson,
        param: 2.0,
        gamma: 2.0,
        seed: 3,
        max_attempts: 100,
        format: OutputFormat::Text,
    }
}

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("randgraph").chain(args.iter().copied()))
}

fn graph_report(summary: ExecutionSummary) -> GraphSummary {
    match summary.report {
        Report::Graph(graph) => graph,
        Report::Sweep(other) => panic!("expected a graph report, got {other:?}"),
    }
}

#[test]
fn generate_defaults_apply() -> TestResult {
    let cli = parse(&["generate", "--model", "dag"])?;
    let Command::Generate(command) = cli.command else {
        panic!("expected the generate command");
    };
    assert_eq!(command.nodes, 1_000);
    assert_eq!(command.model.distribution, DistributionChoice::Poisson);
    assert_eq!(command.model.seed, randgraph_core::DEFAULT_SEED);
    assert_eq!(command.model.format, OutputFormat::Text);
    Ok(())
}

#[test]
fn sweep_sizes_are_comma_separated() -> TestResult {
    let cli = parse(&[
        "sweep", "--model", "erased", "--sizes", "10,20,40", "--runs", "2",
    ])?;
    let Command::Sweep(command) = cli.command else {
        panic!("expected the sweep command");
    };
    assert_eq!(command.sizes, vec![10, 20, 40]);
    assert_eq!(command.runs.get(), 2);
    Ok(())
}

#[rstest]
#[case::missing_model(&["generate"])]
#[case::unknown_model(&["generate", "--model", "lattice"])]
#[case::zero_runs(&["sweep", "--model", "dag", "--sizes", "5", "--runs", "0"])]
#[case::missing_sizes(&["sweep", "--model", "dag"])]
fn clap_rejects_bad_arguments(#[case] args: &[&str]) {
    assert!(parse(args).is_err());
}

#[rstest]
#[case(ModelChoice::Repeated, ModelKind::RepeatedConfiguration)]
#[case(ModelChoice::Erased, ModelKind::ErasedConfiguration)]
#[case(ModelChoice::Dag, ModelKind::Dag)]
fn count_models_map_to_core_variants(
    mut erased_args: ModelArgs,
    #[case] choice: ModelChoice,
    #[case] expected: ModelKind,
) -> TestResult {
    erased_args.model = choice;
    assert_eq!(build_model(&erased_args)?.kind(), expected);
    Ok(())
}

#[rstest]
#[case(ModelChoice::Erased, DistributionChoice::Pareto)]
#[case(ModelChoice::Dag, DistributionChoice::Exponential)]
#[case(ModelChoice::General, DistributionChoice::Poisson)]
#[case(ModelChoice::General, DistributionChoice::PowerLaw)]
fn mismatched_distributions_are_rejected(
    mut erased_args: ModelArgs,
    #[case] model: ModelChoice,
    #[case] distribution: DistributionChoice,
) {
    erased_args.model = model;
    erased_args.distribution = distribution;
    let err = build_model(&erased_args).expect_err("combination is unsupported");
    assert!(matches!(err, CliError::UnsupportedDistribution { .. }));
}

#[rstest]
#[case(2.5)]
#[case(-1.0)]
#[case(f64::NAN)]
fn constant_counts_must_be_whole(mut erased_args: ModelArgs, #[case] param: f64) {
    erased_args.distribution = DistributionChoice::Constant;
    erased_args.param = param;
    let err = build_model(&erased_args).expect_err("count must be a whole number");
    assert!(matches!(err, CliError::FractionalCount { .. }));
}

#[rstest]
fn invalid_gamma_surfaces_core_error(mut erased_args: ModelArgs) {
    erased_args.model = ModelChoice::General;
    erased_args.distribution = DistributionChoice::Exponential;
    erased_args.gamma = -1.0;
    let err = build_model(&erased_args).expect_err("gamma must be positive");
    assert!(matches!(
        err,
        CliError::Core(GraphError::InvalidParameters { .. })
    ));
}

#[rstest]
fn generate_reports_distributions(erased_args: ModelArgs) -> TestResult {
    let summary = run_generate(GenerateCommand {
        nodes: 40,
        model: erased_args,
    })?;
    let graph = graph_report(summary);
    assert_eq!(graph.model, "erased");
    assert_eq!(graph.nodes, 40);
    assert_eq!(graph.attempts, 1);
    let degree_total: f64 = graph.degree_distribution.values().sum();
    let cluster_total: f64 = graph.cluster_sizes.values().sum();
    assert!((degree_total - 1.0).abs() < 1e-9);
    assert!((cluster_total - 1.0).abs() < 1e-9);
    Ok(())
}

#[test]
fn zero_nodes_are_rejected() -> TestResult {
    let cli = parse(&["generate", "--model", "dag", "--nodes", "0"])?;
    let err = run_cli(cli).expect_err("empty graphs are rejected");
    assert!(matches!(err, CliError::Core(GraphError::EmptyGraph)));
    Ok(())
}

#[test]
fn impossible_repeated_graph_reports_exhaustion() -> TestResult {
    let cli = parse(&[
        "generate",
        "--model",
        "repeated",
        "--nodes",
        "2",
        "--distribution",
        "constant",
        "--param",
        "3",
        "--max-attempts",
        "4",
    ])?;
    let err = run_cli(cli).expect_err("two nodes cannot carry degree three");
    match err {
        CliError::Core(GraphError::AttemptsExhausted { attempts, .. }) => {
            assert_eq!(attempts.get(), 4);
        }
        other => panic!("expected exhausted attempts, got {other:?}"),
    }
    Ok(())
}

#[test]
fn render_text_lists_both_distributions() -> TestResult {
    let summary = ExecutionSummary {
        format: OutputFormat::Text,
        report: Report::Graph(GraphSummary {
            model: "general".into(),
            nodes: 4,
            edges: 2,
            dangling_stubs: 0,
            attempts: 1,
            degree_distribution: BTreeMap::from([(1, 1.0)]),
            cluster_sizes: BTreeMap::from([(2, 1.0)]),
        }),
    };
    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    let text = String::from_utf8(buffer)?;
    assert_eq!(
        text,
        "model: general\nnodes: 4\nedges: 2\ndangling stubs: 0\nattempts: 1\n\
         degree\tfraction\n1\t1\ncluster size\tfraction\n2\t1\n"
    );
    Ok(())
}

#[rstest]
fn render_json_is_parseable(mut erased_args: ModelArgs) -> TestResult {
    erased_args.format = OutputFormat::Json;
    let summary = run_generate(GenerateCommand {
        nodes: 25,
        model: erased_args,
    })?;
    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    let value: serde_json::Value = serde_json::from_slice(&buffer)?;
    assert_eq!(value["model"], "erased");
    assert_eq!(value["nodes"], 25);
    assert!(value["degree_distribution"].is_object());
    assert!(value["cluster_sizes"].is_object());
    Ok(())
}

#[test]
fn sweep_renders_per_size_sections() -> TestResult {
    let cli = parse(&[
        "sweep",
        "--model",
        "dag",
        "--distribution",
        "constant",
        "--param",
        "0",
        "--sizes",
        "3,6",
        "--runs",
        "2",
    ])?;
    let summary = run_cli(cli)?;
    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    let text = String::from_utf8(buffer)?;
    assert!(text.starts_with("model: dag\n"));
    assert!(text.contains("nodes: 3 (2 runs)\n"));
    assert!(text.contains("nodes: 6 (2 runs)\n"));
    assert!(text.contains("0\t1\t0\n"));
    Ok(())
}

#[test]
fn run_cli_records_command_field() -> TestResult {
    let cli = parse(&["generate", "--model", "dag", "--nodes", "12"])?;
    let (result, layer) = with_recording(|| run_cli(cli));
    result?;

    let run = layer.span_named("cli.run").expect("cli.run span");
    assert_eq!(run.fields.get("command").map(String::as_str), Some("generate"));
    let generate = layer.span_named("cli.generate").expect("cli.generate span");
    assert_eq!(generate.fields.get("nodes").map(String::as_str), Some("12"));
    assert!(layer.span_named("core.generate").is_some());
    assert_eq!(layer.events_with_message("command completed").len(), 1);
    Ok(())
}
