//! Timing and agreement harness for the pathmeet search engines.
//!
//! Runs every solver over an edge-list graph (all pairs), a generated tree
//! (one far-apart pair), optional random graphs and optional extra
//! topologies, then prints a timing table or JSON. Any disagreement with the
//! unidirectional oracle makes the process exit non-zero.

mod check;
mod edgelist;
mod generators;
mod report;
mod workload;

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context};
use clap::Parser;
use pathmeet_core::{Graph, MatchStrategy, NodeId};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::generators::FastRng;
use crate::report::Report;
use crate::workload::{Solver, WorkloadOutcome};

#[derive(Parser, Debug)]
#[command(name = "pathmeet-bench")]
#[command(about = "Compare bidirectional BFS frontier matchers against a unidirectional oracle")]
struct Cli {
    /// Degree of every inner node of the generated tree
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(2..))]
    degree: u32,

    /// Depth of the generated tree
    #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(u32).range(2..))]
    max_depth: u32,

    /// Number of random graphs to generate and query
    #[arg(long, default_value_t = 0)]
    random_reps: u32,

    /// Node count of each random graph
    #[arg(long, default_value_t = 10_000, value_parser = clap::value_parser!(u64).range(2..))]
    random_nodes: u64,

    /// Fraction of all ordered node pairs that become edges, in (0, 1)
    #[arg(long, default_value_t = 0.005, value_parser = parse_fraction)]
    fraction_edges: f64,

    /// Random node pairs queried per random graph
    #[arg(long, default_value_t = 100)]
    queries: usize,

    /// Edge list to check all pairs on (defaults to the bundled sample)
    #[arg(long, value_name = "FILE")]
    edge_list: Option<PathBuf>,

    /// Node count for the small-world and barbell topologies (0 skips them)
    #[arg(long, default_value_t = 0)]
    extra: u64,

    /// Frontier matcher to run; repeat for several (default: all)
    #[arg(long = "strategy", value_name = "NAME")]
    strategies: Vec<MatchStrategy>,

    /// Seed for every generator
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Emit JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Log per-query search details
    #[arg(short, long)]
    verbose: bool,
}

fn parse_fraction(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("`{}` is not a number", s))?;
    if value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(format!("{} is not strictly between 0 and 1", value))
    }
}

fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if verbose {
        filter = filter.add_directive("pathmeet_core=debug".parse()?);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

/// `count` random pairs of distinct nodes, drawn from the graph's sorted ids.
fn random_pairs(graph: &Graph, count: usize, rng: &mut FastRng) -> Vec<(NodeId, NodeId)> {
    let mut ids: Vec<NodeId> = graph.nodes().collect();
    ids.sort_unstable();
    if ids.len() < 2 {
        return Vec::new();
    }

    let len = ids.len() as u64;
    let mut pairs = Vec::with_capacity(count);
    while pairs.len() < count {
        let a = ids[rng.next(len) as usize];
        let b = ids[rng.next(len) as usize];
        if a != b {
            pairs.push((a, b));
        }
    }
    pairs
}

fn timed<T>(build: impl FnOnce() -> T) -> (T, f64) {
    let t = Instant::now();
    let value = build();
    (value, t.elapsed().as_secs_f64() * 1000.0)
}

fn run(cli: &Cli, solvers: &[Solver]) -> anyhow::Result<WorkloadOutcome> {
    let mut outcome = WorkloadOutcome::default();

    // Edge list: every unordered pair.
    let (graph, build_ms) = match &cli.edge_list {
        Some(path) => {
            let (graph, ms) = timed(|| edgelist::read_edge_list(path));
            let graph = graph.with_context(|| format!("loading {}", path.display()))?;
            (graph, ms)
        }
        None => {
            let (graph, ms) = timed(|| edgelist::parse_edge_list(edgelist::SAMPLE.as_bytes()));
            (graph.context("parsing bundled sample")?, ms)
        }
    };
    let name = match &cli.edge_list {
        Some(path) => format!("edge list {}", path.display()),
        None => "edge list (sample)".to_string(),
    };
    let pairs = check::all_pairs(&graph);
    outcome.merge(workload::run(&name, &graph, build_ms, &pairs, solvers)?);

    // Tree: the two leaves farthest apart.
    let (tree, build_ms) = timed(|| generators::tree(cli.degree, cli.max_depth));
    let tree = tree?;
    match generators::tree_far_pair(cli.degree, cli.max_depth) {
        Some(pair) => {
            let name = format!("tree degree={} depth={}", cli.degree, cli.max_depth);
            outcome.merge(workload::run(&name, &tree, build_ms, &[pair], solvers)?);
        }
        None => warn!(degree = cli.degree, depth = cli.max_depth, "no far pair for tree"),
    }

    // Random graphs.
    let mut rng = FastRng::new(cli.seed);
    for rep in 0..cli.random_reps {
        let seed = cli.seed.wrapping_add(rep as u64 + 1);
        let (graph, build_ms) =
            timed(|| generators::random(cli.random_nodes, cli.fraction_edges, seed));
        let pairs = random_pairs(&graph, cli.queries, &mut rng);
        let name = format!(
            "random #{} n={} f={}",
            rep + 1,
            cli.random_nodes,
            cli.fraction_edges
        );
        outcome.merge(workload::run(&name, &graph, build_ms, &pairs, solvers)?);
    }

    // Extra topologies.
    if cli.extra > 0 {
        let (graph, build_ms) = timed(|| generators::small_world(cli.extra, cli.seed));
        let pairs = random_pairs(&graph, cli.queries, &mut rng);
        let name = format!("small-world n={}", cli.extra);
        outcome.merge(workload::run(&name, &graph, build_ms, &pairs, solvers)?);

        let ((graph, a, b), build_ms) = timed(|| generators::barbell(cli.extra, cli.seed));
        let mut pairs = vec![(a, b)];
        pairs.extend(random_pairs(&graph, cli.queries, &mut rng));
        let name = format!("barbell n={}", cli.extra);
        outcome.merge(workload::run(&name, &graph, build_ms, &pairs, solvers)?);
    }

    Ok(outcome)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let strategies = if cli.strategies.is_empty() {
        MatchStrategy::ALL.to_vec()
    } else {
        let mut chosen = Vec::new();
        for &s in &cli.strategies {
            if !chosen.contains(&s) {
                chosen.push(s);
            }
        }
        chosen
    };
    let solvers = Solver::lineup(&strategies);
    info!(?strategies, solvers = solvers.len(), "starting");

    let outcome = run(&cli, &solvers)?;
    let report = Report::new(strategies.iter().map(|s| s.to_string()).collect(), &outcome);

    let mut stdout = io::stdout().lock();
    if cli.json {
        report::write_json(&mut stdout, &report)?;
        writeln!(stdout)?;
    } else {
        report::write_table(&mut stdout, &report)?;
    }
    drop(stdout);

    if !report.agreed {
        bail!(
            "{} result(s) disagree with the unidirectional oracle",
            outcome.inconsistencies.len()
        );
    }
    Ok(())
}
