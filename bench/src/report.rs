//! Human-readable and JSON rendering of workload results.

use std::io::{self, Write};

use serde::Serialize;

use crate::workload::WorkloadOutcome;

#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub strategies: Vec<String>,
    #[serde(flatten)]
    pub outcome: &'a WorkloadOutcome,
    pub agreed: bool,
}

impl<'a> Report<'a> {
    pub fn new(strategies: Vec<String>, outcome: &'a WorkloadOutcome) -> Self {
        Self {
            strategies,
            outcome,
            agreed: outcome.inconsistencies.is_empty(),
        }
    }
}

pub fn write_json<W: Write>(out: W, report: &Report<'_>) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(out, report)
}

pub fn write_table<W: Write>(mut out: W, report: &Report<'_>) -> io::Result<()> {
    writeln!(out, "pathmeet-bench")?;
    writeln!(out, "==============")?;
    writeln!(out, "strategies: {}", report.strategies.join(", "))?;

    for graph in &report.outcome.graphs {
        writeln!(out)?;
        writeln!(out, "--- {} ---", graph.workload)?;
        writeln!(
            out,
            "Built in {:.1}ms: {} nodes, {} edges, ~{:.1}MB",
            graph.build_ms, graph.nodes, graph.edges, graph.memory_mb
        )?;
        writeln!(out)?;
        writeln!(
            out,
            "{:<32} {:>8} {:>12} {:>10} {:>10} {:>10}",
            "solver", "queries", "total", "mean", "hops", "no path"
        )?;
        writeln!(
            out,
            "{:-<32} {:->8} {:->12} {:->10} {:->10} {:->10}",
            "", "", "", "", "", ""
        )?;

        let rows = report
            .outcome
            .timings
            .iter()
            .filter(|row| row.workload == graph.workload);
        for row in rows {
            let hops = row
                .mean_hops
                .map(|h| format!("{:.2}", h))
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                out,
                "{:<32} {:>8} {:>10.1}ms {:>8.1}us {:>10} {:>10}",
                row.solver, row.queries, row.total_ms, row.mean_us, hops, row.not_found
            )?;
        }
    }

    writeln!(out)?;
    if report.agreed {
        writeln!(out, "All solvers agree with the unidirectional oracle.")?;
    } else {
        writeln!(
            out,
            "{} disagreement(s) with the unidirectional oracle:",
            report.outcome.inconsistencies.len()
        )?;
        for bad in &report.outcome.inconsistencies {
            writeln!(
                out,
                "  [{}] {} {} -> {}: expected {}, got {}",
                bad.workload, bad.solver, bad.root, bad.target, bad.expected, bad.actual
            )?;
        }
    }
    Ok(())
}
