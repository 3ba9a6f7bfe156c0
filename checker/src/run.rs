use std::io::{self, Write};

use rayon::prelude::*;

use common::{log_debug, log_warn, KindId, KindRegistry};
use symval::{Oracle, OracleConfig, OracleReport};

use crate::args::{Args, OpSelector, OutputFormat};

/// Command line options take precedence over the loaded configuration.
pub fn apply_overrides(config: &mut OracleConfig, args: &Args) {
    if let Some(timeout) = args.timeout_ms {
        config.solver.timeout_ms = Some(timeout);
    }
    if args.no_uniqueness {
        config.check_uniqueness = false;
    }
}

/// Checks the kinds in parallel, every case in a solver session of its own.
/// Reports come back in the order of `kinds`.
pub fn run(oracle: &Oracle, kinds: &[KindId], ops: &[OpSelector]) -> Vec<OracleReport> {
    kinds
        .par_iter()
        .filter_map(|id| {
            if ops.is_empty() {
                Some(oracle.check_kind_by_id(*id))
            } else {
                check_selected(oracle, *id, ops)
            }
        })
        .collect()
}

fn check_selected(oracle: &Oracle, id: KindId, ops: &[OpSelector]) -> Option<OracleReport> {
    let kind = KindRegistry::global().describe(id).name;
    let reports = ops
        .par_iter()
        .filter_map(|op| {
            let result = match op {
                OpSelector::Binary(op) => oracle.check_binary_by_id(id, *op),
                OpSelector::Unary(op) => oracle.check_unary_by_id(id, *op),
            };
            result
                .inspect_err(|e| log_debug!("Skipping: {}", e))
                .ok()
        })
        .collect::<Vec<_>>();

    if reports.is_empty() {
        log_warn!("No selected operator applies to {}, leaving it out", kind);
        return None;
    }
    Some(reports.into_iter().fold(OracleReport::new(kind), |mut acc, r| {
        acc.merge(r);
        acc
    }))
}

pub fn write_report(
    out: &mut impl Write,
    format: OutputFormat,
    report: &OracleReport,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => {
            writeln!(
                out,
                "{}: {} checked, {} skipped, {} failed",
                report.kind,
                report.checked,
                report.skipped,
                report.failures.len()
            )?;
            for failure in &report.failures {
                writeln!(out, "  {}", failure)?;
            }
            Ok(())
        }
        OutputFormat::JsonLines => {
            serde_json::to_writer(&mut *out, report)?;
            writeln!(out)
        }
    }
}
