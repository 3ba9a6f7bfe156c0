use clap::{Parser, ValueEnum};

use common::{BinaryOp, KindId, KindRegistry, OperatorTable, UnaryOp};

fn parse_kind(s: &str) -> Result<KindId, String> {
    KindRegistry::global()
        .lookup(s)
        .map(|k| k.id)
        .map_err(|e| e.to_string())
}

/// Operators are named after their value methods (`add`, `shl`, `neg`, ...)
/// since symbols such as `-` are shared by a binary and a unary operator.
fn parse_op(s: &str) -> Result<OpSelector, String> {
    let table = OperatorTable::global();
    table
        .all_binary_ops()
        .iter()
        .find(|d| d.method == s)
        .map(|d| OpSelector::Binary(d.op))
        .or_else(|| {
            table
                .all_unary_ops()
                .iter()
                .find(|d| d.method == s)
                .map(|d| OpSelector::Unary(d.op))
        })
        .ok_or_else(|| {
            let known = table
                .all_binary_ops()
                .iter()
                .map(|d| d.method)
                .chain(table.all_unary_ops().iter().map(|d| d.method))
                .collect::<Vec<_>>()
                .join(", ");
            format!("unknown operator `{s}`, expected one of: {known}")
        })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpSelector {
    Binary(BinaryOp),
    Unary(UnaryOp),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    #[value(alias("jsonl"))]
    JsonLines,
}

/// Cross-checks the native and the symbolic semantics of value operators.
#[derive(Parser, Debug)]
#[command(name = "symval-check")]
pub struct Args {
    /// Kind to check, by name (e.g. `Int8`, `integer`). All kinds if none is given
    #[arg(short, long = "kind", value_parser = parse_kind)]
    pub kinds: Vec<KindId>,
    /// Operator to check, by method name (e.g. `add`, `neg`). All operators if none is given
    #[arg(short, long = "op", value_parser = parse_op)]
    pub ops: Vec<OpSelector>,
    /// Per-check solver timeout in milliseconds, overrides the configuration
    #[arg(long)]
    pub timeout_ms: Option<u64>,
    /// Skip the second session that rules out results other than the native one
    #[arg(long, action)]
    pub no_uniqueness: bool,
    /// The format of the reports written to the standard output
    #[arg(long)]
    pub output_format: Option<OutputFormat>,
    /// Whether to exit successfully even if some check fails
    #[arg(short, long, action)]
    pub silent: bool,
    /// Number of worker threads, defaults to the number of cores
    #[arg(short, long)]
    pub jobs: Option<usize>,
    /// Raise the default log level, once per occurrence
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// The kinds to check, in catalogue order.
    pub fn selected_kinds(&self) -> Vec<KindId> {
        KindRegistry::global()
            .all()
            .iter()
            .map(|k| k.id)
            .filter(|id| self.kinds.is_empty() || self.kinds.contains(id))
            .collect()
    }
}
