use clap::Parser;

use checker::{
    args::{Args, OpSelector, OutputFormat},
    run::{apply_overrides, run, write_report},
};
use symval::{BinaryOp, KindId, Oracle, OracleConfig, UnaryOp};

#[test]
fn test_parse_filters() {
    let args = Args::try_parse_from([
        "symval-check",
        "--kind",
        "uint8",
        "-k",
        "Real",
        "--op",
        "shl",
        "--op",
        "neg",
        "--output-format",
        "jsonl",
    ])
    .unwrap();

    assert_eq!(args.kinds, [KindId::Uint8, KindId::Real]);
    assert_eq!(
        args.ops,
        [
            OpSelector::Binary(BinaryOp::Shl),
            OpSelector::Unary(UnaryOp::Neg)
        ]
    );
    assert_eq!(args.output_format, Some(OutputFormat::JsonLines));
    // Catalogue order, not command line order.
    assert_eq!(args.selected_kinds(), [KindId::Uint8, KindId::Real]);
}

#[test]
fn test_parse_rejects_unknown_names() {
    assert!(Args::try_parse_from(["symval-check", "--kind", "Float"]).is_err());
    assert!(Args::try_parse_from(["symval-check", "--op", "+"]).is_err());
}

#[test]
fn test_defaults_select_everything() {
    let args = Args::try_parse_from(["symval-check"]).unwrap();
    assert_eq!(args.selected_kinds().len(), 13);
    assert!(args.ops.is_empty());
    assert!(!args.silent);
}

#[test]
fn test_overrides() {
    let args = Args::try_parse_from(["symval-check", "--timeout-ms", "250", "--no-uniqueness"])
        .unwrap();
    let mut config = OracleConfig::default();
    apply_overrides(&mut config, &args);
    assert_eq!(config.solver.timeout_ms, Some(250));
    assert!(!config.check_uniqueness);
}

#[test]
fn test_run_selected_ops() {
    let oracle = Oracle::new(OracleConfig::default()).unwrap();
    let reports = run(
        &oracle,
        &[KindId::Bool, KindId::Int8, KindId::Real],
        &[OpSelector::Binary(BinaryOp::BitXor)],
    );

    // Real has no `^`.
    assert_eq!(
        reports.iter().map(|r| r.kind).collect::<Vec<_>>(),
        ["Bool", "Int8"]
    );
    assert!(reports.iter().all(|r| r.is_success() && r.checked > 0));
}

#[test]
fn test_run_leaves_out_kinds_without_applicable_ops() {
    let oracle = Oracle::new(OracleConfig::default()).unwrap();
    let reports = run(
        &oracle,
        &[KindId::Real, KindId::Integer],
        &[OpSelector::Binary(BinaryOp::BitXor), OpSelector::Binary(BinaryOp::Shl)],
    );
    assert!(reports.is_empty());
}

#[test]
fn test_write_report() {
    let oracle = Oracle::new(OracleConfig::default()).unwrap();
    let reports = run(&oracle, &[KindId::Bool], &[]);
    let report = &reports[0];

    let mut text = Vec::new();
    write_report(&mut text, OutputFormat::Text, report).unwrap();
    let text = String::from_utf8(text).unwrap();
    assert!(text.starts_with("Bool: "), "{text}");
    assert!(text.trim_end().ends_with("0 failed"), "{text}");

    let mut json = Vec::new();
    write_report(&mut json, OutputFormat::JsonLines, report).unwrap();
    let line = String::from_utf8(json).unwrap();
    assert_eq!(line.lines().count(), 1);
    let value: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert_eq!(value["kind"], "Bool");
    assert_eq!(value["checked"], report.checked);
}
