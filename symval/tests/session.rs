use ::config::{Config, File, FileFormat};
use num_bigint::BigInt;
use num_rational::BigRational;
use serde::{Deserialize, Serialize};

use common::config::ConfigLayout;

use symval::{
    construct::*, with_session, BoolKind, CheckOutcome, EvalMode, Fixed, IntegerKind,
    OracleConfig, RealKind, SolverConfig,
};

fn model_value<K: symval::Kind>(value: &K::Native) -> K::Native {
    with_session(&SolverConfig::default(), |session| {
        let x = session.fresh::<K>("x");
        session.bind(&x, value).unwrap();
        match session.check() {
            CheckOutcome::Sat(model) => x.evaluate(&model, EvalMode::Partial).unwrap(),
            _ => panic!("Expected SAT result for a single binding"),
        }
    })
}

#[test]
fn test_numerals_read_back() {
    assert_eq!(model_value::<Fixed<i8>>(&-128), -128);
    assert_eq!(model_value::<Fixed<u64>>(&u64::MAX), u64::MAX);
    assert_eq!(model_value::<Fixed<i64>>(&i64::MIN), i64::MIN);
    assert!(model_value::<BoolKind>(&true));

    let big = -(BigInt::from(1) << 70);
    assert_eq!(model_value::<IntegerKind>(&big), big);

    let ratio = BigRational::new((-3).into(), 4.into());
    assert_eq!(model_value::<RealKind>(&ratio), ratio);
}

#[test]
fn test_literal_is_symbolic() {
    with_session(&SolverConfig::default(), |session| {
        let five = session.literal::<Fixed<i32>>(&5).unwrap();
        assert!(five.is_symbolic());
        assert!(std::ptr::eq(five.context().unwrap(), session.context()));
    });
}

#[test]
fn test_contradiction_is_unsat() {
    with_session(&SolverConfig::default(), |session| {
        let x = session.fresh::<Fixed<u8>>("x");
        session.bind(&x, &1).unwrap();
        session.bind(&x, &2).unwrap();
        assert!(session.check().is_unsat());
    });
}

#[test]
fn test_assert_truth() {
    with_session(&SolverConfig::default(), |session| {
        let x = session.fresh::<Fixed<i16>>("x");
        session.assert_truth(&x.lt(&int16(-5)).unwrap()).unwrap();
        match session.check() {
            CheckOutcome::Sat(model) => {
                let value = x.evaluate(&model, EvalMode::Complete).unwrap();
                assert!(value < -5);
            }
            _ => panic!("Expected SAT result"),
        }

        session.push();
        session.assert_truth(&bool(false)).unwrap();
        assert!(session.check().is_unsat());
        session.pop();
        assert!(session.check().is_sat());
    });
}

#[test]
fn test_sessions_are_independent() {
    let config = SolverConfig::default();
    with_session(&config, |session| {
        let x = session.fresh::<Fixed<u8>>("x");
        session.bind(&x, &1).unwrap();
        assert!(session.check().is_sat());
    });
    with_session(&config, |session| {
        let x = session.fresh::<Fixed<u8>>("x");
        session.bind(&x, &2).unwrap();
        assert!(session.check().is_sat());
    });
}

#[test]
fn test_default_config() {
    let config: OracleConfig = Config::builder().build().unwrap().try_into().unwrap();
    assert_eq!(config, OracleConfig::default());
    assert!(config.check_uniqueness);
    assert_eq!(config.eval_mode, EvalMode::Complete);
    assert_eq!(config.solver.timeout_ms, None);
}

#[test]
fn test_config_from_toml() {
    let source = r#"
        eval_mode = "partial"
        check_uniqueness = false

        [solver]
        timeout_ms = 500

        [solver.params]
        "smt.random_seed" = "7"
    "#;
    let config: OracleConfig = Config::builder()
        .add_source(File::from_str(source, FileFormat::Toml))
        .build()
        .unwrap()
        .try_into()
        .unwrap();

    assert_eq!(config.eval_mode, EvalMode::Partial);
    assert!(!config.check_uniqueness);
    assert_eq!(config.solver.timeout_ms, Some(500));
    assert_eq!(
        config.solver.params.get("smt.random_seed").map(String::as_str),
        Some("7")
    );
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Layered {
    name: String,
    depth: u32,
    nested: Nested,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Nested {
    flag: bool,
    level: String,
}

#[test]
fn test_config_layers() {
    let layout = ConfigLayout::new("symval_layers_test", "SYMVAL_LAYERS_TEST");
    let defaults = Layered {
        name: "default".to_owned(),
        depth: 1,
        nested: Nested {
            flag: false,
            level: "low".to_owned(),
        },
    };
    assert_eq!(
        layout
            .build(&defaults)
            .unwrap()
            .try_deserialize::<Layered>()
            .unwrap(),
        defaults
    );

    std::env::set_var(
        layout.inline_var(),
        "depth = 2\n[nested]\nlevel = \"mid\"\n",
    );
    std::env::set_var(layout.inline_format_var(), "toml");
    std::env::set_var("SYMVAL_LAYERS_TEST_NESTED__FLAG", "true");
    let loaded: Layered = layout.build(&defaults).unwrap().try_deserialize().unwrap();
    assert_eq!(
        loaded,
        Layered {
            name: "default".to_owned(),
            depth: 2,
            nested: Nested {
                flag: true,
                level: "mid".to_owned(),
            },
        }
    );
}

#[test]
fn test_load_falls_back_to_defaults() {
    let config = symval::config::load().unwrap();
    assert_eq!(config.eval_mode, EvalMode::Complete);
    assert!(config.check_uniqueness);
}
