use num_bigint::BigInt;
use z3::{ast::Ast, Config, Context};

use symval::{
    construct::*, with_session, BinaryOp, BoolKind, CheckOutcome, Dispatch, EvalMode, Fixed,
    IntegerKind, Kind, NativeOutcome, OperatorTable, RealKind, Representatives, Session,
    SolverConfig, UnaryOp, Value, ValueError,
};

macro_rules! per_kind {
    ($check:ident) => {
        $check::<BoolKind>();
        $check::<Fixed<i8>>();
        $check::<Fixed<i16>>();
        $check::<Fixed<i32>>();
        $check::<Fixed<i64>>();
        $check::<Fixed<isize>>();
        $check::<Fixed<u8>>();
        $check::<Fixed<u16>>();
        $check::<Fixed<u32>>();
        $check::<Fixed<u64>>();
        $check::<Fixed<usize>>();
        $check::<IntegerKind>();
        $check::<RealKind>();
    };
}

#[test]
fn test_literal_round_trip() {
    fn check<K: Representatives>() {
        for x in K::representatives() {
            let value = Value::<K>::from_literal(x.clone());
            assert!(value.is_concrete());
            assert_eq!(value.to_string(), x.to_string(), "{}", K::name());
        }
    }
    per_kind!(check);

    assert_eq!(int8(-128).to_string(), "-128");
    assert_eq!(uint64(u64::MAX).to_string(), "18446744073709551615");
    assert_eq!(integer(-23).to_string(), "-23");
    assert_eq!(ratio(-3, 4).to_string(), "-3/4");
    assert_eq!(bool(true).to_string(), "true");
}

#[test]
fn test_fresh_is_symbolic() {
    let context = Context::new(&Config::new());
    let x = any_int32(&context, "x");
    assert!(x.is_symbolic());
    assert!(x.as_concrete().is_none());
    assert!(std::ptr::eq(x.context().unwrap(), &context));
    assert!(!x.to_string().is_empty());
    assert!(int32(1).context().is_none());
}

#[test]
fn test_terms_have_kind_sort() {
    fn check<K: Representatives>() {
        let context = Context::new(&Config::new());
        let sort = K::sort(&context);
        assert_eq!(K::fresh_const(&context, "x").get_sort(), sort, "{}", K::name());
        for x in K::representatives() {
            match K::literal(&context, &x) {
                Ok(term) => assert_eq!(term.get_sort(), sort, "{}", K::name()),
                Err(e) => panic!("{} literal {}: {}", K::name(), x, e),
            }
        }
    }
    per_kind!(check);
}

#[test]
fn test_symbolic_operand_infects_result() {
    fn check<K: Dispatch + Representatives>() {
        let context = Context::new(&Config::new());
        let table = OperatorTable::global();
        let kind = K::descriptor();
        let symbolic = Value::<K>::fresh(&context, "x");
        // One (or true): a valid divisor and shift amount for every kind.
        let concrete = Value::<K>::from_literal(K::representatives()[1].clone());

        for d in table.binary_ops_for(kind) {
            let native = K::apply_binary(d.op, &concrete, &concrete).unwrap();
            assert!(native.is_concrete(), "{} `{}` promoted", K::name(), d.symbol);

            for (a, b) in [
                (&symbolic, &concrete),
                (&concrete, &symbolic),
                (&symbolic, &symbolic),
            ] {
                let outcome = K::apply_binary(d.op, a, b).unwrap();
                assert!(outcome.is_symbolic(), "{} `{}` demoted", K::name(), d.symbol);
                let projection = outcome.to_string();
                assert!(!projection.is_empty());
                assert_ne!(projection, native.to_string(), "{} `{}`", K::name(), d.symbol);
            }
        }

        for d in table.unary_ops_for(kind) {
            assert!(K::apply_unary(d.op, &symbolic).unwrap().is_symbolic());
            assert!(K::apply_unary(d.op, &concrete).unwrap().is_concrete());
        }
    }
    per_kind!(check);
}

#[test]
fn test_mixed_contexts_fail_fast() {
    let first = Context::new(&Config::new());
    let second = Context::new(&Config::new());
    let x = any_int32(&first, "x");
    let y = any_int32(&second, "y");

    assert_eq!(x.add(&y).unwrap_err(), ValueError::ContextMismatch);
    assert_eq!(x.lt(&y).unwrap_err(), ValueError::ContextMismatch);
    assert_eq!(x.to_term(&second).unwrap_err(), ValueError::ContextMismatch);

    // A concrete operand adopts the context of the symbolic one.
    assert!(x.add(&int32(1)).is_ok());
}

#[test]
fn test_concrete_division_by_zero() {
    assert_eq!(
        int32(1).div(&int32(0)).unwrap_err(),
        ValueError::DivisionByZero { kind: "Int32" }
    );
    assert_eq!(
        uint8(1).rem(&uint8(0)).unwrap_err(),
        ValueError::DivisionByZero { kind: "Uint8" }
    );
    assert_eq!(
        integer(5).rem(&integer(0)).unwrap_err(),
        ValueError::DivisionByZero { kind: "Integer" }
    );
    assert_eq!(
        ratio(1, 2).div(&ratio(0, 1)).unwrap_err(),
        ValueError::DivisionByZero { kind: "Real" }
    );
}

#[test]
fn test_unsupported_operators() {
    let err = BoolKind::apply_binary(BinaryOp::Add, &bool(true), &bool(false)).unwrap_err();
    assert_eq!(
        err,
        ValueError::UnsupportedOp {
            kind: "Bool",
            op: "+"
        }
    );
    assert!(RealKind::apply_binary(BinaryOp::Rem, &ratio(1, 2), &ratio(1, 3)).is_err());
    assert!(IntegerKind::apply_unary(UnaryOp::Not, &integer(1)).is_err());
}

#[test]
fn test_dispatch_agrees_with_table() {
    fn check<K: Dispatch + Representatives>() {
        let table = OperatorTable::global();
        let kind = K::descriptor();
        // The second representative is one (or true) for every kind.
        let one = Value::<K>::from_literal(K::representatives()[1].clone());

        for d in table.all_binary_ops() {
            let result = K::apply_binary(d.op, &one, &one);
            let unsupported = matches!(result, Err(ValueError::UnsupportedOp { .. }));
            assert_eq!(d.applies_to(kind), !unsupported, "{} `{}`", K::name(), d.symbol);
        }
        for d in table.all_unary_ops() {
            let result = K::apply_unary(d.op, &one);
            let unsupported = matches!(result, Err(ValueError::UnsupportedOp { .. }));
            assert_eq!(d.applies_to(kind), !unsupported, "{} `{}`", K::name(), d.symbol);
        }
    }
    per_kind!(check);
}

fn native<K: Dispatch>(
    op: BinaryOp,
    a: Value<'static, K>,
    b: Value<'static, K>,
) -> NativeOutcome<K::Native> {
    K::apply_binary(op, &a, &b).unwrap().to_native().unwrap()
}

#[test]
fn test_uint8_add_wraps() {
    assert_eq!(uint8(200).add(&uint8(100)).unwrap().as_concrete(), Some(&44));
    assert_eq!(
        native(BinaryOp::Add, uint8(200), uint8(100)),
        NativeOutcome::Value(44)
    );
}

#[test]
fn test_int8_neg_min_keeps_pattern() {
    assert_eq!(int8(-128).neg().as_concrete(), Some(&-128));
    assert_eq!(int8(-128).div(&int8(-1)).unwrap().as_concrete(), Some(&-128));
    assert_eq!(int8(-128).rem(&int8(-1)).unwrap().as_concrete(), Some(&0));
}

#[test]
fn test_fixed_division_truncates() {
    assert_eq!(int32(-7).div(&int32(2)).unwrap().as_concrete(), Some(&-3));
    assert_eq!(int32(-7).rem(&int32(2)).unwrap().as_concrete(), Some(&-1));
    assert_eq!(int32(7).rem(&int32(-2)).unwrap().as_concrete(), Some(&1));
}

#[test]
fn test_shifts_saturate() {
    assert_eq!(uint8(1).shl(&uint8(7)).unwrap().as_concrete(), Some(&128));
    assert_eq!(uint8(1).shl(&uint8(8)).unwrap().as_concrete(), Some(&0));
    assert_eq!(int8(-128).shr(&int8(7)).unwrap().as_concrete(), Some(&-1));
    assert_eq!(int8(-128).shr(&int8(9)).unwrap().as_concrete(), Some(&-1));
    assert_eq!(int8(64).shr(&int8(-1)).unwrap().as_concrete(), Some(&0));
    assert_eq!(uint16(0x8000).shr(&uint16(15)).unwrap().as_concrete(), Some(&1));
}

#[test]
fn test_integer_division_floors() {
    assert_eq!(
        integer(23).div(&integer(5)).unwrap().as_concrete(),
        Some(&BigInt::from(4))
    );
    assert_eq!(
        integer(-23).rem(&integer(5)).unwrap().as_concrete(),
        Some(&BigInt::from(2))
    );
    assert_eq!(
        integer(-23).div(&integer(5)).unwrap().as_concrete(),
        Some(&BigInt::from(-5))
    );
}

#[test]
fn test_bool_xor() {
    assert_eq!(bool(true).bitxor(&bool(false)).unwrap().as_concrete(), Some(&true));
    assert_eq!(bool(true).bitxor(&bool(true)).unwrap().as_concrete(), Some(&false));
    assert_eq!(bool(true).not().as_concrete(), Some(&false));
}

#[test]
fn test_comparisons() {
    assert_eq!(int8(-1).lt(&int8(0)).unwrap().as_concrete(), Some(&true));
    assert_eq!(uint8(255).lt(&uint8(0)).unwrap().as_concrete(), Some(&false));
    assert_eq!(ratio(1, 3).ge(&ratio(2, 6)).unwrap().as_concrete(), Some(&true));
    assert_eq!(bool(true).ne(&bool(false)).unwrap().as_concrete(), Some(&true));
    assert_eq!(
        native(BinaryOp::Eq, integer(7), integer(7)),
        NativeOutcome::Truth(true)
    );
}

#[test]
fn test_evaluate_under_model() {
    with_session(&SolverConfig::default(), |session| {
        let x = session.fresh::<Fixed<u8>>("x");
        let y = session.fresh::<Fixed<u8>>("y");
        session.bind(&x, &200).unwrap();
        let sum = x.add(&uint8(100)).unwrap();

        let CheckOutcome::Sat(model) = session.check() else {
            panic!("Expected a satisfiable session");
        };
        assert_eq!(x.evaluate(&model, EvalMode::Complete), Ok(200));
        assert_eq!(sum.evaluate(&model, EvalMode::Complete), Ok(44));
        assert_eq!(uint8(9).evaluate(&model, EvalMode::Partial), Ok(9));

        assert!(y.evaluate(&model, EvalMode::Complete).is_ok());
        assert!(matches!(
            y.evaluate(&model, EvalMode::Partial),
            Err(ValueError::Unevaluable { kind: "Uint8", .. })
        ));
    });
}

#[test]
fn test_session_rejects_foreign_values() {
    let first = Context::new(&Config::new());
    let second = Context::new(&Config::new());
    let session = Session::new(&first);
    let x = any_int32(&second, "x");

    assert_eq!(session.bind(&x, &1), Err(ValueError::ContextMismatch));

    let CheckOutcome::Sat(model) = session.check() else {
        panic!("Expected a satisfiable session");
    };
    assert_eq!(
        x.evaluate(&model, EvalMode::Complete),
        Err(ValueError::ContextMismatch)
    );
}
