use itertools::Itertools;

use symcmn::{Flags, KindId, KindRegistry, NativeRepr, SortId};

#[test]
fn test_every_kind_is_well_formed() {
    for kind in KindRegistry::global().all() {
        assert!(kind.is_well_formed(), "Malformed descriptor: {kind:?}");
    }
}

#[test]
fn test_kind_ids_are_unique() {
    let registry = KindRegistry::new();
    assert!(registry.all().iter().map(|k| k.id).all_unique());
    assert!(registry.all().iter().map(|k| k.name).all_unique());
}

#[test]
fn test_registry_construction_is_idempotent() {
    let first = KindRegistry::new();
    let second = KindRegistry::new();
    assert_eq!(first, second);
    assert_eq!(
        first.all().iter().map(|k| k.id).collect::<Vec<_>>(),
        KindRegistry::global().all().iter().map(|k| k.id).collect::<Vec<_>>(),
    );
}

#[test]
fn test_insertion_order_is_stable() {
    let ids = KindRegistry::new()
        .all()
        .iter()
        .map(|k| k.id)
        .collect::<Vec<_>>();
    assert_eq!(ids.first(), Some(&KindId::Bool));
    assert_eq!(ids.last(), Some(&KindId::Real));
    assert_eq!(ids.len(), 13);
}

#[test]
fn test_bool() {
    let bool_kind = KindRegistry::global().describe(KindId::Bool);
    assert_eq!(bool_kind.native, NativeRepr::Bool);
    assert_eq!(bool_kind.sort, SortId::Bool);
    assert!(bool_kind.flags.contains(Flags::IS_BOOL));
    assert!(bool_kind.is_bool());
}

#[test]
fn test_int32() {
    let kind = KindRegistry::global().describe(KindId::Int32);
    assert_eq!(kind.bits, 32);
    assert_eq!(kind.sort, SortId::BitVector(32));
    assert!(kind.flags.contains(Flags::IS_INTEGER));
    assert!(!kind.flags.contains(Flags::IS_UNSIGNED));
    assert!(kind.is_signed());
}

#[test]
fn test_uint32() {
    let kind = KindRegistry::global().describe(KindId::Uint32);
    assert_eq!(kind.bits, 32);
    assert!(kind.flags.contains(Flags::IS_INTEGER | Flags::IS_UNSIGNED));
    assert!(!kind.is_signed());
}

#[test]
fn test_pointer_width_kinds() {
    let registry = KindRegistry::global();
    let isize_kind = registry.describe(KindId::Isize);
    let usize_kind = registry.describe(KindId::Usize);
    assert!(isize_kind.bits == 32 || isize_kind.bits == 64);
    assert_eq!(isize_kind.bits, usize_kind.bits);
    assert!(usize_kind.is_unsigned());
}

#[test]
fn test_arbitrary_precision_kinds() {
    let registry = KindRegistry::global();

    let integer = registry.describe(KindId::Integer);
    assert_eq!(integer.native, NativeRepr::BigInt);
    assert_eq!(integer.sort, SortId::Int);
    assert_eq!(integer.bits, 0);
    assert!(integer.flags.contains(Flags::IS_BIG_INT));

    let real = registry.describe(KindId::Real);
    assert_eq!(real.native, NativeRepr::BigRat);
    assert_eq!(real.sort, SortId::Real);
    assert_eq!(real.bits, 0);
    assert!(real.flags.contains(Flags::IS_BIG_RAT));
}

#[test]
fn test_lookup_by_name() {
    let registry = KindRegistry::global();
    assert_eq!(registry.lookup("uint8").map(|k| k.id), Ok(KindId::Uint8));
    assert_eq!(registry.lookup("Real").map(|k| k.id), Ok(KindId::Real));
    assert!(registry.lookup("float32").is_err());
}

#[test]
fn test_sort_display() {
    assert_eq!(SortId::BitVector(8).to_string(), "(_ BitVec 8)");
    assert_eq!(SortId::Int.to_string(), "Int");
}
