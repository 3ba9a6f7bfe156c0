use std::sync::OnceLock;

use derive_more as dm;

use crate::flags::Flags;

/// Identity of every supported value kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, dm::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KindId {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Isize,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Usize,
    Integer,
    Real,
}

/// How a concrete value of the kind is held natively.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NativeRepr {
    Bool,
    Int { bits: u32, is_signed: bool },
    /// `num_bigint::BigInt`
    BigInt,
    /// `num_rational::BigRational`
    BigRat,
}

/// How the solver represents a value of the kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, dm::Display)]
pub enum SortId {
    #[display("Bool")]
    Bool,
    #[display("(_ BitVec {_0})")]
    BitVector(u32),
    #[display("Int")]
    Int,
    #[display("Real")]
    Real,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KindDescriptor {
    pub id: KindId,
    pub name: &'static str,
    pub native: NativeRepr,
    pub sort: SortId,
    /// Zero for arbitrary-precision kinds.
    pub bits: u32,
    pub flags: Flags,
}

impl KindDescriptor {
    const fn fixed(id: KindId, name: &'static str, bits: u32, is_signed: bool) -> Self {
        Self {
            id,
            name,
            native: NativeRepr::Int { bits, is_signed },
            sort: SortId::BitVector(bits),
            bits,
            flags: if is_signed {
                Flags::IS_INTEGER
            } else {
                Flags::IS_INTEGER.union(Flags::IS_UNSIGNED)
            },
        }
    }

    #[inline]
    pub fn is_bool(&self) -> bool {
        self.flags.contains(Flags::IS_BOOL)
    }

    #[inline]
    pub fn is_fixed_integer(&self) -> bool {
        self.flags.contains(Flags::IS_INTEGER)
    }

    #[inline]
    pub fn is_unsigned(&self) -> bool {
        self.flags.contains(Flags::IS_UNSIGNED)
    }

    #[inline]
    pub fn is_signed(&self) -> bool {
        self.is_fixed_integer() && !self.is_unsigned()
    }

    #[inline]
    pub fn is_arbitrary_precision(&self) -> bool {
        self.flags.intersects(Flags::IS_BIG_INT | Flags::IS_BIG_RAT)
    }

    /// Checks the structural invariants of a descriptor:
    /// exactly one class flag, unsignedness only on fixed-width integers,
    /// and a zero width exactly for arbitrary-precision kinds.
    pub fn is_well_formed(&self) -> bool {
        let single_class = self.flags.classes().bits().count_ones() == 1;
        let unsigned_ok = !self.is_unsigned() || (self.is_fixed_integer() && self.bits > 0);
        let width_ok = match self.native {
            NativeRepr::Bool => self.bits == 1,
            NativeRepr::Int { bits, .. } => {
                bits == self.bits && self.sort == SortId::BitVector(bits)
            }
            NativeRepr::BigInt | NativeRepr::BigRat => self.bits == 0,
        };
        single_class && unsigned_ok && width_ok
    }
}

const PTR_BITS: u32 = usize::BITS;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown value kind `{0}`")]
pub struct UnknownKind(pub String);

/// The catalogue of all supported kinds, in a stable order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindRegistry {
    kinds: Vec<KindDescriptor>,
}

impl KindRegistry {
    pub fn new() -> Self {
        use KindId::*;
        let kinds = vec![
            KindDescriptor {
                id: Bool,
                name: "Bool",
                native: NativeRepr::Bool,
                sort: SortId::Bool,
                bits: 1,
                flags: Flags::IS_BOOL,
            },
            KindDescriptor::fixed(Int8, "Int8", i8::BITS, true),
            KindDescriptor::fixed(Int16, "Int16", i16::BITS, true),
            KindDescriptor::fixed(Int32, "Int32", i32::BITS, true),
            KindDescriptor::fixed(Int64, "Int64", i64::BITS, true),
            KindDescriptor::fixed(Isize, "Isize", PTR_BITS, true),
            KindDescriptor::fixed(Uint8, "Uint8", u8::BITS, false),
            KindDescriptor::fixed(Uint16, "Uint16", u16::BITS, false),
            KindDescriptor::fixed(Uint32, "Uint32", u32::BITS, false),
            KindDescriptor::fixed(Uint64, "Uint64", u64::BITS, false),
            KindDescriptor::fixed(Usize, "Usize", PTR_BITS, false),
            KindDescriptor {
                id: Integer,
                name: "Integer",
                native: NativeRepr::BigInt,
                sort: SortId::Int,
                bits: 0,
                flags: Flags::IS_BIG_INT,
            },
            KindDescriptor {
                id: Real,
                name: "Real",
                native: NativeRepr::BigRat,
                sort: SortId::Real,
                bits: 0,
                flags: Flags::IS_BIG_RAT,
            },
        ];
        Self { kinds }
    }

    pub fn global() -> &'static Self {
        static REGISTRY: OnceLock<KindRegistry> = OnceLock::new();
        REGISTRY.get_or_init(Self::new)
    }

    #[inline]
    pub fn all(&self) -> &[KindDescriptor] {
        &self.kinds
    }

    /// # Panics
    /// If the kind is not registered, which is a defect in the registry itself.
    pub fn describe(&self, id: KindId) -> &KindDescriptor {
        self.kinds
            .iter()
            .find(|k| k.id == id)
            .unwrap_or_else(|| panic!("Kind {id} is not registered."))
    }

    /// Case-insensitive lookup by display name.
    pub fn lookup(&self, name: &str) -> Result<&KindDescriptor, UnknownKind> {
        self.kinds
            .iter()
            .find(|k| k.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownKind(name.to_owned()))
    }
}

impl Default for KindRegistry {
    fn default() -> Self {
        Self::new()
    }
}
