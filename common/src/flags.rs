use bitflags::bitflags;

bitflags! {
    /// A single flag space for both kinds and operators.
    ///
    /// A kind carries exactly one class flag (plus [`Flags::IS_UNSIGNED`] for
    /// unsigned fixed-width integers). An operator carries the classes of the
    /// kinds it is defined on, plus its own classification flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Flags: u16 {
        const IS_BOOL = 1 << 0;
        const IS_INTEGER = 1 << 1;
        const IS_UNSIGNED = 1 << 2;
        const IS_FLOAT = 1 << 3;
        const IS_BIG_INT = 1 << 4;
        const IS_BIG_RAT = 1 << 5;

        /// Equality or relational comparison.
        const OP_COMPARE = 1 << 8;
        /// Bit shift. Shifts are not arithmetic w.r.t. overflow reasoning.
        const OP_SHIFT = 1 << 9;
        /// Identity unary plus.
        const OP_POS = 1 << 10;

        const NUMERIC = Self::IS_INTEGER.bits()
            | Self::IS_FLOAT.bits()
            | Self::IS_BIG_INT.bits()
            | Self::IS_BIG_RAT.bits();
        /// Kinds supporting `==` and `!=`.
        const COMPARABLE = Self::IS_BOOL.bits() | Self::NUMERIC.bits();
        /// Kinds supporting `<`, `<=`, `>` and `>=`.
        const ORDERED = Self::NUMERIC.bits();
    }
}

impl Flags {
    /// The flags that classify a kind. Exactly one of them is set per kind.
    pub const CLASSES: Flags = Flags::IS_BOOL
        .union(Flags::IS_INTEGER)
        .union(Flags::IS_FLOAT)
        .union(Flags::IS_BIG_INT)
        .union(Flags::IS_BIG_RAT);

    pub const OPERATOR: Flags = Flags::OP_COMPARE
        .union(Flags::OP_SHIFT)
        .union(Flags::OP_POS);

    #[inline]
    pub fn classes(self) -> Flags {
        self.intersection(Self::CLASSES)
    }
}
