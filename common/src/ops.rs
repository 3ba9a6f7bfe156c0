use std::sync::OnceLock;

use derive_more as dm;

use crate::{flags::Flags, kinds::KindDescriptor};

/// Operator tokens of the Rust expression grammar.
/// Only used to check that the operator table covers the grammar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    And,
    Or,
    Caret,
    Shl,
    Shr,
    EqEq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Not,
}

impl Token {
    /// Tokens of the grammar that denote a binary operator on values.
    pub const BINARY: [Token; 16] = [
        Token::Plus,
        Token::Minus,
        Token::Star,
        Token::Slash,
        Token::Percent,
        Token::And,
        Token::Or,
        Token::Caret,
        Token::Shl,
        Token::Shr,
        Token::EqEq,
        Token::Ne,
        Token::Lt,
        Token::Le,
        Token::Gt,
        Token::Ge,
    ];

    /// Tokens of the grammar that denote a prefix operator on values.
    pub const UNARY: [Token; 3] = [Token::Plus, Token::Minus, Token::Not];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, dm::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, dm::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryOp {
    Pos,
    Neg,
    Not,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BinaryOpDescriptor {
    pub op: BinaryOp,
    pub symbol: &'static str,
    pub token: Token,
    /// Name of the value method implementing the operator.
    pub method: &'static str,
    pub flags: Flags,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UnaryOpDescriptor {
    pub op: UnaryOp,
    pub symbol: &'static str,
    pub token: Token,
    pub method: &'static str,
    pub flags: Flags,
}

macro_rules! op_table {
    ($desc:ident, $op_ty:ident; $($op:ident: $symbol:literal, $token:ident, $method:literal, $flags:expr;)*) => {
        vec![
            $($desc {
                op: $op_ty::$op,
                symbol: $symbol,
                token: Token::$token,
                method: $method,
                flags: $flags,
            },)*
        ]
    };
}

fn binary_ops() -> Vec<BinaryOpDescriptor> {
    const BITWISE: Flags = Flags::IS_INTEGER.union(Flags::IS_BOOL);
    const INTEGRAL: Flags = Flags::IS_INTEGER.union(Flags::IS_BIG_INT);
    const SHIFT: Flags = Flags::IS_INTEGER.union(Flags::OP_SHIFT);
    const EQUALITY: Flags = Flags::COMPARABLE.union(Flags::OP_COMPARE);
    const RELATION: Flags = Flags::ORDERED.union(Flags::OP_COMPARE);
    op_table! {
        BinaryOpDescriptor, BinaryOp;
        Add: "+", Plus, "add", Flags::NUMERIC;
        Sub: "-", Minus, "sub", Flags::NUMERIC;
        Mul: "*", Star, "mul", Flags::NUMERIC;
        Div: "/", Slash, "div", Flags::NUMERIC;
        Rem: "%", Percent, "rem", INTEGRAL;
        BitAnd: "&", And, "bitand", BITWISE;
        BitOr: "|", Or, "bitor", BITWISE;
        BitXor: "^", Caret, "bitxor", BITWISE;
        Shl: "<<", Shl, "shl", SHIFT;
        Shr: ">>", Shr, "shr", SHIFT;
        Eq: "==", EqEq, "eq", EQUALITY;
        Ne: "!=", Ne, "ne", EQUALITY;
        Lt: "<", Lt, "lt", RELATION;
        Le: "<=", Le, "le", RELATION;
        Gt: ">", Gt, "gt", RELATION;
        Ge: ">=", Ge, "ge", RELATION;
    }
}

fn unary_ops() -> Vec<UnaryOpDescriptor> {
    op_table! {
        UnaryOpDescriptor, UnaryOp;
        Pos: "+", Plus, "pos", Flags::NUMERIC.union(Flags::OP_POS);
        Neg: "-", Minus, "neg", Flags::NUMERIC;
        Not: "!", Not, "not", Flags::IS_INTEGER.union(Flags::IS_BOOL);
    }
}

impl BinaryOp {
    pub fn descriptor(self) -> &'static BinaryOpDescriptor {
        OperatorTable::global().binary(self)
    }

    #[inline]
    pub fn symbol(self) -> &'static str {
        self.descriptor().symbol
    }

    #[inline]
    pub fn is_comparison(self) -> bool {
        self.descriptor().flags.contains(Flags::OP_COMPARE)
    }

    #[inline]
    pub fn is_shift(self) -> bool {
        self.descriptor().flags.contains(Flags::OP_SHIFT)
    }
}

impl UnaryOp {
    pub fn descriptor(self) -> &'static UnaryOpDescriptor {
        OperatorTable::global().unary(self)
    }

    #[inline]
    pub fn symbol(self) -> &'static str {
        self.descriptor().symbol
    }
}

impl BinaryOpDescriptor {
    #[inline]
    pub fn applies_to(&self, kind: &KindDescriptor) -> bool {
        self.flags.intersects(kind.flags.classes())
    }
}

impl UnaryOpDescriptor {
    #[inline]
    pub fn applies_to(&self, kind: &KindDescriptor) -> bool {
        self.flags.intersects(kind.flags.classes())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("comparison operator `{0}` is missing the compare flag")]
    MissingCompareFlag(&'static str),
    #[error("shift operator `{0}` is missing the shift flag")]
    MissingShiftFlag(&'static str),
    #[error("operator `{0}` carries the shift flag but is not a shift")]
    StrayShiftFlag(&'static str),
    #[error("unary plus is missing the identity flag")]
    MissingPosFlag,
    #[error("grammar token {0:?} has no operator in the table")]
    UncoveredToken(Token),
    #[error("operator `{0}` applies to no kind")]
    Inapplicable(&'static str),
}

/// The catalogue of all operators, in a stable order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorTable {
    binary: Vec<BinaryOpDescriptor>,
    unary: Vec<UnaryOpDescriptor>,
}

impl OperatorTable {
    pub fn new() -> Self {
        Self {
            binary: binary_ops(),
            unary: unary_ops(),
        }
    }

    pub fn global() -> &'static Self {
        static TABLE: OnceLock<OperatorTable> = OnceLock::new();
        TABLE.get_or_init(Self::new)
    }

    #[inline]
    pub fn all_binary_ops(&self) -> &[BinaryOpDescriptor] {
        &self.binary
    }

    #[inline]
    pub fn all_unary_ops(&self) -> &[UnaryOpDescriptor] {
        &self.unary
    }

    pub fn binary(&self, op: BinaryOp) -> &BinaryOpDescriptor {
        self.binary
            .iter()
            .find(|d| d.op == op)
            .unwrap_or_else(|| panic!("Binary operator {op} is not in the table."))
    }

    pub fn unary(&self, op: UnaryOp) -> &UnaryOpDescriptor {
        self.unary
            .iter()
            .find(|d| d.op == op)
            .unwrap_or_else(|| panic!("Unary operator {op} is not in the table."))
    }

    pub fn binary_ops_for<'a>(
        &'a self,
        kind: &'a KindDescriptor,
    ) -> impl Iterator<Item = &'a BinaryOpDescriptor> + 'a {
        self.binary.iter().filter(move |d| d.applies_to(kind))
    }

    pub fn unary_ops_for<'a>(
        &'a self,
        kind: &'a KindDescriptor,
    ) -> impl Iterator<Item = &'a UnaryOpDescriptor> + 'a {
        self.unary.iter().filter(move |d| d.applies_to(kind))
    }

    #[inline]
    pub fn is_comparable(&self, kind: &KindDescriptor) -> bool {
        kind.flags.intersects(Flags::COMPARABLE)
    }

    #[inline]
    pub fn is_ordered(&self, kind: &KindDescriptor) -> bool {
        kind.flags.intersects(Flags::ORDERED)
    }

    pub fn validate(&self) -> Result<(), TableError> {
        for d in &self.binary {
            let is_compare_symbol = matches!(d.symbol, "==" | "!=" | "<" | "<=" | ">" | ">=");
            if is_compare_symbol && !d.flags.contains(Flags::OP_COMPARE) {
                return Err(TableError::MissingCompareFlag(d.symbol));
            }
            let is_shift_symbol = matches!(d.symbol, "<<" | ">>");
            match (is_shift_symbol, d.flags.contains(Flags::OP_SHIFT)) {
                (true, false) => return Err(TableError::MissingShiftFlag(d.symbol)),
                (false, true) => return Err(TableError::StrayShiftFlag(d.symbol)),
                _ => {}
            }
            if d.flags.classes().is_empty() {
                return Err(TableError::Inapplicable(d.symbol));
            }
        }

        for d in &self.unary {
            if d.symbol == "+" && !d.flags.contains(Flags::OP_POS) {
                return Err(TableError::MissingPosFlag);
            }
            if d.flags.contains(Flags::OP_SHIFT) {
                return Err(TableError::StrayShiftFlag(d.symbol));
            }
            if d.flags.classes().is_empty() {
                return Err(TableError::Inapplicable(d.symbol));
            }
        }

        if let Some(token) = Token::BINARY
            .iter()
            .find(|t| !self.binary.iter().any(|d| d.token == **t))
        {
            return Err(TableError::UncoveredToken(*token));
        }
        if let Some(token) = Token::UNARY
            .iter()
            .find(|t| !self.unary.iter().any(|d| d.token == **t))
        {
            return Err(TableError::UncoveredToken(*token));
        }

        Ok(())
    }
}

impl Default for OperatorTable {
    fn default() -> Self {
        Self::new()
    }
}
