use bimap::BiMap;
use once_cell::sync::Lazy;
use strum::IntoEnumIterator;

use crate::op::{Arity, Op};

/// Everything that may appear in the mnemonic column of a source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    Inst(Op),
    /// Raw word, no opcode.
    Data,
    /// Assembler-only constant binding, emitted like `data`.
    Set,
}

static TABLE: Lazy<BiMap<&'static str, Mnemonic>> = Lazy::new(|| {
    let mut table = BiMap::new();
    table.insert("data", Mnemonic::Data);
    for op in Op::iter() {
        table.insert(op_name(op), Mnemonic::Inst(op));
    }
    table.insert("SET", Mnemonic::Set);
    table
});

fn op_name(op: Op) -> &'static str {
    use Op::*;
    match op {
        LDC => "ldc",
        ADC => "adc",
        LDL => "ldl",
        STL => "stl",
        LDNL => "ldnl",
        STNL => "stnl",
        ADD => "add",
        SUB => "sub",
        SHL => "shl",
        SHR => "shr",
        ADJ => "adj",
        A2SP => "a2sp",
        SP2A => "sp2a",
        CALL => "call",
        RETURN => "return",
        BRZ => "brz",
        BRLZ => "brlz",
        BR => "br",
        HALT => "HALT",
    }
}

impl Mnemonic {
    /// Case-sensitive lookup.
    pub fn parse(name: &str) -> Option<Mnemonic> {
        TABLE.get_by_left(name).copied()
    }

    pub fn name(&self) -> &'static str {
        TABLE.get_by_right(self).copied().unwrap_or_default()
    }

    pub fn arity(&self) -> Arity {
        match self {
            Mnemonic::Inst(op) => op.arity(),
            Mnemonic::Data | Mnemonic::Set => Arity::Value,
        }
    }

    /// `None` for the pseudo-instructions, whose words carry no opcode byte.
    pub fn opcode(&self) -> Option<u8> {
        match self {
            Mnemonic::Inst(op) => Some(op.opcode()),
            Mnemonic::Data | Mnemonic::Set => None,
        }
    }
}
