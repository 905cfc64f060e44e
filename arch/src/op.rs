use color_print::cformat;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use strum::{Display, EnumIter, EnumString};

/// Executable opcodes. The discriminant is the opcode byte stored in the low
/// eight bits of an instruction word.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    TryFromPrimitive,
    IntoPrimitive,
    EnumString,
    EnumIter,
    Display,
)]
#[repr(u8)]
#[strum(serialize_all = "lowercase")]
pub enum Op {
    LDC = 0x00,
    ADC = 0x01,
    LDL = 0x02,
    STL = 0x03,
    LDNL = 0x04,
    STNL = 0x05,
    ADD = 0x06,
    SUB = 0x07,
    SHL = 0x08,
    SHR = 0x09,
    ADJ = 0x0A,
    A2SP = 0x0B,
    SP2A = 0x0C,
    CALL = 0x0D,
    RETURN = 0x0E,
    BRZ = 0x0F,
    BRLZ = 0x10,
    BR = 0x11,
    #[strum(to_string = "HALT")]
    HALT = 0x12,
}

/// Operand class of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// No operand.
    None,
    /// Absolute value or address.
    Value,
    /// Displacement relative to the next instruction.
    Offset,
}

impl Op {
    pub fn arity(&self) -> Arity {
        use Op::*;
        match self {
            LDC | ADC | ADJ => Arity::Value,
            LDL | STL | LDNL | STNL | CALL | BRZ | BRLZ | BR => Arity::Offset,
            ADD | SUB | SHL | SHR | A2SP | SP2A | RETURN | HALT => Arity::None,
        }
    }

    pub fn opcode(self) -> u8 {
        self.into()
    }

    pub fn cformat(&self, operand: i32) -> String {
        match self.arity() {
            Arity::None => cformat!("<r>{:<6}</>", self.to_string()),
            _ => cformat!("<r>{:<6}</><y>{:08X}</>", self.to_string(), operand),
        }
    }
}
