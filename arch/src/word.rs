// ----------------------------------------------------------------------------
// Word format
//
//  31                              8 7          0
// +---------------------------------+------------+
// |    operand (signed, 24 bits)    |   opcode   |
// +---------------------------------+------------+
//
// `data` words use all 32 bits as the value.

/// Packs an opcode and an operand. Only the low 24 bits of the operand are
/// kept; larger magnitudes are truncated, not rejected.
pub fn encode(opcode: u8, operand: i32) -> u32 {
    ((operand as u32) << 8) | opcode as u32
}

/// Splits a word into opcode and sign-extended operand.
pub fn decode(word: u32) -> (u8, i32) {
    let opcode = (word & 0xFF) as u8;
    let operand = (word as i32) >> 8;
    (opcode, operand)
}

/// True when `operand` survives the 24-bit operand field unchanged.
pub fn fits_operand(operand: i32) -> bool {
    (-(1 << 23)..(1 << 23)).contains(&operand)
}

// ----------------------------------------------------------------------------
