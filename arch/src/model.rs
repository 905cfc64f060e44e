use thiserror::Error;

use crate::op::Op;
use crate::word::decode;

pub const MEMORY_SIZE: usize = 1 << 24;
pub const STACK_LIMIT: i32 = 1 << 23;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    #[error("Segmentation fault: pc 0x{0:08X} is outside the program")]
    Segfault(i32),

    #[error("Invalid opcode 0x{opcode:02X} at 0x{pc:08X}")]
    InvalidOpcode { pc: i32, opcode: u8 },

    #[error("Memory access error at 0x{0:08X}")]
    MemoryAccess(i64),

    #[error("Stack overflow: sp 0x{0:08X}")]
    StackOverflow(i32),
}

/// One executed instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exec {
    pub addr: i32,
    pub word: u32,
    pub op: Op,
    pub operand: i32,
}

pub struct State {
    rom: Vec<u32>,
    ram: Vec<i32>,
    pub a: i32,
    pub b: i32,
    pub pc: i32,
    pub sp: i32,
    executed: u64,
    halted: bool,
}

// Memory access
impl State {
    pub fn get(&self, addr: i64) -> Result<i32, Fault> {
        usize::try_from(addr)
            .ok()
            .and_then(|idx| self.ram.get(idx).copied())
            .ok_or(Fault::MemoryAccess(addr))
    }

    pub fn set(&mut self, addr: i64, val: i32) -> Result<(), Fault> {
        let slot = usize::try_from(addr)
            .ok()
            .and_then(|idx| self.ram.get_mut(idx))
            .ok_or(Fault::MemoryAccess(addr))?;
        *slot = val;
        Ok(())
    }
}

impl State {
    pub fn new() -> Self {
        State {
            rom: vec![],
            ram: vec![0; MEMORY_SIZE],
            a: 0,
            b: 0,
            pc: 0,
            sp: 0,
            executed: 0,
            halted: false,
        }
    }

    /// Loads an object stream as the program and as the initial contents of
    /// memory starting at address 0.
    pub fn load(&mut self, words: &[u32]) {
        self.rom = words.to_vec();
        for (slot, word) in self.ram.iter_mut().zip(words) {
            *slot = *word as i32;
        }
    }

    /// Reads little-endian words; a trailing partial word is ignored.
    pub fn load_bytes(&mut self, bytes: &[u8]) {
        let words: Vec<u32> = bytes
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        self.load(&words);
    }

    pub fn program_len(&self) -> usize {
        self.rom.len()
    }

    pub fn executed(&self) -> u64 {
        self.executed
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Fetches, decodes and executes the instruction at `pc`.
    pub fn exec(&mut self) -> Result<Exec, Fault> {
        let addr = self.pc;
        let word = usize::try_from(addr)
            .ok()
            .and_then(|idx| self.rom.get(idx).copied())
            .ok_or(Fault::Segfault(addr))?;
        let (opcode, operand) = decode(word);
        let op = Op::try_from(opcode).map_err(|_| Fault::InvalidOpcode { pc: addr, opcode })?;
        let exec = Exec {
            addr,
            word,
            op,
            operand,
        };

        if op == Op::HALT {
            self.executed += 1;
            self.halted = true;
            return Ok(exec);
        }

        self.apply(op, operand)?;
        self.executed += 1;
        self.pc = self.pc.wrapping_add(1);

        if self.sp > STACK_LIMIT {
            return Err(Fault::StackOverflow(self.sp));
        }
        Ok(exec)
    }

    /// Runs until `HALT` or until `tmax` instructions have been executed.
    pub fn run(&mut self, tmax: Option<u64>) -> Result<(), Fault> {
        while !self.halted && tmax.map_or(true, |t| self.executed < t) {
            self.exec()?;
        }
        Ok(())
    }

    fn apply(&mut self, op: Op, operand: i32) -> Result<(), Fault> {
        let sp_rel = self.sp as i64 + operand as i64;
        let a_rel = self.a as i64 + operand as i64;
        match op {
            Op::LDC => {
                self.b = self.a;
                self.a = operand;
            }
            Op::ADC => self.a = self.a.wrapping_add(operand),
            Op::LDL => {
                self.b = self.a;
                self.a = self.get(sp_rel)?;
            }
            Op::STL => {
                self.set(sp_rel, self.a)?;
                self.a = self.b;
            }
            Op::LDNL => self.a = self.get(a_rel)?,
            Op::STNL => self.set(a_rel, self.b)?,
            Op::ADD => self.a = self.b.wrapping_add(self.a),
            Op::SUB => self.a = self.b.wrapping_sub(self.a),
            Op::SHL => self.a = self.b.wrapping_shl(self.a as u32),
            Op::SHR => self.a = self.b.wrapping_shr(self.a as u32),
            Op::ADJ => self.sp = self.sp.wrapping_add(operand),
            Op::A2SP => {
                self.sp = self.a;
                self.a = self.b;
            }
            Op::SP2A => {
                self.b = self.a;
                self.a = self.sp;
            }
            Op::CALL => {
                self.b = self.a;
                self.a = self.pc;
                self.pc = operand.wrapping_sub(1);
            }
            Op::RETURN => {
                self.pc = self.a;
                self.a = self.b;
            }
            Op::BRZ => {
                if self.a == 0 {
                    self.pc = self.pc.wrapping_add(operand);
                }
            }
            Op::BRLZ => {
                if self.a < 0 {
                    self.pc = self.pc.wrapping_add(operand);
                }
            }
            Op::BR => self.pc = self.pc.wrapping_add(operand),
            Op::HALT => {}
        }
        Ok(())
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word::encode;

    fn boot(program: &[(Op, i32)]) -> State {
        let words: Vec<u32> = program
            .iter()
            .map(|(op, operand)| encode(op.opcode(), *operand))
            .collect();
        let mut state = State::new();
        state.load(&words);
        state
    }

    #[test]
    fn ldc_moves_a_into_b() {
        let mut state = boot(&[(Op::LDC, 3), (Op::LDC, 4), (Op::ADD, 0), (Op::HALT, 0)]);
        state.run(None).unwrap();
        assert_eq!((state.a, state.b), (7, 3));
        assert_eq!(state.executed(), 4);
        assert!(state.is_halted());
        assert_eq!(state.pc, 3);
    }

    #[test]
    fn sub_and_shifts_use_b_as_left_operand() {
        let mut state = boot(&[(Op::LDC, 10), (Op::LDC, 3), (Op::SUB, 0), (Op::HALT, 0)]);
        state.run(None).unwrap();
        assert_eq!(state.a, 7);

        let mut state = boot(&[(Op::LDC, -16), (Op::LDC, 2), (Op::SHR, 0), (Op::HALT, 0)]);
        state.run(None).unwrap();
        assert_eq!(state.a, -4);

        let mut state = boot(&[(Op::LDC, 1), (Op::LDC, 4), (Op::SHL, 0), (Op::HALT, 0)]);
        state.run(None).unwrap();
        assert_eq!(state.a, 16);
    }

    #[test]
    fn stack_relative_store_and_load() {
        let mut state = boot(&[
            (Op::LDC, 100),
            (Op::A2SP, 0),
            (Op::LDC, 42),
            (Op::STL, 2),
            (Op::LDL, 2),
            (Op::HALT, 0),
        ]);
        state.run(None).unwrap();
        assert_eq!(state.sp, 100);
        assert_eq!(state.get(102), Ok(42));
        assert_eq!(state.a, 42);
    }

    #[test]
    fn non_local_store_and_load() {
        let mut state = boot(&[
            (Op::LDC, 9),
            (Op::LDC, 200),
            (Op::STNL, 1),
            (Op::LDC, 200),
            (Op::LDNL, 1),
            (Op::HALT, 0),
        ]);
        state.run(None).unwrap();
        assert_eq!(state.get(201), Ok(9));
        assert_eq!(state.a, 9);
    }

    #[test]
    fn branches_are_relative_to_next_instruction() {
        // 0: ldc 0 ; 1: brz +1 ; 2: ldc 5 ; 3: HALT
        let mut state = boot(&[(Op::LDC, 0), (Op::BRZ, 1), (Op::LDC, 5), (Op::HALT, 0)]);
        state.run(None).unwrap();
        assert_eq!(state.a, 0);
        assert_eq!(state.executed(), 3);

        let mut state = boot(&[(Op::LDC, -1), (Op::BRLZ, 1), (Op::LDC, 5), (Op::HALT, 0)]);
        state.run(None).unwrap();
        assert_eq!(state.a, -1);
    }

    #[test]
    fn call_and_return() {
        // 0: ldc 7 ; 1: call 3 ; 2: HALT ; 3: return
        let mut state = boot(&[(Op::LDC, 7), (Op::CALL, 3), (Op::HALT, 0), (Op::RETURN, 0)]);
        state.run(None).unwrap();
        assert_eq!(state.pc, 2);
        assert_eq!(state.a, 7);
        assert_eq!(state.executed(), 4);
    }

    #[test]
    fn data_words_are_memory() {
        let mut state = State::new();
        state.load(&[encode(Op::LDC.opcode(), 3), 0x0000_0005]);
        assert_eq!(state.get(1), Ok(5));
        assert_eq!(state.program_len(), 2);
    }

    #[test]
    fn faults() {
        let mut state = boot(&[(Op::LDC, 0)]);
        assert_eq!(state.run(None), Err(Fault::Segfault(1)));

        let mut state = boot(&[(Op::LDL, -1)]);
        assert_eq!(state.exec(), Err(Fault::MemoryAccess(-1)));

        let mut state = boot(&[(Op::ADJ, STACK_LIMIT - 1), (Op::ADJ, 2)]);
        assert!(state.exec().is_ok());
        assert_eq!(state.exec(), Err(Fault::StackOverflow(STACK_LIMIT + 1)));

        let mut state = State::new();
        state.load(&[0x0000_0013]);
        assert_eq!(
            state.exec(),
            Err(Fault::InvalidOpcode {
                pc: 0,
                opcode: 0x13
            })
        );
    }

    #[test]
    fn tmax_bounds_execution() {
        let mut state = boot(&[(Op::BR, -1)]);
        state.run(Some(10)).unwrap();
        assert_eq!(state.executed(), 10);
        assert!(!state.is_halted());
    }

    #[test]
    fn load_bytes_little_endian() {
        let mut state = State::new();
        state.load_bytes(&[0x12, 0x03, 0, 0, 0x05, 0x00]);
        assert_eq!(state.program_len(), 1);
        let exec = state.exec().unwrap();
        assert_eq!(exec.op, Op::HALT);
        assert_eq!(exec.word, 0x0000_0312);
        assert_eq!(exec.operand, 3);
    }
}
