use arch::model::{Exec, State};
use color_print::cprintln;

use super::Hook;

/// Prints each executed instruction followed by the register file.
#[derive(Debug)]
pub struct Trace {
    enabled: bool,
}

impl Trace {
    pub fn arg(enabled: bool) -> Self {
        Trace { enabled }
    }
}

impl Hook for Trace {
    fn init(&mut self, state: State) -> State {
        if self.enabled {
            println!(" * Trace");
        }
        state
    }

    fn exec(&mut self, time: u64, exec: Exec, state: State) -> State {
        if self.enabled {
            cprintln!(
                "[{:0>6}] <dim>{:08X} {:08X}</> {}",
                time,
                exec.addr,
                exec.word,
                exec.op.cformat(exec.operand)
            );
            println!("         {}", registers(&state));
        }
        state
    }
}

pub fn registers(state: &State) -> String {
    format!(
        "A = {:08X}, B = {:08X}, PC = {:08X}, SP = {:08X}",
        state.a, state.b, state.pc, state.sp
    )
}
