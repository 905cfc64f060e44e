pub mod dump;
pub mod trace;

use arch::model::{Exec, State};

pub trait Hook {
    fn init(&mut self, state: State) -> State {
        state
    }
    fn exec(&mut self, time: u64, exec: Exec, state: State) -> State;
    fn fini(&mut self, state: State) -> State {
        state
    }
}
