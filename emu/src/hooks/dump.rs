use arch::model::{Exec, State};
use color_print::cprintln;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;

use crate::error::Error;

use super::Hook;

/// Memory dumps configured from YAML:
///
/// ```yaml
/// at:            # dumped after the instruction at this address runs
///   12: [{ base: 0x1000, count: 8 }]
/// halt:          # dumped once execution stops
///   - { base: 20, count: 4 }
/// ```
#[derive(Debug)]
pub struct Dump {
    file: Option<String>,
    list: List,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct List {
    #[serde(default)]
    at: HashMap<i32, Vec<Region>>,
    #[serde(default)]
    halt: Vec<Region>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct Region {
    base: i64,
    count: i64,
}

impl Dump {
    pub fn arg(file: Option<String>) -> Result<Self, Error> {
        match file {
            Some(fname) => {
                let file = File::open(&fname).map_err(|e| Error::FileOpen(fname.clone(), e))?;
                let list = parse(BufReader::new(file))
                    .map_err(|e| Error::Config(fname.clone(), e))?;
                Ok(Self {
                    file: Some(fname),
                    list,
                })
            }
            None => Ok(Self {
                file: None,
                list: List::default(),
            }),
        }
    }
}

fn parse(reader: impl std::io::Read) -> Result<List, serde_yaml::Error> {
    serde_yaml::from_reader(reader)
}

impl Hook for Dump {
    fn init(&mut self, state: State) -> State {
        if let Some(fname) = &self.file {
            println!(
                " * Dump[{}+{}] {:?}",
                self.list.at.len(),
                self.list.halt.len(),
                fname
            );
        }
        state
    }

    fn exec(&mut self, _time: u64, exec: Exec, state: State) -> State {
        if let Some(regions) = self.list.at.get(&exec.addr) {
            for region in regions {
                print_region(&state, region);
            }
        }
        state
    }

    fn fini(&mut self, state: State) -> State {
        for region in &self.list.halt {
            print_region(&state, region);
        }
        state
    }
}

/// Four words per row, prefixed by the row's base address. The first
/// address outside memory ends the dump.
fn rows(state: &State, region: &Region) -> Vec<String> {
    let mut rows = vec![];
    let mut addr = region.base;
    let end = region.base.saturating_add(region.count);
    while addr < end {
        let words: Result<Vec<i32>, _> = (addr..addr.saturating_add(4))
            .map(|a| state.get(a))
            .collect();
        match words {
            Ok(words) => rows.push(format!(
                "{:08X} {:08X} {:08X} {:08X} {:08X}",
                addr, words[0], words[1], words[2], words[3]
            )),
            Err(fault) => {
                rows.push(format!("{}", fault));
                break;
            }
        }
        addr = addr.saturating_add(4);
    }
    rows
}

fn print_region(state: &State, region: &Region) {
    cprintln!(
        " <c>dump</> base=0x{:08X} count={}",
        region.base,
        region.count
    );
    for row in rows(state, region) {
        println!(" | {}", row);
    }
}
