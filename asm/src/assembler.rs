use arch::mnemonic::Mnemonic;
use indexmap::IndexMap;

use crate::error::Error;
use crate::listing::Listing;
use crate::msg::Msgs;
use crate::symbol::Symbols;

/// A source line that survived pass 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub addr: u32,
    /// 1-based source line.
    pub line: usize,
    pub label: Option<String>,
    /// `None` for a line holding only a label.
    pub mnemonic: Option<Mnemonic>,
    /// Label name or canonical decimal literal.
    pub operand: String,
    /// Operand as written.
    pub raw_operand: String,
}

/// State of one assembly run. Pass 1 fills everything; pass 2 only reads.
#[derive(Debug, Default)]
pub struct Assembler {
    pub source: Vec<String>,
    pub symbols: Symbols,
    /// `SET` bindings, name to canonical value.
    pub consts: IndexMap<String, String>,
    pub records: Vec<Record>,
    pub comments: Vec<(usize, String)>,
    pub msgs: Msgs,
}

impl Assembler {
    pub fn new() -> Self {
        Assembler::default()
    }

    pub fn comment(&self, line: usize) -> Option<&str> {
        self.comments
            .iter()
            .find(|(l, _)| *l == line)
            .map(|(_, text)| text.as_str())
    }
}

/// Result of a complete run.
#[derive(Debug)]
pub struct Assembly {
    pub assembler: Assembler,
    /// `None` when pass 1 reported errors.
    pub listing: Option<Listing>,
}

/// Runs both passes over `source`. Diagnostics never make this fail; only an
/// operand that pass 2 cannot encode does.
pub fn assemble(source: &str) -> Result<Assembly, Error> {
    let mut assembler = Assembler::new();
    assembler.pass1(source.lines());
    let listing = match assembler.msgs.has_error() {
        true => None,
        false => Some(assembler.pass2()?),
    };
    Ok(Assembly {
        assembler,
        listing,
    })
}
