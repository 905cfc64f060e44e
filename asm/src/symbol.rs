use indexmap::IndexMap;

use crate::error::Error;
use crate::literal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    /// Referenced as an operand, not defined yet.
    Unresolved,
    Resolved { addr: u32, line: usize },
}

/// Labels in order of first sighting, plus every line that uses each one as
/// an operand.
#[derive(Debug, Default)]
pub struct Symbols {
    table: IndexMap<String, Symbol>,
    refs: IndexMap<String, Vec<usize>>,
}

impl Symbols {
    pub fn new() -> Self {
        Symbols::default()
    }

    pub fn define(&mut self, name: &str, line: usize, addr: u32) -> Result<(), Error> {
        if name.is_empty() {
            return Ok(());
        }
        if !literal::is_label(name) {
            return Err(Error::BogusLabel(name.to_string()));
        }
        match self.table.get_mut(name) {
            Some(Symbol::Resolved { .. }) => Err(Error::DuplicateDefinition(name.to_string())),
            Some(entry) => {
                *entry = Symbol::Resolved { addr, line };
                Ok(())
            }
            None => {
                self.table
                    .insert(name.to_string(), Symbol::Resolved { addr, line });
                Ok(())
            }
        }
    }

    /// A label operand is recorded and returned as-is for pass 2 to resolve;
    /// anything else must be a numeric literal and comes back in canonical
    /// decimal form.
    pub fn resolve_operand(&mut self, token: &str, line: usize) -> Option<String> {
        if literal::is_label(token) {
            self.refs.entry(token.to_string()).or_default().push(line);
            self.table
                .entry(token.to_string())
                .or_insert(Symbol::Unresolved);
            return Some(token.to_string());
        }
        literal::canonical(token)
    }

    pub fn get(&self, name: &str) -> Option<Symbol> {
        self.table.get(name).copied()
    }

    /// Address of a resolved label.
    pub fn addr(&self, name: &str) -> Option<u32> {
        match self.table.get(name) {
            Some(Symbol::Resolved { addr, .. }) => Some(*addr),
            _ => None,
        }
    }

    pub fn refs(&self, name: &str) -> &[usize] {
        self.refs.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Symbol)> {
        self.table.iter().map(|(name, sym)| (name.as_str(), *sym))
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
