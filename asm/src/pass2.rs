use arch::mnemonic::Mnemonic;
use arch::op::Arity;
use arch::word::{encode, fits_operand};

use crate::assembler::{Assembler, Record};
use crate::error::Error;
use crate::listing::{Entry, Listing};

impl Assembler {
    /// Encodes every record in address order. Must only run after a pass 1
    /// that reported no errors.
    pub fn pass2(&self) -> Result<Listing, Error> {
        let mut entries = Vec::with_capacity(self.records.len());
        for record in &self.records {
            let (word, truncated) = match record.mnemonic {
                Some(mnemonic) => {
                    let value = self.value(record, mnemonic)?;
                    match mnemonic.opcode() {
                        Some(opcode) => (Some(encode(opcode, value)), !fits_operand(value)),
                        // data / SET: the value itself, no opcode byte
                        None => (Some(value as u32), false),
                    }
                }
                None => (None, false),
            };
            entries.push(Entry {
                addr: record.addr,
                line: record.line,
                word,
                truncated,
                statement: statement(record),
            });
        }
        Ok(Listing { entries })
    }

    /// Operand value before packing.
    fn value(&self, record: &Record, mnemonic: Mnemonic) -> Result<i32, Error> {
        if mnemonic.opcode().is_none() {
            return literal_value(record);
        }
        let value = match mnemonic.arity() {
            Arity::None => 0,
            Arity::Offset => match self.symbols.addr(&record.operand) {
                Some(addr) => addr as i32 - (record.addr as i32 + 1),
                None => literal_value(record)?,
            },
            Arity::Value => match self.consts.get(&record.operand) {
                Some(value) => parse(value, record)?,
                None => match self.symbols.addr(&record.operand) {
                    Some(addr) => addr as i32,
                    None => literal_value(record)?,
                },
            },
        };
        Ok(value)
    }
}

fn literal_value(record: &Record) -> Result<i32, Error> {
    parse(&record.operand, record)
}

fn parse(text: &str, record: &Record) -> Result<i32, Error> {
    text.parse::<i32>().map_err(|_| Error::RuntimeOperand {
        operand: record.raw_operand.clone(),
        line: record.line,
    })
}

/// Source text rebuilt from the record, `label: mnemonic operand`.
fn statement(record: &Record) -> String {
    let mut parts = vec![];
    if let Some(label) = &record.label {
        parts.push(format!("{}:", label));
    }
    if let Some(mnemonic) = record.mnemonic {
        parts.push(mnemonic.name().to_string());
    }
    if !record.raw_operand.is_empty() {
        parts.push(record.raw_operand.clone());
    }
    parts.join(" ")
}
