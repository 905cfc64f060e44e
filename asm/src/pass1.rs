use arch::mnemonic::Mnemonic;
use arch::op::Arity;

use crate::assembler::{Assembler, Record};
use crate::error::Error;
use crate::lexer::LineLexer;
use crate::symbol::Symbol;

impl Assembler {
    /// Defines labels, validates every line and assigns addresses to the
    /// valid instructions. Problems are collected in `msgs`, never returned.
    pub fn pass1<'a>(&mut self, lines: impl IntoIterator<Item = &'a str>) {
        let mut pc: u32 = 0;
        for (idx, raw) in lines.into_iter().enumerate() {
            let line_no = idx + 1;
            self.source.push(raw.to_string());
            if self.line(line_no, raw, pc) {
                pc += 1;
            }
        }
        self.check_labels();
    }

    /// Returns whether the line produced an instruction word.
    fn line(&mut self, line_no: usize, raw: &str, pc: u32) -> bool {
        let parsed = LineLexer::new(raw).parse();
        if let Some(comment) = parsed.comment {
            self.comments.push((line_no, comment));
        }

        let mut tokens = parsed.tokens.into_iter().peekable();
        if tokens.peek().is_none() {
            return false;
        }
        let label = tokens
            .next_if(|tok| tok.ends_with(':'))
            .map(|tok| tok[..tok.len() - 1].to_string());
        let mnemonic = tokens.next();
        let operand = tokens.next().unwrap_or_default();
        let extra = tokens.count();

        if let Some(label) = &label {
            if let Err(err) = self.symbols.define(label, line_no, pc) {
                self.msgs.error(line_no, err);
            }
        }

        let Some(name) = mnemonic else {
            // Label on its own line: keeps its listing line, takes no address.
            self.records.push(Record {
                addr: pc,
                line: line_no,
                label,
                mnemonic: None,
                operand: String::new(),
                raw_operand: String::new(),
            });
            return false;
        };

        let Some(mnemonic) = Mnemonic::parse(name) else {
            self.msgs.error(line_no, Error::BogusMnemonic(name.to_string()));
            return false;
        };

        let resolved = match (mnemonic.arity(), operand.is_empty()) {
            (Arity::None, false) => Err(Error::UnexpectedOperand),
            (Arity::None, true) => Ok(String::new()),
            (_, true) => Err(Error::MissingOperand),
            (_, false) if extra > 0 => Err(Error::ExtraOnEndOfLine),
            (_, false) => self
                .symbols
                .resolve_operand(operand, line_no)
                .ok_or_else(|| Error::InvalidOperandFormat(operand.to_string())),
        };
        let resolved = match resolved {
            Ok(resolved) => resolved,
            Err(err) => {
                self.msgs.error(line_no, err);
                return false;
            }
        };

        if mnemonic == Mnemonic::Set {
            match &label {
                Some(name) if !name.is_empty() => {
                    self.consts
                        .entry(name.clone())
                        .or_insert_with(|| resolved.clone());
                }
                _ => self.msgs.error(line_no, Error::MissingLabelOrVariableName),
            }
        }

        self.records.push(Record {
            addr: pc,
            line: line_no,
            label,
            mnemonic: Some(mnemonic),
            operand: resolved,
            raw_operand: operand.to_string(),
        });
        true
    }

    /// Undefined labels are reported at every use; defined but unused ones
    /// get a warning at their definition.
    fn check_labels(&mut self) {
        let mut errors = vec![];
        let mut warnings = vec![];
        for (name, symbol) in self.symbols.iter() {
            let refs = self.symbols.refs(name);
            match symbol {
                Symbol::Unresolved => {
                    for line in refs {
                        errors.push((*line, Error::NoSuchLabel(name.to_string())));
                    }
                }
                Symbol::Resolved { line, .. } if refs.is_empty() => {
                    warnings.push((line, Error::UnusedLabel(name.to_string())));
                }
                Symbol::Resolved { .. } => {}
            }
        }
        for (line, err) in errors {
            self.msgs.error(line, err);
        }
        for (line, err) in warnings {
            self.msgs.warn(line, err);
        }
    }
}
