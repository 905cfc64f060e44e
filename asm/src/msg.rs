use std::fmt::Write;

use crate::error::Error;

#[derive(Debug)]
pub struct Msg {
    pub line: usize,
    pub error: Error,
}

/// Errors and warnings in discovery order. Reports are always sorted by line.
#[derive(Debug, Default)]
pub struct Msgs {
    errors: Vec<Msg>,
    warnings: Vec<Msg>,
}

impl Msgs {
    pub fn new() -> Self {
        Msgs::default()
    }

    pub fn error(&mut self, line: usize, error: Error) {
        self.errors.push(Msg { line, error });
    }

    pub fn warn(&mut self, line: usize, error: Error) {
        self.warnings.push(Msg { line, error });
    }

    pub fn has_error(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> Vec<&Msg> {
        sorted(&self.errors)
    }

    pub fn warnings(&self) -> Vec<&Msg> {
        sorted(&self.warnings)
    }

    /// Log file text: every error, or a success line followed by every
    /// warning.
    pub fn log(&self) -> String {
        let mut out = String::new();
        if self.has_error() {
            for msg in self.errors() {
                let _ = writeln!(out, "Line Number:- {} ERROR:- {}", msg.line, msg.error);
            }
        } else {
            out.push_str("No errors found!!\n");
            for msg in self.warnings() {
                let _ = writeln!(out, "Line Number:- {} WARNING:- {}", msg.line, msg.error);
            }
        }
        out
    }

    /// Prints the same selection as [`Msgs::log`] with source context.
    pub fn dump(&self, file: &str, source: &[String]) {
        let content = |line: usize| {
            source
                .get(line.wrapping_sub(1))
                .map(String::as_str)
                .unwrap_or("")
        };
        if self.has_error() {
            for msg in self.errors() {
                msg.error.print_diag(file, msg.line, content(msg.line));
            }
        } else {
            for msg in self.warnings() {
                msg.error.print_warn(file, msg.line, content(msg.line));
            }
        }
    }
}

fn sorted(msgs: &[Msg]) -> Vec<&Msg> {
    let mut msgs: Vec<&Msg> = msgs.iter().collect();
    msgs.sort_by_key(|msg| msg.line);
    msgs
}
