use color_print::cprintln;
use thiserror::Error;

/// Everything that can go wrong while assembling. The display text of the
/// diagnostic variants is what ends up in the log file.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Bogus Label name")]
    BogusLabel(String),

    #[error("Duplicate label definition")]
    DuplicateDefinition(String),

    #[error("no such label")]
    NoSuchLabel(String),

    #[error("Bogus Mnemonic")]
    BogusMnemonic(String),

    #[error("Missing operand")]
    MissingOperand,

    #[error("Extra on end of line")]
    ExtraOnEndOfLine,

    #[error("Invalid format: not a valid label or a number")]
    InvalidOperandFormat(String),

    #[error("Unexpected operand")]
    UnexpectedOperand,

    #[error("label(or variable) name missing")]
    MissingLabelOrVariableName,

    #[error("Label declared but not used")]
    UnusedLabel(String),

    // Fatal: pass 1 accepted an operand that pass 2 cannot turn into a word.
    #[error("Cannot encode operand `{operand}` at line {line}")]
    RuntimeOperand { operand: String, line: usize },

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to create file: {0}")]
    FileCreate(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),
}

impl Error {
    /// The source token the diagnostic is about, if any.
    pub fn subject(&self) -> Option<&str> {
        match self {
            Error::BogusLabel(s)
            | Error::DuplicateDefinition(s)
            | Error::NoSuchLabel(s)
            | Error::BogusMnemonic(s)
            | Error::InvalidOperandFormat(s)
            | Error::UnusedLabel(s) => Some(s),
            Error::RuntimeOperand { operand, .. } => Some(operand),
            _ => None,
        }
    }

    /// Print error with the file location and line content
    pub fn print_diag(&self, file: &str, line_num: usize, line_content: &str) {
        cprintln!("<red,bold>error</>: {}", self);
        print_location(file, line_num, line_content, self.subject());
    }

    pub fn print_warn(&self, file: &str, line_num: usize, line_content: &str) {
        cprintln!("<yellow,bold>warn</>: {}", self);
        print_location(file, line_num, line_content, self.subject());
    }
}

fn print_location(file: &str, line_num: usize, line_content: &str, subject: Option<&str>) {
    cprintln!("     <blue>--></> <underline>{}:{}</>", file, line_num);
    cprintln!("      <blue>|</>");
    cprintln!(" <blue>{:>4} |</> {}", line_num, line_content);
    match subject.and_then(|s| line_content.find(s).map(|col| (col, s.len()))) {
        Some((col, len)) if len > 0 => {
            cprintln!(
                "      <blue>|</> {}<red,bold>{}</>",
                " ".repeat(col),
                "^".repeat(len)
            );
        }
        _ => cprintln!("      <blue>|</>"),
    }
}
