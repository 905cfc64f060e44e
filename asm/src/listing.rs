use std::fmt;

use color_print::cformat;

use crate::assembler::Assembler;
use crate::literal::to_hex8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub addr: u32,
    pub line: usize,
    /// `None` for label-only lines.
    pub word: Option<u32>,
    /// The operand did not fit the 24-bit field and lost its high bits.
    pub truncated: bool,
    pub statement: String,
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self.word {
            Some(word) => to_hex8(word as i32),
            None => " ".repeat(8),
        };
        write!(f, "{} {} {}", to_hex8(self.addr as i32), word, self.statement)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub entries: Vec<Entry>,
}

impl Listing {
    /// The object stream, in address order.
    pub fn words(&self) -> Vec<u32> {
        self.entries.iter().filter_map(|entry| entry.word).collect()
    }

    pub fn truncated(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|entry| entry.truncated)
    }

    /// Object file contents: each word as four little-endian bytes.
    pub fn object(&self) -> Vec<u8> {
        self.words()
            .into_iter()
            .flat_map(|word| word.to_le_bytes())
            .collect()
    }

    /// Listing file contents, one entry per line.
    pub fn text(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("{}\n", entry))
            .collect()
    }

    /// Source rebuilt from the listing statements.
    pub fn source(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("{}\n", entry.statement))
            .collect()
    }
}

pub fn print_dump(asm: &Assembler, listing: &Listing) {
    println!("----------------+-----------------------------------------------------");
    for (idx, raw) in asm.source.iter().enumerate() {
        let line_num = idx + 1;
        let comment_str = asm
            .comment(line_num)
            .map(|s| cformat!("<dim>; {}</>", s))
            .unwrap_or_default();
        let entry = listing.entries.iter().find(|entry| entry.line == line_num);
        let body = match entry {
            Some(entry) => {
                let bin_str = match entry.word {
                    Some(word) if entry.truncated => cformat!("<red,bold>{:08X}</>", word),
                    Some(word) => cformat!("<y>{:08X}</>", word),
                    None => " ".repeat(8),
                };
                let mark = match entry.truncated {
                    true => cformat!("<red,bold>!</>"),
                    false => " ".to_string(),
                };
                format!(
                    "[{:04X}] {}{}| {:>4}: {} {}",
                    entry.addr,
                    bin_str,
                    mark,
                    line_num,
                    cformat_statement(&entry.statement),
                    comment_str
                )
            }
            None if raw.trim_start().starts_with(';') || raw.trim().is_empty() => {
                format!("{:16}| {:>4}: {}", "", line_num, comment_str)
            }
            None => format!("{:16}| {:>4}: {}", "", line_num, raw.trim()),
        };
        println!("{}", body);
    }
    println!("----------------+-----------------------------------------------------");
}

fn cformat_statement(statement: &str) -> String {
    let mut words = statement.split(' ').peekable();
    let label = words
        .next_if(|w| w.ends_with(':'))
        .map(|w| cformat!("<g>{}</> ", w))
        .unwrap_or_default();
    let mnemonic = words
        .next()
        .map(|w| cformat!("<r>{:<6}</>", w))
        .unwrap_or_default();
    let operand = words
        .next()
        .map(|w| cformat!(" <b>{}</>", w))
        .unwrap_or_default();
    format!("{}{}{}", label, mnemonic, operand)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_format() {
        let entry = Entry {
            addr: 3,
            line: 5,
            word: Some(0xFFFF_FE11),
            truncated: false,
            statement: "loop: br loop".to_string(),
        };
        assert_eq!(entry.to_string(), "00000003 FFFFFE11 loop: br loop");

        let label_only = Entry {
            addr: 4,
            line: 6,
            word: None,
            truncated: false,
            statement: "end:".to_string(),
        };
        assert_eq!(label_only.to_string(), "00000004          end:");
    }

    #[test]
    fn object_is_little_endian() {
        let listing = Listing {
            entries: vec![
                Entry {
                    addr: 0,
                    line: 1,
                    word: Some(0x0000_0312),
                    truncated: false,
                    statement: String::new(),
                },
                Entry {
                    addr: 1,
                    line: 2,
                    word: None,
                    truncated: false,
                    statement: String::new(),
                },
            ],
        };
        assert_eq!(listing.object(), vec![0x12, 0x03, 0x00, 0x00]);
    }
}
