/// A source line split into whitespace-delimited tokens, with the trailing
/// comment (if any) cut off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    pub tokens: Vec<&'a str>,
    pub comment: Option<String>,
}

pub struct LineLexer<'a> {
    raw: &'a str,
}

impl<'a> LineLexer<'a> {
    pub fn new(raw: &'a str) -> Self {
        LineLexer { raw }
    }

    /// Never fails. A `;` ends the token stream; a `:` inside a token splits
    /// it after the colon so `loop:ldc` lexes as `loop:` `ldc`.
    pub fn parse(self) -> Line<'a> {
        let mut tokens = vec![];
        for word in self.raw.split_whitespace() {
            let (word, comment) = match word.find(';') {
                Some(idx) => (&word[..idx], true),
                None => (word, false),
            };
            match word.find(':') {
                Some(idx) if idx + 1 < word.len() => {
                    tokens.push(&word[..=idx]);
                    tokens.push(&word[idx + 1..]);
                }
                _ if !word.is_empty() => tokens.push(word),
                _ => {}
            }
            if comment {
                break;
            }
        }

        let comment = self
            .raw
            .find(';')
            .map(|idx| self.raw[idx + 1..].trim_start_matches(' ').to_string())
            .filter(|text| !text.is_empty());

        Line { tokens, comment }
    }
}
