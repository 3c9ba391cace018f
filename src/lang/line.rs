use super::lex::*;

/// One executable source line and the file line number it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    number: usize,
    text: String,
    words: Vec<String>,
}

impl Line {
    /// Build a line from raw source text. Comments and blank lines give `None`.
    pub fn from_str(number: usize, s: &str) -> Option<Line> {
        let text = strip_comment(s)?;
        Some(Line {
            number,
            text: text.to_string(),
            words: lex(text),
        })
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn command(&self) -> &str {
        match self.words.first() {
            Some(command) => command,
            None => "",
        }
    }

    pub fn operands(&self) -> &[String] {
        if self.words.is_empty() {
            &[]
        } else {
            &self.words[1..]
        }
    }

    /// The source text after the command, spacing preserved.
    pub fn remainder(&self) -> &str {
        remainder(&self.text)
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
