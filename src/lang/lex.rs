/// Remove comments and surrounding whitespace from one line of source.
/// Returns `None` when nothing executable remains.
pub fn strip_comment(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
        return None;
    }
    match trimmed.find(';') {
        Some(index) => Some(trimmed[..index].trim_end()),
        None => Some(trimmed),
    }
}

/// Split a line into its command followed by operands.
///
/// Words are separated by whitespace. A word opening a quoted string keeps
/// absorbing words until one closes the quote, and a word opening a `{`
/// keeps absorbing words until the braces balance. A grouped operand is
/// the source text it spans, whitespace included. Either kind runs to the
/// end of the line when it is never closed.
pub fn lex(s: &str) -> Vec<String> {
    let mut spans = word_spans(s).into_iter();
    let mut out = vec![];
    if let Some((start, end)) = spans.next() {
        out.push(s[start..end].to_string());
    }
    while let Some((start, mut end)) = spans.next() {
        let word = &s[start..end];
        if word.starts_with('"') {
            if !(word.len() > 1 && word.ends_with('"')) {
                for (_, next_end) in &mut spans {
                    end = next_end;
                    if s[..end].ends_with('"') {
                        break;
                    }
                }
            }
        } else if word.starts_with('{') {
            let mut braces = Braces::default();
            braces.scan(word);
            while !braces.balanced() {
                match spans.next() {
                    Some((next_start, next_end)) => {
                        braces.scan(&s[next_start..next_end]);
                        end = next_end;
                    }
                    None => break,
                }
            }
        }
        out.push(s[start..end].to_string());
    }
    out
}

/// Everything after the command word, as written.
pub fn remainder(s: &str) -> &str {
    match word_spans(s).first() {
        Some(&(_, end)) => s[end..].trim(),
        None => "",
    }
}

/// Byte ranges of the whitespace separated words of `s`.
fn word_spans(s: &str) -> Vec<(usize, usize)> {
    let mut spans = vec![];
    let mut start = None;
    for (index, ch) in s.char_indices() {
        match (ch.is_whitespace(), start) {
            (true, Some(word_start)) => {
                spans.push((word_start, index));
                start = None;
            }
            (false, None) => start = Some(index),
            _ => {}
        }
    }
    if let Some(word_start) = start {
        spans.push((word_start, s.len()));
    }
    spans
}

#[derive(Default)]
struct Braces {
    depth: usize,
    in_string: bool,
    escaped: bool,
}

impl Braces {
    fn scan(&mut self, s: &str) {
        for ch in s.chars() {
            if self.in_string {
                if self.escaped {
                    self.escaped = false;
                } else if ch == '\\' {
                    self.escaped = true;
                } else if ch == '"' {
                    self.in_string = false;
                }
                continue;
            }
            match ch {
                '"' => self.in_string = true,
                '{' | '[' => self.depth += 1,
                '}' | ']' => self.depth = self.depth.saturating_sub(1),
                _ => {}
            }
        }
    }

    fn balanced(&self) -> bool {
        self.depth == 0 && !self.in_string
    }
}

/// Decimal floating point literal: optional sign, digits with an optional
/// fraction, optional exponent. Spellings like `inf` or `NaN` are not numbers.
pub fn is_float(s: &str) -> bool {
    let mut chars = s.chars().peekable();
    if let Some('+') | Some('-') = chars.peek() {
        chars.next();
    }
    let mut digits = 0;
    while let Some(c) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        digits += 1;
        chars.next();
    }
    if let Some('.') = chars.peek() {
        chars.next();
        while let Some(c) = chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            digits += 1;
            chars.next();
        }
    }
    if digits == 0 {
        return false;
    }
    if let Some('e') | Some('E') = chars.peek() {
        chars.next();
        if let Some('+') | Some('-') = chars.peek() {
            chars.next();
        }
        let mut exp_digits = 0;
        while let Some(c) = chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            exp_digits += 1;
            chars.next();
        }
        if exp_digits == 0 {
            return false;
        }
    }
    chars.next().is_none()
}

pub fn parse_float(s: &str) -> Option<f64> {
    if is_float(s) {
        s.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_comment() {
        assert_eq!(strip_comment("   "), None);
        assert_eq!(strip_comment("# whole line"), None);
        assert_eq!(strip_comment("  ; whole line"), None);
        assert_eq!(strip_comment("  mov rg0 1 ; note"), Some("mov rg0 1"));
        assert_eq!(strip_comment("\tprintreg\t"), Some("printreg"));
    }

    #[test]
    fn test_lex_plain_words() {
        assert_eq!(lex("add  rg0\t3 rg1"), vec!["add", "rg0", "3", "rg1"]);
        assert!(lex("").is_empty());
    }

    #[test]
    fn test_lex_quoted_string() {
        assert_eq!(
            lex(r#"mov rg0 "hello   big world""#),
            vec!["mov", "rg0", r#""hello   big world""#]
        );
        assert_eq!(
            lex(r#"cmp "a b" "c" rg2"#),
            vec!["cmp", r#""a b""#, r#""c""#, "rg2"]
        );
        assert_eq!(lex(r#"mov rg0 "open to end"#), vec!["mov", "rg0", "\"open to end"]);
        assert_eq!(lex(r#"mov rg0 " x""#), vec!["mov", "rg0", r#"" x""#]);
        assert_eq!(lex("mov rg0 \"a\t b\""), vec!["mov", "rg0", "\"a\t b\""]);
    }

    #[test]
    fn test_remainder_is_verbatim() {
        assert_eq!(remainder(r#"print "a   b"  "#), r#""a   b""#);
        assert_eq!(remainder("println\tx"), "x");
        assert_eq!(remainder("printreg"), "");
        assert_eq!(remainder(""), "");
    }

    #[test]
    fn test_lex_json() {
        assert_eq!(
            lex(r#"mov rg0 {"a": {"b": [1, 2]}}"#),
            vec!["mov", "rg0", r#"{"a": {"b": [1, 2]}}"#]
        );
        assert_eq!(
            lex(r#"cmp {"k": "}"} rg1 rg2"#),
            vec!["cmp", r#"{"k": "}"}"#, "rg1", "rg2"]
        );
        assert_eq!(lex(r#"mov rg0 {"a": 1"#), vec!["mov", "rg0", r#"{"a": 1"#]);
    }

    #[test]
    fn test_is_float() {
        for s in &["0", "-3", "+2.5", "1.", ".5", "1e5", "2.5E-3", "007"] {
            assert!(is_float(s), "{}", s);
        }
        for s in &["", ".", "-", "e5", "1e", "inf", "NaN", "1.2.3", "0x10", "12a", "rg0"] {
            assert!(!is_float(s), "{}", s);
        }
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(parse_float("-.5"), Some(-0.5));
        assert_eq!(parse_float("1e3"), Some(1000.0));
        assert_eq!(parse_float("infinity"), None);
    }
}
