//! Parsing of one source line of the form
//! `(book_id, chapter, verse, "text"),`.
//!
//! The line is read with a small literal grammar (numbers, quoted strings,
//! `True`/`False`/`None`, tuples and lists) and never evaluated.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid literal at column {column}: {message}")]
    Syntax { column: usize, message: String },

    #[error("expected a tuple, got {found}")]
    NotATuple { found: &'static str },

    #[error("expected 4 elements in tuple, got {0}")]
    Arity(usize),

    #[error("{field} must be {expected}, got {found}")]
    FieldType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: i64 },
}

/// Parses one physical line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Record>, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let line = line.strip_suffix(',').unwrap_or(line);

    let value = parse_literal(line)?;
    let items = match value {
        Literal::Tuple(items) => items,
        other => {
            return Err(ParseError::NotATuple {
                found: other.kind(),
            });
        }
    };
    let [_book_id, chapter, verse, text] =
        <[Literal; 4]>::try_from(items).map_err(|items| ParseError::Arity(items.len()))?;

    let chapter = positive(chapter, "chapter_number")?;
    let verse = positive(verse, "verse_number")?;
    let text = match text {
        Literal::Str(text) => text,
        other => {
            return Err(ParseError::FieldType {
                field: "verse_text",
                expected: "str",
                found: other.kind(),
            });
        }
    };

    Ok(Some(Record {
        chapter,
        verse,
        text,
    }))
}

fn positive(value: Literal, field: &'static str) -> Result<u32, ParseError> {
    match value {
        Literal::Int(n) if n > 0 => {
            u32::try_from(n).map_err(|_| ParseError::FieldType {
                field,
                expected: "a 32-bit int",
                found: "int",
            })
        }
        Literal::Int(n) => Err(ParseError::NotPositive { field, value: n }),
        other => Err(ParseError::FieldType {
            field,
            expected: "int",
            found: other.kind(),
        }),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    None,
    Tuple(Vec<Literal>),
    List(Vec<Literal>),
}

impl Literal {
    pub fn kind(&self) -> &'static str {
        match self {
            Literal::Int(_) => "int",
            Literal::Float(_) => "float",
            Literal::Str(_) => "str",
            Literal::Bool(_) => "bool",
            Literal::None => "NoneType",
            Literal::Tuple(_) => "tuple",
            Literal::List(_) => "list",
        }
    }
}

const MAX_DEPTH: usize = 100;

/// Parses a whole input as one literal. A top-level comma sequence without
/// parentheses is a tuple.
pub fn parse_literal(input: &str) -> Result<Literal, ParseError> {
    let mut parser = Parser {
        src: input,
        pos: 0,
        depth: 0,
    };
    parser.skip_ws();
    if parser.at_end() {
        return Err(parser.error("empty input"));
    }

    let first = parser.expr()?;
    parser.skip_ws();
    let value = if parser.peek() == Some(',') {
        let mut items = vec![first];
        while parser.eat(',') {
            parser.skip_ws();
            if parser.at_end() {
                break;
            }
            items.push(parser.expr()?);
            parser.skip_ws();
        }
        Literal::Tuple(items)
    } else {
        first
    };

    parser.skip_ws();
    if !parser.at_end() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(value)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.src[self.pos..].chars().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::Syntax {
            column: self.src[..self.pos].chars().count() + 1,
            message: message.into(),
        }
    }

    /// Every nested tuple, list or sign goes through here, so `depth` bounds
    /// the recursion.
    fn expr(&mut self) -> Result<Literal, ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        self.depth += 1;
        let value = self.operand();
        self.depth -= 1;
        value
    }

    fn operand(&mut self) -> Result<Literal, ParseError> {
        self.skip_ws();
        match self.peek() {
            Some('(') => self.paren(),
            Some('[') => self.list(),
            Some('"' | '\'') => self.strings(false),
            Some('-' | '+') => self.signed(),
            Some(c) if c.is_ascii_digit() || c == '.' => self.number(),
            Some(c) if c.is_alphabetic() || c == '_' => self.name(),
            Some(c) => Err(self.error(format!("unexpected character {c:?}"))),
            None => Err(self.error("unexpected end of input")),
        }
    }

    /// `(x)` is `x`; `()`, `(x,)` and `(x, y)` are tuples.
    fn paren(&mut self) -> Result<Literal, ParseError> {
        self.bump();
        self.skip_ws();
        if self.eat(')') {
            return Ok(Literal::Tuple(Vec::new()));
        }

        let first = self.expr()?;
        self.skip_ws();
        if self.eat(')') {
            return Ok(first);
        }
        if self.peek() != Some(',') {
            return Err(self.error("expected ',' or ')'"));
        }

        let mut items = vec![first];
        self.sequence(')', &mut items)?;
        Ok(Literal::Tuple(items))
    }

    fn list(&mut self) -> Result<Literal, ParseError> {
        self.bump();
        self.skip_ws();
        let mut items = Vec::new();
        if self.eat(']') {
            return Ok(Literal::List(items));
        }
        items.push(self.expr()?);
        self.skip_ws();
        if self.eat(']') {
            return Ok(Literal::List(items));
        }
        if self.peek() != Some(',') {
            return Err(self.error("expected ',' or ']'"));
        }
        self.sequence(']', &mut items)?;
        Ok(Literal::List(items))
    }

    /// Continues a sequence positioned at a `,` after its first item,
    /// consuming the closing delimiter.
    fn sequence(&mut self, close: char, items: &mut Vec<Literal>) -> Result<(), ParseError> {
        while self.eat(',') {
            self.skip_ws();
            if self.eat(close) {
                return Ok(());
            }
            items.push(self.expr()?);
            self.skip_ws();
        }
        if self.eat(close) {
            Ok(())
        } else {
            Err(self.error(format!("expected ',' or '{close}'")))
        }
    }

    fn signed(&mut self) -> Result<Literal, ParseError> {
        let negative = self.bump() == Some('-');
        match self.expr()? {
            Literal::Int(n) if negative => Ok(Literal::Int(-n)),
            Literal::Float(x) if negative => Ok(Literal::Float(-x)),
            value @ (Literal::Int(_) | Literal::Float(_)) => Ok(value),
            other => Err(self.error(format!("unary sign applied to {}", other.kind()))),
        }
    }

    fn number(&mut self) -> Result<Literal, ParseError> {
        let start = self.pos;

        if self.peek() == Some('0')
            && let Some(radix) = match self.peek_second() {
                Some('x' | 'X') => Some(16),
                Some('o' | 'O') => Some(8),
                Some('b' | 'B') => Some(2),
                _ => None,
            }
        {
            self.pos += 2;
            let digits_start = self.pos;
            while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
                self.bump();
            }
            let digits = self.src[digits_start..self.pos].replace('_', "");
            let src = self.src;
            let text = &src[start..self.pos];
            return i64::from_str_radix(&digits, radix)
                .map(Literal::Int)
                .map_err(|_| self.error(format!("invalid integer {text:?}")));
        }

        let mut is_float = false;
        self.digits();
        if self.peek() == Some('.') {
            is_float = true;
            self.bump();
            self.digits();
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            is_float = true;
            self.bump();
            if matches!(self.peek(), Some('+' | '-')) {
                self.bump();
            }
            self.digits();
        }
        if self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            return Err(self.error("invalid number suffix"));
        }

        let src = self.src;
        let text = &src[start..self.pos];
        let cleaned = text.replace('_', "");
        if is_float {
            return cleaned
                .parse::<f64>()
                .map(Literal::Float)
                .map_err(|_| self.error(format!("invalid float {text:?}")));
        }
        if cleaned.len() > 1 && cleaned.starts_with('0') && cleaned.chars().any(|c| c != '0') {
            return Err(self.error("leading zeros in decimal integer literal"));
        }
        cleaned
            .parse::<i64>()
            .map(Literal::Int)
            .map_err(|_| self.error(format!("integer out of range {text:?}")))
    }

    fn digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit() || c == '_') {
            self.bump();
        }
    }

    fn name(&mut self) -> Result<Literal, ParseError> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.bump();
        }
        let src = self.src;
        let word = &src[start..self.pos];

        if matches!(self.peek(), Some('"' | '\'')) {
            match word {
                "r" | "R" => return self.strings(true),
                "u" | "U" => return self.strings(false),
                _ => {}
            }
        }

        match word {
            "True" => Ok(Literal::Bool(true)),
            "False" => Ok(Literal::Bool(false)),
            "None" => Ok(Literal::None),
            _ => {
                self.pos = start;
                Err(self.error(format!("unsupported name {word:?}")))
            }
        }
    }

    /// One string literal followed by any adjacent ones, concatenated.
    fn strings(&mut self, raw: bool) -> Result<Literal, ParseError> {
        let mut out = self.string(raw)?;
        loop {
            let save = self.pos;
            self.skip_ws();
            match (self.peek(), self.peek_second()) {
                (Some('"' | '\''), _) => out.push_str(&self.string(false)?),
                (Some('r' | 'R'), Some('"' | '\'')) => {
                    self.bump();
                    out.push_str(&self.string(true)?);
                }
                (Some('u' | 'U'), Some('"' | '\'')) => {
                    self.bump();
                    out.push_str(&self.string(false)?);
                }
                _ => {
                    self.pos = save;
                    return Ok(Literal::Str(out));
                }
            }
        }
    }

    fn string(&mut self, raw: bool) -> Result<String, ParseError> {
        let start = self.pos;
        let Some(quote) = self.bump() else {
            return Err(self.error("expected string"));
        };

        let mut out = String::new();
        loop {
            let Some(c) = self.bump() else {
                self.pos = start;
                return Err(self.error("unterminated string literal"));
            };
            if c == quote {
                return Ok(out);
            }
            if c != '\\' {
                out.push(c);
                continue;
            }

            let Some(escaped) = self.bump() else {
                self.pos = start;
                return Err(self.error("unterminated string literal"));
            };
            if raw {
                out.push('\\');
                out.push(escaped);
                continue;
            }
            match escaped {
                '\\' | '\'' | '"' => out.push(escaped),
                'n' => out.push('\n'),
                't' => out.push('\t'),
                'r' => out.push('\r'),
                'a' => out.push('\u{07}'),
                'b' => out.push('\u{08}'),
                'f' => out.push('\u{0c}'),
                'v' => out.push('\u{0b}'),
                'x' => out.push(self.hex_escape(2)?),
                'u' => out.push(self.hex_escape(4)?),
                'U' => out.push(self.hex_escape(8)?),
                '0'..='7' => {
                    let mut code = escaped.to_digit(8).unwrap_or(0);
                    for _ in 0..2 {
                        match self.peek().and_then(|c| c.to_digit(8)) {
                            Some(d) => {
                                code = code * 8 + d;
                                self.bump();
                            }
                            None => break,
                        }
                    }
                    out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
                }
                other => {
                    out.push('\\');
                    out.push(other);
                }
            }
        }
    }

    fn hex_escape(&mut self, len: usize) -> Result<char, ParseError> {
        let start = self.pos;
        let mut code = 0_u32;
        for _ in 0..len {
            match self.peek().and_then(|c| c.to_digit(16)) {
                Some(d) => {
                    code = code * 16 + d;
                    self.bump();
                }
                None => {
                    self.pos = start;
                    return Err(self.error(format!("truncated escape, expected {len} hex digits")));
                }
            }
        }
        char::from_u32(code).ok_or_else(|| {
            self.error(format!("escape does not name a character: {code:#x}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(chapter: u32, verse: u32, text: &str) -> Record {
        Record {
            chapter,
            verse,
            text: text.to_owned(),
        }
    }

    #[test]
    fn parses_well_formed_line_and_drops_book_id() {
        let parsed = parse_line(r#"(5, 1, 1, "En el principio..."),"#);
        assert_eq!(parsed, Ok(Some(record(1, 1, "En el principio..."))));
    }

    #[test]
    fn blank_line_yields_nothing() {
        assert_eq!(parse_line(""), Ok(None));
        assert_eq!(parse_line("   \t  "), Ok(None));
    }

    #[test]
    fn surrounding_whitespace_and_single_trailing_comma_are_ignored() {
        let parsed = parse_line("   (1, 3, 16, 'Porque de tal manera amó Dios'),  \n");
        assert_eq!(parsed, Ok(Some(record(3, 16, "Porque de tal manera amó Dios"))));
    }

    #[test]
    fn unparenthesized_sequence_is_a_tuple() {
        let parsed = parse_line(r#"1, 2, 3, "texto""#);
        assert_eq!(parsed, Ok(Some(record(2, 3, "texto"))));
    }

    #[test]
    fn string_escapes_are_decoded() {
        let parsed = parse_line(r#"(1, 1, 1, 'dijo: \'Sea la luz\'\né\x41')"#);
        assert_eq!(parsed, Ok(Some(record(1, 1, "dijo: 'Sea la luz'\néA"))));
    }

    #[test]
    fn adjacent_strings_are_concatenated() {
        let parsed = parse_line(r#"(1, 1, 1, "En el " 'principio')"#);
        assert_eq!(parsed, Ok(Some(record(1, 1, "En el principio"))));
    }

    #[test]
    fn book_id_may_be_any_literal() {
        let parsed = parse_line(r#"("GEN", 1, 2, "y la tierra")"#);
        assert_eq!(parsed, Ok(Some(record(1, 2, "y la tierra"))));
        let parsed = parse_line(r#"(None, 1, 2, "y la tierra")"#);
        assert_eq!(parsed, Ok(Some(record(1, 2, "y la tierra"))));
    }

    #[test]
    fn non_literal_is_a_syntax_error() {
        assert!(matches!(
            parse_line("not a tuple"),
            Err(ParseError::Syntax { column: 1, .. })
        ));
        assert!(matches!(
            parse_line("__import__('os').system('ls')"),
            Err(ParseError::Syntax { .. })
        ));
        assert!(matches!(
            parse_line(r#"(1, 1, 1, "unterminated)"#),
            Err(ParseError::Syntax { .. })
        ));
    }

    #[test]
    fn non_tuple_value_is_rejected() {
        assert_eq!(
            parse_line("42"),
            Err(ParseError::NotATuple { found: "int" })
        );
        assert_eq!(
            parse_line(r#"[1, 1, 1, "x"]"#),
            Err(ParseError::NotATuple { found: "list" })
        );
        assert_eq!(
            parse_line(r#"("solo")"#),
            Err(ParseError::NotATuple { found: "str" })
        );
    }

    #[test]
    fn wrong_arity_is_reported_with_length() {
        assert_eq!(parse_line(r#"(1, 1, "x")"#), Err(ParseError::Arity(3)));
        assert_eq!(parse_line(r#"(1, 1, 1, "x", 9)"#), Err(ParseError::Arity(5)));
    }

    #[test]
    fn wrong_field_types_are_rejected() {
        assert_eq!(
            parse_line(r#"(1, "1", 1, "x")"#),
            Err(ParseError::FieldType {
                field: "chapter_number",
                expected: "int",
                found: "str",
            })
        );
        assert_eq!(
            parse_line(r#"(1, 1, 1.5, "x")"#),
            Err(ParseError::FieldType {
                field: "verse_number",
                expected: "int",
                found: "float",
            })
        );
        assert_eq!(
            parse_line("(1, 1, 1, 7)"),
            Err(ParseError::FieldType {
                field: "verse_text",
                expected: "str",
                found: "int",
            })
        );
        assert_eq!(
            parse_line(r#"(1, True, 1, "x")"#),
            Err(ParseError::FieldType {
                field: "chapter_number",
                expected: "int",
                found: "bool",
            })
        );
    }

    #[test]
    fn non_positive_numbers_are_rejected() {
        assert_eq!(
            parse_line(r#"(1, 0, 1, "x")"#),
            Err(ParseError::NotPositive {
                field: "chapter_number",
                value: 0,
            })
        );
        assert_eq!(
            parse_line(r#"(1, 1, -3, "x")"#),
            Err(ParseError::NotPositive {
                field: "verse_number",
                value: -3,
            })
        );
    }

    #[test]
    fn deep_nesting_is_a_syntax_error() {
        let parens = format!("{}1{}", "(".repeat(200_000), ")".repeat(200_000));
        assert!(matches!(
            parse_line(&parens),
            Err(ParseError::Syntax { ref message, .. }) if message == "nesting too deep"
        ));

        let brackets = format!("{}1{}", "[".repeat(5_000), "]".repeat(5_000));
        assert!(matches!(parse_line(&brackets), Err(ParseError::Syntax { .. })));

        let signs = format!("{}1", "-".repeat(300_000));
        assert!(matches!(
            parse_line(&signs),
            Err(ParseError::Syntax { ref message, .. }) if message == "nesting too deep"
        ));
    }

    #[test]
    fn moderate_nesting_still_parses() -> anyhow::Result<()> {
        let value = parse_literal(&format!("{}1{}", "(".repeat(50), ")".repeat(50)))?;
        assert_eq!(value, Literal::Int(1));
        assert_eq!(parse_literal("--1")?, Literal::Int(1));
        Ok(())
    }

    #[test]
    fn literal_grammar_covers_numbers_and_nesting() -> anyhow::Result<()> {
        assert_eq!(parse_literal("0x1F")?, Literal::Int(31));
        assert_eq!(parse_literal("1_000")?, Literal::Int(1000));
        assert_eq!(parse_literal("-2.5e1")?, Literal::Float(-25.0));
        assert_eq!(parse_literal("(1,)")?, Literal::Tuple(vec![Literal::Int(1)]));
        assert_eq!(
            parse_literal("((1, 2), [])")?,
            Literal::Tuple(vec![
                Literal::Tuple(vec![Literal::Int(1), Literal::Int(2)]),
                Literal::List(Vec::new()),
            ])
        );
        assert_eq!(parse_literal(r"r'\d'")?, Literal::Str(r"\d".to_owned()));
        assert!(parse_literal("007").is_err());
        assert!(parse_literal("(1 2)").is_err());
        Ok(())
    }
}
