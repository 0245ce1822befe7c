use crate::{
    error::MalformedFilterError,
    filter::ast::{FilterExpr, Operation, Predicate},
    value::Value,
};

///
/// Stored filter text parser
///
/// Grammar (keywords case-insensitive, AND binds tighter than OR):
///
/// ```text
/// expr      := or
/// or        := and ( OR and )*
/// and       := atom ( AND atom )*
/// atom      := '(' expr ')' | predicate
/// predicate := column op value
/// op        := '==' | '=' | '!=' | '>' | '>=' | '<' | '<=' | LIKE | ILIKE | REGEX
/// value     := string | number | true | false | null
/// ```
///
/// Empty or whitespace-only text parses to the match-all expression,
/// matching the empty predicate group stored for "All instances".
///

/// Parenthesis nesting cap. Stored filters are written by people, not
/// machines; recursion must stay bounded regardless of input.
const MAX_NESTING_DEPTH: usize = 128;

/// Parse stored filter text into an expression tree.
pub fn parse(input: &str) -> Result<FilterExpr, MalformedFilterError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Ok(FilterExpr::True);
    }

    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_or(0)?;
    if let Some(token) = parser.peek() {
        return Err(MalformedFilterError::new(
            token.offset,
            format!("unexpected token '{}'", token.kind),
        ));
    }

    Ok(expr)
}

///
/// TokenKind
///

#[derive(Clone, Debug, PartialEq)]
enum TokenKind {
    Ident(String),
    Str(String),
    Num(String),
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    LParen,
    RParen,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ident(word) => write!(f, "{word}"),
            Self::Str(text) => write!(f, "'{text}'"),
            Self::Num(text) => write!(f, "{text}"),
            Self::Eq => write!(f, "=="),
            Self::Ne => write!(f, "!="),
            Self::Gt => write!(f, ">"),
            Self::Gte => write!(f, ">="),
            Self::Lt => write!(f, "<"),
            Self::Lte => write!(f, "<="),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Token {
    kind: TokenKind,
    offset: usize,
}

fn tokenize(input: &str) -> Result<Vec<Token>, MalformedFilterError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(offset, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        if c == '\'' || c == '"' {
            let quote = c;
            chars.next();
            let mut text = String::new();
            loop {
                match chars.next() {
                    Some((_, '\\')) => match chars.next() {
                        Some((_, escaped)) => text.push(escaped),
                        None => {
                            return Err(MalformedFilterError::new(
                                offset,
                                "unterminated string literal",
                            ));
                        }
                    },
                    Some((_, ch)) if ch == quote => break,
                    Some((_, ch)) => text.push(ch),
                    None => {
                        return Err(MalformedFilterError::new(
                            offset,
                            "unterminated string literal",
                        ));
                    }
                }
            }
            tokens.push(Token {
                kind: TokenKind::Str(text),
                offset,
            });
            continue;
        }

        if matches!(c, '=' | '!' | '<' | '>') {
            chars.next();
            let double = matches!(chars.peek(), Some((_, '=')));
            if double {
                chars.next();
            }
            let kind = match (c, double) {
                ('=', _) => TokenKind::Eq,
                ('!', true) => TokenKind::Ne,
                ('<', false) => TokenKind::Lt,
                ('<', true) => TokenKind::Lte,
                ('>', false) => TokenKind::Gt,
                ('>', true) => TokenKind::Gte,
                _ => {
                    return Err(MalformedFilterError::new(offset, "stray '!'"));
                }
            };
            tokens.push(Token { kind, offset });
            continue;
        }

        if c == '(' || c == ')' {
            chars.next();
            tokens.push(Token {
                kind: if c == '(' {
                    TokenKind::LParen
                } else {
                    TokenKind::RParen
                },
                offset,
            });
            continue;
        }

        if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' {
            let mut text = String::new();
            while let Some(&(_, ch)) = chars.peek() {
                if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '+') {
                    text.push(ch);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(Token {
                kind: TokenKind::Num(text),
                offset,
            });
            continue;
        }

        if c.is_alphanumeric() || c == '_' {
            let mut word = String::new();
            while let Some(&(_, ch)) = chars.peek() {
                if ch.is_alphanumeric() || ch == '_' {
                    word.push(ch);
                    chars.next();
                } else {
                    break;
                }
            }
            tokens.push(Token {
                kind: TokenKind::Ident(word),
                offset,
            });
            continue;
        }

        return Err(MalformedFilterError::new(
            offset,
            format!("unexpected character '{c}'"),
        ));
    }

    Ok(tokens)
}

///
/// Parser
///
/// Plain recursive descent over the token stream; one function per
/// grammar rule.
///

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn end_offset(&self) -> usize {
        self.tokens.last().map_or(0, |token| token.offset)
    }

    /// Does the next token spell this keyword (case-insensitive)?
    fn at_keyword(&self, keyword: &str) -> bool {
        matches!(
            self.peek(),
            Some(Token {
                kind: TokenKind::Ident(word),
                ..
            }) if word.eq_ignore_ascii_case(keyword)
        )
    }

    fn parse_or(&mut self, depth: usize) -> Result<FilterExpr, MalformedFilterError> {
        let mut children = vec![self.parse_and(depth)?];
        while self.at_keyword("OR") {
            self.next();
            children.push(self.parse_and(depth)?);
        }
        if children.len() == 1 {
            return Ok(children.remove(0));
        }
        Ok(FilterExpr::Or(children))
    }

    fn parse_and(&mut self, depth: usize) -> Result<FilterExpr, MalformedFilterError> {
        let mut children = vec![self.parse_atom(depth)?];
        while self.at_keyword("AND") {
            self.next();
            children.push(self.parse_atom(depth)?);
        }
        if children.len() == 1 {
            return Ok(children.remove(0));
        }
        Ok(FilterExpr::And(children))
    }

    fn parse_atom(&mut self, depth: usize) -> Result<FilterExpr, MalformedFilterError> {
        if matches!(
            self.peek(),
            Some(Token {
                kind: TokenKind::LParen,
                ..
            })
        ) {
            let open = self.next().map_or(0, |token| token.offset);
            if depth >= MAX_NESTING_DEPTH {
                return Err(MalformedFilterError::new(open, "filter nesting too deep"));
            }
            let inner = self.parse_or(depth + 1)?;
            match self.next() {
                Some(Token {
                    kind: TokenKind::RParen,
                    ..
                }) => return Ok(inner),
                Some(token) => {
                    return Err(MalformedFilterError::new(
                        token.offset,
                        format!("expected ')', got '{}'", token.kind),
                    ));
                }
                None => {
                    return Err(MalformedFilterError::new(open, "unclosed '('"));
                }
            }
        }

        self.parse_predicate()
    }

    fn parse_predicate(&mut self) -> Result<FilterExpr, MalformedFilterError> {
        let column = match self.next() {
            Some(Token {
                kind: TokenKind::Ident(word),
                ..
            }) => word,
            Some(Token {
                kind: TokenKind::Str(text),
                ..
            }) => text,
            Some(token) => {
                return Err(MalformedFilterError::new(
                    token.offset,
                    format!("expected column name, got '{}'", token.kind),
                ));
            }
            None => {
                return Err(MalformedFilterError::new(
                    self.end_offset(),
                    "expected column name, got end of input",
                ));
            }
        };

        let operation = self.parse_operation()?;
        let value = self.parse_value()?;

        Ok(FilterExpr::Predicate(Predicate {
            column,
            operation,
            value,
        }))
    }

    fn parse_operation(&mut self) -> Result<Operation, MalformedFilterError> {
        match self.next() {
            Some(Token { kind, offset }) => match kind {
                TokenKind::Eq => Ok(Operation::Equal),
                TokenKind::Ne => Ok(Operation::Different),
                TokenKind::Gt => Ok(Operation::Gt),
                TokenKind::Gte => Ok(Operation::Gte),
                TokenKind::Lt => Ok(Operation::Lt),
                TokenKind::Lte => Ok(Operation::Lte),
                TokenKind::Ident(word) if word.eq_ignore_ascii_case("LIKE") => Ok(Operation::Like),
                TokenKind::Ident(word) if word.eq_ignore_ascii_case("ILIKE") => {
                    Ok(Operation::Ilike)
                }
                TokenKind::Ident(word) if word.eq_ignore_ascii_case("REGEX") => {
                    Ok(Operation::Regex)
                }
                other => Err(MalformedFilterError::new(
                    offset,
                    format!("expected comparison operator, got '{other}'"),
                )),
            },
            None => Err(MalformedFilterError::new(
                self.end_offset(),
                "expected comparison operator, got end of input",
            )),
        }
    }

    fn parse_value(&mut self) -> Result<Value, MalformedFilterError> {
        match self.next() {
            Some(Token { kind, offset }) => match kind {
                TokenKind::Str(text) => Ok(Value::Text(text)),
                TokenKind::Num(text) => parse_number(&text, offset),
                TokenKind::Ident(word) if word.eq_ignore_ascii_case("true") => {
                    Ok(Value::Bool(true))
                }
                TokenKind::Ident(word) if word.eq_ignore_ascii_case("false") => {
                    Ok(Value::Bool(false))
                }
                TokenKind::Ident(word) if word.eq_ignore_ascii_case("null") => Ok(Value::Null),
                other => Err(MalformedFilterError::new(
                    offset,
                    format!("expected literal value, got '{other}'"),
                )),
            },
            None => Err(MalformedFilterError::new(
                self.end_offset(),
                "expected literal value, got end of input",
            )),
        }
    }
}

fn parse_number(text: &str, offset: usize) -> Result<Value, MalformedFilterError> {
    if let Ok(n) = text.parse::<i64>() {
        return Ok(Value::Int(n));
    }
    text.parse::<f64>().map(Value::Float).map_err(|_| {
        MalformedFilterError::new(offset, format!("invalid numeric literal '{text}'"))
    })
}
