use crate::core::error::{Error, ErrorKind, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Select,
    From,
    Where,
    And,
    Or,
    Ident(String),
    Text(String),
    Float(f64),
    Star,
    Dot,
    Comma,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Eq,
    Gt,
    Lt,
    Eof,
}

/// Tokenizes a query string. Single-pass, non-backtracking: each byte is
/// classified once and consumed into exactly one token.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            ' ' | '\t' | '\n' => {
                chars.next();
            }
            '*' => {
                chars.next();
                tokens.push(Token::Star);
            }
            '.' => {
                chars.next();
                tokens.push(Token::Dot);
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            '[' => {
                chars.next();
                tokens.push(Token::LBracket);
            }
            ']' => {
                chars.next();
                tokens.push(Token::RBracket);
            }
            '=' => {
                chars.next();
                tokens.push(Token::Eq);
            }
            '>' => {
                chars.next();
                tokens.push(Token::Gt);
            }
            '<' => {
                chars.next();
                tokens.push(Token::Lt);
            }
            '\'' => {
                chars.next();
                let mut text = String::new();
                let mut terminated = false;
                for ch in chars.by_ref() {
                    if ch == '\'' {
                        terminated = true;
                        break;
                    }
                    text.push(ch);
                }
                if !terminated {
                    return Err(Error::new(ErrorKind::QueryLex, "unterminated string literal"));
                }
                tokens.push(Token::Text(text));
            }
            c if c.is_ascii_digit() => {
                let mut raw = String::new();
                let mut dots = 0;
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() {
                        raw.push(d);
                        chars.next();
                    } else if d == '.' {
                        dots += 1;
                        raw.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if dots > 1 {
                    return Err(Error::new(ErrorKind::QueryLex, format!("malformed number literal '{raw}'")));
                }
                let value: f64 = raw
                    .parse()
                    .map_err(|_| Error::new(ErrorKind::QueryLex, format!("malformed number literal '{raw}'")))?;
                tokens.push(Token::Float(value));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut ident = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_alphabetic() || d == '_' {
                        ident.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(match ident.as_str() {
                    "SELECT" => Token::Select,
                    "FROM" => Token::From,
                    "WHERE" => Token::Where,
                    "AND" => Token::And,
                    "OR" => Token::Or,
                    _ => Token::Ident(ident),
                });
            }
            other => {
                return Err(Error::new(ErrorKind::QueryLex, format!("unexpected character '{other}'")));
            }
        }
    }

    tokens.push(Token::Eof);
    Ok(tokens)
}
