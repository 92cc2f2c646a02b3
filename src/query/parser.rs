use crate::core::error::{Error, ErrorKind, Result};
use crate::index::types::Value;
use crate::query::ast::{Instruction, Op, Program};
use crate::query::lexer::Token;

/// Recursive-descent parser for the query grammar. Emits instructions
/// directly during the left-to-right predicate scan rather than building an
/// intermediate tree, matching the source's single-pass translation.
struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

pub fn parse(tokens: Vec<Token>) -> Result<Program> {
    let mut parser = Parser { tokens, pos: 0 };
    parser.parse_query()
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, expected: &Token, what: &str) -> Result<()> {
        if self.peek() == expected {
            self.advance();
            Ok(())
        } else {
            Err(Error::new(ErrorKind::QueryParse, format!("expected {what}, found {:?}", self.peek())))
        }
    }

    fn expect_ident(&mut self, what: &str) -> Result<String> {
        match self.advance() {
            Token::Ident(name) => Ok(name),
            other => Err(Error::new(ErrorKind::QueryParse, format!("expected {what}, found {other:?}"))),
        }
    }

    fn parse_query(&mut self) -> Result<Program> {
        self.expect(&Token::Select, "SELECT")?;
        self.expect(&Token::Star, "projection '*'")?;
        self.expect(&Token::From, "FROM")?;
        self.expect_ident("container identifier")?;

        if self.peek() == &Token::Where {
            self.advance();
            self.parse_where_clause()
        } else {
            Ok(Vec::new())
        }
    }

    fn parse_where_clause(&mut self) -> Result<Program> {
        let mut program = Program::new();
        let (key, op, value) = self.parse_predicate()?;
        program.push(Instruction::Push { key, op, value });

        loop {
            match self.peek() {
                Token::And => {
                    self.advance();
                    let (key, op, value) = self.parse_predicate()?;
                    program.push(Instruction::And { key, op, value });
                }
                Token::Or => {
                    self.advance();
                    let (key, op, value) = self.parse_predicate()?;
                    program.push(Instruction::Or { key, op, value });
                }
                _ => break,
            }
        }

        Ok(program)
    }

    /// `predicate := ident '.' dottedPath op literal`. The leading `ident`
    /// is the container alias and is discarded; the key is built from the
    /// dotted path alone, each segment prefixed with `/`.
    fn parse_predicate(&mut self) -> Result<(String, Op, Value)> {
        self.expect_ident("container alias")?;
        self.expect(&Token::Dot, "'.'")?;

        let mut segments = vec![self.expect_ident("path segment")?];
        while self.peek() == &Token::Dot {
            self.advance();
            segments.push(self.expect_ident("path segment")?);
        }
        let key: String = segments.into_iter().map(|s| format!("/{s}")).collect();

        let op = match self.advance() {
            Token::Eq => Op::Eq,
            Token::Gt => Op::Gt,
            Token::Lt => Op::Lt,
            other => return Err(Error::new(ErrorKind::QueryParse, format!("expected comparison operator, found {other:?}"))),
        };

        let value = match self.advance() {
            Token::Text(s) => Value::Str(s),
            Token::Float(f) => Value::Float(f),
            other => return Err(Error::new(ErrorKind::QueryParse, format!("expected literal, found {other:?}"))),
        };

        Ok((key, op, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::lexer::tokenize;

    fn parse_str(query: &str) -> Program {
        parse(tokenize(query).unwrap()).unwrap()
    }

    #[test]
    fn single_equality_predicate() {
        let program = parse_str("SELECT * FROM c WHERE c.social.twitter = 'https://twitter.com'");
        assert_eq!(
            program,
            vec![Instruction::Push {
                key: "/social/twitter".to_string(),
                op: Op::Eq,
                value: Value::Str("https://twitter.com".to_string()),
            }]
        );
    }

    #[test]
    fn and_composition_left_to_right() {
        let program = parse_str(
            "SELECT * FROM c WHERE c.social.twitter = 'https://twitter.com' AND c.social.facebook = 'https://facebook.com'",
        );
        assert_eq!(program.len(), 2);
        assert!(matches!(program[1], Instruction::And { .. }));
    }

    #[test]
    fn or_composition() {
        let program = parse_str("SELECT * FROM c WHERE c.age = 23 OR c.age = 17");
        assert_eq!(program.len(), 2);
        assert!(matches!(program[0], Instruction::Push { .. }));
        assert!(matches!(program[1], Instruction::Or { .. }));
    }

    #[test]
    fn mixed_and_or_has_no_precedence() {
        let program = parse_str("SELECT * FROM c WHERE c.a = 1 AND c.b = 2 OR c.c = 3");
        assert!(matches!(program[0], Instruction::Push { .. }));
        assert!(matches!(program[1], Instruction::And { .. }));
        assert!(matches!(program[2], Instruction::Or { .. }));
    }

    #[test]
    fn query_without_where_clause_is_empty_program() {
        let program = parse_str("SELECT * FROM c");
        assert!(program.is_empty());
    }

    #[test]
    fn gt_operator_parses() {
        let program = parse_str("SELECT * FROM c WHERE c.age > 17.0");
        assert!(matches!(program[0], Instruction::Push { op: Op::Gt, .. }));
    }

    #[test]
    fn missing_select_is_parse_error() {
        let err = parse(tokenize("FROM c").unwrap()).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::QueryParse));
    }

    #[test]
    fn missing_from_is_parse_error() {
        let err = parse(tokenize("SELECT *").unwrap()).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::QueryParse));
    }
}
