//! Jest lexer implementation using logos

use super::token::{Token, TokenKind};
use crate::common::{CompileError, CompileResult, Span};
use logos::Logos;
use std::collections::VecDeque;

/// Lexer for Jest source code
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
    /// Buffer for peeked and split tokens
    peeked: VecDeque<Token>,
    /// End offset of the last identifier produced
    identifier_end: Option<usize>,
    at_eof: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code
    pub fn new(source: &'a str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            peeked: VecDeque::new(),
            identifier_end: None,
            at_eof: false,
        }
    }

    /// Get the next token
    pub fn next_token(&mut self) -> CompileResult<Token> {
        match self.peeked.pop_front() {
            Some(token) => Ok(token),
            None => self.scan_token(),
        }
    }

    /// Scan a new token from source
    fn scan_token(&mut self) -> CompileResult<Token> {
        if self.at_eof {
            let len = self.inner.source().len();
            return Ok(Token::new(TokenKind::Eof, Span::new(len, len)));
        }

        match self.inner.next() {
            Some(Ok(kind)) => {
                let range = self.inner.span();
                let span = Span::new(range.start, range.end);
                Ok(self.classify(kind, span))
            }
            Some(Err(())) => {
                let range = self.inner.span();
                Err(CompileError::lexer(
                    format!("unexpected character '{}'", self.inner.slice()),
                    Span::new(range.start, range.end),
                ))
            }
            None => {
                self.at_eof = true;
                let len = self.inner.source().len();
                Ok(Token::new(TokenKind::Eof, Span::new(len, len)))
            }
        }
    }

    /// `x:Number` lexes as a symbol; glued to an identifier it is an annotation
    fn classify(&mut self, kind: TokenKind, span: Span) -> Token {
        let glued = self.identifier_end == Some(span.start);
        self.identifier_end = None;

        match kind {
            TokenKind::Symbol(name) if glued => {
                let colon = Token::new(TokenKind::Colon, Span::new(span.start, span.start + 1));
                let ident = Token::new(TokenKind::Identifier(name), Span::new(span.start + 1, span.end));
                self.identifier_end = Some(span.end);
                // Split tokens go in front of anything already peeked
                self.peeked.push_front(ident);
                colon
            }
            TokenKind::Identifier(_) => {
                self.identifier_end = Some(span.end);
                Token::new(kind, span)
            }
            _ => Token::new(kind, span),
        }
    }

    /// Peek at the next token without consuming it
    pub fn peek(&mut self) -> CompileResult<&Token> {
        if self.peeked.is_empty() {
            let token = self.scan_token()?;
            self.peeked.push_front(token);
        }
        Ok(&self.peeked[0])
    }

    /// Check if the next token matches the expected kind
    pub fn check(&mut self, expected: &TokenKind) -> CompileResult<bool> {
        Ok(std::mem::discriminant(&self.peek()?.kind) == std::mem::discriminant(expected))
    }

    /// Consume the next token if it matches, return true if consumed
    pub fn match_token(&mut self, expected: &TokenKind) -> CompileResult<bool> {
        if self.check(expected)? {
            self.next_token()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Expect a specific token kind, error if not found
    pub fn expect(&mut self, expected: TokenKind) -> CompileResult<Token> {
        let token = self.next_token()?;
        if std::mem::discriminant(&token.kind) == std::mem::discriminant(&expected) {
            Ok(token)
        } else {
            Err(CompileError::parser(
                format!("expected {}, found {}", expected, token.kind),
                token.span,
            ))
        }
    }

    /// Tokenize the entire source and return all tokens
    pub fn tokenize_all(mut self) -> CompileResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.kind, TokenKind::Eof);
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    /// Get the source being lexed
    pub fn source(&self) -> &'a str {
        self.inner.source()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize_all()
            .unwrap()
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn test_keywords() {
        let mut lexer = Lexer::new("defn def defmethod record implements let for in if elif else fn");

        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Defn));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Def));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Defmethod));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Record));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Implements));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Let));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::For));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::In));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::If));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Elif));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Else));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Fn));
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Eof));
    }

    #[test]
    fn test_identifiers_with_suffixes() {
        assert_eq!(
            kinds("nil? swap! nil definition"),
            vec![
                TokenKind::Identifier("nil?".to_string()),
                TokenKind::Identifier("swap!".to_string()),
                TokenKind::Nil,
                TokenKind::Identifier("definition".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_literals() {
        assert_eq!(
            kinds(r#"42 3.5 "a\"b\n" :key"#),
            vec![
                TokenKind::NumberLiteral(42.0),
                TokenKind::NumberLiteral(3.5),
                TokenKind::StringLiteral("a\"b\n".to_string()),
                TokenKind::Symbol("key".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("-> == != <= >= %{ % - !"),
            vec![
                TokenKind::Arrow,
                TokenKind::EqEq,
                TokenKind::NotEq,
                TokenKind::LtEq,
                TokenKind::GtEq,
                TokenKind::MapOpen,
                TokenKind::Percent,
                TokenKind::Minus,
                TokenKind::Bang,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_glued_annotation_splits_symbol() {
        let tokens = Lexer::new("x:Number :sym").tokenize_all().unwrap();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier("x".to_string()),
                TokenKind::Colon,
                TokenKind::Identifier("Number".to_string()),
                TokenKind::Symbol("sym".to_string()),
                TokenKind::Eof,
            ]
        );
        assert_eq!(tokens[2].span, Span::new(2, 8));
    }

    #[test]
    fn test_comments_skipped() {
        assert_eq!(
            kinds("a // line\n /* block * comment */ b"),
            vec![
                TokenKind::Identifier("a".to_string()),
                TokenKind::Identifier("b".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut lexer = Lexer::new("foo(");
        assert!(lexer.check(&TokenKind::Identifier(String::new())).unwrap());
        assert!(matches!(lexer.next_token().unwrap().kind, TokenKind::Identifier(_)));
        assert!(lexer.match_token(&TokenKind::LParen).unwrap());
        assert!(lexer.expect(TokenKind::RParen).is_err());
    }

    #[test]
    fn test_unexpected_character() {
        let mut lexer = Lexer::new("@");
        assert!(matches!(lexer.next_token(), Err(CompileError::Lexer { .. })));
    }
}
