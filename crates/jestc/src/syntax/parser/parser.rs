//! Jest recursive descent parser

use crate::common::{CompileError, CompileResult, Span};
use crate::syntax::ast::*;
use crate::syntax::lexer::{Lexer, Token, TokenKind};

/// Jest parser
pub struct Parser<'a> {
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            lexer: Lexer::new(source),
        }
    }

    /// Parse a complete source file
    pub fn parse_source(&mut self) -> CompileResult<SourceCode> {
        let start = self.lexer.peek()?.span;

        let mut imports = Vec::new();
        while self.check(&TokenKind::Import)? {
            imports.push(self.parse_import()?);
        }

        let mut body = Vec::new();
        while !self.check(&TokenKind::Eof)? {
            body.push(self.parse_stmt()?);
        }

        let end = self.lexer.peek()?.span;
        Ok(SourceCode::new(imports, body, Span::new(start.start, end.end)))
    }

    fn parse_import(&mut self) -> CompileResult<ImportStatement> {
        let start = self.expect(TokenKind::Import)?.span;
        let mut path = vec![self.expect_identifier()?];
        while self.match_token(&TokenKind::Dot)? {
            path.push(self.expect_identifier()?);
        }
        let end = self.expect(TokenKind::Semi)?.span;
        Ok(ImportStatement {
            path,
            span: start.to(end),
        })
    }

    // ==================== Statements ====================

    fn parse_stmt(&mut self) -> CompileResult<Stmt> {
        if self.check(&TokenKind::Defn)? {
            let def = self.parse_function_def()?;
            let span = def.span;
            return Ok(Stmt::new(StmtKind::FunctionDef(def), span));
        }
        if self.check(&TokenKind::Record)? {
            let def = self.parse_record_def()?;
            let span = def.span;
            return Ok(Stmt::new(StmtKind::RecordDef(def), span));
        }
        if self.check(&TokenKind::Def)? {
            let def = self.parse_def_assignment()?;
            let span = def.span;
            return Ok(Stmt::new(StmtKind::Def(def), span));
        }

        let expr = self.parse_expr()?;
        let span = expr.span;
        // Semicolons after expressions are optional
        self.match_token(&TokenKind::Semi)?;
        Ok(Stmt::new(StmtKind::Expr(expr), span))
    }

    fn parse_function_def(&mut self) -> CompileResult<FunctionDef> {
        let start = self.expect(TokenKind::Defn)?.span;

        let mut generic_parameters = Vec::new();
        if self.match_token(&TokenKind::Lt)? {
            loop {
                generic_parameters.push(self.expect_identifier()?);
                if !self.match_token(&TokenKind::Comma)? {
                    break;
                }
            }
            self.expect(TokenKind::Gt)?;
        }

        let name = self.expect_identifier()?;
        let (params, _) = self.parse_params()?;
        let return_type = self.parse_return_annotation()?;
        let body = self.parse_block()?;
        let span = start.to(body.span);

        Ok(FunctionDef {
            name,
            generic_parameters,
            params,
            return_type,
            body,
            span,
        })
    }

    fn parse_record_def(&mut self) -> CompileResult<RecordDef> {
        let start = self.expect(TokenKind::Record)?.span;
        let name = self.expect_identifier()?;
        let (fields, close) = self.parse_params()?;
        let mut end = close.end;

        let mut implementations = Vec::new();
        while self.check(&TokenKind::Implements)? {
            let implementation = self.parse_implementation()?;
            end = implementation.span.end;
            implementations.push(implementation);
        }
        // `record P(x: Number);` may end in a semicolon
        if let Some(semi) = self.match_semi()? {
            end = semi.end;
        }

        Ok(RecordDef {
            name,
            fields,
            implementations,
            span: Span::new(start.start, end),
        })
    }

    fn parse_implementation(&mut self) -> CompileResult<Implementation> {
        let start = self.expect(TokenKind::Implements)?.span;
        let protocol = self.expect_identifier()?;
        self.expect(TokenKind::LBrace)?;

        let mut methods = Vec::new();
        while !self.check(&TokenKind::RBrace)? {
            methods.push(self.parse_method_def()?);
        }

        let end = self.expect(TokenKind::RBrace)?.span;
        Ok(Implementation {
            protocol,
            methods,
            span: start.to(end),
        })
    }

    fn parse_method_def(&mut self) -> CompileResult<MethodDef> {
        let start = self.expect(TokenKind::Defmethod)?.span;
        let name = self.expect_identifier()?;
        let (params, _) = self.parse_params()?;
        let return_type = self.parse_return_annotation()?;
        let body = self.parse_block()?;
        let span = start.to(body.span);

        Ok(MethodDef {
            name,
            params,
            return_type,
            body,
            span,
        })
    }

    fn parse_def_assignment(&mut self) -> CompileResult<DefAssignment> {
        let start = self.expect(TokenKind::Def)?.span;
        let name = self.expect_identifier()?;
        let ty = if self.match_token(&TokenKind::Colon)? {
            Some(self.parse_type()?)
        } else {
            None
        };
        self.expect(TokenKind::Eq)?;
        let value = self.parse_expr()?;
        let end = self.expect(TokenKind::Semi)?.span;

        Ok(DefAssignment {
            name,
            ty,
            value,
            span: start.to(end),
        })
    }

    /// `(name: Type, ...)`; also returns the closing paren span
    fn parse_params(&mut self) -> CompileResult<(Vec<Param>, Span)> {
        self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();

        while !self.check(&TokenKind::RParen)? {
            let token = self.lexer.next_token()?;
            let name = identifier_of(token.clone())?;
            self.expect(TokenKind::Colon)?;
            let ty = self.parse_type()?;
            let span = token.span.to(ty.span);
            params.push(Param { name, ty, span });

            if !self.match_token(&TokenKind::Comma)? {
                break;
            }
        }

        let close = self.expect(TokenKind::RParen)?.span;
        Ok((params, close))
    }

    fn parse_return_annotation(&mut self) -> CompileResult<Option<TypeAnnotation>> {
        if self.match_token(&TokenKind::Arrow)? {
            Ok(Some(self.parse_type()?))
        } else {
            Ok(None)
        }
    }

    fn parse_block(&mut self) -> CompileResult<Block> {
        let start = self.expect(TokenKind::LBrace)?.span;
        let mut stmts = Vec::new();

        while !self.check(&TokenKind::RBrace)? {
            if self.check(&TokenKind::Eof)? {
                let token = self.lexer.next_token()?;
                return Err(CompileError::parser("unclosed block, expected `}`", token.span));
            }
            stmts.push(self.parse_stmt()?);
        }

        let end = self.expect(TokenKind::RBrace)?.span;
        Ok(Block::new(stmts, start.to(end)))
    }

    // ==================== Types ====================

    fn parse_type(&mut self) -> CompileResult<TypeAnnotation> {
        let token = self.lexer.next_token()?;
        match token.kind {
            TokenKind::LParen => {
                let mut params = Vec::new();
                while !self.check(&TokenKind::RParen)? {
                    params.push(self.parse_type()?);
                    if !self.match_token(&TokenKind::Comma)? {
                        break;
                    }
                }
                self.expect(TokenKind::RParen)?;
                self.expect(TokenKind::Arrow)?;
                let ret = self.parse_type()?;
                let span = token.span.to(ret.span);
                Ok(TypeAnnotation::new(
                    TypeAnnotationKind::Function {
                        params,
                        ret: Box::new(ret),
                    },
                    span,
                ))
            }
            TokenKind::Identifier(name) => {
                let mut args = Vec::new();
                let mut span = token.span;
                if self.match_token(&TokenKind::Lt)? {
                    loop {
                        args.push(self.parse_type()?);
                        if !self.match_token(&TokenKind::Comma)? {
                            break;
                        }
                    }
                    span = span.to(self.expect(TokenKind::Gt)?.span);
                }
                Ok(TypeAnnotation::new(TypeAnnotationKind::Named { name, args }, span))
            }
            // `nil` is a keyword but also names the Nil type in annotations
            TokenKind::Nil => Ok(TypeAnnotation::named("Nil", token.span)),
            _ => Err(CompileError::parser(
                format!("expected type, found {}", token.kind),
                token.span,
            )),
        }
    }

    // ==================== Expressions ====================

    pub fn parse_expr(&mut self) -> CompileResult<Expr> {
        self.parse_expr_with_precedence(0)
    }

    fn parse_expr_with_precedence(&mut self, min_prec: u8) -> CompileResult<Expr> {
        let mut left = self.parse_unary_expr()?;

        while let Some(op) = self.peek_binary_op()? {
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }

            self.lexer.next_token()?; // consume operator
            let right = self.parse_expr_with_precedence(prec + 1)?;

            let span = left.span.to(right.span);
            left = Expr::new(
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }

        Ok(left)
    }

    fn peek_binary_op(&mut self) -> CompileResult<Option<BinOp>> {
        Ok(match &self.lexer.peek()?.kind {
            TokenKind::Plus => Some(BinOp::Add),
            TokenKind::Minus => Some(BinOp::Sub),
            TokenKind::Star => Some(BinOp::Mul),
            TokenKind::Slash => Some(BinOp::Div),
            TokenKind::Percent => Some(BinOp::Rem),
            TokenKind::EqEq => Some(BinOp::Eq),
            TokenKind::NotEq => Some(BinOp::Ne),
            TokenKind::Lt => Some(BinOp::Lt),
            TokenKind::LtEq => Some(BinOp::Le),
            TokenKind::Gt => Some(BinOp::Gt),
            TokenKind::GtEq => Some(BinOp::Ge),
            TokenKind::And => Some(BinOp::And),
            TokenKind::Or => Some(BinOp::Or),
            _ => None,
        })
    }

    fn parse_unary_expr(&mut self) -> CompileResult<Expr> {
        let start = self.lexer.peek()?.span;

        let op = if self.match_token(&TokenKind::Minus)? {
            UnaryOp::Neg
        } else if self.match_token(&TokenKind::Bang)? {
            UnaryOp::Not
        } else {
            return self.parse_postfix_expr();
        };

        let operand = self.parse_unary_expr()?;
        let span = start.to(operand.span);
        Ok(Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        ))
    }

    fn parse_postfix_expr(&mut self) -> CompileResult<Expr> {
        let mut expr = self.parse_primary_expr()?;

        loop {
            if self.match_token(&TokenKind::Dot)? {
                // Member get or method call
                let token = self.lexer.next_token()?;
                let member_span = token.span;
                let member = identifier_of(token)?;

                if self.check(&TokenKind::LParen)? {
                    expr = self.finish_method_call(expr, member, Threading::First)?;
                } else {
                    let span = expr.span.to(member_span);
                    expr = Expr::new(
                        ExprKind::MemberGet {
                            target: Box::new(expr),
                            member,
                        },
                        span,
                    );
                }
            } else if self.match_token(&TokenKind::Arrow)? {
                // Receiver-last method call
                let name = identifier_of(self.lexer.next_token()?)?;
                expr = self.finish_method_call(expr, name, Threading::Last)?;
            } else if is_keyed(&expr) && self.check(&TokenKind::LBracket)? {
                // Only after a name, so `%{:k [1]}` stays a map entry
                self.lexer.next_token()?;
                let key = self.parse_expr()?;
                let end = self.expect(TokenKind::RBracket)?.span;
                let span = expr.span.to(end);
                expr = Expr::new(
                    ExprKind::Get {
                        collection: Box::new(expr),
                        key: Box::new(key),
                    },
                    span,
                );
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn finish_method_call(
        &mut self,
        receiver: Expr,
        name: String,
        threading: Threading,
    ) -> CompileResult<Expr> {
        if !self.check(&TokenKind::LParen)? {
            let found = self.lexer.peek()?.clone();
            return Err(CompileError::parser(
                format!("expected '(' after method name '{name}', found {}", found.kind),
                found.span,
            ));
        }
        let (args, end) = self.parse_call_args()?;
        let span = receiver.span.to(end);
        Ok(Expr::new(
            ExprKind::MethodCall(MethodCall {
                receiver: Box::new(receiver),
                call: FunctionCall { name, args, span },
                threading,
            }),
            span,
        ))
    }

    fn parse_primary_expr(&mut self) -> CompileResult<Expr> {
        let peeked = self.lexer.peek()?.clone();
        match peeked.kind {
            TokenKind::LBrace => {
                let block = self.parse_block()?;
                let span = block.span;
                return Ok(Expr::new(ExprKind::Block(block), span));
            }
            TokenKind::Let => return self.parse_var_scope(),
            TokenKind::For => return self.parse_for_loop(),
            TokenKind::If => return self.parse_conditional(),
            TokenKind::Fn => return self.parse_lambda(),
            _ => {}
        }

        let token = self.lexer.next_token()?;
        let kind = match token.kind {
            TokenKind::NumberLiteral(n) => ExprKind::Number(n),
            TokenKind::StringLiteral(s) => ExprKind::String(s),
            TokenKind::Symbol(s) => ExprKind::Symbol(s),
            TokenKind::True => ExprKind::Bool(true),
            TokenKind::False => ExprKind::Bool(false),
            TokenKind::Nil => ExprKind::Nil,

            TokenKind::Identifier(name) => {
                if self.check(&TokenKind::LParen)? {
                    let (args, end) = self.parse_call_args()?;
                    let span = token.span.to(end);
                    return Ok(Expr::new(ExprKind::Call(FunctionCall { name, args, span }), span));
                }
                ExprKind::Identifier(name)
            }

            TokenKind::LParen => {
                let inner = self.parse_expr()?;
                let end = self.expect(TokenKind::RParen)?.span;
                return Ok(Expr::new(ExprKind::Paren(Box::new(inner)), token.span.to(end)));
            }

            TokenKind::LBracket => {
                let mut elements = Vec::new();
                while !self.check(&TokenKind::RBracket)? {
                    elements.push(self.parse_expr()?);
                    if !self.match_token(&TokenKind::Comma)? {
                        break;
                    }
                }
                let end = self.expect(TokenKind::RBracket)?.span;
                return Ok(Expr::new(ExprKind::Vector(elements), token.span.to(end)));
            }

            TokenKind::MapOpen => {
                let mut entries = Vec::new();
                while !self.check(&TokenKind::RBrace)? {
                    let key = self.parse_expr()?;
                    let value = self.parse_expr()?;
                    entries.push((key, value));
                    self.match_token(&TokenKind::Comma)?;
                }
                let end = self.expect(TokenKind::RBrace)?.span;
                return Ok(Expr::new(ExprKind::Map(entries), token.span.to(end)));
            }

            other => {
                return Err(CompileError::parser(
                    format!("expected expression, found {}", other),
                    token.span,
                ));
            }
        };

        Ok(Expr::new(kind, token.span))
    }

    /// `(a, b)` after a callee name; returns the closing span
    fn parse_call_args(&mut self) -> CompileResult<(Vec<Expr>, Span)> {
        self.expect(TokenKind::LParen)?;
        let mut args = Vec::new();
        while !self.check(&TokenKind::RParen)? {
            args.push(self.parse_expr()?);
            if !self.match_token(&TokenKind::Comma)? {
                break;
            }
        }
        let end = self.expect(TokenKind::RParen)?.span;
        Ok((args, end))
    }

    fn parse_var_scope(&mut self) -> CompileResult<Expr> {
        let start = self.expect(TokenKind::Let)?.span;
        let mut bindings = Vec::new();

        loop {
            let token = self.lexer.next_token()?;
            let name = identifier_of(token.clone())?;
            self.expect(TokenKind::Eq)?;
            let value = self.parse_expr()?;
            let span = token.span.to(value.span);
            bindings.push(Binding { name, value, span });

            if !self.match_token(&TokenKind::Comma)? {
                break;
            }
        }

        let body = self.parse_block()?;
        let span = start.to(body.span);
        Ok(Expr::new(ExprKind::VarScope(VarScope { bindings, body }), span))
    }

    fn parse_for_loop(&mut self) -> CompileResult<Expr> {
        let start = self.expect(TokenKind::For)?.span;
        let mut vars = Vec::new();

        loop {
            let token = self.lexer.next_token()?;
            let span = token.span;
            let name = identifier_of(token)?;
            vars.push(LocalName { name, span });
            if !self.match_token(&TokenKind::Comma)? {
                break;
            }
        }

        self.expect(TokenKind::In)?;
        let iterable = self.parse_expr()?;
        let body = self.parse_block()?;
        let span = start.to(body.span);

        Ok(Expr::new(
            ExprKind::ForLoop(ForLoop {
                vars,
                iterable: Box::new(iterable),
                body,
            }),
            span,
        ))
    }

    fn parse_conditional(&mut self) -> CompileResult<Expr> {
        let start = self.expect(TokenKind::If)?.span;
        let mut branches = Vec::new();

        let condition = self.parse_expr()?;
        let body = self.parse_block()?;
        let mut end = body.span;
        branches.push(Branch { condition, body });

        while self.match_token(&TokenKind::Elif)? {
            let condition = self.parse_expr()?;
            let body = self.parse_block()?;
            end = body.span;
            branches.push(Branch { condition, body });
        }

        let else_block = if self.match_token(&TokenKind::Else)? {
            let block = self.parse_block()?;
            end = block.span;
            Some(block)
        } else {
            None
        };

        Ok(Expr::new(
            ExprKind::Conditional(Conditional {
                branches,
                else_block,
            }),
            start.to(end),
        ))
    }

    fn parse_lambda(&mut self) -> CompileResult<Expr> {
        let start = self.expect(TokenKind::Fn)?.span;
        self.expect(TokenKind::LParen)?;

        let mut params = Vec::new();
        while !self.check(&TokenKind::RParen)? {
            let token = self.lexer.next_token()?;
            let mut span = token.span;
            let name = identifier_of(token)?;
            let ty = if self.match_token(&TokenKind::Colon)? {
                let ty = self.parse_type()?;
                span = span.to(ty.span);
                Some(ty)
            } else {
                None
            };
            params.push(LambdaParam { name, ty, span });

            if !self.match_token(&TokenKind::Comma)? {
                break;
            }
        }

        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::Arrow)?;
        let body = self.parse_expr()?;
        let span = start.to(body.span);

        Ok(Expr::new(
            ExprKind::Lambda(Lambda {
                params,
                body: Box::new(body),
            }),
            span,
        ))
    }

    // ==================== Helpers ====================

    fn check(&mut self, expected: &TokenKind) -> CompileResult<bool> {
        self.lexer.check(expected)
    }

    fn match_token(&mut self, expected: &TokenKind) -> CompileResult<bool> {
        self.lexer.match_token(expected)
    }

    fn match_semi(&mut self) -> CompileResult<Option<Span>> {
        if self.check(&TokenKind::Semi)? {
            Ok(Some(self.lexer.next_token()?.span))
        } else {
            Ok(None)
        }
    }

    fn expect(&mut self, expected: TokenKind) -> CompileResult<Token> {
        self.lexer.expect(expected)
    }

    fn expect_identifier(&mut self) -> CompileResult<String> {
        let token = self.lexer.next_token()?;
        identifier_of(token)
    }
}

fn identifier_of(token: Token) -> CompileResult<String> {
    match token.kind {
        TokenKind::Identifier(name) => Ok(name),
        other => Err(CompileError::parser(
            format!("expected identifier, found {}", other),
            token.span,
        )),
    }
}

/// Can `[key]` follow this expression?
fn is_keyed(expr: &Expr) -> bool {
    matches!(
        expr.kind,
        ExprKind::Identifier(_) | ExprKind::MemberGet { .. } | ExprKind::Get { .. }
    )
}

/// Parse a complete source file
pub fn parse(source: &str) -> CompileResult<SourceCode> {
    Parser::new(source).parse_source()
}
