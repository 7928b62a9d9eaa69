use crate::error::{ParseError, Reporter};
use crate::expr::{Expr, NodeIdGen};
use crate::stmt::{FunctionDecl, Stmt};
use crate::token::{Token, Type};

use std::rc::Rc;

type ParseResult<T> = Result<T, ParseError>;

/// Recursive-descent parser over the scanner's token stream, building the
/// statement/expression tree spec §3 describes. Recovers from a malformed
/// statement by synchronizing at the next statement boundary rather than
/// aborting the whole parse (spec §7, taxon 2).
///
/// Grammar, precedence low to high:
/// ```text
/// program    → declaration* EOF
/// declaration → classDecl | funDecl | varDecl | statement
/// classDecl  → "class" IDENTIFIER "{" function* "}"
/// funDecl    → "fun" function
/// function   → IDENTIFIER "(" parameters? ")" block
/// parameters → IDENTIFIER ( "," IDENTIFIER )*
/// varDecl    → "var" IDENTIFIER ( "=" expression )? ";"
/// statement  → exprStmt | forStmt | ifStmt | printStmt
///            | returnStmt | whileStmt | block
/// forStmt    → "for" "(" (varDecl | exprStmt | ";")
///              expression? ";" expression? ")" statement
/// ifStmt     → "if" "(" expression ")" statement ( "else" statement )?
/// printStmt  → "print" expression ";"
/// returnStmt → "return" expression? ";"
/// whileStmt  → "while" "(" expression ")" statement
/// block      → "{" declaration* "}"
/// exprStmt   → expression ";"
/// expression → comma
/// comma      → ternary ( "," ternary )*
/// ternary    → assignment ( "?" assignment ":" ternary )?
/// assignment → ( call "." )? IDENTIFIER "=" assignment | logic_or
/// logic_or   → logic_and ( "or" logic_and )*
/// logic_and  → equality ( "and" equality )*
/// equality   → comparison ( ( "!=" | "==" ) comparison )*
/// comparison → term ( ( ">" | ">=" | "<" | "<=" ) term )*
/// term       → factor ( ( "-" | "+" ) factor )*
/// factor     → unary ( ( "/" | "*" ) unary )*
/// unary      → ( "!" | "-" ) unary | call
/// call       → primary ( "(" arguments? ")" | "." IDENTIFIER )*
/// arguments  → ternary ( "," ternary )*
/// primary    → NUMBER | STRING | "true" | "false" | "nil" | "this"
///            | IDENTIFIER | "(" expression ")"
/// ```
/// `arguments` is parsed at `ternary` rather than `expression` so the comma
/// operator can't swallow argument separators; `assignment` sits between
/// `ternary` and `logic_or` so `a ? b : c = d` parses `c = d` as the else
/// branch without parentheses.
pub struct Parser<'a> {
    tokens: Vec<Token>,
    current: usize,
    ids: NodeIdGen,
    reporter: &'a mut dyn Reporter,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, reporter: &'a mut dyn Reporter) -> Parser<'a> {
        Parser { tokens, current: 0, ids: NodeIdGen::new(), reporter }
    }

    /// Parses a full program, reporting (but not aborting on) each malformed
    /// declaration. Declarations that fail to parse are omitted from the
    /// result; `had_error` on the reporter reflects whether any did.
    pub fn parse(&mut self) -> Vec<Stmt> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }
        statements
    }

    /// Parses a single expression followed by end of input, for the REPL's
    /// bare-expression convenience mode. Returns `None` without reporting if
    /// the input isn't a single trailing expression, so the caller can fall
    /// back to `parse`.
    pub fn parse_single_expression(&mut self) -> Option<Expr> {
        let checkpoint = self.current;
        match self.expression() {
            Ok(expr) if self.check(Type::EOF) => Some(expr),
            _ => {
                self.current = checkpoint;
                None
            },
        }
    }

    // --- declarations ---

    fn declaration(&mut self) -> Option<Stmt> {
        let result = if self.matches(&[Type::Class]) {
            self.class_declaration()
        } else if self.matches(&[Type::Fun]) {
            self.function("function").map(Stmt::Function)
        } else if self.matches(&[Type::Var]) {
            self.var_declaration()
        } else {
            self.statement()
        };

        match result {
            Ok(stmt) => Some(stmt),
            Err(error) => {
                error.throw(self.reporter);
                self.synchronize();
                None
            },
        }
    }

    fn class_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(Type::Identifier, "Expect class name.")?;
        self.consume(Type::LeftBrace, "Expect '{' before class body.")?;

        let mut methods = Vec::new();
        while !self.check(Type::RightBrace) && !self.is_at_end() {
            methods.push(self.function("method")?);
        }

        self.consume(Type::RightBrace, "Expect '}' after class body.")?;
        Ok(Stmt::Class { name, methods })
    }

    fn function(&mut self, kind: &str) -> ParseResult<Rc<FunctionDecl>> {
        let name = self.consume(Type::Identifier, &format!("Expect {kind} name."))?;
        self.consume(Type::LeftParen, &format!("Expect '(' after {kind} name."))?;

        let mut params = Vec::new();
        if !self.check(Type::RightParen) {
            loop {
                if params.len() >= 255 {
                    let token = self.peek().clone();
                    self.reporter.compile_error(&token, "Can't have more than 255 parameters.");
                }
                params.push(self.consume(Type::Identifier, "Expect parameter name.")?);
                if !self.matches(&[Type::Comma]) {
                    break;
                }
            }
        }

        self.consume(Type::RightParen, "Expect ')' after parameters.")?;
        self.consume(Type::LeftBrace, &format!("Expect '{{' before {kind} body."))?;
        let body = self.block()?;

        Ok(Rc::new(FunctionDecl { name, params, body }))
    }

    fn var_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(Type::Identifier, "Expect variable name.")?;

        let initializer = if self.matches(&[Type::Equal]) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(Type::Semicolon, "Expect ';' after variable declaration.")?;
        Ok(Stmt::Var { name, initializer })
    }

    // --- statements ---

    fn statement(&mut self) -> ParseResult<Stmt> {
        if self.matches(&[Type::For]) {
            return self.for_statement();
        }
        if self.matches(&[Type::If]) {
            return self.if_statement();
        }
        if self.matches(&[Type::Print]) {
            return self.print_statement();
        }
        if self.matches(&[Type::Return]) {
            return self.return_statement();
        }
        if self.matches(&[Type::While]) {
            return self.while_statement();
        }
        if self.matches(&[Type::LeftBrace]) {
            return Ok(Stmt::Block(self.block()?));
        }
        self.expression_statement()
    }

    /// Desugars into `Block([init?, While(cond, Block([body, increment?]))])`
    /// (spec §3, "for").
    fn for_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(Type::LeftParen, "Expect '(' after 'for'.")?;

        let initializer = if self.matches(&[Type::Semicolon]) {
            None
        } else if self.matches(&[Type::Var]) {
            Some(self.var_declaration()?)
        } else {
            Some(self.expression_statement()?)
        };

        let condition = if !self.check(Type::Semicolon) {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(Type::Semicolon, "Expect ';' after loop condition.")?;

        let increment = if !self.check(Type::RightParen) {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(Type::RightParen, "Expect ')' after for clauses.")?;

        let mut body = self.statement()?;

        if let Some(increment) = increment {
            body = Stmt::Block(vec![body, Stmt::Expression(increment)]);
        }

        let condition = condition.unwrap_or(Expr::Literal(crate::literal::Literal::Bool(true)));
        body = Stmt::While { condition, body: Box::new(body) };

        if let Some(initializer) = initializer {
            body = Stmt::Block(vec![initializer, body]);
        }

        Ok(body)
    }

    /// `else` binds to the nearest preceding unmatched `if` (dangling else),
    /// which falls out of parsing it inline rather than looking ahead.
    fn if_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(Type::LeftParen, "Expect '(' after 'if'.")?;
        let condition = self.expression()?;
        self.consume(Type::RightParen, "Expect ')' after if condition.")?;

        let then_branch = Box::new(self.statement()?);
        let else_branch = if self.matches(&[Type::Else]) {
            Some(Box::new(self.statement()?))
        } else {
            None
        };

        Ok(Stmt::If { condition, then_branch, else_branch })
    }

    fn print_statement(&mut self) -> ParseResult<Stmt> {
        let value = self.expression()?;
        self.consume(Type::Semicolon, "Expect ';' after value.")?;
        Ok(Stmt::Print(value))
    }

    fn return_statement(&mut self) -> ParseResult<Stmt> {
        let keyword = self.previous().clone();
        let value = if !self.check(Type::Semicolon) {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(Type::Semicolon, "Expect ';' after return value.")?;
        Ok(Stmt::Return { keyword, value })
    }

    fn while_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(Type::LeftParen, "Expect '(' after 'while'.")?;
        let condition = self.expression()?;
        self.consume(Type::RightParen, "Expect ')' after condition.")?;
        let body = Box::new(self.statement()?);
        Ok(Stmt::While { condition, body })
    }

    fn block(&mut self) -> ParseResult<Vec<Stmt>> {
        let mut statements = Vec::new();
        while !self.check(Type::RightBrace) && !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }
        self.consume(Type::RightBrace, "Expect '}' after block.")?;
        Ok(statements)
    }

    fn expression_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.expression()?;
        self.consume(Type::Semicolon, "Expect ';' after expression.")?;
        Ok(Stmt::Expression(expr))
    }

    // --- expressions ---

    fn expression(&mut self) -> ParseResult<Expr> {
        self.comma()
    }

    fn comma(&mut self) -> ParseResult<Expr> {
        let mut expr = self.ternary()?;
        while self.matches(&[Type::Comma]) {
            let operator = self.previous().clone();
            let right = self.ternary()?;
            expr = Expr::Binary { left: Box::new(expr), operator, right: Box::new(right) };
        }
        Ok(expr)
    }

    /// `A ? B : C ? D : E` parses as `Ternary(A, B, Ternary(C, D, E))`: the
    /// else branch recurses into `ternary` itself, the then branch bottoms
    /// out at `assignment`.
    fn ternary(&mut self) -> ParseResult<Expr> {
        let cond = self.assignment()?;

        if self.matches(&[Type::Question]) {
            let then_branch = self.assignment()?;
            self.consume(Type::Colon, "Expect ':' after then branch of ternary expression.")?;
            let else_branch = self.ternary()?;
            return Ok(Expr::Ternary {
                cond: Box::new(cond),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            });
        }

        Ok(cond)
    }

    /// An invalid assignment target is reported but not thrown: the parser
    /// keeps the left-hand expression and carries on (spec §7, taxon 2).
    fn assignment(&mut self) -> ParseResult<Expr> {
        let expr = self.or()?;

        if self.matches(&[Type::Equal]) {
            let equals = self.previous().clone();
            let value = self.assignment()?;

            return Ok(match expr {
                Expr::Variable { name, .. } => {
                    let id = self.ids.next();
                    Expr::Assign { id, name, value: Box::new(value) }
                },
                Expr::Get { object, name } => Expr::Set { object, name, value: Box::new(value) },
                other => {
                    self.reporter.compile_error(&equals, "Invalid assignment target.");
                    other
                },
            });
        }

        Ok(expr)
    }

    fn or(&mut self) -> ParseResult<Expr> {
        let mut expr = self.and()?;
        while self.matches(&[Type::Or]) {
            let operator = self.previous().clone();
            let right = self.and()?;
            expr = Expr::Logical { left: Box::new(expr), operator, right: Box::new(right) };
        }
        Ok(expr)
    }

    fn and(&mut self) -> ParseResult<Expr> {
        let mut expr = self.equality()?;
        while self.matches(&[Type::And]) {
            let operator = self.previous().clone();
            let right = self.equality()?;
            expr = Expr::Logical { left: Box::new(expr), operator, right: Box::new(right) };
        }
        Ok(expr)
    }

    fn equality(&mut self) -> ParseResult<Expr> {
        let mut expr = self.comparison()?;
        while self.matches(&[Type::BangEqual, Type::EqualEqual]) {
            let operator = self.previous().clone();
            let right = self.comparison()?;
            expr = Expr::Binary { left: Box::new(expr), operator, right: Box::new(right) };
        }
        Ok(expr)
    }

    fn comparison(&mut self) -> ParseResult<Expr> {
        let mut expr = self.term()?;
        while self.matches(&[Type::Greater, Type::GreaterEqual, Type::Less, Type::LessEqual]) {
            let operator = self.previous().clone();
            let right = self.term()?;
            expr = Expr::Binary { left: Box::new(expr), operator, right: Box::new(right) };
        }
        Ok(expr)
    }

    fn term(&mut self) -> ParseResult<Expr> {
        let mut expr = self.factor()?;
        while self.matches(&[Type::Minus, Type::Plus]) {
            let operator = self.previous().clone();
            let right = self.factor()?;
            expr = Expr::Binary { left: Box::new(expr), operator, right: Box::new(right) };
        }
        Ok(expr)
    }

    fn factor(&mut self) -> ParseResult<Expr> {
        let mut expr = self.unary()?;
        while self.matches(&[Type::Slash, Type::Star]) {
            let operator = self.previous().clone();
            let right = self.unary()?;
            expr = Expr::Binary { left: Box::new(expr), operator, right: Box::new(right) };
        }
        Ok(expr)
    }

    fn unary(&mut self) -> ParseResult<Expr> {
        if self.matches(&[Type::Bang, Type::Minus]) {
            let operator = self.previous().clone();
            let right = self.unary()?;
            return Ok(Expr::Unary { operator, right: Box::new(right) });
        }
        self.call()
    }

    fn call(&mut self) -> ParseResult<Expr> {
        let mut expr = self.primary()?;

        loop {
            if self.matches(&[Type::LeftParen]) {
                expr = self.finish_call(expr)?;
            } else if self.matches(&[Type::Dot]) {
                let name = self.consume(Type::Identifier, "Expect property name after '.'.")?;
                expr = Expr::Get { object: Box::new(expr), name };
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// Arguments are parsed at `ternary` rather than `expression` so a bare
    /// comma inside an argument list separates arguments instead of being
    /// consumed by the comma operator.
    fn finish_call(&mut self, callee: Expr) -> ParseResult<Expr> {
        let mut arguments = Vec::new();

        if !self.check(Type::RightParen) {
            loop {
                if arguments.len() >= 255 {
                    let token = self.peek().clone();
                    self.reporter.compile_error(&token, "Can't have more than 255 arguments.");
                }
                arguments.push(self.ternary()?);
                if !self.matches(&[Type::Comma]) {
                    break;
                }
            }
        }

        let paren = self.consume(Type::RightParen, "Expect ')' after arguments.")?;
        Ok(Expr::Call { callee: Box::new(callee), paren, arguments })
    }

    fn primary(&mut self) -> ParseResult<Expr> {
        if self.matches(&[Type::False]) {
            return Ok(Expr::Literal(crate::literal::Literal::Bool(false)));
        }
        if self.matches(&[Type::True]) {
            return Ok(Expr::Literal(crate::literal::Literal::Bool(true)));
        }
        if self.matches(&[Type::Nil]) {
            return Ok(Expr::Literal(crate::literal::Literal::Nil));
        }
        if self.matches(&[Type::Number, Type::String]) {
            let literal = self.previous().literal.clone().expect("scanner always attaches a literal to Number/String tokens");
            return Ok(Expr::Literal(literal));
        }
        if self.matches(&[Type::This]) {
            let keyword = self.previous().clone();
            let id = self.ids.next();
            return Ok(Expr::This { id, keyword });
        }
        if self.matches(&[Type::Identifier]) {
            let name = self.previous().clone();
            let id = self.ids.next();
            return Ok(Expr::Variable { id, name });
        }
        if self.matches(&[Type::LeftParen]) {
            let expr = self.expression()?;
            self.consume(Type::RightParen, "Expect ')' after expression.")?;
            return Ok(Expr::Grouping(Box::new(expr)));
        }

        let token = self.peek().clone();
        Err(ParseError::new(token, "Expect expression."))
    }

    // --- token stream helpers ---

    fn matches(&mut self, types: &[Type]) -> bool {
        if types.iter().any(|t| self.check(*t)) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn check(&self, r#type: Type) -> bool {
        self.peek().r#type == r#type
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.peek().r#type == Type::EOF
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    fn consume(&mut self, r#type: Type, message: &str) -> ParseResult<Token> {
        if self.check(r#type) {
            return Ok(self.advance().clone());
        }
        Err(ParseError::new(self.peek().clone(), message))
    }

    /// Discards tokens until a point that's likely to be a statement
    /// boundary, so one malformed declaration doesn't suppress diagnostics
    /// for the rest of the file.
    fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().r#type == Type::Semicolon {
                return;
            }

            match self.peek().r#type {
                Type::Class | Type::Fun | Type::Var | Type::For | Type::If
                | Type::While | Type::Print | Type::Return => return,
                _ => {},
            }

            self.advance();
        }
    }
}
