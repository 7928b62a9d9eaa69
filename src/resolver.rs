use std::collections::HashMap;
use std::mem;

use crate::error::Reporter;
use crate::expr::{Expr, NodeId};
use crate::stmt::{FunctionDecl, Stmt};
use crate::token::Token;

#[derive(Clone, Copy, PartialEq)]
enum FunctionType {
    None,
    Function,
    Initializer,
    Method,
}

#[derive(Clone, Copy, PartialEq)]
enum ClassType {
    None,
    Class,
}

/// Static pass between parsing and evaluation. Walks the tree once to
/// compute, for every variable reference and `this`, how many enclosing
/// block scopes separate it from the scope that declares it (spec §3,
/// "Resolver pass"). The interpreter uses that hop count instead of
/// searching the environment chain at run time, which is what makes a
/// closure see the variable it captured rather than whatever a same-named
/// variable later shadows it with.
///
/// Keyed by [`NodeId`] rather than by token text or token identity: two
/// reads of the same local name are different nodes needing (possibly)
/// different hop counts, and a [`Token`] has no stable address to hash on.
pub struct Resolver<'a> {
    scopes: Vec<HashMap<String, bool>>,
    locals: HashMap<NodeId, usize>,
    current_function: FunctionType,
    current_class: ClassType,
    reporter: &'a mut dyn Reporter,
}

impl<'a> Resolver<'a> {
    pub fn new(reporter: &'a mut dyn Reporter) -> Self {
        Resolver {
            scopes: Vec::new(),
            locals: HashMap::new(),
            current_function: FunctionType::None,
            current_class: ClassType::None,
            reporter,
        }
    }

    /// Resolves a whole program and hands back the id-to-hop-count map the
    /// interpreter needs.
    pub fn resolve(mut self, statements: &[Stmt]) -> HashMap<NodeId, usize> {
        self.resolve_stmts(statements);
        self.locals
    }

    fn resolve_stmts(&mut self, statements: &[Stmt]) {
        for statement in statements {
            self.resolve_stmt(statement);
        }
    }

    fn resolve_function(&mut self, function: &FunctionDecl, kind: FunctionType) {
        let enclosing_function = mem::replace(&mut self.current_function, kind);

        self.begin_scope();
        for param in &function.params {
            self.declare(param);
            self.define(param);
        }
        self.resolve_stmts(&function.body);
        self.end_scope();

        self.current_function = enclosing_function;
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    fn declare(&mut self, name: &Token) {
        let Some(scope) = self.scopes.last_mut() else { return };

        if scope.contains_key(&name.lexeme) {
            self.reporter.compile_error(
                name,
                &format!("Already a variable with name '{}' in this scope.", name.lexeme),
            );
        }
        scope.insert(name.lexeme.clone(), false);
    }

    fn define(&mut self, name: &Token) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.lexeme.clone(), true);
        }
    }

    fn resolve_local(&mut self, id: NodeId, name: &Token) {
        for (depth, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(&name.lexeme) {
                self.locals.insert(id, depth);
                return;
            }
        }
        // Not found in any tracked scope: treated as global, resolved by
        // name lookup at call time.
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expression(expr) => self.resolve_expr(expr),
            Stmt::Print(expr) => self.resolve_expr(expr),
            Stmt::Var { name, initializer } => {
                self.declare(name);
                if let Some(initializer) = initializer {
                    self.resolve_expr(initializer);
                }
                self.define(name);
            },
            Stmt::Block(statements) => {
                self.begin_scope();
                self.resolve_stmts(statements);
                self.end_scope();
            },
            Stmt::If { condition, then_branch, else_branch } => {
                self.resolve_expr(condition);
                self.resolve_stmt(then_branch);
                if let Some(else_branch) = else_branch {
                    self.resolve_stmt(else_branch);
                }
            },
            Stmt::While { condition, body } => {
                self.resolve_expr(condition);
                self.resolve_stmt(body);
            },
            Stmt::Function(function) => {
                self.declare(&function.name);
                self.define(&function.name);
                self.resolve_function(function, FunctionType::Function);
            },
            Stmt::Return { keyword, value } => {
                if self.current_function == FunctionType::None {
                    self.reporter.compile_error(keyword, "Can't return from top-level code.");
                }

                if let Some(value) = value {
                    if self.current_function == FunctionType::Initializer {
                        self.reporter.compile_error(keyword, "Can't return a value from an initializer.");
                    }
                    self.resolve_expr(value);
                }
            },
            Stmt::Class { name, methods } => {
                let enclosing_class = mem::replace(&mut self.current_class, ClassType::Class);

                self.declare(name);
                self.define(name);

                self.begin_scope();
                self.scopes.last_mut().expect("scope just pushed").insert("this".to_string(), true);

                for method in methods {
                    let kind = if method.name.lexeme == "init" {
                        FunctionType::Initializer
                    } else {
                        FunctionType::Method
                    };
                    self.resolve_function(method, kind);
                }

                self.end_scope();
                self.current_class = enclosing_class;
            },
        }
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal(_) => {},
            Expr::Grouping(inner) => self.resolve_expr(inner),
            Expr::Unary { right, .. } => self.resolve_expr(right),
            Expr::Binary { left, right, .. } => {
                self.resolve_expr(left);
                self.resolve_expr(right);
            },
            Expr::Logical { left, right, .. } => {
                self.resolve_expr(left);
                self.resolve_expr(right);
            },
            Expr::Ternary { cond, then_branch, else_branch } => {
                self.resolve_expr(cond);
                self.resolve_expr(then_branch);
                self.resolve_expr(else_branch);
            },
            Expr::Variable { id, name } => {
                if let Some(scope) = self.scopes.last() {
                    if scope.get(&name.lexeme) == Some(&false) {
                        self.reporter.compile_error(
                            name,
                            "Can't read local variable in its own initializer.",
                        );
                    }
                }
                self.resolve_local(*id, name);
            },
            Expr::Assign { id, name, value } => {
                self.resolve_expr(value);
                self.resolve_local(*id, name);
            },
            Expr::Call { callee, arguments, .. } => {
                self.resolve_expr(callee);
                for argument in arguments {
                    self.resolve_expr(argument);
                }
            },
            Expr::Get { object, .. } => self.resolve_expr(object),
            Expr::Set { object, value, .. } => {
                self.resolve_expr(value);
                self.resolve_expr(object);
            },
            Expr::This { id, keyword } => {
                if self.current_class == ClassType::None {
                    self.reporter.compile_error(keyword, "Can't use 'this' outside of a class.");
                    return;
                }
                self.resolve_local(*id, keyword);
            },
        }
    }
}
