use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

use crate::class::Class;
use crate::environment::Environment;
use crate::error::{Reporter, RuntimeError, Signal};
use crate::expr::{Expr, NodeId};
use crate::function::{LoxFunction, NativeFunction};
use crate::literal::Literal;
use crate::object::{Callable, Object};
use crate::stmt::Stmt;
use crate::token::{Token, Type};

/// Walks the statement/expression tree produced by the parser and resolver,
/// evaluating it for effect (spec §4.4, "Interpreter"). Holds a chain of
/// environments rooted at `globals` and the hop-count map the resolver
/// computed, so a local variable reference is a direct jump up the chain
/// rather than a name search.
pub struct Interpreter<'a> {
    pub globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<NodeId, usize>,
    reporter: &'a mut dyn Reporter,
    stdout: &'a mut dyn Write,
}

impl<'a> Interpreter<'a> {
    pub fn new(reporter: &'a mut dyn Reporter, stdout: &'a mut dyn Write) -> Self {
        let globals = Environment::new(None);
        Self::define_natives(&globals);
        Self::with_globals(globals, reporter, stdout)
    }

    /// Builds an interpreter over an already-populated `globals`, so a
    /// long-lived caller (the REPL) can keep the same global environment
    /// across many `run`s while handing each one a fresh reporter and
    /// output sink (spec §6, "REPL").
    pub fn with_globals(globals: Rc<RefCell<Environment>>, reporter: &'a mut dyn Reporter, stdout: &'a mut dyn Write) -> Self {
        Interpreter {
            environment: Rc::clone(&globals),
            globals,
            locals: HashMap::new(),
            reporter,
            stdout,
        }
    }

    /// Populates a fresh environment with the built-in natives (just
    /// `clock`, per the Non-goals).
    pub fn define_natives(globals: &Rc<RefCell<Environment>>) {
        for native in NativeFunction::globals() {
            let name = native.name.clone();
            globals.borrow_mut().define(&name, Some(Object::from(native)));
        }
    }

    /// Installs the hop-count map the resolver computed for this program.
    /// Must run after resolving and before `interpret` (spec §2, step 4).
    pub fn resolve(&mut self, locals: HashMap<NodeId, usize>) {
        self.locals = locals;
    }

    /// Executes a program's statements in order. Stops at the first runtime
    /// error: the current top-level statement aborts, the error is
    /// reported, and nothing after it runs (spec §5).
    pub fn interpret(&mut self, statements: &[Stmt]) {
        for statement in statements {
            if let Err(signal) = self.execute(statement) {
                match signal {
                    Signal::Error(error) => error.throw(self.reporter),
                    Signal::Return(_) => unreachable!("return outside a function is a resolver error"),
                }
                return;
            }
        }
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<(), Signal> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(())
            },
            Stmt::Print(expr) => {
                let value = self.evaluate(expr)?;
                writeln!(self.stdout, "{value}").expect("stdout sink accepts writes");
                Ok(())
            },
            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(expr) => Some(self.evaluate(expr)?),
                    None => None,
                };
                self.environment.borrow_mut().define(&name.lexeme, value);
                Ok(())
            },
            Stmt::Block(statements) => {
                let block_env = Environment::new(Some(Rc::clone(&self.environment)));
                self.execute_block(statements, block_env)
            },
            Stmt::If { condition, then_branch, else_branch } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(())
                }
            },
            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    self.execute(body)?;
                }
                Ok(())
            },
            Stmt::Function(declaration) => {
                let function = LoxFunction::new(Rc::clone(declaration), Rc::clone(&self.environment), false);
                self.environment.borrow_mut().define(&declaration.name.lexeme, Some(Object::from(function)));
                Ok(())
            },
            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Object::nil(),
                };
                Err(Signal::Return(value))
            },
            Stmt::Class { name, methods } => {
                self.environment.borrow_mut().define(&name.lexeme, Some(Object::nil()));

                let mut methods_map = HashMap::new();
                for method in methods {
                    let is_initializer = method.name.lexeme == "init";
                    let function = LoxFunction::new(Rc::clone(method), Rc::clone(&self.environment), is_initializer);
                    methods_map.insert(method.name.lexeme.clone(), Rc::new(function));
                }

                let class = Rc::new(RefCell::new(Class::new(name.lexeme.clone(), methods_map)));
                Environment::assign(&self.environment, name, Object::Class(class))?;
                Ok(())
            },
        }
    }

    /// Runs `statements` under `environment`, restoring the previous
    /// environment on every exit path, including a thrown signal (spec
    /// §4.4, "Block").
    pub fn execute_block(&mut self, statements: &[Stmt], environment: Rc<RefCell<Environment>>) -> Result<(), Signal> {
        let previous = std::mem::replace(&mut self.environment, environment);

        let mut result = Ok(());
        for statement in statements {
            if let Err(signal) = self.execute(statement) {
                result = Err(signal);
                break;
            }
        }

        self.environment = previous;
        result
    }

    fn evaluate(&mut self, expr: &Expr) -> Result<Object, RuntimeError> {
        match expr {
            Expr::Literal(literal) => Ok(Object::Literal(literal.clone())),
            Expr::Grouping(inner) => self.evaluate(inner),
            Expr::Unary { operator, right } => self.evaluate_unary(operator, right),
            Expr::Binary { left, operator, right } => self.evaluate_binary(left, operator, right),
            Expr::Logical { left, operator, right } => self.evaluate_logical(left, operator, right),
            Expr::Ternary { cond, then_branch, else_branch } => {
                if self.evaluate(cond)?.is_truthy() {
                    self.evaluate(then_branch)
                } else {
                    self.evaluate(else_branch)
                }
            },
            Expr::Variable { id, name } => self.look_up_variable(*id, name),
            Expr::This { id, keyword } => self.look_up_variable(*id, keyword),
            Expr::Assign { id, name, value } => {
                let value = self.evaluate(value)?;
                match self.locals.get(id) {
                    Some(&distance) => Environment::assign_at(&self.environment, distance, name, value.clone()),
                    None => Environment::assign(&self.globals, name, value.clone())?,
                }
                Ok(value)
            },
            Expr::Call { callee, paren, arguments } => self.evaluate_call(callee, paren, arguments),
            Expr::Get { object, name } => {
                let object = self.evaluate(object)?;
                match object {
                    Object::Instance(instance) => {
                        let self_obj = Object::Instance(Rc::clone(&instance));
                        instance.borrow().get(name, &self_obj)
                    },
                    _ => Err(RuntimeError::new(name.clone(), "Only instances have properties.")),
                }
            },
            Expr::Set { object, name, value } => {
                let object = self.evaluate(object)?;
                match object {
                    Object::Instance(instance) => {
                        let value = self.evaluate(value)?;
                        instance.borrow_mut().set(name, value.clone());
                        Ok(value)
                    },
                    _ => Err(RuntimeError::new(name.clone(), "Only instances have fields.")),
                }
            },
        }
    }

    fn look_up_variable(&self, id: NodeId, name: &Token) -> Result<Object, RuntimeError> {
        match self.locals.get(&id) {
            Some(&distance) => Environment::get_at(&self.environment, distance, name),
            None => Environment::get(&self.globals, name),
        }
    }

    fn evaluate_unary(&mut self, operator: &Token, right: &Expr) -> Result<Object, RuntimeError> {
        let right = self.evaluate(right)?;

        match operator.r#type {
            Type::Minus => {
                let n = right
                    .as_number()
                    .ok_or_else(|| RuntimeError::new(operator.clone(), "Operand must be a number."))?;
                Ok(Object::from(-n))
            },
            Type::Bang => Ok(Object::from(!right.is_truthy())),
            _ => unreachable!("parser only produces Unary with '-' or '!'"),
        }
    }

    fn evaluate_logical(&mut self, left: &Expr, operator: &Token, right: &Expr) -> Result<Object, RuntimeError> {
        let left = self.evaluate(left)?;

        let short_circuits = match operator.r#type {
            Type::Or => left.is_truthy(),
            Type::And => !left.is_truthy(),
            _ => unreachable!("parser only produces Logical with 'or' or 'and'"),
        };

        if short_circuits {
            Ok(left)
        } else {
            self.evaluate(right)
        }
    }

    fn evaluate_binary(&mut self, left: &Expr, operator: &Token, right: &Expr) -> Result<Object, RuntimeError> {
        let left = self.evaluate(left)?;
        let right = self.evaluate(right)?;

        match operator.r#type {
            Type::Comma => Ok(right),
            Type::EqualEqual => Ok(Object::from(left == right)),
            Type::BangEqual => Ok(Object::from(left != right)),
            Type::Plus => match (&left, &right) {
                (Object::Literal(Literal::Number(l)), Object::Literal(Literal::Number(r))) => Ok(Object::from(l + r)),
                (Object::Literal(Literal::String(l)), Object::Literal(Literal::String(r))) => {
                    Ok(Object::from(format!("{l}{r}")))
                },
                _ => Err(RuntimeError::new(operator.clone(), "Operands must be two numbers or two strings.")),
            },
            Type::Minus => numeric_binary(operator, left, right, |l, r| Object::from(l - r)),
            Type::Star => numeric_binary(operator, left, right, |l, r| Object::from(l * r)),
            Type::Slash => numeric_binary(operator, left, right, |l, r| Object::from(l / r)),
            Type::Greater => numeric_binary(operator, left, right, |l, r| Object::from(l > r)),
            Type::GreaterEqual => numeric_binary(operator, left, right, |l, r| Object::from(l >= r)),
            Type::Less => numeric_binary(operator, left, right, |l, r| Object::from(l < r)),
            Type::LessEqual => numeric_binary(operator, left, right, |l, r| Object::from(l <= r)),
            _ => unreachable!("parser only produces Binary with an arithmetic, comparison, equality or comma operator"),
        }
    }

    fn evaluate_call(&mut self, callee: &Expr, paren: &Token, arguments: &[Expr]) -> Result<Object, RuntimeError> {
        let callee = self.evaluate(callee)?;

        let mut args = Vec::with_capacity(arguments.len());
        for argument in arguments {
            args.push(self.evaluate(argument)?);
        }

        let arity = match &callee {
            Object::Function(f) => f.arity(),
            Object::NativeFunction(f) => f.arity(),
            Object::Class(c) => c.borrow().arity(),
            _ => return Err(RuntimeError::new(paren.clone(), "Can only call functions and classes.")),
        };

        if args.len() != arity {
            return Err(RuntimeError::new(
                paren.clone(),
                format!("Expected {arity} arguments but got {}.", args.len()),
            ));
        }

        match callee {
            Object::Function(f) => f.call(self, args),
            Object::NativeFunction(f) => f.call(self, args),
            Object::Class(c) => Class::call(&c, self, args),
            _ => unreachable!("already matched above"),
        }
    }
}

fn numeric_binary(operator: &Token, left: Object, right: Object, op: impl Fn(f64, f64) -> Object) -> Result<Object, RuntimeError> {
    match (left.as_number(), right.as_number()) {
        (Some(l), Some(r)) => Ok(op(l, r)),
        _ => Err(RuntimeError::new(operator.clone(), "Operands must be numbers.")),
    }
}
