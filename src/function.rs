use std::cell::RefCell;
use std::fmt::{self, Debug, Display};
use std::rc::Rc;

use crate::environment::Environment;
use crate::error::{RuntimeError, Signal};
use crate::interpreter::Interpreter;
use crate::object::{Callable, Object};
use crate::stmt::FunctionDecl;
use crate::token::{Token, Type};

/// A user-defined function or method: its declaration plus the environment
/// active at the point it was declared (spec §3, "Function (user)"). The
/// captured closure is what lets a function returned from another function
/// keep seeing the outer function's locals after that call has returned.
#[derive(Debug)]
pub struct LoxFunction {
    pub declaration: Rc<FunctionDecl>,
    closure: Rc<RefCell<Environment>>,
    is_initializer: bool,
}

impl LoxFunction {
    pub fn new(declaration: Rc<FunctionDecl>, closure: Rc<RefCell<Environment>>, is_initializer: bool) -> Self {
        LoxFunction { declaration, closure, is_initializer }
    }

    /// Produces a copy of this function with `this` bound to `instance` in
    /// a fresh environment parented on the method's original closure (spec
    /// §3, "Method binding"). Called whenever a method is looked up off an
    /// instance, not just at call time, so the bound method can be stored
    /// and invoked later.
    pub fn bind(&self, instance: Object) -> LoxFunction {
        let environment = Environment::new(Some(Rc::clone(&self.closure)));
        environment.borrow_mut().define("this", Some(instance));
        LoxFunction::new(Rc::clone(&self.declaration), environment, self.is_initializer)
    }
}

impl Callable for LoxFunction {
    /// Binds parameters in a fresh environment parented on the closure and
    /// runs the body there. `return` surfaces as `Signal::Return` and is
    /// caught here, not propagated; falling off the end of the body
    /// returns `nil`. An initializer always returns `this` regardless of
    /// what its body returns, so `Class` calls never need to special-case
    /// an explicit bare `return;` inside `init` (spec §3, "Class").
    fn call(&self, interpreter: &mut Interpreter<'_>, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        let environment = Environment::new(Some(Rc::clone(&self.closure)));

        for (param, arg) in self.declaration.params.iter().zip(arguments.into_iter()) {
            environment.borrow_mut().define(&param.lexeme, Some(arg));
        }

        match interpreter.execute_block(&self.declaration.body, environment) {
            Ok(()) => {
                if self.is_initializer {
                    Environment::get_at(&self.closure, 0, &this_token())
                } else {
                    Ok(Object::nil())
                }
            },
            Err(Signal::Return(value)) => {
                if self.is_initializer {
                    Environment::get_at(&self.closure, 0, &this_token())
                } else {
                    Ok(value)
                }
            },
            Err(Signal::Error(error)) => Err(error),
        }
    }

    fn arity(&self) -> usize {
        self.declaration.params.len()
    }
}

fn this_token() -> Token {
    Token::new(Type::This, "this".to_string(), None, 0)
}

impl Display for LoxFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}>", self.declaration.name.lexeme)
    }
}

/// A function implemented in the interpreter's own host language rather
/// than in Lox (spec §3, "Function (native)"). The only one the language
/// requires is `clock`.
#[derive(Clone)]
pub struct NativeFunction {
    pub name: String,
    arity: usize,
    function: fn(Vec<Object>) -> Object,
}

impl Callable for NativeFunction {
    fn call(&self, _interpreter: &mut Interpreter<'_>, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        Ok((self.function)(arguments))
    }

    fn arity(&self) -> usize {
        self.arity
    }
}

impl NativeFunction {
    /// The fixed set of natives bound into the global scope at startup. No
    /// native beyond `clock` is in scope, per the Non-goals.
    pub fn globals() -> Vec<NativeFunction> {
        vec![NativeFunction {
            name: "clock".to_string(),
            arity: 0,
            function: |_| {
                let now = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .expect("system clock is after the Unix epoch")
                    .as_secs_f64();
                Object::from(now)
            },
        }]
    }
}

impl Display for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn {}>", self.name)
    }
}

impl Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn {}>", self.name)
    }
}
