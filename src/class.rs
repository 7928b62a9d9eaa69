use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{self, Debug, Display};
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::function::LoxFunction;
use crate::interpreter::Interpreter;
use crate::object::Object;
use crate::token::Token;

/// A class declaration's runtime representation: a name and its methods,
/// each already closed over the environment the class was declared in
/// (spec §3, "Class"). Calling a `Class` constructs an [`Instance`].
#[derive(Debug)]
pub struct Class {
    pub name: String,
    methods: HashMap<String, Rc<LoxFunction>>,
}

impl Class {
    pub fn new(name: String, methods: HashMap<String, Rc<LoxFunction>>) -> Self {
        Class { name, methods }
    }

    pub fn find_method(&self, name: &str) -> Option<Rc<LoxFunction>> {
        self.methods.get(name).cloned()
    }
}

impl Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<class {}>", self.name)
    }
}

impl Class {
    /// A class with an `init` method reports `init`'s arity; otherwise it
    /// takes no arguments.
    pub fn arity(&self) -> usize {
        self.find_method("init").map_or(0, |init| init.arity())
    }

    /// Constructs a fresh instance, invokes `init` on it if the class
    /// defines one, then returns the instance regardless of what `init`'s
    /// body returns (spec §3, "Class": calling a class always yields the
    /// new instance). Takes the class's own `Rc` rather than `&self` since
    /// the new instance needs to share ownership of it.
    pub fn call(class: &Rc<RefCell<Class>>, interpreter: &mut Interpreter<'_>, arguments: Vec<Object>) -> Result<Object, RuntimeError> {
        let instance = Rc::new(RefCell::new(Instance::new(Rc::clone(class))));
        let init = class.borrow().find_method("init");

        if let Some(init) = init {
            init.bind(Object::Instance(Rc::clone(&instance))).call(interpreter, arguments)?;
        }

        Ok(Object::Instance(instance))
    }
}

/// A runtime object created by calling a class: the class it was made from
/// plus its own mutable field map (spec §3, "Instance").
#[derive(Debug)]
pub struct Instance {
    class: Rc<RefCell<Class>>,
    fields: HashMap<String, Object>,
}

impl Instance {
    pub fn new(class: Rc<RefCell<Class>>) -> Self {
        Instance { class, fields: HashMap::new() }
    }

    /// Fields shadow methods: a field is checked first, then the class's
    /// methods, bound to `self_obj` (spec §3, "Method binding").
    pub fn get(&self, name: &Token, self_obj: &Object) -> Result<Object, RuntimeError> {
        if let Some(value) = self.fields.get(&name.lexeme) {
            return Ok(value.clone());
        }

        if let Some(method) = self.class.borrow().find_method(&name.lexeme) {
            return Ok(Object::Function(Rc::new(method.bind(self_obj.clone()))));
        }

        Err(RuntimeError::new(name.clone(), format!("Undefined property '{}'.", name.lexeme)))
    }

    pub fn set(&mut self, name: &Token, value: Object) {
        self.fields.insert(name.lexeme.clone(), value);
    }

    pub fn class_name(&self) -> String {
        self.class.borrow().name.clone()
    }
}

impl Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<instance {}>", self.class_name())
    }
}
