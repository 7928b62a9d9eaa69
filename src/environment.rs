use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::RuntimeError;
use crate::object::Object;
use crate::token::Token;

/// A lexical scope: a name-to-value map plus a link to the scope it's
/// nested in. Function calls, blocks, and closures each get their own
/// environment chained onto the one active when they were created (spec
/// §3, "Environment").
/// A variable slot: absent (no entry in the map at all), present but
/// uninitialized (`var x;` with no initializer), or present with a value
/// (spec §3, "Environment" invariant). `None` here is the middle state, not
/// the first — `get`/`get_at` distinguish "no such variable" from "declared
/// but never assigned" by whether the key is in the map at all.
type Slot = Option<Object>;

#[derive(Debug)]
pub struct Environment {
    pub enclosing: Option<Rc<RefCell<Environment>>>,
    variables: HashMap<String, Slot>,
}

impl Environment {
    pub fn new(enclosing: Option<Rc<RefCell<Environment>>>) -> Rc<RefCell<Environment>> {
        Rc::new(RefCell::new(Environment { enclosing, variables: HashMap::new() }))
    }

    /// Declares (or redeclares) a variable in this scope, optionally leaving
    /// it uninitialized (`value == None`). Redeclaration is allowed at the
    /// top level and inside blocks; the resolver is what rejects it within a
    /// single local scope.
    pub fn define(&mut self, name: &str, value: Slot) {
        self.variables.insert(name.to_string(), value);
    }

    fn ancestor(this: &Rc<RefCell<Environment>>, distance: usize) -> Rc<RefCell<Environment>> {
        let mut environment = Rc::clone(this);
        for _ in 0..distance {
            let parent = environment
                .borrow()
                .enclosing
                .clone()
                .expect("resolver-computed hop count matches the live environment chain");
            environment = parent;
        }
        environment
    }

    pub fn assign(this: &Rc<RefCell<Environment>>, name: &Token, value: Object) -> Result<(), RuntimeError> {
        if this.borrow().variables.contains_key(&name.lexeme) {
            this.borrow_mut().variables.insert(name.lexeme.clone(), Some(value));
            return Ok(());
        }

        let enclosing = this.borrow().enclosing.clone();
        if let Some(enclosing) = enclosing {
            return Environment::assign(&enclosing, name, value);
        }

        Err(RuntimeError::new(name.clone(), format!("Undefined variable '{}'.", name.lexeme)))
    }

    pub fn assign_at(this: &Rc<RefCell<Environment>>, distance: usize, name: &Token, value: Object) {
        Environment::ancestor(this, distance).borrow_mut().variables.insert(name.lexeme.clone(), Some(value));
    }

    /// Distinguishes three outcomes per spec §3: no such variable, a
    /// variable declared but never assigned (`slot == None`), and a live
    /// value.
    fn read_slot(name: &Token, slot: Option<&Slot>) -> Result<Object, RuntimeError> {
        match slot {
            Some(Some(value)) => Ok(value.clone()),
            Some(None) => Err(RuntimeError::new(name.clone(), format!("Variable '{}' is not initialized.", name.lexeme))),
            None => Err(RuntimeError::new(name.clone(), format!("Undefined variable '{}'.", name.lexeme))),
        }
    }

    pub fn get(this: &Rc<RefCell<Environment>>, name: &Token) -> Result<Object, RuntimeError> {
        if let Some(slot) = this.borrow().variables.get(&name.lexeme) {
            return Environment::read_slot(name, Some(slot));
        }

        let enclosing = this.borrow().enclosing.clone();
        if let Some(enclosing) = enclosing {
            return Environment::get(&enclosing, name);
        }

        Environment::read_slot(name, None)
    }

    pub fn get_at(this: &Rc<RefCell<Environment>>, distance: usize, name: &Token) -> Result<Object, RuntimeError> {
        let ancestor = Environment::ancestor(this, distance);
        let slot = ancestor.borrow().variables.get(&name.lexeme).cloned();
        Environment::read_slot(name, slot.as_ref())
    }
}
