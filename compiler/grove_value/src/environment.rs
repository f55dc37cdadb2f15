//! Two-level variable environment.
//!
//! Lookups consult the call-local bindings first and fall back to the
//! globals. The evaluator never writes to either level: local bindings are
//! extended by copy (`Bindings::with`) and handed down, and only macros such
//! as `def` write to the globals.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::value::Value;

/// A name -> value map for one environment level.
#[derive(Clone, Debug, Default)]
pub struct Bindings {
    map: FxHashMap<String, Value>,
}

impl Bindings {
    pub fn new() -> Self {
        Bindings::default()
    }

    /// Bind `name` in place, shadowing any previous binding.
    #[inline]
    pub fn define(&mut self, name: &str, value: Value) {
        self.map.insert(name.to_string(), value);
    }

    /// A copy of these bindings with `name` bound to `value`.
    #[must_use]
    pub fn with(&self, name: &str, value: Value) -> Self {
        let mut extended = self.clone();
        extended.define(name, value);
        extended
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.map.get(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Bound names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }
}

/// Shared, interior-mutable global bindings.
///
/// Cloning shares the same map. Functions created by `fn` hold a clone so a
/// later `def` is visible to them.
#[derive(Clone, Default)]
pub struct GlobalEnv(Rc<RefCell<Bindings>>);

impl GlobalEnv {
    pub fn new() -> Self {
        GlobalEnv::default()
    }

    pub fn from_bindings(bindings: Bindings) -> Self {
        GlobalEnv(Rc::new(RefCell::new(bindings)))
    }

    pub fn define(&self, name: &str, value: Value) {
        self.0.borrow_mut().define(name, value);
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.0.borrow().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.borrow().contains(name)
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Copy of the current global bindings.
    pub fn snapshot(&self) -> Bindings {
        self.0.borrow().clone()
    }

    /// A handle that does not keep the bindings alive.
    pub fn downgrade(&self) -> WeakGlobalEnv {
        WeakGlobalEnv(Rc::downgrade(&self.0))
    }
}

/// Non-owning handle to a [`GlobalEnv`].
///
/// Closures stored in the globals reach them through this, so a global
/// environment never owns itself.
#[derive(Clone, Debug)]
pub struct WeakGlobalEnv(Weak<RefCell<Bindings>>);

impl WeakGlobalEnv {
    /// `None` once every `GlobalEnv` handle is gone.
    pub fn upgrade(&self) -> Option<GlobalEnv> {
        self.0.upgrade().map(GlobalEnv)
    }
}

impl fmt::Debug for GlobalEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GlobalEnv({} bindings)", self.len())
    }
}

/// Read-only view of the `(local, global)` pair for one call.
#[derive(Clone, Copy)]
pub struct Environment<'a> {
    local: &'a Bindings,
    global: &'a GlobalEnv,
}

impl<'a> Environment<'a> {
    pub fn new(local: &'a Bindings, global: &'a GlobalEnv) -> Self {
        Environment { local, global }
    }

    /// Local binding first, then global.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        match self.local.get(name) {
            Some(value) => Some(value.clone()),
            None => self.global.get(name),
        }
    }

    #[inline]
    pub fn local(&self) -> &'a Bindings {
        self.local
    }

    #[inline]
    pub fn global(&self) -> &'a GlobalEnv {
        self.global
    }
}
