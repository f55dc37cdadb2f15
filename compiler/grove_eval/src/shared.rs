//! Shared builtin registry wrapper.
//!
//! Interpreters and every closure they create dispatch keywords through
//! the same registry, so it is held behind an `Rc` newtype.

use std::fmt;
use std::rc::Rc;

use grove_value::BuiltinRegistry;

/// Shared, immutable handle to a [`BuiltinRegistry`].
#[derive(Clone)]
pub struct SharedBuiltins(Rc<dyn BuiltinRegistry>);

impl SharedBuiltins {
    /// Create a new shared handle from an owned registry.
    pub fn new(registry: impl BuiltinRegistry + 'static) -> Self {
        SharedBuiltins(Rc::new(registry))
    }
}

impl std::ops::Deref for SharedBuiltins {
    type Target = dyn BuiltinRegistry;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

impl fmt::Debug for SharedBuiltins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedBuiltins(..)")
    }
}
