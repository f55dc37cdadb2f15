//! The default prelude: functions, macros and the keyword registry.
//!
//! Hosts are free to evaluate against bare globals; [`prelude`] is what
//! `Interpreter::new()` starts from.

mod functions;
mod keywords;
mod macros;
mod pattern;

use grove_value::{Bindings, GlobalEnv};

pub use keywords::KeywordRegistry;

/// Fresh globals holding every prelude function and macro.
pub fn prelude() -> GlobalEnv {
    let mut bindings = Bindings::new();
    install(&mut bindings);
    GlobalEnv::from_bindings(bindings)
}

/// Bind the prelude into `bindings`, shadowing existing names.
pub fn install(bindings: &mut Bindings) {
    functions::install(bindings);
    macros::install(bindings);
}

#[cfg(test)]
mod tests;
