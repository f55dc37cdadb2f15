//! Tree builder for Grove.
//!
//! Turns a flat token stream into a [`Wood`]: one tree per top-level form,
//! with bare top-level atoms wrapped as `(identity atom)`. Building never
//! fails; malformed input collapses into a single form that evaluates to an
//! exception value.

mod builder;

pub use builder::{build, TreeBuilder};

// Re-exported so hosts that only build can name the output type.
pub use grove_value::Wood;
