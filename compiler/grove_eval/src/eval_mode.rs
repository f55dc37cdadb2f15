//! Evaluation modes.
//!
//! The mode is the interpreter's configuration knob for resource policy.
//! Today that is the recursion-depth budget.

/// Evaluation mode — determines interpreter limits via match dispatch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum EvalMode {
    /// Standard mode: unbounded depth on native targets, where `stacker`
    /// grows the stack; 200 on WASM.
    #[default]
    Interpret,
    /// Caller-chosen depth budget. Exceeding it yields a
    /// `RecursionLimitExceeded` exception value.
    Bounded {
        /// Maximum nesting of tree evaluations, macro expansions and calls.
        max_depth: usize,
    },
}

impl EvalMode {
    /// Maximum recursion depth, or `None` for unlimited.
    #[inline]
    pub fn max_recursion_depth(&self) -> Option<usize> {
        match self {
            Self::Interpret => {
                #[cfg(target_arch = "wasm32")]
                {
                    Some(200)
                }
                #[cfg(not(target_arch = "wasm32"))]
                {
                    None
                }
            }
            Self::Bounded { max_depth } => Some(*max_depth),
        }
    }
}
