//! Stack safety and depth accounting for recursive evaluation.
//!
//! Evaluation recurses once per nested tree, per macro expansion and per
//! call into a `fn` closure. Two mechanisms keep deep input from crashing
//! the host:
//!
//! - [`ensure_sufficient_stack`] grows the native stack on demand
//!   (`stacker`; a passthrough on WASM).
//! - [`CallDepth`] enforces the evaluation mode's depth budget and turns
//!   overflow into a `RecursionLimitExceeded` fault.

use std::cell::Cell;
use std::rc::Rc;

use grove_value::errors::recursion_limit_exceeded;
use grove_value::EvalError;

/// Ensure sufficient stack space is available before executing `f`.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Minimum stack space to keep available (100KB red zone).
    const RED_ZONE: usize = 100 * 1024;

    /// Stack space to allocate when growing (1MB).
    const STACK_PER_RECURSION: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version - just call directly (WASM has its own stack management).
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Live evaluation depth, shared by an interpreter and every closure it
/// hands out, so calls through `fn` values count toward the same budget.
#[derive(Clone, Debug)]
pub struct CallDepth {
    current: Rc<Cell<usize>>,
    max_depth: Option<usize>,
}

impl CallDepth {
    /// `None` means unlimited.
    pub fn new(max_depth: Option<usize>) -> Self {
        CallDepth {
            current: Rc::new(Cell::new(0)),
            max_depth,
        }
    }

    /// Enter one level. The returned guard leaves it again when dropped.
    ///
    /// The level is NOT entered when the budget is exhausted.
    pub fn enter(&self) -> Result<DepthGuard, EvalError> {
        let depth = self.current.get();
        if let Some(max) = self.max_depth {
            if depth >= max {
                return Err(recursion_limit_exceeded(max));
            }
        }
        self.current.set(depth.saturating_add(1));
        Ok(DepthGuard {
            current: Rc::clone(&self.current),
        })
    }

    #[inline]
    pub fn current(&self) -> usize {
        self.current.get()
    }

    #[inline]
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }
}

/// RAII guard for one entered level of [`CallDepth`].
#[must_use = "dropping the guard immediately leaves the level again"]
pub struct DepthGuard {
    current: Rc<Cell<usize>>,
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        self.current.set(self.current.get().saturating_sub(1));
    }
}
