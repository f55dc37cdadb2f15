//! Default keyword dispatch.

use grove_value::errors::{arity_mismatch, type_mismatch};
use grove_value::{BuiltinRegistry, EvalResult, Value};

use super::functions::lookup;

/// Keywords in call position look themselves up in a collection:
/// `(:k m)` is the value under `:k` in `m` or nil, and `(:k m default)`
/// falls back to `default`.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeywordRegistry;

impl BuiltinRegistry for KeywordRegistry {
    fn dispatch(&self, args_and_keyword: &[Value]) -> EvalResult {
        let Some((keyword, args)) = args_and_keyword.split_last() else {
            return Err(arity_mismatch("keyword lookup", 2, 0));
        };
        if !matches!(keyword, Value::Keyword(_)) {
            return Err(type_mismatch("keyword", keyword.type_name()));
        }
        match args {
            [collection] => Ok(lookup(collection, keyword)?.unwrap_or(Value::Nil)),
            [collection, default] => {
                Ok(lookup(collection, keyword)?.unwrap_or_else(|| default.clone()))
            }
            _ => Err(arity_mismatch(&keyword.to_string(), 1, args.len())),
        }
    }
}
