//! `cmp_equal`: deep equality of any two values.

use serde_json::Value;
use sprout_core::domain::{Extension, TemplateFn};

use super::{function, required};

#[derive(Debug, Clone, Copy, Default)]
pub struct CmpFunctions;

impl Extension for CmpFunctions {
    fn namespace(&self) -> &'static str {
        "cmp"
    }

    fn functions(&self) -> Vec<(&'static str, TemplateFn)> {
        vec![(
            "equal",
            function(|args| Ok(Value::Bool(required(args, "a")? == required(args, "b")?))),
        )]
    }
}
