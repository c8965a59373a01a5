//! Template function extensions.
//!
//! Each extension publishes its functions under a namespace prefix:
//!
//! | Extension        | Functions                                                   |
//! |------------------|-------------------------------------------------------------|
//! | `TimeFunctions`  | `time_now`, `time_year`, `time_date`, `time_rfc3339`, …     |
//! | `StringFunctions`| `strings_upper_camel`, `strings_snake`, `strings_kebab`     |
//! | `GoFunctions`    | `go_import`, `go_func`, `go_main`, `go_init`                |
//! | `CmpFunctions`   | `cmp_equal`                                                 |
//! | `UserFunctions`  | `user_name`, `user_email`                                   |
//!
//! Template engines pass keyword arguments, e.g.
//! `{{ go_import(pkgs=["fmt", "os"]) }}`.

mod cmp;
mod golang;
mod strings;
mod time;
mod user;

pub use cmp::CmpFunctions;
pub use golang::GoFunctions;
pub use strings::StringFunctions;
pub use time::TimeFunctions;
pub use user::UserFunctions;

use std::sync::Arc;

use serde_json::Value;
use sprout_core::{
    domain::{FunctionArgs, FunctionRegistry, TemplateFn, UserInfo},
    error::SproutResult,
};

/// Registry with every standard extension, bound to `user`.
pub fn standard_registry(user: Option<&UserInfo>) -> SproutResult<FunctionRegistry> {
    let mut registry = FunctionRegistry::new();
    registry.register(&TimeFunctions::now())?;
    registry.register(&StringFunctions)?;
    registry.register(&GoFunctions)?;
    registry.register(&CmpFunctions)?;
    registry.register(&UserFunctions::new(user.cloned().unwrap_or_default()))?;
    Ok(registry)
}

// ── Argument helpers ──────────────────────────────────────────────────────────

pub(crate) fn function(
    f: impl Fn(&FunctionArgs) -> Result<Value, String> + Send + Sync + 'static,
) -> TemplateFn {
    Arc::new(f)
}

pub(crate) fn required<'a>(args: &'a FunctionArgs, key: &str) -> Result<&'a Value, String> {
    args.get(key)
        .ok_or_else(|| format!("missing argument `{key}`"))
}

pub(crate) fn required_str<'a>(args: &'a FunctionArgs, key: &str) -> Result<&'a str, String> {
    required(args, key)?
        .as_str()
        .ok_or_else(|| format!("argument `{key}` must be a string"))
}

pub(crate) fn optional_str<'a>(args: &'a FunctionArgs, key: &str) -> Result<Option<&'a str>, String> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(format!("argument `{key}` must be a string")),
    }
}

/// A string or a list of strings; absent means empty.
pub(crate) fn string_list(args: &FunctionArgs, key: &str) -> Result<Vec<String>, String> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(s)) => Ok(vec![s.clone()]),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_owned)
                    .ok_or_else(|| format!("argument `{key}` must contain only strings"))
            })
            .collect(),
        Some(_) => Err(format!("argument `{key}` must be a string or a list of strings")),
    }
}

#[cfg(test)]
pub(crate) fn args(pairs: &[(&str, Value)]) -> FunctionArgs {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), v.clone()))
        .collect()
}
