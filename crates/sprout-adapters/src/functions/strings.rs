//! `strings_*`: identifier case conversion.

use serde_json::Value;
use sprout_core::domain::{Extension, TemplateFn};

use super::{function, required_str};

#[derive(Debug, Clone, Copy, Default)]
pub struct StringFunctions;

impl Extension for StringFunctions {
    fn namespace(&self) -> &'static str {
        "strings"
    }

    fn functions(&self) -> Vec<(&'static str, TemplateFn)> {
        vec![
            (
                "upper_camel",
                function(|args| upper_camel(required_str(args, "s")?).map(Value::String)),
            ),
            (
                "snake",
                function(|args| Ok(Value::String(split_words(required_str(args, "s")?).join("_")))),
            ),
            (
                "kebab",
                function(|args| Ok(Value::String(split_words(required_str(args, "s")?).join("-")))),
            ),
        ]
    }
}

/// Split on every non-letter and upper-case the first letter of each
/// field, leaving the rest untouched.
///
/// | Input        | Output      |
/// |--------------|-------------|
/// | `"my-app"`   | `"MyApp"`   |
/// | `"go.tool2"` | `"GoTool"`  |
/// | `"myHTTP"`   | `"MyHTTP"`  |
pub fn upper_camel(s: &str) -> Result<String, String> {
    let out: String = s
        .split(|c: char| !c.is_alphabetic())
        .filter(|field| !field.is_empty())
        .map(|field| {
            let mut chars = field.chars();
            chars
                .next()
                .map(|first| first.to_uppercase().chain(chars).collect::<String>())
                .unwrap_or_default()
        })
        .collect();

    if out.is_empty() {
        return Err(format!("{s:?} contains no letters"));
    }
    Ok(out)
}

/// Split an identifier into lower-case words.
///
/// Separators (`_`, `-`, `.`, whitespace) always split. So does a
/// lower-to-upper transition (`myApp`) and the end of an acronym
/// (`HTTPServer` splits before `S`).
pub fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c == '.' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        current.push(c);

        if let Some(&next) = chars.peek() {
            let camel = c.is_lowercase() && next.is_uppercase();
            let acronym_end = c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(char::is_lowercase);
            if camel || acronym_end {
                words.push(current.to_lowercase());
                current.clear();
            }
        }
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }
    words
}
