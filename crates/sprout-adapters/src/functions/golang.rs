//! `go_*`: Go source snippets.

use serde_json::Value;
use sprout_core::domain::{Extension, TemplateFn};

use super::{function, required_str, string_list};

#[derive(Debug, Clone, Copy, Default)]
pub struct GoFunctions;

impl Extension for GoFunctions {
    fn namespace(&self) -> &'static str {
        "go"
    }

    fn functions(&self) -> Vec<(&'static str, TemplateFn)> {
        vec![
            (
                "import",
                function(|args| Ok(Value::String(import(&string_list(args, "pkgs")?)))),
            ),
            (
                "func",
                function(|args| {
                    let name = required_str(args, "name")?;
                    Ok(Value::String(func(name, &string_list(args, "args")?)))
                }),
            ),
            (
                "main",
                function(|args| Ok(Value::String(body("main", &string_list(args, "stmts")?)))),
            ),
            (
                "init",
                function(|args| Ok(Value::String(body("init", &string_list(args, "stmts")?)))),
            ),
        ]
    }
}

fn quote(pkg: &str) -> String {
    match pkg.strip_prefix("//") {
        Some(rest) => format!("//\"{}\"", rest.trim()),
        None => format!("\"{pkg}\""),
    }
}

/// An import declaration. Entries starting with `//` are emitted commented
/// out, so a template can suggest a package without importing it.
pub fn import(pkgs: &[String]) -> String {
    match pkgs {
        [] => "import ()".to_owned(),
        [only] if !only.starts_with("//") => format!("import {}", quote(only)),
        _ => {
            let lines: Vec<String> = pkgs.iter().map(|p| format!("\t{}", quote(p))).collect();
            format!("import (\n{}\n)", lines.join("\n"))
        }
    }
}

/// An empty function with the given parameter list.
pub fn func(name: &str, args: &[String]) -> String {
    format!("func {name}({}) {{\n\n}}", args.join(", "))
}

fn body(name: &str, stmts: &[String]) -> String {
    let lines: String = stmts.iter().map(|s| format!("\t{s}\n")).collect();
    format!("func {name}() {{\n{lines}}}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn import_forms() {
        assert_eq!(import(&[]), "import ()");
        assert_eq!(import(&strings(&["fmt"])), "import \"fmt\"");
        assert_eq!(
            import(&strings(&["fmt", "// os"])),
            "import (\n\t\"fmt\"\n\t//\"os\"\n)"
        );
    }

    #[test]
    fn a_single_commented_import_still_uses_a_block() {
        assert_eq!(import(&strings(&["//os"])), "import (\n\t//\"os\"\n)");
    }

    #[test]
    fn func_and_main() {
        assert_eq!(
            func("run", &strings(&["a int", "b string"])),
            "func run(a int, b string) {\n\n}"
        );
        assert_eq!(
            body("main", &strings(&["fmt.Println(1)"])),
            "func main() {\n\tfmt.Println(1)\n}"
        );
        assert_eq!(body("init", &[]), "func init() {\n}");
    }
}
