//! Everything the commands print on stdout goes through [`OutputManager`].
//!
//! Diagnostics go to stderr through `tracing` and `CliError`; this type only
//! carries results and progress lines, honouring `--quiet`, `--no-color` and
//! `--output-format`.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::{OwoColorize, Style};
use serde_json::Value;

use crate::cli::global::{GlobalArgs, OutputFormat};

pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    color: bool,
    term: Term,
}

impl OutputManager {
    pub fn new(args: &GlobalArgs) -> Self {
        let format = args.output_format.resolve(io::stdout().is_terminal());
        Self {
            format,
            quiet: args.quiet,
            color: format == OutputFormat::Human && !args.no_color,
            term: Term::stdout(),
        }
    }

    /// Write `line` unless `--quiet` is set.
    fn emit(&self, line: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(line)
    }

    /// `glyph msg`, both painted with `style` when color is on.
    fn marked(&self, glyph: char, style: Style, msg: &str) -> io::Result<()> {
        if self.color {
            self.emit(&format!(
                "{} {}",
                glyph.style(style.bold()),
                msg.style(style)
            ))
        } else {
            self.emit(&format!("{glyph} {msg}"))
        }
    }

    pub fn print(&self, msg: &str) -> io::Result<()> {
        self.emit(msg)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.marked('\u{2713}', Style::new().green(), msg)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.marked('\u{26a0}', Style::new().yellow(), msg)
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.marked('\u{2139}', Style::new().blue(), msg)
    }

    /// Section title, e.g. "Files" in a dry run.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.color {
            self.emit(&text.cyan().bold().to_string())
        } else {
            self.emit(text)
        }
    }

    /// Indented secondary line, dimmed when color is on.
    pub fn detail(&self, text: &str) -> io::Result<()> {
        if self.color {
            self.emit(&format!("  {}", text.dimmed()))
        } else {
            self.emit(&format!("  {text}"))
        }
    }

    /// Pretty JSON on stdout. `--quiet` does not suppress it: it is the
    /// command's result.
    pub fn json(&self, value: &Value) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }
}
