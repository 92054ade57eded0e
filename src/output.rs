//! Terminal output for the element CLI.
//!
//! Status lines are printed Cargo-style with a right-aligned coloured verb.
//! Everything goes to stderr so `element list --json` style output on stdout
//! stays clean.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

const VERB_WIDTH: usize = 12;

/// Kind of status line; picks the verb colour and whether `--quiet` keeps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Progress,
    Info,
    Warning,
    Error,
}

impl Tone {
    fn color(self) -> &'static str {
        match self {
            Tone::Progress => GREEN,
            Tone::Info => CYAN,
            Tone::Warning => YELLOW,
            Tone::Error => RED,
        }
    }
}

/// Terminal-aware status printer.
///
/// A quiet printer drops everything but errors, matching `--quiet`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Printer {
    color: bool,
    quiet: bool,
}

impl Printer {
    /// Printer that colours output when stderr is a terminal.
    pub fn new() -> Self {
        Self::with_color(io::stderr().is_terminal())
    }

    /// Printer with colour forced on or off.
    pub fn with_color(color: bool) -> Self {
        Self { color, quiet: false }
    }

    /// Same printer, printing only errors when `quiet` is set.
    pub fn quiet(self, quiet: bool) -> Self {
        Self { quiet, ..self }
    }

    /// e.g. "    Building components"
    pub fn status(&self, verb: &str, message: &str) {
        self.emit(Tone::Progress, verb, message);
    }

    pub fn success(&self, verb: &str, message: &str) {
        self.emit(Tone::Progress, verb, message);
    }

    pub fn info(&self, verb: &str, message: &str) {
        self.emit(Tone::Info, verb, message);
    }

    pub fn warning(&self, verb: &str, message: &str) {
        self.emit(Tone::Warning, verb, message);
    }

    pub fn error(&self, verb: &str, message: &str) {
        self.emit(Tone::Error, verb, message);
    }

    pub fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    pub fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    pub fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// The rendered line, or `None` when this printer suppresses `tone`.
    fn line(&self, tone: Tone, verb: &str, message: &str) -> Option<String> {
        if self.quiet && tone != Tone::Error {
            return None;
        }
        let verb = format!("{verb:>VERB_WIDTH$}");
        let verb = if self.color {
            format!("{BOLD}{}{verb}{RESET}", tone.color())
        } else {
            verb
        };
        Some(format!("{verb} {message}"))
    }

    fn emit(&self, tone: Tone, verb: &str, message: &str) {
        if let Some(line) = self.line(tone, verb, message) {
            let _ = writeln!(io::stderr().lock(), "{line}");
        }
    }
}

/// `plural(1, "component", "components")` → "1 component".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, pluralized)
    }
}

/// Relative display path when under the working directory, absolute otherwise.
pub fn display_path(path: &Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(relative) = path.strip_prefix(&cwd) {
            let s = relative.display().to_string();
            if s.is_empty() {
                return ".".to_string();
            }
            return s;
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "component", "components"), "1 component");
        assert_eq!(plural(0, "example", "examples"), "0 examples");
        assert_eq!(plural(3, "namespace", "namespaces"), "3 namespaces");
    }

    #[test]
    fn test_paint_without_color_is_plain() {
        let printer = Printer::with_color(false);
        assert_eq!(printer.bold("demo-button"), "demo-button");
        assert_eq!(printer.cyan("dist"), "dist");
    }

    #[test]
    fn test_paint_with_color_wraps_codes() {
        let printer = Printer::with_color(true);
        assert_eq!(printer.dim("x"), "\x1b[2mx\x1b[0m");
    }

    #[test]
    fn test_line_right_aligns_verb() {
        let printer = Printer::with_color(false);
        assert_eq!(
            printer.line(Tone::Progress, "Building", "components").as_deref(),
            Some("    Building components")
        );
        assert_eq!(
            Printer::with_color(true).line(Tone::Error, "Failed", "x").as_deref(),
            Some("\x1b[1m\x1b[31m      Failed\x1b[0m x")
        );
    }

    #[test]
    fn test_quiet_keeps_only_errors() {
        let printer = Printer::with_color(false).quiet(true);
        assert_eq!(printer.line(Tone::Progress, "Finished", "Build succeeded!"), None);
        assert_eq!(printer.line(Tone::Info, "Copied", "2 files"), None);
        assert_eq!(printer.line(Tone::Warning, "Missing", "example"), None);
        assert_eq!(
            printer.line(Tone::Error, "Failed", "Build ended with errors").as_deref(),
            Some("      Failed Build ended with errors")
        );
    }

    #[test]
    fn test_display_path_outside_cwd_stays_absolute() {
        let p = Path::new("/nonexistent/path/to/dist");
        assert_eq!(display_path(p), "/nonexistent/path/to/dist");
    }
}
