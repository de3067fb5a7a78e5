//! Status lines for the tessera CLI.
//!
//! Lines look like Cargo's: a right-aligned bold verb, then the message.
//! Everything goes to stderr so `-o /dev/stdout` style piping stays clean.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use crate::effect::{Effect, Rendered};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

const VERB_WIDTH: usize = 12;

/// Terminal-aware status printer.
///
/// Colour is used only when stderr is a terminal. A quiet printer drops
/// everything except errors.
pub struct Printer {
    color: bool,
    quiet: bool,
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
            quiet: false,
        }
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// e.g. "    Decoding photo.jpg"
    pub fn status(&self, verb: &str, message: &str) {
        self.line(GREEN, verb, message, false);
    }

    pub fn success(&self, verb: &str, message: &str) {
        self.line(GREEN, verb, message, false);
    }

    pub fn info(&self, verb: &str, message: &str) {
        self.line(CYAN, verb, message, false);
    }

    pub fn warning(&self, verb: &str, message: &str) {
        self.line(YELLOW, verb, message, false);
    }

    /// Errors are printed even when quiet.
    pub fn error(&self, verb: &str, message: &str) {
        self.line(RED, verb, message, true);
    }

    /// Report what a finished effect wrote to `output`.
    pub fn rendered(&self, effect: Effect, rendered: &Rendered, output: &Path) {
        if effect.is_triangulation() {
            self.info("Painted", &stroke_summary(rendered));
        }

        let (width, height) = rendered.image.dimensions();
        self.success(
            "Finished",
            &format!("{} -> {} ({}x{})", effect, display_path(output), width, height),
        );
    }

    fn line(&self, color: &str, verb: &str, message: &str, always: bool) {
        if self.quiet && !always {
            return;
        }

        let mut stderr = io::stderr().lock();
        let _ = if self.color {
            writeln!(stderr, "{BOLD}{color}{verb:>VERB_WIDTH$}{RESET} {message}")
        } else {
            writeln!(stderr, "{verb:>VERB_WIDTH$} {message}")
        };
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

/// e.g. "58517 triangles (1203344 px, 12 empty)"
pub fn stroke_summary(rendered: &Rendered) -> String {
    let mut summary = format!(
        "{} ({} px",
        plural(rendered.triangles, "triangle", "triangles"),
        rendered.stats.painted
    );
    if rendered.stats.empty > 0 {
        summary.push_str(&format!(", {} empty", rendered.stats.empty));
    }
    summary.push(')');
    summary
}

/// `plural(1, "triangle", "triangles")` → "1 triangle".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, pluralized)
    }
}

/// Path relative to the working directory when it lies below it.
pub fn display_path(path: &Path) -> String {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(|p| p.display().to_string()))
        .map(|s| if s.is_empty() { ".".to_string() } else { s })
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::CompositeStats;
    use image::RgbaImage;

    fn rendered(triangles: usize, painted: usize, empty: usize) -> Rendered {
        Rendered {
            image: RgbaImage::new(1, 1),
            triangles,
            stats: CompositeStats {
                triangles,
                empty,
                painted,
                clipped: 0,
            },
        }
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "triangle", "triangles"), "1 triangle");
        assert_eq!(plural(0, "effect", "effects"), "0 effects");
        assert_eq!(plural(5, "triangle", "triangles"), "5 triangles");
    }

    #[test]
    fn test_stroke_summary() {
        assert_eq!(stroke_summary(&rendered(1, 40, 0)), "1 triangle (40 px)");
        assert_eq!(
            stroke_summary(&rendered(300, 9000, 12)),
            "300 triangles (9000 px, 12 empty)"
        );
    }

    #[test]
    fn test_display_path_relative() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(display_path(&cwd.join("output.png")), "output.png");
        assert_eq!(display_path(&cwd), ".");
    }

    #[test]
    fn test_display_path_outside_cwd() {
        let p = Path::new("/nonexistent/tessera/out.png");
        assert_eq!(display_path(p), "/nonexistent/tessera/out.png");
    }
}
