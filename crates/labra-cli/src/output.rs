//! Output management and formatting.

use std::io;

use console::Term;
use owo_colors::OwoColorize;

use labra_core::{application::ports::Reporter, domain::Platform};

use crate::cli::GlobalArgs;
use crate::config::AppConfig;

/// Status symbols, with ASCII stand-ins for consoles that cannot draw emoji.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Step,
    Success,
    Error,
    Warning,
    Info,
    Version,
}

impl Glyph {
    pub const fn symbol(self, ascii: bool) -> &'static str {
        match (self, ascii) {
            (Self::Step, false) => "\u{1f680}",    // 🚀
            (Self::Step, true) => "->",
            (Self::Success, false) => "\u{2713}", // ✓
            (Self::Success, true) => "OK",
            (Self::Error, false) => "\u{274c}",   // ❌
            (Self::Error, true) => "X",
            (Self::Warning, false) => "\u{26a0}", // ⚠
            (Self::Warning, true) => "!",
            (Self::Info, false) => "\u{2139}",    // ℹ
            (Self::Info, true) => "i",
            (Self::Version, false) => "\u{1f9f0}", // 🧰
            (Self::Version, true) => "version:",
        }
    }
}

/// Manages CLI output based on configuration.
pub struct OutputManager {
    quiet: bool,
    no_color: bool,
    ascii: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        Self {
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color,
            ascii: Platform::current().is_windows(),
            term: Term::stdout(),
        }
    }

    pub fn glyph(&self, glyph: Glyph) -> &'static str {
        glyph.symbol(self.ascii)
    }

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Always written, even in quiet mode.
    pub fn line(&self, msg: &str) -> io::Result<()> {
        self.term.write_line(msg)
    }

    /// Bold cyan step line: `🚀 <msg>`.
    pub fn step(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let glyph = self.glyph(Glyph::Step);
        let line = if self.no_color {
            format!("{glyph} {msg}")
        } else {
            format!("{} {}", glyph, msg.cyan().bold())
        };
        self.term.write_line(&line)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let glyph = self.glyph(Glyph::Success);
        let line = if self.no_color {
            format!("{glyph} {msg}")
        } else {
            format!("{} {}", glyph.green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let glyph = self.glyph(Glyph::Warning);
        let line = if self.no_color {
            format!("{glyph} {msg}")
        } else {
            format!("{} {}", glyph.yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Multi-line messages are indented under the glyph.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let glyph = self.glyph(Glyph::Info);
        let body = msg.replace('\n', "\n   ");
        let line = if self.no_color {
            format!("{glyph} {body}")
        } else {
            format!("{} {}", glyph.blue().bold(), body)
        };
        self.term.write_line(&line)
    }

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

/// Progress from the core pipelines. A failed terminal write is not worth
/// aborting a half-finished bootstrap over.
impl Reporter for OutputManager {
    fn step(&self, message: &str) {
        let _ = OutputManager::step(self, message);
    }

    fn info(&self, message: &str) {
        let _ = OutputManager::info(self, message);
    }

    fn success(&self, message: &str) {
        let _ = OutputManager::success(self, message);
    }

    fn warning(&self, message: &str) {
        let _ = OutputManager::warning(self, message);
    }
}
