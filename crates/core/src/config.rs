//! Render options and the fixed settings the parser and renderer share.

use std::io::{self, Write};

use crate::terminal::{SystemTerminal, Terminal};

/// Name of the flag appended to every parse call; typed as `-h`.
pub const HELP_FLAG_NAME: &str = "h";
/// Description listed next to `-h` in the help page.
pub const HELP_FLAG_DESCRIPTION: &str = "Display help information.";

/// Spaces between the widest call-form column and the descriptions.
pub const COLUMN_PADDING: usize = 2;
/// Marks required arguments in the help page.
pub const REQUIRED_GLYPH: &str = "*";
/// Title of the diagnostics section.
pub const ERRORS_TITLE: &str = "Errors";

/// Terminal type variable; control sequences are off when it is unset or dumb.
pub const TERM_VARIABLE: &str = "TERM";
pub const DUMB_TERMINAL: &str = "dumb";
/// <https://no-color.org>
pub const NO_COLOR_VARIABLE: &str = "NO_COLOR";
/// Consulted in order; the first non-empty one decides the codeset.
pub const LOCALE_VARIABLES: [&str; 3] = ["LC_ALL", "LC_CTYPE", "LANG"];

/// Caller-supplied settings for a parse call and the help it may render.
///
/// The output sink defaults to stderr; swap it with [`Options::output`].
///
/// # Examples
///
/// ```
/// use cmdline_core::config::Options;
/// use cmdline_core::terminal::Capabilities;
///
/// let options = Options::new("AbyssFreetype")
///     .description("Cmdline utility for use of AbyssFreetype library")
///     .terminal(Capabilities::none())
///     .output(Vec::<u8>::new());
///
/// assert!(options.help_on_failure);
/// assert!(options.output.is_empty());
/// ```
pub struct Options<W = io::Stderr> {
    /// Shown above the argument listing.
    pub description: String,
    /// Title of the help box.
    pub name: String,
    pub output: W,
    /// Render help automatically when parsing fails.
    pub help_on_failure: bool,
    /// Allow colors and box drawing when the terminal supports them.
    pub term_colors: bool,
    /// Log the resolved invocation at `info` level after scanning.
    pub log_command: bool,
    pub terminal: Box<dyn Terminal>,
}

impl Options {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            description: String::new(),
            name: name.to_string(),
            output: io::stderr(),
            help_on_failure: true,
            term_colors: true,
            log_command: false,
            terminal: Box::new(SystemTerminal),
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new("")
    }
}

impl<W: Write> Options<W> {
    #[must_use]
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    #[must_use]
    pub fn help_on_failure(mut self, enabled: bool) -> Self {
        self.help_on_failure = enabled;
        self
    }

    #[must_use]
    pub fn term_colors(mut self, enabled: bool) -> Self {
        self.term_colors = enabled;
        self
    }

    #[must_use]
    pub fn log_command(mut self, enabled: bool) -> Self {
        self.log_command = enabled;
        self
    }

    /// Replaces the capability probe.
    #[must_use]
    pub fn terminal(mut self, terminal: impl Terminal + 'static) -> Self {
        self.terminal = Box::new(terminal);
        self
    }

    /// Replaces the output sink.
    #[must_use]
    pub fn output<O: Write>(self, output: O) -> Options<O> {
        Options {
            description: self.description,
            name: self.name,
            output,
            help_on_failure: self.help_on_failure,
            term_colors: self.term_colors,
            log_command: self.log_command,
            terminal: self.terminal,
        }
    }
}
