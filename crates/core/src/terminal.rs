//! Terminal capability queries consulted by the renderer.
//!
//! The renderer only ever asks two questions: can control sequences be
//! emitted, and is it safe to print box-drawing glyphs. [`SystemTerminal`]
//! answers them for the running process; [`Capabilities`] carries fixed
//! answers so callers and tests can decide without a real terminal.

use std::env;
use std::io::stderr;

use crossterm::tty::IsTty;

use crate::config::{DUMB_TERMINAL, LOCALE_VARIABLES, NO_COLOR_VARIABLE, TERM_VARIABLE};

pub trait Terminal {
    /// Whether ANSI color and format sequences are honored.
    fn supports_ansi(&self) -> bool;

    /// Whether UTF-8 box-drawing glyphs can be printed.
    fn supports_utf8(&self) -> bool;
}

/// Fixed capability answers.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct Capabilities {
    pub ansi: bool,
    pub utf8: bool,
}

impl Capabilities {
    #[must_use]
    pub fn new(ansi: bool, utf8: bool) -> Self {
        Self { ansi, utf8 }
    }

    /// Both capabilities present.
    #[must_use]
    pub fn full() -> Self {
        Self::new(true, true)
    }

    /// Neither capability present.
    #[must_use]
    pub fn none() -> Self {
        Self::new(false, false)
    }

    /// Derives capabilities from environment variables, looked up through
    /// `lookup` so the rules can be exercised without touching the process
    /// environment.
    ///
    /// # Examples
    ///
    /// ```
    /// use cmdline_core::terminal::Capabilities;
    ///
    /// let capabilities = Capabilities::from_env(true, |name| match name {
    ///     "TERM" => Some("xterm-256color".to_string()),
    ///     "LANG" => Some("en_US.UTF-8".to_string()),
    ///     _ => None,
    /// });
    /// assert!(capabilities.ansi);
    /// assert!(capabilities.utf8);
    /// ```
    pub fn from_env<F>(is_tty: bool, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            ansi: ansi_from_env(is_tty, &lookup),
            utf8: utf8_from_env(&lookup),
        }
    }

    /// Probes the current process: stderr and the real environment.
    #[must_use]
    pub fn detect() -> Self {
        Self {
            ansi: SystemTerminal.supports_ansi(),
            utf8: SystemTerminal.supports_utf8(),
        }
    }
}

impl Terminal for Capabilities {
    fn supports_ansi(&self) -> bool {
        self.ansi
    }

    fn supports_utf8(&self) -> bool {
        self.utf8
    }
}

/// Queries the running process each time it is asked.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemTerminal;

impl Terminal for SystemTerminal {
    fn supports_ansi(&self) -> bool {
        ansi_from_env(stderr().is_tty(), &|name: &str| env::var(name).ok())
    }

    fn supports_utf8(&self) -> bool {
        utf8_from_env(&|name: &str| env::var(name).ok())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

fn ansi_from_env(is_tty: bool, lookup: &dyn Fn(&str) -> Option<String>) -> bool {
    if !is_tty || non_empty(lookup(NO_COLOR_VARIABLE)).is_some() {
        return false;
    }

    match non_empty(lookup(TERM_VARIABLE)) {
        Some(term) => term != DUMB_TERMINAL && platform_ansi(),
        None => cfg!(windows) && platform_ansi(),
    }
}

/// Windows consoles need virtual terminal processing switched on before they
/// honor control sequences; crossterm's query does that as a side effect.
#[cfg(windows)]
fn platform_ansi() -> bool {
    crossterm::ansi_support::supports_ansi()
}

#[cfg(not(windows))]
fn platform_ansi() -> bool {
    true
}

fn utf8_from_env(lookup: &dyn Fn(&str) -> Option<String>) -> bool {
    if cfg!(windows) {
        return true;
    }

    LOCALE_VARIABLES
        .iter()
        .find_map(|name| non_empty(lookup(*name)))
        .is_some_and(|locale| {
            let locale = locale.to_ascii_lowercase();
            locale.contains("utf-8") || locale.contains("utf8")
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_fixed_capabilities() {
        assert!(Capabilities::full().supports_ansi());
        assert!(Capabilities::full().supports_utf8());
        assert!(!Capabilities::none().supports_ansi());
        assert!(!Capabilities::none().supports_utf8());
        assert_eq!(Capabilities::default(), Capabilities::none());
    }

    #[test]
    fn test_not_a_tty_disables_ansi() {
        let capabilities = Capabilities::from_env(false, lookup_in(&[("TERM", "xterm")]));
        assert!(!capabilities.ansi);
    }

    #[test]
    fn test_no_color_disables_ansi() {
        let capabilities =
            Capabilities::from_env(true, lookup_in(&[("TERM", "xterm"), ("NO_COLOR", "1")]));
        assert!(!capabilities.ansi);
    }

    #[test]
    fn test_empty_no_color_is_ignored() {
        let capabilities =
            Capabilities::from_env(true, lookup_in(&[("TERM", "xterm"), ("NO_COLOR", "")]));
        assert!(capabilities.ansi);
    }

    #[test]
    #[cfg(not(windows))]
    fn test_dumb_terminal_disables_ansi() {
        let capabilities = Capabilities::from_env(true, lookup_in(&[("TERM", "dumb")]));
        assert!(!capabilities.ansi);

        let capabilities = Capabilities::from_env(true, lookup_in(&[]));
        assert!(!capabilities.ansi);
    }

    #[test]
    #[cfg(not(windows))]
    fn test_utf8_locale_precedence() {
        let lookup = lookup_in(&[("LC_ALL", "C"), ("LANG", "en_US.UTF-8")]);
        assert!(!Capabilities::from_env(true, lookup).utf8);

        let lookup = lookup_in(&[("LC_ALL", ""), ("LC_CTYPE", "de_DE.utf8")]);
        assert!(Capabilities::from_env(true, lookup).utf8);

        let lookup = lookup_in(&[("LANG", "en_US.UTF-8")]);
        assert!(Capabilities::from_env(true, lookup).utf8);

        assert!(!Capabilities::from_env(true, lookup_in(&[])).utf8);
    }
}
