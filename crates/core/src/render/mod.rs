//! Help and error output.
//!
//! Output is assembled as [`Line`]s of styled spans and only turned into
//! bytes at the end, by one of two backends:
//!
//! - **Decorated**: rounded box-drawing borders with colored titles and call
//!   forms. Used only when the terminal supports both ANSI sequences and
//!   UTF-8 and the caller allows colors.
//! - **Plain**: the same rows with no borders and no escape sequences.
//!
//! Column alignment and border placement are computed from visual width, so
//! both backends line up the same way.

mod frame;
mod layout;
pub mod text;

use std::io::{self, Write};

pub use text::{strip_escapes, visual_width, Line, Span, Style};

use crate::config::ERRORS_TITLE;
use crate::declaration::Declaration;
use crate::diagnostics::Diagnostics;
use crate::terminal::Terminal;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Backend {
    Decorated,
    Plain,
}

impl Backend {
    /// Decorated only when colors are allowed and the terminal handles both
    /// control sequences and box-drawing glyphs.
    #[must_use]
    pub fn select(terminal: &dyn Terminal, term_colors: bool) -> Self {
        if term_colors && terminal.supports_ansi() && terminal.supports_utf8() {
            Backend::Decorated
        } else {
            Backend::Plain
        }
    }
}

/// What a help page shows.
#[derive(Debug, Clone, Copy)]
pub struct Page<'p> {
    /// Title of the help section.
    pub title: &'p str,
    /// Shown, underlined when decorated, above the argument list.
    pub description: &'p str,
    /// Listed in this order.
    pub declarations: &'p [&'p Declaration<'p>],
}

/// Writes the help section for `page` and, if `diagnostics` has anything to
/// report, an "Errors" section after it.
pub fn render_help<W: Write>(
    out: &mut W,
    page: &Page<'_>,
    diagnostics: &Diagnostics,
    backend: Backend,
) -> io::Result<()> {
    let help = layout::help_lines(page.description, page.declarations);
    frame::write_section(out, page.title, &help, frame::HELP_PALETTE, backend)?;

    if diagnostics.has_errors() {
        let errors = layout::error_lines(diagnostics);
        frame::write_section(out, ERRORS_TITLE, &errors, frame::ERRORS_PALETTE, backend)?;
    }

    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use crate::terminal::Capabilities;

    #[test]
    fn test_backend_selection() {
        assert_eq!(Backend::select(&Capabilities::full(), true), Backend::Decorated);
        assert_eq!(Backend::select(&Capabilities::full(), false), Backend::Plain);
        assert_eq!(Backend::select(&Capabilities::new(true, false), true), Backend::Plain);
        assert_eq!(Backend::select(&Capabilities::new(false, true), true), Backend::Plain);
    }

    #[test]
    fn test_render_plain_help_and_errors() {
        let mut file = String::new();
        let mut verbose = false;
        let declarations = [
            Declaration::option("file", "Font file to load", &mut file, true),
            Declaration::flag("v", "Verbose output", &mut verbose, false, Vec::<String>::new()),
        ];
        let view: Vec<&Declaration<'_>> = declarations.iter().collect();
        let page = Page {
            title: "Fonts",
            description: "Loads fonts",
            declarations: &view,
        };

        let mut diagnostics = Diagnostics::new();
        diagnostics.push_missing("--file".to_string());
        diagnostics.push_error(ParseError::FlagLongForm("v".to_string()));

        let mut out = Vec::new();
        render_help(&mut out, &page, &diagnostics, Backend::Plain).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Fonts\n\
             \x20 Loads fonts\n\
             \n\
             \x20* [--file]  Font file to load\n\
             \x20  [-v]      Verbose output\n\
             Errors\n\
             \x20 Missing: [--file]\n\
             \x20 Incorrect syntax for --v: expected '-v'\n"
        );
    }

    #[test]
    fn test_render_decorated_without_errors_has_one_box() {
        let mut verbose = false;
        let declarations = [Declaration::flag("v", "Verbose", &mut verbose, false, Vec::<String>::new())];
        let view: Vec<&Declaration<'_>> = declarations.iter().collect();
        let page = Page {
            title: "Demo",
            description: "",
            declarations: &view,
        };

        let mut out = Vec::new();
        render_help(&mut out, &page, &Diagnostics::new(), Backend::Decorated).unwrap();
        let written = strip_escapes(&String::from_utf8(out).unwrap());

        assert_eq!(written.matches('╭').count(), 1);
        assert!(written.contains("Demo"));
        assert!(!written.contains(ERRORS_TITLE));
    }
}
