//! Styled text runs and escape-aware width measurement.
//!
//! Layout is computed on [`Line`]s, whose width is the sum of their spans'
//! visual widths. Styling never contributes to width because it only exists
//! as a [`Style`] until the line is written; raw escape sequences embedded in
//! caller text are skipped by [`visual_width`] as well.

use std::io::{self, Write};
use std::str::Chars;

use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetForegroundColor};
use unicode_width::UnicodeWidthChar;

use super::Backend;

const ESCAPE: char = '\x1b';
const BELL: char = '\x07';

/// Iterates the characters of a string that occupy screen columns, skipping
/// CSI (`ESC [ ... final`), OSC (`ESC ] ... BEL` or `ESC ] ... ESC \`) and
/// two-character escape sequences.
struct Printable<'t> {
    chars: Chars<'t>,
}

impl Printable<'_> {
    fn skip_sequence(&mut self) {
        match self.chars.next() {
            Some('[') => {
                for c in self.chars.by_ref() {
                    if ('\x40'..='\x7e').contains(&c) {
                        break;
                    }
                }
            }
            Some(']') => {
                while let Some(c) = self.chars.next() {
                    if c == BELL {
                        break;
                    }
                    if c == ESCAPE {
                        self.chars.next();
                        break;
                    }
                }
            }
            _ => {}
        }
    }
}

impl Iterator for Printable<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        loop {
            let c = self.chars.next()?;
            if c != ESCAPE {
                return Some(c);
            }
            self.skip_sequence();
        }
    }
}

fn printable(text: &str) -> Printable<'_> {
    Printable { chars: text.chars() }
}

/// Number of terminal columns `text` occupies, ignoring escape sequences.
///
/// # Examples
///
/// ```
/// use cmdline_core::render::visual_width;
///
/// assert_eq!(visual_width("--file"), 6);
/// assert_eq!(visual_width("\x1b[1;36m--file\x1b[0m"), 6);
/// ```
#[must_use]
pub fn visual_width(text: &str) -> usize {
    printable(text).map(|c| c.width().unwrap_or(0)).sum()
}

/// `text` with every escape sequence removed.
#[must_use]
pub fn strip_escapes(text: &str) -> String {
    printable(text).collect()
}

/// Presentation of a span; ignored entirely by the plain backend.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct Style {
    pub color: Option<Color>,
    pub bold: bool,
    pub underline: bool,
}

impl Style {
    pub const PLAIN: Style = Style {
        color: None,
        bold: false,
        underline: false,
    };

    #[must_use]
    pub const fn color(color: Color) -> Self {
        Style {
            color: Some(color),
            bold: false,
            underline: false,
        }
    }

    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub const fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    #[must_use]
    pub fn is_plain(&self) -> bool {
        *self == Self::PLAIN
    }
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

impl Span {
    #[must_use]
    pub fn width(&self) -> usize {
        visual_width(&self.text)
    }

    fn write_to<W: Write>(&self, out: &mut W, backend: Backend) -> io::Result<()> {
        if backend == Backend::Plain {
            return queue!(out, Print(strip_escapes(&self.text)));
        }

        if self.style.is_plain() {
            return queue!(out, Print(&self.text));
        }

        if let Some(color) = self.style.color {
            queue!(out, SetForegroundColor(color))?;
        }
        if self.style.bold {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        if self.style.underline {
            queue!(out, SetAttribute(Attribute::Underlined))?;
        }

        queue!(out, Print(&self.text), SetAttribute(Attribute::Reset))
    }
}

/// One row of output built from styled spans.
#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct Line {
    spans: Vec<Span>,
}

impl Line {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends unstyled text.
    #[must_use]
    pub fn text(self, text: impl Into<String>) -> Self {
        self.styled(text, Style::PLAIN)
    }

    #[must_use]
    pub fn styled(mut self, text: impl Into<String>, style: Style) -> Self {
        let text = text.into();
        if !text.is_empty() {
            self.spans.push(Span { text, style });
        }
        self
    }

    #[must_use]
    pub fn append(mut self, other: Line) -> Self {
        self.spans.extend(other.spans);
        self
    }

    #[must_use]
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.spans.iter().map(Span::width).sum()
    }

    /// Pads with trailing spaces up to `width` visual columns.
    #[must_use]
    pub fn pad_to(self, width: usize) -> Self {
        let current = self.width();
        if width > current {
            self.text(" ".repeat(width - current))
        } else {
            self
        }
    }

    /// The printable text, without styling or embedded escapes.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.spans
            .iter()
            .map(|span| strip_escapes(&span.text))
            .collect()
    }

    pub fn write_to<W: Write>(&self, out: &mut W, backend: Backend) -> io::Result<()> {
        self.spans
            .iter()
            .try_for_each(|span| span.write_to(out, backend))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visual_width_ignores_sgr_sequences() {
        let plain = "[--file]";
        let colored = "\x1b[37m[\x1b[0m\x1b[1;36m--file\x1b[0m\x1b[37m]\x1b[0m";
        assert_eq!(visual_width(colored), visual_width(plain));
        assert_eq!(strip_escapes(colored), plain);
    }

    #[test]
    fn test_visual_width_ignores_hyperlinks() {
        let link = "\x1b]8;;https://example.com\x07docs\x1b]8;;\x07";
        assert_eq!(visual_width(link), 4);

        let terminated = "\x1b]8;;https://example.com\x1b\\docs\x1b]8;;\x1b\\";
        assert_eq!(strip_escapes(terminated), "docs");
    }

    #[test]
    fn test_visual_width_counts_columns() {
        assert_eq!(visual_width("╭─╮"), 3);
        assert_eq!(visual_width("字"), 2);
        assert_eq!(visual_width(""), 0);
        assert_eq!(visual_width("\x1b[0m"), 0);
    }

    #[test]
    fn test_line_width_and_padding() {
        let line = Line::new()
            .text(" ")
            .styled("*", Style::color(Color::Magenta))
            .text(" [")
            .styled("--file", Style::color(Color::Cyan).bold())
            .text("]");
        assert_eq!(line.width(), 11);
        assert_eq!(line.plain_text(), " * [--file]");

        let padded = line.clone().pad_to(14);
        assert_eq!(padded.width(), 14);
        assert_eq!(padded.plain_text(), " * [--file]   ");

        assert_eq!(line.clone().pad_to(3), line);
    }

    #[test]
    fn test_embedded_escapes_do_not_count() {
        let line = Line::new().text("\x1b[4mdescription\x1b[0m");
        assert_eq!(line.width(), "description".len());
    }

    #[test]
    fn test_plain_backend_drops_all_styling() {
        let line = Line::new()
            .styled("--file", Style::color(Color::Cyan).bold().underline())
            .text(" \x1b[31mraw\x1b[0m");

        let mut out = Vec::new();
        line.write_to(&mut out, Backend::Plain).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "--file raw");
    }

    #[test]
    fn test_decorated_backend_emits_escapes_without_changing_width() {
        let line = Line::new()
            .text("  ")
            .styled("--file", Style::color(Color::Cyan).bold());

        let mut out = Vec::new();
        line.write_to(&mut out, Backend::Decorated).unwrap();
        let written = String::from_utf8(out).unwrap();

        assert!(written.contains('\x1b'));
        assert_eq!(visual_width(&written), line.width());
        assert_eq!(strip_escapes(&written), "  --file");
    }

    #[test]
    fn test_empty_text_adds_no_span() {
        let line = Line::new().text("").styled("", Style::color(Color::Red));
        assert!(line.spans().is_empty());
    }
}
