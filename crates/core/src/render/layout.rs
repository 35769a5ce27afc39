//! Builds the rows of the help and error sections. Nothing here knows about
//! borders or terminals; see `frame` for that.

use crossterm::style::Color;

use super::text::{Line, Style};
use crate::config::{COLUMN_PADDING, REQUIRED_GLYPH};
use crate::declaration::Declaration;
use crate::diagnostics::Diagnostics;
use crate::error::ParseError;

const INDENT: &str = "  ";

const CALL_FORM: Style = Style::color(Color::Cyan).bold();
const BRACKET: Style = Style::color(Color::Grey);
const REQUIRED: Style = Style::color(Color::Magenta);
const DESCRIPTION: Style = Style::PLAIN.underline();
const ARGUMENT_DESCRIPTION: Style = Style::color(Color::DarkGrey);

/// ` * [--file]`: requirement marker and bracketed call form.
fn call_column(declaration: &Declaration<'_>) -> Line {
    let marker = if declaration.is_required() {
        Line::new().styled(REQUIRED_GLYPH, REQUIRED)
    } else {
        Line::new().text(" ".repeat(REQUIRED_GLYPH.len()))
    };

    Line::new()
        .text(" ")
        .append(marker)
        .text(" ")
        .styled("[", BRACKET)
        .styled(declaration.call_form(), CALL_FORM)
        .styled("]", BRACKET)
}

/// Description (if any) followed by one aligned row per declaration.
pub(crate) fn help_lines(description: &str, declarations: &[&Declaration<'_>]) -> Vec<Line> {
    let mut lines = Vec::with_capacity(declarations.len() + 2);

    if !description.is_empty() {
        lines.push(Line::new().text(INDENT).styled(description, DESCRIPTION));
        lines.push(Line::new());
    }

    let columns: Vec<Line> = declarations
        .iter()
        .map(|declaration| call_column(declaration))
        .collect();
    let offset = columns.iter().map(Line::width).max().unwrap_or(0) + COLUMN_PADDING;

    for (column, declaration) in columns.into_iter().zip(declarations) {
        lines.push(
            column
                .pad_to(offset)
                .styled(declaration.description(), ARGUMENT_DESCRIPTION),
        );
    }

    lines
}

fn call_form(text: String) -> Line {
    Line::new().styled(text, CALL_FORM)
}

/// Same wording as the error's `Display`, with the call forms highlighted.
fn error_line(error: &ParseError) -> Line {
    match error {
        ParseError::MissingValue(name) => Line::new()
            .text("Missing value for ")
            .append(call_form(format!("--{name}")))
            .text(": expected '")
            .append(call_form(format!("--{name}")))
            .text(" VALUE'"),
        ParseError::FlagLongForm(name) => Line::new()
            .text("Incorrect syntax for ")
            .append(call_form(format!("--{name}")))
            .text(": expected '")
            .append(call_form(format!("-{name}")))
            .text("'"),
    }
}

/// `Missing: [...]` when anything is missing, then one row per additional
/// error.
pub(crate) fn error_lines(diagnostics: &Diagnostics) -> Vec<Line> {
    let mut lines = Vec::with_capacity(diagnostics.additional_errors().len() + 1);

    if diagnostics.missing_count() > 0 {
        let mut missing = Line::new().text(INDENT).text("Missing: [");
        for (position, form) in diagnostics.missing().iter().enumerate() {
            if position > 0 {
                missing = missing.text(", ");
            }
            missing = missing.append(call_form(form.clone()));
        }
        lines.push(missing.text("]"));
    }

    for error in diagnostics.additional_errors() {
        lines.push(Line::new().text(INDENT).append(error_line(error)));
    }

    lines
}
