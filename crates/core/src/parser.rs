//! Token scanning.
//!
//! The scan only reads declarations. It records what every matched token
//! should do as a list of [`Hit`]s; the registry writes bindings and lowers
//! requirements afterwards, once every token has been seen.

use log::trace;

use crate::declaration::{ArgKind, Declaration};
use crate::diagnostics::Diagnostics;
use crate::error::ParseError;

/// How a parse call ended.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Outcome {
    /// Every required argument was given and no token was malformed.
    Satisfied,
    /// `-h` was given; help was rendered and nothing else was checked.
    HelpRequested,
    /// Something was missing or malformed; see the diagnostics.
    Failed,
}

/// The structured result of [`crate::CmdLine::parse_report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub outcome: Outcome,
    pub diagnostics: Diagnostics,
}

impl Report {
    pub(crate) fn new(outcome: Outcome, diagnostics: Diagnostics) -> Self {
        Self {
            outcome,
            diagnostics,
        }
    }

    /// True only when the bound values can be used.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Satisfied
    }

    #[must_use]
    pub fn help_requested(&self) -> bool {
        self.outcome == Outcome::HelpRequested
    }
}

/// Which spelling of a declaration a token used.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
enum Form<'t> {
    Long,
    Short,
    /// `--name=VALUE`, options only.
    Inline(&'t str),
}

/// What a matched token does to its declaration's binding.
#[derive(PartialEq, Eq, Clone, Debug)]
pub(crate) enum Effect {
    Store(String),
    Raise,
    /// The option had no value to take.
    Unfilled,
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub(crate) struct Hit {
    /// Position of the declaration in the scanned slice.
    pub index: usize,
    pub effect: Effect,
}

#[derive(Debug, Default)]
pub(crate) struct Scan {
    pub hits: Vec<Hit>,
    pub errors: Vec<ParseError>,
}

/// Exact match against `--name`, `-name`, or for options `--name=VALUE`.
fn match_form<'t>(declaration: &Declaration<'_>, token: &'t str) -> Option<Form<'t>> {
    let name = declaration.name();

    if let Some(rest) = token.strip_prefix("--") {
        if rest == name {
            return Some(Form::Long);
        }
        if declaration.kind() == ArgKind::Option {
            return rest
                .strip_prefix(name)
                .and_then(|rest| rest.strip_prefix('='))
                .map(Form::Inline);
        }
        return None;
    }

    token
        .strip_prefix('-')
        .filter(|rest| *rest == name)
        .map(|_| Form::Short)
}

/// Walks `tokens` (program name excluded) against `declarations`.
///
/// An option consumes the following token as its value whatever it looks
/// like. Tokens that match nothing are ignored.
pub(crate) fn scan<S: AsRef<str>>(declarations: &[&Declaration<'_>], tokens: &[S]) -> Scan {
    let mut scan = Scan::default();
    let mut position = 0;

    while let Some(token) = tokens.get(position) {
        let token = token.as_ref();
        position += 1;

        let Some((index, form)) = declarations
            .iter()
            .enumerate()
            .find_map(|(index, declaration)| match_form(declaration, token).map(|form| (index, form)))
        else {
            trace!("Ignoring unrecognized token `{token}`");
            continue;
        };

        let declaration = declarations[index];
        let effect = match (declaration.kind(), form) {
            (ArgKind::Option, Form::Inline(value)) => Effect::Store(value.to_string()),
            (ArgKind::Option, _) => match tokens.get(position) {
                Some(value) => {
                    position += 1;
                    Effect::Store(value.as_ref().to_string())
                }
                None => {
                    scan.errors
                        .push(ParseError::MissingValue(declaration.name().to_string()));
                    Effect::Unfilled
                }
            },
            (ArgKind::Flag, Form::Long) => {
                scan.errors
                    .push(ParseError::FlagLongForm(declaration.name().to_string()));
                Effect::Raise
            }
            (ArgKind::Flag, _) => Effect::Raise,
        };

        trace!("Matched `{token}` to {}: {effect:?}", declaration.call_form());
        scan.hits.push(Hit { index, effect });
    }

    scan
}

/// The invocation as it was understood: the program name, then every
/// matched argument in its canonical form with its value.
pub(crate) fn describe_invocation(
    program: Option<&str>,
    declarations: &[&Declaration<'_>],
    hits: &[Hit],
) -> String {
    let mut words: Vec<String> = program.map(str::to_string).into_iter().collect();

    for hit in hits {
        let declaration = declarations[hit.index];
        words.push(declaration.call_form());
        if let Effect::Store(value) = &hit.effect {
            if value.is_empty() || value.contains(char::is_whitespace) {
                words.push(format!("{value:?}"));
            } else {
                words.push(value.clone());
            }
        }
    }

    words.join(" ")
}
