//! Argument declarations and the caller-owned slots they write into.

use std::fmt::{Display, Formatter};

use indexmap::IndexSet;

/// How an argument is spelled on the command line and what it produces.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ArgKind {
    /// `--name VALUE`, writes a string.
    Option,
    /// `-name`, writes `true`.
    Flag,
}

impl ArgKind {
    /// Prefix used to build the call form of an argument of this kind.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            ArgKind::Option => "--",
            ArgKind::Flag => "-",
        }
    }
}

/// Exclusive borrow of the caller's result slot.
///
/// The variant always agrees with the declaration's [`ArgKind`], since
/// [`crate::CmdLine::option`] only accepts a `&mut String` and
/// [`crate::CmdLine::flag`] only accepts a `&mut bool`.
#[derive(Debug)]
pub enum Binding<'a> {
    Text(&'a mut String),
    Switch(&'a mut bool),
}

/// A registered argument.
#[derive(Debug)]
pub struct Declaration<'a> {
    name: String,
    description: String,
    kind: ArgKind,
    required: bool,
    invalidates: IndexSet<String>,
    binding: Binding<'a>,
}

impl<'a> Declaration<'a> {
    pub(crate) fn option(name: &str, description: &str, slot: &'a mut String, required: bool) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            kind: ArgKind::Option,
            required,
            invalidates: IndexSet::new(),
            binding: Binding::Text(slot),
        }
    }

    pub(crate) fn flag<I, S>(
        name: &str,
        description: &str,
        slot: &'a mut bool,
        required: bool,
        invalidates: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            kind: ArgKind::Flag,
            required,
            invalidates: invalidates
                .into_iter()
                .map(Into::into)
                .filter(|other: &String| other != name)
                .collect(),
            binding: Binding::Switch(slot),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn kind(&self) -> ArgKind {
        self.kind
    }

    /// Whether the argument must appear. May have been lowered by a matched
    /// flag's invalidation edges during the last parse.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Names of the declarations whose requirement this one lifts when matched.
    #[must_use]
    pub fn invalidates(&self) -> &IndexSet<String> {
        &self.invalidates
    }

    /// The form users are expected to type: `--name` or `-name`.
    #[must_use]
    pub fn call_form(&self) -> String {
        format!("{}{}", self.kind.prefix(), self.name)
    }

    #[must_use]
    pub fn long_form(&self) -> String {
        format!("--{}", self.name)
    }

    #[must_use]
    pub fn short_form(&self) -> String {
        format!("-{}", self.name)
    }

    /// Requirements are only ever lowered.
    pub(crate) fn waive_requirement(&mut self) {
        self.required = false;
    }

    pub(crate) fn store_value(&mut self, value: &str) {
        match &mut self.binding {
            Binding::Text(slot) => **slot = value.to_string(),
            Binding::Switch(_) => unreachable!("flag `{}` bound to a text slot", self.name),
        }
    }

    pub(crate) fn raise_flag(&mut self) {
        match &mut self.binding {
            Binding::Switch(slot) => **slot = true,
            Binding::Text(_) => unreachable!("option `{}` bound to a switch slot", self.name),
        }
    }
}

impl Display for Declaration<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.description.is_empty() {
            write!(f, "{}", self.call_form())
        } else {
            write!(f, "{} ({})", self.call_form(), self.description)
        }
    }
}

/// Panics with a descriptive message when `name` can't be used to build a
/// call form.
pub(crate) fn check_name(name: &str) {
    assert!(!name.is_empty(), "argument name may not be empty");
    assert!(
        !name.starts_with('-'),
        "argument name `{name}` may not start with '-'; the prefix is added for you"
    );
    assert!(
        !name.contains(char::is_whitespace),
        "argument name `{name}` may not contain whitespace"
    );
    assert!(
        !name.contains('='),
        "argument name `{name}` may not contain '=' (reserved for inline values)"
    );
}
