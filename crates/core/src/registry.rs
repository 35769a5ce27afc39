//! The argument registry and its parse entry points.

use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

use indexmap::IndexMap;
use log::{debug, info, warn};

use crate::config::{Options, HELP_FLAG_DESCRIPTION, HELP_FLAG_NAME};
use crate::declaration::{check_name, Declaration};
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::parser::{self, Effect, Outcome, Report};
use crate::render::{render_help, Backend, Page};
use crate::requirements;

/// An insertion-ordered set of argument declarations, each bound to a slot
/// owned by the caller.
///
/// Registration order is listing order in help and reporting order for
/// missing arguments. The slots stay borrowed for as long as the registry
/// lives; drop it (or let it go out of scope) to read them.
///
/// # Examples
///
/// ```
/// use cmdline_core::{CmdLine, Capabilities, Options};
///
/// let mut file = String::new();
/// let mut pt = String::from("12");
/// let mut verbose = false;
///
/// let mut options = Options::new("fontcfg")
///     .terminal(Capabilities::none())
///     .output(Vec::<u8>::new());
///
/// let ok = CmdLine::new()
///     .option("file", "Font file to load", &mut file, true)
///     .option("pt", "Point size", &mut pt, false)
///     .flag("verbose", "Verbose output", &mut verbose, false, &[])
///     .parse(["fontcfg", "--file", "a.ttf", "-verbose"], &mut options);
///
/// assert!(ok);
/// assert_eq!(file, "a.ttf");
/// assert_eq!(pt, "12");
/// assert!(verbose);
/// ```
#[derive(Debug, Default)]
pub struct CmdLine<'a> {
    declarations: IndexMap<String, Declaration<'a>>,
}

impl<'a> CmdLine<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `--name VALUE`. When given, the value overwrites `slot`;
    /// otherwise `slot` keeps whatever the caller put there.
    ///
    /// # Panics
    ///
    /// If `name` is already declared, is `h`, is empty, starts with `-` or
    /// contains whitespace or `=`.
    pub fn option(
        &mut self,
        name: &str,
        description: &str,
        slot: &'a mut String,
        required: bool,
    ) -> &mut Self {
        self.insert(Declaration::option(name, description, slot, required))
    }

    /// Declares `-name`. When given, `slot` is set to `true` and every
    /// argument named in `invalidates` stops being required. The parser
    /// never sets `slot` to `false`.
    ///
    /// # Panics
    ///
    /// Under the same conditions as [`CmdLine::option`].
    pub fn flag(
        &mut self,
        name: &str,
        description: &str,
        slot: &'a mut bool,
        required: bool,
        invalidates: &[&str],
    ) -> &mut Self {
        self.insert(Declaration::flag(
            name,
            description,
            slot,
            required,
            invalidates.iter().copied(),
        ))
    }

    fn insert(&mut self, declaration: Declaration<'a>) -> &mut Self {
        let name = declaration.name();
        check_name(name);
        assert!(
            name != HELP_FLAG_NAME,
            "argument name `{HELP_FLAG_NAME}` is reserved for the help flag"
        );
        assert!(
            !self.declarations.contains_key(name),
            "argument `{name}` is declared twice"
        );

        debug!("Declared {declaration}");
        self.declarations.insert(name.to_string(), declaration);
        self
    }

    /// Declarations in registration order.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration<'a>> {
        self.declarations.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Parses `args` (program name first) into the bound slots.
    ///
    /// Returns `true` only when every required argument was given and no
    /// token was malformed. A `-h` anywhere renders help and returns `false`.
    pub fn parse<I, S, W>(&mut self, args: I, options: &mut Options<W>) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        W: Write,
    {
        self.parse_report(args, options).is_success()
    }

    /// [`CmdLine::parse`] over the arguments of the current process.
    /// Arguments that aren't valid Unicode are converted lossily.
    pub fn parse_env<W: Write>(&mut self, options: &mut Options<W>) -> bool {
        let args: Vec<String> = std::env::args_os()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        self.parse(args, options)
    }

    /// Like [`CmdLine::parse`], but tells help requests apart from failures
    /// and hands back the diagnostics.
    pub fn parse_report<I, S, W>(&mut self, args: I, options: &mut Options<W>) -> Report
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        W: Write,
    {
        let started = Instant::now();

        if self.declarations.is_empty() {
            debug!("Nothing declared; skipping parse");
            return Report::new(Outcome::Satisfied, Diagnostics::new());
        }

        let args: Vec<S> = args.into_iter().collect();
        let program: Option<&str> = args.first().map(AsRef::as_ref);
        let tokens = args.get(1..).unwrap_or(&[]);

        let mut help_slot = false;
        let help = Declaration::flag(
            HELP_FLAG_NAME,
            HELP_FLAG_DESCRIPTION,
            &mut help_slot,
            false,
            Vec::<String>::new(),
        );
        let help_index = self.declarations.len();

        let scan = {
            let view = self.session_view(&help);
            let scan = parser::scan(&view, tokens);
            if options.log_command {
                info!(
                    "Invoked as: {}",
                    parser::describe_invocation(program, &view, &scan.hits)
                );
            }
            scan
        };

        let mut found = Vec::with_capacity(scan.hits.len());
        let mut triggered = Vec::new();
        let mut help_requested = false;

        for hit in &scan.hits {
            if hit.index == help_index {
                help_requested = true;
                continue;
            }
            let Some((name, declaration)) = self.declarations.get_index_mut(hit.index) else {
                continue;
            };

            found.push(name.clone());
            match &hit.effect {
                Effect::Store(value) => declaration.store_value(value),
                Effect::Raise => {
                    declaration.raise_flag();
                    triggered.push(name.clone());
                }
                Effect::Unfilled => {}
            }
        }

        if help_requested {
            let diagnostics = Diagnostics::new();
            let view = self.session_view(&help);
            if let Err(error) = render(options, program, &view, &diagnostics) {
                warn!("Failed to write help output: {error}");
            }
            debug!("Help requested; parse took {:?}", started.elapsed());
            return Report::new(Outcome::HelpRequested, diagnostics);
        }

        requirements::apply_invalidations(&mut self.declarations, &triggered);
        let mut diagnostics = requirements::find_missing(&found, self.declarations.values());
        for error in scan.errors {
            diagnostics.push_error(error);
        }

        let outcome = if diagnostics.has_errors() {
            Outcome::Failed
        } else {
            Outcome::Satisfied
        };

        if outcome == Outcome::Failed && options.help_on_failure {
            let view = self.session_view(&help);
            if let Err(error) = render(options, program, &view, &diagnostics) {
                warn!("Failed to write help output: {error}");
            }
        }

        debug!("Parse finished as {outcome:?} in {:?}", started.elapsed());
        Report::new(outcome, diagnostics)
    }

    /// Renders help for the declared arguments, plus an "Errors" section
    /// when `diagnostics` has anything to report.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Output`] if the sink rejects a write.
    pub fn help<W: Write>(&self, options: &mut Options<W>, diagnostics: &Diagnostics) -> Result<()> {
        let view: Vec<&Declaration<'_>> = self.declarations.values().collect();
        render(options, None, &view, diagnostics)?;
        Ok(())
    }

    /// The user declarations followed by the help flag of this parse call.
    fn session_view<'s>(&'s self, help: &'s Declaration<'_>) -> Vec<&'s Declaration<'s>> {
        let mut view: Vec<&'s Declaration<'s>> = Vec::with_capacity(self.declarations.len() + 1);
        view.extend(self.declarations.values());
        view.push(help);
        view
    }
}

/// The configured name, or the file name of the program when none is set.
fn title<'t>(name: &'t str, program: Option<&'t str>) -> &'t str {
    if !name.is_empty() {
        return name;
    }

    program
        .and_then(|program| Path::new(program).file_name())
        .and_then(|file_name| file_name.to_str())
        .unwrap_or_default()
}

fn render<W: Write>(
    options: &mut Options<W>,
    program: Option<&str>,
    declarations: &[&Declaration<'_>],
    diagnostics: &Diagnostics,
) -> io::Result<()> {
    let backend = Backend::select(&*options.terminal, options.term_colors);
    let page = Page {
        title: title(&options.name, program),
        description: &options.description,
        declarations,
    };

    render_help(&mut options.output, &page, diagnostics, backend)
}
