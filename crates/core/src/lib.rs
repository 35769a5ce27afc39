//! Cmdline Core Library
//!
//! This crate lets an executable declare the options and flags it accepts,
//! bind each one to a variable it owns, validate the invocation, and print
//! consistent help and error output on the terminal.
//!
//! # Key Features
//!
//! - **Declarations**: `--name VALUE` options bound to `String`s and `-name`
//!   flags bound to `bool`s, listed in registration order
//! - **Exact Matching**: tokens must equal a call form, so `-p` never matches `-pt`
//! - **Requirement Invalidation**: a flag such as `-version` can make other
//!   arguments optional, whatever their position on the command line
//! - **Built-in Help**: `-h` is understood by every parse call
//! - **Terminal-aware Output**: boxed, colored help when the terminal supports
//!   ANSI sequences and UTF-8, plain text otherwise
//!
//! # Examples
//!
//! ```
//! use cmdline_core::{CmdLine, Capabilities, Options};
//!
//! let mut file = String::new();
//! let mut version = false;
//!
//! let mut options = Options::new("AbyssFreetype")
//!     .description("Cmdline utility for use of AbyssFreetype library")
//!     .terminal(Capabilities::none())
//!     .output(Vec::<u8>::new());
//!
//! let mut cmdline = CmdLine::new();
//! cmdline
//!     .option("file", "Font file to load", &mut file, true)
//!     .flag("version", "Print the version", &mut version, false, &["file"]);
//!
//! let report = cmdline.parse_report(["fontcfg", "-version"], &mut options);
//! assert!(report.is_success());
//! drop(cmdline);
//! assert!(version);
//! ```

pub mod config;
pub mod declaration;
pub mod diagnostics;
pub mod error;
pub mod parser;
pub mod registry;
pub mod render;
pub mod requirements;
pub mod terminal;

pub use config::Options;
pub use declaration::{ArgKind, Declaration};
pub use diagnostics::Diagnostics;
pub use error::{Error, ParseError, Result};
pub use parser::{Outcome, Report};
pub use registry::CmdLine;
pub use terminal::{Capabilities, SystemTerminal, Terminal};
