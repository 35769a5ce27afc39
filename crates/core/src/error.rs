use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Error writing help output: {}", .0)]
    Output(#[from] std::io::Error),
}

/// A complaint about a single token, accumulated while scanning and reported
/// in the "Errors" section after the scan completes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// An option was the last token, so there was nothing to take as its value.
    #[error("Missing value for --{0}: expected '--{0} VALUE'")]
    MissingValue(String),

    /// A flag was spelled with the long `--` prefix instead of `-`.
    #[error("Incorrect syntax for --{0}: expected '-{0}'")]
    FlagLongForm(String),
}

impl ParseError {
    /// Name of the declaration the complaint is about.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::MissingValue(name) | Self::FlagLongForm(name) => name,
        }
    }
}
