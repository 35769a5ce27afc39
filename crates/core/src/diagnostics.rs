use itertools::Itertools;

use crate::error::ParseError;

/// Everything that went wrong during one parse call.
///
/// Built fresh by every parse; nothing in it outlives the call except what
/// the caller keeps from [`crate::Report`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    missing: Vec<String>,
    additional_errors: Vec<ParseError>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Call forms of the required arguments that were never given, in
    /// declaration order.
    #[must_use]
    pub fn missing(&self) -> &[String] {
        &self.missing
    }

    #[must_use]
    pub fn missing_count(&self) -> usize {
        self.missing.len()
    }

    /// `Missing: [--file, -x]`.
    #[must_use]
    pub fn missing_arguments_message(&self) -> String {
        format!("Missing: [{}]", self.missing.iter().join(", "))
    }

    #[must_use]
    pub fn additional_errors(&self) -> &[ParseError] {
        &self.additional_errors
    }

    /// True when there is something to put in an "Errors" section.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.missing.is_empty() || !self.additional_errors.is_empty()
    }

    pub(crate) fn push_missing(&mut self, call_form: String) {
        self.missing.push(call_form);
    }

    pub(crate) fn push_error(&mut self, error: ParseError) {
        self.additional_errors.push(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_diagnostics() {
        let diagnostics = Diagnostics::new();
        assert!(!diagnostics.has_errors());
        assert_eq!(diagnostics.missing_count(), 0);
        assert_eq!(diagnostics.missing_arguments_message(), "Missing: []");
    }

    #[test]
    fn test_missing_message_is_comma_separated() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push_missing("--file".to_string());
        diagnostics.push_missing("-v".to_string());

        assert!(diagnostics.has_errors());
        assert_eq!(diagnostics.missing_count(), 2);
        assert_eq!(diagnostics.missing_arguments_message(), "Missing: [--file, -v]");
    }

    #[test]
    fn test_additional_errors_alone_count_as_errors() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push_error(ParseError::MissingValue("file".to_string()));

        assert!(diagnostics.has_errors());
        assert_eq!(diagnostics.missing_count(), 0);
        assert_eq!(diagnostics.additional_errors().len(), 1);
    }
}
