//! Requirement resolution, run once after the whole argument vector has
//! been scanned.
//!
//! Matched flags may lift the requirement on other declarations. Those edges
//! are collected into an [`InvalidationGraph`] and applied in one pass, so a
//! flag given late on the command line still waives an argument declared
//! (or checked) earlier.

use indexmap::{IndexMap, IndexSet};
use log::{debug, warn};

use crate::declaration::{ArgKind, Declaration};
use crate::diagnostics::Diagnostics;

/// Flag name → names of the declarations it makes optional.
#[derive(Debug, Default)]
pub struct InvalidationGraph<'d> {
    edges: IndexMap<&'d str, &'d IndexSet<String>>,
}

impl<'d> InvalidationGraph<'d> {
    /// Collects the edges of every flag in `declarations`.
    pub fn new<'a: 'd, I>(declarations: I) -> Self
    where
        I: IntoIterator<Item = &'d Declaration<'a>>,
    {
        let edges = declarations
            .into_iter()
            .filter(|declaration| declaration.kind() == ArgKind::Flag)
            .filter(|declaration| !declaration.invalidates().is_empty())
            .map(|declaration| (declaration.name(), declaration.invalidates()))
            .collect();

        Self { edges }
    }

    /// Names whose requirement is waived by the `triggered` flags.
    ///
    /// Only direct edges count; waiving is not transitive. Triggering the
    /// same flag twice changes nothing.
    pub fn waived<'t, T>(&self, triggered: T) -> IndexSet<&'d str>
    where
        T: IntoIterator<Item = &'t str>,
    {
        triggered
            .into_iter()
            .filter_map(|flag| self.edges.get(flag).copied())
            .flat_map(|targets| targets.iter().map(String::as_str))
            .collect()
    }
}

/// Lowers the requirement of every declaration waived by `triggered` flags.
pub(crate) fn apply_invalidations(
    declarations: &mut IndexMap<String, Declaration<'_>>,
    triggered: &[String],
) {
    let waived: Vec<String> = InvalidationGraph::new(declarations.values())
        .waived(triggered.iter().map(String::as_str))
        .into_iter()
        .map(str::to_string)
        .collect();

    for name in waived {
        match declarations.get_mut(&name) {
            Some(declaration) => {
                if declaration.is_required() {
                    debug!("Requirement on {} waived", declaration.call_form());
                }
                declaration.waive_requirement();
            }
            None => warn!("Cannot waive requirement on undeclared argument `{name}`"),
        }
    }
}

/// Reports, in declaration order, every required declaration whose name is
/// absent from `found`.
///
/// `found` may hold duplicates. Requirements must already reflect any
/// invalidation.
pub fn find_missing<'d, 'a: 'd, I>(found: &[String], declarations: I) -> Diagnostics
where
    I: IntoIterator<Item = &'d Declaration<'a>>,
{
    let mut diagnostics = Diagnostics::new();

    for declaration in declarations {
        if declaration.is_required() && !found.iter().any(|name| name == declaration.name()) {
            diagnostics.push_missing(declaration.call_form());
        }
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Slots {
        file: String,
        font: String,
        version: bool,
        list: bool,
    }

    impl Slots {
        fn new() -> Self {
            Self {
                file: String::new(),
                font: String::new(),
                version: false,
                list: false,
            }
        }

        fn declarations(&mut self) -> IndexMap<String, Declaration<'_>> {
            [
                Declaration::option("file", "", &mut self.file, true),
                Declaration::option("font", "", &mut self.font, true),
                Declaration::flag("version", "", &mut self.version, false, ["file", "ghost"]),
                Declaration::flag("list", "", &mut self.list, true, ["file", "font"]),
            ]
            .into_iter()
            .map(|declaration| (declaration.name().to_string(), declaration))
            .collect()
        }
    }

    fn names(found: &[&str]) -> Vec<String> {
        found.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn test_graph_collects_flag_edges() {
        let mut slots = Slots::new();
        let declarations = slots.declarations();
        let graph = InvalidationGraph::new(declarations.values());

        let waived = graph.waived(["version"]);
        assert_eq!(waived.into_iter().collect::<Vec<_>>(), vec!["file", "ghost"]);

        let waived = graph.waived(["version", "list", "version"]);
        assert_eq!(waived.len(), 3);

        assert!(graph.waived(["file"]).is_empty());
    }

    #[test]
    fn test_missing_in_declaration_order() {
        let mut slots = Slots::new();
        let declarations = slots.declarations();

        let diagnostics = find_missing(&[], declarations.values());
        assert_eq!(diagnostics.missing(), ["--file", "--font", "-list"]);
        assert_eq!(
            diagnostics.missing_arguments_message(),
            "Missing: [--file, --font, -list]"
        );
    }

    #[test]
    fn test_found_names_satisfy_requirements() {
        let mut slots = Slots::new();
        let declarations = slots.declarations();

        let diagnostics = find_missing(&names(&["font", "font", "list"]), declarations.values());
        assert_eq!(diagnostics.missing(), ["--file"]);
        assert_eq!(diagnostics.missing_count(), 1);
    }

    #[test]
    fn test_invalidation_lowers_requirement() {
        let mut slots = Slots::new();
        let mut declarations = slots.declarations();

        apply_invalidations(&mut declarations, &names(&["version", "version"]));
        assert!(!declarations["file"].is_required());
        assert!(declarations["font"].is_required());

        let diagnostics = find_missing(&names(&["version", "list"]), declarations.values());
        assert_eq!(diagnostics.missing(), ["--font"]);
    }

    #[test]
    fn test_invalidation_never_raises() {
        let mut slots = Slots::new();
        let mut declarations = slots.declarations();

        apply_invalidations(&mut declarations, &names(&["list"]));
        apply_invalidations(&mut declarations, &[]);
        assert!(!declarations["file"].is_required());
        assert!(!declarations["font"].is_required());
        assert!(declarations["list"].is_required());
    }
}
