#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Maps human-named submission files to the identity of their submitter.

use std::fmt;

use serde::Serialize;

use crate::parsers::parser;

/// Whether a submission belongs to a single student or to a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityKind {
    /// A single student, identified by their number.
    Individual,
    /// A group, identified by its group number.
    Group,
}

impl fmt::Display for IdentityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityKind::Individual => write!(f, "student"),
            IdentityKind::Group => write!(f, "group"),
        }
    }
}

/// The submitter a filename was attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Identity {
    /// Individual or group.
    kind: IdentityKind,
    /// Canonical key, also the name of the submitter's directory.
    key:  String,
    /// Remainder of the filename after the identity prefix.
    rest: String,
}

impl Identity {
    /// Builds an identity from the captured digit string. Group keys get the
    /// `group` prefix so they never collide with student numbers.
    pub fn new(kind: IdentityKind, number: &str, rest: &str) -> Self {
        let key = match kind {
            IdentityKind::Individual => number.to_string(),
            IdentityKind::Group => format!("group{number}"),
        };

        Self {
            kind,
            key,
            rest: rest.to_string(),
        }
    }

    /// Individual or group.
    pub fn kind(&self) -> IdentityKind {
        self.kind
    }

    /// Canonical identity key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Free-form remainder of the filename.
    pub fn rest(&self) -> &str {
        &self.rest
    }
}

/// One filename grammar. Each attempt returns its own result, so grammars can
/// be tried in sequence without sharing any match state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    /// `h<digits>_<first>_<last>_<rest>`
    Individual,
    /// `(Gruppe|Group) <digits>_<first?>_<last?>_<rest>`
    Group,
}

impl Grammar {
    /// Grammars in the order they are tried.
    pub const ORDERED: [Grammar; 2] = [Grammar::Individual, Grammar::Group];

    /// Attempts to match `basename` against this grammar.
    pub fn attempt(self, basename: &str) -> Option<Identity> {
        match self {
            Grammar::Individual => parser::individual(basename).ok(),
            Grammar::Group => parser::group(basename).ok(),
        }
    }
}

/// Classifies a bare filename; the first matching grammar wins.
pub fn classify(basename: &str) -> Option<Identity> {
    Grammar::ORDERED
        .iter()
        .find_map(|grammar| grammar.attempt(basename))
}
