//! Errors raised when a display tree is taken apart or combined the wrong way
//!
//! These are programmer errors: they surface at the call that broke a
//! precondition and nothing inside the crate catches them.

use thiserror::Error;

/// Variant name used in error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Atom,
    List,
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Kind::Atom => f.write_str("an atom"),
            Kind::List => f.write_str("a list"),
        }
    }
}

/// Misuse of the display tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisplayError {
    /// A list-only operation got an atom, or the reverse
    #[error("cannot {operation} {found}")]
    Type {
        operation: &'static str,
        found: Kind,
    },

    /// Head or tail of a list with no children
    #[error("cannot take the {operation} of an empty list")]
    EmptyList { operation: &'static str },

    /// `inline` got something it cannot pack
    #[error("cannot inline: {reason}")]
    Layout { reason: String },
}

impl DisplayError {
    pub(crate) fn type_error(operation: &'static str, found: Kind) -> Self {
        DisplayError::Type { operation, found }
    }

    pub(crate) fn layout(reason: impl Into<String>) -> Self {
        DisplayError::Layout {
            reason: reason.into(),
        }
    }
}
