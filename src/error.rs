//! Error types for parsing and document access.
//!
//! Every malformed-input condition aborts the whole parse on the first
//! offending line; accessor operations fail the single call without
//! corrupting the rest of the document. All errors carry the offending
//! raw input — the line text for parse errors, the key for accessor
//! errors — so diagnostics can point at the source.
//!
//! ## Examples
//!
//! ```rust
//! use scf::{from_str, Error};
//!
//! let result = from_str("[section\nkey = 1");
//! assert!(matches!(result, Err(Error::MalformedSection { line: 1, .. })));
//! ```

use crate::value::ValueKind;
use std::fmt;
use thiserror::Error;

/// All errors the parser, writer, and accessors can produce.
///
/// Parse errors carry the 1-based line number and the trimmed line text;
/// accessor errors carry the dotted key they were addressed with.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Section header with a missing `]` or an empty name
    #[error("malformed section header on line {line}: '{text}'")]
    MalformedSection { line: usize, text: String },

    /// Missing or misplaced `=`, or an empty key or value
    #[error("malformed assignment on line {line}: '{text}'")]
    MalformedAssignment { line: usize, text: String },

    /// A value line before any section header
    #[error("value outside of any section on line {line}: '{text}'")]
    OutOfSectionValue { line: usize, text: String },

    /// Opening quote without a matching closing quote
    #[error("unterminated string on line {line}: '{text}'")]
    UnterminatedString { line: usize, text: String },

    /// Literal matched no recognized value kind
    #[error("unknown literal type on line {line}: '{text}'")]
    UnknownLiteralType { line: usize, text: String },

    /// Input ended inside a bracketed list
    #[error("list opened by '{key}' is never closed")]
    UnterminatedList { key: String },

    /// Stored kind differs from the requested kind
    #[error("kind mismatch for '{key}': expected {expected}, found {found}")]
    KindMismatch {
        key: String,
        expected: ValueKind,
        found: ValueKind,
    },

    /// A value operation received a key with no section component
    #[error("key '{0}' does not include a section")]
    MissingSectionQualifier(String),

    /// An operation addressed a key that does not resolve to the expected
    /// object kind, e.g. setting a value on a bare section name
    #[error("invalid key for operation: '{0}'")]
    InvalidKeyForOperation(String),

    /// Generic message, used by the serde bridge
    #[error("{0}")]
    Message(String),
}

impl Error {
    pub(crate) fn malformed_section(line: usize, text: &str) -> Self {
        Error::MalformedSection {
            line,
            text: text.to_string(),
        }
    }

    pub(crate) fn malformed_assignment(line: usize, text: &str) -> Self {
        Error::MalformedAssignment {
            line,
            text: text.to_string(),
        }
    }

    pub(crate) fn out_of_section(line: usize, text: &str) -> Self {
        Error::OutOfSectionValue {
            line,
            text: text.to_string(),
        }
    }

    pub(crate) fn unterminated_string(line: usize, text: &str) -> Self {
        Error::UnterminatedString {
            line,
            text: text.to_string(),
        }
    }

    pub(crate) fn unknown_literal(line: usize, text: &str) -> Self {
        Error::UnknownLiteralType {
            line,
            text: text.to_string(),
        }
    }

    pub(crate) fn kind_mismatch(key: &str, expected: ValueKind, found: ValueKind) -> Self {
        Error::KindMismatch {
            key: key.to_string(),
            expected,
            found,
        }
    }

    /// Creates an I/O error from a failed read or write.
    pub(crate) fn io(err: &std::io::Error) -> Self {
        Error::Io(err.to_string())
    }

    /// Creates a generic error with a display message.
    pub fn message<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
