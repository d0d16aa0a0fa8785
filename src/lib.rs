//! # scf
//!
//! A parser, writer, and typed accessor layer for SCF (Sectioned
//! Configuration Format) — a small line-oriented configuration format of
//! named sections holding key/value entries, with comments that survive a
//! full read/write round trip.
//!
//! ## The format
//!
//! ```text
//! # how the server listens
//! [server]
//!   port = 8080
//!   host = "localhost"
//!   verbose = true
//!   timeout = 2.5
//!   workers = [
//!     1,
//!     2,
//!     3,
//!   ]
//! ```
//!
//! Values carry one of four scalar kinds, recognized in a fixed order:
//! booleans (`true`/`false`, any case), integers (digits only), floats
//! (digits with a `.`), and double-quoted strings. Lists hold elements of
//! a single kind. Anything else is a parse error, not a fallback.
//!
//! ## Key Features
//!
//! - **Round-trip faithful**: comments and ordering survive parse and
//!   re-serialize; serializing is deterministic and idempotent
//! - **Typed accessors**: read and write entries through dotted
//!   `section.key` paths with compile-time value types
//! - **Default injection**: [`Document::get_or`] writes the default (and
//!   its comments) back into the document when the key is missing, so
//!   saved files grow complete, documented configurations
//! - **Serde Compatible**: move whole documents in and out of plain Rust
//!   structs via [`to_document`] and [`from_document`]
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! scf = "0.1"
//! ```
//!
//! ### Reading a configuration with defaults
//!
//! ```rust
//! let mut doc = scf::from_str("[server]\nport = 9000").unwrap();
//!
//! // Present in the file: the stored value comes back.
//! let port = doc.get_or("server.port", 8080i64, &[]).unwrap();
//! assert_eq!(port, 9000);
//!
//! // Absent: the default is returned and written into the document.
//! let verbose = doc.get_or("server.verbose", false, &["extra logging"]).unwrap();
//! assert!(!verbose);
//!
//! assert_eq!(
//!     scf::to_string(&doc),
//!     "[server]\n  port = 9000\n  # extra logging\n  verbose = false\n\n"
//! );
//! ```
//!
//! ### Building a document programmatically
//!
//! ```rust
//! use scf::doc;
//!
//! let doc = doc! {
//!     server {
//!         port = 8080,
//!         host = "localhost",
//!         workers = [1, 2, 3],
//!     }
//! };
//! assert!(scf::to_string(&doc).starts_with("[server]\n  port = 8080\n"));
//! ```
//!
//! ### Serde
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Server {
//!     port: i64,
//!     host: String,
//! }
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Config {
//!     server: Server,
//! }
//!
//! let config = Config {
//!     server: Server { port: 8080, host: "localhost".to_string() },
//! };
//!
//! let doc = scf::to_document(&config).unwrap();
//! let text = scf::to_string(&doc);
//! let back: Config = scf::from_document(&scf::from_str(&text).unwrap()).unwrap();
//! assert_eq!(config, back);
//! ```
//!
//! Documents are two levels deep by construction, so serde types must be
//! a struct (or map) of structs (or maps) whose leaves are scalars or
//! sequences of scalars.

pub mod de;
pub mod document;
pub mod error;
mod macros;
pub mod ser;
pub mod value;

pub use de::from_document;
pub use document::{Document, Entry, Section};
pub use error::{Error, Result};
pub use ser::to_document;
pub use value::{FromScalar, Scalar, Value, ValueKind};

use std::io;

/// Parses sectioned key/value text into a [`Document`].
///
/// ```rust
/// let doc = scf::from_str("[foo]\nbar = \"hello\"").unwrap();
/// assert_eq!(doc.len(), 1);
/// ```
///
/// # Errors
///
/// Returns an error describing the first malformed line.
pub fn from_str(input: &str) -> Result<Document> {
    de::parse(input)
}

/// Reads sectioned key/value text from `reader` and parses it.
///
/// # Errors
///
/// Returns an error if reading fails or the text is malformed.
pub fn from_reader<R>(mut reader: R) -> Result<Document>
where
    R: io::Read,
{
    let mut input = String::new();
    reader
        .read_to_string(&mut input)
        .map_err(|e| Error::io(&e))?;
    de::parse(&input)
}

/// Renders a [`Document`] in its canonical textual form.
///
/// Serialization never fails: every representable document has a
/// rendering, and parsing that rendering reproduces the document.
///
/// ```rust
/// let doc = scf::from_str("[foo]\nbar = 1").unwrap();
/// assert_eq!(scf::to_string(&doc), "[foo]\n  bar = 1\n\n");
/// ```
#[must_use]
pub fn to_string(document: &Document) -> String {
    ser::write_document(document)
}

/// Writes a [`Document`]'s canonical textual form to `writer`.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn to_writer<W>(mut writer: W, document: &Document) -> Result<()>
where
    W: io::Write,
{
    writer
        .write_all(ser::write_document(document).as_bytes())
        .map_err(|e| Error::io(&e))
}
