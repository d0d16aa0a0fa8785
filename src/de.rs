//! Parsing: text to [`Document`], and [`Document`] to typed values.
//!
//! The parser is line-oriented and single-pass: each input line is
//! trimmed and dispatched on its first character, with three pieces of
//! explicit state — the current section, the pending comment buffer, and
//! the active list accumulator. Every malformed line aborts the whole
//! parse immediately; there is no partial-document recovery.
//!
//! ```rust
//! let text = "# greeting\n[foo]\nbar = \"wow\"";
//! let mut doc = scf::from_str(text).unwrap();
//! assert_eq!(doc.get_or("foo.bar", String::new(), &[]).unwrap(), "wow");
//! ```
//!
//! The module also bridges a parsed document into any `T: Deserialize`
//! whose shape is two levels deep — a struct/map of structs/maps holding
//! scalars or scalar sequences:
//!
//! ```rust
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Server { port: i64 }
//!
//! #[derive(Deserialize)]
//! struct Config { server: Server }
//!
//! let doc = scf::from_str("[server]\nport = 8080").unwrap();
//! let config: Config = scf::from_document(&doc).unwrap();
//! assert_eq!(config.server.port, 8080);
//! ```

use crate::document::{Document, Entry, Section};
use crate::error::{Error, Result};
use crate::value::{classify, Classified, Scalar, Value, ValueKind};
use serde::de::IntoDeserializer;
use serde::{de, forward_to_deserialize_any};
use std::mem;

/// An open bracketed list being accumulated line by line.
struct ListState {
    section: String,
    key: String,
    elements: Vec<Scalar>,
}

fn classify_line(literal: &str, number: usize, raw: &str) -> Result<Scalar> {
    match classify(literal) {
        Classified::Match(scalar) => Ok(scalar),
        Classified::Unterminated => Err(Error::unterminated_string(number, raw)),
        Classified::NoMatch => Err(Error::unknown_literal(number, raw)),
    }
}

/// Parses sectioned key/value text into a [`Document`].
pub(crate) fn parse(input: &str) -> Result<Document> {
    let mut document = Document::new();
    let mut current: Option<String> = None;
    let mut comments: Vec<String> = Vec::new();
    let mut list: Option<ListState> = None;

    for (index, raw) in input.lines().enumerate() {
        let line = raw.trim();
        let number = index + 1;

        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix('#') {
            comments.push(rest.trim().to_string());
            continue;
        }

        if line.starts_with('[') {
            if !line.ends_with(']') || line.len() < 3 {
                return Err(Error::malformed_section(number, line));
            }
            let name = &line[1..line.len() - 1];
            let section = document.section_mut(name);
            section.comments.extend(comments.drain(..));
            current = Some(name.to_string());
            continue;
        }

        // Inside a list, every line is an element literal until the
        // closing bracket.
        if let Some(mut state) = list.take() {
            if line == "]" {
                let kind = state
                    .elements
                    .first()
                    .map(Scalar::kind)
                    .unwrap_or(ValueKind::String);
                let entry = document.section_mut(&state.section).entry_mut(&state.key);
                entry.comments = mem::take(&mut comments);
                entry.value = Value::List(kind, state.elements);
            } else {
                // Element lines may carry the writer's trailing comma.
                let element = line.strip_suffix(',').unwrap_or(line).trim_end();
                state.elements.push(classify_line(element, number, line)?);
                list = Some(state);
            }
            continue;
        }

        let section_name = match current.as_deref() {
            Some(name) => name,
            None => return Err(Error::out_of_section(number, line)),
        };

        let equals = match line.find('=') {
            Some(index) => index,
            None => return Err(Error::malformed_assignment(number, line)),
        };
        if equals <= 1 || equals == line.len() - 1 {
            return Err(Error::malformed_assignment(number, line));
        }
        let key = line[..equals].trim();
        let literal = line[equals + 1..].trim();
        if key.is_empty() || literal.is_empty() {
            return Err(Error::malformed_assignment(number, line));
        }

        if literal == "[" {
            list = Some(ListState {
                section: section_name.to_string(),
                key: key.to_string(),
                elements: Vec::new(),
            });
            continue;
        }

        let scalar = classify_line(literal, number, line)?;
        let entry = document.section_mut(section_name).entry_mut(key);
        entry.comments = mem::take(&mut comments);
        entry.value = Value::Scalar(scalar);
    }

    if let Some(state) = list {
        return Err(Error::UnterminatedList { key: state.key });
    }

    Ok(document)
}

/// Deserializes a typed value out of a parsed [`Document`].
///
/// Sections map to the top-level fields of `T`, entries to the fields of
/// those, so `T` must be a struct (or map) of structs (or maps) whose
/// leaves are scalars or sequences of scalars.
///
/// # Errors
///
/// Returns an error if the document's shape or kinds do not match `T`.
pub fn from_document<T>(document: &Document) -> Result<T>
where
    T: de::DeserializeOwned,
{
    T::deserialize(DocumentDeserializer { document })
}

struct DocumentDeserializer<'a> {
    document: &'a Document,
}

impl<'de, 'a> de::Deserializer<'de> for DocumentDeserializer<'a> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_map(SectionsAccess {
            iter: self.document.sections.iter(),
            section: None,
        })
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple
        tuple_struct map struct enum identifier ignored_any
    }
}

struct SectionsAccess<'a> {
    iter: indexmap::map::Iter<'a, String, Section>,
    section: Option<&'a Section>,
}

impl<'de, 'a> de::MapAccess<'de> for SectionsAccess<'a> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((name, section)) => {
                self.section = Some(section);
                seed.deserialize(name.as_str().into_deserializer()).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.section.take() {
            Some(section) => seed.deserialize(SectionDeserializer { section }),
            None => Err(Error::message("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct SectionDeserializer<'a> {
    section: &'a Section,
}

impl<'de, 'a> de::Deserializer<'de> for SectionDeserializer<'a> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_map(EntriesAccess {
            iter: self.section.entries.iter(),
            entry: None,
        })
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple
        tuple_struct map struct enum identifier ignored_any
    }
}

struct EntriesAccess<'a> {
    iter: indexmap::map::Iter<'a, String, Entry>,
    entry: Option<&'a Entry>,
}

impl<'de, 'a> de::MapAccess<'de> for EntriesAccess<'a> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, entry)) => {
                self.entry = Some(entry);
                seed.deserialize(key.as_str().into_deserializer()).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.entry.take() {
            Some(entry) => seed.deserialize(EntryDeserializer { entry }),
            None => Err(Error::message("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct EntryDeserializer<'a> {
    entry: &'a Entry,
}

impl<'de, 'a> de::Deserializer<'de> for EntryDeserializer<'a> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match &self.entry.value {
            Value::Unset => Err(Error::message("cannot deserialize an unset entry")),
            Value::Scalar(scalar) => ScalarDeserializer { scalar }.deserialize_any(visitor),
            Value::List(_, elements) => visitor.visit_seq(ScalarSeqAccess {
                iter: elements.iter(),
            }),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple
        tuple_struct map struct enum identifier ignored_any
    }
}

struct ScalarSeqAccess<'a> {
    iter: std::slice::Iter<'a, Scalar>,
}

impl<'de, 'a> de::SeqAccess<'de> for ScalarSeqAccess<'a> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(scalar) => seed.deserialize(ScalarDeserializer { scalar }).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct ScalarDeserializer<'a> {
    scalar: &'a Scalar,
}

impl<'de, 'a> de::Deserializer<'de> for ScalarDeserializer<'a> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.scalar {
            Scalar::Bool(b) => visitor.visit_bool(*b),
            Scalar::Int(i) => visitor.visit_i64(*i),
            Scalar::Float(f) => visitor.visit_f64(*f),
            Scalar::Str(s) => visitor.visit_str(s),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple
        tuple_struct map struct enum identifier ignored_any
    }
}
