//! Serialization: [`Document`] to text, and typed values to [`Document`].
//!
//! The writer emits one canonical rendering. Sections and entries come out
//! in insertion order, comments are reattached as `# ` lines, entry lines
//! are indented two spaces and list elements four, and every section is
//! followed by a blank line. Parsing the output reproduces the document,
//! and writing that document reproduces the text byte for byte.
//!
//! ```rust
//! let doc = scf::from_str("[foo]\nbar = \"hello\"").unwrap();
//! assert_eq!(scf::to_string(&doc), "[foo]\n  bar = \"hello\"\n\n");
//! ```
//!
//! The module also bridges any two-level `T: Serialize` into a
//! [`Document`]:
//!
//! ```rust
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Server { port: i64 }
//!
//! #[derive(Serialize)]
//! struct Config { server: Server }
//!
//! let doc = scf::to_document(&Config { server: Server { port: 8080 } }).unwrap();
//! assert_eq!(scf::to_string(&doc), "[server]\n  port = 8080\n\n");
//! ```

use crate::document::{Document, Entry, Section};
use crate::error::{Error, Result};
use crate::value::{Scalar, Value, ValueKind};
use serde::ser::{self, Impossible, Serialize};
use std::fmt;

fn write_comments(output: &mut String, comments: &[String], indent: &str) {
    for comment in comments {
        output.push_str(indent);
        output.push_str("# ");
        output.push_str(comment);
        output.push('\n');
    }
}

fn write_entry(output: &mut String, key: &str, entry: &Entry) {
    // Entries that were requested but never received a value are not
    // part of the document's text.
    if entry.value.is_unset() {
        return;
    }
    write_comments(output, &entry.comments, "  ");
    output.push_str("  ");
    output.push_str(key);
    output.push_str(" = ");
    match &entry.value {
        Value::Unset => {}
        Value::Scalar(scalar) => {
            output.push_str(&scalar.render());
            output.push('\n');
        }
        Value::List(_, elements) => {
            output.push_str("[\n");
            for element in elements {
                output.push_str("    ");
                output.push_str(&element.render());
                output.push_str(",\n");
            }
            output.push_str("  ]\n");
        }
    }
}

fn write_section(output: &mut String, name: &str, section: &Section) {
    write_comments(output, &section.comments, "");
    output.push('[');
    output.push_str(name);
    output.push_str("]\n");
    for (key, entry) in &section.entries {
        write_entry(output, key, entry);
    }
    output.push('\n');
}

/// Renders a [`Document`] in its canonical textual form.
pub(crate) fn write_document(document: &Document) -> String {
    let mut output = String::with_capacity(256);
    for (name, section) in &document.sections {
        write_section(&mut output, name, section);
    }
    output
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&write_document(self))
    }
}

/// Serializes a typed value into a [`Document`].
///
/// Mirrors [`from_document`](crate::from_document): `T` must be a struct
/// (or map) of structs (or maps) whose leaves are scalars or sequences of
/// scalars. Deeper nesting, `Option` fields, and non-string keys are not
/// representable and produce an error.
///
/// # Errors
///
/// Returns an error if `T` does not fit the two-level shape.
pub fn to_document<T>(value: &T) -> Result<Document>
where
    T: Serialize,
{
    value.serialize(DocumentSerializer)
}

fn unsupported(what: &str) -> Error {
    Error::message(format!("cannot represent {what} in a document"))
}

struct DocumentSerializer;

impl ser::Serializer for DocumentSerializer {
    type Ok = Document;
    type Error = Error;

    type SerializeSeq = Impossible<Document, Error>;
    type SerializeTuple = Impossible<Document, Error>;
    type SerializeTupleStruct = Impossible<Document, Error>;
    type SerializeTupleVariant = Impossible<Document, Error>;
    type SerializeMap = SerializeSections;
    type SerializeStruct = SerializeSections;
    type SerializeStructVariant = Impossible<Document, Error>;

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(SerializeSections {
            document: Document::new(),
            name: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Ok(SerializeSections {
            document: Document::new(),
            name: None,
        })
    }

    fn serialize_bool(self, _v: bool) -> Result<Document> {
        Err(unsupported("a top-level scalar"))
    }

    fn serialize_i8(self, _v: i8) -> Result<Document> {
        Err(unsupported("a top-level scalar"))
    }

    fn serialize_i16(self, _v: i16) -> Result<Document> {
        Err(unsupported("a top-level scalar"))
    }

    fn serialize_i32(self, _v: i32) -> Result<Document> {
        Err(unsupported("a top-level scalar"))
    }

    fn serialize_i64(self, _v: i64) -> Result<Document> {
        Err(unsupported("a top-level scalar"))
    }

    fn serialize_u8(self, _v: u8) -> Result<Document> {
        Err(unsupported("a top-level scalar"))
    }

    fn serialize_u16(self, _v: u16) -> Result<Document> {
        Err(unsupported("a top-level scalar"))
    }

    fn serialize_u32(self, _v: u32) -> Result<Document> {
        Err(unsupported("a top-level scalar"))
    }

    fn serialize_u64(self, _v: u64) -> Result<Document> {
        Err(unsupported("a top-level scalar"))
    }

    fn serialize_f32(self, _v: f32) -> Result<Document> {
        Err(unsupported("a top-level scalar"))
    }

    fn serialize_f64(self, _v: f64) -> Result<Document> {
        Err(unsupported("a top-level scalar"))
    }

    fn serialize_char(self, _v: char) -> Result<Document> {
        Err(unsupported("a top-level scalar"))
    }

    fn serialize_str(self, _v: &str) -> Result<Document> {
        Err(unsupported("a top-level scalar"))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Document> {
        Err(unsupported("bytes"))
    }

    fn serialize_none(self) -> Result<Document> {
        Err(unsupported("an optional value"))
    }

    fn serialize_some<T>(self, _value: &T) -> Result<Document>
    where
        T: Serialize + ?Sized,
    {
        Err(unsupported("an optional value"))
    }

    fn serialize_unit(self) -> Result<Document> {
        Err(unsupported("a unit value"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Document> {
        Err(unsupported("a unit value"))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<Document> {
        Err(unsupported("an enum variant"))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Document>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Document>
    where
        T: Serialize + ?Sized,
    {
        Err(unsupported("an enum variant"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(unsupported("a top-level sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(unsupported("a tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(unsupported("a tuple"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(unsupported("an enum variant"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(unsupported("an enum variant"))
    }
}

struct SerializeSections {
    document: Document,
    name: Option<String>,
}

impl ser::SerializeMap for SerializeSections {
    type Ok = Document;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        self.name = Some(key.serialize(KeySerializer)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let name = self
            .name
            .take()
            .ok_or_else(|| Error::message("serialize_value called before serialize_key"))?;
        let section = value.serialize(SectionSerializer)?;
        *self.document.section_mut(&name) = section;
        Ok(())
    }

    fn end(self) -> Result<Document> {
        Ok(self.document)
    }
}

impl ser::SerializeStruct for SerializeSections {
    type Ok = Document;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let section = value.serialize(SectionSerializer)?;
        *self.document.section_mut(key) = section;
        Ok(())
    }

    fn end(self) -> Result<Document> {
        Ok(self.document)
    }
}

struct SectionSerializer;

impl ser::Serializer for SectionSerializer {
    type Ok = Section;
    type Error = Error;

    type SerializeSeq = Impossible<Section, Error>;
    type SerializeTuple = Impossible<Section, Error>;
    type SerializeTupleStruct = Impossible<Section, Error>;
    type SerializeTupleVariant = Impossible<Section, Error>;
    type SerializeMap = SerializeEntries;
    type SerializeStruct = SerializeEntries;
    type SerializeStructVariant = Impossible<Section, Error>;

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(SerializeEntries {
            section: Section::default(),
            key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Ok(SerializeEntries {
            section: Section::default(),
            key: None,
        })
    }

    fn serialize_bool(self, _v: bool) -> Result<Section> {
        Err(unsupported("a scalar where a section is expected"))
    }

    fn serialize_i8(self, _v: i8) -> Result<Section> {
        Err(unsupported("a scalar where a section is expected"))
    }

    fn serialize_i16(self, _v: i16) -> Result<Section> {
        Err(unsupported("a scalar where a section is expected"))
    }

    fn serialize_i32(self, _v: i32) -> Result<Section> {
        Err(unsupported("a scalar where a section is expected"))
    }

    fn serialize_i64(self, _v: i64) -> Result<Section> {
        Err(unsupported("a scalar where a section is expected"))
    }

    fn serialize_u8(self, _v: u8) -> Result<Section> {
        Err(unsupported("a scalar where a section is expected"))
    }

    fn serialize_u16(self, _v: u16) -> Result<Section> {
        Err(unsupported("a scalar where a section is expected"))
    }

    fn serialize_u32(self, _v: u32) -> Result<Section> {
        Err(unsupported("a scalar where a section is expected"))
    }

    fn serialize_u64(self, _v: u64) -> Result<Section> {
        Err(unsupported("a scalar where a section is expected"))
    }

    fn serialize_f32(self, _v: f32) -> Result<Section> {
        Err(unsupported("a scalar where a section is expected"))
    }

    fn serialize_f64(self, _v: f64) -> Result<Section> {
        Err(unsupported("a scalar where a section is expected"))
    }

    fn serialize_char(self, _v: char) -> Result<Section> {
        Err(unsupported("a scalar where a section is expected"))
    }

    fn serialize_str(self, _v: &str) -> Result<Section> {
        Err(unsupported("a scalar where a section is expected"))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Section> {
        Err(unsupported("bytes"))
    }

    fn serialize_none(self) -> Result<Section> {
        Err(unsupported("an optional value"))
    }

    fn serialize_some<T>(self, _value: &T) -> Result<Section>
    where
        T: Serialize + ?Sized,
    {
        Err(unsupported("an optional value"))
    }

    fn serialize_unit(self) -> Result<Section> {
        Err(unsupported("a unit value"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Section> {
        Err(unsupported("a unit value"))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<Section> {
        Err(unsupported("an enum variant"))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Section>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Section>
    where
        T: Serialize + ?Sized,
    {
        Err(unsupported("an enum variant"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(unsupported("a sequence where a section is expected"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(unsupported("a tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(unsupported("a tuple"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(unsupported("an enum variant"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(unsupported("an enum variant"))
    }
}

struct SerializeEntries {
    section: Section,
    key: Option<String>,
}

impl SerializeEntries {
    fn insert(&mut self, key: &str, value: Value) {
        self.section.entries.insert(
            key.to_string(),
            Entry {
                comments: Vec::new(),
                value,
            },
        );
    }
}

impl ser::SerializeMap for SerializeEntries {
    type Ok = Section;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        self.key = Some(key.serialize(KeySerializer)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let key = self
            .key
            .take()
            .ok_or_else(|| Error::message("serialize_value called before serialize_key"))?;
        let entry_value = value.serialize(EntryValueSerializer)?;
        self.insert(&key, entry_value);
        Ok(())
    }

    fn end(self) -> Result<Section> {
        Ok(self.section)
    }
}

impl ser::SerializeStruct for SerializeEntries {
    type Ok = Section;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let entry_value = value.serialize(EntryValueSerializer)?;
        self.insert(key, entry_value);
        Ok(())
    }

    fn end(self) -> Result<Section> {
        Ok(self.section)
    }
}

struct EntryValueSerializer;

impl ser::Serializer for EntryValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeList;
    type SerializeTuple = SerializeList;
    type SerializeTupleStruct = Impossible<Value, Error>;
    type SerializeTupleVariant = Impossible<Value, Error>;
    type SerializeMap = Impossible<Value, Error>;
    type SerializeStruct = Impossible<Value, Error>;
    type SerializeStructVariant = Impossible<Value, Error>;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Scalar(Scalar::Bool(v)))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Scalar(Scalar::Int(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        let v = i64::try_from(v).map_err(|_| unsupported("an integer beyond i64 range"))?;
        self.serialize_i64(v)
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Scalar(Scalar::Float(v)))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::Scalar(Scalar::Str(v.to_string())))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::Scalar(Scalar::Str(v.to_string())))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Value> {
        Err(unsupported("bytes"))
    }

    fn serialize_none(self) -> Result<Value> {
        Err(unsupported("an optional value"))
    }

    fn serialize_some<T>(self, _value: &T) -> Result<Value>
    where
        T: Serialize + ?Sized,
    {
        Err(unsupported("an optional value"))
    }

    fn serialize_unit(self) -> Result<Value> {
        Err(unsupported("a unit value"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Err(unsupported("a unit value"))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<Value> {
        Err(unsupported("an enum variant"))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Value>
    where
        T: Serialize + ?Sized,
    {
        Err(unsupported("an enum variant"))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(SerializeList {
            elements: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(unsupported("a tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(unsupported("an enum variant"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(unsupported("a nested map"))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(unsupported("a nested struct"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(unsupported("an enum variant"))
    }
}

struct SerializeList {
    elements: Vec<Scalar>,
}

impl ser::SerializeSeq for SerializeList {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let scalar = match value.serialize(EntryValueSerializer)? {
            Value::Scalar(scalar) => scalar,
            _ => return Err(unsupported("a nested list")),
        };
        if let Some(first) = self.elements.first() {
            if first.kind() != scalar.kind() {
                return Err(Error::message(format!(
                    "list elements must share one kind, found {} after {}",
                    scalar.kind(),
                    first.kind()
                )));
            }
        }
        self.elements.push(scalar);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        let kind = self
            .elements
            .first()
            .map(Scalar::kind)
            .unwrap_or(ValueKind::String);
        Ok(Value::List(kind, self.elements))
    }
}

impl ser::SerializeTuple for SerializeList {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

struct KeySerializer;

impl ser::Serializer for KeySerializer {
    type Ok = String;
    type Error = Error;

    type SerializeSeq = Impossible<String, Error>;
    type SerializeTuple = Impossible<String, Error>;
    type SerializeTupleStruct = Impossible<String, Error>;
    type SerializeTupleVariant = Impossible<String, Error>;
    type SerializeMap = Impossible<String, Error>;
    type SerializeStruct = Impossible<String, Error>;
    type SerializeStructVariant = Impossible<String, Error>;

    fn serialize_str(self, v: &str) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_char(self, v: char) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_bool(self, _v: bool) -> Result<String> {
        Err(unsupported("a non-string key"))
    }

    fn serialize_i8(self, _v: i8) -> Result<String> {
        Err(unsupported("a non-string key"))
    }

    fn serialize_i16(self, _v: i16) -> Result<String> {
        Err(unsupported("a non-string key"))
    }

    fn serialize_i32(self, _v: i32) -> Result<String> {
        Err(unsupported("a non-string key"))
    }

    fn serialize_i64(self, _v: i64) -> Result<String> {
        Err(unsupported("a non-string key"))
    }

    fn serialize_u8(self, _v: u8) -> Result<String> {
        Err(unsupported("a non-string key"))
    }

    fn serialize_u16(self, _v: u16) -> Result<String> {
        Err(unsupported("a non-string key"))
    }

    fn serialize_u32(self, _v: u32) -> Result<String> {
        Err(unsupported("a non-string key"))
    }

    fn serialize_u64(self, _v: u64) -> Result<String> {
        Err(unsupported("a non-string key"))
    }

    fn serialize_f32(self, _v: f32) -> Result<String> {
        Err(unsupported("a non-string key"))
    }

    fn serialize_f64(self, _v: f64) -> Result<String> {
        Err(unsupported("a non-string key"))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String> {
        Err(unsupported("a non-string key"))
    }

    fn serialize_none(self) -> Result<String> {
        Err(unsupported("a non-string key"))
    }

    fn serialize_some<T>(self, _value: &T) -> Result<String>
    where
        T: Serialize + ?Sized,
    {
        Err(unsupported("a non-string key"))
    }

    fn serialize_unit(self) -> Result<String> {
        Err(unsupported("a non-string key"))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<String> {
        Err(unsupported("a non-string key"))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String> {
        Ok(variant.to_string())
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<String>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<String>
    where
        T: Serialize + ?Sized,
    {
        Err(unsupported("a non-string key"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(unsupported("a non-string key"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(unsupported("a non-string key"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(unsupported("a non-string key"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(unsupported("a non-string key"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(unsupported("a non-string key"))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(unsupported("a non-string key"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(unsupported("a non-string key"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::de::parse;

    #[test]
    fn test_write_single_entry() {
        let doc = parse("[foo]\nbar = \"hello\"").unwrap();
        assert_eq!(write_document(&doc), "[foo]\n  bar = \"hello\"\n\n");
    }

    #[test]
    fn test_write_list_block() {
        let doc = parse("[s]\nval = [\n1\n2\n]").unwrap();
        assert_eq!(
            write_document(&doc),
            "[s]\n  val = [\n    1,\n    2,\n  ]\n\n"
        );
    }

    #[test]
    fn test_write_comments() {
        let doc = parse("# top\n[s]\n# inner\nkey = true").unwrap();
        assert_eq!(
            write_document(&doc),
            "# top\n[s]\n  # inner\n  key = true\n\n"
        );
    }

    #[test]
    fn test_write_whole_floats_keep_a_digit() {
        let doc = parse("[s]\na = 4334.0\nb = 0.0").unwrap();
        assert_eq!(write_document(&doc), "[s]\n  a = 4334.0\n  b = 0.0\n\n");
    }

    #[test]
    fn test_unset_entries_are_skipped() {
        let mut doc = Document::new();
        doc.set_comment("s.ghost", &["never written"]);
        doc.set("s.real", 1).unwrap();
        assert_eq!(write_document(&doc), "[s]\n  real = 1\n\n");
    }

    #[test]
    fn test_write_is_idempotent() {
        let text = "# head\n[alpha]\n  one = 1\n  two = \"2\"\n\n[beta]\n  flags = [\n    true,\n    false,\n  ]\n\n";
        let doc = parse(text).unwrap();
        let written = write_document(&doc);
        assert_eq!(written, text);
        assert_eq!(write_document(&parse(&written).unwrap()), written);
    }

    #[test]
    fn test_to_document_structs() {
        use serde::Serialize;

        #[derive(Serialize)]
        struct Server {
            port: i64,
            host: String,
            tags: Vec<String>,
        }

        #[derive(Serialize)]
        struct Config {
            server: Server,
        }

        let doc = to_document(&Config {
            server: Server {
                port: 8080,
                host: "localhost".to_string(),
                tags: vec!["a".to_string(), "b".to_string()],
            },
        })
        .unwrap();
        assert_eq!(
            write_document(&doc),
            "[server]\n  port = 8080\n  host = \"localhost\"\n  tags = [\n    \"a\",\n    \"b\",\n  ]\n\n"
        );
    }

    #[test]
    fn test_to_document_rejects_deep_nesting() {
        use serde::Serialize;
        use std::collections::BTreeMap;

        #[derive(Serialize)]
        struct Outer {
            inner: BTreeMap<String, BTreeMap<String, i64>>,
        }

        let mut deep = BTreeMap::new();
        deep.insert("a".to_string(), BTreeMap::from([("b".to_string(), 1)]));
        assert!(to_document(&Outer { inner: deep }).is_err());
    }

    #[test]
    fn test_to_document_rejects_mixed_list() {
        use serde::Serialize;

        #[derive(Serialize)]
        #[serde(untagged)]
        enum Mixed {
            I(i64),
            S(String),
        }

        #[derive(Serialize)]
        struct Inner {
            items: Vec<Mixed>,
        }

        #[derive(Serialize)]
        struct Outer {
            inner: Inner,
        }

        let outer = Outer {
            inner: Inner {
                items: vec![Mixed::I(1), Mixed::S("x".to_string())],
            },
        };
        assert!(to_document(&outer).is_err());
    }
}
