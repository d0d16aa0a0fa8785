//! The document object model and its accessor layer.
//!
//! A [`Document`] is an ordered mapping from section name to [`Section`];
//! a section is an ordered mapping from key to [`Entry`] plus attached
//! comments. Both mappings are backed by [`IndexMap`] so that parse order
//! (or programmatic insertion order) is exactly the order the writer
//! emits.
//!
//! The accessor layer addresses entries with dotted `"section.key"` keys
//! and auto-vivifies missing sections and entries on read-with-default,
//! so host applications can declare their defaults at the point of use:
//!
//! ```rust
//! use scf::Document;
//!
//! let mut doc = Document::new();
//! let port: i64 = doc.get_or("server.port", 8080, &["listen port"]).unwrap();
//! assert_eq!(port, 8080);
//!
//! // The injected default is now stored; a different default is ignored.
//! assert_eq!(doc.get_or("server.port", 9090i64, &[]).unwrap(), 8080);
//! ```

use crate::error::{Error, Result};
use crate::value::{FromScalar, Scalar, Value, ValueKind};
use indexmap::IndexMap;

fn owned_comments(comments: &[&str]) -> Vec<String> {
    comments.iter().map(|c| c.to_string()).collect()
}

fn split_dotted(key: &str) -> Option<(&str, &str)> {
    key.split_once('.')
}

/// A key bound to a typed value plus its attached comments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Entry {
    pub(crate) comments: Vec<String>,
    pub(crate) value: Value,
}

impl Entry {
    /// The comment lines attached to this entry, in order.
    #[must_use]
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// The value this entry holds.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// A named, ordered collection of entries plus attached comments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Section {
    pub(crate) comments: Vec<String>,
    pub(crate) entries: IndexMap<String, Entry>,
}

impl Section {
    /// The comment lines attached to this section, in order.
    #[must_use]
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// Looks up an entry by exact key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    /// Iterates over the entries in first-seen order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of entries in this section.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if this section has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn entry_mut(&mut self, key: &str) -> &mut Entry {
        self.entries.entry(key.to_string()).or_default()
    }
}

/// An ordered collection of named sections.
///
/// The document is the single source of truth: parsing builds one, the
/// accessors read and mutate it, and the writer regenerates canonical
/// text from it. It is a plain in-memory structure with no internal
/// synchronization; concurrent mutation must be serialized by the caller.
///
/// # Examples
///
/// ```rust
/// let mut doc = scf::from_str("[server]\nport = 8080").unwrap();
/// assert_eq!(doc.get_or("server.port", 0i64, &[]).unwrap(), 8080);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub(crate) sections: IndexMap<String, Section>,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Document::default()
    }

    /// Looks up a section by name.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Iterates over the sections in first-seen order.
    pub fn sections(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns `true` if the document has no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Returns the section for `name`, creating it if absent.
    ///
    /// Creating a section for an existing name returns the existing one.
    pub(crate) fn section_mut(&mut self, name: &str) -> &mut Section {
        self.sections.entry(name.to_string()).or_default()
    }

    /// Reads a scalar, injecting `default` (and `comments`) if the entry
    /// does not exist yet.
    ///
    /// The key must be dotted (`"section.key"`); missing sections and
    /// entries are created on the fly. If the entry exists, its stored
    /// value is returned and must match the requested kind. Comments are
    /// only attached when the entry has none yet.
    ///
    /// # Errors
    ///
    /// [`Error::MissingSectionQualifier`] if `key` has no dot, and
    /// [`Error::KindMismatch`] if the stored kind differs from `T`'s.
    pub fn get_or<T: FromScalar>(&mut self, key: &str, default: T, comments: &[&str]) -> Result<T> {
        let (section_name, entry_key) =
            split_dotted(key).ok_or_else(|| Error::MissingSectionQualifier(key.to_string()))?;
        let entry = self.section_mut(section_name).entry_mut(entry_key);
        match &entry.value {
            Value::Unset => {
                entry.value = Value::Scalar(default.clone().into());
                if entry.comments.is_empty() {
                    entry.comments = owned_comments(comments);
                }
                Ok(default)
            }
            Value::Scalar(s) => {
                let scalar = s.clone();
                if entry.comments.is_empty() {
                    entry.comments = owned_comments(comments);
                }
                T::from_scalar(&scalar)
                    .ok_or_else(|| Error::kind_mismatch(key, T::KIND, scalar.kind()))
            }
            Value::List(..) => Err(Error::kind_mismatch(key, T::KIND, ValueKind::List)),
        }
    }

    /// Writes a scalar under a dotted key, creating the entry if absent.
    ///
    /// An entry's kind is fixed on first write: writing a value of a
    /// different kind to an existing entry is an error, never a silent
    /// coercion.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidKeyForOperation`] if `key` addresses a bare
    /// section name, and [`Error::KindMismatch`] on a kind change.
    pub fn set<T: Into<Scalar>>(&mut self, key: &str, value: T) -> Result<()> {
        let (section_name, entry_key) =
            split_dotted(key).ok_or_else(|| Error::InvalidKeyForOperation(key.to_string()))?;
        let scalar = value.into();
        let entry = self.section_mut(section_name).entry_mut(entry_key);
        match &entry.value {
            Value::Unset => {
                entry.value = Value::Scalar(scalar);
                Ok(())
            }
            Value::Scalar(existing) if existing.kind() == scalar.kind() => {
                entry.value = Value::Scalar(scalar);
                Ok(())
            }
            Value::Scalar(existing) => {
                Err(Error::kind_mismatch(key, existing.kind(), scalar.kind()))
            }
            Value::List(..) => Err(Error::kind_mismatch(key, ValueKind::List, scalar.kind())),
        }
    }

    /// Reads a list of `T`, injecting `default` if the entry does not
    /// exist yet.
    ///
    /// Stored elements are checked one by one against `T`'s kind; the
    /// check happens at read time, so a heterogeneous list built in
    /// process only fails here.
    ///
    /// # Errors
    ///
    /// [`Error::MissingSectionQualifier`] if `key` has no dot, and
    /// [`Error::KindMismatch`] if the entry is not a list or any element
    /// has an unexpected kind.
    pub fn get_list_or<T: FromScalar>(
        &mut self,
        key: &str,
        default: &[T],
        comments: &[&str],
    ) -> Result<Vec<T>> {
        let (section_name, entry_key) =
            split_dotted(key).ok_or_else(|| Error::MissingSectionQualifier(key.to_string()))?;
        let entry = self.section_mut(section_name).entry_mut(entry_key);
        match &entry.value {
            Value::Unset => {
                entry.value = Value::List(
                    T::KIND,
                    default.iter().map(|v| v.clone().into()).collect(),
                );
                if entry.comments.is_empty() {
                    entry.comments = owned_comments(comments);
                }
                Ok(default.to_vec())
            }
            Value::List(_, elements) => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    match T::from_scalar(element) {
                        Some(v) => values.push(v),
                        None => return Err(Error::kind_mismatch(key, T::KIND, element.kind())),
                    }
                }
                Ok(values)
            }
            Value::Scalar(s) => Err(Error::kind_mismatch(key, ValueKind::List, s.kind())),
        }
    }

    /// Writes a list of `T` under a dotted key.
    ///
    /// Replaces any previous value at that key with a freshly kinded
    /// list, regardless of the previous kind.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidKeyForOperation`] if `key` addresses a bare
    /// section name.
    pub fn set_list<T: FromScalar>(
        &mut self,
        key: &str,
        values: impl IntoIterator<Item = T>,
    ) -> Result<()> {
        let scalars = values.into_iter().map(Into::into).collect();
        self.set_scalar_list(key, T::KIND, scalars)
    }

    /// Writes a list of raw scalars with an explicit element kind.
    ///
    /// This is the untyped form of [`Document::set_list`]; the element
    /// kind is recorded as given and the scalars are stored as-is, so a
    /// list whose elements disagree with `kind` can be built here — it
    /// fails at read time, not here.
    pub fn set_scalar_list(&mut self, key: &str, kind: ValueKind, values: Vec<Scalar>) -> Result<()> {
        let (section_name, entry_key) =
            split_dotted(key).ok_or_else(|| Error::InvalidKeyForOperation(key.to_string()))?;
        let entry = self.section_mut(section_name).entry_mut(entry_key);
        entry.value = Value::List(kind, values);
        Ok(())
    }

    /// Replaces the comments on a section or an entry.
    ///
    /// A bare name addresses a section; a dotted key addresses an entry.
    /// Either is created if absent.
    pub fn set_comment(&mut self, key: &str, comments: &[&str]) {
        match split_dotted(key) {
            None => self.section_mut(key).comments = owned_comments(comments),
            Some((section_name, entry_key)) => {
                self.section_mut(section_name).entry_mut(entry_key).comments =
                    owned_comments(comments);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_injection_creates_section_and_entry() {
        let mut doc = Document::new();
        let value = doc
            .get_or("foo.bar", "hello".to_string(), &["greeting"])
            .unwrap();
        assert_eq!(value, "hello");

        let entry = doc.section("foo").unwrap().get("bar").unwrap();
        assert_eq!(entry.comments(), ["greeting"]);
        assert_eq!(
            doc.get_or("foo.bar", "goodbye".to_string(), &[]).unwrap(),
            "hello"
        );
    }

    #[test]
    fn test_get_requires_section_qualifier() {
        let mut doc = Document::new();
        let err = doc.get_or("nodot", 1i64, &[]).unwrap_err();
        assert_eq!(err, Error::MissingSectionQualifier("nodot".to_string()));
    }

    #[test]
    fn test_set_on_bare_section_name_is_invalid() {
        let mut doc = Document::new();
        let err = doc.set("section", 1i64).unwrap_err();
        assert_eq!(err, Error::InvalidKeyForOperation("section".to_string()));
    }

    #[test]
    fn test_entry_kind_is_fixed_after_first_write() {
        let mut doc = Document::new();
        doc.set("a.b", 1i64).unwrap();
        doc.set("a.b", 2i64).unwrap();
        let err = doc.set("a.b", "text").unwrap_err();
        assert_eq!(
            err,
            Error::kind_mismatch("a.b", ValueKind::Integer, ValueKind::String)
        );
    }

    #[test]
    fn test_get_kind_mismatch() {
        let mut doc = Document::new();
        doc.set("a.b", true).unwrap();
        let err = doc.get_or("a.b", 0i64, &[]).unwrap_err();
        assert_eq!(
            err,
            Error::kind_mismatch("a.b", ValueKind::Integer, ValueKind::Boolean)
        );
    }

    #[test]
    fn test_list_roundtrip_through_accessors() {
        let mut doc = Document::new();
        doc.set_list("s.nums", [1i64, 2, 3]).unwrap();
        let nums = doc.get_list_or::<i64>("s.nums", &[], &[]).unwrap();
        assert_eq!(nums, [1, 2, 3]);
    }

    #[test]
    fn test_heterogeneous_list_fails_at_read_time() {
        let mut doc = Document::new();
        doc.set_scalar_list(
            "s.mixed",
            ValueKind::Float,
            vec![Scalar::Str("foo".to_string()), Scalar::Int(1)],
        )
        .unwrap();
        let err = doc.get_list_or::<f64>("s.mixed", &[], &[]).unwrap_err();
        assert_eq!(
            err,
            Error::kind_mismatch("s.mixed", ValueKind::Float, ValueKind::String)
        );
    }

    #[test]
    fn test_set_list_replaces_previous_value() {
        let mut doc = Document::new();
        doc.set("s.k", 5i64).unwrap();
        doc.set_list("s.k", ["a".to_string()]).unwrap();
        let entry = doc.section("s").unwrap().get("k").unwrap();
        assert_eq!(entry.value().kind(), Some(ValueKind::List));
        assert_eq!(entry.value().element_kind(), Some(ValueKind::String));
    }

    #[test]
    fn test_list_default_injection() {
        let mut doc = Document::new();
        let values = doc
            .get_list_or("s.list", &[10i64, 20], &["defaults"])
            .unwrap();
        assert_eq!(values, [10, 20]);
        assert_eq!(doc.get_list_or::<i64>("s.list", &[], &[]).unwrap(), [10, 20]);
    }

    #[test]
    fn test_set_comment_on_section_and_entry() {
        let mut doc = Document::new();
        doc.set("net.port", 80i64).unwrap();
        doc.set_comment("net", &["network settings"]);
        doc.set_comment("net.port", &["listen port"]);
        let section = doc.section("net").unwrap();
        assert_eq!(section.comments(), ["network settings"]);
        assert_eq!(section.get("port").unwrap().comments(), ["listen port"]);
    }

    #[test]
    fn test_set_comment_vivifies_unset_entry() {
        let mut doc = Document::new();
        doc.set_comment("sec.key", &["pending"]);
        let entry = doc.section("sec").unwrap().get("key").unwrap();
        assert!(entry.value().is_unset());
        assert_eq!(entry.comments(), ["pending"]);
    }

    #[test]
    fn test_get_or_writes_through_unset_entry() {
        let mut doc = Document::new();
        doc.set_comment("sec.key", &["pending"]);
        assert_eq!(doc.get_or("sec.key", 7i64, &[]).unwrap(), 7);
        assert_eq!(doc.get_or("sec.key", 0i64, &[]).unwrap(), 7);
    }
}
