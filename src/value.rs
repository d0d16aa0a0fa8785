//! Typed scalar values and literal classification.
//!
//! This module provides the closed set of value kinds the format knows
//! about, the [`Scalar`] payload they carry, and the two halves of the
//! type-inference engine: classification of a raw right-hand-side literal
//! into a typed scalar without any type tag in the source text, and
//! rendering of a typed value back into canonical literal text.
//!
//! ## Recognition order
//!
//! Literals are tried against the kinds in a fixed order: **Boolean →
//! Integer → Float → String**. The order is a correctness invariant, not
//! an implementation detail: Integer and Float overlap when no decimal
//! point is present, so trying Integer first is what disambiguates them.
//!
//! ```rust
//! use scf::{Scalar, ValueKind};
//!
//! assert_eq!(Scalar::from(true).kind(), ValueKind::Boolean);
//! assert_eq!(Scalar::from(5i64).kind(), ValueKind::Integer);
//! assert_eq!(Scalar::from(5.0).kind(), ValueKind::Float);
//! assert_eq!(Scalar::from("x").kind(), ValueKind::String);
//! ```
//!
//! ## Known grammar limitation
//!
//! The Integer and Float predicates require the first character to be an
//! ASCII digit, so a bare `-5` or `-2.1` is never recognized as numeric:
//! it falls through String recognition and the parse fails. The writer
//! still renders negative numbers, so a document containing them writes
//! fine but does not re-parse. This asymmetry is part of the format's
//! contract and is deliberately left in place.

use std::fmt;

/// The kinds of value an entry can hold.
///
/// The four scalar kinds are recognized directly from literal text; `List`
/// is only ever produced by the multi-line bracket syntax or by the list
/// accessors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Boolean,
    Integer,
    Float,
    String,
    List,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::List => "list",
        })
    }
}

/// A single typed scalar value.
///
/// Strings carry the raw text between the quote delimiters; there is no
/// escape grammar, so the stored text is exactly what appears in the
/// source.
///
/// # Examples
///
/// ```rust
/// use scf::{Scalar, ValueKind};
///
/// let s = Scalar::from("hello");
/// assert_eq!(s.kind(), ValueKind::String);
/// assert_eq!(s.render(), "\"hello\"");
///
/// let f = Scalar::from(4334.0);
/// assert_eq!(f.render(), "4334.0");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Scalar {
    /// Returns the kind of this scalar.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Scalar::Bool(_) => ValueKind::Boolean,
            Scalar::Int(_) => ValueKind::Integer,
            Scalar::Float(_) => ValueKind::Float,
            Scalar::Str(_) => ValueKind::String,
        }
    }

    /// Renders this scalar as canonical literal text.
    ///
    /// Floats always carry a decimal point (`0.0`, not `0`) so that a
    /// re-parse classifies them as floats rather than integers. Strings
    /// are wrapped in double quotes with no escaping.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Scalar::Bool(b) => b.to_string(),
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) => {
                if f.fract() == 0.0 && f.is_finite() {
                    format!("{f:.1}")
                } else {
                    f.to_string()
                }
            }
            Scalar::Str(s) => format!("\"{s}\""),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Outcome of trying a literal against the recognition chain.
///
/// `Unterminated` is not a non-match: an opening quote without a closing
/// quote must abort the parse instead of falling through to another kind.
#[derive(Debug)]
pub(crate) enum Classified {
    Match(Scalar),
    NoMatch,
    Unterminated,
}

/// Classifies a raw literal into a typed scalar.
///
/// Kinds are tried in the fixed order Boolean, Integer, Float, String;
/// the first predicate that matches wins. Callers translate `NoMatch`
/// and `Unterminated` into errors carrying the offending line.
pub(crate) fn classify(literal: &str) -> Classified {
    if literal.eq_ignore_ascii_case("true") {
        return Classified::Match(Scalar::Bool(true));
    }
    if literal.eq_ignore_ascii_case("false") {
        return Classified::Match(Scalar::Bool(false));
    }

    let first_is_digit = literal.chars().next().is_some_and(|c| c.is_ascii_digit());

    if first_is_digit && !literal.contains('.') {
        return match literal.parse::<i64>() {
            Ok(i) => Classified::Match(Scalar::Int(i)),
            Err(_) => Classified::NoMatch,
        };
    }
    if first_is_digit && literal.contains('.') {
        return match literal.parse::<f64>() {
            Ok(f) => Classified::Match(Scalar::Float(f)),
            Err(_) => Classified::NoMatch,
        };
    }

    if literal.len() > 2 && literal.starts_with('"') {
        if !literal.ends_with('"') {
            return Classified::Unterminated;
        }
        return Classified::Match(Scalar::Str(literal[1..literal.len() - 1].to_string()));
    }

    Classified::NoMatch
}

/// The value slot of an entry.
///
/// An entry's kind is fixed once assigned: a freshly auto-created entry is
/// `Unset` until first written, and later writes with a different kind are
/// rejected by the accessors. Modelling the slot as a sum type makes an
/// illegal kind transition a checked pattern-match failure.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    /// Created but never written; has no kind yet.
    #[default]
    Unset,
    /// A single typed scalar.
    Scalar(Scalar),
    /// An ordered list of scalars with a declared element kind.
    List(ValueKind, Vec<Scalar>),
}

impl Value {
    /// Returns the kind of this value, or `None` while unset.
    ///
    /// Lists report [`ValueKind::List`]; use [`Value::element_kind`] for
    /// the declared element kind.
    #[must_use]
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Value::Unset => None,
            Value::Scalar(s) => Some(s.kind()),
            Value::List(..) => Some(ValueKind::List),
        }
    }

    /// Returns the declared element kind of a list value.
    #[must_use]
    pub fn element_kind(&self) -> Option<ValueKind> {
        match self {
            Value::List(kind, _) => Some(*kind),
            _ => None,
        }
    }

    /// Returns `true` while this entry has never been written.
    #[inline]
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        matches!(self, Value::Unset)
    }

    /// If the value is a single scalar, returns it.
    #[inline]
    #[must_use]
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is a list, returns its elements.
    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&[Scalar]> {
        match self {
            Value::List(_, elements) => Some(elements),
            _ => None,
        }
    }
}

/// Typed extraction from a [`Scalar`], used by the typed accessors.
///
/// Implemented for `bool`, `i64`, `f64`, and `String` — the four scalar
/// kinds of the format. The associated [`KIND`](FromScalar::KIND) is what
/// the accessors compare against the stored kind before extracting.
pub trait FromScalar: Into<Scalar> + Clone + Sized {
    /// The kind this type requests from the accessors.
    const KIND: ValueKind;

    /// Extracts a value of this type, or `None` on a kind mismatch.
    fn from_scalar(scalar: &Scalar) -> Option<Self>;
}

impl FromScalar for bool {
    const KIND: ValueKind = ValueKind::Boolean;

    fn from_scalar(scalar: &Scalar) -> Option<Self> {
        match scalar {
            Scalar::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromScalar for i64 {
    const KIND: ValueKind = ValueKind::Integer;

    fn from_scalar(scalar: &Scalar) -> Option<Self> {
        match scalar {
            Scalar::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl FromScalar for f64 {
    const KIND: ValueKind = ValueKind::Float;

    fn from_scalar(scalar: &Scalar) -> Option<Self> {
        match scalar {
            Scalar::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl FromScalar for String {
    const KIND: ValueKind = ValueKind::String;

    fn from_scalar(scalar: &Scalar) -> Option<Self> {
        match scalar {
            Scalar::Str(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<i8> for Scalar {
    fn from(value: i8) -> Self {
        Scalar::Int(value as i64)
    }
}

impl From<i16> for Scalar {
    fn from(value: i16) -> Self {
        Scalar::Int(value as i64)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(value as i64)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<u8> for Scalar {
    fn from(value: u8) -> Self {
        Scalar::Int(value as i64)
    }
}

impl From<u16> for Scalar {
    fn from(value: u16) -> Self {
        Scalar::Int(value as i64)
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Scalar::Int(value as i64)
    }
}

impl From<f32> for Scalar {
    fn from(value: f32) -> Self {
        Scalar::Float(value as f64)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Str(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Str(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classified(literal: &str) -> Scalar {
        match classify(literal) {
            Classified::Match(s) => s,
            other => panic!("expected a match for {literal:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_boolean_recognition() {
        assert_eq!(classified("true"), Scalar::Bool(true));
        assert_eq!(classified("TRUE"), Scalar::Bool(true));
        assert_eq!(classified("False"), Scalar::Bool(false));
    }

    #[test]
    fn test_integer_before_float() {
        assert_eq!(classified("5"), Scalar::Int(5));
        assert_eq!(classified("5.0"), Scalar::Float(5.0));
        assert_eq!(classified("0"), Scalar::Int(0));
        assert_eq!(classified("45.6"), Scalar::Float(45.6));
    }

    #[test]
    fn test_string_recognition() {
        assert_eq!(classified("\"x\""), Scalar::Str("x".to_string()));
        assert_eq!(classified("\"wow\""), Scalar::Str("wow".to_string()));
    }

    #[test]
    fn test_unterminated_string_is_hard_error() {
        assert!(matches!(classify("\"oops"), Classified::Unterminated));
    }

    #[test]
    fn test_negative_literals_are_not_numeric() {
        // First character must be a digit, so signs fall through to string
        // recognition and fail there too.
        assert!(matches!(classify("-5"), Classified::NoMatch));
        assert!(matches!(classify("-2.1"), Classified::NoMatch));
    }

    #[test]
    fn test_no_match() {
        assert!(matches!(classify("hello"), Classified::NoMatch));
        assert!(matches!(classify("\"\""), Classified::NoMatch));
        assert!(matches!(classify("123abc"), Classified::NoMatch));
        assert!(matches!(classify("1.2.3"), Classified::NoMatch));
    }

    #[test]
    fn test_render_floats_keep_decimal_point() {
        assert_eq!(Scalar::Float(4334.0).render(), "4334.0");
        assert_eq!(Scalar::Float(0.0).render(), "0.0");
        assert_eq!(Scalar::Float(234.1).render(), "234.1");
        assert_eq!(Scalar::Float(-2132.2312313).render(), "-2132.2312313");
    }

    #[test]
    fn test_render_other_kinds() {
        assert_eq!(Scalar::Bool(true).render(), "true");
        assert_eq!(Scalar::Int(123).render(), "123");
        assert_eq!(Scalar::Str("wow".to_string()).render(), "\"wow\"");
    }

    #[test]
    fn test_value_kinds() {
        assert_eq!(Value::Unset.kind(), None);
        assert_eq!(
            Value::Scalar(Scalar::Int(1)).kind(),
            Some(ValueKind::Integer)
        );
        let list = Value::List(ValueKind::Integer, vec![Scalar::Int(1)]);
        assert_eq!(list.kind(), Some(ValueKind::List));
        assert_eq!(list.element_kind(), Some(ValueKind::Integer));
    }
}
