//! The [`Value`] sum type: the nine shapes a TOML value can take.

use crate::array::Array;
use crate::table::{Table, TableKind};
use crate::time::{Date, DateTime, Time};
use std::fmt;

/// A parsed TOML value.
///
/// Strings are owned by the arena the document was parsed into; arrays and
/// tables own their elements the same way. Nothing here implements `Drop`:
/// the whole tree is released when the arena goes away.
pub enum Value<'a> {
    /// A string, escape sequences already decoded.
    String(&'a str),
    /// A 64-bit signed integer.
    Integer(i64),
    /// A 64-bit IEEE-754 float.
    Float(f64),
    /// A boolean.
    Boolean(bool),
    /// A local calendar date.
    Date(Date),
    /// A local clock time.
    Time(Time),
    /// A datetime, local or offset.
    DateTime(DateTime),
    /// An ordered sequence of values.
    Array(Array<'a>),
    /// An ordered key/value mapping.
    Table(Table<'a>),
}

impl<'a> Value<'a> {
    /// Returns the borrowed string if this is a string value.
    #[inline]
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Self::String(s) => Some(*s),
            _ => None,
        }
    }

    /// Returns an `i64` if this is an integer value.
    #[inline]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns an `f64` if this is a float value.
    #[inline]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns a `bool` if this is a boolean value.
    #[inline]
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the date if this is a date value.
    #[inline]
    pub fn as_date(&self) -> Option<Date> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns the time if this is a time value.
    #[inline]
    pub fn as_time(&self) -> Option<Time> {
        match self {
            Self::Time(t) => Some(*t),
            _ => None,
        }
    }

    /// Returns the datetime if this is a datetime value.
    #[inline]
    pub fn as_datetime(&self) -> Option<DateTime> {
        match self {
            Self::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Returns a borrowed array if this is an array value.
    #[inline]
    pub fn as_array(&self) -> Option<&Array<'a>> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Returns a borrowed table if this is a table value.
    #[inline]
    pub fn as_table(&self) -> Option<&Table<'a>> {
        match self {
            Self::Table(t) => Some(t),
            _ => None,
        }
    }

    /// Returns a mutable array reference.
    #[inline]
    pub fn as_array_mut(&mut self) -> Option<&mut Array<'a>> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Returns a mutable table reference.
    #[inline]
    pub fn as_table_mut(&mut self) -> Option<&mut Table<'a>> {
        match self {
            Self::Table(t) => Some(t),
            _ => None,
        }
    }

    /// Gets the type of the value as a string.
    pub fn type_str(&self) -> &'static str {
        match self {
            Self::String(..) => "string",
            Self::Integer(..) => "integer",
            Self::Float(..) => "float",
            Self::Boolean(..) => "boolean",
            Self::Date(..) => "date",
            Self::Time(..) => "time",
            Self::DateTime(..) => "datetime",
            Self::Array(..) => "array",
            Self::Table(..) => "table",
        }
    }

    /// An array of tables: a non-empty array whose first element is an
    /// array-element table. Whether an array is one is read from its
    /// elements, never stored on the array.
    pub fn is_array_of_tables(&self) -> bool {
        match self {
            Self::Array(a) => matches!(
                a.first(),
                Some(Value::Table(t)) if t.kind() == TableKind::ArrayElement
            ),
            _ => false,
        }
    }

    /// True for the values the encoder renders in header position: tables
    /// opened by `[...]` and arrays of tables.
    pub(crate) fn is_header_like(&self) -> bool {
        match self {
            Self::Table(t) => t.kind() == TableKind::Header,
            _ => self.is_array_of_tables(),
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => s.fmt(f),
            Self::Integer(i) => i.fmt(f),
            Self::Float(v) => v.fmt(f),
            Self::Boolean(b) => b.fmt(f),
            Self::Date(d) => write!(f, "{d}"),
            Self::Time(t) => write!(f, "{t}"),
            Self::DateTime(dt) => write!(f, "{dt}"),
            Self::Array(a) => a.fmt(f),
            Self::Table(t) => t.fmt(f),
        }
    }
}

/// Structural equality: same shape, same contents, insertion order
/// respected. Table kind/origin metadata is ignored, so a dotted rendition
/// and a header rendition of the same data compare equal.
impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Date(a), Self::Date(b)) => a == b,
            (Self::Time(a), Self::Time(b)) => a == b,
            (Self::DateTime(a), Self::DateTime(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Table(a), Self::Table(b)) => a == b,
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "./value_tests.rs"]
mod tests;
