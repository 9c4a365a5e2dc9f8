//! Serde serialization support for the document tree.
//!
//! Enabled by the `serde` feature flag. Serialization only: the tree maps
//! onto maps, sequences, and scalars, with temporal values rendered as their
//! RFC 3339 strings.

use crate::array::Array;
use crate::table::Table;
use crate::value::Value;

impl serde::Serialize for Value<'_> {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Value::String(s) => ser.serialize_str(s),
            Value::Integer(i) => ser.serialize_i64(*i),
            Value::Float(f) => ser.serialize_f64(*f),
            Value::Boolean(b) => ser.serialize_bool(*b),
            Value::Date(d) => ser.serialize_str(&d.to_string()),
            Value::Time(t) => ser.serialize_str(&t.to_string()),
            Value::DateTime(dt) => ser.serialize_str(&dt.to_string()),
            Value::Array(arr) => arr.serialize(ser),
            Value::Table(table) => table.serialize(ser),
        }
    }
}

impl serde::Serialize for Array<'_> {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = ser.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}

impl serde::Serialize for Table<'_> {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = ser.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
