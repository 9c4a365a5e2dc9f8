//! JSON emission: a plain mode mirroring the tree shape, and a typed mode
//! where every scalar becomes a `{"type": …, "value": …}` object in the
//! schema the toml-test conformance corpus consumes.

use crate::array::Array;
use crate::table::Table;
use crate::time::DateTime;
use crate::value::Value;

pub(crate) fn encode(root: &Table<'_>, typed: bool) -> String {
    let mut writer = Writer {
        buf: String::new(),
        typed,
    };
    writer.table(root);
    writer.buf
}

struct Writer {
    buf: String,
    typed: bool,
}

impl Writer {
    fn table(&mut self, table: &Table<'_>) {
        self.buf.push('{');
        for (i, (key, value)) in table.iter().enumerate() {
            if i > 0 {
                self.buf.push(',');
            }
            self.string(key);
            self.buf.push(':');
            self.value(value);
        }
        self.buf.push('}');
    }

    fn array(&mut self, array: &Array<'_>) {
        self.buf.push('[');
        for (i, value) in array.iter().enumerate() {
            if i > 0 {
                self.buf.push(',');
            }
            self.value(value);
        }
        self.buf.push(']');
    }

    fn value(&mut self, value: &Value<'_>) {
        match value {
            Value::Table(t) => self.table(t),
            Value::Array(a) => self.array(a),
            scalar if self.typed => self.typed_scalar(scalar),
            scalar => self.plain_scalar(scalar),
        }
    }

    fn plain_scalar(&mut self, value: &Value<'_>) {
        match value {
            Value::String(s) => self.string(s),
            Value::Integer(i) => {
                let mut buf = itoa::Buffer::new();
                self.buf.push_str(buf.format(*i));
            }
            Value::Float(f) if f.is_finite() => {
                let mut buf = ryu::Buffer::new();
                self.buf.push_str(buf.format(*f));
            }
            // Non-finite floats have no JSON number form.
            Value::Float(f) => self.string(nonfinite_str(*f)),
            Value::Boolean(b) => self.buf.push_str(if *b { "true" } else { "false" }),
            Value::Date(d) => self.string(&d.to_string()),
            Value::Time(t) => self.string(&t.to_string()),
            Value::DateTime(dt) => self.string(&dt.to_string()),
            Value::Array(..) | Value::Table(..) => unreachable!("handled by value()"),
        }
    }

    /// The conformance-harness form: type tag plus the value stringified,
    /// both as JSON strings.
    fn typed_scalar(&mut self, value: &Value<'_>) {
        let (tag, text): (&str, String) = match value {
            Value::String(s) => ("string", (*s).to_string()),
            Value::Integer(i) => ("integer", itoa::Buffer::new().format(*i).to_string()),
            Value::Float(f) if f.is_finite() => {
                ("float", ryu::Buffer::new().format(*f).to_string())
            }
            Value::Float(f) => ("float", nonfinite_str(*f).to_string()),
            Value::Boolean(b) => ("bool", b.to_string()),
            Value::Date(d) => ("date-local", d.to_string()),
            Value::Time(t) => ("time-local", t.to_string()),
            Value::DateTime(dt) => (datetime_tag(dt), dt.to_string()),
            Value::Array(..) | Value::Table(..) => unreachable!("handled by value()"),
        };
        self.buf.push_str("{\"type\":");
        self.string(tag);
        self.buf.push_str(",\"value\":");
        self.string(&text);
        self.buf.push('}');
    }

    /// JSON string escaping: quotes, backslashes, and control characters.
    fn string(&mut self, s: &str) {
        self.buf.push('"');
        for c in s.chars() {
            match c {
                '"' => self.buf.push_str("\\\""),
                '\\' => self.buf.push_str("\\\\"),
                '\n' => self.buf.push_str("\\n"),
                '\r' => self.buf.push_str("\\r"),
                '\t' => self.buf.push_str("\\t"),
                '\u{8}' => self.buf.push_str("\\b"),
                '\u{c}' => self.buf.push_str("\\f"),
                c if (c as u32) < 0x20 => {
                    self.buf.push_str("\\u00");
                    let v = c as u32;
                    self.buf.push(char::from_digit(v >> 4, 16).unwrap_or('0'));
                    self.buf.push(char::from_digit(v & 0xF, 16).unwrap_or('0'));
                }
                c => self.buf.push(c),
            }
        }
        self.buf.push('"');
    }
}

/// Offset presence distinguishes a `datetime` from a `datetime-local`.
fn datetime_tag(dt: &DateTime) -> &'static str {
    if dt.offset.is_some() {
        "datetime"
    } else {
        "datetime-local"
    }
}

fn nonfinite_str(f: f64) -> &'static str {
    if f.is_nan() {
        "nan"
    } else if f > 0.0 {
        "inf"
    } else {
        "-inf"
    }
}

#[cfg(test)]
#[path = "./json_tests.rs"]
mod tests;
