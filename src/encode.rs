//! TOML re-emission.
//!
//! Each table's output form is chosen from its kind: inline tables print as
//! `{ … }`, dotted tables flatten into their parent's key prefix, header
//! tables open `[path]` blocks, and arrays of tables open one `[[path]]`
//! block per element. The insertion-order discipline upheld by the model
//! guarantees assignment lines precede a scope's header blocks.

use crate::array::Array;
use crate::table::{Table, TableKind, TableOrigin};
use crate::value::Value;

pub(crate) fn encode<'a>(root: &Table<'a>) -> String {
    let mut buf = String::new();
    emit_block(&mut buf, &[], root);
    buf
}

/// Emit one header scope: the table's assignment lines (dotted descendants
/// flattened in place), then a block for every header-like child collected
/// along the way.
fn emit_block<'a>(buf: &mut String, path: &[&'a str], table: &Table<'a>) {
    let mut deferred: Vec<(Vec<&'a str>, &Value<'a>)> = Vec::new();
    emit_assignments(buf, &mut Vec::new(), table, &mut deferred);

    for (rel, value) in deferred {
        let mut full: Vec<&'a str> = Vec::with_capacity(path.len() + rel.len());
        full.extend_from_slice(path);
        full.extend_from_slice(&rel);
        match value {
            Value::Table(t) => {
                // An implicit table was never named by a header; only its
                // children appear in the output.
                if t.origin() == TableOrigin::Explicit {
                    separate(buf);
                    buf.push('[');
                    write_path(buf, &full);
                    buf.push_str("]\n");
                }
                emit_block(buf, &full, t);
            }
            Value::Array(arr) => {
                for element in arr.iter() {
                    if let Value::Table(t) = element {
                        separate(buf);
                        buf.push_str("[[");
                        write_path(buf, &full);
                        buf.push_str("]]\n");
                        emit_block(buf, &full, t);
                    }
                }
            }
            _ => unreachable!("deferred values are header-like"),
        }
    }
}

/// Assignment lines of one scope. `dotted` carries the flattening prefix
/// while walking through dotted tables; header-like children are pushed onto
/// `deferred` with their path relative to the scope.
fn emit_assignments<'a, 't>(
    buf: &mut String,
    dotted: &mut Vec<&'a str>,
    table: &'t Table<'a>,
    deferred: &mut Vec<(Vec<&'a str>, &'t Value<'a>)>,
) {
    for (key, value) in table.iter() {
        match value {
            Value::Table(t) if t.kind() == TableKind::Dotted => {
                dotted.push(key);
                emit_assignments(buf, dotted, t, deferred);
                dotted.pop();
            }
            v if v.is_header_like() => {
                let mut rel = dotted.clone();
                rel.push(key);
                deferred.push((rel, v));
            }
            v => {
                for segment in dotted.iter() {
                    buf.push_str(segment);
                    buf.push('.');
                }
                buf.push_str(key);
                buf.push_str(" = ");
                emit_value(buf, v);
                buf.push('\n');
            }
        }
    }
}

/// A blank line between blocks, except at the very start of the output.
fn separate(buf: &mut String) {
    if !buf.is_empty() {
        buf.push('\n');
    }
}

/// Canonical key segments joined by dots. Segments that need quoting kept
/// their quotes at canonicalization time, so they print verbatim.
fn write_path(buf: &mut String, path: &[&str]) {
    for (i, segment) in path.iter().enumerate() {
        if i > 0 {
            buf.push('.');
        }
        buf.push_str(segment);
    }
}

fn emit_value(buf: &mut String, value: &Value<'_>) {
    match value {
        Value::String(s) => emit_string(buf, s),
        Value::Integer(i) => {
            let mut num = itoa::Buffer::new();
            buf.push_str(num.format(*i));
        }
        Value::Float(f) => emit_float(buf, *f),
        Value::Boolean(b) => buf.push_str(if *b { "true" } else { "false" }),
        Value::Date(d) => {
            use std::fmt::Write as _;
            let _ = write!(buf, "{d}");
        }
        Value::Time(t) => {
            use std::fmt::Write as _;
            let _ = write!(buf, "{t}");
        }
        Value::DateTime(dt) => {
            use std::fmt::Write as _;
            let _ = write!(buf, "{dt}");
        }
        Value::Array(arr) => emit_inline_array(buf, arr),
        Value::Table(t) => emit_inline_table(buf, t),
    }
}

fn emit_inline_array(buf: &mut String, array: &Array<'_>) {
    buf.push('[');
    for (i, value) in array.iter().enumerate() {
        if i > 0 {
            buf.push_str(", ");
        }
        emit_value(buf, value);
    }
    buf.push(']');
}

/// `{ k = v, … }`. Dotted tables that formed inside an inline table flatten
/// the same way they do at line level.
fn emit_inline_table(buf: &mut String, table: &Table<'_>) {
    if table.is_empty() {
        buf.push_str("{}");
        return;
    }
    buf.push_str("{ ");
    let mut first = true;
    let mut prefix: Vec<&str> = Vec::new();
    emit_inline_pairs(buf, &mut prefix, table, &mut first);
    buf.push_str(" }");
}

fn emit_inline_pairs<'a>(
    buf: &mut String,
    prefix: &mut Vec<&'a str>,
    table: &Table<'a>,
    first: &mut bool,
) {
    for (key, value) in table.iter() {
        if let Value::Table(t) = value
            && t.kind() == TableKind::Dotted
        {
            prefix.push(key);
            emit_inline_pairs(buf, prefix, t, first);
            prefix.pop();
            continue;
        }
        if !*first {
            buf.push_str(", ");
        }
        *first = false;
        for segment in prefix.iter() {
            buf.push_str(segment);
            buf.push('.');
        }
        buf.push_str(key);
        buf.push_str(" = ");
        emit_value(buf, value);
    }
}

fn emit_float(buf: &mut String, f: f64) {
    if f.is_nan() {
        buf.push_str("nan");
    } else if f.is_infinite() {
        buf.push_str(if f > 0.0 { "inf" } else { "-inf" });
    } else {
        let mut num = ryu::Buffer::new();
        buf.push_str(num.format(f));
    }
}

/// Basic-string emission with escape-on-emit, so any decoded content round
/// trips: quotes, backslashes, and control characters are re-escaped.
fn emit_string(buf: &mut String, s: &str) {
    buf.push('"');
    for c in s.chars() {
        match c {
            '"' => buf.push_str("\\\""),
            '\\' => buf.push_str("\\\\"),
            '\n' => buf.push_str("\\n"),
            '\r' => buf.push_str("\\r"),
            '\t' => buf.push_str("\\t"),
            '\u{8}' => buf.push_str("\\b"),
            '\u{c}' => buf.push_str("\\f"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                use std::fmt::Write as _;
                let _ = write!(buf, "\\u{:04X}", c as u32);
            }
            c => buf.push(c),
        }
    }
    buf.push('"');
}

#[cfg(test)]
#[path = "./encode_tests.rs"]
mod tests;
