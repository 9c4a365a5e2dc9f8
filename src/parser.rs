//! The byte-at-a-time TOML scanner.
//!
//! A single forward cursor walks the input once. Statements dispatch on the
//! first significant byte of a line: `[[` opens an array-of-tables header,
//! `[` a table header, anything else a key/value line. The parser only
//! recognizes shape; the table model enforces what may legally go where.

use crate::arena::Arena;
use crate::array::Array;
use crate::error::{Error, ErrorKind};
use crate::key;
use crate::scalar;
use crate::table::{Table, TableKind, TableOrigin};
use crate::time::{self, Date, DateTime, Time};
use crate::value::Value;

const MAX_RECURSION_DEPTH: i16 = 128;

// When a method returns Err(ParseError), the full error details have already
// been written into Parser::error_kind / Parser::error_index.
#[derive(Copy, Clone)]
struct ParseError;

struct Parser<'s, 'a> {
    /// Raw bytes of the input. Always valid UTF-8 (derived from `&str`).
    src: &'s str,
    bytes: &'s [u8],
    cursor: usize,
    arena: &'a Arena,

    // Error context, populated just before returning ParseError.
    error_kind: Option<ErrorKind>,
    error_index: usize,

    /// Reusable buffer for decoding escaped strings. Cleared per string;
    /// the decoded bytes are committed into the arena before returning.
    strbuf: Vec<u8>,
}

/// Parses TOML source into a root table allocated in `arena`.
///
/// The input buffer is not retained: every key and string value is copied
/// into the arena.
pub(crate) fn parse<'a>(src: &str, arena: &'a Arena) -> Result<Table<'a>, Error> {
    let mut parser = Parser::new(src, arena);
    let mut root = Table::new(TableKind::Root, TableOrigin::Explicit);
    match parser.parse_document(&mut root) {
        Ok(()) => Ok(root),
        Err(ParseError) => Err(parser.take_error()),
    }
}

impl<'s, 'a> Parser<'s, 'a> {
    fn new(src: &'s str, arena: &'a Arena) -> Self {
        // Skip a UTF-8 BOM (EF BB BF) if present at the start.
        let cursor = if src.as_bytes().starts_with(b"\xef\xbb\xbf") {
            3
        } else {
            0
        };
        Parser {
            src,
            bytes: src.as_bytes(),
            cursor,
            arena,
            error_kind: None,
            error_index: 0,
            strbuf: Vec::new(),
        }
    }

    #[cold]
    fn set_error(&mut self, index: usize, kind: ErrorKind) -> ParseError {
        self.error_index = index;
        self.error_kind = Some(kind);
        ParseError
    }

    /// Materialize the stored context as a public [`Error`]. The line number
    /// is computed only here, by counting newlines in the consumed prefix;
    /// failure is the rare path.
    fn take_error(&mut self) -> Error {
        let kind = self
            .error_kind
            .take()
            .expect("take_error called without error");
        let index = self.error_index.min(self.bytes.len());
        let line = 1 + self.bytes[..index].iter().filter(|&&b| b == b'\n').count();
        Error { kind, index, line }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.cursor).copied()
    }

    #[inline]
    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.cursor + offset).copied()
    }

    #[inline]
    fn eat_byte(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    fn eat_whitespace(&mut self) {
        while let Some(b' ' | b'\t') = self.peek() {
            self.cursor += 1;
        }
    }

    /// Consume a `#` comment up to (not including) the line end. Bytes a
    /// comment may not contain are rejected here.
    fn eat_comment(&mut self) -> Result<(), ParseError> {
        debug_assert_eq!(self.peek(), Some(b'#'));
        self.cursor += 1;
        while let Some(0x09 | 0x20..=0x7E | 0x80..) = self.peek() {
            self.cursor += 1;
        }
        match self.peek() {
            None | Some(b'\n') => Ok(()),
            Some(b'\r') if self.peek_at(1) == Some(b'\n') => Ok(()),
            Some(b) => Err(self.set_error(self.cursor, ErrorKind::InvalidChar(b as char))),
        }
    }

    /// After a complete statement: only whitespace and an optional comment
    /// may remain before the newline. The newline itself is left for the
    /// statement loop.
    fn expect_line_end(&mut self) -> Result<(), ParseError> {
        self.eat_whitespace();
        match self.peek() {
            None | Some(b'\n') => Ok(()),
            Some(b'#') => self.eat_comment(),
            Some(b'\r') if self.peek_at(1) == Some(b'\n') => Ok(()),
            Some(b'\r') => Err(self.set_error(self.cursor, ErrorKind::InvalidChar('\r'))),
            Some(_) => Err(self.set_error(self.cursor, ErrorKind::InlineDefinition)),
        }
    }

    /// The first char at or after `index`, for error payloads.
    fn char_at(&self, index: usize) -> char {
        self.src
            .get(index..)
            .and_then(|s| s.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    fn parse_document(&mut self, root: &mut Table<'a>) -> Result<(), ParseError> {
        // Key/value lines before the first header land in the root.
        self.parse_block(root)?;
        loop {
            if self.peek().is_none() {
                return Ok(());
            }
            // parse_block leaves the cursor on the `[` of the next header.
            if self.peek_at(1) == Some(b'[') {
                self.parse_array_of_tables(root)?;
            } else {
                self.parse_table_header(root)?;
            }
        }
    }

    /// Consume key/value lines, blank lines, and comments until a header or
    /// EOF is reached.
    fn parse_block(&mut self, table: &mut Table<'a>) -> Result<(), ParseError> {
        loop {
            self.eat_whitespace();
            match self.peek() {
                None | Some(b'[') => return Ok(()),
                Some(b'\n') => self.cursor += 1,
                Some(b'\r') => {
                    if self.peek_at(1) == Some(b'\n') {
                        self.cursor += 2;
                    } else {
                        return Err(self.set_error(self.cursor, ErrorKind::InvalidChar('\r')));
                    }
                }
                Some(b'#') => self.eat_comment()?,
                Some(_) => self.parse_key_value(table)?,
            }
        }
    }

    /// Capture the text between the opening bracket(s) and `]`, split and
    /// canonicalize it into header path parts.
    fn read_header_path(
        &mut self,
        parts: &mut Vec<&'s str>,
        empty_err: ErrorKind,
    ) -> Result<(), ParseError> {
        let src = self.src;
        let content_start = self.cursor;
        let close = loop {
            match self.peek() {
                Some(b']') => break self.cursor,
                Some(b'\n') | None => {
                    return Err(self.set_error(self.cursor, ErrorKind::UnexpectedEof));
                }
                Some(_) => self.cursor += 1,
            }
        };
        self.cursor = close + 1;

        let inner = &src[content_start..close];
        if inner.trim_matches(|c| c == ' ' || c == '\t').is_empty() {
            return Err(self.set_error(content_start, empty_err));
        }
        key::split_dotted_key(inner, parts);
        for part in parts.iter_mut() {
            *part = match key::canonicalize_key(*part) {
                Ok(canonical) => canonical,
                Err(kind) => return Err(self.set_error(content_start, kind)),
            };
        }
        Ok(())
    }

    /// `[path]`: make the named table explicit, then fill it with the
    /// following key/value lines.
    fn parse_table_header(&mut self, root: &mut Table<'a>) -> Result<(), ParseError> {
        let header_start = self.cursor;
        self.cursor += 1;

        let mut parts = Vec::with_capacity(5);
        self.read_header_path(&mut parts, ErrorKind::InvalidTableHeader)?;
        self.expect_line_end()?;

        let target = match root.create_table(&parts, TableKind::Header, self.arena) {
            Ok(table) => table,
            Err(kind) => return Err(self.set_error(header_start, kind)),
        };
        self.parse_block(target)
    }

    /// `[[path]]`: append a fresh element to the named array of tables, then
    /// fill it with the following key/value lines.
    fn parse_array_of_tables(&mut self, root: &mut Table<'a>) -> Result<(), ParseError> {
        let header_start = self.cursor;
        self.cursor += 2;

        let mut parts = Vec::with_capacity(5);
        self.read_header_path(&mut parts, ErrorKind::InvalidTableArrayHeader)?;
        if !self.eat_byte(b']') {
            return Err(self.set_error(self.cursor, ErrorKind::InvalidTableArrayHeader));
        }
        self.expect_line_end()?;

        let array = match root.get_or_create_array(&parts, self.arena) {
            Ok(array) => array,
            Err(kind) => return Err(self.set_error(header_start, kind)),
        };
        array.push(
            Value::Table(Table::new(TableKind::ArrayElement, TableOrigin::Explicit)),
            self.arena,
        );
        let target = match array.last_mut() {
            Some(Value::Table(table)) => table,
            _ => unreachable!("element was just pushed"),
        };
        self.parse_block(target)
    }

    /// Scan a dotted key up to `=`, split it, and canonicalize each part.
    /// `missing_eq` is reported when the line ends before any `=`.
    fn read_key_parts(
        &mut self,
        parts: &mut Vec<&'s str>,
        missing_eq: ErrorKind,
    ) -> Result<(), ParseError> {
        let src = self.src;
        let start = self.cursor;
        let mut quote = 0u8;
        let end = loop {
            match self.peek() {
                None => return Err(self.set_error(self.cursor, ErrorKind::UnexpectedEof)),
                Some(b'=') if quote == 0 => break self.cursor,
                Some(b @ (b'"' | b'\'')) if quote == 0 => {
                    quote = b;
                    self.cursor += 1;
                }
                Some(b) if b == quote => {
                    quote = 0;
                    self.cursor += 1;
                }
                Some(b'\n' | b'\r') if quote != 0 => {
                    return Err(self.set_error(self.cursor, ErrorKind::InvalidChar('\n')));
                }
                Some(b'\n' | b'\r') => return Err(self.set_error(self.cursor, missing_eq)),
                Some(_) => self.cursor += 1,
            }
        };
        self.cursor = end + 1;

        key::split_dotted_key(&src[start..end], parts);
        for part in parts.iter_mut() {
            *part = match key::canonicalize_key(*part) {
                Ok(canonical) => canonical,
                Err(kind) => return Err(self.set_error(start, kind)),
            };
        }
        Ok(())
    }

    /// One `key = value` line.
    fn parse_key_value(&mut self, table: &mut Table<'a>) -> Result<(), ParseError> {
        let line_start = self.cursor;
        let mut parts = Vec::with_capacity(5);
        self.read_key_parts(&mut parts, ErrorKind::InvalidKeyValuePair)?;
        self.eat_whitespace();
        let value = self.parse_value(MAX_RECURSION_DEPTH)?;
        self.expect_line_end()?;

        match table.add_key_value(&parts, value, self.arena) {
            Ok(()) => Ok(()),
            Err(kind) => Err(self.set_error(line_start, kind)),
        }
    }

    fn parse_value(&mut self, depth_remaining: i16) -> Result<Value<'a>, ParseError> {
        if depth_remaining < 0 {
            return Err(self.set_error(self.cursor, ErrorKind::RecursionLimit));
        }
        match self.peek() {
            None => Err(self.set_error(self.bytes.len(), ErrorKind::UnexpectedEof)),
            Some(delim @ (b'"' | b'\'')) => {
                let s = self.parse_string(delim)?;
                Ok(Value::String(s))
            }
            Some(b'[') => self.parse_array(depth_remaining),
            Some(b'{') => self.parse_inline_table(depth_remaining),
            Some(_) => self.parse_scalar(),
        }
    }

    /// A scalar value: advance to the nearest delimiter, trim, and run the
    /// interpreters in order (integer, float, boolean, then the temporal
    /// shapes).
    fn parse_scalar(&mut self) -> Result<Value<'a>, ParseError> {
        let start = self.cursor;
        loop {
            match self.peek() {
                None | Some(b'#' | b',' | b']' | b'}' | b'\n') => break,
                Some(b'\r') => {
                    if self.peek_at(1) == Some(b'\n') {
                        break;
                    }
                    return Err(self.set_error(self.cursor, ErrorKind::InvalidChar('\r')));
                }
                Some(_) => self.cursor += 1,
            }
        }

        let mut run = &self.bytes[start..self.cursor];
        while let [b' ' | b'\t', rest @ ..] = run {
            run = rest;
        }
        while let [rest @ .., b' ' | b'\t'] = run {
            run = rest;
        }
        if run.is_empty() {
            return if self.peek().is_none() {
                Err(self.set_error(start, ErrorKind::UnexpectedEof))
            } else {
                Err(self.set_error(start, ErrorKind::InvalidValue))
            };
        }

        if let Some(i) = scalar::integer(run) {
            return Ok(Value::Integer(i));
        }
        if let Some(f) = scalar::float(run) {
            return Ok(Value::Float(f));
        }
        if let Some(b) = scalar::boolean(run) {
            return Ok(Value::Boolean(b));
        }
        if time::looks_like_date(run) {
            return if run.len() == 10 {
                match Date::from_slice(run) {
                    Ok(date) => Ok(Value::Date(date)),
                    Err(kind) => Err(self.set_error(start, kind)),
                }
            } else {
                match DateTime::from_slice(run) {
                    Ok(dt) => Ok(Value::DateTime(dt)),
                    Err(kind) => Err(self.set_error(start, kind)),
                }
            };
        }
        if time::looks_like_time(run) {
            return match Time::from_slice(run) {
                Ok(t) => Ok(Value::Time(t)),
                Err(kind) => Err(self.set_error(start, kind)),
            };
        }
        Err(self.set_error(start, ErrorKind::InvalidValue))
    }

    /// `[ … ]`: values separated by commas; newlines, comments, and a
    /// trailing comma are all permitted inside.
    fn parse_array(&mut self, depth_remaining: i16) -> Result<Value<'a>, ParseError> {
        self.cursor += 1;
        let mut array = Array::new();
        loop {
            self.eat_intermediate()?;
            if self.eat_byte(b']') {
                return Ok(Value::Array(array));
            }
            let value = self.parse_value(depth_remaining - 1)?;
            array.push(value, self.arena);
            self.eat_intermediate()?;
            if self.eat_byte(b',') {
                continue;
            }
            if self.eat_byte(b']') {
                return Ok(Value::Array(array));
            }
            return match self.peek() {
                None => Err(self.set_error(self.bytes.len(), ErrorKind::UnexpectedEof)),
                Some(_) => {
                    let c = self.char_at(self.cursor);
                    Err(self.set_error(self.cursor, ErrorKind::InvalidChar(c)))
                }
            };
        }
    }

    /// Whitespace, newlines, and comments between array elements.
    fn eat_intermediate(&mut self) -> Result<(), ParseError> {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\n') => self.cursor += 1,
                Some(b'\r') if self.peek_at(1) == Some(b'\n') => self.cursor += 2,
                Some(b'#') => self.eat_comment()?,
                _ => return Ok(()),
            }
        }
    }

    /// `{ … }`: single-line, comma-separated key/values. The produced table
    /// is sealed: kind `Inline`, origin `Explicit`.
    fn parse_inline_table(&mut self, depth_remaining: i16) -> Result<Value<'a>, ParseError> {
        self.cursor += 1;
        let mut table = Table::new(TableKind::Inline, TableOrigin::Explicit);
        self.eat_whitespace();
        if self.eat_byte(b'}') {
            return Ok(Value::Table(table));
        }
        loop {
            let pair_start = self.cursor;
            let mut parts = Vec::with_capacity(5);
            self.read_key_parts(&mut parts, ErrorKind::InvalidChar('\n'))?;
            self.eat_whitespace();
            let value = self.parse_value(depth_remaining - 1)?;
            if let Err(kind) = table.add_key_value(&parts, value, self.arena) {
                return Err(self.set_error(pair_start, kind));
            }

            self.eat_whitespace();
            if self.eat_byte(b',') {
                self.eat_whitespace();
                if self.peek() == Some(b'}') {
                    return Err(self.set_error(self.cursor, ErrorKind::TrailingComma));
                }
                continue;
            }
            if self.eat_byte(b'}') {
                return Ok(Value::Table(table));
            }
            return match self.peek() {
                None => Err(self.set_error(self.bytes.len(), ErrorKind::UnexpectedEof)),
                Some(b'\n' | b'\r') => {
                    Err(self.set_error(self.cursor, ErrorKind::InvalidChar('\n')))
                }
                Some(_) => {
                    let c = self.char_at(self.cursor);
                    Err(self.set_error(self.cursor, ErrorKind::InvalidChar(c)))
                }
            };
        }
    }

    /// A string value. The cursor sits on the opening quote; `delim` is `"`
    /// or `'`.
    fn parse_string(&mut self, delim: u8) -> Result<&'a str, ParseError> {
        let start = self.cursor;
        self.cursor += 1;
        if self.peek() == Some(delim) {
            if self.peek_at(1) == Some(delim) {
                self.cursor += 2;
                return self.parse_multiline_string(delim, start);
            }
            self.cursor += 1;
            return Ok("");
        }
        self.parse_single_line_string(delim, start)
    }

    fn parse_single_line_string(&mut self, delim: u8, start: usize) -> Result<&'a str, ParseError> {
        let content_start = self.cursor;
        let mut flush_from = content_start;
        let mut used_buf = false;
        loop {
            let i = self.cursor;
            let Some(&b) = self.bytes.get(i) else {
                return Err(self.set_error(start, ErrorKind::UnexpectedEof));
            };
            self.cursor = i + 1;
            match b {
                d if d == delim => {
                    return Ok(self.commit_string(content_start, flush_from, i, used_buf));
                }
                b'\n' | b'\r' => {
                    return Err(self.set_error(i, ErrorKind::InvalidChar(b as char)));
                }
                b'\\' if delim == b'"' => {
                    if !used_buf {
                        self.strbuf.clear();
                        used_buf = true;
                    }
                    self.strbuf.extend_from_slice(&self.bytes[flush_from..i]);
                    self.read_escape(start, false)?;
                    flush_from = self.cursor;
                }
                0x09 | 0x20..=0x7E | 0x80.. => {}
                _ => return Err(self.set_error(i, ErrorKind::InvalidChar(b as char))),
            }
        }
    }

    fn parse_multiline_string(&mut self, delim: u8, start: usize) -> Result<&'a str, ParseError> {
        // One newline directly after the opening delimiter is trimmed.
        match self.peek() {
            Some(b'\n') => self.cursor += 1,
            Some(b'\r') if self.peek_at(1) == Some(b'\n') => self.cursor += 2,
            _ => {}
        }
        let content_start = self.cursor;
        let mut flush_from = content_start;
        let mut used_buf = false;
        loop {
            let i = self.cursor;
            let Some(&b) = self.bytes.get(i) else {
                return Err(self.set_error(start, ErrorKind::UnexpectedEof));
            };
            self.cursor = i + 1;
            match b {
                d if d == delim => {
                    // Measure the delimiter run. One or two quotes are
                    // content; exactly three close the string; more is a
                    // malformed close.
                    let mut run = 1usize;
                    while self.peek() == Some(delim) {
                        self.cursor += 1;
                        run += 1;
                    }
                    match run {
                        1 | 2 => {}
                        3 => return Ok(self.commit_string(content_start, flush_from, i, used_buf)),
                        _ => return Err(self.set_error(i, ErrorKind::InvalidStringDelimiter)),
                    }
                }
                b'\r' => {
                    if self.peek() != Some(b'\n') {
                        return Err(self.set_error(i, ErrorKind::InvalidChar('\r')));
                    }
                    self.cursor += 1;
                }
                b'\\' if delim == b'"' => {
                    if !used_buf {
                        self.strbuf.clear();
                        used_buf = true;
                    }
                    self.strbuf.extend_from_slice(&self.bytes[flush_from..i]);
                    self.read_escape(start, true)?;
                    flush_from = self.cursor;
                }
                0x09 | 0x0A | 0x20..=0x7E | 0x80.. => {}
                _ => return Err(self.set_error(i, ErrorKind::InvalidChar(b as char))),
            }
        }
    }

    /// Finish a string: either commit the escape-decode buffer plus the last
    /// plain segment, or copy the plain content in one piece. `end` is the
    /// byte offset just past the content.
    fn commit_string(
        &mut self,
        content_start: usize,
        flush_from: usize,
        end: usize,
        used_buf: bool,
    ) -> &'a str {
        if used_buf {
            self.strbuf.extend_from_slice(&self.bytes[flush_from..end]);
            let decoded =
                std::str::from_utf8(&self.strbuf).expect("decoded string is valid UTF-8");
            self.arena.alloc_str(decoded)
        } else {
            self.arena.alloc_str(&self.src[content_start..end])
        }
    }

    /// Decode one escape sequence after a backslash into `strbuf`.
    fn read_escape(&mut self, string_start: usize, multi: bool) -> Result<(), ParseError> {
        let i = self.cursor;
        let Some(&b) = self.bytes.get(i) else {
            return Err(self.set_error(string_start, ErrorKind::UnexpectedEof));
        };
        self.cursor = i + 1;
        let decoded: char = match b {
            b'b' => '\u{8}',
            b't' => '\t',
            b'n' => '\n',
            b'f' => '\u{c}',
            b'r' => '\r',
            b'"' => '"',
            b'\\' => '\\',
            b'u' => self.read_hex_escape(4)?,
            b'U' => self.read_hex_escape(8)?,
            b' ' | b'\t' | b'\n' | b'\r' if multi => {
                return self.read_line_continuation(i, b);
            }
            _ => {
                self.cursor = i;
                let c = self.char_at(i);
                return Err(self.set_error(i, ErrorKind::InvalidEscapeValue(c)));
            }
        };
        let mut buf = [0u8; 4];
        self.strbuf
            .extend_from_slice(decoded.encode_utf8(&mut buf).as_bytes());
        Ok(())
    }

    /// `\` before a line break: consume the break and all following
    /// whitespace. A `\` followed by spaces requires the line to end before
    /// any other character.
    fn read_line_continuation(&mut self, escape_at: usize, first: u8) -> Result<(), ParseError> {
        match first {
            b'\n' => {}
            b'\r' => {
                if !self.eat_byte(b'\n') {
                    return Err(self.set_error(escape_at, ErrorKind::InvalidChar('\r')));
                }
            }
            _ => {
                // Space or tab: only more of the same may precede the break.
                loop {
                    match self.peek() {
                        Some(b' ' | b'\t') => self.cursor += 1,
                        Some(b'\n') => {
                            self.cursor += 1;
                            break;
                        }
                        Some(b'\r') if self.peek_at(1) == Some(b'\n') => {
                            self.cursor += 2;
                            break;
                        }
                        _ => {
                            return Err(self.set_error(
                                escape_at,
                                ErrorKind::InvalidEscapeValue(first as char),
                            ));
                        }
                    }
                }
            }
        }
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\n') => self.cursor += 1,
                Some(b'\r') if self.peek_at(1) == Some(b'\n') => self.cursor += 2,
                _ => return Ok(()),
            }
        }
    }

    /// `\uXXXX` / `\UXXXXXXXX`: exactly `n` hex digits naming a Unicode
    /// scalar value.
    fn read_hex_escape(&mut self, n: usize) -> Result<char, ParseError> {
        let escape_start = self.cursor;
        let mut value: u32 = 0;
        for _ in 0..n {
            let Some(&b) = self.bytes.get(self.cursor) else {
                return Err(self.set_error(escape_start, ErrorKind::InvalidUnicode(value)));
            };
            let Some(digit) = (b as char).to_digit(16) else {
                return Err(self.set_error(self.cursor, ErrorKind::InvalidUnicode(value)));
            };
            value = (value << 4) | digit;
            self.cursor += 1;
        }
        match char::from_u32(value) {
            Some(c) => Ok(c),
            None => Err(self.set_error(escape_start, ErrorKind::InvalidUnicode(value))),
        }
    }
}

#[cfg(test)]
#[path = "./parser_tests.rs"]
mod tests;
