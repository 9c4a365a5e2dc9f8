use std::fmt::{self, Debug, Display};

/// Error produced by parsing or by [`parse_file`](crate::parse_file) I/O.
///
/// `index` is the byte offset into the input at which the parser stopped;
/// `line` is the 1-based line number, computed by counting newlines in the
/// consumed prefix at failure time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// The error kind.
    pub kind: ErrorKind,
    /// Byte offset into the input where the error was detected.
    pub index: usize,
    /// 1-based line number of `index`.
    pub line: usize,
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte {} (line {})", self.kind, self.index, self.line)
    }
}

/// The closed set of failure conditions.
///
/// Lexical kinds come out of the scanner, structural kinds out of the table
/// model, scalar kinds out of the date/time interpreters. `Io` only occurs
/// through [`parse_file`](crate::parse_file).
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    // Lexical
    /// A byte that cannot appear at this position (lone `\r`, newline in a
    /// single-line string or inline table, control character in a string).
    InvalidChar(char),
    /// An escape sequence outside the recognized set.
    InvalidEscapeValue(char),
    /// A `\u`/`\U` escape that is malformed or names no Unicode scalar value.
    InvalidUnicode(u32),
    /// A multiline string closed by an over-long delimiter run.
    InvalidStringDelimiter,
    /// Input ended inside a statement, string, or header.
    UnexpectedEof,
    /// A key that is neither bare nor fully quoted.
    InvalidKey,
    /// A key/value line without `=` where one is required.
    InvalidKeyValuePair,
    /// A `[...]` header with no key parts.
    InvalidTableHeader,
    /// A `[[...]]` header with no key parts.
    InvalidTableArrayHeader,
    /// Trailing content after a complete statement on the same line.
    InlineDefinition,
    /// A trailing comma inside an inline table.
    TrailingComma,
    /// A value matched none of the scalar interpreters.
    InvalidValue,
    /// Nested values exceeded the depth bound.
    RecursionLimit,

    // Structural
    /// A header path step exists but is not a table.
    InvalidTableNesting,
    /// A header terminal exists as a non-table value.
    DuplicateTableHeader,
    /// A statement attempted to extend an inline table after its `}`.
    ImmutableInlineTable,
    /// A key/value terminal slot already holds a non-table value.
    DuplicateKeyValuePair,
    /// A table was named a second time after becoming explicit.
    TableRedefinition,
    /// A key/value terminal slot already holds a table.
    KeyValueRedefinition,
    /// An array-of-tables path step exists but is not a table.
    ExpectedTable,
    /// An array-of-tables leaf exists but is not an array.
    ExpectedArray,
    /// `[[x]]` where `x` is an array not declared as an array of tables.
    ExpectedArrayOfTables,
    /// A dotted path step exists as a non-table value.
    KeyValueTypeOverride,

    // Scalar
    /// Year field is malformed.
    InvalidYear,
    /// Month outside 1–12 or malformed.
    InvalidMonth,
    /// Day outside the month's range (leap years considered) or malformed.
    InvalidDay,
    /// Hour outside 0–23 or malformed.
    InvalidHour,
    /// Minute outside 0–59 or malformed.
    InvalidMinute,
    /// Second outside 0–59 or malformed.
    InvalidSecond,
    /// Fractional seconds empty or longer than nine digits.
    InvalidNanoSecond,
    /// Offset outside ±23:59 or malformed.
    InvalidTimeOffset,

    /// An I/O failure while reading a file.
    Io(std::io::ErrorKind),
}

impl ErrorKind {
    fn tag(&self) -> &'static str {
        match self {
            Self::InvalidChar(..) => "invalid-char",
            Self::InvalidEscapeValue(..) => "invalid-escape-value",
            Self::InvalidUnicode(..) => "invalid-unicode",
            Self::InvalidStringDelimiter => "invalid-string-delimiter",
            Self::UnexpectedEof => "unexpected-eof",
            Self::InvalidKey => "invalid-key",
            Self::InvalidKeyValuePair => "invalid-key-value-pair",
            Self::InvalidTableHeader => "invalid-table-header",
            Self::InvalidTableArrayHeader => "invalid-table-array-header",
            Self::InlineDefinition => "inline-definition",
            Self::TrailingComma => "trailing-comma",
            Self::InvalidValue => "invalid-value",
            Self::RecursionLimit => "recursion-limit",
            Self::InvalidTableNesting => "invalid-table-nesting",
            Self::DuplicateTableHeader => "duplicate-table-header",
            Self::ImmutableInlineTable => "immutable-inline-table",
            Self::DuplicateKeyValuePair => "duplicate-key-value-pair",
            Self::TableRedefinition => "table-redefinition",
            Self::KeyValueRedefinition => "key-value-redefinition",
            Self::ExpectedTable => "expected-table",
            Self::ExpectedArray => "expected-array",
            Self::ExpectedArrayOfTables => "expected-array-of-tables",
            Self::KeyValueTypeOverride => "key-value-type-override",
            Self::InvalidYear => "invalid-year",
            Self::InvalidMonth => "invalid-month",
            Self::InvalidDay => "invalid-day",
            Self::InvalidHour => "invalid-hour",
            Self::InvalidMinute => "invalid-minute",
            Self::InvalidSecond => "invalid-second",
            Self::InvalidNanoSecond => "invalid-nanosecond",
            Self::InvalidTimeOffset => "invalid-time-offset",
            Self::Io(..) => "io",
        }
    }
}

impl Debug for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

struct Escape(char);

impl Display for Escape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use std::fmt::Write as _;
        if self.0.is_control() || self.0.is_whitespace() {
            for esc in self.0.escape_default() {
                f.write_char(esc)?;
            }
            Ok(())
        } else {
            f.write_char(self.0)
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChar(c) => write!(f, "invalid character `{}`", Escape(*c)),
            Self::InvalidEscapeValue(c) => {
                write!(f, "invalid escape `\\{}` in string", Escape(*c))
            }
            Self::InvalidUnicode(v) => write!(f, "`{v:#x}` is not a unicode scalar value"),
            Self::InvalidStringDelimiter => f.write_str("too many quotes close this string"),
            Self::UnexpectedEof => f.write_str("unexpected end of input"),
            Self::InvalidKey => f.write_str("key must be bare or quoted"),
            Self::InvalidKeyValuePair => f.write_str("expected `=` after key"),
            Self::InvalidTableHeader => f.write_str("table header names no key"),
            Self::InvalidTableArrayHeader => f.write_str("table array header names no key"),
            Self::InlineDefinition => f.write_str("only a comment may follow a statement"),
            Self::TrailingComma => f.write_str("inline tables do not allow a trailing comma"),
            Self::InvalidValue => f.write_str("unrecognized value"),
            Self::RecursionLimit => f.write_str("value nesting is too deep"),
            Self::InvalidTableNesting => f.write_str("header path crosses a non-table value"),
            Self::DuplicateTableHeader => f.write_str("header names an existing value"),
            Self::ImmutableInlineTable => f.write_str("inline tables cannot be extended"),
            Self::DuplicateKeyValuePair => f.write_str("key already holds a value"),
            Self::TableRedefinition => f.write_str("table defined more than once"),
            Self::KeyValueRedefinition => f.write_str("key already names a table"),
            Self::ExpectedTable => f.write_str("array-of-tables path crosses a non-table value"),
            Self::ExpectedArray => f.write_str("expected an array"),
            Self::ExpectedArrayOfTables => f.write_str("array was not declared with `[[...]]`"),
            Self::KeyValueTypeOverride => f.write_str("dotted key crosses a non-table value"),
            Self::InvalidYear => f.write_str("invalid year"),
            Self::InvalidMonth => f.write_str("month must be 01-12"),
            Self::InvalidDay => f.write_str("day is out of range for its month"),
            Self::InvalidHour => f.write_str("hour must be 00-23"),
            Self::InvalidMinute => f.write_str("minute must be 00-59"),
            Self::InvalidSecond => f.write_str("second must be 00-59"),
            Self::InvalidNanoSecond => f.write_str("fractional seconds support at most 9 digits"),
            Self::InvalidTimeOffset => f.write_str("time offset must lie within ±23:59"),
            Self::Io(kind) => write!(f, "i/o error: {kind}"),
        }
    }
}

#[cfg(test)]
#[path = "./error_tests.rs"]
mod tests;
