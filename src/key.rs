//! Key utilities: bare-key validation, canonicalization, dotted splitting.
//!
//! Canonical form keeps a quoted key's quotes only when stripping them would
//! change meaning: `"plain"` canonicalizes to `plain`, while `"a.b"` and `""`
//! stay quoted. Lookups canonicalize their argument, so TOML-equivalent
//! spellings of a key hit the same entry.

use crate::error::ErrorKind;

#[inline]
pub(crate) fn is_bare_key_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

/// Non-empty and made of letters, digits, `-`, `_` only.
pub(crate) fn is_bare_key(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(is_bare_key_byte)
}

fn trim(s: &str) -> &str {
    s.trim_matches(|c| c == ' ' || c == '\t')
}

/// Reduce one key token to canonical form.
///
/// A surrounding quote pair is stripped when the inner text is a bare key;
/// otherwise the quoted spelling is kept verbatim. An unquoted token must be
/// bare.
pub(crate) fn canonicalize_key(s: &str) -> Result<&str, ErrorKind> {
    let t = trim(s);
    let bytes = t.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        if (first == b'"' || first == b'\'') && bytes[bytes.len() - 1] == first {
            let inner = trim(&t[1..t.len() - 1]);
            if is_bare_key(inner) {
                return Ok(inner);
            }
            return Ok(t);
        }
    }
    if is_bare_key(t) {
        Ok(t)
    } else {
        Err(ErrorKind::InvalidKey)
    }
}

/// Split a dotted key on `.`, ignoring dots inside quoted spans.
///
/// Parts are trimmed of surrounding space/tab but otherwise untouched; the
/// caller canonicalizes each one. `out` is cleared first so the buffer can be
/// reused across statements.
pub(crate) fn split_dotted_key<'s>(s: &'s str, out: &mut Vec<&'s str>) {
    out.clear();
    let bytes = s.as_bytes();
    let mut quote = 0u8;
    let mut start = 0usize;
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'"' | b'\'' if quote == 0 => quote = b,
            q if q == quote && quote != 0 => quote = 0,
            b'.' if quote == 0 => {
                out.push(trim(&s[start..i]));
                start = i + 1;
            }
            _ => {}
        }
    }
    out.push(trim(&s[start..]));
}

#[cfg(test)]
#[path = "./key_tests.rs"]
mod tests;
