//! Scalar interpreters for integers, floats, and booleans.
//!
//! Each interpreter takes a trimmed byte slice and never looks outside it.
//! `None` means "not this type": the caller falls through to the next
//! interpreter rather than reporting an error.

/// Interpret a TOML integer: optional sign, underscores between digits, and
/// `0x`/`0o`/`0b` prefixes (which admit no sign).
pub(crate) fn integer(s: &[u8]) -> Option<i64> {
    match s {
        [b'0', b'x', rest @ ..] => radix(rest, 16),
        [b'0', b'o', rest @ ..] => radix(rest, 8),
        [b'0', b'b', rest @ ..] => radix(rest, 2),
        _ => decimal(s),
    }
}

fn decimal(s: &[u8]) -> Option<i64> {
    let (negative, digits) = match s {
        [b'-', rest @ ..] => (true, rest),
        [b'+', rest @ ..] => (false, rest),
        _ => (false, s),
    };

    let mut acc: u64 = 0;
    let mut prev_underscore = false;
    let mut has_digit = false;
    let mut leading_zero = false;
    for &b in digits {
        if b == b'_' {
            if !has_digit || prev_underscore {
                return None;
            }
            prev_underscore = true;
            continue;
        }
        if !b.is_ascii_digit() || leading_zero {
            return None;
        }
        if !has_digit && b == b'0' {
            leading_zero = true;
        }
        has_digit = true;
        prev_underscore = false;
        acc = acc.checked_mul(10)?.checked_add((b - b'0') as u64)?;
    }
    if !has_digit || prev_underscore {
        return None;
    }

    let max = if negative {
        (i64::MAX as u64) + 1
    } else {
        i64::MAX as u64
    };
    if acc > max {
        return None;
    }
    Some(if negative {
        (acc as i64).wrapping_neg()
    } else {
        acc as i64
    })
}

fn radix(digits: &[u8], base: u32) -> Option<i64> {
    let mut acc: u64 = 0;
    let mut prev_underscore = false;
    let mut has_digit = false;
    for &b in digits {
        if b == b'_' {
            if !has_digit || prev_underscore {
                return None;
            }
            prev_underscore = true;
            continue;
        }
        let digit = (b as char).to_digit(base)?;
        has_digit = true;
        prev_underscore = false;
        acc = acc.checked_mul(base as u64)?.checked_add(digit as u64)?;
    }
    if !has_digit || prev_underscore || acc > i64::MAX as u64 {
        return None;
    }
    Some(acc as i64)
}

/// Interpret a TOML float: decimal/exponent forms plus signed `inf`/`nan`.
pub(crate) fn float(s: &[u8]) -> Option<f64> {
    let (negative, body) = match s {
        [b'-', rest @ ..] => (true, rest),
        [b'+', rest @ ..] => (false, rest),
        _ => (false, s),
    };

    match body {
        b"inf" => {
            return Some(if negative {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            });
        }
        b"nan" => return Some(f64::NAN.copysign(if negative { -1.0 } else { 1.0 })),
        _ => {}
    }

    // The integral part must not carry a leading zero (00.5, 01e2).
    if let [b'0', b'0'..=b'9' | b'_', ..] = body {
        return None;
    }

    let mut stripped = String::with_capacity(s.len());
    if negative {
        stripped.push('-');
    }
    let mut saw_point_or_exp = false;
    let mut in_exponent = false;
    for (i, &b) in body.iter().enumerate() {
        match b {
            b'0'..=b'9' => stripped.push(b as char),
            b'_' => {
                // Underscores sit strictly between digits.
                let prev_digit = i > 0 && body[i - 1].is_ascii_digit();
                let next_digit = body.get(i + 1).is_some_and(u8::is_ascii_digit);
                if !prev_digit || !next_digit {
                    return None;
                }
            }
            b'.' => {
                // A dot needs digits on both sides and precedes any exponent.
                let prev_digit = i > 0 && body[i - 1].is_ascii_digit();
                let next_digit = body.get(i + 1).is_some_and(u8::is_ascii_digit);
                if !prev_digit || !next_digit || in_exponent {
                    return None;
                }
                saw_point_or_exp = true;
                stripped.push('.');
            }
            b'e' | b'E' => {
                if in_exponent || i == 0 || !body[i - 1].is_ascii_digit() {
                    return None;
                }
                in_exponent = true;
                saw_point_or_exp = true;
                stripped.push('e');
                // Exponent sign, if any, comes immediately after.
                match body.get(i + 1) {
                    Some(&sign @ (b'+' | b'-')) => {
                        if !body.get(i + 2).is_some_and(u8::is_ascii_digit) {
                            return None;
                        }
                        stripped.push(sign as char);
                    }
                    Some(d) if d.is_ascii_digit() => {}
                    _ => return None,
                }
            }
            b'+' | b'-' => {
                // Only legal directly after the exponent marker, which the
                // arm above already consumed into `stripped`.
                if !matches!(body.get(i.wrapping_sub(1)), Some(b'e' | b'E')) {
                    return None;
                }
            }
            _ => return None,
        }
    }

    // Without a dot or exponent this is integer syntax, not a float.
    if !saw_point_or_exp {
        return None;
    }

    match stripped.parse::<f64>() {
        Ok(n) if n.is_finite() => Some(n),
        _ => None,
    }
}

/// Interpret a TOML boolean: the literals `true` and `false`.
pub(crate) fn boolean(s: &[u8]) -> Option<bool> {
    match s {
        b"true" => Some(true),
        b"false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "./scalar_tests.rs"]
mod tests;
