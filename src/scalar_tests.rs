use super::*;

#[test]
fn decimal_integers() {
    assert_eq!(integer(b"0"), Some(0));
    assert_eq!(integer(b"42"), Some(42));
    assert_eq!(integer(b"+17"), Some(17));
    assert_eq!(integer(b"-100"), Some(-100));
    assert_eq!(integer(b"1_000_000"), Some(1_000_000));
    assert_eq!(integer(b"+0"), Some(0));
    assert_eq!(integer(b"-0"), Some(0));
}

#[test]
fn integer_bounds() {
    assert_eq!(integer(b"9223372036854775807"), Some(i64::MAX));
    assert_eq!(integer(b"-9223372036854775808"), Some(i64::MIN));
    assert_eq!(integer(b"9223372036854775808"), None);
    assert_eq!(integer(b"-9223372036854775809"), None);
}

#[test]
fn prefixed_integers() {
    assert_eq!(integer(b"0xDEAD"), Some(0xDEAD));
    assert_eq!(integer(b"0xdead_beef"), Some(0xDEAD_BEEF));
    assert_eq!(integer(b"0o777"), Some(0o777));
    assert_eq!(integer(b"0b1010"), Some(0b1010));
    // Prefixed forms admit no sign.
    assert_eq!(integer(b"-0x10"), None);
    assert_eq!(integer(b"+0o7"), None);
}

#[test]
fn integer_rejections() {
    assert_eq!(integer(b""), None);
    assert_eq!(integer(b"01"), None);
    assert_eq!(integer(b"_1"), None);
    assert_eq!(integer(b"1_"), None);
    assert_eq!(integer(b"1__2"), None);
    assert_eq!(integer(b"0x"), None);
    assert_eq!(integer(b"0xG"), None);
    assert_eq!(integer(b"0o8"), None);
    assert_eq!(integer(b"0b2"), None);
    assert_eq!(integer(b"1.5"), None);
    assert_eq!(integer(b"abc"), None);
}

#[test]
fn plain_floats() {
    assert_eq!(float(b"3.14"), Some(3.14));
    assert_eq!(float(b"-0.01"), Some(-0.01));
    assert_eq!(float(b"0.0"), Some(0.0));
    assert_eq!(float(b"1e10"), Some(1e10));
    assert_eq!(float(b"1.5E-3"), Some(1.5e-3));
    assert_eq!(float(b"5e+22"), Some(5e22));
    assert_eq!(float(b"1_000.5"), Some(1000.5));
    assert_eq!(float(b"6.626e-34"), Some(6.626e-34));
}

#[test]
fn special_floats() {
    assert_eq!(float(b"inf"), Some(f64::INFINITY));
    assert_eq!(float(b"+inf"), Some(f64::INFINITY));
    assert_eq!(float(b"-inf"), Some(f64::NEG_INFINITY));
    assert!(float(b"nan").unwrap().is_nan());
    assert!(float(b"+nan").unwrap().is_nan());
    assert!(float(b"-nan").unwrap().is_nan());
}

#[test]
fn float_rejections() {
    assert_eq!(float(b""), None);
    // Integer syntax falls through to the integer interpreter.
    assert_eq!(float(b"42"), None);
    // A dot needs digits on both sides.
    assert_eq!(float(b".5"), None);
    assert_eq!(float(b"5."), None);
    assert_eq!(float(b"1.e5"), None);
    // Leading zeros in the integral part.
    assert_eq!(float(b"01.0"), None);
    assert_eq!(float(b"00.5"), None);
    // Malformed exponents and underscores.
    assert_eq!(float(b"1e"), None);
    assert_eq!(float(b"1e+"), None);
    assert_eq!(float(b"1e5e5"), None);
    assert_eq!(float(b"e5"), None);
    assert_eq!(float(b"1_.5"), None);
    assert_eq!(float(b"1._5"), None);
    assert_eq!(float(b"1.2.3"), None);
    // Overflow to infinity is not a valid literal.
    assert_eq!(float(b"9e999"), None);
}

#[test]
fn booleans() {
    assert_eq!(boolean(b"true"), Some(true));
    assert_eq!(boolean(b"false"), Some(false));
    assert_eq!(boolean(b"True"), None);
    assert_eq!(boolean(b"FALSE"), None);
    assert_eq!(boolean(b"truee"), None);
    assert_eq!(boolean(b""), None);
}
