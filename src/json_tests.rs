use crate::arena::Arena;
use crate::parser;

#[track_caller]
fn plain(input: &str) -> String {
    let arena = Arena::new();
    let root = parser::parse(input, &arena)
        .unwrap_or_else(|e| panic!("parse failed for {input:?}: {e}"));
    super::encode(&root, false)
}

#[track_caller]
fn typed(input: &str) -> String {
    let arena = Arena::new();
    let root = parser::parse(input, &arena)
        .unwrap_or_else(|e| panic!("parse failed for {input:?}: {e}"));
    super::encode(&root, true)
}

#[test]
fn plain_scalars() {
    assert_eq!(plain(""), "{}");
    assert_eq!(plain("a = 1"), r#"{"a":1}"#);
    assert_eq!(plain("a = \"v\""), r#"{"a":"v"}"#);
    assert_eq!(plain("a = true"), r#"{"a":true}"#);
    assert_eq!(plain("a = 1.5"), r#"{"a":1.5}"#);
}

#[test]
fn plain_structure_follows_insertion_order() {
    assert_eq!(plain("b = 2\na = 1"), r#"{"b":2,"a":1}"#);
    assert_eq!(plain("[t]\nx = 1"), r#"{"t":{"x":1}}"#);
    assert_eq!(plain("a = [1, 2, [3]]"), r#"{"a":[1,2,[3]]}"#);
    assert_eq!(
        plain("[[p]]\nn = 1\n[[p]]\nn = 2"),
        r#"{"p":[{"n":1},{"n":2}]}"#
    );
}

#[test]
fn plain_string_escaping() {
    assert_eq!(
        plain("s = \"quote \\\" slash \\\\ tab\\t\""),
        r#"{"s":"quote \" slash \\ tab\t"}"#
    );
    assert_eq!(plain("s = \"line\\nbreak\""), r#"{"s":"line\nbreak"}"#);
    assert_eq!(plain("s = \"bell\\u0007\""), r#"{"s":"bell\u0007"}"#);
}

#[test]
fn plain_temporal_values_are_strings() {
    assert_eq!(plain("d = 1979-05-27"), r#"{"d":"1979-05-27"}"#);
    assert_eq!(plain("t = 07:32:00"), r#"{"t":"07:32:00"}"#);
    assert_eq!(
        plain("dt = 1979-05-27T07:32:00Z"),
        r#"{"dt":"1979-05-27T07:32:00Z"}"#
    );
}

#[test]
fn plain_nonfinite_floats() {
    assert_eq!(plain("a = inf"), r#"{"a":"inf"}"#);
    assert_eq!(plain("a = -inf"), r#"{"a":"-inf"}"#);
    assert_eq!(plain("a = nan"), r#"{"a":"nan"}"#);
}

#[test]
fn typed_scalars_wrap_type_and_value() {
    assert_eq!(
        typed("a = 1"),
        r#"{"a":{"type":"integer","value":"1"}}"#
    );
    assert_eq!(
        typed("a = \"v\""),
        r#"{"a":{"type":"string","value":"v"}}"#
    );
    assert_eq!(
        typed("a = true"),
        r#"{"a":{"type":"bool","value":"true"}}"#
    );
    assert_eq!(
        typed("a = 0.5"),
        r#"{"a":{"type":"float","value":"0.5"}}"#
    );
}

#[test]
fn typed_temporal_tags() {
    assert_eq!(
        typed("d = 1979-05-27"),
        r#"{"d":{"type":"date-local","value":"1979-05-27"}}"#
    );
    assert_eq!(
        typed("t = 07:32:00"),
        r#"{"t":{"type":"time-local","value":"07:32:00"}}"#
    );
    // Offset presence splits datetime from datetime-local.
    assert_eq!(
        typed("dt = 1979-05-27T07:32:00Z"),
        r#"{"dt":{"type":"datetime","value":"1979-05-27T07:32:00Z"}}"#
    );
    assert_eq!(
        typed("dt = 1979-05-27T07:32:00-07:00"),
        r#"{"dt":{"type":"datetime","value":"1979-05-27T07:32:00-07:00"}}"#
    );
    assert_eq!(
        typed("dt = 1979-05-27T07:32:00"),
        r#"{"dt":{"type":"datetime-local","value":"1979-05-27T07:32:00"}}"#
    );
}

#[test]
fn typed_containers_stay_structural() {
    assert_eq!(
        typed("a = [1]"),
        r#"{"a":[{"type":"integer","value":"1"}]}"#
    );
    assert_eq!(
        typed("[t]\nx = true"),
        r#"{"t":{"x":{"type":"bool","value":"true"}}}"#
    );
}
