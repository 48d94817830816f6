use super::api::QualifiedNameParser;
use super::api::Rule;
use super::api::{parse_identifier, parse_qualified_name};

use pest::consumes_to;
use pest::fails_with;
use pest::parses_to;

#[test]
fn test_identifier_lowercase() {
    parses_to! {
        parser: QualifiedNameParser,
        input: "foo",
        rule: Rule::identifier,
        tokens: [
            identifier(0, 3)
        ]
    };
}

#[test]
fn test_identifier_with_digits_and_underscore() {
    parses_to! {
        parser: QualifiedNameParser,
        input: "Foo_1",
        rule: Rule::identifier,
        tokens: [
            identifier(0, 5)
        ]
    };
}

#[test]
fn test_identifier_with_dollar() {
    parses_to! {
        parser: QualifiedNameParser,
        input: "$ref",
        rule: Rule::identifier,
        tokens: [
            identifier(0, 4)
        ]
    };
}

#[test]
fn test_identifier_cannot_start_with_digit() {
    fails_with! {
        parser: QualifiedNameParser,
        input: "1foo",
        rule: Rule::identifier,
        positives: vec![Rule::identifier],
        negatives: vec![],
        pos: 0
    };
}

#[test]
fn test_qualified_name_segments() {
    let segments = parse_qualified_name("ns.foo.bar.Baz").unwrap();
    assert_eq!(segments, vec!["ns", "foo", "bar", "Baz"]);
}

#[test]
fn test_qualified_name_single_segment() {
    let segments = parse_qualified_name("ns").unwrap();
    assert_eq!(segments, vec!["ns"]);
}

#[test]
fn test_qualified_name_rejects_empty_segment() {
    assert!(parse_qualified_name("ns..Baz").is_err());
    assert!(parse_qualified_name("ns.foo.").is_err());
    assert!(parse_qualified_name(".ns").is_err());
    assert!(parse_qualified_name("").is_err());
}

#[test]
fn test_qualified_name_rejects_whitespace() {
    assert!(parse_qualified_name("ns. foo").is_err());
    assert!(parse_qualified_name("ns foo").is_err());
}

#[test]
fn test_single_identifier() {
    assert_eq!(parse_identifier("Baz").unwrap(), "Baz");
    assert!(parse_identifier("foo.bar").is_err());
    assert!(parse_identifier("").is_err());
}
