//! Snapshot tests for the pretty printer's deterministic textual form.
//!
//! Multi-clause quantifiers and aggregates are unwieldy to spell out as
//! literal `assert_eq!` strings inline at every call site, so their
//! rendered form is pinned with `insta` instead.

use fsmdol::parse_expression;
use insta::assert_snapshot;

fn pretty(source: &str) -> String {
    parse_expression(source).unwrap().pretty()
}

#[test]
fn quantifier_over_an_attribute_predicate() {
    assert_snapshot!(pretty("for all X in Elements => X'Valid"), @"for all X in Elements => X'Valid");
}

#[test]
fn quantifier_some_with_conjunction_predicate() {
    assert_snapshot!(
        pretty("for some X in Elements => X'Valid and X'Present"),
        @"for some X in Elements => X'Valid and X'Present"
    );
}

#[test]
fn comprehension_with_when_clause() {
    assert_snapshot!(
        pretty("[for X in Elements => X.Tag when X'Valid]"),
        @"[for X in Elements => X.Tag when X'Valid]"
    );
}

#[test]
fn comprehension_without_when_clause_defaults_to_true() {
    assert_snapshot!(pretty("[for X in Elements => X]"), @"[for X in Elements => X when True]");
}

#[test]
fn multi_field_message_aggregate() {
    assert_snapshot!(
        pretty("Header'(Tag => 1, Length => 2, Flags => 0)"),
        @"Header'(Tag => 1, Length => 2, Flags => 0)"
    );
}

#[test]
fn empty_message_aggregate() {
    assert_snapshot!(pretty("Header'(null message)"), @"Header'(null message)");
}

#[test]
fn binding_with_multiple_clauses() {
    assert_snapshot!(
        pretty("Tag where Tag = Header.Tag, Header = Message.Header"),
        @"Tag where Tag = Header.Tag, Header = Message.Header"
    );
}

#[test]
fn nested_quantifier_inside_comprehension_selector() {
    assert_snapshot!(
        pretty("[for X in Outer => for all Y in X => Y'Valid when X'Present]"),
        @"[for X in Outer => for all Y in X => Y'Valid when X'Present]"
    );
}

#[test]
fn mixed_precedence_round_trips_with_parens_only_where_needed() {
    assert_snapshot!(
        pretty("(A + B) * C = D and not E'Valid"),
        @"(A + B) * C = D and not E'Valid"
    );
}
