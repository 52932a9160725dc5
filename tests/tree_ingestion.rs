#![cfg(feature = "tree")]

use example_records::field::{FieldSpec, ListField, ListFields};
use example_records::ingestion::tree::{examples_from_tree_path, examples_from_tree_str};
use example_records::processors::{Identity, Tokenize};
use example_records::tree::BracketedTreeParser;
use example_records::types::Value;

fn fields() -> ListFields {
    vec![
        ListField::Single(FieldSpec::new("text", Tokenize::lowercase())),
        ListField::Single(FieldSpec::new("label", Identity)),
    ]
}

#[test]
fn tree_bank_one_example_per_line() {
    let exs = examples_from_tree_path("tests/fixtures/sentiment.txt", &fields(), false, &BracketedTreeParser).unwrap();
    assert_eq!(exs.len(), 2);
    assert_eq!(exs[0].get("label"), Some(&Value::Utf8("3".to_string())));
    assert_eq!(exs[1].get("text").and_then(Value::as_list).map(|t| t.len()), Some(2));
}

#[test]
fn tree_bank_with_subtrees() {
    let exs = examples_from_tree_path("tests/fixtures/sentiment.txt", &fields(), true, &BracketedTreeParser).unwrap();
    // 5 subtrees in the first tree, 3 in the second.
    assert_eq!(exs.len(), 8);
    assert_eq!(exs[5].get("label"), Some(&Value::Utf8("1".to_string())));
}

#[test]
fn tree_bank_stops_at_first_malformed_line() {
    let err = examples_from_tree_str("(S a)\n(S b\n", &fields(), false, &BracketedTreeParser).unwrap_err();
    assert!(err.to_string().contains("tree parse error"));
}
